//! Project records and team-list normalisation.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::{ProjectId, ProjectTitle, UserId};

/// A project with exactly one owner and an owner-managed team.
///
/// ## Invariants
/// - `owner_id` never changes after creation.
/// - `team_members` holds no duplicates and never contains the owner; the
///   owner's access never depends on the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub title: ProjectTitle,
    pub description: String,
    pub owner_id: UserId,
    pub team_members: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Start a project with an empty team.
    pub fn new(
        id: ProjectId,
        title: ProjectTitle,
        description: impl Into<String>,
        owner_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description: description.into(),
            owner_id,
            team_members: Vec::new(),
            created_at,
        }
    }

    /// Whether `user` owns this project.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    /// Whether `user` appears in the team list.
    pub fn has_member(&self, user: &UserId) -> bool {
        self.team_members.contains(user)
    }

    /// Replace the team, normalising the candidate list.
    #[must_use]
    pub fn with_team(mut self, candidates: impl IntoIterator<Item = UserId>) -> Self {
        self.team_members = normalise_team(&self.owner_id, candidates);
        self
    }
}

/// Drop duplicates and the owner from a candidate team list, keeping the
/// first occurrence of each member in order.
///
/// # Examples
/// ```
/// use taskhub::domain::{normalise_team, UserId};
///
/// let owner = UserId::random();
/// let member = UserId::random();
/// let team = normalise_team(&owner, [member, owner, member]);
/// assert_eq!(team, vec![member]);
/// ```
pub fn normalise_team(owner: &UserId, candidates: impl IntoIterator<Item = UserId>) -> Vec<UserId> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| candidate != owner && seen.insert(*candidate))
        .collect()
}
