//! Driving port for progress analytics.

use async_trait::async_trait;

use crate::domain::analytics::{OverviewStats, ProjectProgress};
use crate::domain::{Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsQuery: Send + Sync {
    /// One entry per project visible to the actor.
    async fn progress(&self, actor: &UserId) -> Result<Vec<ProjectProgress>, Error>;

    /// Combined statistics over the projects the actor owns.
    async fn overview(&self, actor: &UserId) -> Result<OverviewStats, Error>;
}
