//! Behaviour tests for ownership, team and assignment visibility.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

// Each suite uses a different slice of the shared harness.
#[allow(dead_code)]
#[path = "support/services.rs"]
mod services;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use services::ServiceWorld;
use taskhub::domain::{ErrorCode, TaskStatus};

#[fixture]
fn world() -> ServiceWorld {
    ServiceWorld::new()
}

fn can_see_project(world: &ServiceWorld, user: &str, project: &str) -> bool {
    let result = world.block_on(
        world
            .state
            .projects_query
            .get(&world.user(user), &world.project(project)),
    );
    match result {
        Ok(_) => true,
        Err(error) => {
            assert_eq!(error.code(), ErrorCode::NotFound);
            false
        }
    }
}

fn can_see_task(world: &ServiceWorld, user: &str, task: &str) -> bool {
    let actor = world.user(user);
    let direct = world.block_on(world.state.tasks_query.get(&actor, &world.task(task)));
    let listed = world
        .block_on(world.state.tasks_query.list(&actor, None))
        .expect("listing never fails")
        .iter()
        .any(|candidate| candidate.id == world.task(task));
    assert_eq!(direct.is_ok(), listed, "get and list agree");
    listed
}

#[given("a registered user named {name}")]
fn a_registered_user_named(world: &ServiceWorld, name: String) {
    world.register(&name);
}

#[given("{owner} owns a project titled \"{title}\"")]
fn owns_a_project_titled(world: &ServiceWorld, owner: String, title: String) {
    world.create_project(&owner, &title);
}

#[given("{owner} added the task \"{task}\" to \"{project}\"")]
fn added_the_task(world: &ServiceWorld, owner: String, task: String, project: String) {
    world
        .create_task(&owner, &project, &task, None, TaskStatus::ToDo)
        .expect("task created");
}

fn set_single_member(world: &ServiceWorld, owner: &str, project: &str, member: &str) {
    let project = world
        .set_team(owner, project, &[member])
        .expect("team updated");
    assert_eq!(project.team_members, vec![world.user(member)]);
}

#[given("{owner} has already set the team of \"{project}\" to {member}")]
fn has_set_the_team(world: &ServiceWorld, owner: String, project: String, member: String) {
    set_single_member(world, &owner, &project, &member);
}

#[when("{owner} sets the team of \"{project}\" to {member}")]
fn sets_the_team(world: &ServiceWorld, owner: String, project: String, member: String) {
    set_single_member(world, &owner, &project, &member);
}

#[when("{owner} clears the team of \"{project}\"")]
fn clears_the_team(world: &ServiceWorld, owner: String, project: String) {
    let project = world.set_team(&owner, &project, &[]).expect("team cleared");
    assert!(project.team_members.is_empty());
}

#[when("{owner} assigns the task \"{task}\" in \"{project}\" to {assignee}")]
fn assigns_the_task(
    world: &ServiceWorld,
    owner: String,
    task: String,
    project: String,
    assignee: String,
) {
    world
        .create_task(&owner, &project, &task, Some(&assignee), TaskStatus::ToDo)
        .expect("task created");
}

#[then("{user} can see the project \"{project}\"")]
fn can_see_the_project(world: &ServiceWorld, user: String, project: String) {
    assert!(can_see_project(world, &user, &project));
}

#[then("{user} cannot see the project \"{project}\"")]
fn cannot_see_the_project(world: &ServiceWorld, user: String, project: String) {
    assert!(!can_see_project(world, &user, &project));
}

#[then("{user} can see the task \"{task}\"")]
fn can_see_the_task(world: &ServiceWorld, user: String, task: String) {
    assert!(can_see_task(world, &user, &task));
}

#[then("{user} cannot see the task \"{task}\"")]
fn cannot_see_the_task(world: &ServiceWorld, user: String, task: String) {
    assert!(!can_see_task(world, &user, &task));
}

#[scenario(path = "tests/features/project_visibility.feature", index = 0)]
fn team_members_see_the_project(world: ServiceWorld) {
    drop(world);
}

#[scenario(path = "tests/features/project_visibility.feature", index = 1)]
fn removing_a_member_revokes_access(world: ServiceWorld) {
    drop(world);
}

#[scenario(path = "tests/features/project_visibility.feature", index = 2)]
fn assignment_reveals_a_single_task(world: ServiceWorld) {
    drop(world);
}
