//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` is unique.
    users (id) {
        id -> Uuid,
        display_name -> Varchar,
        email -> Varchar,
        role -> Text,
        /// bcrypt modular crypt string; never leaves the adapter.
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects with their owner and denormalised team list.
    projects (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        owner_id -> Uuid,
        team_members -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks. `status` holds the display label (`To Do`, `In Progress`,
    /// `Done`). `project_id` carries no foreign key so tasks outlive their
    /// project.
    tasks (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        project_id -> Uuid,
        assigned_to -> Nullable<Uuid>,
        due_date -> Nullable<Timestamptz>,
        status -> Varchar,
        created_by -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user notifications.
    notifications (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Varchar,
        message -> Text,
        kind -> Text,
        task_id -> Nullable<Uuid>,
        project_id -> Nullable<Uuid>,
        read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task comments, optionally threaded through `parent_id`.
    comments (id) {
        id -> Uuid,
        task_id -> Uuid,
        author_id -> Uuid,
        content -> Text,
        parent_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Task attachments with their content inline.
    file_attachments (id) {
        id -> Uuid,
        task_id -> Uuid,
        filename -> Varchar,
        content_type -> Varchar,
        size_bytes -> Int8,
        uploaded_by -> Uuid,
        payload -> Bytea,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    users,
    projects,
    tasks,
    notifications,
    comments,
    file_attachments,
);
