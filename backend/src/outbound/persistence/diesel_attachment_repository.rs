//! PostgreSQL-backed `AttachmentRepository` implementation using Diesel ORM.
//!
//! Payloads share the row with their metadata; metadata queries select
//! around the `payload` column.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AttachmentRepository, AttachmentRepositoryError};
use crate::domain::{AttachmentId, AttachmentPayload, FileAttachment, TaskId};

use super::diesel_error_mapping::{self, convert_rows};
use super::models::{AttachmentRow, NewAttachmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::file_attachments;

/// Diesel-backed implementation of the attachment repository port.
#[derive(Clone)]
pub struct DieselAttachmentRepository {
    pool: DbPool,
}

impl DieselAttachmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AttachmentRepositoryError {
    diesel_error_mapping::map_pool_error(error, |message| {
        AttachmentRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> AttachmentRepositoryError {
    diesel_error_mapping::map_diesel_error(
        error,
        AttachmentRepositoryError::query,
        AttachmentRepositoryError::connection,
    )
}

#[async_trait]
impl AttachmentRepository for DieselAttachmentRepository {
    async fn insert(
        &self,
        attachment: &FileAttachment,
        payload: &AttachmentPayload,
    ) -> Result<(), AttachmentRepositoryError> {
        let size_bytes = i64::try_from(attachment.size_bytes)
            .map_err(|_| AttachmentRepositoryError::query("attachment size out of range"))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAttachmentRow {
            id: *attachment.id.as_uuid(),
            task_id: *attachment.task_id.as_uuid(),
            filename: &attachment.filename,
            content_type: &attachment.content_type,
            size_bytes,
            uploaded_by: *attachment.uploaded_by.as_uuid(),
            payload: payload.as_bytes(),
            created_at: attachment.created_at,
        };
        diesel::insert_into(file_attachments::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &AttachmentId,
    ) -> Result<Option<FileAttachment>, AttachmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = file_attachments::table
            .filter(file_attachments::id.eq(id.as_uuid()))
            .select(AttachmentRow::as_select())
            .first::<AttachmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(FileAttachment::try_from)
            .transpose()
            .map_err(AttachmentRepositoryError::query)
    }

    async fn find_content(
        &self,
        id: &AttachmentId,
    ) -> Result<Option<AttachmentPayload>, AttachmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let bytes: Option<Vec<u8>> = file_attachments::table
            .filter(file_attachments::id.eq(id.as_uuid()))
            .select(file_attachments::payload)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        bytes
            .map(AttachmentPayload::from_bytes)
            .transpose()
            .map_err(|err| AttachmentRepositoryError::query(err.to_string()))
    }

    async fn list_by_task(
        &self,
        task: &TaskId,
    ) -> Result<Vec<FileAttachment>, AttachmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AttachmentRow> = file_attachments::table
            .filter(file_attachments::task_id.eq(task.as_uuid()))
            .order((file_attachments::created_at.desc(), file_attachments::id.desc()))
            .select(AttachmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows, AttachmentRepositoryError::query)
    }

    async fn delete(&self, id: &AttachmentId) -> Result<bool, AttachmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(file_attachments::table.filter(file_attachments::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }
}
