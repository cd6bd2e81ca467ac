//! File attachment domain services.
//!
//! Payload validation (base64 decoding and the size limit) happens while
//! building a [`NewAttachment`], so nothing reaches storage unchecked.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AttachmentCommand, AttachmentDownload, AttachmentQuery, AttachmentRepository,
    ProjectRepository, TaskRepository,
};
use crate::domain::service_support::{
    TaskInProject, load_visible_task, map_attachment_error, rename_not_found,
};
use crate::domain::{AttachmentId, Error, FileAttachment, NewAttachment, TaskId, UserId};

fn attachment_not_found() -> Error {
    Error::not_found("attachment not found")
}

/// Attachment service implementing the attachment driving ports.
#[derive(Clone)]
pub struct AttachmentService<A, T, P> {
    attachments: Arc<A>,
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<A, T, P> AttachmentService<A, T, P> {
    /// Create a new service over its repositories.
    pub fn new(
        attachments: Arc<A>,
        tasks: Arc<T>,
        projects: Arc<P>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            attachments,
            tasks,
            projects,
            clock,
        }
    }
}

impl<A, T, P> AttachmentService<A, T, P>
where
    A: AttachmentRepository,
    T: TaskRepository,
    P: ProjectRepository,
{
    /// Load an attachment whose task the actor can see.
    async fn load_visible(
        &self,
        actor: &UserId,
        id: &AttachmentId,
    ) -> Result<(FileAttachment, TaskInProject), Error> {
        let attachment = self
            .attachments
            .find_by_id(id)
            .await
            .map_err(map_attachment_error)?
            .ok_or_else(attachment_not_found)?;
        let task = load_visible_task(
            self.tasks.as_ref(),
            self.projects.as_ref(),
            actor,
            &attachment.task_id,
        )
        .await
        .map_err(|error| rename_not_found(error, attachment_not_found))?;
        Ok((attachment, task))
    }
}

#[async_trait]
impl<A, T, P> AttachmentCommand for AttachmentService<A, T, P>
where
    A: AttachmentRepository,
    T: TaskRepository,
    P: ProjectRepository,
{
    async fn upload(
        &self,
        actor: &UserId,
        attachment: NewAttachment,
    ) -> Result<FileAttachment, Error> {
        load_visible_task(
            self.tasks.as_ref(),
            self.projects.as_ref(),
            actor,
            &attachment.task_id,
        )
        .await?;

        let stored = FileAttachment {
            id: AttachmentId::random(),
            task_id: attachment.task_id,
            filename: attachment.filename,
            content_type: attachment.content_type,
            size_bytes: attachment.payload.len() as u64,
            uploaded_by: *actor,
            created_at: self.clock.utc(),
        };
        self.attachments
            .insert(&stored, &attachment.payload)
            .await
            .map_err(map_attachment_error)?;
        info!(
            attachment_id = %stored.id,
            task_id = %stored.task_id,
            size_bytes = stored.size_bytes,
            "stored attachment"
        );
        Ok(stored)
    }

    async fn delete(&self, actor: &UserId, id: &AttachmentId) -> Result<(), Error> {
        let (attachment, task) = self.load_visible(actor, id).await?;
        if attachment.uploaded_by != *actor && !task.is_project_owner(actor) {
            return Err(Error::forbidden(
                "only the uploader or the project owner may delete this file",
            ));
        }
        let deleted = self
            .attachments
            .delete(id)
            .await
            .map_err(map_attachment_error)?;
        if !deleted {
            return Err(attachment_not_found());
        }
        info!(attachment_id = %id, "deleted attachment");
        Ok(())
    }
}

#[async_trait]
impl<A, T, P> AttachmentQuery for AttachmentService<A, T, P>
where
    A: AttachmentRepository,
    T: TaskRepository,
    P: ProjectRepository,
{
    async fn list(&self, actor: &UserId, task_id: &TaskId) -> Result<Vec<FileAttachment>, Error> {
        load_visible_task(self.tasks.as_ref(), self.projects.as_ref(), actor, task_id).await?;
        self.attachments
            .list_by_task(task_id)
            .await
            .map_err(map_attachment_error)
    }

    async fn download(
        &self,
        actor: &UserId,
        id: &AttachmentId,
    ) -> Result<AttachmentDownload, Error> {
        let (attachment, _) = self.load_visible(actor, id).await?;
        let payload = self
            .attachments
            .find_content(id)
            .await
            .map_err(map_attachment_error)?
            .ok_or_else(attachment_not_found)?;
        Ok(AttachmentDownload {
            attachment,
            payload,
        })
    }
}

#[cfg(test)]
#[path = "attachment_service_tests.rs"]
mod tests;
