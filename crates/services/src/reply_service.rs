//! # ReplyService
//!
//! Replies live inside their thread, so every operation here is a
//! load / mutate / save of the whole thread document. The save is guarded by
//! the document's version; a concurrent writer turns into `Conflict` rather
//! than a lost update.

use std::sync::Arc;

use chrono::Utc;
use domains::{DomainError, ReplyId, Result, Thread, ThreadId, ThreadRepository, ThreadView};
use tracing::{debug, info, warn};

use crate::moderation::{password_matches, DeleteOutcome, ReportOutcome};
use crate::validation::{parse_id, required};

#[derive(Clone)]
pub struct ReplyService {
    repo: Arc<dyn ThreadRepository>,
}

impl ReplyService {
    pub fn new(repo: Arc<dyn ThreadRepository>) -> Self {
        Self { repo }
    }

    /// Appends a reply, bumps the thread and returns the updated full record.
    pub async fn create_reply(
        &self,
        thread_id: &str,
        text: &str,
        delete_password: &str,
    ) -> Result<Thread> {
        let text = required("text", text)?;
        let delete_password = required("delete_password", delete_password)?;

        let mut thread = self
            .find(thread_id)
            .await?
            .ok_or_else(|| DomainError::thread_not_found(thread_id))?;

        let reply_id = thread.append_reply(text, delete_password, Utc::now());
        let saved = self.repo.save(&thread).await?;

        info!(thread_id = %saved.id, reply_id = %reply_id, "reply created");
        Ok(saved)
    }

    /// The thread with all of its replies, redacted for public viewing.
    pub async fn get_thread(&self, thread_id: &str) -> Result<ThreadView> {
        let thread = self
            .find(thread_id)
            .await?
            .ok_or_else(|| DomainError::thread_not_found(thread_id))?;

        debug!(thread_id = %thread.id, replies = thread.reply_count(), "viewed thread");
        Ok(ThreadView::from(&thread))
    }

    /// Soft delete: the reply keeps its place and metadata, only its text is
    /// replaced.
    pub async fn delete_reply(
        &self,
        thread_id: &str,
        reply_id: &str,
        delete_password: &str,
    ) -> Result<DeleteOutcome> {
        let Some(mut thread) = self.find(thread_id).await? else {
            return Ok(DeleteOutcome::ThreadNotFound);
        };
        let tid = thread.id;
        let Some(reply) = parse_id::<ReplyId>(reply_id).and_then(|id| thread.reply_mut(id)) else {
            return Ok(DeleteOutcome::ReplyNotFound);
        };

        if !password_matches(&reply.delete_password, delete_password) {
            warn!(thread_id = %tid, reply_id = %reply.id, "reply delete refused: incorrect password");
            return Ok(DeleteOutcome::IncorrectPassword);
        }

        reply.soft_delete();
        let reply_id = reply.id;
        self.repo.save(&thread).await?;

        info!(thread_id = %tid, reply_id = %reply_id, "reply deleted");
        Ok(DeleteOutcome::Success)
    }

    /// Flags a reply for moderators. Idempotent.
    pub async fn report_reply(&self, thread_id: &str, reply_id: &str) -> Result<ReportOutcome> {
        let Some(mut thread) = self.find(thread_id).await? else {
            return Ok(ReportOutcome::ThreadNotFound);
        };
        let Some(reply) = parse_id::<ReplyId>(reply_id).and_then(|id| thread.reply_mut(id)) else {
            return Ok(ReportOutcome::ReplyNotFound);
        };

        if !reply.reported {
            reply.report();
            let reply_id = reply.id;
            self.repo.save(&thread).await?;
            info!(thread_id = %thread.id, reply_id = %reply_id, "reply reported");
        }
        Ok(ReportOutcome::Reported)
    }

    async fn find(&self, thread_id: &str) -> Result<Option<Thread>> {
        match parse_id::<ThreadId>(thread_id) {
            Some(id) => self.repo.find_by_id(id).await,
            None => Ok(None),
        }
    }
}
