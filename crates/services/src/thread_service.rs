//! # ThreadService
//!
//! Thread lifecycle on a board: creation, the bump-ordered listing,
//! password-gated hard delete and the open report action.

use std::sync::Arc;

use chrono::Utc;
use domains::{Result, Thread, ThreadId, ThreadRepository, ThreadSummary, REPLY_PREVIEW_LEN};
use tracing::{debug, info, warn};

use crate::moderation::{password_matches, DeleteOutcome, ReportOutcome};
use crate::validation::{parse_id, required};

/// Threads returned by a board listing.
pub const BOARD_LISTING_LIMIT: usize = 10;

#[derive(Clone)]
pub struct ThreadService {
    repo: Arc<dyn ThreadRepository>,
}

impl ThreadService {
    pub fn new(repo: Arc<dyn ThreadRepository>) -> Self {
        Self { repo }
    }

    /// Creates a thread and returns the full record, password included.
    pub async fn create_thread(
        &self,
        board: &str,
        text: &str,
        delete_password: &str,
    ) -> Result<Thread> {
        let board = required("board", board)?;
        let text = required("text", text)?;
        let delete_password = required("delete_password", delete_password)?;

        let thread = Thread::new(board, text, delete_password, Utc::now());
        self.repo.insert(&thread).await?;

        info!(thread_id = %thread.id, board, "thread created");
        Ok(thread)
    }

    /// The ten most recently bumped threads of `board`, each with its three
    /// newest replies and everything sensitive stripped.
    pub async fn list_threads(&self, board: &str) -> Result<Vec<ThreadSummary>> {
        let threads = self.repo.list_by_board(board, BOARD_LISTING_LIMIT).await?;
        debug!(board, count = threads.len(), "listed threads");

        Ok(threads
            .iter()
            .map(|t| ThreadSummary::from_thread(t, REPLY_PREVIEW_LEN))
            .collect())
    }

    /// Removes the thread and every reply in it if the password matches.
    pub async fn delete_thread(&self, thread_id: &str, delete_password: &str) -> Result<DeleteOutcome> {
        let Some(thread) = self.find(thread_id).await? else {
            return Ok(DeleteOutcome::ThreadNotFound);
        };

        if !password_matches(&thread.delete_password, delete_password) {
            warn!(thread_id = %thread.id, "thread delete refused: incorrect password");
            return Ok(DeleteOutcome::IncorrectPassword);
        }

        if !self.repo.delete_by_id(thread.id).await? {
            // Deleted by someone else between the lookup and now.
            return Ok(DeleteOutcome::ThreadNotFound);
        }

        info!(thread_id = %thread.id, board = %thread.board, "thread deleted");
        Ok(DeleteOutcome::Success)
    }

    /// Flags the thread for moderators. Idempotent.
    pub async fn report_thread(&self, thread_id: &str) -> Result<ReportOutcome> {
        let Some(mut thread) = self.find(thread_id).await? else {
            return Ok(ReportOutcome::ThreadNotFound);
        };

        if !thread.reported {
            thread.report();
            self.repo.save(&thread).await?;
            info!(thread_id = %thread.id, "thread reported");
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

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{DomainError, MockThreadRepository};
    use mockall::predicate::eq;

    fn service(repo: MockThreadRepository) -> ThreadService {
        ThreadService::new(Arc::new(repo))
    }

    fn stored_thread() -> Thread {
        Thread::new("b", "op", "secret", Utc::now())
    }

    #[tokio::test]
    async fn create_rejects_blank_text_without_touching_the_store() {
        let mut repo = MockThreadRepository::new();
        repo.expect_insert().never();

        let err = service(repo).create_thread("b", "   ", "pw").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_surfaces_store_failure() {
        let mut repo = MockThreadRepository::new();
        repo.expect_insert()
            .returning(|_| Err(DomainError::Infrastructure("connection refused".into())));

        let err = service(repo).create_thread("b", "hi", "pw").await.unwrap_err();
        assert!(matches!(err, DomainError::Infrastructure(_)));
    }

    #[tokio::test]
    async fn listing_asks_the_store_for_ten() {
        let mut repo = MockThreadRepository::new();
        repo.expect_list_by_board()
            .withf(|board, limit| board == "b" && *limit == BOARD_LISTING_LIMIT)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let listed = service(repo).list_threads("b").await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn wrong_password_never_reaches_delete() {
        let thread = stored_thread();
        let id = thread.id;
        let mut repo = MockThreadRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(thread.clone())));
        repo.expect_delete_by_id().never();

        let outcome = service(repo)
            .delete_thread(&id.to_string(), "nope")
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::IncorrectPassword);
    }

    #[tokio::test]
    async fn unparseable_id_is_not_found() {
        let mut repo = MockThreadRepository::new();
        repo.expect_find_by_id().never();
        let svc = service(repo);

        assert_eq!(
            svc.delete_thread("zzz", "pw").await.unwrap(),
            DeleteOutcome::ThreadNotFound
        );
        assert_eq!(svc.report_thread("zzz").await.unwrap(), ReportOutcome::ThreadNotFound);
    }

    #[tokio::test]
    async fn delete_racing_another_delete_reports_not_found() {
        let thread = stored_thread();
        let id = thread.id;
        let mut repo = MockThreadRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(thread.clone())));
        repo.expect_delete_by_id().with(eq(id)).returning(|_| Ok(false));

        let outcome = service(repo)
            .delete_thread(&id.to_string(), "secret")
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::ThreadNotFound);
    }

    #[tokio::test]
    async fn reporting_an_already_reported_thread_skips_the_save() {
        let mut thread = stored_thread();
        thread.report();
        let id = thread.id;
        let mut repo = MockThreadRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(thread.clone())));
        repo.expect_save().never();

        let outcome = service(repo).report_thread(&id.to_string()).await.unwrap();
        assert_eq!(outcome, ReportOutcome::Reported);
    }

    #[tokio::test]
    async fn lookup_failure_is_an_error_not_an_outcome() {
        let mut repo = MockThreadRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(DomainError::Infrastructure("timeout".into())));

        let result = service(repo)
            .delete_thread(&ThreadId::new().to_string(), "pw")
            .await;
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
