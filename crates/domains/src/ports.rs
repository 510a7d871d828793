//! # Ports
//!
//! Any store must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{Thread, ThreadId};

/// Document-store contract for thread aggregates. Replies travel inside
/// their thread; there is no separate reply collection.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Stores a freshly created thread.
    async fn insert(&self, thread: &Thread) -> Result<()>;

    async fn find_by_id(&self, id: ThreadId) -> Result<Option<Thread>>;

    /// At most `limit` threads of `board`, most recently bumped first.
    /// Ties must resolve the same way on every call.
    async fn list_by_board(&self, board: &str, limit: usize) -> Result<Vec<Thread>>;

    /// Replaces the whole document if its stored `version` still equals
    /// `thread.version`, and returns what was written (with the version
    /// incremented). Fails with `Conflict` if someone saved in between and
    /// with `NotFound` if the thread is gone.
    async fn save(&self, thread: &Thread) -> Result<Thread>;

    /// Removes the aggregate and its replies. Returns whether anything was removed.
    async fn delete_by_id(&self, id: ThreadId) -> Result<bool>;
}
