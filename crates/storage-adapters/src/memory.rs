//! In-process implementation of `ThreadRepository`.
//!
//! Threads are kept whole in a `DashMap`. `save` compares and bumps the
//! version while holding the shard's write lock, which gives the same
//! atomic-replace guarantee a document store would.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use domains::{DomainError, Result, Thread, ThreadId, ThreadRepository};

#[derive(Default)]
pub struct InMemoryThreadRepository {
    threads: DashMap<ThreadId, Thread>,
}

impl InMemoryThreadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

#[async_trait]
impl ThreadRepository for InMemoryThreadRepository {
    async fn insert(&self, thread: &Thread) -> Result<()> {
        match self.threads.entry(thread.id) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "thread {} already exists",
                thread.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(thread.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: ThreadId) -> Result<Option<Thread>> {
        Ok(self.threads.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_by_board(&self, board: &str, limit: usize) -> Result<Vec<Thread>> {
        // Same order as the Postgres listing: bump, then creation, then id, newest first.
        let mut threads: Vec<Thread> = self
            .threads
            .iter()
            .filter(|entry| entry.board == board)
            .map(|entry| entry.value().clone())
            .collect();
        threads.sort_by(|a, b| {
            (b.bumped_on, b.created_on, b.id).cmp(&(a.bumped_on, a.created_on, a.id))
        });
        threads.truncate(limit);
        Ok(threads)
    }

    async fn save(&self, thread: &Thread) -> Result<Thread> {
        let mut stored = self
            .threads
            .get_mut(&thread.id)
            .ok_or_else(|| DomainError::thread_not_found(thread.id))?;

        if stored.version != thread.version {
            return Err(DomainError::Conflict(format!(
                "thread {} changed since it was read (expected version {}, found {})",
                thread.id, thread.version, stored.version
            )));
        }

        let mut next = thread.clone();
        next.version += 1;
        *stored = next.clone();
        Ok(next)
    }

    async fn delete_by_id(&self, id: ThreadId) -> Result<bool> {
        Ok(self.threads.remove(&id).is_some())
    }
}
