//! # Domain Models
//!
//! A board is only a partition key; the thread is the aggregate and exclusively
//! owns its replies. Identities are UUID v4 tokens assigned when the record is
//! first created and are opaque to callers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text a reply carries once it has been soft-deleted.
pub const DELETED_REPLY_TEXT: &str = "[deleted]";

/// Identity of a thread aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(Uuid);

impl ThreadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ThreadId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ThreadId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ThreadId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Identity of a reply, unique within its owning thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplyId(Uuid);

impl ReplyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReplyId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ReplyId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ReplyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ReplyId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Top-level post on a board. This is the full stored record, including the
/// fields that readers must never see (see [`crate::views`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    #[serde(rename = "_id", alias = "id")]
    pub id: ThreadId,
    pub board: String,
    pub text: String,
    pub delete_password: String,
    pub created_on: DateTime<Utc>,
    /// The timestamp used for sorting threads by activity
    pub bumped_on: DateTime<Utc>,
    #[serde(default)]
    pub reported: bool,
    /// Append order, which is also chronological order.
    #[serde(default)]
    pub replies: Vec<Reply>,
    /// Optimistic-concurrency token. Stores increment it on every save.
    #[serde(default)]
    pub version: u64,
}

impl Thread {
    pub fn new(
        board: impl Into<String>,
        text: impl Into<String>,
        delete_password: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ThreadId::new(),
            board: board.into(),
            text: text.into(),
            delete_password: delete_password.into(),
            created_on: now,
            bumped_on: now,
            reported: false,
            replies: Vec::new(),
            version: 0,
        }
    }

    /// Appends a reply and bumps the thread. Returns the new reply's id.
    pub fn append_reply(
        &mut self,
        text: impl Into<String>,
        delete_password: impl Into<String>,
        now: DateTime<Utc>,
    ) -> ReplyId {
        let reply = Reply::new(text, delete_password, now);
        let id = reply.id;
        self.replies.push(reply);
        self.bump(now);
        id
    }

    /// `bumped_on` never moves backwards, even if the clock does.
    fn bump(&mut self, now: DateTime<Utc>) {
        if now > self.bumped_on {
            self.bumped_on = now;
        }
    }

    pub fn reply(&self, id: ReplyId) -> Option<&Reply> {
        self.replies.iter().find(|r| r.id == id)
    }

    pub fn reply_mut(&mut self, id: ReplyId) -> Option<&mut Reply> {
        self.replies.iter_mut().find(|r| r.id == id)
    }

    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }

    pub fn report(&mut self) {
        self.reported = true;
    }

    /// Up to `limit` replies, newest `created_on` first. Replies sharing a
    /// timestamp come out in reverse append order.
    pub fn newest_replies(&self, limit: usize) -> Vec<&Reply> {
        let mut newest: Vec<&Reply> = self.replies.iter().rev().collect();
        newest.sort_by(|a, b| b.created_on.cmp(&a.created_on));
        newest.truncate(limit);
        newest
    }
}

/// A child post. Never exists outside of its thread's `replies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    #[serde(rename = "_id", alias = "id")]
    pub id: ReplyId,
    pub text: String,
    pub delete_password: String,
    pub created_on: DateTime<Utc>,
    #[serde(default)]
    pub reported: bool,
}

impl Reply {
    pub fn new(
        text: impl Into<String>,
        delete_password: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReplyId::new(),
            text: text.into(),
            delete_password: delete_password.into(),
            created_on: now,
            reported: false,
        }
    }

    /// Replaces the content with [`DELETED_REPLY_TEXT`]. Every other field is kept.
    pub fn soft_delete(&mut self) {
        self.text = DELETED_REPLY_TEXT.to_string();
    }

    pub fn is_deleted(&self) -> bool {
        self.text == DELETED_REPLY_TEXT
    }

    pub fn report(&mut self) {
        self.reported = true;
    }
}
