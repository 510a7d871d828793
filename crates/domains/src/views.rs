//! # Visibility
//!
//! Shapes handed to unauthenticated readers. None of these types has a
//! `delete_password` or `reported` field, so redaction cannot be forgotten at
//! serialization time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Reply, ReplyId, Thread, ThreadId};

/// Replies shown per thread in a board listing.
pub const REPLY_PREVIEW_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyView {
    #[serde(rename = "_id")]
    pub id: ReplyId,
    pub text: String,
    pub created_on: DateTime<Utc>,
}

impl From<&Reply> for ReplyView {
    fn from(reply: &Reply) -> Self {
        Self {
            id: reply.id,
            text: reply.text.clone(),
            created_on: reply.created_on,
        }
    }
}

/// One entry of a board listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadSummary {
    #[serde(rename = "_id")]
    pub id: ThreadId,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    /// Newest first, at most `preview` entries.
    pub replies: Vec<ReplyView>,
    /// Total number of replies, not the size of the preview.
    pub replycount: usize,
}

impl ThreadSummary {
    pub fn from_thread(thread: &Thread, preview: usize) -> Self {
        Self {
            id: thread.id,
            text: thread.text.clone(),
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            replies: thread
                .newest_replies(preview)
                .into_iter()
                .map(ReplyView::from)
                .collect(),
            replycount: thread.reply_count(),
        }
    }
}

/// A single thread with every reply, in append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadView {
    #[serde(rename = "_id")]
    pub id: ThreadId,
    pub board: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    pub replies: Vec<ReplyView>,
}

impl From<&Thread> for ThreadView {
    fn from(thread: &Thread) -> Self {
        Self {
            id: thread.id,
            board: thread.board.clone(),
            text: thread.text.clone(),
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            replies: thread.replies.iter().map(ReplyView::from).collect(),
        }
    }
}
