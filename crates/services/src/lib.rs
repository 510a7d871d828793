//! Use cases of the message board: the thread/reply lifecycle and the
//! password gate in front of deletion.

pub mod moderation;
pub mod reply_service;
pub mod thread_service;
pub mod validation;

pub use moderation::{password_matches, DeleteOutcome, ReportOutcome};
pub use reply_service::ReplyService;
pub use thread_service::{ThreadService, BOARD_LISTING_LIMIT};
