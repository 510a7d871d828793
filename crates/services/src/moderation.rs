//! # Moderation
//!
//! Outcomes of the password-gated and open moderation actions. Callers tell
//! them apart by their text, so `message()` is part of the public contract.

use std::fmt;

/// Result of a thread or reply deletion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Success,
    IncorrectPassword,
    ThreadNotFound,
    ReplyNotFound,
}

impl DeleteOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            DeleteOutcome::Success => "success",
            DeleteOutcome::IncorrectPassword => "incorrect password",
            DeleteOutcome::ThreadNotFound => "thread not found",
            DeleteOutcome::ReplyNotFound => "reply not found",
        }
    }
}

impl fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of a report. Reporting needs no password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    Reported,
    ThreadNotFound,
    ReplyNotFound,
}

impl ReportOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ReportOutcome::Reported => "reported",
            ReportOutcome::ThreadNotFound => "thread not found",
            ReportOutcome::ReplyNotFound => "reply not found",
        }
    }
}

impl fmt::Display for ReportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The only access control in the system: the supplied password must equal
/// the one stored with the post, byte for byte.
pub fn password_matches(stored: &str, supplied: &str) -> bool {
    stored == supplied
}
