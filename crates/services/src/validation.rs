//! Input checks shared by thread and reply creation.

use std::str::FromStr;

use domains::{DomainError, Result};

/// Rejects a missing or whitespace-only required field. The value itself is
/// stored untouched.
pub fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(value)
}

/// Parses a caller-supplied id. A token that does not parse cannot name an
/// existing record, so callers treat `None` as "not found".
pub fn parse_id<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::ThreadId;

    #[test]
    fn blank_fields_are_rejected() {
        assert!(matches!(required("text", ""), Err(DomainError::Validation(_))));
        assert!(matches!(required("text", "  \n"), Err(DomainError::Validation(_))));
        assert_eq!(required("text", " hi ").ok(), Some(" hi "));
    }

    #[test]
    fn garbage_ids_do_not_parse() {
        assert!(parse_id::<ThreadId>("12345").is_none());
        let id = ThreadId::new();
        assert_eq!(parse_id::<ThreadId>(&id.to_string()), Some(id));
    }
}
