//! MongoDB access layer.
//!
//! Handlers never touch the driver directly: each collection gets a thin
//! store type, and identifier validation happens exactly once, behind
//! [`parse_id`]. Documents come back as raw [`Document`]s so the gateway's
//! fixed field projection applies no matter what shape is actually stored.

pub mod orders;
pub mod services;

use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Database};
use thiserror::Error;

pub use orders::{DeleteOutcome, OrderStore};
pub use services::ServiceStore;

/// Hard cap on list endpoints.
pub const LIST_CAP: i64 = 100;
/// Hard cap on token-prefix search results.
pub const SEARCH_CAP: i64 = 10;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The supplied identifier is not a valid ObjectId.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}

/// The single identifier predicate for the whole crate: a string is a valid
/// id iff it parses as a hex-encoded ObjectId.
pub fn is_valid_id(id: &str) -> bool {
    ObjectId::parse_str(id).is_ok()
}

/// Validate and parse an identifier, failing fast on malformed input.
pub fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Connect to the cluster and hand out the database handle.
pub async fn connect(uri: &str, database: &str) -> Result<Database, StoreError> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client.database(database))
}

/// Escape regex metacharacters so a search query always matches literally.
pub(crate) fn escape_regex(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(
            c,
            '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_id_is_24_hex_chars() {
        assert!(is_valid_id("507f1f77bcf86cd799439011"));
        assert!(is_valid_id("ffffffffffffffffffffffff"));
    }

    #[test]
    fn invalid_ids_are_rejected() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("not-an-id"));
        assert!(!is_valid_id("507f1f77bcf86cd79943901")); // 23 chars
        assert!(!is_valid_id("507f1f77bcf86cd7994390111")); // 25 chars
        assert!(!is_valid_id("507f1f77bcf86cd79943901g")); // non-hex
    }

    #[test]
    fn parse_id_reports_the_offending_input() {
        let err = parse_id("abc").unwrap_err();
        match err {
            StoreError::InvalidId(id) => assert_eq!(id, "abc"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn escape_regex_neutralizes_metacharacters() {
        assert_eq!(escape_regex("abc123"), "abc123");
        assert_eq!(escape_regex("a+b"), r"a\+b");
        assert_eq!(escape_regex("^a.b$"), r"\^a\.b\$");
        assert_eq!(escape_regex(r"a\b"), r"a\\b");
    }
}
