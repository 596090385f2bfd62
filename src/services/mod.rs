//! Typed wrappers for the content endpoints. They share the authorized
//! transport, so a `401` from any of them ends the session exactly like an
//! auth call would. Upload endpoints use the multipart profile.

pub mod community;
pub mod notes;
pub mod notices;
pub mod questions;
pub mod results;
pub mod solutions;
pub mod subjects;
pub mod types;
pub mod users;

use serde_json::Value;

use crate::api::ApiResponse;

/// Envelope for endpoints whose payload shape varies between deployments.
pub type Envelope = ApiResponse<Value>;

/// Joins ids for the `deleteIds` query parameter; `None` when empty.
pub(crate) fn join_ids(ids: &[String]) -> Option<String> {
    if ids.is_empty() {
        None
    } else {
        Some(ids.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_ids_skips_empty() {
        assert_eq!(join_ids(&[]), None);
        assert_eq!(
            join_ids(&["a1".to_string(), "b2".to_string()]).as_deref(),
            Some("a1,b2")
        );
    }
}
