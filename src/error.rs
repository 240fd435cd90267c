// src/error.rs
// =============================================================================
// Error types for the link library.
//
// Hyperlink construction and HTML scanning never fail; they degrade to a
// best-effort result instead. Only two operations can reject their input:
// - joining relative links onto a base domain that isn't a bare origin
// - filtering a collection by a field name that doesn't exist
// =============================================================================

use thiserror::Error;

/// Errors returned by the link library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// The base domain handed to `join`/`join_all` is not a bare
    /// `<scheme>://<authority>` origin.
    #[error("invalid base domain '{domain}': {reason}")]
    InvalidDomain { domain: String, reason: String },

    /// A filter named a field other than scheme, authority, path, query or fragment.
    #[error("invalid filter field '{0}': expected one of scheme, authority, path, query, fragment")]
    InvalidFilterField(String),
}

impl LinkError {
    pub(crate) fn invalid_domain(domain: &str, reason: impl Into<String>) -> Self {
        LinkError::InvalidDomain {
            domain: domain.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, LinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_domain_message() {
        let err = LinkError::invalid_domain("example.com", "missing scheme");
        assert_eq!(
            err.to_string(),
            "invalid base domain 'example.com': missing scheme"
        );
    }

    #[test]
    fn test_invalid_filter_field_message() {
        let err = LinkError::InvalidFilterField("host".to_string());
        assert!(err.to_string().starts_with("invalid filter field 'host'"));
    }
}
