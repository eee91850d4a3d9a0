// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlogError>;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No post found for slug '{slug}'")]
    NotFound { slug: String },

    #[error("Malformed page {page_id}: property '{field}' {reason}")]
    MalformedRecord {
        page_id: String,
        field: String,
        reason: String,
    },

    #[error("Notion API error {status} ({code}): {message}")]
    Upstream {
        status: u16,
        code: String,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BlogError {
    pub fn malformed(page_id: &str, field: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            page_id: page_id.to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message() {
        let err = BlogError::malformed("abc", "Slug", "is missing");
        assert_eq!(
            err.to_string(),
            "Malformed page abc: property 'Slug' is missing"
        );
        assert!(err.is_malformed());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_message() {
        let err = BlogError::NotFound {
            slug: "hello".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "No post found for slug 'hello'");
    }
}
