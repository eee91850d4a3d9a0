// file: src/utils/validation.rs
// description: input validation and sanitizing helpers
// reference: input validation patterns

use crate::error::{BlogError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    /// Slugs are matched verbatim by the store; only a blank slug is refused.
    pub fn validate_slug(slug: &str) -> Result<()> {
        if slug.trim().is_empty() {
            return Err(BlogError::Validation("Slug is empty".to_string()));
        }

        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(BlogError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_directory(path: &Path) -> Result<()> {
        if path.exists() && !path.is_dir() {
            return Err(BlogError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// File name stem for a slug; anything outside `[A-Za-z0-9._-]` becomes `-`.
    pub fn sanitize_file_name(slug: &str) -> String {
        let sanitized: String = slug
            .trim()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '-'
                }
            })
            .collect();

        let sanitized = sanitized.trim_start_matches('.');
        if sanitized.is_empty() {
            "untitled".to_string()
        } else {
            sanitized.to_string()
        }
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let cut: String = text.chars().take(max_chars).collect();
            format!("{}...", cut)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_slug() {
        assert!(Validator::validate_slug("hello-world").is_ok());
        assert!(Validator::validate_slug("2024_recap").is_ok());
        assert!(Validator::validate_slug("").is_err());
        assert!(Validator::validate_slug("   ").is_err());
        assert!(Validator::validate_slug("notes/rust").is_ok());
        assert!(Validator::validate_slug("two words").is_ok());
    }

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://api.notion.com/v1").is_ok());
        assert!(Validator::validate_url("http://localhost:8080").is_ok());
        assert!(Validator::validate_url("api.notion.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_directory() {
        let temp = TempDir::new().unwrap();
        assert!(Validator::validate_directory(temp.path()).is_ok());
        assert!(Validator::validate_directory(&temp.path().join("new")).is_ok());

        let file = temp.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(Validator::validate_directory(&file).is_err());
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(Validator::sanitize_file_name("hello-world"), "hello-world");
        assert_eq!(Validator::sanitize_file_name("a/b\\c"), "a-b-c");
        assert_eq!(Validator::sanitize_file_name("../etc"), "-etc");
        assert_eq!(Validator::sanitize_file_name("  "), "untitled");
        assert_eq!(Validator::sanitize_file_name("日記"), "日記");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
        assert_eq!(Validator::truncate_text("日本語の文章", 3), "日本語...");
    }
}
