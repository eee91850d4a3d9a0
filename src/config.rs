// file: src/config.rs
// description: application configuration management with toml and environment support
// reference: https://docs.rs/config

use crate::error::{BlogError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Bare environment variable holding the Notion database identifier.
pub const DATABASE_ID_VAR: &str = "DATABASE_ID";
/// Bare environment variable holding the Notion integration token.
pub const TOKEN_VAR: &str = "NOTION_TOKEN";
/// Prefix for structured overrides, e.g. `NOTION_BLOG__LISTING__POLICY`.
pub const ENV_PREFIX: &str = "NOTION_BLOG";

pub const DEFAULT_API_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub notion: NotionConfig,
    pub properties: PropertyNames,
    pub converter: ConverterConfig,
    pub listing: ListingConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotionConfig {
    pub token: String,
    pub database_id: String,
    pub api_base_url: String,
    pub notion_version: String,
}

/// Names of the database columns read from every post page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PropertyNames {
    pub title: String,
    pub tags: String,
    pub description: String,
    pub date: String,
    pub slug: String,
    pub thumbnail: String,
    pub published: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub parse_child_pages: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingConfig {
    pub policy: ListingPolicy,
    pub slug_property_kind: SlugPropertyKind,
}

/// What the lister does with a page that fails metadata extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingPolicy {
    #[default]
    FailFast,
    SkipMalformed,
}

/// Column type used when filtering by slug.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlugPropertyKind {
    #[default]
    Formula,
    RichText,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub pretty: bool,
    pub html: bool,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            database_id: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
        }
    }
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            title: "Name".to_string(),
            tags: "Tags".to_string(),
            description: "Description".to_string(),
            date: "Date".to_string(),
            slug: "Slug".to_string(),
            thumbnail: "Thumb".to_string(),
            published: "Published".to_string(),
        }
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            parse_child_pages: false,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./exports"),
            pretty: false,
            html: false,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::load_from(path, vars)
    }

    /// Builds the configuration from an optional file and an explicit set of
    /// environment variables. `DATABASE_ID` and `NOTION_TOKEN` win over both
    /// the file and the prefixed variables.
    pub fn load_from(path: Option<&Path>, vars: HashMap<String, String>) -> Result<Self> {
        let database_id = vars.get(DATABASE_ID_VAR).cloned();
        let token = vars.get(TOKEN_VAR).cloned();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .set_override_option("notion.database_id", database_id)
            .map_err(|e| BlogError::Config(e.to_string()))?
            .set_override_option("notion.token", token)
            .map_err(|e| BlogError::Config(e.to_string()))?;

        let settings = builder
            .build()
            .map_err(|e| BlogError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| BlogError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if self.notion.token.trim().is_empty() {
            return Err(BlogError::Config(format!(
                "Notion token is missing (set {} or notion.token)",
                TOKEN_VAR
            )));
        }

        if self.notion.database_id.trim().is_empty() {
            return Err(BlogError::Config(format!(
                "database id is missing (set {} or notion.database_id)",
                DATABASE_ID_VAR
            )));
        }

        Validator::validate_url(&self.notion.api_base_url)
            .map_err(|e| BlogError::Config(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.notion.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.properties.thumbnail, "Thumb");
        assert!(!config.converter.parse_child_pages);
        assert_eq!(config.listing.policy, ListingPolicy::FailFast);
        assert_eq!(config.listing.slug_property_kind, SlugPropertyKind::Formula);
    }

    #[test]
    fn test_bare_env_vars() {
        let config = Config::load_from(
            None,
            vars(&[(DATABASE_ID_VAR, "db-123"), (TOKEN_VAR, "secret_abc")]),
        )
        .unwrap();

        assert_eq!(config.notion.database_id, "db-123");
        assert_eq!(config.notion.token, "secret_abc");
    }

    #[test]
    fn test_missing_token_rejected() {
        let err = Config::load_from(None, vars(&[(DATABASE_ID_VAR, "db-123")])).unwrap_err();
        assert!(matches!(err, BlogError::Config(_)));
    }

    #[test]
    fn test_missing_database_id_rejected() {
        let err = Config::load_from(None, vars(&[(TOKEN_VAR, "secret")])).unwrap_err();
        assert!(err.to_string().contains(DATABASE_ID_VAR));
    }

    #[test]
    fn test_prefixed_env_overrides() {
        let config = Config::load_from(
            None,
            vars(&[
                (DATABASE_ID_VAR, "db"),
                (TOKEN_VAR, "tok"),
                ("NOTION_BLOG__LISTING__POLICY", "skip_malformed"),
                ("NOTION_BLOG__CONVERTER__PARSE_CHILD_PAGES", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.listing.policy, ListingPolicy::SkipMalformed);
        assert!(config.converter.parse_child_pages);
    }

    #[test]
    fn test_file_values_and_env_precedence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blog.toml");
        fs::write(
            &path,
            r#"
[notion]
token = "file-token"
database_id = "file-db"

[properties]
thumbnail = "Cover"

[export]
output_dir = "site/posts"
pretty = true
"#,
        )
        .unwrap();

        let config = Config::load_from(Some(&path), vars(&[(TOKEN_VAR, "env-token")])).unwrap();

        assert_eq!(config.notion.token, "env-token");
        assert_eq!(config.notion.database_id, "file-db");
        assert_eq!(config.properties.thumbnail, "Cover");
        assert_eq!(config.properties.title, "Name");
        assert_eq!(config.export.output_dir, PathBuf::from("site/posts"));
        assert!(config.export.pretty);
    }

    #[test]
    fn test_missing_file_is_optional() {
        let config = Config::load_from(
            Some(Path::new("/nonexistent/notion_blog.toml")),
            vars(&[(DATABASE_ID_VAR, "db"), (TOKEN_VAR, "tok")]),
        );
        assert!(config.is_ok());
    }
}
