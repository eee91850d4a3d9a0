// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod converter;
pub mod error;
pub mod exporter;
pub mod models;
pub mod notion;
pub mod posts;
pub mod utils;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::{
    Config, ConverterConfig, ExportConfig, ListingConfig, ListingPolicy, NotionConfig,
    PropertyNames, SlugPropertyKind,
};
pub use converter::{MarkdownConverter, NotionToMarkdown, to_markdown_string};
pub use error::{BlogError, Result};
pub use exporter::{ExportManifest, ExportOptions, ExportStats, MarkdownExporter};
pub use models::{MarkdownBundle, MdBlock, Page, PostMetadata};
pub use notion::{DocumentStore, MockStore, NotionClient};
pub use posts::{MetadataExtractor, PostRepository, extract_metadata};
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, Validator};
