// file: src/exporter/mod.rs
// description: post export module exports
// reference: internal module structure

pub mod markdown;
pub mod progress;

pub use markdown::{ExportManifest, ExportOptions, ExportedPost, MarkdownExporter, front_matter};
pub use progress::{ExportProgress, ExportStats};
