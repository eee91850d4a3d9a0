// file: src/posts/mod.rs
// description: blog post metadata extraction and retrieval module exports
// reference: internal module structure

pub mod extractor;
pub mod repository;

pub use extractor::{MetadataExtractor, extract_metadata, parse_date};
pub use repository::PostRepository;
