// file: src/converter/mod.rs
// description: block-to-markdown conversion module exports
// reference: internal module structure

pub mod markdown;
pub mod render;
pub mod rich_text;

pub use markdown::{MarkdownConverter, NotionToMarkdown, block_to_markdown, to_markdown_string};
pub use render::{excerpt, render_html};
pub use rich_text::{annotate, rich_text_to_markdown};
