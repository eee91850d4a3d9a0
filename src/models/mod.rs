// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod block;
pub mod page;
pub mod post;

pub use block::{Block, BlockChildren, BlockKind};
pub use page::{
    Annotations, DateValue, FileObject, FormulaValue, Page, PropertyValue, QueryResponse,
    RichText, RichTextKind, SelectOption,
};
pub use post::{MarkdownBundle, MdBlock, PostMetadata};
