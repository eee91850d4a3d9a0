// file: src/notion/mod.rs
// description: Notion document store access module exports
// reference: internal module structure

pub mod client;
pub mod mock;
pub mod query;
pub mod store;

pub use client::NotionClient;
pub use mock::{MockStore, QueryReply};
pub use query::{Condition, DatabaseQuery, Filter, FormulaCondition, Sort, SortDirection};
pub use store::DocumentStore;
