// file: src/notion/store.rs
// description: document store capability used by the post repository and converter
// reference: https://docs.rs/async-trait

use crate::error::Result;
use crate::models::{BlockChildren, QueryResponse};
use crate::notion::query::DatabaseQuery;
use async_trait::async_trait;

/// Read access to a Notion workspace.
///
/// Implementations must be shareable across tasks; the repository holds them
/// behind an `Arc<dyn DocumentStore>`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Runs one database query and returns a single batch of results.
    async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<QueryResponse>;

    /// Lists one batch of the direct children of a block or page.
    async fn list_block_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<BlockChildren>;
}
