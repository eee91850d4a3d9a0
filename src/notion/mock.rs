// file: src/notion/mock.rs
// description: in-memory document store for deterministic tests
// reference: internal test doubles

use crate::error::{BlogError, Result};
use crate::models::{Block, BlockChildren, Page, QueryResponse};
use crate::notion::query::DatabaseQuery;
use crate::notion::store::DocumentStore;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Scripted reply to the next database query.
#[derive(Debug, Clone)]
pub enum QueryReply {
    Pages { pages: Vec<Page>, has_more: bool },
    Upstream { status: u16, message: String },
}

/// Test double for [`DocumentStore`].
///
/// Database queries are answered from a FIFO of scripted replies. Block
/// children are served from a map and split into batches of `page_size`
/// with numeric cursors.
#[derive(Debug)]
pub struct MockStore {
    replies: Mutex<VecDeque<QueryReply>>,
    children: Mutex<HashMap<String, Vec<Block>>>,
    page_size: usize,
    queries: Mutex<Vec<(String, DatabaseQuery)>>,
    children_calls: Mutex<Vec<(String, Option<String>)>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::with_page_size(100)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            children: Mutex::new(HashMap::new()),
            page_size: page_size.max(1),
            queries: Mutex::new(Vec::new()),
            children_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_pages(&self, pages: Vec<Page>) {
        self.push_reply(QueryReply::Pages {
            pages,
            has_more: false,
        });
    }

    pub fn push_reply(&self, reply: QueryReply) {
        self.replies
            .lock()
            .expect("mock store lock poisoned")
            .push_back(reply);
    }

    pub fn set_children(&self, block_id: &str, blocks: Vec<Block>) {
        self.children
            .lock()
            .expect("mock store lock poisoned")
            .insert(block_id.to_string(), blocks);
    }

    /// Every query received so far, with its database id.
    pub fn queries(&self) -> Vec<(String, DatabaseQuery)> {
        self.queries.lock().expect("mock store lock poisoned").clone()
    }

    /// Every block children request received so far, with its cursor.
    pub fn children_calls(&self) -> Vec<(String, Option<String>)> {
        self.children_calls
            .lock()
            .expect("mock store lock poisoned")
            .clone()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MockStore {
    async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<QueryResponse> {
        self.queries
            .lock()
            .expect("mock store lock poisoned")
            .push((database_id.to_string(), query.clone()));

        let reply = self
            .replies
            .lock()
            .expect("mock store lock poisoned")
            .pop_front();

        match reply {
            Some(QueryReply::Pages { pages, has_more }) => Ok(QueryResponse {
                results: pages,
                has_more,
                next_cursor: has_more.then(|| "next".to_string()),
            }),
            Some(QueryReply::Upstream { status, message }) => Err(BlogError::Upstream {
                status,
                code: "mock_error".to_string(),
                message,
            }),
            None => Ok(QueryResponse {
                results: Vec::new(),
                has_more: false,
                next_cursor: None,
            }),
        }
    }

    async fn list_block_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<BlockChildren> {
        self.children_calls
            .lock()
            .expect("mock store lock poisoned")
            .push((block_id.to_string(), start_cursor.map(str::to_string)));

        let children = self.children.lock().expect("mock store lock poisoned");
        let Some(blocks) = children.get(block_id) else {
            return Err(BlogError::Upstream {
                status: 404,
                code: "object_not_found".to_string(),
                message: format!("Could not find block with ID: {}", block_id),
            });
        };

        let start = match start_cursor {
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| BlogError::Validation(format!("bad cursor: {}", cursor)))?,
            None => 0,
        };
        let end = (start + self.page_size).min(blocks.len());
        let has_more = end < blocks.len();

        Ok(BlockChildren {
            results: blocks[start.min(end)..end].to_vec(),
            has_more,
            next_cursor: has_more.then(|| end.to_string()),
        })
    }
}
