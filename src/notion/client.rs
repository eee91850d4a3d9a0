// file: src/notion/client.rs
// description: Notion REST API client for database queries and block listing
// reference: https://developers.notion.com/reference/intro

use crate::config::NotionConfig;
use crate::error::{BlogError, Result};
use crate::models::{BlockChildren, QueryResponse};
use crate::notion::query::DatabaseQuery;
use crate::notion::store::DocumentStore;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Largest page size the block children endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

pub struct NotionClient {
    client: Client,
    token: String,
    base_url: String,
    notion_version: String,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Self {
        Self {
            client: Client::new(),
            token: config.token.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            notion_version: config.notion_version.clone(),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", &self.notion_version)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(upstream_error(status.as_u16(), &error_text));
        }

        Ok(response.json().await?)
    }
}

fn upstream_error(status: u16, body: &str) -> BlogError {
    match serde_json::from_str::<NotionErrorBody>(body) {
        Ok(parsed) => BlogError::Upstream {
            status,
            code: parsed.code,
            message: parsed.message,
        },
        Err(_) => BlogError::Upstream {
            status,
            code: "unknown".to_string(),
            message: body.to_string(),
        },
    }
}

#[async_trait]
impl DocumentStore for NotionClient {
    async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<QueryResponse> {
        let url = format!("{}/databases/{}/query", self.base_url, database_id);

        debug!("Querying database {}", database_id);

        let response = self
            .authorize(self.client.post(&url))
            .header("Content-Type", "application/json")
            .json(query)
            .send()
            .await?;

        let body: QueryResponse = Self::read_json(response).await?;
        debug!(
            "Database {} returned {} pages (has_more: {})",
            database_id,
            body.results.len(),
            body.has_more
        );
        Ok(body)
    }

    async fn list_block_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<BlockChildren> {
        let url = format!("{}/blocks/{}/children", self.base_url, block_id);

        let mut params = vec![("page_size", MAX_PAGE_SIZE.to_string())];
        if let Some(cursor) = start_cursor {
            params.push(("start_cursor", cursor.to_string()));
        }

        debug!("Listing children of block {}", block_id);

        let response = self
            .authorize(self.client.get(&url))
            .query(&params)
            .send()
            .await?;

        Self::read_json(response).await
    }
}
