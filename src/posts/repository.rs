// file: src/posts/repository.rs
// description: published post listing and single post retrieval by slug
// reference: https://developers.notion.com/reference/post-database-query

use crate::config::{Config, ListingConfig, ListingPolicy, PropertyNames, SlugPropertyKind};
use crate::converter::{MarkdownConverter, NotionToMarkdown};
use crate::error::{BlogError, Result};
use crate::models::{MarkdownBundle, PostMetadata};
use crate::notion::{DatabaseQuery, DocumentStore, Filter, NotionClient, Sort};
use crate::posts::extractor::MetadataExtractor;
use crate::utils::Validator;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct PostRepository {
    store: Arc<dyn DocumentStore>,
    converter: Arc<dyn MarkdownConverter>,
    database_id: String,
    extractor: MetadataExtractor,
    listing: ListingConfig,
}

impl PostRepository {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        converter: Arc<dyn MarkdownConverter>,
        database_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            converter,
            database_id: database_id.into(),
            extractor: MetadataExtractor::default(),
            listing: ListingConfig::default(),
        }
    }

    /// Wires the HTTP client and converter described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let store: Arc<dyn DocumentStore> = Arc::new(NotionClient::new(&config.notion));
        let converter = Arc::new(NotionToMarkdown::new(
            store.clone(),
            config.converter.clone(),
        ));

        Self::new(store, converter, config.notion.database_id.clone())
            .with_properties(config.properties.clone())
            .with_listing(config.listing.clone())
    }

    pub fn with_properties(mut self, names: PropertyNames) -> Self {
        self.extractor = MetadataExtractor::new(names);
        self
    }

    pub fn with_listing(mut self, listing: ListingConfig) -> Self {
        self.listing = listing;
        self
    }

    fn names(&self) -> &PropertyNames {
        self.extractor.names()
    }

    fn published_query(&self) -> DatabaseQuery {
        DatabaseQuery::new()
            .filter(Filter::checkbox_equals(&self.names().published, true))
            .sort(Sort::descending(&self.names().date))
    }

    fn slug_query(&self, slug: &str) -> DatabaseQuery {
        let property = &self.names().slug;
        let filter = match self.listing.slug_property_kind {
            SlugPropertyKind::Formula => Filter::formula_string_equals(property, slug),
            SlugPropertyKind::RichText => Filter::rich_text_equals(property, slug),
        };
        DatabaseQuery::new().filter(filter)
    }

    /// Published posts, newest first, from a single query batch.
    pub async fn list_published(&self) -> Result<Vec<PostMetadata>> {
        let response = self
            .store
            .query_database(&self.database_id, &self.published_query())
            .await?;

        if response.has_more {
            debug!(
                "Database {} has more published posts than one batch; only the first {} are listed",
                self.database_id,
                response.results.len()
            );
        }

        let mut posts = Vec::with_capacity(response.results.len());
        for page in &response.results {
            match self.extractor.extract(page) {
                Ok(metadata) => posts.push(metadata),
                Err(e) if self.listing.policy == ListingPolicy::SkipMalformed && e.is_malformed() => {
                    warn!("Skipping post: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        info!("Listed {} published posts", posts.len());
        Ok(posts)
    }

    /// The post whose slug matches exactly, converted to markdown.
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<MarkdownBundle> {
        Validator::validate_slug(slug)?;

        let response = self
            .store
            .query_database(&self.database_id, &self.slug_query(slug))
            .await?;

        if response.results.len() > 1 {
            warn!(
                "{} posts share slug '{}', using the first",
                response.results.len(),
                slug
            );
        }

        let page = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| BlogError::NotFound {
                slug: slug.to_string(),
            })?;

        let metadata = self.extractor.extract(&page)?;
        self.bundle_for(metadata).await
    }

    /// Converts the page behind already extracted metadata, skipping the slug
    /// lookup.
    pub async fn bundle_for(&self, metadata: PostMetadata) -> Result<MarkdownBundle> {
        let blocks = self.converter.page_to_markdown(&metadata.id).await?;

        let md_string = blocks
            .iter()
            .map(|block| block.parent.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        debug!(
            "Converted post '{}' into {} blocks ({} chars)",
            metadata.slug,
            blocks.len(),
            md_string.len()
        );

        Ok(MarkdownBundle {
            metadata,
            md_string,
            blocks,
        })
    }

    /// Like [`get_post_by_slug`](Self::get_post_by_slug) but maps a missing post to `None`.
    pub async fn find_post_by_slug(&self, slug: &str) -> Result<Option<MarkdownBundle>> {
        match self.get_post_by_slug(slug).await {
            Ok(bundle) => Ok(Some(bundle)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// One-row query against the database, used as a connectivity check.
    pub async fn probe(&self) -> Result<usize> {
        let response = self
            .store
            .query_database(&self.database_id, &DatabaseQuery::new().page_size(1))
            .await?;
        Ok(response.results.len())
    }
}
