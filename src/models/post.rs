// file: src/models/post.rs
// description: blog post metadata and markdown bundle handed to the site generator
// reference: internal data structures

use crate::converter::to_markdown_string;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMetadata {
    pub id: String,
    pub last_edited_time: DateTime<Utc>,
    pub title: String,
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub slug: String,
    pub thumbnail: Option<String>,
}

/// One converted block: its own markdown plus its converted children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdBlock {
    pub block_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub parent: String,
    #[serde(default)]
    pub children: Vec<MdBlock>,
}

impl MdBlock {
    pub fn new(block_id: &str, kind: &str, parent: String) -> Self {
        Self {
            block_id: block_id.to_string(),
            kind: kind.to_string(),
            parent,
            children: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownBundle {
    pub metadata: PostMetadata,
    pub md_string: String,
    pub blocks: Vec<MdBlock>,
}

impl MarkdownBundle {
    /// Top-level blocks carrying nested content, in page order.
    pub fn nested(&self) -> impl Iterator<Item = &MdBlock> {
        self.blocks.iter().filter(|b| b.has_children())
    }

    /// Full markdown document including nested blocks.
    pub fn render(&self) -> String {
        to_markdown_string(&self.blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> PostMetadata {
        PostMetadata {
            id: "p1".to_string(),
            last_edited_time: "2024-03-02T00:00:00Z".parse().unwrap(),
            title: "Title".to_string(),
            tags: vec!["rust".to_string()],
            description: None,
            date: "2024-03-01T00:00:00Z".parse().unwrap(),
            slug: "title".to_string(),
            thumbnail: None,
        }
    }

    #[test]
    fn test_nested_view_keeps_order() {
        let mut list = MdBlock::new("a", "bulleted_list_item", "- a".to_string());
        list.children
            .push(MdBlock::new("a1", "bulleted_list_item", "- a1".to_string()));
        let mut toggle = MdBlock::new("c", "toggle", "More".to_string());
        toggle
            .children
            .push(MdBlock::new("c1", "paragraph", "hidden".to_string()));

        let bundle = MarkdownBundle {
            metadata: metadata(),
            md_string: String::new(),
            blocks: vec![
                list,
                MdBlock::new("b", "paragraph", "text".to_string()),
                toggle,
            ],
        };

        let nested: Vec<&str> = bundle.nested().map(|b| b.block_id.as_str()).collect();
        assert_eq!(nested, vec!["a", "c"]);
    }

    #[test]
    fn test_metadata_serializes_absent_fields_as_null() {
        let value = serde_json::to_value(metadata()).unwrap();
        assert!(value["description"].is_null());
        assert!(value["thumbnail"].is_null());
        assert_eq!(value["slug"], "title");
    }
}
