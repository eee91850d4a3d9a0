// file: src/models/block.rs
// description: raw Notion content blocks as returned by the block children endpoint
// reference: https://developers.notion.com/reference/block

use crate::models::page::{FileObject, RichText};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub kind: BlockKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockChildren {
    pub results: Vec<Block>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph {
        paragraph: TextBlock,
    },
    #[serde(rename = "heading_1")]
    Heading1 {
        heading_1: HeadingBlock,
    },
    #[serde(rename = "heading_2")]
    Heading2 {
        heading_2: HeadingBlock,
    },
    #[serde(rename = "heading_3")]
    Heading3 {
        heading_3: HeadingBlock,
    },
    BulletedListItem {
        bulleted_list_item: TextBlock,
    },
    NumberedListItem {
        numbered_list_item: TextBlock,
    },
    ToDo {
        to_do: ToDoBlock,
    },
    Toggle {
        toggle: TextBlock,
    },
    Quote {
        quote: TextBlock,
    },
    Callout {
        callout: CalloutBlock,
    },
    Code {
        code: CodeBlock,
    },
    Divider {},
    Equation {
        equation: EquationBlock,
    },
    Image {
        image: FileObject,
    },
    Video {
        video: FileObject,
    },
    File {
        file: FileObject,
    },
    Pdf {
        pdf: FileObject,
    },
    Bookmark {
        bookmark: LinkBlock,
    },
    Embed {
        embed: LinkBlock,
    },
    LinkPreview {
        link_preview: LinkBlock,
    },
    ChildPage {
        child_page: TitleBlock,
    },
    ChildDatabase {
        child_database: TitleBlock,
    },
    Table {
        table: TableBlock,
    },
    TableRow {
        table_row: TableRowBlock,
    },
    ColumnList {},
    Column {},
    SyncedBlock {
        #[serde(default)]
        synced_block: SyncedBlockData,
    },
    #[serde(other)]
    Unsupported,
}

impl BlockKind {
    /// The Notion `type` string of this block.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::Heading1 { .. } => "heading_1",
            Self::Heading2 { .. } => "heading_2",
            Self::Heading3 { .. } => "heading_3",
            Self::BulletedListItem { .. } => "bulleted_list_item",
            Self::NumberedListItem { .. } => "numbered_list_item",
            Self::ToDo { .. } => "to_do",
            Self::Toggle { .. } => "toggle",
            Self::Quote { .. } => "quote",
            Self::Callout { .. } => "callout",
            Self::Code { .. } => "code",
            Self::Divider {} => "divider",
            Self::Equation { .. } => "equation",
            Self::Image { .. } => "image",
            Self::Video { .. } => "video",
            Self::File { .. } => "file",
            Self::Pdf { .. } => "pdf",
            Self::Bookmark { .. } => "bookmark",
            Self::Embed { .. } => "embed",
            Self::LinkPreview { .. } => "link_preview",
            Self::ChildPage { .. } => "child_page",
            Self::ChildDatabase { .. } => "child_database",
            Self::Table { .. } => "table",
            Self::TableRow { .. } => "table_row",
            Self::ColumnList {} => "column_list",
            Self::Column {} => "column",
            Self::SyncedBlock { .. } => "synced_block",
            Self::Unsupported => "unsupported",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeadingBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub is_toggleable: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToDoBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalloutBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Icon {
    #[serde(default)]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationBlock {
    pub expression: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkBlock {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleBlock {
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableBlock {
    #[serde(default)]
    pub table_width: usize,
    #[serde(default)]
    pub has_column_header: bool,
    #[serde(default)]
    pub has_row_header: bool,
}

/// `synced_from` is null on the original block and points at it on every
/// duplicate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncedBlockData {
    #[serde(default)]
    pub synced_from: Option<SyncedFrom>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncedFrom {
    pub block_id: String,
}

impl BlockKind {
    /// Id of the original block a duplicate synced block mirrors.
    pub fn synced_source(&self) -> Option<&str> {
        match self {
            Self::SyncedBlock { synced_block } => synced_block
                .synced_from
                .as_ref()
                .map(|from| from.block_id.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableRowBlock {
    #[serde(default)]
    pub cells: Vec<Vec<RichText>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paragraph_block() {
        let block: Block = serde_json::from_value(json!({
            "object": "block",
            "id": "b1",
            "parent": { "type": "page_id", "page_id": "p1" },
            "has_children": false,
            "archived": false,
            "type": "paragraph",
            "paragraph": {
                "rich_text": [{ "type": "text", "plain_text": "Hi", "href": null }],
                "color": "default"
            }
        }))
        .unwrap();

        assert_eq!(block.id, "b1");
        assert_eq!(block.kind.name(), "paragraph");
        match block.kind {
            BlockKind::Paragraph { paragraph } => {
                assert_eq!(paragraph.rich_text[0].plain_text, "Hi")
            }
            other => panic!("unexpected block: {:?}", other),
        }
    }

    #[test]
    fn test_heading_and_divider() {
        let heading: Block = serde_json::from_value(json!({
            "id": "h",
            "has_children": false,
            "type": "heading_2",
            "heading_2": { "rich_text": [], "is_toggleable": false }
        }))
        .unwrap();
        assert_eq!(heading.kind.name(), "heading_2");

        let divider: Block = serde_json::from_value(json!({
            "id": "d",
            "has_children": false,
            "type": "divider",
            "divider": {}
        }))
        .unwrap();
        assert_eq!(divider.kind.name(), "divider");
    }

    #[test]
    fn test_synced_block_source() {
        let original: Block = serde_json::from_value(json!({
            "id": "orig",
            "has_children": true,
            "type": "synced_block",
            "synced_block": { "synced_from": null }
        }))
        .unwrap();
        assert_eq!(original.kind.name(), "synced_block");
        assert_eq!(original.kind.synced_source(), None);

        let duplicate: Block = serde_json::from_value(json!({
            "id": "copy",
            "has_children": true,
            "type": "synced_block",
            "synced_block": {
                "synced_from": { "type": "block_id", "block_id": "orig" }
            }
        }))
        .unwrap();
        assert_eq!(duplicate.kind.synced_source(), Some("orig"));
    }

    #[test]
    fn test_unknown_block_type() {
        let block: Block = serde_json::from_value(json!({
            "id": "u",
            "has_children": false,
            "type": "ai_block",
            "ai_block": {}
        }))
        .unwrap();
        assert!(matches!(block.kind, BlockKind::Unsupported));
    }
}
