// file: src/converter/markdown.rs
// description: Notion page block tree converted to markdown blocks
// reference: https://developers.notion.com/reference/get-block-children

use crate::config::ConverterConfig;
use crate::converter::rich_text::rich_text_to_markdown;
use crate::error::Result;
use crate::models::block::TableBlock;
use crate::models::page::plain_text;
use crate::models::{Block, BlockKind, FileObject, MdBlock, RichText};
use crate::notion::DocumentStore;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tracing::debug;

const INDENT: &str = "    ";

#[async_trait]
pub trait MarkdownConverter: Send + Sync {
    /// Converts the content of a page into ordered markdown blocks.
    async fn page_to_markdown(&self, page_id: &str) -> Result<Vec<MdBlock>>;
}

pub struct NotionToMarkdown {
    store: Arc<dyn DocumentStore>,
    config: ConverterConfig,
}

impl NotionToMarkdown {
    pub fn new(store: Arc<dyn DocumentStore>, config: ConverterConfig) -> Self {
        Self { store, config }
    }

    /// Lists every direct child of `block_id`, following cursors.
    async fn fetch_children(&self, block_id: &str) -> Result<Vec<Block>> {
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let batch = self
                .store
                .list_block_children(block_id, cursor.as_deref())
                .await?;
            blocks.extend(batch.results);

            match batch.next_cursor {
                Some(next) if batch.has_more => cursor = Some(next),
                _ => break,
            }
        }

        debug!("Fetched {} child blocks of {}", blocks.len(), block_id);
        Ok(blocks)
    }

    fn convert_blocks<'a>(&'a self, blocks: Vec<Block>) -> BoxFuture<'a, Result<Vec<MdBlock>>> {
        async move {
            let mut converted = Vec::with_capacity(blocks.len());
            let mut list_number = 0;

            for block in blocks {
                list_number = match block.kind {
                    BlockKind::NumberedListItem { .. } => list_number + 1,
                    _ => 0,
                };
                converted.push(self.convert_block(block, list_number).await?);
            }

            Ok(converted)
        }
        .boxed()
    }

    async fn convert_block(&self, block: Block, list_number: usize) -> Result<MdBlock> {
        let kind = block.kind.name();

        match &block.kind {
            BlockKind::Table { table } => {
                let rows = self.fetch_children(&block.id).await?;
                return Ok(MdBlock::new(&block.id, kind, render_table(table, &rows)));
            }
            BlockKind::ChildPage { child_page } if !self.config.parse_child_pages => {
                let link = format!("[{}]({})", child_page.title, notion_url(&block.id));
                return Ok(MdBlock::new(&block.id, kind, link));
            }
            _ => {}
        }

        let mut md = MdBlock::new(&block.id, kind, block_to_markdown(&block, list_number));
        let source = block.kind.synced_source();
        if block.has_children || source.is_some() {
            let children = self.fetch_children(source.unwrap_or(&block.id)).await?;
            md.children = self.convert_blocks(children).await?;
        }

        Ok(md)
    }
}

#[async_trait]
impl MarkdownConverter for NotionToMarkdown {
    async fn page_to_markdown(&self, page_id: &str) -> Result<Vec<MdBlock>> {
        let blocks = self.fetch_children(page_id).await?;
        self.convert_blocks(blocks).await
    }
}

fn notion_url(id: &str) -> String {
    format!("https://www.notion.so/{}", id.replace('-', ""))
}

fn prefix_lines(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn file_link(file: &FileObject, fallback: &str) -> String {
    let url = file.url().unwrap_or_default();
    let caption = plain_text(&file.caption);
    let label = if !caption.is_empty() {
        caption
    } else {
        file.name.clone().unwrap_or_else(|| fallback.to_string())
    };
    format!("[{}]({})", label, url)
}

fn url_link(url: &str, caption: &[RichText]) -> String {
    let caption = plain_text(caption);
    let label = if caption.is_empty() {
        url
    } else {
        caption.as_str()
    };
    format!("[{}]({})", label, url)
}

/// Markdown for a single block, without its children.
pub fn block_to_markdown(block: &Block, list_number: usize) -> String {
    match &block.kind {
        BlockKind::Paragraph { paragraph } => rich_text_to_markdown(&paragraph.rich_text),
        BlockKind::Heading1 { heading_1 } => {
            format!("# {}", rich_text_to_markdown(&heading_1.rich_text))
        }
        BlockKind::Heading2 { heading_2 } => {
            format!("## {}", rich_text_to_markdown(&heading_2.rich_text))
        }
        BlockKind::Heading3 { heading_3 } => {
            format!("### {}", rich_text_to_markdown(&heading_3.rich_text))
        }
        BlockKind::BulletedListItem { bulleted_list_item } => {
            format!("- {}", rich_text_to_markdown(&bulleted_list_item.rich_text))
        }
        BlockKind::NumberedListItem { numbered_list_item } => format!(
            "{}. {}",
            list_number.max(1),
            rich_text_to_markdown(&numbered_list_item.rich_text)
        ),
        BlockKind::ToDo { to_do } => format!(
            "- [{}] {}",
            if to_do.checked { "x" } else { " " },
            rich_text_to_markdown(&to_do.rich_text)
        ),
        BlockKind::Toggle { toggle } => rich_text_to_markdown(&toggle.rich_text),
        BlockKind::Quote { quote } => prefix_lines(&rich_text_to_markdown(&quote.rich_text), "> "),
        BlockKind::Callout { callout } => {
            let text = rich_text_to_markdown(&callout.rich_text);
            let text = match callout.icon.as_ref().and_then(|i| i.emoji.as_deref()) {
                Some(emoji) => format!("{} {}", emoji, text),
                None => text,
            };
            prefix_lines(&text, "> ")
        }
        BlockKind::Code { code } => {
            let language = if code.language == "plain text" {
                ""
            } else {
                code.language.as_str()
            };
            format!("```{}\n{}\n```", language, plain_text(&code.rich_text))
        }
        BlockKind::Divider {} => "---".to_string(),
        BlockKind::Equation { equation } => format!("$$\n{}\n$$", equation.expression),
        BlockKind::Image { image } => format!(
            "![{}]({})",
            plain_text(&image.caption),
            image.url().unwrap_or_default()
        ),
        BlockKind::Video { video } => file_link(video, "video"),
        BlockKind::File { file } => file_link(file, "file"),
        BlockKind::Pdf { pdf } => file_link(pdf, "pdf"),
        BlockKind::Bookmark { bookmark } => url_link(&bookmark.url, &bookmark.caption),
        BlockKind::Embed { embed } => url_link(&embed.url, &embed.caption),
        BlockKind::LinkPreview { link_preview } => {
            url_link(&link_preview.url, &link_preview.caption)
        }
        BlockKind::ChildPage { child_page } => format!("## {}", child_page.title),
        BlockKind::ChildDatabase { child_database } => child_database.title.clone(),
        BlockKind::TableRow { table_row } => render_row(&table_row.cells),
        BlockKind::Table { .. }
        | BlockKind::ColumnList {}
        | BlockKind::Column {}
        | BlockKind::SyncedBlock { .. }
        | BlockKind::Unsupported => String::new(),
    }
}

fn render_row(cells: &[Vec<RichText>]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .map(|cell| rich_text_to_markdown(cell).replace('|', "\\|"))
        .collect();
    format!("| {} |", cells.join(" | "))
}

fn render_table(table: &TableBlock, rows: &[Block]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);

    for (index, row) in rows.iter().enumerate() {
        let BlockKind::TableRow { table_row } = &row.kind else {
            continue;
        };
        lines.push(render_row(&table_row.cells));

        if index == 0 {
            let width = table.table_width.max(table_row.cells.len()).max(1);
            lines.push(format!("|{}", " --- |".repeat(width)));
        }
    }

    lines.join("\n")
}

fn indent(text: &str, depth: usize) -> String {
    if depth == 0 {
        return text.to_string();
    }
    let pad = INDENT.repeat(depth);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_level(blocks: &[MdBlock], depth: usize, out: &mut String) {
    for block in blocks {
        if block.kind == "toggle" {
            let summary = format!("<details>\n<summary>{}</summary>", block.parent);
            out.push_str(&indent(&summary, depth));
            out.push_str("\n\n");
            render_level(&block.children, depth, out);
            out.push_str(&indent("</details>", depth));
            out.push_str("\n\n");
            continue;
        }

        if block.parent.is_empty() {
            render_level(&block.children, depth, out);
            continue;
        }

        out.push_str(&indent(&block.parent, depth));
        out.push_str("\n\n");
        render_level(&block.children, depth + 1, out);
    }
}

/// Renders converted blocks, including nested children, as one document.
pub fn to_markdown_string(blocks: &[MdBlock]) -> String {
    let mut out = String::new();
    render_level(blocks, 0, &mut out);
    out.trim_end().to_string()
}
