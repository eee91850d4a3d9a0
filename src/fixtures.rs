// file: src/fixtures.rs
// description: Notion JSON fixtures shared by unit tests
// reference: https://developers.notion.com/reference/page

use crate::models::{Block, Page};
use serde_json::{Value, json};

pub fn text(content: &str) -> Value {
    json!({
        "type": "text",
        "text": { "content": content, "link": null },
        "annotations": {
            "bold": false, "italic": false, "strikethrough": false,
            "underline": false, "code": false, "color": "default"
        },
        "plain_text": content,
        "href": null
    })
}

/// A fully populated post page as JSON, ready to be tweaked by a test.
pub fn page_json(id: &str, slug: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "created_time": "2024-03-01T09:00:00.000Z",
        "last_edited_time": "2024-03-05T12:30:00.000Z",
        "archived": false,
        "url": format!("https://www.notion.so/{}", id),
        "properties": {
            "Name": { "id": "title", "type": "title", "title": [text(&format!("Post {}", slug))] },
            "Tags": {
                "id": "t",
                "type": "multi_select",
                "multi_select": [
                    { "id": "1", "name": "rust", "color": "red" },
                    { "id": "2", "name": "notion", "color": "blue" }
                ]
            },
            "Description": { "id": "d", "type": "rich_text", "rich_text": [text("A short summary")] },
            "Date": { "id": "c", "type": "created_time", "created_time": "2024-03-01T09:00:00.000Z" },
            "Slug": { "id": "s", "type": "rich_text", "rich_text": [text(slug)] },
            "Published": { "id": "p", "type": "checkbox", "checkbox": true }
        }
    })
}

pub fn page(id: &str, slug: &str) -> Page {
    serde_json::from_value(page_json(id, slug)).expect("fixture page must deserialize")
}

pub fn block(id: &str, kind: &str, payload: Value, has_children: bool) -> Block {
    let mut value = json!({
        "object": "block",
        "id": id,
        "has_children": has_children,
        "type": kind,
    });
    value[kind] = payload;
    serde_json::from_value(value).expect("fixture block must deserialize")
}

pub fn paragraph(id: &str, content: &str) -> Block {
    block(id, "paragraph", json!({ "rich_text": [text(content)] }), false)
}
