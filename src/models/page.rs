// file: src/models/page.rs
// description: raw Notion page records and their typed property values
// reference: https://developers.notion.com/reference/page-property-values

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row returned by a database query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

impl Page {
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        title: Vec<RichText>,
    },
    RichText {
        rich_text: Vec<RichText>,
    },
    MultiSelect {
        multi_select: Vec<SelectOption>,
    },
    Select {
        select: Option<SelectOption>,
    },
    Date {
        date: Option<DateValue>,
    },
    CreatedTime {
        created_time: DateTime<Utc>,
    },
    LastEditedTime {
        last_edited_time: DateTime<Utc>,
    },
    Checkbox {
        checkbox: bool,
    },
    Files {
        files: Vec<FileObject>,
    },
    Formula {
        formula: FormulaValue,
    },
    Url {
        url: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// Short type name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::RichText { .. } => "rich_text",
            Self::MultiSelect { .. } => "multi_select",
            Self::Select { .. } => "select",
            Self::Date { .. } => "date",
            Self::CreatedTime { .. } => "created_time",
            Self::LastEditedTime { .. } => "last_edited_time",
            Self::Checkbox { .. } => "checkbox",
            Self::Files { .. } => "files",
            Self::Formula { .. } => "formula",
            Self::Url { .. } => "url",
            Self::Unsupported => "unsupported",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaValue {
    String { string: Option<String> },
    Number { number: Option<f64> },
    Boolean { boolean: Option<bool> },
    Date { date: Option<DateValue> },
}

/// A file attachment, either hosted by Notion or linked externally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file: Option<HostedFile>,
    #[serde(default)]
    pub external: Option<ExternalFile>,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

impl FileObject {
    pub fn url(&self) -> Option<&str> {
        self.file
            .as_ref()
            .map(|f| f.url.as_str())
            .or_else(|| self.external.as_ref().map(|e| e.url.as_str()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
    #[serde(default)]
    pub expiry_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

/// One run of styled text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type", default)]
    pub kind: RichTextKind,
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub annotations: Annotations,
}

impl RichText {
    pub fn plain(text: &str) -> Self {
        Self {
            kind: RichTextKind::Text,
            plain_text: text.to_string(),
            href: None,
            annotations: Annotations::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RichTextKind {
    #[default]
    Text,
    Mention,
    Equation,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

/// Concatenated plain text of a rich text array.
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(|r| r.plain_text.as_str()).collect()
}
