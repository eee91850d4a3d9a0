// file: src/converter/rich_text.rs
// description: rich text runs rendered as inline markdown
// reference: https://developers.notion.com/reference/rich-text

use crate::models::{RichText, RichTextKind};

/// Renders a sequence of runs as inline markdown.
pub fn rich_text_to_markdown(runs: &[RichText]) -> String {
    runs.iter().map(annotate).collect()
}

/// Renders one run, keeping surrounding whitespace outside the markers so
/// `**bold **` never appears.
pub fn annotate(run: &RichText) -> String {
    let text = run.plain_text.as_str();

    if run.kind == RichTextKind::Equation {
        return format!("${}$", text.trim());
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return text.to_string();
    }

    let start = text.len() - text.trim_start().len();
    let end = start + trimmed.len();
    let (leading, trailing) = (&text[..start], &text[end..]);

    let annotations = &run.annotations;
    let mut body = trimmed.to_string();

    if annotations.code {
        body = format!("`{}`", body);
    }
    if annotations.bold {
        body = format!("**{}**", body);
    }
    if annotations.italic {
        body = format!("_{}_", body);
    }
    if annotations.strikethrough {
        body = format!("~~{}~~", body);
    }
    if annotations.underline {
        body = format!("<u>{}</u>", body);
    }
    if let Some(href) = run.href.as_deref().filter(|h| !h.is_empty()) {
        body = format!("[{}]({})", body, href);
    }

    format!("{}{}{}", leading, body, trailing)
}
