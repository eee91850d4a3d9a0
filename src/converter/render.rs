// file: src/converter/render.rs
// description: markdown rendering to html and plain-text excerpts with pulldown-cmark
// reference: https://docs.rs/pulldown-cmark

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Renders markdown produced by the converter into an html fragment.
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// Plain text of the body, skipping headings and code, cut at a word boundary
/// once `max_chars` characters are reached.
pub fn excerpt(markdown: &str, max_chars: usize) -> String {
    let parser = Parser::new_ext(markdown, options());

    let mut text = String::new();
    let mut skip_depth = 0usize;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { .. }) | Event::Start(Tag::CodeBlock(_)) => {
                skip_depth += 1;
            }
            Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::CodeBlock) => {
                skip_depth = skip_depth.saturating_sub(1);
            }
            Event::Text(fragment) | Event::Code(fragment) if skip_depth == 0 => {
                text.push_str(&fragment);
            }
            Event::SoftBreak | Event::HardBreak | Event::End(TagEnd::Paragraph)
                if skip_depth == 0 =>
            {
                text.push(' ');
            }
            _ => {}
        }
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let cut: String = collapsed.chars().take(max_chars).collect();
    let trimmed = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}...", trimmed.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_html_basic() {
        let html = render_html("# Title\n\nSome **bold** text.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_render_html_table() {
        let html = render_html("| a | b |\n| --- | --- |\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_excerpt_skips_headings_and_code() {
        let md = "# Heading\n\nFirst paragraph.\n\n```rust\nlet x = 1;\n```\n\nSecond one.";
        assert_eq!(excerpt(md, 200), "First paragraph. Second one.");
    }

    #[test]
    fn test_excerpt_truncates_on_word_boundary() {
        let md = "alpha beta gamma delta";
        assert_eq!(excerpt(md, 13), "alpha beta...");
    }
}
