// file: src/posts/extractor.rs
// description: maps raw Notion page records to flat post metadata
// reference: https://developers.notion.com/reference/page-property-values

use crate::config::PropertyNames;
use crate::error::{BlogError, Result};
use crate::models::{FormulaValue, Page, PostMetadata, PropertyValue};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

/// Extracts [`PostMetadata`] from a page using the configured column names.
///
/// Title, slug and date are required; a page missing any of them is reported
/// as [`BlogError::MalformedRecord`]. Tags, description and thumbnail are
/// optional.
#[derive(Debug, Clone, Default)]
pub struct MetadataExtractor {
    names: PropertyNames,
}

impl MetadataExtractor {
    pub fn new(names: PropertyNames) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &PropertyNames {
        &self.names
    }

    pub fn extract(&self, page: &Page) -> Result<PostMetadata> {
        Ok(PostMetadata {
            id: page.id.clone(),
            last_edited_time: page.last_edited_time,
            title: self.required_text(page, &self.names.title)?,
            tags: self.tags(page)?,
            description: self.description(page)?,
            date: self.date(page)?,
            slug: self.required_text(page, &self.names.slug)?,
            thumbnail: self.thumbnail(page),
        })
    }

    fn required_text(&self, page: &Page, field: &str) -> Result<String> {
        let value = page
            .property(field)
            .ok_or_else(|| BlogError::malformed(&page.id, field, "is missing"))?;

        match first_run(&page.id, field, value)? {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(BlogError::malformed(&page.id, field, "is empty")),
        }
    }

    fn tags(&self, page: &Page) -> Result<Vec<String>> {
        match page.property(&self.names.tags) {
            None => Ok(Vec::new()),
            Some(PropertyValue::MultiSelect { multi_select }) => {
                Ok(multi_select.iter().map(|tag| tag.name.clone()).collect())
            }
            Some(other) => Err(wrong_type(&page.id, &self.names.tags, other)),
        }
    }

    fn description(&self, page: &Page) -> Result<Option<String>> {
        let Some(value) = page.property(&self.names.description) else {
            return Ok(None);
        };

        Ok(first_run(&page.id, &self.names.description, value)?.filter(|text| !text.is_empty()))
    }

    fn date(&self, page: &Page) -> Result<DateTime<Utc>> {
        let field = self.names.date.as_str();
        let value = page
            .property(field)
            .ok_or_else(|| BlogError::malformed(&page.id, field, "is missing"))?;

        let start = match value {
            PropertyValue::CreatedTime { created_time } => return Ok(*created_time),
            PropertyValue::LastEditedTime { last_edited_time } => return Ok(*last_edited_time),
            PropertyValue::Date { date } => date.as_ref().map(|d| d.start.as_str()),
            PropertyValue::Formula {
                formula: FormulaValue::Date { date },
            } => date.as_ref().map(|d| d.start.as_str()),
            other => return Err(wrong_type(&page.id, field, other)),
        };

        let start = start.ok_or_else(|| BlogError::malformed(&page.id, field, "has no value"))?;
        parse_date(start).ok_or_else(|| {
            BlogError::malformed(&page.id, field, format!("has unparseable date '{}'", start))
        })
    }

    fn thumbnail(&self, page: &Page) -> Option<String> {
        match page.property(&self.names.thumbnail)? {
            PropertyValue::Files { files } => files
                .first()
                .and_then(|file| file.url())
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            other => {
                debug!(
                    "Ignoring thumbnail property of type {} on page {}",
                    other.kind(),
                    page.id
                );
                None
            }
        }
    }
}

/// Extracts metadata using the default column names.
pub fn extract_metadata(page: &Page) -> Result<PostMetadata> {
    MetadataExtractor::default().extract(page)
}

fn first_run(page_id: &str, field: &str, value: &PropertyValue) -> Result<Option<String>> {
    match value {
        PropertyValue::Title { title: runs } | PropertyValue::RichText { rich_text: runs } => {
            Ok(runs.first().map(|run| run.plain_text.clone()))
        }
        PropertyValue::Formula {
            formula: FormulaValue::String { string },
        } => Ok(string.clone()),
        other => Err(wrong_type(page_id, field, other)),
    }
}

fn wrong_type(page_id: &str, field: &str, value: &PropertyValue) -> BlogError {
    BlogError::malformed(
        page_id,
        field,
        format!("has unexpected type {}", value.kind()),
    )
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{page_json, text};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn page_from(value: Value) -> Page {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_record() {
        let meta = extract_metadata(&page_from(page_json("p1", "hello-world"))).unwrap();

        assert_eq!(meta.id, "p1");
        assert_eq!(meta.title, "Post hello-world");
        assert_eq!(meta.slug, "hello-world");
        assert_eq!(meta.tags, vec!["rust".to_string(), "notion".to_string()]);
        assert_eq!(meta.description.as_deref(), Some("A short summary"));
        assert_eq!(meta.date, parse_date("2024-03-01T09:00:00Z").unwrap());
        assert_eq!(
            meta.last_edited_time,
            parse_date("2024-03-05T12:30:00Z").unwrap()
        );
        assert_eq!(meta.thumbnail, None);
    }

    #[test]
    fn test_tags_preserve_order() {
        let mut value = page_json("p1", "s");
        value["properties"]["Tags"]["multi_select"] = json!([
            { "name": "zeta" }, { "name": "alpha" }, { "name": "mid" }
        ]);

        let meta = extract_metadata(&page_from(value)).unwrap();
        assert_eq!(meta.tags, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_thumbnail_first_file_url() {
        let mut value = page_json("p1", "s");
        value["properties"]["Thumb"] = json!({
            "id": "th",
            "type": "files",
            "files": [
                { "name": "y.png", "type": "file", "file": { "url": "https://x/y.png" } },
                { "name": "z.png", "type": "file", "file": { "url": "https://x/z.png" } }
            ]
        });

        let meta = extract_metadata(&page_from(value)).unwrap();
        assert_eq!(meta.thumbnail.as_deref(), Some("https://x/y.png"));
    }

    #[test]
    fn test_thumbnail_empty_files() {
        let mut value = page_json("p1", "s");
        value["properties"]["Thumb"] = json!({ "id": "th", "type": "files", "files": [] });

        let meta = extract_metadata(&page_from(value)).unwrap();
        assert_eq!(meta.thumbnail, None);
    }

    #[test]
    fn test_description_absent_or_present() {
        let mut value = page_json("p1", "s");
        value["properties"]["Description"]["rich_text"] = json!([]);
        let meta = extract_metadata(&page_from(value)).unwrap();
        assert_eq!(meta.description, None);

        let mut value = page_json("p1", "s");
        value["properties"]["Description"]["rich_text"] = json!([text("abc")]);
        let meta = extract_metadata(&page_from(value)).unwrap();
        assert_eq!(meta.description.as_deref(), Some("abc"));

        let mut value = page_json("p1", "s");
        value["properties"]
            .as_object_mut()
            .unwrap()
            .remove("Description");
        let meta = extract_metadata(&page_from(value)).unwrap();
        assert_eq!(meta.description, None);
    }

    #[test]
    fn test_missing_title_is_malformed() {
        let mut value = page_json("p1", "s");
        value["properties"]["Name"]["title"] = json!([]);

        match extract_metadata(&page_from(value)).unwrap_err() {
            BlogError::MalformedRecord { page_id, field, .. } => {
                assert_eq!(page_id, "p1");
                assert_eq!(field, "Name");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_slug_is_malformed() {
        let mut value = page_json("p1", "s");
        value["properties"].as_object_mut().unwrap().remove("Slug");

        let err = extract_metadata(&page_from(value)).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("Slug"));
    }

    #[test]
    fn test_missing_date_is_malformed() {
        let mut value = page_json("p1", "s");
        value["properties"].as_object_mut().unwrap().remove("Date");

        let err = extract_metadata(&page_from(value)).unwrap_err();
        assert!(err.to_string().contains("Date"));
    }

    #[test]
    fn test_wrong_tag_type_is_malformed() {
        let mut value = page_json("p1", "s");
        value["properties"]["Tags"] = json!({ "id": "t", "type": "checkbox", "checkbox": true });

        let err = extract_metadata(&page_from(value)).unwrap_err();
        assert!(err.to_string().contains("unexpected type checkbox"));
    }

    #[test]
    fn test_date_property_and_formula_slug() {
        let mut value = page_json("p1", "s");
        value["properties"]["Date"] = json!({
            "id": "c",
            "type": "date",
            "date": { "start": "2023-12-24", "end": null }
        });
        value["properties"]["Slug"] = json!({
            "id": "s",
            "type": "formula",
            "formula": { "type": "string", "string": "computed-slug" }
        });

        let meta = extract_metadata(&page_from(value)).unwrap();
        assert_eq!(meta.slug, "computed-slug");
        assert_eq!(meta.date, parse_date("2023-12-24T00:00:00Z").unwrap());
    }

    #[test]
    fn test_custom_property_names() {
        let mut value = page_json("p1", "s");
        let thumb = json!({
            "id": "th",
            "type": "files",
            "files": [{ "name": "c", "type": "external", "external": { "url": "https://cdn/c.jpg" } }]
        });
        value["properties"]["Cover"] = thumb;

        let extractor = MetadataExtractor::new(PropertyNames {
            thumbnail: "Cover".to_string(),
            ..PropertyNames::default()
        });
        let meta = extractor.extract(&page_from(value)).unwrap();
        assert_eq!(meta.thumbnail.as_deref(), Some("https://cdn/c.jpg"));
    }

    #[test]
    fn test_parse_date_variants() {
        assert!(parse_date("2024-01-02T03:04:05.000+09:00").is_some());
        assert!(parse_date("2024-01-02").is_some());
        assert!(parse_date("yesterday").is_none());
    }
}
