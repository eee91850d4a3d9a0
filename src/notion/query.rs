// file: src/notion/query.rs
// description: database query body (filters and sorts) serialized for the Notion API
// reference: https://developers.notion.com/reference/post-database-query

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl DatabaseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }
}

/// A single property filter, e.g. `{"property": "Published", "checkbox": {"equals": true}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    pub property: String,
    #[serde(flatten)]
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Checkbox { equals: bool },
    RichText { equals: String },
    Formula(FormulaCondition),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaCondition {
    String { equals: String },
}

impl Filter {
    pub fn checkbox_equals(property: &str, value: bool) -> Self {
        Self {
            property: property.to_string(),
            condition: Condition::Checkbox { equals: value },
        }
    }

    pub fn rich_text_equals(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            condition: Condition::RichText {
                equals: value.to_string(),
            },
        }
    }

    pub fn formula_string_equals(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            condition: Condition::Formula(FormulaCondition::String {
                equals: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Descending,
}

impl Sort {
    pub fn descending(property: &str) -> Self {
        Self {
            property: property.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_published_query_body() {
        let query = DatabaseQuery::new()
            .filter(Filter::checkbox_equals("Published", true))
            .sort(Sort::descending("Date"));

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "filter": { "property": "Published", "checkbox": { "equals": true } },
                "sorts": [{ "property": "Date", "direction": "descending" }]
            })
        );
    }

    #[test]
    fn test_formula_slug_filter() {
        let query = DatabaseQuery::new().filter(Filter::formula_string_equals("Slug", "hello"));

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "filter": {
                    "property": "Slug",
                    "formula": { "string": { "equals": "hello" } }
                }
            })
        );
    }

    #[test]
    fn test_rich_text_filter_with_page_size() {
        let query = DatabaseQuery::new()
            .filter(Filter::rich_text_equals("Slug", "hello"))
            .page_size(1);

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "filter": { "property": "Slug", "rich_text": { "equals": "hello" } },
                "page_size": 1
            })
        );
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(serde_json::to_value(DatabaseQuery::new()).unwrap(), json!({}));
    }
}
