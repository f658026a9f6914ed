//! Article list filter and its SQL predicate descriptor.
//!
//! # Responsibility
//! - Turn the optional `category` and `tags` query parameters into an
//!   `ArticleFilter`.
//! - Compile a filter into a `Predicate`: fixed SQL fragments plus the
//!   values bound to their placeholders.
//!
//! # Invariants
//! - Caller-supplied text never reaches SQL text; it is only ever bound.
//! - Clauses combine with `AND`.
//! - The tag clause tests membership through `EXISTS`, so the article's full
//!   tag set is still aggregated by the list query.

use rusqlite::types::Value;
use std::collections::BTreeSet;

/// Category value that means "no category filter".
pub const ALL_CATEGORIES: &str = "Все";

/// Normalized list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Exact category match. `None` disables the category clause.
    pub category: Option<String>,
    /// Article qualifies when it carries at least one of these tags.
    /// Empty disables the tag clause.
    pub tags: Vec<String>,
}

impl ArticleFilter {
    /// Builds a filter from raw query parameters.
    ///
    /// - `category`: absent, empty or [`ALL_CATEGORIES`] means no filter.
    /// - `tags`: comma separated; entries are trimmed, blanks dropped and
    ///   duplicates removed.
    pub fn from_params(category: Option<&str>, tags: Option<&str>) -> Self {
        let category = category
            .filter(|value| !value.is_empty() && *value != ALL_CATEGORIES)
            .map(str::to_string);
        let tags = tags.map(split_tag_list).unwrap_or_default();
        Self { category, tags }
    }
}

/// Splits a comma separated tag list into distinct, trimmed names.
pub fn split_tag_list(raw: &str) -> Vec<String> {
    let mut unique = BTreeSet::new();
    for tag in raw.split(',') {
        let trimmed = tag.trim();
        if !trimmed.is_empty() {
            unique.insert(trimmed.to_string());
        }
    }
    unique.into_iter().collect()
}

/// Condition clauses paired with their bound values, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<String>,
    values: Vec<Value>,
}

impl Predicate {
    /// Compiles `filter` against the `articles a` alias used by list queries.
    pub fn for_articles(filter: &ArticleFilter) -> Self {
        let mut predicate = Self::default();

        if let Some(category) = filter.category.as_ref() {
            predicate.push("a.category = ?", [Value::Text(category.clone())]);
        }

        if !filter.tags.is_empty() {
            let placeholders = vec!["?"; filter.tags.len()].join(", ");
            predicate.push(
                format!(
                    "EXISTS (
                    SELECT 1
                    FROM article_tags at
                    INNER JOIN tags t ON t.id = at.tag_id
                    WHERE at.article_id = a.id
                      AND t.name IN ({placeholders})
                )"
                ),
                filter.tags.iter().cloned().map(Value::Text),
            );
        }

        predicate
    }

    fn push(&mut self, clause: impl Into<String>, values: impl IntoIterator<Item = Value>) {
        self.clauses.push(clause.into());
        self.values.extend(values);
    }

    /// Returns ` WHERE c1 AND c2 ...`, or an empty string without clauses.
    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{split_tag_list, ArticleFilter, Predicate, ALL_CATEGORIES};
    use rusqlite::types::Value;

    #[test]
    fn sentinel_and_missing_category_disable_category_clause() {
        assert_eq!(ArticleFilter::from_params(None, None), ArticleFilter::default());
        assert_eq!(
            ArticleFilter::from_params(Some(ALL_CATEGORIES), None),
            ArticleFilter::default()
        );
        assert_eq!(ArticleFilter::from_params(Some(""), None), ArticleFilter::default());

        let filter = ArticleFilter::from_params(Some("Дизайн"), None);
        assert_eq!(filter.category.as_deref(), Some("Дизайн"));
    }

    #[test]
    fn tag_list_is_trimmed_deduplicated_and_drops_blanks() {
        assert_eq!(
            split_tag_list(" b, a ,, b,  "),
            vec!["a".to_string(), "b".to_string()]
        );
        assert!(split_tag_list(" , ").is_empty());
    }

    #[test]
    fn empty_filter_compiles_to_no_where_clause() {
        let predicate = Predicate::for_articles(&ArticleFilter::default());
        assert!(predicate.is_empty());
        assert_eq!(predicate.where_sql(), "");
        assert!(predicate.values().is_empty());
    }

    #[test]
    fn values_are_bound_not_interpolated() {
        let hostile = "x' OR '1'='1";
        let filter = ArticleFilter::from_params(Some(hostile), Some("a, b'); DROP TABLE tags;--"));
        let predicate = Predicate::for_articles(&filter);

        let sql = predicate.where_sql();
        assert!(sql.starts_with(" WHERE a.category = ? AND EXISTS"));
        assert!(sql.contains("t.name IN (?, ?)"));
        assert!(!sql.contains(hostile));
        assert!(!sql.contains("DROP"));
        assert_eq!(
            predicate.values(),
            &[
                Value::Text(hostile.to_string()),
                Value::Text("a".to_string()),
                Value::Text("b'); DROP TABLE tags;--".to_string()),
            ]
        );
    }
}
