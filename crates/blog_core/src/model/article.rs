//! Article records.

use chrono::NaiveDate;

/// Identifier of one row in `articles`.
pub type ArticleId = i64;

/// Full article row, including body text and aggregated tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub id: ArticleId,
    pub title: String,
    pub excerpt: String,
    /// Raw body; paragraphs are separated by a blank line (`\n\n`).
    pub content: String,
    pub date: NaiveDate,
    pub category: String,
    pub read_time: String,
    pub author: String,
    /// Distinct tag names sorted by name.
    pub tags: Vec<String>,
}

/// List projection of an article. Carries the excerpt only, never the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummaryRecord {
    pub id: ArticleId,
    pub title: String,
    pub excerpt: String,
    pub date: NaiveDate,
    pub category: String,
    pub read_time: String,
    pub author: String,
    /// Distinct tag names sorted by name.
    pub tags: Vec<String>,
}
