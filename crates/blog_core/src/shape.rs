//! External JSON representation of articles and comments.
//!
//! # Responsibility
//! - Map repository records into the views serialized by request handlers.
//! - Own the presentation rules: ISO calendar dates, camelCase field names,
//!   paragraph splitting and non-null tag arrays.
//!
//! # Invariants
//! - Dates render as `YYYY-MM-DD` with no time or zone.
//! - `content` is split on every `"\n\n"`; an empty body yields `[""]`.
//! - `tags` is always an array.

use crate::model::article::{ArticleId, ArticleRecord, ArticleSummaryRecord};
use crate::model::comment::{CommentId, CommentRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Article detail as returned by the get-one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub id: ArticleId,
    pub title: String,
    pub excerpt: String,
    pub content: Vec<String>,
    pub date: String,
    pub category: String,
    pub read_time: String,
    pub author: String,
    pub tags: Vec<String>,
    pub comments: Vec<CommentView>,
}

/// Article list item. Omits `content` and `comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummaryView {
    pub id: ArticleId,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub category: String,
    pub read_time: String,
    pub author: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: CommentId,
    pub author: String,
    pub text: String,
    pub date: String,
}

impl ArticleView {
    pub fn from_records(article: ArticleRecord, comments: Vec<CommentRecord>) -> Self {
        Self {
            id: article.id,
            title: article.title,
            excerpt: article.excerpt,
            content: split_paragraphs(&article.content),
            date: format_date(article.date),
            category: article.category,
            read_time: article.read_time,
            author: article.author,
            tags: article.tags,
            comments: comments.into_iter().map(CommentView::from).collect(),
        }
    }
}

impl From<ArticleSummaryRecord> for ArticleSummaryView {
    fn from(article: ArticleSummaryRecord) -> Self {
        Self {
            id: article.id,
            title: article.title,
            excerpt: article.excerpt,
            date: format_date(article.date),
            category: article.category,
            read_time: article.read_time,
            author: article.author,
            tags: article.tags,
        }
    }
}

impl From<CommentRecord> for CommentView {
    fn from(comment: CommentRecord) -> Self {
        Self {
            id: comment.id,
            author: comment.author,
            text: comment.text,
            date: format_date(comment.date),
        }
    }
}

/// Splits an article body into paragraphs.
///
/// Only a double newline separates paragraphs, so a third newline stays at
/// the start of the next paragraph.
pub fn split_paragraphs(content: &str) -> Vec<String> {
    content
        .split(PARAGRAPH_SEPARATOR)
        .map(str::to_string)
        .collect()
}

/// Formats a calendar date as ISO-8601 `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn split_keeps_lone_extra_newline_as_content() {
        assert_eq!(
            split_paragraphs("P1\n\nP2\n\n\nP3"),
            vec!["P1".to_string(), "P2".to_string(), "\nP3".to_string()]
        );
    }

    #[test]
    fn split_of_empty_body_yields_one_empty_paragraph() {
        assert_eq!(split_paragraphs(""), vec![String::new()]);
        assert_eq!(split_paragraphs("single"), vec!["single".to_string()]);
    }

    #[test]
    fn format_date_pads_month_and_day() {
        assert_eq!(format_date(date(2024, 3, 7)), "2024-03-07");
    }

    #[test]
    fn article_view_uses_camel_case_and_empty_tag_array() {
        let article = ArticleRecord {
            id: 7,
            title: "Title".to_string(),
            excerpt: "Short".to_string(),
            content: "One\n\nTwo".to_string(),
            date: date(2024, 10, 20),
            category: "Дизайн".to_string(),
            read_time: "5 мин".to_string(),
            author: "Anna".to_string(),
            tags: Vec::new(),
        };
        let comments = vec![CommentRecord {
            id: 1,
            article_id: 7,
            author: "Ivan".to_string(),
            text: "Nice".to_string(),
            date: date(2024, 10, 21),
        }];

        let value = serde_json::to_value(ArticleView::from_records(article, comments)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "title": "Title",
                "excerpt": "Short",
                "content": ["One", "Two"],
                "date": "2024-10-20",
                "category": "Дизайн",
                "readTime": "5 мин",
                "author": "Anna",
                "tags": [],
                "comments": [
                    {"id": 1, "author": "Ivan", "text": "Nice", "date": "2024-10-21"}
                ]
            })
        );
    }

    #[test]
    fn summary_view_has_no_content_or_comments() {
        let summary = ArticleSummaryRecord {
            id: 3,
            title: "T".to_string(),
            excerpt: "E".to_string(),
            date: date(2024, 1, 2),
            category: "C".to_string(),
            read_time: "3 мин".to_string(),
            author: "A".to_string(),
            tags: vec!["x".to_string()],
        };

        let value = serde_json::to_value(ArticleSummaryView::from(summary)).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("content"));
        assert!(!object.contains_key("comments"));
        assert!(!object.contains_key("read_time"));
        assert_eq!(object["readTime"], "3 мин");
        assert_eq!(object["tags"], json!(["x"]));
    }
}
