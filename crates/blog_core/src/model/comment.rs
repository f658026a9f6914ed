//! Comment records.

use super::article::ArticleId;
use chrono::NaiveDate;

/// Identifier of one row in `comments`.
pub type CommentId = i64;

/// Stored comment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub id: CommentId,
    pub article_id: ArticleId,
    pub author: String,
    pub text: String,
    pub date: NaiveDate,
}

/// Insert payload for a new comment.
///
/// `date` is chosen by the caller so tests can pin it; request handlers pass
/// the local calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub article_id: ArticleId,
    pub author: String,
    pub text: String,
    pub date: NaiveDate,
}

impl NewComment {
    /// Builds a comment dated with today's local calendar date.
    pub fn dated_today(
        article_id: ArticleId,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            article_id,
            author: author.into(),
            text: text.into(),
            date: chrono::Local::now().date_naive(),
        }
    }
}
