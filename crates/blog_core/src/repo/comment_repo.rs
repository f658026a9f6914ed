//! Comment repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - List comments attached to one article.
//! - Append new comments.
//!
//! # Invariants
//! - Comments are listed by `date ASC, id ASC`.
//! - Inserts commit before returning and never update existing rows.
//! - `article_id` is not checked against `articles`; orphan comments are
//!   stored and reported with an `event=comment_create status=orphan` warning.

use super::{ensure_blog_schema, RepoResult};
use crate::model::article::ArticleId;
use crate::model::comment::{CommentRecord, NewComment};
use log::warn;
use rusqlite::{params, Connection, Row};

/// Repository interface for comment operations.
pub trait CommentRepository {
    /// Lists all comments for one article, oldest first.
    fn list_comments(&self, article_id: ArticleId) -> RepoResult<Vec<CommentRecord>>;
    /// Inserts one comment and returns the stored row.
    fn insert_comment(&self, comment: &NewComment) -> RepoResult<CommentRecord>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_blog_schema(conn)?;
        Ok(Self { conn })
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn list_comments(&self, article_id: ArticleId) -> RepoResult<Vec<CommentRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                article_id,
                author,
                text,
                date
             FROM comments
             WHERE article_id = ?1
             ORDER BY date ASC, id ASC;",
        )?;
        let mut rows = stmt.query([article_id])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(map_comment_row(row)?);
        }
        Ok(comments)
    }

    fn insert_comment(&self, comment: &NewComment) -> RepoResult<CommentRecord> {
        let tx = self.conn.unchecked_transaction()?;
        let article_exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM articles WHERE id = ?1);",
            [comment.article_id],
            |row| row.get(0),
        )?;
        if !article_exists {
            warn!(
                "event=comment_create module=repo status=orphan article_id={}",
                comment.article_id
            );
        }

        tx.execute(
            "INSERT INTO comments (article_id, author, text, date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                comment.article_id,
                comment.author.as_str(),
                comment.text.as_str(),
                comment.date,
            ],
        )?;

        let record = tx.query_row(
            "SELECT id, article_id, author, text, date FROM comments WHERE id = ?1;",
            [tx.last_insert_rowid()],
            map_comment_row,
        )?;
        tx.commit()?;
        Ok(record)
    }
}

fn map_comment_row(row: &Row<'_>) -> rusqlite::Result<CommentRecord> {
    Ok(CommentRecord {
        id: row.get("id")?,
        article_id: row.get("article_id")?,
        author: row.get("author")?,
        text: row.get("text")?,
        date: row.get("date")?,
    })
}
