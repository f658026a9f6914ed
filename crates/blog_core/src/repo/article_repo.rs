//! Article read contracts and SQLite implementation.
//!
//! # Responsibility
//! - Fetch one article with its aggregated tags.
//! - List article summaries through a compiled `Predicate`.
//!
//! # Invariants
//! - Tag names are distinct per article and sorted by name.
//! - Lists are ordered by `date DESC, id DESC`.
//! - Summaries never load `content`.

use super::filter::{ArticleFilter, Predicate};
use super::{ensure_blog_schema, RepoResult};
use crate::model::article::{ArticleId, ArticleRecord, ArticleSummaryRecord};
use rusqlite::{params_from_iter, Connection};

const ARTICLE_SUMMARY_SELECT_SQL: &str = "SELECT
    a.id,
    a.title,
    a.excerpt,
    a.date,
    a.category,
    a.read_time,
    a.author
FROM articles a";

/// Read-only repository interface for articles.
pub trait ArticleRepository {
    /// Gets one article with tags, or `None` when no row matches.
    fn get_article(&self, id: ArticleId) -> RepoResult<Option<ArticleRecord>>;
    /// Lists article summaries matching `filter`, newest first.
    fn list_articles(&self, filter: &ArticleFilter) -> RepoResult<Vec<ArticleSummaryRecord>>;
}

/// SQLite-backed article repository.
pub struct SqliteArticleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArticleRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_blog_schema(conn)?;
        Ok(Self { conn })
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn get_article(&self, id: ArticleId) -> RepoResult<Option<ArticleRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                title,
                excerpt,
                content,
                date,
                category,
                read_time,
                author
             FROM articles
             WHERE id = ?1;",
        )?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            let id: ArticleId = row.get("id")?;
            return Ok(Some(ArticleRecord {
                id,
                title: row.get("title")?,
                excerpt: row.get("excerpt")?,
                content: row.get("content")?,
                date: row.get("date")?,
                category: row.get("category")?,
                read_time: row.get("read_time")?,
                author: row.get("author")?,
                tags: load_tags_for_article(self.conn, id)?,
            }));
        }

        Ok(None)
    }

    fn list_articles(&self, filter: &ArticleFilter) -> RepoResult<Vec<ArticleSummaryRecord>> {
        let predicate = Predicate::for_articles(filter);
        let sql = format!(
            "{ARTICLE_SUMMARY_SELECT_SQL}{} ORDER BY a.date DESC, a.id DESC;",
            predicate.where_sql()
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(predicate.values()))?;
        let mut articles = Vec::new();
        while let Some(row) = rows.next()? {
            let id: ArticleId = row.get("id")?;
            articles.push(ArticleSummaryRecord {
                id,
                title: row.get("title")?,
                excerpt: row.get("excerpt")?,
                date: row.get("date")?,
                category: row.get("category")?,
                read_time: row.get("read_time")?,
                author: row.get("author")?,
                tags: load_tags_for_article(self.conn, id)?,
            });
        }

        Ok(articles)
    }
}

fn load_tags_for_article(conn: &Connection, article_id: ArticleId) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT DISTINCT t.name
         FROM article_tags at
         INNER JOIN tags t ON t.id = at.tag_id
         WHERE at.article_id = ?1
         ORDER BY t.name ASC;",
    )?;
    let mut rows = stmt.query([article_id])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(row.get(0)?);
    }
    Ok(tags)
}
