#![allow(dead_code)]

use blog_core::ArticleId;
use rusqlite::{params, Connection};

pub struct ArticleSeed<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub date: &'a str,
    pub category: &'a str,
    pub tags: &'a [&'a str],
}

impl<'a> ArticleSeed<'a> {
    pub fn new(title: &'a str, date: &'a str, category: &'a str) -> Self {
        Self {
            title,
            content: "First paragraph.\n\nSecond paragraph.",
            date,
            category,
            tags: &[],
        }
    }

    pub fn tags(mut self, tags: &'a [&'a str]) -> Self {
        self.tags = tags;
        self
    }

    pub fn content(mut self, content: &'a str) -> Self {
        self.content = content;
        self
    }
}

pub fn insert_article(conn: &Connection, seed: ArticleSeed<'_>) -> ArticleId {
    conn.execute(
        "INSERT INTO articles (title, excerpt, content, date, category, read_time, author)
         VALUES (?1, ?2, ?3, ?4, ?5, '5 мин', 'Анна');",
        params![
            seed.title,
            format!("{} excerpt", seed.title),
            seed.content,
            seed.date,
            seed.category,
        ],
    )
    .unwrap();
    let article_id = conn.last_insert_rowid();

    for tag in seed.tags {
        conn.execute("INSERT OR IGNORE INTO tags (name) VALUES (?1);", [tag])
            .unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO article_tags (article_id, tag_id)
             SELECT ?1, id FROM tags WHERE name = ?2;",
            params![article_id, tag],
        )
        .unwrap();
    }

    article_id
}

pub fn insert_comment_row(conn: &Connection, article_id: ArticleId, author: &str, date: &str) {
    conn.execute(
        "INSERT INTO comments (article_id, author, text, date) VALUES (?1, ?2, 'text', ?3);",
        params![article_id, author, date],
    )
    .unwrap();
}

pub fn count_comments(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM comments;", [], |row| row.get(0))
        .unwrap()
}

/// Seeds a small catalogue:
/// - "Grid" 2024-10-20 Дизайн [UI/UX, Минимализм]
/// - "Fonts" 2024-10-18 Типографика [Шрифты, Типографика]
/// - "Structure" 2024-10-15 Архитектура [IA]
/// - "Color" 2024-10-12 Дизайн []
pub fn seed_catalogue(conn: &Connection) -> [ArticleId; 4] {
    [
        insert_article(
            conn,
            ArticleSeed::new("Grid", "2024-10-20", "Дизайн").tags(&["UI/UX", "Минимализм"]),
        ),
        insert_article(
            conn,
            ArticleSeed::new("Fonts", "2024-10-18", "Типографика")
                .tags(&["Шрифты", "Типографика"]),
        ),
        insert_article(
            conn,
            ArticleSeed::new("Structure", "2024-10-15", "Архитектура").tags(&["IA"]),
        ),
        insert_article(conn, ArticleSeed::new("Color", "2024-10-12", "Дизайн")),
    ]
}
