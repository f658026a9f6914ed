//! Blog content API core.
//!
//! Three stateless request handlers (list articles, get one article with
//! comments, create a comment) over an SQLite schema of articles, tags and
//! comments. Handlers take an `ApiRequest` and always return an `Envelope`.

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod shape;

pub use api::{create_comment, get_article, list_articles, ApiRequest, Endpoint, Envelope};
pub use config::{BlogConfig, ConfigError};
pub use db::{DatabaseUrl, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::article::{ArticleId, ArticleRecord, ArticleSummaryRecord};
pub use model::comment::{CommentId, CommentRecord, NewComment};
pub use repo::article_repo::{ArticleRepository, SqliteArticleRepository};
pub use repo::comment_repo::{CommentRepository, SqliteCommentRepository};
pub use repo::filter::{ArticleFilter, Predicate, ALL_CATEGORIES};
pub use repo::{RepoError, RepoResult};
pub use service::blog_service::{BlogService, ServiceError};
pub use shape::{ArticleSummaryView, ArticleView, CommentView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
