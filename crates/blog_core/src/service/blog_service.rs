//! Blog use-case service.
//!
//! # Responsibility
//! - Compose article, tag and comment reads into one article view.
//! - List article summaries through an `ArticleFilter`.
//! - Append comments and return their external view.
//!
//! # Invariants
//! - A missing article surfaces as `ServiceError::ArticleNotFound` on read.
//! - Comment creation does not require the article to exist.
//! - Comments inside an article view are ordered by date ascending.

use crate::model::article::ArticleId;
use crate::model::comment::NewComment;
use crate::repo::article_repo::ArticleRepository;
use crate::repo::comment_repo::CommentRepository;
use crate::repo::filter::ArticleFilter;
use crate::repo::RepoError;
use crate::shape::{ArticleSummaryView, ArticleView, CommentView};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for blog use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// No article with this id exists.
    ArticleNotFound(ArticleId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArticleNotFound(id) => write!(f, "article not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::ArticleNotFound(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Blog service facade over repository implementations.
pub struct BlogService<A: ArticleRepository, C: CommentRepository> {
    articles: A,
    comments: C,
}

impl<A: ArticleRepository, C: CommentRepository> BlogService<A, C> {
    pub fn new(articles: A, comments: C) -> Self {
        Self { articles, comments }
    }

    /// Gets one article with tags and comments.
    pub fn get_article(&self, id: ArticleId) -> Result<ArticleView, ServiceError> {
        let article = self
            .articles
            .get_article(id)?
            .ok_or(ServiceError::ArticleNotFound(id))?;
        let comments = self.comments.list_comments(id)?;
        Ok(ArticleView::from_records(article, comments))
    }

    /// Lists article summaries, newest first.
    pub fn list_articles(
        &self,
        filter: &ArticleFilter,
    ) -> Result<Vec<ArticleSummaryView>, ServiceError> {
        let articles = self.articles.list_articles(filter)?;
        Ok(articles.into_iter().map(ArticleSummaryView::from).collect())
    }

    /// Appends one comment.
    pub fn create_comment(&self, comment: &NewComment) -> Result<CommentView, ServiceError> {
        let stored = self.comments.insert_comment(comment)?;
        Ok(CommentView::from(stored))
    }
}
