//! Endpoint handlers: list articles, get one article, create a comment.

use super::envelope::Envelope;
use super::request::ApiRequest;
use crate::db::{open_database, DatabaseUrl};
use crate::model::article::ArticleId;
use crate::model::comment::NewComment;
use crate::repo::article_repo::SqliteArticleRepository;
use crate::repo::comment_repo::SqliteCommentRepository;
use crate::repo::filter::ArticleFilter;
use crate::service::blog_service::{BlogService, ServiceError};
use log::{error, info, warn};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::Value;
use std::time::Instant;

const PREFLIGHT_METHOD: &str = "OPTIONS";

const ARTICLE_ID_REQUIRED: &str = "Article ID is required";
const ARTICLE_ID_INVALID: &str = "Article ID must be an integer";
const ARTICLE_NOT_FOUND: &str = "Article not found";
const COMMENT_FIELDS_REQUIRED: &str = "article_id, author and text are required";
const COMMENT_ARTICLE_ID_INVALID: &str = "article_id must be a positive integer";
const COMMENT_TEXT_NOT_STRING: &str = "author and text must be strings";
const COMMENT_BODY_INVALID: &str = "Request body must be a JSON object";

/// The three blog endpoints and the verb each one accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListArticles,
    GetArticle,
    CreateComment,
}

impl Endpoint {
    pub fn verb(self) -> &'static str {
        match self {
            Self::ListArticles | Self::GetArticle => "GET",
            Self::CreateComment => "POST",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ListArticles => "article_list",
            Self::GetArticle => "article_get",
            Self::CreateComment => "comment_create",
        }
    }

    /// Dispatches `request` to this endpoint's handler.
    pub fn handle(self, request: &ApiRequest, db: &DatabaseUrl) -> Envelope {
        match self {
            Self::ListArticles => list_articles(request, db),
            Self::GetArticle => get_article(request, db),
            Self::CreateComment => create_comment(request, db),
        }
    }
}

/// `GET` article summaries filtered by optional `category` and `tags`.
pub fn list_articles(request: &ApiRequest, db: &DatabaseUrl) -> Envelope {
    run(Endpoint::ListArticles, request, || {
        let filter = ArticleFilter::from_params(
            request.query_param("category"),
            request.query_param("tags"),
        );
        let articles = with_blog_service(db, |service| service.list_articles(&filter))?;
        Ok(Envelope::json(200, &articles))
    })
}

/// `GET` one article with tags and comments by the `id` query parameter.
pub fn get_article(request: &ApiRequest, db: &DatabaseUrl) -> Envelope {
    run(Endpoint::GetArticle, request, || {
        let raw_id = request
            .query_param("id")
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Envelope::bad_request(ARTICLE_ID_REQUIRED))?;
        let id: ArticleId = raw_id
            .trim()
            .parse()
            .map_err(|_| Envelope::bad_request(ARTICLE_ID_INVALID))?;

        let article = with_blog_service(db, |service| service.get_article(id))?;
        Ok(Envelope::json(200, &article))
    })
}

/// `POST` a comment from a JSON body with `article_id`, `author` and `text`.
pub fn create_comment(request: &ApiRequest, db: &DatabaseUrl) -> Envelope {
    run(Endpoint::CreateComment, request, || {
        let comment = parse_comment_body(request.body.as_deref())?;
        let created = with_blog_service(db, |service| service.create_comment(&comment))?;
        Ok(Envelope::json(201, &created))
    })
}

/// Shared request flow: preflight, method check, then the endpoint body.
fn run(
    endpoint: Endpoint,
    request: &ApiRequest,
    handle: impl FnOnce() -> Result<Envelope, Envelope>,
) -> Envelope {
    let method = request.method_or(endpoint.verb());
    if method.eq_ignore_ascii_case(PREFLIGHT_METHOD) {
        return Envelope::preflight(endpoint.verb());
    }
    if !method.eq_ignore_ascii_case(endpoint.verb()) {
        warn!(
            "event=request_handled module=api status=rejected endpoint={} method={} status_code=405",
            endpoint.name(),
            method
        );
        return Envelope::method_not_allowed();
    }

    let started_at = Instant::now();
    let envelope = handle().unwrap_or_else(|rejection| rejection);
    info!(
        "event=request_handled module=api status={} endpoint={} status_code={} duration_ms={}",
        if envelope.status_code < 400 { "ok" } else { "rejected" },
        endpoint.name(),
        envelope.status_code,
        started_at.elapsed().as_millis()
    );
    envelope
}

/// Opens one connection, runs `op` against a service bound to it and closes
/// the connection before returning.
fn with_blog_service<T>(
    db: &DatabaseUrl,
    op: impl FnOnce(
        &BlogService<SqliteArticleRepository<'_>, SqliteCommentRepository<'_>>,
    ) -> Result<T, ServiceError>,
) -> Result<T, Envelope> {
    let conn = open_database(db).map_err(|err| {
        error!(
            "event=request_failed module=api status=error error_code=db_open_failed error={}",
            err
        );
        Envelope::internal_error()
    })?;

    match run_with_service(&conn, op) {
        Ok(value) => Ok(value),
        Err(ServiceError::ArticleNotFound(id)) => {
            info!("event=article_lookup module=api status=not_found article_id={id}");
            Err(Envelope::not_found(ARTICLE_NOT_FOUND))
        }
        Err(ServiceError::Repo(err)) => {
            error!(
                "event=request_failed module=api status=error error_code=repo_failed error={}",
                err
            );
            Err(Envelope::internal_error())
        }
    }
}

fn run_with_service<T>(
    conn: &Connection,
    op: impl FnOnce(
        &BlogService<SqliteArticleRepository<'_>, SqliteCommentRepository<'_>>,
    ) -> Result<T, ServiceError>,
) -> Result<T, ServiceError> {
    let articles = SqliteArticleRepository::try_new(conn)?;
    let comments = SqliteCommentRepository::try_new(conn)?;
    op(&BlogService::new(articles, comments))
}

#[derive(Debug, Deserialize)]
struct CommentBody {
    #[serde(default)]
    article_id: Option<Value>,
    #[serde(default)]
    author: Option<Value>,
    #[serde(default)]
    text: Option<Value>,
}

fn parse_comment_body(raw: Option<&str>) -> Result<NewComment, Envelope> {
    let raw = raw.filter(|body| !body.trim().is_empty()).unwrap_or("{}");
    let body: CommentBody =
        serde_json::from_str(raw).map_err(|_| Envelope::bad_request(COMMENT_BODY_INVALID))?;

    let author = body.author.filter(|value| !is_blank(value));
    let text = body.text.filter(|value| !is_blank(value));
    let article_id = body.article_id.filter(|value| !is_empty_json(value));
    let (Some(article_id), Some(author), Some(text)) = (article_id, author, text) else {
        return Err(Envelope::bad_request(COMMENT_FIELDS_REQUIRED));
    };

    let (Value::String(author), Value::String(text)) = (author, text) else {
        return Err(Envelope::bad_request(COMMENT_TEXT_NOT_STRING));
    };
    let article_id = parse_article_id(&article_id)
        .ok_or_else(|| Envelope::bad_request(COMMENT_ARTICLE_ID_INVALID))?;
    Ok(NewComment::dated_today(article_id, author, text))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Number(number) => number.as_i64() == Some(0),
        other => is_blank(other),
    }
}

fn parse_article_id(value: &Value) -> Option<ArticleId> {
    let id = match value {
        Value::Number(number) => number.as_i64()?,
        Value::String(text) => text.trim().parse().ok()?,
        _ => return None,
    };
    (id > 0).then_some(id)
}
