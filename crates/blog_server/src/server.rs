//! HTTP host for the blog endpoints.
//!
//! Maps each HTTP request onto an `ApiRequest`, runs the synchronous handler
//! on the blocking pool and converts the returned `Envelope` back into an
//! HTTP response. Routes:
//!
//! - `/articles` - list articles (`GET`, `OPTIONS`)
//! - `/article` - get one article (`GET`, `OPTIONS`)
//! - `/comments` - create a comment (`POST`, `OPTIONS`)
//! - `/health` - liveness probe

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use blog_core::db::DatabaseUrl;
use blog_core::{core_version, ApiRequest, BlogConfig, Endpoint, Envelope};
use log::{error, warn};
use serde_json::json;
use tokio::net::TcpListener;

/// Per-process state. Holds configuration only, never connections.
struct AppState {
    db: DatabaseUrl,
}

pub struct BlogServer {
    addr: String,
    router: Router,
}

impl BlogServer {
    pub fn new(config: &BlogConfig, db: DatabaseUrl) -> Self {
        Self {
            addr: config.socket_addr(),
            router: build_router(db),
        }
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.addr.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address `{}`: {err}", self.addr),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}

pub fn build_router(db: DatabaseUrl) -> Router {
    let state = Arc::new(AppState { db });

    Router::new()
        .route("/health", get(health))
        .route("/articles", any(list_articles))
        .route("/article", any(get_article))
        .route("/comments", any(create_comment))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": core_version() }))
}

async fn list_articles(
    State(state): State<Arc<AppState>>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    dispatch(Endpoint::ListArticles, state, method, query, body).await
}

async fn get_article(
    State(state): State<Arc<AppState>>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    dispatch(Endpoint::GetArticle, state, method, query, body).await
}

async fn create_comment(
    State(state): State<Arc<AppState>>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    dispatch(Endpoint::CreateComment, state, method, query, body).await
}

async fn dispatch(
    endpoint: Endpoint,
    state: Arc<AppState>,
    method: Method,
    query: HashMap<String, String>,
    body: Bytes,
) -> Response {
    let request = ApiRequest {
        http_method: Some(method.as_str().to_string()),
        query_string_parameters: (!query.is_empty()).then_some(query),
        body: (!body.is_empty()).then(|| String::from_utf8_lossy(&body).into_owned()),
    };

    let handled =
        tokio::task::spawn_blocking(move || endpoint.handle(&request, &state.db)).await;
    match handled {
        Ok(envelope) => envelope_response(envelope),
        Err(err) => {
            error!(
                "event=request_failed module=server status=error endpoint={} error_code=handler_panicked error={}",
                endpoint.name(),
                err
            );
            envelope_response(Envelope::internal_error())
        }
    }
}

fn envelope_response(envelope: Envelope) -> Response {
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut headers = HeaderMap::new();
    for (name, value) in &envelope.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!("event=response_header module=server status=skipped header={name}"),
        }
    }

    (status, headers, envelope.body).into_response()
}
