//! Request/response boundary for the three blog endpoints.
//!
//! # Responsibility
//! - Accept an HTTP-like request (`ApiRequest`) and always answer with a
//!   well-formed `Envelope`.
//! - Handle CORS preflight, method checks and input validation before any
//!   database access.
//! - Map service failures to 404/500 envelopes without leaking internals.
//!
//! # Invariants
//! - Handlers keep no state between calls.
//! - Each handler call owns at most one connection, released before the
//!   envelope is returned on every path.

mod envelope;
mod handlers;
mod request;

pub use envelope::{Envelope, ALLOW_ORIGIN_HEADER, CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE};
pub use handlers::{create_comment, get_article, list_articles, Endpoint};
pub use request::ApiRequest;
