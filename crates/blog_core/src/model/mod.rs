//! Storage-facing records for articles, tags and comments.
//!
//! # Responsibility
//! - Define the typed rows returned by the repository layer.
//! - Keep storage names (`read_time`, `article_id`) separate from the
//!   external JSON shape produced by `crate::shape`.
//!
//! # Invariants
//! - Articles are read-only from this crate's perspective.
//! - Comments are append-only; no update or delete path exists.

pub mod article;
pub mod comment;
