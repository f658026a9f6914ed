//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Hand shaped views to the request layer, never raw records.

pub mod blog_service;
