//! Elasticsearch Demo Service Library
//!
//! This library crate defines the modules behind the `es-demo` binary (`main.rs`).
//! Every request to the HTTP server runs a short scripted round trip against an
//! Elasticsearch compatible cluster and answers with a plain-text transcript.
//!
//! ## Architecture Modules
//! - **`config`**: Environment driven configuration (listen port, endpoints, credentials,
//!   hit decoding policy).
//! - **`client`**: A thin HTTP client for the engine's index/document/search API built on
//!   `reqwest`. Exposes the `SearchBackend` trait the demo runs against.
//! - **`demo`**: The create / index / search / delete script, its transcript rendering and
//!   the Axum handler that serves it.

pub mod client;
pub mod config;
pub mod demo;
