//! Search Engine Client Module
//!
//! A small client for the subset of the Elasticsearch REST API the demo needs:
//! health check, index creation/deletion, single document indexing and search.
//!
//! ## Behaviour
//! - **Node selection**: Requests are spread round-robin over the configured endpoints.
//!   There is no sniffing; only the configured URLs are ever contacted.
//! - **Health check**: `connect` checks every endpoint and keeps the ones that answer.
//! - **TLS**: Certificate verification is a per-client setting chosen at construction time.
//! - **Auth**: Optional static basic-auth credentials are attached to every request.
//!
//! ## Submodules
//! - **`backend`**: The `SearchBackend` trait the demo script is written against.
//! - **`client`**: `ElasticClient`, the `reqwest` implementation of `SearchBackend`.
//! - **`error`**: `ClientError`.
//! - **`protocol`**: Request/response DTOs and typed hit decoding.

pub mod backend;
pub mod client;
pub mod error;
pub mod protocol;

#[cfg(test)]
pub(crate) mod fake;
