use crate::client::error::ClientError;
use crate::client::protocol::HitDecodeError;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const INDEX_NAME: &str = "twitter";
pub const DOC_TYPE: &str = "tweet";
pub const DOC_ID: &str = "1";
pub const TERM_FIELD: &str = "user";
pub const TERM_VALUE: &str = "olivere";
pub const SAMPLE_MESSAGE: &str = "Take Five";
pub const PAGE_SIZE: usize = 10;

/// The only record type the demo writes and reads back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub user: String,
    pub message: String,
}

impl Tweet {
    pub fn sample() -> Self {
        Self {
            user: TERM_VALUE.to_string(),
            message: SAMPLE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Connect,
    CreateIndex,
    IndexDocument,
    Search,
    DeleteIndex,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Connect => "connect",
            Step::CreateIndex => "create index",
            Step::IndexDocument => "index document",
            Step::Search => "search",
            Step::DeleteIndex => "delete index",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("{step} failed: {source}")]
    Upstream {
        step: Step,
        #[source]
        source: ClientError,
    },

    #[error(transparent)]
    Decode(#[from] HitDecodeError),

    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

impl DemoError {
    /// Wraps a client failure with the step it happened in.
    pub fn at(step: Step) -> impl FnOnce(ClientError) -> DemoError {
        move |source| DemoError::Upstream { step, source }
    }

    pub fn step(&self) -> Option<Step> {
        match self {
            DemoError::Upstream { step, .. } => Some(*step),
            DemoError::Decode(_) => Some(Step::Search),
            DemoError::Encode(_) => Some(Step::IndexDocument),
        }
    }

    /// HTTP status the engine answered with, when the failure was an engine error response.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            DemoError::Upstream { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Upstream and decode failures are the engine's fault; encoding is ours.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DemoError::Upstream { .. } | DemoError::Decode(_) => StatusCode::BAD_GATEWAY,
            DemoError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
