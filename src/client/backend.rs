use super::error::ClientError;
use super::protocol::{IndexRequest, SearchRequest, SearchResponse};
use async_trait::async_trait;

/// The engine operations the demo script needs.
///
/// `ElasticClient` talks to a real cluster; tests substitute an in-memory double.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Opens a session: verifies at least one engine node is reachable.
    async fn connect(&self) -> Result<(), ClientError>;

    /// Fails if the index already exists.
    async fn create_index(&self, index: &str) -> Result<(), ClientError>;

    async fn index_document(&self, request: &IndexRequest) -> Result<(), ClientError>;

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError>;

    async fn delete_index(&self, index: &str) -> Result<(), ClientError>;
}
