//! HTTP implementation of `SearchBackend`.

use super::backend::SearchBackend;
use super::error::ClientError;
use super::protocol::{
    AcknowledgedResponse, IndexRequest, IndexResponse, SearchRequest, SearchResponse,
    PARAM_PRETTY, PARAM_REFRESH,
};
use crate::config::types::{BasicAuth, SearchConfig};

use async_trait::async_trait;
use reqwest::Method;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

pub struct ElasticClient {
    /// Shared connection pool. TLS settings are fixed when it is built.
    http: reqwest::Client,

    /// Every endpoint from the configuration.
    nodes: Vec<String>,

    /// Endpoints that passed the last health check.
    live_nodes: RwLock<Vec<String>>,

    /// Round-robin cursor over `live_nodes`.
    next: AtomicUsize,

    auth: Option<BasicAuth>,
}

impl ElasticClient {
    /// Builds the client. No network traffic happens until `connect`.
    pub fn new(config: &SearchConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        let nodes: Vec<String> = config
            .urls
            .iter()
            .map(|url| url.trim_end_matches('/').to_string())
            .collect();

        Ok(Self {
            http,
            live_nodes: RwLock::new(nodes.clone()),
            nodes,
            next: AtomicUsize::new(0),
            auth: config.basic_auth.clone(),
        })
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    #[cfg(test)]
    pub(crate) async fn live_nodes(&self) -> Vec<String> {
        self.live_nodes.read().await.clone()
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(auth) => request.basic_auth(&auth.username, Some(&auth.password)),
            None => request,
        }
    }

    async fn next_node(&self) -> Result<String, ClientError> {
        let live = self.live_nodes.read().await;
        if live.is_empty() {
            return Err(ClientError::NoNodeAvailable(self.nodes.join(", ")));
        }
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % live.len();
        Ok(live[idx].clone())
    }

    /// Sends one request to the next live node and rejects non-2xx answers.
    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, ClientError> {
        let node = self.next_node().await?;
        let url = format!("{}{}", node, path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.with_auth(self.http.request(method, url));
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn ping(&self, node: &str) -> bool {
        let request = self.with_auth(self.http.head(format!("{}/", node)));
        match request.send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!("Health check of {} returned {}", node, response.status());
                false
            }
            Err(e) => {
                tracing::warn!("Health check of {} failed: {}", node, e);
                false
            }
        }
    }
}

#[async_trait]
impl SearchBackend for ElasticClient {
    async fn connect(&self) -> Result<(), ClientError> {
        let mut alive = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if self.ping(node).await {
                alive.push(node.clone());
            }
        }

        if alive.is_empty() {
            return Err(ClientError::NoNodeAvailable(self.nodes.join(", ")));
        }

        tracing::debug!("{} of {} nodes alive", alive.len(), self.nodes.len());
        *self.live_nodes.write().await = alive;
        Ok(())
    }

    async fn create_index(&self, index: &str) -> Result<(), ClientError> {
        let response = self
            .send(Method::PUT, &format!("/{}", index), &[], None)
            .await?;
        let ack: AcknowledgedResponse = response.json().await?;
        tracing::debug!("Created index {} (acknowledged={})", index, ack.acknowledged);
        Ok(())
    }

    async fn index_document(&self, request: &IndexRequest) -> Result<(), ClientError> {
        let params: &[(&str, &str)] = if request.refresh {
            &[(PARAM_REFRESH, "true")]
        } else {
            &[]
        };

        let response = self
            .send(
                Method::PUT,
                &request.path(),
                params,
                Some(request.body.clone()),
            )
            .await?;
        let indexed: IndexResponse = response.json().await?;
        tracing::debug!(
            "Indexed document {:?} into {:?} ({:?}, version {:?})",
            indexed.id,
            indexed.index,
            indexed.result,
            indexed.version
        );
        Ok(())
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        let params: &[(&str, &str)] = if request.pretty {
            &[(PARAM_PRETTY, "true")]
        } else {
            &[]
        };
        let body = serde_json::to_value(request)?;

        let response = self
            .send(Method::POST, &request.path(), params, Some(body))
            .await?;
        Ok(response.json().await?)
    }

    async fn delete_index(&self, index: &str) -> Result<(), ClientError> {
        let response = self
            .send(Method::DELETE, &format!("/{}", index), &[], None)
            .await?;
        let ack: AcknowledgedResponse = response.json().await?;
        tracing::debug!("Deleted index {} (acknowledged={})", index, ack.acknowledged);
        Ok(())
    }
}
