//! Fake engine for tests.
//!
//! An Axum app on `127.0.0.1:0` that answers the handful of endpoints the client uses
//! and records every request it sees, plus a bare HTTPS endpoint with a self-signed
//! certificate for checking certificate verification.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use rcgen::CertifiedKey;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio_rustls::rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio_rustls::rustls::{self, ServerConfig};
use tokio_rustls::TlsAcceptor;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

pub struct FakeEngine {
    pub requests: Mutex<Vec<RecordedRequest>>,
    /// Answer index creation with 400 `resource_already_exists_exception`.
    pub fail_create: bool,
    /// Answer the health check with 503.
    pub unhealthy: bool,
    pub search_response: Value,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_create: false,
            unhealthy: false,
            search_response: search_body(3, &[]),
        }
    }

    pub fn with_hits(mut self, sources: &[Value]) -> Self {
        self.search_response = search_body(3, sources);
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.unhealthy = true;
        self
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `METHOD /path` for every request except health checks.
    pub fn api_calls(&self) -> Vec<String> {
        self.recorded()
            .into_iter()
            .filter(|r| r.path != "/")
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    /// Starts serving and returns the base URL.
    pub async fn spawn(self) -> (Arc<FakeEngine>, String) {
        let engine = Arc::new(self);
        let app = Router::new()
            .fallback(handle)
            .with_state(engine.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (engine, format!("http://{}", addr))
    }
}

/// A search response in the legacy shape (`hits.total` as a number).
pub fn search_body(took: u64, sources: &[Value]) -> Value {
    let hits: Vec<Value> = sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            json!({
                "_index": "twitter",
                "_type": "tweet",
                "_id": (i + 1).to_string(),
                "_score": null,
                "_source": source,
                "sort": ["olivere"]
            })
        })
        .collect();

    json!({
        "took": took,
        "timed_out": false,
        "hits": { "total": sources.len(), "max_score": null, "hits": hits }
    })
}

async fn handle(
    State(engine): State<Arc<FakeEngine>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    engine.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        ("HEAD" | "GET", [""]) if engine.unhealthy => {
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
        ("HEAD" | "GET", [""]) => {
            Json(json!({ "tagline": "You Know, for Search" })).into_response()
        }
        ("PUT", [index]) if engine.fail_create => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": { "type": "resource_already_exists_exception", "index": index },
                "status": 400
            })),
        )
            .into_response(),
        ("PUT", [index]) => {
            Json(json!({ "acknowledged": true, "index": index })).into_response()
        }
        ("PUT", [index, _doc_type, id]) => Json(json!({
            "_index": index,
            "_id": id,
            "_version": 1,
            "result": "created"
        }))
        .into_response(),
        ("POST", [_index, "_search"]) => Json(engine.search_response.clone()).into_response(),
        ("DELETE", [_index]) => Json(json!({ "acknowledged": true })).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

// ============================================================
// TLS
// ============================================================

/// Name on the self-signed certificate; never matches the `127.0.0.1` the client dials.
pub const TLS_CERT_HOST: &str = "not-localhost.invalid";

const EMPTY_OK: &[u8] = b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";

/// Starts an HTTPS endpoint with a self-signed certificate for `TLS_CERT_HOST` and
/// returns its base URL. Every request is answered with an empty `200 OK`.
pub async fn spawn_self_signed_tls() -> String {
    let CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec![TLS_CERT_HOST.to_string()]).unwrap();
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));

    let server_config =
        ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
            .with_safe_default_protocol_versions()
            .unwrap()
            .with_no_client_auth()
            .with_single_cert(vec![cert.der().clone()], key)
            .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(server_config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                // a rejected handshake just drops the connection
                let Ok(mut tls) = acceptor.accept(stream).await else {
                    return;
                };
                if read_request_head(&mut tls).await {
                    let _ = tls.write_all(EMPTY_OK).await;
                    let _ = tls.shutdown().await;
                }
            });
        }
    });

    format!("https://{}", addr)
}

async fn read_request_head<S: AsyncRead + Unpin>(stream: &mut S) -> bool {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return false,
            Ok(n) => {
                head.extend_from_slice(&chunk[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    return true;
                }
            }
        }
    }
}
