use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{ChatRequest, ChatResponse, HistoryEntry, SessionId, SessionSummary};

/// Where the chat service listens unless told otherwise.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Anything that can answer a chat message.
///
/// [`Chapka`] talks to the real service; the chat view only depends on this
/// trait so it can be driven by other transports.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one message and wait for the reply.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

/// Client for the Chapka chat service.
#[derive(Debug, Clone)]
pub struct Chapka {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
}

impl Chapka {
    /// Create a new client for the service at `base_url`.
    ///
    /// `None` selects [`DEFAULT_SERVER_URL`].
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<&str>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(base_url.unwrap_or(DEFAULT_SERVER_URL))?;
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .default_headers(default_headers())
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a message with `POST /chat`.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.base_url.join("chat")?;
        self.execute(self.client.post(url).json(request)).await
    }

    /// List the sessions the server knows about with `GET /sessions`.
    pub async fn sessions(&self) -> Result<Vec<SessionSummary>> {
        let url = self.base_url.join("sessions")?;
        self.execute(self.client.get(url)).await
    }

    /// Fetch the server-side history of one session with `GET /sessions/{id}`.
    pub async fn session_history(&self, session_id: SessionId) -> Result<Vec<HistoryEntry>> {
        let url = self.base_url.join(&format!("sessions/{session_id}"))?;
        self.execute(self.client.get(url))
            .await
            .map_err(|err| match err {
                Error::NotFound { message, .. } => {
                    Error::not_found(message, Some(session_id.get()))
                }
                err => err,
            })
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.execute_inner(request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if result.is_err() {
            CLIENT_REQUEST_ERRORS.click();
        }
        result
    }

    async fn execute_inner<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(
                    format!("Request timed out: {}", e),
                    Some(self.timeout.as_secs_f64()),
                )
            } else if e.is_connect() {
                Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
            } else {
                Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
            }
        })?;

        if !response.status().is_success() {
            return Err(process_error_response(response).await);
        }

        response.json::<T>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait::async_trait]
impl ChatBackend for Chapka {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        Chapka::chat(self, request).await
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Turn a non-success response into an [`Error`].
///
/// The service reports failures as `{"detail": "..."}`; anything else is kept
/// verbatim as the message.
async fn process_error_response(response: Response) -> Error {
    let status = response.status();

    #[derive(Deserialize)]
    struct ErrorResponse {
        detail: Option<serde_json::Value>,
    }

    let error_body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            return Error::http_client(
                format!("Failed to read error response: {}", e),
                Some(Box::new(e)),
            );
        }
    };

    let message = serde_json::from_str::<ErrorResponse>(&error_body)
        .ok()
        .and_then(|e| e.detail)
        .map(|detail| match detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .unwrap_or_else(|| {
            if error_body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                error_body
            }
        });

    match status {
        StatusCode::NOT_FOUND => Error::not_found(message, None),
        _ => Error::api(status.as_u16(), message),
    }
}
