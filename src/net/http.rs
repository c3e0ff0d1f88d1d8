//! HTTP client adapter shared by every resource service.
//!
//! ARCHITECTURE
//! ============
//! One configured `reqwest::Client` with a fixed base address, default
//! headers and a request timeout. Every request reads the bearer token back
//! out of durable storage, so the adapter never caches credentials and a
//! logout is visible to the very next call.
//!
//! CANCELLATION
//! ============
//! `scoped` returns a handle whose requests all observe the same
//! `RequestOptions`. A view hands its scoped handle to the services it calls
//! and cancels the token when it goes away.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::error::ApiError;
use crate::config::ClientConfig;
use crate::state::storage::{Storage, load_json};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// A file attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name).first_or_octet_stream().to_string();
        Self { file_name, mime, bytes }
    }

    /// Read an upload from disk, naming it after the file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when the file cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |name| name.to_string_lossy().into_owned());
        Ok(Self::new(file_name, bytes))
    }
}

/// Request body. Each variant sets its own content type.
#[derive(Debug, Clone)]
pub enum Payload {
    /// `application/json`
    Json(Value),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `multipart/form-data`
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<(String, Upload)>,
    },
}

impl Payload {
    /// Form fields, upgraded to multipart when a file is attached.
    #[must_use]
    pub fn form_with_file(fields: Vec<(String, String)>, file: Option<(&str, Upload)>) -> Self {
        match file {
            Some((name, upload)) => Self::Multipart { fields, files: vec![(name.to_owned(), upload)] },
            None => Self::Form(fields),
        }
    }

    /// Content type the request will carry, without the multipart boundary.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::Form(_) => "application/x-www-form-urlencoded",
            Self::Multipart { .. } => "multipart/form-data",
        }
    }
}

/// Per-request overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Replaces the configured request timeout.
    pub timeout: Option<Duration>,
    /// Aborts the request with [`ApiError::Cancelled`] once cancelled.
    pub cancel: Option<CancellationToken>,
    /// Query pairs appended after any the scope carries.
    pub query: Vec<(String, String)>,
}

/// Only the token is read back; the rest of the persisted session is ignored.
#[derive(Deserialize)]
struct PersistedToken {
    token: Option<String>,
}

/// The configured request client.
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    storage: Arc<dyn Storage>,
    session_key: String,
    scope: RequestOptions,
}

impl HttpClient {
    /// Build the adapter from config and the storage holding the session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the underlying client fails to build.
    pub fn new(config: &ClientConfig, storage: Arc<dyn Storage>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.timeouts.connect)
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            timeout: config.timeouts.request,
            storage,
            session_key: config.session_key.clone(),
            scope: RequestOptions::default(),
        })
    }

    /// A handle whose requests all use `options` unless a call overrides them.
    #[must_use]
    pub fn scoped(&self, options: RequestOptions) -> Self {
        Self { scope: options, ..self.clone() }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Bearer token from durable storage. Empty tokens count as absent.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        read_token(self.storage.as_ref(), &self.session_key)
    }

    /// [`HttpClient::bearer_token`] off the async runtime, since storage may
    /// hit the filesystem.
    async fn load_bearer_token(&self) -> Option<String> {
        let storage = Arc::clone(&self.storage);
        let key = self.session_key.clone();
        tokio::task::spawn_blocking(move || read_token(storage.as_ref(), &key))
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "token lookup task failed");
                None
            })
    }

    /// Perform one request and return the decoded JSON body.
    ///
    /// A success with an empty body yields `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] matching the failure: transport, timeout,
    /// cancellation, a non-2xx status, or a body that is not JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Payload>,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        let timeout = options.timeout.or(self.scope.timeout).unwrap_or(self.timeout);
        let cancel = options.cancel.or_else(|| self.scope.cancel.clone());

        let mut builder = self.http.request(method.into(), &url).timeout(timeout);
        if !self.scope.query.is_empty() {
            builder = builder.query(&self.scope.query);
        }
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(token) = self.load_bearer_token().await {
            builder = builder.bearer_auth(token);
        }
        builder = match body {
            None => builder,
            Some(Payload::Json(value)) => builder.json(&value),
            Some(Payload::Form(fields)) => builder.form(&fields),
            Some(Payload::Multipart { fields, files }) => builder.multipart(multipart_form(fields, files)?),
        };

        tracing::debug!(method = method.as_str(), %url, "dispatching request");
        let exchange = async move {
            let response = builder.send().await.map_err(|e| classify(&e, timeout))?;
            let status = response.status().as_u16();
            let text = response.text().await.map_err(|e| classify(&e, timeout))?;
            interpret(status, &text, &url)
        };

        match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => Err(ApiError::Cancelled),
                    result = exchange => result,
                }
            }
            None => exchange.await,
        }
    }

    /// Perform one request and parse the body as `T`.
    ///
    /// # Errors
    ///
    /// Everything [`HttpClient::request`] returns, plus
    /// [`ApiError::MalformedResponse`] when the body does not fit `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Payload>,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let value = self.request(method, path, body, options).await?;
        serde_json::from_value(value).map_err(|e| ApiError::MalformedResponse(format!("{path}: {e}")))
    }

    /// # Errors
    ///
    /// See [`HttpClient::request_json`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_json(Method::Get, path, None, RequestOptions::default())
            .await
    }

    /// # Errors
    ///
    /// See [`HttpClient::request_json`].
    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Payload) -> Result<T, ApiError> {
        self.request_json(Method::Post, path, Some(body), RequestOptions::default())
            .await
    }

    /// # Errors
    ///
    /// See [`HttpClient::request_json`].
    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: Payload) -> Result<T, ApiError> {
        self.request_json(Method::Put, path, Some(body), RequestOptions::default())
            .await
    }

    /// Delete and discard whatever body comes back.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::Delete, path, None, RequestOptions::default())
            .await
            .map(|_| ())
    }
}

fn read_token(storage: &dyn Storage, key: &str) -> Option<String> {
    load_json::<PersistedToken>(storage, key)
        .and_then(|persisted| persisted.token)
        .filter(|token| !token.is_empty())
}

fn multipart_form(
    fields: Vec<(String, String)>,
    files: Vec<(String, Upload)>,
) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for (name, value) in fields {
        form = form.text(name, value);
    }
    for (name, upload) in files {
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        form = form.part(name, part);
    }
    Ok(form)
}

fn classify(err: &reqwest::Error, timeout: Duration) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(timeout)
    } else if err.is_builder() {
        ApiError::InvalidRequest(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

fn interpret(status: u16, text: &str, url: &str) -> Result<Value, ApiError> {
    if (200..300).contains(&status) {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_str(text).map_err(|e| ApiError::MalformedResponse(format!("{url}: {e}")));
    }
    if status == 401 {
        tracing::warn!(%url, "unauthorized response; stored token was rejected");
    }
    Err(ApiError::from_status(status, error_message(text)))
}

/// The backend reports failures as `{"error": "..."}`; fall back to the raw body.
pub(crate) fn error_message(text: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => body.error,
        Err(_) => text.trim().chars().take(200).collect(),
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;
