//! JSON request helper.
//!
//! ERROR HANDLING
//! ==============
//! Every failure (transport, undecodable body, non-2xx status) is logged
//! and returned to the caller as an [`ApiError`]; nothing is retried or
//! swallowed. For a failed status the error message is the body's `error`
//! string when the server sent one, so callers can show it directly.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::DEFAULT_CONTENT_TYPE;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// Errors returned by [`api_request`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, DNS, ...).
    #[error("request failed to send: {0}")]
    Transport(String),
    /// The response body was not valid JSON, or not the expected shape.
    #[error("invalid JSON response: {0}")]
    Decode(String),
    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },
}

impl ApiError {
    /// HTTP status for [`ApiError::Status`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Caller-side options for [`api_request`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    /// Extra headers; these win over the defaults on a name clash.
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self { method: Method::Post, body: Some(body), ..Self::default() }
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A fully resolved request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Same rule as the fetch API's `Response.ok`.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can carry an [`HttpRequest`] to a server.
///
/// Transports only report failures to get a response at all; status
/// handling belongs to [`api_request`].
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Default headers first, then caller headers; names compare
/// case-insensitively and the caller's value replaces the default in place.
pub fn merge_headers(caller: &[(String, String)]) -> Vec<(String, String)> {
    let mut merged = vec![(CONTENT_TYPE_HEADER.to_owned(), DEFAULT_CONTENT_TYPE.to_owned())];
    for (name, value) in caller {
        match merged.iter_mut().find(|(existing, _)| existing.eq_ignore_ascii_case(name)) {
            Some(slot) => *slot = (name.clone(), value.clone()),
            None => merged.push((name.clone(), value.clone())),
        }
    }
    merged
}

pub fn build_request(url: &str, options: RequestOptions) -> HttpRequest {
    HttpRequest {
        method: options.method,
        url: url.to_owned(),
        headers: merge_headers(&options.headers),
        body: options.body.map(|b| b.to_string()),
    }
}

/// Message for a failed response: the body's `error` string, if any.
pub fn error_message(body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .map_or_else(|| REQUEST_FAILED_MESSAGE.to_owned(), str::to_owned)
}

/// Send a JSON request and return the decoded response body.
///
/// # Errors
///
/// Returns [`ApiError::Transport`] if no response arrived,
/// [`ApiError::Decode`] if the body is not JSON, and [`ApiError::Status`]
/// for non-2xx responses. All are logged before being returned.
pub async fn api_request<T>(transport: &T, url: &str, options: RequestOptions) -> Result<Value, ApiError>
where
    T: Transport + ?Sized,
{
    let result = send_json(transport, url, options).await;
    if let Err(e) = &result {
        log::error!("API request error: {url}: {e}");
    }
    result
}

/// [`api_request`] followed by deserialising the body into `R`.
///
/// # Errors
///
/// As [`api_request`], plus [`ApiError::Decode`] if the body does not fit `R`.
pub async fn api_request_as<R, T>(transport: &T, url: &str, options: RequestOptions) -> Result<R, ApiError>
where
    R: DeserializeOwned,
    T: Transport + ?Sized,
{
    let value = api_request(transport, url, options).await?;
    serde_json::from_value(value).map_err(|e| {
        log::error!("API request error: {url}: unexpected body shape: {e}");
        ApiError::Decode(e.to_string())
    })
}

async fn send_json<T>(transport: &T, url: &str, options: RequestOptions) -> Result<Value, ApiError>
where
    T: Transport + ?Sized,
{
    let response = transport.send(build_request(url, options)).await?;
    let data: Value = serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status { status: response.status, message: error_message(&data) });
    }
    Ok(data)
}
