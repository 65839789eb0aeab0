//! HTTP transport for the construction-budget API. Every feature client goes
//! through [`ApiClient::call`], which joins the configured base URL, attaches
//! the bearer credential of the current session, and maps responses into the
//! [`AppError`] taxonomy.
//!
//! Security boundaries: a 401 from the API means the credential is invalid or
//! expired, so the session is ended here before the error reaches any page.
//! Tokens are never logged and error bodies are trimmed before display.

use super::{config::AppConfig, errors::AppError};
use crate::features::auth::session::SessionStore;
use reqwest::{Method, Response, StatusCode, header::AUTHORIZATION};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Session-aware JSON client. Cheap to clone; clones share the connection
/// pool and the session store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Builds a client for the configured API base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be initialized.
    pub fn new(config: &AppConfig, session: SessionStore) -> Result<Self, AppError> {
        let http = build_http_client(config)?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Performs one request and decodes the JSON body into `T`.
    ///
    /// Empty bodies (e.g. 204) decode as JSON `null`, so `()` and `Option<T>`
    /// work for endpoints that return nothing.
    ///
    /// # Errors
    /// Returns `AppError::Unauthorized` after ending the session on 401,
    /// `AppError::Validation` on 400/409/422, and transport errors otherwise.
    pub async fn call<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = build_url(&self.base_url, path);
        debug!(%method, path, "api request");

        let bearer = self.session.bearer();
        let mut request = self.http.request(method, &url);
        if let Some(token) = &bearer {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_request_error)?;
        self.handle_json_response(response, bearer.as_deref()).await
    }

    /// # Errors
    /// See [`ApiClient::call`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.call::<T, ()>(Method::GET, path, None).await
    }

    /// # Errors
    /// See [`ApiClient::call`].
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(Method::POST, path, Some(body)).await
    }

    /// # Errors
    /// See [`ApiClient::call`].
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(Method::PUT, path, Some(body)).await
    }

    /// # Errors
    /// See [`ApiClient::call`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.call::<T, ()>(Method::DELETE, path, None).await
    }

    /// Parses JSON responses and maps failures. A 401 ends the session only
    /// while it still holds `sent_bearer`, the credential the request carried.
    async fn handle_json_response<T: DeserializeOwned>(
        &self,
        response: Response,
        sent_bearer: Option<&str>,
    ) -> Result<T, AppError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AppError::Network(format!("Failed to read response: {err}")))?;

        if status.is_success() {
            let payload = if body.trim().is_empty() { "null" } else { body.as_str() };
            return serde_json::from_str(payload)
                .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")));
        }

        let message = sanitize_body(&body);
        match status {
            StatusCode::UNAUTHORIZED => {
                self.session.force_logout_if(sent_bearer, &message);
                Err(AppError::Unauthorized(message))
            }
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(AppError::Validation(message))
            }
            _ => {
                warn!(status = status.as_u16(), "api request failed");
                Err(AppError::Http {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client(config: &AppConfig) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
        .build()
        .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))
}

/// The browser owns connection timeouts; `fetch` has no per-client deadline.
#[cfg(target_arch = "wasm32")]
fn build_http_client(_config: &AppConfig) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .build()
        .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps network errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Sanitizes HTTP error bodies for user-facing messages.
///
/// JSON bodies of the form `{"message": "..."}` or `{"error": "..."}` are
/// unwrapped so validation feedback reads naturally next to a form.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    let extracted = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| {
            ["message", "error", "detail"]
                .iter()
                .find_map(|key| value.get(key)?.as_str().map(str::to_string))
        });
    let text = extracted.as_deref().unwrap_or(trimmed).trim();

    if text.is_empty() {
        "Request failed.".to_string()
    } else {
        text.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_ERROR_CHARS, build_url, sanitize_body};

    #[test]
    fn build_url_joins_without_duplicate_slashes() {
        assert_eq!(
            build_url("https://api.smeta.uz/", "/v1/projects"),
            "https://api.smeta.uz/v1/projects"
        );
        assert_eq!(
            build_url("https://api.smeta.uz", "v1/projects"),
            "https://api.smeta.uz/v1/projects"
        );
        assert_eq!(build_url("  ", "/v1/projects"), "/v1/projects");
    }

    #[test]
    fn sanitize_body_prefers_message_fields() {
        assert_eq!(
            sanitize_body(r#"{"message":"Phone already registered"}"#),
            "Phone already registered"
        );
        assert_eq!(sanitize_body(r#"{"error":"  bad input "}"#), "bad input");
        assert_eq!(sanitize_body("plain failure"), "plain failure");
        assert_eq!(sanitize_body("   "), "Request failed.");
    }

    #[test]
    fn sanitize_body_truncates_long_bodies() {
        let long = "x".repeat(MAX_ERROR_CHARS * 2);
        assert_eq!(sanitize_body(&long).len(), MAX_ERROR_CHARS);
    }
}
