//! HTTP client for the Review Manager backend using reqwest

use std::sync::RwLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::{Error, Result};
use revman_core::Config;

/// Name of the cookie carrying the session
pub const SESSION_COOKIE: &str = "session_token";

const USER_AGENT: &str = concat!("revman/", env!("CARGO_PKG_VERSION"));

/// Backend API client
///
/// Every route lives under `<base_url>/api`. The session token plays the
/// role of the browser cookie jar: it is sent as a cookie on every request
/// and replaced when the backend sets a new one.
pub struct ApiClient {
    http: reqwest::Client,
    /// Same settings but redirects are returned instead of followed
    no_redirect: reqwest::Client,
    base_url: Url,
    api_base: Url,
    token: RwLock<Option<String>>,
}

/// Error body returned by the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        let no_redirect = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let mut api_base = base_url.clone();
        let path = format!("{}/api/", api_base.path().trim_end_matches('/'));
        api_base.set_path(&path);

        debug!(base_url = %base_url, "Created API client");

        Ok(Self {
            http,
            no_redirect,
            base_url,
            api_base,
            token: RwLock::new(None),
        })
    }

    /// Create a client from the effective configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config
            .base_url()
            .map_err(|e| Error::Other(e.to_string()))?;
        Self::new(base_url, config.server.timeout)
    }

    /// Use `token` as the session cookie
    pub fn with_token(self, token: Option<String>) -> Self {
        self.set_session_token(token);
        self
    }

    /// Current session cookie value
    pub fn session_token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => {
                warn!("Session token lock poisoned, reading last value");
                poisoned.into_inner().clone()
            }
        }
    }

    pub fn set_session_token(&self, token: Option<String>) {
        let mut guard = self.token.write().unwrap_or_else(|poisoned| {
            warn!("Session token lock poisoned, overwriting");
            poisoned.into_inner()
        });
        *guard = token;
    }

    /// Backend origin
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an API route such as `tasks/todo`
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.api_base.join(path.trim_start_matches('/'))?)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        self.build(&self.http, method, path)
    }

    pub(crate) fn request_no_redirect(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        self.build(&self.no_redirect, method, path)
    }

    fn build(&self, client: &reqwest::Client, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "Backend request");

        let mut builder = client.request(method, url);
        if let Some(token) = self.session_token() {
            builder = builder.header(COOKIE, format!("{}={}", SESSION_COOKIE, token));
        }
        Ok(builder)
    }

    /// Send a request and fail on non-success statuses
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() || status.is_redirection() {
            self.capture_session_cookie(response.headers());
            return Ok(response);
        }

        Err(error_from_response(response).await)
    }

    /// Send a request and decode its JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Parse(format!("Failed to parse response: {}", e)))
    }

    /// Adopt a session cookie set or cleared by the backend
    fn capture_session_cookie(&self, headers: &HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            if let Some(token) = parse_session_cookie(raw) {
                debug!(cleared = token.is_none(), "Backend updated the session cookie");
                self.set_session_token(token);
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.session_token().is_some())
            .finish_non_exhaustive()
    }
}

/// Read a `Set-Cookie` value for the session cookie.
///
/// Returns `Some(None)` when the cookie is being deleted, `None` when the
/// header is about another cookie.
fn parse_session_cookie(raw: &str) -> Option<Option<String>> {
    let pair = raw.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    if name.trim() != SESSION_COOKIE {
        return None;
    }

    let value = value.trim().trim_matches('"');
    let expired = raw
        .split(';')
        .skip(1)
        .any(|attr| attr.trim().eq_ignore_ascii_case("max-age=0"));
    if value.is_empty() || expired {
        Some(None)
    } else {
        Some(Some(value.to_string()))
    }
}

async fn error_from_response(response: Response) -> Error {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = extract_detail(&text).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    });

    debug!(status = status.as_u16(), %message, "Backend rejected request");

    if status == StatusCode::UNAUTHORIZED {
        Error::Unauthorized(message)
    } else {
        Error::Status {
            status: status.as_u16(),
            message,
        }
    }
}

/// Pull the `detail` field out of an error body
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) => Some(s),
        // Validation errors carry a list of objects with a `msg`
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|i| i.get("msg").and_then(|m| m.as_str()).map(str::to_string))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_under_api() {
        let c = client("http://localhost:8000");
        assert_eq!(c.endpoint("tasks/todo").unwrap().as_str(), "http://localhost:8000/api/tasks/todo");
        assert_eq!(c.endpoint("/users/me").unwrap().as_str(), "http://localhost:8000/api/users/me");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let c = client("https://example.com/review/");
        assert_eq!(c.endpoint("rewards").unwrap().as_str(), "https://example.com/review/api/rewards");
    }

    #[test]
    fn test_parse_session_cookie() {
        assert_eq!(
            parse_session_cookie("session_token=abc; Path=/; HttpOnly"),
            Some(Some("abc".to_string()))
        );
        assert_eq!(
            parse_session_cookie("session_token=\"\"; Max-Age=0; Path=/"),
            Some(None)
        );
        assert_eq!(parse_session_cookie("other=1; Path=/"), None);
    }

    #[test]
    fn test_extract_detail() {
        assert_eq!(extract_detail(r#"{"detail":"Task not found."}"#), Some("Task not found.".to_string()));
        assert_eq!(
            extract_detail(r#"{"detail":[{"msg":"field required"},{"msg":"bad value"}]}"#),
            Some("field required; bad value".to_string())
        );
        assert_eq!(extract_detail("<html>"), None);
    }

    #[test]
    fn test_token_survives_poisoned_lock() {
        let c = client("http://localhost:8000").with_token(Some("abc".to_string()));
        std::thread::scope(|s| {
            let _ = s
                .spawn(|| {
                    let _guard = c.token.write().unwrap();
                    panic!("writer died holding the lock");
                })
                .join();
        });
        assert!(c.token.is_poisoned());

        assert_eq!(c.session_token().as_deref(), Some("abc"));
        c.set_session_token(Some("def".to_string()));
        assert_eq!(c.session_token().as_deref(), Some("def"));
    }

    #[test]
    fn test_debug_hides_token() {
        let c = client("http://localhost:8000").with_token(Some("secret".to_string()));
        let debug = format!("{:?}", c);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("authenticated: true"));
    }
}
