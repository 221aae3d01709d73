// API client module: a small blocking HTTP client for the Trello endpoints.
// It normalizes every outcome into a typed result so callers never have to
// special-case network faults: a 2xx response yields the parsed JSON payload
// (or `None` when the body is not JSON), everything else becomes
// `ApiError::Transport` carrying the remote diagnostic text.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use thiserror::Error;

use crate::config::Settings;

/// Endpoint listing the boards of the authenticated member.
pub const BOARDS_PATH: &str = "/1/members/me/boards";
/// Endpoint for creating a card.
pub const ADD_CARD_PATH: &str = "/1/cards";

/// Path of the columns ("lists") of a board.
pub fn lists_path(board_id: &str) -> String {
    format!("/1/boards/{board_id}/lists")
}

/// Path of the labels of a board.
pub fn labels_path(board_id: &str) -> String {
    format!("/1/boards/{board_id}/labels")
}

/// Path of the cards of a column.
pub fn cards_path(column_id: &str) -> String {
    format!("/1/lists/{column_id}/cards")
}

/// Failures surfaced by the client and the entity layer. Both variants are
/// returned as values, surfaced to the user as a message, and never panic.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response, connection fault, or timeout. Carries the remote
    /// diagnostic text (or the transport error description).
    #[error("{0}")]
    Transport(String),
    /// A payload was missing a field the data model requires.
    #[error("malformed record from the service: {0}")]
    MalformedRecord(String),
}

pub type ApiResult = Result<Option<Value>, ApiError>;

/// Blocking HTTP client holding the base URL, the authentication query pair
/// and the fixed per-call timeout. Cloning is cheap (the inner reqwest client
/// is reference counted), so entities keep their own handle.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    key: String,
    token: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // never expose key/token
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client from explicit settings. The timeout applies to every
    /// call made through this client; there are no retries.
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;
        Ok(ApiClient {
            client,
            base_url: settings.base_url,
            key: settings.key,
            token: settings.token,
        })
    }

    /// Convenience constructor reading `Settings::from_env`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(Settings::from_env()?)
    }

    /// Send a GET request. The `key`/`token` pair is merged into the query.
    pub fn get(&self, path: &str, query: &[(&str, String)]) -> ApiResult {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(url)
            .query(query)
            .query(&self.auth_query())
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::classify(response)
    }

    /// Send a POST request. Parameters travel in the query string, which is
    /// what the board service expects for its write endpoints.
    pub fn post(&self, path: &str, params: &[(&str, String)]) -> ApiResult {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(url)
            .query(params)
            .query(&self.auth_query())
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::classify(response)
    }

    fn auth_query(&self) -> [(&'static str, &str); 2] {
        [("key", &self.key), ("token", &self.token)]
    }

    fn classify(response: reqwest::blocking::Response) -> ApiResult {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|_| "".into());
            return Err(ApiError::Transport(format!("{status} - {body}")));
        }
        match response.json::<Value>() {
            Ok(payload) => Ok(Some(payload)),
            Err(_) => Ok(None),
        }
    }
}
