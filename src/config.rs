// Configuration module: collects the values the HTTP client needs into one
// explicit struct instead of reading globals at call sites. Credentials come
// from the environment; their absence is a startup error.

use anyhow::{Context, Result};
use std::time::Duration;

/// Environment variable holding the Trello API key.
pub const KEY_VAR: &str = "TRELLO_API_KEY";
/// Environment variable holding the Trello API token.
pub const TOKEN_VAR: &str = "TRELLO_API_TOKEN";
/// Optional override for the service base URL (used by tests).
pub const BASE_URL_VAR: &str = "TRELLO_BASE_URL";

const DEFAULT_BASE_URL: &str = "https://api.trello.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything the `ApiClient` needs to talk to the board service: the base
/// URL, the two authentication query parameters merged into every request,
/// and the single fixed per-call timeout.
// No Debug derive: key and token must never end up in diagnostics.
#[derive(Clone)]
pub struct Settings {
    pub base_url: String,
    pub key: String,
    pub token: String,
    pub timeout: Duration,
}

impl Settings {
    /// Build settings from the environment. Missing or empty credentials are
    /// a fatal error: the program must refuse to start rather than issue
    /// unauthenticated requests.
    pub fn from_env() -> Result<Self> {
        Self::from_parts(
            std::env::var(KEY_VAR).ok(),
            std::env::var(TOKEN_VAR).ok(),
            std::env::var(BASE_URL_VAR).ok(),
        )
    }

    fn from_parts(
        key: Option<String>,
        token: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self> {
        let key = key
            .filter(|v| !v.trim().is_empty())
            .with_context(|| format!("Can not find your key: set {KEY_VAR}"))?;
        let token = token
            .filter(|v| !v.trim().is_empty())
            .with_context(|| format!("Can not find your token: set {TOKEN_VAR}"))?;
        Ok(Settings {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            key,
            token,
            timeout: REQUEST_TIMEOUT,
        })
    }
}
