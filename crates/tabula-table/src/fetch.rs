use std::time::Duration;

use http::StatusCode;
use tabula_query::{ListResponse, QueryPayload};
use ureq::Agent;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend returned {0}")]
    Status(StatusCode),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ureq::Error> for FetchError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(code) => match StatusCode::from_u16(code) {
                Ok(status) => FetchError::Status(status),
                Err(_) => FetchError::Transport(format!("invalid status code: {code}")),
            },
            other => FetchError::Transport(other.to_string()),
        }
    }
}

/// Executes committed queries against an entity's list endpoint.
///
/// The table never talks to the network itself; whoever drives it passes
/// emitted payloads here and feeds the returned count back with
/// `TableController::apply_response`. A failed fetch leaves the table's
/// state as it was.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, endpoint: &str, payload: &QueryPayload) -> Result<ListResponse, FetchError>;
}

/// Posts payloads as JSON to `base_url + endpoint`. No retries.
pub struct HttpFetcher {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, endpoint: &str, payload: &QueryPayload) -> Result<ListResponse, FetchError> {
        let url = self.url(endpoint);
        let body = serde_json::to_vec(payload)?;

        let mut request = self
            .agent
            .post(url.as_str())
            .header("content-type", "application/json");
        if let Some(token) = &self.token {
            request = request.header("authorization", format!("Bearer {token}"));
        }

        let mut response = request.send(&body[..])?;
        let text = response.body_mut().read_to_string()?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let fetcher = HttpFetcher::new("http://localhost:8080/api/", Duration::from_secs(1));
        assert_eq!(
            fetcher.url("/branches/list"),
            "http://localhost:8080/api/branches/list"
        );
        assert_eq!(
            fetcher.url("roles/list"),
            "http://localhost:8080/api/roles/list"
        );
    }

    #[test]
    fn status_errors_keep_the_code() {
        let err = FetchError::from(ureq::Error::StatusCode(503));
        assert!(matches!(err, FetchError::Status(StatusCode::SERVICE_UNAVAILABLE)));
    }
}
