//! Session credential fetch.

use crate::error::{Result, VivaError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Source of short-lived realtime session tokens.
///
/// Trait seam so the session start sequence can be tested without a
/// running interview server.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Request a session token for the given interview topic.
    async fn fetch_token(&self, topic: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    topic: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: String,
}

/// HTTP client for the interview server's `/session` endpoint.
pub struct HttpTokenClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTokenClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TokenProvider for HttpTokenClient {
    async fn fetch_token(&self, topic: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/session", self.base_url))
            .json(&TokenRequest { topic })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(VivaError::TokenRequest {
                status: status.as_u16(),
                message,
            });
        }

        let body: TokenResponse = response.json().await?;
        if body.token.is_empty() {
            return Err(VivaError::TokenMissing);
        }
        Ok(body.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_topic() {
        let json = serde_json::to_string(&TokenRequest { topic: "PCB Designer" }).unwrap();
        assert_eq!(json, r#"{"topic":"PCB Designer"}"#);
    }

    #[test]
    fn response_parses_token() {
        let body: TokenResponse = serde_json::from_str(r#"{"token":"ek_abc123"}"#).unwrap();
        assert_eq!(body.token, "ek_abc123");
    }

    #[test]
    fn response_missing_token_defaults_to_empty() {
        let body: TokenResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.token.is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = HttpTokenClient::new("http://localhost:8006/");
        assert_eq!(client.base_url, "http://localhost:8006");
    }
}
