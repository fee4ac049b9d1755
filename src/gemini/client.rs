use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    gemini::schema::{self, GenerateContentResponse},
    retrieval::{FetchError, SetFetcher},
    types::FetchedSet,
    warning,
};

pub const MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_SECS: u64 = 5;
pub const BAD_GATEWAY_BACKOFF_SECS: u64 = 10;
pub const MAX_RETRY_AFTER_SECS: u64 = 120;

pub struct GeminiClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    /// Builds a client from the environment, see [`config`].
    pub fn from_env() -> Result<Self, FetchError> {
        let api_key = config::gemini_api_key().map_err(FetchError::Config)?;
        Ok(Self::new(
            config::gemini_api_url(),
            api_key,
            config::gemini_model(),
        ))
    }

    fn endpoint(&self) -> String {
        format!(
            "{uri}/models/{model}:generateContent",
            uri = self.api_url.trim_end_matches('/'),
            model = self.model
        )
    }

    async fn generate(&self, set_number: &str) -> Result<GenerateContentResponse, FetchError> {
        let body = schema::request_body(set_number);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let response = self
                .client
                .post(self.endpoint())
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                return Ok(response.json::<GenerateContentResponse>().await?);
            }

            if attempt >= MAX_ATTEMPTS {
                return Err(FetchError::Status(status));
            }

            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok());
            match retry_delay(status, retry_after) {
                Some(delay) => sleep(delay).await,
                None => return Err(FetchError::Status(status)),
            }
        }
    }
}

/// How long to wait before retrying a failed request, `None` when the
/// status is not worth retrying.
///
/// 429 honours `Retry-After` up to [`MAX_RETRY_AFTER_SECS`] and falls back to
/// [`DEFAULT_BACKOFF_SECS`] when the header is missing or unreadable.
/// 502 always waits [`BAD_GATEWAY_BACKOFF_SECS`].
pub fn retry_delay(status: StatusCode, retry_after: Option<&str>) -> Option<Duration> {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let secs = retry_after
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_BACKOFF_SECS);
            if secs > MAX_RETRY_AFTER_SECS {
                warning!(
                    "Retry after has reached an abnormal high of {} seconds.",
                    secs
                );
                return None;
            }
            Some(Duration::from_secs(secs))
        }
        StatusCode::BAD_GATEWAY => Some(Duration::from_secs(BAD_GATEWAY_BACKOFF_SECS)),
        _ => None,
    }
}

impl SetFetcher for GeminiClient {
    async fn fetch(&self, set_number: &str) -> Result<FetchedSet, FetchError> {
        let response = self.generate(set_number).await?;
        let text = response.text().ok_or(FetchError::EmptyResponse)?;
        let data = schema::parse_set_data(&text)?;

        Ok(FetchedSet {
            data,
            grounding: response.grounding(),
        })
    }
}
