//! Quiz API client.

use quiz_model::AnswerRequest;
use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("quiz-client/", env!("CARGO_PKG_VERSION"));

/// Header carrying the CSRF token.
const CSRF_HEADER: &str = "x-csrftoken";

/// Async client for the quiz server.
#[derive(Debug, Clone)]
pub struct QuizApiClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl QuizApiClient {
    /// Creates a client from a validated config.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(REFERER, header_value(config.base_url.trim())?);
        if let Some(token) = &config.csrf_token {
            headers.insert(CSRF_HEADER, header_value(token)?);
        }
        if let Some(cookies) = config.cookie_header() {
            headers.insert(COOKIE, header_value(&cookies)?);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// The config this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Posts the answers of one question.
    pub async fn save_answer(&self, url: &str, request: &AnswerRequest) -> Result<()> {
        let url = self.config.resolve(url);
        tracing::debug!(
            "Saving {} answer(s) to {}",
            request.answers.len(),
            url
        );

        let response = self.client.post(&url).json(request).send().await?;
        self.handle_response(response).await
    }

    /// Posts the finish form, ending the quiz.
    pub async fn finish_quiz(&self, url: &str) -> Result<()> {
        let url = self.config.resolve(url);
        tracing::info!("Finishing quiz at {}", url);

        let response = self.client.post(&url).send().await?;
        self.handle_response(response).await
    }

    /// Checks the status and captures the body of failed responses.
    async fn handle_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let body = parse_body(&text);
        tracing::debug!("Quiz server error ({}): {}", status, text);

        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ClientError::InvalidConfig(format!("invalid header value: {e}")))
}

/// Parse an error body as JSON, falling back to the raw text.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
