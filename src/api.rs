use crate::{
    config::Config,
    constants::{CHAT_PATH, HEALTH_PATH},
    errors::{TutorError, TutorResult},
    logging::log_api_call,
    models::{ApiCallLog, ChatRequest, ChatResponse},
};
use chrono::Utc;
use log::{debug, error};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Instant;

/// HTTP client for the tutor backend. One attempt per call: no timeout,
/// retry or cancellation.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    model: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            ..Self::new(config.base_url.clone())
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probes `GET /health`. Any failure is logged and swallowed.
    pub async fn check_health(&self) -> Option<Value> {
        match self.fetch_health().await {
            Ok(body) => Some(body),
            Err(e) => {
                error!("Health check failed: {}", e);
                None
            }
        }
    }

    /// Sends a question to `POST /chat`. Failures are logged and returned so
    /// the screen can tell the user.
    pub async fn chat_with_ai(&self, question: &str) -> TutorResult<ChatResponse> {
        self.post_chat(question).await.map_err(|e| {
            error!("Chat error: {}", e);
            e
        })
    }

    async fn fetch_health(&self) -> TutorResult<Value> {
        let url = self.endpoint(HEALTH_PATH);
        let started = Instant::now();
        let result = self.client.get(&url).send().await;
        let response = record_call("GET", &url, started, result)?;

        let body = checked(response)
            .await?
            .json::<Value>()
            .await
            .map_err(|e| TutorError::api_error(format!("Failed to parse health response: {}", e)))?;
        Ok(body)
    }

    async fn post_chat(&self, question: &str) -> TutorResult<ChatResponse> {
        let url = self.endpoint(CHAT_PATH);
        let payload = ChatRequest {
            question,
            model: self.model.as_deref(),
        };
        debug!("Posting question ({} chars) to {}", question.len(), url);

        let started = Instant::now();
        let result = self.client.post(&url).json(&payload).send().await;
        let response = record_call("POST", &url, started, result)?;

        let body = checked(response)
            .await?
            .json::<ChatResponse>()
            .await
            .map_err(|e| TutorError::api_error(format!("Failed to parse chat response: {}", e)))?;
        Ok(body)
    }
}

fn record_call(
    method: &str,
    url: &str,
    started: Instant,
    result: reqwest::Result<Response>,
) -> TutorResult<Response> {
    log_api_call(&ApiCallLog {
        timestamp: Utc::now(),
        method: method.to_string(),
        endpoint: url.to_string(),
        response_status: result.as_ref().ok().map(|r| r.status().as_u16()),
        response_time_ms: started.elapsed().as_millis(),
    });
    Ok(result?)
}

async fn checked(response: Response) -> TutorResult<Response> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(TutorError::api_error(format!(
            "API returned error: {} - {}",
            status, error_text
        )));
    }
    Ok(response)
}
