use std::time::Instant;

use async_trait::async_trait;
use protocol::config::{ClientConfig, FieldMapping};
use protocol::schema::parse_result;
use protocol::{AnalysisRequest, AnalysisResult, ErrorBody, HealthStatus};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{Map, Value};

use crate::error::AnalysisError;

const USER_AGENT: &str = concat!("newscheck/", env!("CARGO_PKG_VERSION"));

/// The remote analysis engine. One call per submission.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;

    async fn health(&self) -> Result<HealthStatus, AnalysisError>;
}

pub struct HttpAnalysisService {
    config: ClientConfig,
    analyze_url: String,
    health_url: String,
    client: Client,
}

impl HttpAnalysisService {
    pub fn new(config: ClientConfig) -> Result<Self, AnalysisError> {
        let analyze_url = join_base_path(&config.base_url, &config.endpoint_path)
            .map_err(AnalysisError::Validation)?;
        let health_url = join_base_path(&config.base_url, &config.health_path)
            .map_err(AnalysisError::Validation)?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| AnalysisError::network(&err))?;
        Ok(Self {
            config,
            analyze_url,
            health_url,
            client,
        })
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let body = request_body(&self.config.fields, request);
        let payload = Value::Object(body).to_string();
        tracing::debug!(
            event = "analysis.http.post",
            url = %self.analyze_url,
            body_len = payload.len(),
        );
        let started = Instant::now();
        let response = self
            .client
            .post(&self.analyze_url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(
                    event = "analysis.http.send_failed",
                    timeout = err.is_timeout(),
                    connect = err.is_connect(),
                    error = %err,
                );
                AnalysisError::network(&err)
            })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| AnalysisError::network(&err))?;
        tracing::debug!(
            event = "analysis.http.response",
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            body_len = text.len(),
        );

        if !status.is_success() {
            return Err(service_error(status.as_u16(), &text));
        }
        parse_result(self.config.schema, &text).map_err(AnalysisError::MalformedResponse)
    }

    async fn health(&self) -> Result<HealthStatus, AnalysisError> {
        let response = self
            .client
            .get(&self.health_url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AnalysisError::network(&err))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| AnalysisError::network(&err))?;
        if !status.is_success() {
            return Err(service_error(status.as_u16(), &text));
        }
        serde_json::from_str(&text).map_err(|err| AnalysisError::MalformedResponse(err.to_string()))
    }
}

/// Builds the POST body through the configured field names.
pub fn request_body(fields: &FieldMapping, request: &AnalysisRequest) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert(fields.text.clone(), Value::String(request.text.clone()));
    if let (Some(field), Some(url)) = (fields.url_field(), request.url.as_ref()) {
        body.insert(field.to_string(), Value::String(url.clone()));
    }
    body
}

/// Maps a non-2xx body to a service error, keeping the server's message verbatim.
pub fn service_error(status: u16, body: &str) -> AnalysisError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message().map(str::to_string))
        .unwrap_or_else(|| format!("Analysis failed (HTTP {status})"));
    AnalysisError::Service { status, message }
}

pub fn join_base_path(base: &str, path: &str) -> Result<String, String> {
    let base = base.trim();
    if base.is_empty() {
        return Err("base_url is empty".to_string());
    }
    let normalized_base = base.trim_end_matches('/');
    let normalized_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    Ok(format!("{normalized_base}{normalized_path}"))
}
