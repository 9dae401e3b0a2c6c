use serde::{Deserialize, Deserializer};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_ENDPOINT_PATH: &str = "/analyze";
pub const DEFAULT_HEALTH_PATH: &str = "/health";
pub const DEFAULT_MIN_TEXT_CHARS: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Which response body the endpoint returns.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSchema {
    /// `verdict_level` / `risk_score` / `credibility_score` / ...
    #[default]
    Analyze,
    /// `prediction` / `real_probability` / `fake_probability` / `confidence`
    Predict,
}

/// Request body field names. A missing or empty `url` field name means the url is never sent.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FieldMapping {
    #[serde(default = "default_text_field")]
    pub text: String,
    #[serde(default = "default_url_field")]
    pub url: Option<String>,
}

impl FieldMapping {
    pub fn url_field(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            text: default_text_field(),
            url: default_url_field(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,
    #[serde(default = "default_health_path")]
    pub health_path: String,
    #[serde(default)]
    pub schema: ResponseSchema,
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,
    #[serde(
        default = "default_request_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub request_timeout: Duration,
    #[serde(
        default = "default_connect_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub connect_timeout: Duration,
    #[serde(default)]
    pub fields: FieldMapping,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint_path: default_endpoint_path(),
            health_path: default_health_path(),
            schema: ResponseSchema::default(),
            min_text_chars: default_min_text_chars(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            fields: FieldMapping::default(),
        }
    }
}

impl ClientConfig {
    /// Preset for the lightweight `/predict` deployments, which only accept `text`.
    pub fn predict_preset() -> Self {
        Self {
            endpoint_path: "/predict".to_string(),
            schema: ResponseSchema::Predict,
            fields: FieldMapping {
                text: default_text_field(),
                url: None,
            },
            ..Self::default()
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_endpoint_path() -> String {
    DEFAULT_ENDPOINT_PATH.to_string()
}

fn default_health_path() -> String {
    DEFAULT_HEALTH_PATH.to_string()
}

fn default_min_text_chars() -> usize {
    DEFAULT_MIN_TEXT_CHARS
}

fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}

fn default_text_field() -> String {
    "text".to_string()
}

fn default_url_field() -> Option<String> {
    Some("url".to_string())
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(raw.trim()).map_err(serde::de::Error::custom)
}
