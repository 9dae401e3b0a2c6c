use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod config;
pub mod schema;

/// Upper bound shared by every score and percentage on the wire.
pub const SCORE_MAX: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl AnalysisRequest {
    /// Builds a request from raw form input. A blank url is dropped.
    pub fn from_input(raw_text: &str, raw_url: &str) -> Self {
        let url = raw_url.trim();
        Self {
            text: raw_text.trim().to_string(),
            url: if url.is_empty() {
                None
            } else {
                Some(url.to_string())
            },
        }
    }

    pub fn text_chars(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub verdict_level: String,
    #[serde(default)]
    pub verdict_message: Option<String>,
    pub risk_score: f64,
    pub credibility_score: f64,
    #[serde(default)]
    pub ai_prediction: Option<AiPrediction>,
    #[serde(default)]
    pub risk_indicators: BTreeMap<String, Indicator>,
    #[serde(default)]
    pub linguistic_features: Option<LinguisticFeatures>,
    #[serde(default)]
    pub news_relevance: Option<NewsRelevance>,
    #[serde(default)]
    pub url: Option<String>,
}

impl AnalysisResult {
    /// Checks the payload against the declared bounds of the contract.
    pub fn validate(&self) -> Result<(), String> {
        if self.verdict_level.trim().is_empty() {
            return Err("verdict_level is empty".to_string());
        }
        check_score("risk_score", self.risk_score)?;
        check_score("credibility_score", self.credibility_score)?;
        if let Some(ai) = &self.ai_prediction {
            if let Some(confidence) = ai.confidence {
                check_score("ai_prediction.confidence", confidence)?;
            }
            if ai.available && ai.prediction.as_deref().map_or(true, str::is_empty) {
                return Err("ai_prediction is available but has no prediction".to_string());
            }
        }
        for (name, indicator) in &self.risk_indicators {
            check_score(&format!("risk_indicators.{name}.score"), indicator.score)?;
        }
        if let Some(features) = &self.linguistic_features {
            features.validate()?;
        }
        if let Some(relevance) = &self.news_relevance {
            check_score("news_relevance.relevance_score", relevance.relevance_score)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiPrediction {
    pub available: bool,
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Indicator {
    pub score: f64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinguisticFeatures {
    pub word_count: f64,
    pub sentence_count: f64,
    pub avg_sentence_length: f64,
    pub caps_ratio: f64,
    pub exclamation_count: f64,
    pub question_count: f64,
}

impl LinguisticFeatures {
    fn validate(&self) -> Result<(), String> {
        let fields = [
            ("word_count", self.word_count),
            ("sentence_count", self.sentence_count),
            ("avg_sentence_length", self.avg_sentence_length),
            ("caps_ratio", self.caps_ratio),
            ("exclamation_count", self.exclamation_count),
            ("question_count", self.question_count),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("linguistic_features.{name} must be non-negative, got {value}"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsRelevance {
    pub relevance_score: f64,
    #[serde(default)]
    pub matching_keywords: Vec<String>,
    #[serde(default)]
    pub is_news_related: bool,
}

/// Body of a non-2xx response. FastAPI deployments report `detail` instead of `error`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.detail.as_deref())
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub ai_model_available: bool,
}

fn check_score(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || !(0.0..=SCORE_MAX).contains(&value) {
        return Err(format!("{field} must be within 0-100, got {value}"));
    }
    Ok(())
}
