use serde::Deserialize;
use std::collections::BTreeMap;

use crate::config::ResponseSchema;
use crate::{AiPrediction, AnalysisResult, Indicator, LinguisticFeatures, NewsRelevance};

pub const VERDICT_HIGH: &str = "HIGH RISK";
pub const VERDICT_LOW: &str = "LOW RISK";

/// Decodes a 2xx body into the canonical result and checks its bounds.
pub fn parse_result(schema: ResponseSchema, body: &str) -> Result<AnalysisResult, String> {
    let result = match schema {
        ResponseSchema::Analyze => {
            let body: AnalyzeBody = serde_json::from_str(body).map_err(|err| err.to_string())?;
            body.into_result()
        }
        ResponseSchema::Predict => {
            let body: PredictBody = serde_json::from_str(body).map_err(|err| err.to_string())?;
            body.into_result()
        }
    };
    result.validate()?;
    Ok(result)
}

/// The `/analyze` body. Indicators and features are mandatory here.
#[derive(Debug, Deserialize)]
struct AnalyzeBody {
    verdict_level: String,
    #[serde(default)]
    verdict_message: Option<String>,
    risk_score: f64,
    credibility_score: f64,
    #[serde(default)]
    ai_prediction: Option<AiPrediction>,
    risk_indicators: BTreeMap<String, Indicator>,
    linguistic_features: LinguisticFeatures,
    #[serde(default)]
    news_relevance: Option<NewsRelevance>,
    #[serde(default)]
    url: Option<String>,
}

impl AnalyzeBody {
    fn into_result(self) -> AnalysisResult {
        AnalysisResult {
            verdict_level: self.verdict_level,
            verdict_message: self.verdict_message,
            risk_score: self.risk_score,
            credibility_score: self.credibility_score,
            ai_prediction: self.ai_prediction,
            risk_indicators: self.risk_indicators,
            linguistic_features: Some(self.linguistic_features),
            news_relevance: self.news_relevance,
            url: self.url,
        }
    }
}

/// The `/predict` body: a binary label with two probabilities.
#[derive(Debug, Deserialize)]
struct PredictBody {
    prediction: String,
    real_probability: f64,
    fake_probability: f64,
    #[serde(default)]
    confidence: Option<f64>,
}

impl PredictBody {
    fn into_result(self) -> AnalysisResult {
        let fake = names_fake(&self.prediction);
        let confidence = self
            .confidence
            .unwrap_or_else(|| self.real_probability.max(self.fake_probability));
        AnalysisResult {
            verdict_level: if fake { VERDICT_HIGH } else { VERDICT_LOW }.to_string(),
            verdict_message: None,
            risk_score: self.fake_probability,
            credibility_score: self.real_probability,
            ai_prediction: Some(AiPrediction {
                available: true,
                prediction: Some(self.prediction),
                confidence: Some(confidence),
            }),
            risk_indicators: BTreeMap::new(),
            linguistic_features: None,
            news_relevance: None,
            url: None,
        }
    }
}

/// True when a prediction label reports fake content ("Likely Fake", "Fake News").
pub fn names_fake(prediction: &str) -> bool {
    prediction.to_ascii_lowercase().contains("fake")
}
