//! Pure mapping from an [`AnalysisResult`] to what the result panel shows.
//!
//! Nothing here touches a terminal; the console only draws a [`ResultView`].

use protocol::schema::names_fake;
use protocol::{AnalysisResult, LinguisticFeatures, NewsRelevance, SCORE_MAX};

/// Severity tier used for iconography and colour only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::High => "HIGH",
            Tier::Medium => "MEDIUM",
            Tier::Low => "LOW",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tier::High => "▲",
            Tier::Medium => "●",
            Tier::Low => "✔",
        }
    }
}

/// Binary colouring of the AI prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Negative,
    Positive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub verdict: VerdictView,
    pub risk: ScoreBar,
    pub credibility: ScoreBar,
    pub ai_panel: Option<AiPanel>,
    pub indicators: Vec<IndicatorRow>,
    pub statistics: Vec<Statistic>,
    pub relevance: Option<RelevancePanel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictView {
    pub level: String,
    pub message: Option<String>,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBar {
    pub percent_text: String,
    /// Fill width in percent, always within 0..=100.
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiPanel {
    pub prediction: String,
    pub confidence_text: String,
    pub confidence_tier: Tier,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorRow {
    pub name: String,
    pub tier: Tier,
    pub score_text: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistic {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevancePanel {
    pub score_text: String,
    pub is_news_related: bool,
    pub keywords: Vec<String>,
}

pub fn render(result: &AnalysisResult) -> ResultView {
    ResultView {
        verdict: VerdictView {
            level: result.verdict_level.clone(),
            message: result.verdict_message.clone(),
            tier: verdict_tier(&result.verdict_level),
        },
        risk: score_bar(result.risk_score),
        credibility: score_bar(result.credibility_score),
        ai_panel: result.ai_prediction.as_ref().and_then(|ai| {
            if !ai.available {
                return None;
            }
            let prediction = ai.prediction.clone().unwrap_or_default();
            let tone = if names_fake(&prediction) {
                Tone::Negative
            } else {
                Tone::Positive
            };
            let confidence = ai.confidence.unwrap_or(0.0);
            Some(AiPanel {
                confidence_text: format!("{confidence:.1}%"),
                confidence_tier: confidence_tier(confidence),
                prediction,
                tone,
            })
        }),
        indicators: result
            .risk_indicators
            .iter()
            .map(|(name, indicator)| {
                let tier = indicator_tier(indicator.score);
                IndicatorRow {
                    name: name.clone(),
                    tier,
                    score_text: format!("{} - {}/100", tier.label(), indicator.score.round()),
                    message: indicator.message.clone(),
                }
            })
            .collect(),
        statistics: result
            .linguistic_features
            .as_ref()
            .map(statistics)
            .unwrap_or_default(),
        relevance: result.news_relevance.as_ref().map(relevance_panel),
    }
}

/// Tier of the overall verdict, matched on the verdict label.
pub fn verdict_tier(verdict_level: &str) -> Tier {
    let level = verdict_level.trim();
    if level.eq_ignore_ascii_case("HIGH RISK") {
        Tier::High
    } else if level.eq_ignore_ascii_case("MEDIUM RISK") {
        Tier::Medium
    } else {
        Tier::Low
    }
}

/// Tier of a single indicator, derived from its own score.
pub fn indicator_tier(score: f64) -> Tier {
    if score >= 60.0 {
        Tier::High
    } else if score >= 30.0 {
        Tier::Medium
    } else {
        Tier::Low
    }
}

/// Doubt attached to an AI prediction: a confident call is Low, a guess is High.
pub fn confidence_tier(confidence: f64) -> Tier {
    if confidence >= 90.0 {
        Tier::Low
    } else if confidence >= 70.0 {
        Tier::Medium
    } else {
        Tier::High
    }
}

pub fn score_bar(score: f64) -> ScoreBar {
    ScoreBar {
        percent_text: percent_text(score),
        width: score.clamp(0.0, SCORE_MAX),
    }
}

fn percent_text(value: f64) -> String {
    format!("{}%", value.round())
}

fn statistics(features: &LinguisticFeatures) -> Vec<Statistic> {
    vec![
        Statistic {
            label: "Word Count",
            value: group_thousands(features.word_count.round() as u64),
        },
        Statistic {
            label: "Sentences",
            value: format!("{}", features.sentence_count.round()),
        },
        Statistic {
            label: "Avg Words/Sentence",
            value: format!("{:.1}", features.avg_sentence_length),
        },
        Statistic {
            label: "Capital Letters",
            value: format!("{:.1}%", features.caps_ratio * 100.0),
        },
        Statistic {
            label: "Exclamations",
            value: format!("{}", features.exclamation_count.round()),
        },
        Statistic {
            label: "Questions",
            value: format!("{}", features.question_count.round()),
        },
    ]
}

fn relevance_panel(relevance: &NewsRelevance) -> RelevancePanel {
    RelevancePanel {
        score_text: format!("{:.1}%", relevance.relevance_score),
        is_news_related: relevance.is_news_related,
        keywords: relevance.matching_keywords.clone(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{AiPrediction, Indicator};
    use std::collections::BTreeMap;

    fn result_with(risk: f64, credibility: f64) -> AnalysisResult {
        AnalysisResult {
            verdict_level: "MEDIUM RISK".to_string(),
            verdict_message: Some("Some indicators".to_string()),
            risk_score: risk,
            credibility_score: credibility,
            ai_prediction: None,
            risk_indicators: BTreeMap::new(),
            linguistic_features: None,
            news_relevance: None,
            url: None,
        }
    }

    #[test]
    fn indicator_tier_boundaries() {
        assert_eq!(indicator_tier(29.0), Tier::Low);
        assert_eq!(indicator_tier(29.9), Tier::Low);
        assert_eq!(indicator_tier(30.0), Tier::Medium);
        assert_eq!(indicator_tier(59.0), Tier::Medium);
        assert_eq!(indicator_tier(60.0), Tier::High);
        assert_eq!(indicator_tier(100.0), Tier::High);
        assert_eq!(indicator_tier(0.0), Tier::Low);
    }

    #[test]
    fn verdict_tier_matches_labels() {
        assert_eq!(verdict_tier("HIGH RISK"), Tier::High);
        assert_eq!(verdict_tier(" medium risk "), Tier::Medium);
        assert_eq!(verdict_tier("LOW RISK"), Tier::Low);
        assert_eq!(verdict_tier("UNKNOWN"), Tier::Low);
    }

    #[test]
    fn score_text_rounds_but_width_does_not() {
        let bar = score_bar(82.0);
        assert_eq!(bar.percent_text, "82%");
        assert_eq!(bar.width, 82.0);
        let bar = score_bar(45.6);
        assert_eq!(bar.percent_text, "46%");
        assert_eq!(bar.width, 45.6);
        assert_eq!(score_bar(0.0).percent_text, "0%");
        assert_eq!(score_bar(100.0).width, 100.0);
    }

    #[test]
    fn bar_width_is_clamped() {
        assert_eq!(score_bar(140.0).width, 100.0);
        assert_eq!(score_bar(-3.0).width, 0.0);
    }

    #[test]
    fn ai_panel_hidden_when_unavailable() {
        let mut result = result_with(10.0, 90.0);
        result.ai_prediction = Some(AiPrediction {
            available: false,
            prediction: Some("N/A".to_string()),
            confidence: Some(0.0),
        });
        assert!(render(&result).ai_panel.is_none());
        result.ai_prediction = None;
        assert!(render(&result).ai_panel.is_none());
    }

    #[test]
    fn ai_panel_tone_follows_prediction() {
        let mut result = result_with(10.0, 90.0);
        result.ai_prediction = Some(AiPrediction {
            available: true,
            prediction: Some("Likely Real".to_string()),
            confidence: Some(88.4),
        });
        let panel = render(&result).ai_panel.expect("panel");
        assert_eq!(panel.tone, Tone::Positive);
        assert_eq!(panel.confidence_text, "88.4%");
        assert_eq!(panel.confidence_tier, Tier::Medium);
    }

    #[test]
    fn confidence_tier_boundaries() {
        assert_eq!(confidence_tier(69.9), Tier::High);
        assert_eq!(confidence_tier(70.0), Tier::Medium);
        assert_eq!(confidence_tier(89.9), Tier::Medium);
        assert_eq!(confidence_tier(90.0), Tier::Low);
        assert_eq!(confidence_tier(100.0), Tier::Low);
        assert_eq!(confidence_tier(0.0), Tier::High);
    }

    #[test]
    fn indicators_render_one_row_each() {
        let mut result = result_with(50.0, 50.0);
        result.risk_indicators = BTreeMap::from([
            (
                "clickbait".to_string(),
                Indicator {
                    score: 30.0,
                    message: "Clickbait patterns: 1 detected".to_string(),
                },
            ),
            (
                "sources".to_string(),
                Indicator {
                    score: 20.0,
                    message: "Source indicators: 2/3 found".to_string(),
                },
            ),
        ]);
        let view = render(&result);
        assert_eq!(view.indicators.len(), 2);
        assert_eq!(view.indicators[0].tier, Tier::Medium);
        assert_eq!(view.indicators[0].score_text, "MEDIUM - 30/100");
        assert_eq!(view.indicators[1].tier, Tier::Low);
        assert_eq!(view.verdict.tier, Tier::Medium);
    }

    #[test]
    fn statistics_formatting() {
        let mut result = result_with(50.0, 50.0);
        result.linguistic_features = Some(LinguisticFeatures {
            word_count: 12345.0,
            sentence_count: 7.0,
            avg_sentence_length: 17.63,
            caps_ratio: 0.0456,
            exclamation_count: 3.0,
            question_count: 0.0,
        });
        let view = render(&result);
        let values: Vec<(&str, &str)> = view
            .statistics
            .iter()
            .map(|stat| (stat.label, stat.value.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Word Count", "12,345"),
                ("Sentences", "7"),
                ("Avg Words/Sentence", "17.6"),
                ("Capital Letters", "4.6%"),
                ("Exclamations", "3"),
                ("Questions", "0"),
            ]
        );
    }

    #[test]
    fn relevance_panel_is_optional() {
        let mut result = result_with(50.0, 50.0);
        assert!(render(&result).relevance.is_none());
        result.news_relevance = Some(NewsRelevance {
            relevance_score: 12.345,
            matching_keywords: vec!["election".to_string()],
            is_news_related: true,
        });
        let panel = render(&result).relevance.expect("panel");
        assert_eq!(panel.score_text, "12.3%");
        assert_eq!(panel.keywords, vec!["election".to_string()]);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
