use analysis_client::render::{AiPanel, IndicatorRow, RelevancePanel, ScoreBar, Statistic};
use analysis_client::ResultView;
use ratatui::text::{Line, Span, Text};

use super::text::{bar_cells, display_width, sanitize_text_for_tui, wrap_text_lines};
use super::theme::{BarColor, Theme, ValueStyle};

const LABEL_WIDTH: usize = 14;
const BAR_MAX_CELLS: usize = 40;

pub(crate) fn format_result_view(theme: &Theme, view: &ResultView, width: u16) -> Text<'static> {
    let width = width.max(1) as usize;
    let mut lines = Vec::new();

    let verdict = &view.verdict;
    lines.push(Line::from(vec![
        Span::styled(
            format!("{} {}", verdict.tier.icon(), sanitize_text_for_tui(&verdict.level)),
            theme.tier_style(verdict.tier),
        ),
    ]));
    if let Some(message) = &verdict.message {
        for segment in wrap_text_lines(&sanitize_text_for_tui(message), width) {
            lines.push(Line::styled(segment, theme.value_style(ValueStyle::Normal)));
        }
    }
    lines.push(Line::default());

    let bar_cells_count = width.saturating_sub(LABEL_WIDTH + 6).clamp(1, BAR_MAX_CELLS);
    lines.push(score_line(theme, "Risk", &view.risk, BarColor::Risk, bar_cells_count));
    lines.push(score_line(
        theme,
        "Credibility",
        &view.credibility,
        BarColor::Credibility,
        bar_cells_count,
    ));

    if let Some(ai) = &view.ai_panel {
        lines.push(Line::default());
        lines.push(section_title(theme, "AI Prediction"));
        lines.push(ai_line(theme, ai));
    }

    if !view.indicators.is_empty() {
        lines.push(Line::default());
        lines.push(section_title(theme, "Risk Indicators"));
        for row in &view.indicators {
            lines.extend(indicator_lines(theme, row, width));
        }
    }

    if !view.statistics.is_empty() {
        lines.push(Line::default());
        lines.push(section_title(theme, "Text Statistics"));
        for stat in &view.statistics {
            lines.push(stat_line(theme, stat));
        }
    }

    if let Some(relevance) = &view.relevance {
        lines.push(Line::default());
        lines.push(section_title(theme, "News Relevance"));
        lines.extend(relevance_lines(theme, relevance, width));
    }

    Text::from(lines)
}

/// Same content as [`format_result_view`] without styling, for headless output.
pub(crate) fn plain_lines(view: &ResultView) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Verdict: {} [{}]", view.verdict.level, view.verdict.tier.label()));
    if let Some(message) = &view.verdict.message {
        lines.push(format!("  {message}"));
    }
    lines.push(format!("Risk score: {}", view.risk.percent_text));
    lines.push(format!("Credibility score: {}", view.credibility.percent_text));
    if let Some(ai) = &view.ai_panel {
        lines.push(format!(
            "AI prediction: {} ({} {} confidence)",
            ai.prediction,
            ai.confidence_tier.icon(),
            ai.confidence_text
        ));
    }
    if !view.indicators.is_empty() {
        lines.push("Risk indicators:".to_string());
        for row in &view.indicators {
            lines.push(format!("  {}: {}", row.name, row.score_text));
            if !row.message.is_empty() {
                lines.push(format!("    {}", row.message));
            }
        }
    }
    if !view.statistics.is_empty() {
        lines.push("Text statistics:".to_string());
        for stat in &view.statistics {
            lines.push(format!("  {}: {}", stat.label, stat.value));
        }
    }
    if let Some(relevance) = &view.relevance {
        lines.push(format!(
            "News relevance: {} ({})",
            relevance.score_text,
            if relevance.is_news_related {
                "related to current news"
            } else {
                "low relevance to current events"
            }
        ));
        if !relevance.keywords.is_empty() {
            lines.push(format!("  keywords: {}", relevance.keywords.join(", ")));
        }
    }
    lines
}

fn section_title(theme: &Theme, title: &str) -> Line<'static> {
    Line::styled(title.to_string(), theme.accent_style())
}

fn score_line(
    theme: &Theme,
    label: &str,
    bar: &ScoreBar,
    color: BarColor,
    cells: usize,
) -> Line<'static> {
    let (filled, empty) = bar_cells(bar.width, cells);
    Line::from(vec![
        Span::styled(pad_label(label), theme.key_style()),
        Span::styled(filled, theme.bar_style(color)),
        Span::styled(empty, theme.value_style(ValueStyle::Dim)),
        Span::styled(format!(" {:>4}", bar.percent_text), theme.value_style(ValueStyle::Important)),
    ])
}

fn ai_line(theme: &Theme, ai: &AiPanel) -> Line<'static> {
    Line::from(vec![
        Span::styled(pad_label("Prediction"), theme.key_style()),
        Span::styled(sanitize_text_for_tui(&ai.prediction), theme.tone_style(ai.tone)),
        Span::styled("  confidence ", theme.key_style()),
        Span::styled(
            format!("{} ", ai.confidence_tier.icon()),
            theme.tier_style(ai.confidence_tier),
        ),
        Span::styled(
            ai.confidence_text.clone(),
            theme.value_style(ValueStyle::Important),
        ),
    ])
}

fn indicator_lines(theme: &Theme, row: &IndicatorRow, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", row.tier.icon()), theme.tier_style(row.tier)),
        Span::styled(sanitize_text_for_tui(&row.name), theme.value_style(ValueStyle::Important)),
        Span::styled("  ", theme.key_style()),
        Span::styled(row.score_text.clone(), theme.tier_style(row.tier)),
    ])];
    if !row.message.is_empty() {
        let indent = "  ";
        let message = sanitize_text_for_tui(&row.message);
        for segment in wrap_text_lines(&message, width.saturating_sub(indent.len()).max(1)) {
            lines.push(Line::from(vec![
                Span::raw(indent),
                Span::styled(segment, theme.value_style(ValueStyle::Dim)),
            ]));
        }
    }
    lines
}

fn stat_line(theme: &Theme, stat: &Statistic) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<20}", stat.label), theme.key_style()),
        Span::styled(stat.value.clone(), theme.value_style(ValueStyle::Normal)),
    ])
}

fn relevance_lines(theme: &Theme, relevance: &RelevancePanel, width: usize) -> Vec<Line<'static>> {
    let related = if relevance.is_news_related {
        "related to current news"
    } else {
        "low relevance to current events"
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(pad_label("Relevance"), theme.key_style()),
        Span::styled(relevance.score_text.clone(), theme.value_style(ValueStyle::Important)),
        Span::styled(format!("  {related}"), theme.value_style(ValueStyle::Dim)),
    ])];
    if !relevance.keywords.is_empty() {
        let keywords = relevance.keywords.join(", ");
        let indent = " ".repeat(LABEL_WIDTH);
        let value_width = width.saturating_sub(LABEL_WIDTH).max(1);
        for (idx, segment) in wrap_text_lines(&keywords, value_width).into_iter().enumerate() {
            let key = if idx == 0 {
                pad_label("Keywords")
            } else {
                indent.clone()
            };
            lines.push(Line::from(vec![
                Span::styled(key, theme.key_style()),
                Span::styled(segment, theme.value_style(ValueStyle::Normal)),
            ]));
        }
    }
    lines
}

fn pad_label(label: &str) -> String {
    let mut out = label.to_string();
    let current = display_width(label);
    if current < LABEL_WIDTH {
        out.extend(std::iter::repeat(' ').take(LABEL_WIDTH - current));
    }
    out
}
