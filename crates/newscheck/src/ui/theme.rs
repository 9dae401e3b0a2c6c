use analysis_client::{Tier, Tone};
use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Copy)]
pub(crate) enum ValueStyle {
    Normal,
    Important,
    Dim,
}

pub(crate) struct Theme {
    border: Color,
    focus_border: Color,
    title: Color,
    text: Color,
    dim: Color,
    accent: Color,
    warn: Color,
    ok: Color,
    error: Color,
}

impl Theme {
    pub(crate) fn dark() -> Self {
        Self {
            border: Color::DarkGray,
            focus_border: Color::Cyan,
            title: Color::Blue,
            text: Color::White,
            dim: Color::Gray,
            accent: Color::Cyan,
            warn: Color::Yellow,
            ok: Color::Green,
            error: Color::Red,
        }
    }

    pub(crate) fn block<'a>(&self, title: impl Into<String>) -> ratatui::widgets::Block<'a> {
        self.block_with_border(title, self.border)
    }

    pub(crate) fn focused_block<'a>(
        &self,
        title: impl Into<String>,
        focused: bool,
    ) -> ratatui::widgets::Block<'a> {
        let border = if focused { self.focus_border } else { self.border };
        self.block_with_border(title, border)
    }

    fn block_with_border<'a>(
        &self,
        title: impl Into<String>,
        border: Color,
    ) -> ratatui::widgets::Block<'a> {
        ratatui::widgets::Block::default()
            .title(ratatui::text::Span::styled(
                title.into(),
                Style::default().fg(self.title).add_modifier(Modifier::BOLD),
            ))
            .borders(ratatui::widgets::Borders::ALL)
            .border_style(Style::default().fg(border))
    }

    pub(crate) fn help_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub(crate) fn accent_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn warn_style(&self) -> Style {
        Style::default().fg(self.warn).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn key_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub(crate) fn value_style(&self, level: ValueStyle) -> Style {
        match level {
            ValueStyle::Normal => Style::default().fg(self.text),
            ValueStyle::Important => Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
            ValueStyle::Dim => Style::default().fg(self.dim),
        }
    }

    pub(crate) fn tier_style(&self, tier: Tier) -> Style {
        let color = match tier {
            Tier::High => self.error,
            Tier::Medium => self.warn,
            Tier::Low => self.ok,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn tone_style(&self, tone: Tone) -> Style {
        let color = match tone {
            Tone::Negative => self.error,
            Tone::Positive => self.ok,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn bar_style(&self, color: BarColor) -> Style {
        match color {
            BarColor::Risk => Style::default().fg(self.error),
            BarColor::Credibility => Style::default().fg(self.ok),
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) enum BarColor {
    Risk,
    Credibility,
}
