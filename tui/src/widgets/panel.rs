//! Analyzer Panel
//!
//! The glass panel in front of the sky: title, input box, analyze button
//! and the result (or error) card.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap};

use aura_conductor::{AnalysisError, AnalysisResult, RequestState};

use crate::theme::{
    sentiment_color, sentiment_emoji, sentiment_message, tier_badge, BUTTON_ACTIVE,
    BUTTON_DISABLED, DIM_TEXT, ERROR_RED, PANEL_BG, PANEL_BORDER, TEXT, TITLE_CYAN, TITLE_PINK,
    TITLE_PURPLE,
};

/// Height the panel wants, borders included
pub const PANEL_HEIGHT: u16 = 22;

/// Widest the panel gets
pub const PANEL_MAX_WIDTH: u16 = 76;

/// Rows of the input box, borders included
const INPUT_HEIGHT: u16 = 5;

/// Rows of the result card, borders included
const CARD_HEIGHT: u16 = 7;

/// Placeholder when the input is empty
pub const PLACEHOLDER: &str = "Type something magical here... ✨";

/// Centered rect for the panel inside `area`
#[must_use]
pub fn panel_area(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(PANEL_MAX_WIDTH);
    // Leave the bottom row to the status line
    let height = area.height.saturating_sub(1).min(PANEL_HEIGHT);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height.saturating_sub(1) - height) / 2;
    Rect::new(x, y, width, height)
}

/// Everything the panel shows, borrowed from the session
pub struct AnalyzerPanel<'a> {
    input: &'a str,
    state: &'a RequestState,
    can_submit: bool,
    thinking: &'a str,
}

impl<'a> AnalyzerPanel<'a> {
    pub fn new(input: &'a str, state: &'a RequestState, can_submit: bool, thinking: &'a str) -> Self {
        Self {
            input,
            state,
            can_submit,
            thinking,
        }
    }

    fn title() -> Line<'static> {
        Line::from(vec![
            Span::styled("✨ AI ", Style::default().fg(TITLE_CYAN).add_modifier(Modifier::BOLD)),
            Span::styled("SENTI", Style::default().fg(TITLE_PURPLE).add_modifier(Modifier::BOLD)),
            Span::styled("MENT ✨", Style::default().fg(TITLE_PINK).add_modifier(Modifier::BOLD)),
        ])
        .alignment(Alignment::Center)
    }

    fn subtitle() -> Line<'static> {
        Line::styled(
            "🧠 Neural Network Emotion Detection ⚡",
            Style::default().fg(DIM_TEXT),
        )
        .alignment(Alignment::Center)
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if self.state.is_in_flight() {
                DIM_TEXT
            } else {
                TITLE_CYAN
            }))
            .style(Style::default().bg(PANEL_BG));

        let text = if self.input.is_empty() {
            Line::styled(PLACEHOLDER, Style::default().fg(DIM_TEXT))
        } else {
            Line::from(vec![
                Span::styled(self.input, Style::default().fg(TEXT)),
                Span::styled("▏", Style::default().fg(TITLE_CYAN)),
            ])
        };

        // Keep the end of long input in view
        let inner_width = area.width.saturating_sub(2).max(1) as usize;
        let inner_height = area.height.saturating_sub(2) as usize;
        let wrapped_rows = textwrap::wrap(self.input, inner_width).len();
        let scroll = wrapped_rows.saturating_sub(inner_height);

        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .render(area, buf);
    }

    fn render_button(&self, area: Rect, buf: &mut Buffer) {
        let (label, bg) = if self.state.is_in_flight() {
            (format!(" {} AI is thinking... 🧠 ", self.thinking), BUTTON_DISABLED)
        } else if self.can_submit {
            (" ⚡ ANALYZE WITH AI ✨ ".to_string(), BUTTON_ACTIVE)
        } else {
            (" ⚡ ANALYZE WITH AI ✨ ".to_string(), BUTTON_DISABLED)
        };
        let fg = if self.can_submit { TEXT } else { DIM_TEXT };

        Paragraph::new(Line::styled(
            label,
            Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(area, buf);
    }

    fn render_result(result: &AnalysisResult, area: Rect, buf: &mut Buffer) {
        let accent = sentiment_color(result.sentiment);
        let tier = result.tier();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        let label = capitalize(result.sentiment.label());
        let percent = format!("{:.1}%", result.percent());
        let bar_width = inner.width.saturating_sub(2) as usize;
        let bold = Style::default().fg(accent).add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(vec![
                Span::raw(format!("{} ", sentiment_emoji(result.sentiment))),
                Span::styled(label, bold),
                Span::styled("   Neural Confidence ", Style::default().fg(DIM_TEXT)),
                Span::styled(percent, bold),
            ]),
            Line::from(vec![
                Span::styled("Confidence Level: ", Style::default().fg(DIM_TEXT)),
                Span::styled(format!("{} {}", tier.description(), tier_badge(tier)), bold),
            ]),
            confidence_bar(result.confidence, bar_width, accent),
            Line::styled(sentiment_message(result.sentiment), Style::default().fg(TEXT)),
        ];

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner.inner(Margin::new(1, 0)), buf);
    }

    fn render_error(error: &AnalysisError, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ERROR_RED))
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::styled(
                format!("⚠ {}", error.headline()),
                Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
            ),
            Line::styled(error.to_string(), Style::default().fg(TEXT)),
            Line::styled("Press Enter to try again", Style::default().fg(DIM_TEXT)),
        ];

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner.inner(Margin::new(1, 0)), buf);
    }
}

impl Widget for AnalyzerPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let frame = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(PANEL_BORDER))
            .style(Style::default().bg(PANEL_BG));
        let inner = frame.inner(area).inner(Margin::new(1, 0));
        frame.render(area, buf);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Min(0),
        ])
        .split(inner);

        Self::title().render(rows[0], buf);
        Self::subtitle().render(rows[1], buf);
        Line::styled(
            "✨ Enter your text for AI analysis:",
            Style::default().fg(TEXT),
        )
        .render(rows[3], buf);
        self.render_input(rows[4], buf);
        self.render_button(rows[6], buf);

        match self.state {
            RequestState::Succeeded(result) => Self::render_result(result, rows[8], buf),
            RequestState::Failed(error) => Self::render_error(error, rows[8], buf),
            RequestState::Idle | RequestState::InFlight { .. } => {}
        }
    }
}

/// Filled/empty bar for a confidence in `[0, 1]`
fn confidence_bar(confidence: f64, width: usize, color: Color) -> Line<'static> {
    let filled = ((confidence.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    Line::from(vec![
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(width - filled), Style::default().fg(DIM_TEXT)),
    ])
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_area_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 120, 40);
        let panel = panel_area(area);
        assert_eq!(panel.width, PANEL_MAX_WIDTH);
        assert_eq!(panel.height, PANEL_HEIGHT);
        assert_eq!(panel.x, (120 - PANEL_MAX_WIDTH) / 2);

        let tiny = panel_area(Rect::new(0, 0, 3, 1));
        assert_eq!(tiny.width, 0);
        assert_eq!(tiny.height, 0);
    }

    #[test]
    fn test_confidence_bar_fill() {
        let line = confidence_bar(0.5, 10, TEXT);
        assert_eq!(line.spans[0].content, "█████");
        assert_eq!(line.spans[1].content, "░░░░░");

        let full = confidence_bar(1.0, 4, TEXT);
        assert_eq!(full.spans[0].content, "████");
        assert_eq!(full.spans[1].content, "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("positive"), "Positive");
        assert_eq!(capitalize(""), "");
    }
}
