//! Bordered cards for a category total and for the weighted total.

use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use dashboard_core::formatting::{format_count, format_multiplier, format_score};
use dashboard_data::aggregator::CategorySummary;

use crate::themes::Theme;

/// A titled card: the period total, the unit value on the plan and the
/// period totalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub unit_cost: Option<String>,
    pub totalizer: Option<String>,
}

impl MetricCard {
    /// Card for one category summary.
    pub fn from_summary(title: impl Into<String>, summary: &CategorySummary) -> Self {
        Self {
            title: title.into(),
            value: format_count(summary.total),
            unit_cost: Some(format!(
                "Unit value on current plan: {}",
                format_multiplier(summary.unit_cost)
            )),
            totalizer: Some(format_score(summary.totalizer)),
        }
    }

    pub fn to_lines<'a>(&self, theme: &'a Theme) -> Vec<Line<'a>> {
        let mut lines = vec![Line::from(Span::styled(self.value.clone(), theme.bold))];
        if let Some(cost) = &self.unit_cost {
            lines.push(Line::from(Span::styled(cost.clone(), theme.label)));
        }
        if let Some(totalizer) = &self.totalizer {
            lines.push(Line::from(vec![
                Span::styled("Period totalizer: ", theme.label),
                Span::styled(totalizer.clone(), theme.totalizer),
            ]));
        }
        lines
    }

    /// Draw the card in a bordered block, followed by `body` (usually a
    /// chart).
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, body: Vec<Line<'_>>) {
        let mut lines = self.to_lines(theme);
        lines.push(Line::from(""));
        lines.extend(body);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.card_border)
            .title(Span::styled(
                format!(" {} ", self.title.to_uppercase()),
                theme.card_title,
            ));
        frame.render_widget(
            Paragraph::new(Text::from(lines)).block(block),
            area,
        );
    }
}

/// Lines of the weighted-total card. The figure is a score, never money.
pub fn total_card_lines(weighted_total: f64, theme: &Theme) -> Vec<Line<'_>> {
    vec![
        Line::from(vec![
            Span::styled("WEIGHTED TOTAL  ", theme.card_title),
            Span::styled(format_score(weighted_total), theme.totalizer),
        ]),
        Line::from(Span::styled(
            "Weighted sum of consumption in the selected period. Not a financial amount.",
            theme.dim,
        )),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
