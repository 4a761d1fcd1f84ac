//! Full-screen consumption dashboard.
//!
//! Layout, top to bottom: header, period selector, weighted total, a 2x2
//! grid of category cards (AI tokens, OCR pages, workflow and AI agent
//! executions), then the status and key-hint lines. Everything is drawn
//! from the session's current [`Snapshot`]; nothing is computed here
//! beyond formatting.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use dashboard_core::models::UsageCategory;
use dashboard_runtime::session::{DashboardSession, Snapshot};

use crate::components::chart::chart_lines;
use crate::components::header::Header;
use crate::components::metric_card::{total_card_lines, MetricCard};
use crate::components::model_selector::ModelSelector;
use crate::components::period_picker::{range_line, selector_line, CustomRangePopup, PickerField};
use crate::themes::Theme;

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// One-shot message shown above the key hints (export result, refresh
/// failure, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

// ── View data ─────────────────────────────────────────────────────────────────

/// All data required to render the dashboard.
pub struct DashboardView<'a> {
    pub session: &'a DashboardSession,
    /// IANA name of the display timezone.
    pub timezone: &'a str,
    pub models: &'a ModelSelector,
    pub status: Option<&'a StatusMessage>,
    /// Focused field when the custom-range popup is open.
    pub picker: Option<PickerField>,
}

/// Rows above the card grid: header (4), selector, range, blank.
const TOP_HEIGHT: u16 = 7;
const TOTAL_HEIGHT: u16 = 4;
const FOOTER_HEIGHT: u16 = 2;

pub fn render_dashboard(frame: &mut Frame, area: Rect, view: &DashboardView, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TOP_HEIGHT),
            Constraint::Length(TOTAL_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(Text::from(top_lines(view, theme))), rows[0]);

    let snapshot = view.session.snapshot();
    let total_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.card_border);
    frame.render_widget(
        Paragraph::new(Text::from(total_card_lines(
            snapshot.aggregation.weighted_total,
            theme,
        )))
        .block(total_block),
        rows[1],
    );

    render_cards(frame, rows[2], snapshot, view.models, theme);

    frame.render_widget(
        Paragraph::new(Text::from(footer_lines(view, theme))),
        rows[3],
    );

    if let Some(focus) = view.picker {
        let bounds = view.session.period().staged_bounds();
        frame.render_widget(
            CustomRangePopup::new(bounds, focus, theme),
            CustomRangePopup::centered_area(area),
        );
    }
}

/// Header, period selector and the resolved range.
pub fn top_lines<'a>(view: &DashboardView<'a>, theme: &'a Theme) -> Vec<Line<'a>> {
    let workspace = view.session.workspace();
    let mut lines = Header::new(
        &workspace.client.name,
        &workspace.plan.name,
        view.timezone,
        theme,
    )
    .to_lines();
    let period = view.session.period();
    lines.push(selector_line(&period.selection(), theme));
    lines.push(range_line(period, theme));
    lines.push(Line::from(""));
    lines
}

fn render_cards(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    models: &ModelSelector,
    theme: &Theme,
) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(halves[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(halves[1]);

    render_token_card(frame, top[0], snapshot, models, theme);
    render_category_card(frame, top[1], snapshot, UsageCategory::OcrPages, theme);
    render_category_card(
        frame,
        bottom[0],
        snapshot,
        UsageCategory::AutomationExecutions,
        theme,
    );
    render_category_card(
        frame,
        bottom[1],
        snapshot,
        UsageCategory::SecondaryAutomationExecutions,
        theme,
    );
}

/// Inner width of a bordered card.
fn chart_width(area: Rect) -> usize {
    area.width.saturating_sub(2) as usize
}

fn render_token_card(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    models: &ModelSelector,
    theme: &Theme,
) {
    let names = snapshot.aggregation.model_names();
    let nav = models.to_line(&names, theme);

    match models
        .selected()
        .and_then(|name| snapshot.aggregation.model(name))
    {
        Some(model) => {
            let card = MetricCard::from_summary("AI Tokens", &model.summary);
            let mut body = vec![nav, Line::from("")];
            body.extend(chart_lines(
                &model.series,
                chart_width(area),
                theme.chart_tokens,
                theme,
            ));
            card.render(frame, area, theme, body);
        }
        None => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme.card_border)
                .title(Span::styled(" AI TOKENS ", theme.card_title));
            frame.render_widget(Paragraph::new(Text::from(vec![nav])).block(block), area);
        }
    }
}

fn render_category_card(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    category: UsageCategory,
    theme: &Theme,
) {
    let aggregate = snapshot.aggregation.category(category);
    let card = MetricCard::from_summary(category.label(), &aggregate.summary);
    let body = chart_lines(
        &aggregate.series,
        chart_width(area),
        theme.category_style(category),
        theme,
    );
    card.render(frame, area, theme, body);
}

/// Status line (source, record count, last message) and key hints.
pub fn footer_lines<'a>(view: &DashboardView<'a>, theme: &'a Theme) -> Vec<Line<'a>> {
    let session = view.session;
    let snapshot = session.snapshot();

    let mut status = vec![
        Span::styled(session.source().describe(), theme.dim),
        Span::styled(
            format!(
                "  · {} records  · loaded {}",
                snapshot.record_count(),
                session.loaded_at().format("%H:%M:%S")
            ),
            theme.dim,
        ),
    ];
    if let Some(message) = view.status {
        let style = match message.kind {
            StatusKind::Info => theme.info,
            StatusKind::Success => theme.success,
            StatusKind::Error => theme.error,
        };
        status.push(Span::styled(format!("  {}", message.text), style));
    } else if let Some(err) = session.last_error() {
        status.push(Span::styled(format!("  Refresh failed: {}", err), theme.error));
    }

    let export_style = if session.can_export() {
        theme.text
    } else {
        theme.dim
    };
    let hints = Line::from(vec![
        Span::styled("[1-4]", theme.key_hint),
        Span::styled(" period  ", theme.text),
        Span::styled("[c]", theme.key_hint),
        Span::styled(" custom  ", theme.text),
        Span::styled("[ [ ] ]", theme.key_hint),
        Span::styled(" model  ", theme.text),
        Span::styled("[e]", theme.key_hint),
        Span::styled(" export CSV  ", export_style),
        Span::styled("[r]", theme.key_hint),
        Span::styled(" refresh  ", theme.text),
        Span::styled("[q]", theme.key_hint),
        Span::styled(" quit", theme.text),
    ]);

    vec![Line::from(status), hints]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
