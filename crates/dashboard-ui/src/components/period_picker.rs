//! Period selector bar and the custom-range popup.

use chrono::{Days, Months, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use dashboard_core::period::{PeriodPreset, PeriodSelection};
use dashboard_runtime::period_state::{PeriodState, StagedBounds};

use crate::themes::Theme;

const POPUP_WIDTH: u16 = 44;
const POPUP_HEIGHT: u16 = 8;

/// Which side of the custom range the arrow keys move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerField {
    #[default]
    Start,
    End,
}

impl PickerField {
    pub fn toggle(self) -> Self {
        match self {
            PickerField::Start => PickerField::End,
            PickerField::End => PickerField::Start,
        }
    }
}

/// Move `date` by `days` (negative moves back), saturating at the calendar
/// limits.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    shifted.unwrap_or(date)
}

/// Move `date` by `months`, clamping the day to the target month's length.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let step = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(step)
    } else {
        date.checked_sub_months(step)
    };
    shifted.unwrap_or(date)
}

/// One-line selector listing the presets and the custom entry, with the
/// active one highlighted.
pub fn selector_line<'a>(selection: &PeriodSelection, theme: &'a Theme) -> Line<'a> {
    let mut spans = Vec::with_capacity(PeriodPreset::ALL.len() * 2 + 2);
    for (i, preset) in PeriodPreset::ALL.iter().enumerate() {
        let style = if selection.preset() == Some(*preset) {
            theme.picker_active
        } else {
            theme.text
        };
        spans.push(Span::styled(format!("[{}]", i + 1), theme.key_hint));
        spans.push(Span::styled(format!(" {} ", preset.label()), style));
        spans.push(Span::raw(" "));
    }
    let custom_style = if selection.is_custom() {
        theme.picker_active
    } else {
        theme.text
    };
    spans.push(Span::styled("[c]", theme.key_hint));
    spans.push(Span::styled(" Custom ", custom_style));
    Line::from(spans)
}

/// Active period label and its resolved day span.
pub fn range_line<'a>(state: &PeriodState, theme: &'a Theme) -> Line<'a> {
    let range = state.range();
    Line::from(vec![
        Span::styled("Period: ", theme.label),
        Span::styled(state.selection().label(), theme.value),
        Span::styled(
            format!(
                "  ({} to {}, {} days)",
                range.start_date().format("%Y-%m-%d"),
                range.end_date().format("%Y-%m-%d"),
                range.num_days()
            ),
            theme.dim,
        ),
    ])
}

/// Custom-range popup overlay.
pub struct CustomRangePopup<'a> {
    bounds: StagedBounds,
    focus: PickerField,
    theme: &'a Theme,
}

impl<'a> CustomRangePopup<'a> {
    pub fn new(bounds: StagedBounds, focus: PickerField, theme: &'a Theme) -> Self {
        Self {
            bounds,
            focus,
            theme,
        }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let field = |name: &'static str, date: NaiveDate, which: PickerField| {
            let style = if self.focus == which {
                self.theme.picker_focus
            } else {
                self.theme.value
            };
            Line::from(vec![
                Span::styled(name, self.theme.label),
                Span::styled(date.format("%Y-%m-%d").to_string(), style),
            ])
        };

        let mut lines = vec![
            field("  Start: ", self.bounds.start, PickerField::Start),
            field("  End:   ", self.bounds.end, PickerField::End),
        ];
        if self.bounds.end < self.bounds.start {
            lines.push(Line::from(Span::styled(
                "  End before start: applies start day only",
                self.theme.warning,
            )));
        } else {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "  Tab field  ←/→ day  Shift month",
            self.theme.dim,
        )));
        lines.push(Line::from(Span::styled(
            "  Enter apply  Esc cancel",
            self.theme.dim,
        )));
        lines
    }
}

impl Widget for CustomRangePopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(" Custom range ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(self.theme.header);

        Paragraph::new(Text::from(self.to_lines()))
            .block(block)
            .render(area, buf);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
