use ratatui::style::{Color, Modifier, Style};

use dashboard_core::models::UsageCategory;

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all UI styles used by dashboard-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Cards ────────────────────────────────────────────────────────────────
    pub card_border: Style,
    pub card_title: Style,
    /// Period totalizer and the weighted total.
    pub totalizer: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_tokens: Style,
    pub chart_ocr: Style,
    pub chart_workflow: Style,
    pub chart_agent: Style,

    // ── Period picker ────────────────────────────────────────────────────────
    pub picker_active: Style,
    pub picker_focus: Style,
    pub key_hint: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            card_border: Style::default().fg(Color::DarkGray),
            card_title: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            totalizer: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),

            chart_tokens: Style::default().fg(Color::LightBlue),
            chart_ocr: Style::default().fg(Color::Blue),
            chart_workflow: Style::default().fg(Color::Green),
            chart_agent: Style::default().fg(Color::Magenta),

            picker_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            picker_focus: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            key_hint: Style::default().fg(Color::Cyan),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and saturated accents so that content
    /// remains legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            card_border: Style::default().fg(Color::Gray),
            card_title: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            totalizer: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            chart_tokens: Style::default().fg(Color::Blue),
            chart_ocr: Style::default().fg(Color::Blue),
            chart_workflow: Style::default().fg(Color::Green),
            chart_agent: Style::default().fg(Color::Magenta),

            picker_active: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            picker_focus: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            key_hint: Style::default().fg(Color::Blue),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers to maintain a retro aesthetic and maximise
    /// compatibility with minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            card_border: Style::default().fg(Color::DarkGray),
            card_title: Style::default().fg(Color::Gray),
            totalizer: Style::default().fg(Color::Cyan),

            chart_tokens: Style::default().fg(Color::Cyan),
            chart_ocr: Style::default().fg(Color::Blue),
            chart_workflow: Style::default().fg(Color::Green),
            chart_agent: Style::default().fg(Color::Magenta),

            picker_active: Style::default().fg(Color::Black).bg(Color::White),
            picker_focus: Style::default().fg(Color::Yellow),
            key_hint: Style::default().fg(Color::Cyan),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Chart colour of a fixed usage category.
    pub fn category_style(&self, category: UsageCategory) -> Style {
        match category {
            UsageCategory::OcrPages => self.chart_ocr,
            UsageCategory::AutomationExecutions => self.chart_workflow,
            UsageCategory::SecondaryAutomationExecutions => self.chart_agent,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
