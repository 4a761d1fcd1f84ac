use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative marks placed either side of the application title.
pub const ORNAMENT: &str = "◆ ◇ ◆";

/// Dashboard header rendering four lines:
///
/// 1. Application title with ornaments (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Client, plan and timezone in `[ client | plan | timezone ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Account whose consumption is displayed.
    pub client: &'a str,
    /// Pricing plan name (e.g. "Enterprise").
    pub plan: &'a str,
    /// IANA timezone that decides calendar days.
    pub timezone: &'a str,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Construct a new header.
    pub fn new(client: &'a str, plan: &'a str, timezone: &'a str, theme: &'a Theme) -> Self {
        Self {
            client,
            plan,
            timezone,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    ///
    /// 1. `"◆ ◇ ◆ CONSUMPTION & BILLING DASHBOARD ◆ ◇ ◆"`
    /// 2. `"============================================================"`
    /// 3. `"[ Acme Analytics | Plan: Enterprise | UTC ]"`
    /// 4. `""`
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(ORNAMENT, self.theme.header_accent),
                Span::styled(" CONSUMPTION & BILLING DASHBOARD ", self.theme.header),
                Span::styled(ORNAMENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.client, self.theme.value),
                Span::styled(" | Plan: ", self.theme.label),
                Span::styled(self.plan, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.timezone, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
