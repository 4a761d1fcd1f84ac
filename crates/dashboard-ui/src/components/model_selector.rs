//! Model navigation for the token section.

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Widest model name shown before truncation.
pub const MAX_MODEL_WIDTH: usize = 32;

/// Which model the token section shows. Pure view state: it never feeds
/// back into the aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSelector {
    selected: Option<String>,
}

impl ModelSelector {
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Keep the selection valid for the current model list: fall back to
    /// the first model when the selection disappeared, clear it when there
    /// are no models.
    pub fn reconcile(&mut self, models: &[&str]) {
        match models.first() {
            None => self.selected = None,
            Some(first) => {
                let still_known = self
                    .selected
                    .as_deref()
                    .map(|s| models.contains(&s))
                    .unwrap_or(false);
                if !still_known {
                    self.selected = Some((*first).to_string());
                }
            }
        }
    }

    /// Select the next model, wrapping to the first.
    pub fn next(&mut self, models: &[&str]) {
        self.step(models, 1);
    }

    /// Select the previous model, wrapping to the last.
    pub fn prev(&mut self, models: &[&str]) {
        self.step(models, models.len().saturating_sub(1));
    }

    fn step(&mut self, models: &[&str], offset: usize) {
        let Some(current) = self
            .selected
            .as_deref()
            .and_then(|s| models.iter().position(|m| *m == s))
        else {
            return;
        };
        let next = (current + offset) % models.len();
        self.selected = Some(models[next].to_string());
    }

    /// `◀ gpt-4o ▶  (2/4)`; arrows are dimmed when there is nothing to
    /// switch to.
    pub fn to_line<'a>(&self, models: &[&str], theme: &'a Theme) -> Line<'a> {
        let Some(selected) = self.selected() else {
            return Line::from(Span::styled(
                "No models used in the selected period",
                theme.dim,
            ));
        };
        let position = models.iter().position(|m| *m == selected).map(|i| i + 1);
        let arrow_style = if models.len() > 1 {
            theme.key_hint
        } else {
            theme.dim
        };

        Line::from(vec![
            Span::styled("[◀] ", arrow_style),
            Span::styled(truncate(selected, MAX_MODEL_WIDTH), theme.value),
            Span::styled(" [▶]", arrow_style),
            Span::styled(
                format!("  ({}/{})", position.unwrap_or(0), models.len()),
                theme.dim,
            ),
        ])
    }
}

/// Cut `text` to at most `width` display columns, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const MODELS: [&str; 3] = ["gemini-1.5-pro", "gpt-4o", "gpt-4o-mini"];

    fn selector_on(model: &str) -> ModelSelector {
        ModelSelector {
            selected: Some(model.to_string()),
        }
    }

    #[test]
    fn test_reconcile_picks_first_model() {
        let mut selector = ModelSelector::default();
        selector.reconcile(&MODELS);
        assert_eq!(selector.selected(), Some("gemini-1.5-pro"));
    }

    #[test]
    fn test_reconcile_keeps_known_selection() {
        let mut selector = selector_on("gpt-4o");
        selector.reconcile(&MODELS);
        assert_eq!(selector.selected(), Some("gpt-4o"));
    }

    #[test]
    fn test_reconcile_replaces_vanished_selection() {
        let mut selector = selector_on("claude-3-opus");
        selector.reconcile(&MODELS);
        assert_eq!(selector.selected(), Some("gemini-1.5-pro"));
    }

    #[test]
    fn test_reconcile_clears_without_models() {
        let mut selector = selector_on("gpt-4o");
        selector.reconcile(&[]);
        assert_eq!(selector.selected(), None);
    }

    #[test]
    fn test_next_wraps_around() {
        let mut selector = selector_on("gpt-4o-mini");
        selector.next(&MODELS);
        assert_eq!(selector.selected(), Some("gemini-1.5-pro"));
        selector.next(&MODELS);
        assert_eq!(selector.selected(), Some("gpt-4o"));
    }

    #[test]
    fn test_prev_wraps_around() {
        let mut selector = selector_on("gemini-1.5-pro");
        selector.prev(&MODELS);
        assert_eq!(selector.selected(), Some("gpt-4o-mini"));
    }

    #[test]
    fn test_single_model_stays_put() {
        let mut selector = selector_on("gpt-4o");
        selector.next(&["gpt-4o"]);
        selector.prev(&["gpt-4o"]);
        assert_eq!(selector.selected(), Some("gpt-4o"));
    }

    #[test]
    fn test_navigation_without_selection_is_noop() {
        let mut selector = ModelSelector::default();
        selector.next(&MODELS);
        assert_eq!(selector.selected(), None);
    }

    #[test]
    fn test_to_line_shows_position() {
        let theme = Theme::dark();
        let line = selector_on("gpt-4o").to_line(&MODELS, &theme);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[◀] gpt-4o [▶]  (2/3)");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("gpt-4o", 10), "gpt-4o");
        assert_eq!(truncate("embeddings-text-large-3", 10), "embedding…");
        assert_eq!(truncate("embeddings-text-large-3", 10).width(), 10);
    }
}
