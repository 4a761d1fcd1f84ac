//! Text sparklines for daily series.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use dashboard_core::formatting::format_count;
use dashboard_data::aggregator::SeriesPoint;

use crate::themes::Theme;

/// Eighth-block levels, lowest first.
const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render `values` as a sparkline at most `width` columns wide.
///
/// When there are more values than columns, consecutive values are summed
/// into `width` buckets so the whole period stays visible.
///
/// Example: `[0, 5, 10]`, width 8 → `"▁▅█"`
pub fn sparkline(values: &[u64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let buckets = bucket(values, width);
    let max = buckets.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return LEVELS[0].to_string().repeat(buckets.len());
    }

    buckets
        .iter()
        .map(|&value| {
            let ratio = value as f64 / max as f64;
            let level = (ratio * (LEVELS.len() - 1) as f64).round() as usize;
            LEVELS[level.min(LEVELS.len() - 1)]
        })
        .collect()
}

/// Sum `values` into at most `width` contiguous buckets.
fn bucket(values: &[u64], width: usize) -> Vec<u64> {
    if values.len() <= width {
        return values.to_vec();
    }
    let n = values.len();
    (0..width)
        .map(|i| {
            let from = i * n / width;
            let to = (i + 1) * n / width;
            values[from..to].iter().sum()
        })
        .collect()
}

/// Two-line chart of a daily series: the sparkline, then its date span and
/// the busiest day's value.
pub fn chart_lines<'a>(
    series: &[SeriesPoint],
    width: usize,
    style: Style,
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return vec![
            Line::from(Span::styled("No data for the selected period", theme.dim)),
            Line::from(""),
        ];
    };

    let values: Vec<u64> = series.iter().map(|point| point.value).collect();
    let peak = values.iter().copied().max().unwrap_or(0);

    vec![
        Line::from(Span::styled(sparkline(&values, width), style)),
        Line::from(vec![
            Span::styled(first.date.format("%d %b").to_string(), theme.dim),
            Span::styled(" → ", theme.dim),
            Span::styled(last.date.format("%d %b").to_string(), theme.dim),
            Span::styled("   peak ", theme.label),
            Span::styled(format_count(peak), theme.value),
        ]),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
