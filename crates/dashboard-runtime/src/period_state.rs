//! Period-selection state machine.
//!
//! [`transition`] is a pure function of `(state, action, now)`; the event
//! loop owns the current [`PeriodState`] and replaces it with each result.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use dashboard_core::period::{resolve, DateRange, PeriodPreset, PeriodSelection};
use dashboard_core::time_utils::{end_of_day, start_of_day};

/// A candidate custom range while the picker is open. May be inverted until
/// it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// User actions understood by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodAction {
    SelectPreset(PeriodPreset),
    EditCustomStart(NaiveDate),
    EditCustomEnd(NaiveDate),
    ApplyCustom,
    CancelCustom,
}

/// Active selection, its resolved range, the remembered custom bounds and
/// any pending custom edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodState {
    selection: PeriodSelection,
    range: DateRange,
    custom_memory: DateRange,
    staged: Option<StagedBounds>,
}

impl PeriodState {
    /// `ThisMonth`, with the custom memory seeded from its range.
    pub fn initial(now: NaiveDateTime) -> Self {
        let selection = PeriodSelection::ThisMonth;
        let range = resolve(&selection, now);
        Self {
            selection,
            range,
            custom_memory: range,
            staged: None,
        }
    }

    pub fn selection(&self) -> PeriodSelection {
        self.selection
    }

    /// The active resolved range.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Bounds the custom picker starts from when nothing is staged.
    pub fn custom_memory(&self) -> DateRange {
        self.custom_memory
    }

    /// What the custom picker shows: the staged pair, else the memory.
    pub fn staged_bounds(&self) -> StagedBounds {
        self.staged.unwrap_or(StagedBounds {
            start: self.custom_memory.start_date(),
            end: self.custom_memory.end_date(),
        })
    }

    /// Whether a custom edit is pending.
    pub fn is_editing(&self) -> bool {
        self.staged.is_some()
    }

    /// Re-resolve the active selection against a new `now`.
    ///
    /// Presets follow the clock and the custom memory follows the preset's
    /// new range; a custom range and its memory are unaffected. Staged edits
    /// are left alone.
    pub fn rebased(&self, now: NaiveDateTime) -> Self {
        let range = resolve(&self.selection, now);
        let custom_memory = if self.selection.is_custom() {
            self.custom_memory
        } else {
            range
        };
        Self {
            range,
            custom_memory,
            ..self.clone()
        }
    }
}

/// Apply `action` to `state` at instant `now`.
pub fn transition(state: &PeriodState, action: PeriodAction, now: NaiveDateTime) -> PeriodState {
    let next = match action {
        PeriodAction::SelectPreset(preset) => {
            let selection = preset.selection();
            let range = resolve(&selection, now);
            PeriodState {
                selection,
                range,
                custom_memory: range,
                staged: None,
            }
        }
        PeriodAction::EditCustomStart(start) => PeriodState {
            staged: Some(StagedBounds {
                start,
                ..state.staged_bounds()
            }),
            ..state.clone()
        },
        PeriodAction::EditCustomEnd(end) => PeriodState {
            staged: Some(StagedBounds {
                end,
                ..state.staged_bounds()
            }),
            ..state.clone()
        },
        PeriodAction::ApplyCustom => {
            let StagedBounds { start, end } = state.staged_bounds();
            let end = if end < start { start } else { end };
            let selection = PeriodSelection::Custom {
                start: start_of_day(start),
                end: end_of_day(end),
            };
            let range = resolve(&selection, now);
            PeriodState {
                selection,
                range,
                custom_memory: range,
                staged: None,
            }
        }
        PeriodAction::CancelCustom => PeriodState {
            staged: None,
            ..state.clone()
        },
    };

    debug!(
        ?action,
        period = %next.selection.label(),
        start = %next.range.start_date(),
        end = %next.range.end_date(),
        "period transition"
    );

    next
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> NaiveDateTime {
        ymd(2024, 5, 15).and_hms_opt(10, 0, 0).unwrap()
    }

    fn run(actions: &[PeriodAction]) -> PeriodState {
        actions
            .iter()
            .fold(PeriodState::initial(now()), |state, action| {
                transition(&state, *action, now())
            })
    }

    // ── Initial state ─────────────────────────────────────────────────────────

    #[test]
    fn test_initial_is_this_month_with_matching_memory() {
        let state = PeriodState::initial(now());
        assert_eq!(state.selection(), PeriodSelection::ThisMonth);
        assert_eq!(state.range().start_date(), ymd(2024, 5, 1));
        assert_eq!(state.range().end_date(), ymd(2024, 5, 15));
        assert_eq!(state.custom_memory(), state.range());
        assert!(!state.is_editing());
    }

    // ── Presets ───────────────────────────────────────────────────────────────

    #[test]
    fn test_select_preset_resolves_range() {
        let state = run(&[PeriodAction::SelectPreset(PeriodPreset::Last7Days)]);
        assert_eq!(state.selection(), PeriodSelection::Last7Days);
        assert_eq!(state.range().num_days(), 7);
        assert_eq!(state.range().end_date(), ymd(2024, 5, 15));
    }

    #[test]
    fn test_select_preset_after_custom_overwrites_memory() {
        let state = run(&[
            PeriodAction::EditCustomStart(ymd(2024, 2, 1)),
            PeriodAction::EditCustomEnd(ymd(2024, 2, 10)),
            PeriodAction::ApplyCustom,
            PeriodAction::SelectPreset(PeriodPreset::Last90Days),
        ]);
        assert_eq!(state.selection(), PeriodSelection::Last90Days);
        assert_eq!(state.custom_memory(), state.range());
        assert_eq!(
            state.staged_bounds(),
            StagedBounds {
                start: state.range().start_date(),
                end: ymd(2024, 5, 15),
            }
        );
    }

    #[test]
    fn test_select_preset_discards_staged_edit() {
        let state = run(&[
            PeriodAction::EditCustomStart(ymd(2024, 1, 1)),
            PeriodAction::SelectPreset(PeriodPreset::LastMonth),
        ]);
        assert!(!state.is_editing());
        assert_eq!(state.range().start_date(), ymd(2024, 4, 1));
        assert_eq!(state.range().end_date(), ymd(2024, 4, 30));
    }

    // ── Custom edits ──────────────────────────────────────────────────────────

    #[test]
    fn test_edit_keeps_other_side_and_active_range() {
        let before = PeriodState::initial(now());
        let state = transition(&before, PeriodAction::EditCustomStart(ymd(2024, 5, 3)), now());

        assert!(state.is_editing());
        assert_eq!(
            state.staged_bounds(),
            StagedBounds {
                start: ymd(2024, 5, 3),
                end: ymd(2024, 5, 15),
            }
        );
        assert_eq!(state.selection(), before.selection());
        assert_eq!(state.range(), before.range());
    }

    #[test]
    fn test_successive_edits_accumulate() {
        let state = run(&[
            PeriodAction::EditCustomEnd(ymd(2024, 5, 10)),
            PeriodAction::EditCustomStart(ymd(2024, 5, 2)),
        ]);
        assert_eq!(
            state.staged_bounds(),
            StagedBounds {
                start: ymd(2024, 5, 2),
                end: ymd(2024, 5, 10),
            }
        );
    }

    #[test]
    fn test_apply_custom_sets_selection_and_memory() {
        let state = run(&[
            PeriodAction::EditCustomStart(ymd(2024, 3, 5)),
            PeriodAction::EditCustomEnd(ymd(2024, 3, 20)),
            PeriodAction::ApplyCustom,
        ]);
        assert!(state.selection().is_custom());
        assert_eq!(state.range().start().to_string(), "2024-03-05 00:00:00");
        assert_eq!(state.range().end().to_string(), "2024-03-20 23:59:59.999");
        assert_eq!(state.custom_memory(), state.range());
        assert!(!state.is_editing());
    }

    #[test]
    fn test_apply_inverted_custom_collapses_to_start() {
        let state = run(&[
            PeriodAction::EditCustomStart(ymd(2024, 3, 20)),
            PeriodAction::EditCustomEnd(ymd(2024, 3, 5)),
            PeriodAction::ApplyCustom,
        ]);
        assert_eq!(state.range().start_date(), ymd(2024, 3, 20));
        assert_eq!(state.range().end_date(), ymd(2024, 3, 20));
        assert_eq!(state.range().num_days(), 1);
        assert_eq!(
            state.selection(),
            PeriodSelection::Custom {
                start: start_of_day(ymd(2024, 3, 20)),
                end: end_of_day(ymd(2024, 3, 20)),
            }
        );
    }

    #[test]
    fn test_apply_without_edit_uses_memory() {
        let state = run(&[PeriodAction::ApplyCustom]);
        assert!(state.selection().is_custom());
        assert_eq!(state.range(), PeriodState::initial(now()).range());
    }

    #[test]
    fn test_cancel_discards_staged_edit_only() {
        let before = run(&[PeriodAction::SelectPreset(PeriodPreset::Last7Days)]);
        let editing = transition(&before, PeriodAction::EditCustomStart(ymd(2023, 1, 1)), now());
        let after = transition(&editing, PeriodAction::CancelCustom, now());
        assert_eq!(after, before);
    }

    #[test]
    fn test_custom_range_ignores_now() {
        let state = run(&[
            PeriodAction::EditCustomStart(ymd(2024, 3, 5)),
            PeriodAction::ApplyCustom,
        ]);
        let later = ymd(2025, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        let next = transition(&state, PeriodAction::CancelCustom, later);
        assert_eq!(next.range(), state.range());
    }

    // ── rebased ───────────────────────────────────────────────────────────────

    #[test]
    fn test_rebased_moves_presets_with_the_clock() {
        let state = run(&[PeriodAction::SelectPreset(PeriodPreset::Last7Days)]);
        let tomorrow = ymd(2024, 5, 16).and_hms_opt(9, 0, 0).unwrap();
        let moved = state.rebased(tomorrow);
        assert_eq!(moved.range().end_date(), ymd(2024, 5, 16));
        assert_eq!(moved.custom_memory(), moved.range());
        assert_eq!(moved.staged_bounds().end, ymd(2024, 5, 16));
    }

    #[test]
    fn test_rebased_keeps_custom_range_and_memory() {
        let state = run(&[
            PeriodAction::EditCustomStart(ymd(2024, 4, 2)),
            PeriodAction::EditCustomEnd(ymd(2024, 4, 9)),
            PeriodAction::ApplyCustom,
        ]);
        let tomorrow = ymd(2024, 5, 16).and_hms_opt(9, 0, 0).unwrap();
        let moved = state.rebased(tomorrow);
        assert_eq!(moved.range(), state.range());
        assert_eq!(moved.custom_memory(), state.custom_memory());
    }
}
