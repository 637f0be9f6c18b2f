//! Property-based tests for clock parsing, overlap matching, and grid layout.
//!
//! These check invariants that must hold for *any* schedule, not just the
//! hand-picked cases in `grid_tests.rs`.

use proptest::prelude::*;
use room_grid::{
    build_grid, format_clock, match_slot, parse_clock, Cell, Day, EntryKind, GridPolicy,
    ScheduleEntry, TimeSlot,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_day() -> impl Strategy<Value = Day> {
    prop::sample::select(Day::TEACHING_WEEK.to_vec())
}

fn arb_kind() -> impl Strategy<Value = EntryKind> {
    prop_oneof![Just(EntryKind::Regular), Just(EntryKind::Temporary)]
}

/// An entry between 06:00 AM and 11:00 PM, 5-minute granularity, 5–240 min.
fn arb_entry() -> impl Strategy<Value = ScheduleEntry> {
    (arb_day(), 72u32..276, 1u32..=48, arb_kind(), any::<bool>()).prop_map(
        |(day, start5, len5, kind, lowercase)| {
            let start = start5 * 5;
            let end = (start + len5 * 5).min(23 * 60 + 55);
            let day = if lowercase {
                day.name().to_lowercase()
            } else {
                day.name().to_string()
            };
            ScheduleEntry {
                day,
                start_time: format_clock(start),
                end_time: format_clock(end),
                class_name: Some(format!("C{}", start)),
                section: None,
                professor: None,
                kind,
                overridden: false,
            }
        },
    )
}

fn arb_entries() -> impl Strategy<Value = Vec<ScheduleEntry>> {
    prop::collection::vec(arb_entry(), 0..12)
}

fn arb_policy() -> impl Strategy<Value = GridPolicy> {
    (prop_oneof![Just(15i64), Just(30), Just(60)], 0u32..4, any::<bool>()).prop_map(
        |(step, shift, merge)| {
            let start = 7 * 60 + 30 - shift * 30;
            GridPolicy {
                start,
                end: 21 * 60,
                step_minutes: step,
                days: Day::TEACHING_WEEK.to_vec(),
                merge,
            }
        },
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn clock_roundtrips(minutes in 0u32..(24 * 60)) {
        let text = format_clock(minutes);
        prop_assert_eq!(parse_clock(&text).unwrap(), minutes);
        prop_assert_eq!(format_clock(parse_clock(&text).unwrap()), text);
    }

    #[test]
    fn match_is_exactly_overlap_and_day(
        entries in arb_entries(),
        day in arb_day(),
        start in 0u32..(23 * 60),
        len in 1u32..120,
    ) {
        let slot = TimeSlot::new(start, start + len);
        let matched = match_slot(&entries, day.name(), &slot);

        let expected: Vec<&ScheduleEntry> = entries
            .iter()
            .filter(|e| {
                let (s, en) = e.interval().unwrap();
                day.matches(&e.day) && s < slot.end && en > slot.start
            })
            .collect();
        prop_assert_eq!(matched, expected);
    }

    #[test]
    fn every_cell_has_one_state_and_covered_points_up(
        entries in arb_entries(),
        policy in arb_policy(),
    ) {
        let grid = build_grid(&entries, &policy).unwrap();
        let rows = grid.slots().len();

        for day in 0..grid.days().len() {
            let mut owned_until = 0usize;
            for row in 0..rows {
                match grid.cell(row, day).unwrap() {
                    Cell::Empty => prop_assert!(row >= owned_until),
                    Cell::Occupied { span, entries } => {
                        prop_assert!(row >= owned_until);
                        prop_assert!(*span >= 1);
                        prop_assert!(row + span <= rows);
                        prop_assert!(!entries.is_empty());
                        if !policy.merge {
                            prop_assert_eq!(*span, 1);
                        }
                        owned_until = row + span;
                    }
                    Cell::Covered { owner } => {
                        prop_assert!(*owner < row);
                        prop_assert!(row < owned_until);
                        let owner_is_occupied = matches!(
                            grid.cell(*owner, day),
                            Some(Cell::Occupied { .. })
                        );
                        prop_assert!(owner_is_occupied);
                    }
                }
            }
        }
    }

    #[test]
    fn occupied_cell_contains_every_match_of_its_first_slot(
        entries in arb_entries(),
        policy in arb_policy(),
    ) {
        let grid = build_grid(&entries, &policy).unwrap();
        for (row, col, cell_entries, _) in grid.occupied() {
            let slot = &grid.slots()[row];
            let day = grid.days()[col];
            for m in match_slot(&entries, day.name(), slot) {
                prop_assert!(cell_entries.contains(m));
            }
        }
    }

    #[test]
    fn empty_cells_really_are_empty(
        entries in arb_entries(),
        policy in arb_policy(),
    ) {
        let grid = build_grid(&entries, &policy).unwrap();
        for (row, (slot, cells)) in grid.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if matches!(cell, Cell::Empty) {
                    let day = grid.days()[col];
                    prop_assert!(
                        match_slot(&entries, day.name(), slot).is_empty(),
                        "row {} col {} marked empty but has matches", row, col
                    );
                }
            }
        }
    }
}
