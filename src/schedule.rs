// ABOUTME: Week schedule builder: deload insertion and progressive overload
// ABOUTME: Expands a phase list into per-week metadata with final volume multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

//! Week schedule expansion.
//!
//! Walks phases in order. Within base and build a load-week counter
//! runs; the week on which it reaches 4 becomes a deload (65% of the
//! phase multiplier) and the counter resets. The counter carries across
//! the base→build boundary: a phase change is not a recovery event.
//! Peak and taper weeks are never deload.

use crate::constants::overload;
use crate::models::plan::{Phase, PhaseName, WeekMeta};

/// Progressive-overload multiplier for a week.
///
/// Load weeks inside base/build step up `rate` per week within their
/// 4-week block: `1 + (week_in_phase mod 4) * rate`. Deload, peak, and
/// taper weeks are exempt and return 1.0.
#[must_use]
pub fn overload_multiplier(
    phase_name: PhaseName,
    week_in_phase: u32,
    is_deload: bool,
    rate: f64,
) -> f64 {
    if is_deload || !phase_name.is_load_phase() {
        return 1.0;
    }
    1.0 + f64::from(week_in_phase % overload::DELOAD_EVERY_N_WEEKS) * rate
}

/// Expand phases into one `WeekMeta` per week with the default
/// overload rate.
#[must_use]
pub fn build_week_schedule(phases: &[Phase]) -> Vec<WeekMeta> {
    build_week_schedule_with_rate(phases, overload::WEEKLY_STEP)
}

/// Expand phases into per-week metadata using a custom overload rate
/// (set through the modification router).
#[must_use]
pub fn build_week_schedule_with_rate(phases: &[Phase], rate: f64) -> Vec<WeekMeta> {
    let total: u32 = phases.iter().map(|p| p.weeks).sum();
    let mut weeks = Vec::with_capacity(total as usize);
    let mut week_number = 1_u32;
    let mut load_counter = 0_u32;

    for phase in phases {
        if !phase.name.is_load_phase() {
            load_counter = 0;
        }
        for week_in_phase in 1..=phase.weeks {
            let mut is_deload = false;
            if phase.name.is_load_phase() {
                load_counter += 1;
                if load_counter == overload::DELOAD_EVERY_N_WEEKS {
                    is_deload = true;
                    load_counter = 0;
                }
            }

            let phase_multiplier = if is_deload {
                phase.volume_multiplier * overload::DELOAD_MULTIPLIER
            } else {
                phase.volume_multiplier
            };
            let volume_multiplier = phase_multiplier
                * overload_multiplier(phase.name, week_in_phase, is_deload, rate);

            weeks.push(WeekMeta {
                week_number,
                phase_name: phase.name,
                week_in_phase,
                is_deload,
                volume_multiplier,
            });
            week_number += 1;
        }
    }
    weeks
}

/// Round a prescribed duration to the nearest 5 minutes.
#[must_use]
pub fn round_to_five_minutes(minutes: f64) -> f64 {
    (minutes / overload::DURATION_ROUNDING_MINUTES).round()
        * overload::DURATION_ROUNDING_MINUTES
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn phase(name: PhaseName, weeks: u32, multiplier: f64, start_week: u32) -> Phase {
        Phase {
            name,
            weeks,
            volume_multiplier: multiplier,
            start_week,
        }
    }

    #[test]
    fn test_every_fourth_load_week_is_deload() {
        let phases = [
            phase(PhaseName::Base, 8, 0.85, 1),
            phase(PhaseName::Build, 4, 1.0, 9),
        ];
        let weeks = build_week_schedule(&phases);
        assert_eq!(weeks.len(), 12);

        // Any 4-consecutive-week run inside base/build has exactly one deload
        for window in weeks.windows(4) {
            let deloads = window.iter().filter(|w| w.is_deload).count();
            assert_eq!(deloads, 1, "window starting week {}", window[0].week_number);
        }

        // Deload weeks sit at 65% of their phase multiplier
        for week in weeks.iter().filter(|w| w.is_deload) {
            let phase_multiplier = if week.phase_name == PhaseName::Base {
                0.85
            } else {
                1.0
            };
            assert!(
                (week.volume_multiplier - phase_multiplier * 0.65).abs() < 1e-9,
                "week {}",
                week.week_number
            );
        }
    }

    #[test]
    fn test_peak_and_taper_never_deload() {
        let phases = [
            phase(PhaseName::Peak, 6, 1.1, 1),
            phase(PhaseName::Taper, 4, 0.5, 7),
        ];
        let weeks = build_week_schedule(&phases);
        assert!(weeks.iter().all(|w| !w.is_deload));
        // And no overload either
        for week in &weeks {
            let phase_multiplier = if week.phase_name == PhaseName::Peak {
                1.1
            } else {
                0.5
            };
            assert!((week.volume_multiplier - phase_multiplier).abs() < 1e-9);
        }
    }

    #[test]
    fn test_overload_formula_on_load_weeks() {
        let phases = [phase(PhaseName::Build, 7, 1.0, 1)];
        let weeks = build_week_schedule(&phases);
        for week in &weeks {
            let expected = if week.is_deload {
                1.0
            } else {
                1.0 + f64::from(week.week_in_phase % 4) * 0.05
            };
            assert!(
                (overload_multiplier(
                    week.phase_name,
                    week.week_in_phase,
                    week.is_deload,
                    0.05
                ) - expected)
                    .abs()
                    < 1e-9,
                "week {}",
                week.week_number
            );
        }
        // Week 4 of the block is the deload, exempt from overload
        assert!(weeks[3].is_deload);
        assert!((weeks[3].volume_multiplier - 0.65).abs() < 1e-9);
        // Week 5 restarts the load count
        assert!((weeks[4].volume_multiplier - (1.0 + 0.05)).abs() < 1e-9);
    }

    #[test]
    fn test_load_counter_carries_across_base_build_boundary() {
        let phases = [
            phase(PhaseName::Base, 2, 0.85, 1),
            phase(PhaseName::Build, 4, 1.0, 3),
        ];
        let weeks = build_week_schedule(&phases);
        // Load weeks 1,2 in base then 3,4 in build: build week 2 deloads
        assert!(!weeks[2].is_deload);
        assert!(weeks[3].is_deload);
        assert_eq!(weeks[3].phase_name, PhaseName::Build);
    }

    #[test]
    fn test_duration_rounding() {
        assert!((round_to_five_minutes(47.3) - 45.0).abs() < 1e-9);
        assert!((round_to_five_minutes(47.5) - 50.0).abs() < 1e-9);
        assert!((round_to_five_minutes(60.0) - 60.0).abs() < 1e-9);
    }
}
