// ABOUTME: Periodization phase calculation from plan start and optional race date
// ABOUTME: Race plans split base/build/peak/taper; raceless plans roll 4-week cycles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

//! Phase calculation.
//!
//! With a goal race the available weeks split into base → build → peak
//! → taper, taper and peak sized as fixed shares of the total with
//! floors, base absorbing the remainder (and omitted when it comes out
//! to zero). Without a race the plan rolls alternating 4-week
//! base/build blocks out to a fixed horizon.

use chrono::NaiveDate;
use tracing::debug;

use crate::constants::periodization as pz;
use crate::models::plan::{Phase, PhaseName};

/// Whole weeks between two dates, floored.
#[must_use]
pub fn weeks_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days();
    if days <= 0 {
        0
    } else {
        (days / 7) as u32
    }
}

/// Split the time between `start` and the goal race into contiguous
/// phases. Returns the rolling cycle when no race is set.
///
/// The returned phases are contiguous: `start_week` of each phase is
/// the previous phase's `start_week + weeks`, and the weeks sum to
/// `max(4, weeks_between(start, race))` for race plans.
#[must_use]
pub fn calculate_phases(start: NaiveDate, race_date: Option<NaiveDate>) -> Vec<Phase> {
    race_date.map_or_else(rolling_phases, |race| race_phases(start, race))
}

fn race_phases(start: NaiveDate, race: NaiveDate) -> Vec<Phase> {
    let total = weeks_between(start, race).max(pz::MIN_PLAN_WEEKS);

    let taper = (f64::from(total) * pz::TAPER_SHARE).round() as u32;
    let taper = taper.max(pz::MIN_TAPER_WEEKS);
    let peak = (f64::from(total) * pz::PEAK_SHARE).round() as u32;
    let peak = peak.max(pz::MIN_PEAK_WEEKS);
    let build = (f64::from(total) * pz::BUILD_SHARE).round() as u32;
    let build = build.max(pz::MIN_BUILD_WEEKS);
    let base = total.saturating_sub(taper + peak + build);

    debug!(total, base, build, peak, taper, "calculated race phases");

    let mut phases = Vec::with_capacity(4);
    let mut start_week = 1;
    let mut push = |name: PhaseName, weeks: u32, volume_multiplier: f64| {
        if weeks > 0 {
            phases.push(Phase {
                name,
                weeks,
                volume_multiplier,
                start_week,
            });
            start_week += weeks;
        }
    };

    push(PhaseName::Base, base, pz::BASE_MULTIPLIER);
    push(PhaseName::Build, build, pz::BUILD_MULTIPLIER);
    push(PhaseName::Peak, peak, pz::PEAK_MULTIPLIER);
    push(PhaseName::Taper, taper, pz::TAPER_MULTIPLIER);
    phases
}

fn rolling_phases() -> Vec<Phase> {
    let mut phases = Vec::new();
    let mut start_week = 1;
    let mut remaining = pz::ROLLING_HORIZON_WEEKS;
    let mut next = PhaseName::Base;

    while remaining > 0 {
        let weeks = remaining.min(pz::ROLLING_BLOCK_WEEKS);
        let volume_multiplier = match next {
            PhaseName::Base => pz::ROLLING_BASE_MULTIPLIER,
            _ => pz::ROLLING_BUILD_MULTIPLIER,
        };
        phases.push(Phase {
            name: next,
            weeks,
            volume_multiplier,
            start_week,
        });
        start_week += weeks;
        remaining -= weeks;
        next = if next == PhaseName::Base {
            PhaseName::Build
        } else {
            PhaseName::Base
        };
    }
    phases
}
