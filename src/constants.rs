// ABOUTME: Named training constants used by the scheduling and adaptation engines
// ABOUTME: Periodization ratios, zone fractions, recovery thresholds, adaptation levers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

//! Training constants grounded in common endurance-coaching practice.
//!
//! Every numeric lever the engine pulls lives here under a named module
//! so rules read as policy rather than magic numbers.

/// Periodization structure for race-anchored and rolling plans.
pub mod periodization {
    /// Minimum total plan length in weeks, regardless of race proximity.
    pub const MIN_PLAN_WEEKS: u32 = 4;

    /// Horizon for rolling (no goal race) plans.
    pub const ROLLING_HORIZON_WEEKS: u32 = 16;

    /// Length of one rolling base or build block.
    pub const ROLLING_BLOCK_WEEKS: u32 = 4;

    /// Share of a race-anchored plan spent tapering.
    pub const TAPER_SHARE: f64 = 0.10;
    /// Minimum taper length in weeks.
    pub const MIN_TAPER_WEEKS: u32 = 2;

    /// Share of a race-anchored plan spent in the peak phase.
    pub const PEAK_SHARE: f64 = 0.20;
    /// Minimum peak length in weeks.
    pub const MIN_PEAK_WEEKS: u32 = 1;

    /// Share of a race-anchored plan spent in the build phase.
    pub const BUILD_SHARE: f64 = 0.30;
    /// Minimum build length in weeks.
    pub const MIN_BUILD_WEEKS: u32 = 1;

    /// Volume multiplier for the base phase of a race-anchored plan.
    pub const BASE_MULTIPLIER: f64 = 0.85;
    /// Volume multiplier for the build phase.
    pub const BUILD_MULTIPLIER: f64 = 1.0;
    /// Volume multiplier for the peak phase.
    pub const PEAK_MULTIPLIER: f64 = 1.1;
    /// Volume multiplier for the taper.
    pub const TAPER_MULTIPLIER: f64 = 0.5;

    /// Rolling-cycle base block multiplier.
    pub const ROLLING_BASE_MULTIPLIER: f64 = 0.7;
    /// Rolling-cycle build block multiplier.
    pub const ROLLING_BUILD_MULTIPLIER: f64 = 1.0;
}

/// Deload and progressive-overload cadence within load phases.
pub mod overload {
    /// Every Nth consecutive load week becomes a deload week.
    pub const DELOAD_EVERY_N_WEEKS: u32 = 4;

    /// Deload volume as a fraction of the phase multiplier.
    pub const DELOAD_MULTIPLIER: f64 = 0.65;

    /// Default week-over-week volume step inside a load block.
    pub const WEEKLY_STEP: f64 = 0.05;

    /// Prescribed durations snap to this granularity (minutes).
    pub const DURATION_ROUNDING_MINUTES: f64 = 5.0;
}

/// Run pace zone fractions, all derived from one easy-pace anchor
/// (seconds per km; smaller is faster).
pub mod run_zones {
    /// Easy zone spans the anchor up to 15% slower.
    pub const EASY_SLOW_FACTOR: f64 = 1.15;
    /// Moderate zone lower bound relative to anchor.
    pub const MODERATE_FAST_FACTOR: f64 = 0.90;
    /// Tempo zone bounds relative to anchor.
    pub const TEMPO_FAST_FACTOR: f64 = 0.82;
    /// Tempo zone slow bound.
    pub const TEMPO_SLOW_FACTOR: f64 = 0.88;
    /// Threshold zone fast bound.
    pub const THRESHOLD_FAST_FACTOR: f64 = 0.78;
    /// Threshold zone slow bound.
    pub const THRESHOLD_SLOW_FACTOR: f64 = 0.82;
    /// Interval zone fast bound.
    pub const INTERVAL_FAST_FACTOR: f64 = 0.72;
    /// Interval zone slow bound.
    pub const INTERVAL_SLOW_FACTOR: f64 = 0.78;
    /// Long-run zone slow bound.
    pub const LONG_SLOW_FACTOR: f64 = 1.10;
}

/// Bike power zone fractions of FTP.
///
/// Reference: Coggan, A. & Allen, H. (2010). Training and Racing with a
/// Power Meter, the classic 5-zone model.
pub mod bike_zones {
    /// Z1 active recovery upper bound.
    pub const Z1_MAX: f64 = 0.55;
    /// Z2 endurance bounds.
    pub const Z2_MIN: f64 = 0.56;
    /// Z2 upper bound.
    pub const Z2_MAX: f64 = 0.75;
    /// Z3 tempo bounds.
    pub const Z3_MIN: f64 = 0.76;
    /// Z3 upper bound.
    pub const Z3_MAX: f64 = 0.90;
    /// Z4 threshold bounds.
    pub const Z4_MIN: f64 = 0.91;
    /// Z4 upper bound.
    pub const Z4_MAX: f64 = 1.05;
    /// Z5 VO2max bounds.
    pub const Z5_MIN: f64 = 1.06;
    /// Z5 upper bound.
    pub const Z5_MAX: f64 = 1.20;
}

/// Swim pace derivations from the critical-swim-speed anchor.
pub mod swim_zones {
    /// Easy swimming relative to the anchor pace per 100m.
    pub const EASY_FACTOR: f64 = 1.15;
    /// Fast repeats relative to the anchor.
    pub const FAST_FACTOR: f64 = 0.92;
}

/// Recovery-score classification and intervention levers.
pub mod recovery {
    /// Below this score the athlete is in the red zone.
    pub const RED_BELOW: u8 = 33;
    /// Below this score (and at or above red) the athlete is yellow.
    pub const YELLOW_BELOW: u8 = 66;

    /// Days of upcoming schedule a fresh score is allowed to rewrite.
    pub const INTERVENTION_WINDOW_DAYS: i64 = 2;

    /// Volume cut applied across the window on a red score.
    pub const RED_VOLUME_CUT: f64 = 0.30;
    /// Volume cut applied across the window on a yellow score for the
    /// balanced coaching style.
    pub const YELLOW_VOLUME_CUT: f64 = 0.10;

    /// Recovery score below which an underperformed workout triggers a
    /// volume reduction on the next hard session.
    pub const LOW_RECOVERY_FOR_REDUCTION: u8 = 50;
}

/// Post-workout performance comparison thresholds.
pub mod performance {
    /// Overperformance beyond this duration delta is note-worthy only.
    pub const OVERPERFORM_NOTE_PCT: f64 = 20.0;
    /// Underperformance beyond this delta triggers the recovery check.
    pub const UNDERPERFORM_PCT: f64 = -20.0;
    /// Cut applied to the next hard session after a flagged underperformance.
    pub const UNDERPERFORM_CUT: f64 = 0.20;

    /// Days of completed history scanned for sustained overperformance.
    pub const OVERPERFORM_SCAN_DAYS: i64 = 7;
    /// A completed workout counts as over-target past this duration delta.
    pub const OVERPERFORM_SESSION_PCT: f64 = 10.0;
    /// Over-target sessions needed to earn a volume bump.
    pub const OVERPERFORM_SESSIONS_FOR_BUMP: usize = 3;

    /// Volume bump by coaching style (push / balanced / supportive).
    pub const BUMP_PUSH_PCT: f64 = 10.0;
    /// Balanced-style bump.
    pub const BUMP_BALANCED_PCT: f64 = 7.0;
    /// Supportive-style bump.
    pub const BUMP_SUPPORTIVE_PCT: f64 = 5.0;
}

/// Missed-workout sweep parameters.
pub mod missed {
    /// A session longer than this is key regardless of its title.
    pub const KEY_DURATION_MINUTES: f64 = 90.0;

    /// Title fragments that mark a session as key.
    pub const KEY_TITLE_FRAGMENTS: [&str; 7] = [
        "long",
        "race",
        "tempo",
        "threshold",
        "interval",
        "brick",
        "key",
    ];

    /// How far forward a missed key session may be pushed.
    pub const RESCHEDULE_WINDOW_DAYS: i64 = 2;

    /// Misses within one Mon–Sun week that trigger a next-week cut.
    pub const WEEKLY_MISS_THRESHOLD: usize = 3;
    /// The next-week volume cut after a heavy-miss week.
    pub const WEEKLY_MISS_CUT: f64 = 0.20;
}

/// Injury protocol levers.
pub mod injury {
    /// Days of upcoming schedule the protocol rewrites.
    pub const PROTOCOL_WINDOW_DAYS: i64 = 7;
    /// Volume cut when a moderate injury has no swap target.
    pub const MODERATE_VOLUME_CUT: f64 = 0.40;
    /// Duration cut for mild injuries.
    pub const MILD_DURATION_CUT: f64 = 0.15;
}

/// Input validation bounds for physiological updates.
pub mod validation {
    /// Plausible FTP range in watts for an adult athlete.
    pub const FTP_MIN_WATTS: u32 = 80;
    /// Upper FTP bound.
    pub const FTP_MAX_WATTS: u32 = 600;

    /// Plausible easy run pace range, seconds per km.
    pub const EASY_PACE_MIN_SECS: f64 = 150.0;
    /// Slow bound for easy pace.
    pub const EASY_PACE_MAX_SECS: f64 = 720.0;

    /// Plausible swim pace range, seconds per 100m.
    pub const SWIM_PACE_MIN_SECS: f64 = 50.0;
    /// Slow bound for swim pace.
    pub const SWIM_PACE_MAX_SECS: f64 = 300.0;
}
