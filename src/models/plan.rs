// ABOUTME: Training plan, phase, and week-metadata models
// ABOUTME: One active plan per athlete; phases are contiguous and non-overlapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::athlete::Sport;
use super::workout::WorkoutType;
use crate::zones::ZoneConfig;

/// Named periodization block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseName {
    /// Aerobic foundation
    Base,
    /// Race-specific load
    Build,
    /// Sharpening at highest intensity
    Peak,
    /// Pre-race volume reduction
    Taper,
}

impl PhaseName {
    /// Lowercase label for notes and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Build => "build",
            Self::Peak => "peak",
            Self::Taper => "taper",
        }
    }

    /// Load phases take deloads and progressive overload; peak and
    /// taper do not.
    #[must_use]
    pub const fn is_load_phase(self) -> bool {
        matches!(self, Self::Base | Self::Build)
    }
}

/// A contiguous block of weeks with one overall volume multiplier.
///
/// Invariant: across a plan, `start_week` of phase *i+1* equals
/// `start_week + weeks` of phase *i*, and weeks sum to the plan total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Which block this is
    pub name: PhaseName,
    /// Length in weeks
    pub weeks: u32,
    /// Phase-level volume multiplier
    pub volume_multiplier: f64,
    /// First week of the phase, 1-based across the plan
    pub start_week: u32,
}

/// Per-week scheduling metadata produced by the week schedule builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekMeta {
    /// 1-based week number across the plan
    pub week_number: u32,
    /// Owning phase
    pub phase_name: PhaseName,
    /// 1-based week number within the phase
    pub week_in_phase: u32,
    /// Scheduled recovery week
    pub is_deload: bool,
    /// Final volume multiplier: deload-adjusted phase multiplier times
    /// the progressive-overload step
    pub volume_multiplier: f64,
}

/// Plan lifecycle. Creating a new plan cancels the prior active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// The athlete's current plan
    Active,
    /// Superseded or abandoned
    Cancelled,
}

/// Sport time split for multisport plans, as fractions summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SportMix {
    /// Swim share of weekly minutes
    pub swim: f64,
    /// Bike share of weekly minutes
    pub bike: f64,
    /// Run share of weekly minutes
    pub run: f64,
}

impl Default for SportMix {
    fn default() -> Self {
        Self {
            swim: 0.2,
            bike: 0.5,
            run: 0.3,
        }
    }
}

impl SportMix {
    /// Renormalize shares so they sum to 1, guarding division by zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        let total = self.swim + self.bike + self.run;
        if total <= f64::EPSILON {
            return Self::default();
        }
        Self {
            swim: self.swim / total,
            bike: self.bike / total,
            run: self.run / total,
        }
    }
}

/// Philosophy knobs set through the modification router and consumed by
/// template generation and week scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTuning {
    /// Week-over-week volume step inside load blocks
    pub overload_rate: f64,
    /// Cap on the fraction of weekly sessions that may be hard
    pub hard_session_fraction: f64,
    /// Workout type to favor when filling the week
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasized_type: Option<WorkoutType>,
    /// Workout type to avoid when filling the week
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deemphasized_type: Option<WorkoutType>,
    /// Brick sessions per week for multisport plans
    pub bricks_per_week: u32,
}

impl Default for PlanTuning {
    fn default() -> Self {
        Self {
            overload_rate: crate::constants::overload::WEEKLY_STEP,
            hard_session_fraction: 0.4,
            emphasized_type: None,
            deemphasized_type: None,
            bricks_per_week: 1,
        }
    }
}

/// A materialized periodized training plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPlan {
    /// Stable plan identifier
    pub id: Uuid,
    /// Owning athlete
    pub athlete_id: Uuid,
    /// Sport the plan is built around
    pub sport: Sport,
    /// Lifecycle state
    pub status: PlanStatus,
    /// First day of week 1 (always a Monday)
    pub starts_at: NaiveDate,
    /// Day after the final week
    pub ends_at: NaiveDate,
    /// Contiguous phase list
    pub phases: Vec<Phase>,
    /// One entry per week of the plan
    pub weeks: Vec<WeekMeta>,
    /// Zone configuration captured at creation; rewritten by
    /// physiological modifications
    pub zones: ZoneConfig,
    /// Days of the week the athlete trains
    pub training_days: Vec<Weekday>,
    /// Weekly training budget in minutes
    pub weekly_minutes: f64,
    /// Sport split for multisport plans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sport_mix: Option<SportMix>,
    /// Philosophy knobs
    #[serde(default)]
    pub tuning: PlanTuning,
}

impl TrainingPlan {
    /// Total plan length in weeks.
    #[must_use]
    pub fn total_weeks(&self) -> u32 {
        self.phases.iter().map(|p| p.weeks).sum()
    }

    /// Derive the current week and phase for a calendar date.
    ///
    /// Returns `None` before the plan starts or after it ends. Week
    /// numbers are 1-based.
    #[must_use]
    pub fn position_on(&self, date: NaiveDate) -> Option<(u32, PhaseName)> {
        let offset_days = (date - self.starts_at).num_days();
        if offset_days < 0 {
            return None;
        }
        let week = u32::try_from(offset_days / 7).ok()? + 1;
        if week > self.total_weeks() {
            return None;
        }
        let phase = self
            .phases
            .iter()
            .find(|p| week >= p.start_week && week < p.start_week + p.weeks)?;
        Some((week, phase.name))
    }

    /// Metadata for a 1-based week number, if within the plan.
    #[must_use]
    pub fn week_meta(&self, week_number: u32) -> Option<&WeekMeta> {
        self.weeks.iter().find(|w| w.week_number == week_number)
    }

    /// Monday of a 1-based plan week.
    #[must_use]
    pub fn week_start(&self, week_number: u32) -> NaiveDate {
        self.starts_at + chrono::Duration::days(i64::from(week_number - 1) * 7)
    }
}

/// Monday of the Mon–Sun week containing `date`.
#[must_use]
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_week_monday() {
        // 2026-09-03 is a Thursday
        let thursday = NaiveDate::from_ymd_opt(2026, 9, 3).unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        assert_eq!(week_monday(thursday), monday);
        assert_eq!(week_monday(monday), monday);
    }

    #[test]
    fn test_sport_mix_normalizes() {
        let mix = SportMix {
            swim: 2.0,
            bike: 5.0,
            run: 3.0,
        }
        .normalized();
        assert!((mix.swim + mix.bike + mix.run - 1.0).abs() < 1e-9);
        assert!((mix.bike - 0.5).abs() < 1e-9);
    }
}
