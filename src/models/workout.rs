// ABOUTME: Workout record, type/intensity enums, and the status state machine
// ABOUTME: Scheduled -> Completed | Skipped; removal is Skipped, never a delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{EngineError, EngineResult};

/// Discipline of a scheduled session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Pool or open-water swim
    Swim,
    /// Ride (road or trainer)
    Bike,
    /// Run
    Run,
    /// Strength / conditioning circuit
    Strength,
    /// Planned full rest
    Rest,
    /// Bike + run back-to-back
    Brick,
}

impl WorkoutType {
    /// Lowercase label used in titles and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Swim => "swim",
            Self::Bike => "bike",
            Self::Run => "run",
            Self::Strength => "strength",
            Self::Rest => "rest",
            Self::Brick => "brick",
        }
    }
}

/// Prescribed effort level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Conversational effort
    Easy,
    /// Steady aerobic effort
    Moderate,
    /// Tempo/threshold effort
    Hard,
    /// Interval / race-pace effort
    Max,
}

impl Intensity {
    /// Lowercase label for notes and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::Hard => "hard",
            Self::Max => "max",
        }
    }

    /// True for efforts the adaptation rules treat as "hard sessions".
    #[must_use]
    pub const fn is_hard(self) -> bool {
        matches!(self, Self::Hard | Self::Max)
    }

    /// One notch easier, saturating at easy.
    #[must_use]
    pub const fn one_notch_easier(self) -> Self {
        match self {
            Self::Easy | Self::Moderate => Self::Easy,
            Self::Hard => Self::Moderate,
            Self::Max => Self::Hard,
        }
    }
}

/// Lifecycle of a workout record.
///
/// `Completed` and `Skipped` are terminal. The schedule never
/// hard-deletes: "removing" a session means transitioning it to
/// `Skipped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    /// On the calendar, not yet done
    Scheduled,
    /// Athlete finished the session
    Completed,
    /// Session was missed or removed
    Skipped,
}

impl WorkoutStatus {
    /// Whether moving to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::Completed | Self::Skipped)
        )
    }

    /// Lowercase label for logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Skipped => "skipped",
        }
    }

    /// Validate and perform a transition.
    pub fn transition_to(self, next: Self) -> EngineResult<Self> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(EngineError::IllegalTransition {
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }
}

/// Structured target zone attached to a workout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetZone {
    /// Run pace window, seconds per km (smaller is faster)
    Pace {
        /// Fast bound
        min_secs_per_km: f64,
        /// Slow bound
        max_secs_per_km: f64,
    },
    /// Bike power window, watts
    Power {
        /// Lower bound
        min_watts: u32,
        /// Upper bound
        max_watts: u32,
    },
    /// Swim pace window, seconds per 100m
    SwimPace {
        /// Fast bound
        min_secs_per_100m: f64,
        /// Slow bound
        max_secs_per_100m: f64,
    },
}

/// A concrete, schedulable session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Stable workout identifier
    pub id: Uuid,
    /// Owning plan
    pub plan_id: Uuid,
    /// Owning athlete
    pub athlete_id: Uuid,
    /// Calendar day the session is prescribed for
    pub scheduled_date: NaiveDate,
    /// Discipline
    pub workout_type: WorkoutType,
    /// Athlete-facing title, e.g. "Interval Session"
    pub title: String,
    /// Structured athlete-facing description
    pub description: String,
    /// Prescribed duration in minutes
    pub duration_minutes: f64,
    /// Estimated distance in meters, when derivable from zones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
    /// Prescribed effort
    pub intensity: Intensity,
    /// Lifecycle state
    pub status: WorkoutStatus,
    /// Target zone, when zones were available at prescription time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_zone: Option<TargetZone>,
    /// Phase/week context and adaptation annotations
    pub coach_notes: String,
    /// Actual duration once completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_duration_minutes: Option<f64>,
    /// Actual distance once completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_distance_meters: Option<f64>,
}

impl Workout {
    /// True when this session counts as a key session for the
    /// missed-workout sweep: marked titles, bricks, or anything
    /// longer than the key-duration threshold.
    #[must_use]
    pub fn is_key_session(&self) -> bool {
        if self.workout_type == WorkoutType::Brick {
            return true;
        }
        if self.duration_minutes > crate::constants::missed::KEY_DURATION_MINUTES {
            return true;
        }
        let title = self.title.to_lowercase();
        crate::constants::missed::KEY_TITLE_FRAGMENTS
            .iter()
            .any(|fragment| title.contains(fragment))
    }
}

/// Field-level patch applied by `PlanStore::update_workout`.
///
/// `None` means "leave unchanged". Action execution builds one patch
/// per adaptation action, so a retried trigger overwrites with the
/// same values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutPatch {
    /// Move to a new calendar day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    /// Replace the discipline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<WorkoutType>,
    /// Replace the title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replace the description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replace the prescribed duration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    /// Replace the estimated distance (`Some(None)` clears it)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<Option<f64>>,
    /// Replace the prescribed effort
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    /// Transition the lifecycle state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkoutStatus>,
    /// Replace the target zone (`Some(None)` clears it)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_zone: Option<Option<TargetZone>>,
    /// Append to coach notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append_note: Option<String>,
}

impl WorkoutPatch {
    /// Apply this patch to a workout in place, validating any status
    /// transition.
    pub fn apply_to(&self, workout: &mut Workout) -> EngineResult<()> {
        if let Some(status) = self.status {
            workout.status = workout.status.transition_to(status)?;
        }
        if let Some(date) = self.scheduled_date {
            workout.scheduled_date = date;
        }
        if let Some(workout_type) = self.workout_type {
            workout.workout_type = workout_type;
        }
        if let Some(title) = &self.title {
            workout.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            workout.description.clone_from(description);
        }
        if let Some(duration) = self.duration_minutes {
            workout.duration_minutes = duration;
        }
        if let Some(distance) = self.distance_meters {
            workout.distance_meters = distance;
        }
        if let Some(intensity) = self.intensity {
            workout.intensity = intensity;
        }
        if let Some(zone) = self.target_zone {
            workout.target_zone = zone;
        }
        if let Some(note) = &self.append_note {
            if !workout.coach_notes.is_empty() {
                workout.coach_notes.push_str(" | ");
            }
            workout.coach_notes.push_str(note);
        }
        Ok(())
    }
}
