// ABOUTME: Adaptation actions as data: typed intentions emitted by the rule engines
// ABOUTME: Actions are computed in full before any write and applied in one batch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::workout::WorkoutPatch;

/// A proposed mutation to the schedule. An intention, not yet applied;
/// execution is a separate, idempotent step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdaptationAction {
    /// Change fields of a workout in place (duration, distance, date).
    ModifyWorkout {
        /// Target workout
        workout_id: Uuid,
        /// Fields to change
        changes: WorkoutPatch,
        /// Why the engine proposes this
        reason: String,
    },
    /// Replace a session with an easier alternative of the same family.
    SwapWorkout {
        /// Target workout
        workout_id: Uuid,
        /// Replacement content
        changes: WorkoutPatch,
        /// Why the engine proposes this
        reason: String,
    },
    /// Mark a session skipped (the engine's only form of removal).
    SkipWorkout {
        /// Target workout
        workout_id: Uuid,
        /// Why the engine proposes this
        reason: String,
    },
    /// Insert a full rest day into the schedule.
    AddRestDay {
        /// Day to rest on
        date: NaiveDate,
        /// Why the engine proposes this
        reason: String,
    },
    /// Scale a workout's duration and distance by a factor.
    AdjustVolume {
        /// Target workout
        workout_id: Uuid,
        /// Multiplicative factor (0.8 cuts 20%, 1.07 bumps 7%)
        factor: f64,
        /// Why the engine proposes this
        reason: String,
    },
}

impl AdaptationAction {
    /// The target workout, when the action has one.
    #[must_use]
    pub const fn workout_id(&self) -> Option<Uuid> {
        match self {
            Self::ModifyWorkout { workout_id, .. }
            | Self::SwapWorkout { workout_id, .. }
            | Self::SkipWorkout { workout_id, .. }
            | Self::AdjustVolume { workout_id, .. } => Some(*workout_id),
            Self::AddRestDay { .. } => None,
        }
    }

    /// The recorded rationale.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::ModifyWorkout { reason, .. }
            | Self::SwapWorkout { reason, .. }
            | Self::SkipWorkout { reason, .. }
            | Self::AddRestDay { reason, .. }
            | Self::AdjustVolume { reason, .. } => reason,
        }
    }

}

/// Output of one adaptation pass: proposed actions plus an optional
/// athlete-facing message for the notification sink.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdaptationResult {
    /// Proposed mutations, possibly empty
    pub actions: Vec<AdaptationAction>,
    /// Plain-text check-in for the athlete, when one is warranted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AdaptationResult {
    /// A pass that decided to do nothing.
    #[must_use]
    pub const fn no_action() -> Self {
        Self {
            actions: Vec::new(),
            message: None,
        }
    }
}

/// Outcome of a routed modification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModificationOutcome {
    /// Whether any state changed
    pub modified: bool,
    /// Athlete-facing summary of what happened (or why nothing did)
    pub description: String,
}

impl ModificationOutcome {
    /// A handler that changed state.
    #[must_use]
    pub fn applied(description: impl Into<String>) -> Self {
        Self {
            modified: true,
            description: description.into(),
        }
    }

    /// A no-op outcome (missing prerequisite or rejected input).
    #[must_use]
    pub fn unchanged(description: impl Into<String>) -> Self {
        Self {
            modified: false,
            description: description.into(),
        }
    }
}
