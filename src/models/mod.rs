// ABOUTME: Domain models for athletes, plans, workouts, recovery, and adaptations
// ABOUTME: Re-exports the model types used across the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

//! Domain models.

/// Adaptation actions and results
pub mod adaptation;
/// Athlete profile and preferences
pub mod athlete;
/// Plan, phases, and week metadata
pub mod plan;
/// Recovery snapshots and zones
pub mod recovery;
/// Workout records and status machine
pub mod workout;

pub use adaptation::{AdaptationAction, AdaptationResult, ModificationOutcome};
pub use athlete::{
    AthleteProfile, CoachingStyle, ExperienceLevel, GoalRace, RaceType, RecoveryPhilosophy, Sport,
};
pub use plan::{
    week_monday, Phase, PhaseName, PlanStatus, PlanTuning, SportMix, TrainingPlan, WeekMeta,
};
pub use recovery::{RecoverySnapshot, RecoveryZone};
pub use workout::{
    Intensity, TargetZone, Workout, WorkoutPatch, WorkoutStatus, WorkoutType,
};
