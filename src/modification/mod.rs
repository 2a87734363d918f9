// ABOUTME: Modification router: dispatches structured, pre-parsed athlete requests
// ABOUTME: A closed request taxonomy with typed params, decoded once at the boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

//! Explicit modification requests.
//!
//! The natural-language layer upstream classifies a chat exchange into
//! one [`ModificationRequest`] variant with typed parameters; the
//! router dispatches it to a handler. Handlers never fail on missing
//! prerequisites or out-of-range input: they return
//! [`ModificationOutcome::unchanged`] with an explanation instead.
//! Store failures propagate.

pub mod goals;
pub mod injury;
pub mod philosophy;
pub mod physiology;
pub mod recovery_prefs;
pub mod sport_mix;
pub mod structure;
pub mod workout_mods;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::models::adaptation::ModificationOutcome;
use crate::models::athlete::{CoachingStyle, GoalRace, Sport};
use crate::models::plan::PhaseName;
use crate::models::workout::{Intensity, WorkoutType};
use crate::store::PlanStore;
use crate::EngineResult;

pub use injury::{BodyPart, InjurySeverity};

/// Whether an added race supersedes the plan's goal or slots in as a
/// secondary event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RacePriority {
    /// Goal race; the plan periodizes toward it
    A,
    /// Secondary race; gets a local taper, plan structure unchanged
    B,
}

/// A structured, already-parameter-extracted modification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModificationRequest {
    /// Replace one session with an easy session of another discipline
    SwapWorkout {
        /// Target workout
        workout_id: Uuid,
        /// Discipline to swap to
        new_type: WorkoutType,
    },
    /// Mark one session skipped
    SkipWorkout {
        /// Target workout
        workout_id: Uuid,
    },
    /// Move one session to another day
    RescheduleWorkout {
        /// Target workout
        workout_id: Uuid,
        /// Day to move it to
        new_date: NaiveDate,
    },
    /// Scale one session's volume down
    ReduceWorkoutVolume {
        /// Target workout
        workout_id: Uuid,
        /// Multiplicative factor in (0, 1)
        factor: f64,
    },
    /// Insert a rest day
    AddRestDay {
        /// Day to rest on
        date: NaiveDate,
    },
    /// Change one session's prescribed effort
    ModifyIntensity {
        /// Target workout
        workout_id: Uuid,
        /// New effort level
        intensity: Intensity,
    },
    /// Equipment-free travel window: pool and bike sessions become runs
    TravelWeek {
        /// First travel day
        start: NaiveDate,
        /// Last travel day
        end: NaiveDate,
    },
    /// Injury report driving the injury protocol
    ReportInjury {
        /// Where it hurts
        body_part: BodyPart,
        /// How bad it is
        severity: InjurySeverity,
    },
    /// Change the week-over-week overload step
    SetOverloadRate {
        /// New step, e.g. 0.05 for 5%/week
        rate: f64,
    },
    /// Change the weekly training budget
    SetWeeklyVolumeTarget {
        /// New budget in hours
        weekly_hours: f64,
    },
    /// Change the hard-session cap
    SetIntensityDistribution {
        /// Fraction of weekly sessions allowed to be hard
        hard_session_fraction: f64,
    },
    /// Favor or avoid a workout type when filling weeks
    SetWorkoutTypeMix {
        /// Type to favor
        #[serde(skip_serializing_if = "Option::is_none")]
        emphasize: Option<WorkoutType>,
        /// Type to avoid
        #[serde(skip_serializing_if = "Option::is_none")]
        deemphasize: Option<WorkoutType>,
    },
    /// Shift the multisport time split toward one discipline
    ShiftSportRatio {
        /// Discipline to shift toward (swim, bike, or run)
        discipline: WorkoutType,
        /// Share to add, e.g. 0.1 for ten points
        delta: f64,
    },
    /// Change brick frequency for multisport plans
    SetBrickFrequency {
        /// Bricks per week
        per_week: u32,
    },
    /// Emphasize the athlete's weakest discipline
    FocusDiscipline {
        /// Discipline to emphasize
        discipline: WorkoutType,
    },
    /// Resize one phase of the plan
    SetPhaseDuration {
        /// Phase to resize
        phase: PhaseName,
        /// New length in weeks
        weeks: u32,
    },
    /// Change which days of the week the athlete trains
    SetTrainingDays {
        /// New day set
        days: Vec<Weekday>,
    },
    /// One-off reduced week (travel, life load) without replanning
    ReduceWeek {
        /// Any day inside the week to reduce
        week_of: NaiveDate,
        /// Multiplicative factor in (0, 1)
        factor: f64,
    },
    /// New measured FTP
    UpdateFtp {
        /// Watts
        watts: u32,
    },
    /// New measured easy run pace
    UpdateRunPace {
        /// Seconds per km
        easy_pace_secs_per_km: f64,
    },
    /// New measured swim pace
    UpdateSwimPace {
        /// Seconds per 100m
        swim_pace_secs_per_100m: f64,
    },
    /// Add a race to the calendar
    AddRace {
        /// The race
        race: GoalRace,
        /// Goal race or secondary
        priority: RacePriority,
    },
    /// Change the goal race target time
    ChangeGoalTime {
        /// New target in seconds
        target_time_secs: u32,
    },
    /// Switch primary sport; cancels the active plan
    ChangeSport {
        /// New primary sport
        sport: Sport,
    },
    /// Change messaging and intervention aggressiveness
    SetCoachingStyle {
        /// New style
        style: CoachingStyle,
    },
    /// Retune the 1-5 recovery-approach axes
    SetRecoveryPhilosophy {
        /// Willingness to train through fatigue
        push_tolerance: u8,
        /// Reported recovery needs
        recovery_needs: u8,
    },
}

/// Dispatches modification requests to their handlers.
pub struct ModificationRouter<S: PlanStore> {
    store: S,
}

impl<S: PlanStore> ModificationRouter<S> {
    /// New router over a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Route one request to its handler. `today` anchors the
    /// handlers that reason about the current week or race proximity;
    /// callers pass the athlete's local date.
    pub async fn route(
        &self,
        athlete_id: Uuid,
        today: NaiveDate,
        request: ModificationRequest,
    ) -> EngineResult<ModificationOutcome> {
        let outcome = match request {
            ModificationRequest::SwapWorkout {
                workout_id,
                new_type,
            } => workout_mods::swap(&self.store, workout_id, new_type).await?,
            ModificationRequest::SkipWorkout { workout_id } => {
                workout_mods::skip(&self.store, workout_id).await?
            }
            ModificationRequest::RescheduleWorkout {
                workout_id,
                new_date,
            } => workout_mods::reschedule(&self.store, workout_id, new_date).await?,
            ModificationRequest::ReduceWorkoutVolume { workout_id, factor } => {
                workout_mods::reduce_volume(&self.store, workout_id, factor).await?
            }
            ModificationRequest::AddRestDay { date } => {
                workout_mods::add_rest_day(&self.store, athlete_id, date).await?
            }
            ModificationRequest::ModifyIntensity {
                workout_id,
                intensity,
            } => workout_mods::modify_intensity(&self.store, workout_id, intensity).await?,
            ModificationRequest::TravelWeek { start, end } => {
                workout_mods::travel_week(&self.store, athlete_id, start, end).await?
            }
            ModificationRequest::ReportInjury {
                body_part,
                severity,
            } => injury::report(&self.store, athlete_id, today, body_part, severity).await?,
            ModificationRequest::SetOverloadRate { rate } => {
                philosophy::set_overload_rate(&self.store, athlete_id, today, rate).await?
            }
            ModificationRequest::SetWeeklyVolumeTarget { weekly_hours } => {
                philosophy::set_weekly_volume(&self.store, athlete_id, today, weekly_hours).await?
            }
            ModificationRequest::SetIntensityDistribution {
                hard_session_fraction,
            } => {
                philosophy::set_intensity_distribution(
                    &self.store,
                    athlete_id,
                    hard_session_fraction,
                )
                .await?
            }
            ModificationRequest::SetWorkoutTypeMix {
                emphasize,
                deemphasize,
            } => {
                philosophy::set_workout_type_mix(&self.store, athlete_id, emphasize, deemphasize)
                    .await?
            }
            ModificationRequest::ShiftSportRatio { discipline, delta } => {
                sport_mix::shift_ratio(&self.store, athlete_id, discipline, delta).await?
            }
            ModificationRequest::SetBrickFrequency { per_week } => {
                sport_mix::set_brick_frequency(&self.store, athlete_id, per_week).await?
            }
            ModificationRequest::FocusDiscipline { discipline } => {
                sport_mix::focus_discipline(&self.store, athlete_id, discipline).await?
            }
            ModificationRequest::SetPhaseDuration { phase, weeks } => {
                structure::set_phase_duration(&self.store, athlete_id, today, phase, weeks).await?
            }
            ModificationRequest::SetTrainingDays { days } => {
                structure::set_training_days(&self.store, athlete_id, today, &days).await?
            }
            ModificationRequest::ReduceWeek { week_of, factor } => {
                structure::reduce_week(&self.store, athlete_id, week_of, factor).await?
            }
            ModificationRequest::UpdateFtp { watts } => {
                physiology::update_ftp(&self.store, athlete_id, watts).await?
            }
            ModificationRequest::UpdateRunPace {
                easy_pace_secs_per_km,
            } => physiology::update_run_pace(&self.store, athlete_id, easy_pace_secs_per_km).await?,
            ModificationRequest::UpdateSwimPace {
                swim_pace_secs_per_100m,
            } => {
                physiology::update_swim_pace(&self.store, athlete_id, swim_pace_secs_per_100m)
                    .await?
            }
            ModificationRequest::AddRace { race, priority } => {
                goals::add_race(&self.store, athlete_id, today, race, priority).await?
            }
            ModificationRequest::ChangeGoalTime { target_time_secs } => {
                goals::change_goal_time(&self.store, athlete_id, target_time_secs).await?
            }
            ModificationRequest::ChangeSport { sport } => {
                goals::change_sport(&self.store, athlete_id, sport).await?
            }
            ModificationRequest::SetCoachingStyle { style } => {
                recovery_prefs::set_coaching_style(&self.store, athlete_id, style).await?
            }
            ModificationRequest::SetRecoveryPhilosophy {
                push_tolerance,
                recovery_needs,
            } => {
                recovery_prefs::set_recovery_philosophy(
                    &self.store,
                    athlete_id,
                    push_tolerance,
                    recovery_needs,
                )
                .await?
            }
        };
        info!(
            %athlete_id,
            modified = outcome.modified,
            outcome = %outcome.description,
            "modification routed"
        );
        Ok(outcome)
    }
}
