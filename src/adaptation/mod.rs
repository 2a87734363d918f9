// ABOUTME: Adaptation engine: recovery, performance and missed-workout rule sets
// ABOUTME: Rules are pure decision functions; the service loads context and executes actions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

//! Rule-driven plan adaptation.
//!
//! Three triggers feed the engine: a new recovery snapshot, a workout
//! completion, and the daily missed-workout sweep. Each rule set is a
//! pure function from loaded context to an [`AdaptationResult`], a
//! batch of actions plus an optional athlete message. The service
//! loads the context, runs the rules, and hands the batch to the
//! executor, which applies it idempotently.

pub mod executor;
pub mod missed;
pub mod performance;
pub mod recovery;

use chrono::{Duration, NaiveDate};
use tracing::info;
use uuid::Uuid;

use crate::constants::{performance as perf, recovery as rc};
use crate::models::adaptation::AdaptationResult;
use crate::models::athlete::CoachingStyle;
use crate::models::plan::week_monday;
use crate::models::recovery::RecoverySnapshot;
use crate::models::workout::WorkoutStatus;
use crate::store::PlanStore;
use crate::{EngineError, EngineResult};

pub use executor::execute_actions;
pub use missed::missed_workout_actions;
pub use performance::{duration_diff_pct, performance_actions, REDUCTION_NOTE};
pub use recovery::recovery_actions;

/// Orchestrates the three adaptation triggers over a store.
pub struct AdaptationService<S: PlanStore> {
    store: S,
}

impl<S: PlanStore> AdaptationService<S> {
    /// New service over a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    async fn coaching_style(&self, athlete_id: Uuid) -> EngineResult<CoachingStyle> {
        let profile = self.store.get_profile(athlete_id).await?;
        Ok(profile.map_or(CoachingStyle::Balanced, |p| p.coaching_style))
    }

    /// React to a fresh recovery snapshot: runs the recovery rules
    /// over the snapshot day and the day after, applies the resulting
    /// actions, and returns the batch.
    pub async fn adapt_for_recovery(
        &self,
        snapshot: &RecoverySnapshot,
    ) -> EngineResult<AdaptationResult> {
        let style = self.coaching_style(snapshot.athlete_id).await?;
        let window_end = snapshot.date + Duration::days(rc::INTERVENTION_WINDOW_DAYS - 1);
        let upcoming = self
            .store
            .list_workouts(snapshot.athlete_id, snapshot.date, window_end)
            .await?;
        let result = recovery_actions(style, snapshot, &upcoming);
        let applied = execute_actions(&self.store, snapshot.athlete_id, &result).await?;
        info!(
            athlete_id = %snapshot.athlete_id,
            score = snapshot.recovery_score,
            applied,
            "recovery adaptation complete"
        );
        Ok(result)
    }

    /// Record a completion (actuals plus the status transition), then
    /// run the performance rules against the trailing completed
    /// history and the forward schedule.
    pub async fn adapt_after_workout(
        &self,
        workout_id: Uuid,
        actual_duration_minutes: f64,
        actual_distance_meters: Option<f64>,
    ) -> EngineResult<AdaptationResult> {
        let Some(workout) = self.store.get_workout(workout_id).await? else {
            return Err(EngineError::Invariant {
                context: format!("completion recorded for unknown workout {workout_id}"),
            });
        };
        let mut completed = workout;
        completed.status = completed.status.transition_to(WorkoutStatus::Completed)?;
        completed.actual_duration_minutes = Some(actual_duration_minutes);
        completed.actual_distance_meters = actual_distance_meters;
        self.store.upsert_workouts(std::slice::from_ref(&completed)).await?;

        let style = self.coaching_style(completed.athlete_id).await?;
        let scan_start =
            completed.scheduled_date - Duration::days(perf::OVERPERFORM_SCAN_DAYS - 1);
        let recent = self
            .store
            .list_workouts(completed.athlete_id, scan_start, completed.scheduled_date)
            .await?;
        let upcoming = self
            .store
            .list_workouts(
                completed.athlete_id,
                completed.scheduled_date + Duration::days(1),
                completed.scheduled_date + Duration::days(14),
            )
            .await?;
        let recovery_score = self
            .store
            .latest_recovery(completed.athlete_id)
            .await?
            .map(|s| s.recovery_score);

        let result = performance_actions(style, &completed, recovery_score, &recent, &upcoming);
        let applied = execute_actions(&self.store, completed.athlete_id, &result).await?;
        info!(
            athlete_id = %completed.athlete_id,
            %workout_id,
            applied,
            "performance adaptation complete"
        );
        Ok(result)
    }

    /// Daily sweep over yesterday's schedule: reschedule or skip
    /// missed sessions, and cut next week when the current one has
    /// fallen apart.
    pub async fn handle_missed_workouts(
        &self,
        athlete_id: Uuid,
        today: NaiveDate,
    ) -> EngineResult<AdaptationResult> {
        let style = self.coaching_style(athlete_id).await?;
        let yesterday = today - Duration::days(1);
        let from = week_monday(yesterday);
        let to = from + Duration::days(13);
        let workouts = self.store.list_workouts(athlete_id, from, to).await?;
        let result = missed_workout_actions(style, today, &workouts);
        let applied = execute_actions(&self.store, athlete_id, &result).await?;
        info!(%athlete_id, %today, applied, "missed-workout sweep complete");
        Ok(result)
    }
}
