// ABOUTME: Applies a batch of adaptation actions against the plan store
// ABOUTME: Idempotent: re-executing a batch after a partial failure never double-applies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::adaptation::{AdaptationAction, AdaptationResult};
use crate::models::workout::{
    Intensity, Workout, WorkoutPatch, WorkoutStatus, WorkoutType,
};
use crate::schedule::round_to_five_minutes;
use crate::store::PlanStore;
use crate::{EngineError, EngineResult};

/// Apply every action in `result` to the store. Returns the number of
/// actions that changed state.
///
/// Each action records its reason in the target's coach notes; a
/// target already carrying the note, or a skip target no longer in
/// `Scheduled`, is treated as applied and passed over. Vanished
/// workouts are logged and skipped rather than failing the batch.
pub async fn execute_actions<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    result: &AdaptationResult,
) -> EngineResult<usize> {
    let mut applied = 0;
    for action in &result.actions {
        if apply_action(store, athlete_id, action).await? {
            applied += 1;
        }
    }
    debug!(%athlete_id, total = result.actions.len(), applied, "action batch executed");
    Ok(applied)
}

async fn apply_action<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    action: &AdaptationAction,
) -> EngineResult<bool> {
    match action {
        AdaptationAction::ModifyWorkout {
            workout_id,
            changes,
            reason,
        }
        | AdaptationAction::SwapWorkout {
            workout_id,
            changes,
            reason,
        } => {
            let Some(current) = fetch(store, *workout_id).await? else {
                return Ok(false);
            };
            if current.coach_notes.contains(reason.as_str()) {
                return Ok(false);
            }
            let mut patch = changes.clone();
            patch.append_note = Some(reason.clone());
            store.update_workout(*workout_id, &patch).await?;
            Ok(true)
        }
        AdaptationAction::SkipWorkout { workout_id, reason } => {
            let Some(current) = fetch(store, *workout_id).await? else {
                return Ok(false);
            };
            if current.status != WorkoutStatus::Scheduled {
                return Ok(false);
            }
            let patch = WorkoutPatch {
                status: Some(WorkoutStatus::Skipped),
                append_note: Some(reason.clone()),
                ..WorkoutPatch::default()
            };
            store.update_workout(*workout_id, &patch).await?;
            Ok(true)
        }
        AdaptationAction::AdjustVolume {
            workout_id,
            factor,
            reason,
        } => {
            let Some(current) = fetch(store, *workout_id).await? else {
                return Ok(false);
            };
            if current.coach_notes.contains(reason.as_str()) {
                return Ok(false);
            }
            let duration = round_to_five_minutes(current.duration_minutes * factor)
                .max(crate::constants::overload::DURATION_ROUNDING_MINUTES);
            let patch = WorkoutPatch {
                duration_minutes: Some(duration),
                distance_meters: Some(current.distance_meters.map(|d| d * factor)),
                append_note: Some(reason.clone()),
                ..WorkoutPatch::default()
            };
            store.update_workout(*workout_id, &patch).await?;
            Ok(true)
        }
        AdaptationAction::AddRestDay { date, reason } => {
            let on_day = store.list_workouts(athlete_id, *date, *date).await?;
            if on_day.iter().any(|w| w.workout_type == WorkoutType::Rest) {
                return Ok(false);
            }
            let Some(plan) = store.get_active_plan(athlete_id).await? else {
                return Err(EngineError::Invariant {
                    context: "rest day requested with no active plan".to_owned(),
                });
            };
            let rest = Workout {
                id: Uuid::new_v4(),
                plan_id: plan.id,
                athlete_id,
                scheduled_date: *date,
                workout_type: WorkoutType::Rest,
                title: "Rest Day".to_owned(),
                description: "Full rest. Light stretching is fine.".to_owned(),
                duration_minutes: 0.0,
                distance_meters: None,
                intensity: Intensity::Easy,
                status: WorkoutStatus::Scheduled,
                target_zone: None,
                coach_notes: reason.clone(),
                actual_duration_minutes: None,
                actual_distance_meters: None,
            };
            store.upsert_workouts(std::slice::from_ref(&rest)).await?;
            Ok(true)
        }
    }
}

async fn fetch<S: PlanStore>(store: &S, workout_id: Uuid) -> EngineResult<Option<Workout>> {
    let found = store.get_workout(workout_id).await?;
    if found.is_none() {
        warn!(%workout_id, "action target no longer exists, skipping");
    }
    Ok(found)
}
