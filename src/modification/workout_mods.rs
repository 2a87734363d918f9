// ABOUTME: Workout-level modification handlers: swap, skip, reschedule, reduce, rest, travel
// ABOUTME: All mutate single sessions or a date window, never the plan structure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use chrono::NaiveDate;
use uuid::Uuid;

use crate::adaptation::execute_actions;
use crate::models::adaptation::{AdaptationAction, AdaptationResult, ModificationOutcome};
use crate::models::workout::{Intensity, Workout, WorkoutPatch, WorkoutStatus, WorkoutType};
use crate::schedule::round_to_five_minutes;
use crate::store::PlanStore;
use crate::EngineResult;

/// Bounds for an athlete-requested volume reduction.
const MIN_REDUCTION_FACTOR: f64 = 0.3;

const TRAVEL_VOLUME_FACTOR: f64 = 0.8;

async fn scheduled_workout<S: PlanStore>(
    store: &S,
    workout_id: Uuid,
) -> EngineResult<Result<Workout, ModificationOutcome>> {
    match store.get_workout(workout_id).await? {
        None => Ok(Err(ModificationOutcome::unchanged(
            "That workout no longer exists.",
        ))),
        Some(w) if w.status != WorkoutStatus::Scheduled => Ok(Err(
            ModificationOutcome::unchanged("That workout is already completed or skipped."),
        )),
        Some(w) => Ok(Ok(w)),
    }
}

fn easy_title(workout_type: WorkoutType) -> &'static str {
    match workout_type {
        WorkoutType::Run => "Easy Run",
        WorkoutType::Bike => "Easy Ride",
        WorkoutType::Swim => "Easy Swim",
        WorkoutType::Brick => "Easy Brick",
        WorkoutType::Strength => "Light Strength",
        WorkoutType::Rest => "Rest Day",
    }
}

/// Replace one session with an easy session of another discipline.
pub async fn swap<S: PlanStore>(
    store: &S,
    workout_id: Uuid,
    new_type: WorkoutType,
) -> EngineResult<ModificationOutcome> {
    let workout = match scheduled_workout(store, workout_id).await? {
        Ok(w) => w,
        Err(outcome) => return Ok(outcome),
    };
    let patch = WorkoutPatch {
        workout_type: Some(new_type),
        title: Some(easy_title(new_type).to_owned()),
        description: Some(format!(
            "{}min {} at easy effort, swapped in on request.",
            workout.duration_minutes as u32,
            new_type.as_str()
        )),
        intensity: Some(Intensity::Easy),
        target_zone: Some(None),
        distance_meters: Some(None),
        append_note: Some(format!(
            "swapped from {} on request",
            workout.workout_type.as_str()
        )),
        ..WorkoutPatch::default()
    };
    store.update_workout(workout_id, &patch).await?;
    Ok(ModificationOutcome::applied(format!(
        "Swapped {} to an easy {} session.",
        workout.title,
        new_type.as_str()
    )))
}

/// Mark one session skipped.
pub async fn skip<S: PlanStore>(store: &S, workout_id: Uuid) -> EngineResult<ModificationOutcome> {
    let workout = match scheduled_workout(store, workout_id).await? {
        Ok(w) => w,
        Err(outcome) => return Ok(outcome),
    };
    let patch = WorkoutPatch {
        status: Some(WorkoutStatus::Skipped),
        append_note: Some("skipped on request".to_owned()),
        ..WorkoutPatch::default()
    };
    store.update_workout(workout_id, &patch).await?;
    Ok(ModificationOutcome::applied(format!(
        "Skipped {}. No problem, pick it up next time.",
        workout.title
    )))
}

/// Move one session to another day.
pub async fn reschedule<S: PlanStore>(
    store: &S,
    workout_id: Uuid,
    new_date: NaiveDate,
) -> EngineResult<ModificationOutcome> {
    let workout = match scheduled_workout(store, workout_id).await? {
        Ok(w) => w,
        Err(outcome) => return Ok(outcome),
    };
    if new_date == workout.scheduled_date {
        return Ok(ModificationOutcome::unchanged(
            "That workout is already on that day.",
        ));
    }
    let patch = WorkoutPatch {
        scheduled_date: Some(new_date),
        append_note: Some(format!("moved from {} on request", workout.scheduled_date)),
        ..WorkoutPatch::default()
    };
    store.update_workout(workout_id, &patch).await?;
    Ok(ModificationOutcome::applied(format!(
        "Moved {} to {new_date}.",
        workout.title
    )))
}

/// Scale one session's volume down.
pub async fn reduce_volume<S: PlanStore>(
    store: &S,
    workout_id: Uuid,
    factor: f64,
) -> EngineResult<ModificationOutcome> {
    if !(MIN_REDUCTION_FACTOR..1.0).contains(&factor) {
        return Ok(ModificationOutcome::unchanged(
            "Reduction factor must be between 0.3 and 1.0.",
        ));
    }
    let workout = match scheduled_workout(store, workout_id).await? {
        Ok(w) => w,
        Err(outcome) => return Ok(outcome),
    };
    let patch = WorkoutPatch {
        duration_minutes: Some(
            round_to_five_minutes(workout.duration_minutes * factor)
                .max(crate::constants::overload::DURATION_ROUNDING_MINUTES),
        ),
        distance_meters: Some(workout.distance_meters.map(|d| d * factor)),
        append_note: Some("volume reduced on request".to_owned()),
        ..WorkoutPatch::default()
    };
    store.update_workout(workout_id, &patch).await?;
    Ok(ModificationOutcome::applied(format!(
        "Reduced {} by {:.0}%.",
        workout.title,
        (1.0 - factor) * 100.0
    )))
}

/// Insert a rest day, delegating to the action executor so the
/// duplicate-rest-day check lives in one place.
pub async fn add_rest_day<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    date: NaiveDate,
) -> EngineResult<ModificationOutcome> {
    if store.get_active_plan(athlete_id).await?.is_none() {
        return Ok(ModificationOutcome::unchanged(
            "No active plan to add a rest day to.",
        ));
    }
    let result = AdaptationResult {
        actions: vec![AdaptationAction::AddRestDay {
            date,
            reason: "rest day added on request".to_owned(),
        }],
        message: None,
    };
    let applied = execute_actions(store, athlete_id, &result).await?;
    if applied == 0 {
        return Ok(ModificationOutcome::unchanged(format!(
            "{date} already has a rest day."
        )));
    }
    Ok(ModificationOutcome::applied(format!(
        "Added a rest day on {date}."
    )))
}

/// Change one session's prescribed effort.
pub async fn modify_intensity<S: PlanStore>(
    store: &S,
    workout_id: Uuid,
    intensity: Intensity,
) -> EngineResult<ModificationOutcome> {
    let workout = match scheduled_workout(store, workout_id).await? {
        Ok(w) => w,
        Err(outcome) => return Ok(outcome),
    };
    if workout.intensity == intensity {
        return Ok(ModificationOutcome::unchanged(
            "That workout is already at that intensity.",
        ));
    }
    let patch = WorkoutPatch {
        intensity: Some(intensity),
        // Outdated pace/power targets are worse than none.
        target_zone: Some(None),
        append_note: Some(format!(
            "intensity changed from {} on request",
            workout.intensity.as_str()
        )),
        ..WorkoutPatch::default()
    };
    store.update_workout(workout_id, &patch).await?;
    Ok(ModificationOutcome::applied(format!(
        "Changed {} to {} intensity.",
        workout.title,
        intensity.as_str()
    )))
}

/// Equipment-free travel window: pool and bike sessions become easy
/// runs at slightly reduced volume; runs and strength stay.
pub async fn travel_week<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<ModificationOutcome> {
    if end < start {
        return Ok(ModificationOutcome::unchanged(
            "Travel window end is before its start.",
        ));
    }
    let workouts = store.list_workouts(athlete_id, start, end).await?;
    let actions: Vec<AdaptationAction> = workouts
        .iter()
        .filter(|w| w.status == WorkoutStatus::Scheduled)
        .filter(|w| {
            matches!(
                w.workout_type,
                WorkoutType::Swim | WorkoutType::Bike | WorkoutType::Brick
            )
        })
        .map(|w| {
            let duration = round_to_five_minutes(w.duration_minutes * TRAVEL_VOLUME_FACTOR)
                .max(crate::constants::overload::DURATION_ROUNDING_MINUTES);
            AdaptationAction::SwapWorkout {
                workout_id: w.id,
                changes: WorkoutPatch {
                    workout_type: Some(WorkoutType::Run),
                    title: Some("Easy Run".to_owned()),
                    description: Some(format!(
                        "{}min easy run, no equipment needed.",
                        duration as u32
                    )),
                    intensity: Some(Intensity::Easy),
                    duration_minutes: Some(duration),
                    distance_meters: Some(None),
                    target_zone: Some(None),
                    ..WorkoutPatch::default()
                },
                reason: format!("travel {start} to {end}: no pool or bike access"),
            }
        })
        .collect();
    if actions.is_empty() {
        return Ok(ModificationOutcome::unchanged(
            "Nothing in that window needs equipment. Enjoy the trip.",
        ));
    }
    let count = actions.len();
    let result = AdaptationResult {
        actions,
        message: None,
    };
    execute_actions(store, athlete_id, &result).await?;
    Ok(ModificationOutcome::applied(format!(
        "Converted {count} equipment-dependent sessions to easy runs for your trip."
    )))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::store::InMemoryStore;

    fn workout(athlete_id: Uuid, day: u32, workout_type: WorkoutType) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            athlete_id,
            scheduled_date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
            workout_type,
            title: "Threshold Session".into(),
            description: String::new(),
            duration_minutes: 60.0,
            distance_meters: Some(1500.0),
            intensity: Intensity::Hard,
            status: WorkoutStatus::Scheduled,
            target_zone: None,
            coach_notes: String::new(),
            actual_duration_minutes: None,
            actual_distance_meters: None,
        }
    }

    #[tokio::test]
    async fn test_swap_changes_type_and_softens_intensity() {
        let store = InMemoryStore::new();
        let athlete = Uuid::new_v4();
        let w = workout(athlete, 10, WorkoutType::Run);
        store.upsert_workouts(&[w.clone()]).await.unwrap();

        let outcome = swap(&store, w.id, WorkoutType::Bike).await.unwrap();
        assert!(outcome.modified);
        let updated = store.get_workout(w.id).await.unwrap().unwrap();
        assert_eq!(updated.workout_type, WorkoutType::Bike);
        assert_eq!(updated.intensity, Intensity::Easy);
    }

    #[tokio::test]
    async fn test_reduce_volume_rejects_out_of_range_factor() {
        let store = InMemoryStore::new();
        let athlete = Uuid::new_v4();
        let w = workout(athlete, 10, WorkoutType::Run);
        store.upsert_workouts(&[w.clone()]).await.unwrap();

        let outcome = reduce_volume(&store, w.id, 1.2).await.unwrap();
        assert!(!outcome.modified);
        let unchanged = store.get_workout(w.id).await.unwrap().unwrap();
        assert!((unchanged.duration_minutes - 60.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_travel_week_converts_swim_and_bike_only() {
        let store = InMemoryStore::new();
        let athlete = Uuid::new_v4();
        let swim = workout(athlete, 10, WorkoutType::Swim);
        let bike = workout(athlete, 11, WorkoutType::Bike);
        let run = workout(athlete, 12, WorkoutType::Run);
        store
            .upsert_workouts(&[swim.clone(), bike.clone(), run.clone()])
            .await
            .unwrap();

        let start = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 8, 16).unwrap();
        let outcome = travel_week(&store, athlete, start, end).await.unwrap();
        assert!(outcome.modified);

        assert_eq!(
            store
                .get_workout(swim.id)
                .await
                .unwrap()
                .unwrap()
                .workout_type,
            WorkoutType::Run
        );
        assert_eq!(
            store
                .get_workout(bike.id)
                .await
                .unwrap()
                .unwrap()
                .workout_type,
            WorkoutType::Run
        );
        let run_after = store.get_workout(run.id).await.unwrap().unwrap();
        assert_eq!(run_after.title, "Threshold Session");
    }

    #[tokio::test]
    async fn test_skip_is_rejected_for_completed_workouts() {
        let store = InMemoryStore::new();
        let athlete = Uuid::new_v4();
        let mut w = workout(athlete, 10, WorkoutType::Run);
        w.status = WorkoutStatus::Completed;
        store.upsert_workouts(&[w.clone()]).await.unwrap();

        let outcome = skip(&store, w.id).await.unwrap();
        assert!(!outcome.modified);
    }
}
