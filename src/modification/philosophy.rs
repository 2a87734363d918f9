// ABOUTME: Training-philosophy handlers: overload rate, volume target, intensity mix
// ABOUTME: Tuning changes rebuild future week metadata and rescale already-materialized weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use crate::models::adaptation::ModificationOutcome;
use crate::models::plan::TrainingPlan;
use crate::models::workout::{WorkoutPatch, WorkoutStatus, WorkoutType};
use crate::plan_builder::rebuild_weeks_from;
use crate::schedule::round_to_five_minutes;
use crate::store::PlanStore;
use crate::EngineResult;

const MAX_OVERLOAD_RATE: f64 = 0.15;
const MIN_WEEKLY_HOURS: f64 = 1.0;
const MAX_WEEKLY_HOURS: f64 = 40.0;
const MAX_HARD_FRACTION: f64 = 0.8;

/// First week that may still be reshaped: the one after the week
/// containing `today` (the current week is already in motion).
fn first_malleable_week(plan: &TrainingPlan, today: NaiveDate) -> u32 {
    plan.position_on(today).map_or(1, |(week, _)| week + 1)
}

/// Rescale scheduled workouts from `from_week` on by per-week factors.
async fn rescale_future_workouts<S: PlanStore>(
    store: &S,
    plan: &TrainingPlan,
    from_week: u32,
    factor_for_week: &HashMap<u32, f64>,
) -> EngineResult<usize> {
    let from = plan.week_start(from_week);
    let to = plan.ends_at + Duration::days(7);
    let workouts = store.list_workouts(plan.athlete_id, from, to).await?;
    let mut touched = 0;
    for workout in workouts
        .iter()
        .filter(|w| w.status == WorkoutStatus::Scheduled)
        .filter(|w| w.workout_type != WorkoutType::Rest)
    {
        let Some((week, _)) = plan.position_on(workout.scheduled_date) else {
            continue;
        };
        let Some(&factor) = factor_for_week.get(&week) else {
            continue;
        };
        if (factor - 1.0).abs() < 1e-9 {
            continue;
        }
        let patch = WorkoutPatch {
            duration_minutes: Some(
                round_to_five_minutes(workout.duration_minutes * factor)
                    .max(crate::constants::overload::DURATION_ROUNDING_MINUTES),
            ),
            distance_meters: Some(workout.distance_meters.map(|d| d * factor)),
            ..WorkoutPatch::default()
        };
        store.update_workout(workout.id, &patch).await?;
        touched += 1;
    }
    Ok(touched)
}

/// Change the week-over-week overload step for future load weeks.
pub async fn set_overload_rate<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    today: NaiveDate,
    rate: f64,
) -> EngineResult<ModificationOutcome> {
    if !(0.0..=MAX_OVERLOAD_RATE).contains(&rate) {
        return Ok(ModificationOutcome::unchanged(
            "Overload rate must be between 0% and 15% per week.",
        ));
    }
    let Some(mut plan) = store.get_active_plan(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No active plan."));
    };
    if (plan.tuning.overload_rate - rate).abs() < 1e-9 {
        return Ok(ModificationOutcome::unchanged(
            "The plan already progresses at that rate.",
        ));
    }

    let from_week = first_malleable_week(&plan, today);
    let old_multipliers: HashMap<u32, f64> = plan
        .weeks
        .iter()
        .map(|w| (w.week_number, w.volume_multiplier))
        .collect();
    plan.tuning.overload_rate = rate;
    let rebuilt = rebuild_weeks_from(&plan, from_week);
    plan.weeks = rebuilt;
    let factors: HashMap<u32, f64> = plan
        .weeks
        .iter()
        .filter(|w| w.week_number >= from_week)
        .filter_map(|w| {
            old_multipliers
                .get(&w.week_number)
                .map(|old| (w.week_number, w.volume_multiplier / old))
        })
        .collect();
    store.update_plan(&plan).await?;
    let touched = rescale_future_workouts(store, &plan, from_week, &factors).await?;
    debug!(%athlete_id, rate, touched, "overload rate changed");
    Ok(ModificationOutcome::applied(format!(
        "Weekly progression set to {:.0}% per load week from next week.",
        rate * 100.0
    )))
}

/// Change the weekly training budget.
pub async fn set_weekly_volume<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    today: NaiveDate,
    weekly_hours: f64,
) -> EngineResult<ModificationOutcome> {
    if !(MIN_WEEKLY_HOURS..=MAX_WEEKLY_HOURS).contains(&weekly_hours) {
        return Ok(ModificationOutcome::unchanged(
            "Weekly hours must be between 1 and 40.",
        ));
    }
    let Some(mut plan) = store.get_active_plan(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No active plan."));
    };
    let new_minutes = weekly_hours * 60.0;
    if (plan.weekly_minutes - new_minutes).abs() < 1e-9 {
        return Ok(ModificationOutcome::unchanged(
            "The plan is already built on that volume.",
        ));
    }
    let ratio = new_minutes / plan.weekly_minutes;
    plan.weekly_minutes = new_minutes;
    store.update_plan(&plan).await?;

    if let Some(mut profile) = store.get_profile(athlete_id).await? {
        profile.weekly_hours = weekly_hours;
        store.update_profile(&profile).await?;
    }

    let from_week = first_malleable_week(&plan, today);
    let factors: HashMap<u32, f64> = plan
        .weeks
        .iter()
        .filter(|w| w.week_number >= from_week)
        .map(|w| (w.week_number, ratio))
        .collect();
    let touched = rescale_future_workouts(store, &plan, from_week, &factors).await?;
    debug!(%athlete_id, weekly_hours, touched, "weekly volume changed");
    Ok(ModificationOutcome::applied(format!(
        "Weekly volume set to {weekly_hours:.1} hours from next week."
    )))
}

/// Change the hard-session cap applied when weeks are filled.
pub async fn set_intensity_distribution<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    hard_session_fraction: f64,
) -> EngineResult<ModificationOutcome> {
    if !(0.0..=MAX_HARD_FRACTION).contains(&hard_session_fraction) {
        return Ok(ModificationOutcome::unchanged(
            "Hard-session fraction must be between 0 and 0.8.",
        ));
    }
    let Some(mut plan) = store.get_active_plan(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No active plan."));
    };
    plan.tuning.hard_session_fraction = hard_session_fraction;
    store.update_plan(&plan).await?;
    Ok(ModificationOutcome::applied(format!(
        "Up to {:.0}% of weekly sessions will be hard, starting with the next generated week.",
        hard_session_fraction * 100.0
    )))
}

/// Favor or avoid a workout type when future weeks are filled.
pub async fn set_workout_type_mix<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    emphasize: Option<WorkoutType>,
    deemphasize: Option<WorkoutType>,
) -> EngineResult<ModificationOutcome> {
    if emphasize.is_none() && deemphasize.is_none() {
        return Ok(ModificationOutcome::unchanged(
            "Nothing to change in the workout mix.",
        ));
    }
    if emphasize.is_some() && emphasize == deemphasize {
        return Ok(ModificationOutcome::unchanged(
            "Cannot both favor and avoid the same workout type.",
        ));
    }
    let Some(mut plan) = store.get_active_plan(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No active plan."));
    };
    if let Some(t) = emphasize {
        plan.tuning.emphasized_type = Some(t);
    }
    if let Some(t) = deemphasize {
        plan.tuning.deemphasized_type = Some(t);
    }
    store.update_plan(&plan).await?;
    let mut parts = Vec::new();
    if let Some(t) = emphasize {
        parts.push(format!("more {}", t.as_str()));
    }
    if let Some(t) = deemphasize {
        parts.push(format!("less {}", t.as_str()));
    }
    Ok(ModificationOutcome::applied(format!(
        "Workout mix updated: {}.",
        parts.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::store::InMemoryStore;

    fn day_one() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_overload_rate_out_of_range_is_rejected() {
        let store = InMemoryStore::new();
        let outcome = set_overload_rate(&store, Uuid::new_v4(), day_one(), 0.5)
            .await
            .unwrap();
        assert!(!outcome.modified);
    }

    #[tokio::test]
    async fn test_handlers_are_no_ops_without_a_plan() {
        let store = InMemoryStore::new();
        let athlete = Uuid::new_v4();
        assert!(!set_overload_rate(&store, athlete, day_one(), 0.05)
            .await
            .unwrap()
            .modified);
        assert!(!set_weekly_volume(&store, athlete, day_one(), 8.0)
            .await
            .unwrap()
            .modified);
        assert!(!set_intensity_distribution(&store, athlete, 0.4)
            .await
            .unwrap()
            .modified);
        assert!(!set_workout_type_mix(&store, athlete, Some(WorkoutType::Bike), None)
            .await
            .unwrap()
            .modified);
    }

    #[tokio::test]
    async fn test_type_mix_rejects_conflicting_request() {
        let store = InMemoryStore::new();
        let outcome = set_workout_type_mix(
            &store,
            Uuid::new_v4(),
            Some(WorkoutType::Run),
            Some(WorkoutType::Run),
        )
        .await
        .unwrap();
        assert!(!outcome.modified);
    }
}
