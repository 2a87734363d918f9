// ABOUTME: Plan-structure handlers: phase resizing, day reassignment, one-off reduced weeks
// ABOUTME: Structural edits touch future weeks only; weeks already run stay as history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use chrono::{Duration, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use crate::models::adaptation::ModificationOutcome;
use crate::models::plan::{week_monday, PhaseName};
use crate::models::workout::{WorkoutPatch, WorkoutStatus, WorkoutType};
use crate::plan_builder::rebuild_weeks_from;
use crate::schedule::round_to_five_minutes;
use crate::store::PlanStore;
use crate::templates::normalize_days;
use crate::EngineResult;

const MAX_PHASE_WEEKS: u32 = 16;
const MIN_WEEK_REDUCTION_FACTOR: f64 = 0.3;

/// Resize one phase of the plan. Weeks already behind the athlete are
/// untouched; the phase table, week metadata, and plan end date are
/// recomputed from the resized phase forward.
pub async fn set_phase_duration<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    today: NaiveDate,
    phase: PhaseName,
    weeks: u32,
) -> EngineResult<ModificationOutcome> {
    if weeks == 0 || weeks > MAX_PHASE_WEEKS {
        return Ok(ModificationOutcome::unchanged(
            "Phase length must be between 1 and 16 weeks.",
        ));
    }
    let Some(mut plan) = store.get_active_plan(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No active plan."));
    };
    let Some(index) = plan.phases.iter().position(|p| p.name == phase) else {
        return Ok(ModificationOutcome::unchanged(format!(
            "This plan has no {} phase.",
            phase.as_str()
        )));
    };
    if plan.phases[index].weeks == weeks {
        return Ok(ModificationOutcome::unchanged(format!(
            "The {} phase is already {weeks} weeks.",
            phase.as_str()
        )));
    }
    let current_week = plan.position_on(today).map_or(0, |(week, _)| week);
    let phase_end = plan.phases[index].start_week + plan.phases[index].weeks - 1;
    if current_week > phase_end {
        return Ok(ModificationOutcome::unchanged(format!(
            "The {} phase is already behind you.",
            phase.as_str()
        )));
    }

    plan.phases[index].weeks = weeks;
    let mut next_start = plan.phases[index].start_week + weeks;
    for later in plan.phases.iter_mut().skip(index + 1) {
        later.start_week = next_start;
        next_start += later.weeks;
    }
    plan.ends_at = plan.starts_at + Duration::days(i64::from(plan.total_weeks()) * 7);
    let from_week = plan.phases[index].start_week.max(current_week + 1);
    let rebuilt = rebuild_weeks_from(&plan, from_week);
    plan.weeks = rebuilt;
    store.update_plan(&plan).await?;
    debug!(%athlete_id, phase = phase.as_str(), weeks, "phase resized");
    Ok(ModificationOutcome::applied(format!(
        "The {} phase is now {weeks} weeks; the plan runs to {}.",
        phase.as_str(),
        plan.ends_at
    )))
}

/// Change which days of the week the athlete trains. Future scheduled
/// sessions are moved onto the new days in calendar order; weeks with
/// more sessions than new days keep the overflow where it was.
pub async fn set_training_days<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    today: NaiveDate,
    days: &[chrono::Weekday],
) -> EngineResult<ModificationOutcome> {
    if days.is_empty() {
        return Ok(ModificationOutcome::unchanged(
            "At least one training day is needed.",
        ));
    }
    let Some(mut plan) = store.get_active_plan(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No active plan."));
    };
    let normalized = normalize_days(days);
    if normalized == plan.training_days {
        return Ok(ModificationOutcome::unchanged(
            "Those are already the training days.",
        ));
    }
    plan.training_days.clone_from(&normalized);
    store.update_plan(&plan).await?;
    if let Some(mut profile) = store.get_profile(athlete_id).await? {
        profile.training_days.clone_from(&normalized);
        store.update_profile(&profile).await?;
    }

    let next_week = plan.position_on(today).map_or(1, |(week, _)| week + 1);
    let mut moved = 0;
    for week in next_week..=plan.total_weeks() {
        let monday = plan.week_start(week);
        let sunday = monday + Duration::days(6);
        let in_week: Vec<_> = store
            .list_workouts(athlete_id, monday, sunday)
            .await?
            .into_iter()
            .filter(|w| w.status == WorkoutStatus::Scheduled)
            .filter(|w| w.workout_type != WorkoutType::Rest)
            .collect();
        for (workout, day) in in_week.iter().zip(normalized.iter()) {
            let new_date = monday + Duration::days(i64::from(day.num_days_from_monday()));
            if new_date == workout.scheduled_date {
                continue;
            }
            let patch = WorkoutPatch {
                scheduled_date: Some(new_date),
                ..WorkoutPatch::default()
            };
            store.update_workout(workout.id, &patch).await?;
            moved += 1;
        }
    }
    debug!(%athlete_id, moved, "training days reassigned");
    Ok(ModificationOutcome::applied(format!(
        "Training days updated; {moved} upcoming sessions moved."
    )))
}

/// One-off reduced week without touching the plan structure.
pub async fn reduce_week<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    week_of: NaiveDate,
    factor: f64,
) -> EngineResult<ModificationOutcome> {
    if !(MIN_WEEK_REDUCTION_FACTOR..1.0).contains(&factor) {
        return Ok(ModificationOutcome::unchanged(
            "Reduction factor must be between 0.3 and 1.0.",
        ));
    }
    let monday = week_monday(week_of);
    let sunday = monday + Duration::days(6);
    let workouts = store.list_workouts(athlete_id, monday, sunday).await?;
    let mut touched = 0;
    for workout in workouts
        .iter()
        .filter(|w| w.status == WorkoutStatus::Scheduled)
        .filter(|w| w.workout_type != WorkoutType::Rest)
    {
        let patch = WorkoutPatch {
            duration_minutes: Some(
                round_to_five_minutes(workout.duration_minutes * factor)
                    .max(crate::constants::overload::DURATION_ROUNDING_MINUTES),
            ),
            distance_meters: Some(workout.distance_meters.map(|d| d * factor)),
            append_note: Some(format!("week of {monday} reduced on request")),
            ..WorkoutPatch::default()
        };
        store.update_workout(workout.id, &patch).await?;
        touched += 1;
    }
    if touched == 0 {
        return Ok(ModificationOutcome::unchanged(
            "Nothing scheduled that week to reduce.",
        ));
    }
    Ok(ModificationOutcome::applied(format!(
        "Reduced {touched} sessions in the week of {monday} by {:.0}%.",
        (1.0 - factor) * 100.0
    )))
}
