// ABOUTME: Race and goal handlers: add race, change goal time, change sport
// ABOUTME: An A-race repoints the periodization; a B-race gets a local taper only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use chrono::{Duration, NaiveDate};
use tracing::info;
use uuid::Uuid;

use super::RacePriority;
use crate::adaptation::execute_actions;
use crate::models::adaptation::{AdaptationAction, AdaptationResult, ModificationOutcome};
use crate::models::athlete::{GoalRace, Sport};
use crate::models::workout::{Intensity, WorkoutPatch, WorkoutStatus, WorkoutType};
use crate::phases::calculate_phases;
use crate::plan_builder::rebuild_weeks_from;
use crate::schedule::round_to_five_minutes;
use crate::store::PlanStore;
use crate::EngineResult;

/// Days before a B-race that get the local taper treatment.
const B_RACE_TAPER_DAYS: i64 = 6;
const B_RACE_VOLUME_FACTOR: f64 = 0.6;

/// Add a race. A-priority repoints the plan's periodization at the new
/// date; B-priority leaves the plan alone and tapers the days leading
/// into the race.
pub async fn add_race<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    today: NaiveDate,
    race: GoalRace,
    priority: RacePriority,
) -> EngineResult<ModificationOutcome> {
    if race.date <= today {
        return Ok(ModificationOutcome::unchanged(
            "That race date is already behind us.",
        ));
    }
    match priority {
        RacePriority::A => add_goal_race(store, athlete_id, today, race).await,
        RacePriority::B => add_secondary_race(store, athlete_id, race).await,
    }
}

async fn add_goal_race<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    today: NaiveDate,
    race: GoalRace,
) -> EngineResult<ModificationOutcome> {
    if let Some(mut profile) = store.get_profile(athlete_id).await? {
        profile.goal_race = Some(race);
        store.update_profile(&profile).await?;
    }
    let Some(mut plan) = store.get_active_plan(athlete_id).await? else {
        return Ok(ModificationOutcome::applied(
            "Goal race saved. Generate a plan to start training toward it.",
        ));
    };
    if race.date <= plan.starts_at {
        return Ok(ModificationOutcome::unchanged(
            "That race is before the plan even starts.",
        ));
    }
    plan.phases = calculate_phases(plan.starts_at, Some(race.date));
    plan.ends_at = plan.starts_at + Duration::days(i64::from(plan.total_weeks()) * 7);
    let from_week = plan.position_on(today).map_or(1, |(week, _)| week + 1);
    let rebuilt = rebuild_weeks_from(&plan, from_week);
    plan.weeks = rebuilt;
    store.update_plan(&plan).await?;
    info!(%athlete_id, race_date = %race.date, "goal race repointed");
    Ok(ModificationOutcome::applied(format!(
        "Plan repointed at the {} on {}. Phases rebuilt from next week.",
        race_label(race),
        race.date
    )))
}

async fn add_secondary_race<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    race: GoalRace,
) -> EngineResult<ModificationOutcome> {
    let taper_start = race.date - Duration::days(B_RACE_TAPER_DAYS);
    let taper_end = race.date - Duration::days(1);
    let workouts = store
        .list_workouts(athlete_id, taper_start, taper_end)
        .await?;
    let actions: Vec<AdaptationAction> = workouts
        .iter()
        .filter(|w| w.status == WorkoutStatus::Scheduled)
        .filter(|w| w.workout_type != WorkoutType::Rest)
        .map(|w| {
            let duration = round_to_five_minutes(w.duration_minutes * B_RACE_VOLUME_FACTOR)
                .max(crate::constants::overload::DURATION_ROUNDING_MINUTES);
            let reason = format!("taper into the {} on {}", race_label(race), race.date);
            if w.intensity.is_hard() {
                AdaptationAction::SwapWorkout {
                    workout_id: w.id,
                    changes: WorkoutPatch {
                        title: Some(format!("Pre-Race {}", w.workout_type.as_str())),
                        intensity: Some(Intensity::Easy),
                        duration_minutes: Some(duration),
                        distance_meters: Some(None),
                        target_zone: Some(None),
                        description: Some(format!(
                            "{}min {} at easy effort with a few short race-pace strides.",
                            duration as u32,
                            w.workout_type.as_str()
                        )),
                        ..WorkoutPatch::default()
                    },
                    reason,
                }
            } else {
                AdaptationAction::AdjustVolume {
                    workout_id: w.id,
                    factor: B_RACE_VOLUME_FACTOR,
                    reason,
                }
            }
        })
        .collect();
    if actions.is_empty() {
        return Ok(ModificationOutcome::unchanged(
            "Nothing scheduled in the week before that race; no taper needed.",
        ));
    }
    let count = actions.len();
    let result = AdaptationResult {
        actions,
        message: None,
    };
    execute_actions(store, athlete_id, &result).await?;
    info!(%athlete_id, race_date = %race.date, tapered = count, "secondary race taper");
    Ok(ModificationOutcome::applied(format!(
        "Eased {count} sessions in the {B_RACE_TAPER_DAYS} days before your race. The plan itself is unchanged."
    )))
}

/// Change the goal race target time.
pub async fn change_goal_time<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    target_time_secs: u32,
) -> EngineResult<ModificationOutcome> {
    if target_time_secs == 0 {
        return Ok(ModificationOutcome::unchanged(
            "A target time has to be more than zero seconds.",
        ));
    }
    let Some(mut profile) = store.get_profile(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No athlete profile."));
    };
    let Some(mut race) = profile.goal_race else {
        return Ok(ModificationOutcome::unchanged(
            "No goal race on file to set a time for.",
        ));
    };
    race.target_time_secs = Some(target_time_secs);
    profile.goal_race = Some(race);
    store.update_profile(&profile).await?;
    let hours = target_time_secs / 3600;
    let minutes = (target_time_secs % 3600) / 60;
    Ok(ModificationOutcome::applied(format!(
        "Goal time set to {hours}:{minutes:02} for the {}.",
        race_label(race)
    )))
}

/// Switch primary sport. The active plan, built around the old sport,
/// is cancelled; the caller generates a fresh one.
pub async fn change_sport<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    sport: Sport,
) -> EngineResult<ModificationOutcome> {
    let Some(mut profile) = store.get_profile(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No athlete profile."));
    };
    if profile.sport == sport {
        return Ok(ModificationOutcome::unchanged(
            "That is already the primary sport.",
        ));
    }
    profile.sport = sport;
    store.update_profile(&profile).await?;
    let cancelled = if let Some(plan) = store.get_active_plan(athlete_id).await? {
        store.cancel_plan(plan.id).await?;
        true
    } else {
        false
    };
    info!(%athlete_id, ?sport, cancelled, "sport changed");
    Ok(ModificationOutcome::applied(if cancelled {
        "Sport changed and the old plan cancelled. Generate a new plan when ready."
    } else {
        "Sport changed. Generate a plan when ready."
    }))
}

fn race_label(race: GoalRace) -> String {
    format!("{:?}", race.race_type)
}
