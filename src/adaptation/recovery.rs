// ABOUTME: Recovery-based adaptation rules driven by red/yellow/green classification
// ABOUTME: Red always intervenes; yellow depends on coaching style; green never acts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use chrono::Duration;
use tracing::debug;

use crate::constants::recovery as rc;
use crate::messages;
use crate::models::adaptation::{AdaptationAction, AdaptationResult};
use crate::models::athlete::CoachingStyle;
use crate::models::recovery::{RecoverySnapshot, RecoveryZone};
use crate::models::workout::{Intensity, Workout, WorkoutPatch, WorkoutStatus, WorkoutType};
use crate::schedule::round_to_five_minutes;

/// Title for the easy-effort alternative a hard session swaps to.
fn easy_swap_title(workout_type: WorkoutType) -> &'static str {
    match workout_type {
        WorkoutType::Run => "Easy Run",
        WorkoutType::Bike | WorkoutType::Brick => "Easy Spin",
        WorkoutType::Swim => "Easy Swim",
        WorkoutType::Strength => "Mobility Session",
        WorkoutType::Rest => "Rest",
    }
}

/// Swapping a brick drops the run leg; everything else keeps its sport
/// family.
const fn easy_swap_type(workout_type: WorkoutType) -> WorkoutType {
    match workout_type {
        WorkoutType::Brick => WorkoutType::Bike,
        other => other,
    }
}

fn swap_patch(workout: &Workout, volume_factor: f64) -> WorkoutPatch {
    let duration = round_to_five_minutes(workout.duration_minutes * volume_factor)
        .max(crate::constants::overload::DURATION_ROUNDING_MINUTES);
    WorkoutPatch {
        workout_type: Some(easy_swap_type(workout.workout_type)),
        title: Some(easy_swap_title(workout.workout_type).to_owned()),
        description: Some(format!(
            "{}min {} at conversational effort. Recovery takes priority today.",
            duration as u32,
            easy_swap_type(workout.workout_type).as_str()
        )),
        intensity: Some(Intensity::Easy),
        duration_minutes: Some(duration),
        distance_meters: Some(workout.distance_meters.map(|d| d * volume_factor)),
        target_zone: Some(None),
        ..WorkoutPatch::default()
    }
}

fn reduce_patch(workout: &Workout, cut: f64) -> WorkoutPatch {
    WorkoutPatch {
        duration_minutes: Some(round_to_five_minutes(
            workout.duration_minutes * (1.0 - cut),
        )),
        distance_meters: Some(workout.distance_meters.map(|d| d * (1.0 - cut))),
        ..WorkoutPatch::default()
    }
}

/// Recovery-based rule set.
///
/// `upcoming` is the athlete's schedule around the snapshot date; the
/// rule itself selects the intervention window (the snapshot day and
/// the day after). Pure: no store access, decisions only.
#[must_use]
pub fn recovery_actions(
    style: CoachingStyle,
    snapshot: &RecoverySnapshot,
    upcoming: &[Workout],
) -> AdaptationResult {
    let zone = snapshot.zone();
    let score = snapshot.recovery_score;
    let window_end = snapshot.date + Duration::days(rc::INTERVENTION_WINDOW_DAYS - 1);
    let in_window: Vec<&Workout> = upcoming
        .iter()
        .filter(|w| {
            w.status == WorkoutStatus::Scheduled
                && w.scheduled_date >= snapshot.date
                && w.scheduled_date <= window_end
                && w.workout_type != WorkoutType::Rest
        })
        .collect();

    debug!(%score, ?zone, window = in_window.len(), "recovery adaptation pass");

    match zone {
        RecoveryZone::Green => AdaptationResult::no_action(),
        RecoveryZone::Red => {
            let mut actions = Vec::new();
            for workout in &in_window {
                let reason = format!(
                    "recovery score {score} (red) on {}: protecting the next {} days",
                    snapshot.date,
                    rc::INTERVENTION_WINDOW_DAYS
                );
                if workout.intensity.is_hard() {
                    actions.push(AdaptationAction::SwapWorkout {
                        workout_id: workout.id,
                        changes: swap_patch(workout, 1.0 - rc::RED_VOLUME_CUT),
                        reason,
                    });
                } else {
                    actions.push(AdaptationAction::ModifyWorkout {
                        workout_id: workout.id,
                        changes: reduce_patch(workout, rc::RED_VOLUME_CUT),
                        reason,
                    });
                }
            }
            AdaptationResult {
                actions,
                message: Some(messages::red_recovery(style, score)),
            }
        }
        RecoveryZone::Yellow => match style {
            CoachingStyle::Push => AdaptationResult::no_action(),
            CoachingStyle::Supportive => {
                let next_hard = in_window.iter().find(|w| w.intensity.is_hard());
                next_hard.map_or_else(AdaptationResult::no_action, |workout| {
                    AdaptationResult {
                        actions: vec![AdaptationAction::SwapWorkout {
                            workout_id: workout.id,
                            changes: swap_patch(workout, 1.0),
                            reason: format!(
                                "recovery score {score} (yellow): softening the next hard session"
                            ),
                        }],
                        message: Some(messages::yellow_recovery(style, score)),
                    }
                })
            }
            CoachingStyle::Balanced => {
                let actions: Vec<AdaptationAction> = in_window
                    .iter()
                    .map(|workout| AdaptationAction::ModifyWorkout {
                        workout_id: workout.id,
                        changes: reduce_patch(workout, rc::YELLOW_VOLUME_CUT),
                        reason: format!("recovery score {score} (yellow): minor 10% trim"),
                    })
                    .collect();
                if actions.is_empty() {
                    AdaptationResult::no_action()
                } else {
                    AdaptationResult {
                        actions,
                        message: Some(messages::yellow_recovery(style, score)),
                    }
                }
            }
        },
    }
}
