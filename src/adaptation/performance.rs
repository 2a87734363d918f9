// ABOUTME: Performance-based adaptation rules run after a workout completion
// ABOUTME: Over/underperformance detection and the three-session progressive bump
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use tracing::debug;

use crate::constants::performance as perf;
use crate::messages;
use crate::models::adaptation::{AdaptationAction, AdaptationResult};
use crate::models::athlete::CoachingStyle;
use crate::models::workout::{Workout, WorkoutStatus};

/// Note fragment appended whenever a reduction lands on a workout.
/// The bump rule refuses targets that already carry it so a cut and a
/// bump never stack on the same session.
pub const REDUCTION_NOTE: &str = "volume reduced";

/// Percent difference between actual and prescribed duration.
#[must_use]
pub fn duration_diff_pct(prescribed_minutes: f64, actual_minutes: f64) -> f64 {
    if prescribed_minutes <= 0.0 {
        return 0.0;
    }
    (actual_minutes - prescribed_minutes) / prescribed_minutes * 100.0
}

const fn bump_pct(style: CoachingStyle) -> f64 {
    match style {
        CoachingStyle::Push => perf::BUMP_PUSH_PCT,
        CoachingStyle::Balanced => perf::BUMP_BALANCED_PCT,
        CoachingStyle::Supportive => perf::BUMP_SUPPORTIVE_PCT,
    }
}

/// True when the athlete has strung together enough overperformed
/// completions to earn a volume bump.
fn sustained_overperformance(recent_completed: &[Workout]) -> bool {
    let over = recent_completed
        .iter()
        .filter(|w| w.status == WorkoutStatus::Completed)
        .filter(|w| {
            w.actual_duration_minutes.is_some_and(|actual| {
                duration_diff_pct(w.duration_minutes, actual) > perf::OVERPERFORM_SESSION_PCT
            })
        })
        .count();
    over >= perf::OVERPERFORM_SESSIONS_FOR_BUMP
}

/// Performance-based rule set, evaluated for the workout just
/// completed.
///
/// `recent_completed` is the completed history over the trailing scan
/// window including the session itself; `upcoming` is the forward
/// schedule used to pick bump and cut targets. Pure: no store access.
#[must_use]
pub fn performance_actions(
    style: CoachingStyle,
    completed: &Workout,
    latest_recovery_score: Option<u8>,
    recent_completed: &[Workout],
    upcoming: &[Workout],
) -> AdaptationResult {
    let Some(actual) = completed.actual_duration_minutes else {
        return AdaptationResult::no_action();
    };
    let diff = duration_diff_pct(completed.duration_minutes, actual);
    debug!(workout = %completed.id, diff_pct = diff, "performance adaptation pass");

    // Underperformance paired with depressed recovery cuts the next
    // hard session and short-circuits any bump this pass.
    if diff < perf::UNDERPERFORM_PCT {
        let low_recovery = latest_recovery_score
            .is_some_and(|score| score < crate::constants::recovery::LOW_RECOVERY_FOR_REDUCTION);
        if low_recovery {
            let next_hard = upcoming.iter().find(|w| {
                w.status == WorkoutStatus::Scheduled
                    && w.scheduled_date > completed.scheduled_date
                    && w.intensity.is_hard()
            });
            return next_hard.map_or_else(AdaptationResult::no_action, |target| {
                AdaptationResult {
                    actions: vec![AdaptationAction::AdjustVolume {
                        workout_id: target.id,
                        factor: 1.0 - perf::UNDERPERFORM_CUT,
                        reason: format!(
                            "{REDUCTION_NOTE}: session finished {:.0}% short with recovery low",
                            -diff
                        ),
                    }],
                    message: Some(messages::underperformance_cut(style)),
                }
            });
        }
        return AdaptationResult::no_action();
    }

    let mut result = AdaptationResult::no_action();
    if diff > perf::OVERPERFORM_NOTE_PCT {
        result.message = Some(messages::overperformance_note(style, diff));
    }

    if sustained_overperformance(recent_completed) {
        let pct = bump_pct(style);
        let target = upcoming.iter().find(|w| {
            w.status == WorkoutStatus::Scheduled
                && w.scheduled_date > completed.scheduled_date
                && w.workout_type == completed.workout_type
                && !w.coach_notes.contains(REDUCTION_NOTE)
        });
        if let Some(target) = target {
            result.actions.push(AdaptationAction::AdjustVolume {
                workout_id: target.id,
                factor: 1.0 + pct / 100.0,
                reason: format!("sustained overperformance: +{pct:.0}% on the next {} session", completed.workout_type.as_str()),
            });
            result.message = Some(messages::volume_bump(style, pct));
        }
    }

    result
}
