// ABOUTME: Missed-workout sweep run once per day over yesterday's schedule
// ABOUTME: Key sessions reschedule within two days, the rest are skipped, heavy miss weeks cut volume
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::constants::missed as mc;
use crate::messages;
use crate::models::adaptation::{AdaptationAction, AdaptationResult};
use crate::models::athlete::CoachingStyle;
use crate::models::plan::week_monday;
use crate::models::workout::{Workout, WorkoutPatch, WorkoutStatus, WorkoutType};

/// A candidate landing day must not already hold a key or hard
/// session; stacking two quality sessions on one day defeats the
/// reschedule.
fn day_can_take_key_session(date: NaiveDate, workouts: &[Workout]) -> bool {
    !workouts.iter().any(|w| {
        w.scheduled_date == date
            && w.status == WorkoutStatus::Scheduled
            && w.workout_type != WorkoutType::Rest
            && (w.is_key_session() || w.intensity.is_hard())
    })
}

/// `claimed` holds landing days already handed out earlier in the
/// same sweep; they are occupied even though the store does not show
/// it yet.
fn reschedule_target(
    today: NaiveDate,
    workouts: &[Workout],
    claimed: &[NaiveDate],
) -> Option<NaiveDate> {
    (0..mc::RESCHEDULE_WINDOW_DAYS)
        .map(|offset| today + Duration::days(offset))
        .find(|&candidate| {
            !claimed.contains(&candidate) && day_can_take_key_session(candidate, workouts)
        })
}

/// Count of missed-or-skipped sessions in the Mon..Sun week holding
/// `date`. A workout scheduled before `today` and still in
/// `Scheduled` counts as missed.
fn week_miss_tally(date: NaiveDate, today: NaiveDate, workouts: &[Workout]) -> usize {
    let monday = week_monday(date);
    let sunday = monday + Duration::days(6);
    workouts
        .iter()
        .filter(|w| w.scheduled_date >= monday && w.scheduled_date <= sunday)
        .filter(|w| w.workout_type != WorkoutType::Rest)
        .filter(|w| {
            w.status == WorkoutStatus::Skipped
                || (w.status == WorkoutStatus::Scheduled && w.scheduled_date < today)
        })
        .count()
}

/// Daily missed-workout rule set.
///
/// `workouts` must span at least the week containing yesterday and
/// the following week; the sweep inspects yesterday's sessions and
/// may reduce next week's. Pure: no store access.
#[must_use]
pub fn missed_workout_actions(
    style: CoachingStyle,
    today: NaiveDate,
    workouts: &[Workout],
) -> AdaptationResult {
    let yesterday = today - Duration::days(1);
    let mut actions = Vec::new();

    let missed_yesterday: Vec<&Workout> = workouts
        .iter()
        .filter(|w| {
            w.scheduled_date == yesterday
                && w.status == WorkoutStatus::Scheduled
                && w.workout_type != WorkoutType::Rest
        })
        .collect();
    debug!(%today, missed = missed_yesterday.len(), "missed-workout sweep");

    let mut claimed_days: Vec<NaiveDate> = Vec::new();
    for missed in &missed_yesterday {
        if missed.is_key_session() {
            if let Some(new_date) = reschedule_target(today, workouts, &claimed_days) {
                claimed_days.push(new_date);
                actions.push(AdaptationAction::ModifyWorkout {
                    workout_id: missed.id,
                    changes: WorkoutPatch {
                        scheduled_date: Some(new_date),
                        ..WorkoutPatch::default()
                    },
                    reason: format!(
                        "key session missed on {yesterday}, rescheduled to {new_date}"
                    ),
                });
                continue;
            }
        }
        actions.push(AdaptationAction::SkipWorkout {
            workout_id: missed.id,
            reason: format!("missed on {yesterday}"),
        });
    }

    // Tally against the week each workout currently sits in, after the
    // reschedules above have been decided. Rescheduled sessions are in
    // flight, not missed.
    let rescheduled: Vec<_> = actions
        .iter()
        .filter(|a| matches!(a, AdaptationAction::ModifyWorkout { .. }))
        .filter_map(AdaptationAction::workout_id)
        .collect();
    let tally_pool: Vec<Workout> = workouts
        .iter()
        .filter(|w| !rescheduled.contains(&w.id))
        .cloned()
        .collect();
    let total_missed = week_miss_tally(yesterday, today, &tally_pool);
    let mut message = None;
    if total_missed >= mc::WEEKLY_MISS_THRESHOLD {
        let next_monday = week_monday(yesterday) + Duration::days(7);
        let next_sunday = next_monday + Duration::days(6);
        for workout in workouts.iter().filter(|w| {
            w.scheduled_date >= next_monday
                && w.scheduled_date <= next_sunday
                && w.status == WorkoutStatus::Scheduled
                && w.workout_type != WorkoutType::Rest
        }) {
            actions.push(AdaptationAction::AdjustVolume {
                workout_id: workout.id,
                factor: 1.0 - mc::WEEKLY_MISS_CUT,
                reason: format!(
                    "{}: {total_missed} sessions missed last week",
                    crate::adaptation::performance::REDUCTION_NOTE
                ),
            });
        }
        message = Some(messages::missed_week_checkin(style, total_missed));
    }

    AdaptationResult { actions, message }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::workout::Intensity;
    use uuid::Uuid;

    fn workout(
        date: NaiveDate,
        title: &str,
        duration: f64,
        status: WorkoutStatus,
    ) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            athlete_id: Uuid::new_v4(),
            scheduled_date: date,
            workout_type: WorkoutType::Run,
            title: title.into(),
            description: String::new(),
            duration_minutes: duration,
            distance_meters: None,
            intensity: Intensity::Easy,
            status,
            target_zone: None,
            coach_notes: String::new(),
            actual_duration_minutes: None,
            actual_distance_meters: None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        // June 2026: the 1st is a Monday.
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    #[test]
    fn test_missed_key_session_reschedules_to_open_day() {
        let missed = workout(day(2), "Long Run", 120.0, WorkoutStatus::Scheduled);
        let missed_id = missed.id;
        let workouts = vec![
            missed,
            workout(day(3), "Easy Run", 40.0, WorkoutStatus::Scheduled),
        ];
        let result = missed_workout_actions(CoachingStyle::Balanced, day(3), &workouts);
        assert_eq!(result.actions.len(), 1);
        let AdaptationAction::ModifyWorkout { workout_id, changes, .. } = &result.actions[0]
        else {
            unreachable!("expected reschedule");
        };
        assert_eq!(*workout_id, missed_id);
        assert_eq!(changes.scheduled_date, Some(day(3)));
    }

    #[test]
    fn test_two_missed_key_sessions_land_on_different_days() {
        let first = workout(day(2), "Long Run", 120.0, WorkoutStatus::Scheduled);
        let second = workout(day(2), "Tempo Run", 50.0, WorkoutStatus::Scheduled);
        let workouts = vec![
            first,
            second,
            workout(day(3), "Easy Run", 40.0, WorkoutStatus::Scheduled),
            workout(day(4), "Recovery Run", 30.0, WorkoutStatus::Scheduled),
        ];
        let result = missed_workout_actions(CoachingStyle::Balanced, day(3), &workouts);
        let landings: Vec<NaiveDate> = result
            .actions
            .iter()
            .filter_map(|a| match a {
                AdaptationAction::ModifyWorkout { changes, .. } => changes.scheduled_date,
                _ => None,
            })
            .collect();
        assert_eq!(landings.len(), 2);
        assert_ne!(landings[0], landings[1]);
    }

    #[test]
    fn test_missed_key_session_with_no_open_day_is_skipped() {
        let missed = workout(day(2), "Long Run", 120.0, WorkoutStatus::Scheduled);
        let workouts = vec![
            missed,
            workout(day(3), "Tempo Run", 50.0, WorkoutStatus::Scheduled),
            workout(day(4), "Interval Session", 55.0, WorkoutStatus::Scheduled),
        ];
        let result = missed_workout_actions(CoachingStyle::Balanced, day(3), &workouts);
        assert_eq!(result.actions.len(), 1);
        assert!(matches!(
            result.actions[0],
            AdaptationAction::SkipWorkout { .. }
        ));
    }

    #[test]
    fn test_missed_easy_session_is_skipped_not_rescheduled() {
        let workouts = vec![workout(day(2), "Easy Run", 40.0, WorkoutStatus::Scheduled)];
        let result = missed_workout_actions(CoachingStyle::Balanced, day(3), &workouts);
        assert_eq!(result.actions.len(), 1);
        assert!(matches!(
            result.actions[0],
            AdaptationAction::SkipWorkout { .. }
        ));
    }

    #[test]
    fn test_three_misses_cut_next_week() {
        let mut workouts = vec![
            workout(day(1), "Easy Run", 40.0, WorkoutStatus::Skipped),
            workout(day(2), "Easy Run", 40.0, WorkoutStatus::Skipped),
            workout(day(4), "Easy Run", 40.0, WorkoutStatus::Scheduled),
        ];
        let next_week = workout(day(9), "Easy Run", 40.0, WorkoutStatus::Scheduled);
        let next_id = next_week.id;
        workouts.push(next_week);
        let result = missed_workout_actions(CoachingStyle::Supportive, day(5), &workouts);
        // yesterday's miss is skipped, then next week is cut
        let cut: Vec<_> = result
            .actions
            .iter()
            .filter(|a| matches!(a, AdaptationAction::AdjustVolume { .. }))
            .collect();
        assert_eq!(cut.len(), 1);
        assert_eq!(cut[0].workout_id(), Some(next_id));
        let AdaptationAction::AdjustVolume { factor, .. } = cut[0] else {
            unreachable!()
        };
        assert!((factor - 0.8).abs() < 1e-9);
        assert!(result.message.is_some());
    }

    #[test]
    fn test_two_misses_leave_next_week_alone() {
        let workouts = vec![
            workout(day(1), "Easy Run", 40.0, WorkoutStatus::Skipped),
            workout(day(4), "Easy Run", 40.0, WorkoutStatus::Scheduled),
            workout(day(9), "Easy Run", 40.0, WorkoutStatus::Scheduled),
        ];
        let result = missed_workout_actions(CoachingStyle::Supportive, day(5), &workouts);
        assert!(result
            .actions
            .iter()
            .all(|a| !matches!(a, AdaptationAction::AdjustVolume { .. })));
        assert!(result.message.is_none());
    }
}
