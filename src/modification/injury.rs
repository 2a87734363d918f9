// ABOUTME: Injury protocol: body part maps to affected sports, severity drives the response
// ABOUTME: Severe skips, moderate swaps sport or cuts 40%, mild eases intensity and trims 15%
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::adaptation::execute_actions;
use crate::constants::injury as ic;
use crate::models::adaptation::{AdaptationAction, AdaptationResult, ModificationOutcome};
use crate::models::workout::{Intensity, Workout, WorkoutPatch, WorkoutStatus, WorkoutType};
use crate::schedule::round_to_five_minutes;
use crate::store::PlanStore;
use crate::EngineResult;

/// Where the athlete reports pain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    /// Knee
    Knee,
    /// Ankle
    Ankle,
    /// Foot, including plantar issues
    Foot,
    /// Hip or glute
    Hip,
    /// Hamstring
    Hamstring,
    /// Calf or achilles
    Calf,
    /// Shoulder or rotator cuff
    Shoulder,
    /// Elbow
    Elbow,
    /// Wrist or hand
    Wrist,
    /// Lower back
    Back,
    /// Neck
    Neck,
}

/// Athlete-reported severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjurySeverity {
    /// Noticeable but trainable
    Mild,
    /// Limits the affected sport
    Moderate,
    /// No loading of the affected area
    Severe,
}

/// Disciplines an injury rules out. Bricks load everything a run does.
fn affected_sports(body_part: BodyPart) -> &'static [WorkoutType] {
    match body_part {
        BodyPart::Knee | BodyPart::Ankle | BodyPart::Foot | BodyPart::Hamstring
        | BodyPart::Calf => &[WorkoutType::Run, WorkoutType::Brick],
        BodyPart::Hip => &[WorkoutType::Run, WorkoutType::Bike, WorkoutType::Brick],
        BodyPart::Shoulder | BodyPart::Elbow => &[WorkoutType::Swim, WorkoutType::Strength],
        BodyPart::Wrist => &[
            WorkoutType::Swim,
            WorkoutType::Strength,
            WorkoutType::Bike,
            WorkoutType::Brick,
        ],
        BodyPart::Back | BodyPart::Neck => &[
            WorkoutType::Bike,
            WorkoutType::Strength,
            WorkoutType::Brick,
        ],
    }
}

/// Preferred substitute when a moderate injury rules a sport out.
const fn swap_preference(workout_type: WorkoutType) -> WorkoutType {
    match workout_type {
        WorkoutType::Run | WorkoutType::Strength | WorkoutType::Brick => WorkoutType::Bike,
        WorkoutType::Bike => WorkoutType::Swim,
        WorkoutType::Swim => WorkoutType::Bike,
        WorkoutType::Rest => WorkoutType::Rest,
    }
}

fn swap_title(workout_type: WorkoutType) -> &'static str {
    match workout_type {
        WorkoutType::Bike => "Easy Spin",
        WorkoutType::Swim => "Easy Swim",
        WorkoutType::Run => "Easy Run",
        WorkoutType::Strength => "Light Strength",
        WorkoutType::Brick | WorkoutType::Rest => "Rest",
    }
}

fn action_for(workout: &Workout, body_part: BodyPart, severity: InjurySeverity) -> AdaptationAction {
    let label = format!("{body_part:?}").to_lowercase();
    match severity {
        InjurySeverity::Severe => AdaptationAction::SkipWorkout {
            workout_id: workout.id,
            reason: format!("severe {label} injury: no loading this week"),
        },
        InjurySeverity::Moderate => {
            let substitute = swap_preference(workout.workout_type);
            if affected_sports(body_part).contains(&substitute) {
                // Nowhere safe to move it; keep the sport at reduced load.
                AdaptationAction::AdjustVolume {
                    workout_id: workout.id,
                    factor: 1.0 - ic::MODERATE_VOLUME_CUT,
                    reason: format!("moderate {label} injury: volume cut while it settles"),
                }
            } else {
                AdaptationAction::SwapWorkout {
                    workout_id: workout.id,
                    changes: WorkoutPatch {
                        workout_type: Some(substitute),
                        title: Some(swap_title(substitute).to_owned()),
                        description: Some(format!(
                            "{}min {} at easy effort, keeping load off the {label}.",
                            workout.duration_minutes as u32,
                            substitute.as_str()
                        )),
                        intensity: Some(Intensity::Easy),
                        distance_meters: Some(None),
                        target_zone: Some(None),
                        ..WorkoutPatch::default()
                    },
                    reason: format!("moderate {label} injury: swapped sport"),
                }
            }
        }
        InjurySeverity::Mild => AdaptationAction::ModifyWorkout {
            workout_id: workout.id,
            changes: WorkoutPatch {
                intensity: Some(workout.intensity.one_notch_easier()),
                duration_minutes: Some(
                    round_to_five_minutes(
                        workout.duration_minutes * (1.0 - ic::MILD_DURATION_CUT),
                    )
                    .max(crate::constants::overload::DURATION_ROUNDING_MINUTES),
                ),
                distance_meters: Some(
                    workout
                        .distance_meters
                        .map(|d| d * (1.0 - ic::MILD_DURATION_CUT)),
                ),
                target_zone: Some(None),
                ..WorkoutPatch::default()
            },
            reason: format!("mild {label} injury: eased off while it settles"),
        },
    }
}

/// Apply the injury protocol across the next week of scheduled
/// sessions in the affected sports.
pub async fn report<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    today: NaiveDate,
    body_part: BodyPart,
    severity: InjurySeverity,
) -> EngineResult<ModificationOutcome> {
    let window_end = today + Duration::days(ic::PROTOCOL_WINDOW_DAYS - 1);
    let affected = affected_sports(body_part);
    let workouts = store.list_workouts(athlete_id, today, window_end).await?;
    let actions: Vec<AdaptationAction> = workouts
        .iter()
        .filter(|w| w.status == WorkoutStatus::Scheduled)
        .filter(|w| affected.contains(&w.workout_type))
        .map(|w| action_for(w, body_part, severity))
        .collect();
    info!(
        %athlete_id,
        ?body_part,
        ?severity,
        affected = actions.len(),
        "injury protocol"
    );
    if actions.is_empty() {
        return Ok(ModificationOutcome::unchanged(
            "Nothing in the next week loads that area. Keep an eye on it.",
        ));
    }
    let count = actions.len();
    let result = AdaptationResult {
        actions,
        message: None,
    };
    execute_actions(store, athlete_id, &result).await?;
    Ok(ModificationOutcome::applied(format!(
        "Adjusted {count} upcoming sessions to protect the injury. Rest up."
    )))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::store::InMemoryStore;

    fn workout(
        athlete_id: Uuid,
        date: NaiveDate,
        workout_type: WorkoutType,
        intensity: Intensity,
    ) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            athlete_id,
            scheduled_date: date,
            workout_type,
            title: "Session".into(),
            description: String::new(),
            duration_minutes: 60.0,
            distance_meters: None,
            intensity,
            status: WorkoutStatus::Scheduled,
            target_zone: None,
            coach_notes: String::new(),
            actual_duration_minutes: None,
            actual_distance_meters: None,
        }
    }

    #[test]
    fn test_knee_affects_run_and_brick_only() {
        let affected = affected_sports(BodyPart::Knee);
        assert!(affected.contains(&WorkoutType::Run));
        assert!(affected.contains(&WorkoutType::Brick));
        assert!(!affected.contains(&WorkoutType::Swim));
        assert!(!affected.contains(&WorkoutType::Bike));
    }

    #[test]
    fn test_severe_skips() {
        let w = workout(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            WorkoutType::Run,
            Intensity::Hard,
        );
        let action = action_for(&w, BodyPart::Knee, InjurySeverity::Severe);
        assert!(matches!(action, AdaptationAction::SkipWorkout { .. }));
    }

    #[test]
    fn test_moderate_knee_swaps_run_to_bike() {
        let w = workout(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            WorkoutType::Run,
            Intensity::Hard,
        );
        let action = action_for(&w, BodyPart::Knee, InjurySeverity::Moderate);
        let AdaptationAction::SwapWorkout { changes, .. } = action else {
            unreachable!("expected sport swap");
        };
        assert_eq!(changes.workout_type, Some(WorkoutType::Bike));
        assert_eq!(changes.intensity, Some(Intensity::Easy));
    }

    #[test]
    fn test_moderate_hip_cannot_swap_run_to_bike_so_reduces() {
        let w = workout(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            WorkoutType::Run,
            Intensity::Hard,
        );
        let action = action_for(&w, BodyPart::Hip, InjurySeverity::Moderate);
        let AdaptationAction::AdjustVolume { factor, .. } = action else {
            unreachable!("expected volume cut");
        };
        assert!((factor - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_mild_eases_intensity_and_trims_duration() {
        let w = workout(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            WorkoutType::Run,
            Intensity::Max,
        );
        let action = action_for(&w, BodyPart::Calf, InjurySeverity::Mild);
        let AdaptationAction::ModifyWorkout { changes, .. } = action else {
            unreachable!("expected in-place modification");
        };
        assert_eq!(changes.intensity, Some(Intensity::Hard));
        // 60 * 0.85 = 51, rounded to 50
        assert_eq!(changes.duration_minutes, Some(50.0));
    }

    #[tokio::test]
    async fn test_report_touches_only_affected_sports() {
        let store = InMemoryStore::new();
        let athlete = Uuid::new_v4();
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let run = workout(athlete, today + Duration::days(1), WorkoutType::Run, Intensity::Hard);
        let swim = workout(athlete, today + Duration::days(2), WorkoutType::Swim, Intensity::Easy);
        store
            .upsert_workouts(&[run.clone(), swim.clone()])
            .await
            .unwrap();

        let outcome = report(&store, athlete, today, BodyPart::Knee, InjurySeverity::Severe)
            .await
            .unwrap();
        assert!(outcome.modified);
        assert_eq!(
            store.get_workout(run.id).await.unwrap().unwrap().status,
            WorkoutStatus::Skipped
        );
        assert_eq!(
            store.get_workout(swim.id).await.unwrap().unwrap().status,
            WorkoutStatus::Scheduled
        );
    }
}
