// ABOUTME: Adaptation engine tests: recovery triggers, performance triggers, missed sweep
// ABOUTME: Exercises the service layer end to end against the in-memory store

#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, Weekday};
use strideplan_engine::models::adaptation::AdaptationAction;
use strideplan_engine::models::athlete::{
    AthleteProfile, CoachingStyle, ExperienceLevel, RecoveryPhilosophy, Sport,
};
use strideplan_engine::models::recovery::RecoverySnapshot;
use strideplan_engine::models::workout::{Intensity, Workout, WorkoutStatus, WorkoutType};
use strideplan_engine::{AdaptationService, EngineError, InMemoryStore, PlanStore};
use uuid::Uuid;

fn profile(style: CoachingStyle) -> AthleteProfile {
    AthleteProfile {
        id: Uuid::new_v4(),
        experience: ExperienceLevel::Intermediate,
        sport: Sport::Running,
        easy_pace_secs_per_km: Some(330.0),
        ftp_watts: None,
        swim_pace_secs_per_100m: None,
        weekly_hours: 6.0,
        training_days: vec![Weekday::Tue, Weekday::Thu, Weekday::Sat],
        goal_race: None,
        coaching_style: style,
        recovery_philosophy: RecoveryPhilosophy::default(),
    }
}

fn workout(
    athlete_id: Uuid,
    date: NaiveDate,
    title: &str,
    intensity: Intensity,
    duration: f64,
) -> Workout {
    Workout {
        id: Uuid::new_v4(),
        plan_id: Uuid::new_v4(),
        athlete_id,
        scheduled_date: date,
        workout_type: WorkoutType::Run,
        title: title.into(),
        description: String::new(),
        duration_minutes: duration,
        distance_meters: Some(duration * 200.0),
        intensity,
        status: WorkoutStatus::Scheduled,
        target_zone: None,
        coach_notes: String::new(),
        actual_duration_minutes: None,
        actual_distance_meters: None,
    }
}

fn snapshot(athlete_id: Uuid, date: NaiveDate, score: u8) -> RecoverySnapshot {
    RecoverySnapshot {
        athlete_id,
        date,
        source: "whoop".into(),
        recovery_score: score,
        hrv_ms: Some(42.0),
        resting_hr: Some(55),
        sleep_hours: Some(6.5),
    }
}

fn day(d: u32) -> NaiveDate {
    // June 2026 starts on a Monday.
    NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
}

#[tokio::test]
async fn test_red_recovery_intervenes_on_both_window_days_for_every_style() {
    for style in [
        CoachingStyle::Supportive,
        CoachingStyle::Balanced,
        CoachingStyle::Push,
    ] {
        let store = InMemoryStore::new();
        let p = profile(style);
        store.update_profile(&p).await.unwrap();
        let hard_today = workout(p.id, day(10), "Tempo Run", Intensity::Hard, 60.0);
        let hard_tomorrow = workout(p.id, day(11), "Interval Session", Intensity::Max, 50.0);
        store
            .upsert_workouts(&[hard_today.clone(), hard_tomorrow.clone()])
            .await
            .unwrap();

        let service = AdaptationService::new(store);
        let result = service
            .adapt_for_recovery(&snapshot(p.id, day(10), 20))
            .await
            .unwrap();

        assert_eq!(result.actions.len(), 2, "{style:?}");
        assert!(result.message.is_some());

        // Both hard sessions were swapped easy with a 30% cut.
        for id in [hard_today.id, hard_tomorrow.id] {
            let after = service.store().get_workout(id).await.unwrap().unwrap();
            assert_eq!(after.intensity, Intensity::Easy, "{style:?}");
        }
        let after = service
            .store()
            .get_workout(hard_today.id)
            .await
            .unwrap()
            .unwrap();
        assert!((after.duration_minutes - 40.0).abs() < 1e-9); // 60 * 0.7 rounded
    }
}

#[tokio::test]
async fn test_green_recovery_never_acts() {
    let store = InMemoryStore::new();
    let p = profile(CoachingStyle::Push);
    store.update_profile(&p).await.unwrap();
    let hard = workout(p.id, day(10), "Tempo Run", Intensity::Hard, 60.0);
    store.upsert_workouts(&[hard.clone()]).await.unwrap();

    let service = AdaptationService::new(store);
    let result = service
        .adapt_for_recovery(&snapshot(p.id, day(10), 70))
        .await
        .unwrap();
    assert!(result.actions.is_empty());
    assert!(result.message.is_none());

    let after = service
        .store()
        .get_workout(hard.id)
        .await
        .unwrap()
        .unwrap();
    assert!((after.duration_minutes - 60.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_yellow_recovery_depends_on_style() {
    for (style, expected_actions) in [
        (CoachingStyle::Push, 0),
        (CoachingStyle::Supportive, 1),
        (CoachingStyle::Balanced, 2),
    ] {
        let store = InMemoryStore::new();
        let p = profile(style);
        store.update_profile(&p).await.unwrap();
        store
            .upsert_workouts(&[
                workout(p.id, day(10), "Easy Run", Intensity::Easy, 40.0),
                workout(p.id, day(11), "Tempo Run", Intensity::Hard, 60.0),
            ])
            .await
            .unwrap();

        let service = AdaptationService::new(store);
        let result = service
            .adapt_for_recovery(&snapshot(p.id, day(10), 50))
            .await
            .unwrap();
        assert_eq!(result.actions.len(), expected_actions, "{style:?}");
    }
}

#[tokio::test]
async fn test_three_overperformances_bump_next_same_type_workout() {
    let store = InMemoryStore::new();
    let p = profile(CoachingStyle::Push);
    store.update_profile(&p).await.unwrap();

    // Two already-completed overperformances earlier in the week.
    for d in [8, 9] {
        let mut done = workout(p.id, day(d), "Easy Run", Intensity::Easy, 60.0);
        done.status = WorkoutStatus::Completed;
        done.actual_duration_minutes = Some(70.0);
        store.upsert_workouts(&[done]).await.unwrap();
    }
    // The third, completed through the service today.
    let third = workout(p.id, day(10), "Easy Run", Intensity::Easy, 60.0);
    let upcoming = workout(p.id, day(12), "Easy Run", Intensity::Easy, 60.0);
    store
        .upsert_workouts(&[third.clone(), upcoming.clone()])
        .await
        .unwrap();

    let service = AdaptationService::new(store);
    let result = service
        .adapt_after_workout(third.id, 70.0, None)
        .await
        .unwrap();

    assert_eq!(result.actions.len(), 1);
    let AdaptationAction::AdjustVolume { factor, .. } = &result.actions[0] else {
        panic!("expected a volume bump");
    };
    assert!((factor - 1.10).abs() < 1e-9);

    let bumped = service
        .store()
        .get_workout(upcoming.id)
        .await
        .unwrap()
        .unwrap();
    assert!((bumped.duration_minutes - 65.0).abs() < 1e-9); // 66 rounds to 65
}

#[tokio::test]
async fn test_two_overperformances_change_nothing() {
    let store = InMemoryStore::new();
    let p = profile(CoachingStyle::Push);
    store.update_profile(&p).await.unwrap();

    let mut done = workout(p.id, day(9), "Easy Run", Intensity::Easy, 60.0);
    done.status = WorkoutStatus::Completed;
    done.actual_duration_minutes = Some(70.0);
    let second = workout(p.id, day(10), "Easy Run", Intensity::Easy, 60.0);
    let upcoming = workout(p.id, day(12), "Easy Run", Intensity::Easy, 60.0);
    store
        .upsert_workouts(&[done, second.clone(), upcoming.clone()])
        .await
        .unwrap();

    let service = AdaptationService::new(store);
    let result = service
        .adapt_after_workout(second.id, 70.0, None)
        .await
        .unwrap();
    assert!(result.actions.is_empty());

    let untouched = service
        .store()
        .get_workout(upcoming.id)
        .await
        .unwrap()
        .unwrap();
    assert!((untouched.duration_minutes - 60.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_missed_key_session_is_rescheduled_and_easy_run_skipped() {
    let store = InMemoryStore::new();
    let p = profile(CoachingStyle::Balanced);
    store.update_profile(&p).await.unwrap();

    let tempo = workout(p.id, day(9), "Tempo Run", Intensity::Hard, 50.0);
    let easy = workout(p.id, day(9), "Easy Run", Intensity::Easy, 40.0);
    let open_day = workout(p.id, day(10), "Recovery Run", Intensity::Easy, 30.0);
    store
        .upsert_workouts(&[tempo.clone(), easy.clone(), open_day])
        .await
        .unwrap();

    let service = AdaptationService::new(store);
    service.handle_missed_workouts(p.id, day(10)).await.unwrap();

    let tempo_after = service
        .store()
        .get_workout(tempo.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tempo_after.status, WorkoutStatus::Scheduled);
    assert_eq!(tempo_after.scheduled_date, day(10));

    let easy_after = service
        .store()
        .get_workout(easy.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(easy_after.status, WorkoutStatus::Skipped);
}

#[tokio::test]
async fn test_three_misses_cut_next_week_and_send_a_checkin() {
    let store = InMemoryStore::new();
    let p = profile(CoachingStyle::Supportive);
    store.update_profile(&p).await.unwrap();

    let mut skipped_one = workout(p.id, day(1), "Easy Run", Intensity::Easy, 40.0);
    skipped_one.status = WorkoutStatus::Skipped;
    let mut skipped_two = workout(p.id, day(2), "Easy Run", Intensity::Easy, 40.0);
    skipped_two.status = WorkoutStatus::Skipped;
    let missed = workout(p.id, day(4), "Easy Run", Intensity::Easy, 40.0);
    let next_week = workout(p.id, day(9), "Easy Run", Intensity::Easy, 60.0);
    store
        .upsert_workouts(&[skipped_one, skipped_two, missed.clone(), next_week.clone()])
        .await
        .unwrap();

    let service = AdaptationService::new(store);
    let result = service.handle_missed_workouts(p.id, day(5)).await.unwrap();
    assert!(result.message.is_some());

    let cut = service
        .store()
        .get_workout(next_week.id)
        .await
        .unwrap()
        .unwrap();
    assert!((cut.duration_minutes - 50.0).abs() < 1e-9); // 60 * 0.8 = 48, rounded to 50
    let missed_after = service
        .store()
        .get_workout(missed.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(missed_after.status, WorkoutStatus::Skipped);
}

#[tokio::test]
async fn test_completion_for_unknown_workout_is_an_invariant_error() {
    let store = InMemoryStore::new();
    let p = profile(CoachingStyle::Supportive);
    store.update_profile(&p).await.unwrap();

    let service = AdaptationService::new(store);
    let ghost = Uuid::new_v4();
    let err = service
        .adapt_after_workout(ghost, 45.0, None)
        .await
        .unwrap_err();
    match err {
        EngineError::Invariant { context } => {
            assert!(context.contains(&ghost.to_string()));
        }
        other => panic!("expected invariant error, got {other}"),
    }
}
