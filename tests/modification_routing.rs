// ABOUTME: Modification router tests: dispatch, physiological updates, injury, races
// ABOUTME: Each request is routed exactly as the chat layer would hand it over

#![allow(clippy::unwrap_used)]

use chrono::{Duration, NaiveDate, Weekday};
use strideplan_engine::modification::{BodyPart, InjurySeverity, RacePriority};
use strideplan_engine::models::athlete::{
    AthleteProfile, CoachingStyle, ExperienceLevel, GoalRace, RaceType, RecoveryPhilosophy, Sport,
};
use strideplan_engine::models::plan::PlanStatus;
use strideplan_engine::models::workout::{WorkoutStatus, WorkoutType};
use strideplan_engine::{
    InMemoryStore, ModificationRequest, ModificationRouter, PlanService, PlanStore,
};
use uuid::Uuid;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

fn cyclist_profile() -> AthleteProfile {
    AthleteProfile {
        id: Uuid::new_v4(),
        experience: ExperienceLevel::Advanced,
        sport: Sport::Cycling,
        easy_pace_secs_per_km: None,
        ftp_watts: Some(250),
        swim_pace_secs_per_100m: None,
        weekly_hours: 8.0,
        training_days: vec![Weekday::Tue, Weekday::Thu, Weekday::Sat, Weekday::Sun],
        goal_race: Some(GoalRace {
            race_type: RaceType::GranFondo,
            date: monday() + Duration::weeks(16),
            target_time_secs: None,
        }),
        coaching_style: CoachingStyle::Balanced,
        recovery_philosophy: RecoveryPhilosophy::default(),
    }
}

async fn router_for(profile: &AthleteProfile) -> ModificationRouter<InMemoryStore> {
    let store = InMemoryStore::new();
    store.update_profile(profile).await.unwrap();
    let service = PlanService::new(store);
    service.generate_plan(profile, monday()).await.unwrap();
    ModificationRouter::new(service.into_store())
}

async fn seeded_router() -> (ModificationRouter<InMemoryStore>, AthleteProfile) {
    let profile = cyclist_profile();
    let router = router_for(&profile).await;
    (router, profile)
}

#[tokio::test]
async fn test_ftp_update_rewrites_profile_and_plan_zones() {
    let (router, profile) = seeded_router().await;

    let outcome = router
        .route(
            profile.id,
            monday(),
            ModificationRequest::UpdateFtp { watts: 280 },
        )
        .await
        .unwrap();
    assert!(outcome.modified);

    let stored = router
        .store()
        .get_profile(profile.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.ftp_watts, Some(280));

    let plan = router
        .store()
        .get_active_plan(profile.id)
        .await
        .unwrap()
        .unwrap();
    let bike = plan.zones.bike.unwrap();
    assert_eq!(bike.z2.min_watts, (280.0_f64 * 0.56).round() as u32);
}

#[tokio::test]
async fn test_absurd_ftp_is_silently_rejected() {
    let (router, profile) = seeded_router().await;
    let outcome = router
        .route(
            profile.id,
            monday(),
            ModificationRequest::UpdateFtp { watts: 1500 },
        )
        .await
        .unwrap();
    assert!(!outcome.modified);
    let stored = router
        .store()
        .get_profile(profile.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.ftp_watts, Some(250));
}

#[tokio::test]
async fn test_change_sport_cancels_the_active_plan() {
    let (router, profile) = seeded_router().await;
    let plan_before = router
        .store()
        .get_active_plan(profile.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(plan_before.status, PlanStatus::Active);

    let outcome = router
        .route(
            profile.id,
            monday(),
            ModificationRequest::ChangeSport {
                sport: Sport::Triathlon,
            },
        )
        .await
        .unwrap();
    assert!(outcome.modified);

    assert!(router
        .store()
        .get_active_plan(profile.id)
        .await
        .unwrap()
        .is_none());
    // Workouts survive the cancellation; history is not rewritten.
    assert!(!router.store().workouts_for_plan(plan_before.id).is_empty());

    let stored = router
        .store()
        .get_profile(profile.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.sport, Sport::Triathlon);
}

#[tokio::test]
async fn test_severe_knee_injury_skips_upcoming_runs_only() {
    let profile = AthleteProfile {
        sport: Sport::Triathlon,
        ftp_watts: Some(220),
        easy_pace_secs_per_km: Some(320.0),
        swim_pace_secs_per_100m: Some(105.0),
        goal_race: None,
        ..cyclist_profile()
    };
    let router = router_for(&profile).await;

    let today = monday();
    let outcome = router
        .route(
            profile.id,
            today,
            ModificationRequest::ReportInjury {
                body_part: BodyPart::Knee,
                severity: InjurySeverity::Severe,
            },
        )
        .await
        .unwrap();
    assert!(outcome.modified);

    let upcoming = router
        .store()
        .list_workouts(profile.id, today, today + Duration::days(6))
        .await
        .unwrap();
    assert!(!upcoming.is_empty());
    for w in &upcoming {
        match w.workout_type {
            WorkoutType::Run | WorkoutType::Brick => {
                assert_eq!(w.status, WorkoutStatus::Skipped, "{}", w.title);
            }
            _ => assert_eq!(w.status, WorkoutStatus::Scheduled, "{}", w.title),
        }
    }
}

#[tokio::test]
async fn test_b_race_tapers_without_restructuring_the_plan() {
    let (router, profile) = seeded_router().await;
    let plan_before = router
        .store()
        .get_active_plan(profile.id)
        .await
        .unwrap()
        .unwrap();

    // Inside the materialized window, more than a week out.
    let race_date = monday() + Duration::days(16);
    let outcome = router
        .route(
            profile.id,
            monday(),
            ModificationRequest::AddRace {
                race: GoalRace {
                    race_type: RaceType::Century,
                    date: race_date,
                    target_time_secs: None,
                },
                priority: RacePriority::B,
            },
        )
        .await
        .unwrap();

    let plan_after = router
        .store()
        .get_active_plan(profile.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(plan_before.phases, plan_after.phases);
    assert_eq!(plan_before.ends_at, plan_after.ends_at);

    let tapered = router
        .store()
        .list_workouts(
            profile.id,
            race_date - Duration::days(6),
            race_date - Duration::days(1),
        )
        .await
        .unwrap();
    assert!(outcome.modified);
    assert!(!tapered.is_empty());
    assert!(tapered
        .iter()
        .filter(|w| w.status == WorkoutStatus::Scheduled)
        .all(|w| !w.intensity.is_hard()));
}

#[tokio::test]
async fn test_recovery_philosophy_and_style_updates() {
    let (router, profile) = seeded_router().await;

    let outcome = router
        .route(
            profile.id,
            monday(),
            ModificationRequest::SetCoachingStyle {
                style: CoachingStyle::Push,
            },
        )
        .await
        .unwrap();
    assert!(outcome.modified);

    let outcome = router
        .route(
            profile.id,
            monday(),
            ModificationRequest::SetRecoveryPhilosophy {
                push_tolerance: 5,
                recovery_needs: 2,
            },
        )
        .await
        .unwrap();
    assert!(outcome.modified);

    let stored = router
        .store()
        .get_profile(profile.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.coaching_style, CoachingStyle::Push);
    assert_eq!(stored.recovery_philosophy.push_tolerance, 5);
    assert_eq!(stored.recovery_philosophy.recovery_needs, 2);
}

#[tokio::test]
async fn test_sport_ratio_shift_requires_a_multisport_plan() {
    let (router, profile) = seeded_router().await;
    let outcome = router
        .route(
            profile.id,
            monday(),
            ModificationRequest::ShiftSportRatio {
                discipline: WorkoutType::Run,
                delta: 0.1,
            },
        )
        .await
        .unwrap();
    // Cycling plan carries no sport mix.
    assert!(!outcome.modified);
}

#[tokio::test]
async fn test_reduce_week_scales_the_requested_week() {
    let (router, profile) = seeded_router().await;
    let week3 = monday() + Duration::weeks(2);
    let before = router
        .store()
        .list_workouts(profile.id, week3, week3 + Duration::days(6))
        .await
        .unwrap();
    assert!(!before.is_empty());

    let outcome = router
        .route(
            profile.id,
            monday(),
            ModificationRequest::ReduceWeek {
                week_of: week3 + Duration::days(3),
                factor: 0.5,
            },
        )
        .await
        .unwrap();
    assert!(outcome.modified);

    let after = router
        .store()
        .list_workouts(profile.id, week3, week3 + Duration::days(6))
        .await
        .unwrap();
    for (b, a) in before.iter().zip(after.iter()) {
        assert!(a.duration_minutes <= b.duration_minutes, "{}", a.title);
    }
}
