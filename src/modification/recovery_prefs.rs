// ABOUTME: Recovery-philosophy handlers: coaching style and the 1-5 tuning axes
// ABOUTME: Profile-only updates; the adaptation engine reads them on its next pass
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use tracing::info;
use uuid::Uuid;

use crate::models::adaptation::ModificationOutcome;
use crate::models::athlete::CoachingStyle;
use crate::store::PlanStore;
use crate::EngineResult;

const AXIS_MIN: u8 = 1;
const AXIS_MAX: u8 = 5;

/// Change messaging and intervention aggressiveness.
pub async fn set_coaching_style<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    style: CoachingStyle,
) -> EngineResult<ModificationOutcome> {
    let Some(mut profile) = store.get_profile(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No athlete profile."));
    };
    if profile.coaching_style == style {
        return Ok(ModificationOutcome::unchanged(
            "That is already the coaching style.",
        ));
    }
    profile.coaching_style = style;
    store.update_profile(&profile).await?;
    info!(%athlete_id, ?style, "coaching style changed");
    Ok(ModificationOutcome::applied(
        "Coaching style updated. You will notice it in how adjustments are made and framed.",
    ))
}

/// Retune the push-tolerance and recovery-needs axes, clamped to 1-5.
pub async fn set_recovery_philosophy<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    push_tolerance: u8,
    recovery_needs: u8,
) -> EngineResult<ModificationOutcome> {
    let Some(mut profile) = store.get_profile(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No athlete profile."));
    };
    let push_tolerance = push_tolerance.clamp(AXIS_MIN, AXIS_MAX);
    let recovery_needs = recovery_needs.clamp(AXIS_MIN, AXIS_MAX);
    let current = profile.recovery_philosophy;
    if current.push_tolerance == push_tolerance && current.recovery_needs == recovery_needs {
        return Ok(ModificationOutcome::unchanged(
            "Recovery preferences already match.",
        ));
    }
    profile.recovery_philosophy.push_tolerance = push_tolerance;
    profile.recovery_philosophy.recovery_needs = recovery_needs;
    store.update_profile(&profile).await?;
    info!(%athlete_id, push_tolerance, recovery_needs, "recovery philosophy changed");
    Ok(ModificationOutcome::applied(format!(
        "Recovery preferences set: push tolerance {push_tolerance}/5, recovery needs {recovery_needs}/5."
    )))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::athlete::{
        AthleteProfile, ExperienceLevel, RecoveryPhilosophy, Sport,
    };
    use crate::store::InMemoryStore;
    use chrono::Weekday;

    fn profile() -> AthleteProfile {
        AthleteProfile {
            id: Uuid::new_v4(),
            experience: ExperienceLevel::Beginner,
            sport: Sport::Running,
            easy_pace_secs_per_km: None,
            ftp_watts: None,
            swim_pace_secs_per_100m: None,
            weekly_hours: 5.0,
            training_days: vec![Weekday::Tue, Weekday::Thu, Weekday::Sat],
            goal_race: None,
            coaching_style: CoachingStyle::Balanced,
            recovery_philosophy: RecoveryPhilosophy::default(),
        }
    }

    #[tokio::test]
    async fn test_axes_are_clamped_to_range() {
        let store = InMemoryStore::new();
        let p = profile();
        store.update_profile(&p).await.unwrap();

        let outcome = set_recovery_philosophy(&store, p.id, 9, 0).await.unwrap();
        assert!(outcome.modified);
        let after = store.get_profile(p.id).await.unwrap().unwrap();
        assert_eq!(after.recovery_philosophy.push_tolerance, 5);
        assert_eq!(after.recovery_philosophy.recovery_needs, 1);
    }

    #[tokio::test]
    async fn test_same_style_is_a_no_op() {
        let store = InMemoryStore::new();
        let p = profile();
        store.update_profile(&p).await.unwrap();

        let outcome = set_coaching_style(&store, p.id, CoachingStyle::Balanced)
            .await
            .unwrap();
        assert!(!outcome.modified);
    }
}
