// ABOUTME: Multisport distribution handlers: ratio shift, brick frequency, discipline focus
// ABOUTME: All require an active multisport plan carrying a sport mix
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use uuid::Uuid;

use crate::models::adaptation::ModificationOutcome;
use crate::models::plan::SportMix;
use crate::models::workout::WorkoutType;
use crate::store::PlanStore;
use crate::EngineResult;

const MAX_RATIO_DELTA: f64 = 0.3;
const FOCUS_DELTA: f64 = 0.1;
const MAX_BRICKS_PER_WEEK: u32 = 3;

/// Smallest share any discipline may hold after a shift; a triathlon
/// plan never drops a discipline entirely.
const MIN_DISCIPLINE_SHARE: f64 = 0.05;

fn share_mut(mix: &mut SportMix, discipline: WorkoutType) -> Option<&mut f64> {
    match discipline {
        WorkoutType::Swim => Some(&mut mix.swim),
        WorkoutType::Bike => Some(&mut mix.bike),
        WorkoutType::Run => Some(&mut mix.run),
        WorkoutType::Strength | WorkoutType::Rest | WorkoutType::Brick => None,
    }
}

fn shift(mix: SportMix, discipline: WorkoutType, delta: f64) -> Option<SportMix> {
    let mut shifted = mix;
    let share = share_mut(&mut shifted, discipline)?;
    *share = (*share + delta).max(MIN_DISCIPLINE_SHARE);
    let shifted = shifted.normalized();
    // Normalization must not have pushed another discipline below floor.
    if shifted.swim < MIN_DISCIPLINE_SHARE
        || shifted.bike < MIN_DISCIPLINE_SHARE
        || shifted.run < MIN_DISCIPLINE_SHARE
    {
        return None;
    }
    Some(shifted)
}

/// Shift the multisport time split toward one discipline.
pub async fn shift_ratio<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    discipline: WorkoutType,
    delta: f64,
) -> EngineResult<ModificationOutcome> {
    if delta.abs() > MAX_RATIO_DELTA || delta.abs() < f64::EPSILON {
        return Ok(ModificationOutcome::unchanged(
            "Ratio shifts are limited to 30 points at a time.",
        ));
    }
    let Some(mut plan) = store.get_active_plan(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No active plan."));
    };
    let Some(mix) = plan.sport_mix else {
        return Ok(ModificationOutcome::unchanged(
            "This is a single-sport plan, there is no sport split to shift.",
        ));
    };
    let Some(shifted) = shift(mix, discipline, delta) else {
        return Ok(ModificationOutcome::unchanged(
            "That shift would squeeze a discipline out of the week.",
        ));
    };
    plan.sport_mix = Some(shifted);
    store.update_plan(&plan).await?;
    Ok(ModificationOutcome::applied(format!(
        "Sport split is now {:.0}% swim, {:.0}% bike, {:.0}% run from the next generated week.",
        shifted.swim * 100.0,
        shifted.bike * 100.0,
        shifted.run * 100.0
    )))
}

/// Change brick frequency for multisport plans.
pub async fn set_brick_frequency<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    per_week: u32,
) -> EngineResult<ModificationOutcome> {
    if per_week > MAX_BRICKS_PER_WEEK {
        return Ok(ModificationOutcome::unchanged(
            "Three bricks a week is the ceiling.",
        ));
    }
    let Some(mut plan) = store.get_active_plan(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No active plan."));
    };
    if plan.sport_mix.is_none() {
        return Ok(ModificationOutcome::unchanged(
            "Bricks only apply to multisport plans.",
        ));
    }
    if plan.tuning.bricks_per_week == per_week {
        return Ok(ModificationOutcome::unchanged(
            "The plan already schedules that many bricks.",
        ));
    }
    plan.tuning.bricks_per_week = per_week;
    store.update_plan(&plan).await?;
    Ok(ModificationOutcome::applied(format!(
        "Brick frequency set to {per_week} per week from the next generated week."
    )))
}

/// Emphasize one discipline, typically the athlete's weakest.
pub async fn focus_discipline<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    discipline: WorkoutType,
) -> EngineResult<ModificationOutcome> {
    let Some(mut plan) = store.get_active_plan(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No active plan."));
    };
    if let Some(mix) = plan.sport_mix {
        let Some(shifted) = shift(mix, discipline, FOCUS_DELTA) else {
            return Ok(ModificationOutcome::unchanged(
                "The split is already as far toward that discipline as it can go.",
            ));
        };
        plan.sport_mix = Some(shifted);
    }
    plan.tuning.emphasized_type = Some(discipline);
    store.update_plan(&plan).await?;
    Ok(ModificationOutcome::applied(format!(
        "Upcoming weeks will lean into {} work.",
        discipline.as_str()
    )))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_shift_renormalizes_to_one() {
        let mix = SportMix::default();
        let shifted = shift(mix, WorkoutType::Run, 0.1).unwrap();
        assert!((shifted.swim + shifted.bike + shifted.run - 1.0).abs() < 1e-9);
        assert!(shifted.run > mix.run);
        assert!(shifted.bike < mix.bike);
    }

    #[test]
    fn test_shift_rejects_squeezing_a_discipline_out() {
        let mix = SportMix {
            swim: 0.06,
            bike: 0.47,
            run: 0.47,
        };
        assert!(shift(mix, WorkoutType::Bike, 0.3).is_none());
    }

    #[test]
    fn test_shift_ignores_non_disciplines() {
        assert!(shift(SportMix::default(), WorkoutType::Strength, 0.1).is_none());
    }
}
