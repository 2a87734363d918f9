// ABOUTME: Physiological update handlers: FTP, easy run pace, swim pace
// ABOUTME: Each recomputes the affected zones and rewrites the active plan's zone config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use tracing::info;
use uuid::Uuid;

use crate::constants::validation;
use crate::models::adaptation::ModificationOutcome;
use crate::store::PlanStore;
use crate::zones::{calculate_bike_power_zones, calculate_run_zones, calculate_swim_zones};
use crate::EngineResult;

/// New measured FTP: update the profile, recompute bike power zones,
/// and rewrite them into the active plan.
pub async fn update_ftp<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    watts: u32,
) -> EngineResult<ModificationOutcome> {
    if !(validation::FTP_MIN_WATTS..=validation::FTP_MAX_WATTS).contains(&watts) {
        return Ok(ModificationOutcome::unchanged(
            "That FTP is outside the plausible 80-600W range.",
        ));
    }
    let Some(mut profile) = store.get_profile(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No athlete profile."));
    };
    profile.ftp_watts = Some(watts);
    store.update_profile(&profile).await?;

    let zones = calculate_bike_power_zones(watts);
    if let Some(mut plan) = store.get_active_plan(athlete_id).await? {
        plan.zones.bike = Some(zones);
        store.update_plan(&plan).await?;
    }
    info!(%athlete_id, watts, "ftp updated");
    Ok(ModificationOutcome::applied(format!(
        "FTP set to {watts}W. Power targets update from your next prescribed ride."
    )))
}

/// New measured easy run pace: update the profile, recompute run pace
/// zones, and rewrite them into the active plan.
pub async fn update_run_pace<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    easy_pace_secs_per_km: f64,
) -> EngineResult<ModificationOutcome> {
    if !(validation::EASY_PACE_MIN_SECS..=validation::EASY_PACE_MAX_SECS)
        .contains(&easy_pace_secs_per_km)
    {
        return Ok(ModificationOutcome::unchanged(
            "That pace does not look like an easy-run pace in seconds per km.",
        ));
    }
    let Some(mut profile) = store.get_profile(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No athlete profile."));
    };
    profile.easy_pace_secs_per_km = Some(easy_pace_secs_per_km);
    store.update_profile(&profile).await?;

    let zones = calculate_run_zones(easy_pace_secs_per_km);
    if let Some(mut plan) = store.get_active_plan(athlete_id).await? {
        plan.zones.run = Some(zones);
        store.update_plan(&plan).await?;
    }
    info!(%athlete_id, pace = easy_pace_secs_per_km, "run pace updated");
    Ok(ModificationOutcome::applied(
        "Run zones recalculated from the new easy pace.",
    ))
}

/// New measured swim pace: update the profile, recompute swim zones,
/// and rewrite them into the active plan.
pub async fn update_swim_pace<S: PlanStore>(
    store: &S,
    athlete_id: Uuid,
    swim_pace_secs_per_100m: f64,
) -> EngineResult<ModificationOutcome> {
    if !(validation::SWIM_PACE_MIN_SECS..=validation::SWIM_PACE_MAX_SECS)
        .contains(&swim_pace_secs_per_100m)
    {
        return Ok(ModificationOutcome::unchanged(
            "That pace does not look like a swim pace in seconds per 100m.",
        ));
    }
    let Some(mut profile) = store.get_profile(athlete_id).await? else {
        return Ok(ModificationOutcome::unchanged("No athlete profile."));
    };
    profile.swim_pace_secs_per_100m = Some(swim_pace_secs_per_100m);
    store.update_profile(&profile).await?;

    let zones = calculate_swim_zones(swim_pace_secs_per_100m);
    if let Some(mut plan) = store.get_active_plan(athlete_id).await? {
        plan.zones.swim = Some(zones);
        store.update_plan(&plan).await?;
    }
    info!(%athlete_id, pace = swim_pace_secs_per_100m, "swim pace updated");
    Ok(ModificationOutcome::applied(
        "Swim targets recalculated from the new pace.",
    ))
}
