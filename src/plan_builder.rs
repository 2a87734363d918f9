// ABOUTME: PlanService: materializes initial plans and extends them week by week
// ABOUTME: Orchestrates phases, week schedule, templates, and prescription over the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

//! Plan construction and extension.
//!
//! `generate_plan` builds the phase skeleton and week schedule for the
//! whole plan, then materializes the first block of weeks as concrete
//! workouts. `extend_plan` materializes the next un-built week, and is
//! idempotent: it checks for existing workouts in the target date range
//! first, so retried triggers create nothing twice.

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::EngineResult;
use crate::models::athlete::{AthleteProfile, Sport};
use crate::models::plan::{week_monday, Phase, PlanStatus, PlanTuning, SportMix, TrainingPlan, WeekMeta};
use crate::models::workout::Workout;
use crate::phases::calculate_phases;
use crate::prescriber::prescribe;
use crate::schedule::build_week_schedule_with_rate;
use crate::store::PlanStore;
use crate::templates::{normalize_days, weekly_templates};
use crate::zones::zones_for_profile;

/// How many weeks `generate_plan` materializes up front; the rest are
/// built by the recurring `extend_plan` trigger.
const INITIAL_MATERIALIZED_WEEKS: u32 = 4;

/// Summary returned by `generate_plan`.
#[derive(Debug, Clone)]
pub struct PlanSummary {
    /// The new plan's id
    pub plan_id: Uuid,
    /// Workouts written for the initial block
    pub workouts_created: usize,
    /// The plan's phase skeleton
    pub phases: Vec<Phase>,
}

/// Summary returned by `extend_plan`.
#[derive(Debug, Clone, Copy)]
pub struct ExtendSummary {
    /// Workouts written for the newly materialized week (0 when the
    /// week already existed or the plan is exhausted)
    pub workouts_created: usize,
}

/// Builds and extends training plans over an injected store.
pub struct PlanService<S: PlanStore> {
    store: S,
}

impl<S: PlanStore> PlanService<S> {
    /// New service over a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service, yielding the store for another service to
    /// wrap.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Materialize a new plan for a profile, cancelling any prior
    /// active plan. `starts_at` is normalized to its week's Monday.
    pub async fn generate_plan(
        &self,
        profile: &AthleteProfile,
        starts_at: NaiveDate,
    ) -> EngineResult<PlanSummary> {
        let starts_at = week_monday(starts_at);
        let race_date = profile.goal_race.map(|race| race.date);
        let phases = calculate_phases(starts_at, race_date);
        let tuning = PlanTuning::default();
        let weeks = build_week_schedule_with_rate(&phases, tuning.overload_rate);
        let total_weeks: u32 = phases.iter().map(|p| p.weeks).sum();
        let zones = zones_for_profile(profile);
        let training_days = normalize_days(&profile.training_days);

        let plan = TrainingPlan {
            id: Uuid::new_v4(),
            athlete_id: profile.id,
            sport: profile.sport,
            status: PlanStatus::Active,
            starts_at,
            ends_at: starts_at + chrono::Duration::weeks(i64::from(total_weeks)),
            phases: phases.clone(),
            weeks,
            zones,
            training_days,
            weekly_minutes: profile.weekly_minutes(),
            sport_mix: (profile.sport == Sport::Triathlon).then(SportMix::default),
            tuning,
        };

        let mut workouts = Vec::new();
        for week_number in 1..=total_weeks.min(INITIAL_MATERIALIZED_WEEKS) {
            workouts.extend(self.materialize_week(&plan, week_number));
        }

        self.store.create_plan(&plan).await?;
        self.store.upsert_workouts(&workouts).await?;

        info!(
            plan_id = %plan.id,
            athlete_id = %profile.id,
            total_weeks,
            workouts = workouts.len(),
            "generated training plan"
        );

        Ok(PlanSummary {
            plan_id: plan.id,
            workouts_created: workouts.len(),
            phases,
        })
    }

    /// Materialize the next un-built week of the athlete's active plan.
    ///
    /// No-ops (0 created) when there is no active plan, the plan is
    /// fully materialized, or the target week already has workouts.
    pub async fn extend_plan(&self, athlete_id: Uuid) -> EngineResult<ExtendSummary> {
        let Some(plan) = self.store.get_active_plan(athlete_id).await? else {
            debug!(%athlete_id, "extend: no active plan");
            return Ok(ExtendSummary { workouts_created: 0 });
        };

        let total_weeks = plan.total_weeks();
        let last_built = self.last_materialized_week(&plan).await?;
        let next_week = last_built + 1;
        if next_week > total_weeks {
            debug!(plan_id = %plan.id, "extend: plan fully materialized");
            return Ok(ExtendSummary { workouts_created: 0 });
        }

        // Idempotency: a retried trigger finds the week already built.
        let week_start = plan.week_start(next_week);
        let week_end = week_start + chrono::Duration::days(6);
        let existing = self
            .store
            .list_workouts(athlete_id, week_start, week_end)
            .await?;
        if !existing.is_empty() {
            debug!(plan_id = %plan.id, next_week, "extend: week already has workouts");
            return Ok(ExtendSummary { workouts_created: 0 });
        }

        let workouts = self.materialize_week(&plan, next_week);
        self.store.upsert_workouts(&workouts).await?;
        info!(
            plan_id = %plan.id,
            week = next_week,
            workouts = workouts.len(),
            "extended training plan"
        );
        Ok(ExtendSummary {
            workouts_created: workouts.len(),
        })
    }

    /// Highest week number that already has workouts on the calendar.
    async fn last_materialized_week(&self, plan: &TrainingPlan) -> EngineResult<u32> {
        let workouts = self
            .store
            .list_workouts(plan.athlete_id, plan.starts_at, plan.ends_at)
            .await?;
        let last = workouts
            .iter()
            .filter(|w| w.plan_id == plan.id)
            .map(|w| ((w.scheduled_date - plan.starts_at).num_days() / 7) as u32 + 1)
            .max()
            .unwrap_or(0);
        Ok(last)
    }

    /// Produce the concrete workouts for one plan week.
    fn materialize_week(&self, plan: &TrainingPlan, week_number: u32) -> Vec<Workout> {
        let Some(week) = plan.week_meta(week_number).copied() else {
            return Vec::new();
        };
        let templates = weekly_templates(
            plan.sport,
            week.phase_name,
            week.is_deload,
            &plan.training_days,
            &plan.tuning,
            plan.sport_mix,
        );
        let week_start = plan.week_start(week_number);
        templates
            .iter()
            .map(|template| {
                let date = week_start
                    + chrono::Duration::days(i64::from(
                        template.day.num_days_from_monday(),
                    ));
                prescribe(
                    template,
                    &plan.zones,
                    &week,
                    plan.weekly_minutes,
                    date,
                    plan.id,
                    plan.athlete_id,
                )
            })
            .collect()
    }
}

/// Rebuild the week metadata for a plan from a given week onward, used
/// when the modification router changes the overload rate or phase
/// durations. Weeks before `from_week` keep their existing metadata.
#[must_use]
pub fn rebuild_weeks_from(plan: &TrainingPlan, from_week: u32) -> Vec<WeekMeta> {
    let rebuilt = build_week_schedule_with_rate(&plan.phases, plan.tuning.overload_rate);
    plan.weeks
        .iter()
        .filter(|w| w.week_number < from_week)
        .copied()
        .chain(rebuilt.into_iter().filter(|w| w.week_number >= from_week))
        .collect()
}
