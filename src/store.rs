// ABOUTME: PlanStore trait: the engine's contract with the external persistence layer
// ABOUTME: Includes the dashmap-backed InMemoryStore reference fake used in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

//! Plan/workout store boundary.
//!
//! Persistence is an external collaborator. The store must support
//! date-range queries, guarantee at most one active plan per athlete,
//! and serialize writes per athlete (advisory lock or single-writer
//! queue), since two near-simultaneous adaptation triggers for the same
//! athlete would otherwise race on read-then-write sequences.

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use uuid::Uuid;

use crate::errors::{EngineError, EngineResult};
use crate::models::athlete::AthleteProfile;
use crate::models::plan::{PlanStatus, TrainingPlan};
use crate::models::recovery::RecoverySnapshot;
use crate::models::workout::{Workout, WorkoutPatch};

/// Persistence contract for plans, workouts, profiles, and recovery
/// data.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Fetch an athlete's profile.
    async fn get_profile(&self, athlete_id: Uuid) -> EngineResult<Option<AthleteProfile>>;

    /// Persist a profile, replacing any prior version.
    async fn update_profile(&self, profile: &AthleteProfile) -> EngineResult<()>;

    /// The athlete's single active plan, if any.
    async fn get_active_plan(&self, athlete_id: Uuid) -> EngineResult<Option<TrainingPlan>>;

    /// Persist a new plan, cancelling any prior active plan for the
    /// athlete.
    async fn create_plan(&self, plan: &TrainingPlan) -> EngineResult<()>;

    /// Persist changes to an existing plan (zones, tuning, phases).
    async fn update_plan(&self, plan: &TrainingPlan) -> EngineResult<()>;

    /// Mark a plan cancelled.
    async fn cancel_plan(&self, plan_id: Uuid) -> EngineResult<()>;

    /// Workouts for an athlete in an inclusive date range, ordered by
    /// date.
    async fn list_workouts(
        &self,
        athlete_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<Workout>>;

    /// Fetch one workout by id.
    async fn get_workout(&self, workout_id: Uuid) -> EngineResult<Option<Workout>>;

    /// Insert-or-replace a batch of workouts.
    async fn upsert_workouts(&self, workouts: &[Workout]) -> EngineResult<()>;

    /// Apply a field patch to a workout.
    async fn update_workout(&self, workout_id: Uuid, patch: &WorkoutPatch) -> EngineResult<()>;

    /// Most recent recovery snapshot for an athlete, by date.
    async fn latest_recovery(&self, athlete_id: Uuid) -> EngineResult<Option<RecoverySnapshot>>;
}

/// Dashmap-backed store for tests and embedding without a database.
///
/// Mirrors the contract the hosted store provides, including
/// cancel-on-create for plans. Snapshots are deduplicated per
/// (athlete, date, source).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    profiles: DashMap<Uuid, AthleteProfile>,
    plans: DashMap<Uuid, TrainingPlan>,
    workouts: DashMap<Uuid, Workout>,
    recovery: DashMap<Uuid, Vec<RecoverySnapshot>>,
}

impl InMemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a recovery snapshot, replacing any prior snapshot for the
    /// same athlete, date, and source.
    pub fn record_recovery(&self, snapshot: RecoverySnapshot) {
        let mut entry = self.recovery.entry(snapshot.athlete_id).or_default();
        entry.retain(|s| !(s.date == snapshot.date && s.source == snapshot.source));
        entry.push(snapshot);
    }

    /// Direct read of every workout for a plan, for assertions.
    #[must_use]
    pub fn workouts_for_plan(&self, plan_id: Uuid) -> Vec<Workout> {
        let mut workouts: Vec<Workout> = self
            .workouts
            .iter()
            .filter(|entry| entry.plan_id == plan_id)
            .map(|entry| entry.clone())
            .collect();
        workouts.sort_by_key(|w| w.scheduled_date);
        workouts
    }
}

#[async_trait]
impl PlanStore for InMemoryStore {
    async fn get_profile(&self, athlete_id: Uuid) -> EngineResult<Option<AthleteProfile>> {
        Ok(self.profiles.get(&athlete_id).map(|p| p.clone()))
    }

    async fn update_profile(&self, profile: &AthleteProfile) -> EngineResult<()> {
        self.profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn get_active_plan(&self, athlete_id: Uuid) -> EngineResult<Option<TrainingPlan>> {
        Ok(self
            .plans
            .iter()
            .find(|entry| entry.athlete_id == athlete_id && entry.status == PlanStatus::Active)
            .map(|entry| entry.clone()))
    }

    async fn create_plan(&self, plan: &TrainingPlan) -> EngineResult<()> {
        // At most one active plan per athlete
        for mut entry in self.plans.iter_mut() {
            if entry.athlete_id == plan.athlete_id && entry.status == PlanStatus::Active {
                entry.status = PlanStatus::Cancelled;
            }
        }
        self.plans.insert(plan.id, plan.clone());
        Ok(())
    }

    async fn update_plan(&self, plan: &TrainingPlan) -> EngineResult<()> {
        if !self.plans.contains_key(&plan.id) {
            return Err(EngineError::store("update_plan", "plan not found"));
        }
        self.plans.insert(plan.id, plan.clone());
        Ok(())
    }

    async fn cancel_plan(&self, plan_id: Uuid) -> EngineResult<()> {
        match self.plans.get_mut(&plan_id) {
            Some(mut plan) => {
                plan.status = PlanStatus::Cancelled;
                Ok(())
            }
            None => Err(EngineError::store("cancel_plan", "plan not found")),
        }
    }

    async fn list_workouts(
        &self,
        athlete_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<Workout>> {
        let mut workouts: Vec<Workout> = self
            .workouts
            .iter()
            .filter(|entry| {
                entry.athlete_id == athlete_id
                    && entry.scheduled_date >= from
                    && entry.scheduled_date <= to
            })
            .map(|entry| entry.clone())
            .collect();
        workouts.sort_by_key(|w| w.scheduled_date);
        Ok(workouts)
    }

    async fn get_workout(&self, workout_id: Uuid) -> EngineResult<Option<Workout>> {
        Ok(self.workouts.get(&workout_id).map(|w| w.clone()))
    }

    async fn upsert_workouts(&self, workouts: &[Workout]) -> EngineResult<()> {
        for workout in workouts {
            self.workouts.insert(workout.id, workout.clone());
        }
        Ok(())
    }

    async fn update_workout(&self, workout_id: Uuid, patch: &WorkoutPatch) -> EngineResult<()> {
        match self.workouts.get_mut(&workout_id) {
            Some(mut workout) => patch.apply_to(&mut workout)?,
            None => return Err(EngineError::store("update_workout", "workout not found")),
        }
        Ok(())
    }

    async fn latest_recovery(&self, athlete_id: Uuid) -> EngineResult<Option<RecoverySnapshot>> {
        Ok(self.recovery.get(&athlete_id).and_then(|snapshots| {
            snapshots
                .iter()
                .max_by_key(|s| s.date)
                .cloned()
        }))
    }
}
