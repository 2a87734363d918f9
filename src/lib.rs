// ABOUTME: Adaptive training plan engine: periodized plan construction and rule-driven adaptation
// ABOUTME: Pure scheduling/adaptation decisions over an injected plan store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

#![deny(unsafe_code)]

//! # Strideplan Engine
//!
//! The adaptive training plan engine behind the Strideplan coaching
//! app. Two responsibilities:
//!
//! 1. **Plan construction**: turn an athlete profile and goal race into
//!    a periodized, week-by-week schedule of concrete workouts
//!    (phases, deload cycles, progressive overload, zone-based
//!    prescriptions, day-assignment heuristics).
//! 2. **Plan adaptation**: continuously mutate that schedule in
//!    response to recovery scores, workout performance, missed
//!    sessions, and structured modification requests.
//!
//! Everything upstream of a decision is pure; side effects are
//! confined to the [`store::PlanStore`] the caller injects. The UI,
//! chat layer, wearable sync, and durable storage live outside this
//! crate.
//!
//! ## Modules
//!
//! - **models**: athlete, plan, workout, recovery, and action types
//! - **zones**: pace/power/swim-pace zone derivation from single anchors
//! - **phases**: base/build/peak/taper periodization
//! - **schedule**: week metadata with deloads and progressive overload
//! - **templates**: per-sport weekly session templates and day assignment
//! - **prescriber**: templates + zones + week metadata to concrete workouts
//! - **plan_builder**: plan generation and idempotent week extension
//! - **adaptation**: recovery, performance, and missed-workout rule engines
//! - **modification**: routed, typed modification requests
//! - **store**: the persistence trait plus an in-memory reference store

/// Engine error taxonomy
pub mod errors;

/// Tunable thresholds and multipliers organized by domain
pub mod constants;

/// Athlete, plan, workout, recovery, and adaptation-action models
pub mod models;

/// Training zone derivation from single physiological anchors
pub mod zones;

/// Phase periodization between plan start and race day
pub mod phases;

/// Week-by-week schedule metadata: deloads and progressive overload
pub mod schedule;

/// Per-sport weekly workout templates and day-assignment heuristics
pub mod templates;

/// Template to concrete-workout conversion
pub mod prescriber;

/// Plan generation and week-by-week extension
pub mod plan_builder;

/// Recovery, performance, and missed-workout rule engines
pub mod adaptation;

/// Structured modification request routing
pub mod modification;

/// Athlete-facing message phrasing per coaching style
pub mod messages;

/// Persistence trait and in-memory reference store
pub mod store;

pub use adaptation::AdaptationService;
pub use errors::{EngineError, EngineResult};
pub use modification::{ModificationRequest, ModificationRouter};
pub use plan_builder::{PlanService, PlanSummary};
pub use store::{InMemoryStore, PlanStore};
