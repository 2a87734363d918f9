// ABOUTME: Engine error types for plan generation and adaptation operations
// ABOUTME: Defines EngineError with structured context and the EngineResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

//! Error taxonomy for the training plan engine.
//!
//! Missing prerequisites (no active plan, no upcoming workouts) are not
//! errors: handlers return no-op results for those. `EngineError` covers
//! the cases that must propagate to the caller: store failures, inputs
//! that cannot be interpreted at all, and broken internal invariants.

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by plan generation, adaptation, and modification.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The backing store rejected or failed an operation.
    ///
    /// The engine never retries; operations are idempotent so the caller
    /// may safely retry the whole trigger.
    #[error("store operation '{operation}' failed: {reason}")]
    Store {
        /// Store method that failed
        operation: &'static str,
        /// Store-provided failure detail
        reason: String,
    },

    /// An illegal workout status transition was requested.
    #[error("illegal workout transition from {from} to {to}")]
    IllegalTransition {
        /// Current status
        from: &'static str,
        /// Requested status
        to: &'static str,
    },

    /// An internal invariant was violated (a bug, not a caller error).
    #[error("internal invariant broken: {context}")]
    Invariant {
        /// Which invariant broke
        context: String,
    },
}

impl EngineError {
    /// Build a store failure from the store's own error text.
    pub fn store(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Store {
            operation,
            reason: reason.into(),
        }
    }
}
