// ABOUTME: Wearable-derived recovery snapshot and red/yellow/green classification
// ABOUTME: Snapshots are immutable once synced; one per athlete, date, and source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::recovery;

/// Red/yellow/green classification of a recovery score, driving
/// adaptation aggressiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryZone {
    /// Score below 33: always intervene
    Red,
    /// Score 33–65: style-dependent intervention
    Yellow,
    /// Score 66+: no action
    Green,
}

impl RecoveryZone {
    /// Classify a 0–100 recovery score.
    #[must_use]
    pub const fn classify(score: u8) -> Self {
        if score < recovery::RED_BELOW {
            Self::Red
        } else if score < recovery::YELLOW_BELOW {
            Self::Yellow
        } else {
            Self::Green
        }
    }
}

/// One day's synced recovery data from a wearable provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoverySnapshot {
    /// Owning athlete
    pub athlete_id: Uuid,
    /// Day the sample describes
    pub date: NaiveDate,
    /// Wearable provider, e.g. "whoop" or "garmin"
    pub source: String,
    /// Composite recovery score, 0–100
    pub recovery_score: u8,
    /// Heart rate variability in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hrv_ms: Option<f64>,
    /// Resting heart rate in bpm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resting_hr: Option<u32>,
    /// Sleep duration in hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
}

impl RecoverySnapshot {
    /// Zone classification for this snapshot's score.
    #[must_use]
    pub const fn zone(&self) -> RecoveryZone {
        RecoveryZone::classify(self.recovery_score)
    }
}
