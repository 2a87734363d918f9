// ABOUTME: Athlete profile, experience level, sport, and coaching-style models
// ABOUTME: Onboarding-created profile mutated only through the modification router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-reported training background, used for default zones and
/// template aggressiveness when no measured value exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// New to structured training
    Beginner,
    /// 1-3 years of consistent training
    Intermediate,
    /// Multi-year structured training history
    Advanced,
    /// Competitive at a high level
    Elite,
}

/// Primary sport the plan is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    /// Run-focused training
    Running,
    /// Bike-focused training
    Cycling,
    /// Swim-focused training
    Swimming,
    /// Swim + bike + run
    Triathlon,
}

/// How aggressively the engine intervenes and how messages are phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachingStyle {
    /// Err on the side of rest; gentle messaging
    Supportive,
    /// Middle-ground interventions
    Balanced,
    /// Intervene only when clearly needed; direct messaging
    Push,
}

/// Recovery-approach tuning on a 1–5 scale per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryPhilosophy {
    /// Willingness to train through mild fatigue (1 = never, 5 = always)
    pub push_tolerance: u8,
    /// How much recovery the athlete reports needing (1 = little, 5 = lots)
    pub recovery_needs: u8,
}

impl Default for RecoveryPhilosophy {
    fn default() -> Self {
        Self {
            push_tolerance: 3,
            recovery_needs: 3,
        }
    }
}

/// Goal race category, each with a canonical distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceType {
    /// 5 km road race
    FiveK,
    /// 10 km road race
    TenK,
    /// Half marathon
    HalfMarathon,
    /// Marathon
    Marathon,
    /// Sprint-distance triathlon
    SprintTriathlon,
    /// Olympic-distance triathlon
    OlympicTriathlon,
    /// 70.3 triathlon
    HalfIronman,
    /// Full-distance triathlon
    Ironman,
    /// 100-mile ride
    Century,
    /// Timed mass-start ride
    GranFondo,
    /// Open-water swim event
    OpenWaterSwim,
}

impl RaceType {
    /// Canonical race distance in meters (total, across legs for tri).
    #[must_use]
    pub const fn distance_meters(self) -> u32 {
        match self {
            Self::FiveK => 5_000,
            Self::TenK => 10_000,
            Self::HalfMarathon => 21_098,
            Self::Marathon => 42_195,
            Self::SprintTriathlon => 25_750,
            Self::OlympicTriathlon => 51_500,
            Self::HalfIronman => 113_100,
            Self::Ironman => 226_200,
            Self::Century => 160_934,
            Self::GranFondo => 120_000,
            Self::OpenWaterSwim => 3_800,
        }
    }
}

/// The race a plan periodizes toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRace {
    /// Race category
    pub race_type: RaceType,
    /// Race day
    pub date: NaiveDate,
    /// Target finish time in seconds, if the athlete has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_time_secs: Option<u32>,
}

/// Athlete profile created at onboarding.
///
/// Mutated only by the modification router; never destroyed, only
/// superseded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Stable athlete identifier
    pub id: Uuid,
    /// Training background
    pub experience: ExperienceLevel,
    /// Primary sport
    pub sport: Sport,
    /// Measured easy run pace, seconds per km
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easy_pace_secs_per_km: Option<f64>,
    /// Measured functional threshold power, watts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ftp_watts: Option<u32>,
    /// Measured swim pace, seconds per 100m
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swim_pace_secs_per_100m: Option<f64>,
    /// Weekly hours the athlete can train
    pub weekly_hours: f64,
    /// Days of the week available for training
    pub training_days: Vec<Weekday>,
    /// Goal race, when one is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_race: Option<GoalRace>,
    /// Messaging and intervention aggressiveness preference
    pub coaching_style: CoachingStyle,
    /// Recovery-approach tuning
    #[serde(default)]
    pub recovery_philosophy: RecoveryPhilosophy,
}

impl AthleteProfile {
    /// Weekly training budget in minutes.
    #[must_use]
    pub fn weekly_minutes(&self) -> f64 {
        self.weekly_hours * 60.0
    }
}
