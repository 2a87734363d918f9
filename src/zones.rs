// ABOUTME: Pace, power, and swim-pace training zone derivation
// ABOUTME: Pure functions from one physiological anchor per sport, with experience defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

//! Zone calculation.
//!
//! Each sport derives its whole zone set multiplicatively from a single
//! anchor: easy run pace (sec/km), FTP (watts), or swim pace
//! (sec/100m). When the athlete has not supplied a measured value, an
//! experience-level default stands in.

use serde::{Deserialize, Serialize};

use crate::constants::{bike_zones, run_zones, swim_zones};
use crate::models::athlete::{AthleteProfile, ExperienceLevel, Sport};
use crate::models::workout::TargetZone;

/// Run pace window in seconds per km; smaller numbers are faster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceRange {
    /// Fast bound
    pub min_secs_per_km: f64,
    /// Slow bound
    pub max_secs_per_km: f64,
}

impl PaceRange {
    /// Midpoint pace, used for distance estimation.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        f64::midpoint(self.min_secs_per_km, self.max_secs_per_km)
    }

    /// As a workout target zone.
    #[must_use]
    pub const fn as_target(&self) -> TargetZone {
        TargetZone::Pace {
            min_secs_per_km: self.min_secs_per_km,
            max_secs_per_km: self.max_secs_per_km,
        }
    }
}

/// Bike power window in watts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerRange {
    /// Lower bound
    pub min_watts: u32,
    /// Upper bound
    pub max_watts: u32,
}

impl PowerRange {
    /// As a workout target zone.
    #[must_use]
    pub const fn as_target(&self) -> TargetZone {
        TargetZone::Power {
            min_watts: self.min_watts,
            max_watts: self.max_watts,
        }
    }
}

/// Run training zones derived from one easy-pace anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunZones {
    /// Conversational running
    pub easy: PaceRange,
    /// Steady aerobic running
    pub moderate: PaceRange,
    /// Comfortably-hard sustained running
    pub tempo: PaceRange,
    /// Lactate threshold work
    pub threshold: PaceRange,
    /// VO2max repeats
    pub interval: PaceRange,
    /// Long-run pace
    pub long: PaceRange,
}

/// Coggan-style 5-zone bike power model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BikePowerZones {
    /// Active recovery
    pub z1: PowerRange,
    /// Endurance
    pub z2: PowerRange,
    /// Tempo
    pub z3: PowerRange,
    /// Threshold
    pub z4: PowerRange,
    /// VO2max
    pub z5: PowerRange,
}

/// Swim paces derived from the critical-swim-speed anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwimZones {
    /// Anchor pace, seconds per 100m
    pub css_secs_per_100m: f64,
    /// Easy swimming pace
    pub easy_secs_per_100m: f64,
    /// Fast-repeat pace
    pub fast_secs_per_100m: f64,
}

impl SwimZones {
    /// Easy-swimming target window (anchor out to easy pace).
    #[must_use]
    pub const fn easy_target(&self) -> TargetZone {
        TargetZone::SwimPace {
            min_secs_per_100m: self.css_secs_per_100m,
            max_secs_per_100m: self.easy_secs_per_100m,
        }
    }

    /// Fast-repeat target window (fast pace up to anchor).
    #[must_use]
    pub const fn fast_target(&self) -> TargetZone {
        TargetZone::SwimPace {
            min_secs_per_100m: self.fast_secs_per_100m,
            max_secs_per_100m: self.css_secs_per_100m,
        }
    }
}

/// The zone sets a plan carries; sports only populate what they use.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Run pace zones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunZones>,
    /// Bike power zones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bike: Option<BikePowerZones>,
    /// Swim paces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swim: Option<SwimZones>,
}

/// Derive run pace zones from an easy-pace anchor in seconds per km.
#[must_use]
pub fn calculate_run_zones(easy_pace_secs_per_km: f64) -> RunZones {
    let p = easy_pace_secs_per_km;
    RunZones {
        easy: PaceRange {
            min_secs_per_km: p,
            max_secs_per_km: p * run_zones::EASY_SLOW_FACTOR,
        },
        moderate: PaceRange {
            min_secs_per_km: p * run_zones::MODERATE_FAST_FACTOR,
            max_secs_per_km: p,
        },
        tempo: PaceRange {
            min_secs_per_km: p * run_zones::TEMPO_FAST_FACTOR,
            max_secs_per_km: p * run_zones::TEMPO_SLOW_FACTOR,
        },
        threshold: PaceRange {
            min_secs_per_km: p * run_zones::THRESHOLD_FAST_FACTOR,
            max_secs_per_km: p * run_zones::THRESHOLD_SLOW_FACTOR,
        },
        interval: PaceRange {
            min_secs_per_km: p * run_zones::INTERVAL_FAST_FACTOR,
            max_secs_per_km: p * run_zones::INTERVAL_SLOW_FACTOR,
        },
        long: PaceRange {
            min_secs_per_km: p,
            max_secs_per_km: p * run_zones::LONG_SLOW_FACTOR,
        },
    }
}

/// Derive the 5-zone bike power model from FTP, bounds rounded to
/// integer watts.
#[must_use]
pub fn calculate_bike_power_zones(ftp_watts: u32) -> BikePowerZones {
    let ftp = f64::from(ftp_watts);
    let watts = |fraction: f64| (ftp * fraction).round() as u32;
    BikePowerZones {
        z1: PowerRange {
            min_watts: 0,
            max_watts: watts(bike_zones::Z1_MAX),
        },
        z2: PowerRange {
            min_watts: watts(bike_zones::Z2_MIN),
            max_watts: watts(bike_zones::Z2_MAX),
        },
        z3: PowerRange {
            min_watts: watts(bike_zones::Z3_MIN),
            max_watts: watts(bike_zones::Z3_MAX),
        },
        z4: PowerRange {
            min_watts: watts(bike_zones::Z4_MIN),
            max_watts: watts(bike_zones::Z4_MAX),
        },
        z5: PowerRange {
            min_watts: watts(bike_zones::Z5_MIN),
            max_watts: watts(bike_zones::Z5_MAX),
        },
    }
}

/// Derive swim paces from the critical-swim-speed anchor in seconds
/// per 100m.
#[must_use]
pub fn calculate_swim_zones(css_secs_per_100m: f64) -> SwimZones {
    SwimZones {
        css_secs_per_100m,
        easy_secs_per_100m: css_secs_per_100m * swim_zones::EASY_FACTOR,
        fast_secs_per_100m: css_secs_per_100m * swim_zones::FAST_FACTOR,
    }
}

/// Default easy run pace by experience level, seconds per km.
#[must_use]
pub const fn default_easy_pace(level: ExperienceLevel) -> f64 {
    match level {
        ExperienceLevel::Beginner => 390.0,      // 6:30/km
        ExperienceLevel::Intermediate => 330.0,  // 5:30/km
        ExperienceLevel::Advanced => 285.0,      // 4:45/km
        ExperienceLevel::Elite => 240.0,         // 4:00/km
    }
}

/// Default FTP by experience level, watts.
#[must_use]
pub const fn default_ftp(level: ExperienceLevel) -> u32 {
    match level {
        ExperienceLevel::Beginner => 150,
        ExperienceLevel::Intermediate => 200,
        ExperienceLevel::Advanced => 260,
        ExperienceLevel::Elite => 320,
    }
}

/// Default swim pace by experience level, seconds per 100m.
#[must_use]
pub const fn default_swim_pace(level: ExperienceLevel) -> f64 {
    match level {
        ExperienceLevel::Beginner => 130.0, // 2:10/100m
        ExperienceLevel::Intermediate => 110.0,
        ExperienceLevel::Advanced => 95.0,
        ExperienceLevel::Elite => 80.0,
    }
}

/// Build the zone configuration a plan stores for a profile, filling
/// unmeasured anchors with experience defaults. Sports only get the
/// zone sets they train in.
#[must_use]
pub fn zones_for_profile(profile: &AthleteProfile) -> ZoneConfig {
    let run = || {
        calculate_run_zones(
            profile
                .easy_pace_secs_per_km
                .unwrap_or_else(|| default_easy_pace(profile.experience)),
        )
    };
    let bike = || {
        calculate_bike_power_zones(
            profile.ftp_watts.unwrap_or_else(|| default_ftp(profile.experience)),
        )
    };
    let swim = || {
        calculate_swim_zones(
            profile
                .swim_pace_secs_per_100m
                .unwrap_or_else(|| default_swim_pace(profile.experience)),
        )
    };

    match profile.sport {
        Sport::Running => ZoneConfig {
            run: Some(run()),
            bike: None,
            swim: None,
        },
        Sport::Cycling => ZoneConfig {
            run: None,
            bike: Some(bike()),
            swim: None,
        },
        Sport::Swimming => ZoneConfig {
            run: None,
            bike: None,
            swim: Some(swim()),
        },
        Sport::Triathlon => ZoneConfig {
            run: Some(run()),
            bike: Some(bike()),
            swim: Some(swim()),
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::athlete::{CoachingStyle, RecoveryPhilosophy};
    use uuid::Uuid;

    #[test]
    fn test_run_zones_derive_from_anchor() {
        let zones = calculate_run_zones(300.0);
        assert!((zones.easy.min_secs_per_km - 300.0).abs() < 1e-9);
        assert!((zones.easy.max_secs_per_km - 345.0).abs() < 1e-9);
        assert!((zones.tempo.min_secs_per_km - 246.0).abs() < 1e-9);
        assert!((zones.interval.max_secs_per_km - 234.0).abs() < 1e-9);
        // Faster zones have smaller numbers
        assert!(zones.interval.min_secs_per_km < zones.threshold.min_secs_per_km);
        assert!(zones.threshold.min_secs_per_km < zones.tempo.min_secs_per_km);
    }

    #[test]
    fn test_bike_zone_round_trip_for_arbitrary_ftp() {
        for ftp in [97_u32, 150, 213, 250, 287, 301, 399] {
            let zones = calculate_bike_power_zones(ftp);
            let expected = (f64::from(ftp) * 0.56).round() as u32;
            assert_eq!(zones.z2.min_watts, expected, "ftp={ftp}");
            assert_eq!(zones.z1.min_watts, 0);
            assert!(zones.z5.max_watts > zones.z4.max_watts);
        }
    }

    #[test]
    fn test_swim_zones() {
        let zones = calculate_swim_zones(100.0);
        assert!((zones.easy_secs_per_100m - 115.0).abs() < 1e-9);
        assert!((zones.fast_secs_per_100m - 92.0).abs() < 1e-9);
    }

    #[test]
    fn test_profile_defaults_fill_missing_anchors() {
        let profile = AthleteProfile {
            id: Uuid::new_v4(),
            experience: ExperienceLevel::Intermediate,
            sport: Sport::Triathlon,
            easy_pace_secs_per_km: None,
            ftp_watts: Some(250),
            swim_pace_secs_per_100m: None,
            weekly_hours: 8.0,
            training_days: vec![],
            goal_race: None,
            coaching_style: CoachingStyle::Balanced,
            recovery_philosophy: RecoveryPhilosophy::default(),
        };
        let config = zones_for_profile(&profile);
        let run = config.run.unwrap();
        assert!((run.easy.min_secs_per_km - 330.0).abs() < 1e-9);
        assert_eq!(config.bike.unwrap().z2.min_watts, 140);
        assert!((config.swim.unwrap().css_secs_per_100m - 110.0).abs() < 1e-9);
    }
}
