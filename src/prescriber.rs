// ABOUTME: Workout prescription: template + zones + week metadata into a concrete workout
// ABOUTME: Structured descriptions, distance estimation, and phase-context coach notes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

//! Workout prescription.
//!
//! A pure transform: templates carry shares of the weekly minute
//! budget, zones carry the athlete's physiology, and week metadata
//! carries the volume multiplier. The prescriber combines the three
//! into a schedulable workout with a structured description, an
//! estimated distance, and phase/week context stamped into the coach
//! notes. When zones are unavailable, descriptions fall back to
//! duration-only wording and no distance is estimated.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::plan::WeekMeta;
use crate::models::workout::{Intensity, TargetZone, Workout, WorkoutStatus, WorkoutType};
use crate::schedule::round_to_five_minutes;
use crate::templates::{SessionKind, WorkoutTemplate};
use crate::zones::{PaceRange, ZoneConfig};

/// Assumed average speeds for distance estimation on the bike, km/h by
/// effort. Power does not convert to distance directly, so these are
/// deliberate coarse estimates.
const fn bike_speed_kmh(intensity: Intensity) -> f64 {
    match intensity {
        Intensity::Easy => 26.0,
        Intensity::Moderate => 29.0,
        Intensity::Hard => 32.0,
        Intensity::Max => 34.0,
    }
}

/// Produce a concrete workout from a template for a given plan week.
#[must_use]
pub fn prescribe(
    template: &WorkoutTemplate,
    zones: &ZoneConfig,
    week: &WeekMeta,
    weekly_minutes: f64,
    scheduled_date: NaiveDate,
    plan_id: Uuid,
    athlete_id: Uuid,
) -> Workout {
    let duration_minutes =
        round_to_five_minutes(weekly_minutes * template.share * week.volume_multiplier)
            .max(crate::constants::overload::DURATION_ROUNDING_MINUTES);

    let target_zone = target_zone_for(template, zones);
    let description = describe(template, duration_minutes, target_zone.as_ref());
    let distance_meters = estimate_distance(template, zones, duration_minutes);

    let deload_note = if week.is_deload { ", deload week" } else { "" };
    let coach_notes = format!(
        "{} phase, week {} of plan (week {} in phase){}",
        week.phase_name.as_str(),
        week.week_number,
        week.week_in_phase,
        deload_note
    );

    Workout {
        id: Uuid::new_v4(),
        plan_id,
        athlete_id,
        scheduled_date,
        workout_type: template.workout_type,
        title: template.title.clone(),
        description,
        duration_minutes,
        distance_meters,
        intensity: template.intensity,
        status: WorkoutStatus::Scheduled,
        target_zone,
        coach_notes,
        actual_duration_minutes: None,
        actual_distance_meters: None,
    }
}

/// Pick the target zone a session should run in, when zones exist for
/// its discipline.
fn target_zone_for(template: &WorkoutTemplate, zones: &ZoneConfig) -> Option<TargetZone> {
    match template.workout_type {
        WorkoutType::Run => zones.run.map(|run| {
            let range: PaceRange = match template.kind {
                SessionKind::Long => run.long,
                SessionKind::Interval => run.interval,
                SessionKind::Tempo => match template.intensity {
                    Intensity::Max => run.interval,
                    Intensity::Hard => run.tempo,
                    _ => run.moderate,
                },
                _ => run.easy,
            };
            range.as_target()
        }),
        WorkoutType::Bike => zones.bike.map(|bike| {
            let range = match template.intensity {
                Intensity::Easy => bike.z2,
                Intensity::Moderate => bike.z3,
                Intensity::Hard => bike.z4,
                Intensity::Max => bike.z5,
            };
            range.as_target()
        }),
        WorkoutType::Swim => zones.swim.map(|swim| {
            if template.intensity.is_hard() {
                swim.fast_target()
            } else {
                swim.easy_target()
            }
        }),
        WorkoutType::Brick => zones.bike.map(|bike| bike.z3.as_target()),
        WorkoutType::Strength | WorkoutType::Rest => None,
    }
}

/// Structured, athlete-facing session description.
fn describe(template: &WorkoutTemplate, duration: f64, zone: Option<&TargetZone>) -> String {
    let minutes = duration as u32;
    match zone {
        Some(zone) => match template.kind {
            SessionKind::Interval => interval_description(minutes, zone),
            SessionKind::Tempo => tempo_description(minutes, zone),
            SessionKind::Long => long_description(minutes, zone),
            SessionKind::Brick => brick_description(minutes),
            SessionKind::SwimEndurance => {
                format!(
                    "{minutes}min continuous swim at {}. Bilateral breathing, steady turnover.",
                    zone_label(zone)
                )
            }
            SessionKind::SwimSpeed => swim_speed_description(minutes, zone),
            SessionKind::SwimTechnique => format!(
                "{minutes}min drill-focused swim: 400 warmup, then alternate 50 drill / 50 swim at {}.",
                zone_label(zone)
            ),
            SessionKind::Easy => format!(
                "{minutes}min at {}. Conversational effort throughout.",
                zone_label(zone)
            ),
            SessionKind::Strength => strength_description(minutes),
        },
        None => match template.kind {
            SessionKind::Strength => strength_description(minutes),
            SessionKind::Brick => brick_description(minutes),
            _ => format!(
                "{minutes}min {} at {} effort.",
                template.workout_type.as_str(),
                effort_word(template.intensity)
            ),
        },
    }
}

fn interval_description(minutes: u32, zone: &TargetZone) -> String {
    // Warmup and cooldown take 10min each; repeats fill the main set.
    let main = minutes.saturating_sub(20);
    let reps = (main / 5).max(3);
    format!(
        "10min easy warmup, then {reps}x3min at {} with 2min jog recovery, 10min cooldown.",
        zone_label(zone)
    )
}

fn tempo_description(minutes: u32, zone: &TargetZone) -> String {
    let main = (minutes.saturating_sub(20)).max(10);
    format!(
        "10min easy warmup, {main}min sustained at {}, 10min easy cooldown.",
        zone_label(zone)
    )
}

fn long_description(minutes: u32, zone: &TargetZone) -> String {
    format!(
        "{minutes}min steady at {}. Fuel every 30-40min and keep the effort honest but relaxed.",
        zone_label(zone)
    )
}

fn brick_description(minutes: u32) -> String {
    let bike = minutes * 2 / 3;
    let run = minutes - bike;
    format!(
        "{bike}min ride at tempo effort straight into a {run}min run off the bike. Fast transition, settle the legs over the first 5min."
    )
}

fn swim_speed_description(minutes: u32, zone: &TargetZone) -> String {
    let reps = (minutes.saturating_sub(15) / 3).max(4);
    format!(
        "400 warmup, then {reps}x100 at {} on 20s rest, 200 cooldown.",
        zone_label(zone)
    )
}

fn strength_description(minutes: u32) -> String {
    format!(
        "{minutes}min circuit: squats, lunges, single-leg RDLs, planks and hip work. 3 rounds, controlled tempo."
    )
}

fn effort_word(intensity: Intensity) -> &'static str {
    match intensity {
        Intensity::Easy => "easy",
        Intensity::Moderate => "steady",
        Intensity::Hard => "hard",
        Intensity::Max => "max",
    }
}

/// Render a target zone for descriptions.
fn zone_label(zone: &TargetZone) -> String {
    match zone {
        TargetZone::Pace {
            min_secs_per_km,
            max_secs_per_km,
        } => format!(
            "{}-{}/km",
            format_pace(*min_secs_per_km),
            format_pace(*max_secs_per_km)
        ),
        TargetZone::Power {
            min_watts,
            max_watts,
        } => format!("{min_watts}-{max_watts}W"),
        TargetZone::SwimPace {
            min_secs_per_100m,
            max_secs_per_100m,
        } => format!(
            "{}-{}/100m",
            format_pace(*min_secs_per_100m),
            format_pace(*max_secs_per_100m)
        ),
    }
}

/// Seconds into m:ss.
fn format_pace(secs: f64) -> String {
    let total = secs.round() as u32;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Estimate distance from duration and mid-zone pace or speed. Returns
/// `None` when the discipline has no distance notion or zones are
/// missing.
fn estimate_distance(
    template: &WorkoutTemplate,
    zones: &ZoneConfig,
    duration_minutes: f64,
) -> Option<f64> {
    let seconds = duration_minutes * 60.0;
    match template.workout_type {
        WorkoutType::Run => zones.run.map(|run| {
            let pace = match template.kind {
                SessionKind::Long => run.long.midpoint(),
                SessionKind::Interval => run.interval.midpoint(),
                SessionKind::Tempo => run.tempo.midpoint(),
                _ => run.easy.midpoint(),
            };
            seconds / pace * 1000.0
        }),
        WorkoutType::Bike | WorkoutType::Brick => Some(
            duration_minutes / 60.0 * bike_speed_kmh(template.intensity) * 1000.0,
        ),
        WorkoutType::Swim => zones.swim.map(|swim| {
            let pace = if template.intensity.is_hard() {
                swim.fast_secs_per_100m
            } else {
                swim.easy_secs_per_100m
            };
            seconds / pace * 100.0
        }),
        WorkoutType::Strength | WorkoutType::Rest => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::plan::PhaseName;
    use crate::zones::calculate_run_zones;
    use chrono::Weekday;

    fn run_template(kind: SessionKind, title: &str, intensity: Intensity) -> WorkoutTemplate {
        WorkoutTemplate {
            kind,
            workout_type: WorkoutType::Run,
            title: title.to_owned(),
            intensity,
            share: 0.3,
            day: Weekday::Sat,
        }
    }

    fn build_week() -> WeekMeta {
        WeekMeta {
            week_number: 5,
            phase_name: PhaseName::Build,
            week_in_phase: 1,
            is_deload: false,
            volume_multiplier: 1.05,
        }
    }

    #[test]
    fn test_duration_rounds_to_five_and_scales_by_multiplier() {
        let zones = ZoneConfig {
            run: Some(calculate_run_zones(300.0)),
            ..ZoneConfig::default()
        };
        let template = run_template(SessionKind::Long, "Long Run", Intensity::Easy);
        let workout = prescribe(
            &template,
            &zones,
            &build_week(),
            360.0,
            NaiveDate::from_ymd_opt(2026, 4, 4).unwrap(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        // 360 * 0.3 * 1.05 = 113.4 -> 115
        assert!((workout.duration_minutes - 115.0).abs() < 1e-9);
        assert_eq!(workout.status, WorkoutStatus::Scheduled);
        assert!(workout.coach_notes.contains("build phase"));
        assert!(workout.distance_meters.is_some());
    }

    #[test]
    fn test_interval_description_rep_count() {
        let zones = ZoneConfig {
            run: Some(calculate_run_zones(300.0)),
            ..ZoneConfig::default()
        };
        let template = run_template(SessionKind::Interval, "Interval Session", Intensity::Max);
        let mut week = build_week();
        week.volume_multiplier = 1.0;
        let workout = prescribe(
            &template,
            &zones,
            &week,
            200.0,
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        // 200 * 0.3 = 60min -> main 40 -> 8 reps
        assert!(workout.description.contains("8x3min"), "{}", workout.description);
        assert!(matches!(workout.target_zone, Some(TargetZone::Pace { .. })));
    }

    #[test]
    fn test_missing_zones_fall_back_to_duration_only() {
        let template = run_template(SessionKind::Tempo, "Tempo Run", Intensity::Hard);
        let workout = prescribe(
            &template,
            &ZoneConfig::default(),
            &build_week(),
            300.0,
            NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        assert!(workout.target_zone.is_none());
        assert!(workout.distance_meters.is_none());
        assert!(workout.description.contains("hard effort"));
    }

    #[test]
    fn test_deload_note_stamped() {
        let zones = ZoneConfig {
            run: Some(calculate_run_zones(300.0)),
            ..ZoneConfig::default()
        };
        let week = WeekMeta {
            week_number: 4,
            phase_name: PhaseName::Base,
            week_in_phase: 4,
            is_deload: true,
            volume_multiplier: 0.55,
        };
        let template = run_template(SessionKind::Easy, "Easy Run", Intensity::Easy);
        let workout = prescribe(
            &template,
            &zones,
            &week,
            300.0,
            NaiveDate::from_ymd_opt(2026, 3, 26).unwrap(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        assert!(workout.coach_notes.contains("deload week"));
    }
}
