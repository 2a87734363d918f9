// ABOUTME: Sport- and phase-specific workout templates with day-assignment heuristics
// ABOUTME: Long sessions on the long day, hard sessions spaced onto non-adjacent days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

//! Weekly workout template generation.
//!
//! Templates carry a *share* of the weekly minute budget, not absolute
//! numbers; converting shares into concrete durations, distances, and
//! zone targets is the prescriber's job. Day placement follows two
//! heuristics: the long session lands on the preferred long day
//! (weekend by default), and hard sessions are rejected from days
//! adjacent to an already-assigned hard day, with Sun↔Mon counted as
//! adjacent and ties broken by taking the middle of the remaining
//! candidates.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::athlete::Sport;
use crate::models::plan::{PhaseName, PlanTuning, SportMix};
use crate::models::workout::{Intensity, WorkoutType};

/// What a template session is for; keys the prescriber's description
/// generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// Weekly long session
    Long,
    /// VO2max repeats
    Interval,
    /// Tempo / sweet-spot work
    Tempo,
    /// Easy aerobic session
    Easy,
    /// Bike + run back-to-back
    Brick,
    /// Steady distance swim
    SwimEndurance,
    /// Fast swim repeats
    SwimSpeed,
    /// Drill-focused swim
    SwimTechnique,
    /// Strength circuit
    Strength,
}

/// A day-tagged workout template for one week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    /// Session purpose
    pub kind: SessionKind,
    /// Discipline
    pub workout_type: WorkoutType,
    /// Athlete-facing title
    pub title: String,
    /// Prescribed effort
    pub intensity: Intensity,
    /// Share of the weekly minute budget, 0–1; shares in a week sum to 1
    pub share: f64,
    /// Assigned day
    pub day: Weekday,
}

/// An unplaced session produced by the per-sport mixes.
#[derive(Debug, Clone)]
struct SessionSpec {
    kind: SessionKind,
    workout_type: WorkoutType,
    title: &'static str,
    intensity: Intensity,
    share: f64,
}

impl SessionSpec {
    const fn new(
        kind: SessionKind,
        workout_type: WorkoutType,
        title: &'static str,
        intensity: Intensity,
        share: f64,
    ) -> Self {
        Self {
            kind,
            workout_type,
            title,
            intensity,
            share,
        }
    }
}

/// Canonical Mon–Sun ordering of available days, deduplicated. Falls
/// back to Tue/Thu/Sat when the athlete supplied none.
#[must_use]
pub fn normalize_days(days: &[Weekday]) -> Vec<Weekday> {
    let mut ordered: Vec<Weekday> = Vec::with_capacity(days.len());
    let mut all = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter();
    ordered.extend(all.by_ref().filter(|d| days.contains(d)));
    if ordered.is_empty() {
        return vec![Weekday::Tue, Weekday::Thu, Weekday::Sat];
    }
    ordered
}

/// Whether two weekdays are adjacent, counting the Sun↔Mon wraparound.
#[must_use]
pub fn days_adjacent(a: Weekday, b: Weekday) -> bool {
    let (a, b) = (
        a.num_days_from_monday() as i32,
        b.num_days_from_monday() as i32,
    );
    let gap = (a - b).abs();
    gap == 1 || gap == 6
}

/// Preferred long-session day: Saturday, then Sunday, then the last
/// available day.
fn long_day(days: &[Weekday]) -> Weekday {
    if days.contains(&Weekday::Sat) {
        Weekday::Sat
    } else if days.contains(&Weekday::Sun) {
        Weekday::Sun
    } else {
        *days.last().unwrap_or(&Weekday::Sat)
    }
}

/// Generate the week's day-tagged templates for a sport, phase, and
/// set of available days.
#[must_use]
pub fn weekly_templates(
    sport: Sport,
    phase: PhaseName,
    is_deload: bool,
    available_days: &[Weekday],
    tuning: &PlanTuning,
    sport_mix: Option<SportMix>,
) -> Vec<WorkoutTemplate> {
    let days = normalize_days(available_days);
    let mut sessions = match sport {
        Sport::Running => running_sessions(phase, is_deload),
        Sport::Cycling => cycling_sessions(phase, is_deload),
        Sport::Swimming => swimming_sessions(phase, is_deload),
        Sport::Triathlon => triathlon_sessions(phase, is_deload, tuning, sport_mix),
    };

    apply_type_tuning(&mut sessions, tuning);
    cap_hard_sessions(&mut sessions, days.len(), tuning.hard_session_fraction, is_deload);
    sessions.truncate(days.len());
    renormalize_shares(&mut sessions);
    assign_days(&sessions, &days)
}

fn running_sessions(phase: PhaseName, is_deload: bool) -> Vec<SessionSpec> {
    use Intensity::{Easy, Hard, Max, Moderate};
    use SessionKind as K;
    use WorkoutType::Run;

    if is_deload {
        // Reduced volume, no hard sessions
        return vec![
            SessionSpec::new(K::Long, Run, "Relaxed Long Run", Easy, 0.35),
            SessionSpec::new(K::Easy, Run, "Easy Run", Easy, 0.25),
            SessionSpec::new(K::Easy, Run, "Recovery Run", Easy, 0.20),
            SessionSpec::new(K::Easy, Run, "Easy Run", Easy, 0.20),
        ];
    }

    match phase {
        PhaseName::Base => vec![
            SessionSpec::new(K::Long, Run, "Long Run", Easy, 0.30),
            SessionSpec::new(K::Tempo, Run, "Tempo Run", Hard, 0.20),
            SessionSpec::new(K::Easy, Run, "Easy Run", Easy, 0.20),
            SessionSpec::new(K::Easy, Run, "Easy Run", Easy, 0.15),
            SessionSpec::new(K::Strength, WorkoutType::Strength, "Strength Circuit", Moderate, 0.15),
        ],
        PhaseName::Build => vec![
            SessionSpec::new(K::Long, Run, "Long Run", Easy, 0.30),
            SessionSpec::new(K::Interval, Run, "Interval Session", Max, 0.18),
            SessionSpec::new(K::Tempo, Run, "Tempo Run", Hard, 0.18),
            SessionSpec::new(K::Easy, Run, "Easy Run", Easy, 0.18),
            SessionSpec::new(K::Easy, Run, "Easy Run", Easy, 0.16),
        ],
        PhaseName::Peak => vec![
            SessionSpec::new(K::Long, Run, "Long Run", Easy, 0.25),
            SessionSpec::new(K::Interval, Run, "Race-Pace Intervals", Max, 0.22),
            SessionSpec::new(K::Tempo, Run, "Threshold Run", Hard, 0.20),
            SessionSpec::new(K::Easy, Run, "Easy Run", Easy, 0.18),
            SessionSpec::new(K::Easy, Run, "Recovery Run", Easy, 0.15),
        ],
        PhaseName::Taper => vec![
            SessionSpec::new(K::Long, Run, "Long Run", Easy, 0.30),
            SessionSpec::new(K::Tempo, Run, "Race Sharpener", Hard, 0.20),
            SessionSpec::new(K::Easy, Run, "Easy Run", Easy, 0.25),
            SessionSpec::new(K::Easy, Run, "Shakeout Run", Easy, 0.25),
        ],
    }
}

fn cycling_sessions(phase: PhaseName, is_deload: bool) -> Vec<SessionSpec> {
    use Intensity::{Easy, Hard, Max};
    use SessionKind as K;
    use WorkoutType::Bike;

    if is_deload {
        return vec![
            SessionSpec::new(K::Long, Bike, "Relaxed Long Ride", Easy, 0.40),
            SessionSpec::new(K::Easy, Bike, "Easy Spin", Easy, 0.30),
            SessionSpec::new(K::Easy, Bike, "Recovery Spin", Easy, 0.30),
        ];
    }

    match phase {
        PhaseName::Base => vec![
            SessionSpec::new(K::Long, Bike, "Long Ride", Easy, 0.35),
            SessionSpec::new(K::Tempo, Bike, "Sweet Spot Intervals", Hard, 0.20),
            SessionSpec::new(K::Easy, Bike, "Endurance Spin", Easy, 0.25),
            SessionSpec::new(K::Easy, Bike, "Easy Spin", Easy, 0.20),
        ],
        PhaseName::Build => vec![
            SessionSpec::new(K::Long, Bike, "Long Ride", Easy, 0.35),
            SessionSpec::new(K::Interval, Bike, "VO2 Intervals", Max, 0.18),
            SessionSpec::new(K::Tempo, Bike, "Threshold Intervals", Hard, 0.18),
            SessionSpec::new(K::Easy, Bike, "Endurance Spin", Easy, 0.29),
        ],
        PhaseName::Peak => vec![
            SessionSpec::new(K::Long, Bike, "Long Ride", Easy, 0.30),
            SessionSpec::new(K::Interval, Bike, "VO2 Intervals", Max, 0.22),
            SessionSpec::new(K::Tempo, Bike, "Threshold Intervals", Hard, 0.20),
            SessionSpec::new(K::Easy, Bike, "Endurance Spin", Easy, 0.28),
        ],
        PhaseName::Taper => vec![
            SessionSpec::new(K::Long, Bike, "Long Ride", Easy, 0.35),
            SessionSpec::new(K::Tempo, Bike, "Race Openers", Hard, 0.20),
            SessionSpec::new(K::Easy, Bike, "Easy Spin", Easy, 0.45),
        ],
    }
}

fn swimming_sessions(phase: PhaseName, is_deload: bool) -> Vec<SessionSpec> {
    use Intensity::{Easy, Hard, Max, Moderate};
    use SessionKind as K;
    use WorkoutType::Swim;

    if is_deload {
        return vec![
            SessionSpec::new(K::SwimEndurance, Swim, "Relaxed Distance Swim", Easy, 0.40),
            SessionSpec::new(K::SwimTechnique, Swim, "Technique Swim", Easy, 0.30),
            SessionSpec::new(K::SwimEndurance, Swim, "Easy Swim", Easy, 0.30),
        ];
    }

    match phase {
        PhaseName::Base => vec![
            SessionSpec::new(K::SwimEndurance, Swim, "Long Distance Swim", Easy, 0.30),
            SessionSpec::new(K::SwimTechnique, Swim, "Technique Swim", Easy, 0.25),
            SessionSpec::new(K::Tempo, Swim, "Threshold Set", Hard, 0.25),
            SessionSpec::new(K::SwimEndurance, Swim, "Aerobic Swim", Moderate, 0.20),
        ],
        PhaseName::Build | PhaseName::Peak => vec![
            SessionSpec::new(K::SwimEndurance, Swim, "Long Distance Swim", Easy, 0.28),
            SessionSpec::new(K::SwimSpeed, Swim, "Speed Set", Max, 0.22),
            SessionSpec::new(K::Tempo, Swim, "Threshold Set", Hard, 0.25),
            SessionSpec::new(K::SwimTechnique, Swim, "Technique Swim", Easy, 0.25),
        ],
        PhaseName::Taper => vec![
            SessionSpec::new(K::SwimEndurance, Swim, "Distance Swim", Easy, 0.35),
            SessionSpec::new(K::SwimSpeed, Swim, "Race Sharpener Set", Hard, 0.25),
            SessionSpec::new(K::SwimTechnique, Swim, "Technique Swim", Easy, 0.40),
        ],
    }
}

fn triathlon_sessions(
    phase: PhaseName,
    is_deload: bool,
    tuning: &PlanTuning,
    sport_mix: Option<SportMix>,
) -> Vec<SessionSpec> {
    use Intensity::{Easy, Hard, Max};
    use SessionKind as K;

    let mix = sport_mix.unwrap_or_default().normalized();

    if is_deload {
        return vec![
            SessionSpec::new(K::Long, WorkoutType::Bike, "Relaxed Long Ride", Easy, mix.bike * 0.8),
            SessionSpec::new(K::Easy, WorkoutType::Run, "Easy Run", Easy, mix.run * 0.8),
            SessionSpec::new(K::SwimTechnique, WorkoutType::Swim, "Technique Swim", Easy, mix.swim),
            SessionSpec::new(K::Easy, WorkoutType::Bike, "Easy Spin", Easy, mix.bike * 0.4),
        ];
    }

    // One session per discipline first (balance), then the brick and
    // phase-specific quality work.
    let mut sessions = vec![
        SessionSpec::new(K::Long, WorkoutType::Bike, "Long Ride", Easy, mix.bike * 0.6),
        SessionSpec::new(K::Long, WorkoutType::Run, "Long Run", Easy, mix.run * 0.6),
        SessionSpec::new(
            K::SwimEndurance,
            WorkoutType::Swim,
            "Endurance Swim",
            Easy,
            mix.swim * 0.6,
        ),
    ];

    if tuning.bricks_per_week > 0 && phase != PhaseName::Base {
        sessions.push(SessionSpec::new(
            K::Brick,
            WorkoutType::Brick,
            "Brick Session",
            Hard,
            0.18,
        ));
    }

    match phase {
        PhaseName::Base => {
            sessions.push(SessionSpec::new(
                K::Tempo,
                WorkoutType::Bike,
                "Sweet Spot Intervals",
                Hard,
                mix.bike * 0.4,
            ));
            sessions.push(SessionSpec::new(
                K::SwimTechnique,
                WorkoutType::Swim,
                "Technique Swim",
                Easy,
                mix.swim * 0.4,
            ));
            sessions.push(SessionSpec::new(
                K::Easy,
                WorkoutType::Run,
                "Easy Run",
                Easy,
                mix.run * 0.4,
            ));
        }
        PhaseName::Build | PhaseName::Peak => {
            sessions.push(SessionSpec::new(
                K::Interval,
                WorkoutType::Run,
                "Interval Session",
                Max,
                mix.run * 0.4,
            ));
            sessions.push(SessionSpec::new(
                K::SwimSpeed,
                WorkoutType::Swim,
                "Speed Set",
                Max,
                mix.swim * 0.4,
            ));
            sessions.push(SessionSpec::new(
                K::Easy,
                WorkoutType::Bike,
                "Endurance Spin",
                Easy,
                mix.bike * 0.4,
            ));
        }
        PhaseName::Taper => {
            sessions.push(SessionSpec::new(
                K::Tempo,
                WorkoutType::Run,
                "Race Sharpener",
                Hard,
                mix.run * 0.4,
            ));
            sessions.push(SessionSpec::new(
                K::Easy,
                WorkoutType::Swim,
                "Easy Swim",
                Easy,
                mix.swim * 0.4,
            ));
        }
    }

    sessions
}

/// Apply the emphasize/de-emphasize knobs: drop sessions of a
/// de-emphasized type (keeping at least two sessions), and retitle one
/// easy session toward the emphasized type when none exists.
fn apply_type_tuning(sessions: &mut Vec<SessionSpec>, tuning: &PlanTuning) {
    if let Some(avoid) = tuning.deemphasized_type {
        let mut kept_one = false;
        sessions.retain(|s| {
            if s.workout_type == avoid && kept_one && s.kind != SessionKind::Long {
                false
            } else {
                if s.workout_type == avoid {
                    kept_one = true;
                }
                true
            }
        });
    }
    if let Some(favor) = tuning.emphasized_type {
        let has_one = sessions.iter().any(|s| s.workout_type == favor);
        if !has_one {
            if let Some(slot) = sessions
                .iter_mut()
                .rev()
                .find(|s| s.kind == SessionKind::Easy)
            {
                slot.workout_type = favor;
                slot.kind = match favor {
                    WorkoutType::Strength => SessionKind::Strength,
                    WorkoutType::Swim => SessionKind::SwimEndurance,
                    _ => SessionKind::Easy,
                };
                slot.title = match favor {
                    WorkoutType::Strength => "Strength Circuit",
                    WorkoutType::Swim => "Aerobic Swim",
                    WorkoutType::Bike => "Easy Spin",
                    _ => "Easy Run",
                };
            }
        }
    }
}

/// Enforce the hard-session cap: deload weeks allow none; otherwise at
/// most `round(days * fraction)` (minimum 1) hard sessions survive,
/// excess hard sessions becoming easy equivalents.
fn cap_hard_sessions(
    sessions: &mut [SessionSpec],
    day_count: usize,
    hard_fraction: f64,
    is_deload: bool,
) {
    let cap = if is_deload {
        0
    } else {
        ((day_count as f64 * hard_fraction).round() as usize).max(1)
    };
    let mut hard_seen = 0_usize;
    for session in sessions.iter_mut() {
        if session.intensity.is_hard() {
            hard_seen += 1;
            if hard_seen > cap {
                session.intensity = Intensity::Easy;
                session.kind = SessionKind::Easy;
                session.title = "Easy Session";
            }
        }
    }
}

fn renormalize_shares(sessions: &mut [SessionSpec]) {
    let total: f64 = sessions.iter().map(|s| s.share).sum();
    if total > f64::EPSILON {
        for session in sessions.iter_mut() {
            session.share /= total;
        }
    }
}

/// Place sessions onto days: long session on the long day, hard
/// sessions spaced apart, easy sessions filling what remains.
fn assign_days(sessions: &[SessionSpec], days: &[Weekday]) -> Vec<WorkoutTemplate> {
    let mut free: Vec<Weekday> = days.to_vec();
    let mut hard_days: Vec<Weekday> = Vec::new();
    let mut placed: Vec<(usize, Weekday)> = Vec::with_capacity(sessions.len());

    // Long session first
    if let Some(idx) = sessions.iter().position(|s| {
        matches!(s.kind, SessionKind::Long | SessionKind::SwimEndurance)
    }) {
        let day = long_day(&free);
        free.retain(|d| *d != day);
        placed.push((idx, day));
    }

    // Hard sessions next, spaced away from each other
    for (idx, session) in sessions.iter().enumerate() {
        if placed.iter().any(|(i, _)| *i == idx) || !session.intensity.is_hard() {
            continue;
        }
        let candidates: Vec<Weekday> = free
            .iter()
            .copied()
            .filter(|d| !hard_days.iter().any(|h| days_adjacent(*d, *h)))
            .collect();
        let day = if candidates.is_empty() {
            match free.first() {
                Some(d) => *d,
                None => break,
            }
        } else {
            // Middle of the candidate run for spacing
            candidates[candidates.len() / 2]
        };
        free.retain(|d| *d != day);
        hard_days.push(day);
        placed.push((idx, day));
    }

    // Everything else in calendar order
    for (idx, _) in sessions.iter().enumerate() {
        if placed.iter().any(|(i, _)| *i == idx) {
            continue;
        }
        let Some(day) = free.first().copied() else {
            break;
        };
        free.retain(|d| *d != day);
        placed.push((idx, day));
    }

    let mut templates: Vec<WorkoutTemplate> = placed
        .into_iter()
        .map(|(idx, day)| {
            let s = &sessions[idx];
            WorkoutTemplate {
                kind: s.kind,
                workout_type: s.workout_type,
                title: s.title.to_owned(),
                intensity: s.intensity,
                share: s.share,
                day,
            }
        })
        .collect();
    templates.sort_by_key(|t| t.day.num_days_from_monday());
    templates
}
