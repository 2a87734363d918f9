// ABOUTME: Style-toned athlete-facing messages for adaptation results
// ABOUTME: Tone varies by coaching style; the decisions themselves do not
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Strideplan

use crate::models::athlete::CoachingStyle;

/// Message for a red-zone recovery intervention.
#[must_use]
pub fn red_recovery(style: CoachingStyle, score: u8) -> String {
    match style {
        CoachingStyle::Supportive => format!(
            "Your recovery score is {score} today, so I've eased the next couple of days right back. Rest is where the gains land."
        ),
        CoachingStyle::Balanced => format!(
            "Recovery came in at {score}. I've swapped the hard work out of the next two days and trimmed volume 30% so you can absorb the training."
        ),
        CoachingStyle::Push => format!(
            "Score of {score} is too low to train hard on. Next two days are easy and shorter. We go again when the numbers come back."
        ),
    }
}

/// Message for a yellow-zone recovery intervention.
#[must_use]
pub fn yellow_recovery(style: CoachingStyle, score: u8) -> String {
    match style {
        CoachingStyle::Supportive => format!(
            "Recovery is middling at {score}, so I've softened your next hard session. Listen to your body out there."
        ),
        CoachingStyle::Balanced => format!(
            "Recovery score {score}: I've taken 10% off the next two days as a precaution."
        ),
        CoachingStyle::Push => String::new(),
    }
}

/// Note for a big overperformance on one session.
#[must_use]
pub fn overperformance_note(style: CoachingStyle, diff_pct: f64) -> String {
    let pct = diff_pct.round() as i64;
    match style {
        CoachingStyle::Supportive => format!(
            "You went {pct}% over the prescription. Great energy, but save some for the week ahead."
        ),
        CoachingStyle::Balanced => {
            format!("That session ran {pct}% over plan. Keep an eye on pacing the easy days.")
        }
        CoachingStyle::Push => format!("{pct}% over plan. Strong. Don't leak that into recovery days."),
    }
}

/// Message when sustained overperformance earns a volume bump.
#[must_use]
pub fn volume_bump(style: CoachingStyle, pct: f64) -> String {
    let pct = pct.round() as i64;
    match style {
        CoachingStyle::Supportive => format!(
            "You've been consistently finishing strong, so I've nudged your next session up {pct}%."
        ),
        CoachingStyle::Balanced => {
            format!("Consistent overperformance this week: next session gets {pct}% more volume.")
        }
        CoachingStyle::Push => format!("You're outrunning the plan. Next one is {pct}% bigger."),
    }
}

/// Message when an underperformed workout plus low recovery triggers a
/// reduction.
#[must_use]
pub fn underperformance_cut(style: CoachingStyle) -> String {
    match style {
        CoachingStyle::Supportive => {
            "That one looked like a struggle and your recovery is low, so I've trimmed your next hard session. One rough day changes nothing.".into()
        }
        CoachingStyle::Balanced => {
            "Short session plus a low recovery score: next hard day is reduced 20% to reset.".into()
        }
        CoachingStyle::Push => {
            "Cut that one short with low recovery behind it. Next hard session is trimmed so we can hit it properly.".into()
        }
    }
}

/// Check-in after a heavy-miss week.
#[must_use]
pub fn missed_week_checkin(style: CoachingStyle, missed: usize) -> String {
    match style {
        CoachingStyle::Supportive => format!(
            "Life got in the way this week ({missed} sessions missed) and that's okay. I've lightened next week so it's easy to get back on track. How are you doing?"
        ),
        CoachingStyle::Balanced => format!(
            "{missed} sessions missed this week, so next week is scaled back 20%. Anything I should adjust in the schedule?"
        ),
        CoachingStyle::Push => format!(
            "{missed} misses this week. Next week is trimmed 20% so we rebuild momentum. What's blocking you?"
        ),
    }
}
