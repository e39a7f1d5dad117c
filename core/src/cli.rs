use std::fmt::Write as _;

use crate::body::{total_weight, BodyObserver};
use crate::level::{compute_level, progress_to_next, tier_color};
use crate::models::{BodyState, MuscleGroup};

/// Tekstversjon av kroppsgrafen: én linje per gruppe pluss total.
pub fn render_body_report(state: &BodyState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Body Levels ---");
    for group in MuscleGroup::ALL {
        let weight = state.get(group);
        let tier = compute_level(weight);
        let next = match progress_to_next(weight) {
            Some((next, missing)) => format!("{missing:.0} to {next}"),
            None => "max".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<10} {:>10.0} kg  {:<9} {}  ({})",
            group.as_str(),
            weight,
            tier.as_str(),
            tier_color(tier),
            next
        );
    }
    let _ = writeln!(out, "Total Weight Lifted: {:.0} kg", total_weight(state));
    out
}

pub fn print_body_report(state: &BodyState) {
    print!("{}", render_body_report(state));
}

/// Observatør som tegner rapporten på nytt ved hver endring
/// og holder siste bilde.
#[derive(Debug, Default)]
pub struct TextBadgeRenderer {
    last_frame: Option<String>,
    frames: usize,
    echo: bool,
}

impl TextBadgeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skriver også hvert bilde til stdout.
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.last_frame.as_deref()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl BodyObserver for TextBadgeRenderer {
    fn on_body_update(&mut self, state: &BodyState) {
        let frame = render_body_report(state);
        if self.echo {
            print!("{frame}");
        }
        self.last_frame = Some(frame);
        self.frames += 1;
    }
}
