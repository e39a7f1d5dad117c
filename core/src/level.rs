use std::fmt;

use serde::Serialize;

use crate::models::Tier;

/// Inklusive nedre terskler, stigende.
pub const LEVEL_THRESHOLDS: [(Tier, f64); 5] = [
    (Tier::Bronze, 0.0),
    (Tier::Silver, 5_000.0),
    (Tier::Gold, 15_000.0),
    (Tier::Platinum, 30_000.0),
    (Tier::Diamond, 50_000.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Tier {
    pub fn threshold(self) -> f64 {
        LEVEL_THRESHOLDS[self.rank() as usize].1
    }
}

/// Nivå for akkumulert vekt.
///
/// Sjekker fra høyeste terskel og ned (Diamond først), så en verdi
/// nøyaktig på en terskel havner i det nivået. Negative verdier og NaN
/// klemmes til 0, dvs. Bronze.
pub fn compute_level(weight: f64) -> Tier {
    let w = if weight.is_nan() { 0.0 } else { weight.max(0.0) };
    LEVEL_THRESHOLDS
        .iter()
        .rev()
        .find(|(_, threshold)| w >= *threshold)
        .map(|(tier, _)| *tier)
        .unwrap_or(Tier::Bronze)
}

pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Bronze => Color::rgb(0xCD, 0x7F, 0x32),
        Tier::Silver => Color::rgb(0xC0, 0xC0, 0xC0),
        Tier::Gold => Color::rgb(0xFF, 0xD7, 0x00),
        Tier::Platinum => Color::rgb(0xE5, 0xE4, 0xE2),
        Tier::Diamond => Color::rgb(0xB9, 0xF2, 0xFF),
    }
}

/// Tekstfarge på merket: mørk tekst på de lyse nivåene.
pub fn badge_text_color(tier: Tier) -> Color {
    match tier {
        Tier::Silver | Tier::Gold | Tier::Diamond => Color::BLACK,
        Tier::Bronze | Tier::Platinum => Color::WHITE,
    }
}

/// Neste nivå og hvor mye som mangler dit. `None` på Diamond.
pub fn progress_to_next(weight: f64) -> Option<(Tier, f64)> {
    let next = compute_level(weight).next()?;
    let w = if weight.is_nan() { 0.0 } else { weight.max(0.0) };
    Some((next, next.threshold() - w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(compute_level(0.0), Tier::Bronze);
        assert_eq!(compute_level(4_999.99), Tier::Bronze);
        assert_eq!(compute_level(5_000.0), Tier::Silver);
        assert_eq!(compute_level(14_999.0), Tier::Silver);
        assert_eq!(compute_level(15_000.0), Tier::Gold);
        assert_eq!(compute_level(29_999.0), Tier::Gold);
        assert_eq!(compute_level(30_000.0), Tier::Platinum);
        assert_eq!(compute_level(49_999.0), Tier::Platinum);
        assert_eq!(compute_level(50_000.0), Tier::Diamond);
        assert_eq!(compute_level(1e12), Tier::Diamond);
    }

    #[test]
    fn negative_and_nan_clamp_to_bronze() {
        assert_eq!(compute_level(-1.0), Tier::Bronze);
        assert_eq!(compute_level(f64::NAN), Tier::Bronze);
        assert_eq!(compute_level(f64::INFINITY), Tier::Diamond);
    }

    #[test]
    fn colors_match_palette() {
        assert_eq!(tier_color(Tier::Bronze).hex(), "#CD7F32");
        assert_eq!(tier_color(Tier::Silver).hex(), "#C0C0C0");
        assert_eq!(tier_color(Tier::Gold).hex(), "#FFD700");
        assert_eq!(tier_color(Tier::Platinum).hex(), "#E5E4E2");
        assert_eq!(tier_color(Tier::Diamond).to_string(), "#B9F2FF");
    }

    #[test]
    fn badge_text_contrast() {
        assert_eq!(badge_text_color(Tier::Gold), Color::BLACK);
        assert_eq!(badge_text_color(Tier::Bronze), Color::WHITE);
    }

    #[test]
    fn progress_reports_missing_load() {
        assert_eq!(progress_to_next(4_000.0), Some((Tier::Silver, 1_000.0)));
        assert_eq!(progress_to_next(15_000.0), Some((Tier::Platinum, 15_000.0)));
        assert_eq!(progress_to_next(60_000.0), None);
    }

    #[test]
    fn thresholds_follow_tier_order() {
        for (i, (tier, threshold)) in LEVEL_THRESHOLDS.iter().enumerate() {
            assert_eq!(tier.rank() as usize, i);
            assert_eq!(tier.threshold(), *threshold);
        }
    }
}
