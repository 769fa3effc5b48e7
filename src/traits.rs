//! Trait Selection
//!
//! Turns a PRNG stream into one concrete trait tuple. Exactly eight draws
//! are consumed per avatar, in a fixed order; the order is part of the
//! output contract, since reassigning a draw to a different slot reshuffles
//! every portrait.

use serde::{Deserialize, Serialize};

use crate::palette::{
    Accessory, Extra, HairStyle, MouthStyle, Rgba, SkinTone, ACCESSORY_TABLE, BACKGROUNDS,
    EXTRA_TABLE, EYE_COLORS, HAIR_COLORS, HAIR_STYLES, MOUTH_TABLE, SKIN_TONES,
};
use crate::seed::{hash_seed, Lcg32};

/// Maps a unit-interval draw onto a table index.
///
/// `floor(unit * len)`, clamped into bounds. The clamp covers the one
/// reachable edge case: the generator emits exactly 1.0 at the all-ones
/// state, which would otherwise index one past the end.
pub fn table_index(unit: f64, len: usize) -> usize {
    ((unit * len as f64) as usize).min(len - 1)
}

/// The full trait tuple for one avatar.
///
/// Palette-backed traits are stored as indices into their tables; the
/// weighted accessory/extra/mouth slots store the resolved variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitSet {
    pub skin_tone: usize,
    pub background: usize,
    pub hair_style: usize,
    pub hair_color: usize,
    pub accessory: Accessory,
    pub mouth: MouthStyle,
    pub extra: Extra,
    pub eye_color: usize,
}

impl TraitSet {
    /// Draws the eight traits from `rng` in selection order: skin,
    /// background, hair style, hair color, accessory, mouth, extra, eyes.
    pub fn select(rng: &mut Lcg32) -> Self {
        let skin_tone = table_index(rng.next_unit(), SKIN_TONES.len());
        let background = table_index(rng.next_unit(), BACKGROUNDS.len());
        let hair_style = table_index(rng.next_unit(), HAIR_STYLES.len());
        let hair_color = table_index(rng.next_unit(), HAIR_COLORS.len());
        let accessory = ACCESSORY_TABLE[table_index(rng.next_unit(), ACCESSORY_TABLE.len())];
        let mouth = MOUTH_TABLE[table_index(rng.next_unit(), MOUTH_TABLE.len())];
        let extra = EXTRA_TABLE[table_index(rng.next_unit(), EXTRA_TABLE.len())];
        let eye_color = table_index(rng.next_unit(), EYE_COLORS.len());

        Self {
            skin_tone,
            background,
            hair_style,
            hair_color,
            accessory,
            mouth,
            extra,
            eye_color,
        }
    }

    /// Hashes `seed` and selects from a fresh generator.
    pub fn for_seed(seed: &str) -> Self {
        Self::select(&mut Lcg32::new(hash_seed(seed)))
    }

    pub fn skin(&self) -> &'static SkinTone {
        &SKIN_TONES[self.skin_tone]
    }

    pub fn background_color(&self) -> Rgba {
        BACKGROUNDS[self.background]
    }

    pub fn hair(&self) -> &'static HairStyle {
        &HAIR_STYLES[self.hair_style]
    }

    pub fn hair_rgba(&self) -> Rgba {
        HAIR_COLORS[self.hair_color]
    }

    pub fn eye_rgba(&self) -> Rgba {
        EYE_COLORS[self.eye_color]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_tuple_for_jampzey() {
        let traits = TraitSet::for_seed("@Jampzey");
        assert_eq!(traits.skin_tone, 6);
        assert_eq!(traits.background, 6);
        assert_eq!(traits.hair_style, 0);
        assert_eq!(traits.hair_color, 9);
        assert_eq!(traits.accessory, Accessory::VrHeadset);
        assert_eq!(traits.mouth, MouthStyle::Smile);
        assert_eq!(traits.extra, Extra::None);
        assert_eq!(traits.eye_color, 4);
        assert_eq!(traits.skin().name, "zombie");
        assert_eq!(traits.hair().name, "Mohawk");
    }

    #[test]
    fn golden_tuple_for_hydraze() {
        let traits = TraitSet::for_seed("@Hydraze420");
        assert_eq!(traits.skin_tone, 4);
        assert_eq!(traits.background, 0);
        assert_eq!(traits.hair_style, 6);
        assert_eq!(traits.hair_color, 5);
        assert_eq!(traits.accessory, Accessory::None);
        assert_eq!(traits.mouth, MouthStyle::Open);
        assert_eq!(traits.extra, Extra::NoseRing);
        assert_eq!(traits.eye_color, 3);
    }

    #[test]
    fn empty_seed_selects_a_defined_tuple() {
        let traits = TraitSet::for_seed("");
        assert_eq!(traits.skin_tone, 1);
        assert_eq!(traits.background, 2);
        assert_eq!(traits.hair_style, 5);
        assert_eq!(traits.hair_color, 6);
        assert_eq!(traits.accessory, Accessory::Glasses);
        assert_eq!(traits.mouth, MouthStyle::Frown);
        assert_eq!(traits.extra, Extra::None);
        assert_eq!(traits.eye_color, 3);
    }

    #[test]
    fn selection_consumes_exactly_eight_draws() {
        let mut rng = Lcg32::from_seed("@Jampzey");
        let _ = TraitSet::select(&mut rng);
        assert_eq!(rng.draws(), 8);
    }

    #[test]
    fn boundary_draw_selects_last_entry() {
        assert_eq!(table_index(1.0, 7), 6);
        assert_eq!(table_index(0.999_999_9, 10), 9);
        assert_eq!(table_index(0.0, 5), 0);
    }

    #[test]
    fn serializes_with_variant_names() {
        let traits = TraitSet::for_seed("@Jampzey");
        let json = serde_json::to_value(&traits).unwrap();
        assert_eq!(json["accessory"], "vr_headset");
        assert_eq!(json["mouth"], "smile");
        assert_eq!(json["extra"], "none");
        assert_eq!(json["skin_tone"], 6);
    }
}
