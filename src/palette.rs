//! Trait Palettes - Enforceable Contracts
//!
//! Every selectable visual trait lives in one of the ordered tables below.
//! Table order and contents are frozen: selection indexes into them by
//! position, so any edit rearranges the portraits of every seed ever
//! issued. The tables are immutable process-wide statics and safe to share
//! across concurrent renders.

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque color from a 0xRRGGBB literal.
    pub const fn opaque(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
            a: 0xFF,
        }
    }

    /// Translucent color from a 0xRRGGBB literal and an alpha byte.
    pub const fn with_alpha(rgb: u32, a: u8) -> Self {
        let mut c = Self::opaque(rgb);
        c.a = a;
        c
    }

    /// Lowercase `#rrggbb` form, alpha ignored.
    pub fn hex_rgb(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a unit-interval fraction.
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

/// A three-shade skin ramp: base fill, shadow, deep shadow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinTone {
    pub name: &'static str,
    pub base: Rgba,
    pub shadow: Rgba,
    pub deep: Rgba,
}

const fn skin(name: &'static str, base: u32, shadow: u32, deep: u32) -> SkinTone {
    SkinTone {
        name,
        base: Rgba::opaque(base),
        shadow: Rgba::opaque(shadow),
        deep: Rgba::opaque(deep),
    }
}

/// Skin ramps, selection slot 1.
pub static SKIN_TONES: [SkinTone; 7] = [
    skin("light", 0xFFDBB4, 0xE8A87C, 0xC47A3A),
    skin("medium-light", 0xF1C27D, 0xD4956A, 0xA0522D),
    skin("medium", 0xC68642, 0xA0522D, 0x7B3F00),
    skin("dark", 0x8D5524, 0x6B3F21, 0x4A2912),
    skin("gold punk", 0xFFD700, 0xDAA520, 0xB8860B),
    skin("alien", 0x7FFFD4, 0x48D1CC, 0x20B2AA),
    skin("zombie", 0x98FB98, 0x3CB371, 0x2E8B57),
];

/// Background colors, selection slot 2.
pub static BACKGROUNDS: [Rgba; 10] = [
    Rgba::opaque(0x0D1B2A),
    Rgba::opaque(0x1A0A2E),
    Rgba::opaque(0x0A1A0F),
    Rgba::opaque(0x1F0A0A),
    Rgba::opaque(0x0A0A1F),
    Rgba::opaque(0x0E1320),
    Rgba::opaque(0x150A1E),
    Rgba::opaque(0x0A1510),
    Rgba::opaque(0x1A1200),
    Rgba::opaque(0x0F0F1A),
];

/// A hair style: an 8-column occupancy mask for grid rows 0-2, one byte
/// per row, most significant bit = column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HairStyle {
    pub name: &'static str,
    rows: [u8; 3],
}

impl HairStyle {
    /// Whether the mask covers `(col, row)`.
    pub fn filled(&self, col: usize, row: usize) -> bool {
        (self.rows[row] >> (7 - col)) & 1 == 1
    }

    /// Whether the bottom mask row has any filled cell. Styles that reach
    /// row 2 continue into sideburn cells on the face rows.
    pub fn has_sideburns(&self) -> bool {
        self.rows[2] != 0
    }
}

/// Hair styles, selection slot 3.
pub static HAIR_STYLES: [HairStyle; 7] = [
    HairStyle { name: "Mohawk", rows: [0b0001_1000, 0b0011_1100, 0b0001_1000] },
    HairStyle { name: "Long hair", rows: [0b1111_1111, 0b1100_0011, 0b1000_0001] },
    HairStyle { name: "Cap flat", rows: [0b0111_1110, 0b1111_1111, 0b0000_0000] },
    HairStyle { name: "Wild spikes", rows: [0b1010_1010, 0b0111_1110, 0b0011_1100] },
    HairStyle { name: "Bald top", rows: [0b0000_0000, 0b0000_0000, 0b0000_0000] },
    HairStyle { name: "Side sweep", rows: [0b1111_0000, 0b1111_1000, 0b0110_0000] },
    HairStyle { name: "Afro", rows: [0b0111_1110, 0b1111_1111, 0b1110_0111] },
];

/// Hair colors, selection slot 4.
pub static HAIR_COLORS: [Rgba; 10] = [
    Rgba::opaque(0xF5C842),
    Rgba::opaque(0xFF6B6B),
    Rgba::opaque(0x64FFDA),
    Rgba::opaque(0xA78BFA),
    Rgba::opaque(0xFB923C),
    Rgba::opaque(0xF0F0F0),
    Rgba::opaque(0x1A1A1A),
    Rgba::opaque(0x8B4513),
    Rgba::opaque(0xDC143C),
    Rgba::opaque(0x00CED1),
];

/// Face accessory. `None` is a first-class variant, not a sentinel;
/// its selection weight comes from the table below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessory {
    None,
    Glasses,
    Sunglasses,
    VrHeadset,
    Monocle,
}

/// Accessory selection table, slot 5. One `None` slot in five.
pub static ACCESSORY_TABLE: [Accessory; 5] = [
    Accessory::None,
    Accessory::Glasses,
    Accessory::Sunglasses,
    Accessory::VrHeadset,
    Accessory::Monocle,
];

/// Mouth rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouthStyle {
    Smile,
    Smirk,
    Straight,
    Frown,
    Open,
}

/// Mouth selection table, slot 6.
pub static MOUTH_TABLE: [MouthStyle; 5] = [
    MouthStyle::Smile,
    MouthStyle::Smirk,
    MouthStyle::Straight,
    MouthStyle::Frown,
    MouthStyle::Open,
];

/// Small decorative extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extra {
    None,
    Earring,
    NoseRing,
    Scar,
}

/// Extra selection table, slot 7. Three `None` slots in six bias half of
/// all seeds toward no extra.
pub static EXTRA_TABLE: [Extra; 6] = [
    Extra::None,
    Extra::None,
    Extra::None,
    Extra::Earring,
    Extra::NoseRing,
    Extra::Scar,
];

/// Eye iris colors, selection slot 8.
pub static EYE_COLORS: [Rgba; 6] = [
    Rgba::opaque(0x00D9FF),
    Rgba::opaque(0xA78BFA),
    Rgba::opaque(0xFF6B6B),
    Rgba::opaque(0x34D399),
    Rgba::opaque(0xF5C842),
    Rgba::opaque(0xFB923C),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sizes_are_frozen() {
        assert_eq!(SKIN_TONES.len(), 7);
        assert_eq!(BACKGROUNDS.len(), 10);
        assert_eq!(HAIR_STYLES.len(), 7);
        assert_eq!(HAIR_COLORS.len(), 10);
        assert_eq!(ACCESSORY_TABLE.len(), 5);
        assert_eq!(MOUTH_TABLE.len(), 5);
        assert_eq!(EXTRA_TABLE.len(), 6);
        assert_eq!(EYE_COLORS.len(), 6);
    }

    #[test]
    fn extra_table_weights_none_at_one_half() {
        let nones = EXTRA_TABLE.iter().filter(|e| **e == Extra::None).count();
        assert_eq!(nones, 3);
    }

    #[test]
    fn accessory_table_has_single_none_slot() {
        let nones = ACCESSORY_TABLE
            .iter()
            .filter(|a| **a == Accessory::None)
            .count();
        assert_eq!(nones, 1);
    }

    #[test]
    fn sideburns_follow_bottom_mask_row() {
        let expected = [
            ("Mohawk", true),
            ("Long hair", true),
            ("Cap flat", false),
            ("Wild spikes", true),
            ("Bald top", false),
            ("Side sweep", true),
            ("Afro", true),
        ];
        for (style, (name, sideburns)) in HAIR_STYLES.iter().zip(expected) {
            assert_eq!(style.name, name);
            assert_eq!(style.has_sideburns(), sideburns, "style {name}");
        }
    }

    #[test]
    fn mohawk_mask_layout() {
        let mohawk = &HAIR_STYLES[0];
        assert!(mohawk.filled(3, 0) && mohawk.filled(4, 0));
        assert!(!mohawk.filled(2, 0) && !mohawk.filled(5, 0));
        assert!(mohawk.filled(2, 1) && mohawk.filled(5, 1));
    }

    #[test]
    fn color_literals_round_trip() {
        assert_eq!(Rgba::opaque(0xFFDBB4).hex_rgb(), "#ffdbb4");
        let translucent = Rgba::with_alpha(0x000000, 77);
        assert_eq!(translucent.a, 77);
        assert!((translucent.opacity() - 0.302).abs() < 0.001);
    }

    #[test]
    fn accessory_serializes_in_wire_case() {
        let json = serde_json::to_string(&Accessory::VrHeadset).unwrap();
        assert_eq!(json, r#""vr_headset""#);
        let json = serde_json::to_string(&Extra::NoseRing).unwrap();
        assert_eq!(json, r#""nose_ring""#);
    }
}
