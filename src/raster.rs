//! Avatar Composition
//!
//! Composes a selected trait set onto a [`Surface`] as an ordered sequence
//! of drawing steps over the 8x8 logical grid. Later steps overlay earlier
//! ones at the same cells; the step order is a correctness contract, not a
//! refactor candidate. All geometry below is fixed design data.

use crate::canvas::{Canvas, Surface};
use crate::palette::{Accessory, Extra, MouthStyle, Rgba};
use crate::traits::TraitSet;

/// Logical grid dimension. Every avatar is an 8x8 cell composition scaled
/// to the requested output size.
pub const GRID_SIZE: u32 = 8;

const EYE_UNDERLAY: Rgba = Rgba::opaque(0x111111);
const EYE_HIGHLIGHT: Rgba = Rgba::opaque(0xFFFFFF);

const MOUTH_RED: Rgba = Rgba::opaque(0x8B0000);
const MOUTH_WINE: Rgba = Rgba::opaque(0x5A0000);
const MOUTH_FROWN_RED: Rgba = Rgba::opaque(0x6B0000);
const MOUTH_GAP: Rgba = Rgba::opaque(0x000000);

const GLASSES_FRAME: Rgba = Rgba::opaque(0x888888);
const SUNGLASSES_TINT: Rgba = Rgba::with_alpha(0x000000, 217);
const SUNGLASSES_BRIDGE: Rgba = Rgba::opaque(0x555555);
const VR_SHELL: Rgba = Rgba::opaque(0x1A1A2E);
const VR_LENS: Rgba = Rgba::opaque(0xF5C842);
const MONOCLE_RIM: Rgba = Rgba::opaque(0xDAA520);
const EARRING_GOLD: Rgba = Rgba::opaque(0xF5C842);
const NOSE_RING_SILVER: Rgba = Rgba::opaque(0xC0C0C0);
const SCAR_TONE: Rgba = Rgba::opaque(0x8B0000);

const CELL_OUTLINE: Rgba = Rgba::with_alpha(0x000000, 77);

/// Hashes nothing, draws nothing random: renders an already-selected trait
/// set onto `surface` at `size x size` device pixels.
pub fn render_onto<S: Surface>(traits: &TraitSet, size: u32, surface: &mut S) {
    let cell = f64::from(size) / f64::from(GRID_SIZE);
    let skin = traits.skin();
    let hair_color = traits.hair_rgba();

    // 1. Background
    surface.fill(traits.background_color());

    // 2. Face base, rows 3-7 x cols 1-6
    for row in 3..8 {
        for col in 1..7 {
            fill_cell(surface, cell, col, row, skin.base);
        }
    }

    // 3. Shading down the right side
    for row in 3..7 {
        fill_cell(surface, cell, 6, row, skin.shadow);
    }
    for row in 5..7 {
        fill_cell(surface, cell, 5, row, skin.shadow);
    }

    // 4. Hair mask on rows 0-2, plus sideburns when the mask reaches row 2
    let hair = traits.hair();
    for row in 0..3 {
        for col in 0..8 {
            if hair.filled(col as usize, row as usize) {
                fill_cell(surface, cell, col, row, hair_color);
            }
        }
    }
    if hair.has_sideburns() {
        fill_cell(surface, cell, 1, 3, hair_color);
        fill_cell(surface, cell, 6, 3, hair_color);
    }

    // 5. Eyes at row 4: dark underlay, iris, then a highlight square in
    // each cell's top-left corner
    for col in [2, 5] {
        fill_cell(surface, cell, col, 4, EYE_UNDERLAY);
        fill_cell(surface, cell, col, 4, traits.eye_rgba());
    }
    for col in [2.0, 5.0] {
        surface.fill_rect(col * cell, 4.0 * cell, cell * 0.4, cell * 0.4, EYE_HIGHLIGHT);
    }

    // 6. Eyebrows
    for col in [2, 3, 5] {
        fill_cell(surface, cell, col, 3, hair_color);
    }

    // 7. Nose
    fill_cell(surface, cell, 3, 5, skin.shadow);
    fill_cell(surface, cell, 4, 5, skin.shadow);

    // 8. Mouth row; cells and tones vary per style
    let mouth: Vec<(u32, Rgba)> = match traits.mouth {
        MouthStyle::Smile => vec![(2, skin.deep), (3, MOUTH_RED), (4, MOUTH_RED), (5, skin.deep)],
        MouthStyle::Smirk => vec![(3, MOUTH_RED), (4, MOUTH_RED), (5, skin.deep)],
        MouthStyle::Straight => vec![
            (2, skin.shadow),
            (3, MOUTH_WINE),
            (4, MOUTH_WINE),
            (5, skin.shadow),
        ],
        MouthStyle::Frown => vec![
            (2, skin.deep),
            (3, MOUTH_FROWN_RED),
            (4, MOUTH_FROWN_RED),
            (5, skin.deep),
        ],
        MouthStyle::Open => vec![(3, MOUTH_WINE), (4, MOUTH_GAP), (5, MOUTH_WINE)],
    };
    for (col, color) in mouth {
        fill_cell(surface, cell, col, 6, color);
    }

    // 9. Accessory overlay, vector geometry in cell units
    match traits.accessory {
        Accessory::None => {}
        Accessory::Glasses => {
            let lw = cell * 0.15;
            surface.stroke_rect(1.6 * cell, 3.6 * cell, 1.4 * cell, 0.8 * cell, lw, GLASSES_FRAME);
            surface.stroke_rect(4.0 * cell, 3.6 * cell, 1.4 * cell, 0.8 * cell, lw, GLASSES_FRAME);
            surface.line(3.0 * cell, 3.9 * cell, 4.0 * cell, 3.9 * cell, lw, GLASSES_FRAME);
        }
        Accessory::Sunglasses => {
            surface.fill_rect(1.5 * cell, 3.5 * cell, 1.6 * cell, 0.8 * cell, SUNGLASSES_TINT);
            surface.fill_rect(4.0 * cell, 3.5 * cell, 1.6 * cell, 0.8 * cell, SUNGLASSES_TINT);
            surface.fill_rect(3.1 * cell, 3.7 * cell, 0.9 * cell, 0.3 * cell, SUNGLASSES_BRIDGE);
        }
        Accessory::VrHeadset => {
            surface.fill_rect(1.2 * cell, 3.3 * cell, 5.5 * cell, 1.2 * cell, VR_SHELL);
            surface.fill_rect(1.4 * cell, 3.5 * cell, 2.0 * cell, 0.8 * cell, VR_LENS);
            surface.fill_rect(4.5 * cell, 3.5 * cell, 2.0 * cell, 0.8 * cell, VR_LENS);
        }
        Accessory::Monocle => {
            surface.stroke_circle(2.5 * cell, 4.1 * cell, 0.65 * cell, cell * 0.2, MONOCLE_RIM);
        }
    }

    // 10. Extra overlay
    match traits.extra {
        Extra::None => {}
        Extra::Earring => {
            surface.fill_circle(1.2 * cell, 5.0 * cell, 0.2 * cell, EARRING_GOLD);
        }
        Extra::NoseRing => {
            surface.stroke_circle(3.8 * cell, 5.5 * cell, 0.25 * cell, cell * 0.12, NOSE_RING_SILVER);
        }
        Extra::Scar => {
            surface.line(5.2 * cell, 3.8 * cell, 5.5 * cell, 5.2 * cell, cell * 0.15, SCAR_TONE);
        }
    }

    // 11. Neck
    fill_cell(surface, cell, 3, 7, skin.base);
    fill_cell(surface, cell, 4, 7, skin.base);

    // 12. Faint cell outline over the whole grid
    for col in 0..GRID_SIZE {
        for row in 0..GRID_SIZE {
            surface.stroke_rect(
                f64::from(col) * cell,
                f64::from(row) * cell,
                cell,
                cell,
                0.5,
                CELL_OUTLINE,
            );
        }
    }
}

/// Selects traits for `seed` and rasterizes them to an RGBA canvas.
///
/// `size` is the square output dimension in device pixels; callers are
/// responsible for rejecting zero (a zero-size canvas renders nothing).
pub fn render_avatar(seed: &str, size: u32) -> Canvas {
    let traits = TraitSet::for_seed(seed);
    let mut canvas = Canvas::new(size, size);
    render_onto(&traits, size, &mut canvas);
    canvas
}

fn fill_cell<S: Surface>(surface: &mut S, cell: f64, col: u32, row: u32, color: Rgba) {
    if col >= GRID_SIZE || row >= GRID_SIZE {
        return;
    }
    surface.fill_rect(f64::from(col) * cell, f64::from(row) * cell, cell, cell, color);
}
