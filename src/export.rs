//! Export Encoders
//!
//! Turns a composed avatar into portable bytes: PNG from the raster
//! canvas, SVG straight from the drawing steps via a recording surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canvas::{Canvas, Surface};
use crate::palette::Rgba;
use crate::raster::render_onto;
use crate::traits::TraitSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// Encodes the canvas as an RGBA8 PNG.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, canvas.width(), canvas.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(canvas.pixels())?;
    writer.finish()?;
    Ok(out)
}

/// Renders `traits` as a standalone SVG document at `size x size` units.
/// Cell fills become crisp-edged rects; accessories keep their vector
/// geometry instead of being flattened to pixels.
pub fn encode_svg(traits: &TraitSet, size: u32) -> String {
    let mut surface = SvgSurface::new(size);
    render_onto(traits, size, &mut surface);
    surface.into_document()
}

/// A [`Surface`] that records each primitive as an SVG element.
pub struct SvgSurface {
    size: u32,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            elements: Vec::new(),
        }
    }

    /// Wraps the recorded elements in an `<svg>` document.
    pub fn into_document(self) -> String {
        let mut doc = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {s} {s}" width="{s}" height="{s}" shape-rendering="crispEdges">"#,
            s = self.size
        );
        for element in &self.elements {
            doc.push_str(element);
        }
        doc.push_str("</svg>");
        doc
    }
}

fn fill_attrs(color: Rgba) -> String {
    if color.a == 255 {
        format!(r#"fill="{}""#, color.hex_rgb())
    } else {
        format!(
            r#"fill="{}" fill-opacity="{:.3}""#,
            color.hex_rgb(),
            color.opacity()
        )
    }
}

fn stroke_attrs(color: Rgba, line_width: f64) -> String {
    let mut attrs = format!(
        r#"fill="none" stroke="{}" stroke-width="{}""#,
        color.hex_rgb(),
        line_width
    );
    if color.a != 255 {
        attrs.push_str(&format!(r#" stroke-opacity="{:.3}""#, color.opacity()));
    }
    attrs
}

impl Surface for SvgSurface {
    fn fill(&mut self, color: Rgba) {
        self.elements.push(format!(
            r#"<rect x="0" y="0" width="{s}" height="{s}" {}/>"#,
            fill_attrs(color),
            s = self.size
        ));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.elements.push(format!(
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" {}/>"#,
            fill_attrs(color)
        ));
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, line_width: f64, color: Rgba) {
        self.elements.push(format!(
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" {}/>"#,
            stroke_attrs(color, line_width)
        ));
    }

    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, line_width: f64, color: Rgba) {
        self.elements.push(format!(
            r#"<line x1="{x0}" y1="{y0}" x2="{x1}" y2="{y1}" stroke="{}" stroke-width="{line_width}"/>"#,
            color.hex_rgb()
        ));
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, line_width: f64, color: Rgba) {
        self.elements.push(format!(
            r#"<circle cx="{cx}" cy="{cy}" r="{radius}" {}/>"#,
            stroke_attrs(color, line_width)
        ));
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        self.elements.push(format!(
            r#"<circle cx="{cx}" cy="{cy}" r="{radius}" {}/>"#,
            fill_attrs(color)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::render_avatar;

    #[test]
    fn png_export_carries_signature_and_dimensions() {
        let canvas = render_avatar("@Jampzey", 44);
        let bytes = encode_png(&canvas).unwrap();
        assert_eq!(&bytes[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
        // IHDR width/height, big-endian, directly after the first chunk header
        assert_eq!(&bytes[16..20], &44u32.to_be_bytes());
        assert_eq!(&bytes[20..24], &44u32.to_be_bytes());
    }

    #[test]
    fn svg_export_is_a_complete_document() {
        let traits = TraitSet::for_seed("@Jampzey");
        let doc = encode_svg(&traits, 44);
        assert!(doc.starts_with("<svg"));
        assert!(doc.ends_with("</svg>"));
        assert!(doc.contains(r#"viewBox="0 0 44 44""#));
        assert!(doc.contains("shape-rendering=\"crispEdges\""));
        // Background for trait tuple index 6
        assert!(doc.contains("#150a1e"));
    }

    #[test]
    fn svg_vector_overlays_survive_as_shapes() {
        // Monocle renders as a circle element, not pixels
        let mut traits = TraitSet::for_seed("@Jampzey");
        traits.accessory = crate::palette::Accessory::Monocle;
        let doc = encode_svg(&traits, 80);
        assert!(doc.contains("<circle"));
        assert!(doc.contains("#daa520"));
    }

    #[test]
    fn svg_export_is_deterministic() {
        let traits = TraitSet::for_seed("@Jampzey");
        assert_eq!(encode_svg(&traits, 44), encode_svg(&traits, 44));
    }
}
