//! PunkForge Core - Deterministic Pixel Portrait Compiler
//!
//! # The Five Laws (Non-Negotiable)
//! 1. Seed Is Identity
//! 2. Palettes Are Contracts
//! 3. Draw Order Is Sacred
//! 4. Deterministic Output
//! 5. Manifests Enable Reproduction

pub mod canvas;
pub mod export;
pub mod hashing;
pub mod palette;
pub mod pipeline;
pub mod raster;
pub mod seed;
pub mod traits;

pub use canvas::{Canvas, Surface};
pub use export::{encode_png, encode_svg, ExportError, ExportFormat, SvgSurface};
pub use hashing::{canonical_json, job_digest, manifest_digest};
pub use palette::{Accessory, Extra, HairStyle, MouthStyle, Rgba, SkinTone};
pub use pipeline::{ExportedFile, PipelineError, RenderPipeline, RenderRequest, RenderedAvatar};
pub use raster::{render_avatar, render_onto, GRID_SIZE};
pub use seed::{hash_seed, Lcg32};
pub use traits::TraitSet;

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output edge used when a request does not name a size; matches the
/// catalog thumbnails this engine was built for.
pub const DEFAULT_OUTPUT_SIZE: u32 = 44;
