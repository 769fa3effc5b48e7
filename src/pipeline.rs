//! Render Pipeline - Single Entry Point
//!
//! CRITICAL: render MUST call validate_request internally. No bypass.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::canvas::Canvas;
use crate::export::{encode_png, encode_svg, ExportError, ExportFormat};
use crate::hashing::{job_digest, manifest_digest, sha256_hex};
use crate::raster::render_onto;
use crate::seed::hash_seed;
use crate::traits::TraitSet;
use crate::{DEFAULT_OUTPUT_SIZE, ENGINE_VERSION};

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static VALIDATION_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_validation_call_count() -> u32 {
    VALIDATION_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_validation_call_count() {
    VALIDATION_CALL_COUNT.store(0, Ordering::SeqCst)
}

/// Largest output edge the default pipeline accepts. Bounds the pixel
/// buffer a single request can allocate.
pub const DEFAULT_MAX_SIZE: u32 = 2048;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid output size: 0")]
    InvalidSize,

    #[error("Output size {0} exceeds ceiling {1}")]
    SizeExceedsLimit(u32, u32),

    #[error("Request requires engine >= {0}, current is {1}")]
    EngineVersionMismatch(String, String),

    #[error("Invalid engine version bound: {0}")]
    InvalidVersionBound(String),

    #[error("Export error: {0}")]
    ExportFailed(#[from] ExportError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    pub seed: String,
    #[serde(default = "default_size")]
    pub size: u32,
    /// Requested export encodings; empty means PNG only.
    #[serde(default)]
    pub formats: Vec<ExportFormat>,
    /// Reproducibility pin: reject rendering on an engine older than this
    /// bound, since trait grammar changes land only in version bumps.
    #[serde(default)]
    pub engine_min_version: Option<String>,
}

fn default_size() -> u32 {
    DEFAULT_OUTPUT_SIZE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedAvatar {
    pub id: String,
    pub seed: String,
    pub size: u32,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
    pub traits: TraitSet,
    pub manifest_hash: String,
    pub job_hash: String,
    pub exports: Vec<ExportedFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedFile {
    pub format: ExportFormat,
    pub filename: String,
    pub size: u32,
    pub data_base64: String,
    pub hash: String,
}

/// The render pipeline - single entry point for all avatar operations.
pub struct RenderPipeline {
    max_size: u32,
}

impl RenderPipeline {
    pub fn new() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Pipeline with a custom output-size ceiling.
    pub fn with_max_size(max_size: u32) -> Self {
        Self { max_size }
    }

    /// Validate a render request.
    ///
    /// This is the ONLY validation entry point. An empty seed is valid
    /// (it hashes to 0 and selects a defined tuple); a zero size is not,
    /// and oversized requests are rejected before any allocation.
    pub fn validate_request(&self, request: &RenderRequest) -> Result<(), PipelineError> {
        #[cfg(feature = "test-hooks")]
        VALIDATION_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

        if request.size == 0 {
            return Err(PipelineError::InvalidSize);
        }
        if request.size > self.max_size {
            return Err(PipelineError::SizeExceedsLimit(request.size, self.max_size));
        }

        if let Some(bound) = &request.engine_min_version {
            let engine = semver::Version::parse(ENGINE_VERSION)
                .map_err(|_| PipelineError::InvalidVersionBound(ENGINE_VERSION.to_string()))?;
            let min = semver::Version::parse(bound)
                .map_err(|_| PipelineError::InvalidVersionBound(bound.clone()))?;
            if engine < min {
                return Err(PipelineError::EngineVersionMismatch(
                    bound.clone(),
                    ENGINE_VERSION.to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Trait tuple for a seed, without rendering.
    pub fn preview_traits(&self, seed: &str) -> TraitSet {
        TraitSet::for_seed(seed)
    }

    /// Render an avatar.
    ///
    /// CRITICAL: This ALWAYS calls validate_request internally. No bypass
    /// possible.
    pub fn render(&self, request: &RenderRequest) -> Result<RenderedAvatar, PipelineError> {
        // MANDATORY: Validation is always called. This is non-negotiable.
        self.validate_request(request)?;

        let traits = TraitSet::for_seed(&request.seed);
        let formats: &[ExportFormat] = if request.formats.is_empty() {
            &[ExportFormat::Png]
        } else {
            &request.formats
        };

        let stem = format!("punk-{}", hash_seed(&request.seed));
        let mut exports = Vec::with_capacity(formats.len());
        for format in formats {
            let data = match format {
                ExportFormat::Png => {
                    let mut canvas = Canvas::new(request.size, request.size);
                    render_onto(&traits, request.size, &mut canvas);
                    encode_png(&canvas)?
                }
                ExportFormat::Svg => encode_svg(&traits, request.size).into_bytes(),
            };
            exports.push(ExportedFile {
                format: *format,
                filename: format!("{}.{}", stem, format.extension()),
                size: request.size,
                hash: sha256_hex(&data),
                data_base64: base64::engine::general_purpose::STANDARD.encode(&data),
            });
        }

        let job_hash = job_digest(&request.seed, request.size, formats, ENGINE_VERSION);

        let mut avatar = RenderedAvatar {
            id: Uuid::new_v4().to_string(),
            seed: request.seed.clone(),
            size: request.size,
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
            traits,
            manifest_hash: String::new(), // Computed after
            job_hash,
            exports,
        };

        // Manifest hash covers the complete record
        avatar.manifest_hash = manifest_digest(&avatar)?;

        Ok(avatar)
    }
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new()
    }
}
