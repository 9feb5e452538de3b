use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CLIP_SIZE, DEFAULT_OUTPUT_MIME, DEFAULT_OUTPUT_QUALITY};
use crate::error::{CropperError, Result};
use crate::geometry::{CropSize, DisplayMode};
use crate::io::encode::OutputFormat;

/// Options accepted when a cropper is initialized.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CropperOptions {
    #[serde(default, alias = "showType")]
    pub show_type: DisplayMode,
    #[serde(default, alias = "clipSize")]
    pub clip_size: ClipSize,
    #[serde(default, alias = "outPutOpt")]
    pub output: OutputOptions,
}

impl CropperOptions {
    /// Reject values the widget cannot start from. Sizes below the handle
    /// floor are accepted here and raised later.
    pub fn validate(&self) -> Result<()> {
        let clip = &self.clip_size;
        if !(clip.w.is_finite() && clip.h.is_finite()) || clip.w <= 0.0 || clip.h <= 0.0 {
            return Err(CropperError::InvalidConfig(format!(
                "clip size must be positive, got {}x{}",
                clip.w, clip.h
            )));
        }
        self.output.validate()
    }
}

/// Initial crop window size; `fixed` locks the aspect ratio during resize.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipSize {
    pub w: f64,
    pub h: f64,
    #[serde(default = "default_true")]
    pub fixed: bool,
}

impl ClipSize {
    pub fn to_crop_size(&self) -> CropSize {
        CropSize::new(self.w, self.h, self.fixed)
    }
}

impl Default for ClipSize {
    fn default() -> Self {
        Self {
            w: DEFAULT_CLIP_SIZE,
            h: DEFAULT_CLIP_SIZE,
            fixed: true,
        }
    }
}

/// Encoder settings for the produced artifact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// MIME type, e.g. `image/png`.
    #[serde(rename = "type", default = "default_mime")]
    pub mime: String,
    /// Quality factor in `[0.0, 1.0]`; only lossy formats use it.
    #[serde(default = "default_quality")]
    pub quality: f32,
}

impl OutputOptions {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(CropperError::InvalidConfig(format!(
                "output quality must be within [0, 1], got {}",
                self.quality
            )));
        }
        OutputFormat::from_mime(&self.mime).map(|_| ())
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            mime: DEFAULT_OUTPUT_MIME.to_string(),
            quality: DEFAULT_OUTPUT_QUALITY,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_mime() -> String {
    DEFAULT_OUTPUT_MIME.to_string()
}
fn default_quality() -> f32 {
    DEFAULT_OUTPUT_QUALITY
}
