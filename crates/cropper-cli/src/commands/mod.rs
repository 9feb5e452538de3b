pub mod config;
pub mod crop;
pub mod info;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use cropper_core::config::CropperOptions;
use cropper_core::cropper::Cropper;
use cropper_core::geometry::{DisplayMode, Size};
use cropper_core::io::loader::FileSource;

#[derive(Clone, Copy, ValueEnum)]
pub enum ShowTypeArg {
    /// Image overfills the container (default)
    Cover,
    /// Image fits inside the container
    Contain,
}

impl From<ShowTypeArg> for DisplayMode {
    fn from(arg: ShowTypeArg) -> Self {
        match arg {
            ShowTypeArg::Cover => DisplayMode::Cover,
            ShowTypeArg::Contain => DisplayMode::Contain,
        }
    }
}

/// Options shared by every command that opens a cropping session.
#[derive(Args)]
pub struct SessionArgs {
    /// Source image file
    pub file: PathBuf,

    /// TOML options file (flags below override it)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Container size as WIDTHxHEIGHT
    #[arg(long, default_value = "400x300", value_parser = parse_size)]
    pub container: Size,

    /// How the image is scaled into the container
    #[arg(long, value_enum)]
    pub show_type: Option<ShowTypeArg>,

    /// Initial crop window size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    pub clip: Option<Size>,

    /// Resize width and height independently
    #[arg(long)]
    pub free: bool,

    /// Output MIME type (image/png, image/jpeg, image/webp, image/bmp)
    #[arg(long)]
    pub mime: Option<String>,

    /// Encoder quality in [0.0, 1.0]
    #[arg(long)]
    pub quality: Option<f32>,
}

impl SessionArgs {
    /// Options from the config file (or defaults) with flag overrides applied.
    pub fn options(&self) -> Result<CropperOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config {}", path.display()))?
            }
            None => CropperOptions::default(),
        };

        if let Some(show_type) = self.show_type {
            options.show_type = show_type.into();
        }
        if let Some(clip) = self.clip {
            options.clip_size.w = clip.width;
            options.clip_size.h = clip.height;
        }
        if self.free {
            options.clip_size.fixed = false;
        }
        if let Some(ref mime) = self.mime {
            options.output.mime = mime.clone();
        }
        if let Some(quality) = self.quality {
            options.output.quality = quality;
        }
        Ok(options)
    }

    pub fn open(&self) -> Result<Cropper> {
        let options = self.options()?;
        let source = FileSource::new(&self.file);
        let cropper = pollster::block_on(Cropper::initialize(self.container, &source, options))
            .with_context(|| format!("Failed to open {}", self.file.display()))?;
        Ok(cropper)
    }
}

/// Parse `WIDTHxHEIGHT` into a positive size.
pub fn parse_size(s: &str) -> std::result::Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let h: f64 = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
    let size = Size::new(w, h);
    if !size.is_valid() {
        return Err(format!("size must be positive, got '{s}'"));
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("400x300").unwrap(), Size::new(400.0, 300.0));
        assert_eq!(parse_size("12.5X8").unwrap(), Size::new(12.5, 8.0));
        assert!(parse_size("400").is_err());
        assert!(parse_size("0x10").is_err());
        assert!(parse_size("ax10").is_err());
    }
}
