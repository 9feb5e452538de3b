use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::config::OutputOptions;
use crate::error::{CropperError, Result};
use crate::surface::Surface;

/// Encodings the crop artifact can be produced in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    WebP,
    Bmp,
}

impl OutputFormat {
    pub fn from_mime(mime: &str) -> Result<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Ok(Self::Png),
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            "image/webp" => Ok(Self::WebP),
            "image/bmp" => Ok(Self::Bmp),
            other => Err(CropperError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Bmp => "image/bmp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
            Self::Bmp => "bmp",
        }
    }
}

/// Produced crop: the data URL plus its decoded bytes and MIME type.
#[derive(Clone, Debug, PartialEq)]
pub struct CropArtifact {
    pub data_url: String,
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl CropArtifact {
    /// Base64 payload of the data URL, without the `data:...;base64,` prefix.
    pub fn base64(&self) -> &str {
        self.data_url
            .split_once(',')
            .map(|(_, payload)| payload)
            .unwrap_or_default()
    }
}

/// Encode raw pixels. JPEG drops alpha; `quality` maps to 1..=100 and is
/// ignored by the lossless formats.
pub fn encode_image(image: &RgbaImage, format: OutputFormat, quality: f32) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        OutputFormat::Jpeg => {
            let q = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut buf, q)
                .encode_image(&rgb)
                .map_err(|e| CropperError::Encode(e.to_string()))?;
        }
        OutputFormat::Png | OutputFormat::WebP | OutputFormat::Bmp => {
            let image_format = match format {
                OutputFormat::Png => ImageFormat::Png,
                OutputFormat::WebP => ImageFormat::WebP,
                _ => ImageFormat::Bmp,
            };
            DynamicImage::ImageRgba8(image.clone())
                .write_to(&mut Cursor::new(&mut buf), image_format)
                .map_err(|e| CropperError::Encode(e.to_string()))?;
        }
    }
    Ok(buf)
}

/// Encode a surface into a `data:<mime>;base64,<payload>` string.
pub fn encode_data_url<S: Surface>(surface: &S, options: &OutputOptions) -> Result<String> {
    let format = OutputFormat::from_mime(&options.mime)?;
    if surface.width() == 0 || surface.height() == 0 {
        return Err(CropperError::Encode("surface is empty".into()));
    }
    let bytes = encode_image(surface.pixels(), format, options.quality)?;
    Ok(format!("data:{};base64,{}", format.mime(), STANDARD.encode(bytes)))
}

/// Turn a base64 data URL back into bytes and its MIME type.
pub async fn decode_data_url(data_url: &str) -> Result<CropArtifact> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| CropperError::Encode("data URL has no payload".into()))?;

    let mime = header
        .strip_prefix("data:")
        .and_then(|rest| rest.strip_suffix(";base64"))
        .filter(|mime| !mime.is_empty())
        .ok_or_else(|| CropperError::Encode(format!("malformed data URL header '{header}'")))?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| CropperError::Encode(e.to_string()))?;

    Ok(CropArtifact {
        data_url: data_url.to_string(),
        bytes,
        mime: mime.to_string(),
    })
}
