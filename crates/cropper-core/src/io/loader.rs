use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::debug;

use crate::error::{CropperError, Result};

/// Something that resolves to a decoded bitmap.
///
/// Loading is the widget's only asynchronous input; implementations reject
/// with [`CropperError::ImageDecode`] when the data is not a usable image.
#[allow(async_fn_in_trait)]
pub trait ImageSource {
    async fn load(&self) -> Result<DynamicImage>;
}

/// Image file on disk; format is sniffed from the content.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for FileSource {
    async fn load(&self) -> Result<DynamicImage> {
        let bytes = std::fs::read(&self.path)?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Source file read");
        decode_bytes(&bytes)
    }
}

/// Encoded image held in memory.
#[derive(Clone, Debug)]
pub struct BytesSource(pub Vec<u8>);

impl ImageSource for BytesSource {
    async fn load(&self) -> Result<DynamicImage> {
        decode_bytes(&self.0)
    }
}

/// An already-decoded image.
impl ImageSource for DynamicImage {
    async fn load(&self) -> Result<DynamicImage> {
        check_dimensions(self)?;
        Ok(self.clone())
    }
}

/// Decode an encoded image held in memory.
pub fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| CropperError::ImageDecode(e.to_string()))?;
    check_dimensions(&img)?;
    Ok(img)
}

fn check_dimensions(img: &DynamicImage) -> Result<()> {
    if img.width() == 0 || img.height() == 0 {
        return Err(CropperError::ImageDecode(format!(
            "image has no pixels ({}x{})",
            img.width(),
            img.height()
        )));
    }
    Ok(())
}
