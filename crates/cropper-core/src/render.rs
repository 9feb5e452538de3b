use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use tracing::debug;

use crate::consts::{MASK_COLOR, MAX_BOARD_PIXELS};
use crate::error::{CropperError, Result};
use crate::geometry::{crop_window, Fit, Point, Rect, Size};
use crate::surface::{PixelRect, RasterSurface, Surface};

/// The source image scaled to board size.
///
/// `snapshot` is the clean raster that crop renders sample from; `display` is
/// the same raster with the translucent mask painted over it, for hosts that
/// draw the background layer.
#[derive(Clone, Debug)]
pub struct Board {
    fit: Fit,
    snapshot: RgbaImage,
    display: RgbaImage,
}

impl Board {
    /// Rasterize `source` at the fitted board size. Pixel dimensions are the
    /// fitted sizes truncated to whole pixels; empty boards and boards above
    /// [`MAX_BOARD_PIXELS`] are rejected before anything is allocated.
    pub fn rasterize(source: &DynamicImage, fit: Fit) -> Result<Self> {
        let (w, h) = fit.board.to_pixels();
        if w == 0 || h == 0 || w as u64 * h as u64 > MAX_BOARD_PIXELS {
            return Err(CropperError::InvalidDimensions {
                width: fit.board.width,
                height: fit.board.height,
            });
        }

        let snapshot = imageops::resize(&source.to_rgba8(), w, h, FilterType::Triangle);

        let mut masked = RasterSurface::from_image(snapshot.clone());
        masked.fill_rect(PixelRect::new(0, 0, w, h), Rgba(MASK_COLOR));
        let display = masked.into_image();

        debug!(width = w, height = h, strategy = ?fit.strategy, "Board rasterized");
        Ok(Self {
            fit,
            snapshot,
            display,
        })
    }

    pub fn fit(&self) -> &Fit {
        &self.fit
    }

    /// Size in whole pixels, as used for the pan range.
    pub fn size(&self) -> Size {
        Size::new(self.snapshot.width() as f64, self.snapshot.height() as f64)
    }

    pub fn snapshot(&self) -> &RgbaImage {
        &self.snapshot
    }

    pub fn display(&self) -> &RgbaImage {
        &self.display
    }
}

/// Geometry produced by one render pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOutcome {
    /// Crop window placement in the container.
    pub window: Rect,
    /// Board pixels copied into the crop surface.
    pub source: PixelRect,
}

/// Board sub-rectangle under the crop window for a given offset.
pub fn source_rect(window: &Rect, offset: Point) -> PixelRect {
    let (w, h) = window.size().to_pixels();
    PixelRect::new(
        (window.x - offset.x).round() as i64,
        (window.y - offset.y).round() as i64,
        w,
        h,
    )
}

/// Redraw the crop surface from the board snapshot.
///
/// The surface is resized to the crop size (which clears it) before the
/// copy, so repeated calls with the same inputs give identical pixels.
pub fn render_crop<S: Surface>(
    surface: &mut S,
    board: &Board,
    container: Size,
    crop: Size,
    offset: Point,
) -> RenderOutcome {
    let window = crop_window(container, crop);
    let source = source_rect(&window, offset);

    surface.resize(source.width, source.height);
    surface.blit(board.snapshot(), source, 0, 0);

    debug!(
        src_x = source.x,
        src_y = source.y,
        width = source.width,
        height = source.height,
        "Crop surface rendered"
    );

    RenderOutcome { window, source }
}
