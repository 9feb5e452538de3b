use image::imageops;
use image::{Pixel, Rgba, RgbaImage};

/// Integer rectangle in surface pixels. May extend past the surface edges;
/// operations clip it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersect with `[0, w) x [0, h)`, returning `(x0, y0, x1, y1)`.
    fn clip(&self, w: u32, h: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = (self.x + self.width as i64).min(w as i64);
        let y1 = (self.y + self.height as i64).min(h as i64);
        if x1 > x0 && y1 > y0 {
            Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
        } else {
            None
        }
    }
}

/// Minimal 2D drawing capability the render pipeline needs.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resize and reset to transparent, like assigning a canvas size.
    fn resize(&mut self, width: u32, height: u32);

    /// Source-over fill.
    fn fill_rect(&mut self, rect: PixelRect, color: Rgba<u8>);

    /// Copy `src` from `source` 1:1 so that its top-left lands on
    /// `(dst_x, dst_y)`. Source pixels outside `source` leave the destination
    /// untouched.
    fn blit(&mut self, source: &RgbaImage, src: PixelRect, dst_x: i64, dst_y: i64);

    fn pixels(&self) -> &RgbaImage;
}

/// CPU surface backed by an `RgbaImage`.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgba<u8>) {
        let Some((x0, y0, x1, y1)) = rect.clip(self.image.width(), self.image.height()) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.get_pixel_mut(x, y).blend(&color);
            }
        }
    }

    fn blit(&mut self, source: &RgbaImage, src: PixelRect, dst_x: i64, dst_y: i64) {
        let Some((x0, y0, x1, y1)) = src.clip(source.width(), source.height()) else {
            return;
        };
        let view = imageops::crop_imm(source, x0, y0, x1 - x0, y1 - y0).to_image();
        // The clipped view starts (x0 - src.x, y0 - src.y) into the requested rect.
        imageops::replace(
            &mut self.image,
            &view,
            dst_x + (x0 as i64 - src.x),
            dst_y + (y0 as i64 - src.y),
        );
    }

    fn pixels(&self) -> &RgbaImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_blends_over_existing_pixels() {
        let mut s = RasterSurface::from_image(RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])));
        s.fill_rect(PixelRect::new(0, 0, 1, 2), Rgba([0, 0, 0, 128]));
        let dimmed = s.pixels().get_pixel(0, 1);
        assert_eq!(dimmed[3], 255);
        assert!((dimmed[0] as i32 - 127).abs() <= 1, "got {:?}", dimmed);
        assert_eq!(*s.pixels().get_pixel(1, 1), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_blit_offsets_destination_and_clips_overhang() {
        let source = RgbaImage::from_fn(3, 3, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let mut s = RasterSurface::new(3, 3);
        s.blit(&source, PixelRect::new(1, 1, 3, 3), 1, 0);
        assert_eq!(*s.pixels().get_pixel(1, 0), Rgba([1, 1, 0, 255]));
        assert_eq!(*s.pixels().get_pixel(2, 1), Rgba([2, 2, 0, 255]));
        assert_eq!(s.pixels().get_pixel(0, 0)[3], 0);
        assert_eq!(s.pixels().get_pixel(1, 2)[3], 0);
    }

    #[test]
    fn test_blit_clips_negative_source_origin() {
        let mut source = RgbaImage::new(4, 4);
        source.put_pixel(0, 0, Rgba([9, 9, 9, 255]));
        let mut s = RasterSurface::new(4, 4);
        s.blit(&source, PixelRect::new(-1, -1, 4, 4), 0, 0);
        assert_eq!(s.pixels().get_pixel(0, 0)[3], 0);
        assert_eq!(*s.pixels().get_pixel(1, 1), Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn test_fill_rect_outside_is_noop() {
        let mut s = RasterSurface::new(2, 2);
        s.fill_rect(PixelRect::new(5, 5, 3, 3), Rgba([255, 0, 0, 255]));
        assert!(s.pixels().pixels().all(|p| p[3] == 0));
    }
}
