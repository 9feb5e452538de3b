#![allow(dead_code)]

use cropper_core::config::{ClipSize, CropperOptions};
use cropper_core::cropper::Cropper;
use cropper_core::geometry::{DisplayMode, Size};
use image::{DynamicImage, Rgba, RgbaImage};

/// Image whose pixels encode their own coordinates, so sampled regions can be
/// traced back to where they came from.
pub fn coordinate_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x / 256 + y / 256) % 256) as u8, 255])
    });
    DynamicImage::ImageRgba8(img)
}

/// Single-color opaque image.
pub fn solid_image(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    let img = RgbaImage::from_pixel(width, height, Rgba([color[0], color[1], color[2], 255]));
    DynamicImage::ImageRgba8(img)
}

pub fn options(mode: DisplayMode, w: f64, h: f64, fixed: bool) -> CropperOptions {
    CropperOptions {
        show_type: mode,
        clip_size: ClipSize { w, h, fixed },
        ..CropperOptions::default()
    }
}

/// Container 400x300 with an 800x400 image in COVER mode: the board is
/// 600x300 at offset (-100, 0).
pub fn cover_cropper(w: f64, h: f64, fixed: bool) -> Cropper {
    let image = coordinate_image(800, 400);
    pollster::block_on(Cropper::initialize(
        Size::new(400.0, 300.0),
        &image,
        options(DisplayMode::Cover, w, h, fixed),
    ))
    .unwrap()
}

pub fn assert_close(actual: f64, expected: f64) {
    approx::assert_abs_diff_eq!(actual, expected, epsilon = 1e-6);
}
