use cropper_core::config::OutputOptions;
use cropper_core::error::CropperError;
use cropper_core::io::encode::{decode_data_url, encode_data_url, encode_image, OutputFormat};
use cropper_core::surface::{RasterSurface, Surface};
use image::{Rgba, RgbaImage};

fn checker_surface() -> RasterSurface {
    let img = RgbaImage::from_fn(40, 32, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            Rgba([250, 20, 20, 255])
        } else {
            Rgba([20, 20, 250, 128])
        }
    });
    RasterSurface::from_image(img)
}

fn output(mime: &str, quality: f32) -> OutputOptions {
    OutputOptions {
        mime: mime.into(),
        quality,
    }
}

#[test]
fn test_png_data_url_decodes_to_same_pixels() {
    let surface = checker_surface();
    let url = encode_data_url(&surface, &OutputOptions::default()).unwrap();
    assert!(url.starts_with("data:image/png;base64,"));

    let artifact = pollster::block_on(decode_data_url(&url)).unwrap();
    assert_eq!(artifact.mime, "image/png");
    assert_eq!(&artifact.bytes[..4], b"\x89PNG");

    let decoded = image::load_from_memory(&artifact.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.as_raw(), surface.pixels().as_raw());
}

#[test]
fn test_jpeg_quality_changes_size() {
    let surface = checker_surface();
    let low = encode_image(surface.pixels(), OutputFormat::Jpeg, 0.1).unwrap();
    let high = encode_image(surface.pixels(), OutputFormat::Jpeg, 1.0).unwrap();
    assert_eq!(&low[..2], &[0xFF, 0xD8]);
    assert!(low.len() < high.len());

    let decoded = image::load_from_memory(&high).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (40, 32));
}

#[test]
fn test_bmp_output() {
    let url = encode_data_url(&checker_surface(), &output("image/bmp", 0.9)).unwrap();
    let artifact = pollster::block_on(decode_data_url(&url)).unwrap();
    assert_eq!(artifact.mime, "image/bmp");
    assert_eq!(&artifact.bytes[..2], b"BM");
}

#[test]
fn test_unsupported_mime_is_rejected() {
    let err = encode_data_url(&checker_surface(), &output("image/gif", 0.9)).unwrap_err();
    assert!(matches!(err, CropperError::UnsupportedFormat(ref m) if m == "image/gif"));
}

#[test]
fn test_empty_surface_cannot_be_encoded() {
    let err = encode_data_url(&RasterSurface::default(), &OutputOptions::default()).unwrap_err();
    assert!(matches!(err, CropperError::Encode(_)));
}

#[test]
fn test_malformed_data_urls() {
    for bad in [
        "no-comma-here",
        "data:image/png,AAAA",
        "image/png;base64,AAAA",
        "data:;base64,AAAA",
        "data:image/png;base64,***",
    ] {
        let err = pollster::block_on(decode_data_url(bad)).unwrap_err();
        assert!(matches!(err, CropperError::Encode(_)), "{bad}: {err}");
    }
}

#[test]
fn test_format_metadata() {
    assert_eq!(OutputFormat::from_mime("image/jpg").unwrap().mime(), "image/jpeg");
    assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
    assert_eq!(OutputFormat::WebP.extension(), "webp");
}
