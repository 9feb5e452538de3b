use std::io::Write;

use cropper_core::config::{ClipSize, CropperOptions, OutputOptions};
use cropper_core::consts::MIN_CROP_SIZE;
use cropper_core::cropper::Cropper;
use cropper_core::error::CropperError;
use cropper_core::geometry::{DisplayMode, Handle, Point, Size};
use cropper_core::gesture::{Gesture, HitTarget};
use cropper_core::io::loader::{BytesSource, FileSource};
use cropper_core::surface::{PixelRect, RasterSurface, Surface};
use image::{Rgba, RgbaImage};
use tempfile::NamedTempFile;

mod common;
use common::{assert_close, coordinate_image, cover_cropper, options, solid_image};

/// Surface that counts how often the pipeline redraws it.
#[derive(Default)]
struct CountingSurface {
    inner: RasterSurface,
    blits: usize,
}

impl Surface for CountingSurface {
    fn width(&self) -> u32 {
        self.inner.width()
    }
    fn height(&self) -> u32 {
        self.inner.height()
    }
    fn resize(&mut self, width: u32, height: u32) {
        self.inner.resize(width, height);
    }
    fn fill_rect(&mut self, rect: PixelRect, color: Rgba<u8>) {
        self.inner.fill_rect(rect, color);
    }
    fn blit(&mut self, source: &RgbaImage, src: PixelRect, dst_x: i64, dst_y: i64) {
        self.blits += 1;
        self.inner.blit(source, src, dst_x, dst_y);
    }
    fn pixels(&self) -> &RgbaImage {
        self.inner.pixels()
    }
}

#[test]
fn test_initialize_cover_scenario() {
    let cropper = cover_cropper(100.0, 100.0, true);
    assert_eq!(cropper.board().size(), Size::new(600.0, 300.0));
    assert_eq!(cropper.offset(), Point::new(-100.0, 0.0));
    assert_eq!(cropper.crop_window().x, 150.0);
    assert_eq!(cropper.crop_window().y, 100.0);
    assert_eq!(cropper.surface().pixels().dimensions(), (100, 100));
    assert!(!cropper.is_dragging());
    assert!(cropper.last_artifact().is_none());
}

#[test]
fn test_pan_clamps_to_range() {
    let mut cropper = cover_cropper(360.0, 100.0, false);
    let range = cropper.pan_range();
    assert_close(range.x.min, -220.0);
    assert_close(range.x.max, 20.0);

    assert_eq!(cropper.pointer_down(Point::new(200.0, 150.0)), HitTarget::CropWindow);
    assert!(cropper.pointer_move(Point::new(350.0, 150.0)));
    assert_close(cropper.offset().x, 20.0);

    cropper.pointer_move(Point::new(-400.0, 150.0));
    assert_close(cropper.offset().x, -220.0);

    cropper.pointer_move(Point::new(180.0, 170.0));
    assert_close(cropper.offset().x, -120.0);
    assert_close(cropper.offset().y, 20.0);

    assert!(matches!(cropper.pointer_up(), Gesture::Panning(_)));
    assert_close(cropper.offset().x, -120.0);
}

#[test]
fn test_committed_offset_is_next_reference() {
    let mut cropper = cover_cropper(100.0, 100.0, true);
    cropper.pointer_down(Point::new(20.0, 20.0));
    cropper.pointer_move(Point::new(50.0, 30.0));
    cropper.pointer_up();
    assert_eq!(cropper.offset(), Point::new(-70.0, 10.0));

    assert_eq!(cropper.pointer_down(Point::new(300.0, 250.0)), HitTarget::Board);
    cropper.pointer_move(Point::new(290.0, 250.0));
    cropper.pointer_up();
    assert_eq!(cropper.offset(), Point::new(-80.0, 10.0));
}

#[test]
fn test_every_proposed_offset_is_clamped() {
    let mut cropper = cover_cropper(120.0, 90.0, false);
    cropper.pointer_down(Point::new(200.0, 150.0));
    let mut x = -800.0;
    while x <= 800.0 {
        cropper.pointer_move(Point::new(200.0 + x, 150.0 - x / 3.0));
        let range = cropper.pan_range();
        assert!(range.contains(cropper.offset()), "{:?} not in {:?}", cropper.offset(), range);
        x += 53.0;
    }
    cropper.pointer_up();
}

#[test]
fn test_moves_without_press_are_ignored() {
    let mut cropper = cover_cropper(100.0, 100.0, true);
    let before = cropper.offset();
    assert!(!cropper.pointer_move(Point::new(300.0, 10.0)));
    assert_eq!(cropper.offset(), before);

    cropper.pointer_down(Point::new(200.0, 150.0));
    cropper.pointer_up();
    assert!(!cropper.pointer_move(Point::new(10.0, 10.0)));
    assert_eq!(cropper.offset(), before);
}

#[test]
fn test_resize_from_bottom_right_with_aspect_lock() {
    let mut cropper = cover_cropper(100.0, 100.0, true);
    let target = cropper.pointer_down(Point::new(250.0, 200.0));
    assert_eq!(target, HitTarget::Handle(Handle::BottomRight));
    assert_eq!(cropper.session().active_handle(), Some(Handle::BottomRight));

    cropper.pointer_move(Point::new(260.0, 202.5));
    let crop = cropper.crop_size();
    assert_close(crop.width, 120.0);
    assert_close(crop.height, 120.0);
    assert_eq!(cropper.surface().pixels().dimensions(), (120, 120));
    assert_close(cropper.crop_window().x, 140.0);

    // Pan is disabled while a handle is held.
    assert_eq!(cropper.offset(), Point::new(-100.0, 0.0));

    assert!(matches!(cropper.pointer_up(), Gesture::Resizing(_)));
    assert!(cropper.session().active_handle().is_none());
}

#[test]
fn test_free_resize_from_top_left() {
    let mut cropper = cover_cropper(100.0, 80.0, false);
    // Window spans (150, 110)-(250, 190).
    assert_eq!(
        cropper.pointer_down(Point::new(150.0, 110.0)),
        HitTarget::Handle(Handle::TopLeft)
    );
    cropper.pointer_move(Point::new(140.0, 115.0));
    let crop = cropper.crop_size();
    assert_close(crop.width, 120.0);
    assert_close(crop.height, 70.0);
    cropper.pointer_up();
}

#[test]
fn test_resize_never_below_floor() {
    let mut cropper = cover_cropper(100.0, 100.0, true);
    cropper.pointer_down(Point::new(150.0, 100.0));
    for step in 0..40 {
        let p = Point::new(150.0 + step as f64 * 7.0, 100.0 + step as f64 * 3.0);
        cropper.pointer_move(p);
        let crop = cropper.crop_size();
        assert!(crop.width >= MIN_CROP_SIZE && crop.height >= MIN_CROP_SIZE);
    }
    assert_close(cropper.crop_size().width, MIN_CROP_SIZE);
    cropper.pointer_up();
}

#[test]
fn test_growing_crop_keeps_offset_in_range() {
    let mut cropper = cover_cropper(100.0, 100.0, true);
    cropper.pointer_down(Point::new(200.0, 150.0));
    cropper.pointer_move(Point::new(400.0, 300.0));
    cropper.pointer_up();
    assert_eq!(cropper.offset(), Point::new(100.0, 100.0));

    cropper.pointer_down(Point::new(250.0, 200.0));
    cropper.pointer_move(Point::new(300.0, 200.0));
    cropper.pointer_up();

    assert_close(cropper.crop_size().width, 200.0);
    let range = cropper.pan_range();
    assert!(range.contains(cropper.offset()));
    assert_close(cropper.offset().x, 100.0);
    assert_close(cropper.offset().y, 50.0);
    assert_eq!(cropper.surface().pixels().get_pixel(0, 0)[3], 255);
}

#[test]
fn test_hit_test_outside_board_in_contain_mode() {
    let image = coordinate_image(800, 400);
    let mut cropper = pollster::block_on(Cropper::initialize(
        Size::new(400.0, 300.0),
        &image,
        options(DisplayMode::Contain, 100.0, 100.0, true),
    ))
    .unwrap();
    // Board 400x200 at (0, 50): the top band is bare container.
    assert_eq!(cropper.hit_test(Point::new(10.0, 10.0)), HitTarget::Outside);
    assert_eq!(cropper.hit_test(Point::new(10.0, 60.0)), HitTarget::Board);
    assert_eq!(cropper.pointer_down(Point::new(10.0, 10.0)), HitTarget::Outside);
    assert!(!cropper.is_dragging());
}

#[test]
fn test_each_move_renders_once() {
    let image = solid_image(800, 400, [10, 200, 30]);
    let mut cropper = pollster::block_on(Cropper::initialize_with_surface(
        Size::new(400.0, 300.0),
        &image,
        CropperOptions::default(),
        CountingSurface::default(),
    ))
    .unwrap();
    assert_eq!(cropper.surface().blits, 1);

    cropper.pointer_move(Point::new(10.0, 10.0));
    assert_eq!(cropper.surface().blits, 1);

    cropper.pointer_down(Point::new(200.0, 150.0));
    cropper.pointer_move(Point::new(210.0, 150.0));
    cropper.pointer_move(Point::new(220.0, 150.0));
    cropper.pointer_up();
    assert_eq!(cropper.surface().blits, 3);
}

#[test]
fn test_artifact_matches_crop_surface() {
    let mut cropper = cover_cropper(100.0, 100.0, true);
    let artifact = pollster::block_on(cropper.crop_artifact()).unwrap();
    assert_eq!(artifact.mime, "image/png");
    assert!(artifact.data_url.starts_with("data:image/png;base64,"));

    let decoded = image::load_from_memory(&artifact.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.as_raw(), cropper.surface().pixels().as_raw());
    assert_eq!(cropper.last_artifact(), Some(&artifact));
}

#[test]
fn test_artifact_refused_mid_gesture() {
    let mut cropper = cover_cropper(100.0, 100.0, true);
    cropper.pointer_down(Point::new(200.0, 150.0));
    let err = pollster::block_on(cropper.crop_artifact()).unwrap_err();
    assert!(matches!(err, CropperError::GestureInProgress));
    cropper.pointer_up();
    assert!(pollster::block_on(cropper.crop_artifact()).is_ok());
}

#[test]
fn test_set_crop_size_floors_and_rerenders() {
    let mut cropper = cover_cropper(100.0, 100.0, true);
    cropper
        .set_crop_size(ClipSize {
            w: 10.0,
            h: 200.0,
            fixed: false,
        })
        .unwrap();
    let crop = cropper.crop_size();
    assert_close(crop.width, MIN_CROP_SIZE);
    assert_close(crop.height, 200.0);
    assert!(!crop.aspect_locked);
    assert_eq!(cropper.surface().pixels().dimensions(), (32, 200));

    assert!(cropper
        .set_crop_size(ClipSize {
            w: -1.0,
            h: 10.0,
            fixed: true
        })
        .is_err());
}

#[test]
fn test_set_output_options_applies_to_next_artifact() {
    let mut cropper = cover_cropper(100.0, 100.0, true);
    cropper
        .set_output_options(OutputOptions {
            mime: "image/jpeg".into(),
            quality: 0.5,
        })
        .unwrap();
    let artifact = pollster::block_on(cropper.crop_artifact()).unwrap();
    assert_eq!(artifact.mime, "image/jpeg");
    assert!(artifact.data_url.starts_with("data:image/jpeg;base64,"));

    let err = cropper
        .set_output_options(OutputOptions {
            mime: "image/gif".into(),
            quality: 0.5,
        })
        .unwrap_err();
    assert!(matches!(err, CropperError::UnsupportedFormat(_)));
    assert_eq!(cropper.options().output.mime, "image/jpeg");
}

#[test]
fn test_initial_crop_below_floor_is_raised() {
    let cropper = cover_cropper(8.0, 8.0, true);
    assert_eq!(cropper.crop_size().width, MIN_CROP_SIZE);
    assert_eq!(cropper.crop_size().height, MIN_CROP_SIZE);
}

#[test]
fn test_undecodable_source_is_rejected() {
    let source = BytesSource(b"definitely not an image".to_vec());
    let res = pollster::block_on(Cropper::initialize(
        Size::new(400.0, 300.0),
        &source,
        CropperOptions::default(),
    ));
    assert!(matches!(res, Err(CropperError::ImageDecode(_))));
}

#[test]
fn test_invalid_container_is_rejected() {
    let image = solid_image(10, 10, [0, 0, 0]);
    let res = pollster::block_on(Cropper::initialize(
        Size::new(0.0, 300.0),
        &image,
        CropperOptions::default(),
    ));
    assert!(matches!(res, Err(CropperError::InvalidDimensions { .. })));
}

#[test]
fn test_extreme_aspect_board_is_rejected_under_cover() {
    // COVER fits a 1x4000 strip to the container width: a 400x1600000 board.
    let image = solid_image(1, 4000, [0, 0, 0]);
    let res = pollster::block_on(Cropper::initialize(
        Size::new(400.0, 300.0),
        &image,
        options(DisplayMode::Cover, 100.0, 100.0, true),
    ));
    match res {
        Err(CropperError::InvalidDimensions { width, height }) => {
            assert_close(width, 400.0);
            assert_close(height, 1_600_000.0);
        }
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("oversized board was accepted"),
    }
}

#[test]
fn test_invalid_options_are_rejected() {
    let image = solid_image(10, 10, [0, 0, 0]);
    let res = pollster::block_on(Cropper::initialize(
        Size::new(400.0, 300.0),
        &image,
        options(DisplayMode::Cover, 0.0, 100.0, true),
    ));
    assert!(matches!(res, Err(CropperError::InvalidConfig(_))));
}

#[test]
fn test_file_source_loads_png() {
    let mut bytes = Vec::new();
    coordinate_image(64, 32)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();

    let source = FileSource::new(file.path());
    let cropper = pollster::block_on(Cropper::initialize(
        Size::new(320.0, 240.0),
        &source,
        CropperOptions::default(),
    ))
    .unwrap();
    assert_eq!(cropper.board().size(), Size::new(480.0, 240.0));
}

#[test]
fn test_missing_file_is_io_error() {
    let source = FileSource::new("/nonexistent/cropper/source.png");
    let res = pollster::block_on(Cropper::initialize(
        Size::new(320.0, 240.0),
        &source,
        CropperOptions::default(),
    ));
    assert!(matches!(res, Err(CropperError::Io(_))));
}
