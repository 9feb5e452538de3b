/// Half the side of the square hit box centered on each crop-window corner.
pub const HANDLE_HIT_RADIUS: f64 = 16.0;

/// Smallest crop width/height reachable by resizing: one full handle hit box.
pub const MIN_CROP_SIZE: f64 = 2.0 * HANDLE_HIT_RADIUS;

/// Pointer deltas are doubled during resize because the crop window stays
/// centered and both opposite edges move.
pub const RESIZE_DRAG_FACTOR: f64 = 2.0;

/// Translucent black painted over the displayed board and the container
/// background, `rgba(0,0,0,.5)`.
pub const MASK_COLOR: [u8; 4] = [0, 0, 0, 128];

/// Largest board raster, in pixels, that initialization will allocate.
/// Extreme aspect ratios under COVER can otherwise fit to millions of rows.
pub const MAX_BOARD_PIXELS: u64 = 50_000_000;

/// Default crop window width and height.
pub const DEFAULT_CLIP_SIZE: f64 = 100.0;

/// Default MIME type of the produced artifact.
pub const DEFAULT_OUTPUT_MIME: &str = "image/png";

/// Default encoder quality factor in `[0.0, 1.0]`.
pub const DEFAULT_OUTPUT_QUALITY: f32 = 0.9;
