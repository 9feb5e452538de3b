use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{HANDLE_HIT_RADIUS, MIN_CROP_SIZE};
use crate::error::CropperError;

/// A position or displacement in container coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height.
    pub fn ratio(&self) -> f64 {
        self.width / self.height
    }

    /// True when both dimensions are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Whole-pixel dimensions, truncated the way a canvas truncates its size.
    pub fn to_pixels(&self) -> (u32, u32) {
        (
            self.width.max(0.0).trunc() as u32,
            self.height.max(0.0).trunc() as u32,
        )
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle in container coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_min_size(min: Point, size: Size) -> Self {
        Self {
            x: min.x,
            y: min.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn min(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Half-open containment: left/top edges are inside, right/bottom are not.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > x && bottom > y {
            Some(Rect {
                x,
                y,
                width: right - x,
                height: bottom - y,
            })
        } else {
            None
        }
    }
}

/// How the source image is scaled into the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DisplayMode {
    /// The board overfills the container.
    #[default]
    Cover,
    /// The board fits inside the container.
    Contain,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cover => write!(f, "COVER"),
            Self::Contain => write!(f, "CONTAIN"),
        }
    }
}

/// Which container axis the board is matched to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitStrategy {
    /// Board width equals container width, centered vertically.
    FitWidth,
    /// Board height equals container height, centered horizontally.
    FitHeight,
}

/// Result of fitting the source image into the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    pub strategy: FitStrategy,
    pub board: Size,
    pub offset: Point,
}

/// Pick the fit strategy for a display mode.
///
/// CONTAIN matches width when the image is at least as wide (relative to its
/// height) as the container; COVER makes the opposite choice for the same
/// comparison so that it overfills instead of fitting.
pub fn select_strategy(container: Size, image: Size, mode: DisplayMode) -> FitStrategy {
    let wider = image.ratio() >= container.ratio();
    match (mode, wider) {
        (DisplayMode::Contain, true) | (DisplayMode::Cover, false) => FitStrategy::FitWidth,
        (DisplayMode::Contain, false) | (DisplayMode::Cover, true) => FitStrategy::FitHeight,
    }
}

/// Scale the source image into the container and center it on the free axis.
pub fn fit_image(container: Size, image: Size, mode: DisplayMode) -> Fit {
    let img_ratio = image.ratio();
    let strategy = select_strategy(container, image, mode);

    let (board, offset) = match strategy {
        FitStrategy::FitWidth => {
            let board = Size::new(container.width, container.width / img_ratio);
            (board, Point::new(0.0, (container.height - board.height) / 2.0))
        }
        FitStrategy::FitHeight => {
            let board = Size::new(container.height * img_ratio, container.height);
            (board, Point::new((container.width - board.width) / 2.0, 0.0))
        }
    };

    Fit {
        strategy,
        board,
        offset,
    }
}

/// Closed interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        clamp(value, *self)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Admissible board offsets that keep the crop window covered by the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanRange {
    pub x: Span,
    pub y: Span,
}

impl PanRange {
    pub fn clamp(&self, offset: Point) -> Point {
        Point::new(self.x.clamp(offset.x), self.y.clamp(offset.y))
    }

    pub fn contains(&self, offset: Point) -> bool {
        self.x.contains(offset.x) && self.y.contains(offset.y)
    }
}

pub fn pan_range(container: Size, crop: Size, board: Size) -> PanRange {
    let space_x = (container.width - crop.width) / 2.0;
    let space_y = (container.height - crop.height) / 2.0;
    PanRange {
        x: Span::new(-(board.width + space_x - container.width), space_x),
        y: Span::new(-(board.height + space_y - container.height), space_y),
    }
}

/// Two-sided clamp that lower-bounds first, then upper-bounds.
///
/// Unlike `f64::clamp` this never panics on an inverted range; when the crop
/// window is larger than the board on an axis `min > max` and the result is
/// `max`.
pub fn clamp(value: f64, range: Span) -> f64 {
    let mut v = value;
    if v < range.min {
        v = range.min;
    }
    if v > range.max {
        v = range.max;
    }
    v
}

/// The crop window is always centered in the container.
pub fn crop_window(container: Size, crop: Size) -> Rect {
    Rect::from_min_size(
        Point::new(
            (container.width - crop.width) / 2.0,
            (container.height - crop.height) / 2.0,
        ),
        crop,
    )
}

/// Crop window dimensions plus the aspect-lock flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropSize {
    pub width: f64,
    pub height: f64,
    pub aspect_locked: bool,
}

impl CropSize {
    pub fn new(width: f64, height: f64, aspect_locked: bool) -> Self {
        Self {
            width,
            height,
            aspect_locked,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Raise both dimensions to at least [`MIN_CROP_SIZE`].
    pub fn floored(self) -> Self {
        Self {
            width: self.width.max(MIN_CROP_SIZE),
            height: self.height.max(MIN_CROP_SIZE),
            ..self
        }
    }
}

/// Corner drag targets of the crop window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
}

impl Handle {
    pub const ALL: [Handle; 4] = [
        Handle::TopLeft,
        Handle::BottomLeft,
        Handle::TopRight,
        Handle::BottomRight,
    ];

    /// Sign applied to the horizontal delta when computing the new width.
    pub fn width_sign(&self) -> f64 {
        match self {
            Self::TopLeft | Self::BottomLeft => -1.0,
            Self::TopRight | Self::BottomRight => 1.0,
        }
    }

    /// Sign applied to the vertical delta when computing the new height.
    pub fn height_sign(&self) -> f64 {
        match self {
            Self::TopLeft | Self::TopRight => -1.0,
            Self::BottomLeft | Self::BottomRight => 1.0,
        }
    }

    /// The crop-window corner this handle sits on.
    pub fn corner(&self, window: &Rect) -> Point {
        match self {
            Self::TopLeft => Point::new(window.x, window.y),
            Self::BottomLeft => Point::new(window.x, window.bottom()),
            Self::TopRight => Point::new(window.right(), window.y),
            Self::BottomRight => Point::new(window.right(), window.bottom()),
        }
    }

    /// Square hit box of side `2 * HANDLE_HIT_RADIUS` centered on the corner.
    pub fn hit_box(&self, window: &Rect) -> Rect {
        let c = self.corner(window);
        Rect {
            x: c.x - HANDLE_HIT_RADIUS,
            y: c.y - HANDLE_HIT_RADIUS,
            width: 2.0 * HANDLE_HIT_RADIUS,
            height: 2.0 * HANDLE_HIT_RADIUS,
        }
    }

    /// CSS-style resize cursor name.
    pub fn cursor(&self) -> &'static str {
        match self {
            Self::TopLeft => "nw-resize",
            Self::BottomLeft => "sw-resize",
            Self::TopRight => "ne-resize",
            Self::BottomRight => "se-resize",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopLeft => write!(f, "top-left"),
            Self::BottomLeft => write!(f, "bottom-left"),
            Self::TopRight => write!(f, "top-right"),
            Self::BottomRight => write!(f, "bottom-right"),
        }
    }
}

impl FromStr for Handle {
    type Err = CropperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top-left" | "tl" => Ok(Self::TopLeft),
            "bottom-left" | "bl" => Ok(Self::BottomLeft),
            "top-right" | "tr" => Ok(Self::TopRight),
            "bottom-right" | "br" => Ok(Self::BottomRight),
            other => Err(CropperError::InvalidConfig(format!(
                "unknown handle '{other}'"
            ))),
        }
    }
}

/// New crop size for a handle drag of `(dx, dy)` (already scaled) from `down`.
///
/// With the aspect lock on, height follows width at the ratio captured in
/// `down` and any `dy` is ignored. The width floor is raised so that the
/// derived height also stays above [`MIN_CROP_SIZE`], keeping the ratio exact.
pub fn resized_crop_size(handle: Handle, down: CropSize, dx: f64, dy: f64) -> CropSize {
    let width = down.width + handle.width_sign() * dx;

    if down.aspect_locked {
        let ratio = down.height / down.width;
        let min_width = MIN_CROP_SIZE.max(MIN_CROP_SIZE / ratio);
        let width = width.max(min_width);
        CropSize::new(width, width * ratio, true)
    } else {
        let height = down.height + handle.height_sign() * dy;
        CropSize::new(width, height, false).floored()
    }
}
