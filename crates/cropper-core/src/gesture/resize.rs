use crate::consts::RESIZE_DRAG_FACTOR;
use crate::geometry::{resized_crop_size, CropSize, Handle, Point};

/// Reference captured when a corner handle is grabbed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeDrag {
    pub handle: Handle,
    pub down_point: Point,
    pub down_size: CropSize,
}

impl ResizeDrag {
    pub fn new(handle: Handle, down_point: Point, down_size: CropSize) -> Self {
        Self {
            handle,
            down_point,
            down_size,
        }
    }

    /// Scaled pointer travel since the handle was grabbed.
    pub fn delta(&self, pointer: Point) -> Point {
        Point::new(
            (pointer.x - self.down_point.x) * RESIZE_DRAG_FACTOR,
            (pointer.y - self.down_point.y) * RESIZE_DRAG_FACTOR,
        )
    }

    pub fn update(&self, pointer: Point) -> CropSize {
        let d = self.delta(pointer);
        resized_crop_size(self.handle, self.down_size, d.x, d.y)
    }
}
