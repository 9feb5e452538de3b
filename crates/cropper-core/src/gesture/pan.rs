use crate::geometry::{PanRange, Point};

/// Reference captured when a pan starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanDrag {
    pub down_point: Point,
    pub down_offset: Point,
}

impl PanDrag {
    pub fn new(down_point: Point, down_offset: Point) -> Self {
        Self {
            down_point,
            down_offset,
        }
    }

    /// Offset the pointer asks for, before clamping.
    pub fn proposed(&self, pointer: Point) -> Point {
        self.down_offset + (pointer - self.down_point)
    }

    /// Clamped offset for the current pointer position.
    pub fn update(&self, pointer: Point, range: &PanRange) -> Point {
        range.clamp(self.proposed(pointer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Span;

    #[test]
    fn test_update_clamps_to_range() {
        let drag = PanDrag::new(Point::new(10.0, 10.0), Point::new(-100.0, 0.0));
        let range = PanRange {
            x: Span::new(-220.0, 20.0),
            y: Span::new(-10.0, 10.0),
        };
        let next = drag.update(Point::new(160.0, 15.0), &range);
        assert_eq!(next, Point::new(20.0, 5.0));
    }
}
