//! Pointer gesture session.
//!
//! A gesture starts on pointer-down, is fed pointer positions while the
//! pointer stays down, and ends on pointer-up. Pan and resize never overlap:
//! grabbing a handle selects resize for the whole gesture.

pub mod pan;
pub mod resize;

use tracing::debug;

use crate::geometry::{CropSize, Handle, Point};

pub use pan::PanDrag;
pub use resize::ResizeDrag;

/// What lies under the pointer, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Handle(Handle),
    CropWindow,
    Board,
    Outside,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Panning(PanDrag),
    Resizing(ResizeDrag),
}

/// Explicit drag state shared with the pan and resize controllers.
#[derive(Clone, Debug, Default)]
pub struct Session {
    gesture: Gesture,
}

impl Session {
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// True between a pointer-down that started a gesture and the next
    /// pointer-up.
    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    pub fn active_handle(&self) -> Option<Handle> {
        match self.gesture {
            Gesture::Resizing(drag) => Some(drag.handle),
            _ => None,
        }
    }

    /// Start a gesture. Returns `false` if one is already running or nothing
    /// draggable is under the pointer.
    pub fn press(&mut self, target: HitTarget, at: Point, offset: Point, crop: CropSize) -> bool {
        if self.is_active() {
            return false;
        }
        self.gesture = match target {
            HitTarget::Handle(handle) => Gesture::Resizing(ResizeDrag::new(handle, at, crop)),
            HitTarget::CropWindow | HitTarget::Board => Gesture::Panning(PanDrag::new(at, offset)),
            HitTarget::Outside => return false,
        };
        debug!(gesture = ?self.gesture, "Gesture started");
        true
    }

    /// End the current gesture, if any.
    pub fn release(&mut self) -> Gesture {
        let ended = std::mem::take(&mut self.gesture);
        if !matches!(ended, Gesture::Idle) {
            debug!(gesture = ?ended, "Gesture ended");
        }
        ended
    }
}
