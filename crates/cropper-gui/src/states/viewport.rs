use cropper_core::geometry::Size;

/// Fixed container size for an editing session.
pub const CONTAINER_SIZE: [f32; 2] = [640.0, 480.0];

/// Viewport display state.
#[derive(Default)]
pub struct ViewportState {
    /// Masked board raster, uploaded once per session.
    pub board_texture: Option<egui::TextureHandle>,
    /// Current crop surface.
    pub crop_texture: Option<egui::TextureHandle>,
    /// Set when the crop surface changed since the last upload.
    pub crop_dirty: bool,
}

impl ViewportState {
    pub fn container(&self) -> Size {
        Size::new(CONTAINER_SIZE[0] as f64, CONTAINER_SIZE[1] as f64)
    }
}
