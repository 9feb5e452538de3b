mod ui;
pub mod viewport;

pub use ui::UIState;
pub use viewport::ViewportState;
