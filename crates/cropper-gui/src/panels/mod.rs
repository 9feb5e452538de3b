pub mod controls;
pub mod crop_interaction;
pub mod menu_bar;
pub mod status;
pub mod viewport;
