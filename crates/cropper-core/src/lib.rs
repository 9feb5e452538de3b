pub mod config;
pub mod consts;
pub mod cropper;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod io;
pub mod render;
pub mod surface;
