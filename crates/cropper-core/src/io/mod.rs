pub mod encode;
pub mod loader;
