use std::path::PathBuf;

use cropper_core::config::CropperOptions;
use cropper_core::cropper::Cropper;

/// Results sent back to the UI thread from dialog/loader threads.
pub enum AppMessage {
    Loaded {
        path: PathBuf,
        cropper: Box<Cropper>,
    },
    OptionsImported {
        options: CropperOptions,
    },
    Saved {
        path: PathBuf,
    },
    Error {
        message: String,
    },
}
