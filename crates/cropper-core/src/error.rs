use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropperError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode source image: {0}")]
    ImageDecode(String),

    #[error("Failed to encode crop surface: {0}")]
    Encode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("A drag gesture is still in progress")]
    GestureInProgress,
}

pub type Result<T> = std::result::Result<T, CropperError>;
