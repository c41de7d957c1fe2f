//! Error types for chart rendering.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Nothing to plot: {what}")]
    EmptyData { what: &'static str },

    #[error("Series '{label}' has {y_len} values for {x_len} x values")]
    LengthMismatch {
        label: String,
        x_len: usize,
        y_len: usize,
    },

    #[error("Invalid chart size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ChartResult<T> = Result<T, ChartError>;
