use thiserror::Error;

//===========================================================================//

/// Errors that can occur while decoding or encoding an ICO file.
#[derive(Debug, Error)]
pub enum IcoError {
    /// The ICONDIR header violates the format's fixed constants, or a value
    /// can't be represented in the format.
    #[error("Invalid ICO data: {0}")]
    Format(String),

    /// A read would run past the end of the buffer.
    #[error(
        "Truncated data: needed {needed} bytes at offset {offset}, \
         but only {available} are available"
    )]
    Truncated {
        /// Position at which the read was attempted.
        offset: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes remaining from `offset`.
        available: usize,
    },

    /// Decoding finished, but none of the directory entries were usable.
    #[error("ICO file contains no usable images")]
    EmptyResult,

    /// An encode was requested with a size outside of 1 to 256.
    #[error("Invalid icon size (was {0}, but must be between 1 and 256)")]
    InvalidSize(u32),

    /// An encode was requested with no sizes at all.
    #[error("No icon sizes were requested")]
    NoSizesRequested,

    /// An embedded image can't be turned into pixels.
    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    /// A rasterizer returned an image of the wrong shape.
    #[error("Rasterizer error: {0}")]
    Rasterizer(String),

    /// The PNG encoder failed.
    #[error("PNG encoding failed: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// The PNG decoder failed.
    #[error("PNG decoding failed: {0}")]
    PngDecoding(#[from] png::DecodingError),

    /// Writing an encoded file out failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IcoError {
    /// Returns true if this error means the input ended too early.
    pub fn is_truncated(&self) -> bool {
        matches!(self, IcoError::Truncated { .. })
    }
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, IcoError>;

//===========================================================================//


//===========================================================================//
