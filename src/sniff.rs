#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

// The signature that all PNG files start with.
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

//===========================================================================//

/// How a single image is stored inside an ICO file.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum PayloadFormat {
    /// A complete PNG file.
    Png,
    /// A device-independent bitmap without its BITMAPFILEHEADER.
    Dib,
}

impl PayloadFormat {
    /// Classifies an embedded payload by its leading bytes.  Anything that
    /// doesn't start with the PNG signature is treated as a DIB.
    pub fn sniff(payload: &[u8]) -> PayloadFormat {
        if payload.starts_with(PNG_SIGNATURE) {
            PayloadFormat::Png
        } else {
            PayloadFormat::Dib
        }
    }

    /// Returns the usual file extension for a standalone copy of a payload
    /// in this format.
    pub fn extension(&self) -> &'static str {
        match *self {
            PayloadFormat::Png => "png",
            PayloadFormat::Dib => "bmp",
        }
    }
}

//===========================================================================//


//===========================================================================//
