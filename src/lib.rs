//! A library for decoding and building ICO icon files.
//!
//! An ICO file is a small directory of images of different sizes, each
//! stored either as a PNG file or as a headerless Windows bitmap (DIB).
//!
//! [`decode_ico`] splits a file into its images.  Each [`IconImage`] keeps
//! its payload in a form a generic decoder can read on its own (bitmaps get
//! their file header back), and [`IconImage::decode_pixels`] turns it into
//! RGBA pixels.  Damaged entries are skipped and reported through
//! [`IconDocument::warnings`] rather than failing the whole file.
//!
//! [`encode_ico`] goes the other way: it renders a source image at each
//! requested size through a [`Rasterizer`] and stores every rendering as a
//! 32-bit PNG.
//!
//! ```no_run
//! let source = icokit::RgbaImage::from_rgba_data(1, 1, vec![255; 4]);
//! let data = icokit::encode_ico(&source, &[16, 32, 48]).unwrap();
//! let document = icokit::decode_ico(&data).unwrap();
//! assert_eq!(document.images().len(), 3);
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod bitmap;
mod bmpdepth;
mod cursor;
mod dib;
mod document;
mod entry;
mod error;
mod icondir;
mod image;
mod pngcodec;
mod raster;
mod sniff;

pub use crate::document::{
    decode_ico, encode_ico, encode_ico_with, DecodeWarning, IconDocument,
    DEFAULT_SIZES,
};
pub use crate::error::{IcoError, Result};
pub use crate::image::IconImage;
pub use crate::pngcodec::{PngCodec, StandardPng};
pub use crate::raster::{Rasterizer, RgbaImage};
pub use crate::sniff::PayloadFormat;

//===========================================================================//
