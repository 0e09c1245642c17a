//===========================================================================//

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BmpDepth {
    One,
    Four,
    Eight,
    Sixteen,
    TwentyFour,
    ThirtyTwo,
}

impl BmpDepth {
    pub(crate) fn from_bits_per_pixel(
        bits_per_pixel: u16,
    ) -> Option<BmpDepth> {
        match bits_per_pixel {
            1 => Some(BmpDepth::One),
            4 => Some(BmpDepth::Four),
            8 => Some(BmpDepth::Eight),
            16 => Some(BmpDepth::Sixteen),
            24 => Some(BmpDepth::TwentyFour),
            32 => Some(BmpDepth::ThirtyTwo),
            _ => None,
        }
    }

    pub(crate) fn bits_per_pixel(&self) -> u16 {
        match *self {
            BmpDepth::One => 1,
            BmpDepth::Four => 4,
            BmpDepth::Eight => 8,
            BmpDepth::Sixteen => 16,
            BmpDepth::TwentyFour => 24,
            BmpDepth::ThirtyTwo => 32,
        }
    }

    /// True if pixels are indices into a color table.
    pub(crate) fn is_indexed(&self) -> bool {
        matches!(*self, BmpDepth::One | BmpDepth::Four | BmpDepth::Eight)
    }

    /// True if the image carries its own alpha channel, in which case no AND
    /// mask is read.
    pub(crate) fn has_alpha_channel(&self) -> bool {
        *self == BmpDepth::ThirtyTwo
    }

    /// Returns the number of bytes holding one row of `width` pixels at this
    /// depth, and the number of padding bytes after them.  Rows always end on
    /// a four-byte boundary.
    pub(crate) fn row_layout(&self, width: u32) -> (usize, usize) {
        let data_size =
            (width as usize * self.bits_per_pixel() as usize + 7) / 8;
        let padding_size = ((data_size + 3) / 4) * 4 - data_size;
        (data_size, padding_size)
    }
}

//===========================================================================//


//===========================================================================//
