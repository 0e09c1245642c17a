use crate::error::Result;
use crate::icondir::{DirectoryEntry, ICONDIRENTRY_LEN, ICONDIR_LEN};

//===========================================================================//

/// Bits-per-pixel recorded for freshly encoded images, which are always
/// stored as 8-bit RGBA PNGs.
pub(crate) const ENCODED_BIT_COUNT: u16 = 32;

//===========================================================================//

/// Lays out payloads one after another following the header and directory,
/// handing out a directory entry for each.
pub(crate) struct EntryPlacer {
    current_offset: u32,
}

impl EntryPlacer {
    /// Starts a layout for a file with `total_entries` directory entries, so
    /// that the first payload lands right after the last entry.
    pub(crate) fn new(total_entries: usize) -> Result<EntryPlacer> {
        if total_entries > (u16::MAX as usize) {
            format_error!(
                "Too many images (was {}, but max is {})",
                total_entries,
                u16::MAX
            );
        }
        let current_offset = ICONDIR_LEN + ICONDIRENTRY_LEN * total_entries;
        Ok(EntryPlacer { current_offset: current_offset as u32 })
    }

    /// Returns where the next payload will be placed.
    pub(crate) fn current_offset(&self) -> u32 {
        self.current_offset
    }

    /// Emits the directory entry for the next payload and moves past it.
    pub(crate) fn place(
        &mut self,
        width: u32,
        height: u32,
        bit_count: u16,
        payload_len: usize,
    ) -> Result<DirectoryEntry> {
        let size = match u32::try_from(payload_len) {
            Ok(size) => size,
            Err(_) => format_error!("Image too large ({} bytes)", payload_len),
        };
        let next_offset = match self.current_offset.checked_add(size) {
            Some(offset) => offset,
            None => format_error!("ICO file would exceed 4 GiB"),
        };
        let entry = DirectoryEntry {
            width,
            height,
            color_count: 0,
            color_planes: 1,
            bit_count,
            size,
            offset: self.current_offset,
        };
        self.current_offset = next_offset;
        Ok(entry)
    }
}

//===========================================================================//


//===========================================================================//
