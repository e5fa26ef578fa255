//! Engine image flags embedded in the header's reserved slot.
//!
//! The texture compiler propagates per-image hints to the engine through
//! a reserved DWORD of the classic header. Because third-party tools
//! write arbitrary data there, the slot is only honored when the
//! texture-stage tag holds a fixed sentinel; the same information also
//! exists in the trailing chunk chain, but streaming reads the header
//! first and cannot afford a trailer seek just to size its buffers.

use super::dds::DdsHeader;

/// Texture-stage sentinel gating the image-flags slot ("CRYF").
pub const FLAGS_SENTINEL: u32 = 0x4352_5946;

// Image flag bits. Values are part of the file format and must not change.
pub const IF_CUBEMAP: u32 = 0x1;
pub const IF_VOLUME: u32 = 0x2;
pub const IF_DECAL: u32 = 0x4;
pub const IF_GREYSCALE: u32 = 0x8;
pub const IF_SUPPRESS_DOWNSCALE: u32 = 0x10;
pub const IF_ATTACHED_ALPHA: u32 = 0x400;
pub const IF_SRGB_READ: u32 = 0x800;
pub const IF_DONT_RESIZE: u32 = 0x8000;
pub const IF_RENORMALIZED: u32 = 0x1_0000;
pub const IF_FOREIGN_NATIVE: u32 = 0x2_0000;
pub const IF_TILED: u32 = 0x8_0000;
pub const IF_SPLITTED: u32 = 0x20_0000;
pub const IF_COLORMODEL_MASK: u32 = 0x700_0000;
pub const IF_COLORMODEL_RGB: u32 = 0x000_0000;
pub const IF_COLORMODEL_CIE: u32 = 0x100_0000;
pub const IF_COLORMODEL_YCC: u32 = 0x200_0000;
pub const IF_COLORMODEL_YFF: u32 = 0x300_0000;
pub const IF_COLORMODEL_IRB: u32 = 0x400_0000;

/// Flags marking a texture converted (tiled) for a different target
/// platform. On this target nothing tiled or console-native is usable.
pub const FOREIGN_TILING_MASK: u32 = IF_FOREIGN_NATIVE | IF_TILED;

/// Image flags from the header's reserved slot.
///
/// Returns 0 unless the texture-stage tag equals the sentinel, so DDS
/// files produced by other tools can never inject flags accidentally.
pub fn image_flags(header: &DdsHeader) -> u32 {
    if header.is_valid() && header.texture_stage == FLAGS_SENTINEL {
        header.image_flags
    } else {
        0
    }
}

/// Store image flags into the header's reserved slot.
///
/// Refuses (returns false) when the sentinel is not present; the caller
/// decides whether to stamp the sentinel first.
pub fn set_image_flags(header: &mut DdsHeader, flags: u32) -> bool {
    if header.is_valid() && header.texture_stage == FLAGS_SENTINEL {
        header.image_flags = flags;
        true
    } else {
        false
    }
}

/// Whether a texture with these flags is usable on this platform.
pub fn is_native(flags: u32) -> bool {
    flags & FOREIGN_TILING_MASK == 0
}

/// Tile mode of the stored surface data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileMode {
    /// Linear, no tiling.
    #[default]
    None,
    /// Linear with platform alignment padding.
    LinearPadded,
    /// Platform-optimal tiling.
    Optimal,
}

impl TileMode {
    /// Decode the header's tile-mode byte; unknown codes read as `None`.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => TileMode::LinearPadded,
            2 => TileMode::Optimal,
            _ => TileMode::None,
        }
    }

    /// Byte code as stored in the header.
    pub fn as_byte(self) -> u8 {
        match self {
            TileMode::None => 0,
            TileMode::LinearPadded => 1,
            TileMode::Optimal => 2,
        }
    }
}
