//! Derived image descriptor.
//!
//! An [`ImageDescriptor`] is the in-memory view of a validated header:
//! final dimensions, side count, the persistent/streamable mip split,
//! resolved format and the byte offset of pixel data in the base file.
//! It is computed once and never mutated; dropping mips produces a new
//! descriptor via [`ImageDescriptor::reduced`].

use crate::format::TextureFormat;
use crate::header::{
    self, DdsFileDesc, HeaderError, TileMode, DDSCAPS2_CUBEMAP, IF_ATTACHED_ALPHA, IF_CUBEMAP,
    IF_DONT_RESIZE, IF_SPLITTED, IF_SUPPRESS_DOWNSCALE,
};

/// Smallest persistent mip tail the streamer will accept.
///
/// The persistent mips form the always-resident fallback image, so the
/// floor keeps at least a few usable levels even for textures whose
/// headers ask for fewer.
pub const MIN_PERSISTENT_MIPS: u32 = 3;

/// Largest extent a mip may have and still count as persistent when the
/// header does not name a persistent count itself.
pub const PERSISTENT_MIP_MAX_EXTENT: u32 = 128;

/// Immutable description of a streamable image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Width of mip 0 in pixels.
    pub width: u32,
    /// Height of mip 0 in pixels.
    pub height: u32,
    /// Depth of mip 0 (1 for 2D textures).
    pub depth: u32,
    /// Number of surfaces per mip (6 for cubemaps, 1 otherwise).
    pub sides: u32,
    /// Total number of mip levels; mip 0 is the largest.
    pub mip_count: u32,
    /// Number of tail mips that stay resident; never exceeds `mip_count`.
    pub persistent_mip_count: u32,
    /// Resolved internal pixel format.
    pub format: TextureFormat,
    /// Tile mode of the stored data.
    pub tile_mode: TileMode,
    /// Engine image flags (`IF_*`).
    pub flags: u32,
    /// Whether the file carries a DX10 extension (affects header size).
    pub dx10_io: bool,
    /// Byte offset of pixel data in the base file.
    pub data_offset: u64,
    /// Mips already dropped by policy, relative to the authored chain.
    /// Keeps policy adjustment idempotent.
    pub dropped_mips: u32,
}

impl ImageDescriptor {
    /// Derive a descriptor from a parsed header.
    ///
    /// Rejects unrecognized pixel formats and textures tiled for a
    /// different platform. The persistent mip count comes from the
    /// header byte when present, otherwise from the tail mips small
    /// enough to always stay resident; either way it is clamped to
    /// `[min(3, total), total]`.
    pub fn from_header(desc: &DdsFileDesc) -> Result<Self, HeaderError> {
        let format = desc.format();
        if format == TextureFormat::Unknown {
            return Err(HeaderError::UnknownFormat);
        }

        let flags = header::image_flags(&desc.header);
        if !header::is_native(flags) {
            return Err(HeaderError::ForeignPlatform);
        }

        let width = desc.header.width.max(1);
        let height = desc.header.height.max(1);
        let depth = desc.header.depth.max(1);
        let mip_count = desc.header.mip_count();

        let is_cubemap = flags & IF_CUBEMAP != 0
            || desc.header.cubemap_flags & DDSCAPS2_CUBEMAP != 0;
        let sides = if is_cubemap { 6 } else { 1 };

        let persistent = if desc.header.num_persistent_mips > 0 {
            desc.header.num_persistent_mips as u32
        } else {
            derive_persistent_mips(width, height, mip_count)
        };
        let persistent_mip_count = persistent.clamp(MIN_PERSISTENT_MIPS.min(mip_count), mip_count);

        Ok(Self {
            width,
            height,
            depth,
            sides,
            mip_count,
            persistent_mip_count,
            format,
            tile_mode: TileMode::from_byte(desc.header.tile_mode),
            flags,
            dx10_io: desc.dx10.is_some(),
            data_offset: desc.full_header_size() as u64,
            dropped_mips: 0,
        })
    }

    /// Whether the mip chain is split across numbered side files.
    pub fn is_splitted(&self) -> bool {
        self.flags & IF_SPLITTED != 0
    }

    /// Whether a separately compressed alpha image is attached.
    pub fn has_attached_alpha(&self) -> bool {
        self.flags & IF_ATTACHED_ALPHA != 0
    }

    /// Whether policy downscaling must leave this image alone.
    pub fn suppress_downscale(&self) -> bool {
        self.flags & (IF_SUPPRESS_DOWNSCALE | IF_DONT_RESIZE) != 0
    }

    /// Extent of a dimension at the given mip, never below 1.
    pub fn mip_extent(dim: u32, mip: u32) -> u32 {
        (dim >> mip).max(1)
    }

    /// New descriptor with the `dropped` highest-resolution mips removed.
    ///
    /// Width, height and depth halve once per dropped mip (floor, never
    /// below 1); the persistent tail is unaffected because it sits at
    /// the small end of the chain.
    pub fn reduced(&self, dropped: u32) -> Self {
        let dropped = dropped.min(self.mip_count.saturating_sub(1));
        Self {
            width: Self::mip_extent(self.width, dropped),
            height: Self::mip_extent(self.height, dropped),
            depth: Self::mip_extent(self.depth, dropped),
            mip_count: self.mip_count - dropped,
            persistent_mip_count: self.persistent_mip_count.min(self.mip_count - dropped),
            dropped_mips: self.dropped_mips + dropped,
            ..*self
        }
    }

    /// Mip count of the authored chain, before any policy drops.
    pub fn authored_mip_count(&self) -> u32 {
        self.mip_count + self.dropped_mips
    }
}

/// Tail mips small enough to always stay resident.
fn derive_persistent_mips(width: u32, height: u32, mip_count: u32) -> u32 {
    for mip in 0..mip_count {
        if ImageDescriptor::mip_extent(width, mip) <= PERSISTENT_MIP_MAX_EXTENT
            && ImageDescriptor::mip_extent(height, mip) <= PERSISTENT_MIP_MAX_EXTENT
        {
            return mip_count - mip;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{DdsHeader, FLAGS_SENTINEL};

    fn file_desc(width: u32, height: u32, mips: u32, format: TextureFormat) -> DdsFileDesc {
        DdsFileDesc {
            header: DdsHeader::new(width, height, 0, mips, format).unwrap(),
            dx10: None,
        }
    }

    #[test]
    fn test_from_header_basic() {
        let mut desc = file_desc(256, 256, 9, TextureFormat::BC1);
        desc.header.num_persistent_mips = 3;
        let image = ImageDescriptor::from_header(&desc).unwrap();

        assert_eq!(image.width, 256);
        assert_eq!(image.height, 256);
        assert_eq!(image.depth, 1);
        assert_eq!(image.sides, 1);
        assert_eq!(image.mip_count, 9);
        assert_eq!(image.persistent_mip_count, 3);
        assert_eq!(image.format, TextureFormat::BC1);
        assert_eq!(image.data_offset, 128);
        assert!(!image.dx10_io);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let mut desc = file_desc(64, 64, 1, TextureFormat::BC1);
        desc.header.pixel_format.four_cc = *b"WAT?";
        assert_eq!(
            ImageDescriptor::from_header(&desc),
            Err(HeaderError::UnknownFormat)
        );
    }

    #[test]
    fn test_foreign_platform_rejected() {
        let mut desc = file_desc(64, 64, 1, TextureFormat::BC1);
        desc.header.texture_stage = FLAGS_SENTINEL;
        desc.header.image_flags = header::IF_TILED;
        assert_eq!(
            ImageDescriptor::from_header(&desc),
            Err(HeaderError::ForeignPlatform)
        );
    }

    #[test]
    fn test_cubemap_sides() {
        let mut desc = file_desc(128, 128, 8, TextureFormat::BC1);
        desc.header.cubemap_flags = DDSCAPS2_CUBEMAP | header::DDS_CUBEMAP_ALLFACES;
        let image = ImageDescriptor::from_header(&desc).unwrap();
        assert_eq!(image.sides, 6);
    }

    #[test]
    fn test_persistent_derived_when_header_byte_zero() {
        // 1024x1024 with 11 mips: mips at 128px and below are persistent,
        // which is mips 3..11, so 8 of them.
        let desc = file_desc(1024, 1024, 11, TextureFormat::BC1);
        let image = ImageDescriptor::from_header(&desc).unwrap();
        assert_eq!(image.persistent_mip_count, 8);
    }

    #[test]
    fn test_persistent_floor_applies() {
        let mut desc = file_desc(256, 256, 9, TextureFormat::BC1);
        desc.header.num_persistent_mips = 1;
        let image = ImageDescriptor::from_header(&desc).unwrap();
        assert_eq!(image.persistent_mip_count, MIN_PERSISTENT_MIPS);
    }

    #[test]
    fn test_persistent_never_exceeds_total() {
        let mut desc = file_desc(16, 16, 2, TextureFormat::BC1);
        desc.header.num_persistent_mips = 200;
        let image = ImageDescriptor::from_header(&desc).unwrap();
        assert_eq!(image.persistent_mip_count, 2);
    }

    #[test]
    fn test_flags_from_sentinel_slot() {
        let mut desc = file_desc(256, 256, 9, TextureFormat::BC1);
        desc.header.texture_stage = FLAGS_SENTINEL;
        desc.header.image_flags = IF_SPLITTED | IF_ATTACHED_ALPHA;
        let image = ImageDescriptor::from_header(&desc).unwrap();
        assert!(image.is_splitted());
        assert!(image.has_attached_alpha());
        assert!(!image.suppress_downscale());
    }

    #[test]
    fn test_mip_extent_floor() {
        assert_eq!(ImageDescriptor::mip_extent(256, 0), 256);
        assert_eq!(ImageDescriptor::mip_extent(256, 8), 1);
        assert_eq!(ImageDescriptor::mip_extent(256, 20), 1);
        assert_eq!(ImageDescriptor::mip_extent(0, 0), 1);
    }

    #[test]
    fn test_reduced_halves_dimensions() {
        let mut desc = file_desc(256, 128, 9, TextureFormat::BC1);
        desc.header.num_persistent_mips = 3;
        let image = ImageDescriptor::from_header(&desc).unwrap();

        let reduced = image.reduced(2);
        assert_eq!(reduced.width, 64);
        assert_eq!(reduced.height, 32);
        assert_eq!(reduced.mip_count, 7);
        assert_eq!(reduced.persistent_mip_count, 3);
        assert_eq!(reduced.dropped_mips, 2);
        assert_eq!(reduced.authored_mip_count(), 9);
        // Original untouched.
        assert_eq!(image.width, 256);
    }

    #[test]
    fn test_reduced_zero_is_identity() {
        let desc = file_desc(256, 256, 9, TextureFormat::BC1);
        let image = ImageDescriptor::from_header(&desc).unwrap();
        assert_eq!(image.reduced(0), image);
    }

    #[test]
    fn test_reduced_caps_at_one_mip() {
        let desc = file_desc(256, 256, 4, TextureFormat::BC1);
        let image = ImageDescriptor::from_header(&desc).unwrap();
        let reduced = image.reduced(100);
        assert_eq!(reduced.mip_count, 1);
        assert_eq!(reduced.persistent_mip_count, 1);
    }
}
