//! DDS container header codec.
//!
//! Parses and serializes the magic, the classic 124-byte header, the
//! optional DX10 extension and the proprietary trailing chunk chain.
//! Parsing is a single validation pass: any gate failure (magic, size
//! field, truncation) is terminal for the load attempt; there is no
//! partial or degraded header.

pub mod chunk_chain;
mod cursor;
mod dds;
mod engine_flags;

use thiserror::Error;

pub use cursor::ByteReader;
pub use dds::{
    DdsFileDesc, DdsHeader, DdsHeaderDx10, DDSCAPS2_CUBEMAP, DDSCAPS2_VOLUME, DDSCAPS_COMPLEX,
    DDSCAPS_MIPMAP, DDSCAPS_TEXTURE, DDSD_CAPS, DDSD_DEPTH, DDSD_HEIGHT, DDSD_LINEARSIZE,
    DDSD_MIPMAPCOUNT, DDSD_PIXELFORMAT, DDSD_WIDTH, DDS_CUBEMAP_ALLFACES, DDS_MAGIC,
    DX10_HEADER_SIZE, HEADER_SIZE,
};
pub use engine_flags::{
    image_flags, is_native, set_image_flags, TileMode, FLAGS_SENTINEL, FOREIGN_TILING_MASK,
    IF_ATTACHED_ALPHA, IF_COLORMODEL_CIE, IF_COLORMODEL_IRB, IF_COLORMODEL_MASK,
    IF_COLORMODEL_RGB, IF_COLORMODEL_YCC, IF_COLORMODEL_YFF, IF_CUBEMAP, IF_DECAL,
    IF_DONT_RESIZE, IF_FOREIGN_NATIVE, IF_GREYSCALE, IF_RENORMALIZED, IF_SPLITTED, IF_SRGB_READ,
    IF_SUPPRESS_DOWNSCALE, IF_TILED, IF_VOLUME,
};

/// Errors from header validation and parsing.
///
/// All of these are terminal for the load attempt; a file that fails
/// header validation is never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// Buffer ended before the field at `needed` bytes.
    #[error("header truncated: needed {needed} bytes, only {available} available")]
    Truncated { needed: usize, available: usize },

    /// First four bytes are not `"DDS "`.
    #[error("bad magic, not a DDS file")]
    BadMagic,

    /// Header size field disagrees with the 124-byte layout.
    #[error("bad header size field: {0}")]
    BadHeaderSize(u32),

    /// Nested pixel format record size is not 32.
    #[error("bad pixel format record size: {0}")]
    BadPixelFormatSize(u32),

    /// Pixel format descriptor matched no known format.
    #[error("unrecognized pixel format")]
    UnknownFormat,

    /// Texture was converted for a different target platform.
    #[error("texture is not native to this platform")]
    ForeignPlatform,
}
