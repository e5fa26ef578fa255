//! Pixel format registry.
//!
//! Maps between the internal [`TextureFormat`] enumeration and the DDS
//! four-character-code pixel format descriptors (classic and
//! DX10-extended), and carries the per-format block metadata the mip
//! planner and loader rely on.

pub mod dxgi;
pub mod pixel_format;
mod texture_format;

pub use pixel_format::{
    desc_for_format, desc_for_format_dx10, format_for_desc, format_for_desc_dx10, DdsPixelFormat,
    DDS_A, DDS_A_ONLY, DDS_FOURCC, DDS_LUMINANCE, DDS_LUMINANCEA, DDS_RGB, DDS_RGBA, DDS_SIGNED,
    FOURCC_DX10, PIXEL_FORMAT_SIZE,
};
pub use texture_format::TextureFormat;
