//! On-disk pixel format descriptors and their mapping to internal formats.
//!
//! A DDS header carries a 32-byte pixel format record. Which internal
//! format it denotes is decided by a fixed, order-sensitive table:
//! exact four-character codes are tried before the generic
//! bitmask-based matches, because several bitmask patterns are
//! ambiguous subsets of others (plain RGB versus RGBA with a zero
//! alpha mask, for example). First match wins; no match is
//! [`TextureFormat::Unknown`].

use super::dxgi;
use super::TextureFormat;

// Pixel format flag bits (DDPF_*).
pub const DDS_FOURCC: u32 = 0x0000_0004;
pub const DDS_RGB: u32 = 0x0000_0040;
pub const DDS_LUMINANCE: u32 = 0x0002_0000;
pub const DDS_SIGNED: u32 = 0x0008_0000;
pub const DDS_RGBA: u32 = 0x0000_0041; // DDS_RGB | alpha-pixels
pub const DDS_LUMINANCEA: u32 = 0x0002_0001;
pub const DDS_A: u32 = 0x0000_0001;
pub const DDS_A_ONLY: u32 = 0x0000_0002;

/// Size on disk of the pixel format record.
pub const PIXEL_FORMAT_SIZE: u32 = 32;

const fn fourcc_code(v: u32) -> [u8; 4] {
    v.to_le_bytes()
}

// Legacy D3D format codes stored in the four-CC field as integers.
const FOURCC_A16B16G16R16: [u8; 4] = fourcc_code(0x24);
const FOURCC_Q16W16V16U16: [u8; 4] = fourcc_code(0x6E);
const FOURCC_R16F: [u8; 4] = fourcc_code(0x6F);
const FOURCC_G16R16F: [u8; 4] = fourcc_code(0x70);
const FOURCC_A16B16G16R16F: [u8; 4] = fourcc_code(0x71);
const FOURCC_R32F: [u8; 4] = fourcc_code(0x72);
const FOURCC_A32B32G32R32F: [u8; 4] = fourcc_code(0x74);

/// Four-character code signalling that the real format lives in the
/// DX10 extended header.
pub const FOURCC_DX10: [u8; 4] = *b"DX10";

/// DDS pixel format record (32 bytes on disk).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsPixelFormat {
    /// Size of the record (always 32).
    pub size: u32,
    /// Pixel format flags (`DDS_FOURCC`, `DDS_RGB`, ...).
    pub flags: u32,
    /// FourCC code (e.g. "DXT1"), or a legacy integer format code.
    pub four_cc: [u8; 4],
    /// Bits per pixel for mask-described formats.
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Descriptor made of a four-CC alone (masks and counts zero).
    pub const fn from_four_cc(four_cc: [u8; 4]) -> Self {
        Self {
            size: PIXEL_FORMAT_SIZE,
            flags: DDS_FOURCC,
            four_cc,
            rgb_bit_count: 0,
            r_bit_mask: 0,
            g_bit_mask: 0,
            b_bit_mask: 0,
            a_bit_mask: 0,
        }
    }

    const fn from_masks(flags: u32, bits: u32, r: u32, g: u32, b: u32, a: u32) -> Self {
        Self {
            size: PIXEL_FORMAT_SIZE,
            flags,
            four_cc: [0; 4],
            rgb_bit_count: bits,
            r_bit_mask: r,
            g_bit_mask: g,
            b_bit_mask: b,
            a_bit_mask: a,
        }
    }

    /// Whether this descriptor defers to a DX10 extended header.
    pub fn is_dx10(&self) -> bool {
        self.four_cc == FOURCC_DX10
    }
}

// =============================================================================
// Known descriptors
// =============================================================================

pub const DDSPF_DX10: DdsPixelFormat = DdsPixelFormat::from_four_cc(FOURCC_DX10);
pub const DDSPF_DXT1: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"DXT1");
pub const DDSPF_DXT3: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"DXT3");
pub const DDSPF_DXT5: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"DXT5");
pub const DDSPF_CTX1: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"CTX1");
pub const DDSPF_3DC: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"ATI2");
pub const DDSPF_3DCP: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"ATI1");
pub const DDSPF_EAC_R11: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"EAR ");
pub const DDSPF_EAC_RG11: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"EARG");
pub const DDSPF_ETC2: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"ET2 ");
pub const DDSPF_ETC2A: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"ET2A");
pub const DDSPF_PVRTC2: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"PVR2");
pub const DDSPF_PVRTC4: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"PVR4");
pub const DDSPF_ASTC_4X4: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"AS44");
pub const DDSPF_ASTC_5X4: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"AS54");
pub const DDSPF_ASTC_5X5: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"AS55");
pub const DDSPF_ASTC_6X5: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"AS65");
pub const DDSPF_ASTC_6X6: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"AS66");
pub const DDSPF_ASTC_8X5: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"AS85");
pub const DDSPF_ASTC_8X6: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"AS86");
pub const DDSPF_ASTC_8X8: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"AS88");
pub const DDSPF_ASTC_10X5: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"ASA5");
pub const DDSPF_ASTC_10X6: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"ASA6");
pub const DDSPF_ASTC_10X8: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"ASA8");
pub const DDSPF_ASTC_10X10: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"ASAA");
pub const DDSPF_ASTC_12X10: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"ASCA");
pub const DDSPF_ASTC_12X12: DdsPixelFormat = DdsPixelFormat::from_four_cc(*b"ASCC");

pub const DDSPF_R16F: DdsPixelFormat = DdsPixelFormat::from_four_cc(FOURCC_R16F);
pub const DDSPF_G16R16F: DdsPixelFormat = DdsPixelFormat::from_four_cc(FOURCC_G16R16F);
pub const DDSPF_A16B16G16R16F: DdsPixelFormat = DdsPixelFormat::from_four_cc(FOURCC_A16B16G16R16F);
pub const DDSPF_R32F: DdsPixelFormat = DdsPixelFormat::from_four_cc(FOURCC_R32F);
pub const DDSPF_A32B32G32R32F: DdsPixelFormat = DdsPixelFormat::from_four_cc(FOURCC_A32B32G32R32F);
pub const DDSPF_A16B16G16R16: DdsPixelFormat = DdsPixelFormat::from_four_cc(FOURCC_A16B16G16R16);
pub const DDSPF_Q16W16V16U16: DdsPixelFormat = DdsPixelFormat::from_four_cc(FOURCC_Q16W16V16U16);

pub const DDSPF_V16U16: DdsPixelFormat =
    DdsPixelFormat::from_masks(DDS_SIGNED, 32, 0x0000_ffff, 0xffff_0000, 0, 0);
pub const DDSPF_R16: DdsPixelFormat =
    DdsPixelFormat::from_masks(DDS_RGB, 16, 0x0000_ffff, 0, 0, 0);
pub const DDSPF_G16R16: DdsPixelFormat =
    DdsPixelFormat::from_masks(DDS_RGB, 32, 0x0000_ffff, 0xffff_0000, 0, 0);
pub const DDSPF_A8B8G8R8: DdsPixelFormat = DdsPixelFormat::from_masks(
    DDS_RGBA,
    32,
    0x0000_00ff,
    0x0000_ff00,
    0x00ff_0000,
    0xff00_0000,
);
pub const DDSPF_A8R8G8B8: DdsPixelFormat = DdsPixelFormat::from_masks(
    DDS_RGBA,
    32,
    0x00ff_0000,
    0x0000_ff00,
    0x0000_00ff,
    0xff00_0000,
);
pub const DDSPF_X8R8G8B8: DdsPixelFormat =
    DdsPixelFormat::from_masks(DDS_RGB, 32, 0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0);
pub const DDSPF_R8G8B8: DdsPixelFormat =
    DdsPixelFormat::from_masks(DDS_RGB, 24, 0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0);
pub const DDSPF_A4R4G4B4: DdsPixelFormat = DdsPixelFormat::from_masks(
    DDS_RGBA,
    16,
    0x0000_0f00,
    0x0000_00f0,
    0x0000_000f,
    0x0000_f000,
);
pub const DDSPF_R5G6B5: DdsPixelFormat =
    DdsPixelFormat::from_masks(DDS_RGB, 16, 0x0000_f800, 0x0000_07e0, 0x0000_001f, 0);
pub const DDSPF_A8: DdsPixelFormat = DdsPixelFormat::from_masks(DDS_A, 8, 0, 0, 0, 0x0000_00ff);
pub const DDSPF_L8: DdsPixelFormat =
    DdsPixelFormat::from_masks(DDS_LUMINANCE, 8, 0x0000_00ff, 0x0000_00ff, 0x0000_00ff, 0);
pub const DDSPF_A8L8: DdsPixelFormat = DdsPixelFormat::from_masks(
    DDS_LUMINANCEA,
    8,
    0x0000_00ff,
    0x0000_00ff,
    0x0000_00ff,
    0x0000_00ff,
);

// =============================================================================
// Descriptor matching
// =============================================================================

/// Maps an on-disk pixel format descriptor to the internal format.
///
/// Matching order is load-bearing; see the module docs. Fails closed to
/// [`TextureFormat::Unknown`].
pub fn format_for_desc(desc: &DdsPixelFormat) -> TextureFormat {
    use TextureFormat::*;

    // Exact four-CC matches.
    if desc.four_cc == DDSPF_DXT1.four_cc {
        BC1
    } else if desc.four_cc == DDSPF_DXT3.four_cc {
        BC2
    } else if desc.four_cc == DDSPF_DXT5.four_cc {
        BC3
    } else if desc.four_cc == DDSPF_3DCP.four_cc {
        BC4U
    } else if desc.four_cc == DDSPF_3DC.four_cc {
        BC5U
    } else if desc.four_cc == DDSPF_CTX1.four_cc {
        CTX1
    } else if desc.four_cc == DDSPF_R32F.four_cc {
        R32F
    } else if desc.four_cc == DDSPF_A32B32G32R32F.four_cc {
        R32G32B32A32F
    } else if desc.four_cc == DDSPF_R16F.four_cc {
        R16F
    } else if desc.four_cc == DDSPF_G16R16F.four_cc {
        R16G16F
    } else if desc.four_cc == DDSPF_A16B16G16R16F.four_cc {
        R16G16B16A16F
    } else if *desc == DDSPF_V16U16 {
        R16G16S
    } else if desc.four_cc == DDSPF_Q16W16V16U16.four_cc {
        R16G16B16A16S
    } else if *desc == DDSPF_R16 {
        R16
    } else if *desc == DDSPF_G16R16 {
        R16G16
    } else if desc.four_cc == DDSPF_A16B16G16R16.four_cc {
        R16G16B16A16
    } else if desc.four_cc == DDSPF_EAC_R11.four_cc {
        EacR11
    } else if desc.four_cc == DDSPF_EAC_RG11.four_cc {
        EacRg11
    } else if desc.four_cc == DDSPF_ETC2.four_cc {
        ETC2
    } else if desc.four_cc == DDSPF_ETC2A.four_cc {
        ETC2A
    }
    // Bitmask-described uncompressed layouts.
    else if desc.flags == DDS_RGBA
        && desc.rgb_bit_count == 32
        && desc.r_bit_mask == 0x0000_00ff
        && desc.a_bit_mask == 0xff00_0000
    {
        R8G8B8A8
    } else if desc.flags == DDS_RGBA
        && desc.rgb_bit_count == 32
        && desc.r_bit_mask == 0x00ff_0000
        && desc.a_bit_mask == 0xff00_0000
    {
        B8G8R8A8
    } else if desc.flags == DDS_RGB && desc.rgb_bit_count == 32 && desc.r_bit_mask == 0x00ff_0000 {
        B8G8R8X8
    } else if desc.flags == DDS_RGBA && desc.rgb_bit_count == 16 {
        B4G4R4A4
    } else if desc.flags == DDS_RGB && desc.rgb_bit_count == 24 {
        B8G8R8
    } else if desc.flags == DDS_LUMINANCEA && desc.rgb_bit_count == 8 {
        A8L8
    } else if desc.flags == DDS_LUMINANCE && desc.rgb_bit_count == 8 {
        L8
    } else if (desc.flags == DDS_A || desc.flags == DDS_A_ONLY || desc.flags == (DDS_A | DDS_A_ONLY))
        && desc.rgb_bit_count == 8
    {
        A8
    }
    // Mobile four-CCs, after the mask fallbacks (historical table order).
    else if desc.four_cc == DDSPF_PVRTC2.four_cc {
        Pvrtc2
    } else if desc.four_cc == DDSPF_PVRTC4.four_cc {
        Pvrtc4
    } else if desc.four_cc == DDSPF_ASTC_4X4.four_cc {
        Astc4x4
    } else if desc.four_cc == DDSPF_ASTC_5X4.four_cc {
        Astc5x4
    } else if desc.four_cc == DDSPF_ASTC_5X5.four_cc {
        Astc5x5
    } else if desc.four_cc == DDSPF_ASTC_6X5.four_cc {
        Astc6x5
    } else if desc.four_cc == DDSPF_ASTC_6X6.four_cc {
        Astc6x6
    } else if desc.four_cc == DDSPF_ASTC_8X5.four_cc {
        Astc8x5
    } else if desc.four_cc == DDSPF_ASTC_8X6.four_cc {
        Astc8x6
    } else if desc.four_cc == DDSPF_ASTC_8X8.four_cc {
        Astc8x8
    } else if desc.four_cc == DDSPF_ASTC_10X5.four_cc {
        Astc10x5
    } else if desc.four_cc == DDSPF_ASTC_10X6.four_cc {
        Astc10x6
    } else if desc.four_cc == DDSPF_ASTC_10X8.four_cc {
        Astc10x8
    } else if desc.four_cc == DDSPF_ASTC_10X10.four_cc {
        Astc10x10
    } else if desc.four_cc == DDSPF_ASTC_12X10.four_cc {
        Astc12x10
    } else if desc.four_cc == DDSPF_ASTC_12X12.four_cc {
        Astc12x12
    } else {
        Unknown
    }
}

/// Maps a descriptor plus the DX10 header's DXGI code to the internal
/// format.
///
/// When the descriptor carries the DX10 sentinel the DXGI enumerant is
/// authoritative; otherwise this defers to [`format_for_desc`].
pub fn format_for_desc_dx10(desc: &DdsPixelFormat, dxgi_format: u32) -> TextureFormat {
    use TextureFormat::*;

    if !desc.is_dx10() {
        return format_for_desc(desc);
    }

    match dxgi_format {
        dxgi::R8G8B8A8_TYPELESS | dxgi::R8G8B8A8_UNORM | dxgi::R8G8B8A8_UNORM_SRGB => R8G8B8A8,
        dxgi::R8G8B8A8_SNORM => R8G8B8A8S,

        dxgi::A8_UNORM => A8,
        dxgi::R8_UNORM => R8,
        dxgi::R8_SNORM => R8S,
        dxgi::R16_UNORM => R16,
        dxgi::R16_FLOAT | dxgi::R16_TYPELESS => R16F,
        dxgi::R32_FLOAT | dxgi::R32_TYPELESS => R32F,
        dxgi::R8G8_UNORM => R8G8,
        dxgi::R8G8_SNORM => R8G8S,
        dxgi::R16G16_UNORM => R16G16,
        dxgi::R16G16_SNORM => R16G16S,
        dxgi::R16G16_FLOAT => R16G16F,
        dxgi::R11G11B10_FLOAT => R11G11B10F,
        dxgi::R10G10B10A2_UNORM => R10G10B10A2,
        dxgi::R16G16B16A16_UNORM => R16G16B16A16,
        dxgi::R16G16B16A16_SNORM => R16G16B16A16S,
        dxgi::R16G16B16A16_FLOAT => R16G16B16A16F,
        dxgi::R32G32B32A32_FLOAT => R32G32B32A32F,

        dxgi::BC1_TYPELESS | dxgi::BC1_UNORM | dxgi::BC1_UNORM_SRGB => BC1,
        dxgi::BC2_TYPELESS | dxgi::BC2_UNORM | dxgi::BC2_UNORM_SRGB => BC2,
        dxgi::BC3_TYPELESS | dxgi::BC3_UNORM | dxgi::BC3_UNORM_SRGB => BC3,
        dxgi::BC4_TYPELESS | dxgi::BC4_UNORM => BC4U,
        dxgi::BC4_SNORM => BC4S,
        dxgi::BC5_TYPELESS | dxgi::BC5_UNORM => BC5U,
        dxgi::BC5_SNORM => BC5S,
        dxgi::BC6H_UF16 => BC6UH,
        dxgi::BC6H_SF16 => BC6SH,
        dxgi::BC7_TYPELESS | dxgi::BC7_UNORM | dxgi::BC7_UNORM_SRGB => BC7,
        dxgi::R9G9B9E5_SHAREDEXP => R9G9B9E5,

        dxgi::B5G6R5_UNORM => B5G6R5,
        dxgi::B5G5R5A1_UNORM => B5G5R5,
        dxgi::B4G4R4A4_UNORM => B4G4R4A4,

        dxgi::EAC_R11_TYPELESS | dxgi::EAC_R11_UNORM | dxgi::EAC_R11_SNORM => EacR11,
        dxgi::EAC_RG11_TYPELESS | dxgi::EAC_RG11_UNORM | dxgi::EAC_RG11_SNORM => EacRg11,
        dxgi::ETC2_TYPELESS | dxgi::ETC2_UNORM | dxgi::ETC2_UNORM_SRGB => ETC2,
        dxgi::ETC2A_TYPELESS | dxgi::ETC2A_UNORM | dxgi::ETC2A_UNORM_SRGB => ETC2A,
        dxgi::PVRTC2_TYPELESS | dxgi::PVRTC2_UNORM | dxgi::PVRTC2_UNORM_SRGB => Pvrtc2,
        dxgi::PVRTC4_TYPELESS | dxgi::PVRTC4_UNORM | dxgi::PVRTC4_UNORM_SRGB => Pvrtc4,
        dxgi::ASTC_4X4_TYPELESS | dxgi::ASTC_4X4_UNORM => Astc4x4,
        dxgi::ASTC_5X4_TYPELESS | dxgi::ASTC_5X4_UNORM => Astc5x4,
        dxgi::ASTC_5X5_TYPELESS | dxgi::ASTC_5X5_UNORM => Astc5x5,
        dxgi::ASTC_6X5_TYPELESS | dxgi::ASTC_6X5_UNORM => Astc6x5,
        dxgi::ASTC_6X6_TYPELESS | dxgi::ASTC_6X6_UNORM => Astc6x6,
        dxgi::ASTC_8X5_TYPELESS | dxgi::ASTC_8X5_UNORM => Astc8x5,
        dxgi::ASTC_8X6_TYPELESS | dxgi::ASTC_8X6_UNORM => Astc8x6,
        dxgi::ASTC_8X8_TYPELESS | dxgi::ASTC_8X8_UNORM => Astc8x8,
        dxgi::ASTC_10X5_TYPELESS | dxgi::ASTC_10X5_UNORM => Astc10x5,
        dxgi::ASTC_10X6_TYPELESS | dxgi::ASTC_10X6_UNORM => Astc10x6,
        dxgi::ASTC_10X8_TYPELESS | dxgi::ASTC_10X8_UNORM => Astc10x8,
        dxgi::ASTC_10X10_TYPELESS | dxgi::ASTC_10X10_UNORM => Astc10x10,
        dxgi::ASTC_12X10_TYPELESS | dxgi::ASTC_12X10_UNORM => Astc12x10,
        dxgi::ASTC_12X12_TYPELESS | dxgi::ASTC_12X12_UNORM => Astc12x12,

        _ => Unknown,
    }
}

/// Classic descriptor for a format, where one exists.
///
/// Formats only expressible through the DX10 extension return `None`;
/// use [`desc_for_format_dx10`] for those.
pub fn desc_for_format(format: TextureFormat) -> Option<&'static DdsPixelFormat> {
    use TextureFormat::*;
    let desc = match format {
        BC1 => &DDSPF_DXT1,
        BC2 => &DDSPF_DXT3,
        BC3 => &DDSPF_DXT5,
        BC4U => &DDSPF_3DCP,
        BC5U => &DDSPF_3DC,
        CTX1 => &DDSPF_CTX1,
        R32F => &DDSPF_R32F,
        R32G32B32A32F => &DDSPF_A32B32G32R32F,
        R16F => &DDSPF_R16F,
        R16G16F => &DDSPF_G16R16F,
        R16G16B16A16F => &DDSPF_A16B16G16R16F,
        R16 => &DDSPF_R16,
        R16G16 => &DDSPF_G16R16,
        R16G16B16A16 => &DDSPF_A16B16G16R16,
        R16G16S => &DDSPF_V16U16,
        R16G16B16A16S => &DDSPF_Q16W16V16U16,
        B8G8R8 | L8V8U8 => &DDSPF_R8G8B8,
        R8G8B8A8 => &DDSPF_A8B8G8R8,
        B8G8R8X8 | L8V8U8X8 => &DDSPF_X8R8G8B8,
        B8G8R8A8 => &DDSPF_A8R8G8B8,
        B5G6R5 => &DDSPF_R5G6B5,
        B4G4R4A4 => &DDSPF_A4R4G4B4,
        A8 => &DDSPF_A8,
        L8 => &DDSPF_L8,
        A8L8 => &DDSPF_A8L8,
        EacR11 => &DDSPF_EAC_R11,
        EacRg11 => &DDSPF_EAC_RG11,
        ETC2 => &DDSPF_ETC2,
        ETC2A => &DDSPF_ETC2A,
        Pvrtc2 => &DDSPF_PVRTC2,
        Pvrtc4 => &DDSPF_PVRTC4,
        Astc4x4 => &DDSPF_ASTC_4X4,
        Astc5x4 => &DDSPF_ASTC_5X4,
        Astc5x5 => &DDSPF_ASTC_5X5,
        Astc6x5 => &DDSPF_ASTC_6X5,
        Astc6x6 => &DDSPF_ASTC_6X6,
        Astc8x5 => &DDSPF_ASTC_8X5,
        Astc8x6 => &DDSPF_ASTC_8X6,
        Astc8x8 => &DDSPF_ASTC_8X8,
        Astc10x5 => &DDSPF_ASTC_10X5,
        Astc10x6 => &DDSPF_ASTC_10X6,
        Astc10x8 => &DDSPF_ASTC_10X8,
        Astc10x10 => &DDSPF_ASTC_10X10,
        Astc12x10 => &DDSPF_ASTC_12X10,
        Astc12x12 => &DDSPF_ASTC_12X12,
        _ => return None,
    };
    Some(desc)
}

/// Descriptor plus DXGI code for a format, preferring the DX10 path for
/// formats with no classic descriptor.
///
/// Returns `None` only for [`TextureFormat::Unknown`] and formats with
/// no on-disk representation at all (depth formats).
pub fn desc_for_format_dx10(format: TextureFormat) -> Option<(&'static DdsPixelFormat, u32)> {
    use TextureFormat::*;
    let dxgi_format = match format {
        R8 => dxgi::R8_UNORM,
        R8S => dxgi::R8_SNORM,
        R16 => dxgi::R16_UNORM,
        R16F => dxgi::R16_FLOAT,
        R8G8 => dxgi::R8G8_UNORM,
        R8G8S => dxgi::R8G8_SNORM,
        R16G16 => dxgi::R16G16_UNORM,
        R11G11B10F => dxgi::R11G11B10_FLOAT,
        R10G10B10A2 => dxgi::R10G10B10A2_UNORM,
        R16G16B16A16 => dxgi::R16G16B16A16_UNORM,
        R16G16B16A16S => dxgi::R16G16B16A16_SNORM,
        R32G32B32A32F => dxgi::R32G32B32A32_FLOAT,
        R8G8B8A8S => dxgi::R8G8B8A8_SNORM,
        BC4S => dxgi::BC4_SNORM,
        BC5S => dxgi::BC5_SNORM,
        BC6SH => dxgi::BC6H_SF16,
        BC6UH => dxgi::BC6H_UF16,
        BC7 => dxgi::BC7_UNORM,
        R9G9B9E5 => dxgi::R9G9B9E5_SHAREDEXP,
        _ => return desc_for_format(format).map(|desc| (desc, 0)),
    };
    Some((&DDSPF_DX10, dxgi_format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourcc_match_dxt1() {
        assert_eq!(format_for_desc(&DDSPF_DXT1), TextureFormat::BC1);
        assert_eq!(format_for_desc(&DDSPF_DXT5), TextureFormat::BC3);
    }

    #[test]
    fn test_fourcc_match_ati_family() {
        assert_eq!(format_for_desc(&DDSPF_3DCP), TextureFormat::BC4U);
        assert_eq!(format_for_desc(&DDSPF_3DC), TextureFormat::BC5U);
    }

    #[test]
    fn test_mask_match_rgba32() {
        assert_eq!(format_for_desc(&DDSPF_A8B8G8R8), TextureFormat::R8G8B8A8);
        assert_eq!(format_for_desc(&DDSPF_A8R8G8B8), TextureFormat::B8G8R8A8);
        assert_eq!(format_for_desc(&DDSPF_X8R8G8B8), TextureFormat::B8G8R8X8);
    }

    #[test]
    fn test_mask_match_is_ordered_before_generic_16bit() {
        // Any 16-bit RGBA mask layout collapses to B4G4R4A4; the specific
        // 32-bit layouts above must win first.
        assert_eq!(format_for_desc(&DDSPF_A4R4G4B4), TextureFormat::B4G4R4A4);
    }

    #[test]
    fn test_full_record_match_v16u16() {
        assert_eq!(format_for_desc(&DDSPF_V16U16), TextureFormat::R16G16S);
        // Same masks but unsigned flags is a different format.
        assert_eq!(format_for_desc(&DDSPF_G16R16), TextureFormat::R16G16);
    }

    #[test]
    fn test_luminance_and_alpha_layouts() {
        assert_eq!(format_for_desc(&DDSPF_L8), TextureFormat::L8);
        assert_eq!(format_for_desc(&DDSPF_A8L8), TextureFormat::A8L8);
        assert_eq!(format_for_desc(&DDSPF_A8), TextureFormat::A8);
    }

    #[test]
    fn test_unmatched_desc_is_unknown() {
        let desc = DdsPixelFormat::from_masks(DDS_RGB, 48, 0xffff, 0xffff_0000, 0, 0);
        assert_eq!(format_for_desc(&desc), TextureFormat::Unknown);
    }

    #[test]
    fn test_dx10_dispatch() {
        assert_eq!(
            format_for_desc_dx10(&DDSPF_DX10, dxgi::BC7_UNORM),
            TextureFormat::BC7
        );
        assert_eq!(
            format_for_desc_dx10(&DDSPF_DX10, dxgi::BC6H_SF16),
            TextureFormat::BC6SH
        );
        assert_eq!(
            format_for_desc_dx10(&DDSPF_DX10, dxgi::ASTC_10X6_UNORM),
            TextureFormat::Astc10x6
        );
    }

    #[test]
    fn test_dx10_dispatch_unknown_code() {
        assert_eq!(
            format_for_desc_dx10(&DDSPF_DX10, 0xdead_beef),
            TextureFormat::Unknown
        );
    }

    #[test]
    fn test_non_dx10_desc_defers_to_classic_matching() {
        // A DXGI code alongside a classic descriptor must be ignored.
        assert_eq!(
            format_for_desc_dx10(&DDSPF_DXT1, dxgi::BC7_UNORM),
            TextureFormat::BC1
        );
    }

    #[test]
    fn test_desc_round_trip_classic() {
        for fmt in [
            TextureFormat::BC1,
            TextureFormat::BC3,
            TextureFormat::BC5U,
            TextureFormat::R16G16S,
            TextureFormat::B8G8R8A8,
            TextureFormat::Astc8x6,
        ] {
            let desc = desc_for_format(fmt).expect("classic descriptor");
            assert_eq!(format_for_desc(desc), fmt);
        }
    }

    #[test]
    fn test_desc_round_trip_dx10() {
        for fmt in [
            TextureFormat::BC7,
            TextureFormat::BC6SH,
            TextureFormat::R8G8B8A8S,
            TextureFormat::R9G9B9E5,
        ] {
            let (desc, dxgi_format) = desc_for_format_dx10(fmt).expect("dx10 descriptor");
            assert!(desc.is_dx10());
            assert_eq!(format_for_desc_dx10(desc, dxgi_format), fmt);
        }
    }

    #[test]
    fn test_depth_formats_have_no_disk_descriptor() {
        assert!(desc_for_format(TextureFormat::D24S8).is_none());
        assert!(desc_for_format_dx10(TextureFormat::D24S8).is_none());
    }
}
