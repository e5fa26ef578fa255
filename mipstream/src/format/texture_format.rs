//! Internal texture format enumeration and per-format metadata.
//!
//! The format space is closed: every pixel layout the pipeline can
//! produce is a variant here, and "we don't know this one" is the
//! explicit [`TextureFormat::Unknown`] variant rather than a runtime
//! assertion. All metadata lookups are exhaustive matches.

use std::fmt;
use std::str::FromStr;

/// Internal pixel format of a texture surface.
///
/// Mip 0 data for a surface in one of these formats is laid out either
/// per pixel (uncompressed variants) or in fixed-size blocks covering an
/// NxM pixel tile (the BC/ETC2/EAC/PVRTC/ASTC families).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// Pixel format descriptor did not match any known layout.
    Unknown,

    // Uncompressed.
    R8G8B8A8S,
    R8G8B8A8,
    A8,
    R8,
    R8S,
    R16,
    R16F,
    R32F,
    R8G8,
    R8G8S,
    R16G16,
    R16G16S,
    R16G16F,
    R11G11B10F,
    R10G10B10A2,
    R16G16B16A16,
    R16G16B16A16S,
    R16G16B16A16F,
    R32G32B32A32F,
    R9G9B9E5,

    // Depth/stencil.
    D16,
    D24S8,
    D32F,
    D32FS8,

    // Packed 16-bit.
    B5G6R5,
    B5G5R5,
    B4G4R4A4,

    // Legacy luminance/BGR layouts.
    A8L8,
    L8,
    L8V8U8,
    B8G8R8,
    L8V8U8X8,
    B8G8R8X8,
    B8G8R8A8,

    // Block-compressed, desktop.
    CTX1,
    BC1,
    BC2,
    BC3,
    BC4U,
    BC4S,
    BC5U,
    BC5S,
    BC6UH,
    BC6SH,
    BC7,

    // Block-compressed, mobile.
    ETC2,
    ETC2A,
    EacR11,
    EacRg11,
    Pvrtc2,
    Pvrtc4,
    Astc4x4,
    Astc5x4,
    Astc5x5,
    Astc6x5,
    Astc6x6,
    Astc8x5,
    Astc8x6,
    Astc8x8,
    Astc10x5,
    Astc10x6,
    Astc10x8,
    Astc10x10,
    Astc12x10,
    Astc12x12,
}

impl TextureFormat {
    /// Block dimensions in pixels for this format.
    ///
    /// `(1, 1)` for all uncompressed formats, `(4, 4)` for the S3TC/BC
    /// family, and the per-variant tile size for PVRTC and ASTC.
    pub fn block_dim(self) -> (u32, u32) {
        use TextureFormat::*;
        match self {
            BC1 | BC2 | BC3 | BC4U | BC4S | BC5U | BC5S | BC6UH | BC6SH | BC7 | CTX1 | ETC2
            | ETC2A | EacR11 | EacRg11 => (4, 4),
            Pvrtc2 => (8, 4),
            Pvrtc4 => (4, 4),
            Astc4x4 => (4, 4),
            Astc5x4 => (5, 4),
            Astc5x5 => (5, 5),
            Astc6x5 => (6, 5),
            Astc6x6 => (6, 6),
            Astc8x5 => (8, 5),
            Astc8x6 => (8, 6),
            Astc8x8 => (8, 8),
            Astc10x5 => (10, 5),
            Astc10x6 => (10, 6),
            Astc10x8 => (10, 8),
            Astc10x10 => (10, 10),
            Astc12x10 => (12, 10),
            Astc12x12 => (12, 12),
            _ => (1, 1),
        }
    }

    /// Bytes per block (per pixel for uncompressed formats).
    ///
    /// Returns 0 for [`TextureFormat::Unknown`]; callers reject unknown
    /// formats at header validation, so a zero here never reaches size
    /// arithmetic.
    pub fn bytes_per_block(self) -> u32 {
        use TextureFormat::*;
        match self {
            Unknown => 0,

            A8 | R8 | R8S | L8 => 1,
            R16 | R16F | R8G8 | R8G8S | D16 | B5G6R5 | B5G5R5 | B4G4R4A4 | A8L8 => 2,
            L8V8U8 | B8G8R8 => 3,
            R8G8B8A8 | R8G8B8A8S | R32F | R16G16 | R16G16S | R16G16F | R11G11B10F
            | R10G10B10A2 | R9G9B9E5 | D24S8 | D32F | D32FS8 | L8V8U8X8 | B8G8R8X8
            | B8G8R8A8 => 4,
            R16G16B16A16 | R16G16B16A16S | R16G16B16A16F => 8,
            R32G32B32A32F => 16,

            CTX1 | BC1 | BC4U | BC4S | ETC2 | EacR11 | Pvrtc2 | Pvrtc4 => 8,
            BC2 | BC3 | BC5U | BC5S | BC6UH | BC6SH | BC7 | ETC2A | EacRg11 => 16,

            Astc4x4 | Astc5x4 | Astc5x5 | Astc6x5 | Astc6x6 | Astc8x5 | Astc8x6 | Astc8x8
            | Astc10x5 | Astc10x6 | Astc10x8 | Astc10x10 | Astc12x10 | Astc12x12 => 16,
        }
    }

    /// Whether data is stored as fixed-size blocks covering a pixel tile.
    pub fn is_block_compressed(self) -> bool {
        self.block_dim() != (1, 1)
    }

    /// Formats the pipeline emits for tangent-space normal maps.
    pub fn is_normal_map(self) -> bool {
        matches!(
            self,
            TextureFormat::BC5U | TextureFormat::BC5S | TextureFormat::CTX1 | TextureFormat::EacRg11
        )
    }

    /// Formats with signed component ranges.
    pub fn is_signed(self) -> bool {
        use TextureFormat::*;
        matches!(
            self,
            BC4S | BC5S | BC6SH | R8S | R8G8S | R16G16S | R8G8B8A8S | R16G16B16A16S
        )
    }

    /// Canonical engine name for this format.
    pub fn name(self) -> &'static str {
        use TextureFormat::*;
        match self {
            Unknown => "Unknown",
            R8G8B8A8S => "R8G8B8A8S",
            R8G8B8A8 => "R8G8B8A8",
            A8 => "A8",
            R8 => "R8",
            R8S => "R8S",
            R16 => "R16",
            R16F => "R16F",
            R32F => "R32F",
            R8G8 => "R8G8",
            R8G8S => "R8G8S",
            R16G16 => "R16G16",
            R16G16S => "R16G16S",
            R16G16F => "R16G16F",
            R11G11B10F => "R11G11B10F",
            R10G10B10A2 => "R10G10B10A2",
            R16G16B16A16 => "R16G16B16A16",
            R16G16B16A16S => "R16G16B16A16S",
            R16G16B16A16F => "R16G16B16A16F",
            R32G32B32A32F => "R32G32B32A32F",
            R9G9B9E5 => "R9G9B9E5",
            D16 => "D16",
            D24S8 => "D24S8",
            D32F => "D32F",
            D32FS8 => "D32FS8",
            B5G6R5 => "B5G6R5",
            B5G5R5 => "B5G5R5",
            B4G4R4A4 => "B4G4R4A4",
            A8L8 => "A8L8",
            L8 => "L8",
            L8V8U8 => "L8V8U8",
            B8G8R8 => "B8G8R8",
            L8V8U8X8 => "L8V8U8X8",
            B8G8R8X8 => "B8G8R8X8",
            B8G8R8A8 => "B8G8R8A8",
            CTX1 => "CTX1",
            BC1 => "BC1",
            BC2 => "BC2",
            BC3 => "BC3",
            BC4U => "BC4",
            BC4S => "BC4S",
            BC5U => "BC5",
            BC5S => "BC5S",
            BC6UH => "BC6UH",
            BC6SH => "BC6SH",
            BC7 => "BC7",
            ETC2 => "ETC2",
            ETC2A => "ETC2A",
            EacR11 => "EAC_R11",
            EacRg11 => "EAC_RG11",
            Pvrtc2 => "PVRTC2",
            Pvrtc4 => "PVRTC4",
            Astc4x4 => "ASTC_4x4",
            Astc5x4 => "ASTC_5x4",
            Astc5x5 => "ASTC_5x5",
            Astc6x5 => "ASTC_6x5",
            Astc6x6 => "ASTC_6x6",
            Astc8x5 => "ASTC_8x5",
            Astc8x6 => "ASTC_8x6",
            Astc8x8 => "ASTC_8x8",
            Astc10x5 => "ASTC_10x5",
            Astc10x6 => "ASTC_10x6",
            Astc10x8 => "ASTC_10x8",
            Astc10x10 => "ASTC_10x10",
            Astc12x10 => "ASTC_12x10",
            Astc12x12 => "ASTC_12x12",
        }
    }
}

impl fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parses the canonical engine names plus the legacy tooling aliases
/// (DXT1/DXT3/DXT5, ATI1/ATI2, 3DC/3DCp, V8U8/V16U16, RGBE).
///
/// Matching is case-insensitive. Anything unrecognized parses to
/// [`TextureFormat::Unknown`]; the parse itself never fails.
impl FromStr for TextureFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use TextureFormat::*;

        // Legacy aliases first so they cannot shadow canonical names.
        let alias = match s.to_ascii_uppercase().as_str() {
            "DXT1" => Some(BC1),
            "DXT3" => Some(BC2),
            "DXT5" => Some(BC3),
            "ATI1" | "3DCP" => Some(BC4U),
            "ATI2" | "3DC" => Some(BC5U),
            "V8U8" => Some(R8G8S),
            "V16U16" => Some(R16G16S),
            "RGBE" => Some(R9G9B9E5),
            _ => None,
        };
        if let Some(fmt) = alias {
            return Ok(fmt);
        }

        let all = [
            R8G8B8A8S,
            R8G8B8A8,
            A8,
            R8,
            R8S,
            R16,
            R16F,
            R32F,
            R8G8,
            R8G8S,
            R16G16,
            R16G16S,
            R16G16F,
            R11G11B10F,
            R10G10B10A2,
            R16G16B16A16,
            R16G16B16A16S,
            R16G16B16A16F,
            R32G32B32A32F,
            R9G9B9E5,
            D16,
            D24S8,
            D32F,
            D32FS8,
            B5G6R5,
            B5G5R5,
            B4G4R4A4,
            A8L8,
            L8,
            L8V8U8,
            B8G8R8,
            L8V8U8X8,
            B8G8R8X8,
            B8G8R8A8,
            CTX1,
            BC1,
            BC2,
            BC3,
            BC4U,
            BC4S,
            BC5U,
            BC5S,
            BC6UH,
            BC6SH,
            BC7,
            ETC2,
            ETC2A,
            EacR11,
            EacRg11,
            Pvrtc2,
            Pvrtc4,
            Astc4x4,
            Astc5x4,
            Astc5x5,
            Astc6x5,
            Astc6x6,
            Astc8x5,
            Astc8x6,
            Astc8x8,
            Astc10x5,
            Astc10x6,
            Astc10x8,
            Astc10x10,
            Astc12x10,
            Astc12x12,
        ];
        Ok(all
            .into_iter()
            .find(|fmt| fmt.name().eq_ignore_ascii_case(s))
            .unwrap_or(Unknown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_dim_bc_family() {
        assert_eq!(TextureFormat::BC1.block_dim(), (4, 4));
        assert_eq!(TextureFormat::BC7.block_dim(), (4, 4));
        assert_eq!(TextureFormat::ETC2A.block_dim(), (4, 4));
    }

    #[test]
    fn test_block_dim_pvrtc2_is_wide() {
        assert_eq!(TextureFormat::Pvrtc2.block_dim(), (8, 4));
    }

    #[test]
    fn test_block_dim_astc_variants() {
        assert_eq!(TextureFormat::Astc5x4.block_dim(), (5, 4));
        assert_eq!(TextureFormat::Astc10x6.block_dim(), (10, 6));
        assert_eq!(TextureFormat::Astc12x12.block_dim(), (12, 12));
    }

    #[test]
    fn test_block_dim_uncompressed() {
        assert_eq!(TextureFormat::R8G8B8A8.block_dim(), (1, 1));
        assert_eq!(TextureFormat::L8.block_dim(), (1, 1));
    }

    #[test]
    fn test_bytes_per_block() {
        assert_eq!(TextureFormat::BC1.bytes_per_block(), 8);
        assert_eq!(TextureFormat::BC3.bytes_per_block(), 16);
        assert_eq!(TextureFormat::R8G8B8A8.bytes_per_block(), 4);
        assert_eq!(TextureFormat::R32G32B32A32F.bytes_per_block(), 16);
        assert_eq!(TextureFormat::Unknown.bytes_per_block(), 0);
    }

    #[test]
    fn test_is_block_compressed() {
        assert!(TextureFormat::BC1.is_block_compressed());
        assert!(TextureFormat::Astc8x8.is_block_compressed());
        assert!(!TextureFormat::R8G8B8A8.is_block_compressed());
        assert!(!TextureFormat::A8.is_block_compressed());
    }

    #[test]
    fn test_is_normal_map() {
        assert!(TextureFormat::BC5U.is_normal_map());
        assert!(TextureFormat::CTX1.is_normal_map());
        assert!(!TextureFormat::BC1.is_normal_map());
    }

    #[test]
    fn test_is_signed() {
        assert!(TextureFormat::BC4S.is_signed());
        assert!(TextureFormat::R16G16B16A16S.is_signed());
        assert!(!TextureFormat::BC4U.is_signed());
        assert!(!TextureFormat::R16G16B16A16.is_signed());
    }

    #[test]
    fn test_display_matches_canonical_names() {
        assert_eq!(TextureFormat::BC4U.to_string(), "BC4");
        assert_eq!(TextureFormat::Astc10x10.to_string(), "ASTC_10x10");
        assert_eq!(TextureFormat::EacRg11.to_string(), "EAC_RG11");
    }

    #[test]
    fn test_from_str_canonical_round_trip() {
        for fmt in [
            TextureFormat::BC1,
            TextureFormat::BC6SH,
            TextureFormat::Astc12x10,
            TextureFormat::R16G16B16A16F,
            TextureFormat::B8G8R8X8,
        ] {
            assert_eq!(fmt.name().parse::<TextureFormat>().unwrap(), fmt);
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("DXT1".parse::<TextureFormat>().unwrap(), TextureFormat::BC1);
        assert_eq!("dxt5".parse::<TextureFormat>().unwrap(), TextureFormat::BC3);
        assert_eq!("ATI2".parse::<TextureFormat>().unwrap(), TextureFormat::BC5U);
        assert_eq!("3DCp".parse::<TextureFormat>().unwrap(), TextureFormat::BC4U);
        assert_eq!("RGBE".parse::<TextureFormat>().unwrap(), TextureFormat::R9G9B9E5);
    }

    #[test]
    fn test_from_str_unknown() {
        assert_eq!(
            "NotAFormat".parse::<TextureFormat>().unwrap(),
            TextureFormat::Unknown
        );
    }
}
