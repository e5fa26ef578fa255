//! DDS container header layout: parse and serialize.
//!
//! The on-disk layout is the engine's extended variant of the classic
//! DDS header. It is the same 124-byte record, but the reserved block
//! after the mip count is repurposed for an image-flags slot, the
//! average top-mip brightness and the renormalization color range, and
//! the trailing caps area carries the persistent-mip count and tile
//! mode. The header is followed by a 20-byte DX10 extension iff the
//! pixel format four-CC is `"DX10"`.
//!
//! Every field goes through the little-endian [`ByteReader`] on parse
//! and `to_le_bytes` on serialize; there is no struct overlay.

use super::cursor::ByteReader;
use super::HeaderError;
use crate::format::pixel_format::PIXEL_FORMAT_SIZE;
use crate::format::DdsPixelFormat;
use crate::format::{desc_for_format_dx10, TextureFormat};

/// File magic, first four bytes of every DDS file.
pub const DDS_MAGIC: [u8; 4] = *b"DDS ";

/// Size of the classic header record (the header's own size field must
/// hold exactly this value to be considered valid).
pub const HEADER_SIZE: u32 = 124;

/// Size on disk of the DX10 extension record.
pub const DX10_HEADER_SIZE: usize = 20;

// Header flags (DDSD_*).
pub const DDSD_CAPS: u32 = 0x1;
pub const DDSD_HEIGHT: u32 = 0x2;
pub const DDSD_WIDTH: u32 = 0x4;
pub const DDSD_PIXELFORMAT: u32 = 0x1000;
pub const DDSD_MIPMAPCOUNT: u32 = 0x20000;
pub const DDSD_LINEARSIZE: u32 = 0x80000;
pub const DDSD_DEPTH: u32 = 0x80_0000;

// Surface flags (DDSCAPS_*).
pub const DDSCAPS_COMPLEX: u32 = 0x8;
pub const DDSCAPS_TEXTURE: u32 = 0x1000;
pub const DDSCAPS_MIPMAP: u32 = 0x40_0000;

// Cubemap flags (DDSCAPS2_*).
pub const DDSCAPS2_CUBEMAP: u32 = 0x200;
pub const DDS_CUBEMAP_ALLFACES: u32 = 0xfe00;
pub const DDSCAPS2_VOLUME: u32 = 0x20_0000;

/// Classic DDS header (124 bytes on disk, preceded by the 4-byte magic).
#[derive(Debug, Clone, PartialEq)]
pub struct DdsHeader {
    /// Size of this record; must equal [`HEADER_SIZE`].
    pub size: u32,
    /// Which fields are valid (`DDSD_*`).
    pub header_flags: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Surface width in pixels.
    pub width: u32,
    /// Pitch or linear size of the top mip.
    pub pitch_or_linear_size: u32,
    /// Depth for volume textures (0 or 1 otherwise).
    pub depth: u32,
    /// Number of mip levels (0 and 1 both mean "just the top mip").
    pub mip_count: u32,
    /// Alpha bit depth for formats that carry one separately.
    pub alpha_bit_depth: u32,
    /// Engine image-flags slot (a reserved DWORD in the classic layout);
    /// only meaningful when gated by the texture-stage sentinel.
    pub image_flags: u32,
    /// Average brightness of the top mip.
    pub avg_brightness: f32,
    /// Minimum of the renormalized color range.
    pub min_color: [f32; 4],
    /// Maximum of the renormalized color range.
    pub max_color: [f32; 4],
    /// Nested pixel format record (32 bytes).
    pub pixel_format: DdsPixelFormat,
    /// Surface complexity caps (`DDSCAPS_*`).
    pub surface_flags: u32,
    /// Cubemap/volume caps (`DDSCAPS2_*`).
    pub cubemap_flags: u32,
    /// Number of tail mips that stay resident (0 = derive from size).
    pub num_persistent_mips: u8,
    /// Tile mode byte (see [`TileMode`](super::TileMode)).
    pub tile_mode: u8,
    /// Reserved tail bytes.
    pub reserved: [u8; 6],
    /// Texture stage tag; holds the engine sentinel when the image-flags
    /// slot is populated.
    pub texture_stage: u32,
}

impl DdsHeader {
    /// Create a header for the given dimensions and format.
    ///
    /// Computes the linear size of the top mip, the header flags and the
    /// surface caps. Formats with no on-disk descriptor (depth formats,
    /// [`TextureFormat::Unknown`]) are rejected.
    pub fn new(
        width: u32,
        height: u32,
        depth: u32,
        mip_count: u32,
        format: TextureFormat,
    ) -> Result<Self, HeaderError> {
        let (desc, _dxgi) = desc_for_format_dx10(format).ok_or(HeaderError::UnknownFormat)?;

        let (block_w, block_h) = format.block_dim();
        let blocks_wide = width.div_ceil(block_w);
        let blocks_high = height.div_ceil(block_h);
        let pitch_or_linear_size = blocks_wide * blocks_high * format.bytes_per_block();

        let mut header_flags = DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT | DDSD_LINEARSIZE;
        if mip_count > 1 {
            header_flags |= DDSD_MIPMAPCOUNT;
        }
        if depth > 1 {
            header_flags |= DDSD_DEPTH;
        }

        let mut surface_flags = DDSCAPS_TEXTURE;
        if mip_count > 1 {
            surface_flags |= DDSCAPS_COMPLEX | DDSCAPS_MIPMAP;
        }

        Ok(Self {
            size: HEADER_SIZE,
            header_flags,
            height,
            width,
            pitch_or_linear_size,
            depth,
            mip_count,
            alpha_bit_depth: 0,
            image_flags: 0,
            avg_brightness: 0.0,
            min_color: [0.0; 4],
            max_color: [1.0, 1.0, 1.0, 1.0],
            pixel_format: *desc,
            surface_flags,
            cubemap_flags: if depth > 1 { DDSCAPS2_VOLUME } else { 0 },
            num_persistent_mips: 0,
            tile_mode: 0,
            reserved: [0; 6],
            texture_stage: 0,
        })
    }

    /// Whether the size field matches the compiled layout.
    pub fn is_valid(&self) -> bool {
        self.size == HEADER_SIZE
    }

    /// Whether a DX10 extension record follows this header on disk.
    pub fn is_dx10_ext(&self) -> bool {
        self.pixel_format.is_dx10()
    }

    /// Mip count with the "0 means 1" convention applied.
    pub fn mip_count(&self) -> u32 {
        self.mip_count.max(1)
    }

    /// Size of magic + header (+ DX10 extension when present).
    pub fn full_header_size(&self) -> usize {
        let base = 4 + HEADER_SIZE as usize;
        if self.is_dx10_ext() {
            base + DX10_HEADER_SIZE
        } else {
            base
        }
    }

    fn parse_fields(reader: &mut ByteReader<'_>) -> Result<Self, HeaderError> {
        let size = reader.read_u32()?;
        if size != HEADER_SIZE {
            return Err(HeaderError::BadHeaderSize(size));
        }
        let header_flags = reader.read_u32()?;
        let height = reader.read_u32()?;
        let width = reader.read_u32()?;
        let pitch_or_linear_size = reader.read_u32()?;
        let depth = reader.read_u32()?;
        let mip_count = reader.read_u32()?;
        let alpha_bit_depth = reader.read_u32()?;
        let image_flags = reader.read_u32()?;
        let avg_brightness = reader.read_f32()?;
        let mut min_color = [0.0f32; 4];
        for value in &mut min_color {
            *value = reader.read_f32()?;
        }
        let mut max_color = [0.0f32; 4];
        for value in &mut max_color {
            *value = reader.read_f32()?;
        }

        let pf_size = reader.read_u32()?;
        if pf_size != PIXEL_FORMAT_SIZE {
            return Err(HeaderError::BadPixelFormatSize(pf_size));
        }
        let pixel_format = DdsPixelFormat {
            size: pf_size,
            flags: reader.read_u32()?,
            four_cc: reader.read_bytes()?,
            rgb_bit_count: reader.read_u32()?,
            r_bit_mask: reader.read_u32()?,
            g_bit_mask: reader.read_u32()?,
            b_bit_mask: reader.read_u32()?,
            a_bit_mask: reader.read_u32()?,
        };

        let surface_flags = reader.read_u32()?;
        let cubemap_flags = reader.read_u32()?;
        let num_persistent_mips = reader.read_u8()?;
        let tile_mode = reader.read_u8()?;
        let reserved = reader.read_bytes()?;
        let texture_stage = reader.read_u32()?;

        Ok(Self {
            size,
            header_flags,
            height,
            width,
            pitch_or_linear_size,
            depth,
            mip_count,
            alpha_bit_depth,
            image_flags,
            avg_brightness,
            min_color,
            max_color,
            pixel_format,
            surface_flags,
            cubemap_flags,
            num_persistent_mips,
            tile_mode,
            reserved,
            texture_stage,
        })
    }

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&self.size.to_le_bytes());
        bytes.extend_from_slice(&self.header_flags.to_le_bytes());
        bytes.extend_from_slice(&self.height.to_le_bytes());
        bytes.extend_from_slice(&self.width.to_le_bytes());
        bytes.extend_from_slice(&self.pitch_or_linear_size.to_le_bytes());
        bytes.extend_from_slice(&self.depth.to_le_bytes());
        bytes.extend_from_slice(&self.mip_count.to_le_bytes());
        bytes.extend_from_slice(&self.alpha_bit_depth.to_le_bytes());
        bytes.extend_from_slice(&self.image_flags.to_le_bytes());
        bytes.extend_from_slice(&self.avg_brightness.to_le_bytes());
        for value in &self.min_color {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        for value in &self.max_color {
            bytes.extend_from_slice(&value.to_le_bytes());
        }

        bytes.extend_from_slice(&self.pixel_format.size.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.flags.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.four_cc);
        bytes.extend_from_slice(&self.pixel_format.rgb_bit_count.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.r_bit_mask.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.g_bit_mask.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.b_bit_mask.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.a_bit_mask.to_le_bytes());

        bytes.extend_from_slice(&self.surface_flags.to_le_bytes());
        bytes.extend_from_slice(&self.cubemap_flags.to_le_bytes());
        bytes.push(self.num_persistent_mips);
        bytes.push(self.tile_mode);
        bytes.extend_from_slice(&self.reserved);
        bytes.extend_from_slice(&self.texture_stage.to_le_bytes());
    }
}

/// DX10 extension record (20 bytes, present iff the pixel format four-CC
/// is `"DX10"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsHeaderDx10 {
    /// DXGI format enumerant.
    pub dxgi_format: u32,
    /// Resource dimension (2 = 1D, 3 = 2D, 4 = 3D).
    pub resource_dimension: u32,
    /// Misc flags (bit 2 marks a cubemap).
    pub misc_flag: u32,
    /// Array size.
    pub array_size: u32,
    /// Reserved.
    pub reserved: u32,
}

impl DdsHeaderDx10 {
    fn parse_fields(reader: &mut ByteReader<'_>) -> Result<Self, HeaderError> {
        Ok(Self {
            dxgi_format: reader.read_u32()?,
            resource_dimension: reader.read_u32()?,
            misc_flag: reader.read_u32()?,
            array_size: reader.read_u32()?,
            reserved: reader.read_u32()?,
        })
    }

    fn write_fields(&self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&self.dxgi_format.to_le_bytes());
        bytes.extend_from_slice(&self.resource_dimension.to_le_bytes());
        bytes.extend_from_slice(&self.misc_flag.to_le_bytes());
        bytes.extend_from_slice(&self.array_size.to_le_bytes());
        bytes.extend_from_slice(&self.reserved.to_le_bytes());
    }
}

/// Parsed file header: magic + classic header + optional DX10 extension.
#[derive(Debug, Clone, PartialEq)]
pub struct DdsFileDesc {
    /// Classic header record.
    pub header: DdsHeader,
    /// DX10 extension, present iff the pixel format says so.
    pub dx10: Option<DdsHeaderDx10>,
}

impl DdsFileDesc {
    /// File header for the given dimensions and format, with the DX10
    /// extension attached whenever the format has no classic descriptor.
    pub fn new(
        width: u32,
        height: u32,
        depth: u32,
        mip_count: u32,
        format: TextureFormat,
    ) -> Result<Self, HeaderError> {
        let header = DdsHeader::new(width, height, depth, mip_count, format)?;
        let dx10 = if header.is_dx10_ext() {
            let (_, dxgi_format) = desc_for_format_dx10(format).ok_or(HeaderError::UnknownFormat)?;
            Some(DdsHeaderDx10 {
                dxgi_format,
                resource_dimension: if depth > 1 { 4 } else { 3 },
                misc_flag: 0,
                array_size: 1,
                reserved: 0,
            })
        } else {
            None
        };
        Ok(Self { header, dx10 })
    }

    /// Parse the file header from the front of `bytes`.
    ///
    /// Validates the magic and the header size field, then reads every
    /// field through the little-endian cursor. Reads the DX10 extension
    /// only when the pixel format four-CC requires one. Any validation
    /// failure is terminal for the load attempt.
    pub fn parse(bytes: &[u8]) -> Result<Self, HeaderError> {
        let mut reader = ByteReader::new(bytes);
        let magic: [u8; 4] = reader.read_bytes()?;
        if magic != DDS_MAGIC {
            return Err(HeaderError::BadMagic);
        }

        let header = DdsHeader::parse_fields(&mut reader)?;
        let dx10 = if header.is_dx10_ext() {
            Some(DdsHeaderDx10::parse_fields(&mut reader)?)
        } else {
            None
        };

        Ok(Self { header, dx10 })
    }

    /// Serialize magic + header (+ DX10 extension) to bytes.
    ///
    /// The output round-trips through [`DdsFileDesc::parse`] bit-exactly.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.full_header_size());
        bytes.extend_from_slice(&DDS_MAGIC);
        self.header.write_fields(&mut bytes);
        if let Some(dx10) = &self.dx10 {
            dx10.write_fields(&mut bytes);
        }
        bytes
    }

    /// Size of the serialized header, i.e. the file offset of pixel data.
    pub fn full_header_size(&self) -> usize {
        self.header.full_header_size()
    }

    /// Resolved internal format, combining the classic descriptor and the
    /// DX10 extension when present.
    pub fn format(&self) -> TextureFormat {
        match &self.dx10 {
            Some(dx10) => {
                crate::format::format_for_desc_dx10(&self.header.pixel_format, dx10.dxgi_format)
            }
            None => crate::format::format_for_desc(&self.header.pixel_format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::pixel_format::DDSPF_DX10;
    use crate::format::dxgi;

    fn sample_header() -> DdsHeader {
        let mut header = DdsHeader::new(256, 256, 0, 9, TextureFormat::BC1).unwrap();
        header.num_persistent_mips = 3;
        header.avg_brightness = 0.25;
        header.min_color = [0.0, 0.1, 0.2, 0.3];
        header.max_color = [0.9, 0.8, 0.7, 1.0];
        header
    }

    #[test]
    fn test_new_header_is_valid() {
        let header = sample_header();
        assert!(header.is_valid());
        assert!(!header.is_dx10_ext());
        assert_eq!(header.mip_count(), 9);
    }

    #[test]
    fn test_new_header_rejects_unknown_format() {
        assert!(DdsHeader::new(64, 64, 0, 1, TextureFormat::Unknown).is_err());
    }

    #[test]
    fn test_bc1_linear_size() {
        let header = sample_header();
        // 256x256 is 64x64 blocks of 8 bytes.
        assert_eq!(header.pitch_or_linear_size, 64 * 64 * 8);
    }

    #[test]
    fn test_serialized_size_classic() {
        let desc = DdsFileDesc {
            header: sample_header(),
            dx10: None,
        };
        assert_eq!(desc.to_bytes().len(), 128);
        assert_eq!(desc.full_header_size(), 128);
    }

    #[test]
    fn test_serialized_layout_fixed_offsets() {
        let desc = DdsFileDesc {
            header: sample_header(),
            dx10: None,
        };
        let bytes = desc.to_bytes();

        assert_eq!(&bytes[0..4], b"DDS ");
        // Size field directly after the magic.
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 124);
        // Height at offset 12, width at 16.
        assert_eq!(u32::from_le_bytes(bytes[12..16].try_into().unwrap()), 256);
        assert_eq!(u32::from_le_bytes(bytes[16..20].try_into().unwrap()), 256);
        // Pixel format record starts at offset 76; four-CC 8 bytes in.
        assert_eq!(u32::from_le_bytes(bytes[76..80].try_into().unwrap()), 32);
        assert_eq!(&bytes[84..88], b"DXT1");
    }

    #[test]
    fn test_parse_round_trip_classic() {
        let desc = DdsFileDesc {
            header: sample_header(),
            dx10: None,
        };
        let parsed = DdsFileDesc::parse(&desc.to_bytes()).unwrap();
        assert_eq!(parsed, desc);
    }

    #[test]
    fn test_parse_round_trip_dx10() {
        let mut header = sample_header();
        header.pixel_format = DDSPF_DX10;
        let desc = DdsFileDesc {
            header,
            dx10: Some(DdsHeaderDx10 {
                dxgi_format: dxgi::BC7_UNORM,
                resource_dimension: 3,
                misc_flag: 0,
                array_size: 1,
                reserved: 0,
            }),
        };
        let bytes = desc.to_bytes();
        assert_eq!(bytes.len(), 148);

        let parsed = DdsFileDesc::parse(&bytes).unwrap();
        assert_eq!(parsed, desc);
        assert_eq!(parsed.format(), TextureFormat::BC7);
        assert_eq!(parsed.full_header_size(), 148);
    }

    #[test]
    fn test_parse_bad_magic() {
        let desc = DdsFileDesc {
            header: sample_header(),
            dx10: None,
        };
        let mut bytes = desc.to_bytes();
        bytes[0] = b'X';
        assert!(matches!(
            DdsFileDesc::parse(&bytes),
            Err(HeaderError::BadMagic)
        ));
    }

    #[test]
    fn test_parse_bad_header_size() {
        let desc = DdsFileDesc {
            header: sample_header(),
            dx10: None,
        };
        let mut bytes = desc.to_bytes();
        bytes[4] = 120;
        assert!(matches!(
            DdsFileDesc::parse(&bytes),
            Err(HeaderError::BadHeaderSize(120))
        ));
    }

    #[test]
    fn test_parse_truncated() {
        let desc = DdsFileDesc {
            header: sample_header(),
            dx10: None,
        };
        let bytes = desc.to_bytes();
        assert!(matches!(
            DdsFileDesc::parse(&bytes[..100]),
            Err(HeaderError::Truncated { .. })
        ));
    }

    #[test]
    fn test_parse_dx10_truncated_extension() {
        let mut header = sample_header();
        header.pixel_format = DDSPF_DX10;
        let desc = DdsFileDesc {
            header,
            dx10: Some(DdsHeaderDx10 {
                dxgi_format: dxgi::BC7_UNORM,
                resource_dimension: 3,
                misc_flag: 0,
                array_size: 1,
                reserved: 0,
            }),
        };
        let bytes = desc.to_bytes();
        // Classic part parses, but the promised extension is cut off.
        assert!(matches!(
            DdsFileDesc::parse(&bytes[..130]),
            Err(HeaderError::Truncated { .. })
        ));
    }

    #[test]
    fn test_format_resolution_classic() {
        let desc = DdsFileDesc {
            header: sample_header(),
            dx10: None,
        };
        assert_eq!(desc.format(), TextureFormat::BC1);
    }

    #[test]
    fn test_file_desc_new_attaches_dx10_when_needed() {
        let classic = DdsFileDesc::new(256, 256, 0, 9, TextureFormat::BC1).unwrap();
        assert!(classic.dx10.is_none());

        let extended = DdsFileDesc::new(256, 256, 0, 9, TextureFormat::BC7).unwrap();
        let dx10 = extended.dx10.expect("BC7 needs the DX10 extension");
        assert_eq!(dx10.dxgi_format, dxgi::BC7_UNORM);
        assert!(extended.header.is_dx10_ext());
        assert_eq!(extended.format(), TextureFormat::BC7);

        let parsed = DdsFileDesc::parse(&extended.to_bytes()).unwrap();
        assert_eq!(parsed, extended);
    }
}
