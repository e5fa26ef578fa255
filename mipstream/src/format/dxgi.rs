//! DXGI format codes used by the DX10 extended header.
//!
//! Only the codes the streaming codec can actually map to an internal
//! [`TextureFormat`](super::TextureFormat) are listed. Values up to
//! `B4G4R4A4_UNORM` follow the DXGI enumeration; the mobile codecs
//! (EAC/ETC2/PVRTC/ASTC) occupy the asset pipeline's private extension
//! range directly after it, matching what the texture compiler emits.

pub const R32G32B32A32_FLOAT: u32 = 2;
pub const R16G16B16A16_FLOAT: u32 = 10;
pub const R16G16B16A16_UNORM: u32 = 11;
pub const R16G16B16A16_SNORM: u32 = 13;
pub const R10G10B10A2_UNORM: u32 = 24;
pub const R11G11B10_FLOAT: u32 = 26;
pub const R8G8B8A8_TYPELESS: u32 = 27;
pub const R8G8B8A8_UNORM: u32 = 28;
pub const R8G8B8A8_UNORM_SRGB: u32 = 29;
pub const R8G8B8A8_SNORM: u32 = 31;
pub const R16G16_FLOAT: u32 = 34;
pub const R16G16_UNORM: u32 = 35;
pub const R16G16_SNORM: u32 = 37;
pub const R32_TYPELESS: u32 = 39;
pub const R32_FLOAT: u32 = 41;
pub const R8G8_UNORM: u32 = 49;
pub const R8G8_SNORM: u32 = 51;
pub const R16_TYPELESS: u32 = 53;
pub const R16_FLOAT: u32 = 54;
pub const R16_UNORM: u32 = 56;
pub const R8_UNORM: u32 = 61;
pub const R8_SNORM: u32 = 63;
pub const A8_UNORM: u32 = 65;
pub const R9G9B9E5_SHAREDEXP: u32 = 67;
pub const BC1_TYPELESS: u32 = 70;
pub const BC1_UNORM: u32 = 71;
pub const BC1_UNORM_SRGB: u32 = 72;
pub const BC2_TYPELESS: u32 = 73;
pub const BC2_UNORM: u32 = 74;
pub const BC2_UNORM_SRGB: u32 = 75;
pub const BC3_TYPELESS: u32 = 76;
pub const BC3_UNORM: u32 = 77;
pub const BC3_UNORM_SRGB: u32 = 78;
pub const BC4_TYPELESS: u32 = 79;
pub const BC4_UNORM: u32 = 80;
pub const BC4_SNORM: u32 = 81;
pub const BC5_TYPELESS: u32 = 82;
pub const BC5_UNORM: u32 = 83;
pub const BC5_SNORM: u32 = 84;
pub const B5G6R5_UNORM: u32 = 85;
pub const B5G5R5A1_UNORM: u32 = 86;
pub const BC6H_TYPELESS: u32 = 94;
pub const BC6H_UF16: u32 = 95;
pub const BC6H_SF16: u32 = 96;
pub const BC7_TYPELESS: u32 = 97;
pub const BC7_UNORM: u32 = 98;
pub const BC7_UNORM_SRGB: u32 = 99;
pub const B4G4R4A4_UNORM: u32 = 115;

// Private extension range, appended by the asset pipeline.
pub const EAC_R11_TYPELESS: u32 = 116;
pub const EAC_R11_UNORM: u32 = 117;
pub const EAC_R11_SNORM: u32 = 118;
pub const EAC_RG11_TYPELESS: u32 = 119;
pub const EAC_RG11_UNORM: u32 = 120;
pub const EAC_RG11_SNORM: u32 = 121;
pub const ETC2_TYPELESS: u32 = 122;
pub const ETC2_UNORM: u32 = 123;
pub const ETC2_UNORM_SRGB: u32 = 124;
pub const ETC2A_TYPELESS: u32 = 125;
pub const ETC2A_UNORM: u32 = 126;
pub const ETC2A_UNORM_SRGB: u32 = 127;
pub const PVRTC2_TYPELESS: u32 = 128;
pub const PVRTC2_UNORM: u32 = 129;
pub const PVRTC2_UNORM_SRGB: u32 = 130;
pub const PVRTC4_TYPELESS: u32 = 131;
pub const PVRTC4_UNORM: u32 = 132;
pub const PVRTC4_UNORM_SRGB: u32 = 133;
pub const ASTC_4X4_TYPELESS: u32 = 134;
pub const ASTC_4X4_UNORM: u32 = 135;
pub const ASTC_5X4_TYPELESS: u32 = 136;
pub const ASTC_5X4_UNORM: u32 = 137;
pub const ASTC_5X5_TYPELESS: u32 = 138;
pub const ASTC_5X5_UNORM: u32 = 139;
pub const ASTC_6X5_TYPELESS: u32 = 140;
pub const ASTC_6X5_UNORM: u32 = 141;
pub const ASTC_6X6_TYPELESS: u32 = 142;
pub const ASTC_6X6_UNORM: u32 = 143;
pub const ASTC_8X5_TYPELESS: u32 = 144;
pub const ASTC_8X5_UNORM: u32 = 145;
pub const ASTC_8X6_TYPELESS: u32 = 146;
pub const ASTC_8X6_UNORM: u32 = 147;
pub const ASTC_8X8_TYPELESS: u32 = 148;
pub const ASTC_8X8_UNORM: u32 = 149;
pub const ASTC_10X5_TYPELESS: u32 = 150;
pub const ASTC_10X5_UNORM: u32 = 151;
pub const ASTC_10X6_TYPELESS: u32 = 152;
pub const ASTC_10X6_UNORM: u32 = 153;
pub const ASTC_10X8_TYPELESS: u32 = 154;
pub const ASTC_10X8_UNORM: u32 = 155;
pub const ASTC_10X10_TYPELESS: u32 = 156;
pub const ASTC_10X10_UNORM: u32 = 157;
pub const ASTC_12X10_TYPELESS: u32 = 158;
pub const ASTC_12X10_UNORM: u32 = 159;
pub const ASTC_12X12_TYPELESS: u32 = 160;
pub const ASTC_12X12_UNORM: u32 = 161;
