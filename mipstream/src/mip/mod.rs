//! Mip window planning and byte-layout arithmetic.
//!
//! Two responsibilities: applying the load policy (how many
//! high-resolution mips may be skipped, never dropping below the
//! persistent tail), and computing exact byte sizes of mip ranges.
//! [`data_size_for_mips`] is the single ground truth for surface byte
//! layout; the chunk locator builds its offsets from it rather than
//! carrying a second copy of the arithmetic.

use crate::image::ImageDescriptor;

/// Load policy for the initial streaming request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipPolicy {
    /// Keep at least this many mips loadable.
    pub min_usable_mips: u32,
    /// Drop at most this many of the highest-resolution mips, counted
    /// against the authored chain.
    pub max_skip_mips: u32,
    /// Leave the image untouched regardless of the other knobs.
    pub suppress_downscale: bool,
}

impl Default for MipPolicy {
    fn default() -> Self {
        Self {
            min_usable_mips: 1,
            max_skip_mips: 0,
            suppress_downscale: false,
        }
    }
}

/// Apply the policy, producing an adjusted descriptor and the number of
/// mips dropped by this call.
///
/// The retained count is `max(min_usable, authored - max_skip)` clamped
/// to `[persistent, authored]`: never load more detail than the policy
/// allows, never drop below the persistent tail. Drops are counted
/// against the authored chain, so reapplying the same policy to an
/// already-adjusted descriptor is a no-op.
pub fn adjust_for_policy(image: &ImageDescriptor, policy: &MipPolicy) -> (ImageDescriptor, u32) {
    if policy.suppress_downscale || image.suppress_downscale() {
        return (*image, 0);
    }

    let authored = image.authored_mip_count();
    let wanted = policy
        .min_usable_mips
        .max(authored.saturating_sub(policy.max_skip_mips));
    let final_mips = wanted.clamp(image.persistent_mip_count.min(authored), authored);

    let total_dropped = authored - final_mips;
    let additional = total_dropped.saturating_sub(image.dropped_mips);
    (image.reduced(additional), additional)
}

/// Byte size of one side's surface at a single mip.
pub fn surface_size(image: &ImageDescriptor, mip: u32) -> u64 {
    let (block_w, block_h) = image.format.block_dim();
    let width = ImageDescriptor::mip_extent(image.width, mip);
    let height = ImageDescriptor::mip_extent(image.height, mip);
    let depth = ImageDescriptor::mip_extent(image.depth, mip);

    let blocks_wide = width.div_ceil(block_w) as u64;
    let blocks_high = height.div_ceil(block_h) as u64;
    blocks_wide * blocks_high * depth as u64 * image.format.bytes_per_block() as u64
}

/// Byte size of a run of mips starting at `mip_start`.
///
/// With `all_sides` the per-mip sizes are multiplied by the side count
/// (cubemap faces); otherwise the result covers a single side.
pub fn data_size_for_mips(
    image: &ImageDescriptor,
    mip_start: u32,
    mip_count: u32,
    all_sides: bool,
) -> u64 {
    let sides = if all_sides { image.sides as u64 } else { 1 };
    (mip_start..mip_start + mip_count)
        .map(|mip| surface_size(image, mip))
        .sum::<u64>()
        * sides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::TextureFormat;
    use crate::header::{DdsFileDesc, DdsHeader};

    fn image(width: u32, height: u32, mips: u32, persistent: u8, format: TextureFormat) -> ImageDescriptor {
        let mut header = DdsHeader::new(width, height, 0, mips, format).unwrap();
        header.num_persistent_mips = persistent;
        ImageDescriptor::from_header(&DdsFileDesc { header, dx10: None }).unwrap()
    }

    #[test]
    fn test_surface_size_bc1() {
        let img = image(256, 256, 9, 3, TextureFormat::BC1);
        // 64x64 blocks of 8 bytes.
        assert_eq!(surface_size(&img, 0), 64 * 64 * 8);
        // Mip 6 is 4x4, one block.
        assert_eq!(surface_size(&img, 6), 8);
        // Mips below block size still occupy a whole block.
        assert_eq!(surface_size(&img, 8), 8);
    }

    #[test]
    fn test_surface_size_uncompressed() {
        let img = image(128, 64, 1, 0, TextureFormat::R8G8B8A8);
        assert_eq!(surface_size(&img, 0), 128 * 64 * 4);
    }

    #[test]
    fn test_surface_size_non_multiple_of_block() {
        let img = image(100, 100, 1, 0, TextureFormat::BC1);
        // 25x25 blocks of 8 bytes.
        assert_eq!(surface_size(&img, 0), 25 * 25 * 8);
    }

    #[test]
    fn test_data_size_sums_range() {
        let img = image(256, 256, 9, 3, TextureFormat::BC1);
        let total: u64 = (0..9).map(|m| surface_size(&img, m)).sum();
        assert_eq!(data_size_for_mips(&img, 0, 9, false), total);
        assert_eq!(
            data_size_for_mips(&img, 6, 3, false),
            surface_size(&img, 6) + surface_size(&img, 7) + surface_size(&img, 8)
        );
    }

    #[test]
    fn test_data_size_all_sides_multiplies() {
        let mut header = DdsHeader::new(128, 128, 0, 8, TextureFormat::BC1).unwrap();
        header.cubemap_flags = crate::header::DDSCAPS2_CUBEMAP | crate::header::DDS_CUBEMAP_ALLFACES;
        let img = ImageDescriptor::from_header(&DdsFileDesc { header, dx10: None }).unwrap();

        assert_eq!(
            data_size_for_mips(&img, 0, 8, true),
            data_size_for_mips(&img, 0, 8, false) * 6
        );
    }

    #[test]
    fn test_adjust_drops_up_to_skip_limit() {
        let img = image(256, 256, 9, 3, TextureFormat::BC1);
        let policy = MipPolicy {
            min_usable_mips: 1,
            max_skip_mips: 2,
            suppress_downscale: false,
        };
        let (adjusted, dropped) = adjust_for_policy(&img, &policy);
        assert_eq!(dropped, 2);
        assert_eq!(adjusted.mip_count, 7);
        assert_eq!(adjusted.width, 64);
    }

    #[test]
    fn test_adjust_never_drops_below_persistent() {
        let img = image(256, 256, 9, 7, TextureFormat::BC1);
        let policy = MipPolicy {
            min_usable_mips: 1,
            max_skip_mips: 6,
            suppress_downscale: false,
        };
        let (adjusted, dropped) = adjust_for_policy(&img, &policy);
        // 9 - 6 = 3 would undercut the 7 persistent mips.
        assert_eq!(dropped, 2);
        assert_eq!(adjusted.mip_count, 7);
    }

    #[test]
    fn test_adjust_min_usable_wins_over_skip() {
        let img = image(256, 256, 9, 3, TextureFormat::BC1);
        let policy = MipPolicy {
            min_usable_mips: 8,
            max_skip_mips: 6,
            suppress_downscale: false,
        };
        let (adjusted, dropped) = adjust_for_policy(&img, &policy);
        assert_eq!(dropped, 1);
        assert_eq!(adjusted.mip_count, 8);
    }

    #[test]
    fn test_adjust_zero_skip_is_identity() {
        let img = image(256, 256, 9, 3, TextureFormat::BC1);
        let (adjusted, dropped) = adjust_for_policy(&img, &MipPolicy::default());
        assert_eq!(dropped, 0);
        assert_eq!(adjusted, img);
    }

    #[test]
    fn test_adjust_is_idempotent() {
        let img = image(1024, 1024, 11, 3, TextureFormat::BC3);
        let policy = MipPolicy {
            min_usable_mips: 2,
            max_skip_mips: 4,
            suppress_downscale: false,
        };
        let (once, dropped_once) = adjust_for_policy(&img, &policy);
        assert_eq!(dropped_once, 4);

        let (twice, dropped_twice) = adjust_for_policy(&once, &policy);
        assert_eq!(dropped_twice, 0);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_adjust_suppressed_by_policy() {
        let img = image(256, 256, 9, 3, TextureFormat::BC1);
        let policy = MipPolicy {
            min_usable_mips: 1,
            max_skip_mips: 5,
            suppress_downscale: true,
        };
        let (adjusted, dropped) = adjust_for_policy(&img, &policy);
        assert_eq!(dropped, 0);
        assert_eq!(adjusted, img);
    }

    #[test]
    fn test_adjust_suppressed_by_image_flag() {
        let mut header = DdsHeader::new(256, 256, 0, 9, TextureFormat::BC1).unwrap();
        header.num_persistent_mips = 3;
        header.texture_stage = crate::header::FLAGS_SENTINEL;
        header.image_flags = crate::header::IF_SUPPRESS_DOWNSCALE;
        let img = ImageDescriptor::from_header(&DdsFileDesc { header, dx10: None }).unwrap();

        let policy = MipPolicy {
            min_usable_mips: 1,
            max_skip_mips: 5,
            suppress_downscale: false,
        };
        let (_, dropped) = adjust_for_policy(&img, &policy);
        assert_eq!(dropped, 0);
    }

    #[test]
    fn test_halving_never_reaches_zero() {
        let img = image(256, 256, 9, 3, TextureFormat::BC1);
        for mip in 0..img.mip_count {
            assert!(ImageDescriptor::mip_extent(img.width, mip) >= 1);
            assert!(ImageDescriptor::mip_extent(img.height, mip) >= 1);
        }
    }
}
