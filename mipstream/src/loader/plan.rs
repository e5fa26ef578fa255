//! Shared load planning for the async and sync loaders.
//!
//! A [`LoadPlan`] fixes everything about a load before any I/O beyond
//! the initial header read happens: the policy-adjusted descriptor, the
//! mip window, the destination size and the resolved chunk requests.
//! Both loaders execute the same plan; only the I/O differs.

use tracing::debug;

use crate::image::ImageDescriptor;
use crate::locator::{resolve_split, resolve_unsplit, ChunkRequest};
use crate::mip::{adjust_for_policy, data_size_for_mips};

use super::{LoadError, LoadRequest};

/// Ceiling on a single load's destination buffer. A header asking for
/// more than this is treated as implausible rather than handed to the
/// allocator.
pub const MAX_LOAD_BYTES: u64 = 1 << 30;

/// Everything a loader needs to execute one load.
#[derive(Debug)]
pub struct LoadPlan {
    /// Policy-adjusted descriptor the load produces.
    pub image: ImageDescriptor,
    /// First mip of the loaded window (descriptor indexing).
    pub mip_start: u32,
    /// Number of mips in the loaded window.
    pub mip_count: u32,
    /// Resolved reads, one per side per mip.
    pub requests: Vec<ChunkRequest>,
    /// Destination buffer size covering the window across all sides.
    pub dest_size: u64,
}

/// Plan the initial load of an image.
///
/// Applies the mip policy, then sizes the window: the persistent tail
/// only under stream-prepare, the whole (adjusted) chain otherwise.
///
/// `file_image` is the descriptor as parsed from the header. Chunk
/// requests are resolved against it, not the adjusted descriptor: mips
/// dropped by policy still occupy their bytes on disk, so file offsets
/// and split chunk numbers live in the authored chain's indexing.
pub fn plan_initial(
    file_image: &ImageDescriptor,
    base_name: &str,
    request: &LoadRequest,
    alpha: bool,
) -> Result<LoadPlan, LoadError> {
    let (image, dropped) = adjust_for_policy(file_image, &request.policy());
    if dropped > 0 {
        debug!(
            base = %base_name,
            dropped = dropped,
            mips = image.mip_count,
            "policy dropped high-resolution mips"
        );
    }

    let (mip_start, mip_count) = if request.stream_prepare() {
        (
            image.mip_count - image.persistent_mip_count,
            image.persistent_mip_count,
        )
    } else {
        (0, image.mip_count)
    };

    let dest_size = data_size_for_mips(&image, mip_start, mip_count, true);
    if dest_size > MAX_LOAD_BYTES {
        return Err(LoadError::OutOfMemory {
            needed: dest_size,
            limit: MAX_LOAD_BYTES,
        });
    }

    let capacity = (mip_count * image.sides) as usize;
    let delta = image.dropped_mips - file_image.dropped_mips;
    let file_start = mip_start + delta;
    let file_end = file_start + mip_count - 1;
    let requests = if file_image.is_splitted() {
        resolve_split(file_image, base_name, file_start, file_end, alpha, capacity)?
    } else {
        resolve_unsplit(file_image, base_name, file_start, file_end, capacity)?
    };

    Ok(LoadPlan {
        image,
        mip_start,
        mip_count,
        requests,
        dest_size,
    })
}

/// Copy a request's byte range out of an already-read source buffer.
///
/// Used for the chunks that the initial read already covers (the whole
/// file in the unsplit case, the persistent tail in the split case).
pub fn copy_from_buffer(
    source: &[u8],
    source_name: &str,
    request: &ChunkRequest,
    dest: &mut [u8],
) -> Result<(), LoadError> {
    let start = request.offset as usize;
    let end = start + request.len as usize;
    let Some(bytes) = source.get(start..end) else {
        return Err(LoadError::Io {
            path: source_name.to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("file ends before byte range {start}..{end}"),
            ),
        });
    };
    dest[request.dest_offset as usize..request.dest_offset as usize + request.len as usize]
        .copy_from_slice(bytes);
    Ok(())
}

/// Carve a side-major destination buffer into per-side buffers.
pub fn split_sides(mut dest: Vec<u8>, sides: u32) -> Vec<Vec<u8>> {
    if sides <= 1 {
        return vec![dest];
    }
    let side_pitch = dest.len() / sides as usize;
    let mut out = Vec::with_capacity(sides as usize);
    for _ in 0..sides - 1 {
        let rest = dest.split_off(side_pitch);
        out.push(dest);
        dest = rest;
    }
    out.push(dest);
    out
}
