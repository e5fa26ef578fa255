//! Chunk resolution: mapping a mip range onto files and byte ranges.
//!
//! A texture lives either in one file (header, then side-major mip
//! chains) or split across numbered side files, where the base file
//! keeps only the persistent tail and each side file holds exactly one
//! of the larger mips. The resolver turns a requested mip window into
//! the ordered list of [`ChunkRequest`]s the loader must satisfy.
//!
//! Side-file naming is load-bearing for interoperability with externally
//! produced asset packages and must be reproduced byte for byte:
//! `name.1` .. `name.99` for chunks 1 and up, the bare name for chunk 0,
//! and an `a` suffix (or `.a` when no numeric suffix exists) for a split
//! attached-alpha chain.

use thiserror::Error;

use crate::image::ImageDescriptor;
use crate::mip::{data_size_for_mips, surface_size};

/// Hard cap on chunks per request used by the streaming paths.
pub const MAX_CHUNKS: usize = 16;

/// Errors from chunk resolution.
///
/// Sizing errors are programmer errors on the calling side and are kept
/// distinct from "file missing on disk", which surfaces later as an I/O
/// failure when the loader actually reads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The mip window needs more chunks than the caller allotted.
    #[error("mip range needs {needed} chunks, caller allotted {capacity}")]
    TooManyChunks { needed: usize, capacity: usize },

    /// Mip indices out of range or inverted.
    #[error("bad mip range [{mip_start}, {mip_end}] for {mip_count} mips")]
    BadMipRange {
        mip_start: u32,
        mip_end: u32,
        mip_count: u32,
    },
}

/// One contiguous read the loader must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRequest {
    /// File to read from.
    pub source: String,
    /// Byte offset within the source file.
    pub offset: u64,
    /// Bytes to read.
    pub len: u64,
    /// Byte offset within the destination buffer.
    pub dest_offset: u64,
    /// Mip level this read belongs to (descriptor indexing).
    pub mip: u32,
    /// Cubemap side this read belongs to.
    pub side: u32,
}

/// Side-file name for a chunk number.
///
/// Chunk 0 is the base file and gets no numeric suffix. The alpha
/// variant appends `a` directly after a numeric suffix and `.a` when
/// there is none.
pub fn chunk_file_name(base_name: &str, chunk: u32, alpha: bool) -> String {
    match (chunk, alpha) {
        (0, false) => base_name.to_string(),
        (0, true) => format!("{base_name}.a"),
        (n, false) => format!("{base_name}.{n}"),
        (n, true) => format!("{base_name}.{n}a"),
    }
}

/// Split-file chunk number holding a mip.
///
/// The persistent tail lives in chunk 0; every larger mip gets its own
/// numbered file, counted so that the smallest split mip is chunk 1.
pub fn chunk_number_for_mip(image: &ImageDescriptor, mip: u32) -> u32 {
    if mip >= image.mip_count - image.persistent_mip_count {
        0
    } else {
        image.mip_count - mip - image.persistent_mip_count
    }
}

fn check_range(
    image: &ImageDescriptor,
    mip_start: u32,
    mip_end: u32,
) -> Result<(), ResolveError> {
    if mip_start > mip_end || mip_end >= image.mip_count {
        return Err(ResolveError::BadMipRange {
            mip_start,
            mip_end,
            mip_count: image.mip_count,
        });
    }
    Ok(())
}

/// Resolve a mip window against the single-file layout.
///
/// The file stores side-major data: each side's full mip chain is
/// contiguous, so the pitch between sides is the single-side chain size.
/// The destination buffer mirrors that shape for just the requested
/// window. Mip range is inclusive.
pub fn resolve_unsplit(
    image: &ImageDescriptor,
    base_name: &str,
    mip_start: u32,
    mip_end: u32,
    capacity: usize,
) -> Result<Vec<ChunkRequest>, ResolveError> {
    check_range(image, mip_start, mip_end)?;

    let needed = ((mip_end - mip_start + 1) * image.sides) as usize;
    if needed > capacity {
        return Err(ResolveError::TooManyChunks { needed, capacity });
    }

    let side_pitch = data_size_for_mips(image, 0, image.mip_count, false);
    let dest_side_pitch = data_size_for_mips(image, mip_start, mip_end - mip_start + 1, false);

    let mut requests = Vec::with_capacity(needed);
    for side in 0..image.sides {
        let mut running = data_size_for_mips(image, 0, mip_start, false);
        let mut dest_running = 0u64;
        for mip in mip_start..=mip_end {
            let len = surface_size(image, mip);
            requests.push(ChunkRequest {
                source: base_name.to_string(),
                offset: image.data_offset + side as u64 * side_pitch + running,
                len,
                dest_offset: side as u64 * dest_side_pitch + dest_running,
                mip,
                side,
            });
            running += len;
            dest_running += len;
        }
    }
    Ok(requests)
}

/// Resolve a mip window against the split layout.
///
/// Mips inside the persistent window come from the base file (chunk 0)
/// with the same side-major offset math as the unsplit case, applied to
/// the persistent sub-chain it actually stores. Every other mip comes
/// from its own numbered side file, which holds exactly that mip's
/// surfaces and nothing else, so in-file offsets start at 0.
pub fn resolve_split(
    image: &ImageDescriptor,
    base_name: &str,
    mip_start: u32,
    mip_end: u32,
    alpha: bool,
    capacity: usize,
) -> Result<Vec<ChunkRequest>, ResolveError> {
    check_range(image, mip_start, mip_end)?;

    let needed = ((mip_end - mip_start + 1) * image.sides) as usize;
    if needed > capacity {
        return Err(ResolveError::TooManyChunks { needed, capacity });
    }

    let persist_start = image.mip_count - image.persistent_mip_count;
    let persist_side_pitch =
        data_size_for_mips(image, persist_start, image.persistent_mip_count, false);
    let dest_side_pitch = data_size_for_mips(image, mip_start, mip_end - mip_start + 1, false);

    let mut requests = Vec::with_capacity(needed);
    for side in 0..image.sides {
        let mut dest_running = 0u64;
        for mip in mip_start..=mip_end {
            let len = surface_size(image, mip);
            let chunk = chunk_number_for_mip(image, mip);
            let offset = if chunk == 0 {
                let running = data_size_for_mips(image, persist_start, mip - persist_start, false);
                image.data_offset + side as u64 * persist_side_pitch + running
            } else {
                side as u64 * len
            };
            requests.push(ChunkRequest {
                source: chunk_file_name(base_name, chunk, alpha),
                offset,
                len,
                dest_offset: side as u64 * dest_side_pitch + dest_running,
                mip,
                side,
            });
            dest_running += len;
        }
    }
    Ok(requests)
}

/// Merge requests that are contiguous in both the source file and the
/// destination buffer.
///
/// Adjacent mips of one side in an unsplit file always merge; a full
/// unsplit cubemap chain collapses all the way to a single read. Split
/// side files never merge across mips because each mip has its own
/// file. Byte totals are unchanged.
pub fn coalesce(requests: Vec<ChunkRequest>) -> Vec<ChunkRequest> {
    let mut merged: Vec<ChunkRequest> = Vec::with_capacity(requests.len());
    for request in requests {
        if let Some(last) = merged.last_mut() {
            if last.source == request.source
                && last.offset + last.len == request.offset
                && last.dest_offset + last.len == request.dest_offset
            {
                last.len += request.len;
                continue;
            }
        }
        merged.push(request);
    }
    merged
}

/// Resolve a mip window, dispatching on the descriptor's split flag.
pub fn resolve(
    image: &ImageDescriptor,
    base_name: &str,
    mip_start: u32,
    mip_end: u32,
    capacity: usize,
) -> Result<Vec<ChunkRequest>, ResolveError> {
    if image.is_splitted() {
        resolve_split(image, base_name, mip_start, mip_end, false, capacity)
    } else {
        resolve_unsplit(image, base_name, mip_start, mip_end, capacity)
    }
}
