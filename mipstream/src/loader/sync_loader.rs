//! Blocking loader for non-streaming call sites.
//!
//! Same planning pipeline as the async loader, executed sequentially on
//! the calling thread with `std::fs`. Used where the caller needs the
//! image before it can make progress anyway (editor imports, offline
//! tooling).

use std::fs;
use std::io::{Read, Seek, SeekFrom};

use tracing::info;

use crate::header::{chunk_chain, DdsFileDesc, IF_SPLITTED};
use crate::image::ImageDescriptor;
use crate::locator::{chunk_file_name, coalesce, ChunkRequest};
use crate::mip::data_size_for_mips;

use super::async_loader::{LoadedImage, StreamedImage};
use super::plan::{copy_from_buffer, plan_initial, split_sides, LoadPlan, MAX_LOAD_BYTES};
use super::{LoadError, LoadRequest};

/// Blocking texture loader.
pub struct SyncLoader;

impl SyncLoader {
    /// Load an image, blocking the calling thread for every read.
    pub fn load(base_name: &str, request: LoadRequest) -> Result<LoadedImage, LoadError> {
        let bytes = read_file(base_name)?;
        let desc = DdsFileDesc::parse(&bytes)?;

        if request.attached_alpha_only() {
            return load_attached_alpha(&bytes, base_name, &desc, &request);
        }

        let image = ImageDescriptor::from_header(&desc)?;
        let plan = plan_initial(&image, base_name, &request, false)?;
        let sides = execute_plan(&plan, base_name, &bytes)?;

        info!(
            base = %base_name,
            format = %plan.image.format,
            mips = plan.mip_count,
            "image loaded (blocking)"
        );
        Ok(LoadedImage {
            image: StreamedImage {
                descriptor: plan.image,
                base_name: base_name.to_string(),
                alpha: false,
                file_descriptor: image,
            },
            mip_start: plan.mip_start,
            sides,
        })
    }
}

/// Blocking twin of the async attached-alpha path.
fn load_attached_alpha(
    base_bytes: &[u8],
    base_name: &str,
    desc: &DdsFileDesc,
    request: &LoadRequest,
) -> Result<LoadedImage, LoadError> {
    let primary = ImageDescriptor::from_header(desc)?;
    if !primary.has_attached_alpha() {
        return Err(LoadError::ChunkNotFound);
    }

    let (plan, file_image, local_name, local_bytes);
    if primary.is_splitted() {
        let alpha_name = chunk_file_name(base_name, 0, true);
        let alpha_bytes = read_file(&alpha_name)?;
        let alpha_desc = DdsFileDesc::parse(&alpha_bytes)?;
        let mut alpha_image = ImageDescriptor::from_header(&alpha_desc)?;
        alpha_image.flags |= IF_SPLITTED;

        plan = plan_initial(&alpha_image, base_name, request, true)?;
        file_image = alpha_image;
        local_name = alpha_name;
        local_bytes = alpha_bytes;
    } else {
        let stored = data_size_for_mips(&primary, 0, primary.mip_count, true);
        let trailing = base_bytes
            .get((primary.data_offset + stored) as usize..)
            .ok_or(LoadError::ChunkNotFound)?;
        let payload = chunk_chain::attached_image(trailing).ok_or(LoadError::ChunkNotFound)?;

        let alpha_desc = DdsFileDesc::parse(payload)?;
        let alpha_image = ImageDescriptor::from_header(&alpha_desc)?;
        plan = plan_initial(&alpha_image, base_name, request, true)?;
        file_image = alpha_image;
        local_name = base_name.to_string();
        local_bytes = payload.to_vec();
    }

    let sides = execute_plan(&plan, &local_name, &local_bytes)?;
    Ok(LoadedImage {
        image: StreamedImage {
            descriptor: plan.image,
            base_name: base_name.to_string(),
            alpha: true,
            file_descriptor: file_image,
        },
        mip_start: plan.mip_start,
        sides,
    })
}

/// Run a plan sequentially: local copies, then one read per side file.
fn execute_plan(
    plan: &LoadPlan,
    local_name: &str,
    local_bytes: &[u8],
) -> Result<Vec<Vec<u8>>, LoadError> {
    let mut dest = vec![0u8; plan.dest_size as usize];
    for chunk in coalesce(plan.requests.clone()) {
        if chunk.source == local_name {
            copy_from_buffer(local_bytes, local_name, &chunk, &mut dest)?;
        } else {
            read_range_into(&chunk, &mut dest)?;
        }
    }
    Ok(split_sides(dest, plan.image.sides))
}

fn read_file(path: &str) -> Result<Vec<u8>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_string(),
        source,
    };

    let metadata = fs::metadata(path).map_err(io_err)?;
    if metadata.len() > MAX_LOAD_BYTES {
        return Err(LoadError::OutOfMemory {
            needed: metadata.len(),
            limit: MAX_LOAD_BYTES,
        });
    }
    fs::read(path).map_err(io_err)
}

fn read_range_into(request: &ChunkRequest, dest: &mut [u8]) -> Result<(), LoadError> {
    let io_err = |source| LoadError::Io {
        path: request.source.clone(),
        source,
    };

    let mut file = fs::File::open(&request.source).map_err(io_err)?;
    file.seek(SeekFrom::Start(request.offset)).map_err(io_err)?;
    let at = request.dest_offset as usize;
    file.read_exact(&mut dest[at..at + request.len as usize])
        .map_err(io_err)
}
