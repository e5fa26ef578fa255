//! Asynchronous streaming loader.
//!
//! The initial load reads the base file once, parses the header and
//! copies whatever the base file already covers; every chunk that lives
//! in a numbered side file becomes an independent read task. A shared
//! [`StreamState`](super::stream_state::StreamState) aggregates those
//! reads and delivers the outcome exactly once. Later mip windows are
//! streamed with [`TextureStreamer::load_mip_range`] directly into a
//! caller-supplied buffer.
//!
//! Reads run on the runtime's worker threads; completion callbacks and
//! awaited results therefore arrive off the caller's thread, and
//! nothing here assumes otherwise.

use std::io::SeekFrom;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::{oneshot, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::header::{chunk_chain, DdsFileDesc, IF_SPLITTED};
use crate::image::ImageDescriptor;
use crate::locator::{
    chunk_file_name, coalesce, resolve_split, resolve_unsplit, ChunkRequest, MAX_CHUNKS,
};
use crate::mip::data_size_for_mips;

use super::plan::{copy_from_buffer, plan_initial, split_sides, LoadPlan, MAX_LOAD_BYTES};
use super::stream_state::{ChunkPart, StreamState};
use super::{LoadError, LoadRequest, StreamerConfig};

/// Identity of a parsed, streamable image: enough to resolve further mip
/// windows without re-reading the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamedImage {
    /// Policy-adjusted descriptor; describes the loadable content.
    pub descriptor: ImageDescriptor,
    /// Base file the image was opened from.
    pub base_name: String,
    /// Whether this is the attached alpha chain (affects side-file names).
    pub alpha: bool,
    /// Descriptor as parsed from the header. File offsets and split
    /// chunk numbers live in this chain's indexing; mips dropped by
    /// policy still occupy their bytes on disk.
    pub(crate) file_descriptor: ImageDescriptor,
}

impl StreamedImage {
    /// Descriptor of the authored chain as stored on disk.
    pub fn file_descriptor(&self) -> &ImageDescriptor {
        &self.file_descriptor
    }
}

/// A completed load: the descriptor plus one owned byte buffer per side.
///
/// Ownership of the buffers transfers to the caller here; the loader
/// keeps nothing.
#[derive(Debug)]
pub struct LoadedImage {
    /// Image identity, usable for later `load_mip_range` calls.
    pub image: StreamedImage,
    /// First mip present in the buffers (descriptor indexing).
    pub mip_start: u32,
    /// One buffer per side, each holding the loaded mip window
    /// back to back.
    pub sides: Vec<Vec<u8>>,
}

/// Asynchronous texture streamer.
///
/// Cheap to clone; clones share the read semaphore and the shutdown
/// token.
#[derive(Clone)]
pub struct TextureStreamer {
    read_slots: Arc<Semaphore>,
    shutdown: CancellationToken,
}

impl TextureStreamer {
    /// Streamer with default configuration.
    pub fn new() -> Self {
        Self::with_config(StreamerConfig::default())
    }

    /// Streamer with explicit configuration.
    pub fn with_config(config: StreamerConfig) -> Self {
        Self {
            read_slots: Arc::new(Semaphore::new(config.max_concurrent_reads.max(1))),
            shutdown: CancellationToken::new(),
        }
    }

    /// Abort in-flight loads. Loads observing the abort may never
    /// deliver a result; callers that abort must not wait on one.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Load an image, awaiting the result.
    ///
    /// Reads the base file, parses and validates the header, applies the
    /// request's mip policy, then fills the destination window: base-file
    /// bytes are copied from the initial read, side-file chunks are read
    /// concurrently. Exactly one result is produced.
    ///
    /// # Errors
    ///
    /// [`LoadError::Io`] for missing or unreadable files (recoverable,
    /// the asset pipeline may rebuild and retry), [`LoadError::BadFormat`]
    /// for header validation failures (terminal), plus the sizing and
    /// abort variants. Nothing is retried here.
    pub async fn load(&self, base_name: &str, request: LoadRequest) -> Result<LoadedImage, LoadError> {
        let bytes = read_file(base_name).await?;
        let desc = DdsFileDesc::parse(&bytes)?;

        if request.attached_alpha_only() {
            return self.load_attached_alpha(&bytes, base_name, &desc, &request).await;
        }

        let image = ImageDescriptor::from_header(&desc)?;
        let plan = plan_initial(&image, base_name, &request, false)?;
        let sides = self.execute_plan(&plan, base_name, &bytes).await?;

        info!(
            base = %base_name,
            format = %plan.image.format,
            mips = plan.mip_count,
            bytes = plan.dest_size,
            "image loaded"
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

    /// Load an image, delivering the result through a oneshot receiver.
    ///
    /// The receiver yields exactly one result; if the streamer is shut
    /// down first it may yield nothing at all (the sender is dropped).
    pub fn load_initial(
        &self,
        base_name: &str,
        request: LoadRequest,
    ) -> oneshot::Receiver<Result<LoadedImage, LoadError>> {
        let (tx, rx) = oneshot::channel();
        let streamer = self.clone();
        let base_name = base_name.to_string();
        tokio::spawn(async move {
            let result = streamer.load(&base_name, request).await;
            if let Err(LoadError::Aborted) = &result {
                // Aborted loads drop the sender without a result.
                return;
            }
            let _ = tx.send(result);
        });
        rx
    }

    /// Stream a further mip window of an already-loaded image directly
    /// into `dest`.
    ///
    /// `dest` must hold the window across all sides, laid out side-major
    /// exactly as the chunk resolver computes destination offsets. Mip
    /// range is inclusive.
    pub async fn load_mip_range(
        &self,
        image: &StreamedImage,
        mip_start: u32,
        mip_end: u32,
        dest: &mut [u8],
    ) -> Result<(), LoadError> {
        let descriptor = &image.descriptor;
        let file_image = &image.file_descriptor;
        // File offsets live in the authored chain's indexing.
        let delta = descriptor.dropped_mips - file_image.dropped_mips;
        let (file_start, file_end) = (mip_start + delta, mip_end + delta);
        let requests = if file_image.is_splitted() {
            resolve_split(
                file_image,
                &image.base_name,
                file_start,
                file_end,
                image.alpha,
                MAX_CHUNKS,
            )?
        } else {
            resolve_unsplit(file_image, &image.base_name, file_start, file_end, MAX_CHUNKS)?
        };

        let needed = data_size_for_mips(descriptor, mip_start, mip_end - mip_start + 1, true);
        if (dest.len() as u64) < needed {
            return Err(LoadError::DestinationTooSmall {
                needed,
                provided: dest.len() as u64,
            });
        }

        debug!(
            base = %image.base_name,
            mip_start = mip_start,
            mip_end = mip_end,
            chunks = requests.len(),
            "streaming mip range"
        );

        let parts = self.read_chunks(coalesce(requests)).await?;
        for part in parts {
            let at = part.dest_offset as usize;
            dest[at..at + part.data.len()].copy_from_slice(&part.data);
        }
        Ok(())
    }

    /// Execute a plan: local copies from the already-read base bytes,
    /// then concurrent reads for everything else.
    async fn execute_plan(
        &self,
        plan: &LoadPlan,
        local_name: &str,
        local_bytes: &[u8],
    ) -> Result<Vec<Vec<u8>>, LoadError> {
        let mut dest = vec![0u8; plan.dest_size as usize];

        let mut remote = Vec::new();
        for request in coalesce(plan.requests.clone()) {
            if request.source == local_name {
                copy_from_buffer(local_bytes, local_name, &request, &mut dest)?;
            } else {
                remote.push(request);
            }
        }

        if !remote.is_empty() {
            let parts = self.read_chunks(remote).await?;
            for part in parts {
                let at = part.dest_offset as usize;
                dest[at..at + part.data.len()].copy_from_slice(&part.data);
            }
        }

        Ok(split_sides(dest, plan.image.sides))
    }

    /// Fan chunk reads out as independent tasks and aggregate through a
    /// [`StreamState`]. The aggregate fails if any read failed, after
    /// every sibling has drained; writes target disjoint ranges, so
    /// completed siblings are never rolled back.
    async fn read_chunks(&self, requests: Vec<ChunkRequest>) -> Result<Vec<ChunkPart>, LoadError> {
        let (state, outcome) = StreamState::new(requests.len());

        for request in requests {
            let state = Arc::clone(&state);
            let slots = Arc::clone(&self.read_slots);
            let token = self.shutdown.clone();
            tokio::spawn(async move {
                let result = tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(LoadError::Aborted),
                    result = read_request(&request, slots) => result,
                };
                state.chunk_done(
                    &request.source,
                    result.map(|data| ChunkPart {
                        dest_offset: request.dest_offset,
                        data,
                    }),
                );
            });
        }

        outcome.await.map_err(|_| LoadError::Aborted)?
    }

    /// Load the attached alpha channel instead of the primary image.
    ///
    /// The trailing chunk chain sits directly after the primary pixel
    /// data stored in the base file (the persistent tail for split
    /// images, the whole chain otherwise). For unsplit images the
    /// nested image is fully contained in the chunk payload; for split
    /// images the alpha chain has its own base file and numbered side
    /// files carrying the `a` suffix.
    async fn load_attached_alpha(
        &self,
        base_bytes: &[u8],
        base_name: &str,
        desc: &DdsFileDesc,
        request: &LoadRequest,
    ) -> Result<LoadedImage, LoadError> {
        let primary = ImageDescriptor::from_header(desc)?;
        if !primary.has_attached_alpha() {
            return Err(LoadError::ChunkNotFound);
        }

        if primary.is_splitted() {
            let alpha_name = chunk_file_name(base_name, 0, true);
            let alpha_bytes = read_file(&alpha_name).await?;
            let alpha_desc = DdsFileDesc::parse(&alpha_bytes)?;
            let mut alpha_image = ImageDescriptor::from_header(&alpha_desc)?;
            // The alpha chain shares the primary's split layout even when
            // its own header does not repeat the flag.
            alpha_image.flags |= IF_SPLITTED;

            let plan = plan_initial(&alpha_image, base_name, request, true)?;
            let sides = self.execute_plan(&plan, &alpha_name, &alpha_bytes).await?;
            return Ok(LoadedImage {
                image: StreamedImage {
                    descriptor: plan.image,
                    base_name: base_name.to_string(),
                    alpha: true,
                    file_descriptor: alpha_image,
                },
                mip_start: plan.mip_start,
                sides,
            });
        }

        let stored = data_size_for_mips(&primary, 0, primary.mip_count, true);
        let trailing_at = primary.data_offset + stored;
        let trailing = base_bytes
            .get(trailing_at as usize..)
            .ok_or(LoadError::ChunkNotFound)?;
        let payload = chunk_chain::attached_image(trailing).ok_or(LoadError::ChunkNotFound)?;

        let alpha_desc = DdsFileDesc::parse(payload)?;
        let alpha_image = ImageDescriptor::from_header(&alpha_desc)?;
        let plan = plan_initial(&alpha_image, base_name, request, true)?;
        // The payload is the alpha chain's whole "file".
        let sides = self.execute_plan(&plan, base_name, payload).await?;

        Ok(LoadedImage {
            image: StreamedImage {
                descriptor: plan.image,
                base_name: base_name.to_string(),
                alpha: true,
                file_descriptor: alpha_image,
            },
            mip_start: plan.mip_start,
            sides,
        })
    }
}

impl Default for TextureStreamer {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a whole file, tagging I/O failures with the path.
async fn read_file(path: &str) -> Result<Vec<u8>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_string(),
        source,
    };

    let metadata = tokio::fs::metadata(path).await.map_err(io_err)?;
    if metadata.len() > MAX_LOAD_BYTES {
        return Err(LoadError::OutOfMemory {
            needed: metadata.len(),
            limit: MAX_LOAD_BYTES,
        });
    }
    tokio::fs::read(path).await.map_err(io_err)
}

/// Read one chunk's byte range, holding a read slot for the duration.
async fn read_request(
    request: &ChunkRequest,
    slots: Arc<Semaphore>,
) -> Result<Vec<u8>, LoadError> {
    let _permit = slots.acquire().await.map_err(|_| LoadError::Aborted)?;

    let io_err = |source| LoadError::Io {
        path: request.source.clone(),
        source,
    };

    let mut file = tokio::fs::File::open(&request.source).await.map_err(io_err)?;
    file.seek(SeekFrom::Start(request.offset)).await.map_err(io_err)?;
    let mut data = vec![0u8; request.len as usize];
    file.read_exact(&mut data).await.map_err(io_err)?;
    Ok(data)
}
