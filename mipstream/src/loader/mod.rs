//! Asynchronous chunk loading with partial-failure aggregation.
//!
//! [`TextureStreamer`] is the main entry point: it parses the header,
//! applies the mip policy, and fills a destination buffer from the base
//! file and any numbered side files. Each side-file read is an
//! independent task; an aggregate completion fires exactly once when
//! the last of them drains, failed if any of them failed. The blocking
//! [`SyncLoader`] runs the same plan sequentially for non-streaming
//! call sites.
//!
//! Failed loads do not retry here. The asset pipeline owns retry (it
//! may recompile the source asset first); this layer reports a typed
//! failure and logs the offending filename.

mod async_loader;
mod plan;
mod request;
mod stream_state;
mod sync_loader;

use thiserror::Error;

pub use async_loader::{LoadedImage, StreamedImage, TextureStreamer};
pub use plan::MAX_LOAD_BYTES;
pub use request::{LoadRequest, StreamerConfig};
pub use stream_state::{ChunkPart, StreamState, StreamOutcome};
pub use sync_loader::SyncLoader;

use crate::header::HeaderError;
use crate::locator::ResolveError;

/// Errors a load can end with.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File missing or unreadable. Recoverable: the caller may trigger
    /// an asset rebuild and reissue the load.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Header failed validation or the pixel format is unrecognized.
    /// Terminal for this file; never retried.
    #[error(transparent)]
    BadFormat(#[from] HeaderError),

    /// Destination would exceed the plausibility ceiling.
    #[error("load of {needed} bytes exceeds the {limit} byte ceiling")]
    OutOfMemory { needed: u64, limit: u64 },

    /// A required trailing chunk (attached alpha) is absent.
    #[error("requested trailing chunk is absent")]
    ChunkNotFound,

    /// Caller-side sizing error from chunk resolution.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Caller-supplied destination buffer is too small for the window.
    #[error("destination holds {provided} bytes, window needs {needed}")]
    DestinationTooSmall { needed: u64, provided: u64 },

    /// The load observed a shutdown and stopped.
    #[error("load aborted")]
    Aborted,
}
