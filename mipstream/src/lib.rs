//! MipStream - streaming DDS texture codec
//!
//! This library parses the extended DDS container used by the engine's
//! texture pipeline (classic header, optional DX10 extension, proprietary
//! trailing chunk chain), plans which mip levels are persistent versus
//! streamable, resolves split mip chains spread across numbered side
//! files, and loads the resulting chunks asynchronously with
//! partial-failure aggregation.
//!
//! # High-Level API
//!
//! For most use cases, the [`loader`] module provides the entry points:
//!
//! ```ignore
//! use mipstream::loader::{TextureStreamer, LoadRequest};
//!
//! let streamer = TextureStreamer::new();
//! let request = LoadRequest::new().with_stream_prepare(true);
//!
//! // Parse the header, then pull in the persistent mip tail.
//! let image = streamer.load("textures/rock.dds", request).await?;
//! ```
//!
//! The lower layers are usable on their own: [`header`] for container
//! parsing, [`mip`] for mip-window planning, [`locator`] for mapping a
//! mip range onto concrete files and byte ranges.

pub mod format;
pub mod header;
pub mod image;
pub mod loader;
pub mod locator;
pub mod logging;
pub mod mip;
pub mod packer;

/// Version of the MipStream library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
