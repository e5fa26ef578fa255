//! Trailing extension chunk chain.
//!
//! After the primary image's pixel data a DDS file may carry a chain of
//! named chunks: a 4-byte start tag, then `(name:4, size:4 LE, payload)`
//! records, terminated by a bare end tag. The chain holds data that has
//! no slot in the header, such as the average color and an attached
//! secondary image (typically an alpha channel compressed separately).
//!
//! The walker treats the chain as untrusted input: every length field is
//! bounds-checked against the slice before use.

/// Chain start tag.
pub const CHUNK_START: [u8; 4] = *b"CExt";
/// Chain end tag (bare, no size field).
pub const CHUNK_END: [u8; 4] = *b"CEnd";
/// Average color chunk (packed RGBA8 payload).
pub const CHUNK_AVG_COLOR: [u8; 4] = *b"AvgC";
/// Attached image chunk (nested DDS header + pixel data).
pub const CHUNK_ATTACHED_IMAGE: [u8; 4] = *b"AttC";

/// Find a named chunk's payload in the trailing bytes.
///
/// Walks the chain from the start tag until the requested name or the
/// end tag. Returns `None` when the chain is absent, malformed, the name
/// never appears, or the chunk is zero-length; absence is a valid
/// negative result, not an error.
pub fn find_chunk(trailing: &[u8], name: [u8; 4]) -> Option<&[u8]> {
    let mut pos = 0usize;

    if trailing.len() < pos + 4 || trailing[pos..pos + 4] != CHUNK_START {
        return None;
    }
    pos += 4;

    loop {
        if trailing.len() < pos + 4 {
            return None;
        }
        let tag = &trailing[pos..pos + 4];
        if tag == CHUNK_END {
            return None;
        }

        if trailing.len() < pos + 8 {
            return None;
        }
        let size = u32::from_le_bytes(trailing[pos + 4..pos + 8].try_into().unwrap()) as usize;
        let payload_start = pos + 8;
        let payload_end = payload_start.checked_add(size)?;
        if trailing.len() < payload_end {
            return None;
        }

        if tag == name {
            if size == 0 {
                return None;
            }
            return Some(&trailing[payload_start..payload_end]);
        }

        pos = payload_end;
    }
}

/// Average color of the top mip, when the chain carries one.
///
/// The payload is a packed RGBA8 color; components are returned
/// normalized to `[0, 1]`.
pub fn average_color(trailing: &[u8]) -> Option<[f32; 4]> {
    let payload = find_chunk(trailing, CHUNK_AVG_COLOR)?;
    if payload.len() < 4 {
        return None;
    }
    Some([
        payload[0] as f32 / 255.0,
        payload[1] as f32 / 255.0,
        payload[2] as f32 / 255.0,
        payload[3] as f32 / 255.0,
    ])
}

/// Attached secondary image bytes (nested DDS header + pixel data).
pub fn attached_image(trailing: &[u8]) -> Option<&[u8]> {
    find_chunk(trailing, CHUNK_ATTACHED_IMAGE)
}

/// Builds a serialized chunk chain, for the writer side of the pipeline.
///
/// # Example
///
/// ```
/// use mipstream::header::chunk_chain::{ChunkChainBuilder, CHUNK_AVG_COLOR, find_chunk};
///
/// let chain = ChunkChainBuilder::new()
///     .add_chunk(CHUNK_AVG_COLOR, &[128, 128, 128, 255])
///     .finish();
/// assert!(find_chunk(&chain, CHUNK_AVG_COLOR).is_some());
/// ```
pub struct ChunkChainBuilder {
    buf: Vec<u8>,
}

impl ChunkChainBuilder {
    /// Start a chain with the start tag.
    pub fn new() -> Self {
        Self {
            buf: CHUNK_START.to_vec(),
        }
    }

    /// Append a named chunk.
    pub fn add_chunk(mut self, name: [u8; 4], payload: &[u8]) -> Self {
        self.buf.extend_from_slice(&name);
        self.buf
            .extend_from_slice(&(payload.len() as u32).to_le_bytes());
        self.buf.extend_from_slice(payload);
        self
    }

    /// Terminate the chain with the end tag and return the bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.buf.extend_from_slice(&CHUNK_END);
        self.buf
    }
}

impl Default for ChunkChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_chunk_chain() -> Vec<u8> {
        ChunkChainBuilder::new()
            .add_chunk(CHUNK_AVG_COLOR, &[10, 20, 30, 255])
            .add_chunk(CHUNK_ATTACHED_IMAGE, &[0xAA; 40])
            .finish()
    }

    #[test]
    fn test_find_first_chunk() {
        let chain = two_chunk_chain();
        let payload = find_chunk(&chain, CHUNK_AVG_COLOR).unwrap();
        assert_eq!(payload, &[10, 20, 30, 255]);
    }

    #[test]
    fn test_find_chunk_behind_another() {
        let chain = two_chunk_chain();
        let payload = find_chunk(&chain, CHUNK_ATTACHED_IMAGE).unwrap();
        assert_eq!(payload.len(), 40);
        assert!(payload.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_absent_chunk_is_none() {
        let chain = two_chunk_chain();
        assert!(find_chunk(&chain, *b"Nope").is_none());
    }

    #[test]
    fn test_missing_start_tag() {
        assert!(find_chunk(b"garbage", CHUNK_AVG_COLOR).is_none());
        assert!(find_chunk(&[], CHUNK_AVG_COLOR).is_none());
    }

    #[test]
    fn test_zero_length_chunk_is_absent() {
        let chain = ChunkChainBuilder::new()
            .add_chunk(CHUNK_AVG_COLOR, &[])
            .finish();
        assert!(find_chunk(&chain, CHUNK_AVG_COLOR).is_none());
    }

    #[test]
    fn test_lying_length_field_is_rejected() {
        // A chunk claiming more bytes than the buffer holds must not be
        // followed off the end.
        let mut chain = CHUNK_START.to_vec();
        chain.extend_from_slice(&CHUNK_AVG_COLOR);
        chain.extend_from_slice(&u32::MAX.to_le_bytes());
        chain.extend_from_slice(&[1, 2, 3]);
        assert!(find_chunk(&chain, CHUNK_AVG_COLOR).is_none());
        assert!(find_chunk(&chain, CHUNK_ATTACHED_IMAGE).is_none());
    }

    #[test]
    fn test_unterminated_chain() {
        let mut chain = CHUNK_START.to_vec();
        chain.extend_from_slice(&CHUNK_AVG_COLOR);
        chain.extend_from_slice(&4u32.to_le_bytes());
        chain.extend_from_slice(&[1, 2, 3, 4]);
        // No CEnd and no further bytes: the walk stops cleanly.
        assert!(find_chunk(&chain, CHUNK_ATTACHED_IMAGE).is_none());
    }

    #[test]
    fn test_average_color() {
        let chain = ChunkChainBuilder::new()
            .add_chunk(CHUNK_AVG_COLOR, &[255, 0, 128, 255])
            .finish();
        let color = average_color(&chain).unwrap();
        assert_eq!(color[0], 1.0);
        assert_eq!(color[1], 0.0);
        assert!((color[2] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(color[3], 1.0);
    }

    #[test]
    fn test_average_color_absent() {
        let chain = ChunkChainBuilder::new().finish();
        assert!(average_color(&chain).is_none());
    }

    #[test]
    fn test_attached_image() {
        let chain = two_chunk_chain();
        assert_eq!(attached_image(&chain).unwrap().len(), 40);
    }
}
