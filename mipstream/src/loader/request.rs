//! Load request and streamer configuration.

use crate::mip::MipPolicy;

/// Per-load options.
///
/// # Example
///
/// ```
/// use mipstream::loader::LoadRequest;
/// use mipstream::mip::MipPolicy;
///
/// let request = LoadRequest::new()
///     .with_stream_prepare(true)
///     .with_policy(MipPolicy { min_usable_mips: 1, max_skip_mips: 2, suppress_downscale: false });
/// assert!(request.stream_prepare());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadRequest {
    /// Size the destination for the persistent tail only; the rest of
    /// the chain is streamed in later via `load_mip_range`.
    stream_prepare: bool,
    /// Load the attached alpha channel instead of the primary image.
    attached_alpha_only: bool,
    /// Mip policy applied before any buffer is sized.
    policy: MipPolicy,
}

impl LoadRequest {
    /// Request with default policy, full-chain load.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only load the persistent mip tail now.
    pub fn with_stream_prepare(mut self, stream_prepare: bool) -> Self {
        self.stream_prepare = stream_prepare;
        self
    }

    /// Load the attached alpha channel instead of the primary image.
    pub fn with_attached_alpha_only(mut self, alpha_only: bool) -> Self {
        self.attached_alpha_only = alpha_only;
        self
    }

    /// Mip policy for this load.
    pub fn with_policy(mut self, policy: MipPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether only the persistent tail is loaded now.
    pub fn stream_prepare(&self) -> bool {
        self.stream_prepare
    }

    /// Whether the attached alpha channel is the load target.
    pub fn attached_alpha_only(&self) -> bool {
        self.attached_alpha_only
    }

    /// The mip policy.
    pub fn policy(&self) -> MipPolicy {
        self.policy
    }
}

/// Streamer-wide configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamerConfig {
    /// Concurrent side-file reads across all in-flight loads.
    pub max_concurrent_reads: usize,
}

impl Default for StreamerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_reads: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let request = LoadRequest::new();
        assert!(!request.stream_prepare());
        assert!(!request.attached_alpha_only());
        assert_eq!(request.policy(), MipPolicy::default());
    }

    #[test]
    fn test_builder_chain() {
        let request = LoadRequest::new()
            .with_stream_prepare(true)
            .with_attached_alpha_only(true);
        assert!(request.stream_prepare());
        assert!(request.attached_alpha_only());
    }

    #[test]
    fn test_default_config() {
        assert_eq!(StreamerConfig::default().max_concurrent_reads, 8);
    }
}
