//! Configuration traits and implementations for buffer sizing.
//!
//! The `BridgeConfig` trait allows compile-time configuration of the staging
//! buffers used by the streaming adapters without runtime overhead.

/// Streaming configuration trait defining staging buffer sizes.
///
/// All values are const (zero runtime cost).
pub trait BridgeConfig {
    /// Maximum wide units moved by one physical read or write (default: 1024)
    ///
    /// Must be at least 4 so a retained partial code point never fills the
    /// whole read buffer.
    const WIDE_BUFFER: usize;

    /// Bytes staged by a console writer before transcoding (default: 1024)
    const NARROW_BUFFER: usize;

    /// First capacity of the growable pushback buffer (default: 4)
    const PUSHBACK_INITIAL: usize;
}

/// Inline capacity (terminator included) of the general purpose stack strings.
pub const STACK_INLINE: usize = 256;

/// Inline capacity (terminator included) of the short stack strings.
pub const SHORT_INLINE: usize = 16;

/// Default configuration for console streams.
///
/// - WIDE_BUFFER: 1024 units
/// - NARROW_BUFFER: 1024 bytes
/// - PUSHBACK_INITIAL: 4 bytes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl BridgeConfig for DefaultConfig {
    const WIDE_BUFFER: usize = 1024;
    const NARROW_BUFFER: usize = 1024;
    const PUSHBACK_INITIAL: usize = 4;
}

/// Minimal configuration for memory-limited targets.
///
/// - WIDE_BUFFER: 64 units
/// - NARROW_BUFFER: 64 bytes
/// - PUSHBACK_INITIAL: 4 bytes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MinimalConfig;

impl BridgeConfig for MinimalConfig {
    const WIDE_BUFFER: usize = 64;
    const NARROW_BUFFER: usize = 64;
    const PUSHBACK_INITIAL: usize = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(DefaultConfig::WIDE_BUFFER, 1024);
        assert_eq!(DefaultConfig::NARROW_BUFFER, 1024);
        assert_eq!(DefaultConfig::PUSHBACK_INITIAL, 4);
    }

    #[test]
    fn test_minimal_config() {
        assert_eq!(MinimalConfig::WIDE_BUFFER, 64);
        assert_eq!(MinimalConfig::NARROW_BUFFER, 64);
        assert_eq!(MinimalConfig::PUSHBACK_INITIAL, 4);
    }

    #[test]
    fn test_wide_buffer_holds_longest_tail() {
        assert!(DefaultConfig::WIDE_BUFFER >= 4);
        assert!(MinimalConfig::WIDE_BUFFER >= 4);
    }
}
