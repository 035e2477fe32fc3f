//! # wide-bridge
//!
//! UTF-8 bridging for platforms whose native strings and consoles are wide.
//!
//! **Key features:**
//! - **Codec** - Decode and encode UTF-8, UTF-16 and UTF-32 one code point at a time
//! - **Converters** - Bounded (caller buffer, never overflows) and unbounded conversions
//! - **Stack strings** - Converted strings kept inline up to a fixed capacity
//! - **Console streams** - UTF-8 byte streams over wide consoles, with unbounded pushback
//!
//! Invalid input never fails a conversion: every illegal or truncated sequence
//! becomes U+FFFD.
//!
//! ## Optional Features
//!
//! - `std` (default) - Console streams and the process-wide [`console::Context`]
//!
//! Without `std` the library is `no_std` and needs only `alloc`.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod error;
pub mod io;

// Encoding core
pub mod convert;
pub mod stackstring;
pub mod utf;

// Streaming adapters
pub mod stream;

#[cfg(feature = "std")]
pub mod console;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Core I/O
pub use io::WideConsole;

// Configuration
pub use config::{BridgeConfig, DefaultConfig, MinimalConfig};

// Error types
pub use error::BridgeError;

// Codec
pub use utf::{CodePoint, REPLACEMENT_CHARACTER, UtfUnit, WideChar};

// Conversion
pub use convert::{convert, convert_bounded, narrow, widen};
pub use stackstring::{NarrowStackString, StackString, WideStackString};

// Streaming
pub use stream::{PushbackBuffer, StreamingDecoder, StreamingEncoder};

#[cfg(feature = "std")]
pub use console::{ConsoleInput, ConsoleOutput, Context};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
