//! Stateful adapters between UTF-8 byte streams and wide consoles.
//!
//! A wide console moves at most `BridgeConfig::WIDE_BUFFER` units per call, so
//! a code point can be split across two physical operations in either
//! direction:
//! - [`StreamingEncoder`] consumes only complete UTF-8 sequences and hands the
//!   cut-off tail back to its caller.
//! - [`StreamingDecoder`] retains a cut-off wide tail until the next read.
//!
//! Both are single threaded and blocking; all state lives in the adapter.

mod decoder;
mod encoder;
mod pushback;

pub use decoder::StreamingDecoder;
pub use encoder::StreamingEncoder;
pub use pushback::PushbackBuffer;
