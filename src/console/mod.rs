//! Console streams for the process's standard input, output and error.
//!
//! Each stream probes its device once at construction. Interactive wide
//! consoles are transcoded through the [`stream`](crate::stream) adapters;
//! redirected handles fall back to plain byte streams.

mod context;
mod input;
mod output;

pub use context::{
    Context, ContextBuilder, DynConsole, StderrGuard, StdinGuard, StdinStream, StdoutStream,
};
pub use input::ConsoleInput;
pub use output::{ConsoleOutput, ConsoleWriter};
