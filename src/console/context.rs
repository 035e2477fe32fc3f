//! Process-wide console context.
//!
//! Holds the standard input, output, error and log streams. The context is
//! built explicitly and installed once with [`Context::init`] before any
//! stream is used; there is no implicit static initialization order to rely
//! on.
//!
//! Tie relationships:
//! - Every read from stdin flushes stdout first, so prompts appear before
//!   input is read.
//! - Every write to stderr or stdlog flushes stdout first.
//! - Stderr is flushed after every write; stdlog stays buffered.
//!
//! Stderr and stdlog share the standard error device and its buffer.
//!
//! A tie is skipped while stdout is locked, including by the calling thread,
//! so holding [`Context::stdout`] never blocks a read or an error write.
//! Locking the same stream twice from one thread deadlocks.
//!
//! Statics are never dropped, so call [`Context::flush`] before exiting; it
//! flushes stdout, then stderr.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError, TryLockError};

use super::{ConsoleInput, ConsoleOutput};
use crate::error::BridgeError;
use crate::io::WideConsole;
use crate::utf::WideChar;

/// Boxed wide console as supplied by platform glue.
pub type DynConsole = Box<dyn WideConsole<Unit = WideChar, Error = io::Error> + Send>;

/// Standard input stream type.
pub type StdinStream = ConsoleInput<DynConsole, Box<dyn BufRead + Send>>;

/// Standard output/error stream type.
pub type StdoutStream = ConsoleOutput<DynConsole, Box<dyn Write + Send>>;

static CONTEXT: OnceLock<Context> = OnceLock::new();

/// Builder for [`Context`].
///
/// Every stream defaults to the process's own byte stream with no console
/// device, i.e. pass-through.
#[derive(Default)]
pub struct ContextBuilder {
    stdin_console: Option<DynConsole>,
    stdout_console: Option<DynConsole>,
    stderr_console: Option<DynConsole>,
    stdin_fallback: Option<Box<dyn BufRead + Send>>,
    stdout_fallback: Option<Box<dyn Write + Send>>,
    stderr_fallback: Option<Box<dyn Write + Send>>,
}

impl ContextBuilder {
    /// Console device probed for standard input.
    pub fn stdin_console(mut self, device: DynConsole) -> Self {
        self.stdin_console = Some(device);
        self
    }

    /// Console device probed for standard output.
    pub fn stdout_console(mut self, device: DynConsole) -> Self {
        self.stdout_console = Some(device);
        self
    }

    /// Console device probed for standard error.
    pub fn stderr_console(mut self, device: DynConsole) -> Self {
        self.stderr_console = Some(device);
        self
    }

    /// Byte stream used when standard input is not a console.
    pub fn stdin_fallback(mut self, reader: Box<dyn BufRead + Send>) -> Self {
        self.stdin_fallback = Some(reader);
        self
    }

    /// Byte stream used when standard output is not a console.
    pub fn stdout_fallback(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.stdout_fallback = Some(writer);
        self
    }

    /// Byte stream used when standard error is not a console.
    pub fn stderr_fallback(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.stderr_fallback = Some(writer);
        self
    }

    /// Probe every device and build a context without installing it.
    pub fn build(self) -> Context {
        let stdin_fallback = self
            .stdin_fallback
            .unwrap_or_else(|| Box::new(BufReader::new(io::stdin())));
        let stdout_fallback = self.stdout_fallback.unwrap_or_else(|| Box::new(io::stdout()));
        let stderr_fallback = self.stderr_fallback.unwrap_or_else(|| Box::new(io::stderr()));

        Context {
            stdin: Mutex::new(ConsoleInput::new(self.stdin_console, stdin_fallback)),
            stdout: Mutex::new(ConsoleOutput::new(self.stdout_console, stdout_fallback)),
            stderr: Mutex::new(ConsoleOutput::new(self.stderr_console, stderr_fallback)),
        }
    }
}

impl fmt::Debug for ContextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextBuilder")
            .field("stdin_console", &self.stdin_console.is_some())
            .field("stdout_console", &self.stdout_console.is_some())
            .field("stderr_console", &self.stderr_console.is_some())
            .finish_non_exhaustive()
    }
}

/// Standard streams of the process.
pub struct Context {
    stdin: Mutex<StdinStream>,
    stdout: Mutex<StdoutStream>,
    stderr: Mutex<StdoutStream>,
}

impl Context {
    /// Start building a context.
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Build and install the process-wide context.
    ///
    /// Must run once, before any stream use. A second call fails with
    /// [`BridgeError::AlreadyInitialized`] and leaves the first context in
    /// place.
    pub fn init(builder: ContextBuilder) -> Result<&'static Context, BridgeError> {
        let mut installed = false;
        let context = CONTEXT.get_or_init(|| {
            installed = true;
            builder.build()
        });
        if installed {
            log::debug!("console context initialized");
            Ok(context)
        } else {
            Err(BridgeError::AlreadyInitialized)
        }
    }

    /// The installed context.
    pub fn get() -> Result<&'static Context, BridgeError> {
        CONTEXT.get().ok_or(BridgeError::NotInitialized)
    }

    /// Standard input, tied to standard output.
    pub fn stdin(&self) -> StdinGuard<'_> {
        StdinGuard {
            stream: lock(&self.stdin),
            tie: &self.stdout,
        }
    }

    /// Standard output.
    pub fn stdout(&self) -> MutexGuard<'_, StdoutStream> {
        lock(&self.stdout)
    }

    /// Standard error, tied to standard output and flushed after every write.
    pub fn stderr(&self) -> StderrGuard<'_> {
        StderrGuard {
            stream: lock(&self.stderr),
            tie: &self.stdout,
            unit_buffered: true,
        }
    }

    /// Buffered log stream on the standard error device, tied to standard
    /// output.
    pub fn stdlog(&self) -> StderrGuard<'_> {
        StderrGuard {
            stream: lock(&self.stderr),
            tie: &self.stdout,
            unit_buffered: false,
        }
    }

    /// Write `s` to standard output.
    pub fn print(&self, s: &str) -> io::Result<()> {
        self.stdout().write_all(s.as_bytes())
    }

    /// Write `s` to standard error.
    pub fn eprint(&self, s: &str) -> io::Result<()> {
        self.stderr().write_all(s.as_bytes())
    }

    /// Read one line from standard input into `buf`.
    ///
    /// Returns the number of bytes read, 0 at end of input.
    pub fn read_line(&self, buf: &mut String) -> io::Result<usize> {
        self.stdin().read_line(buf)
    }

    /// Flush standard output, then standard error.
    pub fn flush(&self) -> io::Result<()> {
        lock(&self.stdout).flush()?;
        lock(&self.stderr).flush()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("stdin", &*lock(&self.stdin))
            .field("stdout", &*lock(&self.stdout))
            .field("stderr", &*lock(&self.stderr))
            .finish()
    }
}

/// Locked standard input.
///
/// Flushes standard output before every read.
pub struct StdinGuard<'a> {
    stream: MutexGuard<'a, StdinStream>,
    tie: &'a Mutex<StdoutStream>,
}

impl StdinGuard<'_> {
    /// Whether input is decoded from a wide console.
    pub fn is_console(&self) -> bool {
        self.stream.is_console()
    }

    /// Read the next byte, `None` at end of input.
    pub fn get(&mut self) -> io::Result<Option<u8>> {
        flush_tie(self.tie);
        self.stream.get()
    }

    /// Return `byte` so the next read yields it.
    pub fn putback(&mut self, byte: u8) {
        self.stream.putback(byte);
    }
}

impl Read for StdinGuard<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        flush_tie(self.tie);
        self.stream.read(buf)
    }
}

impl BufRead for StdinGuard<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        flush_tie(self.tie);
        self.stream.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.stream.consume(amt);
    }
}

impl fmt::Debug for StdinGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StdinGuard").field(&*self.stream).finish()
    }
}

/// Locked standard error or standard log stream.
///
/// Flushes standard output before every write; the standard error flavour
/// also flushes itself after every write.
pub struct StderrGuard<'a> {
    stream: MutexGuard<'a, StdoutStream>,
    tie: &'a Mutex<StdoutStream>,
    unit_buffered: bool,
}

impl StderrGuard<'_> {
    /// Whether output is transcoded for a wide console.
    pub fn is_console(&self) -> bool {
        self.stream.is_console()
    }
}

impl Write for StderrGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        flush_tie(self.tie);
        let n = self.stream.write(buf)?;
        if self.unit_buffered {
            self.stream.flush()?;
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

impl fmt::Debug for StderrGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StderrGuard")
            .field("stream", &*self.stream)
            .field("unit_buffered", &self.unit_buffered)
            .finish()
    }
}

/// Flush the tied stream unless it is locked.
///
/// A failing tie does not fail the operation on the tying stream.
fn flush_tie(tie: &Mutex<StdoutStream>) {
    let result = match tie.try_lock() {
        Ok(mut stream) => stream.flush(),
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().flush(),
        Err(TryLockError::WouldBlock) => {
            log::trace!("tied stream is locked, skipping flush");
            return;
        }
    };
    if let Err(err) = result {
        log::warn!("flushing tied stream failed: {}", err);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
