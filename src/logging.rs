//! Event reporting and diagnostics.
//!
//! Two separate concerns live here:
//! - [`EventSink`]: the narrow capability that receives one formatted line per
//!   successful inventory mutation. The destination is swappable.
//! - [`init_tracing`]: installs the `tracing` subscriber used for diagnostics.
use anyhow::Context as _;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Target used when events are routed through `tracing`.
pub const EVENTS_TARGET: &str = "book_inventory::events";

type SinkFn = dyn Fn(&str) + Send + Sync + 'static;

/// Destination for inventory event lines.
///
/// Cloning is cheap; clones share the same destination.
#[derive(Clone)]
pub struct EventSink {
    inner: Arc<SinkFn>,
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSink").finish_non_exhaustive()
    }
}

impl Default for EventSink {
    fn default() -> Self {
        Self::silent()
    }
}

impl EventSink {
    /// Wrap any function as a sink.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    pub fn silent() -> Self {
        Self::from_fn(|_| {})
    }

    /// Print `LOG: <line>` to stdout.
    pub fn console() -> Self {
        Self::console_to(std::io::stdout())
    }

    /// Write `LOG: <line>` to `out`, flushing after each line.
    pub fn console_to<W: Write + Send + 'static>(out: W) -> Self {
        let out = Mutex::new(out);
        Self::from_fn(move |line| {
            let mut w = out.lock().unwrap_or_else(|e| e.into_inner());
            if let Err(err) = writeln!(w, "LOG: {line}").and_then(|_| w.flush()) {
                tracing::warn!(error = %err, "failed to write event line");
            }
        })
    }

    /// Emit each line as an info event on [`EVENTS_TARGET`].
    pub fn tracing() -> Self {
        Self::from_fn(|line| tracing::info!(target: EVENTS_TARGET, "{line}"))
    }

    /// Append lines to `path`, creating it if needed.
    pub fn file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {}", path.display()))?;
        let file: Mutex<File> = Mutex::new(file);
        Ok(Self::from_fn(move |line| {
            let mut f = file.lock().unwrap_or_else(|e| e.into_inner());
            if let Err(err) = writeln!(f, "{line}") {
                tracing::warn!(error = %err, "failed to write event line");
            }
        }))
    }

    /// Collect lines in memory. The returned [`EventLog`] reads them back.
    pub fn memory() -> (Self, EventLog) {
        let log = EventLog::default();
        let writer = log.clone();
        (Self::from_fn(move |line| writer.push(line)), log)
    }

    /// Sink that forwards every line to `self`, then to `other`.
    pub fn fanout(self, other: EventSink) -> Self {
        Self::from_fn(move |line| {
            self.emit(line);
            other.emit(line);
        })
    }

    pub fn emit(&self, line: &str) {
        (self.inner)(line);
    }
}

/// Shared, append-only buffer filled by [`EventSink::memory`].
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    fn push(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.to_string());
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// The most recent `n` lines, oldest first.
    pub fn tail(&self, n: usize) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        let start = lines.len().saturating_sub(n);
        lines[start..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Add an `info` directive for [`EVENTS_TARGET`] so event lines survive
/// a stricter diagnostic level.
pub fn with_events_enabled(filter: EnvFilter) -> anyhow::Result<EnvFilter> {
    let directive = format!("{EVENTS_TARGET}=info")
        .parse::<Directive>()
        .context("parse events directive")?;
    Ok(filter.add_directive(directive))
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_level`. With a `log_file` diagnostics are
/// appended there; otherwise they go to stderr, or nowhere when `quiet`.
pub fn init_tracing(default_level: &str, log_file: Option<&Path>, quiet: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("invalid log filter {default_level:?}"))?;
    let filter = with_events_enabled(filter)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None if quiet => return Ok(()),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))
}
