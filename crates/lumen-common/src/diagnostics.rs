//! Renderer warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! The markup engine reports malformed markup through a [`DiagnosticSink`];
//! the dedup key is the message text, never the offending input, so a
//! thousand cells with the same broken tag produce one warning.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Destination for malformed-markup warnings.
///
/// `key` identifies the warning for deduplication; `detail` is the full,
/// possibly multi-line text to show. Returns `true` if the warning was
/// emitted, `false` if it was suppressed as a duplicate.
pub trait DiagnosticSink: Send + Sync {
    /// Report a warning at most once per distinct `key`.
    fn warn_once(&self, component: &str, key: &str, detail: &str) -> bool;
}

/// Deduplicating sink that writes to stderr.
///
/// Created once and never cleared during normal operation; the set of
/// seen keys grows for the life of the sink.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warned: Mutex<HashSet<String>>,
}

impl Diagnostics {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn seen(&self) -> MutexGuard<'_, HashSet<String>> {
        // A panic while holding the lock cannot leave the set half-updated.
        self.warned.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a warning with this key has already been printed.
    #[must_use]
    pub fn has_warned(&self, key: &str) -> bool {
        self.seen().contains(key)
    }

    /// Number of distinct warnings printed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen().len()
    }

    /// Whether nothing has been printed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen().is_empty()
    }

    /// Forget all recorded warnings.
    pub fn clear(&self) {
        self.seen().clear();
    }
}

impl DiagnosticSink for Diagnostics {
    fn warn_once(&self, component: &str, key: &str, detail: &str) -> bool {
        let should_print = self.seen().insert(key.to_string());

        if should_print {
            // Multi-line diagnostics (source line plus caret) are printed
            // line by line so log collectors that split on newlines keep them.
            for line in detail.lines() {
                eprintln!("{YELLOW}[Lumen {component}] ⚠ {line}{RESET}");
            }
        }
        should_print
    }
}

/// Sink that records warnings in memory instead of printing them.
///
/// Deduplicates exactly like [`Diagnostics`]; used by tests and by callers
/// that surface warnings in their own UI.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<(String, String)>>,
}

impl CollectingSink {
    /// Create an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<(String, String)>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Keys of all warnings emitted so far, in order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries().iter().map(|(key, _)| key.clone()).collect()
    }

    /// Full text of all warnings emitted so far, in order.
    #[must_use]
    pub fn details(&self) -> Vec<String> {
        self.entries()
            .iter()
            .map(|(_, detail)| detail.clone())
            .collect()
    }

    /// Number of distinct warnings emitted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether no warning was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn_once(&self, _component: &str, key: &str, detail: &str) -> bool {
        let mut entries = self.entries();
        if entries.iter().any(|(seen, _)| seen == key) {
            return false;
        }
        entries.push((key.to_string(), detail.to_string()));
        true
    }
}

/// The process-wide sink, created on first use and never dropped.
pub fn global() -> &'static Diagnostics {
    static GLOBAL: OnceLock<Diagnostics> = OnceLock::new();
    GLOBAL.get_or_init(Diagnostics::new)
}

/// Warn about a problem through the process-wide sink (prints once per
/// unique message).
///
/// # Example
/// ```ignore
/// warn_once("Raster", "no system font found; text will not be drawn");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let _ = global().warn_once(component, message, message);
}
