//! # Diagnostics
//!
//! The dispatcher and the server lifecycle never reach for a process-wide
//! logger directly; they are handed an `Arc<dyn Diagnostics>` when they are
//! built. [`TracingDiagnostics`] is the production sink and forwards every
//! event to `tracing`, so whatever subscriber [`crate::logging`] installed
//! (JSON, pretty, filtered) applies unchanged.
//!
//! Tests inject their own sink to assert on severities.

use std::fmt;

/// Severity of a diagnostic event, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

/// Severity-leveled log sink.
///
/// Implementations must be cheap to call from the request hot path; events are
/// passed as `fmt::Arguments` so nothing is formatted unless the sink wants it.
pub trait Diagnostics: Send + Sync {
    fn log(&self, severity: Severity, args: fmt::Arguments<'_>);

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Info, args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Warn, args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, args);
    }
}

/// Forwards events to the `tracing` macros under the `brrtcore` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn log(&self, severity: Severity, args: fmt::Arguments<'_>) {
        match severity {
            Severity::Debug => tracing::debug!(target: "brrtcore", "{}", args),
            Severity::Info => tracing::info!(target: "brrtcore", "{}", args),
            Severity::Warn => tracing::warn!(target: "brrtcore", "{}", args),
            Severity::Error => tracing::error!(target: "brrtcore", "{}", args),
        }
    }
}

/// Discards everything. Handy for benchmarks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn log(&self, _severity: Severity, _args: fmt::Arguments<'_>) {}
}
