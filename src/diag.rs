//! Diagnostics sink the parser reports through.
//!
//! The parser never decides where messages end up. It hands every
//! [`Diagnostic`] to a [`Diagnostics`] implementation supplied by the caller.

use std::fmt;

use crate::token::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Error,
    /// A parser bug rather than bad input.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debug => "debug",
            Self::Error => "error",
            Self::Critical => "critical",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Option<Span>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(span) = self.span {
            write!(f, " at {span}")?;
        }
        Ok(())
    }
}

/// Receiver of parser messages.
pub trait Diagnostics {
    fn emit(&mut self, diagnostic: Diagnostic);

    /// Whether messages of this severity are wanted at all. The parser
    /// skips formatting debug messages when this returns `false`.
    fn enabled(&self, _severity: Severity) -> bool {
        true
    }
}

/// Forwards diagnostics to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let Diagnostic {
            severity,
            message,
            span,
        } = diagnostic;
        let line = span.map(|s| s.line + 1);
        let column = span.map(|s| s.column + 1);
        match severity {
            Severity::Debug => tracing::debug!(?line, ?column, "{message}"),
            Severity::Error => tracing::error!(?line, ?column, "{message}"),
            Severity::Critical => {
                tracing::error!(critical = true, ?line, ?column, "{message}");
            }
        }
    }

    fn enabled(&self, severity: Severity) -> bool {
        match severity {
            Severity::Debug => tracing::enabled!(tracing::Level::DEBUG),
            Severity::Error | Severity::Critical => true,
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn emit(&mut self, _diagnostic: Diagnostic) {}

    fn enabled(&self, _severity: Severity) -> bool {
        false
    }
}

/// Collects every diagnostic in order.
impl Diagnostics for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }

    fn enabled(&self, severity: Severity) -> bool {
        (**self).enabled(severity)
    }
}
