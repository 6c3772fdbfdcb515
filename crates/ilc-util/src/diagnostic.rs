//! Diagnostics: the shared shape every stage's error renders into.
//!
//! This mirrors `faxc_util::diagnostic` at far smaller scale: the language
//! has exactly one source of position information (a 1-based line number,
//! per spec §3.1 — no columns, no byte spans, no multi-file source map), and
//! every diagnostic this compiler ever emits is fatal (§7), so there is no
//! builder, no source-snippet rendering, and no diagnostic codes table. The
//! `Level` enum is kept even though only `Error` is ever constructed, the
//! same way `faxc_util::diagnostic::Level` keeps `Warning`/`Note`/`Help`
//! variants that a small frontend may never reach for — it documents where
//! this type could grow if the language did.

use std::fmt;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
            Level::Help => "help",
        };
        write!(f, "{s}")
    }
}

/// A single diagnostic message, optionally located at a source line.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub line: Option<u32>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            line,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}: {} on line {}", self.level, self.message, line),
            None => write!(f, "{}: {}", self.level, self.message),
        }
    }
}
