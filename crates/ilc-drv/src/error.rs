//! Driver-level errors: every failure the three core subsystems can
//! produce, plus the IO and external-process failures that are this
//! crate's own responsibility (spec §1 "deliberately out of scope" for the
//! core, owned here instead).

use ilc_util::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriveError {
    /// No positional source-file argument was given (spec §6.1: exactly
    /// one required). Returned by `run_cli` rather than exiting the
    /// process directly, so `main` stays the one place that does.
    #[error("usage: ilc <source-file>")]
    MissingArgument,

    #[error("failed to read {}: {source}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Lex(#[from] ilc_lex::LexError),

    #[error(transparent)]
    Parse(#[from] ilc_par::ParseError),

    #[error(transparent)]
    Gen(#[from] ilc_gen::GenError),

    #[error("assembling {}: {source}", asm.display())]
    Assemble {
        asm: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("linking {}: {source}", object.display())]
    Link {
        object: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl DriveError {
    /// Render this failure as the shared [`Diagnostic`] shape every stage's
    /// error ultimately renders into. `main` is the only place that prints
    /// one.
    ///
    /// `line` is always passed as `None` here: every per-stage error's own
    /// `Display` text already ends in "on line N" (spec §7's literal
    /// message shape), so a second, separately-plumbed line number would
    /// only print the same fact twice through `Diagnostic`'s own "on line
    /// N" suffix.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string(), None)
    }
}
