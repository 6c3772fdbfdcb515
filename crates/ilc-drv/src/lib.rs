//! ilc-drv - the compiler driver: configuration, the compilation session,
//! and the external-process glue spec §1 (PURPOSE & SCOPE) calls out as
//! deliberately outside the core three subsystems.
//!
//! Mirrors `faxc_drv::Config`/`Session` (`examples/Luvion1-Fax/faxc/crates/faxc-drv/src/lib.rs`)
//! trimmed to the knobs this system actually has: one input file, one
//! output file, and the assembler/linker invocations spec §6.1 treats as
//! replaceable external collaborators. There is no `OptLevel`, `EmitType`,
//! multi-file `SourceMap`, or incremental cache — this language has none of
//! the features those exist to support.

mod error;

use ilc_util::{Arena, Interner};
use std::path::{Path, PathBuf};
use std::process::Command;

pub use error::DriveError;

/// Compiler configuration for a single invocation (spec §6.1: one
/// positional argument, no flags).
#[derive(Debug, Clone)]
pub struct Config {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    /// Keep the intermediate `.asm` file around after linking. Defaulted
    /// true: spec.md has no flag asking for its removal, so there is
    /// nothing for a flag to gate — this is a library-level knob for
    /// callers (and tests) that don't want the extra file.
    pub keep_asm: bool,
}

impl Config {
    /// Derive a `Config` from just the input path, the way `ilc`'s `main`
    /// does: output file is the input's stem in the current directory.
    pub fn from_input(input_file: PathBuf) -> Self {
        let stem = input_file
            .file_stem()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("a.out"));
        Self {
            input_file,
            output_file: stem,
            keep_asm: true,
        }
    }

    fn asm_path(&self) -> PathBuf {
        self.output_file.with_extension("asm")
    }

    fn object_path(&self) -> PathBuf {
        self.output_file.with_extension("o")
    }
}

/// Whether `ILC_LOG` is set, gating the one-`eprintln!`-per-phase tracing
/// `faxc_drv::Session::run_pipeline` does with its own `verbose` field.
fn logging_enabled() -> bool {
    std::env::var_os("ILC_LOG").is_some()
}

fn log_phase(phase: &str) {
    if logging_enabled() {
        eprintln!("ilc: {phase}");
    }
}

/// A single compilation's state: its configuration and the string
/// interner every stage shares.
pub struct Session {
    pub config: Config,
    interner: Interner,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            interner: Interner::new(),
        }
    }

    /// Run the three core subsystems over the configured input file and
    /// return the generated assembly text, without touching the
    /// filesystem or spawning an assembler/linker. This is the seam the
    /// integration tests drive: lexing, parsing, and code generation are
    /// this crate's to verify; `nasm`/`ld` are external collaborators spec
    /// §1 explicitly scopes out.
    pub fn compile_to_asm(&mut self) -> Result<String, DriveError> {
        let source =
            std::fs::read_to_string(&self.config.input_file).map_err(|source| {
                DriveError::ReadSource {
                    path: self.config.input_file.clone(),
                    source,
                }
            })?;

        log_phase("lexing");
        let tokens = ilc_lex::tokenize(&source, &mut self.interner)?;

        log_phase("parsing");
        let arena = Arena::with_capacity(1 << 20);
        let program = ilc_par::parse(tokens, &arena)?;

        log_phase("generating");
        let asm = ilc_gen::generate(&program, &self.interner)?;

        Ok(asm)
    }

    /// Full pipeline: lex, parse, generate, write the `.asm` file, then
    /// assemble and link it into the configured output executable.
    pub fn compile(&mut self) -> Result<(), DriveError> {
        let asm = self.compile_to_asm()?;

        let asm_path = self.config.asm_path();
        std::fs::write(&asm_path, &asm).map_err(|source| DriveError::WriteOutput {
            path: asm_path.clone(),
            source,
        })?;

        log_phase("assembling");
        let object_path = self.config.object_path();
        run(
            Command::new("nasm")
                .arg("-f")
                .arg("elf64")
                .arg(&asm_path)
                .arg("-o")
                .arg(&object_path),
        )
        .map_err(|source| DriveError::Assemble {
            asm: asm_path.clone(),
            source,
        })?;

        log_phase("linking");
        run(Command::new("ld")
            .arg(&object_path)
            .arg("-o")
            .arg(&self.config.output_file))
        .map_err(|source| DriveError::Link {
            object: object_path.clone(),
            source,
        })?;

        if !self.config.keep_asm {
            let _ = std::fs::remove_file(&asm_path);
        }
        let _ = std::fs::remove_file(&object_path);

        Ok(())
    }
}

/// Spawn `cmd`, waiting for it to exit, and turn a non-zero status or a
/// spawn failure into an error carrying the command's stderr.
fn run(cmd: &mut Command) -> anyhow::Result<()> {
    let output = cmd.output()?;
    if !output.status.success() {
        anyhow::bail!(
            "{}",
            String::from_utf8_lossy(&output.stderr).trim().to_string()
        );
    }
    Ok(())
}

/// The driver's top-level entry point: parse the single positional
/// argument (spec §6.1, no flags), run a `Session`, and report any error
/// to the caller. Never exits the process itself — that is `main`'s job
/// alone, for every error this crate can produce including this one.
pub fn run_cli(mut args: impl Iterator<Item = String>) -> Result<(), DriveError> {
    args.next(); // argv[0]
    let input = args.next().ok_or(DriveError::MissingArgument)?;
    let mut session = Session::new(Config::from_input(PathBuf::from(input)));
    session.compile()
}

/// The path a freshly-built `Config` will write its assembly to, exposed
/// for tests that want to assert on it without duplicating the naming
/// rule.
pub fn asm_path_for(output_file: &Path) -> PathBuf {
    output_file.with_extension("asm")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_source(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("in.ilc");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn compiles_a_simple_return_to_asm() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(&dir, "return(42);");
        let mut session = Session::new(Config::from_input(input));
        let asm = session.compile_to_asm().unwrap();
        assert!(asm.starts_with("global _start\n_start:\n"));
        assert!(asm.contains("mov rax, 42"));
    }

    #[test]
    fn config_derives_output_from_input_stem() {
        let config = Config::from_input(PathBuf::from("/tmp/program.ilc"));
        assert_eq!(config.output_file, PathBuf::from("program"));
        assert_eq!(config.asm_path(), PathBuf::from("program.asm"));
    }

    #[test]
    fn lex_error_propagates_through_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(&dir, "let x = $;");
        let mut session = Session::new(Config::from_input(input));
        let err = session.compile_to_asm().unwrap_err();
        assert!(matches!(err, DriveError::Lex(_)));
    }

    #[test]
    fn parse_error_propagates_through_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(&dir, "return 1;");
        let mut session = Session::new(Config::from_input(input));
        let err = session.compile_to_asm().unwrap_err();
        assert!(matches!(err, DriveError::Parse(_)));
    }

    #[test]
    fn gen_error_propagates_through_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(&dir, "return(y);");
        let mut session = Session::new(Config::from_input(input));
        let err = session.compile_to_asm().unwrap_err();
        assert!(matches!(err, DriveError::Gen(_)));
    }

    #[test]
    fn missing_source_file_is_a_read_error() {
        let mut session = Session::new(Config::from_input(PathBuf::from(
            "/nonexistent/path/does-not-exist.ilc",
        )));
        let err = session.compile_to_asm().unwrap_err();
        assert!(matches!(err, DriveError::ReadSource { .. }));
    }

    #[test]
    fn run_cli_without_an_argument_is_missing_argument_error() {
        let args = vec!["ilc".to_string()].into_iter();
        let err = run_cli(args).unwrap_err();
        assert!(matches!(err, DriveError::MissingArgument));
    }
}
