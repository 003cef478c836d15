//! Build errors.

use std::path::PathBuf;
use std::process::ExitStatus;

use spi2pll_export::ExportError;

/// Errors that can occur while generating the header or compiling.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Neither the one- nor the three-argument form was used.
    #[error("bad usage: expected 1 or 3 arguments, got {count}")]
    Usage {
        /// Positional arguments given.
        count: usize,
    },

    /// The export path has no file name to derive outputs from.
    #[error("{} does not name a file", path.display())]
    NoFileName {
        /// The export path as given.
        path: PathBuf,
    },

    /// An output path exists but is not a directory.
    #[error("{} exists but it's not a directory", path.display())]
    NotADirectory {
        /// The output path.
        path: PathBuf,
    },

    /// An output directory could not be created.
    #[error("mkdir {} failed: {source}", path.display())]
    CreateDir {
        /// The directory that was being created.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export path could not be made absolute.
    #[error("cannot resolve {}: {source}", path.display())]
    ResolveInput {
        /// The export path as given.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export file failed to load or validate.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// The header could not be created or written.
    #[error("header {} write error: {source}", path.display())]
    WriteHeader {
        /// The header path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fewer bytes than expected reached the header file.
    #[error("header {} write error: wrote {written} of {expected} bytes", path.display())]
    ShortWrite {
        /// The header path.
        path: PathBuf,
        /// Bytes the write call reported.
        written: usize,
        /// Length of the composed header.
        expected: usize,
    },

    /// The compiler flags have an unterminated quote or trailing escape.
    #[error("cannot split compiler flags {flags:?}: unbalanced quoting")]
    BadCompilerFlags {
        /// The flags string as configured.
        flags: String,
    },

    /// The configured compiler is missing or the current user may not run it.
    #[error("compiler {} not found or is not executable", path.display())]
    CompilerNotExecutable {
        /// The configured compiler.
        path: PathBuf,
    },

    /// The compiler process could not be started.
    #[error("failed to launch compiler {}: {source}", path.display())]
    CompilerLaunch {
        /// The configured compiler.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compiler ran and reported failure.
    #[error("compiler error: {} exited with {status}", path.display())]
    CompilerFailed {
        /// The configured compiler.
        path: PathBuf,
        /// Exit status of the compiler process.
        status: ExitStatus,
    },
}

/// Result type alias for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;
