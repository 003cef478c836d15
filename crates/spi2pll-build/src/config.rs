//! Per-run configuration.
//!
//! Everything the build needs is resolved once, up front, into a
//! [`BuildConfig`] and passed down explicitly.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

/// Compiler used when none is given on the command line.
pub const DEFAULT_COMPILER: &str =
    "/usr/lib/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/bin/aarch64-linux-android24-clang";

/// Flags used with [`DEFAULT_COMPILER`].
pub const DEFAULT_COMPILER_FLAGS: &str = "--sysroot=/usr/lib/android-ndk/toolchains/llvm/prebuilt/linux-x86_64/sysroot -Wall --extra-warnings -pedantic -Werror";

/// Prefix of every compiled program name. Rigol spells the chip "lxm2582".
pub const DEFAULT_PROGRAM_PREFIX: &str = "spi2pll_lxm2582_";

/// The SPI writer source, relative to the working directory.
pub const DEFAULT_COMPANION_SOURCE: &str = "src/spi2pll_lxm2582.c";

/// Directory for generated headers, under the working directory.
pub const HEADERS_DIR: &str = "generated";

/// Directory for compiled programs, under the working directory.
pub const BINARIES_DIR: &str = "compiled";

/// Which compiler to run and with what flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerSettings {
    pub path: PathBuf,
    /// Shell-quoted flags, passed before the generated arguments.
    pub flags: String,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        CompilerSettings {
            path: PathBuf::from(DEFAULT_COMPILER),
            flags: DEFAULT_COMPILER_FLAGS.to_string(),
        }
    }
}

impl CompilerSettings {
    /// The flags split into arguments with POSIX shell quoting rules.
    ///
    /// No shell is involved, so there is no expansion or globbing.
    pub fn flag_args(&self) -> Result<Vec<String>> {
        shlex::split(&self.flags).ok_or_else(|| BuildError::BadCompilerFlags {
            flags: self.flags.clone(),
        })
    }
}

/// Where outputs go and where the companion source is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Working directory the compiler runs in.
    pub root: PathBuf,
    pub headers_dir: PathBuf,
    pub binaries_dir: PathBuf,
    pub program_prefix: String,
    /// Relative paths resolve against `root`.
    pub companion_source: PathBuf,
}

impl OutputLayout {
    /// The standard layout rooted at `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        OutputLayout {
            root: dir.to_path_buf(),
            headers_dir: dir.join(HEADERS_DIR),
            binaries_dir: dir.join(BINARIES_DIR),
            program_prefix: DEFAULT_PROGRAM_PREFIX.to_string(),
            companion_source: PathBuf::from(DEFAULT_COMPANION_SOURCE),
        }
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub compiler: CompilerSettings,
    pub export_file: PathBuf,
    pub layout: OutputLayout,
    file_name: OsString,
}

impl BuildConfig {
    pub fn new(
        compiler: CompilerSettings,
        export_file: PathBuf,
        layout: OutputLayout,
    ) -> Result<Self> {
        let file_name = export_file
            .file_name()
            .ok_or_else(|| BuildError::NoFileName {
                path: export_file.clone(),
            })?
            .to_os_string();

        Ok(BuildConfig {
            compiler,
            export_file,
            layout,
            file_name,
        })
    }

    /// Resolve the positional command-line arguments.
    ///
    /// - `<export_file>` uses `defaults` for the compiler.
    /// - `<compiler_path> <compiler_flags> <export_file>` overrides both.
    pub fn from_positionals(
        args: &[OsString],
        defaults: CompilerSettings,
        layout: OutputLayout,
    ) -> Result<Self> {
        match args {
            [export] => Self::new(defaults, PathBuf::from(export), layout),
            [compiler, flags, export] => {
                let compiler = CompilerSettings {
                    path: PathBuf::from(compiler),
                    flags: flags.to_string_lossy().into_owned(),
                };
                Self::new(compiler, PathBuf::from(export), layout)
            }
            _ => Err(BuildError::Usage { count: args.len() }),
        }
    }

    /// `<headers_dir>/<export file name>.h`
    pub fn header_path(&self) -> PathBuf {
        let mut name = self.file_name.clone();
        name.push(".h");
        self.layout.headers_dir.join(name)
    }

    /// `<binaries_dir>/<prefix><export file name without .txt>`
    pub fn program_path(&self) -> PathBuf {
        let mut name = OsString::from(&self.layout.program_prefix);
        name.push(strip_txt(&self.file_name));
        self.layout.binaries_dir.join(name)
    }
}

/// Drop a `.txt` suffix unless it is the whole name.
fn strip_txt(name: &OsStr) -> &OsStr {
    match name.to_str().and_then(|s| s.strip_suffix(".txt")) {
        Some(stem) if !stem.is_empty() => OsStr::new(stem),
        _ => name,
    }
}
