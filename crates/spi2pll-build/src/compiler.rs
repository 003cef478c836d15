//! External compiler checks and invocation.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::Command;

use log::{debug, info};

use crate::config::BuildConfig;
use crate::error::{BuildError, Result};

/// Whether `path` is a regular file the current user may execute.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    if !fs::metadata(path).map(|m| m.is_file()).unwrap_or(false) {
        return false;
    }
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `c_path` is NUL-terminated and outlives the call.
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}

/// Whether `path` is a regular file.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Fail unless the compiler can be run.
pub fn check_executable(path: &Path) -> Result<()> {
    if is_executable(path) {
        Ok(())
    } else {
        Err(BuildError::CompilerNotExecutable {
            path: path.to_path_buf(),
        })
    }
}

/// The compiler command line:
/// `<compiler> <flags...> --include=<header> <companion source> -o <program>`.
///
/// The command runs in the layout root so a relative companion source
/// resolves the same way it does from the shell.
pub fn compiler_command(config: &BuildConfig) -> Result<Command> {
    let flags = config.compiler.flag_args()?;

    let mut include = OsString::from("--include=");
    include.push(config.header_path());

    let mut command = Command::new(&config.compiler.path);
    command
        .current_dir(&config.layout.root)
        .args(flags)
        .arg(include)
        .arg(&config.layout.companion_source)
        .arg("-o")
        .arg(config.program_path());
    Ok(command)
}

/// Run the compiler and wait for it. Its output goes straight to the terminal.
pub fn invoke_compiler(config: &BuildConfig) -> Result<()> {
    let mut command = compiler_command(config)?;
    debug!("running {command:?}");

    let status = command.status().map_err(|source| BuildError::CompilerLaunch {
        path: config.compiler.path.clone(),
        source,
    })?;

    if !status.success() {
        return Err(BuildError::CompilerFailed {
            path: config.compiler.path.clone(),
            status,
        });
    }

    info!("compiled {}", config.program_path().display());
    Ok(())
}
