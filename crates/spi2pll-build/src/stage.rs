//! Output directories and header file writing.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::config::OutputLayout;
use crate::error::{BuildError, Result};

/// Make sure `path` is a directory, creating it (owner-only) if absent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            return Err(BuildError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        return Ok(());
    }

    debug!("creating {}", path.display());
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(path).map_err(|source| BuildError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Create the header and binary directories of `layout`.
pub fn ensure_output_dirs(layout: &OutputLayout) -> Result<()> {
    ensure_dir(&layout.headers_dir)?;
    ensure_dir(&layout.binaries_dir)
}

/// Write the header in a single `write` call.
///
/// A short write is an error and the truncated file is removed so a later
/// compile cannot pick it up.
pub fn write_header(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source| BuildError::WriteHeader {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_err)?;
    let written = file.write(contents.as_bytes()).map_err(write_err)?;
    drop(file);

    if written != contents.len() {
        let _ = fs::remove_file(path);
        return Err(BuildError::ShortWrite {
            path: path.to_path_buf(),
            written,
            expected: contents.len(),
        });
    }

    debug!("wrote {written} bytes to {}", path.display());
    Ok(())
}
