//! End-to-end build: export file in, compiled SPI writer out.

use std::path::PathBuf;

use log::{debug, info};
use spi2pll_export::RegisterExport;

use crate::compiler::{check_executable, invoke_compiler};
use crate::config::BuildConfig;
use crate::error::{BuildError, Result};
use crate::header::compose_header;
use crate::stage::{ensure_output_dirs, write_header};

/// Artifacts of a successful run.
#[derive(Debug)]
pub struct BuildOutcome {
    pub header: PathBuf,
    pub program: PathBuf,
    pub export: RegisterExport,
}

/// Run the whole build.
///
/// Stages, in order:
/// 1. Create the output directories.
/// 2. Load and fully validate the export (nothing is written on failure).
/// 3. Compose and write the header.
/// 4. Check the compiler is executable.
/// 5. Compile the companion source against the header.
///
/// The first failure aborts the run. A header written in stage 3 stays in
/// place when a later stage fails.
pub fn run(config: &BuildConfig) -> Result<BuildOutcome> {
    ensure_output_dirs(&config.layout)?;

    debug!("loading {}", config.export_file.display());
    let export = RegisterExport::load(&config.export_file)?;
    let source = config
        .export_file
        .canonicalize()
        .map_err(|source| BuildError::ResolveInput {
            path: config.export_file.clone(),
            source,
        })?;
    debug!("validated {} registers from {}", export.len(), source.display());

    let header_path = config.header_path();
    let header = compose_header(&source, &export.to_c_array());
    write_header(&header_path, &header)?;
    info!("generated {}", header_path.display());

    check_executable(&config.compiler.path)?;
    invoke_compiler(config)?;

    Ok(BuildOutcome {
        header: header_path,
        program: config.program_path(),
        export,
    })
}
