//! `spi2pll.toml` project configuration.
//!
//! Every key is optional. Positional arguments on the command line win over
//! the file, and the file wins over the built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use spi2pll_build::{CompilerSettings, OutputLayout};

/// File name searched for when `--config` is not given.
pub const SETTINGS_FILE: &str = "spi2pll.toml";

/// The top-level configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Default compiler for the one-argument form.
    #[serde(default)]
    pub compiler: Option<CompilerSection>,
    /// Output naming.
    #[serde(default)]
    pub output: Option<OutputSection>,
}

/// `[compiler]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerSection {
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Whitespace-separated compiler flags.
    #[serde(default)]
    pub flags: Option<String>,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default)]
    pub program_prefix: Option<String>,
    /// SPI writer source, relative to the working directory.
    #[serde(default)]
    pub companion_source: Option<PathBuf>,
}

impl Settings {
    /// Search upward from `start_dir` for `spi2pll.toml`, parse and return it
    /// along with the path it was loaded from.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(SETTINGS_FILE);
            if candidate.is_file() {
                let settings = Self::load(&candidate)?;
                return Ok(Some((settings, candidate)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a specific settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load `explicit` if given, otherwise whatever `find_and_load` finds.
    pub fn resolve(explicit: Option<&Path>, start_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            log::debug!("using settings from {}", path.display());
            return Self::load(path);
        }
        match Self::find_and_load(start_dir)? {
            Some((settings, path)) => {
                log::debug!("using settings from {}", path.display());
                Ok(settings)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse settings from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing spi2pll.toml")
    }

    /// Compiler used by the one-argument form.
    pub fn compiler_defaults(&self) -> CompilerSettings {
        let mut settings = CompilerSettings::default();
        if let Some(section) = &self.compiler {
            if let Some(path) = &section.path {
                settings.path = path.clone();
            }
            if let Some(flags) = &section.flags {
                settings.flags = flags.clone();
            }
        }
        settings
    }

    /// Apply `[output]` overrides to `layout`.
    pub fn apply_layout(&self, mut layout: OutputLayout) -> OutputLayout {
        if let Some(section) = &self.output {
            if let Some(prefix) = &section.program_prefix {
                layout.program_prefix = prefix.clone();
            }
            if let Some(source) = &section.companion_source {
                layout.companion_source = source.clone();
            }
        }
        layout
    }
}
