//! Build orchestration for the LMX2582 SPI writer.
//!
//! Turns a validated register export into a C header and compiles the
//! companion `spi2pll_lxm2582.c` program against it with an external
//! (usually cross) compiler.
//!
//! ## Modules
//!
//! - [`config`] — Compiler settings, output layout and the per-run config
//! - [`stage`] — Output directory creation and header writing
//! - [`header`] — Generated header text
//! - [`compiler`] — External compiler checks and invocation
//! - [`pipeline`] — The end-to-end run

pub mod compiler;
pub mod config;
pub mod error;
pub mod header;
pub mod pipeline;
pub mod stage;

pub use config::{BuildConfig, CompilerSettings, OutputLayout};
pub use error::{BuildError, Result};
pub use pipeline::{run, BuildOutcome};
