//! Register export parsing for the LMX2582 PLL synthesizer.
//!
//! TICS Pro writes the chip configuration as a tab-separated text dump, one
//! register per line. This crate validates that dump against the fixed
//! register layout and turns it into the byte array that the SPI writer
//! program embeds.
//!
//! ## Modules
//!
//! - [`order`] — The register order TICS Pro uses for LMX2582 exports
//! - [`register`] — A single register line
//! - [`export`] — The complete validated export and its C rendering
//! - [`error`] — Validation errors

pub mod error;
pub mod export;
pub mod order;
pub mod register;

pub use error::{ExportError, Result};
pub use export::RegisterExport;
pub use order::{BYTES_PER_REGISTER, BYTE_COUNT, EXPORT_LINE_COUNT, REGISTER_COUNT, REGISTER_ORDER};
pub use register::Register;
