//! Export validation errors.

use std::path::PathBuf;

/// Errors raised while reading or validating a register export.
///
/// Line numbers are 1-based, matching what an editor shows.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The export file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The export file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export contains nothing but whitespace.
    #[error("file {} appears to be empty", path.display())]
    Empty {
        /// The export file.
        path: PathBuf,
    },

    /// Wrong number of newline-separated segments.
    #[error(
        "bad data: input should have 46 lines (46 registers) and an empty line at the end, found {found} segments"
    )]
    LineCount {
        /// Segments produced by splitting on `\n`.
        found: usize,
    },

    /// The mandatory trailing line carries data.
    #[error("bad data: last line is not empty")]
    TrailingLineNotEmpty,

    /// A data line was given past the end of the register order.
    #[error("too many registers: line {line} has no place in the register order")]
    TooManyRegisters {
        /// The offending line.
        line: usize,
    },

    /// A data line does not split into exactly two tab-separated fields.
    #[error("bad data in line {line}: expected register name and value separated by a tab")]
    MalformedLine {
        /// The offending line.
        line: usize,
    },

    /// The register name is not `R` followed by one or two characters.
    #[error("register name in line {line} appears to be bad: {name:?}")]
    BadRegisterName {
        /// The offending line.
        line: usize,
        /// The name field as written.
        name: String,
    },

    /// The register name suffix is not a 1-2 digit number.
    #[error("bad register number in line {line}: {name:?}")]
    BadRegisterNumber {
        /// The offending line.
        line: usize,
        /// The name field as written.
        name: String,
    },

    /// The register number differs from the reference order at this line.
    #[error("expected register number {expected} in line {line}, but there was {found}")]
    RegisterOrder {
        /// The offending line.
        line: usize,
        /// Register number the order requires here.
        expected: u8,
        /// Register number found in the export.
        found: u8,
    },

    /// The value field is not 8 characters long.
    #[error("bad register data for {register} (line {line}): it should have 8 chars, found {len}")]
    ValueLength {
        /// The offending line.
        line: usize,
        /// Register name as written.
        register: String,
        /// Length of the value field in bytes.
        len: usize,
    },

    /// The value field does not start with `0x`.
    #[error("register data for {register} (line {line}) should be hexadecimal and start with 0x")]
    ValuePrefix {
        /// The offending line.
        line: usize,
        /// Register name as written.
        register: String,
    },

    /// The six value digits are not all hexadecimal.
    #[error("register data for {register} (line {line}) doesn't look like a hex number")]
    ValueNotHex {
        /// The offending line.
        line: usize,
        /// Register name as written.
        register: String,
    },
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
