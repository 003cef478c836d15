//! Register layout of a TICS Pro LMX2582 export.
//!
//! TICS Pro only exports the registers that carry configuration, highest
//! address first. The writer program streams them to the chip in file order,
//! so the order is part of the contract and every export is checked against
//! it position by position.

/// Number of registers in an export.
pub const REGISTER_COUNT: usize = 46;

/// Each register is a 24-bit word sent MSB first.
pub const BYTES_PER_REGISTER: usize = 3;

/// Size of the generated byte array.
pub const BYTE_COUNT: usize = REGISTER_COUNT * BYTES_PER_REGISTER;

/// Register lines plus the trailing empty line.
pub const EXPORT_LINE_COUNT: usize = REGISTER_COUNT + 1;

/// Register numbers in the order TICS Pro writes them.
pub const REGISTER_ORDER: [u8; REGISTER_COUNT] = [
    70, 69, 68, 64, 62, 61, 59, 48, 47, 46, 45, 44, 43, 42, 41, 40, 39, 38, 37, 36, 35, 34, 33,
    32, 31, 30, 29, 28, 25, 24, 23, 22, 20, 19, 14, 13, 12, 11, 10, 9, 8, 7, 4, 2, 1, 0,
];

/// The register number expected at a 0-based data line index.
pub fn expected_register(index: usize) -> Option<u8> {
    REGISTER_ORDER.get(index).copied()
}
