//! A single `R<n>\t0xHHHHHH` register line.

use crate::error::{ExportError, Result};
use crate::order::{expected_register, BYTES_PER_REGISTER};

/// One register from the export, validated against its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    label: String,
    number: u8,
    digits: String,
    value: u32,
}

impl Register {
    /// Parse the data line at 0-based `index`.
    ///
    /// The line is trimmed first, so exports saved with CRLF line endings
    /// are accepted.
    pub fn parse_line(index: usize, line: &str) -> Result<Self> {
        let line_no = index + 1;
        let mut fields = line.trim().split('\t');
        let (name, value) = match (fields.next(), fields.next(), fields.next()) {
            (Some(name), Some(value), None) => (name, value),
            _ => return Err(ExportError::MalformedLine { line: line_no }),
        };

        let number = parse_name(line_no, name)?;
        let expected =
            expected_register(index).ok_or(ExportError::TooManyRegisters { line: line_no })?;
        if number != expected {
            return Err(ExportError::RegisterOrder {
                line: line_no,
                expected,
                found: number,
            });
        }

        let digits = parse_value(line_no, name, value)?;
        let value = u32::from_str_radix(digits, 16).map_err(|_| ExportError::ValueNotHex {
            line: line_no,
            register: name.to_string(),
        })?;

        Ok(Register {
            label: name.to_string(),
            number,
            digits: digits.to_string(),
            value,
        })
    }

    /// The register name as written in the export, e.g. `R70`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Register address.
    pub fn number(&self) -> u8 {
        self.number
    }

    /// The 24-bit register word.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The six hex digits exactly as they appear in the export.
    pub fn hex_digits(&self) -> &str {
        &self.digits
    }

    /// The word as sent over SPI, most significant byte first.
    pub fn bytes(&self) -> [u8; BYTES_PER_REGISTER] {
        let [_, hi, mid, lo] = self.value.to_be_bytes();
        [hi, mid, lo]
    }

    /// The three source digit pairs, MSB first.
    pub fn digit_pairs(&self) -> impl Iterator<Item = &str> {
        (0..BYTES_PER_REGISTER).map(move |i| &self.digits[i * 2..i * 2 + 2])
    }
}

fn parse_name(line: usize, name: &str) -> Result<u8> {
    if !(2..=3).contains(&name.len()) || !name.starts_with('R') {
        return Err(ExportError::BadRegisterName {
            line,
            name: name.to_string(),
        });
    }

    let suffix = &name[1..];
    if !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExportError::BadRegisterNumber {
            line,
            name: name.to_string(),
        });
    }

    suffix.parse().map_err(|_| ExportError::BadRegisterNumber {
        line,
        name: name.to_string(),
    })
}

fn parse_value<'a>(line: usize, name: &str, value: &'a str) -> Result<&'a str> {
    if value.len() != 2 + BYTES_PER_REGISTER * 2 {
        return Err(ExportError::ValueLength {
            line,
            register: name.to_string(),
            len: value.len(),
        });
    }

    let digits = value.strip_prefix("0x").ok_or_else(|| ExportError::ValuePrefix {
        line,
        register: name.to_string(),
    })?;

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ExportError::ValueNotHex {
            line,
            register: name.to_string(),
        });
    }

    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_first_register() {
        let reg = Register::parse_line(0, "R70\t0xABCDEF").unwrap();
        assert_eq!(reg.label(), "R70");
        assert_eq!(reg.number(), 70);
        assert_eq!(reg.value(), 0xABCDEF);
        assert_eq!(reg.bytes(), [0xAB, 0xCD, 0xEF]);
        assert_eq!(reg.digit_pairs().collect::<Vec<_>>(), ["AB", "CD", "EF"]);
    }

    #[test]
    fn parse_accepts_crlf() {
        let reg = Register::parse_line(45, "R0\t0x00221C\r").unwrap();
        assert_eq!(reg.number(), 0);
        assert_eq!(reg.value(), 0x00221C);
    }

    #[test]
    fn parse_keeps_digit_case() {
        let reg = Register::parse_line(1, "R69\t0x0a1b2c").unwrap();
        assert_eq!(reg.hex_digits(), "0a1b2c");
        assert_eq!(reg.bytes(), [0x0A, 0x1B, 0x2C]);
    }

    #[test]
    fn leading_zero_number_matches() {
        let reg = Register::parse_line(41, "R07\t0x070000").unwrap();
        assert_eq!(reg.number(), 7);
        assert_eq!(reg.label(), "R07");
    }

    #[test]
    fn line_past_register_order_is_rejected() {
        let err = Register::parse_line(46, "R0\t0x000000").unwrap_err();
        assert!(matches!(err, ExportError::TooManyRegisters { line: 47 }));
    }

    #[test]
    fn missing_tab_is_malformed() {
        let err = Register::parse_line(0, "R70 0xABCDEF").unwrap_err();
        assert!(matches!(err, ExportError::MalformedLine { line: 1 }));
    }

    #[test]
    fn extra_field_is_malformed() {
        let err = Register::parse_line(2, "R68\t0x000000\textra").unwrap_err();
        assert!(matches!(err, ExportError::MalformedLine { line: 3 }));
    }

    #[test]
    fn bad_names() {
        for name in ["R", "X70", "R700", "r70"] {
            let err = Register::parse_line(0, &format!("{name}\t0x000000")).unwrap_err();
            assert!(
                matches!(err, ExportError::BadRegisterName { line: 1, .. }),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn non_numeric_suffix() {
        for name in ["R7a", "R-1", "R+"] {
            let err = Register::parse_line(0, &format!("{name}\t0x000000")).unwrap_err();
            assert!(
                matches!(err, ExportError::BadRegisterNumber { line: 1, .. }),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn wrong_register_names_both_numbers() {
        let err = Register::parse_line(3, "R65\t0x000000").unwrap_err();
        match err {
            ExportError::RegisterOrder {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 4);
                assert_eq!(expected, 64);
                assert_eq!(found, 65);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn value_length_checked_both_ways() {
        for value in ["0x12345", "0x1234567", "0x", "12"] {
            let err = Register::parse_line(0, &format!("R70\t{value}")).unwrap_err();
            assert!(
                matches!(err, ExportError::ValueLength { line: 1, .. }),
                "{value}: {err}"
            );
        }
    }

    #[test]
    fn value_requires_prefix() {
        let err = Register::parse_line(0, "R70\t00ABCDEF").unwrap_err();
        assert!(matches!(err, ExportError::ValuePrefix { line: 1, .. }));

        let err = Register::parse_line(0, "R70\t0XABCDEF").unwrap_err();
        assert!(matches!(err, ExportError::ValuePrefix { .. }));
    }

    #[test]
    fn value_requires_hex_digits() {
        let err = Register::parse_line(0, "R70\t0xABCDEG").unwrap_err();
        assert!(matches!(err, ExportError::ValueNotHex { line: 1, .. }));

        let err = Register::parse_line(0, "R70\t0x+12345").unwrap_err();
        assert!(matches!(err, ExportError::ValueNotHex { .. }));
    }
}
