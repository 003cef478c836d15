//! The complete register export.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{ExportError, Result};
use crate::order::{BYTE_COUNT, EXPORT_LINE_COUNT, REGISTER_COUNT};
use crate::register::Register;

/// Declaration that opens the generated byte array.
pub const ARRAY_PROLOGUE: &str = "char d[] = {\n";

/// Closes the generated byte array.
pub const ARRAY_EPILOGUE: &str = "};\n";

/// A validated TICS Pro export: all 46 registers in reference order.
///
/// Construction either succeeds for the whole file or fails on the first
/// bad line; there is no partially parsed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterExport {
    registers: Vec<Register>,
}

impl RegisterExport {
    /// Read and validate an export file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ExportError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if text.trim().is_empty() {
            return Err(ExportError::Empty {
                path: path.to_path_buf(),
            });
        }

        Self::parse(&text)
    }

    /// Validate export text.
    ///
    /// The text must be exactly 46 register lines each terminated by a
    /// newline, i.e. 47 newline-separated segments with an empty last one.
    /// Checks run in file order and stop at the first failure.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.split('\n').collect();
        if lines.len() != EXPORT_LINE_COUNT {
            return Err(ExportError::LineCount { found: lines.len() });
        }

        let mut registers = Vec::with_capacity(REGISTER_COUNT);
        for (index, line) in lines.iter().enumerate() {
            if index == REGISTER_COUNT {
                if !line.trim().is_empty() {
                    return Err(ExportError::TrailingLineNotEmpty);
                }
                break;
            }
            registers.push(Register::parse_line(index, line)?);
        }

        Ok(RegisterExport { registers })
    }

    /// Registers in file order.
    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Register> {
        self.registers.iter()
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Look up a register by address.
    pub fn get(&self, number: u8) -> Option<&Register> {
        self.registers.iter().find(|r| r.number() == number)
    }

    /// The byte stream sent to the chip: 3 bytes per register, file order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(BYTE_COUNT);
        for reg in &self.registers {
            bytes.extend_from_slice(&reg.bytes());
        }
        bytes
    }

    /// Render the export as a C `char` array literal.
    ///
    /// One row per register, annotated with the register name. Digits keep
    /// the case they had in the export.
    pub fn to_c_array(&self) -> String {
        let mut out = String::from(ARRAY_PROLOGUE);
        let last = self.registers.len().saturating_sub(1);

        for (index, reg) in self.registers.iter().enumerate() {
            let row = reg
                .digit_pairs()
                .map(|pair| format!("0x{pair}"))
                .collect::<Vec<_>>()
                .join(", ");
            let separator = if index == last { "" } else { "," };
            // Writing to a String cannot fail.
            let _ = writeln!(out, "\t{row}{separator}\t// {}", reg.label());
        }

        out.push_str(ARRAY_EPILOGUE);
        out
    }
}

impl<'a> IntoIterator for &'a RegisterExport {
    type Item = &'a Register;
    type IntoIter = std::slice::Iter<'a, Register>;

    fn into_iter(self) -> Self::IntoIter {
        self.registers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::REGISTER_ORDER;

    /// A well-formed export whose register `n` holds `n` in every byte,
    /// except R70 which holds `0xABCDEF`.
    fn sample_export() -> String {
        let mut text = String::new();
        for number in REGISTER_ORDER {
            if number == 70 {
                text.push_str("R70\t0xABCDEF\n");
            } else {
                text.push_str(&format!("R{number}\t0x{number:02X}{number:02X}{number:02X}\n"));
            }
        }
        text
    }

    #[test]
    fn parse_sample() {
        let export = RegisterExport::parse(&sample_export()).unwrap();
        assert_eq!(export.len(), REGISTER_COUNT);
        assert_eq!(export.registers()[0].number(), 70);
        assert_eq!(export.get(48).unwrap().value(), 0x303030);
        assert!(export.get(3).is_none());
    }

    #[test]
    fn bytes_follow_source_order() {
        let export = RegisterExport::parse(&sample_export()).unwrap();
        let bytes = export.to_bytes();
        assert_eq!(bytes.len(), BYTE_COUNT);
        assert_eq!(&bytes[..3], &[0xAB, 0xCD, 0xEF]);
        assert_eq!(&bytes[3..6], &[69, 69, 69]);
        assert_eq!(&bytes[BYTE_COUNT - 3..], &[0, 0, 0]);
    }

    #[test]
    fn c_array_layout() {
        let export = RegisterExport::parse(&sample_export()).unwrap();
        let array = export.to_c_array();
        let lines: Vec<&str> = array.lines().collect();

        assert_eq!(lines.len(), REGISTER_COUNT + 2);
        assert_eq!(lines[0], "char d[] = {");
        assert_eq!(lines[1], "\t0xAB, 0xCD, 0xEF,\t// R70");
        assert_eq!(lines[2], "\t0x45, 0x45, 0x45,\t// R69");
        assert_eq!(lines[REGISTER_COUNT], "\t0x00, 0x00, 0x00\t// R0");
        assert_eq!(lines[REGISTER_COUNT + 1], "};");
        assert!(array.ends_with("};\n"));
        assert_eq!(array.matches("0x").count(), BYTE_COUNT);
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = RegisterExport::parse(&sample_export()).unwrap().to_c_array();
        let b = RegisterExport::parse(&sample_export()).unwrap().to_c_array();
        assert_eq!(a, b);
    }

    #[test]
    fn crlf_export_is_accepted() {
        let text = sample_export().replace('\n', "\r\n");
        let export = RegisterExport::parse(&text).unwrap();
        let lf = RegisterExport::parse(&sample_export()).unwrap();
        assert_eq!(export.to_c_array(), lf.to_c_array());
    }

    #[test]
    fn missing_trailing_newline_is_rejected() {
        let text = sample_export();
        let err = RegisterExport::parse(text.trim_end()).unwrap_err();
        assert!(matches!(err, ExportError::LineCount { found: 46 }));
    }

    #[test]
    fn extra_line_is_rejected() {
        let text = format!("{}\n", sample_export());
        let err = RegisterExport::parse(&text).unwrap_err();
        assert!(matches!(err, ExportError::LineCount { found: 48 }));
    }

    #[test]
    fn line_count_checked_before_content() {
        let err = RegisterExport::parse("garbage\nmore garbage\n").unwrap_err();
        assert!(matches!(err, ExportError::LineCount { found: 3 }));
    }

    #[test]
    fn trailing_line_with_data_is_rejected() {
        let text = format!("{}R0\t0x000000", sample_export());
        let err = RegisterExport::parse(&text).unwrap_err();
        assert!(matches!(err, ExportError::TrailingLineNotEmpty));
    }

    #[test]
    fn whitespace_trailing_line_is_accepted() {
        let text = format!("{}  ", sample_export());
        assert!(RegisterExport::parse(&text).is_ok());
    }

    #[test]
    fn first_error_wins() {
        let text = sample_export()
            .replace("R45\t0x2D2D2D", "R45\t0x2D2D")
            .replace("R30\t0x1E1E1E", "R31\t0x1E1E1E");
        let err = RegisterExport::parse(&text).unwrap_err();
        assert!(matches!(err, ExportError::ValueLength { line: 11, .. }));
    }

    #[test]
    fn swapped_registers_are_rejected() {
        let text = sample_export().replace(
            "R2\t0x020202\nR1\t0x010101",
            "R1\t0x010101\nR2\t0x020202",
        );
        let err = RegisterExport::parse(&text).unwrap_err();
        assert!(matches!(
            err,
            ExportError::RegisterOrder {
                line: 44,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn load_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, " \n\t\n").unwrap();
        let err = RegisterExport::load(&path).unwrap_err();
        assert!(matches!(err, ExportError::Empty { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = RegisterExport::load(&path).unwrap_err();
        assert!(matches!(err, ExportError::Read { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn load_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("HexRegisterValues.txt");
        std::fs::write(&path, sample_export()).unwrap();
        let export = RegisterExport::load(&path).unwrap();
        assert_eq!(export.iter().count(), REGISTER_COUNT);
    }
}
