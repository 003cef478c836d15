//! The generated C header.
//!
//! The companion program includes this header with `--include`, calls
//! `do_first()` on start-up and streams `d` to the SPI device.

use std::path::Path;

/// Everything before the byte array.
const PROLOGUE_HEAD: &str = r#"#include <stdio.h>
#include <stdlib.h>
#include <errno.h>
#include <fcntl.h>
#include <unistd.h>
#include <string.h>

extern int errno;

inline static void do_first(void)
{
	printf("Compiled at %s %s\n", __DATE__, __TIME__);
"#;

const PROLOGUE_TAIL: &str = "}\n\n";

/// Build the header: includes, `do_first()` naming `source`, then `array`.
///
/// `source` should already be absolute; it is embedded verbatim apart from
/// C string escaping.
pub fn compose_header(source: &Path, array: &str) -> String {
    let source = c_escape(&source.to_string_lossy());
    let mut header = String::with_capacity(PROLOGUE_HEAD.len() + array.len() + source.len() + 64);
    header.push_str(PROLOGUE_HEAD);
    header.push_str(&format!(
        "\tprintf(\"LMX2582 registers source: %s\\n\", \"{source}\");\n"
    ));
    header.push_str(PROLOGUE_TAIL);
    header.push_str(array);
    header
}

/// Escape text for a C string literal.
fn c_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}
