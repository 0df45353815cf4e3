//
//  sysdig-client
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`write_json`] | Pretty-printed JSON on stdout |
//! | [`write_json_to`] | Pretty-printed JSON on any writer, e.g. a dump file |

use serde::Serialize;
use std::io::Write;

/// Writes a value as pretty-printed JSON to stdout.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Writes a value as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or the writer fails.
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_to_buffer() {
        let mut buffer = Vec::new();
        write_json_to(&mut buffer, &serde_json::json!({"name": "pd"})).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "{\n  \"name\": \"pd\"\n}\n");
    }
}
