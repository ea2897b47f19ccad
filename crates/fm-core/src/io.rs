//! Fire document input and output.
//!
//! Documents are read from a file or stdin (`-` or no path) and written as
//! pretty JSON to a file or stdout.

use std::io::{Read, Write};
use std::path::Path;

use fm_common::{FireDocument, Result};

/// Parse a document from a JSON string.
pub fn parse_document(json: &str) -> Result<FireDocument> {
    Ok(serde_json::from_str(json)?)
}

/// Read a document from `path`, or stdin for `None` / `-`.
pub fn read_document(path: Option<&Path>) -> Result<FireDocument> {
    let mut content = String::new();
    match path {
        Some(p) if p != Path::new("-") => {
            content = std::fs::read_to_string(p)?;
        }
        _ => {
            std::io::stdin().read_to_string(&mut content)?;
        }
    }
    parse_document(&content)
}

/// Serialize a document as pretty JSON with a trailing newline.
pub fn render_document(doc: &FireDocument) -> Result<String> {
    let mut out = serde_json::to_string_pretty(doc)?;
    out.push('\n');
    Ok(out)
}

/// Write a payload to `path`, or stdout for `None` / `-`.
pub fn write_output(path: Option<&Path>, payload: &str) -> Result<()> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::write(p, payload)?,
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(payload.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
