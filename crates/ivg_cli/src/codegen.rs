//! Rust module generation for converted icons

use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Write;

const BYTES_PER_LINE: usize = 12;

/// A converted icon
#[derive(Debug)]
pub struct Icon {
    /// Constant name
    pub name: String,
    /// Source file, as shown in the generated docs
    pub source: String,
    pub bytes: Vec<u8>,
}

/// Constant name for a prefix and file stem: `ic-home` becomes `IC_HOME`
///
/// Runs of characters that are not ASCII alphanumeric collapse to one
/// underscore. A name that would start with a digit gets a leading `_`.
pub fn const_name(prefix: &str, stem: &str) -> String {
    let mut name = String::with_capacity(prefix.len() + stem.len());

    let mut pending_sep = false;
    for c in prefix.chars().chain(stem.chars()) {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !name.is_empty() && !name.ends_with('_') {
                name.push('_');
            }
            pending_sep = false;
            name.push(c.to_ascii_uppercase());
        } else {
            pending_sep = true;
        }
    }

    match name.chars().next() {
        None => "_".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{name}"),
        Some(_) => name,
    }
}

/// Fail if two icons map to the same constant
pub fn check_unique(icons: &[Icon]) -> Result<()> {
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    for icon in icons {
        if let Some(previous) = seen.insert(&icon.name, &icon.source) {
            anyhow::bail!(
                "{} and {} both map to the constant {}",
                previous,
                icon.source,
                icon.name
            );
        }
    }
    Ok(())
}

/// Render icons as a Rust module of byte-slice constants
pub fn render_module(icons: &[Icon]) -> String {
    let mut out = String::new();
    out.push_str("//! Generated IconVG icon constants\n");
    out.push_str("//!\n");
    out.push_str("//! Auto-generated by svg2ivg - DO NOT EDIT\n");

    for icon in icons {
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "\n/// {}\npub const {}: &[u8] = &[\n",
            icon.source, icon.name
        );
        for line in icon.bytes.chunks(BYTES_PER_LINE) {
            out.push_str("   ");
            for byte in line {
                let _ = write!(out, " 0x{byte:02x},");
            }
            out.push('\n');
        }
        out.push_str("];\n");
    }
    out
}
