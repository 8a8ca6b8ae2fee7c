//! Attribute values and the aligned, truncated attribute text block
//!
//! Every node of a container and every flat binary file carries a flat
//! key/value metadata mapping. This module defines that mapping and renders it
//! as the two-column block used throughout the reports.

use std::collections::HashMap;
use std::fmt;

/// Number of attributes displayed per node by default
pub const DEFAULT_MAX_META_NUM: usize = 200;

/// Number of attributes displayed per node with `--compact`
pub const COMPACT_MAX_META_NUM: usize = 20;

/// Marker appended when a block is cut at its budget
pub const TRUNCATION_MARKER: &str = "  ...\n";

/// A single attribute value as read from a container or a sidecar file
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    /// Byte string, decoded as UTF-8 when rendered
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
    Bool(bool),
    Array(Vec<AttrValue>),
    /// Value of a type with no text form, carrying the type name
    Opaque(String),
}

/// Flat key/value metadata of one node or file
pub type MetadataMap = HashMap<String, AttrValue>;

impl AttrValue {
    /// Text form of the value.
    ///
    /// Byte strings that are not valid UTF-8 yield `Err` holding their raw
    /// `b'...'` rendering, so callers can keep the raw value and move on.
    pub fn decode(&self) -> std::result::Result<String, String> {
        match self {
            AttrValue::Str(s) => Ok(s.clone()),
            AttrValue::Bytes(bytes) => {
                String::from_utf8(bytes.clone()).map_err(|_| raw_bytes(bytes))
            }
            AttrValue::Int(i) => Ok(i.to_string()),
            AttrValue::Float(f) => Ok(format_float(*f)),
            AttrValue::Bool(b) => Ok(if *b { "True" } else { "False" }.to_string()),
            AttrValue::Array(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                Ok(format!("[{}]", parts.join(" ")))
            }
            AttrValue::Opaque(type_name) => Ok(format!("<{}>", type_name)),
        }
    }

    /// Returns the value as text when it is a string or a decodable byte string.
    pub fn as_text(&self) -> Option<String> {
        match self {
            AttrValue::Str(_) | AttrValue::Bytes(_) => self.decode().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            Ok(text) => f.write_str(&text),
            Err(raw) => f.write_str(&raw),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn raw_bytes(bytes: &[u8]) -> String {
    let escaped: String = bytes
        .iter()
        .flat_map(|&b| std::ascii::escape_default(b))
        .map(char::from)
        .collect();
    format!("b'{}'", escaped)
}

/// Renders attributes sorted by key, one aligned line each, stopping after
/// `max_entries` lines with a single truncation marker.
///
/// An empty map renders as the empty string.
pub fn format_attributes(attrs: &MetadataMap, max_entries: usize) -> String {
    let width = attrs.keys().map(|k| k.chars().count()).max().unwrap_or(0);

    let mut entries: Vec<(&String, &AttrValue)> = attrs.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::new();
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i >= max_entries {
            out.push_str(TRUNCATION_MARKER);
            break;
        }

        let text = match value.decode() {
            Ok(text) => text,
            Err(raw) => {
                log::warn!("Attribute '{}' is not valid UTF-8, showing raw bytes", key);
                raw
            }
        };
        out.push_str(&format!("  {:<width$}    {}\n", key, text, width = width));
    }
    out
}

/// Prints an attribute block followed by a blank line.
pub fn print_attributes(attrs: &MetadataMap, max_entries: usize) {
    println!("{}", format_attributes(attrs, max_entries));
}
