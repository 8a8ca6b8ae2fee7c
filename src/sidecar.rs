//! Sidecar metadata of flat binary rasters
//!
//! Flat binary files carry no metadata of their own; it lives in a text file
//! next to them. Supported layouts:
//!
//! - ROI_PAC `.rsc`: `KEY   value` lines
//! - ISCE `.xml`: `<property name="..."><value>...</value></property>` elements
//! - ENVI `.hdr`: `key = value` lines, braces may span several lines
//! - GAMMA `.par`: `key: value` lines

use crate::attributes::{AttrValue, MetadataMap};
use crate::errors::{InfoError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Layout of a sidecar metadata file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidecarFormat {
    RoiPac,
    Isce,
    Envi,
    Gamma,
}

impl SidecarFormat {
    pub fn parse(self, text: &str) -> Result<MetadataMap> {
        match self {
            SidecarFormat::RoiPac => Ok(parse_rsc(text)),
            SidecarFormat::Isce => parse_isce_xml(text),
            SidecarFormat::Envi => Ok(parse_envi_hdr(text)),
            SidecarFormat::Gamma => Ok(parse_gamma_par(text)),
        }
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Finds the first existing sidecar of a binary file.
///
/// Lookup order: `<file>.rsc`, `<file>.xml`, `<file>.hdr`, `<stem>.hdr`, `<file>.par`.
pub fn find_sidecar(path: &Path) -> Option<(PathBuf, SidecarFormat)> {
    let candidates = [
        (with_suffix(path, ".rsc"), SidecarFormat::RoiPac),
        (with_suffix(path, ".xml"), SidecarFormat::Isce),
        (with_suffix(path, ".hdr"), SidecarFormat::Envi),
        (path.with_extension("hdr"), SidecarFormat::Envi),
        (with_suffix(path, ".par"), SidecarFormat::Gamma),
    ];

    candidates
        .into_iter()
        .find(|(candidate, _)| candidate.as_path() != path && candidate.is_file())
}

/// Reads the sidecar metadata of a binary file.
///
/// `FILE_TYPE` defaults to the lowercase extension of the binary file,
/// including its dot (`.unw`).
pub fn read_sidecar_attributes(path: &Path) -> Result<MetadataMap> {
    let (sidecar, format) = find_sidecar(path).ok_or_else(|| InfoError::MetadataError {
        path: path.to_path_buf(),
        message: "no .rsc, .xml, .hdr or .par metadata file found".to_string(),
    })?;
    log::debug!("Reading {:?} metadata from {}", format, sidecar.display());

    let text = fs::read_to_string(&sidecar)?;
    let mut attrs = format.parse(&text)?;

    if let Some(ext) = extension_tag(path) {
        attrs
            .entry(crate::classify::FILE_TYPE_KEY.to_string())
            .or_insert(AttrValue::Str(ext));
    }
    Ok(attrs)
}

/// Lowercase extension with its leading dot
pub fn extension_tag(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
}

/// Band names of a flat binary file, falling back to the file stem
pub fn band_names(path: &Path) -> Vec<String> {
    let second = match extension_tag(path).as_deref() {
        Some(".unw") => Some("phase"),
        Some(".cor") => Some("coherence"),
        Some(".hgt") => Some("height"),
        _ => None,
    };

    match second {
        Some(band) => vec!["magnitude".to_string(), band.to_string()],
        None => path
            .file_stem()
            .map(|s| vec![s.to_string_lossy().into_owned()])
            .unwrap_or_default(),
    }
}

/// ROI_PAC: first token is the key, the rest of the line the value.
pub fn parse_rsc(text: &str) -> MetadataMap {
    let mut attrs = MetadataMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }
        let mut parts = line.splitn(2, char::is_whitespace);
        if let (Some(key), Some(value)) = (parts.next(), parts.next()) {
            attrs.insert(key.to_string(), AttrValue::Str(value.trim().to_string()));
        }
    }
    attrs
}

/// ISCE: top-level `<property>` elements; properties nested in `<component>`s are skipped.
pub fn parse_isce_xml(text: &str) -> Result<MetadataMap> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut attrs = MetadataMap::new();
    let mut component_depth = 0usize;
    let mut property: Option<String> = None;
    let mut in_value = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"component" => component_depth += 1,
                b"property" if component_depth == 0 => {
                    property = e
                        .attributes()
                        .flatten()
                        .find(|a| a.key.as_ref() == b"name")
                        .map(|a| String::from_utf8_lossy(&a.value).into_owned());
                }
                b"value" => in_value = property.is_some(),
                _ => {}
            },
            Event::Text(t) if in_value => {
                if let Some(name) = &property {
                    attrs.insert(name.clone(), AttrValue::Str(t.unescape()?.into_owned()));
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"component" => component_depth = component_depth.saturating_sub(1),
                b"property" => property = None,
                b"value" => in_value = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(attrs)
}

/// ENVI: `key = value`, where `{ ... }` values may continue over several lines.
pub fn parse_envi_hdr(text: &str) -> MetadataMap {
    let mut attrs = MetadataMap::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let mut value = value.trim().to_string();
        if value.starts_with('{') {
            while !value.contains('}') {
                match lines.next() {
                    Some(next) => {
                        value.push(' ');
                        value.push_str(next.trim());
                    }
                    None => break,
                }
            }
            value = value
                .trim_start_matches('{')
                .trim_end_matches('}')
                .trim()
                .to_string();
        }
        attrs.insert(key.trim().to_string(), AttrValue::Str(value));
    }
    attrs
}

/// GAMMA: `key: value` lines; the title line without a colon is skipped.
pub fn parse_gamma_par(text: &str) -> MetadataMap {
    let mut attrs = MetadataMap::new();
    for line in text.lines() {
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            if !key.is_empty() {
                attrs.insert(key.to_string(), AttrValue::Str(value.trim().to_string()));
            }
        }
    }
    attrs
}
