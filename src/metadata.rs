//! Top-level metadata of any inspected file
//!
//! This module reads the attribute map that classification and reporting work
//! from. HDF5 containers contribute their root attributes; flat binary files
//! contribute their sidecar metadata. Every map gets a `FILE_PATH` entry, and a
//! `FILE_TYPE` entry whenever the type can be determined.

use crate::attributes::{AttrValue, MetadataMap};
use crate::classify::{FILE_PATH_KEY, FILE_TYPE_KEY};
use crate::container::{Container, NodeKind};
use crate::errors::{InfoError, Result};
use crate::hdf5_io::{is_hdf5_file, Hdf5Container, Member};
use crate::sidecar::read_sidecar_attributes;
use std::path::Path;

/// Reads the top-level metadata of an HDF5 container or a flat binary file.
pub fn read_attributes<P: AsRef<Path>>(path: P) -> Result<MetadataMap> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(InfoError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut attrs = if is_hdf5_file(path) {
        read_hdf5_attributes(path)?
    } else {
        read_sidecar_attributes(path)?
    };

    let full_path = std::path::absolute(path)?;
    attrs.insert(
        FILE_PATH_KEY.to_string(),
        AttrValue::Str(full_path.display().to_string()),
    );
    Ok(attrs)
}

fn read_hdf5_attributes(path: &Path) -> Result<MetadataMap> {
    let container = Hdf5Container::open(path)?;
    let mut attrs = container.root_attributes()?;

    if !attrs.contains_key(FILE_TYPE_KEY) {
        let members = container.members("")?;
        if let Some(tag) = infer_file_type(path, &members) {
            log::info!("No FILE_TYPE attribute, inferred '{}' from file layout", tag);
            attrs.insert(FILE_TYPE_KEY.to_string(), AttrValue::Str(tag));
        }
    }
    Ok(attrs)
}

/// Infers a file type tag from the top-level layout of a container.
///
/// Returns `None` for an empty container that is not an `.he5` file.
pub fn infer_file_type(path: &Path, members: &[Member]) -> Option<String> {
    let datasets: Vec<&str> = members
        .iter()
        .filter(|m| m.kind == NodeKind::Dataset)
        .map(|m| m.name.as_str())
        .collect();
    let groups: Vec<&str> = members
        .iter()
        .filter(|m| m.kind == NodeKind::Group)
        .map(|m| m.name.as_str())
        .collect();
    let has_dataset = |names: &[&str]| names.iter().any(|n| datasets.contains(n));
    let has_member = |names: &[&str]| {
        names
            .iter()
            .any(|n| datasets.contains(n) || groups.contains(n))
    };

    let tag = if has_dataset(&["unwrapPhase"]) {
        "ifgramStack"
    } else if has_dataset(&["height", "latitude", "azimuthCoord"]) {
        "geometry"
    } else if has_member(&["timeseries", "displacement"]) {
        "timeseries"
    } else if groups.contains(&"HDFEOS") {
        "HDFEOS"
    } else if has_dataset(&["recons"]) {
        "giantTimeseries"
    } else if has_dataset(&["igram", "figram"]) {
        "giantIfgramStack"
    } else if let Some(first) = datasets.first().or(groups.first()) {
        *first
    } else if path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("he5"))
    {
        "HDFEOS"
    } else {
        return None;
    };
    Some(tag.to_string())
}
