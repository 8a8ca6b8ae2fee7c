//! HDF5 container backend
//!
//! This module provides the [`Container`] implementation for HDF5 files and the
//! typed dataset readers used by the per-product sequence readers. The file
//! handle is owned by [`Hdf5Container`] and released when it is dropped, so every
//! caller gets scoped acquisition with cleanup on all exit paths.

use crate::attributes::{AttrValue, MetadataMap};
use crate::container::{Container, ContainerNode, NodeKind};
use crate::errors::{InfoError, Result};
use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Attribute, Dataset, File, Group, LinkInfo, LinkType, Location, LocationToken};
use std::path::{Path, PathBuf};

/// Capacity used when reading fixed-length strings; longer values are truncated
pub const MAX_STRING_LEN: usize = 512;

/// File extensions handled as HDF5 containers
pub const HDF5_EXTENSIONS: [&str; 2] = ["h5", "he5"];

/// Returns true when the file extension marks an HDF5 container.
pub fn is_hdf5_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| HDF5_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Direct member of a group
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub kind: NodeKind,
    pub shape: Vec<usize>,
}

/// An opened HDF5 file
pub struct Hdf5Container {
    file: File,
    path: PathBuf,
}

impl Hdf5Container {
    /// Open an HDF5 file read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Opening HDF5 file: {}", path.display());

        let file = File::open(path).map_err(|source| InfoError::OpenError {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Opens a dataset by path relative to the root
    pub fn dataset(&self, name: &str) -> Result<Dataset> {
        self.file
            .dataset(name)
            .map_err(|_| InfoError::DatasetNotFound {
                path: self.path.clone(),
                name: name.to_string(),
            })
    }

    pub fn has_dataset(&self, name: &str) -> bool {
        self.file.dataset(name).is_ok()
    }

    /// Lists the direct members of a group; an empty path means the root.
    pub fn members(&self, group_path: &str) -> Result<Vec<Member>> {
        let group = if group_path.is_empty() {
            self.file.group("/")?
        } else {
            self.file.group(group_path)?
        };

        let mut members = Vec::new();
        for name in group.member_names()? {
            if group.group(&name).is_ok() {
                members.push(Member {
                    name,
                    kind: NodeKind::Group,
                    shape: Vec::new(),
                });
            } else if let Ok(ds) = group.dataset(&name) {
                members.push(Member {
                    name,
                    kind: NodeKind::Dataset,
                    shape: ds.shape(),
                });
            }
        }
        Ok(members)
    }

    /// Reads a dataset of fixed- or variable-length strings, flattened in row-major order
    pub fn read_strings(&self, name: &str) -> Result<Vec<String>> {
        let ds = self.dataset(name)?;
        let desc = ds.dtype()?.to_descriptor()?;
        warn_if_truncated(name, &desc);

        let values = match desc {
            TypeDescriptor::FixedAscii(_) => ds
                .read_raw::<FixedAscii<MAX_STRING_LEN>>()?
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            TypeDescriptor::FixedUnicode(_) => ds
                .read_raw::<FixedUnicode<MAX_STRING_LEN>>()?
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            TypeDescriptor::VarLenAscii => ds
                .read_raw::<VarLenAscii>()?
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            TypeDescriptor::VarLenUnicode => ds
                .read_raw::<VarLenUnicode>()?
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            other => {
                return Err(InfoError::MetadataError {
                    path: self.path.clone(),
                    message: format!(
                        "dataset '{}' holds {} values, expected strings",
                        name,
                        dtype_name(&other)
                    ),
                })
            }
        };
        Ok(values)
    }

    /// Reads a numeric dataset as f64 together with its shape
    pub fn read_f64(&self, name: &str) -> Result<(Vec<f64>, Vec<usize>)> {
        let ds = self.dataset(name)?;
        Ok((ds.read_raw::<f64>()?, ds.shape()))
    }

    pub fn read_bools(&self, name: &str) -> Result<Vec<bool>> {
        Ok(self.dataset(name)?.read_raw::<bool>()?)
    }
}

impl Container for Hdf5Container {
    fn root_attributes(&self) -> Result<MetadataMap> {
        read_location_attributes(&self.file)
    }

    fn top_level_names(&self) -> Result<Vec<String>> {
        Ok(self.file.member_names()?)
    }

    fn visit(&self, visitor: &mut dyn FnMut(&dyn ContainerNode) -> Result<()>) -> Result<()> {
        let mut seen = vec![self.file.loc_info()?.token];
        visit_group(&self.file, "", &mut seen, visitor)
    }
}

enum Hdf5Node {
    Group { path: String, group: Group },
    Dataset { path: String, dataset: Dataset },
}

impl ContainerNode for Hdf5Node {
    fn path(&self) -> &str {
        match self {
            Hdf5Node::Group { path, .. } | Hdf5Node::Dataset { path, .. } => path,
        }
    }

    fn kind(&self) -> NodeKind {
        match self {
            Hdf5Node::Group { .. } => NodeKind::Group,
            Hdf5Node::Dataset { .. } => NodeKind::Dataset,
        }
    }

    fn shape(&self) -> Vec<usize> {
        match self {
            Hdf5Node::Group { .. } => Vec::new(),
            Hdf5Node::Dataset { dataset, .. } => dataset.shape(),
        }
    }

    fn element_type(&self) -> Result<String> {
        match self {
            Hdf5Node::Group { .. } => Ok(String::new()),
            Hdf5Node::Dataset { dataset, .. } => Ok(dtype_name(&dataset.dtype()?.to_descriptor()?)),
        }
    }

    fn attributes(&self) -> Result<MetadataMap> {
        match self {
            Hdf5Node::Group { group, .. } => read_location_attributes(group),
            Hdf5Node::Dataset { dataset, .. } => read_location_attributes(dataset),
        }
    }
}

/// Names of the hard links of a group, in name order. Soft and external
/// links are skipped.
fn hard_link_names(group: &Group) -> Result<Vec<String>> {
    let names = group.iter_visit_default(
        Vec::new(),
        |_: &Group, name: &str, info: LinkInfo, names: &mut Vec<String>| {
            if info.link_type == LinkType::Hard {
                names.push(name.to_string());
            } else {
                log::debug!("Skipping {:?} link '{}'", info.link_type, name);
            }
            true
        },
    )?;
    Ok(names)
}

/// Depth-first walk over hard links. Every object is emitted once, under the
/// first path that reaches it; `seen` holds the tokens of emitted objects.
fn visit_group(
    group: &Group,
    prefix: &str,
    seen: &mut Vec<LocationToken>,
    visitor: &mut dyn FnMut(&dyn ContainerNode) -> Result<()>,
) -> Result<()> {
    for name in hard_link_names(group)? {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", prefix, name)
        };

        if let Ok(child) = group.group(&name) {
            let token = child.loc_info()?.token;
            if seen.contains(&token) {
                log::debug!("Skipping '{}': already visited", path);
                continue;
            }
            seen.push(token);

            visitor(&Hdf5Node::Group {
                path: path.clone(),
                group: child.clone(),
            })?;
            visit_group(&child, &path, seen, visitor)?;
        } else if let Ok(dataset) = group.dataset(&name) {
            let token = dataset.loc_info()?.token;
            if seen.contains(&token) {
                log::debug!("Skipping '{}': already visited", path);
                continue;
            }
            seen.push(token);

            visitor(&Hdf5Node::Dataset { path, dataset })?;
        } else {
            log::debug!("Skipping '{}': neither a group nor a dataset", path);
        }
    }
    Ok(())
}

/// numpy-style name of an HDF5 element type
pub fn dtype_name(desc: &TypeDescriptor) -> String {
    match desc {
        TypeDescriptor::Integer(_) => format!("int{}", desc.size() * 8),
        TypeDescriptor::Unsigned(_) => format!("uint{}", desc.size() * 8),
        TypeDescriptor::Float(_) => format!("float{}", desc.size() * 8),
        TypeDescriptor::Boolean => "bool".to_string(),
        TypeDescriptor::FixedAscii(n) | TypeDescriptor::FixedUnicode(n) => format!("|S{}", n),
        TypeDescriptor::VarLenAscii | TypeDescriptor::VarLenUnicode => "object".to_string(),
        TypeDescriptor::Compound(_) => "compound".to_string(),
        TypeDescriptor::Enum(_) => "enum".to_string(),
        _ => "opaque".to_string(),
    }
}

fn read_location_attributes(loc: &Location) -> Result<MetadataMap> {
    let mut attrs = MetadataMap::new();
    for name in loc.attr_names()? {
        let attr = loc.attr(&name)?;
        let value = read_attr_value(&name, &attr)?;
        attrs.insert(name, value);
    }
    Ok(attrs)
}

/// Declared length of a fixed-length string type that exceeds the read capacity
pub fn truncated_string_len(desc: &TypeDescriptor) -> Option<usize> {
    match desc {
        TypeDescriptor::FixedAscii(n) | TypeDescriptor::FixedUnicode(n) if *n > MAX_STRING_LEN => {
            Some(*n)
        }
        _ => None,
    }
}

fn warn_if_truncated(name: &str, desc: &TypeDescriptor) {
    if let Some(len) = truncated_string_len(desc) {
        log::warn!(
            "'{}' holds {}-byte strings, showing the first {} bytes",
            name,
            len,
            MAX_STRING_LEN
        );
    }
}

fn read_attr_value(name: &str, attr: &Attribute) -> Result<AttrValue> {
    let desc = attr.dtype()?.to_descriptor()?;
    warn_if_truncated(name, &desc);

    let mut values: Vec<AttrValue> = match &desc {
        TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) => {
            attr.read_raw::<i64>()?.into_iter().map(AttrValue::Int).collect()
        }
        TypeDescriptor::Float(_) => attr.read_raw::<f64>()?.into_iter().map(AttrValue::Float).collect(),
        TypeDescriptor::Boolean => attr.read_raw::<bool>()?.into_iter().map(AttrValue::Bool).collect(),
        TypeDescriptor::FixedAscii(_) => attr
            .read_raw::<FixedAscii<MAX_STRING_LEN>>()?
            .iter()
            .map(|s| AttrValue::Bytes(s.as_bytes().to_vec()))
            .collect(),
        TypeDescriptor::FixedUnicode(_) => attr
            .read_raw::<FixedUnicode<MAX_STRING_LEN>>()?
            .iter()
            .map(|s| AttrValue::Str(s.as_str().to_string()))
            .collect(),
        TypeDescriptor::VarLenAscii => attr
            .read_raw::<VarLenAscii>()?
            .iter()
            .map(|s| AttrValue::Bytes(s.as_bytes().to_vec()))
            .collect(),
        TypeDescriptor::VarLenUnicode => attr
            .read_raw::<VarLenUnicode>()?
            .iter()
            .map(|s| AttrValue::Str(s.as_str().to_string()))
            .collect(),
        other => return Ok(AttrValue::Opaque(dtype_name(other))),
    };

    if attr.ndim() == 0 {
        if let Some(value) = values.pop() {
            return Ok(value);
        }
    }
    Ok(AttrValue::Array(values))
}
