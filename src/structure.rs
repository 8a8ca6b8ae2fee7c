//! Container structure walk and report rendering
//!
//! A walk reads the root attributes, then visits every group and dataset once
//! in the container's own order and keeps one [`StructureNode`] per node. The
//! report is rendered from those nodes, so repeated walks of an unchanged file
//! produce the same text.

use crate::attributes::{format_attributes, MetadataMap};
use crate::classify::{FileType, FILE_TYPE_KEY};
use crate::container::{Container, ContainerNode, NodeKind};
use crate::errors::Result;
use crate::hdf5_io::Hdf5Container;
use std::path::Path;

/// Minimum width of the dataset path column
pub const MIN_PATH_WIDTH: usize = 20;

/// Extra path column width for HDF-EOS5 products, whose datasets sit under
/// long `HDFEOS/GRIDS/...` paths
pub const HDFEOS_PATH_PADDING: usize = 35;

/// Width of the shape column
const SHAPE_WIDTH: usize = 20;

/// Structural role of a node, with the dataset-only properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureKind {
    Group,
    Dataset {
        shape: Vec<usize>,
        element_type: String,
    },
}

/// One group or dataset of a walked container
#[derive(Debug, Clone, PartialEq)]
pub struct StructureNode {
    /// Path relative to the root, without a leading `/`
    pub path: String,
    pub kind: StructureKind,
    pub attributes: MetadataMap,
}

impl StructureNode {
    pub fn shape(&self) -> &[usize] {
        match &self.kind {
            StructureKind::Group => &[],
            StructureKind::Dataset { shape, .. } => shape,
        }
    }

    pub fn element_type(&self) -> &str {
        match &self.kind {
            StructureKind::Group => "",
            StructureKind::Dataset { element_type, .. } => element_type,
        }
    }
}

/// Result of a full container walk
#[derive(Debug, Clone, PartialEq)]
pub struct StructureReport {
    pub root_attributes: MetadataMap,
    pub nodes: Vec<StructureNode>,
    /// Width of the dataset path column, fixed before rendering
    pub path_width: usize,
}

/// Walks every node of a container.
pub fn walk(container: &dyn Container) -> Result<StructureReport> {
    let root_attributes = container.root_attributes()?;

    let longest = container
        .top_level_names()?
        .iter()
        .map(|name| name.len())
        .max()
        .unwrap_or(0);

    let file_type = root_attributes
        .get(FILE_TYPE_KEY)
        .map(|v| FileType::from_tag(&v.to_string()))
        .unwrap_or(FileType::TimeSeries);
    let path_width = path_column_width(longest, &file_type);

    let mut nodes = Vec::new();
    container.visit(&mut |node: &dyn ContainerNode| {
        let kind = match node.kind() {
            NodeKind::Group => StructureKind::Group,
            NodeKind::Dataset => StructureKind::Dataset {
                shape: node.shape(),
                element_type: node.element_type()?,
            },
        };
        nodes.push(StructureNode {
            path: node.path().to_string(),
            kind,
            attributes: node.attributes()?,
        });
        Ok(())
    })?;

    log::debug!("Walked {} nodes", nodes.len());

    Ok(StructureReport {
        root_attributes,
        nodes,
        path_width,
    })
}

/// Path column width for a given longest top-level name.
pub fn path_column_width(longest_top_level_name: usize, file_type: &FileType) -> usize {
    let width = MIN_PATH_WIDTH.max(longest_top_level_name + 1);
    match file_type {
        FileType::GeocodedEarthObservationStack => width + HDFEOS_PATH_PADDING,
        _ => width,
    }
}

/// Python-tuple style rendering of a shape: `()`, `(5,)`, `(3, 4)`.
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [] => "()".to_string(),
        [n] => format!("({},)", n),
        dims => format!(
            "({})",
            dims.iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

impl StructureReport {
    /// Renders the report with at most `max_entries` attributes per node.
    pub fn render(&self, max_entries: usize) -> String {
        let mut out = String::new();

        if !self.root_attributes.is_empty() {
            out.push_str("Attributes in / level:\n");
            out.push_str(&format_attributes(&self.root_attributes, max_entries));
            out.push('\n');
        }

        for node in &self.nodes {
            match &node.kind {
                StructureKind::Group => {
                    out.push_str(&format!("HDF5 group   \"/{}\"\n", node.path));
                }
                StructureKind::Dataset {
                    shape,
                    element_type,
                } => {
                    out.push_str(&format!(
                        "HDF5 dataset \"/{:<pw$}\": shape {:<sw$}, dtype <{}>\n",
                        node.path,
                        format_shape(shape),
                        element_type,
                        pw = self.path_width,
                        sw = SHAPE_WIDTH
                    ));
                }
            }

            if !node.attributes.is_empty() {
                out.push_str(&format_attributes(&node.attributes, max_entries));
                out.push('\n');
            }
        }
        out
    }
}

/// Walks an HDF5 file, prints the structure report and returns its text.
pub fn print_hdf5_structure<P: AsRef<Path>>(path: P, max_entries: usize) -> Result<String> {
    let container = Hdf5Container::open(path)?;
    let text = walk(&container)?.render(max_entries);
    println!("{}", text);
    Ok(text)
}
