//! Hierarchical container abstraction
//!
//! The walker and reporters only need a handful of capabilities from a
//! container reader: root attributes, top-level member names and a depth-first
//! visit of every node. These traits keep the HDF5 backend swappable and let
//! tests drive the walker with in-memory trees.

use crate::attributes::MetadataMap;
use crate::errors::Result;

/// Kind of a visited node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Group,
    Dataset,
}

/// A group or dataset handed to a visitor during a container walk
pub trait ContainerNode {
    /// Path relative to the root, without a leading `/`
    fn path(&self) -> &str;

    fn kind(&self) -> NodeKind;

    /// Dataset dimensions; empty for groups and scalar datasets
    fn shape(&self) -> Vec<usize>;

    /// Element type name (`float32`, `|S8`, ...); empty for groups
    fn element_type(&self) -> Result<String>;

    /// The node's own attributes
    fn attributes(&self) -> Result<MetadataMap>;
}

/// Read-only access to an opened hierarchical container
pub trait Container {
    /// Attributes attached to the root group
    fn root_attributes(&self) -> Result<MetadataMap>;

    /// Names of the root group's direct members
    fn top_level_names(&self) -> Result<Vec<String>>;

    /// Visits every node below the root, depth-first, parents before children.
    ///
    /// The first visitor error aborts the traversal and is returned.
    fn visit(&self, visitor: &mut dyn FnMut(&dyn ContainerNode) -> Result<()>) -> Result<()>;
}
