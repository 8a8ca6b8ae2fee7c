//! RuSARInfo: metadata and structure inspection of InSAR data products
//!
//! A Rust library for quickly understanding the shape and provenance of a data
//! product without opening it in a full analysis environment. It reads HDF5
//! containers (time series, interferogram stacks, GIAnT stacks, HDF-EOS5
//! products) and flat binary rasters with sidecar metadata.
//!
//! ## Key Features
//!
//! - **Structure Walk**: Every group and dataset with shape, element type and attributes
//! - **Classification**: Declared file type and coordinate system from top-level metadata
//! - **Date Sequences**: Acquisition dates or interferometric date pairs per product type
//! - **Slice Inventory**: Named 2-D data planes of a file
//! - **Date Statistics**: Span, count and spread of time-series acquisitions
//!
//! ## Module Organization
//!
//! - [`attributes`]: Attribute values and the truncated attribute block
//! - [`container`]: Container reader abstraction
//! - [`hdf5_io`]: HDF5 container backend
//! - [`structure`]: Recursive container walk and structure report
//! - [`classify`]: File type and coordinate system classification
//! - [`metadata`]: Top-level metadata of HDF5 and flat binary files
//! - [`sidecar`]: ROI_PAC, ISCE, ENVI and GAMMA sidecar parsers
//! - [`dates`]: Date parsing, fractional years and date statistics
//! - [`stack`]: Per-product date sequence readers
//! - [`slices`]: Slice inventories
//! - [`summary`]: Basic file information block
//! - [`errors`]: Centralized error handling
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use ru_sar_info::prelude::*;
//!
//! let attrs = read_attributes("timeseries.h5").unwrap();
//! let classification = classify(&attrs).unwrap();
//!
//! match extract_dates("timeseries.h5", &classification.file_type, false).unwrap() {
//!     DateSequence::Unsupported { file_type } => println!("no dates in {} files", file_type),
//!     sequence => print!("{}", format_sequence(&sequence.labels(), true)),
//! }
//!
//! ru_sar_info::structure::print_hdf5_structure("timeseries.h5", 20).unwrap();
//! ```

pub mod attributes;
pub mod classify;
pub mod cli;
pub mod container;
pub mod dates;
pub mod errors;
pub mod hdf5_io;
pub mod metadata;
pub mod sidecar;
pub mod slices;
pub mod stack;
pub mod structure;
pub mod summary;

pub use attributes::*;
pub use classify::*;
pub use errors::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::attributes::{format_attributes, AttrValue, MetadataMap};
    pub use crate::classify::{classify, Classification, CoordinateSystem, FileType};
    pub use crate::container::{Container, ContainerNode, NodeKind};
    pub use crate::errors::{InfoError, Result};
    pub use crate::hdf5_io::Hdf5Container;
    pub use crate::metadata::read_attributes;
    pub use crate::slices::list_slices;
    pub use crate::stack::{extract_dates, format_sequence, DateSequence};
    pub use crate::structure::{walk, StructureNode, StructureReport};
    pub use crate::summary::BasicInfo;
}
