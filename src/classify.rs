//! File type and coordinate system classification from top-level metadata

use crate::attributes::MetadataMap;
use crate::errors::{InfoError, Result};
use std::fmt;

/// Metadata key holding the declared file type
pub const FILE_TYPE_KEY: &str = "FILE_TYPE";

/// Metadata key holding the absolute path of the inspected file
pub const FILE_PATH_KEY: &str = "FILE_PATH";

/// Presence of this key marks geocoded products
pub const Y_FIRST_KEY: &str = "Y_FIRST";

/// Declared type of a data product
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileType {
    TimeSeries,
    InterferogramStack,
    GiantTimeSeries,
    GiantInterferogramStack,
    /// HDF-EOS5 geocoded product
    GeocodedEarthObservationStack,
    /// Any other tag, kept verbatim
    Other(String),
}

impl FileType {
    /// Maps a `FILE_TYPE` tag to its variant. Matching is exact.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "timeseries" => FileType::TimeSeries,
            "ifgramStack" => FileType::InterferogramStack,
            "giantTimeseries" => FileType::GiantTimeSeries,
            "giantIfgramStack" => FileType::GiantInterferogramStack,
            "HDFEOS" => FileType::GeocodedEarthObservationStack,
            other => FileType::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            FileType::TimeSeries => "timeseries",
            FileType::InterferogramStack => "ifgramStack",
            FileType::GiantTimeSeries => "giantTimeseries",
            FileType::GiantInterferogramStack => "giantIfgramStack",
            FileType::GeocodedEarthObservationStack => "HDFEOS",
            FileType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Coordinate system of the data grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    Geographic,
    RadarRangeDoppler,
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateSystem::Geographic => write!(f, "GEO"),
            CoordinateSystem::RadarRangeDoppler => write!(f, "RADAR"),
        }
    }
}

/// Result of classifying a metadata map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub file_type: FileType,
    pub coordinates: CoordinateSystem,
}

/// Classifies a file from its top-level metadata.
///
/// Fails with [`InfoError::MissingTypeError`] when `FILE_TYPE` is absent. Only
/// the presence of `Y_FIRST` decides the coordinate system; its value is not
/// checked.
pub fn classify(attrs: &MetadataMap) -> Result<Classification> {
    let tag = attrs
        .get(FILE_TYPE_KEY)
        .ok_or(InfoError::MissingTypeError)?
        .to_string();

    let coordinates = if attrs.contains_key(Y_FIRST_KEY) {
        CoordinateSystem::Geographic
    } else {
        CoordinateSystem::RadarRangeDoppler
    };

    Ok(Classification {
        file_type: FileType::from_tag(&tag),
        coordinates,
    })
}
