//! Named data-slice inventories
//!
//! A slice is one 2-D data plane addressable on its own, such as one
//! acquisition of a time series or one interferogram of a stack. Product
//! readers name their slices after the dates they hold; other containers list
//! every dataset with at least two dimensions.

use crate::classify::{classify, FileType};
use crate::container::{Container, ContainerNode, NodeKind};
use crate::errors::Result;
use crate::hdf5_io::{is_hdf5_file, Hdf5Container};
use crate::metadata::read_attributes;
use crate::sidecar::band_names;
use crate::stack::{
    format_sequence, hdfeos, GiantTimeseriesReader, HdfeosReader, IfgramStackReader,
    TimeseriesReader,
};
use std::path::Path;

/// Lists the slices of a file in container order.
pub fn list_slices<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    if !is_hdf5_file(path) {
        return Ok(band_names(path));
    }

    let attrs = read_attributes(path)?;
    let file_type = classify(&attrs)
        .map(|c| c.file_type)
        .unwrap_or_else(|_| FileType::Other(String::new()));

    match file_type {
        FileType::TimeSeries => Ok(TimeseriesReader::open(path)?.slice_list()),
        FileType::InterferogramStack => Ok(IfgramStackReader::open(path)?.slice_list()),
        FileType::GiantTimeSeries => Ok(GiantTimeseriesReader::open(path)?.slice_list()),
        FileType::GeocodedEarthObservationStack => {
            let reader = HdfeosReader::open(path)?;
            let mut slices = reader.observation_slices();
            let cubes: Vec<String> = reader
                .observation_cubes()
                .iter()
                .map(|c| format!("{}/{}", hdfeos::OBSERVATION_GROUP, c))
                .collect();
            slices.extend(
                list_dataset_slices(path)?
                    .into_iter()
                    .filter(|p| !cubes.contains(p)),
            );
            Ok(slices)
        }
        _ => list_dataset_slices(path),
    }
}

/// Every dataset path with two or more dimensions, in visit order.
pub fn list_dataset_slices<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let container = Hdf5Container::open(path)?;
    let mut slices = Vec::new();
    container.visit(&mut |node: &dyn ContainerNode| {
        if node.kind() == NodeKind::Dataset && node.shape().len() >= 2 {
            slices.push(node.path().to_string());
        }
        Ok(())
    })?;
    Ok(slices)
}

/// Lists the slices of a file and prints them when `print_msg` is set.
pub fn print_slice_list<P: AsRef<Path>>(
    path: P,
    show_index: bool,
    print_msg: bool,
) -> Result<Vec<String>> {
    let slices = list_slices(path)?;
    if print_msg {
        print!("{}", format_sequence(&slices, show_index));
    }
    Ok(slices)
}
