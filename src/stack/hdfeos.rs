//! HDF-EOS5 geocoded products (`S1_*.he5`)

use crate::container::NodeKind;
use crate::errors::Result;
use crate::hdf5_io::Hdf5Container;
use std::path::Path;

/// Group holding the time-dependent observation datasets
pub const OBSERVATION_GROUP: &str = "HDFEOS/GRIDS/timeseries/observation";

/// Dataset holding the acquisition dates
pub const DATE_DATASET: &str = "HDFEOS/GRIDS/timeseries/observation/date";

/// HDF-EOS5 reader
#[derive(Debug, Clone)]
pub struct HdfeosReader {
    date_list: Vec<String>,
    /// 3-D datasets of the observation group, one frame per date
    observation_cubes: Vec<String>,
}

impl HdfeosReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let container = Hdf5Container::open(path)?;
        let date_list = container.read_strings(DATE_DATASET)?;

        let observation_cubes = container
            .members(OBSERVATION_GROUP)?
            .into_iter()
            .filter(|m| m.kind == NodeKind::Dataset && m.shape.len() == 3)
            .map(|m| m.name)
            .collect();

        Ok(Self {
            date_list,
            observation_cubes,
        })
    }

    pub fn date_list(&self) -> &[String] {
        &self.date_list
    }

    /// One slice name per cube and date: `displacement-YYYYMMDD`
    pub fn observation_slices(&self) -> Vec<String> {
        self.observation_cubes
            .iter()
            .flat_map(|cube| self.date_list.iter().map(move |d| format!("{}-{}", cube, d)))
            .collect()
    }

    pub fn observation_cubes(&self) -> &[String] {
        &self.observation_cubes
    }
}
