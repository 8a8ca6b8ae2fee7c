//! Displacement time-series products (`timeseries.h5`)

use crate::errors::Result;
use crate::hdf5_io::Hdf5Container;
use std::path::Path;

/// Dataset holding the acquisition dates
pub const DATE_DATASET: &str = "date";

/// Dataset holding the displacement cube
pub const TIMESERIES_DATASET: &str = "timeseries";

/// Time-series reader
#[derive(Debug, Clone)]
pub struct TimeseriesReader {
    date_list: Vec<String>,
}

impl TimeseriesReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let container = Hdf5Container::open(path)?;
        let date_list = container.read_strings(DATE_DATASET)?;
        log::debug!("Read {} acquisition dates", date_list.len());
        Ok(Self { date_list })
    }

    pub fn date_list(&self) -> &[String] {
        &self.date_list
    }

    /// One slice name per acquisition: `timeseries-YYYYMMDD`
    pub fn slice_list(&self) -> Vec<String> {
        self.date_list
            .iter()
            .map(|d| format!("{}-{}", TIMESERIES_DATASET, d))
            .collect()
    }
}
