//! GIAnT products (`LS-PARAMS.h5`, `RAW-STACK.h5`)
//!
//! GIAnT stores acquisition dates as proleptic Gregorian ordinals in a `dates`
//! dataset. Interferogram stacks describe their pairs through the `Jmat` design
//! matrix: one row per interferogram, `-1` in the master date column and `+1`
//! in the slave date column.

use crate::dates::{ordinal_to_date, DatePair};
use crate::errors::{InfoError, Result};
use crate::hdf5_io::Hdf5Container;
use std::path::Path;

/// Dataset holding the date ordinals
pub const DATES_DATASET: &str = "dates";

/// Dataset holding the interferogram design matrix
pub const JMAT_DATASET: &str = "Jmat";

/// Dataset holding the reconstructed time-series cube
pub const RECONS_DATASET: &str = "recons";

fn read_date_list(container: &Hdf5Container) -> Result<Vec<String>> {
    let (ordinals, _) = container.read_f64(DATES_DATASET)?;
    ordinals
        .into_iter()
        .map(|o| ordinal_to_date(o as i64))
        .collect()
}

/// GIAnT time-series reader
#[derive(Debug, Clone)]
pub struct GiantTimeseriesReader {
    date_list: Vec<String>,
}

impl GiantTimeseriesReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let container = Hdf5Container::open(path)?;
        Ok(Self {
            date_list: read_date_list(&container)?,
        })
    }

    pub fn date_list(&self) -> &[String] {
        &self.date_list
    }

    /// One slice name per acquisition: `recons-YYYYMMDD`
    pub fn slice_list(&self) -> Vec<String> {
        self.date_list
            .iter()
            .map(|d| format!("{}-{}", RECONS_DATASET, d))
            .collect()
    }
}

/// GIAnT interferogram stack reader
#[derive(Debug, Clone)]
pub struct GiantIfgramStackReader {
    date_list: Vec<String>,
    date12_list: Vec<DatePair>,
}

impl GiantIfgramStackReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let container = Hdf5Container::open(path)?;
        let date_list = read_date_list(&container)?;

        let (jmat, shape) = container.read_f64(JMAT_DATASET)?;
        let invalid = |message: String| InfoError::MetadataError {
            path: path.to_path_buf(),
            message,
        };

        let num_dates = match shape.as_slice() {
            [_, cols] if *cols == date_list.len() => *cols,
            _ => {
                return Err(invalid(format!(
                    "'{}' shape {:?} does not match {} dates",
                    JMAT_DATASET,
                    shape,
                    date_list.len()
                )))
            }
        };

        let mut date12_list = Vec::new();
        for (i, row) in jmat.chunks(num_dates.max(1)).enumerate() {
            let master = row.iter().position(|&v| v == -1.0);
            let slave = row.iter().position(|&v| v == 1.0);
            match (master, slave) {
                (Some(m), Some(s)) => {
                    date12_list.push(DatePair::new(date_list[m].clone(), date_list[s].clone()))
                }
                _ => {
                    return Err(invalid(format!(
                        "row {} of '{}' has no master/slave entries",
                        i, JMAT_DATASET
                    )))
                }
            }
        }

        Ok(Self {
            date_list,
            date12_list,
        })
    }

    pub fn date_list(&self) -> &[String] {
        &self.date_list
    }

    pub fn date12_list(&self) -> &[DatePair] {
        &self.date12_list
    }
}
