//! Interferogram stack products (`ifgramStack.h5`)
//!
//! The stack stores one `(master, slave)` row per interferogram in the `date`
//! dataset and a boolean `dropIfgram` flag per row. A `true` flag marks the
//! interferogram as kept for analysis; `false` marks it dropped. Stacks written
//! without flags keep every pair.

use crate::container::NodeKind;
use crate::dates::DatePair;
use crate::errors::{InfoError, Result};
use crate::hdf5_io::Hdf5Container;
use std::path::Path;

/// Dataset holding the `(N, 2)` date pairs
pub const DATE_DATASET: &str = "date";

/// Dataset holding the per-pair keep flags
pub const DROP_DATASET: &str = "dropIfgram";

/// Interferogram stack reader
#[derive(Debug, Clone)]
pub struct IfgramStackReader {
    pairs: Vec<DatePair>,
    kept: Vec<bool>,
    /// Top-level datasets with their dimensions, in container order
    datasets: Vec<(String, usize)>,
}

impl IfgramStackReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let container = Hdf5Container::open(path)?;

        let dates = container.read_strings(DATE_DATASET)?;
        if dates.len() % 2 != 0 {
            return Err(InfoError::MetadataError {
                path: path.to_path_buf(),
                message: format!("'{}' must hold (master, slave) pairs", DATE_DATASET),
            });
        }
        let pairs: Vec<DatePair> = dates
            .chunks(2)
            .map(|pair| DatePair::new(pair[0].clone(), pair[1].clone()))
            .collect();

        let kept = if container.has_dataset(DROP_DATASET) {
            let flags = container.read_bools(DROP_DATASET)?;
            if flags.len() != pairs.len() {
                return Err(InfoError::MetadataError {
                    path: path.to_path_buf(),
                    message: format!(
                        "'{}' has {} flags for {} interferograms",
                        DROP_DATASET,
                        flags.len(),
                        pairs.len()
                    ),
                });
            }
            flags
        } else {
            vec![true; pairs.len()]
        };

        let datasets = container
            .members("")?
            .into_iter()
            .filter(|m| m.kind == NodeKind::Dataset)
            .map(|m| (m.name, m.shape.len()))
            .collect();

        Ok(Self {
            pairs,
            kept,
            datasets,
        })
    }

    /// Date pairs in stored order; with `drop_filtered` only the kept ones.
    pub fn date12_list(&self, drop_filtered: bool) -> Vec<DatePair> {
        self.pairs
            .iter()
            .zip(&self.kept)
            .filter(|(_, kept)| !drop_filtered || **kept)
            .map(|(pair, _)| pair.clone())
            .collect()
    }

    pub fn num_dropped(&self) -> usize {
        self.kept.iter().filter(|&&k| !k).count()
    }

    /// `{dataset}-{date12}` for every 3-D dataset and pair, 2-D datasets by name,
    /// in container order
    pub fn slice_list(&self) -> Vec<String> {
        let mut slices = Vec::new();
        for (name, ndim) in &self.datasets {
            match ndim {
                3 => slices.extend(self.pairs.iter().map(|p| format!("{}-{}", name, p))),
                2 if name != DATE_DATASET => slices.push(name.clone()),
                _ => {}
            }
        }
        slices
    }
}
