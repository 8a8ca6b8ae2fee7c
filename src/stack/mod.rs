//! Per-product date sequence extraction
//!
//! This module organizes the readers of each supported product family and
//! dispatches on the classified [`FileType`] to obtain either a list of
//! acquisition dates or a list of interferometric date pairs.
//!
//! - [`timeseries`]: displacement time series
//! - [`ifgram`]: interferogram stacks with keep/drop flags
//! - [`giant`]: GIAnT time series and interferogram stacks
//! - [`hdfeos`]: HDF-EOS5 geocoded products

pub mod giant;
pub mod hdfeos;
pub mod ifgram;
pub mod timeseries;

pub use giant::{GiantIfgramStackReader, GiantTimeseriesReader};
pub use hdfeos::HdfeosReader;
pub use ifgram::IfgramStackReader;
pub use timeseries::TimeseriesReader;

use crate::classify::{classify, FileType};
use crate::dates::DatePair;
use crate::errors::Result;
use crate::metadata::read_attributes;
use std::path::Path;

/// Temporal sequence of a product
#[derive(Debug, Clone, PartialEq)]
pub enum DateSequence {
    /// Single acquisition dates, `YYYYMMDD`
    Dates(Vec<String>),
    /// Interferometric pairs
    Pairs(Vec<DatePair>),
    /// The file type has no date extraction strategy
    Unsupported { file_type: String },
}

impl DateSequence {
    /// Printable labels in extraction order; empty for unsupported types
    pub fn labels(&self) -> Vec<String> {
        match self {
            DateSequence::Dates(dates) => dates.clone(),
            DateSequence::Pairs(pairs) => pairs.iter().map(|p| p.to_string()).collect(),
            DateSequence::Unsupported { .. } => Vec::new(),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, DateSequence::Unsupported { .. })
    }
}

/// Obtains the date or date-pair sequence of a file of the given type.
///
/// With `drop_filtered`, interferograms flagged as dropped are left out of
/// interferogram stack sequences. Types without a strategy yield
/// [`DateSequence::Unsupported`] rather than an error.
pub fn extract_dates<P: AsRef<Path>>(
    path: P,
    file_type: &FileType,
    drop_filtered: bool,
) -> Result<DateSequence> {
    let path = path.as_ref();
    let sequence = match file_type {
        FileType::TimeSeries => DateSequence::Dates(TimeseriesReader::open(path)?.date_list().to_vec()),
        FileType::GeocodedEarthObservationStack => {
            DateSequence::Dates(HdfeosReader::open(path)?.date_list().to_vec())
        }
        FileType::GiantTimeSeries => {
            DateSequence::Dates(GiantTimeseriesReader::open(path)?.date_list().to_vec())
        }
        FileType::InterferogramStack => {
            DateSequence::Pairs(IfgramStackReader::open(path)?.date12_list(drop_filtered))
        }
        FileType::GiantInterferogramStack => {
            DateSequence::Pairs(GiantIfgramStackReader::open(path)?.date12_list().to_vec())
        }
        FileType::Other(tag) => {
            log::debug!("No date extraction strategy for file type '{}'", tag);
            DateSequence::Unsupported {
                file_type: tag.clone(),
            }
        }
    };
    Ok(sequence)
}

/// One line per item, optionally followed by a tab and its 0-based index.
pub fn format_sequence<T: AsRef<str>>(items: &[T], show_index: bool) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if show_index {
            out.push_str(&format!("{}\t{}\n", item.as_ref(), i));
        } else {
            out.push_str(item.as_ref());
            out.push('\n');
        }
    }
    out
}

/// Reads the file type of `path`, extracts its sequence and prints it when `print_msg` is set.
pub fn print_date_list<P: AsRef<Path>>(
    path: P,
    show_index: bool,
    drop_filtered: bool,
    print_msg: bool,
) -> Result<DateSequence> {
    let path = path.as_ref();
    let attrs = read_attributes(path)?;
    let classification = classify(&attrs)?;
    let sequence = extract_dates(path, &classification.file_type, drop_filtered)?;

    if print_msg {
        match &sequence {
            DateSequence::Unsupported { file_type } => {
                println!(
                    "--date option can not be applied to {} file, ignore it.",
                    file_type
                );
            }
            supported => print!("{}", format_sequence(&supported.labels(), show_index)),
        }
    }
    Ok(sequence)
}
