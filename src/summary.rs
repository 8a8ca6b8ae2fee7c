//! Basic file information block
//!
//! Combines the declared file type, the coordinate system and, for time-series
//! products, the acquisition date statistics into one human-readable block.

use crate::classify::{classify, CoordinateSystem, FileType, FILE_PATH_KEY};
use crate::dates::DateStats;
use crate::errors::Result;
use crate::metadata::read_attributes;
use crate::stack::TimeseriesReader;
use std::path::Path;

/// Renders a `******************** Title *****` section header.
pub fn section_header(title: &str) -> String {
    format!("{} {:*<40}", "*".repeat(20), format!("{} ", title))
}

/// Basic information about one file
#[derive(Debug, Clone, PartialEq)]
pub struct BasicInfo {
    pub file_path: String,
    pub file_type: FileType,
    pub coordinates: CoordinateSystem,
    /// Present for time-series products only
    pub date_stats: Option<DateStats>,
}

impl BasicInfo {
    /// Reads and classifies a file, adding date statistics for time series.
    pub fn gather<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let attrs = read_attributes(path)?;
        let classification = classify(&attrs)?;

        let file_path = attrs
            .get(FILE_PATH_KEY)
            .map(|v| v.to_string())
            .unwrap_or_else(|| path.display().to_string());

        let date_stats = match classification.file_type {
            FileType::TimeSeries => {
                let reader = TimeseriesReader::open(path)?;
                Some(DateStats::from_dates(reader.date_list())?)
            }
            _ => None,
        };

        Ok(Self {
            file_path,
            file_type: classification.file_type,
            coordinates: classification.coordinates,
            date_stats,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&section_header("Basic File Info"));
        out.push('\n');
        out.push_str(&format!("file name: {}\n", self.file_path));
        out.push_str(&format!("file type: {}\n", self.file_type));
        out.push_str(&format!("coordinates : {}\n", self.coordinates));

        if let Some(stats) = &self.date_stats {
            out.push('\n');
            out.push_str(&section_header("Date Stat Info"));
            out.push('\n');
            out.push_str(&stats.render());
        }
        out
    }
}

/// Prints the basic info block of a file.
///
/// This is best-effort: when any step fails nothing is printed and the failure
/// is reported as a warning, so the structure report that follows still runs.
pub fn print_basic_info<P: AsRef<Path>>(path: P) -> Option<BasicInfo> {
    match BasicInfo::gather(path) {
        Ok(info) => {
            print!("{}", info.render());
            Some(info)
        }
        Err(e) => {
            log::warn!("Skipping basic file info: {}", e);
            None
        }
    }
}
