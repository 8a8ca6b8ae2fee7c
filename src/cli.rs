//! Defines command-line interface options using `clap` for the RuSARInfo application.

use crate::attributes::{COMPACT_MAX_META_NUM, DEFAULT_MAX_META_NUM};
use clap::Parser;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  ru_sar_info timeseries.h5
  ru_sar_info velocity.h5
  ru_sar_info ifgramStack.h5

  # Time / Date Info
  ru_sar_info ifgramStack.h5 --date                             # print master/slave date pairs of interferograms
  ru_sar_info ifgramStack.h5 --date --nodrop > date12_list.txt  # save date pairs of kept interferograms only
  ru_sar_info timeseries.h5  --date --num                       # print date list of timeseries with its number
  ru_sar_info LS-PARAMS.h5   --date > date_list.txt             # print date list of a GIAnT timeseries

  # Slice / Dataset Info
  ru_sar_info timeseries.h5 --slice
  ru_sar_info timeseries.h5 --slice --num
  ru_sar_info filt_fine.unw --slice";

/// Display metadata / structure information of InSAR data files
#[derive(Parser, Debug)]
#[command(
    version = "0.1.0",
    name = "RuSARInfo",
    about = "Display Metadata / Structure information of ANY File",
    after_help = EXAMPLES
)]
pub struct Args {
    /// File to check
    pub file: PathBuf,

    /// Show compact info by displaying only the top 20 metadata
    #[arg(long)]
    pub compact: bool,

    /// Show date/date12 info of input file
    #[arg(long)]
    pub date: bool,

    /// Show date/date12 number
    #[arg(long)]
    pub num: bool,

    /// Do not display dropped interferograms info
    #[arg(long)]
    pub nodrop: bool,

    /// Print slice list of the file
    #[arg(long)]
    pub slice: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Attribute budget per node
    pub fn max_meta_num(&self) -> usize {
        if self.compact {
            COMPACT_MAX_META_NUM
        } else {
            DEFAULT_MAX_META_NUM
        }
    }
}
