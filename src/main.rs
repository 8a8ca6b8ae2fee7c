//! Entry point for the RuSARInfo application.
//! Handles CLI parsing, the input check, and dispatches to the date, slice or
//! structure/attribute reports.

use clap::Parser;
use ru_sar_info::attributes::print_attributes;
use ru_sar_info::cli::Args;
use ru_sar_info::errors::{InfoError, Result};
use ru_sar_info::hdf5_io::is_hdf5_file;
use ru_sar_info::metadata::read_attributes;
use ru_sar_info::slices::print_slice_list;
use ru_sar_info::stack::print_date_list;
use ru_sar_info::structure::print_hdf5_structure;
use ru_sar_info::summary::{print_basic_info, section_header};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    if !args.file.is_file() {
        return Err(InfoError::InputNotFound {
            path: args.file.clone(),
        });
    }

    // --date option
    if args.date {
        print_date_list(&args.file, args.num, args.nodrop, true)?;
        return Ok(());
    }

    // --slice option
    if args.slice {
        print_slice_list(&args.file, args.num, true)?;
        return Ok(());
    }

    // Basic info from the product readers
    print_basic_info(&args.file);

    // Generic attribute/structure of all files
    if is_hdf5_file(&args.file) {
        println!("\n{}", section_header("HDF5 File Structure"));
        print_hdf5_structure(&args.file, args.max_meta_num())?;
    } else {
        println!("\n{}", section_header("Binary File Attributes"));
        let attrs = read_attributes(&args.file)?;
        print_attributes(&attrs, args.max_meta_num());
    }

    Ok(())
}
