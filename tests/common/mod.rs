//! Shared fixture builders for HDF5 and sidecar test files

#![allow(dead_code)]

use hdf5::types::{FixedAscii, VarLenUnicode};
use hdf5::{File, Location};
use ndarray::{arr0, Array1, Array2, Array3};
use std::path::Path;

pub type Date = FixedAscii<8>;

pub fn date(value: &str) -> Date {
    FixedAscii::from_ascii(value.as_bytes()).expect("valid ascii date")
}

pub fn write_str_attr(loc: &Location, name: &str, value: &str) -> hdf5::Result<()> {
    let value: VarLenUnicode = value.parse().expect("valid unicode");
    loc.new_attr_builder().with_data(&arr0(value)).create(name)?;
    Ok(())
}

pub fn write_f64_attr(loc: &Location, name: &str, value: f64) -> hdf5::Result<()> {
    loc.new_attr_builder().with_data(&arr0(value)).create(name)?;
    Ok(())
}

pub fn write_i32_attr(loc: &Location, name: &str, value: i32) -> hdf5::Result<()> {
    loc.new_attr_builder().with_data(&arr0(value)).create(name)?;
    Ok(())
}

/// `g1` group holding a `(3, 4)` float32 dataset `g1/d1`
pub fn create_simple_tree(path: &Path) -> hdf5::Result<()> {
    let file = File::create(path)?;
    write_str_attr(&file, "PROCESSOR", "isce")?;

    let group = file.create_group("g1")?;
    write_str_attr(&group, "NAME", "first group")?;

    let ds = group
        .new_dataset_builder()
        .with_data(&Array2::<f32>::zeros((3, 4)))
        .create("d1")?;
    write_str_attr(&ds, "UNIT", "m")?;
    write_i32_attr(&ds, "REF_X", 5)?;
    Ok(())
}

pub fn create_timeseries(path: &Path, dates: &[&str], geocoded: bool) -> hdf5::Result<()> {
    let file = File::create(path)?;
    write_str_attr(&file, "FILE_TYPE", "timeseries")?;
    write_str_attr(&file, "UNIT", "m")?;
    if geocoded {
        write_f64_attr(&file, "Y_FIRST", 30.5)?;
    }

    let date_values: Array1<Date> = dates.iter().map(|d| date(d)).collect();
    file.new_dataset_builder().with_data(&date_values).create("date")?;
    file.new_dataset_builder()
        .with_data(&Array3::<f32>::zeros((dates.len(), 2, 3)))
        .create("timeseries")?;
    Ok(())
}

/// Interferogram stack; `kept[i] == false` flags pair `i` as dropped
pub fn create_ifgram_stack(path: &Path, pairs: &[(&str, &str)], kept: &[bool]) -> hdf5::Result<()> {
    let file = File::create(path)?;
    write_str_attr(&file, "FILE_TYPE", "ifgramStack")?;

    let flat: Vec<Date> = pairs
        .iter()
        .flat_map(|(m, s)| [date(m), date(s)])
        .collect();
    let dates = Array2::from_shape_vec((pairs.len(), 2), flat).expect("pair shape");
    file.new_dataset_builder().with_data(&dates).create("date")?;
    file.new_dataset_builder()
        .with_data(&Array1::from(kept.to_vec()))
        .create("dropIfgram")?;

    for name in ["coherence", "unwrapPhase"] {
        file.new_dataset_builder()
            .with_data(&Array3::<f32>::zeros((pairs.len(), 2, 3)))
            .create(name)?;
    }
    Ok(())
}

/// GIAnT time series without a `FILE_TYPE` attribute
pub fn create_giant_timeseries(path: &Path, ordinals: &[f64]) -> hdf5::Result<()> {
    let file = File::create(path)?;
    file.new_dataset_builder()
        .with_data(&Array1::from(ordinals.to_vec()))
        .create("dates")?;
    file.new_dataset_builder()
        .with_data(&Array3::<f32>::zeros((ordinals.len(), 2, 2)))
        .create("recons")?;
    Ok(())
}

/// GIAnT interferogram stack without a `FILE_TYPE` attribute
pub fn create_giant_ifgram_stack(path: &Path, ordinals: &[f64], jmat: Array2<f64>) -> hdf5::Result<()> {
    let file = File::create(path)?;
    let num_ifgrams = jmat.nrows();
    file.new_dataset_builder()
        .with_data(&Array1::from(ordinals.to_vec()))
        .create("dates")?;
    file.new_dataset_builder().with_data(&jmat).create("Jmat")?;
    file.new_dataset_builder()
        .with_data(&Array3::<f32>::zeros((num_ifgrams, 2, 2)))
        .create("igram")?;
    Ok(())
}

/// HDF-EOS5 product with observation and geometry groups
pub fn create_hdfeos(path: &Path, dates: &[&str]) -> hdf5::Result<()> {
    let file = File::create(path)?;
    write_str_attr(&file, "FILE_TYPE", "HDFEOS")?;
    write_f64_attr(&file, "Y_FIRST", 35.1)?;

    let timeseries = file
        .create_group("HDFEOS")?
        .create_group("GRIDS")?
        .create_group("timeseries")?;

    let observation = timeseries.create_group("observation")?;
    let date_values: Array1<Date> = dates.iter().map(|d| date(d)).collect();
    observation.new_dataset_builder().with_data(&date_values).create("date")?;
    observation
        .new_dataset_builder()
        .with_data(&Array3::<f32>::zeros((dates.len(), 2, 3)))
        .create("displacement")?;

    let geometry = timeseries.create_group("geometry")?;
    geometry
        .new_dataset_builder()
        .with_data(&Array2::<f32>::zeros((2, 3)))
        .create("height")?;
    Ok(())
}
