//! Unit tests for RuSARInfo modules that need no HDF5 file
//!
//! Container walks are driven by an in-memory container; sidecar parsing uses
//! temporary text files.

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use clap::Parser;
use hdf5::types::TypeDescriptor;
use ru_sar_info::{
    attributes::{format_attributes, AttrValue, MetadataMap, TRUNCATION_MARKER},
    classify::{classify, CoordinateSystem, FileType},
    cli::Args,
    container::{Container, ContainerNode, NodeKind},
    dates::{
        date_list_to_years, date_to_year_fraction, ordinal_to_date, parse_date, DatePair, DateStats,
    },
    errors::{InfoError, Result},
    hdf5_io::{is_hdf5_file, truncated_string_len, Member, MAX_STRING_LEN},
    metadata::{infer_file_type, read_attributes},
    sidecar::{band_names, parse_envi_hdr, parse_gamma_par, parse_isce_xml, parse_rsc},
    stack::{extract_dates, format_sequence, DateSequence},
    structure::{format_shape, path_column_width, walk, StructureKind, HDFEOS_PATH_PADDING},
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn attrs(entries: &[(&str, AttrValue)]) -> MetadataMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

struct MemoryNode {
    path: String,
    kind: NodeKind,
    shape: Vec<usize>,
    element_type: String,
    attributes: MetadataMap,
    broken: bool,
}

impl MemoryNode {
    fn group(path: &str, attributes: MetadataMap) -> Self {
        Self {
            path: path.to_string(),
            kind: NodeKind::Group,
            shape: Vec::new(),
            element_type: String::new(),
            attributes,
            broken: false,
        }
    }

    fn dataset(path: &str, shape: &[usize], element_type: &str, attributes: MetadataMap) -> Self {
        Self {
            path: path.to_string(),
            kind: NodeKind::Dataset,
            shape: shape.to_vec(),
            element_type: element_type.to_string(),
            attributes,
            broken: false,
        }
    }
}

impl ContainerNode for MemoryNode {
    fn path(&self) -> &str {
        &self.path
    }

    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn element_type(&self) -> Result<String> {
        Ok(self.element_type.clone())
    }

    fn attributes(&self) -> Result<MetadataMap> {
        if self.broken {
            return Err(InfoError::Generic("unreadable attributes".to_string()));
        }
        Ok(self.attributes.clone())
    }
}

struct MemoryContainer {
    root: MetadataMap,
    nodes: Vec<MemoryNode>,
}

impl Container for MemoryContainer {
    fn root_attributes(&self) -> Result<MetadataMap> {
        Ok(self.root.clone())
    }

    fn top_level_names(&self) -> Result<Vec<String>> {
        Ok(self
            .nodes
            .iter()
            .filter(|n| !n.path.contains('/'))
            .map(|n| n.path.clone())
            .collect())
    }

    fn visit(&self, visitor: &mut dyn FnMut(&dyn ContainerNode) -> Result<()>) -> Result<()> {
        for node in &self.nodes {
            visitor(node)?;
        }
        Ok(())
    }
}

fn simple_container() -> MemoryContainer {
    MemoryContainer {
        root: attrs(&[("FILE_TYPE", AttrValue::from("velocity"))]),
        nodes: vec![
            MemoryNode::group("g1", MetadataMap::new()),
            MemoryNode::dataset(
                "g1/d1",
                &[3, 4],
                "float32",
                attrs(&[("UNIT", AttrValue::from("m/year"))]),
            ),
        ],
    }
}

#[test]
fn test_error_types() {
    let err = InfoError::MissingTypeError;
    assert!(format!("{}", err).contains("FILE_TYPE"));

    let err = InfoError::InputNotFound {
        path: "missing.h5".into(),
    };
    assert_eq!(format!("{}", err), "input file does not exists: missing.h5");

    let err = InfoError::DatasetNotFound {
        path: "ts.h5".into(),
        name: "date".to_string(),
    };
    assert!(format!("{}", err).contains("Dataset 'date' not found"));

    let generic: InfoError = "Test error".into();
    assert_eq!(format!("{}", generic), "Test error");
}

#[test]
fn test_format_attributes_sorted_and_aligned() {
    let map = attrs(&[
        ("WIDTH", AttrValue::from("100")),
        ("A", AttrValue::Int(1)),
        ("LENGTH", AttrValue::from("200")),
    ]);

    let text = format_attributes(&map, 200);
    let expected = "  A         1\n  LENGTH    200\n  WIDTH     100\n";
    assert_eq!(text, expected);
}

#[test]
fn test_format_attributes_sort_is_lexicographic_by_byte() {
    let map = attrs(&[
        ("b", AttrValue::Int(1)),
        ("B", AttrValue::Int(2)),
        ("aa", AttrValue::Int(3)),
        ("a", AttrValue::Int(4)),
    ]);

    let keys: Vec<String> = format_attributes(&map, 200)
        .lines()
        .map(|l| l.split_whitespace().next().unwrap_or("").to_string())
        .collect();
    assert_eq!(keys, vec!["B", "a", "aa", "b"]);
}

#[test]
fn test_format_attributes_truncation_marker() {
    for (n, m) in [(0, 3), (2, 3), (3, 3), (4, 3), (25, 20), (5, 0)] {
        let map: MetadataMap = (0..n)
            .map(|i| (format!("KEY_{:03}", i), AttrValue::Int(i as i64)))
            .collect();

        let text = format_attributes(&map, m);
        let markers = text.lines().filter(|l| *l == TRUNCATION_MARKER.trim_end()).count();
        let entries = text.lines().count() - markers;

        assert_eq!(entries, n.min(m), "n={} m={}", n, m);
        assert_eq!(markers, usize::from(n > m), "n={} m={}", n, m);
    }
}

#[test]
fn test_format_attributes_aligns_non_ascii_keys() {
    let map = attrs(&[("AB", AttrValue::Int(1)), ("λ", AttrValue::Int(2))]);
    assert_eq!(format_attributes(&map, 200), "  AB    1\n  λ     2\n");
}

#[test]
fn test_format_attributes_empty_map() {
    assert_eq!(format_attributes(&MetadataMap::new(), 200), "");
}

#[test]
fn test_format_attributes_decodes_bytes() {
    let map = attrs(&[
        ("GOOD", AttrValue::Bytes(b"20200101".to_vec())),
        ("RAW", AttrValue::Bytes(vec![0x66, 0xff])),
    ]);

    let text = format_attributes(&map, 200);
    assert!(text.contains("  GOOD    20200101\n"));
    assert!(text.contains("  RAW     b'f\\xff'\n"));
}

#[test]
fn test_attr_value_rendering() {
    assert_eq!(AttrValue::Float(30.5).to_string(), "30.5");
    assert_eq!(AttrValue::Float(2.0).to_string(), "2.0");
    assert_eq!(AttrValue::Int(-7).to_string(), "-7");
    assert_eq!(AttrValue::Bool(true).to_string(), "True");
    assert_eq!(
        AttrValue::Array(vec![AttrValue::Int(1), AttrValue::Int(2), AttrValue::Int(3)]).to_string(),
        "[1 2 3]"
    );
    assert_eq!(AttrValue::Opaque("compound".to_string()).to_string(), "<compound>");
    assert_eq!(
        AttrValue::Bytes(b"ifgramStack".to_vec()).as_text(),
        Some("ifgramStack".to_string())
    );
    assert_eq!(AttrValue::Int(1).as_text(), None);
}

#[test]
fn test_classify() -> Result<()> {
    let mut map = attrs(&[("FILE_TYPE", AttrValue::from("timeseries"))]);
    let c = classify(&map)?;
    assert_eq!(c.file_type, FileType::TimeSeries);
    assert_eq!(c.coordinates, CoordinateSystem::RadarRangeDoppler);

    map.insert("Y_FIRST".to_string(), AttrValue::Float(30.5));
    let c = classify(&map)?;
    assert_eq!(c.file_type, FileType::TimeSeries);
    assert_eq!(c.coordinates, CoordinateSystem::Geographic);

    // Presence alone decides
    map.insert("Y_FIRST".to_string(), AttrValue::from("not a number"));
    assert_eq!(classify(&map)?.coordinates, CoordinateSystem::Geographic);

    let byte_tag = attrs(&[("FILE_TYPE", AttrValue::Bytes(b"ifgramStack".to_vec()))]);
    assert_eq!(classify(&byte_tag)?.file_type, FileType::InterferogramStack);
    Ok(())
}

#[test]
fn test_classify_missing_type() {
    let map = attrs(&[("WIDTH", AttrValue::from("100"))]);
    assert!(matches!(classify(&map), Err(InfoError::MissingTypeError)));
}

#[test]
fn test_file_type_tags() {
    for tag in ["timeseries", "ifgramStack", "giantTimeseries", "giantIfgramStack", "HDFEOS"] {
        let file_type = FileType::from_tag(tag);
        assert!(!matches!(file_type, FileType::Other(_)), "{}", tag);
        assert_eq!(file_type.tag(), tag);
    }
    assert_eq!(FileType::from_tag("Timeseries"), FileType::Other("Timeseries".to_string()));
    assert_eq!(FileType::from_tag(".unw").to_string(), ".unw");
    assert_eq!(CoordinateSystem::Geographic.to_string(), "GEO");
    assert_eq!(CoordinateSystem::RadarRangeDoppler.to_string(), "RADAR");
}

#[test]
fn test_path_column_width() {
    assert_eq!(path_column_width(0, &FileType::TimeSeries), 20);
    assert_eq!(path_column_width(19, &FileType::TimeSeries), 20);
    assert_eq!(path_column_width(25, &FileType::InterferogramStack), 26);
    assert_eq!(
        path_column_width(6, &FileType::GeocodedEarthObservationStack),
        20 + HDFEOS_PATH_PADDING
    );
}

#[test]
fn test_format_shape() {
    assert_eq!(format_shape(&[]), "()");
    assert_eq!(format_shape(&[5]), "(5,)");
    assert_eq!(format_shape(&[3, 4]), "(3, 4)");
    assert_eq!(format_shape(&[10, 200, 300]), "(10, 200, 300)");
}

#[test]
fn test_walk_depth_first_group_before_dataset() -> Result<()> {
    let report = walk(&simple_container())?;

    assert_eq!(report.nodes.len(), 2);
    assert_eq!(report.nodes[0].path, "g1");
    assert_eq!(report.nodes[0].kind, StructureKind::Group);
    assert_eq!(report.nodes[1].path, "g1/d1");
    assert_eq!(report.nodes[1].shape(), &[3, 4]);
    assert_eq!(report.nodes[1].element_type(), "float32");
    assert_eq!(report.path_width, 20);

    let text = report.render(200);
    let expected = format!(
        "Attributes in / level:\n  FILE_TYPE    velocity\n\n\
         HDF5 group   \"/g1\"\n\
         HDF5 dataset \"/{:<20}\": shape {:<20}, dtype <float32>\n  UNIT    m/year\n\n",
        "g1/d1", "(3, 4)"
    );
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn test_walk_is_repeatable() -> Result<()> {
    let container = simple_container();
    let first = walk(&container)?;
    let second = walk(&container)?;
    assert_eq!(first, second);
    assert_eq!(first.render(20), second.render(20));
    Ok(())
}

#[test]
fn test_walk_hdfeos_padding() -> Result<()> {
    let container = MemoryContainer {
        root: attrs(&[("FILE_TYPE", AttrValue::from("HDFEOS"))]),
        nodes: vec![MemoryNode::group("HDFEOS", MetadataMap::new())],
    };
    assert_eq!(walk(&container)?.path_width, 20 + HDFEOS_PATH_PADDING);
    Ok(())
}

#[test]
fn test_walk_aborts_on_node_error() {
    let mut container = simple_container();
    container.nodes[1].broken = true;
    assert!(walk(&container).is_err());
}

#[test]
fn test_parse_date() -> Result<()> {
    assert_eq!(parse_date("20200229")?.to_string(), "2020-02-29");
    assert_eq!(parse_date("141213")?.to_string(), "2014-12-13");
    assert_eq!(parse_date("991231")?.to_string(), "1999-12-31");
    assert!(matches!(parse_date("20190229"), Err(InfoError::InvalidDate { .. })));
    assert!(parse_date("2020-01-01").is_err());
    assert!(parse_date("2020").is_err());
    Ok(())
}

#[test]
fn test_ordinal_to_date() -> Result<()> {
    assert_eq!(ordinal_to_date(1)?, "00010101");
    assert_eq!(ordinal_to_date(737425)?, "20200101");
    assert!(ordinal_to_date(i64::MAX).is_err());
    Ok(())
}

#[test]
fn test_date_statistics_golden_value() -> Result<()> {
    let dates: Vec<String> = ["20200101", "20200201", "20200301"]
        .iter()
        .map(|d| d.to_string())
        .collect();

    let years = date_list_to_years(&dates)?;
    assert_abs_diff_eq!(years[0], 2020.0, epsilon = 1e-12);
    assert_abs_diff_eq!(years[1], 2020.0 + 31.0 / 366.0, epsilon = 1e-12);
    assert_abs_diff_eq!(years[2], 2020.0 + 60.0 / 366.0, epsilon = 1e-12);

    let stats = DateStats::from_dates(&dates)?;
    assert_abs_diff_eq!(stats.std_years, 0.06693834180336869, epsilon = 1e-9);
    assert_eq!(stats.first, "20200101");
    assert_eq!(stats.last, "20200301");
    assert_eq!(stats.count, 3);

    let text = stats.render();
    assert!(text.contains("Number of acquisitions    : 3"));
    assert!(text.contains("Std. of acquisition times : 0.07 years"));
    assert!(text.contains("['20200101', '20200201', '20200301']"));
    Ok(())
}

#[test]
fn test_year_fraction_century_leap_rules() {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).expect("valid date");

    // 1900 is not a leap year, 2000 is
    assert_abs_diff_eq!(date_to_year_fraction(date(1900, 3, 1)), 1900.0 + 59.0 / 365.0, epsilon = 1e-12);
    assert_abs_diff_eq!(date_to_year_fraction(date(2000, 3, 1)), 2000.0 + 60.0 / 366.0, epsilon = 1e-12);
    assert_abs_diff_eq!(date_to_year_fraction(date(2021, 12, 31)), 2021.0 + 364.0 / 365.0, epsilon = 1e-12);
}

#[test]
fn test_date_statistics_empty() {
    assert!(DateStats::from_dates(&[]).is_err());
}

#[test]
fn test_format_sequence() {
    let items = vec!["20200101", "20200113"];
    assert_eq!(format_sequence(&items, false), "20200101\n20200113\n");
    assert_eq!(format_sequence(&items, true), "20200101\t0\n20200113\t1\n");
    assert_eq!(format_sequence::<String>(&[], true), "");
}

#[test]
fn test_date_sequence_labels() {
    let pairs = DateSequence::Pairs(vec![
        DatePair::new("20200101", "20200113"),
        DatePair::new("20200101", "20200125"),
    ]);
    assert_eq!(pairs.labels(), vec!["20200101_20200113", "20200101_20200125"]);
    assert!(pairs.is_supported());

    let unsupported = DateSequence::Unsupported {
        file_type: "velocity".to_string(),
    };
    assert!(unsupported.labels().is_empty());
    assert!(!unsupported.is_supported());
}

#[test]
fn test_extract_dates_unsupported_type() -> Result<()> {
    // Dispatch decides before any file is touched
    let sequence = extract_dates(
        "does_not_exist.h5",
        &FileType::Other("velocity".to_string()),
        true,
    )?;
    assert_eq!(
        sequence,
        DateSequence::Unsupported {
            file_type: "velocity".to_string()
        }
    );
    Ok(())
}

#[test]
fn test_parse_rsc() {
    let text = "WIDTH         100\nFILE_LENGTH   200\n# comment\nPROCESSOR     roi pac\n\n";
    let map = parse_rsc(text);
    assert_eq!(map.len(), 3);
    assert_eq!(map["WIDTH"], AttrValue::from("100"));
    assert_eq!(map["PROCESSOR"], AttrValue::from("roi pac"));
}

#[test]
fn test_parse_isce_xml() -> Result<()> {
    let text = r#"<imageFile>
        <property name="width"><value>1024</value></property>
        <property name="length"><value>512</value></property>
        <component name="coordinate1">
            <property name="startingvalue"><value>0.0</value></property>
        </component>
        <property name="data_type"><value>FLOAT</value></property>
    </imageFile>"#;

    let map = parse_isce_xml(text)?;
    assert_eq!(map.len(), 3);
    assert_eq!(map["width"], AttrValue::from("1024"));
    assert_eq!(map["data_type"], AttrValue::from("FLOAT"));
    assert!(!map.contains_key("startingvalue"));
    Ok(())
}

#[test]
fn test_parse_envi_hdr() {
    let text = "ENVI\nsamples = 100\nlines   = 200\nband names = {\n phase,\n magnitude }\n";
    let map = parse_envi_hdr(text);
    assert_eq!(map["samples"], AttrValue::from("100"));
    assert_eq!(map["lines"], AttrValue::from("200"));
    assert_eq!(map["band names"], AttrValue::from("phase, magnitude"));
    assert!(!map.contains_key("ENVI"));
}

#[test]
fn test_parse_gamma_par() {
    let text = "Gamma Interferometric SAR Processor (ISP) - Image Parameter File\n\ntitle:     S1A_IW\nrange_samples:   100\n";
    let map = parse_gamma_par(text);
    assert_eq!(map.len(), 2);
    assert_eq!(map["range_samples"], AttrValue::from("100"));
}

#[test]
fn test_read_attributes_binary_file() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("filt_fine.unw");
    fs::write(&file_path, [0u8; 16])?;
    fs::write(
        temp_dir.path().join("filt_fine.unw.rsc"),
        "WIDTH   2\nFILE_LENGTH   2\n",
    )?;

    let map = read_attributes(&file_path)?;
    assert_eq!(map["FILE_TYPE"], AttrValue::from(".unw"));
    assert_eq!(map["WIDTH"], AttrValue::from("2"));

    let full_path = map["FILE_PATH"].to_string();
    assert!(Path::new(&full_path).is_absolute());
    assert!(full_path.ends_with("filt_fine.unw"));

    let c = classify(&map)?;
    assert_eq!(c.file_type, FileType::Other(".unw".to_string()));
    Ok(())
}

#[test]
fn test_read_attributes_sidecar_file_type_wins() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("velocity.dat");
    fs::write(&file_path, [0u8; 4])?;
    fs::write(
        temp_dir.path().join("velocity.hdr"),
        "ENVI\nFILE_TYPE = velocity\n",
    )?;

    let map = read_attributes(&file_path)?;
    assert_eq!(map["FILE_TYPE"], AttrValue::from("velocity"));
    Ok(())
}

#[test]
fn test_read_attributes_errors() {
    let temp_dir = tempdir().expect("Failed to create temp dir");

    let missing = temp_dir.path().join("missing.unw");
    assert!(matches!(
        read_attributes(&missing),
        Err(InfoError::InputNotFound { .. })
    ));

    let no_sidecar = temp_dir.path().join("lonely.cor");
    fs::write(&no_sidecar, [0u8; 4]).expect("Failed to write file");
    assert!(matches!(
        read_attributes(&no_sidecar),
        Err(InfoError::MetadataError { .. })
    ));
}

#[test]
fn test_band_names() {
    assert_eq!(band_names(Path::new("a/filt.unw")), vec!["magnitude", "phase"]);
    assert_eq!(band_names(Path::new("a/filt.cor")), vec!["magnitude", "coherence"]);
    assert_eq!(band_names(Path::new("radar.hgt")), vec!["magnitude", "height"]);
    assert_eq!(band_names(Path::new("velocity.dat")), vec!["velocity"]);
}

#[test]
fn test_infer_file_type() {
    let dataset = |name: &str, shape: &[usize]| Member {
        name: name.to_string(),
        kind: NodeKind::Dataset,
        shape: shape.to_vec(),
    };
    let group = |name: &str| Member {
        name: name.to_string(),
        kind: NodeKind::Group,
        shape: Vec::new(),
    };
    let h5 = Path::new("file.h5");

    let infer = |members: &[Member]| infer_file_type(h5, members);
    assert_eq!(
        infer(&[dataset("coherence", &[2, 3, 4]), dataset("unwrapPhase", &[2, 3, 4])]).as_deref(),
        Some("ifgramStack")
    );
    assert_eq!(infer(&[dataset("height", &[3, 4])]).as_deref(), Some("geometry"));
    assert_eq!(infer(&[group("timeseries")]).as_deref(), Some("timeseries"));
    assert_eq!(infer(&[group("HDFEOS")]).as_deref(), Some("HDFEOS"));
    assert_eq!(infer(&[dataset("recons", &[2, 3, 4])]).as_deref(), Some("giantTimeseries"));
    assert_eq!(infer(&[dataset("figram", &[2, 3, 4])]).as_deref(), Some("giantIfgramStack"));
    assert_eq!(infer(&[dataset("velocity", &[3, 4])]).as_deref(), Some("velocity"));
    assert_eq!(infer(&[group("quality")]).as_deref(), Some("quality"));
    assert_eq!(infer(&[]), None);
    assert_eq!(infer_file_type(Path::new("S1.he5"), &[]).as_deref(), Some("HDFEOS"));
}

#[test]
fn test_truncated_string_len() {
    assert_eq!(truncated_string_len(&TypeDescriptor::FixedAscii(8)), None);
    assert_eq!(truncated_string_len(&TypeDescriptor::FixedAscii(MAX_STRING_LEN)), None);
    assert_eq!(truncated_string_len(&TypeDescriptor::FixedAscii(600)), Some(600));
    assert_eq!(truncated_string_len(&TypeDescriptor::FixedUnicode(1024)), Some(1024));
    assert_eq!(truncated_string_len(&TypeDescriptor::VarLenAscii), None);
    assert_eq!(truncated_string_len(&TypeDescriptor::Boolean), None);
}

#[test]
fn test_is_hdf5_file() {
    assert!(is_hdf5_file(Path::new("timeseries.h5")));
    assert!(is_hdf5_file(Path::new("S1_IW12.HE5")));
    assert!(!is_hdf5_file(Path::new("filt.unw")));
    assert!(!is_hdf5_file(Path::new("noext")));
}

#[test]
fn test_cli_args() {
    let args = Args::parse_from(["ru_sar_info", "timeseries.h5"]);
    assert_eq!(args.max_meta_num(), 200);
    assert!(!args.date && !args.slice && !args.num && !args.nodrop);

    let args = Args::parse_from(["ru_sar_info", "ifgramStack.h5", "--compact", "--date", "--num", "--nodrop"]);
    assert_eq!(args.max_meta_num(), 20);
    assert!(args.date && args.num && args.nodrop);

    assert!(Args::try_parse_from(["ru_sar_info"]).is_err());
}
