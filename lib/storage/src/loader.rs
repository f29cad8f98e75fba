//! CSV loader
//!
//! Reads long-form rows `entity_id,attribute,year,value` into an
//! [`EntityTable`]. An empty `value` is a missing cell. Files ending in
//! `.gz` are decompressed on the fly.

use flate2::read::GzDecoder;
use placesim_core::{AttributeId, Dataset, EntityId, EntityTable, EntityType, Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct Record {
    entity_id: u64,
    attribute: u32,
    year: i64,
    value: Option<f64>,
}

/// Counters from loading one source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub cells: usize,
    /// Rows dropped because their year is outside the covered span
    pub skipped_years: usize,
}

/// Load one table from any reader. `source_name` is used in error messages.
pub fn load_table_from_reader<R: Read>(
    reader: R,
    entity_type: EntityType,
    source_name: &str,
) -> Result<(EntityTable, LoadStats)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut builder = EntityTable::builder(entity_type);
    let mut stats = LoadStats::default();

    for result in csv_reader.deserialize::<Record>() {
        let record = result.map_err(|e| parse_error(source_name, &e))?;
        stats.rows += 1;

        match builder.insert(
            EntityId(record.entity_id),
            AttributeId(record.attribute),
            record.year,
            record.value,
        ) {
            Ok(()) => {}
            Err(Error::YearOutOfRange(_)) => stats.skipped_years += 1,
            Err(e) => return Err(e),
        }
    }

    stats.cells = builder.cells();
    if stats.skipped_years > 0 {
        warn!(
            source = source_name,
            skipped = stats.skipped_years,
            "skipped rows with years outside the supported range"
        );
    }

    Ok((builder.build(), stats))
}

/// Load one table from a `.csv` or `.csv.gz` file.
pub fn load_table<P: AsRef<Path>>(path: P, entity_type: EntityType) -> Result<(EntityTable, LoadStats)> {
    let path = path.as_ref();
    let source_name = path.display().to_string();
    let file = BufReader::new(File::open(path)?);

    if path.extension().is_some_and(|ext| ext == "gz") {
        load_table_from_reader(GzDecoder::new(file), entity_type, &source_name)
    } else {
        load_table_from_reader(file, entity_type, &source_name)
    }
}

/// Source file for `entity_type` in `dir`: `<type>.csv`, else `<type>.csv.gz`.
pub fn source_path(dir: &Path, entity_type: EntityType) -> Option<PathBuf> {
    let plain = dir.join(format!("{}.csv", entity_type.name()));
    if plain.is_file() {
        return Some(plain);
    }
    let gzipped = dir.join(format!("{}.csv.gz", entity_type.name()));
    gzipped.is_file().then_some(gzipped)
}

/// Load every entity type found in `dir`. A type without a source file gets
/// an empty table.
pub fn load_dataset<P: AsRef<Path>>(dir: P) -> Result<Dataset> {
    let dir = dir.as_ref();
    let mut tables = Vec::with_capacity(EntityType::ALL.len());

    for entity_type in EntityType::ALL {
        let Some(path) = source_path(dir, entity_type) else {
            warn!(entity_type = %entity_type, dir = %dir.display(), "no source file, table left empty");
            continue;
        };

        let (table, stats) = load_table(&path, entity_type)?;
        info!(
            entity_type = %entity_type,
            path = %path.display(),
            entities = table.len(),
            rows = stats.rows,
            cells = stats.cells,
            "loaded entity table"
        );
        tables.push(table);
    }

    Ok(Dataset::from_tables(tables))
}

fn parse_error(source_name: &str, err: &csv::Error) -> Error {
    if let csv::ErrorKind::Io(io) = err.kind() {
        return Error::Io(std::io::Error::new(io.kind(), io.to_string()));
    }
    Error::Parse {
        source_name: source_name.to_string(),
        line: err.position().map(|p| p.line()).unwrap_or(0),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const SAMPLE: &str = "\
entity_id,attribute,year,value
6,1,2000,100
6,2,2000,250.5
6,2,2001,
36,1,2000,50
36,2,1950,10
";

    #[test]
    fn test_load_from_reader() {
        let (table, stats) =
            load_table_from_reader(SAMPLE.as_bytes(), EntityType::State, "sample").unwrap();

        assert_eq!(stats, LoadStats { rows: 5, cells: 4, skipped_years: 1 });
        assert_eq!(table.len(), 2);
        assert_eq!(table.value_at(EntityId(6), AttributeId(2), 2000), Some(250.5));
        assert_eq!(table.value_at(EntityId(6), AttributeId(2), 2001), None);
        assert!(table.series(EntityId(36), AttributeId(2)).is_none());
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let data = "entity_id,attribute,year,value\n1,1,2000,5\n1,x,2000,5\n";
        let err = load_table_from_reader(data.as_bytes(), EntityType::City, "bad.csv").unwrap_err();

        match err {
            Error::Parse { source_name, line, .. } => {
                assert_eq!(source_name, "bad.csv");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_dataset_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("state.csv"), SAMPLE).unwrap();

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(b"entity_id,attribute,year,value\n1001,1,2010,3000\n1001,3,2010,12\n")
            .unwrap();
        std::fs::write(dir.path().join("county.csv.gz"), encoder.finish().unwrap()).unwrap();

        let dataset = load_dataset(dir.path()).unwrap();
        assert_eq!(dataset.table(EntityType::State).len(), 2);
        assert!(dataset.table(EntityType::County).exists(EntityId(1001)));
        assert!(dataset.table(EntityType::City).is_empty());
        assert!(dataset.catalog().supports(EntityType::County, AttributeId(3)));
        assert!(!dataset.catalog().supports(EntityType::State, AttributeId(3)));
    }

    #[test]
    fn test_missing_dir_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(dir.path().join("nope.csv"), EntityType::State).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
