use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::DatasetError;
use super::model::{Penguin, PenguinDataset, REQUIRED_COLUMNS, Sex, Species};

/// The canonical Palmer penguins table, compiled into the binary.
const BUILTIN_CSV: &str = include_str!("../../data/penguins.csv");

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the bundled penguins table.
pub fn load_builtin() -> Result<PenguinDataset> {
    read_csv(csv::Reader::from_reader(BUILTIN_CSV.as_bytes()))
        .context("parsing bundled penguins.csv")
}

/// Load a penguin table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – flat columns named after [`REQUIRED_COLUMNS`]
/// * `.json`    – `[{ "species": "Adelie", "island": "Torgersen", ... }, ...]`
/// * `.csv`     – header row with [`REQUIRED_COLUMNS`]; `NA` or empty cells are missing
pub fn load_file(path: &Path) -> Result<PenguinDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => return Err(DatasetError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::debug!("Parsed {} rows from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell parsing shared by the text formats
// ---------------------------------------------------------------------------

fn is_missing(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s.eq_ignore_ascii_case("NA") || s.eq_ignore_ascii_case("nan")
}

fn parse_number(s: &str, row: usize, column: &str) -> Result<Option<f64>, DatasetError> {
    if is_missing(s) {
        return Ok(None);
    }
    s.trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| DatasetError::InvalidValue {
            row,
            column: column.to_string(),
            value: s.to_string(),
        })
}

fn parse_year(s: &str, row: usize) -> Result<Option<i32>, DatasetError> {
    Ok(parse_number(s, row, "year")?.map(|y| y as i32))
}

fn parse_species(s: &str, row: usize) -> Result<Species> {
    s.parse::<Species>()
        .with_context(|| format!("row {row}: column 'species'"))
}

fn parse_island(s: &str, row: usize) -> Result<String, DatasetError> {
    if is_missing(s) {
        return Err(DatasetError::InvalidValue {
            row,
            column: "island".to_string(),
            value: s.to_string(),
        });
    }
    Ok(s.trim().to_string())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with at least the [`REQUIRED_COLUMNS`], in any
/// order. Extra columns (e.g. a leading row id) are ignored.
fn load_csv(path: &Path) -> Result<PenguinDataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<PenguinDataset> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let mut idx = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))?;
    }
    let [species, island, bill_length, bill_depth, flipper, mass, sex, year] = idx;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |i: usize| record.get(i).unwrap_or("");

        records.push(Penguin {
            species: parse_species(cell(species), row_no)?,
            island: parse_island(cell(island), row_no)?,
            bill_length_mm: parse_number(cell(bill_length), row_no, "bill_length_mm")?,
            bill_depth_mm: parse_number(cell(bill_depth), row_no, "bill_depth_mm")?,
            flipper_length_mm: parse_number(cell(flipper), row_no, "flipper_length_mm")?,
            body_mass_g: parse_number(cell(mass), row_no, "body_mass_g")?,
            sex: Sex::parse(cell(sex)),
            year: parse_year(cell(year), row_no)?,
        });
    }

    Ok(PenguinDataset::new(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "species": "Adelie", "island": "Torgersen",
///     "bill_length_mm": 39.1, "bill_depth_mm": 18.7,
///     "flipper_length_mm": 181, "body_mass_g": 3750,
///     "sex": "male", "year": 2007
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<PenguinDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<PenguinDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, rec) in rows.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        for name in REQUIRED_COLUMNS {
            if !obj.contains_key(name) {
                return Err(DatasetError::MissingColumn(name.to_string()).into());
            }
        }

        let species = json_text(obj, "species").unwrap_or_default();
        records.push(Penguin {
            species: parse_species(&species, i)?,
            island: parse_island(&json_text(obj, "island").unwrap_or_default(), i)?,
            bill_length_mm: json_number(obj, "bill_length_mm", i)?,
            bill_depth_mm: json_number(obj, "bill_depth_mm", i)?,
            flipper_length_mm: json_number(obj, "flipper_length_mm", i)?,
            body_mass_g: json_number(obj, "body_mass_g", i)?,
            sex: json_text(obj, "sex").as_deref().and_then(Sex::parse),
            year: json_number(obj, "year", i)?.map(|y| y as i32),
        });
    }

    Ok(PenguinDataset::new(records))
}

fn json_text(obj: &Map<String, JsonValue>, key: &str) -> Option<String> {
    match obj.get(key)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Null => None,
        other => Some(other.to_string()),
    }
}

fn json_number(
    obj: &Map<String, JsonValue>,
    key: &str,
    row: usize,
) -> Result<Option<f64>, DatasetError> {
    match obj.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => Ok(n.as_f64()),
        Some(JsonValue::String(s)) => parse_number(s, row, key),
        Some(other) => Err(DatasetError::InvalidValue {
            row,
            column: key.to_string(),
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per penguin attribute.
///
/// Expected schema:
/// - `species`, `island`, `sex`: Utf8 or LargeUtf8
/// - measurements and `year`: any of Float64 / Float32 / Int64 / Int32
///
/// Nulls are missing values. Works with files written by **Pandas**
/// (`df.to_parquet()`), **Polars** and the bundled `generate_sample` tool.
fn load_parquet(path: &Path) -> Result<PenguinDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    for name in REQUIRED_COLUMNS {
        if builder.schema().index_of(name).is_err() {
            return Err(DatasetError::MissingColumn(name.to_string()).into());
        }
    }
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut cols = Vec::with_capacity(REQUIRED_COLUMNS.len());
        for name in REQUIRED_COLUMNS {
            let idx = schema
                .index_of(name)
                .map_err(|_| DatasetError::MissingColumn(name.to_string()))?;
            cols.push(batch.column(idx));
        }
        let [species, island, bill_length, bill_depth, flipper, mass, sex, year] = &cols[..]
        else {
            bail!("parquet batch has an unexpected column layout");
        };

        for row in 0..batch.num_rows() {
            // Row numbers in messages count across batches.
            let row_no = records.len();
            let species = extract_text(species, row)
                .with_context(|| format!("Row {row_no}: failed to read 'species'"))?
                .unwrap_or_default();
            let island = extract_text(island, row)
                .with_context(|| format!("Row {row_no}: failed to read 'island'"))?
                .unwrap_or_default();

            records.push(Penguin {
                species: parse_species(&species, row_no)?,
                island: parse_island(&island, row_no)?,
                bill_length_mm: extract_f64(bill_length, row)
                    .with_context(|| format!("Row {row_no}: failed to read 'bill_length_mm'"))?,
                bill_depth_mm: extract_f64(bill_depth, row)
                    .with_context(|| format!("Row {row_no}: failed to read 'bill_depth_mm'"))?,
                flipper_length_mm: extract_f64(flipper, row)
                    .with_context(|| format!("Row {row_no}: failed to read 'flipper_length_mm'"))?,
                body_mass_g: extract_f64(mass, row)
                    .with_context(|| format!("Row {row_no}: failed to read 'body_mass_g'"))?,
                sex: extract_text(sex, row)
                    .with_context(|| format!("Row {row_no}: failed to read 'sex'"))?
                    .as_deref()
                    .and_then(Sex::parse),
                year: extract_f64(year, row)
                    .with_context(|| format!("Row {row_no}: failed to read 'year'"))?
                    .map(|y| y as i32),
            });
        }
    }

    Ok(PenguinDataset::new(records))
}

// -- Parquet / Arrow helpers --

/// Extract a nullable string cell from a Utf8 or LargeUtf8 column.
fn extract_text(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(Some(arr.value(row).to_string()))
        }
        DataType::LargeUtf8 => Ok(Some(col.as_string::<i64>().value(row).to_string())),
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

/// Extract a nullable numeric cell, widening to `f64`.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row) as f64,
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64,
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as f64,
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok((!value.is_nan()).then_some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use std::io::Write;

    const HEADER: &str =
        "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year";

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn builtin_dataset_is_the_palmer_table() {
        let ds = load_builtin().unwrap();
        assert_eq!(ds.len(), 344);
        for species in Species::ALL {
            assert!(ds.records().iter().any(|p| p.species == species));
        }
        assert_eq!(ds.islands(), vec!["Biscoe", "Dream", "Torgersen"]);
        let first = &ds.records()[0];
        assert_eq!(first.species, Species::Adelie);
        assert_eq!(first.island, "Torgersen");
        assert_eq!(first.bill_length_mm, Some(39.1));
        assert_eq!(first.body_mass_g, Some(3750.0));
        assert_eq!(first.sex, Some(Sex::Male));
        assert_eq!(first.year, Some(2007));
        // The fourth Torgersen bird was never measured.
        assert_eq!(ds.records()[3].body_mass_g, None);
    }

    #[test]
    fn csv_with_extra_columns_and_na_cells() {
        let file = write_temp(
            ".csv",
            &format!(
                "rowid,{HEADER}\n\
                 1,Adelie,Torgersen,39.1,18.7,181,3750,male,2007\n\
                 2,Gentoo,Biscoe,NA,NA,NA,NA,NA,2009\n"
            ),
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        let gentoo = &ds.records()[1];
        assert_eq!(gentoo.species, Species::Gentoo);
        assert_eq!(gentoo.bill_length_mm, None);
        assert_eq!(gentoo.body_mass_g, None);
        assert_eq!(gentoo.sex, None);
        assert_eq!(gentoo.year, Some(2009));
    }

    #[test]
    fn csv_missing_a_required_column_is_rejected() {
        let file = write_temp(
            ".csv",
            "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,sex,year\n\
             Adelie,Torgersen,39.1,18.7,181,male,2007\n",
        );
        let err = load_file(file.path()).unwrap_err();
        let root = err.downcast_ref::<DatasetError>().unwrap();
        assert!(matches!(root, DatasetError::MissingColumn(c) if c == "body_mass_g"));
    }

    #[test]
    fn csv_with_unknown_species_is_rejected() {
        let file = write_temp(
            ".csv",
            &format!(
                "{HEADER}\n\
                 Adelie,Dream,39.5,17.4,186,3800,female,2007\n\
                 Emperor,Ross,60,20,220,30000,male,2007\n"
            ),
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::UnknownSpecies(s)) if s == "Emperor"
        ));
        assert!(format!("{err:#}").contains("row 1: column 'species'"));
    }

    #[test]
    fn json_unknown_species_names_its_row() {
        let err = parse_json(
            r#"[{"species": "Macaroni", "island": "Dream", "bill_length_mm": null,
                 "bill_depth_mm": null, "flipper_length_mm": null, "body_mass_g": null,
                 "sex": null, "year": 2008}]"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("row 0: column 'species'"));
    }

    #[test]
    fn csv_with_garbage_number_is_rejected() {
        let file = write_temp(
            ".csv",
            &format!("{HEADER}\nAdelie,Dream,long,18,190,3500,female,2008\n"),
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::InvalidValue { row: 0, .. })
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_file(Path::new("/definitely/not/here/penguins.csv")).is_err());
    }

    #[test]
    fn json_records_with_nulls() {
        let file = write_temp(
            ".json",
            r#"[
                {"species": "Chinstrap", "island": "Dream", "bill_length_mm": 46.5,
                 "bill_depth_mm": 17.9, "flipper_length_mm": 192, "body_mass_g": 3500,
                 "sex": "female", "year": 2007},
                {"species": "Adelie", "island": "Torgersen", "bill_length_mm": null,
                 "bill_depth_mm": null, "flipper_length_mm": null, "body_mass_g": null,
                 "sex": null, "year": 2007}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].species, Species::Chinstrap);
        assert_eq!(ds.records()[0].flipper_length_mm, Some(192.0));
        assert_eq!(ds.records()[1].body_mass_g, None);
    }

    #[test]
    fn json_missing_a_key_is_rejected() {
        let err = parse_json(r#"[{"species": "Adelie", "island": "Dream"}]"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::MissingColumn(_))
        ));
    }

    #[test]
    fn json_must_be_an_array() {
        assert!(parse_json(r#"{"species": "Adelie"}"#).is_err());
    }

    #[test]
    fn parquet_round_trip_through_arrow_writer() {
        let text = |name: &str| Field::new(name, DataType::Utf8, true);
        let num = |name: &str| Field::new(name, DataType::Float64, true);
        let schema = Arc::new(Schema::new(vec![
            text("species"),
            text("island"),
            num("bill_length_mm"),
            num("bill_depth_mm"),
            num("flipper_length_mm"),
            num("body_mass_g"),
            text("sex"),
            Field::new("year", DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Gentoo", "Adelie"])),
                Arc::new(StringArray::from(vec!["Biscoe", "Dream"])),
                Arc::new(Float64Array::from(vec![Some(46.1), None])),
                Arc::new(Float64Array::from(vec![Some(13.2), None])),
                Arc::new(Float64Array::from(vec![Some(211.0), None])),
                Arc::new(Float64Array::from(vec![Some(4500.0), None])),
                Arc::new(StringArray::from(vec![Some("female"), None])),
                Arc::new(Int64Array::from(vec![2007, 2008])),
            ],
        )
        .unwrap();

        let file = write_parquet(schema, &[batch]);

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].species, Species::Gentoo);
        assert_eq!(ds.records()[0].body_mass_g, Some(4500.0));
        assert_eq!(ds.records()[0].sex, Some(Sex::Female));
        assert_eq!(ds.records()[1].bill_length_mm, None);
        assert_eq!(ds.records()[1].year, Some(2008));
    }

    fn write_parquet(schema: Arc<Schema>, batches: &[RecordBatch]) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer =
            ArrowWriter::try_new(file.as_file().try_clone().unwrap(), schema, None).unwrap();
        for batch in batches {
            writer.write(batch).unwrap();
        }
        writer.close().unwrap();
        file
    }

    #[test]
    fn empty_parquet_missing_columns_is_rejected() {
        let schema = Arc::new(Schema::new(vec![Field::new("species", DataType::Utf8, true)]));
        let file = write_parquet(schema, &[]);

        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::MissingColumn(c)) if c == "island"
        ));
    }

    #[test]
    fn parquet_errors_report_one_row_number() {
        let text = |name: &str| Field::new(name, DataType::Utf8, true);
        let num = |name: &str| Field::new(name, DataType::Float64, true);
        let schema = Arc::new(Schema::new(vec![
            text("species"),
            text("island"),
            num("bill_length_mm"),
            num("bill_depth_mm"),
            num("flipper_length_mm"),
            num("body_mass_g"),
            text("sex"),
            num("year"),
        ]));
        let batch = |species: &str, island: Option<&str>| {
            RecordBatch::try_new(
                schema.clone(),
                vec![
                    Arc::new(StringArray::from(vec![species])),
                    Arc::new(StringArray::from(vec![island])),
                    Arc::new(Float64Array::from(vec![Some(40.0)])),
                    Arc::new(Float64Array::from(vec![Some(18.0)])),
                    Arc::new(Float64Array::from(vec![Some(190.0)])),
                    Arc::new(Float64Array::from(vec![Some(3600.0)])),
                    Arc::new(StringArray::from(vec![Some("male")])),
                    Arc::new(Float64Array::from(vec![Some(2008.0)])),
                ],
            )
            .unwrap()
        };

        // The second bird has no island.
        let file = write_parquet(
            schema.clone(),
            &[batch("Adelie", Some("Dream")), batch("Gentoo", None)],
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::InvalidValue { row: 1, column, .. }) if column == "island"
        ));

        let file = write_parquet(
            schema.clone(),
            &[batch("Adelie", Some("Dream")), batch("Emperor", Some("Ross"))],
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("row 1: column 'species'"));
    }
}
