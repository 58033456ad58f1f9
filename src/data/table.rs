use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an external data table.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with column names (also the fallback)
/// * `.json`    – `[{ "EXTKEY": "...", "col": ... }, ...]`
/// * `.parquet` – flat scalar columns, as written by Pandas or Polars
pub fn load_table(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        _ => load_csv(path),
    }?;
    debug!(
        "loaded table {}: {} columns, {} rows",
        path.display(),
        table.columns().len(),
        table.len()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut table = Table::new(headers);
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        table.push_row(record.iter().map(|v| CellValue::guess(v.trim())).collect());
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Columns are ordered by first appearance across records.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let mut table = Table::new(columns.clone());
    for rec in records {
        let Some(obj) = rec.as_object() else { continue };
        table.push_row(
            columns
                .iter()
                .map(|c| obj.get(c).map_or(CellValue::Null, json_to_cell))
                .collect(),
        );
    }
    Ok(table)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut table = Table::new(columns);
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        if batch.num_columns() != table.columns().len() {
            bail!(
                "record batch has {} columns, schema has {}",
                batch.num_columns(),
                table.columns().len()
            );
        }
        for row in 0..batch.num_rows() {
            table.push_row(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell(col, row))
                    .collect(),
            );
        }
    }
    Ok(table)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|s| CellValue::String(s.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|s| CellValue::String(s.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };
    cell.unwrap_or_else(|| CellValue::String(format!("{:?}", col.data_type())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn csv_cells_are_typed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "EXTKEY,x,y,note\nK1,1,2.5,\nK2,3,4,abc\n").unwrap();

        let t = load_table(&path).unwrap();
        assert_eq!(t.columns(), ["EXTKEY", "x", "y", "note"]);
        assert_eq!(t.len(), 2);
        let first: Vec<CellValue> = t.rows().next().unwrap().map(|(_, v)| v.clone()).collect();
        assert_eq!(
            first,
            vec![
                CellValue::String("K1".into()),
                CellValue::Integer(1),
                CellValue::Float(2.5),
                CellValue::Null,
            ]
        );
    }

    #[test]
    fn json_records_union_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        fs::write(
            &path,
            r#"[{"EXTKEY": "K1", "x": 1}, {"EXTKEY": "K2", "y": 0.5, "ok": true}]"#,
        )
        .unwrap();

        let t = load_table(&path).unwrap();
        assert_eq!(t.columns(), ["EXTKEY", "x", "ok", "y"]);
        let second: Vec<CellValue> = t.rows().nth(1).unwrap().map(|(_, v)| v.clone()).collect();
        assert_eq!(
            second,
            vec![
                CellValue::String("K2".into()),
                CellValue::Null,
                CellValue::Bool(true),
                CellValue::Float(0.5),
            ]
        );
    }

    #[test]
    fn parquet_scalar_columns() {
        use arrow::array::{Float64Array, Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("EXTKEY", DataType::Utf8, false),
            Field::new("n", DataType::Int64, true),
            Field::new("w", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["K1", "K2"])),
                Arc::new(Int64Array::from(vec![Some(7), None])),
                Arc::new(Float64Array::from(vec![0.25, 1.5])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.parquet");
        let file = fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let t = load_table(&path).unwrap();
        assert_eq!(t.columns(), ["EXTKEY", "n", "w"]);
        let rows: Vec<Vec<CellValue>> = t
            .rows()
            .map(|r| r.map(|(_, v)| v.clone()).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec![CellValue::String("K1".into()), CellValue::Integer(7), CellValue::Float(0.25)],
                vec![CellValue::String("K2".into()), CellValue::Null, CellValue::Float(1.5)],
            ]
        );
    }

    #[test]
    fn json_must_be_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        fs::write(&path, r#"{"EXTKEY": "K1"}"#).unwrap();
        assert!(load_table(&path).is_err());
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_table(&dir.path().join("absent.csv")).is_err());
    }
}
