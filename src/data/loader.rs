use std::path::Path;

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Catalog, MissingColumn};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the catalog from a source table, once per process lifetime (or
/// again on an explicit reload).
///
/// An absent or unreadable source is a recoverable condition: the viewer
/// still comes up, just over the empty catalog, so this never fails.
pub fn load_catalog(path: &Path) -> Catalog {
    match read_catalog(path) {
        Ok(catalog) => {
            log::info!(
                "loaded {} catalog rows from {}",
                catalog.len(),
                path.display()
            );
            catalog
        }
        Err(err) => {
            log::warn!(
                "falling back to empty catalog, source {} rejected: {err}",
                path.display()
            );
            Catalog::empty()
        }
    }
}

/// Strict variant of [`load_catalog`]: surfaces why the source was
/// rejected instead of recovering. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – delimited text with a header row (the primary format)
/// * `.json` – records-oriented array of flat objects, the default
///             `df.to_json(orient='records')` shape
pub fn read_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_csv(path),
        "json" => read_json(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

/// Why a source table was rejected. Every variant is recovered by
/// [`load_catalog`]; incomplete *rows* are not an error at all, they are
/// silently dropped during catalog construction.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source table unreadable")]
    MissingSource(#[source] std::io::Error),
    #[error(transparent)]
    MissingColumn(#[from] MissingColumn),
    #[error("malformed CSV source")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON source")]
    Json(#[from] serde_json::Error),
    #[error("JSON source must be an array of flat records")]
    JsonShape,
    #[error("unsupported source extension `.{0}`")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<Catalog, LoadError> {
    let file = std::fs::File::open(path).map_err(LoadError::MissingSource)?;
    let mut reader = csv::Reader::from_reader(file);

    let column_names: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(Catalog::from_records(column_names, records)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema:
///
/// ```json
/// [
///   { "SERVER": "WSSPRD01", "DB": "Sales", "SCHEMA": "dbo",
///     "DATA MART": "Finance", "REPORT": "Q1 summary" },
///   ...
/// ]
/// ```
fn read_json(path: &Path) -> Result<Catalog, LoadError> {
    let text = std::fs::read_to_string(path).map_err(LoadError::MissingSource)?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let records = root.as_array().ok_or(LoadError::JsonShape)?;

    // Collect the column set up front; records may omit keys.
    let mut column_names: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for record in records {
        let obj = record.as_object().ok_or(LoadError::JsonShape)?;
        for key in obj.keys() {
            if !column_names.iter().any(|c| c == key) {
                column_names.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows: Vec<Vec<String>> = objects
        .iter()
        .map(|obj| {
            column_names
                .iter()
                .map(|col| obj.get(col).map(scalar_to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(Catalog::from_records(column_names, rows)?)
}

/// Render a scalar JSON value the way it appeared in the source; null and
/// absent both become the empty string, which marks a key column missing.
fn scalar_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}
