use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

use super::model::FilteredView;

// ---------------------------------------------------------------------------
// Exporter: filtered view → downloadable CSV payload
// ---------------------------------------------------------------------------

/// MIME type of the export payload.
pub const CSV_MIME: &str = "text/csv";

/// Filename suggested to the browser for the download.
pub const DOWNLOAD_FILENAME: &str = "filtered_data.csv";

/// Serialize the view as comma-delimited UTF-8 text: a header row in the
/// original column order, then one line per row with every value verbatim.
/// A zero-row view still produces the header-only document.
pub fn csv_bytes(view: &FilteredView) -> Vec<u8> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    // Writing into a Vec cannot hit I/O errors and every record matches
    // the header width, so these results never fail.
    writer.write_record(view.column_names()).unwrap();
    for row in view.rows() {
        writer.write_record(&row.fields).unwrap();
    }
    writer.into_inner().unwrap()
}

/// Self-describing download unit handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Download {
    pub filename: String,
    pub mime: String,
    pub content_base64: String,
}

impl Download {
    /// `data:` URI suitable for a direct browser download link.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.content_base64)
    }
}

/// Wrap the view's CSV rendition as a base64-encoded download payload.
pub fn download(view: &FilteredView) -> Download {
    Download {
        filename: DOWNLOAD_FILENAME.to_string(),
        mime: CSV_MIME.to_string(),
        content_base64: STANDARD.encode(csv_bytes(view)),
    }
}
