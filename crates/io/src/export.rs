//! Per-point estimates to CSV.

use std::path::Path;

use rainmap_pipeline::InterpolationResult;
use serde::Serialize;
use tracing::info;

use crate::error::{IoError, csv_error};

#[derive(Serialize)]
struct RecordRow {
    x: f64,
    y: f64,
    value: f64,
    class: u8,
}

/// Writes one `x,y,value,class` row per grid point, in grid order.
///
/// # Errors
///
/// [`IoError::Csv`] if the file cannot be created or written.
pub fn write_records_csv(path: &Path, result: &InterpolationResult) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    for r in result.records() {
        writer
            .serialize(RecordRow {
                x: r.coord[0],
                y: r.coord[1],
                value: r.value,
                class: r.class,
            })
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), n_records = result.records().len(), "wrote records");
    Ok(())
}
