//! Correlation matrix loader.
//!
//! One matrix row per CSV line, no header, numeric fields only.

use crate::domain::correlation::CorrelationMatrix;
use crate::domain::error::SignalError;
use std::path::Path;

pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<CorrelationMatrix, SignalError> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SignalError::Data {
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| SignalError::Data {
            reason: format!("CSV parse error in {}: {}", path.display(), e),
        })?;
        let row = record
            .iter()
            .enumerate()
            .map(|(j, field)| {
                field.parse::<f64>().map_err(|e| SignalError::InvalidMatrix {
                    reason: format!("row {} column {}: '{}' is not a number ({})", i, j, field, e),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        rows.push(row);
    }

    let matrix = CorrelationMatrix::new(rows)?;
    tracing::debug!(path = %path.display(), assets = matrix.size(), "loaded correlation matrix");
    Ok(matrix)
}
