//! Validated pairwise correlation matrix.

use crate::domain::error::SignalError;

const TOLERANCE: f64 = 1e-9;

/// Square, symmetric matrix with unit diagonal and entries in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn new(values: Vec<Vec<f64>>) -> Result<Self, SignalError> {
        let n = values.len();
        for (i, row) in values.iter().enumerate() {
            if row.len() != n {
                return Err(invalid(format!(
                    "row {i} has {} columns, expected {n}",
                    row.len()
                )));
            }
            for (j, &v) in row.iter().enumerate() {
                if !v.is_finite() || !(-1.0..=1.0).contains(&v) {
                    return Err(invalid(format!("entry ({i}, {j}) = {v} is outside [-1, 1]")));
                }
            }
            if (row[i] - 1.0).abs() > TOLERANCE {
                return Err(invalid(format!("diagonal entry ({i}, {i}) = {} is not 1", row[i])));
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if (values[i][j] - values[j][i]).abs() > TOLERANCE {
                    return Err(invalid(format!(
                        "entries ({i}, {j}) and ({j}, {i}) differ: {} vs {}",
                        values[i][j], values[j][i]
                    )));
                }
            }
        }
        Ok(Self { values })
    }

    /// Build from the strict upper triangle, row by row: (0,1), (0,2), ..., (n-2,n-1).
    pub fn from_upper_triangle(n: usize, upper: &[f64]) -> Result<Self, SignalError> {
        let expected = n * n.saturating_sub(1) / 2;
        if upper.len() != expected {
            return Err(invalid(format!(
                "{} upper-triangle values for {n} assets, expected {expected}",
                upper.len()
            )));
        }
        let mut values = vec![vec![0.0; n]; n];
        let mut k = 0;
        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                values[i][j] = upper[k];
                values[j][i] = upper[k];
                k += 1;
            }
        }
        Self::new(values)
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }
}

fn invalid(reason: String) -> SignalError {
    SignalError::InvalidMatrix { reason }
}
