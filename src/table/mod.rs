//! Whitespace-delimited numeric tables as written by the simulation.

use std::fs;
use std::path::Path;

use crate::error::{Result, UqError};

/// Row-major matrix of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        let n = rows.len();
        Some(Self {
            rows: n,
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.get(r, c));
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Series to draw against a time vector of `steps` samples, one per realization.
    ///
    /// A (realizations x steps) table is used as is; a (steps x realizations) table is
    /// transposed. When both dimensions equal `steps`, each row is a realization.
    pub fn series_against(&self, name: &str, steps: usize) -> Result<Vec<Vec<f64>>> {
        let oriented = if self.cols == steps {
            self.clone()
        } else if self.rows == steps {
            self.transpose()
        } else {
            return Err(UqError::ShapeMismatch {
                name: name.to_string(),
                rows: self.rows,
                cols: self.cols,
                steps,
            });
        };
        Ok((0..oriented.rows).map(|r| oriented.row(r).to_vec()).collect())
    }

    /// Flatten a single row or single column.
    pub fn into_vector(self) -> Option<Vec<f64>> {
        (self.rows == 1 || self.cols == 1).then_some(self.data)
    }
}

/// Parse table text. `path` only labels errors.
pub fn parse_table(text: &str, path: &Path) -> Result<Matrix> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split_once('#').map_or(raw, |(data, _)| data).trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|field| {
                field.parse::<f64>().map_err(|_| UqError::MalformedTable {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    reason: format!("'{field}' is not a number"),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(UqError::MalformedTable {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    reason: format!("expected {} columns, found {}", first.len(), row.len()),
                });
            }
        }
        rows.push(row);
    }
    Matrix::from_rows(rows).ok_or_else(|| UqError::EmptyTable {
        path: path.to_path_buf(),
    })
}

pub fn read_table(path: &Path) -> Result<Matrix> {
    let text = fs::read_to_string(path).map_err(|e| UqError::io(path, e))?;
    let m = parse_table(&text, path)?;
    tracing::debug!(path = %path.display(), rows = m.rows(), cols = m.cols(), "loaded table");
    Ok(m)
}

/// Read the shared time vector, which must be one-dimensional.
pub fn read_time_vector(path: &Path) -> Result<Vec<f64>> {
    let m = read_table(path)?;
    let (rows, cols) = m.shape();
    m.into_vector().ok_or_else(|| UqError::NotAVector {
        path: path.to_path_buf(),
        rows,
        cols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Matrix> {
        parse_table(text, Path::new("yout"))
    }

    #[test]
    fn test_parse_with_comments_and_blanks() {
        let m = parse("# header\n1 2 3\n\n  4.5e-1\t5   6 # trailing\n").unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.row(1), &[0.45, 5.0, 6.0]);
    }

    #[test]
    fn test_parse_accepts_nan_and_inf() {
        let m = parse("nan 1\n-inf 2\n").unwrap();
        assert!(m.get(0, 0).is_nan());
        assert_eq!(m.get(1, 0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        match parse("1 2\n3\n") {
            Err(UqError::MalformedTable { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_field_is_rejected() {
        let err = parse("1 2\n3 x\n").unwrap_err();
        assert!(err.to_string().contains("'x' is not a number"), "{err}");
    }

    #[test]
    fn test_empty_table() {
        assert!(matches!(parse("# only comments\n\n"), Err(UqError::EmptyTable { .. })));
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.row(2), &[3.0, 6.0]);
    }

    #[test]
    fn test_series_from_steps_by_realizations() {
        let rows: Vec<Vec<f64>> = (0..100)
            .map(|t| (0..5).map(|r| (t * 10 + r) as f64).collect())
            .collect();
        let m = Matrix::from_rows(rows).unwrap();
        let series = m.series_against("yout", 100).unwrap();
        assert_eq!(series.len(), 5);
        assert!(series.iter().all(|s| s.len() == 100));
        assert_eq!(series[3][2], 23.0);
    }

    #[test]
    fn test_series_from_realizations_by_steps() {
        let m = Matrix::from_rows(vec![vec![0.0; 100]; 5]).unwrap();
        let series = m.series_against("z1out", 100).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series[0].len(), 100);
    }

    #[test]
    fn test_square_table_rows_are_series() {
        let m = parse("0 1 2\n10 11 12\n20 21 22\n").unwrap();
        let series = m.series_against("yout", 3).unwrap();
        assert_eq!(series[0], vec![0.0, 1.0, 2.0]);
        assert_eq!(series[2], vec![20.0, 21.0, 22.0]);
    }

    #[test]
    fn test_series_shape_mismatch() {
        let m = Matrix::from_rows(vec![vec![0.0; 4]; 3]).unwrap();
        assert!(matches!(
            m.series_against("z2out", 10),
            Err(UqError::ShapeMismatch { rows: 3, cols: 4, steps: 10, .. })
        ));
    }

    #[test]
    fn test_vector_orientation() {
        let col = parse("0\n0.1\n0.2\n").unwrap();
        assert_eq!(col.into_vector(), Some(vec![0.0, 0.1, 0.2]));
        let grid = parse("1 2\n3 4\n").unwrap();
        assert_eq!(grid.into_vector(), None);
    }
}
