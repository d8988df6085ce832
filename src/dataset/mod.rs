//! Scaled-integer datasets
//!
//! Measurements are stored as `i32` values pre-multiplied by [`SCALE`] so the
//! device only ever does integer work. The record order is kept but carries no
//! meaning for the statistics.
//!
//! # Record format
//!
//! [`Dataset::from_reader`] accepts one whitespace-separated record per line:
//!
//! ```text
//! location year month day time temperature
//! CULLINGWORTH 2018 1 1 0000 -1.9
//! ```
//!
//! Only the sixth column is kept.

mod padding;

pub use padding::{PaddedDataset, PaddingDescriptor};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Fixed pre-scale factor applied to every measurement.
pub const SCALE: i32 = 10;

/// Zero-based column holding the measurement in a record.
const MEASUREMENT_COLUMN: usize = 5;

/// An ordered sequence of scaled measurements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    values: Vec<i32>,
}

impl Dataset {
    /// Wrap values that are already scaled by [`SCALE`].
    pub fn from_scaled(values: Vec<i32>) -> Self {
        Self { values }
    }

    /// Scale real measurements, rounding to the nearest integer.
    pub fn from_measurements(measurements: &[f64]) -> Self {
        Self {
            values: measurements.iter().map(|&m| scale(m)).collect(),
        }
    }

    /// Parse records from a reader. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` for a record with fewer than six columns or a
    /// measurement that is not a finite number inside the scaled `i32` range,
    /// and `Error::Io` if reading fails.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut values = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            values.push(parse_record(&line, index + 1)?);
        }
        Ok(Self { values })
    }

    /// Load records from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader(BufReader::new(file))?;
        debug!("loaded {} records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Scaled values in insertion order.
    #[inline]
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Number of real elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the dataset has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<i32>> for Dataset {
    fn from(values: Vec<i32>) -> Self {
        Self::from_scaled(values)
    }
}

/// Undo the pre-scale for display.
#[inline]
pub fn unscale(value: i64) -> f64 {
    value as f64 / f64::from(SCALE)
}

#[inline]
fn scale(measurement: f64) -> i32 {
    (measurement * f64::from(SCALE)).round() as i32
}

fn parse_record(line: &str, line_no: usize) -> Result<i32> {
    let field = line
        .split_whitespace()
        .nth(MEASUREMENT_COLUMN)
        .ok_or_else(|| Error::Parse {
            line: line_no,
            reason: format!(
                "expected at least {} columns, got {}",
                MEASUREMENT_COLUMN + 1,
                line.split_whitespace().count()
            ),
        })?;

    let measurement: f64 = field.parse().map_err(|e| Error::Parse {
        line: line_no,
        reason: format!("invalid measurement '{field}': {e}"),
    })?;

    let scaled = measurement * f64::from(SCALE);
    if !scaled.is_finite() || scaled < f64::from(i32::MIN) || scaled > f64::from(i32::MAX) {
        return Err(Error::Parse {
            line: line_no,
            reason: format!("measurement '{field}' is out of range"),
        });
    }
    Ok(scale(measurement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_from_measurements_rounds() {
        // 2.3 * 10 is 22.999999999999996 in binary floating point
        let d = Dataset::from_measurements(&[2.3, -1.9, 0.0]);
        assert_eq!(d.values(), &[23, -19, 0]);
    }

    #[test]
    fn test_from_reader_takes_sixth_column() {
        let text = "CULLINGWORTH 2018 1 1 0000 -1.9\n\nCULLINGWORTH 2018 1 1 0100 4.2\n";
        let d = Dataset::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(d.values(), &[-19, 42]);
    }

    #[test]
    fn test_short_record_reports_line() {
        let text = "A 2018 1 1 0000 1.0\nB 2018 1 1\n";
        match Dataset::from_reader(Cursor::new(text)) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_measurement() {
        let text = "A 2018 1 1 0000 warm\n";
        assert!(matches!(
            Dataset::from_reader(Cursor::new(text)),
            Err(Error::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_unscale() {
        assert_eq!(unscale(25), 2.5);
        assert_eq!(unscale(-19), -1.9);
    }
}
