//! CSV dataset reader.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

use crate::data_handling::{one_hot, Dataset};
use crate::math::Matrix;

/// Configuration for reading labelled CSV files.
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// Column name holding the class index. Ignored when `has_headers` is
    /// false, in which case the first column is the label.
    pub label_column: String,
    pub delimiter: u8,
    pub has_headers: bool,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            label_column: "label".to_string(),
            delimiter: b',',
            has_headers: true,
        }
    }
}

/// Read a labelled CSV file into a `Dataset`.
///
/// Every column other than the label column is parsed as an `f64` feature;
/// the label column is a class index in `[0, n_classes)` and is one-hot
/// encoded into the label matrix.
pub fn read_csv_dataset<P: AsRef<Path>>(
    path: P,
    n_classes: usize,
    config: &CsvReaderConfig,
) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.has_headers)
        .from_path(&path)
        .with_context(|| format!("Failed to open CSV file: {}", path.as_ref().display()))?;

    let label_idx = if config.has_headers {
        let headers = reader.headers().context("Failed to read CSV header row")?;
        find_column(headers, &config.label_column)
            .ok_or_else(|| anyhow!("Missing label column '{}'", config.label_column))?
    } else {
        0
    };

    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut n_features = None;

    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV record {}", row))?;

        let width = record.len().saturating_sub(1);
        match n_features {
            None => n_features = Some(width),
            Some(expected) if expected != width => {
                return Err(anyhow!(
                    "Record {} has {} feature columns, expected {}",
                    row,
                    width,
                    expected
                ));
            }
            Some(_) => {}
        }

        for (col, field) in record.iter().enumerate() {
            if col == label_idx {
                let label: usize = field
                    .trim()
                    .parse()
                    .with_context(|| format!("Bad label '{}' at record {}", field, row))?;
                labels.push(label);
            } else {
                let value: f64 = field
                    .trim()
                    .parse()
                    .with_context(|| format!("Bad feature '{}' at record {}", field, row))?;
                features.push(value);
            }
        }
    }

    let n_features = n_features.unwrap_or(0);
    let x = Matrix::from_shape_vec((labels.len(), n_features), features)
        .context("CSV feature buffer does not match its shape")?;
    let y = one_hot(&labels, n_classes).context("CSV labels out of range")?;

    Dataset::new(x, y).context("CSV dataset rows disagree")
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_labelled_rows() {
        let path = write_temp(
            "linclass_csv_basic.csv",
            "f1,f2,label\n0.5,1.5,0\n-1.0,2.0,1\n0.0,0.0,2\n",
        );
        let data = read_csv_dataset(&path, 3, &CsvReaderConfig::default()).unwrap();
        assert_eq!(data.x.shape(), (3, 2));
        assert_eq!(data.y.shape(), (3, 3));
        assert_eq!(data.x[(1, 0)], -1.0);
        assert_eq!(data.y.onehot_decode_rows(), vec![0, 1, 2]);
    }

    #[test]
    fn label_column_position_is_free() {
        let path = write_temp(
            "linclass_csv_label_first.csv",
            "label,f1,f2\n1,0.5,1.5\n0,-1.0,2.0\n",
        );
        let data = read_csv_dataset(&path, 2, &CsvReaderConfig::default()).unwrap();
        assert_eq!(data.x.shape(), (2, 2));
        assert_eq!(data.x[(0, 0)], 0.5);
        assert_eq!(data.y.onehot_decode_rows(), vec![1, 0]);
    }

    #[test]
    fn missing_label_column_is_an_error() {
        let path = write_temp("linclass_csv_nolabel.csv", "a,b\n1.0,2.0\n");
        let err = read_csv_dataset(&path, 2, &CsvReaderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn out_of_range_label_is_an_error() {
        let path = write_temp("linclass_csv_badlabel.csv", "f1,label\n1.0,5\n");
        assert!(read_csv_dataset(&path, 3, &CsvReaderConfig::default()).is_err());
    }
}
