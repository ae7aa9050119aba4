use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context};
use ndarray::{Array1, ArrayView1};

/// Paired x/y samples read from a two-column text table.
#[derive(Debug, Clone)]
pub struct Dataset {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl Dataset {
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> anyhow::Result<Self> {
        if x.len() != y.len() {
            bail!(
                "Column length mismatch: {} x-values but {} y-values",
                x.len(),
                y.len()
            );
        }
        Ok(Dataset { x, y })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset {}", path.display()))?;
        let dataset = Self::from_reader(file)
            .with_context(|| format!("Failed to parse dataset {}", path.display()))?;
        log::info!("Loaded {} samples from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Parses whitespace or comma separated columns. Blank lines and `#` comments are skipped.
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut x = Vec::new();
        let mut y = Vec::new();

        for (idx, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", idx + 1))?;
            let content = line.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }

            let fields: Vec<&str> = content
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|f| !f.is_empty())
                .collect();
            if fields.len() != 2 {
                bail!(
                    "Line {}: expected 2 columns, found {}",
                    idx + 1,
                    fields.len()
                );
            }

            let parse = |field: &str| {
                field
                    .parse::<f64>()
                    .with_context(|| format!("Line {}: invalid number '{}'", idx + 1, field))
            };
            x.push(parse(fields[0])?);
            y.push(parse(fields[1])?);
        }

        if x.is_empty() {
            bail!("Dataset contains no samples");
        }

        Ok(Dataset {
            x: Array1::from(x),
            y: Array1::from(y),
        })
    }

    pub fn x(&self) -> ArrayView1<f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<f64> {
        self.y.view()
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Smallest and largest value of each column, as `((x_min, x_max), (y_min, y_max))`.
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let range = |a: &Array1<f64>| {
            a.iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
        };
        (range(&self.x), range(&self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_parse_whitespace_columns() {
        let text = "1.0 2.0\n  3.5\t-4.25\n\n5e-1    6\n";
        let dataset = Dataset::from_reader(text.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.x(), array![1.0, 3.5, 0.5]);
        assert_eq!(dataset.y(), array![2.0, -4.25, 6.0]);
    }

    #[test]
    fn test_parse_comments_and_commas() {
        let text = "# x, y\n1, 2\n3,4 # trailing\n";
        let dataset = Dataset::from_reader(text.as_bytes()).unwrap();
        assert_eq!(dataset.x(), array![1.0, 3.0]);
        assert_eq!(dataset.y(), array![2.0, 4.0]);
        assert_eq!(dataset.bounds(), ((1.0, 3.0), (2.0, 4.0)));
    }

    #[test]
    fn test_malformed_input() {
        let err = Dataset::from_reader("1.0 2.0\n3.0\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Line 2"));

        let err = Dataset::from_reader("1.0 abc\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid number"));

        assert!(Dataset::from_reader("# only a comment\n".as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::load("does/not/exist/dataset2.txt").unwrap_err();
        assert!(err.to_string().contains("Failed to open dataset"));
    }

    #[test]
    fn test_bundled_dataset() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/dataset2.txt");
        let dataset = Dataset::load(path).unwrap();
        assert_eq!(dataset.len(), 120);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_new_rejects_mismatch() {
        assert!(Dataset::new(array![1.0, 2.0], array![1.0]).is_err());
    }
}
