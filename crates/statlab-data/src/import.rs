//! Loading `(x, y)` samples from JSON or CSV text.

use std::{fs, io, path::Path};

use serde::Deserialize;
use statlab_stats::sample::{DataPoint, Dataset};

/// Errors raised while reading a dataset file.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ImportError {
    #[display("CSV header must name at least two columns, found {columns}")]
    InvalidCsvHeader { columns: usize },
    #[display("no valid data points found")]
    NoDataPoints,
    #[display("malformed JSON input: {_0}")]
    Json(serde_json::Error),
    #[display("malformed CSV input: {_0}")]
    Csv(csv::Error),
    #[display("failed to read input: {_0}")]
    Io(io::Error),
}

/// Accepted JSON document shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonInput {
    Points(Vec<DataPoint>),
    Numbers(Vec<f64>),
    Wrapped { data: Vec<serde_json::Value> },
}

impl JsonInput {
    fn into_dataset(self) -> Dataset {
        match self {
            Self::Points(points) => Dataset::new(points),
            Self::Numbers(values) => Dataset::from_sequence(values),
            // generator responses may mix in non-numeric entries
            Self::Wrapped { data } => {
                Dataset::from_sequence(data.iter().filter_map(serde_json::Value::as_f64))
            }
        }
    }
}

/// Parses a dataset from text.
///
/// JSON is tried first: an array of `{"x": .., "y": ..}` objects, an array of
/// numbers, or `{"data": [numbers]}`. Numbers map to points `(index, value)`.
/// Anything not starting like a JSON document is read as CSV with a header row;
/// rows whose first two cells are not numbers are skipped.
///
/// # Examples
///
/// ```
/// use statlab_data::import::parse_points;
///
/// let csv = "height,weight\n170,65\n182,80\n";
/// let dataset = parse_points(csv).unwrap();
/// assert_eq!(dataset.len(), 2);
///
/// let dataset = parse_points(r#"{"data": [1.5, 2.5]}"#).unwrap();
/// assert_eq!(dataset.points()[1].x, 1.0);
/// ```
pub fn parse_points(text: &str) -> Result<Dataset, ImportError> {
    let dataset = match serde_json::from_str::<JsonInput>(text) {
        Ok(input) => input.into_dataset(),
        Err(e) if looks_like_json(text) => return Err(ImportError::Json(e)),
        Err(_) => parse_csv(text)?,
    };
    if dataset.is_empty() {
        return Err(ImportError::NoDataPoints);
    }
    Ok(dataset)
}

/// Reads and parses a data file.
pub fn load_points<P>(path: P) -> Result<Dataset, ImportError>
where
    P: AsRef<Path>,
{
    let text = fs::read_to_string(path).map_err(ImportError::Io)?;
    parse_points(&text)
}

fn looks_like_json(text: &str) -> bool {
    text.trim_start().starts_with(['[', '{'])
}

fn parse_csv(text: &str) -> Result<Dataset, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let columns = reader.headers().map_err(ImportError::Csv)?.len();
    if columns < 2 {
        return Err(ImportError::InvalidCsvHeader { columns });
    }

    let mut points = Vec::new();
    for record in reader.records() {
        let record = record.map_err(ImportError::Csv)?;
        let cell = |i| record.get(i).and_then(|v: &str| v.parse::<f64>().ok());
        if let (Some(x), Some(y)) = (cell(0), cell(1)) {
            points.push(DataPoint::new(x, y));
        }
    }
    Ok(Dataset::new(points))
}
