//! Distance-matrix ingestion from tabular sources.
//!
//! The expected layout is a labelled square table:
//!
//! ```text
//! city,Seoul,Busan,Daegu
//! Seoul,0,325,237
//! Busan,325,0,88
//! Daegu,237,88,0
//! ```
//!
//! City names come from the first column of each data row; the header row
//! only has to provide one column per city. Every failure is reported as
//! [`EvolveError::Ingestion`] so the caller can reject the upload without
//! confusing it with a solver fault.

use crate::error::{EvolveError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Cities and distances parsed from a source, ready for the TSP solver.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixSource {
    pub cities: Vec<String>,
    pub dist_matrix: Vec<Vec<f64>>,
}

/// Parses a CSV distance matrix.
pub fn parse_distance_matrix<R: Read>(reader: R) -> Result<MatrixSource> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = rdr.headers()?.len().saturating_sub(1);
    if columns == 0 {
        return Err(EvolveError::ingestion(
            "header row must have a label column followed by one column per city",
        ));
    }

    let mut cities = Vec::new();
    let mut dist_matrix = Vec::new();

    for (r, record) in rdr.records().enumerate() {
        let record = record?;
        let line = r + 2;

        let label = record.get(0).unwrap_or_default();
        if label.is_empty() {
            return Err(EvolveError::ingestion(format!(
                "line {line}: missing city label"
            )));
        }

        let row = record
            .iter()
            .skip(1)
            .enumerate()
            .map(|(c, field)| parse_distance(field, line, c + 1))
            .collect::<Result<Vec<f64>>>()?;

        cities.push(label.to_string());
        dist_matrix.push(row);
    }

    if dist_matrix.is_empty() {
        return Err(EvolveError::ingestion("matrix source has no data rows"));
    }
    if dist_matrix.len() != columns {
        return Err(EvolveError::ingestion(format!(
            "matrix must be square: {} rows but {columns} distance columns",
            dist_matrix.len()
        )));
    }

    Ok(MatrixSource {
        cities,
        dist_matrix,
    })
}

/// Reads and parses a CSV distance matrix from a file.
pub fn read_distance_matrix(path: impl AsRef<Path>) -> Result<MatrixSource> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
        EvolveError::ingestion(format!("cannot open {}: {err}", path.display()))
    })?;
    parse_distance_matrix(file)
}

fn parse_distance(field: &str, line: usize, column: usize) -> Result<f64> {
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(EvolveError::ingestion(format!(
            "line {line}, column {column}: '{field}' is not a finite number"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_labelled_square_matrix() {
        let source = "city,A,B,C\nA,0,1,2\nB,1,0,3.5\nC, 2 ,3.5,0\n";
        let parsed = parse_distance_matrix(source.as_bytes()).unwrap();
        assert_eq!(parsed.cities, vec!["A", "B", "C"]);
        assert_eq!(parsed.dist_matrix[1], vec![1.0, 0.0, 3.5]);
        assert_eq!(parsed.dist_matrix[2], vec![2.0, 3.5, 0.0]);
    }

    #[test]
    fn test_rejects_non_numeric_cell() {
        let source = "city,A,B\nA,0,x\nB,1,0\n";
        let err = parse_distance_matrix(source.as_bytes()).unwrap_err();
        assert!(matches!(err, EvolveError::Ingestion(_)));
        assert!(err.to_string().contains("line 2, column 2: 'x'"));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let source = "city,A,B\nA,0,1\nB,1\n";
        let err = parse_distance_matrix(source.as_bytes()).unwrap_err();
        assert!(matches!(err, EvolveError::Ingestion(_)));
    }

    #[test]
    fn test_rejects_non_square() {
        let source = "city,A,B\nA,0,1\n";
        let err = parse_distance_matrix(source.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("1 rows but 2 distance columns"));
    }

    #[test]
    fn test_rejects_empty_and_headerless_sources() {
        assert!(matches!(
            parse_distance_matrix("city,A\n".as_bytes()),
            Err(EvolveError::Ingestion(_))
        ));
        assert!(matches!(
            parse_distance_matrix("".as_bytes()),
            Err(EvolveError::Ingestion(_))
        ));
    }

    #[test]
    fn test_rejects_missing_label_and_nan() {
        let err = parse_distance_matrix("city,A\n,0\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("missing city label"));

        let err = parse_distance_matrix("city,A\nA,NaN\n".as_bytes()).unwrap_err();
        assert!(matches!(err, EvolveError::Ingestion(_)));
    }

    #[test]
    fn test_missing_file_is_ingestion_error() {
        let err = read_distance_matrix("/nonexistent/matrix.csv").unwrap_err();
        assert!(matches!(err, EvolveError::Ingestion(_)));
    }
}
