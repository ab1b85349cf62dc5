//! Matrix Market exchange-format reader.
//!
//! Loads `coordinate` and `array` files with `real`, `double`, `integer` or `pattern` fields and
//! `general`, `symmetric` or `skew-symmetric` storage into a dense `faer::Mat<f64>`. Coordinate
//! duplicates are summed, and the mirrored half of symmetric storage is filled in.
//!
//! # References
//! - NIST Matrix Market format: https://math.nist.gov/MatrixMarket/formats.html

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use faer::Mat;
use log::debug;
use thiserror::Error;

use crate::matrix::dense::DenseMatrix;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing %%MatrixMarket header")]
    MissingHeader,
    #[error("unsupported Matrix Market header: {0}")]
    Unsupported(String),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: entry ({row}, {col}) outside a {nrows}x{ncols} matrix")]
    OutOfRange {
        line: usize,
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },
    #[error("line {line}: non-finite value")]
    NonFinite { line: usize },
    #[error("expected {expected} entries, found {found}")]
    EntryCount { expected: usize, found: usize },
    #[error("expected a column or row vector, got a {nrows}x{ncols} matrix")]
    NotAVector { nrows: usize, ncols: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Coordinate,
    Array,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Real,
    Integer,
    Pattern,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Symmetry {
    General,
    Symmetric,
    SkewSymmetric,
}

struct Header {
    format: Format,
    field: Field,
    symmetry: Symmetry,
}

fn parse_header(line: &str) -> Result<Header, MarketError> {
    let tokens: Vec<String> = line.split_whitespace().map(str::to_ascii_lowercase).collect();
    if tokens.first().map(String::as_str) != Some("%%matrixmarket") {
        return Err(MarketError::MissingHeader);
    }
    let unsupported = || MarketError::Unsupported(line.trim().to_string());
    if tokens.len() != 5 || tokens[1] != "matrix" {
        return Err(unsupported());
    }
    let format = match tokens[2].as_str() {
        "coordinate" => Format::Coordinate,
        "array" => Format::Array,
        _ => return Err(unsupported()),
    };
    let field = match tokens[3].as_str() {
        "real" | "double" => Field::Real,
        "integer" => Field::Integer,
        "pattern" if format == Format::Coordinate => Field::Pattern,
        _ => return Err(unsupported()),
    };
    let symmetry = match tokens[4].as_str() {
        "general" => Symmetry::General,
        "symmetric" => Symmetry::Symmetric,
        "skew-symmetric" => Symmetry::SkewSymmetric,
        _ => return Err(unsupported()),
    };
    Ok(Header { format, field, symmetry })
}

fn parse_index(tok: Option<&str>, line: usize) -> Result<usize, MarketError> {
    let tok = tok.ok_or_else(|| MarketError::Parse {
        line,
        message: "missing integer".to_string(),
    })?;
    tok.parse().map_err(|_| MarketError::Parse {
        line,
        message: format!("invalid integer `{tok}`"),
    })
}

fn parse_value(tok: Option<&str>, field: Field, line: usize) -> Result<f64, MarketError> {
    if field == Field::Pattern {
        return Ok(1.0);
    }
    let tok = tok.ok_or_else(|| MarketError::Parse {
        line,
        message: "missing value".to_string(),
    })?;
    let value = match field {
        Field::Integer => tok.parse::<i64>().map(|v| v as f64).ok(),
        _ => tok.parse::<f64>().ok(),
    }
    .ok_or_else(|| MarketError::Parse {
        line,
        message: format!("invalid number `{tok}`"),
    })?;
    if !value.is_finite() {
        return Err(MarketError::NonFinite { line });
    }
    Ok(value)
}

/// Column-major dense storage being filled from entries.
struct Dense {
    nrows: usize,
    ncols: usize,
    data: Vec<f64>,
}

impl Dense {
    /// Accumulate `v` at 0-based `(i, j)` and its mirror per `symmetry`.
    fn add(&mut self, i: usize, j: usize, v: f64, symmetry: Symmetry) {
        self.data[j * self.nrows + i] += v;
        if i != j {
            match symmetry {
                Symmetry::General => {}
                Symmetry::Symmetric => self.data[i * self.nrows + j] += v,
                Symmetry::SkewSymmetric => self.data[i * self.nrows + j] -= v,
            }
        }
    }
}

/// Parse a Matrix Market stream into a dense matrix.
pub fn read_matrix_market<R: BufRead>(reader: R) -> Result<Mat<f64>, MarketError> {
    let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));

    let header = match lines.next() {
        Some((_, line)) => parse_header(&line?)?,
        None => return Err(MarketError::MissingHeader),
    };

    // Remaining non-comment, non-blank lines.
    let mut body = lines.filter_map(|(no, line)| match line {
        Ok(l) if l.trim().is_empty() || l.trim_start().starts_with('%') => None,
        other => Some((no, other)),
    });

    let (size_no, size_line) = match body.next() {
        Some((no, line)) => (no, line?),
        None => {
            return Err(MarketError::Parse {
                line: 0,
                message: "missing size line".to_string(),
            })
        }
    };
    let mut size = size_line.split_whitespace();
    let nrows = parse_index(size.next(), size_no)?;
    let ncols = parse_index(size.next(), size_no)?;
    if header.symmetry != Symmetry::General && nrows != ncols {
        return Err(MarketError::Parse {
            line: size_no,
            message: format!("{nrows}x{ncols} matrix cannot be symmetric"),
        });
    }
    // header sizes are untrusted
    let too_large = || MarketError::Parse {
        line: size_no,
        message: format!("{nrows}x{ncols} matrix is too large to store densely"),
    };
    let len = nrows.checked_mul(ncols).ok_or_else(too_large)?;
    let mut data: Vec<f64> = Vec::new();
    data.try_reserve_exact(len).map_err(|_| too_large())?;
    data.resize(len, 0.0);
    let mut dense = Dense { nrows, ncols, data };

    let expected;
    let mut found = 0;
    match header.format {
        Format::Coordinate => {
            expected = parse_index(size.next(), size_no)?;
            for (no, line) in body {
                let line = line?;
                let mut toks = line.split_whitespace();
                let i = parse_index(toks.next(), no)?;
                let j = parse_index(toks.next(), no)?;
                if i == 0 || j == 0 || i > nrows || j > ncols {
                    return Err(MarketError::OutOfRange {
                        line: no,
                        row: i,
                        col: j,
                        nrows,
                        ncols,
                    });
                }
                let v = parse_value(toks.next(), header.field, no)?;
                dense.add(i - 1, j - 1, v, header.symmetry);
                found += 1;
            }
        }
        Format::Array => {
            // Column-major; symmetric storage lists the lower triangle only.
            let positions: Vec<(usize, usize)> = (0..ncols)
                .flat_map(|j| (0..nrows).map(move |i| (i, j)))
                .filter(|&(i, j)| match header.symmetry {
                    Symmetry::General => true,
                    Symmetry::Symmetric => i >= j,
                    Symmetry::SkewSymmetric => i > j,
                })
                .collect();
            expected = positions.len();
            for (no, line) in body {
                let line = line?;
                for tok in line.split_whitespace() {
                    let v = parse_value(Some(tok), header.field, no)?;
                    if let Some(&(i, j)) = positions.get(found) {
                        dense.add(i, j, v, header.symmetry);
                    }
                    found += 1;
                }
            }
        }
    }
    if found != expected {
        return Err(MarketError::EntryCount { expected, found });
    }

    debug!(
        "read {}x{} Matrix Market {:?} ({:?}, {:?}) with {} entries",
        dense.nrows, dense.ncols, header.format, header.field, header.symmetry, found
    );
    Ok(<Mat<f64> as DenseMatrix<f64>>::from_raw(
        dense.nrows,
        dense.ncols,
        dense.data,
    ))
}

/// Load a Matrix Market file from disk.
pub fn load_matrix_market<P: AsRef<Path>>(path: P) -> Result<Mat<f64>, MarketError> {
    let file = File::open(path.as_ref())?;
    read_matrix_market(BufReader::new(file))
}

/// Load an `n×1` or `1×n` Matrix Market file as a vector.
pub fn load_vector<P: AsRef<Path>>(path: P) -> Result<Vec<f64>, MarketError> {
    let m = load_matrix_market(path)?;
    match (m.nrows(), m.ncols()) {
        (n, 1) => Ok((0..n).map(|i| m[(i, 0)]).collect()),
        (1, n) => Ok((0..n).map(|j| m[(0, j)]).collect()),
        (nrows, ncols) => Err(MarketError::NotAVector { nrows, ncols }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<Mat<f64>, MarketError> {
        read_matrix_market(text.as_bytes())
    }

    #[test]
    fn reads_symmetric_coordinate() {
        let a = read(
            "%%MatrixMarket matrix coordinate real symmetric\n\
             % a comment\n\
             \n\
             3 3 4\n\
             1 1 4.0\n\
             2 1 -1\n\
             2 2 4.0\n\
             3 3 2.5e0\n",
        )
        .unwrap();
        assert_eq!(a[(0, 1)], -1.0);
        assert_eq!(a[(1, 0)], -1.0);
        assert_eq!(a[(2, 2)], 2.5);
        assert_eq!(a[(0, 2)], 0.0);
    }

    #[test]
    fn sums_duplicate_coordinates() {
        let a = read("%%MatrixMarket matrix coordinate real general\n2 2 3\n1 1 1.5\n1 1 0.5\n2 2 1\n")
            .unwrap();
        assert_eq!(a[(0, 0)], 2.0);
        assert_eq!(a[(1, 1)], 1.0);
    }

    #[test]
    fn reads_pattern_and_skew() {
        let p = read("%%MatrixMarket matrix coordinate pattern general\n2 2 2\n1 2\n2 1\n").unwrap();
        assert_eq!(p[(0, 1)], 1.0);
        assert_eq!(p[(0, 0)], 0.0);
        let s = read("%%MatrixMarket matrix coordinate integer skew-symmetric\n2 2 1\n2 1 3\n").unwrap();
        assert_eq!(s[(1, 0)], 3.0);
        assert_eq!(s[(0, 1)], -3.0);
    }

    #[test]
    fn reads_array_column_major() {
        let a = read("%%MatrixMarket matrix array real general\n2 2\n1\n2\n3\n4\n").unwrap();
        assert_eq!(a[(1, 0)], 2.0);
        assert_eq!(a[(0, 1)], 3.0);
        let s = read("%%MatrixMarket matrix array real symmetric\n2 2\n1\n2\n3\n").unwrap();
        assert_eq!(s[(0, 1)], 2.0);
        assert_eq!(s[(1, 1)], 3.0);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(read("1 1 1\n"), Err(MarketError::MissingHeader)));
        assert!(matches!(
            read("%%MatrixMarket matrix coordinate complex general\n1 1 1\n1 1 1 0\n"),
            Err(MarketError::Unsupported(_))
        ));
        assert!(matches!(
            read("%%MatrixMarket matrix coordinate real general\n2 2 1\n3 1 1.0\n"),
            Err(MarketError::OutOfRange { line: 3, row: 3, .. })
        ));
        assert!(matches!(
            read("%%MatrixMarket matrix coordinate real general\n2 2 2\n1 1 1.0\n"),
            Err(MarketError::EntryCount { expected: 2, found: 1 })
        ));
        assert!(matches!(
            read("%%MatrixMarket matrix coordinate real general\n1 1 1\n1 1 abc\n"),
            Err(MarketError::Parse { line: 3, .. })
        ));
        assert!(matches!(
            read("%%MatrixMarket matrix array real general\n1 1\nnan\n"),
            Err(MarketError::NonFinite { line: 3 })
        ));
    }

    #[test]
    fn rejects_sizes_that_cannot_be_stored() {
        // 10^20 entries overflow usize
        assert!(matches!(
            read("%%MatrixMarket matrix coordinate real general\n10000000000 10000000000 0\n"),
            Err(MarketError::Parse { line: 2, .. })
        ));
        // 1.6·10^19 entries fit in usize but not in memory
        assert!(matches!(
            read("%%MatrixMarket matrix array real general\n4000000000 4000000000\n"),
            Err(MarketError::Parse { line: 2, .. })
        ));
    }
}
