//! Reader for symmetric coordinate-format matrix files
//!
//! The format is line oriented:
//!
//! ```text
//! % comment lines and blank lines are skipped anywhere
//! rows cols nnz
//! row col value
//! row col value
//! ```
//!
//! Indices are 1-based. The file holds one triangle of a symmetric matrix;
//! every off-diagonal entry is mirrored across the diagonal when loaded.
//! The declared `nnz` is only a capacity hint.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, SpmvError};
use crate::matrix::{SparseMatrixCSR, SymmetricAssembler};

/// Dimensions line of a coordinate file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Declared row count
    pub n_rows: usize,
    /// Declared column count
    pub n_cols: usize,
    /// Declared entry count, before symmetric expansion
    pub nnz: usize,
}

/// Loads the matrix stored at `path`
///
/// # Errors
///
/// Fails with [`SpmvError::FileOpen`] when the file cannot be opened and
/// with a format error when the header or any entry is malformed. No
/// partially built matrix is ever returned.
pub fn load<P: AsRef<Path>>(path: P) -> Result<SparseMatrixCSR<f64>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SpmvError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("reading matrix from {}", path.display());
    read_matrix(BufReader::new(file))
}

/// Reads a matrix from any buffered source
pub fn read_matrix<R: BufRead>(reader: R) -> Result<SparseMatrixCSR<f64>> {
    let mut assembler: Option<SymmetricAssembler<f64>> = None;
    let mut declared_nnz = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| SpmvError::Read {
            line: line_no,
            source,
        })?;

        if is_skippable(&line) {
            continue;
        }

        match assembler.as_mut() {
            None => {
                let header = parse_header(line_no, &line)?;
                log::debug!(
                    "header: {} x {}, {} declared entries",
                    header.n_rows,
                    header.n_cols,
                    header.nnz
                );
                declared_nnz = header.nnz;
                assembler = Some(SymmetricAssembler::with_capacity(
                    header.n_rows,
                    header.n_cols,
                    header.nnz,
                ));
            }
            Some(asm) => {
                let (row, col, value) = parse_entry(line_no, &line)?;
                push_entry(asm, line_no, row, col, value)?;
            }
        }
    }

    let assembler = assembler.ok_or(SpmvError::MissingHeader)?;

    if assembler.entries() != declared_nnz {
        log::warn!(
            "header declares {} entries but {} were read",
            declared_nnz,
            assembler.entries()
        );
    }

    let (n_rows, n_cols) = assembler.dimensions();
    let entries = assembler.entries();
    let matrix = assembler.finish();

    log::info!(
        "loaded {} x {} matrix: {} entries, {} stored after symmetric expansion",
        n_rows,
        n_cols,
        entries,
        matrix.nnz()
    );

    Ok(matrix)
}

impl SparseMatrixCSR<f64> {
    /// Loads a symmetric coordinate file, see [`load`]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load(path)
    }
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('%')
}

/// Parses `rows cols nnz`; tokens after the third are ignored
pub fn parse_header(line_no: usize, line: &str) -> Result<Header> {
    let error = || SpmvError::HeaderFormat {
        line: line_no,
        content: line.to_string(),
    };

    let mut tokens = line.split_whitespace();
    let n_rows = next_token(&mut tokens).ok_or_else(error)?;
    let n_cols = next_token(&mut tokens).ok_or_else(error)?;
    let nnz = next_token(&mut tokens).ok_or_else(error)?;

    Ok(Header {
        n_rows,
        n_cols,
        nnz,
    })
}

/// Parses `row col value` with 1-based indices; tokens after the third are ignored
pub fn parse_entry(line_no: usize, line: &str) -> Result<(usize, usize, f64)> {
    let error = || SpmvError::DataFormat {
        line: line_no,
        content: line.to_string(),
    };

    let mut tokens = line.split_whitespace();
    let row = next_token(&mut tokens).ok_or_else(error)?;
    let col = next_token(&mut tokens).ok_or_else(error)?;
    let value = next_token(&mut tokens).ok_or_else(error)?;

    Ok((row, col, value))
}

fn next_token<'a, V: FromStr>(tokens: &mut impl Iterator<Item = &'a str>) -> Option<V> {
    tokens.next()?.parse().ok()
}

fn push_entry(
    asm: &mut SymmetricAssembler<f64>,
    line: usize,
    row: usize,
    col: usize,
    value: f64,
) -> Result<()> {
    let (n_rows, n_cols) = asm.dimensions();

    // 1-based: zero is never a valid index
    if row == 0 || col == 0 {
        return Err(SpmvError::IndexOutOfBounds {
            line,
            row,
            col,
            n_rows,
            n_cols,
        });
    }

    asm.push(row - 1, col - 1, value).map_err(|err| match err {
        SpmvError::IndexOutOfBounds { .. } => SpmvError::IndexOutOfBounds {
            line,
            row,
            col,
            n_rows,
            n_cols,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(text: &str) -> Result<SparseMatrixCSR<f64>> {
        read_matrix(Cursor::new(text))
    }

    #[test]
    fn test_parse_header() {
        let header = parse_header(1, "  5 4 7 ").unwrap();
        assert_eq!(
            header,
            Header {
                n_rows: 5,
                n_cols: 4,
                nnz: 7
            }
        );

        assert!(parse_header(1, "5 4 7 trailing").is_ok());
        assert!(parse_header(1, "5 4").is_err());
        assert!(parse_header(1, "5 -4 7").is_err());
        assert!(parse_header(1, "5 4.5 7").is_err());
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!(parse_entry(3, "2 1 -0.5").unwrap(), (2, 1, -0.5));
        assert_eq!(parse_entry(3, "2\t1\t1e-3").unwrap(), (2, 1, 1e-3));

        let err = parse_entry(3, "2 1").unwrap_err();
        assert!(matches!(err, SpmvError::DataFormat { line: 3, .. }));
        assert!(parse_entry(3, "2 x 1.0").is_err());
        assert!(parse_entry(3, "2 1 one").is_err());
    }

    #[test]
    fn test_read_symmetric() {
        let a = read("%%MatrixMarket matrix coordinate real symmetric\n\
                      3 3 3\n\
                      1 1 4.0\n\
                      2 1 2.0\n\
                      3 3 5.0\n")
        .unwrap();

        assert_eq!(a.row_count(), 3);
        assert_eq!(a.col_count(), 3);
        assert_eq!(a.row_offsets(), &[0, 2, 3, 4]);
        assert_eq!(a.col_indices(), &[0, 1, 0, 2]);
        assert_eq!(a.values(), &[4.0, 2.0, 2.0, 5.0]);
    }

    #[test]
    fn test_whitespace_only_lines_skipped() {
        let a = read("3 3 1\n   \n\t\n  % indented comment\n1 1 1.0\n").unwrap();
        assert_eq!(a.nnz(), 1);
    }

    #[test]
    fn test_missing_header() {
        let err = read("% nothing here\n\n").unwrap_err();
        assert!(matches!(err, SpmvError::MissingHeader));
    }

    #[test]
    fn test_header_error_reports_line() {
        let err = read("% banner\n\n3 3\n1 1 1.0\n").unwrap_err();
        assert!(matches!(err, SpmvError::HeaderFormat { line: 3, .. }));
    }

    #[test]
    fn test_index_errors() {
        let err = read("2 2 1\n0 1 1.0\n").unwrap_err();
        assert!(matches!(
            err,
            SpmvError::IndexOutOfBounds { line: 2, row: 0, col: 1, .. }
        ));

        let err = read("2 2 1\n1 1 1.0\n3 1 1.0\n").unwrap_err();
        assert!(matches!(
            err,
            SpmvError::IndexOutOfBounds { line: 3, row: 3, col: 1, n_rows: 2, n_cols: 2 }
        ));
    }

    #[test]
    fn test_declared_nnz_at_usize_max() {
        let a = read("2 2 18446744073709551615\n1 1 1.0\n").unwrap();
        assert_eq!(a.row_count(), 2);
        assert_eq!(a.nnz(), 1);
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let bytes: &[u8] = b"2 2 2\n1 1 1.0\n2 \xff 1.0\n";
        let err = read_matrix(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, SpmvError::Read { line: 3, .. }));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_nnz_is_only_a_hint() {
        let a = read("2 2 10\n1 1 1.0\n2 1 2.0\n").unwrap();
        assert_eq!(a.nnz(), 3);
    }
}
