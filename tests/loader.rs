//! Loading coordinate files from disk

use std::io::Write;
use symspmv::{load, SparseMatrixCSR, SpmvError};
use tempfile::NamedTempFile;

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_dimensions_match_header() {
    let file = write_file("%%MatrixMarket matrix coordinate real symmetric\n\
                           5 5 2\n\
                           1 1 1.0\n\
                           4 2 3.0\n");

    let matrix = SparseMatrixCSR::from_file(file.path()).unwrap();
    assert_eq!(matrix.row_count(), 5);
    assert_eq!(matrix.col_count(), 5);
    assert_eq!(matrix.row_offsets().len(), 6);
    assert_eq!(matrix.nnz(), 3);
}

#[test]
fn test_symmetric_three_by_three() {
    let file = write_file("3 3 3\n1 1 4.0\n2 1 2.0\n3 3 5.0\n");
    let matrix = load(file.path()).unwrap();

    assert_eq!(matrix.get(0, 1), 2.0);
    assert_eq!(matrix.get(1, 0), 2.0);
    assert!(matrix.is_symmetric());
    assert_eq!(matrix.multiply(&[1.0, 1.0, 1.0]).unwrap(), vec![6.0, 2.0, 5.0]);
}

#[test]
fn test_diagonal_only() {
    let file = write_file("3 3 3\n1 1 2.0\n2 2 3.0\n3 3 4.0\n");
    let matrix = load(file.path()).unwrap();

    assert_eq!(matrix.nnz(), 3);
    assert_eq!(matrix.multiply(&[1.0, 2.0, 3.0]).unwrap(), vec![2.0, 6.0, 12.0]);
}

#[test]
fn test_upper_triangle_input() {
    let lower = load(write_file("3 3 2\n3 1 1.5\n2 2 1.0\n").path()).unwrap();
    let upper = load(write_file("3 3 2\n1 3 1.5\n2 2 1.0\n").path()).unwrap();

    assert_eq!(lower, upper);
}

#[test]
fn test_rows_sorted_after_load() {
    let file = write_file("4 4 5\n4 1 1.0\n2 1 2.0\n3 1 3.0\n1 1 4.0\n4 3 5.0\n");
    let matrix = load(file.path()).unwrap();

    for i in 0..matrix.row_count() {
        let cols: Vec<usize> = matrix.row_iter(i).map(|(c, _)| c).collect();
        assert!(cols.windows(2).all(|w| w[0] <= w[1]), "row {} unsorted: {:?}", i, cols);
    }
    assert_eq!(matrix.row_iter(0).map(|(c, _)| c).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
}

#[test]
fn test_duplicates_are_kept_and_summed() {
    // (2,1) given explicitly twice, and its mirror given as well
    let file = write_file("2 2 3\n2 1 1.0\n2 1 2.0\n1 2 4.0\n");
    let matrix = load(file.path()).unwrap();

    assert_eq!(matrix.nnz(), 6);
    assert_eq!(matrix.col_indices(), &[1, 1, 1, 0, 0, 0]);
    assert_eq!(matrix.values(), &[1.0, 2.0, 4.0, 1.0, 2.0, 4.0]);
    assert_eq!(matrix.multiply(&[1.0, 1.0]).unwrap(), vec![7.0, 7.0]);
}

#[test]
fn test_comments_and_blanks_do_not_change_result() {
    let plain = write_file("3 3 3\n1 1 4.0\n2 1 2.0\n3 2 5.0\n");
    let commented = write_file("% leading comment\n\n%another\n3 3 3\n\
                                % between header and data\n1 1 4.0\n\n\
                                2 1 2.0\n%\n\n3 2 5.0\n% trailing\n");

    assert_eq!(load(plain.path()).unwrap(), load(commented.path()).unwrap());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.mtx");

    let err = load(&path).unwrap_err();
    assert!(matches!(err, SpmvError::FileOpen { .. }));
    assert!(!err.is_format_error());
}

#[test]
fn test_malformed_header() {
    let file = write_file("% header has two numbers\n3 3\n1 1 1.0\n");
    let err = load(file.path()).unwrap_err();

    assert!(matches!(err, SpmvError::HeaderFormat { line: 2, .. }));
    assert!(err.is_format_error());
}

#[test]
fn test_malformed_data_line() {
    let file = write_file("3 3 2\n1 1 1.0\n2 1\n");
    let err = load(file.path()).unwrap_err();

    assert!(matches!(err, SpmvError::DataFormat { line: 3, .. }));
}

#[test]
fn test_entry_outside_matrix() {
    let file = write_file("2 2 1\n2 5 1.0\n");
    let err = load(file.path()).unwrap_err();

    assert!(matches!(
        err,
        SpmvError::IndexOutOfBounds { line: 2, row: 2, col: 5, n_rows: 2, n_cols: 2 }
    ));
}

#[test]
fn test_unreadable_line_reports_line_number() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"% banner\n2 2 2\n1 1 1.0\n2 1 \xfe\xff\n").unwrap();
    file.flush().unwrap();

    let err = load(file.path()).unwrap_err();
    assert!(matches!(err, SpmvError::Read { line: 4, .. }));
    assert!(err.to_string().starts_with("read error at line 4"));
    assert!(!err.is_format_error());
}

#[test]
fn test_declared_nnz_larger_than_memory() {
    let file = write_file("2 2 18446744073709551615\n1 1 1.0\n");
    let matrix = load(file.path()).unwrap();

    assert_eq!(matrix.row_count(), 2);
    assert_eq!(matrix.multiply(&[2.0, 5.0]).unwrap(), vec![2.0, 0.0]);
}

#[test]
fn test_header_only() {
    let file = write_file("4 4 0\n");
    let matrix = load(file.path()).unwrap();

    assert_eq!(matrix.nnz(), 0);
    assert_eq!(matrix.multiply(&[1.0; 4]).unwrap(), vec![0.0; 4]);
}
