//! File-level tests for horizon text I/O.

use approx::assert_relative_eq;
use horizon_core::io::{read_horizon, write_horizon};
use horizon_core::{Error, Point};
use std::io::Write;

#[test]
fn missing_file_is_input_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.dat");

    match read_horizon(&path) {
        Err(Error::InputNotFound { path: p }) => assert_eq!(p, path),
        other => panic!("expected InputNotFound, got {:?}", other),
    }
}

#[test]
fn write_then_read_preserves_header_and_values() {
    let header = vec![
        "# Type: scattered data\n".to_string(),
        "# End:\n".to_string(),
    ];
    let points = vec![
        Point::new(636512.125, 4231877.5, 1873.33333, 100, 200),
        Point::new(636537.0, 4231877.5, -12.5, 104, 200),
    ];

    let tmp = tempfile::NamedTempFile::new().unwrap();
    write_horizon(tmp.path(), &header, &points).unwrap();

    let file = read_horizon(tmp.path()).unwrap();
    assert_eq!(file.header, header);
    assert_eq!(file.points.len(), 2);

    for (read, orig) in file.points.iter().zip(&points) {
        assert_eq!(read.key(), orig.key());
        assert_relative_eq!(read.x, orig.x, epsilon = 1e-5);
        assert_relative_eq!(read.y, orig.y, epsilon = 1e-5);
        assert_relative_eq!(read.z, orig.z, epsilon = 1e-5);
    }
}

#[test]
fn read_skips_malformed_lines_from_disk() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    write!(
        tmp,
        "# End:\n1 2 3 4 5\n1 2 3 4\nx 2 3 4 5\n6 7 8 9 10 11\n"
    )
    .unwrap();
    tmp.flush().unwrap();

    let file = read_horizon(tmp.path()).unwrap();
    assert_eq!(
        file.points,
        vec![Point::new(1.0, 2.0, 3.0, 4, 5), Point::new(6.0, 7.0, 8.0, 9, 10)]
    );
}
