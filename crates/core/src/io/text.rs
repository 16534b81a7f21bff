//! Line-oriented horizon text format
//!
//! A file is a free-form header followed by one sample per line:
//!
//! ```text
//! # Type: scattered data
//! # End:
//!      1000.00000        2000.00000     1500.25000        10                20
//! ```
//!
//! The header runs up to and including the first line starting with
//! `# End:`. Blank and `#` lines after it are kept with the header too.
//! Data lines carry `x y z col row` as the first five whitespace-separated
//! fields; anything that does not parse is skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, ErrorKind, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::horizon::Point;

/// Marker that closes the header block
pub const END_OF_HEADER: &str = "# End:";

/// Parsed contents of a horizon file
#[derive(Debug, Clone, Default)]
pub struct HorizonFile {
    /// Header lines, verbatim including their line terminators
    pub header: Vec<String>,
    /// Data points in file order (duplicates not yet collapsed)
    pub points: Vec<Point>,
}

/// Read a horizon file from disk.
///
/// A path that does not exist yields [`Error::InputNotFound`]; any other
/// failure (permissions, invalid UTF-8) is an [`Error::Io`].
pub fn read_horizon<P: AsRef<Path>>(path: P) -> Result<HorizonFile> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })?;
    parse_horizon(BufReader::new(file))
}

/// Read a horizon file from an in-memory buffer
pub fn read_horizon_from_buffer(data: &[u8]) -> Result<HorizonFile> {
    parse_horizon(Cursor::new(data))
}

fn parse_horizon<R: BufRead>(mut reader: R) -> Result<HorizonFile> {
    let mut out = HorizonFile::default();
    let mut in_header = true;
    let mut skipped = 0usize;
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        let trimmed = line.trim();
        if in_header || trimmed.is_empty() || trimmed.starts_with('#') {
            if trimmed.starts_with(END_OF_HEADER) {
                in_header = false;
            }
            out.header.push(line.clone());
            continue;
        }

        match parse_data_line(trimmed) {
            Some(p) => out.points.push(p),
            None => skipped += 1,
        }
    }

    debug!(
        "Parsed {} header lines, {} points, skipped {} malformed lines",
        out.header.len(),
        out.points.len(),
        skipped
    );

    Ok(out)
}

fn parse_data_line(line: &str) -> Option<Point> {
    let mut fields = line.split_whitespace();
    let x = fields.next()?.parse::<f64>().ok()?;
    let y = fields.next()?.parse::<f64>().ok()?;
    let z = fields.next()?.parse::<f64>().ok()?;
    let col = fields.next()?.parse::<i64>().ok()?;
    let row = fields.next()?.parse::<i64>().ok()?;
    Some(Point::new(x, y, z, col, row))
}

/// Format one data line (without terminator).
///
/// Fixed-width columns: x `%15.5f`, y `%15.5f`, z `%12.5f`, col `%6d`,
/// row `%10d`.
pub fn format_point(p: &Point) -> String {
    format!(
        "{:>15.5}   {:>15.5}   {:>12.5}     {:>6}         {:>10}",
        p.x, p.y, p.z, p.col, p.row
    )
}

/// Write header lines followed by points to a file.
///
/// The file is only created once this is called; callers finish all
/// computation first so a failed run leaves no partial output behind.
pub fn write_horizon<'a, P, I>(path: P, header: &[String], points: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Point>,
{
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    encode_horizon(&mut writer, header, points)?;
    writer.flush()?;
    Ok(())
}

/// Write header lines followed by points to an in-memory buffer
pub fn write_horizon_to_buffer<'a, I>(header: &[String], points: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut buf = Vec::new();
    encode_horizon(&mut buf, header, points)?;
    Ok(buf)
}

fn encode_horizon<'a, W, I>(writer: &mut W, header: &[String], points: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Point>,
{
    for line in header {
        writer.write_all(line.as_bytes())?;
        if !line.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
    }
    for p in points {
        writeln!(writer, "{}", format_point(p))?;
    }
    Ok(())
}
