//! CSV serialization of greyscale pixel grids
//!
//! One image row per line. The first value of a row is written as is and the
//! rest follow a `", "` separator, right-justified to three characters:
//!
//! ```text
//! 0,  12, 255
//! 7,   0,  64
//! ```

use crate::buffer::{ChannelMode, PixelBuffer};
use crate::io::configuration::{GRID_FIELD_WIDTH, GRID_SEPARATOR};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use std::path::{Path, PathBuf};

/// Render a greyscale buffer as CSV text
///
/// # Errors
///
/// Returns an error if the buffer is not greyscale
pub fn format_grid(buffer: &PixelBuffer) -> Result<String> {
    if buffer.mode() != ChannelMode::Grey {
        return Err(invalid_parameter(
            "mode",
            &format!("{:?}", buffer.mode()),
            &"only greyscale buffers can be written as pixel grids",
        ));
    }

    let samples = buffer.samples();
    let text = samples
        .outer_iter()
        .map(|row| {
            let line = row
                .iter()
                .enumerate()
                .map(|(col, value)| {
                    if col == 0 {
                        value.to_string()
                    } else {
                        format!("{value:>GRID_FIELD_WIDTH$}")
                    }
                })
                .collect::<Vec<_>>()
                .join(GRID_SEPARATOR);
            line + "\n"
        })
        .collect();
    Ok(text)
}

/// Parse CSV text into a greyscale buffer
///
/// Values are comma separated with surrounding whitespace ignored. Each must
/// be an integer in `0..=255`; a zero fractional part such as `12.0` is
/// accepted. Blank lines are skipped.
///
/// # Errors
///
/// Returns an error if a value is out of range, rows differ in length, or no
/// rows are present
pub fn parse_grid(text: &str) -> Result<PixelBuffer> {
    parse_grid_from(text, Path::new("<memory>"))
}

fn parse_grid_from(text: &str, path: &Path) -> Result<PixelBuffer> {
    let malformed = |line: usize, reason: String| MosaicError::MalformedGrid {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut samples = Vec::new();
    let mut width: Option<usize> = None;
    let mut height = 0;

    for (line_index, line) in text.lines().enumerate() {
        let line_number = line_index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let row = line
            .split(',')
            .map(|field| {
                parse_sample(field.trim())
                    .ok_or_else(|| malformed(line_number, format!("invalid sample '{}'", field.trim())))
            })
            .collect::<Result<Vec<u8>>>()?;

        match width {
            Some(expected) if expected != row.len() => {
                return Err(malformed(
                    line_number,
                    format!("expected {expected} values, found {}", row.len()),
                ));
            }
            Some(_) => {}
            None => width = Some(row.len()),
        }

        samples.extend(row);
        height += 1;
    }

    let width = width.ok_or_else(|| malformed(0, "grid has no rows".to_string()))?;
    PixelBuffer::from_samples(height, width, ChannelMode::Grey, samples)
}

fn parse_sample(field: &str) -> Option<u8> {
    if let Ok(value) = field.parse::<u8>() {
        return Some(value);
    }
    let value = field.parse::<f64>().ok()?;
    (value.fract().abs() < f64::EPSILON && (0.0..=255.0).contains(&value)).then_some(value as u8)
}

/// Read a CSV pixel grid file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn read_grid(path: &Path) -> Result<PixelBuffer> {
    let text = std::fs::read_to_string(path).map_err(|e| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "read grid",
        source: e,
    })?;
    parse_grid_from(&text, path)
}

/// Write a greyscale buffer as a CSV pixel grid, creating parent directories
///
/// # Errors
///
/// Returns an error if the buffer is not greyscale or the file cannot be written
pub fn write_grid(path: &Path, buffer: &PixelBuffer) -> Result<()> {
    let text = format_grid(buffer)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: PathBuf::from(parent),
            operation: "create directory",
            source: e,
        })?;
    }

    std::fs::write(path, text).map_err(|e| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "write grid",
        source: e,
    })
}
