use bytes::{BufMut, Bytes, BytesMut};
use std::path::Path;
use tracing::debug;

use crate::errors::{IesError, IesResult};

/// Read a whole file into memory
///
/// A zero-length file is rejected: no valid profile is empty.
pub fn read_file_to_bytes(path: impl AsRef<Path>) -> IesResult<Bytes> {
    let path = path.as_ref();
    let path_name = path.display().to_string();
    let data = std::fs::read(path).map_err(|e| IesError::from_io(&e, &path_name))?;

    if data.is_empty() {
        return Err(IesError::EmptyInput {
            source_name: path_name,
        });
    }

    debug!(path = %path_name, size = data.len(), "read file");
    Ok(Bytes::from(data))
}

/// Write a buffer to a file, replacing it
pub fn write_bytes_to_file(buffer: &[u8], path: impl AsRef<Path>) -> IesResult<()> {
    let path = path.as_ref();
    let path_name = path.display().to_string();
    if path_name.is_empty() {
        return Err(IesError::FileWriteError {
            path: path_name,
            reason: "empty path".to_string(),
        });
    }

    std::fs::write(path, buffer).map_err(|e| IesError::FileWriteError {
        path: path_name.clone(),
        reason: e.to_string(),
    })?;

    debug!(path = %path_name, size = buffer.len(), "wrote file");
    Ok(())
}

/// Format a float with at most two fractional digits
/// For example 12.50 is written as "12.5" and 100.0 as "100"
pub fn format_float(value: f32) -> String {
    let mut text = format!("{:.2}", value);
    if text.contains('.') {
        let len = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(len);
    }

    if text == "-0" {
        text.remove(0);
    }
    text
}

pub fn write_line(buffer: &mut BytesMut, line: &str) {
    buffer.put_slice(line.as_bytes());
    buffer.put_u8(b'\n');
}

/// Write values separated by single spaces, terminated by a newline
pub fn write_values<I>(buffer: &mut BytesMut, values: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            buffer.put_u8(b' ');
        }
        buffer.put_slice(value.as_ref().as_bytes());
    }
    buffer.put_u8(b'\n');
}

pub fn write_floats(buffer: &mut BytesMut, values: &[f32]) {
    write_values(buffer, values.iter().map(|&v| format_float(v)));
}
