//! Line cursor over an in-memory IES buffer

use bytes::Bytes;

/// Rewindable, read-only view over a byte buffer yielding one line at a time
///
/// Lines are split on `\n`; a single trailing `\r` is stripped so files
/// written with DOS line endings read identically. A final record without a
/// terminator is still returned. Text is decoded lossily since label lines in
/// the wild are often Latin-1.
#[derive(Debug, Clone)]
pub struct LineCursor {
    data: Bytes,
    pos: usize,
    line_number: usize,
}

impl LineCursor {
    pub fn new(data: Bytes) -> Self {
        Self {
            data,
            pos: 0,
            line_number: 0,
        }
    }

    /// Next line, or `None` at end of input
    pub fn next_line(&mut self) -> Option<String> {
        if self.pos >= self.data.len() {
            return None;
        }

        let rest = &self.data[self.pos..];
        let (mut line, consumed) = match rest.iter().position(|&b| b == b'\n') {
            Some(idx) => (&rest[..idx], idx + 1),
            None => (rest, rest.len()),
        };
        if let Some((&b'\r', head)) = line.split_last() {
            line = head;
        }

        self.pos += consumed;
        self.line_number += 1;
        Some(String::from_utf8_lossy(line).into_owned())
    }

    /// Reset to the start of the buffer
    pub fn rewind(&mut self) {
        self.pos = 0;
        self.line_number = 0;
    }

    /// 1-based number of the last line returned, 0 before the first read
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<&'static str> for LineCursor {
    fn from(text: &'static str) -> Self {
        LineCursor::new(Bytes::from_static(text.as_bytes()))
    }
}

impl From<Vec<u8>> for LineCursor {
    fn from(data: Vec<u8>) -> Self {
        LineCursor::new(Bytes::from(data))
    }
}
