//! Field tokenizer
//!
//! Pulls whitespace/comma separated numeric tokens out of a [`LineCursor`],
//! spanning as many lines as needed. Each read starts on a fresh line and
//! discards whatever is left of the last line it touched, so a header line
//! with trailing garbage doesn't bleed into the next section.

use crate::cursor::LineCursor;
use crate::errors::{IesError, IesResult};

/// Expected type of the next token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Float,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f32),
}

impl FieldValue {
    pub fn as_int(&self) -> i64 {
        match *self {
            FieldValue::Int(value) => value,
            FieldValue::Float(value) => value as i64,
        }
    }

    pub fn as_float(&self) -> f32 {
        match *self {
            FieldValue::Int(value) => value as f32,
            FieldValue::Float(value) => value,
        }
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_ascii_whitespace() || c == ','
}

/// Token stream over the lines of a cursor
struct TokenScanner<'a> {
    cursor: &'a mut LineCursor,
    line: String,
    offset: usize,
}

impl<'a> TokenScanner<'a> {
    fn new(cursor: &'a mut LineCursor) -> Self {
        Self {
            cursor,
            line: String::new(),
            offset: 0,
        }
    }

    fn next_token(&mut self) -> Option<String> {
        loop {
            let rest = &self.line[self.offset..];
            match rest.find(|c: char| !is_delimiter(c)) {
                Some(start) => {
                    let token_rest = &rest[start..];
                    let len = token_rest.find(is_delimiter).unwrap_or(token_rest.len());
                    let token = token_rest[..len].to_string();
                    self.offset += start + len;
                    return Some(token);
                },
                None => {
                    self.line = self.cursor.next_line()?;
                    self.offset = 0;
                },
            }
        }
    }

    fn line_number(&self) -> usize {
        self.cursor.line_number()
    }
}

fn parse_int(token: &str) -> Option<i64> {
    token.parse::<i64>().ok().or_else(|| {
        // Some writers emit counts as "1.0"
        let value = token.parse::<f64>().ok()?;
        (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
    })
}

fn parse_float(token: &str) -> Option<f32> {
    token.parse::<f32>().ok().filter(|value| value.is_finite())
}

fn parse_field(kind: FieldKind, token: &str) -> Option<FieldValue> {
    match kind {
        FieldKind::Int => parse_int(token).map(FieldValue::Int),
        FieldKind::Float => parse_float(token).map(FieldValue::Float),
    }
}

/// Read one value per descriptor, in order
///
/// Used for the fixed header lines. Running out of input is reported as a
/// malformed header.
pub fn read_fields(
    cursor: &mut LineCursor,
    kinds: &[FieldKind],
    field: &str,
) -> IesResult<Vec<FieldValue>> {
    let mut scanner = TokenScanner::new(cursor);
    let mut values = Vec::with_capacity(kinds.len());

    for &kind in kinds {
        let token = match scanner.next_token() {
            Some(token) => token,
            None => {
                return Err(IesError::MalformedHeader {
                    field: field.to_string(),
                    line: scanner.line_number(),
                    reason: format!("expected {} values, found {}", kinds.len(), values.len()),
                })
            },
        };

        let value = parse_field(kind, &token).ok_or_else(|| IesError::InvalidNumber {
            field: field.to_string(),
            token: token.clone(),
            line: scanner.line_number(),
        })?;
        values.push(value);
    }

    Ok(values)
}

/// Read a single integer field
pub fn read_int(cursor: &mut LineCursor, field: &str) -> IesResult<i64> {
    let values = read_fields(cursor, &[FieldKind::Int], field)?;
    Ok(values[0].as_int())
}

/// Read `count` floats, spanning lines as needed
pub fn read_floats(cursor: &mut LineCursor, count: usize, field: &str) -> IesResult<Vec<f32>> {
    let mut scanner = TokenScanner::new(cursor);
    let mut values = Vec::with_capacity(count);

    while values.len() < count {
        let token = match scanner.next_token() {
            Some(token) => token,
            None => {
                return Err(IesError::TruncatedArray {
                    field: field.to_string(),
                    expected: count,
                    actual: values.len(),
                })
            },
        };

        let value = parse_float(&token).ok_or_else(|| IesError::InvalidNumber {
            field: field.to_string(),
            token: token.clone(),
            line: scanner.line_number(),
        })?;
        values.push(value);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fields_single_line() {
        let mut cursor = LineCursor::from("1 1000 1.5 19 5 1 2 0.5 0.6 0.1\n");
        let kinds = [
            FieldKind::Int,
            FieldKind::Float,
            FieldKind::Float,
            FieldKind::Int,
            FieldKind::Int,
            FieldKind::Int,
            FieldKind::Int,
            FieldKind::Float,
            FieldKind::Float,
            FieldKind::Float,
        ];
        let values = read_fields(&mut cursor, &kinds, "lamp header").unwrap();
        assert_eq!(values.len(), 10);
        assert_eq!(values[0], FieldValue::Int(1));
        assert_eq!(values[2], FieldValue::Float(1.5));
        assert_eq!(values[3].as_int(), 19);
        assert_eq!(values[9].as_float(), 0.1);
    }

    #[test]
    fn test_read_fields_spans_lines_and_commas() {
        let mut cursor = LineCursor::from("1.0,\n\n   2.5 ,3\n4\n");
        let values = read_fields(
            &mut cursor,
            &[FieldKind::Float, FieldKind::Float, FieldKind::Int],
            "elec",
        )
        .unwrap();
        assert_eq!(
            values,
            vec![FieldValue::Float(1.0), FieldValue::Float(2.5), FieldValue::Int(3)]
        );
        // The rest of the third line was consumed, the next read starts fresh
        assert_eq!(cursor.next_line().as_deref(), Some("4"));
    }

    #[test]
    fn test_read_fields_discards_rest_of_line() {
        let mut cursor = LineCursor::from("3 extra tokens\n7\n");
        assert_eq!(read_int(&mut cursor, "orientation").unwrap(), 3);
        assert_eq!(read_int(&mut cursor, "pairs").unwrap(), 7);
    }

    #[test]
    fn test_read_fields_truncated() {
        let mut cursor = LineCursor::from("1.0 1.0\n");
        let err = read_fields(
            &mut cursor,
            &[FieldKind::Float, FieldKind::Float, FieldKind::Float],
            "electrical header",
        )
        .unwrap_err();
        assert!(matches!(err, IesError::MalformedHeader { .. }));
    }

    #[test]
    fn test_int_field_parsing() {
        let mut cursor = LineCursor::from("1.0\n");
        assert_eq!(read_int(&mut cursor, "n").unwrap(), 1);

        let mut cursor = LineCursor::from("1.5\n");
        assert!(matches!(
            read_int(&mut cursor, "n"),
            Err(IesError::InvalidNumber { .. })
        ));

        let mut cursor = LineCursor::from("abc\n");
        match read_int(&mut cursor, "n") {
            Err(IesError::InvalidNumber { token, line, .. }) => {
                assert_eq!(token, "abc");
                assert_eq!(line, 1);
            },
            other => panic!("Expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_read_floats_multiline() {
        let mut cursor = LineCursor::from("0 22.5 45\n67.5\r\n90 trailing\nnext\n");
        let values = read_floats(&mut cursor, 5, "vertical angles").unwrap();
        assert_eq!(values, vec![0.0, 22.5, 45.0, 67.5, 90.0]);
        assert_eq!(cursor.next_line().as_deref(), Some("next"));

        let mut cursor = LineCursor::from("0 22.5\n45 oops 90\n");
        assert!(matches!(
            read_floats(&mut cursor, 4, "vertical angles"),
            Err(IesError::InvalidNumber { line: 2, .. })
        ));

        let mut cursor = LineCursor::from("0 22.5 45\n67.5\r\n90 1e2\nnext\n");
        let values = read_floats(&mut cursor, 6, "vertical angles").unwrap();
        assert_eq!(values, vec![0.0, 22.5, 45.0, 67.5, 90.0, 100.0]);
        assert_eq!(cursor.next_line().as_deref(), Some("next"));
    }

    #[test]
    fn test_read_floats_truncated() {
        let mut cursor = LineCursor::from("1 2 3\n");
        match read_floats(&mut cursor, 5, "candela row 0") {
            Err(IesError::TruncatedArray { expected, actual, .. }) => {
                assert_eq!(expected, 5);
                assert_eq!(actual, 3);
            },
            other => panic!("Expected TruncatedArray, got {:?}", other),
        }
    }

    #[test]
    fn test_read_floats_rejects_non_finite() {
        let mut cursor = LineCursor::from("1 NaN\n");
        assert!(read_floats(&mut cursor, 2, "angles").is_err());
        let mut cursor = LineCursor::from("inf\n");
        assert!(read_floats(&mut cursor, 1, "angles").is_err());
    }

    #[test]
    fn test_negative_values() {
        let mut cursor = LineCursor::from("-1 -0.5\n");
        assert_eq!(read_floats(&mut cursor, 2, "values").unwrap(), vec![-1.0, -0.5]);
    }
}
