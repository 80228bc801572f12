//! TILT block resolution
//!
//! The `TILT=` directive either says there is no TILT data, that the block
//! follows inline, or names an external file holding the same block grammar.

use bytes::BytesMut;
use tracing::debug;

use crate::{
    cursor::LineCursor,
    errors::{IesError, IesResult},
    parser_config::ParserConfig,
    profile::{TiltData, TiltOrientation, TILT_INCLUDE, TILT_NONE},
    tokenizing::{read_floats, read_int},
    traits::{IesParser, IesWriter},
    utils::{read_file_to_bytes, write_floats, write_line},
};

impl IesParser for TiltData {
    /// Parse a TILT block: orientation line, pair count line, then the
    /// angle and multiplier arrays when the count is non-zero
    fn from_cursor(cursor: &mut LineCursor, config: &ParserConfig) -> IesResult<Self> {
        let orientation = TiltOrientation::try_from(read_int(cursor, "lamp-to-luminaire geometry")?)?;

        let num_pairs = read_int(cursor, "TILT pair count")?;
        let num_pairs = usize::try_from(num_pairs).map_err(|_| IesError::MalformedHeader {
            field: "TILT pair count".to_string(),
            line: cursor.line_number(),
            reason: format!("negative pair count {}", num_pairs),
        })?;
        config.check_tilt_pairs(num_pairs)?;

        let (angles, mult_factors) = if num_pairs > 0 {
            let angles = read_floats(cursor, num_pairs, "TILT angles")?;
            let mult_factors = read_floats(cursor, num_pairs, "TILT multiplying factors")?;
            (angles, mult_factors)
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(TiltData {
            orientation,
            num_pairs,
            angles,
            mult_factors,
        })
    }
}

impl IesWriter for TiltData {
    fn to_bytes(&self, buffer: &mut BytesMut) -> IesResult<()> {
        for (field, actual) in [
            ("TILT angles", self.angles.len()),
            ("TILT multiplying factors", self.mult_factors.len()),
        ] {
            if actual != self.num_pairs {
                return Err(IesError::DimensionMismatch {
                    field: field.to_string(),
                    declared: self.num_pairs,
                    actual,
                });
            }
        }

        write_line(buffer, &(self.orientation as i32).to_string());
        write_line(buffer, &self.num_pairs.to_string());
        if self.num_pairs > 0 {
            write_floats(buffer, &self.angles);
            write_floats(buffer, &self.mult_factors);
        }
        Ok(())
    }
}

/// Resolve the value following `TILT=`
///
/// `INCLUDE` reads the block from `cursor`, right after the label section.
/// Any other value except `NONE` is an external file, parsed on its own cursor.
pub fn resolve_tilt(
    reference: &str,
    cursor: &mut LineCursor,
    config: &ParserConfig,
) -> IesResult<Option<TiltData>> {
    match reference {
        TILT_NONE => Ok(None),
        TILT_INCLUDE => {
            debug!(line = cursor.line_number(), "reading inline TILT block");
            TiltData::from_cursor(cursor, config).map(Some)
        },
        path => read_external_tilt(path, config).map(Some),
    }
}

fn read_external_tilt(reference: &str, config: &ParserConfig) -> IesResult<TiltData> {
    let invalid = |reason: String| IesError::InvalidTiltReference {
        path: reference.to_string(),
        reason,
    };

    if !config.resolve_external_tilt {
        return Err(invalid("external TILT files are disabled".to_string()));
    }

    let path = config.resolve_tilt_path(reference);
    debug!(path = %path.display(), "reading external TILT file");

    let data = read_file_to_bytes(&path).map_err(|e| invalid(e.to_string()))?;
    config
        .check_file_size(data.len())
        .map_err(|e| invalid(e.to_string()))?;

    let mut tilt_cursor = LineCursor::new(data);
    TiltData::from_cursor(&mut tilt_cursor, config).map_err(|e| invalid(e.to_string()))
}
