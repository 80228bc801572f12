//! Photometric profile parser
//!
//! Reads a profile top to bottom: format marker, labels, TILT directive,
//! the two fixed header lines, the angle arrays and the candela matrix.
//! Any failure aborts the whole parse; no partial profile is returned.

use phf::phf_map;
use tracing::{debug, warn};

use crate::{
    cursor::LineCursor,
    errors::{IesError, IesResult},
    parser_config::ParserConfig,
    profile::{
        Dimensions, ElectricalData, FileFormat, FileInfo, GoniometerType, LampData,
        PhotometricData, PhotometricProfile, Units,
    },
    tilt::resolve_tilt,
    tokenizing::{read_fields, read_floats, FieldKind},
    traits::IesParser,
};

/// Prefix of the line ending the label section
pub const TILT_PREFIX: &str = "TILT=";

/// First-line markers. LM-63-1986 files have none; `IESNA86` is what the
/// serializer writes for them.
static FORMAT_MARKERS: phf::Map<&'static str, FileFormat> = phf_map! {
    "IESNA:LM-63-1995" => FileFormat::Lm63_1995,
    "IESNA:LM-63-2002" => FileFormat::Lm63_2002,
    "IESNA91" => FileFormat::Lm63_1991,
    "IESNA86" => FileFormat::Lm63_1986,
};

const LAMP_HEADER_FIELDS: [FieldKind; 10] = [
    FieldKind::Int,   // number of lamps
    FieldKind::Float, // lumens per lamp
    FieldKind::Float, // candela multiplier
    FieldKind::Int,   // number of vertical angles
    FieldKind::Int,   // number of horizontal angles
    FieldKind::Int,   // photometric type
    FieldKind::Int,   // units type
    FieldKind::Float, // width
    FieldKind::Float, // length
    FieldKind::Float, // height
];

const ELECTRICAL_FIELDS: [FieldKind; 3] = [FieldKind::Float, FieldKind::Float, FieldKind::Float];

/// Format for a marker line, `None` when the line is not a marker
pub fn detect_format(line: &str) -> Option<FileFormat> {
    FORMAT_MARKERS.get(line.trim_end()).copied()
}

/// Parse a complete profile from `cursor`
pub fn parse_profile(
    cursor: &mut LineCursor,
    name: &str,
    config: &ParserConfig,
) -> IesResult<PhotometricProfile> {
    let format = read_format(cursor, name)?;
    debug!(%format, name, "detected format");

    let (labels, tilt_reference) = read_labels(cursor, config)?;
    debug!(labels = labels.len(), tilt = %tilt_reference, "read labels");

    let tilt = resolve_tilt(&tilt_reference, cursor, config)?;

    let header = read_fields(cursor, &LAMP_HEADER_FIELDS, "lamp and photometric header")?;
    let header_line = cursor.line_number();

    let num_lamps = i32::try_from(header[0].as_int()).map_err(|_| IesError::MalformedHeader {
        field: "number of lamps".to_string(),
        line: header_line,
        reason: format!("{} out of range", header[0].as_int()),
    })?;
    let num_vert_angles = angle_count(header[3].as_int(), "vertical_angles", header_line, config)?;
    let num_horz_angles = angle_count(header[4].as_int(), "horizontal_angles", header_line, config)?;
    let goniometer_type = GoniometerType::try_from(header[5].as_int())?;
    let units = Units::try_from(header[6].as_int())?;

    let elec = read_fields(cursor, &ELECTRICAL_FIELDS, "electrical header")?;

    let vert_angles = read_floats(cursor, num_vert_angles, "vertical angles")?;
    let horz_angles = read_floats(cursor, num_horz_angles, "horizontal angles")?;

    let mut candelas = Vec::with_capacity(num_horz_angles);
    for row in 0..num_horz_angles {
        candelas.push(read_floats(cursor, num_vert_angles, &format!("candela row {}", row))?);
    }

    let end_line = cursor.line_number();
    if std::iter::from_fn(|| cursor.next_line()).any(|line| !line.trim().is_empty()) {
        warn!(name, line = end_line, "ignoring trailing data after candela values");
    }

    Ok(PhotometricProfile {
        file: FileInfo {
            name: name.to_string(),
            format,
        },
        labels,
        lamp: LampData {
            num_lamps,
            lumens_per_lamp: header[1].as_float(),
            multiplier: header[2].as_float(),
            tilt_file_name: tilt_reference,
            tilt,
        },
        units,
        dim: Dimensions {
            width: header[7].as_float(),
            length: header[8].as_float(),
            height: header[9].as_float(),
        },
        elec: ElectricalData {
            ballast_factor: elec[0].as_float(),
            blp_factor: elec[1].as_float(),
            input_watts: elec[2].as_float(),
        },
        photo: PhotometricData {
            goniometer_type,
            num_vert_angles,
            num_horz_angles,
            vert_angles,
            horz_angles,
            candelas,
        },
    })
}

fn read_format(cursor: &mut LineCursor, name: &str) -> IesResult<FileFormat> {
    let first_line = cursor.next_line().ok_or_else(|| IesError::EmptyInput {
        source_name: name.to_string(),
    })?;

    match detect_format(&first_line) {
        Some(format) => Ok(format),
        None => {
            // LM-63-1986 has no marker: the first line is already a label
            cursor.rewind();
            Ok(FileFormat::Lm63_1986)
        },
    }
}

/// Collect label lines up to the TILT directive, returning the TILT value
fn read_labels(cursor: &mut LineCursor, config: &ParserConfig) -> IesResult<(Vec<String>, String)> {
    let mut labels = Vec::new();

    loop {
        let line = cursor.next_line().ok_or(IesError::MissingTiltDirective {
            labels_read: labels.len(),
        })?;

        if let Some(reference) = line.strip_prefix(TILT_PREFIX) {
            return Ok((labels, reference.trim_end().to_string()));
        }

        labels.push(line);
        config.check_label_count(labels.len())?;
    }
}

fn angle_count(value: i64, field: &str, line: usize, config: &ParserConfig) -> IesResult<usize> {
    let count = usize::try_from(value)
        .ok()
        .filter(|&count| count > 0)
        .ok_or_else(|| IesError::MalformedHeader {
            field: field.to_string(),
            line,
            reason: format!("angle count must be at least 1, got {}", value),
        })?;
    config.check_angle_count(field, count)?;
    Ok(count)
}

impl IesParser for PhotometricProfile {
    fn from_cursor(cursor: &mut LineCursor, config: &ParserConfig) -> IesResult<Self> {
        parse_profile(cursor, "", config)
    }
}
