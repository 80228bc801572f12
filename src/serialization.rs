//! Profile serialization
//!
//! Writes the canonical text form: format marker, labels, TILT section, the
//! two header lines, angle arrays and one line per candela row. External
//! TILT references are always written back inline as `TILT=INCLUDE`.

use bytes::BytesMut;

use crate::{
    errors::{IesError, IesResult},
    parser::TILT_PREFIX,
    profile::{PhotometricProfile, TILT_INCLUDE, TILT_NONE},
    traits::IesWriter,
    utils::{format_float, write_floats, write_line, write_values},
};

fn check_len(field: &str, declared: usize, actual: usize) -> IesResult<()> {
    if declared != actual {
        return Err(IesError::DimensionMismatch {
            field: field.to_string(),
            declared,
            actual,
        });
    }
    Ok(())
}

impl PhotometricProfile {
    /// Check that every count matches the length of its array
    pub fn check_dimensions(&self) -> IesResult<()> {
        let photo = &self.photo;
        check_len("vertical angles", photo.num_vert_angles, photo.vert_angles.len())?;
        check_len("horizontal angles", photo.num_horz_angles, photo.horz_angles.len())?;
        check_len("candela rows", photo.num_horz_angles, photo.candelas.len())?;
        for (i, row) in photo.candelas.iter().enumerate() {
            check_len(&format!("candela row {}", i), photo.num_vert_angles, row.len())?;
        }
        Ok(())
    }

    /// Serialize into a fresh buffer
    pub fn to_vec(&self) -> IesResult<Vec<u8>> {
        let mut buffer = BytesMut::new();
        self.to_bytes(&mut buffer)?;
        Ok(buffer.to_vec())
    }
}

impl IesWriter for PhotometricProfile {
    fn to_bytes(&self, buffer: &mut BytesMut) -> IesResult<()> {
        self.check_dimensions()?;

        write_line(buffer, self.file.format.marker());

        for label in &self.labels {
            write_line(buffer, label);
        }

        match &self.lamp.tilt {
            Some(tilt) => {
                write_line(buffer, &format!("{}{}", TILT_PREFIX, TILT_INCLUDE));
                tilt.to_bytes(buffer)?;
            },
            None => write_line(buffer, &format!("{}{}", TILT_PREFIX, TILT_NONE)),
        }

        write_values(
            buffer,
            [
                self.lamp.num_lamps.to_string(),
                format_float(self.lamp.lumens_per_lamp),
                format_float(self.lamp.multiplier),
                self.photo.num_vert_angles.to_string(),
                self.photo.num_horz_angles.to_string(),
                (self.photo.goniometer_type as i32).to_string(),
                (self.units as i32).to_string(),
                format_float(self.dim.width),
                format_float(self.dim.length),
                format_float(self.dim.height),
            ],
        );

        write_floats(
            buffer,
            &[
                self.elec.ballast_factor,
                self.elec.blp_factor,
                self.elec.input_watts,
            ],
        );

        write_floats(buffer, &self.photo.vert_angles);
        write_floats(buffer, &self.photo.horz_angles);

        for row in &self.photo.candelas {
            write_floats(buffer, row);
        }

        Ok(())
    }
}
