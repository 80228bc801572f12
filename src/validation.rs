use tracing::debug;

use crate::errors::{IesError, IesResult};
use crate::profile::{FileFormat, GoniometerType, PhotometricData, PhotometricProfile, TiltData};

/// Keywords every LM-63-2002 profile must carry
pub const REQUIRED_KEYWORDS_2002: [&str; 4] = ["TEST", "TESTLAB", "MANUFAC", "ISSUEDATE"];

/// Configuration for semantic checks on a parsed profile
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Vertical and horizontal angles must be strictly ascending
    pub require_ascending_angles: bool,
    /// Angles must lie in the range of the goniometer type
    pub check_angle_ranges: bool,
    pub allow_negative_candelas: bool,
    /// Enforce the keywords LM-63-2002 makes mandatory
    pub strict_mode: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_ascending_angles: true,
            check_angle_ranges: true,
            allow_negative_candelas: false,
            strict_mode: false,
        }
    }
}

impl ValidationConfig {
    pub fn strict() -> Self {
        Self {
            strict_mode: true,
            ..Self::default()
        }
    }
}

/// Trait for validatable profile components
pub trait IesValidate {
    fn validate(&self, config: &ValidationConfig) -> IesResult<()>;

    /// Validate with the default configuration
    fn quick_validate(&self) -> IesResult<()> {
        self.validate(&ValidationConfig::default())
    }
}

fn failed(field: &str, reason: String) -> IesError {
    IesError::ValidationFailed {
        field: field.to_string(),
        reason,
    }
}

/// Angle array validator
pub struct AngleValidator;

impl AngleValidator {
    /// Valid vertical angle range per goniometer type
    pub fn vertical_range(goniometer: GoniometerType) -> (f32, f32) {
        match goniometer {
            GoniometerType::TypeC => (0.0, 180.0),
            GoniometerType::TypeA | GoniometerType::TypeB => (-90.0, 90.0),
        }
    }

    /// Valid horizontal angle range per goniometer type
    pub fn horizontal_range(goniometer: GoniometerType) -> (f32, f32) {
        match goniometer {
            GoniometerType::TypeC => (0.0, 360.0),
            GoniometerType::TypeA | GoniometerType::TypeB => (-90.0, 90.0),
        }
    }

    pub fn validate_range(angles: &[f32], (min, max): (f32, f32), field: &str) -> IesResult<()> {
        if let Some((i, angle)) = angles
            .iter()
            .enumerate()
            .find(|&(_, &a)| !(min..=max).contains(&a))
        {
            return Err(failed(
                field,
                format!("angle {} at index {} outside {}..{}", angle, i, min, max),
            ));
        }
        Ok(())
    }

    pub fn validate_ascending(angles: &[f32], field: &str) -> IesResult<()> {
        if let Some(i) = angles.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(failed(
                field,
                format!(
                    "angles not ascending at index {}: {} then {}",
                    i + 1,
                    angles[i],
                    angles[i + 1]
                ),
            ));
        }
        Ok(())
    }
}

/// Candela matrix validator
pub struct CandelaValidator;

impl CandelaValidator {
    pub fn validate_non_negative(photo: &PhotometricData) -> IesResult<()> {
        for (h, row) in photo.candelas.iter().enumerate() {
            if let Some(v) = row.iter().position(|&c| c < 0.0) {
                return Err(failed(
                    "candelas",
                    format!("negative candela {} at [{}][{}]", row[v], h, v),
                ));
            }
        }
        Ok(())
    }
}

/// Label keyword validator
pub struct KeywordValidator;

impl KeywordValidator {
    /// Check that all keywords required by the file format are present
    pub fn validate_required(profile: &PhotometricProfile) -> IesResult<()> {
        if profile.file.format != FileFormat::Lm63_2002 {
            return Ok(());
        }

        let missing: Vec<&str> = REQUIRED_KEYWORDS_2002
            .iter()
            .copied()
            .filter(|keyword| profile.keyword(keyword).is_none())
            .collect();

        if !missing.is_empty() {
            return Err(failed(
                "labels",
                format!("missing required keywords: {}", missing.join(", ")),
            ));
        }
        Ok(())
    }
}

impl IesValidate for TiltData {
    fn validate(&self, config: &ValidationConfig) -> IesResult<()> {
        if self.angles.len() != self.num_pairs || self.mult_factors.len() != self.num_pairs {
            return Err(IesError::DimensionMismatch {
                field: "TILT pairs".to_string(),
                declared: self.num_pairs,
                actual: self.angles.len().min(self.mult_factors.len()),
            });
        }

        if config.check_angle_ranges {
            AngleValidator::validate_range(&self.angles, (0.0, 180.0), "TILT angles")?;
        }
        if config.require_ascending_angles {
            AngleValidator::validate_ascending(&self.angles, "TILT angles")?;
        }
        if let Some(factor) = self.mult_factors.iter().find(|&&f| f < 0.0) {
            return Err(failed(
                "TILT multiplying factors",
                format!("negative factor {}", factor),
            ));
        }
        Ok(())
    }
}

impl IesValidate for PhotometricData {
    fn validate(&self, config: &ValidationConfig) -> IesResult<()> {
        if self.num_vert_angles == 0 || self.num_horz_angles == 0 {
            return Err(failed(
                "angle counts",
                format!(
                    "{} vertical by {} horizontal angles",
                    self.num_vert_angles, self.num_horz_angles
                ),
            ));
        }

        if config.check_angle_ranges {
            AngleValidator::validate_range(
                &self.vert_angles,
                AngleValidator::vertical_range(self.goniometer_type),
                "vertical angles",
            )?;
            AngleValidator::validate_range(
                &self.horz_angles,
                AngleValidator::horizontal_range(self.goniometer_type),
                "horizontal angles",
            )?;
        }

        if config.require_ascending_angles {
            AngleValidator::validate_ascending(&self.vert_angles, "vertical angles")?;
            AngleValidator::validate_ascending(&self.horz_angles, "horizontal angles")?;
        }

        if !config.allow_negative_candelas {
            CandelaValidator::validate_non_negative(self)?;
        }
        Ok(())
    }
}

impl IesValidate for PhotometricProfile {
    fn validate(&self, config: &ValidationConfig) -> IesResult<()> {
        debug!(name = %self.file.name, strict = config.strict_mode, "validating profile");

        self.check_dimensions()?;
        self.photo.validate(config)?;

        if let Some(tilt) = &self.lamp.tilt {
            tilt.validate(config)?;
        }

        if self.lamp.num_lamps < 1 {
            return Err(failed(
                "number of lamps",
                format!("{} lamps", self.lamp.num_lamps),
            ));
        }

        if config.strict_mode {
            KeywordValidator::validate_required(self)?;
        }
        Ok(())
    }
}
