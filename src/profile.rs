//! Photometric data model
//!
//! Typed representation of an IESNA LM-63 profile. A profile exclusively owns
//! all of its arrays; cloning yields a fully independent value.

use serde::{Deserialize, Serialize};

use crate::errors::IesError;

/// TILT token meaning "no TILT data"
pub const TILT_NONE: &str = "NONE";

/// TILT token meaning "TILT block follows inline"
pub const TILT_INCLUDE: &str = "INCLUDE";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum FileFormat {
    #[default]
    Lm63_1986,
    Lm63_1991,
    Lm63_1995,
    Lm63_2002,
}

impl FileFormat {
    /// Marker line written at the top of a serialized profile
    pub fn marker(&self) -> &'static str {
        match self {
            FileFormat::Lm63_1986 => "IESNA86",
            FileFormat::Lm63_1991 => "IESNA91",
            FileFormat::Lm63_1995 => "IESNA:LM-63-1995",
            FileFormat::Lm63_2002 => "IESNA:LM-63-2002",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Lm63_1986 => write!(f, "LM-63-1986"),
            FileFormat::Lm63_1991 => write!(f, "LM-63-1991"),
            FileFormat::Lm63_1995 => write!(f, "LM-63-1995"),
            FileFormat::Lm63_2002 => write!(f, "LM-63-2002"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileInfo {
    /// Display name, usually the path the profile was read from
    pub name: String,
    pub format: FileFormat,
}

// The display name is not part of a profile's identity: renamed copies of the
// same file compare equal.
impl PartialEq for FileInfo {
    fn eq(&self, other: &Self) -> bool {
        self.format == other.format
    }
}

/// Lamp-to-luminaire geometry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TiltOrientation {
    LampVertical = 1,
    LampHorizontal = 2,
    LampTilted = 3,
}

impl TryFrom<i64> for TiltOrientation {
    type Error = IesError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TiltOrientation::LampVertical),
            2 => Ok(TiltOrientation::LampHorizontal),
            3 => Ok(TiltOrientation::LampTilted),
            _ => Err(IesError::InvalidEnumValue {
                field: "lamp-to-luminaire geometry".to_string(),
                value,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TiltData {
    pub orientation: TiltOrientation,
    pub num_pairs: usize,
    pub angles: Vec<f32>,
    pub mult_factors: Vec<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LampData {
    pub num_lamps: i32,
    pub lumens_per_lamp: f32,
    /// Candela multiplying factor
    pub multiplier: f32,
    /// `NONE`, `INCLUDE` or the path of an external TILT file
    pub tilt_file_name: String,
    pub tilt: Option<TiltData>,
}

impl Default for LampData {
    fn default() -> Self {
        Self {
            num_lamps: 1,
            lumens_per_lamp: 1000.0,
            multiplier: 1.0,
            tilt_file_name: TILT_NONE.to_string(),
            tilt: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Units {
    Feet = 1,
    #[default]
    Meters = 2,
}

impl TryFrom<i64> for Units {
    type Error = IesError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Units::Feet),
            2 => Ok(Units::Meters),
            _ => Err(IesError::InvalidEnumValue {
                field: "units type".to_string(),
                value,
            }),
        }
    }
}

/// Luminous cavity dimensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Dimensions {
    pub width: f32,
    pub length: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ElectricalData {
    pub ballast_factor: f32,
    /// Ballast-lamp photometric factor
    pub blp_factor: f32,
    pub input_watts: f32,
}

impl Default for ElectricalData {
    fn default() -> Self {
        Self {
            ballast_factor: 1.0,
            blp_factor: 1.0,
            input_watts: 0.0,
        }
    }
}

/// Photometric goniometer type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum GoniometerType {
    #[default]
    TypeC = 1,
    TypeB = 2,
    TypeA = 3,
}

impl TryFrom<i64> for GoniometerType {
    type Error = IesError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GoniometerType::TypeC),
            2 => Ok(GoniometerType::TypeB),
            3 => Ok(GoniometerType::TypeA),
            _ => Err(IesError::InvalidEnumValue {
                field: "photometric type".to_string(),
                value,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PhotometricData {
    pub goniometer_type: GoniometerType,
    pub num_vert_angles: usize,
    pub num_horz_angles: usize,
    pub vert_angles: Vec<f32>,
    pub horz_angles: Vec<f32>,
    /// Indexed `[horizontal][vertical]`
    pub candelas: Vec<Vec<f32>>,
}

impl PhotometricData {
    /// Candela value at a horizontal/vertical index pair
    pub fn candela(&self, horz_index: usize, vert_index: usize) -> Option<f32> {
        self.candelas
            .get(horz_index)
            .and_then(|row| row.get(vert_index))
            .copied()
    }

    pub fn max_candela(&self) -> f32 {
        self.candelas
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f32::max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PhotometricProfile {
    pub file: FileInfo,
    pub labels: Vec<String>,
    pub lamp: LampData,
    pub units: Units,
    pub dim: Dimensions,
    pub elec: ElectricalData,
    pub photo: PhotometricData,
}

impl PhotometricProfile {
    pub fn has_tilt(&self) -> bool {
        self.lamp.tilt.is_some()
    }

    /// Labels carrying a `[KEYWORD]` prefix, split into keyword and value
    pub fn keywords(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().filter_map(|label| {
            let rest = label.strip_prefix('[')?;
            let (keyword, value) = rest.split_once(']')?;
            Some((keyword, value.trim()))
        })
    }

    /// Value of the first label with the given keyword, e.g. `MANUFAC`
    pub fn keyword(&self, name: &str) -> Option<&str> {
        self.keywords()
            .find(|(keyword, _)| keyword.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }
}
