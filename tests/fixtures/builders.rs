//! Profile test data generators and builders
//!
//! Builder pattern for assembling photometric profiles, plus generators for
//! every file format, malformed inputs and edge cases.

use ies_rescale::{
    Dimensions, ElectricalData, FileFormat, FileInfo, GoniometerType, IesResult, LampData,
    PhotometricData, PhotometricProfile, TiltData, TiltOrientation, Units, TILT_INCLUDE,
};

/// Main builder for creating profiles with a fluent API
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    format: FileFormat,
    labels: Vec<String>,
    lamp: LampData,
    units: Units,
    dim: Dimensions,
    elec: ElectricalData,
    goniometer_type: GoniometerType,
    vert_angles: Vec<f32>,
    horz_angles: Vec<f32>,
    candelas: Vec<Vec<f32>>,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileBuilder {
    /// A single-plane LM-63-1995 downlight
    pub fn new() -> Self {
        Self {
            format: FileFormat::Lm63_1995,
            labels: vec!["[TEST] builder".to_string()],
            lamp: LampData::default(),
            units: Units::Meters,
            dim: Dimensions::default(),
            elec: ElectricalData::default(),
            goniometer_type: GoniometerType::TypeC,
            vert_angles: vec![0.0, 45.0, 90.0],
            horz_angles: vec![0.0],
            candelas: vec![vec![1000.0, 700.0, 100.0]],
        }
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = format;
        self
    }

    pub fn label<S: Into<String>>(mut self, label: S) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn keyword(self, keyword: &str, value: &str) -> Self {
        self.label(format!("[{}] {}", keyword, value))
    }

    pub fn no_labels(mut self) -> Self {
        self.labels.clear();
        self
    }

    pub fn lamps(mut self, count: i32, lumens: f32) -> Self {
        self.lamp.num_lamps = count;
        self.lamp.lumens_per_lamp = lumens;
        self
    }

    pub fn multiplier(mut self, multiplier: f32) -> Self {
        self.lamp.multiplier = multiplier;
        self
    }

    /// Inline TILT block
    pub fn tilt(mut self, orientation: TiltOrientation, angles: &[f32], factors: &[f32]) -> Self {
        self.lamp.tilt_file_name = TILT_INCLUDE.to_string();
        self.lamp.tilt = Some(TiltData {
            orientation,
            num_pairs: angles.len(),
            angles: angles.to_vec(),
            mult_factors: factors.to_vec(),
        });
        self
    }

    pub fn units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn dimensions(mut self, width: f32, length: f32, height: f32) -> Self {
        self.dim = Dimensions {
            width,
            length,
            height,
        };
        self
    }

    pub fn electrical(mut self, ballast_factor: f32, blp_factor: f32, input_watts: f32) -> Self {
        self.elec = ElectricalData {
            ballast_factor,
            blp_factor,
            input_watts,
        };
        self
    }

    pub fn goniometer(mut self, goniometer_type: GoniometerType) -> Self {
        self.goniometer_type = goniometer_type;
        self
    }

    /// Set angles; candelas are reset to a zero matrix of matching shape
    pub fn angles(mut self, vertical: &[f32], horizontal: &[f32]) -> Self {
        self.vert_angles = vertical.to_vec();
        self.horz_angles = horizontal.to_vec();
        self.candelas = vec![vec![0.0; vertical.len()]; horizontal.len()];
        self
    }

    pub fn candela_rows(mut self, rows: Vec<Vec<f32>>) -> Self {
        self.candelas = rows;
        self
    }

    /// Fill every row with `f(vertical angle)`
    pub fn candelas_by_angle<F>(mut self, f: F) -> Self
    where
        F: Fn(f32) -> f32,
    {
        let row: Vec<f32> = self.vert_angles.iter().map(|&a| f(a)).collect();
        self.candelas = vec![row; self.horz_angles.len()];
        self
    }

    /// Build the profile, checking that the matrix matches the angles
    pub fn build(self) -> IesResult<PhotometricProfile> {
        let profile = PhotometricProfile {
            file: FileInfo {
                name: "builder.ies".to_string(),
                format: self.format,
            },
            labels: self.labels,
            lamp: self.lamp,
            units: self.units,
            dim: self.dim,
            elec: self.elec,
            photo: PhotometricData {
                goniometer_type: self.goniometer_type,
                num_vert_angles: self.vert_angles.len(),
                num_horz_angles: self.horz_angles.len(),
                vert_angles: self.vert_angles,
                horz_angles: self.horz_angles,
                candelas: self.candelas,
            },
        };
        profile.check_dimensions()?;
        Ok(profile)
    }

    /// Build and serialize to canonical bytes
    pub fn build_bytes(self) -> IesResult<Vec<u8>> {
        self.build()?.to_vec()
    }
}

/// One generator per LM-63 revision
pub struct FormatGenerators;

impl FormatGenerators {
    pub fn lm63_1986() -> ProfileBuilder {
        ProfileBuilder::new()
            .format(FileFormat::Lm63_1986)
            .no_labels()
            .label("Acme downlight 1986")
            .units(Units::Feet)
    }

    pub fn lm63_1991() -> ProfileBuilder {
        ProfileBuilder::new()
            .format(FileFormat::Lm63_1991)
            .keyword("MANUFAC", "Acme")
            .lamps(2, 1250.0)
    }

    pub fn lm63_1995() -> ProfileBuilder {
        ProfileBuilder::new()
            .keyword("LUMINAIRE", "Wall washer")
            .tilt(TiltOrientation::LampHorizontal, &[0.0, 45.0, 90.0], &[1.0, 0.95, 0.9])
            .angles(&[0.0, 22.5, 45.0, 67.5, 90.0], &[0.0, 90.0, 180.0])
            .candelas_by_angle(|a| 1000.0 - 10.0 * a)
    }

    pub fn lm63_2002() -> ProfileBuilder {
        ProfileBuilder::new()
            .format(FileFormat::Lm63_2002)
            .keyword("TESTLAB", "Photometric Lab")
            .keyword("MANUFAC", "Acme")
            .keyword("ISSUEDATE", "2024-03-01")
            .dimensions(0.6, 0.6, 0.08)
            .electrical(0.95, 1.0, 36.5)
            .angles(&[0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0], &[0.0, 45.0, 90.0])
            .candelas_by_angle(|a| if a <= 90.0 { 800.0 - 8.0 * a } else { 50.0 })
    }

    pub fn all() -> Vec<ProfileBuilder> {
        vec![
            Self::lm63_1986(),
            Self::lm63_1991(),
            Self::lm63_1995(),
            Self::lm63_2002(),
        ]
    }
}

/// Raw byte inputs that must fail to parse
pub struct InvalidDataGenerators;

impl InvalidDataGenerators {
    pub fn missing_tilt() -> &'static [u8] {
        b"IESNA:LM-63-1995\n[TEST] no tilt\n1 1000 1 1 1 1 2 0 0 0\n"
    }

    pub fn truncated_candelas() -> &'static [u8] {
        b"IESNA91\nTILT=NONE\n1 1000 1 3 2 1 2 0 0 0\n1 1 10\n0 45 90\n0 90\n100 50 0\n100 50\n"
    }

    pub fn bad_goniometer() -> &'static [u8] {
        b"IESNA91\nTILT=NONE\n1 1000 1 1 1 4 2 0 0 0\n1 1 10\n0\n0\n100\n"
    }

    pub fn non_numeric_header() -> &'static [u8] {
        b"IESNA91\nTILT=NONE\n1 lots 1 1 1 1 2 0 0 0\n1 1 10\n0\n0\n100\n"
    }

    pub fn fractional_lamp_count() -> &'static [u8] {
        b"IESNA91\nTILT=NONE\n1.5 1000 1 1 1 1 2 0 0 0\n1 1 10\n0\n0\n100\n"
    }
}

/// Unusual but valid profiles
pub struct EdgeCaseGenerators;

impl EdgeCaseGenerators {
    /// One vertical and one horizontal angle
    pub fn minimal_valid() -> ProfileBuilder {
        ProfileBuilder::new()
            .no_labels()
            .angles(&[0.0], &[0.0])
            .candela_rows(vec![vec![500.0]])
    }

    /// Equal intensity toward both poles
    pub fn double_sided() -> ProfileBuilder {
        ProfileBuilder::new()
            .angles(&[0.0, 180.0], &[0.0])
            .candela_rows(vec![vec![100.0, 100.0]])
    }

    /// Samples clustered around the horizontal plane
    pub fn near_horizontal() -> ProfileBuilder {
        ProfileBuilder::new()
            .angles(&[0.0, 89.5, 90.0, 90.5, 180.0], &[0.0, 180.0])
            .candelas_by_angle(|_| 250.0)
    }

    /// TILT block with a zero pair count
    pub fn empty_tilt() -> ProfileBuilder {
        ProfileBuilder::new().tilt(TiltOrientation::LampTilted, &[], &[])
    }

    pub fn dark() -> ProfileBuilder {
        ProfileBuilder::new().candelas_by_angle(|_| 0.0)
    }
}
