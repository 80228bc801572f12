//! Cone rescaling of vertical angles and candela values
//!
//! The measured distribution is assumed to cover a hemisphere (180 degrees)
//! tangent to the emitting surface. Rescaling fits it into a narrower cone by
//! shrinking every sample's projection onto the equatorial plane by
//! `sin(cone / 2)`, keeping its projection onto the polar axis.

use lazy_static::lazy_static;
use tracing::debug;

use crate::{
    errors::{IesError, IesResult},
    profile::PhotometricProfile,
};

const DEG_TO_RAD: f32 = (std::f64::consts::PI / 180.0) as f32;
const RAD_TO_DEG: f32 = (180.0 / std::f64::consts::PI) as f32;

/// Samples this close to 90 degrees keep their angle
const HORIZONTAL_GUARD_DEGREES: f32 = 90.0 + 1.0;

lazy_static! {
    static ref HORIZONTAL_THRESHOLD: f32 = (HORIZONTAL_GUARD_DEGREES * DEG_TO_RAD).cos().abs();
}

/// What a rescale keeps constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RescaleMode {
    /// Keep the polar projection of each sample and shorten it toward the
    /// axis. The outline keeps its shape; total intensity drops.
    #[default]
    PreserveShape,
    /// Rotate each sample toward the axis at its original magnitude. Total
    /// intensity is kept; the outline narrows into a teardrop.
    PreserveIntensity,
}

impl From<bool> for RescaleMode {
    fn from(preserve_intensity: bool) -> Self {
        if preserve_intensity {
            RescaleMode::PreserveIntensity
        } else {
            RescaleMode::PreserveShape
        }
    }
}

/// Horizontal scale factor for a cone angle in degrees
pub fn cone_scale(cone_angle: f32) -> f32 {
    (cone_angle * 0.5 * DEG_TO_RAD).sin()
}

/// Rescale one `(vertical angle, candela)` sample
///
/// Non-positive candelas are returned unchanged. Angles above 90 degrees are
/// mirrored into the lower hemisphere and mirrored back afterwards.
pub fn rescale_sample(vert_angle: f32, candela: f32, scale: f32, mode: RescaleMode) -> (f32, f32) {
    if candela <= 0.0 {
        return (vert_angle, candela);
    }

    let is_top_hemisphere = vert_angle > 90.0;
    let angle = if is_top_hemisphere {
        180.0 - vert_angle
    } else {
        vert_angle
    };
    let angle_rad = angle * DEG_TO_RAD;

    let projected_y = candela * angle_rad.cos();
    let projected_x = candela * angle_rad.sin();
    let scaled_x = projected_x * scale;

    // Near 90 degrees the polar projection vanishes; leaving those samples in
    // place also keeps double-sided emitters from opening a gap at the equator.
    let near_horizontal = angle_rad.cos().abs() <= *HORIZONTAL_THRESHOLD;

    let (scaled_angle, scaled_candela) = match mode {
        RescaleMode::PreserveShape => {
            let scaled_angle = if near_horizontal {
                angle
            } else {
                (scaled_x / projected_y).atan() * RAD_TO_DEG
            };
            let scaled_candela = projected_y.hypot(scaled_x);
            (scaled_angle, scaled_candela)
        },
        RescaleMode::PreserveIntensity => {
            if near_horizontal {
                (angle, scaled_x)
            } else {
                ((scaled_x / candela).asin() * RAD_TO_DEG, candela)
            }
        },
    };

    let scaled_angle = if is_top_hemisphere {
        180.0 - scaled_angle
    } else {
        scaled_angle
    };
    (scaled_angle, scaled_candela)
}

/// Rescale a profile into a cone of `cone_angle` degrees
///
/// Returns a new profile; `profile` is left untouched. 180 degrees is the
/// identity. Vertical angles are expected to lie in [0, 180]; the rescaled
/// angle depends only on the original angle and the cone, so every row with a
/// positive candela at a given index writes the same vertical angle.
pub fn rescale(
    profile: &PhotometricProfile,
    cone_angle: f32,
    mode: RescaleMode,
) -> IesResult<PhotometricProfile> {
    if !(0.0..=180.0).contains(&cone_angle) {
        return Err(IesError::InvalidRescaleAngle { angle: cone_angle });
    }
    profile.check_dimensions()?;

    let scale = cone_scale(cone_angle);
    debug_assert!((0.0..=1.0).contains(&scale), "invalid projected x scale");
    debug!(cone_angle, scale, ?mode, "rescaling profile");

    let mut scaled = profile.clone();
    let photo = &profile.photo;

    for (h, row) in photo.candelas.iter().enumerate() {
        for (v, &candela) in row.iter().enumerate() {
            if candela <= 0.0 {
                continue;
            }

            let (angle, value) = rescale_sample(photo.vert_angles[v], candela, scale, mode);
            scaled.photo.vert_angles[v] = angle;
            scaled.photo.candelas[h][v] = value;
        }
    }

    Ok(scaled)
}

impl PhotometricProfile {
    /// Rescale into a cone of `cone_angle` degrees, returning a new profile
    pub fn rescale(&self, cone_angle: f32, mode: RescaleMode) -> IesResult<PhotometricProfile> {
        rescale(self, cone_angle, mode)
    }
}
