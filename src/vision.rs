//! Simulation of dichromatic color vision.
//!
//! A color is projected onto the confusion line of the deficiency in
//! xyY chromaticity space, then shifted towards the neutral gray of the
//! same luminance until it fits in the sRGB cube.
//!
//! See
//! - http://vision.psychol.cam.ac.uk/jdmollon/papers/colourmaps.pdf
//! - http://colororacle.org/

use std::{fmt, str::FromStr};
use rgb::RGB;
use crate::{color::{lab_to_rgb, rgb_to_lab}, Error, Lab};

/// Kind of dichromacy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfusionType {
    /// Missing L cones (red).
    Protanopia,
    /// Missing M cones (green).
    Deuteranopia,
    /// Missing S cones (blue).
    Tritanopia,
}

/// Confusion point `(x, y)` in xy chromaticity coordinates and the
/// line `y = m x + yint` colors are projected onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfusionLine {
    pub x: f64,
    pub y: f64,
    pub m: f64,
    pub yint: f64,
}

impl ConfusionType {
    pub const ALL: [ConfusionType; 3] = [
        ConfusionType::Protanopia,
        ConfusionType::Deuteranopia,
        ConfusionType::Tritanopia];

    /// Empirical confusion line of the deficiency.
    pub const fn confusion_line(self) -> ConfusionLine {
        use ConfusionType::*;
        match self {
            Protanopia => ConfusionLine {
                x: 0.7465, y: 0.2535, m: 1.27345, yint: -0.07389 },
            Deuteranopia => ConfusionLine {
                x: 1.4, y: -0.4, m: 0.96843, yint: 0.00333 },
            Tritanopia => ConfusionLine {
                x: 0.1748, y: 0., m: 1.07678, yint: -0.02274 },
        }
    }

    /// Weight of this deficiency in [`DistanceType::Compromise`].
    ///
    /// [`DistanceType::Compromise`]: crate::DistanceType::Compromise
    pub const fn compromise_weight(self) -> f64 {
        use ConfusionType::*;
        match self {
            Protanopia => 100.,
            Deuteranopia => 500.,
            Tritanopia => 1.,
        }
    }
}

impl fmt::Display for ConfusionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ConfusionType::*;
        f.write_str(match self {
            Protanopia => "protanope",
            Deuteranopia => "deuteranope",
            Tritanopia => "tritanope",
        })
    }
}

impl FromStr for ConfusionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        use ConfusionType::*;
        match s.to_ascii_lowercase().as_str() {
            "protanope" | "protanopia" => Ok(Protanopia),
            "deuteranope" | "deuteranopia" => Ok(Deuteranopia),
            "tritanope" | "tritanopia" => Ok(Tritanopia),
            _ => Err(Error::UnknownConfusion(s.to_string())),
        }
    }
}

#[inline]
fn or_zero(x: f64) -> f64 { if x.is_nan() { 0. } else { x } }

/// Maximum of `x` and `y`, NaN if either one is.
#[inline]
fn max_nan(x: f64, y: f64) -> f64 {
    if x.is_nan() || y.is_nan() { f64::NAN } else { x.max(y) }
}

/// Return how `lab` is perceived under the deficiency `typ`.
///
/// `amount` ∈ \[0, 1\] models anomalous trichromacy: `0.` returns the
/// color unchanged, `1.` the fully dichromatic one, and values in
/// between interpolate linearly in (gamma encoded) RGB.
///
/// Degenerate divisions in the chromaticity projection (e.g. for
/// colors on the achromatic axis) are replaced by `0.`.  The
/// simulation fails, i.e. the result has NaN components, for a NaN
/// lightness, for colors with a negative sRGB channel, and for black
/// under tritanopia.
pub fn simulate(lab: Lab, typ: ConfusionType, amount: f64) -> Lab {
    let line = typ.confusion_line();
    let RGB { r: sr, g: sg, b: sb } = lab_to_rgb(lab);

    // sRGB (gamma 2.2) -> XYZ (D65)
    let pr = (sr / 255.).powf(2.2);
    let pg = (sg / 255.).powf(2.2);
    let pb = (sb / 255.).powf(2.2);
    let x = pr * 0.412424 + pg * 0.357579 + pb * 0.180464;
    let y = pr * 0.212656 + pg * 0.715158 + pb * 0.0721856;
    let z = pr * 0.0193324 + pg * 0.119193 + pb * 0.950444;

    // xy chromaticity; Y is kept as the luminance.
    let chroma_x = or_zero(x / (x + y + z));
    let chroma_y = or_zero(y / (x + y + z));

    // Line through the color and the confusion point, intersected with
    // the confusion line.
    let m = or_zero((chroma_y - line.y) / (chroma_x - line.x));
    let yint = chroma_y - chroma_x * m;
    let dev_x = or_zero((line.yint - yint) / (m - line.m));
    let dev_y = or_zero(m * dev_x + yint);

    let x = dev_x * y / dev_y;
    let z = (1. - (dev_x + dev_y)) * y / dev_y;

    // Neutral gray of the same luminance (D65).
    let neutral_x = 0.312713 * y / 0.329016;
    let neutral_z = 0.358271 * y / 0.329016;
    let diff_x = neutral_x - x;
    let diff_z = neutral_z - z;
    let diff_r = diff_x * 3.24071 + diff_z * -0.498571;
    let diff_g = diff_x * -0.969258 + diff_z * 0.0415557;
    let diff_b = diff_x * 0.0556352 + diff_z * 1.05707;

    let dr = x * 3.24071 + y * -1.53726 + z * -0.498571;
    let dg = x * -0.969258 + y * 1.87599 + z * 0.0415557;
    let db = x * 0.0556352 + y * -0.203996 + z * 1.05707;

    // Shift towards the gray by the largest factor that keeps one
    // channel on the boundary of [0, 1].  A NaN factor makes the
    // simulation fail.
    let fit = |d: f64, diff: f64| {
        let f = ((if d < 0. { 0. } else { 1. }) - d) / diff;
        if f < 0. || f > 1. { 0. } else { f }
    };
    let adjust = max_nan(max_nan(fit(dr, diff_r), fit(dg, diff_g)),
                         fit(db, diff_b));
    let dr = dr + adjust * diff_r;
    let dg = dg + adjust * diff_g;
    let db = db + adjust * diff_b;

    let gamma = |c: f64| (if c < 0. { 0. } else { c }).powf(1. / 2.2);
    let blend = |s: f64, d: f64| s / 255. * (1. - amount) + gamma(d) * amount;
    rgb_to_lab(RGB {
        r: 255. * blend(sr, dr),
        g: 255. * blend(sg, dg),
        b: 255. * blend(sb, db),
    })
}
