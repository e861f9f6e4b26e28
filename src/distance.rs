//! Perceptual distances between L*a*b* colors.

use std::{fmt, str::FromStr};
use tracing::trace;
use crate::{vision::{simulate, ConfusionType}, Error, Lab};

/// Color distance used to spread the palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DistanceType {
    /// Euclidean distance in L*a*b*.
    #[default]
    Euclidean,
    /// CMC(2:1) color difference.  Not symmetric.
    Cmc,
    /// CMC(2:1) between the colors as seen by a dichromat.
    Colorblind(ConfusionType),
    /// Weighted average of CMC(2:1) for normal vision (1000) and for
    /// protanopia (100), deuteranopia (500) and tritanopia (1).
    Compromise,
}

impl fmt::Display for DistanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceType::Euclidean => f.write_str("euclidean"),
            DistanceType::Cmc => f.write_str("cmc"),
            DistanceType::Colorblind(t) => fmt::Display::fmt(t, f),
            DistanceType::Compromise => f.write_str("compromise"),
        }
    }
}

impl FromStr for DistanceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" | "default" => Ok(DistanceType::Euclidean),
            "cmc" => Ok(DistanceType::Cmc),
            "compromise" => Ok(DistanceType::Compromise),
            _ => s.parse().map(DistanceType::Colorblind)
                .map_err(|_| Error::UnknownDistance(s.to_string())),
        }
    }
}

/// Return the distance from `c1` to `c2`.
///
/// The result is non-negative; `0.` is returned when the computation
/// degenerates to NaN (e.g. for NaN inputs).
///
/// # Example
///
/// ```
/// use distinct_palette::{distance, DistanceType, Lab};
/// let d = distance(Lab::new(50., 25., 25.), Lab::new(52., 23., 26.),
///                  DistanceType::Euclidean);
/// assert_eq!(d, 3.);
/// ```
pub fn distance(c1: Lab, c2: Lab, typ: DistanceType) -> f64 {
    let d = match typ {
        DistanceType::Euclidean => c1.euclidean(&c2),
        DistanceType::Cmc => cmc(c1, c2, 2., 1.),
        DistanceType::Colorblind(t) => colorblind(c1, c2, t),
        DistanceType::Compromise => compromise(c1, c2),
    };
    if d.is_nan() { 0. } else { d }
}

fn colorblind(c1: Lab, c2: Lab, typ: ConfusionType) -> f64 {
    cmc(simulate(c1, typ, 1.), simulate(c2, typ, 1.), 2., 1.)
}

fn compromise(c1: Lab, c2: Lab) -> f64 {
    let mut terms = [(1000., cmc(c1, c2, 2., 1.)), (0., 0.), (0., 0.), (0., 0.)];
    for (term, typ) in terms[1..].iter_mut().zip(ConfusionType::ALL) {
        *term = compromise_term(typ, simulate(c1, typ, 1.),
                                simulate(c2, typ, 1.));
    }
    weighted_mean(&terms)
}

/// Weight and distance of simulated colors.  Failed simulations
/// (NaN) get weight and distance `0.`.
fn compromise_term(typ: ConfusionType, c1: Lab, c2: Lab) -> (f64, f64) {
    if c1.has_nan() || c2.has_nan() {
        trace!(%typ, "colorblind simulation failed, dropping its term");
        (0., 0.)
    } else {
        (typ.compromise_weight(), cmc(c1, c2, 2., 1.))
    }
}

/// Mean of `(weight, value)` pairs, `0.` when all weights vanish.
fn weighted_mean(terms: &[(f64, f64)]) -> f64 {
    let (total, count) = terms.iter()
        .fold((0., 0.), |(t, n), &(w, d)| (t + w * d, n + w));
    if count == 0. { 0. } else { total / count }
}

/// CMC(l:c) difference of `c2` with respect to `c1`.  The weighting
/// functions only depend on `c1`.
fn cmc(c1: Lab, c2: Lab, l: f64, c: f64) -> f64 {
    let Lab { l: l1, a: a1, b: b1 } = c1;
    let Lab { l: l2, a: a2, b: b2 } = c2;

    let ch1 = a1.hypot(b1);
    let ch2 = a2.hypot(b2);
    let dc = ch1 - ch2;
    let dl = l1 - l2;
    let da = a1 - a2;
    let db = b1 - b2;
    // Rounding may make the radicand slightly negative.
    let dh = (da * da + db * db - dc * dc).max(0.).sqrt();

    let h1 = b1.atan2(a1).to_degrees().rem_euclid(360.);

    let c4 = ch1.powi(4);
    let f = (c4 / (c4 + 1900.)).sqrt();
    let t = if (164. ..=345.).contains(&h1) {
        0.56 + (0.2 * (h1 + 168.).to_radians().cos()).abs()
    } else {
        0.36 + (0.4 * (h1 + 35.).to_radians().cos()).abs()
    };
    let sl = if l1 < 16. { 0.511 } else { 0.040975 * l1 / (1. + 0.01765 * l1) };
    let sc = 0.0638 * ch1 / (1. + 0.0131 * ch1) + 0.638;
    let sh = sc * (f * t + 1. - f);

    ((dl / (l * sl)).powi(2) + (dc / (c * sc)).powi(2) + (dh / sh).powi(2))
        .sqrt()
}
