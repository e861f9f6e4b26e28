//! CIE L*a*b* ↔ sRGB conversions (D65 reference white) and gamut
//! checks.

use rgb::{RGB, RGB16, RGB8};
use crate::Error;

/// A color in the CIE L*a*b* color space.
///
/// `l` is the lightness, roughly in \[0, 100\]; `a` and `b` are
/// unbounded but in practice lie in \[-100, 100\].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

// D65 reference white.
const XN: f64 = 0.950470;
const YN: f64 = 1.;
const ZN: f64 = 1.088830;

const T0: f64 = 4. / 29.;
const T1: f64 = 6. / 29.;
const T2: f64 = 3. * T1 * T1;
const T3: f64 = T1 * T1 * T1;

impl Lab {
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self { Lab { l, a, b } }

    /// Return `true` if any component is NaN.
    #[inline]
    pub fn has_nan(&self) -> bool {
        self.l.is_nan() || self.a.is_nan() || self.b.is_nan()
    }

    /// Convert to sRGB with channels in \[0, 255\] (unclamped, so
    /// out-of-gamut colors yield channels outside that range).
    #[inline]
    pub fn to_rgb(&self) -> RGB<f64> { lab_to_rgb(*self) }

    /// Convert a sRGB color with channels in \[0, 255\] to L*a*b*.
    #[inline]
    pub fn from_rgb(rgb: RGB<f64>) -> Self { rgb_to_lab(rgb) }

    /// Say whether the color is displayable in sRGB.
    #[inline]
    pub fn is_valid(&self) -> bool { is_valid_color(*self) }

    /// Return the color in the pixel type `C`.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use distinct_palette::Lab;
    /// let c: RGB8 = Lab::new(78.25, -17.71, 76.47).rgb();
    /// assert_eq!(c, RGB8::new(200, 200, 20));
    /// ```
    #[inline]
    pub fn rgb<C: RgbColor>(&self) -> C { C::from_rgb(self.to_rgb()) }

    pub(crate) fn euclidean(&self, other: &Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

impl From<[f64; 3]> for Lab {
    #[inline]
    fn from([l, a, b]: [f64; 3]) -> Self { Lab { l, a, b } }
}

impl From<Lab> for [f64; 3] {
    #[inline]
    fn from(c: Lab) -> Self { [c.l, c.a, c.b] }
}

impl TryFrom<&[f64]> for Lab {
    type Error = Error;

    fn try_from(v: &[f64]) -> Result<Self, Error> {
        match *v {
            [l, a, b] => Ok(Lab { l, a, b }),
            _ => Err(Error::ColorLength { len: v.len() }),
        }
    }
}

/// Convert a L*a*b* color to sRGB (channels in \[0, 255\], not
/// clamped).  A NaN `a` (resp. `b`) is treated as neutral, i.e., the
/// corresponding chrominance term is dropped.
pub fn lab_to_rgb(lab: Lab) -> RGB<f64> {
    let y = (lab.l + 16.) / 116.;
    let x = if lab.a.is_nan() { y } else { y + lab.a / 500. };
    let z = if lab.b.is_nan() { y } else { y - lab.b / 200. };

    let y = YN * lab_to_xyz(y);
    let x = XN * lab_to_xyz(x);
    let z = ZN * lab_to_xyz(z);

    RGB {
        r: xyz_to_rgb(3.2404542 * x - 1.5371385 * y - 0.4985314 * z),
        g: xyz_to_rgb(-0.9692660 * x + 1.8760108 * y + 0.0415560 * z),
        b: xyz_to_rgb(0.0556434 * x - 0.2040259 * y + 1.0572252 * z),
    }
}

/// Convert a sRGB color (channels in \[0, 255\]) to L*a*b*.
pub fn rgb_to_lab(rgb: RGB<f64>) -> Lab {
    let r = rgb_to_xyz(rgb.r);
    let g = rgb_to_xyz(rgb.g);
    let b = rgb_to_xyz(rgb.b);

    let x = xyz_to_lab((0.4124564 * r + 0.3575761 * g + 0.1804375 * b) / XN);
    let y = xyz_to_lab((0.2126729 * r + 0.7151522 * g + 0.0721750 * b) / YN);
    let z = xyz_to_lab((0.0193339 * r + 0.1191920 * g + 0.9503041 * b) / ZN);

    Lab { l: 116. * y - 16., a: 500. * (x - y), b: 200. * (y - z) }
}

/// Return `true` iff the three sRGB channels of `lab` lie in
/// \[0, 255\].  NaN components make the color invalid.
pub fn is_valid_color(lab: Lab) -> bool { in_gamut(lab_to_rgb(lab)) }

/// Say whether every channel of `rgb` lies in \[0, 255\].
#[inline]
pub(crate) fn in_gamut(rgb: RGB<f64>) -> bool {
    let RGB { r, g, b } = rgb;
    (0. ..=255.).contains(&r)
        && (0. ..=255.).contains(&g)
        && (0. ..=255.).contains(&b)
}

#[inline]
fn xyz_to_rgb(r: f64) -> f64 {
    255. * if r <= 0.00304 { 12.92 * r }
           else { 1.055 * r.powf(1. / 2.4) - 0.055 }
}

#[inline]
fn lab_to_xyz(t: f64) -> f64 {
    if t > T1 { t * t * t } else { T2 * (t - T0) }
}

#[inline]
fn rgb_to_xyz(c: f64) -> f64 {
    let c = c / 255.;
    if c > 0.04045 { ((c + 0.055) / 1.055).powf(2.4) } else { c / 12.92 }
}

#[inline]
fn xyz_to_lab(t: f64) -> f64 {
    if t > T3 { t.cbrt() } else { t / T2 + T0 }
}


/// Pixel types a palette can be rendered to.
pub trait RgbColor: Sized {
    /// Return the red, green and blue components of the color (in
    /// \[0, 255\]).
    fn to_rgb(&self) -> RGB<f64>;

    /// Create a color from its RGB components (in \[0, 255\]).
    fn from_rgb(rgb: RGB<f64>) -> Self;

    /// Convert the color to grayscale.
    fn to_gray(&self) -> Self {
        let RGB { r, g, b } = Self::to_rgb(self);
        let x = 0.299 * r + 0.587 * g + 0.114 * b;
        Self::from_rgb(RGB { r: x, g: x, b: x })
    }
}

impl RgbColor for RGB<f64> {
    #[inline]
    fn to_rgb(&self) -> RGB<f64> { *self }

    #[inline]
    fn from_rgb(c: RGB<f64>) -> Self { c }
}

impl RgbColor for RGB8 {
    #[inline]
    fn to_rgb(&self) -> RGB<f64> {
        RGB { r: self.r as f64, g: self.g as f64, b: self.b as f64 }
    }

    /// Channels are rounded (and saturated) to integers.
    #[inline]
    fn from_rgb(c: RGB<f64>) -> Self {
        RGB8 { r: c.r.round() as u8,  g: c.g.round() as u8,
               b: c.b.round() as u8 }
    }
}

impl RgbColor for RGB16 {
    #[inline]
    fn to_rgb(&self) -> RGB<f64> {
        RGB { r: self.r as f64 / 257., g: self.g as f64 / 257.,
              b: self.b as f64 / 257. }
    }

    #[inline]
    fn from_rgb(c: RGB<f64>) -> Self {
        RGB16 { r: (c.r * 257.).round() as u16,  g: (c.g * 257.).round() as u16,
                b: (c.b * 257.).round() as u16 }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn assert_rgb_close(x: RGB<f64>, y: RGB<f64>, eps: f64) {
        assert!((x.r - y.r).abs() <= eps && (x.g - y.g).abs() <= eps
                && (x.b - y.b).abs() <= eps,
                "{:?} ≉ {:?}", x, y);
    }

    fn assert_lab_close(x: Lab, y: Lab, eps: f64) {
        assert!((x.l - y.l).abs() <= eps && (x.a - y.a).abs() <= eps
                && (x.b - y.b).abs() <= eps,
                "{:?} ≉ {:?}", x, y);
    }

    #[test]
    fn lab_to_rgb_known_color() {
        let rgb = lab_to_rgb(Lab::new(78.25, -17.71, 76.47));
        assert_rgb_close(rgb, RGB::new(200., 200., 20.), 0.02);
    }

    #[test]
    fn rgb_to_lab_known_color() {
        let lab = rgb_to_lab(RGB::new(50., 150., 250.));
        assert_lab_close(lab, Lab::new(61.127, 5.999, -57.839), 0.02);
    }

    #[test]
    fn rgb_lab_rgb_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0 .. 1000 {
            let rgb = RGB::new(255. * rng.gen::<f64>(),
                               255. * rng.gen::<f64>(),
                               255. * rng.gen::<f64>());
            assert_rgb_close(lab_to_rgb(rgb_to_lab(rgb)), rgb, 0.01);
        }
    }

    #[test]
    fn valid_lab_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut n = 0;
        while n < 200 {
            let lab = Lab::new(100. * rng.gen::<f64>(),
                               100. * (2. * rng.gen::<f64>() - 1.),
                               100. * (2. * rng.gen::<f64>() - 1.));
            if !is_valid_color(lab) { continue }
            n += 1;
            let rgb = lab_to_rgb(lab);
            assert_lab_close(rgb_to_lab(rgb), lab, 0.02);
            assert_rgb_close(lab_to_rgb(rgb_to_lab(rgb)), rgb, 0.02);
        }
    }

    #[test]
    fn gamut() {
        assert!(is_valid_color(Lab::new(50., 20., 30.)));
        assert!(is_valid_color(Lab::new(50., 0., 0.)));
        assert!(!is_valid_color(Lab::new(-10., 0., 0.)));
        assert!(!is_valid_color(Lab::new(50., 100., -100.)));
        assert!(!is_valid_color(Lab::new(f64::NAN, 0., 0.)));
    }

    #[test]
    fn nan_chrominance_is_neutral() {
        let gray = lab_to_rgb(Lab::new(50., 0., 0.));
        assert_rgb_close(lab_to_rgb(Lab::new(50., f64::NAN, f64::NAN)),
                         gray, 1e-9);
    }

    #[test]
    fn lab_from_slice() {
        let v = [1., 2., 3.];
        assert_eq!(Lab::try_from(&v[..]), Ok(Lab::new(1., 2., 3.)));
        assert_eq!(Lab::try_from(&v[.. 2]), Err(Error::ColorLength { len: 2 }));
        assert_eq!(Lab::try_from(&[0.; 4][..]),
                   Err(Error::ColorLength { len: 4 }));
    }

    #[test]
    fn pixel_types() {
        let c: RGB8 = Lab::new(78.25, -17.71, 76.47).rgb();
        assert_eq!(c, RGB8::new(200, 200, 20));
        let g = RGB8::new(255, 0, 0).to_gray();
        assert_eq!(g, RGB8::new(76, 76, 76));
        let w: RGB16 = Lab::new(100., 0., 0.).rgb();
        assert!(w.r >= 65_000);
    }
}
