//! Palette optimizers.
//!
//! Both strategies only ever keep colors that are displayable and
//! satisfy the caller's acceptance predicate, with one exception: the
//! initial k-means centroids are drawn a bounded number of times and
//! the last draw is kept even if it is not acceptable.

use std::{fmt, str::FromStr};
use rand::Rng;
use rgb::RGB;
use crate::{color::in_gamut, Error, Lab};

pub(crate) mod force;
pub(crate) mod kmeans;
mod lattice;

/// Algorithm used to spread the colors of the palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Colors repel each other like charged particles.
    ForceDirected,
    /// Lloyd iterations over a lattice of acceptable colors.
    #[default]
    KMeans,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::ForceDirected => "force",
            Strategy::KMeans => "kmeans",
        })
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "force" | "force-directed" | "force-vector" =>
                Ok(Strategy::ForceDirected),
            "kmeans" | "k-means" => Ok(Strategy::KMeans),
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}

/// Say whether `lab` is displayable and accepted by the caller.
#[inline]
pub(crate) fn is_acceptable<F>(lab: Lab, accept: &F) -> bool
where F: Fn(RGB<f64>) -> bool {
    let rgb = lab.to_rgb();
    in_gamut(rgb) && accept(rgb)
}

/// Uniform sample of the box L ∈ \[0, 100\], a, b ∈ \[-100, 100\].
pub(crate) fn random_lab<R: Rng + ?Sized>(rng: &mut R) -> Lab {
    let l = 100. * rng.gen::<f64>();
    let a = 100. * (2. * rng.gen::<f64>() - 1.);
    let b = 100. * (2. * rng.gen::<f64>() - 1.);
    Lab { l, a, b }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn random_lab_in_box() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0 .. 1000 {
            let c = random_lab(&mut rng);
            assert!((0. ..100.).contains(&c.l));
            assert!((-100. ..100.).contains(&c.a));
            assert!((-100. ..100.).contains(&c.b));
        }
    }

    #[test]
    fn acceptable() {
        let gray = Lab::new(50., 0., 0.);
        assert!(is_acceptable(gray, &|_| true));
        assert!(!is_acceptable(gray, &|_| false));
        assert!(!is_acceptable(Lab::new(50., 100., -100.), &|_| true));
    }

    #[test]
    fn predicate_sees_displayable_rgb_only() {
        let seen = Cell::new(None);
        let record = |c: RGB<f64>| { seen.set(Some(c)); true };
        assert!(!is_acceptable(Lab::new(50., 100., -100.), &record));
        assert_eq!(seen.get(), None);
        let c = Lab::new(60., 40., 30.);
        assert!(is_acceptable(c, &record));
        assert_eq!(seen.get(), Some(c.to_rgb()));
    }

    #[test]
    fn parse() {
        assert_eq!("force".parse(), Ok(Strategy::ForceDirected));
        assert_eq!("K-Means".parse(), Ok(Strategy::KMeans));
        assert!("annealing".parse::<Strategy>().is_err());
        for s in [Strategy::ForceDirected, Strategy::KMeans] {
            assert_eq!(s.to_string().parse(), Ok(s));
        }
    }
}
