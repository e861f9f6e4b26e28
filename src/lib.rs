//! Palettes of perceptually distinct colors.
//!
//! - [`Generator`] and [`generate`] produce palettes of a given size.
//! - [`distance`] measures color differences ([`DistanceType`]),
//!   possibly as perceived by color blind people
//!   ([`ConfusionType`]).
//! - [`simulate`] shows how a color is perceived with a color vision
//!   deficiency.
//!
//! Colors are represented in the CIE L*a*b* color space ([`Lab`]);
//! [`lab_to_rgb`], [`rgb_to_lab`] and [`is_valid_color`] relate it to
//! sRGB.
//!
//! # Example
//!
//! ```
//! use distinct_palette::{Generator, DistanceType, Strategy};
//! use rgb::RGB8;
//! let palette = Generator::new(5)
//!     .strategy(Strategy::ForceDirected)
//!     .distance(DistanceType::Cmc)
//!     .quality(5)
//!     .seed(42)
//!     .generate(|c| c.r + c.g + c.b > 150.)?;
//! let colors: Vec<RGB8> = palette.iter().map(|c| c.rgb()).collect();
//! assert_eq!(colors.len(), 5);
//! # Ok::<(), distinct_palette::Error>(())
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use rgb::RGB;
use tracing::debug;

mod color;
mod distance;
mod error;
mod optimize;
mod vision;

pub use color::{is_valid_color, lab_to_rgb, rgb_to_lab, Lab, RgbColor};
pub use distance::{distance, DistanceType};
pub use error::Error;
pub use optimize::Strategy;
pub use vision::{simulate, ConfusionLine, ConfusionType};

/// Quality factor used when none is specified.
pub const DEFAULT_QUALITY: usize = 50;

/// Set the parameters of a palette generation.
///
/// Created by [`Generator::new`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Generator {
    count: usize,
    strategy: Strategy,
    quality: usize,
    high_resolution: bool,
    distance: DistanceType,
    seed: Option<u64>,
}

impl Generator {
    /// Palettes of `count` colors, generated with k-means, a quality
    /// of [`DEFAULT_QUALITY`] and the Euclidean distance.
    pub fn new(count: usize) -> Self {
        Generator {
            count,
            strategy: Strategy::default(),
            quality: DEFAULT_QUALITY,
            high_resolution: false,
            distance: DistanceType::default(),
            seed: None,
        }
    }

    /// Optimization algorithm.
    pub fn strategy(mut self, s: Strategy) -> Self {
        self.strategy = s;
        self
    }

    /// Iteration factor: `20 * quality` repulsion steps for
    /// [`Strategy::ForceDirected`], `quality` iterations for
    /// [`Strategy::KMeans`].  Must be positive.
    pub fn quality(mut self, q: usize) -> Self {
        self.quality = q;
        self
    }

    /// Sample the color space more finely (k-means only).  Slower.
    pub fn high_resolution(mut self, yes: bool) -> Self {
        self.high_resolution = yes;
        self
    }

    /// Color distance the colors are spread with.
    pub fn distance(mut self, d: DistanceType) -> Self {
        self.distance = d;
        self
    }

    /// Make the generation reproducible.  Without a seed, the random
    /// generator is seeded from the operating system.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn check(&self) -> Result<(), Error> {
        if self.count == 0 { return Err(Error::EmptyPalette) }
        if self.quality == 0 { return Err(Error::ZeroQuality) }
        Ok(())
    }

    /// Return a palette of colors whose sRGB value is accepted by
    /// `accept` (channels in \[0, 255\]).
    ///
    /// With [`Strategy::ForceDirected`], this does not return if
    /// `accept` rejects (almost) all displayable colors.
    pub fn generate<F>(&self, accept: F) -> Result<Vec<Lab>, Error>
    where F: Fn(RGB<f64>) -> bool {
        self.check()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate_with_rng(accept, &mut rng)
    }

    /// Return a palette of displayable colors.
    pub fn generate_any(&self) -> Result<Vec<Lab>, Error> {
        self.generate(|_| true)
    }

    /// Same as [`Generator::generate`] but draws random numbers from
    /// `rng` (the seed set with [`Generator::seed`] is ignored).
    pub fn generate_with_rng<F, R>(&self, accept: F, rng: &mut R)
                                   -> Result<Vec<Lab>, Error>
    where F: Fn(RGB<f64>) -> bool,
          R: Rng + ?Sized {
        self.check()?;
        debug!(count = self.count, strategy = %self.strategy,
               distance = %self.distance, quality = self.quality,
               "generating palette");
        let colors = match self.strategy {
            Strategy::ForceDirected =>
                optimize::force::optimize(self.count, &accept, self.quality,
                                          self.distance, rng),
            Strategy::KMeans =>
                optimize::kmeans::optimize(self.count, &accept, self.quality,
                                           self.high_resolution,
                                           self.distance, rng),
        };
        debug!(count = colors.len(), "palette generated");
        Ok(colors)
    }
}

/// Return a palette of `count` colors accepted by `accept`.  See
/// [`Generator`] for the meaning of the parameters.
pub fn generate<F>(count: usize, accept: F, strategy: Strategy,
                   quality: usize, high_resolution: bool,
                   distance: DistanceType) -> Result<Vec<Lab>, Error>
where F: Fn(RGB<f64>) -> bool {
    Generator::new(count)
        .strategy(strategy)
        .quality(quality)
        .high_resolution(high_resolution)
        .distance(distance)
        .generate(accept)
}
