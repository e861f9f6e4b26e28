//! Constrained k-means over a lattice of acceptable colors.
//!
//! Centroids that leave the acceptable region are snapped back to
//! the nearest lattice sample not yet taken by another centroid.

use rand::Rng;
use rgb::RGB;
use tracing::{trace, warn};
use crate::{distance::{distance, DistanceType}, Lab};
use super::{is_acceptable, lattice::lattice, random_lab};

/// Number of redraws of an initial centroid before the last draw is
/// accepted as is.
const INIT_RETRIES: usize = 10;

/// Return `count` centroids after `quality` iterations.
pub(crate) fn optimize<F, R>(count: usize, accept: &F, quality: usize,
                             high_resolution: bool, typ: DistanceType,
                             rng: &mut R) -> Vec<Lab>
where F: Fn(RGB<f64>) -> bool,
      R: Rng + ?Sized {
    let mut centroids: Vec<Lab> = (0 .. count)
        .map(|_| initial_centroid(accept, rng))
        .collect();
    let samples: Vec<Lab> = lattice(high_resolution).iter().copied()
        .filter(|c| accept(c.to_rgb()))
        .collect();
    if samples.is_empty() {
        warn!("no lattice color is accepted, keeping the initial centroids");
        return centroids;
    }
    let mut clusters = Clusters::new(&samples);
    for step in 0 .. quality {
        clusters.assign(&centroids, typ);
        clusters.update(&mut centroids, accept, typ);
        trace!(step, "k-means step");
    }
    centroids
}

/// Random centroid, drawn at most `1 + INIT_RETRIES` times.
fn initial_centroid<F, R>(accept: &F, rng: &mut R) -> Lab
where F: Fn(RGB<f64>) -> bool,
      R: Rng + ?Sized {
    let mut c = random_lab(rng);
    for _ in 0 .. INIT_RETRIES {
        if is_acceptable(c, accept) { return c }
        c = random_lab(rng);
    }
    if !is_acceptable(c, accept) {
        warn!(l = c.l, a = c.a, b = c.b,
              "no acceptable initial centroid found, using an invalid one");
    }
    c
}

/// Lattice samples with the centroid each one belongs to.
struct Clusters<'a> {
    samples: &'a [Lab],
    closest: Vec<Option<usize>>,
}

impl<'a> Clusters<'a> {
    fn new(samples: &'a [Lab]) -> Self {
        Clusters { samples, closest: vec![None; samples.len()] }
    }

    /// Attach every sample to its nearest centroid.
    fn assign(&mut self, centroids: &[Lab], typ: DistanceType) {
        for (s, closest) in self.samples.iter().zip(&mut self.closest) {
            let mut min = f64::INFINITY;
            for (j, &c) in centroids.iter().enumerate() {
                let d = distance(*s, c, typ);
                if d < min {
                    min = d;
                    *closest = Some(j);
                }
            }
        }
    }

    /// Mean of the samples attached to centroid `j`, if any.
    fn mean(&self, j: usize) -> Option<Lab> {
        let mut n = 0;
        let mut sum = Lab::default();
        for (s, _) in self.samples.iter().zip(&self.closest)
            .filter(|(_, k)| **k == Some(j)) {
            n += 1;
            sum.l += s.l;
            sum.a += s.a;
            sum.b += s.b;
        }
        if n == 0 { return None }
        let n = n as f64;
        Some(Lab::new(sum.l / n, sum.a / n, sum.b / n))
    }

    /// Index of the sample nearest to `target` among those for which
    /// `free` holds.
    fn nearest(&self, target: Lab, typ: DistanceType,
               free: impl Fn(usize) -> bool) -> Option<usize> {
        let mut min = f64::INFINITY;
        let mut nearest = None;
        for (i, &s) in self.samples.iter().enumerate() {
            if !free(i) { continue }
            let d = distance(s, target, typ);
            if d < min {
                min = d;
                nearest = Some(i);
            }
        }
        nearest
    }

    /// Move every centroid to the mean of its cluster, or to the
    /// nearest unclaimed sample when that mean is not acceptable (or
    /// the cluster is empty).
    fn update<F>(&self, centroids: &mut [Lab], accept: &F, typ: DistanceType)
    where F: Fn(RGB<f64>) -> bool {
        let mut claimed = vec![false; self.samples.len()];
        for j in 0 .. centroids.len() {
            match self.mean(j) {
                Some(m) if is_acceptable(m, accept) => centroids[j] = m,
                m => {
                    let target = m.unwrap_or_default();
                    let i = self.nearest(target, typ, |i| !claimed[i])
                        .or_else(|| self.nearest(target, typ, |_| true));
                    if let Some(i) = i {
                        centroids[j] = self.samples[i];
                    }
                }
            }
            for (s, taken) in self.samples.iter().zip(&mut claimed) {
                if *s == centroids[j] { *taken = true }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn assign_to_nearest() {
        let samples = [Lab::new(10., 0., 0.), Lab::new(20., 0., 0.),
                       Lab::new(80., 0., 0.), Lab::new(90., 0., 0.)];
        let mut clusters = Clusters::new(&samples);
        assert!(clusters.closest.iter().all(Option::is_none));
        let centroids = [Lab::new(85., 0., 0.), Lab::new(15., 0., 0.)];
        clusters.assign(&centroids, DistanceType::Euclidean);
        assert_eq!(clusters.closest, [Some(1), Some(1), Some(0), Some(0)]);
        assert_eq!(clusters.mean(0), Some(Lab::new(85., 0., 0.)));
        assert_eq!(clusters.mean(1), Some(Lab::new(15., 0., 0.)));
    }

    #[test]
    fn empty_cluster_snaps_to_a_free_sample() {
        let samples = [Lab::new(10., 0., 0.), Lab::new(20., 0., 0.),
                       Lab::new(30., 0., 0.)];
        let mut clusters = Clusters::new(&samples);
        // Both centroids are far from the samples, the second one gets
        // no sample.
        let mut centroids = [Lab::new(40., 0., 0.), Lab::new(95., 0., 0.)];
        clusters.assign(&centroids, DistanceType::Euclidean);
        assert_eq!(clusters.mean(1), None);
        clusters.update(&mut centroids, &|_| true, DistanceType::Euclidean);
        assert_eq!(centroids[0], Lab::new(20., 0., 0.));
        // Nearest sample to (0, 0, 0) not taken by the first centroid.
        assert_eq!(centroids[1], Lab::new(10., 0., 0.));
    }

    #[test]
    fn rejected_mean_snaps_to_unclaimed_sample() {
        let samples = [Lab::new(40., 0., 0.), Lab::new(60., 0., 0.)];
        let mut clusters = Clusters::new(&samples);
        let mut centroids = [Lab::new(90., 0., 0.), Lab::new(50., 0., 0.)];
        // Only the two samples are acceptable, so no mean is.
        let accept = |c: RGB<f64>| {
            let l = Lab::from_rgb(c).l;
            (l - 40.).abs() < 0.01 || (l - 60.).abs() < 0.01
        };
        clusters.assign(&centroids, DistanceType::Euclidean);
        assert_eq!(clusters.closest, [Some(1), Some(1)]);
        clusters.update(&mut centroids, &accept, DistanceType::Euclidean);
        // The first centroid (empty cluster) takes the sample closest
        // to black, the second one the remaining sample.
        assert_eq!(centroids, [Lab::new(40., 0., 0.), Lab::new(60., 0., 0.)]);
    }

    #[test]
    fn all_samples_claimed() {
        let samples = [Lab::new(40., 0., 0.)];
        let mut clusters = Clusters::new(&samples);
        let mut centroids = [Lab::new(45., 0., 0.), Lab::new(90., 0., 0.)];
        clusters.assign(&centroids, DistanceType::Euclidean);
        clusters.update(&mut centroids, &|_| true, DistanceType::Euclidean);
        assert_eq!(centroids, [Lab::new(40., 0., 0.), Lab::new(40., 0., 0.)]);
    }

    #[test]
    fn bounded_initialization() {
        let mut rng = StdRng::seed_from_u64(9);
        // Nothing is acceptable: the last draw is kept.
        let c = initial_centroid(&|_| false, &mut rng);
        assert!((0. ..100.).contains(&c.l));
        let c = initial_centroid(&|_| true, &mut rng);
        assert!(c.is_valid());
    }

    #[test]
    fn nothing_accepted() {
        let mut rng = StdRng::seed_from_u64(4);
        let colors = optimize(3, &|_| false, 5, false,
                              DistanceType::Euclidean, &mut rng);
        assert_eq!(colors.len(), 3);
    }

    #[test]
    fn palette_is_acceptable() {
        let mut rng = StdRng::seed_from_u64(5);
        let bluish = |c: RGB<f64>| c.b > c.r && c.b > c.g;
        let colors = optimize(5, &bluish, 3, false, DistanceType::Cmc, &mut rng);
        assert_eq!(colors.len(), 5);
        for c in colors {
            assert!(c.is_valid());
            assert!(bluish(c.to_rgb()));
        }
    }
}
