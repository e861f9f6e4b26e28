//! Force-directed optimization: every pair of colors repels with a
//! force inversely proportional to the square of their distance.

use rand::Rng;
use rgb::RGB;
use tracing::trace;
use crate::{distance::{distance, DistanceType}, Lab};
use super::{is_acceptable, random_lab};

const REPULSION: f64 = 100.;
const SPEED: f64 = 100.;
/// Largest move of a color in a single step.
const MAX_STEP: f64 = 0.1;

/// Return `count` acceptable colors spread by `20 * quality` steps of
/// repulsion.
pub(crate) fn optimize<F, R>(count: usize, accept: &F, quality: usize,
                             typ: DistanceType, rng: &mut R) -> Vec<Lab>
where F: Fn(RGB<f64>) -> bool,
      R: Rng + ?Sized {
    let mut colors: Vec<Lab> = (0 .. count)
        .map(|_| random_acceptable(accept, rng))
        .collect();
    relax(&mut colors, 20 * quality, accept, typ, rng);
    colors
}

/// Draw colors until one is acceptable.  Does not terminate if no
/// color is.
fn random_acceptable<F, R>(accept: &F, rng: &mut R) -> Lab
where F: Fn(RGB<f64>) -> bool,
      R: Rng + ?Sized {
    loop {
        let c = random_lab(rng);
        if is_acceptable(c, accept) { return c }
    }
}

/// Run `steps` steps of the simulation.  A color only moves if its new
/// position is acceptable.
fn relax<F, R>(colors: &mut [Lab], steps: usize, accept: &F,
               typ: DistanceType, rng: &mut R)
where F: Fn(RGB<f64>) -> bool,
      R: Rng + ?Sized {
    let n = colors.len();
    for step in 0 .. steps {
        let mut vectors = vec![[0.; 3]; n];
        for i in 0 .. n {
            let ca = colors[i];
            for j in 0 .. i {
                let cb = colors[j];
                let d = distance(ca, cb, typ);
                if d > 0. {
                    let force = REPULSION / (d * d);
                    let dv = [(ca.l - cb.l) * force / d,
                              (ca.a - cb.a) * force / d,
                              (ca.b - cb.b) * force / d];
                    for k in 0 .. 3 {
                        vectors[i][k] += dv[k];
                        vectors[j][k] -= dv[k];
                    }
                } else {
                    // Jitter apart colors that cannot be distinguished.
                    for v in &mut vectors[j] {
                        *v += 2. - 4. * rng.gen::<f64>();
                    }
                }
            }
        }
        let mut moved = 0;
        for (c, v) in colors.iter_mut().zip(&vectors) {
            let displacement = SPEED * (v[0] * v[0] + v[1] * v[1]
                                        + v[2] * v[2]).sqrt();
            if displacement > 0. {
                let ratio = SPEED * displacement.min(MAX_STEP) / displacement;
                let candidate = Lab::new(c.l + v[0] * ratio,
                                         c.a + v[1] * ratio,
                                         c.b + v[2] * ratio);
                if is_acceptable(candidate, accept) {
                    *c = candidate;
                    moved += 1;
                }
            }
        }
        trace!(step, moved, "force-directed step");
    }
}
