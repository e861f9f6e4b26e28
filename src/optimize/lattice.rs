//! Displayable colors on a regular L*a*b* grid.

use lazy_static::lazy_static;
use crate::Lab;

lazy_static! {
    static ref STANDARD: Vec<Lab> = grid(5, 10);
    static ref HIGH_RESOLUTION: Vec<Lab> = grid(1, 5);
}

/// Points of the grid L ∈ \[0, 100\], a, b ∈ \[-100, 100\] with steps
/// `l_step` and `ab_step` that are displayable in sRGB.
fn grid(l_step: usize, ab_step: usize) -> Vec<Lab> {
    let mut colors = vec![];
    for l in (0 ..= 100).step_by(l_step) {
        for a in (-100 ..= 100).step_by(ab_step) {
            for b in (-100 ..= 100).step_by(ab_step) {
                let c = Lab::new(l as f64, a as f64, b as f64);
                if c.is_valid() { colors.push(c) }
            }
        }
    }
    colors
}

/// Return the displayable lattice points, with steps 5/10/10 or, when
/// `high_resolution`, 1/5/5.  The predicate-independent lattice is
/// computed once and never modified.
pub(crate) fn lattice(high_resolution: bool) -> &'static [Lab] {
    if high_resolution { HIGH_RESOLUTION.as_slice() } else { STANDARD.as_slice() }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_is_valid() {
        let s = lattice(false);
        assert!(!s.is_empty());
        assert!(s.iter().all(|c| c.is_valid()));
        assert!(s.contains(&Lab::new(50., 0., 0.)));
        assert!(!s.contains(&Lab::new(50., 100., -100.)));
    }

    #[test]
    fn lattice_steps() {
        let on_standard_grid = |c: &Lab| c.l % 5. == 0. && c.a % 10. == 0.
                                          && c.b % 10. == 0.;
        let s = lattice(false);
        assert!(s.iter().all(on_standard_grid));
        assert!(s.len() <= 21 * 21 * 21);
        let h = lattice(true);
        assert!(h.len() > s.len());
        let coarse: Vec<Lab> = h.iter().copied()
            .filter(|c| on_standard_grid(c)).collect();
        assert_eq!(coarse, s);
    }
}
