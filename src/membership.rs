//! The membership test at the core of every render.

use num::Complex;

/// The number of iterations after which a point that has not escaped
/// is treated as a member of the set.
pub const ITERATION_CAP: usize = 1000;

/// Any orbit that leaves the circle of this radius is known to diverge.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// Iterates z = z * z + c from z = 0 for at most `cap` steps.  Returns
/// false as soon as |z| exceeds `radius`, and true if the orbit stays
/// inside for all `cap` steps.  A `cap` of zero never iterates and so
/// reports every point as bounded.
#[inline]
pub fn is_bounded(c: Complex<f64>, cap: usize, radius: f64) -> bool {
    let limit = radius * radius;
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for _ in 0..cap {
        z = z * z + c;
        if z.norm_sqr() > limit {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::distributions::{Distribution, Uniform};

    fn bounded(re: f64, im: f64) -> bool {
        is_bounded(Complex::new(re, im), ITERATION_CAP, ESCAPE_RADIUS)
    }

    #[test]
    fn origin_is_a_member() {
        for &cap in &[1, 2, 10, ITERATION_CAP, 100_000] {
            assert!(is_bounded(Complex::new(0.0, 0.0), cap, ESCAPE_RADIUS));
        }
    }

    #[test]
    fn far_points_escape() {
        assert!(!bounded(2.0, 2.0));
        assert!(!bounded(-2.0, -2.0));
        assert!(!bounded(3.0, 0.0));
        assert!(!bounded(0.0, -2.5));
    }

    #[test]
    fn far_points_escape_on_the_first_step() {
        assert!(!is_bounded(Complex::new(2.0, 2.0), 1, ESCAPE_RADIUS));
        assert!(!is_bounded(Complex::new(-2.1, 0.0), 1, ESCAPE_RADIUS));
    }

    #[test]
    fn periodic_orbits_are_bounded() {
        // -1 cycles 0, -1, 0; -i cycles through -1 - i, i.
        assert!(bounded(-1.0, 0.0));
        assert!(bounded(0.0, -1.0));
        assert!(bounded(0.0, 1.0));
    }

    #[test]
    fn orbit_sitting_on_the_radius_is_bounded() {
        // -2 maps to 2 forever; |z| = 2 is not greater than the radius.
        assert!(bounded(-2.0, 0.0));
    }

    #[test]
    fn slow_escapes_need_enough_iterations() {
        // Just outside the cusp at 0.25: escapes, but only after many steps.
        let c = Complex::new(0.26, 0.0);
        assert!(is_bounded(c, 5, ESCAPE_RADIUS));
        assert!(!is_bounded(c, ITERATION_CAP, ESCAPE_RADIUS));
    }

    #[test]
    fn zero_cap_is_vacuously_bounded() {
        assert!(is_bounded(Complex::new(100.0, 100.0), 0, ESCAPE_RADIUS));
    }

    #[test]
    fn larger_radius_keeps_points_longer() {
        let c = Complex::new(1.0, 0.0);
        // 1, 2, 5, 26, ...
        assert!(!is_bounded(c, 3, ESCAPE_RADIUS));
        assert!(is_bounded(c, 3, 10.0));
    }

    #[test]
    fn results_are_deterministic() {
        let axis = Uniform::new_inclusive(-2.0_f64, 2.0);
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let c = Complex::new(axis.sample(&mut rng), axis.sample(&mut rng));
            let first = is_bounded(c, ITERATION_CAP, ESCAPE_RADIUS);
            for _ in 0..3 {
                assert_eq!(is_bounded(c, ITERATION_CAP, ESCAPE_RADIUS), first);
            }
        }
    }
}
