//! Bilateration, the third vertex of a triangle from two known vertices and
//! the two distances to them.
//!
//! The solution is the intersection of two circles. With the squared sides
//! `s1 = |AB|²`, `s2 = |AC|²` and `s3 = |BC|²`, the discriminant
//! `(s1 + s2 + s3)² - 2(s1² + s2² + s3²)` is sixteen times the squared
//! triangle area (Heron's formula), so the point is
//!
//! ```text
//! C = A + 1/(2 s1) [[z1, -z2], [z2, z1]] (B - A)
//! z1 = s1 + s2 - s3
//! z2 = ±sqrt(discriminant)
//! ```
//!
//! The discriminant is evaluated in the factored form on the sorted sides
//! `a >= b >= c`, `(a + (b + c))(c - (a - b))(c + (a - b))(a + (b - c))`,
//! which keeps its precision when one side is much shorter than the others.
//!
//! ```
//! use four_bar::{bilaterate, Branch};
//!
//! let c = bilaterate(&[0., 0.], &[2., 0.], 2f64.sqrt(), 2f64.sqrt(), Branch::Left).unwrap();
//! assert!((c[0] - 1.).abs() < 1e-12 && (c[1] - 1.).abs() < 1e-12);
//! ```
use crate::{Error, Point, Result};

/// Rounding noise allowed on a degenerate (zero area) triangle, relative to
/// `(s1 + s2 + s3)²`.
pub const DEGENERATE_TOL: f64 = 1e-12;

/// The side of the directed line `A -> B` where the solution is placed.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Branch {
    /// Counter-clockwise side (`sign = +1`)
    #[default]
    Left,
    /// Clockwise side (`sign = -1`)
    Right,
}

impl Branch {
    /// Sign of the triangle area.
    pub const fn sign(&self) -> f64 {
        match self {
            Self::Left => 1.,
            Self::Right => -1.,
        }
    }

    /// The mirrored branch.
    pub const fn inv(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Name of the branch.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

/// Sixteen times the squared area of the triangle with sides `d1`, `d2` and
/// `d3`. Negative if the sides break the triangle inequality.
pub fn discriminant(d1: f64, d2: f64, d3: f64) -> f64 {
    let mut sides = [d1, d2, d3];
    sides.sort_unstable_by(|a, b| b.total_cmp(a));
    let [a, b, c] = sides;
    (a + (b + c)) * (c - (a - b)) * (c + (a - b)) * (a + (b - c))
}

/// Find point `C` with `|AC| = d_ac` and `|BC| = d_bc`.
///
/// Fails with [`Error::GeometricallyInfeasible`] if no triangle closes, and
/// with [`Error::Indeterminate`] if `A` and `B` coincide with equal
/// distances. An exactly degenerate triangle returns the collinear point.
pub fn bilaterate<P: Point>(a: &P, b: &P, d_ac: f64, d_bc: f64, branch: Branch) -> Result<P> {
    let d_ab = a.dist(b);
    let s1 = d_ab * d_ab;
    let s2 = d_ac * d_ac;
    let s3 = d_bc * d_bc;
    let discriminant = discriminant(d_ab, d_ac, d_bc);
    if !discriminant.is_finite() {
        return Err(Error::invalid_cfg("non-finite bilateration input"));
    }
    let sum = s1 + s2 + s3;
    let discriminant = if discriminant >= 0. {
        discriminant
    } else if discriminant >= -DEGENERATE_TOL * sum * sum {
        0.
    } else {
        return Err(Error::GeometricallyInfeasible { discriminant });
    };
    if s1 <= f64::EPSILON * sum {
        return Err(Error::Indeterminate);
    }
    let z1 = s1 + s2 - s3;
    let z2 = branch.sign() * discriminant.sqrt();
    let k = 1. / (2. * s1);
    let [vx, vy] = b.sub(a).to_coord();
    Ok(P::point(
        a.x() + k * (z1 * vx - z2 * vy),
        a.y() + k * (z2 * vx + z1 * vy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn left_and_right() {
        let d = 2f64.sqrt();
        let c = bilaterate(&[0., 0.], &[2., 0.], d, d, Branch::Left).unwrap();
        assert_abs_diff_eq!(c[..], [1., 1.][..], epsilon = 1e-12);
        let c = bilaterate(&[0., 0.], &[2., 0.], d, d, Branch::Right).unwrap();
        assert_abs_diff_eq!(c[..], [1., -1.][..], epsilon = 1e-12);
        // Left of the reversed line
        let c = bilaterate(&[2., 0.], &[0., 0.], d, d, Branch::Left).unwrap();
        assert_abs_diff_eq!(c[..], [1., -1.][..], epsilon = 1e-12);
    }

    #[test]
    fn tuple_points() {
        let (x, y) = bilaterate(&(1., 1.), &(4., 1.), 3., 4., Branch::Right).unwrap();
        assert_abs_diff_eq!((1., 1.).dist(&(x, y)), 3., epsilon = 1e-12);
        assert_abs_diff_eq!((4., 1.).dist(&(x, y)), 4., epsilon = 1e-12);
        assert!(y < 1.);
    }

    #[test]
    fn degenerate_triangle() {
        // |AB| = 2, |AC| = 3, |BC| = 5
        assert_eq!(discriminant(2., 3., 5.), 0.);
        for branch in [Branch::Left, Branch::Right] {
            let c = bilaterate(&[0., 0.], &[2., 0.], 3., 5., branch).unwrap();
            assert_abs_diff_eq!(c[..], [-3., 0.][..], epsilon = 1e-12);
        }
    }

    #[test]
    fn infeasible() {
        let err = bilaterate(&[0., 0.], &[10., 0.], 1., 1., Branch::Left).unwrap_err();
        assert!(err.is_infeasible());
        let Error::GeometricallyInfeasible { discriminant } = err else {
            panic!("unexpected error: {err}");
        };
        assert!(discriminant < 0.);
        // One distance longer than the other two
        let err = bilaterate(&[0., 0.], &[1., 0.], 5., 1., Branch::Left).unwrap_err();
        assert!(err.is_infeasible());
    }

    #[test]
    fn short_base() {
        // |AB| is tiny against the other two sides
        for d in [1e-4, 1e-6] {
            let b = [1., -d];
            for branch in [Branch::Left, Branch::Right] {
                let c = bilaterate(&[1., 0.], &b, 8., 8., branch).unwrap();
                assert_abs_diff_eq!([1., 0.].dist(&c), 8., epsilon = 1e-12);
                assert_abs_diff_eq!(b.dist(&c), 8., epsilon = 1e-12);
            }
        }
        assert_relative_eq!(discriminant(1e-7, 8., 8.), 2.56e-12, max_relative = 1e-12);
    }

    #[test]
    fn coincident_references() {
        let err = bilaterate(&[1., 0.], &[1., 0.], 1., 1., Branch::Left).unwrap_err();
        assert_eq!(err, Error::Indeterminate);
        let err = bilaterate(&[1., 0.], &[1., 0.], 1., 2., Branch::Left).unwrap_err();
        assert!(err.is_infeasible());
    }

    #[test]
    fn non_finite_input() {
        let err = bilaterate(&[0., 0.], &[1., 0.], f64::NAN, 1., Branch::Left).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn branch_sign() {
        assert_eq!(Branch::default(), Branch::Left);
        assert_eq!(Branch::Left.sign(), 1.);
        assert_eq!(Branch::Left.inv().sign(), -1.);
        assert_eq!(Branch::Right.name(), "Right");
    }
}
