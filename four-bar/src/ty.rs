//! Classification and input range of a planar four-bar loop.
//!
//! A planar loop is written as `[l1, l2, l3, l4]`:
//! ground link, driver link, coupler link and follower link.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Link of a planar loop, in the order `[ground, driver, coupler, follower]`.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Link {
    /// Fixed link `p1-p4`
    Ground,
    /// Input link `p1-p2`
    Driver,
    /// Floating link `p2-p3`
    Coupler,
    /// Output link `p3-p4`
    Follower,
}

impl Link {
    const LOOP: [Self; 4] = [Self::Ground, Self::Driver, Self::Coupler, Self::Follower];

    /// Name of the link.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ground => "ground",
            Self::Driver => "driver",
            Self::Coupler => "coupler",
            Self::Follower => "follower",
        }
    }
}

/// Type of the four-bar linkage, by the Grashof condition and the shortest
/// (Grashof) or longest (non-Grashof) link.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum FourBarTy {
    /// Grashof, shortest ground: driver and follower both turn fully
    DoubleCrank,
    /// Grashof, shortest driver: the driver turns fully, the follower rocks
    CrankRocker,
    /// Grashof, shortest coupler: driver and follower both rock
    DoubleRocker,
    /// Grashof, shortest follower: the driver rocks, the follower turns
    RockerCrank,
    /// Non-Grashof, every moving link rocks; holds the longest link
    TripleRocker(Link),
    /// The longest link exceeds the sum of the others
    Invalid,
}

impl FourBarTy {
    /// Classify a planar loop `[ground, driver, coupler, follower]`.
    ///
    /// Change-point linkages (`s + l == p + q`) are Grashof. Ties of the
    /// shortest link go to the first one in loop order.
    pub fn from_loop(planar_loop: [f64; 4]) -> Self {
        let mut sorted = planar_loop;
        sorted.sort_unstable_by(f64::total_cmp);
        let [s, p, q, l] = sorted;
        if l > s + p + q {
            return Self::Invalid;
        }
        let link = |d: f64| {
            let i = planar_loop.iter().position(|&x| x == d).unwrap_or_default();
            Link::LOOP[i]
        };
        if s + l > p + q {
            return Self::TripleRocker(link(l));
        }
        match link(s) {
            Link::Ground => Self::DoubleCrank,
            Link::Driver => Self::CrankRocker,
            Link::Coupler => Self::DoubleRocker,
            Link::Follower => Self::RockerCrank,
        }
    }

    /// Name of the type.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DoubleCrank => "Grashof double crank",
            Self::CrankRocker => "Grashof crank rocker",
            Self::DoubleRocker => "Grashof double rocker",
            Self::RockerCrank => "Grashof rocker crank",
            Self::TripleRocker(_) => "Non-Grashof triple rocker",
            Self::Invalid => "Invalid",
        }
    }

    /// Check if the type is valid.
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Return true if the type is Grashof linkage.
    pub const fn is_grashof(&self) -> bool {
        matches!(
            self,
            Self::DoubleCrank | Self::CrankRocker | Self::DoubleRocker | Self::RockerCrank
        )
    }

    /// Return true if the driver link can rotate fully, the same as a
    /// [`AngleBound::Closed`] input range.
    pub const fn is_crank(&self) -> bool {
        matches!(self, Self::DoubleCrank | Self::CrankRocker)
    }
}

impl std::fmt::Display for FourBarTy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TripleRocker(link) => write!(f, "{} (longest {})", self.name(), link.name()),
            _ => f.write_str(self.name()),
        }
    }
}

/// Input angle bounds of the driver link.
///
/// Feasibility only depends on the distance between the driver tip and the
/// follower pivot, so the bounds hold for both [`Branch`](crate::Branch)es.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub enum AngleBound {
    /// Full rotation
    Closed,
    /// One range `[start, end]`, the start may be negative
    Open([f64; 2]),
    /// Two ranges mirrored about the ground link
    OpenBranch([[f64; 2]; 2]),
    /// The loop never closes
    #[default]
    Invalid,
}

impl AngleBound {
    /// Check angle bound from a planar loop.
    pub fn from_planar_loop(mut planar_loop: [f64; 4]) -> Self {
        let [l1, l2, l3, l4] = planar_loop;
        planar_loop.sort_unstable_by(f64::total_cmp);
        if planar_loop[3] > planar_loop[..3].iter().sum() {
            return Self::Invalid;
        }
        // Law of cosines on the driver tip to follower pivot distance
        let acos = |l33: f64| {
            let d = (l1 * l1 + l2 * l2 - l33 * l33) / (2. * l1 * l2);
            d.clamp(-1., 1.).acos()
        };
        match (l1 + l2 <= l3 + l4, (l1 - l2).abs() >= (l3 - l4).abs()) {
            (true, true) => Self::Closed,
            (true, false) => {
                let a = acos(l3 - l4);
                Self::Open([a, TAU - a])
            }
            (false, true) => {
                let a = acos(l3 + l4);
                Self::Open([-a, a])
            }
            (false, false) => {
                let a1 = acos(l3 - l4);
                let a2 = acos(l3 + l4);
                Self::OpenBranch([[a1, a2], [TAU - a2, TAU - a1]])
            }
        }
    }

    /// Check there has two branches.
    pub fn has_branch(&self) -> bool {
        matches!(self, Self::OpenBranch(_))
    }

    /// Check if the data is valid.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Return true if the angle is inside the bounds, modulo a full turn.
    pub fn contains(&self, angle: f64) -> bool {
        let inside = |[start, end]: [f64; 2]| (angle - start).rem_euclid(TAU) <= end - start;
        match *self {
            Self::Closed => true,
            Self::Open(range) => inside(range),
            Self::OpenBranch([r1, r2]) => inside(r1) || inside(r2),
            Self::Invalid => false,
        }
    }

    /// Turn into boundary ranges.
    pub fn to_ranges(self) -> Vec<[f64; 2]> {
        match self {
            Self::Closed => vec![[0., TAU]],
            Self::Open(range) => vec![range],
            Self::OpenBranch(ranges) => ranges.to_vec(),
            Self::Invalid => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

    #[test]
    fn classify() {
        use FourBarTy::*;
        assert_eq!(FourBarTy::from_loop([1.; 4]), DoubleCrank);
        assert_eq!(FourBarTy::from_loop([90., 35., 70., 70.]), CrankRocker);
        assert_eq!(FourBarTy::from_loop([1., 3., 3., 3.5]), DoubleCrank);
        assert_eq!(FourBarTy::from_loop([3., 1., 3., 3.5]), CrankRocker);
        assert_eq!(FourBarTy::from_loop([3., 3.5, 1., 3.]), DoubleRocker);
        assert_eq!(FourBarTy::from_loop([3., 3., 3.5, 1.]), RockerCrank);
        assert_eq!(FourBarTy::from_loop([4., 2., 2., 1.]), TripleRocker(Link::Ground));
        assert_eq!(FourBarTy::from_loop([1., 1., 2.5, 1.]), TripleRocker(Link::Coupler));
        assert_eq!(FourBarTy::from_loop([10., 1., 1., 1.]), Invalid);
        // Change point
        assert_eq!(FourBarTy::from_loop([2., 1., 2., 1.]), CrankRocker);
        assert!(DoubleRocker.is_grashof());
        assert!(!DoubleRocker.is_crank());
        assert!(!TripleRocker(Link::Coupler).is_grashof());
        assert!(!Invalid.is_valid());
        let ty = TripleRocker(Link::Driver);
        assert_eq!(ty.to_string(), "Non-Grashof triple rocker (longest driver)");
    }

    #[test]
    fn crank_has_closed_bound() {
        let loops = [
            [1., 3., 3., 3.5],
            [3., 1., 3., 3.5],
            [3., 3.5, 1., 3.],
            [3., 3., 3.5, 1.],
            [4., 2., 2., 1.],
            [1., 1., 2.5, 1.],
            [2.5, 1., 1., 1.],
        ];
        for planar_loop in loops {
            let ty = FourBarTy::from_loop(planar_loop);
            let bound = AngleBound::from_planar_loop(planar_loop);
            assert_eq!(ty.is_crank(), bound == AngleBound::Closed, "{planar_loop:?}");
        }
    }

    #[test]
    fn bounds() {
        assert_eq!(AngleBound::from_planar_loop([1.; 4]), AngleBound::Closed);
        assert_eq!(
            AngleBound::from_planar_loop([10., 1., 1., 1.]),
            AngleBound::Invalid
        );
        // Driver tip too close to the follower pivot near zero
        let AngleBound::Open([a, b]) = AngleBound::from_planar_loop([1., 1., 2., 0.5]) else {
            panic!("expect an open bound");
        };
        assert_abs_diff_eq!(a + b, 2. * PI, epsilon = 1e-12);
        assert!(a > 0. && a < PI);
        // Driver tip too far from the follower pivot near π
        let bound = AngleBound::from_planar_loop([1., 1., FRAC_1_SQRT_2, FRAC_1_SQRT_2]);
        let AngleBound::Open([a, b]) = bound else {
            panic!("expect an open bound");
        };
        assert_abs_diff_eq!(a, -FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(b, FRAC_PI_2, epsilon = 1e-12);
        assert!(bound.contains(0.));
        assert!(bound.contains(TAU - 0.1));
        assert!(!bound.contains(PI));
    }

    #[test]
    fn branch_bounds() {
        let bound = AngleBound::from_planar_loop([3., 2., 2., 0.5]);
        assert!(bound.has_branch());
        assert!(!bound.contains(0.));
        assert!(!bound.contains(PI));
        let ranges = bound.to_ranges();
        assert_eq!(ranges.len(), 2);
        for [a, b] in ranges {
            assert!(bound.contains((a + b) * 0.5));
        }
    }
}
