//! Four-bar linkage positioned by the driver angle.
//!
//! Joints are numbered along the loop: `p1` is the driver pivot at the
//! origin, `p2` the driver tip, `p3` the follower tip and `p4` the follower
//! pivot on the X axis.
//!
//! ```
//! use four_bar::{FourBarLinkage, Point};
//!
//! let mut fb = FourBarLinkage::new(1., 1., 1., 1.).unwrap();
//! let [_, p2, p3, p4] = fb.set_position(std::f64::consts::FRAC_PI_4).unwrap();
//! assert!((p2.dist(&p3) - 1.).abs() < 1e-9);
//! assert!((p3.dist(&p4) - 1.).abs() < 1e-9);
//! ```
use crate::{bilaterate, AngleBound, Branch, Coord, Error, FourBarTy, Point, Result};
use std::f64::consts::{FRAC_PI_2, PI};

/// Dimensional configuration of a four-bar linkage.
///
/// + Driver link `d12`
/// + Coupler link `d23`
/// + Follower link `d34`
/// + Ground link `d14`
/// + Solution branch of the follower tip
/// + Initial driver angle
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct LinkageCfg {
    /// Length of the driver link
    pub d12: f64,
    /// Length of the coupler link
    pub d23: f64,
    /// Length of the follower link
    pub d34: f64,
    /// Length of the ground link
    pub d14: f64,
    /// Side of the follower tip relative to the line `p2 -> p4`
    pub branch: Branch,
    /// Initial driver angle
    pub angle: f64,
}

impl Default for LinkageCfg {
    fn default() -> Self {
        Self::new(1., 1., 1., 1.)
    }
}

impl LinkageCfg {
    /// Initial driver angle if not specified.
    pub const INIT_ANGLE: f64 = FRAC_PI_2;

    /// Create a configuration from the link lengths.
    pub const fn new(d12: f64, d23: f64, d34: f64, d14: f64) -> Self {
        Self { d12, d23, d34, d14, branch: Branch::Left, angle: Self::INIT_ANGLE }
    }

    /// Build with the solution branch.
    pub const fn with_branch(self, branch: Branch) -> Self {
        Self { branch, ..self }
    }

    /// Build with the initial driver angle.
    pub const fn with_angle(self, angle: f64) -> Self {
        Self { angle, ..self }
    }

    /// Planar loop `[ground, driver, coupler, follower]`.
    pub const fn planar_loop(&self) -> [f64; 4] {
        [self.d14, self.d12, self.d23, self.d34]
    }

    /// Check the dimensions.
    pub fn check(&self) -> Result<()> {
        let links = [("d12", self.d12), ("d23", self.d23), ("d34", self.d34), ("d14", self.d14)];
        for (name, d) in links {
            if !d.is_finite() || d <= 0. {
                return Err(Error::invalid_cfg(format!(
                    "{name} must be a positive length, got {d}"
                )));
            }
        }
        if !self.angle.is_finite() {
            return Err(Error::invalid_cfg(format!(
                "initial angle must be finite, got {}",
                self.angle
            )));
        }
        Ok(())
    }

    /// Create the linkage.
    pub fn build(&self) -> Result<FourBarLinkage> {
        FourBarLinkage::from_cfg(self)
    }
}

/// Planar four-bar linkage with its current joint positions.
///
/// The pivots `p1 = (0, 0)` and `p4 = (d14, 0)` never move. The tips `p2`
/// and `p3` are replaced together by [`FourBarLinkage::set_position`], an
/// infeasible angle leaves both untouched. A linkage whose initial angle does
/// not close has no joint positions until the first feasible angle.
#[derive(Clone, Debug, PartialEq)]
pub struct FourBarLinkage {
    d12: f64,
    d23: f64,
    d34: f64,
    d14: f64,
    branch: Branch,
    theta: f64,
    joints: Option<[Coord; 4]>,
}

impl FourBarLinkage {
    /// Create a linkage from the link lengths at the initial angle (π/2).
    pub fn new(d12: f64, d23: f64, d34: f64, d14: f64) -> Result<Self> {
        Self::from_cfg(&LinkageCfg::new(d12, d23, d34, d14))
    }

    /// Create a linkage from a configuration.
    ///
    /// Only invalid dimensions fail. If the loop does not close at the
    /// initial angle, [`FourBarLinkage::joints`] stays empty until a feasible
    /// [`FourBarLinkage::set_position`].
    pub fn from_cfg(cfg: &LinkageCfg) -> Result<Self> {
        cfg.check()?;
        let &LinkageCfg { d12, d23, d34, d14, branch, angle } = cfg;
        let mut fb = Self { d12, d23, d34, d14, branch, theta: angle, joints: None };
        if let Err(e) = fb.set_position(angle) {
            tracing::debug!(angle, %e, "initial angle does not close");
        }
        let closed = fb.joints.is_some();
        tracing::debug!(d12, d23, d34, d14, branch = branch.name(), closed, "linkage created");
        Ok(fb)
    }

    /// Joint positions at the driver angle, without changing this linkage.
    pub fn pos(&self, theta: f64) -> Result<[Coord; 4]> {
        let p1 = self.p1();
        let p4 = self.p4();
        let p2 = p1.pla(self.d12, theta);
        let p3 = match bilaterate(&p2, &p4, self.d23, self.d34, self.branch) {
            Ok(p3) => p3,
            // Driver tip on the follower pivot: the follower is parallel to
            // the driver on the left branch, anti-parallel on the right
            Err(Error::Indeterminate) => match self.branch {
                Branch::Left => p4.pla(self.d34, theta),
                Branch::Right => p4.pla(self.d34, theta + PI),
            },
            Err(e) => return Err(e),
        };
        Ok([p1, p2, p3, p4])
    }

    /// Move the driver link to angle `theta` (radians) and return the new
    /// joints.
    ///
    /// On error the joints stay at the last feasible position.
    pub fn set_position(&mut self, theta: f64) -> Result<[Coord; 4]> {
        let joints = self.pos(theta)?;
        self.joints = Some(joints);
        self.theta = theta;
        Ok(joints)
    }

    /// Sweep the driver angle over `[start, end)` by `step`.
    ///
    /// Each pulled item moves this linkage. Infeasible angles are reported
    /// per item and do not stop the sweep.
    ///
    /// ```
    /// use four_bar::FourBarLinkage;
    ///
    /// let mut fb = FourBarLinkage::new(1., 1., 1., 1.).unwrap();
    /// let sweep = fb.trajectory(0., 1., 0.25).unwrap();
    /// assert_eq!(sweep.len(), 4);
    /// assert!(sweep.map(|(_, js)| js).all(|js| js.is_ok()));
    /// ```
    ///
    /// Fails with [`Error::InvalidSweep`] on non-finite bounds, a
    /// non-positive step, or more than [`Trajectory::MAX_LEN`] angles.
    pub fn trajectory(&mut self, start: f64, end: f64, step: f64) -> Result<Trajectory<'_>> {
        if !(start.is_finite() && end.is_finite() && step.is_finite()) || step <= 0. {
            return Err(Error::InvalidSweep { start, end, step });
        }
        let len = if end > start {
            let len = ((end - start) / step - Trajectory::SLACK).ceil();
            if len > Trajectory::MAX_LEN as f64 {
                return Err(Error::InvalidSweep { start, end, step });
            }
            len as usize
        } else {
            0
        };
        Ok(Trajectory { fb: self, start, step, i: 0, len })
    }

    /// Current joint positions `[p1, p2, p3, p4]`.
    ///
    /// Returns `None` if no angle has closed the loop yet.
    pub const fn joints(&self) -> Option<[Coord; 4]> {
        self.joints
    }

    /// Driver pivot.
    pub const fn p1(&self) -> Coord {
        [0., 0.]
    }

    /// Driver tip.
    pub fn p2(&self) -> Option<Coord> {
        self.joints.map(|[_, p2, ..]| p2)
    }

    /// Follower tip.
    pub fn p3(&self) -> Option<Coord> {
        self.joints.map(|[.., p3, _]| p3)
    }

    /// Follower pivot.
    pub const fn p4(&self) -> Coord {
        [self.d14, 0.]
    }

    /// Driver angle of the current position, or the initial angle if the
    /// loop has not closed yet.
    pub const fn theta(&self) -> f64 {
        self.theta
    }

    /// Solution branch of the follower tip.
    pub const fn branch(&self) -> Branch {
        self.branch
    }

    /// Length of the driver link.
    pub const fn d12(&self) -> f64 {
        self.d12
    }

    /// Length of the coupler link.
    pub const fn d23(&self) -> f64 {
        self.d23
    }

    /// Length of the follower link.
    pub const fn d34(&self) -> f64 {
        self.d34
    }

    /// Length of the ground link.
    pub const fn d14(&self) -> f64 {
        self.d14
    }

    /// Configuration of this linkage at its current angle.
    pub const fn cfg(&self) -> LinkageCfg {
        LinkageCfg {
            d12: self.d12,
            d23: self.d23,
            d34: self.d34,
            d14: self.d14,
            branch: self.branch,
            angle: self.theta,
        }
    }

    /// Planar loop `[ground, driver, coupler, follower]`.
    pub const fn planar_loop(&self) -> [f64; 4] {
        [self.d14, self.d12, self.d23, self.d34]
    }

    /// Return the type of this linkage.
    pub fn ty(&self) -> FourBarTy {
        FourBarTy::from_loop(self.planar_loop())
    }

    /// Return true if the linkage satisfies the Grashof condition.
    pub fn is_grashof(&self) -> bool {
        self.ty().is_grashof()
    }

    /// Driver angles where the loop closes.
    pub fn angle_bound(&self) -> AngleBound {
        AngleBound::from_planar_loop(self.planar_loop())
    }
}

/// Lazy sweep of the driver angle, see [`FourBarLinkage::trajectory`].
///
/// Yields `(theta, joints)` pairs.
pub struct Trajectory<'a> {
    fb: &'a mut FourBarLinkage,
    start: f64,
    step: f64,
    i: usize,
    len: usize,
}

impl Trajectory<'_> {
    /// Steps closer than this fraction to the end angle are excluded.
    pub const SLACK: f64 = 1e-9;
    /// Maximum number of angles of one sweep.
    pub const MAX_LEN: usize = 1 << 24;
}

impl Iterator for Trajectory<'_> {
    type Item = (f64, Result<[Coord; 4]>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.len {
            return None;
        }
        let theta = self.start + self.i as f64 * self.step;
        self.i += 1;
        let joints = self.fb.set_position(theta);
        if let Err(e) = &joints {
            tracing::trace!(theta, %e, "position skipped");
        }
        Some((theta, joints))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.i;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Trajectory<'_> {}
