/// Coordinate type of a joint, `[x, y]`.
pub type Coord = [f64; 2];

/// A point-like memory layout to achieve zero copy.
pub trait Point: Sized + Copy {
    /// Create a point.
    fn point(x: f64, y: f64) -> Self;
    /// X component.
    fn x(&self) -> f64;
    /// Y component.
    fn y(&self) -> f64;

    /// Origin point `(0, 0)`.
    fn origin() -> Self {
        Self::point(0., 0.)
    }

    /// Place a point at distance `d0` and angle `a0` from this point.
    fn pla(&self, d0: f64, a0: f64) -> Self {
        Self::point(self.x() + d0 * a0.cos(), self.y() + d0 * a0.sin())
    }

    /// Vector addition.
    fn add(&self, rhs: &Self) -> Self {
        Self::point(self.x() + rhs.x(), self.y() + rhs.y())
    }

    /// Vector subtraction, `self - rhs`.
    fn sub(&self, rhs: &Self) -> Self {
        Self::point(self.x() - rhs.x(), self.y() - rhs.y())
    }

    /// Squared distance between two points.
    fn dist2(&self, rhs: &Self) -> f64 {
        let dx = rhs.x() - self.x();
        let dy = rhs.y() - self.y();
        dx * dx + dy * dy
    }

    /// Distance between two points.
    fn dist(&self, rhs: &Self) -> f64 {
        (rhs.x() - self.x()).hypot(rhs.y() - self.y())
    }

    /// Return true if both components are finite.
    fn is_finite(&self) -> bool {
        self.x().is_finite() && self.y().is_finite()
    }

    /// Convert to a plain coordinate.
    fn to_coord(&self) -> Coord {
        [self.x(), self.y()]
    }
}

impl Point for [f64; 2] {
    #[inline(always)]
    fn point(x: f64, y: f64) -> Self {
        [x, y]
    }
    #[inline(always)]
    fn x(&self) -> f64 {
        self[0]
    }
    #[inline(always)]
    fn y(&self) -> f64 {
        self[1]
    }
}

impl Point for (f64, f64) {
    #[inline(always)]
    fn point(x: f64, y: f64) -> Self {
        (x, y)
    }
    #[inline(always)]
    fn x(&self) -> f64 {
        self.0
    }
    #[inline(always)]
    fn y(&self) -> f64 {
        self.1
    }
}
