//! Axis-aligned bounding volumes.

mod traits;
pub use traits::*;

use nalgebra::Point3;

/// Axis-Aligned Bounding Box
///
/// Similar to [`parry3d::Aabb`](https://docs.rs/parry3d), except generic over the Real type.
///
/// An [empty](Aabb::empty) box has `mins` at `+∞` and `maxs` at `-∞`, so that extending it by
/// any point yields exactly that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb<Real: Float> {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl<Real: Float> Default for Aabb<Real> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<Real: Float> Aabb<Real> {
    #[inline]
    pub fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// A box containing nothing; the identity of [merge](Self::merge).
    #[inline]
    pub fn empty() -> Self {
        Self {
            mins: Point3::new(Real::INFINITY, Real::INFINITY, Real::INFINITY),
            maxs: Point3::new(Real::NEG_INFINITY, Real::NEG_INFINITY, Real::NEG_INFINITY),
        }
    }

    /// The smallest box containing every point of `points`.
    pub fn from_points<'p>(points: impl IntoIterator<Item = &'p Point3<Real>>) -> Self {
        points.into_iter().fold(Self::empty(), |mut acc, p| {
            acc.extend(p);
            acc
        })
    }

    /// True if `self` contains no point; i.e. `mins > maxs` on any axis.
    #[inline]
    pub fn is_empty(&self) -> bool {
        let Self { mins: i, maxs: a } = self;
        i.x > a.x || i.y > a.y || i.z > a.z
    }

    #[inline]
    pub fn contains(&self, p: &Point3<Real>) -> bool {
        let Self { mins: i, maxs: a } = self;
        (p.x >= i.x && p.y >= i.y && p.z >= i.z) && (p.x <= a.x && p.y <= a.y && p.z <= a.z)
    }

    /// Determine the center of `self`.
    #[inline]
    pub fn center(&self) -> Point3<Real> {
        let Self { mins: i, maxs: a } = self;
        nalgebra::point![
            (i.x + a.x) / Real::TWO,
            (i.y + a.y) / Real::TWO,
            (i.z + a.z) / Real::TWO
        ]
    }

    /// Grow `self` component-wise so that it contains `p`.
    #[inline]
    pub fn extend(&mut self, p: &Point3<Real>) {
        self.mins = self.mins.inf(p);
        self.maxs = self.maxs.sup(p);
    }

    /// Grow `self` component-wise so that it contains `other`.
    #[inline]
    pub fn merge(&mut self, other: &Self) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    #[inline]
    pub fn merged(mut self, other: &Self) -> Self {
        self.merge(other);
        self
    }

    /// `(mins, maxs)` as plain arrays.
    #[inline]
    pub fn to_arrays(&self) -> ([Real; 3], [Real; 3]) {
        (
            [self.mins.x, self.mins.y, self.mins.z],
            [self.maxs.x, self.maxs.y, self.maxs.z],
        )
    }
}
