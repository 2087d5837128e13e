use crate::math::{Point, Real, Vector};
use ordered_float::OrderedFloat;

#[derive(Debug, Clone)]
pub struct HullFace {
    pub pts: [usize; 3],
    pub normal: Vector<Real>,
    pub offset: Real,
    // Points strictly in front of this face, not yet part of the hull.
    pub outside: Vec<usize>,
    pub valid: bool,
}

impl HullFace {
    pub fn new(pts: [usize; 3], points: &[Point<Real>]) -> Self {
        let [a, b, c] = pts.map(|i| points[i]);
        let normal = (b - a)
            .cross(&(c - a))
            .try_normalize(0.0)
            .unwrap_or_else(Vector::zeros);

        Self {
            pts,
            normal,
            offset: normal.dot(&a.coords),
            outside: Vec::new(),
            valid: true,
        }
    }

    pub fn flip(&mut self) {
        self.pts.swap(1, 2);
        self.normal = -self.normal;
        self.offset = -self.offset;
    }

    #[inline]
    pub fn distance_to(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&pt.coords) - self.offset
    }

    #[inline]
    pub fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.pts;
        [(a, b), (b, c), (c, a)]
    }

    /// The outside point furthest from this face.
    pub fn furthest_outside_point(&self, points: &[Point<Real>]) -> Option<usize> {
        self.outside
            .iter()
            .copied()
            .max_by_key(|i| OrderedFloat(self.distance_to(&points[*i])))
    }
}
