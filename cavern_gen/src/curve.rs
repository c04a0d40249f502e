// Bezier curves over an arbitrary number of control points.
//
// A `Curve` is an ordered, non-empty list of pivots. Evaluation uses the
// recursive de Casteljau definition: the curve over pivots `p0..pn` at time
// `t` is the lerp, by `t`, between the curve over `p0..p(n-1)` and the curve
// over `p1..pn`. A single pivot evaluates to itself. The naive recursion is
// exponential in the pivot count, which the generator keeps in single digits.
//
// See also: `bezier_map.rs` which builds the trunk/branch curves,
// `brush.rs` which samples them onto the tile grid.

use crate::error::{CaveError, Result};
use crate::types::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Inline capacity for pivots; generated curves rarely exceed this.
pub type Pivots = SmallVec<[Point; 8]>;

/// An immutable Bezier curve. Always holds at least one pivot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Curve {
    pivots: Pivots,
}

impl Curve {
    /// Build a curve from its control points. Fails on an empty list.
    pub fn new(pivots: impl IntoIterator<Item = Point>) -> Result<Self> {
        let pivots: Pivots = pivots.into_iter().collect();
        if pivots.is_empty() {
            return Err(CaveError::invalid("curve", "needs at least one pivot"));
        }
        Ok(Self { pivots })
    }

    pub fn pivots(&self) -> &[Point] {
        &self.pivots
    }

    pub fn start(&self) -> Point {
        self.pivots[0]
    }

    pub fn end(&self) -> Point {
        self.pivots[self.pivots.len() - 1]
    }

    /// Point on the curve at parametric time `t`. Meaningful for `t` in
    /// [0, 1]; other values extrapolate.
    pub fn evaluate(&self, t: f32) -> Point {
        de_casteljau(&self.pivots, t)
    }

    /// `steps + 1` evenly spaced evaluations from `t = 0` to `t = 1`.
    ///
    /// Each time is computed as `i / steps` rather than by accumulating an
    /// increment, so the last sample lands exactly on `end()`.
    pub fn sample(&self, steps: u32) -> impl Iterator<Item = Point> + '_ {
        (0..=steps).map(move |i| {
            let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
            self.evaluate(t)
        })
    }
}

fn de_casteljau(pivots: &[Point], t: f32) -> Point {
    match pivots {
        [] => Point::ZERO,
        [only] => *only,
        _ => {
            let head = de_casteljau(&pivots[..pivots.len() - 1], t);
            let tail = de_casteljau(&pivots[1..], t);
            head.lerp(tail, t)
        }
    }
}

impl TryFrom<Vec<Point>> for Curve {
    type Error = CaveError;

    fn try_from(pivots: Vec<Point>) -> Result<Self> {
        Curve::new(pivots)
    }
}

impl From<Curve> for Vec<Point> {
    fn from(curve: Curve) -> Self {
        curve.pivots.into_vec()
    }
}
