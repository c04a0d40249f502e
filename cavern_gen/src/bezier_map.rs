// Curve tree generation: one trunk, several branches grafted onto it.
//
// The trunk starts at the origin and runs `trunk_length` in a random
// direction. Each branch claims a distinct interior trunk pivot (the graft
// index), starts on the trunk curve near that pivot, and heads toward the
// pivot itself for `branch_length`. Because trunk pivots are scattered away
// from the chord, the branches splay off to alternating sides.
//
// Paths between two endpoints (`create_path`) keep the endpoints fixed and
// scatter interior pivots uniformly in a disk around the chord's midpoint,
// with radius half the chord length. That scatter is then spun about the
// origin by the chord's normal angle and spun back by the chord angle, which
// is a net rotation of zero (mod 360°). Interior pivots keep insertion order;
// no reordering is applied between the two rotations.
//
// Self-intersection between trunk and branches is possible and accepted.
//
// See also: `curve.rs` for evaluation, `config.rs` for the counts and
// lengths, `cave.rs` which rasterizes the resulting tree.
//
// **Critical constraint: determinism.** All randomness comes from the
// `CaveRng` passed by the caller, consumed in a fixed order: trunk heading,
// trunk interior pivots, then per branch its graft pick and its pivots.

use crate::config::CaveConfig;
use crate::curve::Curve;
use crate::error::{CaveError, Result};
use crate::prng::CaveRng;
use crate::types::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A branch curve and the trunk pivot it was grafted from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub graft_index: usize,
    pub curve: Curve,
}

/// The complete curve layout of one cave. Read-only once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveTree {
    pub trunk: Curve,
    pub branches: Vec<Branch>,
}

impl CurveTree {
    /// Grow a tree whose trunk heads in a uniformly random direction.
    pub fn grow(config: &CaveConfig, rng: &mut CaveRng) -> Result<Self> {
        config.validate_growth()?;
        Self::grow_prevalidated(config, rng)
    }

    /// Grow a tree whose trunk ends at `direction.normalized() * trunk_length`.
    pub fn grow_toward(config: &CaveConfig, direction: Point, rng: &mut CaveRng) -> Result<Self> {
        config.validate_growth()?;
        Self::grow_from(config, direction, rng)
    }

    /// `grow` for a config that already passed `validate_growth()`.
    pub(crate) fn grow_prevalidated(config: &CaveConfig, rng: &mut CaveRng) -> Result<Self> {
        let direction = Point::from(rng.unit_direction());
        Self::grow_from(config, direction, rng)
    }

    fn grow_from(config: &CaveConfig, direction: Point, rng: &mut CaveRng) -> Result<Self> {
        let trunk_end = direction.normalized() * config.trunk_length;
        let trunk = create_path(Point::ZERO, trunk_end, config.trunk_pivot_count, rng)?;

        let mut grafts: Vec<usize> = (1..config.trunk_pivot_count - 1).collect();
        let mut branches = Vec::with_capacity(config.branch_count);
        for _ in 0..config.branch_count {
            let graft_index = grafts.remove(rng.range_usize(0, grafts.len()));

            // Evaluated at the pivot's share of the pivot count, not exactly
            // at the pivot's parameter; the start lands near, not on, the
            // curve point closest to the pivot.
            let start = trunk.evaluate(graft_index as f32 / config.trunk_pivot_count as f32);
            let heading = (trunk.pivots()[graft_index] - start).normalized();
            let end = start + heading * config.branch_length;

            let curve = create_path(start, end, config.branch_pivot_count, rng)?;
            branches.push(Branch { graft_index, curve });
        }

        debug!(
            trunk_pivots = trunk.pivots().len(),
            branches = branches.len(),
            trunk_end = %trunk.end(),
            "curve tree grown"
        );
        Ok(Self { trunk, branches })
    }

    /// Trunk first, then branches in graft order.
    pub fn curves(&self) -> impl Iterator<Item = &Curve> {
        std::iter::once(&self.trunk).chain(self.branches.iter().map(|b| &b.curve))
    }
}

/// A curve from `start` to `end` with `pivot_count - 2` randomized interior
/// pivots. A `pivot_count` below 2 is rejected before any randomness is
/// drawn.
pub fn create_path(start: Point, end: Point, pivot_count: usize, rng: &mut CaveRng) -> Result<Curve> {
    if pivot_count < 2 {
        return Err(CaveError::invalid(
            "pivot_count",
            format!("a path needs both endpoints, got {pivot_count} pivots"),
        ));
    }

    let center = (start + end) / 2.0;
    let chord = end - start;
    let radius = chord.length() / 2.0;

    let normal_angle = chord.y.atan2(-chord.x).to_degrees() - 90.0;
    let chord_angle = chord.y.atan2(chord.x).to_degrees() - 90.0;

    let mut pivots = Vec::with_capacity(pivot_count);
    pivots.push(start);
    for _ in 1..pivot_count - 1 {
        let scatter = Point::from(rng.inside_unit_circle()) * radius;
        let pivot = (center + scatter)
            .rotated_degrees(normal_angle)
            .rotated_degrees(chord_angle);
        pivots.push(pivot);
    }
    pivots.push(end);
    Curve::new(pivots)
}
