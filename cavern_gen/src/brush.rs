// Disk brushes over tile sets.
//
// A brush stamps (or erases) every tile within a filled disk around a
// continuous-plane center. The disk is enumerated one quadrant at a time:
// for each integer column `x` with `x < radius`, every integer row `y` with
// `y < sqrt(radius² − x²)`, mirrored into all four quadrants as (±x, ±y).
// Each offset lands on `center + offset` rounded to the nearest tile. With
// ties rounding up that is the same as rounding the center once and adding
// the integer offset, which is how it is computed.
//
// A non-positive radius enumerates no columns and is therefore a no-op.
// Stamping an already-present tile or erasing an absent one is a no-op by
// set semantics.
//
// See also: `cave.rs` for the shape/pave sequence built from these brushes.

use crate::curve::Curve;
use crate::types::{Point, TileCoord};
use rustc_hash::FxHashSet;

/// A set of occupied grid tiles.
pub type TileSet = FxHashSet<TileCoord>;

/// Radius padding added to curve strokes so consecutive stamps overlap.
pub const STROKE_PADDING: f32 = 0.5;

/// Whether a brush adds tiles to a set or removes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrushMode {
    Stamp,
    Erase,
}

/// Quadrant-mirrored `(dx, dy)` offsets covered by a disk of `radius`. May
/// contain duplicates along the axes (where `dx` or `dy` is zero).
pub fn disk_offsets(radius: f32) -> impl Iterator<Item = (i32, i32)> {
    let r_sq = radius * radius;
    (0..)
        .take_while(move |&x: &i32| (x as f32) < radius)
        .flat_map(move |x| {
            let y_cap = (r_sq - (x * x) as f32).sqrt();
            (0..)
                .take_while(move |&y: &i32| (y as f32) < y_cap)
                .flat_map(move |y| [(x, y), (-x, y), (x, -y), (-x, -y)])
        })
}

/// Stamp or erase a filled disk of `radius` tiles around `center`.
pub fn brush(tiles: &mut TileSet, center: Point, radius: f32, mode: BrushMode) {
    let origin = center.to_tile();
    for (dx, dy) in disk_offsets(radius) {
        let tile = origin.offset(dx, dy);
        match mode {
            BrushMode::Stamp => {
                tiles.insert(tile);
            }
            BrushMode::Erase => {
                tiles.remove(&tile);
            }
        }
    }
}

/// Stamp or erase a stroke along `curve`: a disk of radius
/// `width + STROKE_PADDING` at each of the `precision + 1` samples.
pub fn brush_curve(tiles: &mut TileSet, curve: &Curve, width: f32, precision: u32, mode: BrushMode) {
    let radius = width + STROKE_PADDING;
    for point in curve.sample(precision) {
        brush(tiles, point, radius, mode);
    }
}
