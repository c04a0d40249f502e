// The map generation pipeline: curve tree → wall/floor tiles → contours.
//
// Every curve is rasterized in two phases:
//
// 1. Shape: stamp the curve body and its two anchor chambers into `walls`
//    at `size + wall_width`, and into `floors` at `size + wall_width / 2`
//    (integer halving).
// 2. Pave: erase the same body and anchors from `walls` at the bare `size`,
//    hollowing out the walkable interior and leaving a `wall_width`-thick
//    shell.
//
// All curves are shaped before any is paved, trunk first, then branches
// in graft order, so a passage carved later can cut through a wall shell
// stamped by an earlier curve. Anchors: the trunk's start is the root and
// its end the crown; each branch's start is a graft and its end a leaf.
//
// Floors are stamped only in the shape phase. Once paving is done, any
// floor tile still under a wall is dropped, so the final sets are disjoint.
// Contours and shadows are then derived from the final wall set.
//
// A `CaveMap` is a fresh value per call; nothing is reused between
// generations.
//
// See also: `bezier_map.rs` (tree), `brush.rs` (stamping), `contour.rs`
// (classification), `tilemap.rs` which paints a `CaveMap` onto a surface.

use crate::bezier_map::CurveTree;
use crate::brush::{BrushMode, TileSet, brush, brush_curve};
use crate::config::CaveConfig;
use crate::contour::{ContourMap, ShadowPlacement, classify_contours, derive_shadows};
use crate::curve::Curve;
use crate::error::Result;
use crate::prng::CaveRng;
use crate::types::{Point, TileCoord};
use tracing::{debug, info};

/// One generated cave: the curve layout plus everything rasterized from it.
#[derive(Clone, Debug)]
pub struct CaveMap {
    pub tree: CurveTree,
    pub walls: TileSet,
    pub floors: TileSet,
    pub contours: ContourMap,
    pub shadows: Vec<ShadowPlacement>,
}

/// Stroke width and anchor radii for one curve.
struct Stroke<'a> {
    curve: &'a Curve,
    width: i32,
    start_size: i32,
    end_size: i32,
}

impl CaveMap {
    /// Validate `config`, grow a curve tree, and rasterize it.
    ///
    /// An invalid config is rejected before any randomness is consumed.
    pub fn generate(config: &CaveConfig, rng: &mut CaveRng) -> Result<Self> {
        config.validate()?;
        let tree = CurveTree::grow_prevalidated(config, rng)?;
        Ok(Self::rasterize(tree, config))
    }

    /// Rasterize an existing tree with the widths and sizes in `config`.
    ///
    /// Only the rasterization fields of `config` are checked; its pivot and
    /// branch counts describe how trees are grown and do not constrain
    /// `tree`.
    pub fn from_tree(tree: CurveTree, config: &CaveConfig) -> Result<Self> {
        config.validate_raster()?;
        Ok(Self::rasterize(tree, config))
    }

    fn rasterize(tree: CurveTree, config: &CaveConfig) -> Self {
        let strokes = strokes(&tree, config);
        let precision = config.precision;
        let wall_width = config.wall_width;

        let mut walls = TileSet::default();
        let mut floors = TileSet::default();

        for stroke in &strokes {
            let wall_pad = stroke.width + wall_width;
            let floor_pad = stroke.width + wall_width / 2;
            brush_curve(&mut walls, stroke.curve, wall_pad as f32, precision, BrushMode::Stamp);
            brush_curve(&mut floors, stroke.curve, floor_pad as f32, precision, BrushMode::Stamp);
            for (center, size) in stroke.anchors() {
                let wall_radius = (size + wall_width) as f32;
                let floor_radius = (size + wall_width / 2) as f32;
                brush(&mut walls, center, wall_radius, BrushMode::Stamp);
                brush(&mut floors, center, floor_radius, BrushMode::Stamp);
            }
        }
        debug!(walls = walls.len(), floors = floors.len(), "shape phase done");

        for stroke in &strokes {
            brush_curve(&mut walls, stroke.curve, stroke.width as f32, precision, BrushMode::Erase);
            for (center, size) in stroke.anchors() {
                brush(&mut walls, center, size as f32, BrushMode::Erase);
            }
        }
        floors.retain(|tile| !walls.contains(tile));
        debug!(walls = walls.len(), floors = floors.len(), "pave phase done");

        let contours = classify_contours(&walls);
        let shadows = derive_shadows(&contours);

        info!(
            branches = tree.branches.len(),
            walls = walls.len(),
            floors = floors.len(),
            contours = contours.len(),
            shadows = shadows.len(),
            "cave generated"
        );

        Self {
            tree,
            walls,
            floors,
            contours,
            shadows,
        }
    }

    /// Inclusive bounding box over walls and floors, or `None` if empty.
    pub fn bounds(&self) -> Option<(TileCoord, TileCoord)> {
        self.walls.iter().chain(&self.floors).fold(None, |acc, &t| {
            Some(match acc {
                None => (t, t),
                Some((lo, hi)) => (
                    TileCoord::new(lo.x.min(t.x), lo.y.min(t.y)),
                    TileCoord::new(hi.x.max(t.x), hi.y.max(t.y)),
                ),
            })
        })
    }

    /// Wall tiles that received no contour tag (thin or isolated geometry).
    pub fn untagged_walls(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.walls
            .iter()
            .copied()
            .filter(|t| !self.contours.contains_key(t))
    }
}

impl Stroke<'_> {
    fn anchors(&self) -> [(Point, i32); 2] {
        [
            (self.curve.start(), self.start_size),
            (self.curve.end(), self.end_size),
        ]
    }
}

fn strokes<'a>(tree: &'a CurveTree, config: &CaveConfig) -> Vec<Stroke<'a>> {
    let trunk = Stroke {
        curve: &tree.trunk,
        width: config.trunk_width,
        start_size: config.root_size,
        end_size: config.crown_size,
    };
    std::iter::once(trunk)
        .chain(tree.branches.iter().map(|branch| Stroke {
            curve: &branch.curve,
            width: config.branch_width,
            start_size: config.graft_size,
            end_size: config.leaf_size,
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::Contour;

    fn straight_tree(length: f32) -> CurveTree {
        CurveTree {
            trunk: Curve::new([Point::ZERO, Point::new(length, 0.0)]).unwrap(),
            branches: Vec::new(),
        }
    }

    fn corridor_config() -> CaveConfig {
        CaveConfig {
            trunk_length: 20.0,
            trunk_pivot_count: 2,
            branch_count: 0,
            trunk_width: 1,
            wall_width: 2,
            precision: 40,
            root_size: 0,
            crown_size: 0,
            ..CaveConfig::default()
        }
    }

    #[test]
    fn straight_corridor_has_wall_shell() {
        let config = corridor_config();
        let map = CaveMap::from_tree(straight_tree(20.0), &config).unwrap();

        // Mid-corridor cross-section: stroke radius 1.5 carves |y| ≤ 1, the
        // wall stamp (radius 3.5) reaches |y| ≤ 3.
        for y in -1..=1 {
            assert!(!map.walls.contains(&TileCoord::new(10, y)), "wall in passage at y = {y}");
            assert!(map.floors.contains(&TileCoord::new(10, y)), "no floor at y = {y}");
        }
        for y in [2, 3, -2, -3] {
            assert!(map.walls.contains(&TileCoord::new(10, y)), "missing wall at y = {y}");
        }
        assert!(!map.walls.contains(&TileCoord::new(10, 4)));
        assert!(!map.walls.contains(&TileCoord::new(10, -4)));
    }

    #[test]
    fn floors_and_walls_are_disjoint() {
        let config = CaveConfig::default();
        let map = CaveMap::generate(&config, &mut CaveRng::new(8)).unwrap();
        assert!(map.floors.iter().all(|t| !map.walls.contains(t)));
        assert!(!map.walls.is_empty());
        assert!(!map.floors.is_empty());
    }

    #[test]
    fn contours_are_subset_of_walls() {
        let map = CaveMap::generate(&CaveConfig::warren(), &mut CaveRng::new(3)).unwrap();
        assert!(map.contours.keys().all(|k| map.walls.contains(k)));
        assert!(map.contours.values().any(|&c| c == Contour::Full));
        for tile in map.untagged_walls() {
            assert!(map.walls.contains(&tile));
            assert!(!map.contours.contains_key(&tile));
        }
    }

    #[test]
    fn anchors_carve_chambers() {
        let config = CaveConfig {
            root_size: 5,
            crown_size: 3,
            ..corridor_config()
        };
        let map = CaveMap::from_tree(straight_tree(20.0), &config).unwrap();
        // Root chamber: radius 5 around the origin is open floor.
        assert!(map.floors.contains(&TileCoord::new(0, 4)));
        assert!(!map.walls.contains(&TileCoord::new(0, 4)));
        // Just past the root chamber's radius lies its wall shell.
        assert!(map.walls.contains(&TileCoord::new(0, 5)));
        // Crown chamber.
        assert!(map.floors.contains(&TileCoord::new(20, 2)));
        assert!(map.walls.contains(&TileCoord::new(20, 4)));
    }

    #[test]
    fn later_passages_cut_earlier_shells() {
        // A branch crossing straight through the trunk's wall shell.
        let mut tree = straight_tree(20.0);
        tree.branches.push(crate::bezier_map::Branch {
            graft_index: 1,
            curve: Curve::new([Point::new(10.0, 0.0), Point::new(10.0, 12.0)]).unwrap(),
        });
        let config = CaveConfig {
            branch_width: 1,
            graft_size: 0,
            leaf_size: 0,
            ..corridor_config()
        };
        let map = CaveMap::from_tree(tree, &config).unwrap();
        // The trunk's northern shell at x = 10 is opened by the branch.
        assert!(!map.walls.contains(&TileCoord::new(10, 2)));
        assert!(!map.walls.contains(&TileCoord::new(10, 3)));
        assert!(map.floors.contains(&TileCoord::new(10, 6)));
        // The branch keeps its own shell on both sides.
        assert!(map.walls.contains(&TileCoord::new(7, 8)));
        assert!(map.walls.contains(&TileCoord::new(13, 8)));
    }

    #[test]
    fn zero_wall_width_leaves_no_walls() {
        let config = CaveConfig {
            wall_width: 0,
            ..corridor_config()
        };
        let map = CaveMap::from_tree(straight_tree(20.0), &config).unwrap();
        assert!(map.walls.is_empty());
        assert!(map.contours.is_empty());
        assert!(map.shadows.is_empty());
        assert!(!map.floors.is_empty());
    }

    #[test]
    fn invalid_config_rejected() {
        let config = CaveConfig {
            precision: 0,
            ..corridor_config()
        };
        assert!(CaveMap::from_tree(straight_tree(10.0), &config).is_err());
    }

    #[test]
    fn hand_built_tree_ignores_growth_counts() {
        // Two branches on a two-pivot trunk could never be grown, but the
        // tree is already built; only rasterization settings matter.
        let mut tree = straight_tree(20.0);
        for (graft_index, x) in [(1, 5.0), (2, 15.0)] {
            tree.branches.push(crate::bezier_map::Branch {
                graft_index,
                curve: Curve::new([Point::new(x, 0.0), Point::new(x, -10.0)]).unwrap(),
            });
        }
        let config = CaveConfig {
            trunk_pivot_count: 2,
            branch_count: 7,
            ..corridor_config()
        };
        assert!(config.validate().is_err());

        let map = CaveMap::from_tree(tree, &config).unwrap();
        assert_eq!(map.tree.branches.len(), 2);
        assert!(map.floors.contains(&TileCoord::new(5, -8)));
        assert!(map.floors.contains(&TileCoord::new(15, -8)));
    }

    #[test]
    fn bounds_cover_every_tile() {
        let map = CaveMap::generate(&CaveConfig::grotto(), &mut CaveRng::new(17)).unwrap();
        let (lo, hi) = map.bounds().unwrap();
        for t in map.walls.iter().chain(&map.floors) {
            assert!(t.x >= lo.x && t.x <= hi.x && t.y >= lo.y && t.y <= hi.y);
        }
    }

    #[test]
    fn empty_map_has_no_bounds() {
        let config = CaveConfig {
            trunk_width: -10,
            wall_width: 0,
            root_size: -10,
            crown_size: -10,
            ..corridor_config()
        };
        let map = CaveMap::from_tree(straight_tree(5.0), &config).unwrap();
        assert!(map.bounds().is_none());
    }

    #[test]
    fn deterministic_generation() {
        let config = CaveConfig::default();
        let a = CaveMap::generate(&config, &mut CaveRng::new(42)).unwrap();
        let b = CaveMap::generate(&config, &mut CaveRng::new(42)).unwrap();
        assert_eq!(a.tree, b.tree);
        assert_eq!(a.walls, b.walls);
        assert_eq!(a.floors, b.floors);
        assert_eq!(a.contours, b.contours);
        assert_eq!(a.shadows, b.shadows);
    }
}
