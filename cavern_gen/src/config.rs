// Data-driven generation configuration.
//
// Every size, count, and length the generator uses lives in `CaveConfig`,
// loaded from JSON or built from a named preset. The generator never uses
// magic numbers; it reads from the config.
//
// Values are treated as opaque inputs: negative widths or lengths are not
// rejected, they simply stamp nothing (a brush with non-positive radius is a
// no-op). `validate()` only rejects combinations that would make generation
// itself ill-defined. It is split in two: `validate_growth()` covers the
// tree (too few pivots, more branches than graft points) and
// `validate_raster()` covers rasterization (zero sampling precision), so a
// hand-built tree is only checked against the fields that apply to it.
//
// See also: `bezier_map.rs` (trunk/branch counts and lengths), `cave.rs`
// (widths, anchor sizes, precision), `tilemap.rs` for the tile palette,
// which is kept separate because the core never inspects tiles.

use crate::error::{CaveError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete set of generation parameters. Never mutated during generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaveConfig {
    /// Straight-line distance from the trunk's start (the origin) to its end.
    pub trunk_length: f32,
    /// Number of control points on the trunk, endpoints included.
    pub trunk_pivot_count: usize,
    /// Straight-line distance from a branch's graft point to its tip.
    pub branch_length: f32,
    /// Number of control points on each branch, endpoints included.
    pub branch_pivot_count: usize,
    /// Number of branches. At most `trunk_pivot_count - 2`, since each
    /// branch claims a distinct interior trunk pivot.
    pub branch_count: usize,

    /// Half-width of the walkable trunk passage, in tiles.
    pub trunk_width: i32,
    /// Half-width of the walkable branch passages, in tiles.
    pub branch_width: i32,
    /// Thickness of the wall shell left around every passage and chamber.
    pub wall_width: i32,
    /// Samples per curve (the curve is stamped at `precision + 1` points).
    /// Long curves need more to avoid gaps between stamps.
    pub precision: u32,

    /// Radius of the chamber where each branch leaves the trunk.
    pub graft_size: i32,
    /// Radius of the chamber at each branch tip.
    pub leaf_size: i32,
    /// Radius of the chamber at the trunk's start.
    pub root_size: i32,
    /// Radius of the chamber at the trunk's end.
    pub crown_size: i32,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            trunk_length: 60.0,
            trunk_pivot_count: 5,
            branch_length: 25.0,
            branch_pivot_count: 3,
            branch_count: 3,
            trunk_width: 2,
            branch_width: 1,
            wall_width: 2,
            precision: 100,
            graft_size: 3,
            leaf_size: 4,
            root_size: 5,
            crown_size: 6,
        }
    }
}

impl CaveConfig {
    /// Long, narrow warren: many thin branches off a winding trunk.
    pub fn warren() -> Self {
        Self {
            trunk_length: 90.0,
            trunk_pivot_count: 8,
            branch_length: 30.0,
            branch_pivot_count: 4,
            branch_count: 6,
            trunk_width: 1,
            branch_width: 1,
            wall_width: 2,
            precision: 180,
            graft_size: 2,
            leaf_size: 3,
            root_size: 4,
            crown_size: 4,
        }
    }

    /// Compact grotto: short wide trunk, two stubby branches, big chambers.
    pub fn grotto() -> Self {
        Self {
            trunk_length: 35.0,
            trunk_pivot_count: 4,
            branch_length: 14.0,
            branch_pivot_count: 3,
            branch_count: 2,
            trunk_width: 3,
            branch_width: 2,
            wall_width: 3,
            precision: 60,
            graft_size: 4,
            leaf_size: 6,
            root_size: 7,
            crown_size: 8,
        }
    }

    /// Look up a preset by name (`default`, `warren`, `grotto`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default()),
            "warren" => Some(Self::warren()),
            "grotto" => Some(Self::grotto()),
            _ => None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of interior trunk pivots available as graft points.
    pub fn graft_candidates(&self) -> usize {
        self.trunk_pivot_count.saturating_sub(2)
    }

    /// Reject configurations that generation cannot honor.
    pub fn validate(&self) -> Result<()> {
        self.validate_growth()?;
        self.validate_raster()
    }

    /// Checks on the fields that shape the curve tree: pivot counts and the
    /// graft pool.
    pub fn validate_growth(&self) -> Result<()> {
        if self.trunk_pivot_count < 2 {
            return Err(CaveError::invalid(
                "trunk_pivot_count",
                format!("must be at least 2, got {}", self.trunk_pivot_count),
            ));
        }
        if self.branch_count > 0 {
            if self.branch_pivot_count < 2 {
                return Err(CaveError::invalid(
                    "branch_pivot_count",
                    format!("must be at least 2, got {}", self.branch_pivot_count),
                ));
            }
            if self.branch_count > self.graft_candidates() {
                return Err(CaveError::invalid(
                    "branch_count",
                    format!(
                        "{} exceeds the {} interior trunk pivots available as graft points",
                        self.branch_count,
                        self.graft_candidates()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Checks on the fields that rasterize an existing tree.
    pub fn validate_raster(&self) -> Result<()> {
        if self.precision == 0 {
            return Err(CaveError::invalid("precision", "must be at least 1"));
        }
        Ok(())
    }
}
