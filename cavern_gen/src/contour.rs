// Wall contour classification and shadow placement.
//
// Each wall tile is tagged from which of its four cardinal neighbors are
// also walls:
//
//   neighbors occupied        tag
//   ------------------------  ----
//   three or four             Full
//   exactly north + east      SW
//   exactly east + south      NW
//   exactly south + west      NE
//   exactly west + north      SE
//   anything else             (none)
//
// A corner tag names the exterior quadrant the wall tile is exposed to.
// Tiles with at most one wall neighbor, or with only two opposite neighbors
// (a one-tile-thick run), are deliberately left untagged.
//
// Shadows are cast one row north of SE and SW corners, and one row north of
// Full tiles whose northern neighbor is not itself tagged, so a solid wall
// mass only shades along its top edge.
//
// See also: `cave.rs` which runs the classifier over the final wall set,
// `tilemap.rs` which maps tags and shadows to tiles.

use crate::brush::TileSet;
use crate::types::TileCoord;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Orientation tag of a wall tile.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Contour {
    Full,
    NE,
    SE,
    SW,
    NW,
}

impl Contour {
    pub const ALL: [Contour; 5] = [Contour::Full, Contour::NE, Contour::SE, Contour::SW, Contour::NW];

    /// Tag for a tile given its cardinal wall neighbors, or `None` for thin
    /// or isolated geometry.
    pub fn classify(north: bool, east: bool, south: bool, west: bool) -> Option<Contour> {
        let count = [north, east, south, west].iter().filter(|&&n| n).count();
        match (north, east, south, west) {
            _ if count >= 3 => Some(Contour::Full),
            (true, true, false, false) => Some(Contour::SW),
            (false, true, true, false) => Some(Contour::NW),
            (false, false, true, true) => Some(Contour::NE),
            (true, false, false, true) => Some(Contour::SE),
            _ => None,
        }
    }

    /// Slot in a five-entry wall variant table (`Full, NE, SE, SW, NW`).
    pub fn index(self) -> usize {
        self as usize
    }
}

pub type ContourMap = FxHashMap<TileCoord, Contour>;

/// Tag every classifiable tile of `walls`.
pub fn classify_contours(walls: &TileSet) -> ContourMap {
    walls
        .iter()
        .filter_map(|&tile| {
            Contour::classify(
                walls.contains(&tile.north()),
                walls.contains(&tile.east()),
                walls.contains(&tile.south()),
                walls.contains(&tile.west()),
            )
            .map(|contour| (tile, contour))
        })
        .collect()
}

/// Which of the three shadow tiles to place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShadowVariant {
    /// Cast by an SE corner.
    SouthEast,
    /// Cast along the top edge of a solid wall mass.
    Edge,
    /// Cast by an SW corner.
    SouthWest,
}

impl ShadowVariant {
    /// Slot in a three-entry shadow table (`SouthEast, Edge, SouthWest`).
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShadowPlacement {
    pub position: TileCoord,
    pub variant: ShadowVariant,
}

/// Shadow placements for a contour map, sorted by position.
pub fn derive_shadows(contours: &ContourMap) -> Vec<ShadowPlacement> {
    let mut shadows: Vec<ShadowPlacement> = contours
        .iter()
        .filter_map(|(&tile, &contour)| {
            let above = tile.north();
            let variant = match contour {
                Contour::SE => ShadowVariant::SouthEast,
                Contour::SW => ShadowVariant::SouthWest,
                Contour::Full if !contours.contains_key(&above) => ShadowVariant::Edge,
                _ => return None,
            };
            Some(ShadowPlacement { position: above, variant })
        })
        .collect();
    shadows.sort_unstable();
    shadows
}
