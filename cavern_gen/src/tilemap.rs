// Boundary with the tile-painting backend.
//
// The generator never draws anything itself. A host supplies a
// `TileSurface` (a tilemap, a texture atlas, a terminal buffer) and a
// `TilePalette` of opaque tile handles; `paint()` translates a `CaveMap`
// into `set_tile` calls on three independent layers:
//
// - Walls: every wall tile, variant chosen by its contour tag. Untagged
//   (thin or isolated) walls get the `Full` variant.
// - Floor: every floor tile, one uniform tile.
// - Decor: one shadow tile per shadow placement.
//
// `regenerate()` is the all-or-nothing entry point: it builds the whole
// `CaveMap` first, and only once that has succeeded clears the three layers
// and paints. A rejected config leaves the surface exactly as it was.
//
// `TileGrid` is an in-memory surface used by tests and the `cavegen` CLI.

use crate::cave::CaveMap;
use crate::config::CaveConfig;
use crate::contour::Contour;
use crate::error::Result;
use crate::prng::CaveRng;
use crate::types::TileCoord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Output layers, painted independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    Walls,
    Floor,
    Decor,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Walls, Layer::Floor, Layer::Decor];
}

/// Anything that can receive painted tiles.
pub trait TileSurface {
    type Tile;

    fn set_tile(&mut self, layer: Layer, position: TileCoord, tile: Self::Tile);

    fn clear_layer(&mut self, layer: Layer);
}

/// The tiles a cave is painted with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePalette<T> {
    pub floor: T,
    /// Indexed by `Contour::index()`: `Full, NE, SE, SW, NW`.
    pub walls: [T; 5],
    /// Indexed by `ShadowVariant::index()`: `SouthEast, Edge, SouthWest`.
    pub shadows: [T; 3],
}

impl<T> TilePalette<T> {
    pub fn wall(&self, contour: Contour) -> &T {
        &self.walls[contour.index()]
    }
}

/// Paint `map` onto `surface`. Does not clear anything first.
pub fn paint<S>(surface: &mut S, map: &CaveMap, palette: &TilePalette<S::Tile>)
where
    S: TileSurface,
    S::Tile: Clone,
{
    for tile in &map.walls {
        let contour = map.contours.get(tile).copied().unwrap_or(Contour::Full);
        surface.set_tile(Layer::Walls, *tile, palette.wall(contour).clone());
    }
    for tile in &map.floors {
        surface.set_tile(Layer::Floor, *tile, palette.floor.clone());
    }
    for shadow in &map.shadows {
        let tile = palette.shadows[shadow.variant.index()].clone();
        surface.set_tile(Layer::Decor, shadow.position, tile);
    }
}

/// Generate a fresh cave and replace whatever `surface` was showing.
pub fn regenerate<S>(
    surface: &mut S,
    config: &CaveConfig,
    palette: &TilePalette<S::Tile>,
    rng: &mut CaveRng,
) -> Result<CaveMap>
where
    S: TileSurface,
    S::Tile: Clone,
{
    let map = CaveMap::generate(config, rng)?;
    for layer in Layer::ALL {
        surface.clear_layer(layer);
    }
    paint(surface, &map, palette);
    Ok(map)
}

// ---------------------------------------------------------------------------
// In-memory surface
// ---------------------------------------------------------------------------

/// A sparse three-layer tile grid.
#[derive(Clone, Debug)]
pub struct TileGrid<T> {
    layers: [BTreeMap<TileCoord, T>; 3],
}

impl<T> Default for TileGrid<T> {
    fn default() -> Self {
        Self {
            layers: [BTreeMap::new(), BTreeMap::new(), BTreeMap::new()],
        }
    }
}

impl<T> TileGrid<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self, layer: Layer) -> &BTreeMap<TileCoord, T> {
        &self.layers[layer as usize]
    }

    pub fn get(&self, layer: Layer, position: TileCoord) -> Option<&T> {
        self.layer(layer).get(&position)
    }

    /// Topmost tile at `position`: decor over walls over floor.
    pub fn top(&self, position: TileCoord) -> Option<&T> {
        [Layer::Decor, Layer::Walls, Layer::Floor]
            .into_iter()
            .find_map(|layer| self.get(layer, position))
    }

    /// Inclusive bounding box over all layers, or `None` if nothing is painted.
    pub fn bounds(&self) -> Option<(TileCoord, TileCoord)> {
        let mut keys = self.layers.iter().flat_map(|l| l.keys());
        let first = *keys.next()?;
        Some(keys.fold((first, first), |(lo, hi), t| {
            (
                TileCoord::new(lo.x.min(t.x), lo.y.min(t.y)),
                TileCoord::new(hi.x.max(t.x), hi.y.max(t.y)),
            )
        }))
    }
}

impl<T> TileSurface for TileGrid<T> {
    type Tile = T;

    fn set_tile(&mut self, layer: Layer, position: TileCoord, tile: T) {
        self.layers[layer as usize].insert(position, tile);
    }

    fn clear_layer(&mut self, layer: Layer) {
        self.layers[layer as usize].clear();
    }
}

impl TileGrid<char> {
    /// Render the grid as text, north at the top. Empty cells use `blank`.
    pub fn to_ascii(&self, blank: char) -> String {
        let Some((lo, hi)) = self.bounds() else {
            return String::new();
        };
        let mut out = String::new();
        for y in (lo.y..=hi.y).rev() {
            for x in lo.x..=hi.x {
                out.push(self.top(TileCoord::new(x, y)).copied().unwrap_or(blank));
            }
            out.push('\n');
        }
        out
    }
}

impl TilePalette<char> {
    /// Box-drawing style palette for terminal output.
    pub fn ascii() -> Self {
        Self {
            floor: '.',
            walls: ['#', '┐', '┘', '└', '┌'],
            shadows: ['▖', '▀', '▗'],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CaveError;

    /// Records every call, to check exact paint counts.
    #[derive(Default)]
    struct Recorder {
        sets: Vec<(Layer, TileCoord, u8)>,
        clears: Vec<Layer>,
    }

    impl TileSurface for Recorder {
        type Tile = u8;

        fn set_tile(&mut self, layer: Layer, position: TileCoord, tile: u8) {
            self.sets.push((layer, position, tile));
        }

        fn clear_layer(&mut self, layer: Layer) {
            self.clears.push(layer);
        }
    }

    fn numbered_palette() -> TilePalette<u8> {
        TilePalette {
            floor: 100,
            walls: [0, 1, 2, 3, 4],
            shadows: [10, 11, 12],
        }
    }

    #[test]
    fn paints_each_tile_once() {
        let map = CaveMap::generate(&CaveConfig::default(), &mut CaveRng::new(4)).unwrap();
        let mut rec = Recorder::default();
        paint(&mut rec, &map, &numbered_palette());

        let count = |layer: Layer| rec.sets.iter().filter(|(l, _, _)| *l == layer).count();
        assert_eq!(count(Layer::Walls), map.walls.len());
        assert_eq!(count(Layer::Floor), map.floors.len());
        assert_eq!(count(Layer::Decor), map.shadows.len());
        assert!(rec.clears.is_empty());
    }

    #[test]
    fn wall_variant_follows_contour() {
        let map = CaveMap::generate(&CaveConfig::grotto(), &mut CaveRng::new(12)).unwrap();
        let mut grid = TileGrid::new();
        paint(&mut grid, &map, &numbered_palette());

        for (tile, contour) in &map.contours {
            assert_eq!(grid.get(Layer::Walls, *tile), Some(&(contour.index() as u8)));
        }
        for tile in map.untagged_walls() {
            assert_eq!(grid.get(Layer::Walls, tile), Some(&0));
        }
        for shadow in &map.shadows {
            let expected = 10 + shadow.variant.index() as u8;
            assert_eq!(grid.get(Layer::Decor, shadow.position), Some(&expected));
        }
    }

    #[test]
    fn regenerate_clears_then_paints() {
        let mut grid = TileGrid::new();
        let stale = TileCoord::new(10_000, 10_000);
        grid.set_tile(Layer::Floor, stale, 7u8);

        let map = regenerate(
            &mut grid,
            &CaveConfig::default(),
            &numbered_palette(),
            &mut CaveRng::new(1),
        )
        .unwrap();
        assert!(grid.get(Layer::Floor, stale).is_none());
        assert_eq!(grid.layer(Layer::Floor).len(), map.floors.len());
        assert_eq!(grid.layer(Layer::Walls).len(), map.walls.len());
    }

    #[test]
    fn rejected_config_leaves_surface_untouched() {
        let mut rec = Recorder::default();
        let config = CaveConfig {
            trunk_pivot_count: 3,
            branch_count: 4,
            ..CaveConfig::default()
        };
        let err = regenerate(&mut rec, &config, &numbered_palette(), &mut CaveRng::new(1)).unwrap_err();
        assert!(matches!(err, CaveError::InvalidConfiguration { .. }));
        assert!(rec.sets.is_empty());
        assert!(rec.clears.is_empty());
    }

    #[test]
    fn second_generation_supersedes_first() {
        let palette = numbered_palette();
        let mut grid = TileGrid::new();
        let config = CaveConfig::default();
        regenerate(&mut grid, &config, &palette, &mut CaveRng::new(1)).unwrap();
        let second = regenerate(&mut grid, &config, &palette, &mut CaveRng::new(2)).unwrap();

        let mut fresh = TileGrid::new();
        paint(&mut fresh, &second, &palette);
        for layer in Layer::ALL {
            assert_eq!(grid.layer(layer), fresh.layer(layer));
        }
    }

    #[test]
    fn ascii_puts_north_on_top() {
        let mut grid = TileGrid::new();
        grid.set_tile(Layer::Floor, TileCoord::new(0, 0), '.');
        grid.set_tile(Layer::Walls, TileCoord::new(1, 1), '#');
        grid.set_tile(Layer::Floor, TileCoord::new(1, 1), '.');
        assert_eq!(grid.to_ascii(' '), " #\n. \n");
    }

    #[test]
    fn empty_grid_renders_nothing() {
        let grid: TileGrid<char> = TileGrid::new();
        assert!(grid.bounds().is_none());
        assert_eq!(grid.to_ascii(' '), "");
    }
}
