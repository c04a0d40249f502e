// cavern_gen: branching cave layouts from randomized Bezier curves.
//
// This crate owns all generation logic: it grows a tree of curves (one
// trunk, several branches grafted onto it), rasterizes the tree into two
// tile sets (walls and floors), classifies each wall tile's exposed corner
// from its 4-neighborhood, and derives shadow decorations from that
// classification. It has no rendering dependency: output is either a plain
// `CaveMap` value or a sequence of `set_tile` calls against a caller-supplied
// `TileSurface`.
//
// Module overview:
// - `types.rs`:      Point (continuous f32 plane), TileCoord (integer grid).
// - `curve.rs`:      Curve: recursive de Casteljau evaluation over any pivot count.
// - `bezier_map.rs`: CurveTree: trunk + grafted branches, randomized control points.
// - `brush.rs`:      Disk stamping/erasing of tile sets, along points and curves.
// - `contour.rs`:    Contour tags (Full/NE/SE/SW/NW) and shadow placement.
// - `cave.rs`:       CaveMap: the shape-then-pave generation pipeline.
// - `tilemap.rs`:    TileSurface boundary, TilePalette, in-memory TileGrid, regenerate().
// - `config.rs`:     CaveConfig: all tunable sizes and counts, loaded from JSON.
// - `error.rs`:      CaveError: configuration and I/O failures.
// - `prng`:          Re-exported from `cavern_prng`: xoshiro256++ PRNG.
//
// **Critical constraint: determinism.** All randomness comes from the
// `CaveRng` passed by the caller. The same seed and config always produce
// the same `CaveMap`.

pub mod bezier_map;
pub mod brush;
pub mod cave;
pub mod config;
pub mod contour;
pub mod curve;
pub mod error;
pub use cavern_prng as prng;
pub mod tilemap;
pub mod types;
