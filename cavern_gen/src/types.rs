// Core spatial types.
//
// Two planes coexist: the continuous plane where curves live (`Point`, f32)
// and the discrete tile grid that curves are rasterized onto (`TileCoord`,
// i32). The only bridge between them is `Point::to_tile()`, which rounds to
// the nearest tile.
//
// Grid conventions:
// - X: east  (positive) / west  (negative)
// - Y: north (positive) / south (negative)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

// ---------------------------------------------------------------------------
// Continuous plane
// ---------------------------------------------------------------------------

/// A point (or vector) in the continuous curve plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or `ZERO` when the vector is too
    /// short to have a meaningful direction.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 1e-5 { self / len } else { Self::ZERO }
    }

    /// Linear interpolation. Written as `a·(1−t) + b·t` so both endpoints
    /// are reproduced exactly at t = 0 and t = 1. Not clamped.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let s = 1.0 - t;
        Self::new(self.x * s + other.x * t, self.y * s + other.y * t)
    }

    /// Rotate counter-clockwise about the origin.
    pub fn rotated_degrees(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Nearest grid tile, ties rounding up. Unlike ties-to-even or
    /// ties-away-from-zero, `floor(v + 0.5)` commutes with integer offsets,
    /// so a brush centered on a half-tile still stamps a solid disk.
    pub fn to_tile(self) -> TileCoord {
        TileCoord::new((self.x + 0.5).floor() as i32, (self.y + 0.5).floor() as i32)
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Point {
    type Output = Point;
    fn div(self, rhs: f32) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Tile grid
// ---------------------------------------------------------------------------

/// A position on the tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub const fn north(self) -> Self {
        self.offset(0, 1)
    }

    pub const fn east(self) -> Self {
        self.offset(1, 0)
    }

    pub const fn south(self) -> Self {
        self.offset(0, -1)
    }

    pub const fn west(self) -> Self {
        self.offset(-1, 0)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
