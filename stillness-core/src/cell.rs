//! Grid cell: the eight corner samples a polygonizer works on
//!
//! Corners are numbered with the usual marching cubes layout. Corners 0-3
//! go around the bottom face (y = min) and corners 4-7 sit directly above
//! them on the top face:
//!
//! ```text
//!        7 ---------- 6
//!       /|           /|
//!      / |          / |
//!     4 ---------- 5  |
//!     |  3 --------|- 2
//!     | /          | /
//!     |/           |/
//!     0 ---------- 1
//! ```
//!
//! Edges 0-3 run around the bottom face, 4-7 around the top face and 8-11
//! are the verticals, each pairing corner `i` with corner `i + 4`.

use crate::error::{Error, Result};
use crate::point::Point3f;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of corners of a cell
pub const CORNER_COUNT: usize = 8;

/// Number of edges of a cell
pub const EDGE_COUNT: usize = 12;

/// A cubic cell with a position and a scalar density sample at each corner
///
/// `positions[i]` and `densities[i]` always describe the same corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub positions: [Point3f; CORNER_COUNT],
    pub densities: [f32; CORNER_COUNT],
}

impl GridCell {
    /// Create a cell from corner positions and densities
    pub fn new(positions: [Point3f; CORNER_COUNT], densities: [f32; CORNER_COUNT]) -> Self {
        Self {
            positions,
            densities,
        }
    }

    /// Create a cell from variable-length data, requiring exactly eight samples
    pub fn from_slices(positions: &[Point3f], densities: &[f32]) -> Result<Self> {
        let positions: [Point3f; CORNER_COUNT] = positions.try_into().map_err(|_| {
            Error::InvalidData(format!(
                "Grid cell needs {} corner positions, got {}",
                CORNER_COUNT,
                positions.len()
            ))
        })?;
        let densities: [f32; CORNER_COUNT] = densities.try_into().map_err(|_| {
            Error::InvalidData(format!(
                "Grid cell needs {} corner densities, got {}",
                CORNER_COUNT,
                densities.len()
            ))
        })?;

        Ok(Self::new(positions, densities))
    }

    /// Axis-aligned cube of edge length `size` centered at the origin
    ///
    /// All densities start at `1.0`.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let positions = [
            Point3f::new(-h, -h, -h),
            Point3f::new(h, -h, -h),
            Point3f::new(h, -h, h),
            Point3f::new(-h, -h, h),
            Point3f::new(-h, h, -h),
            Point3f::new(h, h, -h),
            Point3f::new(h, h, h),
            Point3f::new(-h, h, h),
        ];

        Self::new(positions, [1.0; CORNER_COUNT])
    }

    /// Replace all densities
    pub fn with_densities(mut self, densities: [f32; CORNER_COUNT]) -> Self {
        self.densities = densities;
        self
    }

    /// Set the density of a single corner
    ///
    /// # Panics
    ///
    /// Panics if `corner` is not below [`CORNER_COUNT`].
    pub fn with_density(mut self, corner: usize, density: f32) -> Self {
        self.densities[corner] = density;
        self
    }

    /// Position and density of a corner
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`CORNER_COUNT`].
    pub fn corner(&self, index: usize) -> (Point3f, f32) {
        (self.positions[index], self.densities[index])
    }

    /// Parse a cell from JSON
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a cell from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serialize the cell as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Smallest and largest density of the cell
    pub fn density_range(&self) -> (f32, f32) {
        self.densities
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &d| {
                (lo.min(d), hi.max(d))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_layout() {
        let cell = GridCell::cube(2.0);

        assert_eq!(cell.positions[0], Point3f::new(-1.0, -1.0, -1.0));
        assert_eq!(cell.positions[2], Point3f::new(1.0, -1.0, 1.0));
        assert_eq!(cell.positions[6], Point3f::new(1.0, 1.0, 1.0));

        // Top corners sit directly above bottom corners
        for i in 0..4 {
            let bottom = cell.positions[i];
            let top = cell.positions[i + 4];
            assert_eq!(bottom.x, top.x);
            assert_eq!(bottom.z, top.z);
            assert!(top.y > bottom.y);
        }

        assert_eq!(cell.densities, [1.0; CORNER_COUNT]);
    }

    #[test]
    fn test_from_slices() {
        let cube = GridCell::cube(1.0);
        let cell = GridCell::from_slices(&cube.positions, &[0.5; 8]).unwrap();
        assert_eq!(cell.positions, cube.positions);
        assert_eq!(cell.densities, [0.5; 8]);

        assert!(GridCell::from_slices(&cube.positions[..7], &[0.5; 8]).is_err());
        assert!(GridCell::from_slices(&cube.positions, &[0.5; 9]).is_err());
    }

    #[test]
    fn test_density_builders() {
        let cell = GridCell::cube(1.0)
            .with_density(0, 0.0)
            .with_density(1, -2.0);

        assert_eq!(cell.corner(1).1, -2.0);
        assert_eq!(cell.density_range(), (-2.0, 1.0));

        let cell = cell.with_densities([3.0; 8]);
        assert_eq!(cell.density_range(), (3.0, 3.0));
    }

    #[test]
    #[should_panic]
    fn test_corner_out_of_range() {
        GridCell::cube(1.0).corner(CORNER_COUNT);
    }

    #[test]
    fn test_json_file() {
        let cell = GridCell::cube(2.0).with_density(3, 0.25);
        let path = std::env::temp_dir().join(format!("stillness-cell-{}.json", std::process::id()));

        std::fs::write(&path, cell.to_json().unwrap()).unwrap();
        let loaded = GridCell::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, cell);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            GridCell::from_json("{\"positions\": []}"),
            Err(Error::Serialization(_))
        ));
        assert!(matches!(
            GridCell::from_json_file("/nonexistent/stillness/cell.json"),
            Err(Error::Io(_))
        ));
    }
}
