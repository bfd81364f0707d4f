//! Marching cubes polygonization of a single grid cell
//!
//! Given the eight corner samples of a cell and an iso level, this module
//! classifies the cell against the iso level, places a vertex on every edge
//! the surface crosses and joins those vertices into triangles using the
//! lookup tables. Each call is pure and works only on its own cell.

use crate::tables::{edge_mask, triangle_edges, EDGE_CORNERS, MAX_TRIANGLES};
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use stillness_core::{lerp_point, Error, GridCell, Point3f, Result, Triangle, EDGE_COUNT};

/// Tolerance below which two scalar values are treated as equal during interpolation
pub const ISO_EPSILON: f32 = 1e-5;

/// Configuration for cell polygonization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolygonizerConfig {
    /// Isosurface level (scalar value to extract)
    pub iso_level: f32,
}

impl Default for PolygonizerConfig {
    fn default() -> Self {
        Self { iso_level: 0.0 }
    }
}

impl PolygonizerConfig {
    /// Set the iso level
    pub fn with_iso_level(mut self, iso_level: f32) -> Self {
        self.iso_level = iso_level;
        self
    }

    /// Check that the configuration can be used
    pub fn validate(&self) -> Result<()> {
        if !self.iso_level.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "Iso level must be finite, got {}",
                self.iso_level
            )));
        }
        Ok(())
    }
}

/// Polygonizer bound to a fixed iso level
#[derive(Debug, Clone)]
pub struct CellPolygonizer {
    config: PolygonizerConfig,
}

impl CellPolygonizer {
    /// Create a new polygonizer, rejecting invalid configurations
    pub fn new(config: PolygonizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PolygonizerConfig {
        &self.config
    }

    /// Triangulate the iso surface inside `cell`
    pub fn polygonise(&self, cell: &GridCell) -> Vec<Triangle> {
        polygonise(cell, self.config.iso_level)
    }
}

/// Configuration index of `cell`: bit `i` is set iff `densities[i] < iso_level`
///
/// A corner exactly at the iso level counts as outside.
pub fn cube_index(cell: &GridCell, iso_level: f32) -> u8 {
    cell.densities
        .iter()
        .enumerate()
        .filter(|&(_, &density)| density < iso_level)
        .fold(0u8, |index, (corner, _)| index | (1 << corner))
}

/// Point on the segment `p1`-`p2` where the field reaches `iso_level`
///
/// Returns `p1` when `val1` is within [`ISO_EPSILON`] of the iso level, `p2`
/// when `val2` is, and `p1` again when the two values are that close to each
/// other. Otherwise interpolates linearly without clamping.
pub fn vertex_interpolate(
    iso_level: f32,
    p1: Point3f,
    p2: Point3f,
    val1: f32,
    val2: f32,
) -> Point3f {
    if (iso_level - val1).abs() < ISO_EPSILON {
        return p1;
    }
    if (iso_level - val2).abs() < ISO_EPSILON {
        return p2;
    }
    if (val1 - val2).abs() < ISO_EPSILON {
        return p1;
    }

    let mu = (iso_level - val1) / (val2 - val1);
    lerp_point(&p1, &p2, mu)
}

/// Vertices on the crossed edges of a cell, indexed by edge number
fn edge_vertices(cell: &GridCell, iso_level: f32, mask: u16) -> [Option<Point3f>; EDGE_COUNT] {
    let mut vertices = [None; EDGE_COUNT];

    for (edge, &[a, b]) in EDGE_CORNERS.iter().enumerate() {
        if mask & (1 << edge) == 0 {
            continue;
        }

        vertices[edge] = Some(vertex_interpolate(
            iso_level,
            cell.positions[a],
            cell.positions[b],
            cell.densities[a],
            cell.densities[b],
        ));
    }

    vertices
}

/// Triangulate the iso surface at `iso_level` inside `cell`
///
/// Returns between zero and five triangles, in table order and winding.
pub fn polygonise(cell: &GridCell, iso_level: f32) -> Vec<Triangle> {
    let config = cube_index(cell, iso_level);
    let mask = edge_mask(config);

    // Cell entirely on one side of the surface
    if mask == 0 {
        trace!("cell configuration {} has no crossings", config);
        return Vec::new();
    }

    let vertices = edge_vertices(cell, iso_level, mask);
    let mut triangles = Vec::with_capacity(MAX_TRIANGLES);

    for [a, b, c] in triangle_edges(config) {
        match (vertices[a], vertices[b], vertices[c]) {
            (Some(x), Some(y), Some(z)) => triangles.push(Triangle::new(x, y, z)),
            _ => warn!(
                "configuration {} references uncrossed edge in triple ({}, {}, {})",
                config, a, b, c
            ),
        }
    }

    trace!(
        "cell configuration {} produced {} triangles",
        config,
        triangles.len()
    );
    triangles
}
