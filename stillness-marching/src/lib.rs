//! # Stillness Marching
//!
//! Marching cubes polygonization of a single grid cell.
//!
//! A [`GridCell`](stillness_core::GridCell) carries eight corner positions and
//! density samples. [`polygonise`] classifies the corners against an iso level
//! and returns up to five triangles approximating the surface inside the cell.
//!
//! ```rust
//! use stillness_core::GridCell;
//! use stillness_marching::polygonise;
//!
//! let cell = GridCell::cube(2.0).with_densities([0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
//! let triangles = polygonise(&cell, 0.99);
//! assert_eq!(triangles.len(), 2);
//! ```

pub mod tables;
pub mod polygonizer;
pub mod parallel;

// Re-export commonly used items
pub use polygonizer::*;
pub use tables::{edge_mask, triangle_count, triangle_edges, TriangleEdges};
pub use parallel::{polygonise_cells, polygonise_cells_flat, ThreadPoolConfig};
