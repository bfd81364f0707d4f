//! Core data structures and traits for stillness
//!
//! This crate provides the plain geometric types shared by the polygonizer
//! and its callers: points, grid cells, triangles, meshes and the error type.

pub mod point;
pub mod cell;
pub mod mesh;
pub mod traits;
pub mod error;

pub use point::*;
pub use cell::*;
pub use mesh::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
