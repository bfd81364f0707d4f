//! Integration tests for stillness-marching
//!
//! These tests drive the polygonizer through its public surface and check
//! the geometry it produces against the lookup tables.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stillness_core::{Drawable, GridCell, Point3f, Triangle, TriangleMesh};
use stillness_marching::tables::EDGE_CORNERS;
use stillness_marching::*;

/// Cube of size 2 centered at the origin with the given densities
fn standard_cell(densities: [f32; 8]) -> GridCell {
    GridCell::cube(2.0).with_densities(densities)
}

/// Densities realising configuration `config` against iso level 0.5
fn cell_for_configuration(config: u8) -> GridCell {
    let mut densities = [1.0; 8];
    for (corner, density) in densities.iter_mut().enumerate() {
        if config & (1 << corner) != 0 {
            *density = 0.0;
        }
    }
    standard_cell(densities)
}

/// Every vertex the polygonizer may place for `cell`
fn crossed_edge_vertices(cell: &GridCell, iso_level: f32) -> Vec<Point3f> {
    let mask = edge_mask(cube_index(cell, iso_level));
    EDGE_CORNERS
        .iter()
        .enumerate()
        .filter(|&(edge, _)| mask & (1 << edge) != 0)
        .map(|(_, &[a, b])| {
            vertex_interpolate(
                iso_level,
                cell.positions[a],
                cell.positions[b],
                cell.densities[a],
                cell.densities[b],
            )
        })
        .collect()
}

fn random_cell(rng: &mut StdRng) -> GridCell {
    let mut densities = [0.0f32; 8];
    for density in densities.iter_mut() {
        *density = rng.gen_range(-1.0..1.0);
    }
    let size = rng.gen_range(0.1..10.0);
    GridCell::cube(size).with_densities(densities)
}

#[test]
fn test_all_outside_is_empty() {
    let cell = standard_cell([2.0; 8]);
    assert_eq!(cube_index(&cell, 1.0), 0);
    assert!(polygonise(&cell, 1.0).is_empty());
}

#[test]
fn test_all_inside_is_empty() {
    let cell = standard_cell([-2.0; 8]);
    assert_eq!(cube_index(&cell, 1.0), 255);
    assert!(polygonise(&cell, 1.0).is_empty());
}

#[test]
fn test_iso_below_and_above_all_densities() {
    let cell = standard_cell([1.0; 8]);

    // Index 0: nothing is below 0.5
    assert_eq!(cube_index(&cell, 0.5), 0);
    assert!(polygonise(&cell, 0.5).is_empty());

    // Index 255: everything is below 1.5
    assert_eq!(cube_index(&cell, 1.5), 255);
    assert!(polygonise(&cell, 1.5).is_empty());
}

#[test]
fn test_two_corner_planar_cut() {
    let cell = standard_cell([0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
    let iso = 0.99;
    let config = cube_index(&cell, iso);
    assert_eq!(config, 3);

    let triangles = polygonise(&cell, iso);
    assert!(!triangles.is_empty());
    assert_eq!(triangles.len(), triangle_count(config));

    let inside = |corner: usize| cell.densities[corner] < iso;

    for triangle in &triangles {
        for vertex in triangle.vertices() {
            // Vertex sits on some edge joining an inside corner to an outside one
            let on_separating_edge = EDGE_CORNERS.iter().any(|&[a, b]| {
                if inside(a) == inside(b) {
                    return false;
                }
                let (pa, pb) = (cell.positions[a], cell.positions[b]);
                let shared_axes = (0..3).filter(|&k| pa[k] == pb[k]).all(|k| vertex[k] == pa[k]);
                let within = (0..3).all(|k| {
                    vertex[k] >= pa[k].min(pb[k]) && vertex[k] <= pa[k].max(pb[k])
                });
                shared_axes && within
            });
            assert!(on_separating_edge, "vertex {:?} is not on a crossed edge", vertex);
        }
    }

    // Both triangles lie in the single plane that cuts off edge 0-1
    let normals: Vec<_> = triangles.iter().filter_map(Triangle::normal).collect();
    assert_eq!(normals.len(), 2);
    assert_relative_eq!(normals[0], normals[1], epsilon = 1e-5);
}

#[test]
fn test_every_configuration_matches_table() {
    for config in 0..=255u8 {
        let cell = cell_for_configuration(config);
        assert_eq!(cube_index(&cell, 0.5), config);

        let triangles = polygonise(&cell, 0.5);
        assert_eq!(triangles.len(), triangle_count(config), "configuration {}", config);
        assert!(triangles.len() <= tables::MAX_TRIANGLES);

        let expected = crossed_edge_vertices(&cell, 0.5);
        for triangle in &triangles {
            for vertex in triangle.vertices() {
                assert!(expected.contains(&vertex), "configuration {}", config);
            }
            // Edge midpoints of a cube are never collinear
            assert!(triangle.area() > 0.0, "configuration {}", config);
        }
    }
}

#[test]
fn test_triangles_follow_table_order() {
    let cell = cell_for_configuration(3);
    let triangles = polygonise(&cell, 0.5);

    let midpoint = |edge: usize| {
        let [a, b] = EDGE_CORNERS[edge];
        Point3f::from((cell.positions[a].coords + cell.positions[b].coords) / 2.0)
    };

    let expected: Vec<Triangle> = triangle_edges(3)
        .map(|[a, b, c]| Triangle::new(midpoint(a), midpoint(b), midpoint(c)))
        .collect();
    assert_eq!(triangles, expected);
}

#[test]
fn test_random_cells() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..2000 {
        let cell = random_cell(&mut rng);
        let iso = rng.gen_range(-0.5..0.5);

        let triangles = polygonise(&cell, iso);
        let config = cube_index(&cell, iso);
        assert_eq!(triangles.len(), triangle_count(config));

        let expected = crossed_edge_vertices(&cell, iso);
        let (min, max) = cell.bounding_box();
        for triangle in &triangles {
            for vertex in triangle.vertices() {
                assert!(expected.contains(&vertex));
                for k in 0..3 {
                    assert!(vertex[k] >= min[k] - 1e-4 && vertex[k] <= max[k] + 1e-4);
                }
            }
        }

        // Pure: a second call gives bit-identical output
        let again = polygonise(&cell, iso);
        assert_eq!(triangles.len(), again.len());
        for (a, b) in triangles.iter().zip(&again) {
            for (p, q) in a.vertices().iter().zip(b.vertices().iter()) {
                for k in 0..3 {
                    assert_eq!(p[k].to_bits(), q[k].to_bits());
                }
            }
        }
    }
}

#[test]
fn test_interpolation_fallbacks() {
    let p1 = Point3f::new(0.25, -3.0, 7.0);
    let p2 = Point3f::new(1.0, 1.0, 1.0);

    // Equal densities return p1 for any iso
    for iso in [-1.0, 0.0, 0.5, 3.0] {
        assert_eq!(vertex_interpolate(iso, p1, p2, 0.5, 0.5), p1);
    }

    // Corner already at the iso level
    assert_eq!(vertex_interpolate(0.5, p1, p2, 0.5, 2.0), p1);
    assert_eq!(vertex_interpolate(0.5, p1, p2, 2.0, 0.5), p2);
}

#[test]
fn test_corner_on_iso_level_snaps_vertex() {
    // Corner 0 sits on the level and counts as outside; corner 1 is inside
    let cell = standard_cell([0.5, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
    let triangles = polygonise(&cell, 0.5);

    assert_eq!(cube_index(&cell, 0.5), 2);
    // Edge 0 joins corners 0 and 1 and snaps onto corner 0
    let corner0 = cell.positions[0];
    assert!(triangles
        .iter()
        .flat_map(|t| t.vertices())
        .any(|v| v == corner0));
}

#[test]
fn test_configured_polygonizer() {
    let config = PolygonizerConfig::default().with_iso_level(0.99);
    let polygonizer = CellPolygonizer::new(config).unwrap();
    let cell = standard_cell([0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);

    assert_eq!(polygonizer.polygonise(&cell), polygonise(&cell, 0.99));

    let json = serde_json::to_string(&config).unwrap();
    let back: PolygonizerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_flat_shaded_mesh_from_cell() {
    let cell = standard_cell([0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
    let triangles = polygonise(&cell, 0.99);
    let mesh = TriangleMesh::from_triangles(&triangles);

    assert_eq!(mesh.face_count(), triangles.len());
    assert_eq!(mesh.vertex_count(), triangles.len() * 3);

    let normals = mesh.normals.as_ref().unwrap();
    for (face, triangle) in mesh.faces.iter().zip(&triangles) {
        let expected = triangle.normal().unwrap();
        for &i in face {
            assert_relative_eq!(normals[i], expected);
        }
    }
}

#[test]
fn test_concurrent_calls() {
    let cell = standard_cell([0.1, 0.9, 0.3, 0.7, 0.6, 0.2, 0.8, 0.4]);
    let reference = polygonise(&cell, 0.5);

    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(move || polygonise(&cell, 0.5)))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), reference);
    }
}

#[test]
fn test_batch_matches_single_calls() {
    let mut rng = StdRng::seed_from_u64(7);
    let cells: Vec<GridCell> = (0..500).map(|_| random_cell(&mut rng)).collect();

    let batch = polygonise_cells(&cells, 0.1);
    for (cell, triangles) in cells.iter().zip(&batch) {
        assert_eq!(*triangles, polygonise(cell, 0.1));
    }
}
