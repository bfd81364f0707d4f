//! Point types and related functionality

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Linear interpolation between two points, unclamped in `t`
pub fn lerp_point(p1: &Point3f, p2: &Point3f, t: f32) -> Point3f {
    Point3f::new(
        p1.x + t * (p2.x - p1.x),
        p1.y + t * (p2.y - p1.y),
        p1.z + t * (p2.z - p1.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Point3f::new(-1.0, 2.0, 0.5);
        let b = Point3f::new(3.0, -2.0, 0.5);

        assert_eq!(lerp_point(&a, &b, 0.0), a);
        assert_eq!(lerp_point(&a, &b, 1.0), b);
        assert_eq!(lerp_point(&a, &b, 0.5), Point3f::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn test_lerp_extrapolates() {
        let a = Point3f::new(0.0, 0.0, 0.0);
        let b = Point3f::new(1.0, 0.0, 0.0);

        assert_eq!(lerp_point(&a, &b, 2.0), Point3f::new(2.0, 0.0, 0.0));
        assert_eq!(lerp_point(&a, &b, -1.0), Point3f::new(-1.0, 0.0, 0.0));
    }
}
