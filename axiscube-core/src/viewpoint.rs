//! Orthonormal viewing frames
//!
//! A [`Viewpoint`] places a right-handed frame at the eye. Its `z` axis points
//! from the focal point back towards the eye, so the camera looks down `-z`
//! like `Matrix4::look_at_rh`. Unlike `look_at_rh`, construction never yields
//! NaN: coincident eye and focal points, or an up vector parallel to the view
//! direction, fall back to a deterministic frame.

use log::warn;
use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};

const EPSILON: f32 = 1e-6;

/// Eye position plus an orthonormal right-handed basis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    pub eye: Point3<f32>,
    pub focal: Point3<f32>,
    pub x: Vector3<f32>,
    pub y: Vector3<f32>,
    pub z: Vector3<f32>,
}

impl Viewpoint {
    /// Frame at `eye` looking at `focal`, with `y` as close to `up` as possible.
    pub fn look_at(eye: Point3<f32>, focal: Point3<f32>, up: Vector3<f32>) -> Self {
        let up = up.try_normalize(EPSILON).unwrap_or_else(Vector3::y);

        let (x, y, z) = match (eye - focal).try_normalize(EPSILON) {
            Some(z) => match up.cross(&z).try_normalize(EPSILON) {
                Some(x) => (x, z.cross(&x), z),
                None => {
                    warn!("up vector is parallel to the view direction, choosing a perpendicular");
                    let x = perpendicular(&z);
                    (x, z.cross(&x), z)
                }
            },
            None => {
                warn!("eye and focal point coincide, keeping up as the frame y axis");
                let z = perpendicular(&up);
                (up.cross(&z), up, z)
            }
        };

        Self { eye, focal, x, y, z }
    }

    /// Forward direction (from the eye towards the focal point)
    pub fn forward(&self) -> Vector3<f32> {
        -self.z
    }

    pub fn rotation(&self) -> Rotation3<f32> {
        Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[self.x, self.y, self.z]))
    }

    /// Local frame to world transform
    pub fn isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(
            Translation3::from(self.eye.coords),
            UnitQuaternion::from_rotation_matrix(&self.rotation()),
        )
    }

    /// World to eye space, the inverse of the frame
    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.isometry().inverse().to_homogeneous()
    }
}

/// A unit vector perpendicular to `v`, built from the world axis `v` is least
/// aligned with.
fn perpendicular(v: &Vector3<f32>) -> Vector3<f32> {
    let abs = v.abs();
    let helper = if abs.x <= abs.y && abs.x <= abs.z {
        Vector3::x()
    } else if abs.y <= abs.z {
        Vector3::y()
    } else {
        Vector3::z()
    };
    v.cross(&helper).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(vp: &Viewpoint) {
        for axis in [vp.x, vp.y, vp.z] {
            assert!(axis.iter().all(|c| c.is_finite()));
            assert!((axis.norm() - 1.0).abs() < 1e-5);
        }
        assert!(vp.x.dot(&vp.y).abs() < 1e-5);
        assert!(vp.y.dot(&vp.z).abs() < 1e-5);
        assert!(vp.z.dot(&vp.x).abs() < 1e-5);
        // right-handed
        assert!((vp.x.cross(&vp.y) - vp.z).norm() < 1e-5);
    }

    #[test]
    fn test_look_at_axes() {
        let vp = Viewpoint::look_at(
            Point3::new(10.0, 0.0, 0.0),
            Point3::origin(),
            Vector3::new(0.0, 0.0, 1.0),
        );
        assert_orthonormal(&vp);
        assert!((vp.z - Vector3::x()).norm() < 1e-6);
        assert!((vp.y - Vector3::z()).norm() < 1e-6);
        assert!((vp.forward() + Vector3::x()).norm() < 1e-6);
    }

    #[test]
    fn test_look_at_various() {
        let eyes = [
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-4.0, 0.5, 0.0),
            Point3::new(0.0, -3.0, 0.1),
        ];
        for eye in eyes {
            let vp = Viewpoint::look_at(eye, Point3::new(0.2, 0.1, -0.3), Vector3::y());
            assert_orthonormal(&vp);
        }
    }

    #[test]
    fn test_up_parallel_to_view() {
        let vp = Viewpoint::look_at(Point3::new(0.0, 5.0, 0.0), Point3::origin(), Vector3::y());
        assert_orthonormal(&vp);
        assert!((vp.z - Vector3::y()).norm() < 1e-6);
    }

    #[test]
    fn test_eye_equals_focal() {
        let up = Vector3::new(0.0, 0.0, 1.0);
        let vp = Viewpoint::look_at(Point3::new(1.0, 1.0, 1.0), Point3::new(1.0, 1.0, 1.0), up);
        assert_orthonormal(&vp);
        assert_eq!(vp.y, up);
    }

    #[test]
    fn test_view_matrix_matches_look_at_rh() {
        let eye = Point3::new(3.0, 2.0, 5.0);
        let focal = Point3::new(0.5, 0.0, -0.5);
        let up = Vector3::y();
        let vp = Viewpoint::look_at(eye, focal, up);
        let expected = Matrix4::look_at_rh(&eye, &focal, &up);
        assert!((vp.view_matrix() - expected).norm() < 1e-5);
    }

    #[test]
    fn test_view_inverts_frame() {
        let vp = Viewpoint::look_at(Point3::new(2.0, -1.0, 4.0), Point3::origin(), Vector3::y());
        let product = vp.view_matrix() * vp.isometry().to_homogeneous();
        assert!((product - Matrix4::identity()).norm() < 1e-5);
    }
}
