//! Orbit state driven by pointer drags
use nalgebra::{Point3, Rotation3, Vector3};

use crate::viewpoint::Viewpoint;

/// Vertical field of view the orbit distances are tuned for
pub const VERTICAL_FOV_DEGREES: f32 = 30.0;

/// Upper end of the perspective control
pub const MAX_PERSPECTIVE: f32 = 10.0;

/// Accumulated orbit angles (radians) and perspective strength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub yaw: f32,
    pub pitch: f32,
    /// In `[0, MAX_PERSPECTIVE]`; larger values move the eye closer
    pub perspective: f32,
}

impl OrbitState {
    pub fn new(yaw: f32, pitch: f32, perspective: f32) -> Self {
        Self {
            yaw,
            pitch,
            perspective: perspective.clamp(0.0, MAX_PERSPECTIVE),
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotated(self, d_yaw: f32, d_pitch: f32) -> Self {
        Self {
            yaw: self.yaw + d_yaw,
            pitch: self.pitch + d_pitch,
            ..self
        }
    }

    /// Apply a pointer drag of `dx`, `dy` pixels.
    ///
    /// Dragging right spins the structure right, dragging down tilts it
    /// towards the viewer.
    pub fn dragged(self, dx: f32, dy: f32, sensitivity: f32) -> Self {
        self.rotated(-dx * sensitivity, -dy * sensitivity)
    }

    pub fn with_perspective(self, perspective: f32) -> Self {
        Self::new(self.yaw, self.pitch, perspective)
    }

    /// Eye distance from the focal point: 10 at no perspective, 1 at full.
    pub fn eye_distance(&self) -> f32 {
        10.0 - self.perspective * 0.9
    }

    /// World height visible at the focal plane, used to keep the on-screen
    /// size constant while the eye distance changes.
    pub fn display_scale(&self) -> f32 {
        self.eye_distance() * (VERTICAL_FOV_DEGREES / 2.0).to_radians().tan() * 2.0
    }

    pub fn rotation(&self) -> Rotation3<f32> {
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw);
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.pitch);
        ry * rx
    }

    /// Base viewing plane (eye on `+z`, up `+y`) rotated by the orbit angles
    /// and placed around `focal`.
    pub fn viewpoint(&self, focal: Point3<f32>) -> Viewpoint {
        let rotation = self.rotation();
        let eye = focal + rotation * Vector3::new(0.0, 0.0, self.eye_distance());
        Viewpoint::look_at(eye, focal, rotation * Vector3::y())
    }
}

impl Default for OrbitState {
    fn default() -> Self {
        Self::zero()
    }
}
