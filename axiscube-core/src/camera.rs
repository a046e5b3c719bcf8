//! Camera: a viewpoint plus a projection onto a screen of given pixel size
//!
//! Construction never panics. Out-of-range projection parameters (a
//! non-positive or non-finite field of view or view box, a clip range of zero
//! depth) are replaced with usable values and logged.

use log::warn;
use nalgebra::Matrix4;

use crate::viewpoint::Viewpoint;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Parameters of a perspective camera
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveParams {
    pub viewpoint: Viewpoint,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Vertical field of view in radians
    pub vertical_fov: f32,
    pub near: f32,
    pub far: f32,
}

/// Parameters of an orthographic camera
#[derive(Debug, Clone, Copy)]
pub struct OrthographicParams {
    pub viewpoint: Viewpoint,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Height of the view box in world units
    pub viewport_height: f32,
    pub near: f32,
    pub far: f32,
}

/// View and projection transforms for one viewpoint and screen
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub viewpoint: Viewpoint,
    pub screen_width: f32,
    pub screen_height: f32,
    mode: ProjectionMode,
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
    view_projection: Matrix4<f32>,
}

impl Camera {
    pub fn perspective(params: PerspectiveParams) -> Self {
        let aspect = aspect(params.screen_width, params.screen_height);
        let fov = if params.vertical_fov.is_finite()
            && params.vertical_fov > 0.0
            && params.vertical_fov < std::f32::consts::PI
        {
            params.vertical_fov
        } else {
            warn!(
                "vertical field of view {} is out of range, using {} degrees",
                params.vertical_fov, FALLBACK_FOV_DEGREES
            );
            FALLBACK_FOV_DEGREES.to_radians()
        };
        let (near, far) = clip_range(params.near, params.far);
        let projection = Matrix4::new_perspective(aspect, fov, near, far);
        Self::from_parts(
            params.viewpoint,
            params.screen_width,
            params.screen_height,
            ProjectionMode::Perspective,
            projection,
        )
    }

    pub fn orthographic(params: OrthographicParams) -> Self {
        let height = if params.viewport_height.is_finite() && params.viewport_height > MIN_EXTENT {
            params.viewport_height
        } else {
            warn!(
                "viewport height {} is out of range, using 1",
                params.viewport_height
            );
            1.0
        };
        let width = height * aspect(params.screen_width, params.screen_height);
        let (near, far) = clip_range(params.near, params.far);
        let projection = Matrix4::new_orthographic(
            -width / 2.0,
            width / 2.0,
            -height / 2.0,
            height / 2.0,
            near,
            far,
        );
        Self::from_parts(
            params.viewpoint,
            params.screen_width,
            params.screen_height,
            ProjectionMode::Orthographic,
            projection,
        )
    }

    fn from_parts(
        viewpoint: Viewpoint,
        screen_width: f32,
        screen_height: f32,
        mode: ProjectionMode,
        projection: Matrix4<f32>,
    ) -> Self {
        let view = viewpoint.view_matrix();
        Self {
            viewpoint,
            screen_width,
            screen_height,
            mode,
            view,
            projection,
            view_projection: projection * view,
        }
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// World to eye space
    pub fn view(&self) -> &Matrix4<f32> {
        &self.view
    }

    pub fn projection(&self) -> &Matrix4<f32> {
        &self.projection
    }

    /// `projection * view`
    pub fn view_projection(&self) -> &Matrix4<f32> {
        &self.view_projection
    }

    pub fn half_width(&self) -> f32 {
        self.screen_width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.screen_height / 2.0
    }
}

const FALLBACK_FOV_DEGREES: f32 = 30.0;
const FALLBACK_NEAR: f32 = 0.1;
const MIN_EXTENT: f32 = 1e-3;

/// Width over height; a collapsed or unbounded screen is treated as square.
fn aspect(width: f32, height: f32) -> f32 {
    let aspect = width / height;
    if width > 0.0 && height > 0.0 && aspect.is_finite() && aspect > MIN_EXTENT {
        aspect
    } else {
        1.0
    }
}

/// Near and far planes with `far` strictly beyond `near`.
///
/// A non-finite `near` is replaced by the default near plane; a `far` that is
/// non-finite or not beyond `near` is pushed out by a small relative step.
fn clip_range(near: f32, far: f32) -> (f32, f32) {
    let near = if near.is_finite() {
        near
    } else {
        warn!("near plane {} is not finite, using {}", near, FALLBACK_NEAR);
        FALLBACK_NEAR
    };
    let step = (near.abs() * 1e-3).max(1e-3);
    if far.is_finite() && far - near >= step {
        (near, far)
    } else {
        warn!("far plane {} is not beyond near plane {}, using {}", far, near, near + step);
        (near, near + step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn viewpoint() -> Viewpoint {
        Viewpoint::look_at(Point3::new(0.0, 0.0, 5.0), Point3::origin(), Vector3::y())
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::perspective(PerspectiveParams {
            viewpoint: viewpoint(),
            screen_width: 800.0,
            screen_height: 600.0,
            vertical_fov: 30f32.to_radians(),
            near: 0.1,
            far: 100.0,
        });
        assert_eq!(camera.mode(), ProjectionMode::Perspective);
        assert_eq!(camera.half_width(), 400.0);
        assert_eq!(camera.half_height(), 300.0);
        let expected = Matrix4::new_perspective(800.0 / 600.0, 30f32.to_radians(), 0.1, 100.0);
        assert!((camera.projection() - expected).norm() < 1e-6);
    }

    #[test]
    fn test_view_projection_composition() {
        let camera = Camera::orthographic(OrthographicParams {
            viewpoint: viewpoint(),
            screen_width: 400.0,
            screen_height: 200.0,
            viewport_height: 2.0,
            near: 0.1,
            far: 100.0,
        });
        assert_eq!(camera.mode(), ProjectionMode::Orthographic);
        let composed = camera.projection() * camera.view();
        assert!((camera.view_projection() - composed).norm() < 1e-6);
    }

    #[test]
    fn test_orthographic_box_matches_aspect() {
        let camera = Camera::orthographic(OrthographicParams {
            viewpoint: viewpoint(),
            screen_width: 400.0,
            screen_height: 200.0,
            viewport_height: 2.0,
            near: 0.1,
            far: 100.0,
        });
        // Box is 4 wide and 2 high: x scale 2/4, y scale 2/2
        assert!((camera.projection()[(0, 0)] - 0.5).abs() < 1e-6);
        assert!((camera.projection()[(1, 1)] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_clip_planes() {
        let perspective = Camera::perspective(PerspectiveParams {
            viewpoint: viewpoint(),
            screen_width: 800.0,
            screen_height: 600.0,
            vertical_fov: 30f32.to_radians(),
            near: 1.0,
            far: 1.0,
        });
        assert!(perspective.view_projection().iter().all(|c| c.is_finite()));

        let orthographic = Camera::orthographic(OrthographicParams {
            viewpoint: viewpoint(),
            screen_width: 800.0,
            screen_height: 600.0,
            viewport_height: 2.0,
            near: 1.0,
            far: 1.0,
        });
        assert!(orthographic.view_projection().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_clip_range() {
        assert_eq!(clip_range(0.1, 100.0), (0.1, 100.0));
        let (near, far) = clip_range(5.0, 2.0);
        assert_eq!(near, 5.0);
        assert!(far > near);
        let (near, far) = clip_range(f32::NAN, f32::INFINITY);
        assert!(near.is_finite() && far.is_finite() && far > near);
    }

    #[test]
    fn test_degenerate_lens_and_box() {
        for fov in [0.0, -1.0, std::f32::consts::PI, f32::NAN] {
            let camera = Camera::perspective(PerspectiveParams {
                viewpoint: viewpoint(),
                screen_width: 800.0,
                screen_height: 600.0,
                vertical_fov: fov,
                near: 0.1,
                far: 100.0,
            });
            assert!(camera.view_projection().iter().all(|c| c.is_finite()));
        }
        for height in [0.0, -2.0, f32::INFINITY] {
            let camera = Camera::orthographic(OrthographicParams {
                viewpoint: viewpoint(),
                screen_width: f32::INFINITY,
                screen_height: 600.0,
                viewport_height: height,
                near: 0.1,
                far: 100.0,
            });
            assert!(camera.view_projection().iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn test_zero_sized_screen() {
        let camera = Camera::perspective(PerspectiveParams {
            viewpoint: viewpoint(),
            screen_width: 0.0,
            screen_height: 0.0,
            vertical_fov: 1.0,
            near: 0.1,
            far: 10.0,
        });
        assert!(camera.view_projection().iter().all(|c| c.is_finite()));
    }
}
