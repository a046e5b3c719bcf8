//! Immutable view model
//!
//! Front ends keep a [`Model`], turn user events into [`Message`]s and call
//! [`update`] to obtain the next model. Geometry and cameras are derived from a
//! model on demand and never cached inside it.

use log::{debug, warn};

use crate::camera::{Camera, OrthographicParams, PerspectiveParams, ProjectionMode};
use crate::catalog::{AxisInfo, Dimension, DEFAULT_DISTANCE};
use crate::error::{Error, Result};
use crate::frame::{assemble, Frame};
use crate::hypercube::build;
use crate::normalize::{focal_point, normalize, Structure};
use crate::orbit::{OrbitState, VERTICAL_FOV_DEGREES};

/// Everything the geometry depends on
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub axes: Vec<AxisInfo>,
    /// Edge length per axis, parallel to `axes`
    pub distances: Vec<f32>,
    /// Number of leading axes that span the hypercube
    pub active: usize,
    pub orbit: OrbitState,
}

/// A single user edit
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A new axis list, e.g. after a font load
    LoadAxes(Vec<AxisInfo>),
    SetValue { index: usize, value: f32 },
    SetDistance { index: usize, distance: f32 },
    SetActive(usize),
    /// Orbit by angles in radians
    Rotate { d_yaw: f32, d_pitch: f32 },
    /// Orbit by a pointer drag in pixels
    Drag { dx: f32, dy: f32, sensitivity: f32 },
    SetPerspective(f32),
}

/// Projection settings that are not part of the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub mode: ProjectionMode,
    /// Vertical field of view in radians
    pub vertical_fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            vertical_fov: VERTICAL_FOV_DEGREES.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Model {
    /// A model showing every axis in `axes`
    pub fn new(axes: Vec<AxisInfo>) -> Self {
        Self {
            distances: vec![DEFAULT_DISTANCE; axes.len()],
            active: axes.len(),
            axes,
            orbit: OrbitState::default(),
        }
    }

    pub fn with_orbit(mut self, orbit: OrbitState) -> Self {
        self.orbit = orbit;
        self
    }

    /// The active dimensions, in axis order
    pub fn dimensions(&self) -> Vec<Dimension> {
        self.axes
            .iter()
            .zip(&self.distances)
            .take(self.active)
            .enumerate()
            .map(|(index, (axis, &distance))| Dimension::from_axis(index, axis).with_distance(distance))
            .collect()
    }

    /// Project the model onto a `width` by `height` pixel screen
    pub fn frame(&self, settings: &CameraSettings, width: f32, height: f32) -> Frame {
        let structure = rebuild_structure(self);
        let camera = rebuild_camera(self, settings, width, height);
        assemble(&structure, &camera, self.orbit.display_scale())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.axes.len() {
            Ok(())
        } else {
            Err(Error::AxisIndex {
                index,
                len: self.axes.len(),
            })
        }
    }
}

/// Apply `message` to `model`, returning the next model.
///
/// Rejected messages leave no trace: the error is returned and `model` stays
/// the current state.
pub fn update(model: &Model, message: Message) -> Result<Model> {
    let mut next = model.clone();

    match message {
        Message::LoadAxes(axes) => {
            if let Some(index) = axes
                .iter()
                .position(|a| ![a.value, a.min, a.max].iter().all(|v| v.is_finite()))
            {
                return Err(rejected("axis list", Error::AxisValue { index }));
            }
            debug!("loading {} axes", axes.len());
            next.distances = vec![DEFAULT_DISTANCE; axes.len()];
            next.active = next.active.min(axes.len());
            next.axes = axes;
        }
        Message::SetValue { index, value } => {
            model
                .check_index(index)
                .and_then(|_| finite_axis(index, value))
                .map_err(|e| rejected("value edit", e))?;
            next.axes[index].value = value;
        }
        Message::SetDistance { index, distance } => {
            model
                .check_index(index)
                .and_then(|_| finite_axis(index, distance))
                .map_err(|e| rejected("distance edit", e))?;
            next.distances[index] = distance.max(0.0);
        }
        Message::SetActive(active) => {
            next.active = active.min(next.axes.len());
            debug!("{} of {} axes active", next.active, next.axes.len());
        }
        Message::Rotate { d_yaw, d_pitch } => {
            finite_orbit(&[d_yaw, d_pitch]).map_err(|e| rejected("rotation", e))?;
            next.orbit = model.orbit.rotated(d_yaw, d_pitch);
        }
        Message::Drag { dx, dy, sensitivity } => {
            finite_orbit(&[dx, dy, sensitivity]).map_err(|e| rejected("drag", e))?;
            next.orbit = model.orbit.dragged(dx, dy, sensitivity);
        }
        Message::SetPerspective(perspective) => {
            finite_orbit(&[perspective]).map_err(|e| rejected("perspective", e))?;
            next.orbit = model.orbit.with_perspective(perspective);
        }
    }

    Ok(next)
}

fn rejected(what: &str, error: Error) -> Error {
    warn!("rejected {}: {}", what, error);
    error
}

fn finite_axis(index: usize, number: f32) -> Result<()> {
    if number.is_finite() {
        Ok(())
    } else {
        Err(Error::AxisValue { index })
    }
}

fn finite_orbit(numbers: &[f32]) -> Result<()> {
    if numbers.iter().all(|n| n.is_finite()) {
        Ok(())
    } else {
        Err(Error::OrbitInput)
    }
}

/// Build the normalized structure for the active axes
pub fn rebuild_structure(model: &Model) -> Structure {
    let dimensions = model.dimensions();
    let structure = normalize(build(&dimensions), &dimensions);
    debug!(
        "rebuilt structure: {} points, {} lines",
        structure.points.len(),
        structure.lines.len()
    );
    structure
}

/// Build the camera orbiting the focal point of the active axes
pub fn rebuild_camera(model: &Model, settings: &CameraSettings, width: f32, height: f32) -> Camera {
    let focal = focal_point(&model.dimensions());
    let viewpoint = model.orbit.viewpoint(focal);

    match settings.mode {
        ProjectionMode::Perspective => Camera::perspective(PerspectiveParams {
            viewpoint,
            screen_width: width,
            screen_height: height,
            vertical_fov: settings.vertical_fov,
            near: settings.near,
            far: settings.far,
        }),
        ProjectionMode::Orthographic => Camera::orthographic(OrthographicParams {
            viewpoint,
            screen_width: width,
            screen_height: height,
            viewport_height: model.orbit.display_scale(),
            near: settings.near,
            far: settings.far,
        }),
    }
}
