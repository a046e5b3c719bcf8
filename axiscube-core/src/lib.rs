//! Axiscube Core Library - design-space geometry engine
//!
//! Builds the hypercube skeleton spanned by the active axes of a variable font,
//! fits it into a fixed view volume, and projects it to an ordered list of 2D
//! primitives. Everything here is pure computation over plain values; parsing
//! axis descriptors is the only fallible operation.

pub mod axes;
pub mod camera;
pub mod catalog;
pub mod depth;
pub mod error;
pub mod frame;
pub mod hypercube;
pub mod model;
pub mod normalize;
pub mod orbit;
pub mod projection;
pub mod viewpoint;

// Re-export commonly used types
pub use axes::parse_axes;
pub use camera::{Camera, OrthographicParams, PerspectiveParams, ProjectionMode};
pub use catalog::{catalog, AxisInfo, Color, Dimension};
pub use depth::sort_by_distance;
pub use error::{Error, Result};
pub use frame::{assemble, Frame, Primitive, Style};
pub use hypercube::{build, Edge, Segment, Skeleton, Vertex};
pub use model::{rebuild_camera, rebuild_structure, update, CameraSettings, Message, Model};
pub use normalize::{normalize, Structure, VIEW_RADIUS};
pub use orbit::OrbitState;
pub use projection::{project, project_segment, project_triangle, ScreenSegment};
pub use viewpoint::Viewpoint;
