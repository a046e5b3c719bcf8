//! Axiscube Web - WASM bindings for browser hosts
//!
//! The host page owns drawing. It feeds axis descriptors and user edits into a
//! [`WebView`], calls [`WebView::render`] for a viewport size, and then reads
//! the primitives back by index in draw order.

use axiscube_core::{
    parse_axes, update, CameraSettings, Frame, Message, Model, Primitive, ProjectionMode,
};
use log::debug;
use wasm_bindgen::prelude::*;

/// Primitive kinds as seen from JavaScript
pub const KIND_LINE: u8 = 0;
pub const KIND_DASHED_LINE: u8 = 1;
pub const KIND_VERTEX: u8 = 2;
pub const KIND_VALUE: u8 = 3;

#[wasm_bindgen]
pub struct WebView {
    model: Model,
    settings: CameraSettings,
    frame: Option<Frame>,
}

impl WebView {
    fn apply(&mut self, message: Message) -> axiscube_core::Result<()> {
        self.model = update(&self.model, message)?;
        self.frame = None;
        Ok(())
    }

    fn load(&mut self, descriptor: &str) -> axiscube_core::Result<()> {
        let axes = parse_axes(descriptor)?;
        debug!("web view loaded {} axes", axes.len());
        self.model = Model::new(axes).with_orbit(self.model.orbit);
        self.frame = None;
        Ok(())
    }

    fn primitive(&self, index: usize) -> Option<&Primitive> {
        self.frame.as_ref().and_then(|f| f.primitives.get(index))
    }
}

fn to_js(error: axiscube_core::Error) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[wasm_bindgen]
impl WebView {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebView {
        WebView {
            model: Model::default(),
            settings: CameraSettings::default(),
            frame: None,
        }
    }

    /// Replace the axis list from a descriptor, activating every axis
    #[wasm_bindgen(js_name = loadAxes)]
    pub fn load_axes(&mut self, descriptor: &str) -> Result<(), JsValue> {
        self.load(descriptor).map_err(to_js)
    }

    #[wasm_bindgen(js_name = axisCount)]
    pub fn axis_count(&self) -> usize {
        self.model.axes.len()
    }

    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&mut self, index: usize, value: f32) -> Result<(), JsValue> {
        self.apply(Message::SetValue { index, value }).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setDistance)]
    pub fn set_distance(&mut self, index: usize, distance: f32) -> Result<(), JsValue> {
        self.apply(Message::SetDistance { index, distance }).map_err(to_js)
    }

    /// Number of active axes; negative counts clamp to zero
    #[wasm_bindgen(js_name = setActive)]
    pub fn set_active(&mut self, active: i32) -> Result<(), JsValue> {
        let active = usize::try_from(active).unwrap_or(0);
        self.apply(Message::SetActive(active)).map_err(to_js)
    }

    /// Orbit by a pointer drag; rejects non-finite input
    pub fn drag(&mut self, dx: f32, dy: f32, sensitivity: f32) -> Result<(), JsValue> {
        self.apply(Message::Drag { dx, dy, sensitivity }).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setPerspective)]
    pub fn set_perspective(&mut self, perspective: f32) -> Result<(), JsValue> {
        self.apply(Message::SetPerspective(perspective)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setOrthographic)]
    pub fn set_orthographic(&mut self, orthographic: bool) {
        self.settings.mode = if orthographic {
            ProjectionMode::Orthographic
        } else {
            ProjectionMode::Perspective
        };
        self.frame = None;
    }

    /// Project the current model for a viewport; returns the primitive count
    pub fn render(&mut self, width: f32, height: f32) -> usize {
        let frame = self.model.frame(&self.settings, width, height);
        let count = frame.primitives.len();
        self.frame = Some(frame);
        count
    }

    /// One of the `KIND_*` constants, or 255 when out of range
    #[wasm_bindgen(js_name = primitiveKind)]
    pub fn primitive_kind(&self, index: usize) -> u8 {
        match self.primitive(index) {
            Some(Primitive::Line { dashed: false, .. }) => KIND_LINE,
            Some(Primitive::Line { dashed: true, .. }) => KIND_DASHED_LINE,
            Some(Primitive::Point { axis: Some(_), .. }) => KIND_VERTEX,
            Some(Primitive::Point { axis: None, .. }) => KIND_VALUE,
            None => u8::MAX,
        }
    }

    /// `[x1, y1, x2, y2, stroke_width]` for lines, `[cx, cy, radius]` for points
    #[wasm_bindgen(js_name = primitiveGeometry)]
    pub fn primitive_geometry(&self, index: usize) -> Vec<f32> {
        match self.primitive(index) {
            Some(Primitive::Line {
                start,
                end,
                stroke_width,
                ..
            }) => vec![start.x, start.y, end.x, end.y, *stroke_width],
            Some(Primitive::Point { center, radius, .. }) => vec![center.x, center.y, *radius],
            None => Vec::new(),
        }
    }

    /// CSS stroke colour of line primitives, fill colour of points
    #[wasm_bindgen(js_name = primitiveColor)]
    pub fn primitive_color(&self, index: usize) -> String {
        match self.primitive(index) {
            Some(Primitive::Line { color, .. }) => color.to_css(),
            Some(Primitive::Point { fill, .. }) => fill.to_css(),
            None => String::new(),
        }
    }

    #[wasm_bindgen(js_name = primitiveStroke)]
    pub fn primitive_stroke(&self, index: usize) -> String {
        match self.primitive(index) {
            Some(Primitive::Line { color, .. }) => color.to_css(),
            Some(Primitive::Point { stroke, .. }) => stroke.to_css(),
            None => String::new(),
        }
    }

    /// Originating axis index, -1 for the value vertex or out of range
    #[wasm_bindgen(js_name = primitiveAxis)]
    pub fn primitive_axis(&self, index: usize) -> i32 {
        let axis = match self.primitive(index) {
            Some(Primitive::Line { axis, .. }) => Some(*axis),
            Some(Primitive::Point { axis, .. }) => *axis,
            None => None,
        };
        axis.and_then(|a| i32::try_from(a).ok()).unwrap_or(-1)
    }
}

impl Default for WebView {
    fn default() -> Self {
        Self::new()
    }
}
