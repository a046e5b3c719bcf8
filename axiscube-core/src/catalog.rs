//! Axis catalog
//!
//! Maps the axis list handed over by a font loader onto [`Dimension`]s: a unit
//! direction in 3D, an edge length and a display colour, all looked up by the
//! axis position in the list.

use nalgebra::Vector3;

/// Edge length assigned to every freshly catalogued axis.
pub const DEFAULT_DISTANCE: f32 = 1.0;

/// Preset axis directions. Entries are normalized on lookup.
pub const DIRECTIONS: [[f32; 3]; 8] = [
    [1.0, 0.0, 0.0],
    [0.0, 0.0, -1.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [0.5, 1.0, -0.25],
];

/// Preset axis colours, parallel to [`DIRECTIONS`].
pub const PALETTE: [Color; 8] = [
    Color::rgb(0xe6, 0x39, 0x46),
    Color::rgb(0x2a, 0x9d, 0x8f),
    Color::rgb(0x45, 0x7b, 0x9d),
    Color::rgb(0xf4, 0xa2, 0x61),
    Color::rgb(0x9b, 0x5d, 0xe5),
    Color::rgb(0xe9, 0xc4, 0x6a),
    Color::rgb(0x06, 0xd6, 0xa0),
    Color::rgb(0xf1, 0x5b, 0xb5),
];

const GOLDEN_ANGLE: f32 = 2.399_963_2;
const INV_PHI: f32 = 0.618_034;

/// An RGBA display colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// CSS representation, `transparent` for a fully transparent colour
    pub fn to_css(&self) -> String {
        if self.is_transparent() {
            "transparent".to_string()
        } else {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        }
    }
}

/// Axis metadata as supplied by the font loader
#[derive(Debug, Clone, PartialEq)]
pub struct AxisInfo {
    pub name: String,
    pub title: String,
    pub value: f32,
    pub min: f32,
    pub max: f32,
}

impl AxisInfo {
    pub fn new(name: impl Into<String>, title: impl Into<String>, value: f32, min: f32, max: f32) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            value,
            min,
            max,
        }
    }
}

/// One design axis mapped into 3D
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub index: usize,
    pub direction: Vector3<f32>,
    pub distance: f32,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub color: Color,
    pub name: String,
    pub title: String,
}

impl Dimension {
    /// Build the dimension for axis `index` with the preset direction and colour.
    pub fn from_axis(index: usize, axis: &AxisInfo) -> Self {
        Self {
            index,
            direction: direction_for(index),
            distance: DEFAULT_DISTANCE,
            value: axis.value,
            min: axis.min,
            max: axis.max,
            color: color_for(index),
            name: axis.name.clone(),
            title: axis.title.clone(),
        }
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.value = value;
        self
    }

    /// Position of `value` within `[min, max]`; not clamped.
    ///
    /// A collapsed range (`max == min`) yields 0 so the axis contributes no
    /// offset instead of poisoning the structure with NaN.
    pub fn normalized_value(&self) -> f32 {
        let t = (self.value - self.min) / (self.max - self.min);
        if t.is_finite() {
            t
        } else {
            0.0
        }
    }

    /// Full edge vector of this axis
    pub fn offset(&self) -> Vector3<f32> {
        self.direction * self.distance
    }

    /// Contribution of the current value along this axis
    pub fn value_offset(&self) -> Vector3<f32> {
        self.direction * (self.distance * self.normalized_value())
    }
}

/// Map an axis list onto dimensions, in list order.
pub fn catalog(axes: &[AxisInfo]) -> Vec<Dimension> {
    axes.iter()
        .enumerate()
        .map(|(index, axis)| Dimension::from_axis(index, axis))
        .collect()
}

/// Unit direction for axis `index`.
///
/// Beyond the preset table, directions are spread over the sphere along a
/// golden-angle spiral so that extra axes stay distinct.
pub fn direction_for(index: usize) -> Vector3<f32> {
    match DIRECTIONS.get(index) {
        Some(&[x, y, z]) => Vector3::new(x, y, z).normalize(),
        None => fallback_direction(index - DIRECTIONS.len()),
    }
}

fn fallback_direction(k: usize) -> Vector3<f32> {
    let k = k as f32;
    let h = ((k + 0.5) * INV_PHI).fract();
    let y = 1.0 - 2.0 * h;
    let r = (1.0 - y * y).max(0.0).sqrt();
    let theta = k * GOLDEN_ANGLE;
    Vector3::new(r * theta.cos(), y, r * theta.sin())
}

/// Display colour for axis `index`, transparent beyond the palette.
pub fn color_for(index: usize) -> Color {
    PALETTE.get(index).copied().unwrap_or(Color::TRANSPARENT)
}
