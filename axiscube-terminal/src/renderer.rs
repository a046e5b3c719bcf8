//! Cell rasterizer for frames of 2D primitives
//!
//! Primitives are painted in frame order with no depth buffer: later
//! primitives overwrite earlier ones. Frame coordinates are virtual pixels with
//! a bottom-left origin; each terminal cell covers `cell_width` by
//! `cell_height` of them.
use axiscube_core::{Color as AxisColor, Frame, Primitive};
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use std::io::Write;

/// Cells drawn, then cells skipped, along a dashed line
const DASH_PATTERN: (usize, usize) = (2, 2);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Option<Color>,
}

impl Cell {
    const EMPTY: Cell = Cell {
        glyph: ' ',
        color: None,
    };
}

/// Renderer that paints frame primitives into terminal cells
pub struct CellRenderer {
    width: usize,
    height: usize,
    cell_width: f32,
    cell_height: f32,
    cells: Vec<Cell>,
}

impl CellRenderer {
    pub fn new(width: usize, height: usize, cell_width: f32, cell_height: f32) -> Self {
        Self {
            width,
            height,
            cell_width,
            cell_height,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    /// Virtual pixel size of the whole grid
    pub fn pixel_size(&self) -> (f32, f32) {
        (
            self.width as f32 * self.cell_width,
            self.height as f32 * self.cell_height,
        )
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::EMPTY; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    pub fn render_frame(&mut self, frame: &Frame) {
        for primitive in frame.draw_order() {
            match *primitive {
                Primitive::Line {
                    start,
                    end,
                    color,
                    dashed,
                    ..
                } => self.draw_line(start, end, color, dashed),
                Primitive::Point {
                    center,
                    radius,
                    fill,
                    axis,
                    ..
                } => {
                    let glyph = if axis.is_none() { '@' } else { 'o' };
                    self.draw_point(center, radius, fill, glyph);
                }
            }
        }
    }

    /// Glyph at a cell, for inspection
    pub fn glyph_at(&self, column: usize, row: usize) -> Option<char> {
        self.index(column as i64, row as i64)
            .map(|idx| self.cells[idx].glyph)
    }

    fn to_cell(&self, p: Point2<f32>) -> (i64, i64) {
        let column = (p.x / self.cell_width).floor() as i64;
        let row = self.height as i64 - 1 - (p.y / self.cell_height).floor() as i64;
        (column, row)
    }

    fn index(&self, column: i64, row: i64) -> Option<usize> {
        if column < 0 || row < 0 || column >= self.width as i64 || row >= self.height as i64 {
            None
        } else {
            Some(row as usize * self.width + column as usize)
        }
    }

    fn plot(&mut self, column: i64, row: i64, glyph: char, color: Color) {
        if let Some(idx) = self.index(column, row) {
            self.cells[idx] = Cell {
                glyph,
                color: Some(color),
            };
        }
    }

    /// Bresenham line between the cells containing `start` and `end`
    fn draw_line(&mut self, start: Point2<f32>, end: Point2<f32>, color: AxisColor, dashed: bool) {
        let Some(color) = terminal_color(color) else {
            return;
        };
        if !(start.iter().chain(end.iter()).all(|c| c.is_finite())) {
            return;
        }
        let (width, height) = self.pixel_size();
        let Some((start, end)) = clip_segment(start, end, width, height) else {
            return;
        };

        let glyph = line_glyph(end - start);
        let (mut x, mut y) = self.to_cell(start);
        let (x1, y1) = self.to_cell(end);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let period = DASH_PATTERN.0 + DASH_PATTERN.1;

        for step in 0usize.. {
            if !dashed || step % period < DASH_PATTERN.0 {
                self.plot(x, y, glyph, color);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_point(&mut self, center: Point2<f32>, radius: f32, fill: AxisColor, glyph: char) {
        let Some(color) = terminal_color(fill) else {
            return;
        };
        if !(center.x.is_finite() && center.y.is_finite()) {
            return;
        }

        let (column, row) = self.to_cell(center);
        let reach_x = (radius / self.cell_width).floor() as i64;
        let reach_y = (radius / self.cell_height).floor() as i64;
        for r in row - reach_y..=row + reach_y {
            for c in column - reach_x..=column + reach_x {
                self.plot(c, r, glyph, color);
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Color> = None;
        for (i, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            if i > 0 {
                writer.queue(Print("\r\n"))?;
            }
            for cell in row {
                if cell.color != current {
                    match cell.color {
                        Some(color) => writer.queue(SetForegroundColor(color))?,
                        None => writer.queue(ResetColor)?,
                    };
                    current = cell.color;
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Liang-Barsky clip of a segment to `[0, width] x [0, height]`
fn clip_segment(
    start: Point2<f32>,
    end: Point2<f32>,
    width: f32,
    height: f32,
) -> Option<(Point2<f32>, Point2<f32>)> {
    let d = end - start;
    let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
    let bounds = [
        (-d.x, start.x),
        (d.x, width - start.x),
        (-d.y, start.y),
        (d.y, height - start.y),
    ];

    for (p, q) in bounds {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((start + d * t0, start + d * t1))
}

/// Terminal colour for an axis colour; transparent colours are not drawn.
pub fn terminal_color(color: AxisColor) -> Option<Color> {
    if color.is_transparent() {
        None
    } else {
        Some(Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        })
    }
}

/// Glyph approximating the direction of a screen-space line (y up)
fn line_glyph(delta: nalgebra::Vector2<f32>) -> char {
    let (ax, ay) = (delta.x.abs(), delta.y.abs());
    if ay < ax * 0.4 {
        '-'
    } else if ax < ay * 0.4 {
        '|'
    } else if (delta.x > 0.0) == (delta.y > 0.0) {
        '/'
    } else {
        '\\'
    }
}
