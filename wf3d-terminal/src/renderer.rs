//! Character-cell line rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use std::io::Write;
use wf3d_core::{Rgb, Surface};

const BLANK: char = ' ';
/// Glyph for lines at least this wide.
const THICK_GLYPH: char = '#';
const THICK_WIDTH: f32 = 2.0;
/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Rgb,
}

impl Cell {
    const EMPTY: Cell = Cell {
        glyph: BLANK,
        color: Rgb::BLACK,
    };
}

/// A grid of coloured characters that wireframe lines are stroked into
pub struct CellCanvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn glyph_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].glyph)
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].color)
    }

    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.glyph != BLANK).count()
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::EMPTY; width * height];
    }

    fn plot(&mut self, x: i32, y: i32, cell: Cell) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.cells[idx] = cell;
    }

    /// Queue the whole grid, switching colour only when it changes.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Rgb> = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if cell.glyph != BLANK && current != Some(cell.color) {
                    writer.queue(SetForegroundColor(to_terminal_color(cell.color)))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for CellCanvas {
    fn clear(&mut self, width: f32, height: f32) {
        let (width, height) = (width.max(0.0) as usize, height.max(0.0) as usize);
        if (width, height) != (self.width, self.height) {
            self.resize(width, height);
        } else {
            self.cells.fill(Cell::EMPTY);
        }
    }

    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Rgb, line_width: f32) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let max = Point2::new((self.width - 1) as f32, (self.height - 1) as f32);
        let Some((a, b)) = clip_segment(from, to, max) else {
            return;
        };

        let glyph = if line_width >= THICK_WIDTH {
            THICK_GLYPH
        } else {
            slope_glyph(to.x - from.x, to.y - from.y)
        };
        let cell = Cell { glyph, color };

        // Bresenham between the clipped, rounded endpoints
        let (mut x0, mut y0) = (a.x.round() as i32, a.y.round() as i32);
        let (x1, y1) = (b.x.round() as i32, b.y.round() as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, cell);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

fn to_terminal_color(color: Rgb) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Pick a glyph that follows the on-screen direction of a segment
fn slope_glyph(dx: f32, dy: f32) -> char {
    let run = dx.abs();
    let rise = dy.abs() * CELL_ASPECT;
    if rise < run * 0.5 {
        '-'
    } else if run < rise * 0.5 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        // Screen Y grows downward
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of a segment to the box `[0, max.x] x [0, max.y]`
fn clip_segment(from: Point2<f32>, to: Point2<f32>, max: Point2<f32>) -> Option<(Point2<f32>, Point2<f32>)> {
    if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
        return None;
    }

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;

    for (p, q) in [
        (-dx, from.x),
        (dx, max.x - from.x),
        (-dy, from.y),
        (dy, max.y - from.y),
    ] {
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

    Some((
        Point2::new(from.x + t0 * dx, from.y + t0 * dy),
        Point2::new(from.x + t1 * dx, from.y + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = CellCanvas::new(20, 10);
        canvas.draw_line(Point2::new(2.0, 5.0), Point2::new(8.0, 5.0), Rgb::WHITE, 1.0);
        assert_eq!(canvas.filled_cells(), 7);
        assert_eq!(canvas.glyph_at(2, 5), Some('-'));
        assert_eq!(canvas.glyph_at(8, 5), Some('-'));
        assert_eq!(canvas.color_at(5, 5), Some(Rgb::WHITE));
    }

    #[test]
    fn test_slope_glyphs() {
        assert_eq!(slope_glyph(10.0, 0.0), '-');
        assert_eq!(slope_glyph(0.0, 10.0), '|');
        assert_eq!(slope_glyph(4.0, 2.0), '\\');
        assert_eq!(slope_glyph(4.0, -2.0), '/');
    }

    #[test]
    fn test_thick_lines_use_heavy_glyph() {
        let mut canvas = CellCanvas::new(10, 10);
        canvas.draw_line(Point2::new(0.0, 0.0), Point2::new(0.0, 9.0), Rgb::GOLD, 3.0);
        assert_eq!(canvas.glyph_at(0, 4), Some('#'));
        assert_eq!(canvas.filled_cells(), 10);
    }

    #[test]
    fn test_far_off_screen_segment_is_clipped() {
        // Near-plane clamping produces coordinates in the hundreds of thousands
        let mut canvas = CellCanvas::new(80, 24);
        canvas.draw_line(
            Point2::new(-400_000.0, 12.0),
            Point2::new(400_000.0, 12.0),
            Rgb::WHITE,
            1.0,
        );
        assert_eq!(canvas.filled_cells(), 80);
    }

    #[test]
    fn test_segment_outside_is_dropped() {
        let mut canvas = CellCanvas::new(80, 24);
        canvas.draw_line(Point2::new(-10.0, -5.0), Point2::new(-1.0, 30.0), Rgb::WHITE, 1.0);
        canvas.draw_line(Point2::new(f32::NAN, 0.0), Point2::new(5.0, 5.0), Rgb::WHITE, 1.0);
        assert_eq!(canvas.filled_cells(), 0);
    }

    #[test]
    fn test_clear_resizes_and_blanks() {
        let mut canvas = CellCanvas::new(10, 10);
        canvas.draw_line(Point2::new(0.0, 0.0), Point2::new(9.0, 9.0), Rgb::WHITE, 1.0);
        canvas.clear(10.0, 10.0);
        assert_eq!(canvas.filled_cells(), 0);
        canvas.clear(40.0, 12.0);
        assert_eq!(canvas.size(), (40, 12));
    }

    #[test]
    fn test_draw_emits_rows() {
        let mut canvas = CellCanvas::new(4, 2);
        canvas.draw_line(Point2::new(0.0, 0.0), Point2::new(3.0, 0.0), Rgb::WHITE, 1.0);
        let mut out = Vec::new();
        canvas.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("----"));
    }
}
