//! The 2D line sink every host implements.
use nalgebra::Point2;

use crate::entity::Rgb;

/// A drawing target that can only be cleared and stroked with lines.
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);

    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Rgb, line_width: f32);
}
