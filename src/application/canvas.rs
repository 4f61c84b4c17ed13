// Canvas port: the drawing surface the schematic view renders onto
use crate::application::resources::Bitmap;
use crate::domain::colour::Colour;
use crate::domain::projection::PixelPoint;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintStyle {
    Stroke,
    FillAndStroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Centre,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub colour: Colour,
    pub style: PaintStyle,
    pub text_size: f32,
    pub align: TextAlign,
}

pub trait Canvas {
    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint, paint: &Paint);

    fn draw_bitmap(&mut self, bitmap: &Bitmap, top_left: PixelPoint);

    /// Draws `text` with its baseline at `anchor.y`, aligned on `anchor.x`
    /// according to `paint.align`.
    fn draw_text(&mut self, text: &str, anchor: PixelPoint, paint: &Paint);
}
