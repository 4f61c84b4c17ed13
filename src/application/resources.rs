// Display resources handed to the views at construction time
use crate::application::canvas::{Paint, PaintStyle, TextAlign};
use crate::domain::colour::Colour;

/// Symbolic bitmap handle with its pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub name: String,
    pub width: i32,
    pub height: i32,
}

impl Bitmap {
    pub fn new(name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayResources {
    pub marker: Bitmap,
    pub compass: Bitmap,
    pub north_label: String,
    pub metres_label: String,
    pub track_colour: Colour,
    pub track_style: PaintStyle,
    pub text_colour: Colour,
    pub text_size: f32,
    pub text_align: TextAlign,
}

impl DisplayResources {
    pub fn track_paint(&self) -> Paint {
        Paint {
            colour: self.track_colour,
            style: self.track_style,
            text_size: self.text_size,
            align: TextAlign::Left,
        }
    }

    /// Paint for labels and the scale bar.
    pub fn text_paint(&self) -> Paint {
        Paint {
            colour: self.text_colour,
            style: PaintStyle::Stroke,
            text_size: self.text_size,
            align: self.text_align,
        }
    }
}

impl Default for DisplayResources {
    fn default() -> Self {
        Self {
            marker: Bitmap::new("marker", 16, 16),
            compass: Bitmap::new("compass", 32, 32),
            north_label: "N".to_string(),
            metres_label: "m".to_string(),
            track_colour: Colour::BLACK,
            track_style: PaintStyle::FillAndStroke,
            text_colour: Colour::BLACK,
            text_size: 12.0,
            text_align: TextAlign::Centre,
        }
    }
}
