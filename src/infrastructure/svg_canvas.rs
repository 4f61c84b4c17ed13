// SVG canvas - renders schematic frames through the plotters SVG backend
use crate::application::canvas::{Canvas, Paint, PaintStyle, TextAlign};
use crate::application::resources::Bitmap;
use crate::domain::colour::Colour;
use crate::domain::projection::PixelPoint;
use anyhow::Context;
use plotters::prelude::SVGBackend;
use plotters::style::{Color, FontDesc, FontFamily, FontStyle, RGBColor};
use plotters_backend::text_anchor::{HPos, Pos, VPos};
use plotters_backend::{BackendCoord, DrawingBackend, DrawingErrorKind};
use std::path::Path;

/// Canvas backed by an SVG document. Drawing errors are kept until
/// [`SvgCanvas::finish`].
pub struct SvgCanvas<'a> {
    backend: SVGBackend<'a>,
    failure: Option<DrawingErrorKind<std::io::Error>>,
}

fn backend_size(width: i32, height: i32) -> (u32, u32) {
    (
        u32::try_from(width).unwrap_or_default(),
        u32::try_from(height).unwrap_or_default(),
    )
}

fn backend_coord(point: PixelPoint) -> BackendCoord {
    (point.x, point.y)
}

fn rgb(colour: Colour) -> RGBColor {
    RGBColor(colour.red, colour.green, colour.blue)
}

impl<'a> SvgCanvas<'a> {
    /// Canvas whose document is written to `path` on [`SvgCanvas::finish`].
    pub fn create(path: &'a Path, width: i32, height: i32) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        Ok(Self::with_backend(SVGBackend::new(path, backend_size(width, height))))
    }

    /// Canvas whose document is written into `buffer`.
    #[cfg(test)]
    pub fn in_memory(buffer: &'a mut String, width: i32, height: i32) -> Self {
        Self::with_backend(SVGBackend::with_string(buffer, backend_size(width, height)))
    }

    fn with_backend(backend: SVGBackend<'a>) -> Self {
        Self {
            backend,
            failure: None,
        }
    }

    /// Completes the document and reports the first drawing error, if any.
    pub fn finish(mut self) -> anyhow::Result<()> {
        if let Some(failure) = self.failure.take() {
            return Err(anyhow::Error::new(failure).context("Failed to draw SVG frame"));
        }

        self.backend
            .present()
            .context("Failed to write SVG frame")
    }

    fn record(&mut self, result: Result<(), DrawingErrorKind<std::io::Error>>) {
        if let Err(e) = result {
            tracing::warn!("SVG drawing failed: {}", e);
            self.failure.get_or_insert(e);
        }
    }
}

impl Canvas for SvgCanvas<'_> {
    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint, paint: &Paint) {
        let width = match paint.style {
            PaintStyle::Stroke => 1,
            PaintStyle::FillAndStroke => 2,
        };
        let style = rgb(paint.colour).stroke_width(width);

        let result = self
            .backend
            .draw_line(backend_coord(from), backend_coord(to), &style);
        self.record(result);
    }

    // Bitmaps are symbolic handles; the frame shows their outline.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, top_left: PixelPoint) {
        let style = rgb(Colour::BLACK).stroke_width(1);
        let bottom_right = top_left.offset(bitmap.width, bitmap.height);

        let result = self.backend.draw_rect(
            backend_coord(top_left),
            backend_coord(bottom_right),
            &style,
            false,
        );
        self.record(result);
    }

    fn draw_text(&mut self, text: &str, anchor: PixelPoint, paint: &Paint) {
        let h_pos = match paint.align {
            TextAlign::Left => HPos::Left,
            TextAlign::Centre => HPos::Center,
            TextAlign::Right => HPos::Right,
        };
        let style = FontDesc::new(
            FontFamily::SansSerif,
            f64::from(paint.text_size),
            FontStyle::Normal,
        )
        .color(&rgb(paint.colour))
        .pos(Pos::new(h_pos, VPos::Bottom));

        let result = self.backend.draw_text(text, &style, backend_coord(anchor));
        self.record(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint(align: TextAlign) -> Paint {
        Paint {
            colour: Colour::BLUE,
            style: PaintStyle::FillAndStroke,
            text_size: 12.0,
            align,
        }
    }

    #[test]
    fn test_svg_document() {
        let mut document = String::new();
        let mut canvas = SvgCanvas::in_memory(&mut document, 200, 100);
        canvas.draw_line(
            PixelPoint::new(5, 10),
            PixelPoint::new(50, 60),
            &paint(TextAlign::Left),
        );
        canvas.draw_bitmap(&Bitmap::new("marker", 16, 16), PixelPoint::new(42, 42));
        canvas.draw_text("<5m>", PixelPoint::new(170, 27), &paint(TextAlign::Centre));
        canvas.draw_text("N", PixelPoint::new(21, 38), &paint(TextAlign::Right));
        canvas.finish().unwrap();

        assert!(document.contains("<svg"));
        assert!(document.contains("width=\"200\""));
        assert!(document.contains("height=\"100\""));
        assert_eq!(document.matches("<line").count(), 1);
        assert_eq!(document.matches("<rect").count(), 1);
        assert!(document.contains("&lt;5m&gt;"));
        assert!(document.contains("text-anchor=\"middle\""));
        assert!(document.contains("text-anchor=\"end\""));
        assert!(document.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_write_frame_to_file() {
        let dir = std::env::temp_dir().join(format!("track-display-svg-{}", std::process::id()));
        let path = dir.join("nested").join("frame.svg");

        let mut canvas = SvgCanvas::create(&path, 64, 48).unwrap();
        canvas.draw_line(
            PixelPoint::new(0, 0),
            PixelPoint::new(64, 48),
            &paint(TextAlign::Left),
        );
        canvas.finish().unwrap();

        let document = std::fs::read_to_string(&path).unwrap();
        assert!(document.contains("<line"));
        let _ = std::fs::remove_dir_all(dir);
    }
}
