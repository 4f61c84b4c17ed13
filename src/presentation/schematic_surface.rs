// Schematic surface - repaints the schematic view into an SVG file
use crate::application::point_log::Subscription;
use crate::application::schematic_view::SchematicTrackView;
use crate::infrastructure::svg_canvas::SvgCanvas;
use crate::presentation::display_loop::TrackDisplay;
use std::path::PathBuf;

pub struct SchematicSurface {
    view: SchematicTrackView,
    output: PathBuf,
    frames: usize,
}

impl SchematicSurface {
    pub fn new(view: SchematicTrackView, output: PathBuf) -> Self {
        Self {
            view,
            output,
            frames: 0,
        }
    }

    /// Draws a new frame if the view requested one. Returns whether a frame
    /// was written.
    pub fn repaint(&mut self) -> anyhow::Result<bool> {
        if !self.view.take_invalidated() {
            return Ok(false);
        }

        let (width, height) = self.view.size();
        let mut canvas = SvgCanvas::create(&self.output, width, height)?;
        self.view.on_draw(&mut canvas);
        canvas.finish()?;

        self.frames += 1;
        tracing::debug!(
            "Wrote frame {} to {} ({} points, {:?} m/px)",
            self.frames,
            self.output.display(),
            self.view.pixels().len(),
            self.view.projection().and_then(|p| p.scale())
        );
        Ok(true)
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl TrackDisplay for SchematicSurface {
    fn name(&self) -> &'static str {
        "schematic"
    }

    fn subscription_mut(&mut self) -> Option<&mut Subscription> {
        self.view.subscription_mut()
    }

    fn on_store_changed(&mut self) {
        self.view.on_store_changed();
        if let Err(e) = self.repaint() {
            tracing::warn!("Failed to repaint schematic view: {:#}", e);
        }
    }

    fn detach(&mut self) {
        self.view.on_detach();
    }

    fn describe(&self) -> String {
        format!(
            "{} frames written to {}",
            self.frames(),
            self.output.display()
        )
    }
}
