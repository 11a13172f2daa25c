use crate::pad::composite::RgbaBuffer;
use crate::pad::export::{self, ExportError};
use crate::pad::history::StrokeHistory;
use crate::pad::input::{PointerEvent, PointerPhase, Segment, StrokeRecorder};
use crate::pad::model::{Color, PenStyle, Point, Stroke};
use crate::pad::property::{ChangeNotifier, Property, PropertyChange, SubscriptionId};
use crate::pad::render::{
    compose_frame, draw_segment, replay_strokes, segment_dirty_bounds, Repaint,
};
use crate::pad::settings::PadSettings;
use crate::pad::surface::RasterSurface;
use std::path::Path;

/// Signature capture widget.
///
/// The host forwards pointer input in widget-local coordinates, keeps the
/// widget informed of its visible size, and calls [`SignPad::on_paint`] when
/// [`SignPad::take_repaint`] reports pending work.
#[derive(Debug)]
pub struct SignPad {
    size: (u32, u32),
    surface: Option<RasterSurface>,
    recorder: StrokeRecorder,
    pen_color: Property<Color>,
    pen_width: Property<u32>,
    show_base_line: Property<bool>,
    redraw_on_pen_change: Property<bool>,
    background_color: Property<Color>,
    notifier: ChangeNotifier,
    repaint: Option<Repaint>,
}

impl Default for SignPad {
    fn default() -> Self {
        Self::from_settings(&PadSettings::default())
    }
}

impl SignPad {
    pub fn new(width: u32, height: u32) -> Self {
        let mut pad = Self::default();
        pad.size = (width, height);
        pad
    }

    pub fn from_settings(settings: &PadSettings) -> Self {
        Self {
            size: (0, 0),
            surface: None,
            recorder: StrokeRecorder::default(),
            pen_color: Property::new(settings.pen_color),
            pen_width: Property::new(settings.pen_width),
            show_base_line: Property::new(settings.show_base_line),
            redraw_on_pen_change: Property::new(settings.redraw_on_pen_change),
            background_color: Property::new(settings.background_color),
            notifier: ChangeNotifier::default(),
            repaint: None,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Records the visible size. The surface follows on the next paint or draw.
    pub fn set_size(&mut self, width: u32, height: u32) {
        if self.size == (width, height) {
            return;
        }
        self.size = (width, height);
        self.request_repaint(Repaint::Full);
    }

    pub fn pen_color(&self) -> Color {
        *self.pen_color.get()
    }

    pub fn pen_width(&self) -> u32 {
        *self.pen_width.get()
    }

    pub fn pen(&self) -> PenStyle {
        PenStyle {
            color: self.pen_color(),
            width: self.pen_width(),
        }
    }

    pub fn show_base_line(&self) -> bool {
        *self.show_base_line.get()
    }

    pub fn redraw_on_pen_change(&self) -> bool {
        *self.redraw_on_pen_change.get()
    }

    pub fn background_color(&self) -> Color {
        *self.background_color.get()
    }

    pub fn set_pen_color(&mut self, color: Color) {
        if !self.pen_color.replace(color) {
            return;
        }
        self.notifier.emit(PropertyChange::PenColor(color));
        if self.redraw_on_pen_change() {
            self.redraw();
        }
    }

    pub fn set_pen_width(&mut self, width: u32) {
        if !self.pen_width.replace(width) {
            return;
        }
        self.notifier.emit(PropertyChange::PenWidth(width));
        if self.redraw_on_pen_change() {
            self.redraw();
        }
    }

    pub fn set_show_base_line(&mut self, show: bool) {
        if !self.show_base_line.replace(show) {
            return;
        }
        self.notifier.emit(PropertyChange::ShowBaseLine(show));
        self.request_repaint(Repaint::Full);
    }

    pub fn set_redraw_on_pen_change(&mut self, redraw: bool) {
        if !self.redraw_on_pen_change.replace(redraw) {
            return;
        }
        self.notifier.emit(PropertyChange::RedrawOnPenChange(redraw));
    }

    pub fn set_background_color(&mut self, color: Color) {
        if !self.background_color.replace(color) {
            return;
        }
        self.notifier.emit(PropertyChange::BackgroundColor(color));
        self.request_repaint(Repaint::Full);
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&PropertyChange) + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn history(&self) -> &StrokeHistory {
        self.recorder.history()
    }

    pub fn working_stroke(&self) -> &Stroke {
        self.recorder.working_stroke()
    }

    pub fn is_drawing(&self) -> bool {
        self.recorder.is_drawing()
    }

    /// Current surface pixels, if one has been allocated.
    pub fn surface(&self) -> Option<&RgbaBuffer> {
        self.surface.as_ref().map(RasterSurface::buffer)
    }

    /// Hands the accumulated repaint request to the host.
    pub fn take_repaint(&mut self) -> Option<Repaint> {
        self.repaint.take()
    }

    pub fn on_pointer_down(&mut self, point: Point) {
        self.recorder.press(point);
    }

    pub fn on_pointer_move(&mut self, point: Point) {
        if let Some(segment) = self.recorder.move_to(point) {
            self.draw_line(segment);
        }
    }

    pub fn on_pointer_up(&mut self, point: Point) {
        if let Some(segment) = self.recorder.release(point) {
            self.draw_line(segment);
        }
    }

    /// Routes a host event. Returns whether the pad consumed it.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        if !event.source.draws() {
            return false;
        }
        match event.phase {
            PointerPhase::Pressed => {
                self.on_pointer_down(event.position);
                true
            }
            PointerPhase::Moved if self.is_drawing() => {
                self.on_pointer_move(event.position);
                true
            }
            PointerPhase::Released if self.is_drawing() => {
                self.on_pointer_up(event.position);
                true
            }
            PointerPhase::Moved | PointerPhase::Released => false,
        }
    }

    /// Produces the frame to show: background, optional base line, drawing.
    pub fn on_paint(&mut self) -> RgbaBuffer {
        self.ensure_surface();
        compose_frame(
            self.surface(),
            self.size,
            self.background_color(),
            self.show_base_line(),
        )
    }

    /// Wipes the surface. With `clear_cached` the strokes are forgotten too.
    pub fn clear(&mut self, clear_cached: bool) {
        self.ensure_surface();
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
        self.request_repaint(Repaint::Full);

        if clear_cached {
            self.recorder.reset();
        }
    }

    /// Repaints every recorded stroke with the current pen.
    pub fn redraw(&mut self) {
        self.clear(false);

        if self.recorder.history().is_empty() {
            tracing::info!("signpad redraw requested with nothing to draw");
            return;
        }

        self.ensure_surface();
        let pen = self.pen();
        if let Some(surface) = self.surface.as_mut() {
            replay_strokes(
                surface.buffer_mut(),
                self.recorder.history().strokes(),
                pen.color,
                pen.width,
            );
        }
        tracing::debug!(
            strokes = self.recorder.history().len(),
            "signpad redrew stroke history"
        );
    }

    /// Composes the exported image without writing it anywhere.
    pub fn export_image(
        &mut self,
        add_background: bool,
        crop_to_content: bool,
    ) -> Result<RgbaBuffer, ExportError> {
        self.ensure_surface();
        let Some(surface) = self.surface() else {
            return Err(ExportError::ZeroArea {
                width: self.size.0,
                height: self.size.1,
            });
        };
        let background = add_background.then(|| self.background_color());
        export::render_export(surface, self.history(), background, crop_to_content)
    }

    pub fn export(
        &mut self,
        path: &Path,
        add_background: bool,
        crop_to_content: bool,
    ) -> Result<(), ExportError> {
        let image = self.export_image(add_background, crop_to_content)?;
        export::write_png(&image, path)?;
        tracing::info!(
            path = %path.display(),
            width = image.width,
            height = image.height,
            "signpad image saved"
        );
        Ok(())
    }

    /// Boolean form of [`SignPad::export`]; failures are logged.
    pub fn save_image(&mut self, path: &Path, add_background: bool, crop_to_content: bool) -> bool {
        match self.export(path, add_background, crop_to_content) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "signpad save failed");
                false
            }
        }
    }

    fn draw_line(&mut self, segment: Segment) {
        self.ensure_surface();
        let pen = self.pen();
        if let Some(surface) = self.surface.as_mut() {
            draw_segment(
                surface.buffer_mut(),
                segment.from,
                segment.to,
                pen.color,
                pen.width,
            );
        }
        self.request_repaint(Repaint::Region(segment_dirty_bounds(
            segment.from,
            segment.to,
            pen.width,
        )));
    }

    fn ensure_surface(&mut self) {
        let size = self.size;
        if size.0 == 0 || size.1 == 0 {
            return;
        }
        match self.surface.as_mut() {
            Some(surface) => {
                if surface.size() != size {
                    tracing::debug!(from = ?surface.size(), to = ?size, "signpad surface resize");
                    surface.ensure_size(size);
                }
            }
            None => {
                self.surface = Some(RasterSurface::new(size, self.background_color()));
            }
        }
    }

    fn request_repaint(&mut self, repaint: Repaint) {
        self.repaint = Some(match self.repaint {
            Some(pending) => pending.merge(repaint),
            None => repaint,
        });
    }
}
