use crate::pad::input::{PointerButton, PointerEvent, PointerPhase, PointerSource};
use crate::pad::model::{Color, Point};
use crate::pad::SignPad;
use eframe::egui::{
    self, Color32, Pos2, Rect, Sense, TextureHandle, TextureOptions, Vec2,
};

/// egui adapter that owns a [`SignPad`], feeds it pointer input and shows its frame.
pub struct PadView {
    pad: SignPad,
    texture: Option<TextureHandle>,
    last_pos: Option<Point>,
    primed: bool,
}

impl PadView {
    pub fn new(pad: SignPad) -> Self {
        Self {
            pad,
            texture: None,
            last_pos: None,
            primed: false,
        }
    }

    pub fn pad(&self) -> &SignPad {
        &self.pad
    }

    pub fn pad_mut(&mut self) -> &mut SignPad {
        &mut self.pad
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, desired: Vec2) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click_and_drag());
        self.pad
            .set_size(rect.width().max(0.0) as u32, rect.height().max(0.0) as u32);

        self.forward_pointer(&response, rect);
        self.refresh_texture(ui.ctx());

        if let Some(texture) = &self.texture {
            ui.painter().image(
                texture.id(),
                rect,
                Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        response
    }

    fn forward_pointer(&mut self, response: &egui::Response, rect: Rect) {
        let source = PointerSource::Mouse(PointerButton::Primary);
        let local = response
            .interact_pointer_pos()
            .map(|pos| to_local(pos, rect));

        if response.drag_started_by(egui::PointerButton::Primary) {
            // egui reports the drag only once it passed the drag threshold
            let origin = response.ctx.input(|i| i.pointer.press_origin());
            if let Some(point) = press_position(origin, local, rect) {
                self.pad
                    .handle_pointer_event(PointerEvent::new(PointerPhase::Pressed, source, point));
                self.last_pos = Some(point);
            }
        }
        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(point) = local {
                if self.last_pos != Some(point) {
                    self.pad
                        .handle_pointer_event(PointerEvent::new(PointerPhase::Moved, source, point));
                    self.last_pos = Some(point);
                }
            }
        }
        if response.drag_stopped_by(egui::PointerButton::Primary) {
            if let Some(point) = local.or(self.last_pos) {
                self.pad
                    .handle_pointer_event(PointerEvent::new(PointerPhase::Released, source, point));
            }
            self.last_pos = None;
        }
        if response.clicked() && !self.pad.is_drawing() {
            if let Some(point) = local {
                self.pad
                    .handle_pointer_event(PointerEvent::new(PointerPhase::Pressed, source, point));
                self.pad
                    .handle_pointer_event(PointerEvent::new(PointerPhase::Released, source, point));
            }
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        if self.pad.take_repaint().is_none() && self.texture.is_some() {
            return;
        }
        if !self.primed {
            let _ = self.pad.on_paint();
            if self.pad.surface().is_some() {
                // start from a transparent surface so the base line shows through
                self.primed = true;
                self.pad.clear(false);
                let _ = self.pad.take_repaint();
            }
        }
        let frame = self.pad.on_paint();
        if frame.is_empty() {
            return;
        }
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.pixels,
        );
        match self.texture.as_mut() {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("signpad", image, TextureOptions::LINEAR));
            }
        }
    }
}

fn press_position(origin: Option<Pos2>, current: Option<Point>, rect: Rect) -> Option<Point> {
    origin.map(|pos| to_local(pos, rect)).or(current)
}

fn to_local(pos: Pos2, rect: Rect) -> Point {
    let offset = pos - rect.min;
    (offset.x.round() as i32, offset.y.round() as i32)
}

pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

pub fn from_color32(color: Color32) -> Color {
    Color::from_rgba_array(color.to_srgba_unmultiplied())
}
