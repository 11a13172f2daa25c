use crate::pad::history::StrokeHistory;
use crate::pad::model::{Point, Stroke};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse(PointerButton),
    Touch,
}

impl PointerSource {
    /// Only the primary button and touch contacts draw.
    pub fn draws(self) -> bool {
        matches!(
            self,
            PointerSource::Mouse(PointerButton::Primary) | PointerSource::Touch
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Pressed,
    Moved,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub source: PointerSource,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, source: PointerSource, position: Point) -> Self {
        Self {
            phase,
            source,
            position,
        }
    }
}

/// Line piece the renderer has to put on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Turns pointer positions into strokes and keeps the completed ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StrokeRecorder {
    anchor: Point,
    drawing: bool,
    working: Stroke,
    history: StrokeHistory,
}

impl StrokeRecorder {
    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn working_stroke(&self) -> &Stroke {
        &self.working
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn press(&mut self, point: Point) {
        if self.drawing {
            // the previous release never arrived; keep what was drawn
            self.finish();
        }
        self.anchor = point;
        self.working = Stroke::new();
        self.working.push(point);
        self.drawing = true;
    }

    pub fn move_to(&mut self, point: Point) -> Option<Segment> {
        if !self.drawing {
            return None;
        }
        Some(self.advance(point))
    }

    pub fn release(&mut self, point: Point) -> Option<Segment> {
        if !self.drawing {
            return None;
        }
        let segment = self.advance(point);
        self.finish();
        Some(segment)
    }

    /// Drops the working stroke and every completed one.
    pub fn reset(&mut self) {
        self.working = Stroke::new();
        self.history.clear();
    }

    fn advance(&mut self, point: Point) -> Segment {
        let segment = Segment {
            from: self.anchor,
            to: point,
        };
        self.working.push(point);
        self.anchor = point;
        segment
    }

    fn finish(&mut self) {
        self.drawing = false;
        let stroke = std::mem::take(&mut self.working);
        self.history.commit(stroke);
    }
}
