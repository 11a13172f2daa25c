use crate::pad::composite::{blend_in_place, RgbaBuffer};
use crate::pad::model::{Color, Point, Stroke};

/// Integer rectangle. `width`/`height` count pixels, so a rectangle built from
/// two equal points is 1x1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DirtyRect {
    pub fn from_points(a: Point, b: Point, pad: i32) -> Self {
        // saturates at the i32 edges instead of wrapping
        let min_x = a.0.min(b.0).saturating_sub(pad);
        let max_x = a.0.max(b.0).saturating_add(pad);
        let min_y = a.1.min(b.1).saturating_sub(pad);
        let max_y = a.1.max(b.1).saturating_add(pad);
        Self {
            x: min_x,
            y: min_y,
            width: max_x.saturating_sub(min_x).saturating_add(1).max(1),
            height: max_y.saturating_sub(min_y).saturating_add(1).max(1),
        }
    }

    pub fn left(self) -> i32 {
        self.x
    }

    pub fn top(self) -> i32 {
        self.y
    }

    /// Inclusive.
    pub fn right(self) -> i32 {
        self.x.saturating_add(self.width - 1)
    }

    /// Inclusive.
    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.height - 1)
    }

    pub fn contains(self, point: Point) -> bool {
        point.0 >= self.left()
            && point.0 <= self.right()
            && point.1 >= self.top()
            && point.1 <= self.bottom()
    }

    pub fn union(self, other: DirtyRect) -> DirtyRect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self
            .x
            .saturating_add(self.width)
            .max(other.x.saturating_add(other.width));
        let max_y = self
            .y
            .saturating_add(self.height)
            .max(other.y.saturating_add(other.height));
        DirtyRect {
            x: min_x,
            y: min_y,
            width: max_x.saturating_sub(min_x).max(1),
            height: max_y.saturating_sub(min_y).max(1),
        }
    }
}

/// Pending repaint request handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repaint {
    Full,
    Region(DirtyRect),
}

impl Repaint {
    pub fn merge(self, other: Repaint) -> Repaint {
        match (self, other) {
            (Repaint::Region(a), Repaint::Region(b)) => Repaint::Region(a.union(b)),
            _ => Repaint::Full,
        }
    }
}

/// Region touched by a segment of the given pen width, with room for round
/// caps and antialiasing bleed.
pub fn segment_dirty_bounds(start: Point, end: Point, pen_width: u32) -> DirtyRect {
    let pad = (pen_width / 2) as i32 + 2;
    DirtyRect::from_points(start, end, pad)
}

/// Strokes `start`..`end` with round caps onto `pixels`. Edge pixels get
/// partial coverage. A width of 0 draws a 1 pixel line.
pub fn draw_segment(pixels: &mut RgbaBuffer, start: Point, end: Point, color: Color, pen_width: u32) {
    if pixels.is_empty() || color.a == 0 {
        return;
    }
    let radius = pen_width.max(1) as f32 * 0.5;
    let pad = (radius + 0.5).ceil() as i64;
    let Some((x0, x1)) = clip_span(start.0, end.0, pad, pixels.width) else {
        return;
    };
    let Some((y0, y1)) = clip_span(start.1, end.1, pad, pixels.height) else {
        return;
    };

    for y in y0..=y1 {
        for x in x0..=x1 {
            let distance = point_segment_distance_sq((x, y), start, end).sqrt() as f32;
            let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
            let alpha = (coverage * color.a as f32).round() as u8;
            if alpha == 0 {
                continue;
            }
            pixels.blend_pixel_at(x, y, color.with_alpha(alpha));
        }
    }
}

/// Replays every stroke: the anchor starts on the stroke's first point and a
/// segment is drawn to each point in turn, the first one included.
pub fn replay_strokes(pixels: &mut RgbaBuffer, strokes: &[Stroke], color: Color, pen_width: u32) {
    for stroke in strokes {
        let Some(mut anchor) = stroke.first() else {
            continue;
        };
        for &point in stroke.points() {
            draw_segment(pixels, anchor, point, color, pen_width);
            anchor = point;
        }
    }
}

/// Solid 2 pixel horizontal guide across the whole width, centred on `y`.
pub fn draw_base_line(pixels: &mut RgbaBuffer, y: i32, color: Color) {
    for row in (y - 1)..=y {
        for x in 0..pixels.width as i32 {
            pixels.blend_pixel_at(x, row, color);
        }
    }
}

pub fn base_line_y(height: u32) -> i32 {
    (height * 2 / 3) as i32
}

/// Builds what the widget shows: background, optional guide, then the surface.
pub fn compose_frame(
    surface: Option<&RgbaBuffer>,
    size: (u32, u32),
    background: Color,
    show_base_line: bool,
) -> RgbaBuffer {
    let mut frame = RgbaBuffer::new(size.0, size.1, background);
    if show_base_line {
        draw_base_line(&mut frame, base_line_y(size.1), Color::LIGHT_GRAY);
    }
    match surface {
        Some(surface) if surface.size() == size => blend_in_place(&mut frame, surface),
        Some(surface) => {
            let mut layer = RgbaBuffer::new(size.0, size.1, Color::TRANSPARENT);
            layer.copy_from(surface, 0, 0);
            blend_in_place(&mut frame, &layer);
        }
        None => {}
    }
    frame
}

/// Inclusive pixel range covered by `a..b` grown by `pad`, limited to `0..len`.
fn clip_span(a: i32, b: i32, pad: i64, len: u32) -> Option<(i32, i32)> {
    let lo = (i64::from(a.min(b)) - pad).max(0);
    let hi = (i64::from(a.max(b)) + pad).min(i64::from(len) - 1);
    // both ends now lie inside the buffer
    (lo <= hi).then(|| (lo as i32, hi as i32))
}

fn point_segment_distance_sq(point: Point, start: Point, end: Point) -> f64 {
    let px = f64::from(point.0);
    let py = f64::from(point.1);
    let x0 = f64::from(start.0);
    let y0 = f64::from(start.1);
    let x1 = f64::from(end.0);
    let y1 = f64::from(end.1);
    let vx = x1 - x0;
    let vy = y1 - y0;
    let wx = px - x0;
    let wy = py - y0;
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f64::EPSILON {
        return wx * wx + wy * wy;
    }
    let t = ((wx * vx + wy * vy) / len_sq).clamp(0.0, 1.0);
    let dx = px - (x0 + vx * t);
    let dy = py - (y0 + vy * t);
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inked(buffer: &RgbaBuffer) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..buffer.height {
            for x in 0..buffer.width {
                if buffer.pixel(x, y).a > 0 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn horizontal_segment_dirty_rect_expands_by_half_width_plus_two() {
        let rect = segment_dirty_bounds((0, 0), (100, 0), 4);
        assert_eq!(
            (rect.left(), rect.top(), rect.right(), rect.bottom()),
            (-4, -4, 104, 4)
        );
    }

    #[test]
    fn dirty_rect_is_normalized_for_reversed_points() {
        let rect = segment_dirty_bounds((20, 30), (10, 5), 3);
        assert_eq!(
            (rect.left(), rect.top(), rect.right(), rect.bottom()),
            (7, 2, 23, 33)
        );
    }

    #[test]
    fn union_covers_both_rectangles() {
        let a = DirtyRect::from_points((0, 0), (1, 1), 0);
        let b = DirtyRect::from_points((10, 5), (12, 6), 0);
        let merged = a.union(b);
        assert_eq!(
            (merged.left(), merged.top(), merged.right(), merged.bottom()),
            (0, 0, 12, 6)
        );
    }

    #[test]
    fn extreme_points_saturate_instead_of_overflowing() {
        let dirty = segment_dirty_bounds((i32::MIN, 0), (i32::MAX, 0), 4);
        assert_eq!((dirty.left(), dirty.top()), (i32::MIN, -4));
        assert_eq!(dirty.bottom(), 4);
        assert_eq!(dirty.union(dirty), dirty);
    }

    #[test]
    fn segment_between_extreme_points_crosses_the_surface() {
        let mut buffer = RgbaBuffer::new(10, 10, Color::TRANSPARENT);
        draw_segment(&mut buffer, (i32::MIN, 5), (i32::MAX, 5), Color::BLUE, 2);
        assert_eq!(buffer.pixel(0, 5), Color::BLUE);
        assert_eq!(buffer.pixel(9, 5), Color::BLUE);
        assert_eq!(buffer.pixel(4, 0).a, 0);
    }

    #[test]
    fn clip_span_limits_to_buffer() {
        assert_eq!(clip_span(-20, -10, 2, 50), None);
        assert_eq!(clip_span(-5, 5, 0, 50), Some((0, 5)));
        assert_eq!(clip_span(40, 60, 3, 50), Some((37, 49)));
        assert_eq!(clip_span(i32::MIN, i32::MAX, 3, 8), Some((0, 7)));
    }

    #[test]
    fn region_merge_with_full_is_full() {
        let region = Repaint::Region(DirtyRect::from_points((0, 0), (1, 1), 0));
        assert_eq!(region.merge(Repaint::Full), Repaint::Full);
        assert!(matches!(region.merge(region), Repaint::Region(_)));
    }

    #[test]
    fn segment_ink_stays_inside_dirty_rect() {
        for width in [0, 1, 2, 4, 5, 9] {
            let mut buffer = RgbaBuffer::new(60, 60, Color::TRANSPARENT);
            let (start, end) = ((12, 40), (45, 18));
            draw_segment(&mut buffer, start, end, Color::BLUE, width);
            let dirty = segment_dirty_bounds(start, end, width);

            let ink = inked(&buffer);
            assert!(!ink.is_empty(), "width {width} drew nothing");
            for (x, y) in ink {
                assert!(dirty.contains((x as i32, y as i32)), "width {width} leaked at {x},{y}");
            }
        }
    }

    #[test]
    fn zero_length_segment_draws_round_dot() {
        let mut buffer = RgbaBuffer::new(20, 20, Color::TRANSPARENT);
        draw_segment(&mut buffer, (10, 10), (10, 10), Color::BLUE, 6);

        assert_eq!(buffer.pixel(10, 10), Color::BLUE);
        assert_eq!(buffer.pixel(12, 10), Color::BLUE);
        assert_eq!(buffer.pixel(10, 8), Color::BLUE);
        // corners of the bounding square stay empty
        assert_eq!(buffer.pixel(13, 13).a, 0);
        assert_eq!(buffer.pixel(7, 7).a, 0);
    }

    #[test]
    fn thin_line_is_one_pixel_wide() {
        let mut buffer = RgbaBuffer::new(10, 5, Color::TRANSPARENT);
        draw_segment(&mut buffer, (1, 2), (8, 2), Color::BLUE, 1);

        for x in 1..=8 {
            assert_eq!(buffer.pixel(x, 2), Color::BLUE);
            assert_eq!(buffer.pixel(x, 1).a, 0);
            assert_eq!(buffer.pixel(x, 3).a, 0);
        }
    }

    #[test]
    fn segment_edges_are_antialiased() {
        let mut buffer = RgbaBuffer::new(20, 20, Color::TRANSPARENT);
        draw_segment(&mut buffer, (2, 10), (17, 10), Color::BLUE, 2);

        assert_eq!(buffer.pixel(8, 10), Color::BLUE);
        let edge = buffer.pixel(8, 11);
        assert!(edge.a > 0 && edge.a < 255, "edge alpha {}", edge.a);
    }

    #[test]
    fn drawing_off_surface_is_bounds_safe() {
        let mut buffer = RgbaBuffer::new(8, 8, Color::TRANSPARENT);
        draw_segment(&mut buffer, (-30, -30), (-20, -25), Color::BLUE, 4);
        assert!(inked(&buffer).is_empty());

        draw_segment(&mut buffer, (-5, 4), (20, 4), Color::BLUE, 2);
        assert_eq!(buffer.pixel(0, 4), Color::BLUE);
        assert_eq!(buffer.pixel(7, 4), Color::BLUE);
    }

    #[test]
    fn frame_layers_background_base_line_and_surface() {
        let mut surface = RgbaBuffer::new(30, 30, Color::TRANSPARENT);
        surface.set_pixel(0, 0, Color::BLUE);

        let frame = compose_frame(Some(&surface), (30, 30), Color::WHITE, true);
        assert_eq!(frame.pixel(0, 0), Color::BLUE);
        assert_eq!(frame.pixel(5, 5), Color::WHITE);
        assert_eq!(frame.pixel(5, 19), Color::LIGHT_GRAY);
        assert_eq!(frame.pixel(5, 20), Color::LIGHT_GRAY);
        assert_eq!(frame.pixel(5, 21), Color::WHITE);

        let hidden = compose_frame(Some(&surface), (30, 30), Color::WHITE, false);
        assert_eq!(hidden.pixel(5, 20), Color::WHITE);
    }
}
