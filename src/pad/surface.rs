use crate::pad::composite::RgbaBuffer;
use crate::pad::model::Color;

/// Off-screen pixels backing everything drawn on the pad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    buffer: RgbaBuffer,
    #[cfg(test)]
    allocation_count: usize,
}

impl RasterSurface {
    pub fn new(size: (u32, u32), fill: Color) -> Self {
        Self {
            buffer: RgbaBuffer::new(size.0, size.1, fill),
            #[cfg(test)]
            allocation_count: 1,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.buffer.size()
    }

    /// Reallocates to `size` keeping existing pixels anchored at the origin.
    /// New area is transparent. Returns whether a reallocation happened.
    pub fn ensure_size(&mut self, size: (u32, u32)) -> bool {
        if self.buffer.size() == size {
            return false;
        }
        let mut resized = RgbaBuffer::new(size.0, size.1, Color::TRANSPARENT);
        resized.copy_from(&self.buffer, 0, 0);
        self.buffer = resized;
        #[cfg(test)]
        {
            self.allocation_count += 1;
        }
        true
    }

    pub fn clear(&mut self) {
        self.buffer.fill(Color::TRANSPARENT);
    }

    pub fn buffer(&self) -> &RgbaBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut RgbaBuffer {
        &mut self.buffer
    }

    #[cfg(test)]
    pub fn allocation_count(&self) -> usize {
        self.allocation_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_size_is_idempotent() {
        let mut surface = RasterSurface::new((4, 4), Color::WHITE);
        surface.buffer_mut().set_pixel(1, 1, Color::BLUE);

        assert!(surface.ensure_size((6, 5)));
        let snapshot = surface.clone();
        assert!(!surface.ensure_size((6, 5)));

        assert_eq!(surface.buffer(), snapshot.buffer());
        assert_eq!(surface.allocation_count(), 2);
    }

    #[test]
    fn growing_keeps_content_at_origin_and_new_area_transparent() {
        let mut surface = RasterSurface::new((2, 2), Color::WHITE);
        surface.buffer_mut().set_pixel(1, 1, Color::BLUE);
        surface.ensure_size((3, 3));

        assert_eq!(surface.buffer().pixel(0, 0), Color::WHITE);
        assert_eq!(surface.buffer().pixel(1, 1), Color::BLUE);
        assert_eq!(surface.buffer().pixel(2, 0), Color::TRANSPARENT);
        assert_eq!(surface.buffer().pixel(0, 2), Color::TRANSPARENT);
    }

    #[test]
    fn shrinking_crops_bottom_right() {
        let mut surface = RasterSurface::new((3, 3), Color::TRANSPARENT);
        surface.buffer_mut().set_pixel(0, 0, Color::BLUE);
        surface.buffer_mut().set_pixel(2, 2, Color::BLUE);
        surface.ensure_size((2, 2));

        assert_eq!(surface.size(), (2, 2));
        assert_eq!(surface.buffer().pixel(0, 0), Color::BLUE);
        assert_eq!(surface.buffer().pixel(1, 1), Color::TRANSPARENT);
    }

    #[test]
    fn clear_makes_every_pixel_transparent() {
        let mut surface = RasterSurface::new((3, 2), Color::WHITE);
        surface.clear();
        assert!(surface
            .buffer()
            .pixels
            .chunks_exact(4)
            .all(|px| px == [0, 0, 0, 0]));
    }
}
