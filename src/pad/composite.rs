use crate::pad::model::Color;

/// Straight-alpha RGBA pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaBuffer {
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let mut buffer = Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        };
        buffer.fill(fill);
        buffer
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn fill(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color.to_rgba_array());
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = self.index(x, y);
        Color::rgba(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_rgba_array());
    }

    /// Source-over blend of `color` onto the pixel at `(x, y)`. Out of bounds is ignored.
    pub fn blend_pixel_at(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        if color.a == 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let blended = blend_pixel(self.pixel(x, y), color);
        self.set_pixel(x, y, blended);
    }

    /// Copies the `width` x `height` region starting at `(x, y)`. Parts of the
    /// region outside this buffer come out transparent.
    pub fn copy_region(&self, x: i32, y: i32, width: u32, height: u32) -> RgbaBuffer {
        let mut out = RgbaBuffer::new(width, height, Color::TRANSPARENT);
        out.copy_from(self, -i64::from(x), -i64::from(y));
        out
    }

    /// Overwrites pixels with `src` placed at `(dst_x, dst_y)`, clipped to both buffers.
    pub fn copy_from(&mut self, src: &RgbaBuffer, dst_x: i64, dst_y: i64) {
        let x0 = dst_x.max(0);
        let y0 = dst_y.max(0);
        let x1 = (dst_x + i64::from(src.width)).min(i64::from(self.width));
        let y1 = (dst_y + i64::from(src.height)).min(i64::from(self.height));
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let row_len = ((x1 - x0) * 4) as usize;
        for y in y0..y1 {
            let src_idx = src.index((x0 - dst_x) as u32, (y - dst_y) as u32);
            let dst_idx = self.index(x0 as u32, y as u32);
            self.pixels[dst_idx..dst_idx + row_len]
                .copy_from_slice(&src.pixels[src_idx..src_idx + row_len]);
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * 4
    }
}

/// Returns `top` composited over a buffer filled with `background`.
pub fn composite_over_background(top: &RgbaBuffer, background: Color) -> RgbaBuffer {
    let mut output = RgbaBuffer::new(top.width, top.height, background);
    blend_in_place(&mut output, top);
    output
}

pub fn blend_in_place(base: &mut RgbaBuffer, top: &RgbaBuffer) {
    assert_eq!(base.width, top.width);
    assert_eq!(base.height, top.height);

    for (dst, src) in base
        .pixels
        .chunks_exact_mut(4)
        .zip(top.pixels.chunks_exact(4))
    {
        let blended = blend_pixel(
            Color::rgba(dst[0], dst[1], dst[2], dst[3]),
            Color::rgba(src[0], src[1], src[2], src[3]),
        );
        dst.copy_from_slice(&blended.to_rgba_array());
    }
}

pub fn blend_pixel(bottom: Color, top: Color) -> Color {
    let sa = top.a as f32 / 255.0;
    let da = bottom.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= f32::EPSILON {
        return Color::TRANSPARENT;
    }

    let blend = |s: u8, d: u8| -> u8 {
        (((s as f32 * sa) + (d as f32 * da * (1.0 - sa))) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Color {
        r: blend(top.r, bottom.r),
        g: blend(top.g, bottom.g),
        b: blend(top.b, bottom.b),
        a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    }
}
