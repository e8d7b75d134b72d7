//! Software pixel buffer handed out by a surface for one frame

use glam::Vec2;

use super::sprite::Sprite;
use crate::error::DrawError;

/// ARGB8888 pixel buffer, row-major, origin top-left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Canvas {
    /// Zeroed (transparent black) canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap a host buffer. The buffer must hold exactly `width * height` pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self, DrawError> {
        if pixels.len() != width as usize * height as usize {
            return Err(DrawError::CanvasSize {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixel at (x, y), `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Flat background fill
    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Draw `sprite` with its top-left corner at `pos`, blending over the
    /// current contents. Parts outside the canvas are clipped.
    pub fn draw_sprite(&mut self, sprite: &Sprite, pos: Vec2) {
        if !pos.is_finite() {
            log::warn!("Skipping sprite at non-finite position {:?}", pos);
            return;
        }
        // Far off-canvas positions clip away entirely; keep the i64 math small
        let left = pos.x.round().clamp(i32::MIN as f32, i32::MAX as f32) as i64;
        let top = pos.y.round().clamp(i32::MIN as f32, i32::MAX as f32) as i64;

        // Visible sprite rows/columns after clipping
        let x0 = (-left).clamp(0, sprite.width() as i64);
        let y0 = (-top).clamp(0, sprite.height() as i64);
        let x1 = (self.width as i64 - left).clamp(0, sprite.width() as i64);
        let y1 = (self.height as i64 - top).clamp(0, sprite.height() as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for sy in y0..y1 {
            let src = &sprite.row(sy as u32)[x0 as usize..x1 as usize];
            let row_start = ((top + sy) * self.width as i64 + left + x0) as usize;
            let dst = &mut self.pixels[row_start..row_start + src.len()];
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = blend_over(*d, s);
            }
        }
    }
}

/// Non-premultiplied source-over
#[inline]
fn blend_over(dst: u32, src: u32) -> u32 {
    let sa = src >> 24;
    match sa {
        0 => dst,
        0xFF => src,
        _ => {
            let inv = 255 - sa;
            let mix = |shift: u32| {
                let s = (src >> shift) & 0xFF;
                let d = (dst >> shift) & 0xFF;
                ((s * sa + d * inv + 127) / 255) << shift
            };
            let da = dst >> 24;
            let out_a = sa + (da * inv + 127) / 255;
            (out_a << 24) | mix(16) | mix(8) | mix(0)
        }
    }
}
