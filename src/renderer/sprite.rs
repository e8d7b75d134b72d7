//! Fixed-size ARGB sprite

use glam::Vec2;

use crate::error::AssetError;

/// Immutable ARGB8888 image, loaded once per session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Sprite {
    /// Build from one ARGB word per pixel, row-major
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self, AssetError> {
        if width == 0 || height == 0 {
            return Err(AssetError::EmptySprite { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(AssetError::ByteLength {
                expected: expected * 4,
                actual: pixels.len() * 4,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from raw bytes holding native-endian ARGB words
    pub fn from_argb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, AssetError> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(AssetError::ByteLength {
                expected,
                actual: bytes.len(),
            });
        }
        // Copies, so the input needs no particular alignment
        Self::from_pixels(width, height, bytemuck::pod_collect_to_vec(bytes))
    }

    /// Procedural metal ball: a shaded disk lit from the top-left with a
    /// one-pixel anti-aliased rim. Pixels outside the disk are transparent.
    pub fn ball(diameter: u32, color: u32) -> Self {
        let diameter = diameter.max(1);
        let radius = diameter as f32 / 2.0;
        let center = Vec2::splat(radius);
        let highlight = center - Vec2::splat(radius * 0.35);

        let mut pixels = Vec::with_capacity(diameter as usize * diameter as usize);
        for y in 0..diameter {
            for x in 0..diameter {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (radius - p.distance(center) + 0.5).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    pixels.push(0);
                    continue;
                }
                let shine = 1.0 - (p.distance(highlight) / (radius * 1.6)).min(1.0);
                let shade = 0.55 + 0.45 * shine;
                pixels.push(shade_argb(color, shade, coverage));
            }
        }

        Self {
            width: diameter,
            height: diameter,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size in pixels, as used by the border clamp
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Row `y` of the image
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let width = self.width as usize;
        let start = y as usize * width;
        &self.pixels[start..start + width]
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Scale the RGB channels by `shade` and set alpha from `coverage`
fn shade_argb(color: u32, shade: f32, coverage: f32) -> u32 {
    let channel = |shift: u32| {
        let c = ((color >> shift) & 0xFF) as f32;
        ((c * shade).round().clamp(0.0, 255.0) as u32) << shift
    };
    let alpha = ((color >> 24) as f32 * coverage).round() as u32;
    (alpha << 24) | channel(16) | channel(8) | channel(0)
}
