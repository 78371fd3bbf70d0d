//! CPU-side RGBA pixel surfaces and the colour-keyed blit primitive.

use glam::IVec2;
use tracing::warn;

use crate::{Color, RenderingError};

const BYTES_PER_PIXEL: usize = 4;

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Row-major RGBA8 pixel buffer used both for sprites and render targets.
///
/// Pixels whose alpha is zero are treated as transparent by [`blit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Creates a fully transparent surface.
    ///
    /// Dimensions whose pixel buffer would not fit in memory collapse to an
    /// empty 0×0 surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let bytes = pixel_bytes(width, height);
        let (width, height) = if bytes == 0 { (0, 0) } else { (width, height) };
        Self {
            width,
            height,
            pixels: vec![0; bytes],
        }
    }

    /// Wraps an existing RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RenderingError> {
        let expected = pixel_bytes(width, height);
        if pixels.len() != expected {
            return Err(RenderingError::PixelBufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Full extent of the surface anchored at the origin.
    #[must_use]
    pub const fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    /// Raw RGBA8 bytes in row-major order.
    #[must_use]
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the surface and returns its RGBA8 bytes.
    #[must_use]
    pub fn into_rgba(self) -> Vec<u8> {
        self.pixels
    }

    /// Pixel at the provided coordinates, if inside the surface.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let offset = self.offset(x, y)?;
        let slot = self.pixels.get(offset..offset.checked_add(BYTES_PER_PIXEL)?)?;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(slot);
        Some(rgba)
    }

    /// Overwrites the pixel at the provided coordinates when inside the surface.
    pub fn set_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        let Some(offset) = self.offset(x, y) else {
            return;
        };
        let Some(end) = offset.checked_add(BYTES_PER_PIXEL) else {
            return;
        };
        if let Some(slot) = self.pixels.get_mut(offset..end) {
            slot.copy_from_slice(&rgba);
        }
    }

    /// Fills the whole surface with a colour.
    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        for pixel in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Fills the intersection of `rect` and the surface with a colour.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let rgba = color.to_rgba8();
        let Some((columns, rows)) = clip(rect, self.width, self.height) else {
            return;
        };
        for y in rows {
            for x in columns.clone() {
                self.set_pixel(x, y, rgba);
            }
        }
    }

    /// Replaces every opaque pixel matching `key` with a transparent one.
    pub fn apply_color_key(&mut self, key: [u8; 3]) {
        for pixel in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            if pixel[..3] == key {
                pixel.copy_from_slice(&[0, 0, 0, 0]);
            }
        }
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = usize::try_from(y)
            .ok()?
            .checked_mul(usize::try_from(self.width).ok()?)?
            .checked_add(usize::try_from(x).ok()?)?;
        index.checked_mul(BYTES_PER_PIXEL)
    }
}

/// Copies `region` of `source` (its full extent when `None`) onto `target`
/// with the region's top-left corner placed at `dest`.
///
/// Transparent source pixels are skipped and anything falling outside either
/// surface is clipped. A missing surface on either side is logged and the
/// call does nothing.
pub fn blit(
    source: Option<&Surface>,
    target: Option<&mut Surface>,
    region: Option<PixelRect>,
    dest: IVec2,
) {
    let (Some(source), Some(target)) = (source, target) else {
        warn!("cannot blit a surface that has not been initialised");
        return;
    };

    let region = region.unwrap_or_else(|| source.bounds());
    let Some((columns, rows)) = clip(region, source.width, source.height) else {
        return;
    };

    for source_y in rows {
        let target_y = dest.y.saturating_add(source_y.saturating_sub(region.y));
        for source_x in columns.clone() {
            let target_x = dest.x.saturating_add(source_x.saturating_sub(region.x));
            match source.pixel(source_x, source_y) {
                Some(rgba) if rgba[3] != 0 => target.set_pixel(target_x, target_y, rgba),
                _ => {}
            }
        }
    }
}

fn clip(
    rect: PixelRect,
    width: u32,
    height: u32,
) -> Option<(std::ops::Range<i32>, std::ops::Range<i32>)> {
    let clamp = |value: i64, limit: u32| -> i32 {
        i32::try_from(value.clamp(0, i64::from(limit))).unwrap_or(0)
    };
    let left = clamp(i64::from(rect.x), width);
    let top = clamp(i64::from(rect.y), height);
    let right = clamp(i64::from(rect.x) + i64::from(rect.width), width);
    let bottom = clamp(i64::from(rect.y) + i64::from(rect.height), height);
    (left < right && top < bottom).then_some((left..right, top..bottom))
}

fn pixel_bytes(width: u32, height: u32) -> usize {
    usize::try_from(u64::from(width) * u64::from(height))
        .ok()
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
        .unwrap_or(0)
}
