//! Luminance inputs that modulate the minimum spacing between samples.
//!
//! - Implement [`LuminanceSource`] to plug in any host image type.
//! - [`GrayImage`] is an owned in-memory luminance buffer.
//! - [`DensityField`] turns luminance into a local minimum distance.
use std::fmt;

use crate::domain::Point;
use crate::error::{Error, Result};

/// Read-only 2D luminance lookup in pixel space.
///
/// `luminance` is only called with `x < width()` and `y < height()` and should return
/// a value in `[0, 1]`, where 0 is black.
pub trait LuminanceSource: Send + Sync {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn luminance(&self, x: u32, y: u32) -> f32;
}

/// Perceptual grayscale of an RGB color with components in `[0, 1]`.
#[inline]
pub fn grayscale(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Owned row-major luminance buffer.
#[derive(Clone, PartialEq)]
pub struct GrayImage {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl GrayImage {
    /// Wraps row-major luminance values, clamping each into `[0, 1]`.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::Image(format!(
                "expected {expected} luminance values for {width}x{height}, got {}",
                data.len()
            )));
        }
        let data = data.into_iter().map(|v| v.clamp(0.0, 1.0)).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f32) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y).clamp(0.0, 1.0));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// An image of constant luminance.
    pub fn uniform(width: u32, height: u32, value: f32) -> Self {
        Self::from_fn(width, height, |_, _| value)
    }

    /// Converts tightly packed RGBA8 pixels to grayscale. Alpha is ignored.
    pub fn from_rgba8(width: u32, height: u32, pixels: &[u8]) -> Result<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if pixels.len() != expected {
            return Err(Error::Image(format!(
                "expected {expected} RGBA8 bytes for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        let data = pixels
            .chunks_exact(4)
            .map(|px| {
                grayscale(
                    px[0] as f32 / 255.0,
                    px[1] as f32 / 255.0,
                    px[2] as f32 / 255.0,
                )
                .clamp(0.0, 1.0)
            })
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

impl fmt::Debug for GrayImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrayImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl LuminanceSource for GrayImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn luminance(&self, x: u32, y: u32) -> f32 {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data.get(idx).copied().unwrap_or(0.0)
    }
}

/// Maps image luminance to a local minimum distance between samples.
///
/// Luminance at or below `black_cutoff` saturates to 0 and at or above `white_cutoff`
/// to 1. The distance is `min_radius + (1 - luminance) * (max_radius - min_radius)`.
#[derive(Clone, Copy)]
pub struct DensityField<'a> {
    image: &'a dyn LuminanceSource,
    min_radius: f32,
    max_radius: f32,
    black_cutoff: f32,
    white_cutoff: f32,
}

impl<'a> DensityField<'a> {
    pub fn new(
        image: &'a dyn LuminanceSource,
        min_radius: f32,
        max_radius: f32,
        black_cutoff: f32,
        white_cutoff: f32,
    ) -> Self {
        Self {
            image,
            min_radius,
            max_radius,
            black_cutoff,
            white_cutoff,
        }
    }

    /// Luminance under `p` after truncating to a pixel and clamping into the image.
    ///
    /// Values outside `[0, 1]` are clamped and NaN reads as black, so the spacing never
    /// leaves `[min_radius, max_radius]`.
    #[inline]
    pub fn luminance_at(&self, p: Point) -> f32 {
        let w = self.image.width();
        let h = self.image.height();
        if w == 0 || h == 0 {
            return 0.0;
        }
        let x = (p.x.max(0.0) as u32).min(w - 1);
        let y = (p.y.max(0.0) as u32).min(h - 1);
        let value = self.image.luminance(x, y);
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        }
    }

    /// Luminance with the black and white cutoffs applied.
    #[inline]
    pub fn clamped_luminance_at(&self, p: Point) -> f32 {
        let value = self.luminance_at(p);
        if value <= self.black_cutoff {
            0.0
        } else if value >= self.white_cutoff {
            1.0
        } else {
            value
        }
    }

    /// Minimum distance another sample must keep from a sample at `p`.
    #[inline]
    pub fn min_distance_at(&self, p: Point) -> f32 {
        let g = self.clamped_luminance_at(p);
        self.min_radius + (1.0 - g) * (self.max_radius - self.min_radius)
    }
}
