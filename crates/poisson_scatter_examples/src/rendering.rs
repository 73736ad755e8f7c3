use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use image::{Luma, Rgb, RgbImage};
use poisson_scatter::prelude::{GrayImage, LuminanceSource, Point};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// How to draw a point set.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub domain_extent: Vec2,
    pub background: [u8; 3],
    pub point_color: [u8; 3],
    pub point_radius: i32,
    /// Color of the domain outline, if drawn.
    pub outline: Option<[u8; 3]>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), domain_extent: Vec2) -> Self {
        Self {
            image_size,
            domain_extent,
            background: [255, 255, 255],
            point_color: [20, 20, 20],
            point_radius: 2,
            outline: Some([0, 160, 0]),
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_points(mut self, color: [u8; 3], radius: i32) -> Self {
        self.point_color = color;
        self.point_radius = radius;
        self
    }

    pub fn without_outline(mut self) -> Self {
        self.outline = None;
        self
    }

    fn to_pixel(&self, p: Point) -> (i32, i32) {
        let (w, h) = self.image_size;
        let x = (p.x / self.domain_extent.x * w as f32).floor() as i32;
        let y = (p.y / self.domain_extent.y * h as f32).floor() as i32;
        (x, y)
    }
}

/// Renders `points` as discs, optionally over a grayscale backdrop, and writes a PNG.
pub fn render_points_to_png(
    points: &[Point],
    backdrop: Option<&dyn LuminanceSource>,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    anyhow::ensure!(w > 0 && h > 0, "image size must be non-zero");

    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));

    if let Some(source) = backdrop.filter(|s| s.width() > 0 && s.height() > 0) {
        for (x, y, px) in img.enumerate_pixels_mut() {
            let sx = ((x as u64 * source.width() as u64) / w as u64) as u32;
            let sy = ((y as u64 * source.height() as u64) / h as u64) as u32;
            // Lighten so dark regions keep dark points visible.
            let v = (source.luminance(sx, sy) * 0.6 + 0.4).clamp(0.0, 1.0);
            let level = (v * 255.0).round() as u8;
            *px = Rgb([level, level, level]);
        }
    }

    if let Some(outline) = config.outline {
        for x in 0..w {
            img.put_pixel(x, 0, Rgb(outline));
            img.put_pixel(x, h - 1, Rgb(outline));
        }
        for y in 0..h {
            img.put_pixel(0, y, Rgb(outline));
            img.put_pixel(w - 1, y, Rgb(outline));
        }
    }

    let r = config.point_radius.max(0);
    let r2 = r * r;
    for &p in points {
        let (cx, cy) = config.to_pixel(p);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let x = cx + dx;
                let y = cy + dy;
                if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
                    img.put_pixel(x as u32, y as u32, Rgb(config.point_color));
                }
            }
        }
    }

    let path = path.as_ref();
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {} points to {}", points.len(), path.display());
    Ok(())
}

/// Loads a PNG and converts it to a luminance field.
pub fn load_density_png(path: impl AsRef<Path>) -> anyhow::Result<GrayImage> {
    let path = path.as_ref();
    let rgba = image::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .to_rgba8();
    let gray = GrayImage::from_rgba8(rgba.width(), rgba.height(), rgba.as_raw())?;
    Ok(gray)
}

/// Writes a luminance field as an 8-bit grayscale PNG.
pub fn save_luminance_png(
    source: &dyn LuminanceSource,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let img = image::GrayImage::from_fn(source.width(), source.height(), |x, y| {
        Luma([(source.luminance(x, y).clamp(0.0, 1.0) * 255.0).round() as u8])
    });
    let path = path.as_ref();
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
