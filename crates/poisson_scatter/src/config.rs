//! Per-run sampling parameters.
use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use mint::Vector2;

use crate::density::LuminanceSource;
use crate::domain::Domain;
use crate::error::{Error, Result};

/// When the `max_points` cap is checked during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapPolicy {
    /// Checked before every candidate; the result never exceeds `max_points`.
    #[default]
    Strict,
    /// Checked once per active point, so one origin may overshoot the cap by up to
    /// `density - 1` points.
    PerOrigin,
}

/// Immutable parameters for one sampling run.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplingConfig {
    /// Candidates drawn around each active point.
    pub density: usize,
    /// Hard cap on accepted points.
    pub max_points: usize,
    /// Domain size when no density image is set.
    pub size: Vec2,
    /// Minimum distance between samples, and the spacing under white pixels.
    pub min_radius: f32,
    /// Annulus inner radius, and the spacing under black pixels.
    pub max_radius: f32,
    /// Luminance at or below this value counts as black.
    pub black_cutoff: f32,
    /// Luminance at or above this value counts as white.
    pub white_cutoff: f32,
    /// Seed for the run's random generator.
    pub seed: u64,
    /// Cap enforcement.
    pub cap_policy: CapPolicy,
    /// Optional luminance field overriding the uniform `min_radius`. Its size replaces `size`.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub density_image: Option<Arc<dyn LuminanceSource>>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            density: 30,
            max_points: 1000,
            size: Vec2::ZERO,
            min_radius: 10.0,
            max_radius: 20.0,
            black_cutoff: 0.1,
            white_cutoff: 0.7,
            seed: 0,
            cap_policy: CapPolicy::Strict,
            density_image: None,
        }
    }
}

impl fmt::Debug for SamplingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SamplingConfig")
            .field("density", &self.density)
            .field("max_points", &self.max_points)
            .field("size", &self.size)
            .field("min_radius", &self.min_radius)
            .field("max_radius", &self.max_radius)
            .field("black_cutoff", &self.black_cutoff)
            .field("white_cutoff", &self.white_cutoff)
            .field("seed", &self.seed)
            .field("cap_policy", &self.cap_policy)
            .field(
                "density_image",
                &self
                    .density_image
                    .as_ref()
                    .map(|img| (img.width(), img.height())),
            )
            .finish()
    }
}

impl SamplingConfig {
    /// Creates a config over a domain of the given size with default parameters.
    pub fn new(size: impl Into<Vector2<f32>>) -> Self {
        Self {
            size: Vec2::from(size.into()),
            ..Default::default()
        }
    }

    /// Sets the number of candidates per active point.
    pub fn with_density(mut self, density: usize) -> Self {
        self.density = density;
        self
    }

    /// Sets the cap on accepted points.
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    /// Sets the domain size used without a density image.
    pub fn with_size(mut self, size: impl Into<Vector2<f32>>) -> Self {
        self.size = Vec2::from(size.into());
        self
    }

    /// Sets both radii.
    pub fn with_radii(mut self, min_radius: f32, max_radius: f32) -> Self {
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self
    }

    /// Sets the black and white luminance cutoffs.
    pub fn with_cutoffs(mut self, black_cutoff: f32, white_cutoff: f32) -> Self {
        self.black_cutoff = black_cutoff;
        self.white_cutoff = white_cutoff;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_cap_policy(mut self, cap_policy: CapPolicy) -> Self {
        self.cap_policy = cap_policy;
        self
    }

    /// Sets the density image. Its pixel size becomes the domain.
    pub fn with_density_image<T>(mut self, image: T) -> Self
    where
        T: LuminanceSource + 'static,
    {
        self.density_image = Some(Arc::new(image));
        self
    }

    /// Sets the density image from a shared handle.
    pub fn with_density_image_arc(mut self, image: Arc<dyn LuminanceSource>) -> Self {
        self.density_image = Some(image);
        self
    }

    /// Domain for this run: the image size if a density image is set, else `size`.
    pub fn domain(&self) -> Result<Domain> {
        match &self.density_image {
            Some(image) => Domain::new(image.width() as f32, image.height() as f32),
            None => Domain::new(self.size.x, self.size.y),
        }
    }

    /// Grid cell size: `max_radius / sqrt(2)` with a density image, else `min_radius / sqrt(2)`.
    pub fn cell_size(&self) -> f32 {
        let radius = if self.density_image.is_some() {
            self.max_radius
        } else {
            self.min_radius
        };
        radius / std::f32::consts::SQRT_2
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.domain()?;
        if !self.min_radius.is_finite() || self.min_radius <= 0.0 {
            return Err(Error::invalid_config(format!(
                "min_radius must be > 0, got {}",
                self.min_radius
            )));
        }
        if !self.max_radius.is_finite() || self.max_radius <= 0.0 {
            return Err(Error::invalid_config(format!(
                "max_radius must be > 0, got {}",
                self.max_radius
            )));
        }
        if self.max_radius < self.min_radius {
            return Err(Error::invalid_config(format!(
                "max_radius ({}) must be >= min_radius ({})",
                self.max_radius, self.min_radius
            )));
        }
        if !self.black_cutoff.is_finite() || !self.white_cutoff.is_finite() {
            return Err(Error::invalid_config("cutoffs must be finite"));
        }
        if self.black_cutoff > self.white_cutoff {
            return Err(Error::invalid_config(format!(
                "black_cutoff ({}) must be <= white_cutoff ({})",
                self.black_cutoff, self.white_cutoff
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::GrayImage;

    #[test]
    fn defaults_match_documented_values() {
        let config = SamplingConfig::default();
        assert_eq!(config.density, 30);
        assert_eq!(config.max_points, 1000);
        assert_eq!(config.min_radius, 10.0);
        assert_eq!(config.max_radius, 20.0);
        assert_eq!(config.black_cutoff, 0.1);
        assert_eq!(config.white_cutoff, 0.7);
        assert_eq!(config.cap_policy, CapPolicy::Strict);
        assert!(config.density_image.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let config = SamplingConfig::new(Vec2::new(50.0, 20.0))
            .with_density(5)
            .with_max_points(7)
            .with_radii(2.0, 3.0)
            .with_cutoffs(0.2, 0.8)
            .with_seed(99)
            .with_cap_policy(CapPolicy::PerOrigin);
        assert_eq!(config.size, Vec2::new(50.0, 20.0));
        assert_eq!(config.density, 5);
        assert_eq!(config.max_points, 7);
        assert_eq!((config.min_radius, config.max_radius), (2.0, 3.0));
        assert_eq!((config.black_cutoff, config.white_cutoff), (0.2, 0.8));
        assert_eq!(config.seed, 99);
        assert_eq!(config.cap_policy, CapPolicy::PerOrigin);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let base = SamplingConfig::new(Vec2::new(100.0, 100.0));
        let cases = [
            base.clone().with_size(Vec2::new(0.0, 0.0)),
            base.clone().with_size(Vec2::new(100.0, -1.0)),
            base.clone().with_radii(0.0, 10.0),
            base.clone().with_radii(5.0, -1.0),
            base.clone().with_radii(10.0, 5.0),
            base.clone().with_radii(f32::NAN, 5.0),
            base.clone().with_cutoffs(0.8, 0.2),
            base.clone().with_cutoffs(f32::INFINITY, 0.2),
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "expected invalid config: {config:?}"
            );
        }
    }

    #[test]
    fn density_image_overrides_size_and_cell_size() {
        let plain = SamplingConfig::new(Vec2::new(100.0, 50.0)).with_radii(4.0, 8.0);
        assert_eq!(plain.domain().unwrap(), Domain::new(100.0, 50.0).unwrap());
        assert!((plain.cell_size() - 4.0 / 2f32.sqrt()).abs() < 1e-6);

        let imaged = plain.with_density_image(GrayImage::uniform(32, 16, 0.5));
        assert_eq!(imaged.domain().unwrap(), Domain::new(32.0, 16.0).unwrap());
        assert!((imaged.cell_size() - 8.0 / 2f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn empty_density_image_is_invalid() {
        let config =
            SamplingConfig::new(Vec2::new(10.0, 10.0)).with_density_image(GrayImage::uniform(0, 8, 1.0));
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
