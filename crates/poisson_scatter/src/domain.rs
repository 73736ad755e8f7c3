//! Rectangular sampling domain anchored at the origin.
use glam::Vec2;

use crate::error::{Error, Result};

/// A 2D sample position. Points carry no identity beyond their coordinates.
pub type Point = Vec2;

/// Axis-aligned rectangle `[0, width) x [0, height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    /// Extent along X in world units.
    pub width: f32,
    /// Extent along Y in world units.
    pub height: f32,
}

impl Domain {
    /// Creates a domain, failing for non-positive or non-finite extents.
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(Error::invalid_config(format!(
                "domain must be > 0 in both components, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Domain extent as a vector.
    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Half-open containment test on both axes.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.x < self.width && p.y >= 0.0 && p.y < self.height
    }
}
