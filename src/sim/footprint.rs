//! Block footprints
//!
//! A footprint is a block's horizontal silhouette: an axis-aligned rectangle
//! in the X/Z plane, plus the stacking level it sits on. World `y` is derived
//! from the level, so only `x`/`z` live in the vectors below
//! (`Vec2::x` is world X, `Vec2::y` is world Z).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Horizontal axis a block slides along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// The other horizontal axis
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Component of a horizontal vector along this axis
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.y,
        }
    }

    /// Mutable component of a horizontal vector along this axis
    #[inline]
    pub fn of_mut(self, v: &mut Vec2) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Z => &mut v.y,
        }
    }
}

/// Axis-aligned block silhouette
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Centre on the horizontal plane (x, z)
    pub center: Vec2,
    /// Full extent (width along X, depth along Z)
    pub size: Vec2,
    pub height: f32,
    /// Stacking level (0 = base block)
    pub level: u32,
}

impl Footprint {
    pub fn new(center: Vec2, size: Vec2, height: f32, level: u32) -> Self {
        Self {
            center,
            size,
            height,
            level,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.size.y
    }

    /// Minimum corner (x, z)
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.size / 2.0
    }

    /// Maximum corner (x, z)
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.size / 2.0
    }

    /// Only footprints with positive width and depth may be placed
    #[inline]
    pub fn is_placeable(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }

    /// Same footprint one level up
    pub fn stacked(&self) -> Self {
        Self {
            level: self.level + 1,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extents() {
        let f = Footprint::new(Vec2::new(0.5, -1.0), Vec2::new(1.0, 0.5), 0.25, 3);
        assert_eq!(f.min(), Vec2::new(0.0, -1.25));
        assert_eq!(f.max(), Vec2::new(1.0, -0.75));
        assert_eq!(f.width(), 1.0);
        assert_eq!(f.depth(), 0.5);
    }

    #[test]
    fn test_axis_components() {
        let mut v = Vec2::new(1.0, 2.0);
        assert_eq!(Axis::X.of(v), 1.0);
        assert_eq!(Axis::Z.of(v), 2.0);
        *Axis::Z.of_mut(&mut v) = 5.0;
        assert_eq!(v, Vec2::new(1.0, 5.0));
        assert_eq!(Axis::X.flipped(), Axis::Z);
        assert_eq!(Axis::Z.flipped(), Axis::X);
    }

    #[test]
    fn test_placeable() {
        let f = Footprint::new(Vec2::ZERO, Vec2::new(0.2, 1.0), 0.25, 0);
        assert!(f.is_placeable());
        let sliver = Footprint::new(Vec2::ZERO, Vec2::new(0.0, 1.0), 0.25, 0);
        assert!(!sliver.is_placeable());
        assert_eq!(f.stacked().level, 1);
    }
}
