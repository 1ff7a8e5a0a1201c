//! Drop resolution
//!
//! Intersects the moving block with the top of the tower and decides whether
//! the drop was perfect, sliced or a total miss.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::footprint::{Axis, Footprint};

/// Result of dropping the moving block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DropOutcome {
    /// Overlap matched the top block within tolerance; snapped to its size
    Perfect { placed: Footprint },
    /// Overlap kept, the overhang severed
    Partial {
        placed: Footprint,
        /// Severed overhang on the sliding axis (absent if it has no extent)
        fragment: Option<Footprint>,
    },
    /// No overlap on at least one axis
    Miss { overlap: Vec2 },
}

impl DropOutcome {
    /// The new top footprint, if the drop landed
    pub fn placed(&self) -> Option<&Footprint> {
        match self {
            DropOutcome::Perfect { placed } | DropOutcome::Partial { placed, .. } => Some(placed),
            DropOutcome::Miss { .. } => None,
        }
    }

    #[inline]
    pub fn is_perfect(&self) -> bool {
        matches!(self, DropOutcome::Perfect { .. })
    }

    #[inline]
    pub fn is_miss(&self) -> bool {
        matches!(self, DropOutcome::Miss { .. })
    }
}

/// Width/depth of the intersection of two footprints (negative = apart)
pub fn overlap(top: &Footprint, moving: &Footprint) -> Vec2 {
    let r_min = top.min().max(moving.min());
    let r_max = top.max().min(moving.max());
    r_max - r_min
}

/// Resolve a drop of `moving` onto `top`
///
/// `axis` is the axis `moving` was sliding along; the fragment is cut from
/// whichever end of that axis overhangs `top`.
pub fn resolve(top: &Footprint, moving: &Footprint, axis: Axis, tolerance: f32) -> DropOutcome {
    let overlap = overlap(top, moving);
    let diff = (top.size - overlap).abs();

    // Checked first: a top narrower than the tolerance must not snap a
    // block that missed it
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return DropOutcome::Miss { overlap };
    }

    if diff.x <= tolerance && diff.y <= tolerance {
        return DropOutcome::Perfect {
            placed: Footprint::new(top.center, top.size, moving.height, moving.level),
        };
    }

    let (t_min, t_max) = (axis.of(top.min()), axis.of(top.max()));
    let (m_min, m_max) = (axis.of(moving.min()), axis.of(moving.max()));
    let kept = axis.of(overlap);

    // Centre of the kept slice and (centre, width) of the overhang
    let (kept_center, cut_center, cut_width) = if m_max >= t_max {
        // Overhangs the far side
        let center = t_max - kept / 2.0;
        let cut = m_max - t_max;
        (center, center + kept / 2.0 + cut / 2.0, cut)
    } else {
        // Overhangs the near side
        let center = m_max - kept / 2.0;
        let cut = t_min - m_min;
        (center, center - kept / 2.0 - cut / 2.0, cut)
    };

    let mut placed_center = moving.center;
    *axis.of_mut(&mut placed_center) = kept_center;
    let placed = Footprint::new(placed_center, overlap, moving.height, moving.level);

    // Fragment spans the moving block's full extent across the sliding axis
    let mut cut_pos = moving.center;
    *axis.of_mut(&mut cut_pos) = cut_center;
    let mut cut_size = moving.size;
    *axis.of_mut(&mut cut_size) = cut_width;
    let fragment = Footprint::new(cut_pos, cut_size, moving.height, moving.level);

    DropOutcome::Partial {
        placed,
        fragment: fragment.is_placeable().then_some(fragment),
    }
}

/// Grow a footprint along `axis`, keeping both dimensions within `max_width`
pub fn apply_growth(footprint: &mut Footprint, axis: Axis, increase: f32, max_width: f32) {
    *axis.of_mut(&mut footprint.size) += increase;
    footprint.size = footprint.size.min(Vec2::splat(max_width));
}
