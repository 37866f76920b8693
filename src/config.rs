//! Compiled-in simulator configuration.
//!
//! There are no CLI flags or config files: segment count, initial pose,
//! slider ranges, and the anchor are constants chosen at build time. The
//! front end overrides the anchor to sit in its arm viewport.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::chain::Point2;

/// Static chain configuration.
///
/// `initial_lengths` and `initial_angles_deg` must both be exactly
/// `segment_count` long; [`crate::chain::KinematicChain::new`] rejects
/// anything else.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainConfig {
    /// Number of segments, fixed for the life of the run.
    pub segment_count: usize,
    /// Fixed base anchor in screen space.
    pub anchor: Point2,
    pub initial_lengths: Vec<f32>,
    pub initial_angles_deg: Vec<f32>,
    /// Slider range for every segment length, units.
    pub length_range: (f32, f32),
    /// Slider range for every relative joint angle, degrees.
    pub angle_range_deg: (f32, f32),
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            segment_count: 4,
            anchor: Point2::new(800.0, 450.0),
            initial_lengths: vec![120.0, 100.0, 80.0, 60.0],
            initial_angles_deg: vec![0.0, 0.0, 0.0, 0.0],
            length_range: (20.0, 200.0),
            angle_range_deg: (-180.0, 180.0),
        }
    }
}
