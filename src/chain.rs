//! Kinematic chain for a planar articulated arm.
//!
//! Coordinate system (matches the renderer's screen space):
//! - `x` grows right, `y` grows down
//! - a positive relative angle turns the segment clockwise on screen
//! - joint `i`'s absolute heading is the sum of relative angles `0..=i`
//!
//! The chain stores one length and one relative angle per segment and
//! nothing else: [`KinematicChain::solve`] derives the full pose from the
//! stored parameters on every call, so the pose at any frame depends only on
//! the current parameters, never on a prior pose.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ChainConfig;

/// A 2D point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Parameter-update failures.
///
/// Both variants are integration defects, not user errors: the widget layer
/// guarantees per-control clamping and a fixed control count, so reaching
/// either means a caller broke that contract. Policy is fail fast (surface
/// the error, skip the frame), never silent correction -- a silently "fixed"
/// pose looks plausible while being wrong.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ChainError {
    /// A parameter slice does not match the chain's fixed segment count.
    #[error("expected {expected} values per parameter, got {got}")]
    Configuration { expected: usize, got: usize },

    /// A parameter value is NaN or infinite.
    #[error("non-finite parameter value {value} at index {index}")]
    InvalidValue { index: usize, value: f32 },
}

/// Derived pose snapshot: `N + 1` joint positions for an `N`-segment chain.
///
/// Index 0 is the fixed base anchor, index `i` is the tip of segment `i`,
/// and the last entry is the end effector. Recomputed every frame and
/// discarded; never fed back into the next solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainState {
    joints: Vec<Point2>,
}

impl ChainState {
    /// All joint positions, anchor first, end effector last.
    pub fn joints(&self) -> &[Point2] {
        &self.joints
    }

    /// The fixed base anchor.
    pub fn anchor(&self) -> Point2 {
        self.joints[0]
    }

    /// The free tip of the last segment.
    pub fn end_effector(&self) -> Point2 {
        self.joints[self.joints.len() - 1]
    }

    pub fn segment_count(&self) -> usize {
        self.joints.len() - 1
    }
}

/// Forward-kinematics chain with a fixed segment count.
///
/// Owns the per-segment lengths and relative joint angles (degrees) and is
/// their sole mutator. The segment count is fixed at construction and never
/// changes for the life of the run.
#[derive(Debug, Clone)]
pub struct KinematicChain {
    anchor: Point2,
    lengths: Vec<f32>,
    angles_deg: Vec<f32>,
    // Sum of lengths, refreshed only when the lengths change.
    reach: f32,
}

impl KinematicChain {
    /// Builds a chain from the configured anchor and initial parameters.
    ///
    /// Fails with [`ChainError::Configuration`] if the initial vectors do
    /// not match `cfg.segment_count`, or [`ChainError::InvalidValue`] if any
    /// initial value is non-finite.
    pub fn new(cfg: &ChainConfig) -> Result<Self, ChainError> {
        check_len(cfg.segment_count, cfg.initial_lengths.len())?;
        check_len(cfg.segment_count, cfg.initial_angles_deg.len())?;
        check_finite(&cfg.initial_lengths)?;
        check_finite(&cfg.initial_angles_deg)?;

        let reach = cfg.initial_lengths.iter().sum();
        Ok(Self {
            anchor: cfg.anchor,
            lengths: cfg.initial_lengths.clone(),
            angles_deg: cfg.initial_angles_deg.clone(),
            reach,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn anchor(&self) -> Point2 {
        self.anchor
    }

    pub fn lengths(&self) -> &[f32] {
        &self.lengths
    }

    pub fn angles_deg(&self) -> &[f32] {
        &self.angles_deg
    }

    /// Replaces the current configuration.
    ///
    /// Both slices must be exactly `segment_count` long and hold only finite
    /// values. Range clamping is the caller's job (the sliders clamp); this
    /// method only rejects what no caller may ever send. On error the prior
    /// configuration is left untouched.
    pub fn set_parameters(&mut self, lengths: &[f32], angles_deg: &[f32]) -> Result<(), ChainError> {
        check_len(self.lengths.len(), lengths.len())?;
        check_len(self.angles_deg.len(), angles_deg.len())?;
        check_finite(lengths)?;
        check_finite(angles_deg)?;

        if self.lengths != lengths {
            self.lengths.copy_from_slice(lengths);
            self.reach = self.lengths.iter().sum();
        }
        self.angles_deg.copy_from_slice(angles_deg);
        Ok(())
    }

    /// Computes the pose from the stored parameters.
    ///
    /// Single O(N) pass: the heading accumulates each segment's relative
    /// angle, and each joint sits one segment length along the current
    /// heading from the previous joint. Pure and deterministic -- repeated
    /// calls on the same configuration produce bitwise-identical output.
    pub fn solve(&self) -> ChainState {
        let mut joints = Vec::with_capacity(self.lengths.len() + 1);
        joints.push(self.anchor);

        let mut heading = 0.0f32;
        let mut at = self.anchor;
        for (&length, &angle) in self.lengths.iter().zip(&self.angles_deg) {
            heading += angle.to_radians();
            at = Point2::new(at.x + length * heading.cos(), at.y + length * heading.sin());
            joints.push(at);
        }

        ChainState { joints }
    }

    /// Outer workspace radius: the sum of all segment lengths.
    ///
    /// Cached; refreshed by [`Self::set_parameters`] when lengths change,
    /// since it does not depend on angles.
    pub fn max_reach(&self) -> f32 {
        self.reach
    }

    /// Inner workspace radius: how close to the anchor the end effector can
    /// fold back. Zero for chains of one segment or fewer.
    pub fn min_reach(&self) -> f32 {
        if self.lengths.len() <= 1 {
            return 0.0;
        }
        let longest = self.lengths.iter().copied().fold(0.0f32, f32::max);
        (longest - (self.reach - longest)).abs()
    }

    /// Area of the annulus the end effector can occupy.
    pub fn workspace_area(&self) -> f32 {
        let max = self.max_reach();
        let min = self.min_reach();
        core::f32::consts::PI * (max * max - min * min)
    }
}

fn check_len(expected: usize, got: usize) -> Result<(), ChainError> {
    if got != expected {
        return Err(ChainError::Configuration { expected, got });
    }
    Ok(())
}

fn check_finite(values: &[f32]) -> Result<(), ChainError> {
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(ChainError::InvalidValue { index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-3;

    fn chain_with(anchor: Point2, lengths: &[f32], angles_deg: &[f32]) -> KinematicChain {
        let cfg = ChainConfig {
            segment_count: lengths.len(),
            anchor,
            initial_lengths: lengths.to_vec(),
            initial_angles_deg: angles_deg.to_vec(),
            ..ChainConfig::default()
        };
        KinematicChain::new(&cfg).unwrap()
    }

    fn assert_close(p: Point2, x: f32, y: f32) {
        assert!(
            (p.x - x).abs() < EPS && (p.y - y).abs() < EPS,
            "expected ({x}, {y}), got ({}, {})",
            p.x,
            p.y
        );
    }

    #[test]
    fn zero_angles_lay_joints_on_a_straight_line() {
        let anchor = Point2::new(600.0, 400.0);
        let lengths = [120.0, 100.0, 80.0, 60.0];
        let chain = chain_with(anchor, &lengths, &[0.0; 4]);

        let pose = chain.solve();
        let mut partial = 0.0;
        for (i, &len) in lengths.iter().enumerate() {
            partial += len;
            let joint = pose.joints()[i + 1];
            assert_close(joint, anchor.x + partial, anchor.y);
        }
        assert_close(pose.end_effector(), anchor.x + chain.max_reach(), anchor.y);
    }

    #[test]
    fn end_effector_never_leaves_the_reach_envelope() {
        let anchor = Point2::new(0.0, 0.0);
        let lengths = [80.0, 60.0, 40.0];
        let angle_sets: [[f32; 3]; 5] = [
            [0.0, 0.0, 0.0],
            [30.0, -45.0, 20.0],
            [90.0, 90.0, 90.0],
            [180.0, -180.0, 180.0],
            [-170.0, 5.0, 160.0],
        ];

        for angles in angle_sets {
            let chain = chain_with(anchor, &lengths, &angles);
            let pose = chain.solve();
            let dist = pose.end_effector().distance(anchor);
            assert!(
                dist <= chain.max_reach() + EPS,
                "angles {angles:?}: {dist} > {}",
                chain.max_reach()
            );
        }

        // Equality exactly when every cumulative heading coincides: relative
        // angles [40, 0, 0] keep all segments on one ray.
        let chain = chain_with(anchor, &lengths, &[40.0, 0.0, 0.0]);
        let pose = chain.solve();
        let dist = pose.end_effector().distance(anchor);
        assert!((dist - chain.max_reach()).abs() < EPS);
    }

    #[test]
    fn solve_is_bitwise_deterministic() {
        let chain = chain_with(Point2::new(12.5, -3.75), &[80.0, 60.0, 40.0], &[30.0, -45.0, 20.0]);
        let a = chain.solve();
        let b = chain.solve();
        for (pa, pb) in a.joints().iter().zip(b.joints()) {
            assert_eq!(pa.x.to_bits(), pb.x.to_bits());
            assert_eq!(pa.y.to_bits(), pb.y.to_bits());
        }
    }

    #[test]
    fn right_angle_elbow_matches_manual_trig() {
        // Screen space, y down: 90 degrees turns the second segment "down".
        let anchor = Point2::new(0.0, 0.0);
        let chain = chain_with(anchor, &[100.0, 80.0], &[0.0, 90.0]);

        let pose = chain.solve();
        assert_close(pose.joints()[1], 100.0, 0.0);
        assert_close(pose.end_effector(), 100.0, 80.0);
    }

    #[test]
    fn cumulative_angles_compose_across_three_segments() {
        let anchor = Point2::new(0.0, 0.0);
        let chain = chain_with(anchor, &[80.0, 60.0, 40.0], &[30.0, -45.0, 20.0]);

        // Cumulative headings: 30, -15, 5 degrees.
        let h1 = 30.0f32.to_radians();
        let h2 = (-15.0f32).to_radians();
        let h3 = 5.0f32.to_radians();

        let j1 = Point2::new(80.0 * h1.cos(), 80.0 * h1.sin());
        let j2 = Point2::new(j1.x + 60.0 * h2.cos(), j1.y + 60.0 * h2.sin());
        let j3 = Point2::new(j2.x + 40.0 * h3.cos(), j2.y + 40.0 * h3.sin());

        let pose = chain.solve();
        assert_close(pose.joints()[1], j1.x, j1.y);
        assert_close(pose.joints()[2], j2.x, j2.y);
        assert_close(pose.end_effector(), j3.x, j3.y);
    }

    #[test]
    fn wrong_length_slice_is_rejected_and_state_untouched() {
        let mut chain = chain_with(Point2::new(0.0, 0.0), &[80.0, 60.0, 40.0], &[10.0, 20.0, 30.0]);
        let before = chain.solve();

        let err = chain
            .set_parameters(&[80.0, 60.0, 40.0, 20.0], &[0.0, 0.0, 0.0])
            .unwrap_err();
        assert_eq!(err, ChainError::Configuration { expected: 3, got: 4 });

        let err = chain.set_parameters(&[80.0, 60.0, 40.0], &[0.0]).unwrap_err();
        assert_eq!(err, ChainError::Configuration { expected: 3, got: 1 });

        assert_eq!(chain.solve(), before);
    }

    #[test]
    fn non_finite_values_are_rejected_and_state_untouched() {
        let mut chain = chain_with(Point2::new(0.0, 0.0), &[80.0, 60.0], &[10.0, 20.0]);
        let before = chain.solve();

        let err = chain.set_parameters(&[80.0, f32::NAN], &[0.0, 0.0]).unwrap_err();
        match err {
            ChainError::InvalidValue { index, value } => {
                assert_eq!(index, 1);
                assert!(value.is_nan());
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }

        let err = chain
            .set_parameters(&[80.0, 60.0], &[f32::INFINITY, 0.0])
            .unwrap_err();
        assert_eq!(
            err,
            ChainError::InvalidValue {
                index: 0,
                value: f32::INFINITY
            }
        );

        assert_eq!(chain.solve(), before);
    }

    #[test]
    fn reach_cache_follows_length_updates() {
        let mut chain = chain_with(Point2::new(0.0, 0.0), &[80.0, 60.0], &[0.0, 0.0]);
        assert!((chain.max_reach() - 140.0).abs() < EPS);

        // Angle-only update leaves the cached reach alone.
        chain.set_parameters(&[80.0, 60.0], &[45.0, -45.0]).unwrap();
        assert!((chain.max_reach() - 140.0).abs() < EPS);

        chain.set_parameters(&[100.0, 50.0], &[45.0, -45.0]).unwrap();
        assert!((chain.max_reach() - 150.0).abs() < EPS);
    }

    #[test]
    fn inner_radius_and_workspace_area() {
        // One segment can always reach the anchor region boundary alone.
        let chain = chain_with(Point2::new(0.0, 0.0), &[100.0], &[0.0]);
        assert!(chain.min_reach().abs() < EPS);

        // Longest 120 vs others 90: the arm cannot fold closer than 30.
        let chain = chain_with(Point2::new(0.0, 0.0), &[120.0, 50.0, 40.0], &[0.0, 0.0, 0.0]);
        assert!((chain.min_reach() - 30.0).abs() < EPS);

        let max = 210.0f32;
        let min = 30.0f32;
        let expected = core::f32::consts::PI * (max * max - min * min);
        assert!((chain.workspace_area() - expected).abs() < 1.0);
    }

    #[test]
    fn construction_rejects_mismatched_config() {
        let cfg = ChainConfig {
            segment_count: 3,
            initial_lengths: vec![100.0, 80.0],
            initial_angles_deg: vec![0.0, 0.0, 0.0],
            ..ChainConfig::default()
        };
        let err = KinematicChain::new(&cfg).unwrap_err();
        assert_eq!(err, ChainError::Configuration { expected: 3, got: 2 });
    }
}
