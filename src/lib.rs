//! # planarm
//!
//! Forward kinematics for a planar articulated arm.
//!
//! A chain of rigid segments joined by rotational joints: every segment has
//! a length, every joint a relative angle, and the pose is a pure function
//! of those parameters. This crate is the computation half of the simulator;
//! it has no windowing or input dependency and is fully testable headless.
//!
//! ## Quick Start
//!
//! ```
//! use planarm::prelude::*;
//!
//! let cfg = ChainConfig::default();
//! let mut chain = KinematicChain::new(&cfg).unwrap();
//!
//! let lengths = vec![100.0; cfg.segment_count];
//! let angles = vec![0.0; cfg.segment_count];
//! chain.set_parameters(&lengths, &angles).unwrap();
//!
//! let pose = chain.solve();
//! assert_eq!(pose.joints().len(), cfg.segment_count + 1);
//! ```
//!
//! ## Coordinate convention
//!
//! Screen space: `x` grows right, `y` grows down. A positive relative angle
//! turns its segment clockwise as seen on screen. A joint's absolute heading
//! is the sum of all relative angles from the base up to and including it.
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialization support for config and pose types
//!
//! ## Modules
//!
//! - [`chain`]: the kinematic chain, pose snapshots, and error taxonomy
//! - [`config`]: compiled-in simulator configuration

pub mod chain;
pub mod config;

/// Prelude module for convenient imports.
///
/// ```
/// use planarm::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chain::{ChainError, ChainState, KinematicChain, Point2};
    pub use crate::config::ChainConfig;
}
