//! Arm drawing and the end-effector trace overlay.
//!
//! The trace is pure view state: it never feeds back into the kinematics,
//! so the pose itself stays a function of the current slider values alone.

use macroquad::prelude::*;
use planarm::chain::{ChainState, Point2};

/// Minimum end-effector movement (px) before a new trace point is kept.
const TRACE_MIN_STEP: f32 = 2.0;

const ARM_COLOR: Color = Color::new(0.27, 0.51, 1.0, 1.0);
const ARM_HIGHLIGHT: Color = Color::new(0.39, 0.63, 1.0, 1.0);
const JOINT_COLOR: Color = Color::new(1.0, 0.31, 0.31, 1.0);
const JOINT_HIGHLIGHT: Color = Color::new(1.0, 0.47, 0.47, 1.0);
const EFFECTOR_COLOR: Color = Color::new(0.31, 1.0, 0.31, 1.0);
const EFFECTOR_HIGHLIGHT: Color = Color::new(0.47, 1.0, 0.47, 1.0);
const TRACE_COLOR: Color = Color::new(1.0, 1.0, 0.39, 1.0);
const RING_COLOR: Color = Color::new(0.16, 0.16, 0.16, 1.0);

/// Bounded history of recent end-effector positions.
#[derive(Debug, Clone)]
pub struct Trace {
    points: Vec<Point2>,
    cap: usize,
}

impl Trace {
    pub fn new(cap: usize) -> Self {
        Self {
            points: Vec::with_capacity(cap),
            cap,
        }
    }

    /// Appends a point if the effector moved far enough; drops the oldest
    /// point once the buffer is full.
    pub fn record(&mut self, p: Point2) {
        if let Some(&last) = self.points.last() {
            if last.distance(p) <= TRACE_MIN_STEP {
                return;
            }
        }
        self.points.push(p);
        if self.points.len() > self.cap {
            self.points.remove(0);
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }
}

/// Outer max-reach ring, plus the inner fold-back ring when it exists.
pub fn draw_workspace_rings(anchor: Point2, max_reach: f32, min_reach: f32) {
    draw_circle_lines(anchor.x, anchor.y, max_reach, 2.0, RING_COLOR);
    if min_reach > 0.0 {
        draw_circle_lines(anchor.x, anchor.y, min_reach, 2.0, RING_COLOR);
    }
}

pub fn draw_trace(trace: &Trace) {
    let pts = trace.points();
    for pair in pts.windows(2) {
        draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, 2.0, TRACE_COLOR);
    }
}

/// Draws the arm over whatever is already on screen: segments first, then
/// joints with index labels, then the end effector on top.
pub fn draw_arm(pose: &ChainState) {
    let joints = pose.joints();

    for pair in joints.windows(2) {
        draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, 12.0, ARM_COLOR);
        draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, 8.0, ARM_HIGHLIGHT);
    }

    // Every joint except the effector tip gets a marker and a number.
    for (i, p) in joints[..joints.len() - 1].iter().enumerate() {
        draw_circle(p.x, p.y, 10.0, JOINT_COLOR);
        draw_circle(p.x, p.y, 8.0, JOINT_HIGHLIGHT);
        draw_text(&format!("{}", i + 1), p.x - 5.0, p.y - 14.0, 16.0, WHITE);
    }

    let ee = pose.end_effector();
    draw_circle(ee.x, ee.y, 15.0, EFFECTOR_COLOR);
    draw_circle(ee.x, ee.y, 12.0, EFFECTOR_HIGHLIGHT);
}
