//! Interactive planar arm simulator.
//!
//! One window, one thread, one loop: every frame reads the sliders, feeds
//! the values into the kinematic chain, solves the pose, and redraws the
//! whole scene. The chain itself lives in the `planarm` crate and knows
//! nothing about windows or input.

use std::time::Duration;

use macroquad::prelude::*;
use planarm::prelude::*;
use tracing::{error, info};

mod scene;
mod widgets;

use scene::Trace;
use widgets::{button, draw_panel, Slider};

const WINDOW_W: i32 = 1400;
const WINDOW_H: i32 = 900;
const TARGET_FPS: f64 = 60.0;

const BG_COLOR: Color = Color::new(0.06, 0.08, 0.14, 1.0);
const HELP_COLOR: Color = Color::new(0.71, 0.71, 0.71, 1.0);

const PANEL_X: f32 = 20.0;
const PANEL_W: f32 = 300.0;
const SLIDER_X: f32 = 50.0;
const SLIDER_W: f32 = 220.0;
const SLIDER_H: f32 = 18.0;
const SLIDER_STEP: f32 = 50.0;
const SLIDERS_Y0: f32 = 100.0;
const INFO_LINE_H: f32 = 20.0;

/// How many end-effector positions the trace overlay keeps.
const TRACE_CAP: usize = 500;

fn window_conf() -> Conf {
    Conf {
        window_title: "planarm_viz".to_owned(),
        window_width: WINDOW_W,
        window_height: WINDOW_H,
        ..Default::default()
    }
}

fn make_sliders(cfg: &ChainConfig) -> (Vec<Slider>, Vec<Slider>) {
    let n = cfg.segment_count;
    let (len_min, len_max) = cfg.length_range;
    let (ang_min, ang_max) = cfg.angle_range_deg;

    let lengths = (0..n)
        .map(|i| {
            Slider::new(
                Rect::new(SLIDER_X, SLIDERS_Y0 + i as f32 * SLIDER_STEP, SLIDER_W, SLIDER_H),
                len_min,
                len_max,
                cfg.initial_lengths[i],
                format!("Segment {} Length", i + 1),
            )
        })
        .collect();

    let angles_y0 = SLIDERS_Y0 + n as f32 * SLIDER_STEP + 30.0;
    let angles = (0..n)
        .map(|i| {
            Slider::new(
                Rect::new(SLIDER_X, angles_y0 + i as f32 * SLIDER_STEP, SLIDER_W, SLIDER_H),
                ang_min,
                ang_max,
                cfg.initial_angles_deg[i],
                format!("Joint {} Angle", i + 1),
            )
        })
        .collect();

    (lengths, angles)
}

/// Sleeps out the rest of the frame period so the loop holds the target
/// cadence even when a frame finishes early.
fn pace_frame(frame_start: f64) {
    let budget = 1.0 / TARGET_FPS;
    let spent = get_time() - frame_start;
    if spent < budget {
        std::thread::sleep(Duration::from_secs_f64(budget - spent));
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt::init();

    let cfg = ChainConfig::default();
    let mut chain = match KinematicChain::new(&cfg) {
        Ok(chain) => chain,
        Err(e) => {
            error!("compiled-in chain configuration is broken: {e}");
            std::process::exit(1);
        }
    };
    info!(segments = cfg.segment_count, "planarm_viz starting");

    let (mut length_sliders, mut angle_sliders) = make_sliders(&cfg);
    let clear_button = Rect::new(
        SLIDER_X,
        SLIDERS_Y0 + (2 * cfg.segment_count) as f32 * SLIDER_STEP + 40.0,
        120.0,
        28.0,
    );
    let info_y0 = clear_button.y + 60.0;

    let mut trace = Trace::new(TRACE_CAP);
    let mut show_trace = true;
    let mut show_workspace = true;

    let mut lengths = vec![0.0f32; cfg.segment_count];
    let mut angles = vec![0.0f32; cfg.segment_count];

    loop {
        let frame_start = get_time();

        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::T) {
            show_trace = !show_trace;
        }
        if is_key_pressed(KeyCode::W) {
            show_workspace = !show_workspace;
        }
        if is_key_pressed(KeyCode::C) {
            trace.clear();
        }

        clear_background(BG_COLOR);

        // Control panel: sliders report values already clamped to their
        // ranges, which is the only clamping the chain relies on.
        draw_panel(Rect::new(PANEL_X, 20.0, PANEL_W, WINDOW_H as f32 - 40.0));
        draw_text("Robot Arm Simulator", PANEL_X + 10.0, 54.0, 32.0, WHITE);

        for (i, slider) in length_sliders.iter_mut().enumerate() {
            slider.tick();
            lengths[i] = slider.current_value();
        }
        for (i, slider) in angle_sliders.iter_mut().enumerate() {
            slider.tick();
            angles[i] = slider.current_value();
        }

        if button(clear_button, "Clear Trace", false) {
            trace.clear();
        }

        // A rejection here means a widget broke its contract. Surface it
        // and skip the frame rather than draw a silently wrong pose.
        if let Err(e) = chain.set_parameters(&lengths, &angles) {
            error!("skipping frame, slider values violated the chain contract: {e}");
            next_frame().await;
            continue;
        }
        let pose = chain.solve();
        trace.record(pose.end_effector());

        if show_workspace {
            scene::draw_workspace_rings(chain.anchor(), chain.max_reach(), chain.min_reach());
        }
        if show_trace {
            scene::draw_trace(&trace);
        }
        scene::draw_arm(&pose);

        let ee = pose.end_effector();
        let info = [
            format!("End Effector: ({:.1}, {:.1})", ee.x, ee.y),
            format!("Max Reach: {:.1}", chain.max_reach()),
            format!("Min Reach: {:.1}", chain.min_reach()),
            format!("Workspace: {:.0} px^2", chain.workspace_area()),
            format!("Segments: {}", chain.segment_count()),
            format!("Trace Points: {}", trace.len()),
            String::new(),
            "Controls:".to_owned(),
            "T - Toggle trace".to_owned(),
            "W - Toggle workspace".to_owned(),
            "C - Clear trace".to_owned(),
            "Esc - Quit".to_owned(),
        ];
        for (i, line) in info.iter().enumerate() {
            let color = if line.contains(" - ") { HELP_COLOR } else { WHITE };
            draw_text(line, PANEL_X + 10.0, info_y0 + i as f32 * INFO_LINE_H, 18.0, color);
        }

        pace_frame(frame_start);
        next_frame().await;
    }

    info!("planarm_viz shutting down");
}
