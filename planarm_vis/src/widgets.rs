//! Immediate-mode control widgets.
//!
//! Everything here polls the mouse and redraws itself once per frame; there
//! is no retained widget tree. The value mapping helpers are plain math so
//! they stay testable without a window.

use macroquad::prelude::*;

pub const WIDGET_FONT_SIZE: f32 = 18.0;

const TRACK_COLOR: Color = Color::new(0.20, 0.20, 0.20, 1.0);
const TRACK_EDGE_COLOR: Color = Color::new(0.31, 0.31, 0.31, 1.0);
const HANDLE_COLOR: Color = Color::new(0.47, 0.47, 0.47, 1.0);
const HANDLE_EDGE_COLOR: Color = Color::new(0.63, 0.63, 0.63, 1.0);

/// Where `value` sits inside `[min, max]`, clamped to `[0, 1]`.
pub fn fraction_of(min: f32, max: f32, value: f32) -> f32 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Where `mouse_x` sits along the track, clamped to `[0, 1]`.
pub fn fraction_along(track_x: f32, track_w: f32, mouse_x: f32) -> f32 {
    if track_w <= 0.0 {
        return 0.0;
    }
    ((mouse_x - track_x) / track_w).clamp(0.0, 1.0)
}

/// Maps a `[0, 1]` fraction back into `[min, max]`.
pub fn value_at(min: f32, max: f32, frac: f32) -> f32 {
    min + frac.clamp(0.0, 1.0) * (max - min)
}

/// A horizontal slider with a draggable handle.
///
/// `current_value` is always inside the configured range; the range is the
/// only clamping the rest of the app relies on.
#[derive(Debug, Clone)]
pub struct Slider {
    rect: Rect,
    min: f32,
    max: f32,
    val: f32,
    label: String,
    dragging: bool,
}

impl Slider {
    pub fn new(rect: Rect, min: f32, max: f32, initial: f32, label: impl Into<String>) -> Self {
        Self {
            rect,
            min,
            max,
            val: initial.clamp(min, max),
            label: label.into(),
            dragging: false,
        }
    }

    pub fn current_value(&self) -> f32 {
        self.val
    }

    /// Polls the mouse, updates the value, and redraws. Call once per frame.
    pub fn tick(&mut self) {
        let (mx, my) = mouse_position();

        if is_mouse_button_pressed(MouseButton::Left) && self.grab_zone().contains(vec2(mx, my)) {
            self.dragging = true;
        }
        if !is_mouse_button_down(MouseButton::Left) {
            self.dragging = false;
        }
        if self.dragging {
            let frac = fraction_along(self.rect.x, self.rect.w, mx);
            self.val = value_at(self.min, self.max, frac);
        }

        self.draw();
    }

    // Slightly larger than the track so the handle overhang is grabbable.
    fn grab_zone(&self) -> Rect {
        Rect::new(
            self.rect.x - 6.0,
            self.rect.y - 4.0,
            self.rect.w + 12.0,
            self.rect.h + 8.0,
        )
    }

    fn handle_rect(&self) -> Rect {
        let frac = fraction_of(self.min, self.max, self.val);
        Rect::new(
            self.rect.x + frac * self.rect.w - 6.0,
            self.rect.y - 3.0,
            12.0,
            self.rect.h + 6.0,
        )
    }

    fn draw(&self) {
        draw_rectangle(self.rect.x, self.rect.y, self.rect.w, self.rect.h, TRACK_COLOR);
        draw_rectangle_lines(
            self.rect.x,
            self.rect.y,
            self.rect.w,
            self.rect.h,
            1.0,
            TRACK_EDGE_COLOR,
        );

        let h = self.handle_rect();
        draw_rectangle(h.x, h.y, h.w, h.h, HANDLE_COLOR);
        draw_rectangle_lines(h.x, h.y, h.w, h.h, 1.0, HANDLE_EDGE_COLOR);

        draw_text(
            &format!("{}: {:.1}", self.label, self.val),
            self.rect.x,
            self.rect.y - 8.0,
            WIDGET_FONT_SIZE,
            WHITE,
        );
    }
}

/// Draws a clickable button, returns true on the frame it was clicked.
pub fn button(rect: Rect, label: &str, active: bool) -> bool {
    let (mx, my) = mouse_position();
    let hovered = rect.contains(vec2(mx, my));
    let clicked = hovered && is_mouse_button_pressed(MouseButton::Left);

    let bg = if active {
        Color::new(0.20, 0.45, 0.22, 1.0)
    } else if hovered {
        Color::new(0.25, 0.25, 0.25, 1.0)
    } else {
        Color::new(0.18, 0.18, 0.18, 1.0)
    };

    draw_rectangle(rect.x, rect.y, rect.w, rect.h, bg);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, GRAY);
    draw_text(
        label,
        rect.x + 10.0,
        rect.y + rect.h * 0.72,
        WIDGET_FONT_SIZE,
        WHITE,
    );

    clicked
}

/// Subtle panel background for readability.
pub fn draw_panel(rect: Rect) {
    draw_rectangle(
        rect.x,
        rect.y,
        rect.w,
        rect.h,
        Color::new(0.12, 0.14, 0.20, 1.0),
    );
    draw_rectangle_lines(
        rect.x,
        rect.y,
        rect.w,
        rect.h,
        2.0,
        Color::new(0.24, 0.25, 0.31, 1.0),
    );
}
