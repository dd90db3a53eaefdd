use eframe::egui::{self, Rect, Vec2};

use crate::config::{CHROME_HEIGHT, MAX_WINDOW_FRACTION};

pub struct KeyboardState {
    pub toggle_fullscreen: bool,
    pub escape: bool,
}

impl KeyboardState {
    pub fn read(ctx: &egui::Context) -> Self {
        ctx.input(|input| Self {
            toggle_fullscreen: input.key_pressed(egui::Key::F11),
            escape: input.key_pressed(egui::Key::Escape),
        })
    }
}

/// Rect of `size` centred in `canvas`, shifted right by `offset_fraction`
/// of the canvas width.
pub fn placed_rect(canvas: Rect, size: Vec2, offset_fraction: f32) -> Rect {
    let offset = (canvas.size() - size) * 0.5 + egui::vec2(canvas.width() * offset_fraction, 0.0);
    Rect::from_min_size(canvas.min + offset, size)
}

/// Viewport in physical pixels, which is what the renderer scales to.
pub fn viewport_pixels(available: Vec2, pixels_per_point: f32) -> (u32, u32) {
    let w = (available.x * pixels_per_point).floor().max(0.0) as u32;
    let h = (available.y * pixels_per_point).floor().max(0.0) as u32;
    (w, h)
}

/// Window inner size (in points) that shows an image of `image_px` pixels at
/// its natural size plus the menu bar, shrunk to fit the monitor if needed.
pub fn window_size_for(image_px: (u32, u32), pixels_per_point: f32, monitor: Option<Vec2>) -> Vec2 {
    let ppp = pixels_per_point.max(0.1);
    let mut size = egui::vec2(image_px.0 as f32 / ppp, image_px.1 as f32 / ppp + CHROME_HEIGHT);
    if let Some(monitor) = monitor {
        let limit = monitor * MAX_WINDOW_FRACTION;
        size = size.min(limit);
    }
    size.max(egui::vec2(1.0, 1.0))
}
