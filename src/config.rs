//! Compile-time defaults. Nothing here is persisted between runs.

use std::time::Duration;

pub const APP_NAME: &str = "Image Viewer";

pub const INITIAL_WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

/// Fraction of the monitor a freshly opened image may claim for the window.
pub const MAX_WINDOW_FRACTION: f32 = 0.9;

pub const MIN_DELAY_SECS: u64 = 1;
pub const MAX_DELAY_SECS: u64 = 10;
pub const DEFAULT_DELAY_SECS: u64 = 3;

pub const TRANSITION_DURATION: Duration = Duration::from_millis(400);

pub const INFO_TEXT: &str = "Drag and drop an image or click 'Import Image'";

/// Vertical space (points) taken by the menu bar above the image.
pub const CHROME_HEIGHT: f32 = 30.0;
