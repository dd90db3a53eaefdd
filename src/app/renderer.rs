use std::path::Path;

use image::RgbaImage;
use tracing::debug;

use crate::{
    app::slideshow::Transition,
    error::Result,
    image_utils::{decode_file, fit_dimensions, resize_or_fallback, ActiveImage},
};

/// The bitmap currently handed to the display.
pub struct ScaledBitmap {
    pub image: RgbaImage,
    /// Bumped whenever the pixels change, including plain rescales.
    pub generation: u64,
    /// Bumped only when a different image is shown; the display animates
    /// `transition` when this changes.
    pub shown: u64,
    pub transition: Transition,
}

/// Owns the single decoded image and its viewport-sized copy.
#[derive(Default)]
pub struct Renderer {
    active: Option<ActiveImage>,
    scaled: Option<ScaledBitmap>,
    viewport: Option<(u32, u32)>,
    transition: Transition,
    generation: u64,
    shown: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `path` and makes it the active image. On failure the previous
    /// image stays in place.
    pub fn load(&mut self, path: &Path, transition: Transition) -> Result<()> {
        let image = decode_file(path)?;
        self.show(image, transition);
        Ok(())
    }

    /// Installs an already decoded image, dropping the previous one, and
    /// scales it to the last known viewport.
    pub fn show(&mut self, image: ActiveImage, transition: Transition) {
        debug!(
            "showing {} ({}x{})",
            image.path.display(),
            image.width(),
            image.height()
        );
        self.active = Some(image);
        self.scaled = None;
        self.transition = transition;
        self.shown += 1;
        if let Some((w, h)) = self.viewport {
            self.scale_to_fit(w, h);
        }
    }

    /// Fits the active image into the viewport. Cheap to call every frame:
    /// nothing is resampled unless the target size actually changes.
    pub fn scale_to_fit(&mut self, viewport_width: u32, viewport_height: u32) {
        self.viewport = Some((viewport_width, viewport_height));
        let Some(active) = &self.active else { return };

        let (w, h) = fit_dimensions(
            active.width(),
            active.height(),
            viewport_width,
            viewport_height,
        );
        if w == 0 || h == 0 {
            return;
        }
        if let Some(scaled) = &self.scaled {
            if scaled.image.dimensions() == (w, h) {
                return;
            }
        }

        debug!("scaling {}x{} to {w}x{h}", active.width(), active.height());
        let image = resize_or_fallback(&active.pixels, w, h);
        self.generation += 1;
        self.scaled = Some(ScaledBitmap {
            image,
            generation: self.generation,
            shown: self.shown,
            transition: self.transition,
        });
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.scaled = None;
    }

    pub fn active(&self) -> Option<&ActiveImage> {
        self.active.as_ref()
    }

    pub fn scaled(&self) -> Option<&ScaledBitmap> {
        self.scaled.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.active.is_some()
    }

    pub fn viewport(&self) -> Option<(u32, u32)> {
        self.viewport
    }
}
