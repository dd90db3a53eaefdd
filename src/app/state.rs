use std::time::Instant;

use tracing::warn;

use crate::app::{
    renderer::Renderer,
    slideshow::{SlideshowConfig, SlideshowController},
};
use crate::store::ImageStore;

/// Everything the viewer knows, independent of the windowing toolkit.
pub struct ViewerState {
    pub store: ImageStore,
    pub renderer: Renderer,
    pub slideshow: SlideshowController,
    pub fullscreen: bool,
    /// Message from the last failed operation, cleared by the next success.
    pub last_error: Option<String>,
}

impl ViewerState {
    pub fn new(config: SlideshowConfig) -> Self {
        Self {
            store: ImageStore::new(),
            renderer: Renderer::new(),
            slideshow: SlideshowController::new(config),
            fullscreen: false,
            last_error: None,
        }
    }

    /// No image on screen: show the import button and the info bar.
    pub fn is_idle(&self) -> bool {
        !self.renderer.has_image()
    }

    /// Runs a due slideshow tick. A frame that fails to decode is skipped and
    /// the previous one stays up; the slideshow keeps going.
    pub fn poll_slideshow(&mut self, now: Instant) {
        let Some(step) = self.slideshow.poll(now) else { return };
        match self.renderer.load(step.path.as_path(), step.transition) {
            Ok(()) => self.last_error = None,
            Err(err) => {
                warn!("slideshow skipped {}: {err}", step.path);
                self.last_error = Some(err.to_string());
            }
        }
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(SlideshowConfig::default())
    }
}
