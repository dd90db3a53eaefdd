//! Turns user actions into calls on the store, renderer and slideshow.

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use tracing::info;

use crate::{
    app::{slideshow::Transition, state::ViewerState},
    error::Result,
    image_utils::decode_file,
    store::ImagePath,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// A file picked in the open dialog.
    OpenFile(PathBuf),
    /// A drag-and-drop payload, possibly wrapped in `{...}`.
    Dropped(PathBuf),
    /// A folder picked for the slideshow.
    ChooseFolder(PathBuf),
    Configure { delay_secs: u64, transition: Transition },
    StartSlideshow,
    ToggleFullscreen,
    Escape,
    Resize { width: u32, height: u32 },
    Exit,
}

/// Requests for the window that the toolkit layer carries out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceCommand {
    SetFullscreen(bool),
    /// Size the window for an image of this many pixels.
    FitWindow { width: u32, height: u32 },
    Close,
}

/// Removes the braces some platforms put around dropped paths containing spaces.
pub fn strip_drop_braces(raw: &str) -> &str {
    raw.strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
        .unwrap_or(raw)
}

fn unquote_dropped(raw: PathBuf) -> PathBuf {
    match raw.to_str() {
        Some(s) => PathBuf::from(strip_drop_braces(s)),
        None => raw,
    }
}

impl ViewerState {
    /// Applies one event. A failed event is abandoned and its message kept
    /// in `last_error`.
    pub fn dispatch(&mut self, event: InputEvent, now: Instant) -> Result<Vec<SurfaceCommand>> {
        let result = self.apply(event, now);
        if let Err(err) = &result {
            self.last_error = Some(err.to_string());
        }
        result
    }

    fn apply(&mut self, event: InputEvent, now: Instant) -> Result<Vec<SurfaceCommand>> {
        match event {
            InputEvent::OpenFile(path) => self.open_file(path),
            InputEvent::Dropped(payload) => self.open_file(unquote_dropped(payload)),
            InputEvent::ChooseFolder(dir) => {
                self.choose_folder(&dir)?;
                Ok(Vec::new())
            }
            InputEvent::Configure {
                delay_secs,
                transition,
            } => {
                self.slideshow.configure(delay_secs, transition)?;
                Ok(Vec::new())
            }
            InputEvent::StartSlideshow => {
                self.start_slideshow(now)?;
                Ok(Vec::new())
            }
            InputEvent::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                Ok(vec![SurfaceCommand::SetFullscreen(self.fullscreen)])
            }
            InputEvent::Escape => Ok(self.escape()),
            InputEvent::Resize { width, height } => {
                self.renderer.scale_to_fit(width, height);
                Ok(Vec::new())
            }
            InputEvent::Exit => Ok(vec![SurfaceCommand::Close]),
        }
    }

    fn open_file(&mut self, raw: PathBuf) -> Result<Vec<SurfaceCommand>> {
        let path = ImagePath::new(raw)?;
        let image = decode_file(path.as_path())?;
        let (width, height) = image.dimensions();

        self.store.set_single(path.clone())?;
        // A single opened image replaces whatever the slideshow was cycling through.
        self.slideshow.stop();
        self.renderer.show(image, Transition::None);
        self.last_error = None;
        info!("opened {path} ({width}x{height})");

        if self.fullscreen {
            Ok(Vec::new())
        } else {
            Ok(vec![SurfaceCommand::FitWindow { width, height }])
        }
    }

    fn choose_folder(&mut self, dir: &Path) -> Result<usize> {
        let count = self.store.set_folder(dir)?;
        self.last_error = None;
        Ok(count)
    }

    fn start_slideshow(&mut self, now: Instant) -> Result<()> {
        let step = self.slideshow.start(self.store.image_set(), now)?;
        if let Err(err) = self.renderer.load(step.path.as_path(), step.transition) {
            self.slideshow.stop();
            return Err(err);
        }
        self.last_error = None;
        Ok(())
    }

    /// Leaving fullscreen wins over stopping the slideshow.
    fn escape(&mut self) -> Vec<SurfaceCommand> {
        if self.fullscreen {
            self.fullscreen = false;
            return vec![SurfaceCommand::SetFullscreen(false)];
        }
        if self.slideshow.is_running() {
            self.slideshow.stop();
            self.renderer.clear();
        }
        Vec::new()
    }
}
