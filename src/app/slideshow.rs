use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::{
    config::{DEFAULT_DELAY_SECS, MAX_DELAY_SECS, MIN_DELAY_SECS},
    error::{Result, ViewerError},
    store::{ImagePath, ImageSet},
};

/// How the display swaps one bitmap for the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transition {
    #[default]
    None,
    Fade,
    Slide,
}

impl Transition {
    pub const ALL: [Transition; 3] = [Transition::None, Transition::Fade, Transition::Slide];

    pub fn label(self) -> &'static str {
        match self {
            Transition::None => "None",
            Transition::Fade => "Fade",
            Transition::Slide => "Slide",
        }
    }

    /// Opacities and horizontal offsets (as a fraction of the viewport width)
    /// for both bitmaps at `progress` in `0.0..=1.0`.
    pub fn frame(self, progress: f32) -> TransitionFrame {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Transition::None => TransitionFrame::settled(),
            Transition::Fade => TransitionFrame {
                outgoing_opacity: 1.0 - p,
                incoming_opacity: p,
                ..TransitionFrame::settled()
            },
            Transition::Slide => TransitionFrame {
                outgoing_opacity: 1.0,
                incoming_opacity: 1.0,
                outgoing_offset: -p,
                incoming_offset: 1.0 - p,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionFrame {
    pub outgoing_opacity: f32,
    pub incoming_opacity: f32,
    pub outgoing_offset: f32,
    pub incoming_offset: f32,
}

impl TransitionFrame {
    /// Only the incoming bitmap, fully visible and in place.
    pub fn settled() -> Self {
        Self {
            outgoing_opacity: 0.0,
            incoming_opacity: 1.0,
            outgoing_offset: 0.0,
            incoming_offset: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideshowConfig {
    delay_secs: u64,
    transition: Transition,
}

impl SlideshowConfig {
    pub fn new(delay_secs: u64, transition: Transition) -> Result<Self> {
        if !(MIN_DELAY_SECS..=MAX_DELAY_SECS).contains(&delay_secs) {
            return Err(ViewerError::InvalidDelay(delay_secs));
        }
        Ok(Self {
            delay_secs,
            transition,
        })
    }

    pub fn delay_secs(&self) -> u64 {
        self.delay_secs
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            delay_secs: DEFAULT_DELAY_SECS,
            transition: Transition::None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideshowState {
    Idle,
    Running,
}

/// Identifies one scheduled tick. Only the most recently issued handle is
/// honoured; stopping or restarting makes every earlier handle inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickHandle(u64);

#[derive(Clone, Copy, Debug)]
struct PendingTick {
    handle: TickHandle,
    due: Instant,
}

/// What the display should show next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideshowStep {
    pub path: ImagePath,
    pub index: usize,
    pub transition: Transition,
}

pub struct SlideshowController {
    config: SlideshowConfig,
    state: SlideshowState,
    set: ImageSet,
    index: usize,
    pending: Option<PendingTick>,
    issued: u64,
}

impl SlideshowController {
    pub fn new(config: SlideshowConfig) -> Self {
        Self {
            config,
            state: SlideshowState::Idle,
            set: ImageSet::default(),
            index: 0,
            pending: None,
            issued: 0,
        }
    }

    /// Takes effect from the next scheduling; a pending tick keeps its deadline.
    pub fn configure(&mut self, delay_secs: u64, transition: Transition) -> Result<()> {
        self.config = SlideshowConfig::new(delay_secs, transition)?;
        debug!("slideshow configured: {delay_secs}s, {}", transition.label());
        Ok(())
    }

    pub fn start(&mut self, set: &ImageSet, now: Instant) -> Result<SlideshowStep> {
        if set.is_empty() {
            return Err(ViewerError::EmptySet);
        }
        self.set = set.clone();
        self.index = 0;
        self.state = SlideshowState::Running;
        self.schedule(now);
        info!(
            "slideshow started over {} images every {}s",
            self.set.len(),
            self.config.delay_secs()
        );
        self.step().ok_or(ViewerError::EmptySet)
    }

    /// Advances to the next image. Returns `None` without touching anything
    /// if the slideshow is idle or `handle` is not the pending tick.
    pub fn tick(&mut self, handle: TickHandle, now: Instant) -> Option<SlideshowStep> {
        if self.state != SlideshowState::Running {
            return None;
        }
        match self.pending {
            Some(pending) if pending.handle == handle => {}
            _ => return None,
        }

        self.index = (self.index + 1) % self.set.len();
        self.schedule(now);
        debug!("slideshow tick -> {}/{}", self.index + 1, self.set.len());
        self.step()
    }

    /// Fires the pending tick if it is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<SlideshowStep> {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }
        self.tick(pending.handle, now)
    }

    pub fn stop(&mut self) {
        if self.state == SlideshowState::Idle {
            return;
        }
        self.state = SlideshowState::Idle;
        self.pending = None;
        info!("slideshow stopped");
    }

    fn schedule(&mut self, now: Instant) {
        self.issued += 1;
        self.pending = Some(PendingTick {
            handle: TickHandle(self.issued),
            due: now + self.config.delay(),
        });
    }

    fn step(&self) -> Option<SlideshowStep> {
        let path = self.set.get_wrapped(self.index)?.clone();
        Some(SlideshowStep {
            path,
            index: self.index,
            transition: self.config.transition(),
        })
    }

    pub fn pending_handle(&self) -> Option<TickHandle> {
        self.pending.map(|p| p.handle)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    pub fn state(&self) -> SlideshowState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SlideshowState::Running
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn config(&self) -> SlideshowConfig {
        self.config
    }
}

impl Default for SlideshowController {
    fn default() -> Self {
        Self::new(SlideshowConfig::default())
    }
}
