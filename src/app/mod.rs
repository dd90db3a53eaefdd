pub mod input;
pub mod renderer;
pub mod slideshow;
pub mod state;

use std::{
    path::PathBuf,
    time::Instant,
};

use eframe::{
    egui::{self, Color32, ViewportCommand},
    App, Frame,
};
use tracing::warn;

use crate::{
    config::{INFO_TEXT, MAX_DELAY_SECS, MIN_DELAY_SECS, TRANSITION_DURATION},
    fs_utils::SUPPORTED_EXTENSIONS,
    image_utils::to_color_image,
    ui::{placed_rect, viewport_pixels, window_size_for, KeyboardState},
};

use self::{
    input::{InputEvent, SurfaceCommand},
    renderer::Renderer,
    slideshow::{SlideshowConfig, Transition},
    state::ViewerState,
};

/// Textures on screen. The current texture lives exactly as long as its
/// bitmap is shown; during a transition the outgoing one is kept alongside.
#[derive(Default)]
struct Display {
    current: Option<egui::TextureHandle>,
    outgoing: Option<egui::TextureHandle>,
    animation: Option<(Transition, Instant)>,
    generation: u64,
    shown: u64,
}

impl Display {
    fn sync(&mut self, ctx: &egui::Context, renderer: &Renderer, now: Instant) {
        let Some(bitmap) = renderer.scaled() else {
            if !renderer.has_image() {
                *self = Self::default();
            }
            return;
        };
        if bitmap.generation == self.generation {
            return;
        }

        let color_image = to_color_image(&bitmap.image);
        let new_image = bitmap.shown != self.shown;
        if new_image && bitmap.transition != Transition::None && self.current.is_some() {
            self.outgoing = self.current.take();
            self.animation = Some((bitmap.transition, now));
        }
        if let Some(texture) = self.current.as_mut() {
            texture.set(color_image, egui::TextureOptions::LINEAR);
        } else {
            self.current = Some(ctx.load_texture(
                "viewer-current",
                color_image,
                egui::TextureOptions::LINEAR,
            ));
        }
        self.generation = bitmap.generation;
        self.shown = bitmap.shown;
    }

    fn paint(&mut self, ctx: &egui::Context, painter: &egui::Painter, canvas: egui::Rect, now: Instant) {
        let Some(current) = &self.current else { return };
        let ppp = ctx.pixels_per_point();
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

        let frame = match self.animation {
            Some((transition, started)) => {
                let progress = now.duration_since(started).as_secs_f32()
                    / TRANSITION_DURATION.as_secs_f32();
                if progress >= 1.0 {
                    self.animation = None;
                    self.outgoing = None;
                } else {
                    ctx.request_repaint();
                }
                transition.frame(progress)
            }
            None => Transition::None.frame(1.0),
        };

        if let Some(outgoing) = &self.outgoing {
            let rect = placed_rect(canvas, outgoing.size_vec2() / ppp, frame.outgoing_offset);
            painter.image(
                outgoing.id(),
                rect,
                uv,
                Color32::WHITE.gamma_multiply(frame.outgoing_opacity),
            );
        }
        let rect = placed_rect(canvas, current.size_vec2() / ppp, frame.incoming_offset);
        painter.image(
            current.id(),
            rect,
            uv,
            Color32::WHITE.gamma_multiply(frame.incoming_opacity),
        );
    }
}

struct SettingsWindow {
    open: bool,
    delay_secs: u64,
    transition: Transition,
}

enum MenuAction {
    Open,
    Settings,
    ChooseFolder,
    Start,
    Exit,
}

pub struct ImageViewerApp {
    pub state: ViewerState,
    display: Display,
    settings: SettingsWindow,
}

impl ImageViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial: Option<PathBuf>) -> Self {
        let config = SlideshowConfig::default();
        let mut app = Self {
            state: ViewerState::new(config),
            display: Display::default(),
            settings: SettingsWindow {
                open: false,
                delay_secs: config.delay_secs(),
                transition: config.transition(),
            },
        };

        if let Some(path) = initial {
            let event = if path.is_dir() {
                app.settings.open = true;
                InputEvent::ChooseFolder(path)
            } else {
                InputEvent::OpenFile(path)
            };
            app.dispatch(&cc.egui_ctx, event, Instant::now());
        }
        app
    }

    /// Routes an event through the viewer state and carries out the window
    /// commands it produces. Returns whether the event succeeded.
    fn dispatch(&mut self, ctx: &egui::Context, event: InputEvent, now: Instant) -> bool {
        match self.state.dispatch(event, now) {
            Ok(commands) => {
                for command in commands {
                    Self::apply_command(ctx, command);
                }
                true
            }
            Err(err) => {
                warn!("{err}");
                false
            }
        }
    }

    fn apply_command(ctx: &egui::Context, command: SurfaceCommand) {
        match command {
            SurfaceCommand::SetFullscreen(on) => {
                ctx.send_viewport_cmd(ViewportCommand::Fullscreen(on));
            }
            SurfaceCommand::FitWindow { width, height } => {
                let monitor = ctx.input(|i| i.viewport().monitor_size);
                let size = window_size_for((width, height), ctx.pixels_per_point(), monitor);
                ctx.send_viewport_cmd(ViewportCommand::InnerSize(size));
            }
            SurfaceCommand::Close => ctx.send_viewport_cmd(ViewportCommand::Close),
        }
    }

    fn handle_menu_action(&mut self, ctx: &egui::Context, action: MenuAction, now: Instant) {
        match action {
            MenuAction::Open => {
                let picked = rfd::FileDialog::new()
                    .add_filter("Image files", SUPPORTED_EXTENSIONS)
                    .pick_file();
                // Cancelled dialogs are not an error.
                if let Some(path) = picked {
                    self.dispatch(ctx, InputEvent::OpenFile(path), now);
                }
            }
            MenuAction::Settings => self.settings.open = true,
            MenuAction::ChooseFolder => {
                if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                    self.dispatch(ctx, InputEvent::ChooseFolder(dir), now);
                }
            }
            MenuAction::Start => {
                if self.dispatch(ctx, InputEvent::StartSlideshow, now) {
                    self.settings.open = false;
                }
            }
            MenuAction::Exit => {
                self.dispatch(ctx, InputEvent::Exit, now);
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context, now: Instant) {
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });
        if let Some(path) = dropped {
            self.dispatch(ctx, InputEvent::Dropped(path), now);
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) -> Option<MenuAction> {
        let mut action = None;
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open").clicked() {
                        action = Some(MenuAction::Open);
                        ui.close();
                    }
                    if ui.button("Slideshow").clicked() {
                        action = Some(MenuAction::Settings);
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        action = Some(MenuAction::Exit);
                        ui.close();
                    }
                });
            });
        });
        action
    }

    fn settings_window(&mut self, ctx: &egui::Context, now: Instant) -> Option<MenuAction> {
        if !self.settings.open {
            return None;
        }
        let mut open = true;
        let mut action = None;
        let mut delay_secs = self.settings.delay_secs;
        let mut transition = self.settings.transition;
        let selected = self.state.store.len();

        egui::Window::new("Slideshow Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.label("Seconds between images:");
                ui.add(egui::Slider::new(&mut delay_secs, MIN_DELAY_SECS..=MAX_DELAY_SECS));
                ui.add_space(5.0);

                ui.label("Transition type:");
                egui::ComboBox::from_id_salt("transition")
                    .selected_text(transition.label())
                    .show_ui(ui, |ui| {
                        for option in Transition::ALL {
                            ui.selectable_value(&mut transition, option, option.label());
                        }
                    });
                ui.add_space(10.0);

                if ui.button("Choose Folder").clicked() {
                    action = Some(MenuAction::ChooseFolder);
                }
                ui.label(format!("{selected} image(s) selected"));
                ui.add_space(10.0);
                if ui.button("Start Slideshow").clicked() {
                    action = Some(MenuAction::Start);
                }
            });

        self.settings.open = open;
        if delay_secs != self.settings.delay_secs || transition != self.settings.transition {
            let event = InputEvent::Configure {
                delay_secs,
                transition,
            };
            if self.dispatch(ctx, event, now) {
                self.settings.delay_secs = delay_secs;
                self.settings.transition = transition;
            }
        }
        action
    }

    fn info_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("info_bar")
            .frame(
                egui::Frame::new()
                    .fill(Color32::GRAY)
                    .inner_margin(egui::Margin::same(4)),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.colored_label(Color32::WHITE, INFO_TEXT);
                });
            });
    }

    fn draw_error(&self, painter: &egui::Painter, canvas: egui::Rect) {
        let Some(message) = &self.state.last_error else { return };
        let galley = painter.layout_no_wrap(
            message.clone(),
            egui::FontId::monospace(14.0),
            Color32::WHITE,
        );
        let rect = egui::Align2::LEFT_BOTTOM
            .anchor_size(canvas.left_bottom() + egui::vec2(12.0, -12.0), galley.size());
        painter.rect_filled(rect.expand(4.0), 4.0, Color32::from_black_alpha(178));
        painter.galley(rect.min, galley, Color32::WHITE);
    }
}

impl App for ImageViewerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut Frame) {
        let _ = frame;
        let now = Instant::now();

        // The window manager can leave fullscreen behind our back.
        if let Some(fullscreen) = ctx.input(|i| i.viewport().fullscreen) {
            self.state.fullscreen = fullscreen;
        }

        self.handle_dropped_files(ctx, now);

        let keys = KeyboardState::read(ctx);
        if keys.toggle_fullscreen {
            self.dispatch(ctx, InputEvent::ToggleFullscreen, now);
        }
        if keys.escape {
            self.dispatch(ctx, InputEvent::Escape, now);
        }

        self.state.poll_slideshow(now);

        let mut actions = Vec::new();
        if !self.state.fullscreen {
            actions.extend(self.menu_bar(ctx));
        }
        actions.extend(self.settings_window(ctx, now));
        for action in actions {
            self.handle_menu_action(ctx, action, now);
        }

        if self.state.is_idle() {
            self.info_bar(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.is_idle() {
                let mut import = false;
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    import = ui.button("Import Image").clicked();
                });
                let canvas = ui.max_rect();
                self.draw_error(ui.painter(), canvas);
                if import {
                    self.handle_menu_action(ctx, MenuAction::Open, now);
                }
                return;
            }

            let (width, height) = viewport_pixels(ui.available_size(), ctx.pixels_per_point());
            self.dispatch(ctx, InputEvent::Resize { width, height }, now);
            self.display.sync(ctx, &self.state.renderer, now);

            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::hover());
            let painter = painter.with_clip_rect(response.rect);
            self.display.paint(ctx, &painter, response.rect, now);
            self.draw_error(&painter, response.rect);
        });

        if self.state.is_idle() {
            self.display.sync(ctx, &self.state.renderer, now);
        }
        if let Some(deadline) = self.state.slideshow.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}
