use imageviewer::app::input::{strip_drop_braces, InputEvent, SurfaceCommand};
use imageviewer::app::slideshow::{SlideshowState, Transition};
use imageviewer::app::state::ViewerState;
use imageviewer::ViewerError;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tempfile::tempdir;

mod common;
use common::{write_garbage, write_solid};

#[test]
fn strip_drop_braces_only_removes_enclosing_pair() {
    assert_eq!(strip_drop_braces("{/tmp/my photo.png}"), "/tmp/my photo.png");
    assert_eq!(strip_drop_braces("/tmp/plain.png"), "/tmp/plain.png");
    assert_eq!(strip_drop_braces("{/tmp/half.png"), "{/tmp/half.png");
    assert_eq!(strip_drop_braces("/tmp/{x}.png"), "/tmp/{x}.png");
}

#[test]
fn open_file_displays_image_and_fits_window() {
    let tmp = tempdir().unwrap();
    let path = write_solid(tmp.path(), "photo.png", 120, 80);
    let mut state = ViewerState::default();
    assert!(state.is_idle());

    let commands = state
        .dispatch(InputEvent::OpenFile(path.clone()), Instant::now())
        .unwrap();
    assert_eq!(
        commands,
        vec![SurfaceCommand::FitWindow {
            width: 120,
            height: 80
        }]
    );
    assert!(!state.is_idle());
    assert_eq!(state.store.len(), 1);
    assert_eq!(state.renderer.active().unwrap().path, path);
}

#[test]
fn dropped_payload_with_braces_is_opened() {
    let tmp = tempdir().unwrap();
    let path = write_solid(tmp.path(), "my photo.jpg", 16, 16);
    let payload = PathBuf::from(format!("{{{}}}", path.display()));
    let mut state = ViewerState::default();

    state.dispatch(InputEvent::Dropped(payload), Instant::now()).unwrap();
    assert_eq!(state.renderer.active().unwrap().path, path);
}

#[test]
fn open_in_fullscreen_does_not_resize_window() {
    let tmp = tempdir().unwrap();
    let path = write_solid(tmp.path(), "photo.png", 10, 10);
    let mut state = ViewerState::default();
    let now = Instant::now();
    state.dispatch(InputEvent::ToggleFullscreen, now).unwrap();
    let commands = state.dispatch(InputEvent::OpenFile(path), now).unwrap();
    assert!(commands.is_empty());
}

#[test]
fn failed_open_leaves_previous_state() {
    let tmp = tempdir().unwrap();
    let good = write_solid(tmp.path(), "good.png", 10, 10);
    let bad = write_garbage(tmp.path(), "bad.png");
    let mut state = ViewerState::default();
    let now = Instant::now();
    state.dispatch(InputEvent::OpenFile(good.clone()), now).unwrap();

    let err = state.dispatch(InputEvent::OpenFile(bad), now).unwrap_err();
    assert!(matches!(err, ViewerError::Decode { .. }));
    assert_eq!(state.renderer.active().unwrap().path, good);
    assert_eq!(state.store.current().unwrap().as_path(), good.as_path());
    assert!(state.last_error.is_some());

    let err = state
        .dispatch(InputEvent::OpenFile(tmp.path().join("notes.txt")), now)
        .unwrap_err();
    assert!(matches!(err, ViewerError::InvalidPath { .. }));

    state.dispatch(InputEvent::OpenFile(good), now).unwrap();
    assert!(state.last_error.is_none());
}

#[test]
fn choose_folder_does_not_display_anything() {
    let tmp = tempdir().unwrap();
    write_solid(tmp.path(), "a.png", 8, 8);
    write_solid(tmp.path(), "b.png", 8, 8);
    let mut state = ViewerState::default();

    state
        .dispatch(InputEvent::ChooseFolder(tmp.path().to_path_buf()), Instant::now())
        .unwrap();
    assert_eq!(state.store.len(), 2);
    assert!(state.is_idle());
    assert_eq!(state.slideshow.state(), SlideshowState::Idle);
}

#[test]
fn start_without_images_fails_and_stays_idle() {
    let mut state = ViewerState::default();
    let err = state
        .dispatch(InputEvent::StartSlideshow, Instant::now())
        .unwrap_err();
    assert!(matches!(err, ViewerError::EmptySet));
    assert_eq!(state.slideshow.state(), SlideshowState::Idle);
    assert!(state.is_idle());
}

#[test]
fn slideshow_runs_and_escape_returns_to_idle_view() {
    let tmp = tempdir().unwrap();
    let a = write_solid(tmp.path(), "a.png", 8, 8);
    let b = write_solid(tmp.path(), "b.png", 8, 8);
    let mut state = ViewerState::default();
    let t0 = Instant::now();

    state
        .dispatch(InputEvent::ChooseFolder(tmp.path().to_path_buf()), t0)
        .unwrap();
    state
        .dispatch(
            InputEvent::Configure {
                delay_secs: 1,
                transition: Transition::Slide,
            },
            t0,
        )
        .unwrap();
    state.dispatch(InputEvent::StartSlideshow, t0).unwrap();
    assert_eq!(state.renderer.active().unwrap().path, a);

    state.poll_slideshow(t0 + Duration::from_secs(1));
    assert_eq!(state.renderer.active().unwrap().path, b);

    let commands = state.dispatch(InputEvent::Escape, t0).unwrap();
    assert!(commands.is_empty());
    assert_eq!(state.slideshow.state(), SlideshowState::Idle);
    assert!(state.is_idle());

    state.poll_slideshow(t0 + Duration::from_secs(5));
    assert!(state.is_idle());
}

#[test]
fn escape_leaves_fullscreen_before_stopping_slideshow() {
    let tmp = tempdir().unwrap();
    write_solid(tmp.path(), "a.png", 8, 8);
    let mut state = ViewerState::default();
    let now = Instant::now();
    state
        .dispatch(InputEvent::ChooseFolder(tmp.path().to_path_buf()), now)
        .unwrap();
    state.dispatch(InputEvent::StartSlideshow, now).unwrap();
    assert_eq!(
        state.dispatch(InputEvent::ToggleFullscreen, now).unwrap(),
        vec![SurfaceCommand::SetFullscreen(true)]
    );

    let commands = state.dispatch(InputEvent::Escape, now).unwrap();
    assert_eq!(commands, vec![SurfaceCommand::SetFullscreen(false)]);
    assert!(!state.fullscreen);
    assert!(state.slideshow.is_running());

    state.dispatch(InputEvent::Escape, now).unwrap();
    assert!(!state.slideshow.is_running());
}

#[test]
fn escape_without_anything_active_does_nothing() {
    let mut state = ViewerState::default();
    assert!(state
        .dispatch(InputEvent::Escape, Instant::now())
        .unwrap()
        .is_empty());
    assert!(!state.fullscreen);
}

#[test]
fn slideshow_skips_undecodable_frames() {
    let tmp = tempdir().unwrap();
    let a = write_solid(tmp.path(), "a.png", 8, 8);
    write_garbage(tmp.path(), "b.png");
    let mut state = ViewerState::default();
    let t0 = Instant::now();
    state
        .dispatch(InputEvent::ChooseFolder(tmp.path().to_path_buf()), t0)
        .unwrap();
    state.dispatch(InputEvent::StartSlideshow, t0).unwrap();

    state.poll_slideshow(t0 + Duration::from_secs(3));
    assert_eq!(state.renderer.active().unwrap().path, a);
    assert!(state.last_error.is_some());
    assert!(state.slideshow.is_running());
    assert_eq!(state.slideshow.index(), 1);
}

#[test]
fn resize_rescales_current_image() {
    let tmp = tempdir().unwrap();
    let path = write_solid(tmp.path(), "photo.png", 400, 200);
    let mut state = ViewerState::default();
    let now = Instant::now();
    state.dispatch(InputEvent::OpenFile(path), now).unwrap();
    state
        .dispatch(InputEvent::Resize { width: 100, height: 100 }, now)
        .unwrap();
    assert_eq!(state.renderer.scaled().unwrap().image.dimensions(), (100, 50));
}

#[test]
fn exit_requests_window_close() {
    let mut state = ViewerState::default();
    assert_eq!(
        state.dispatch(InputEvent::Exit, Instant::now()).unwrap(),
        vec![SurfaceCommand::Close]
    );
}
