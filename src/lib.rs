pub mod app;
pub mod config;
pub mod error;
pub mod fs_utils;
pub mod image_utils;
pub mod store;
pub mod ui;

pub use error::{Result, ViewerError};
