#![allow(dead_code)]

use image::{DynamicImage, Rgba, RgbaImage};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub fn solid_image(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
    let pixel = Rgba(color);
    let buffer = RgbaImage::from_pixel(width, height, pixel);
    DynamicImage::ImageRgba8(buffer)
}

/// Saves without alpha so every supported encoder (JPEG included) accepts it.
pub fn write_image(path: impl Into<PathBuf>, image: &DynamicImage) {
    DynamicImage::ImageRgb8(image.to_rgb8())
        .save(path.into())
        .expect("failed to write image to disk");
}

pub fn write_solid(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    write_image(&path, &solid_image(width, height, [120, 80, 40, 255]));
    path
}

pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"definitely not an image").expect("failed to write file");
    path
}
