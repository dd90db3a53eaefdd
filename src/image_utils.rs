use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context};
use eframe::egui;
use fast_image_resize as fir;
use image::{imageops::FilterType, DynamicImage, RgbImage, RgbaImage};
use zune_jpeg::JpegDecoder;

use crate::{
    error::{Result, ViewerError},
    fs_utils::is_jpeg,
};

/// A decoded image at its natural size.
pub struct ActiveImage {
    pub path: PathBuf,
    pub pixels: RgbaImage,
}

impl ActiveImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Reads and decodes `path`. Read failures are reported as invalid paths,
/// anything the decoders reject as a decode error.
pub fn decode_file(path: &Path) -> Result<ActiveImage> {
    let bytes = std::fs::read(path).map_err(|err| ViewerError::invalid_path(path, err))?;

    let fast = if is_jpeg(path) { decode_jpeg(&bytes) } else { None };
    let image = match fast {
        Some(image) => image,
        None => image::load_from_memory(&bytes).map_err(|err| ViewerError::decode(path, err))?,
    };

    if image.width() == 0 || image.height() == 0 {
        return Err(ViewerError::decode(path, "image has no pixels"));
    }

    Ok(ActiveImage {
        path: path.to_path_buf(),
        pixels: image.into_rgba8(),
    })
}

/// zune-jpeg is noticeably faster than the generic decoder; `None` means the
/// caller should fall back to `image`.
fn decode_jpeg(bytes: &[u8]) -> Option<DynamicImage> {
    let mut decoder = JpegDecoder::new(Cursor::new(bytes));
    let pixels = decoder.decode().ok()?;
    let info = decoder.info()?;
    RgbImage::from_raw(info.width as u32, info.height as u32, pixels).map(DynamicImage::ImageRgb8)
}

/// Largest size within `max_w` x `max_h` with the aspect ratio of the source.
/// Images that already fit are left at their natural size.
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 || max_w == 0 || max_h == 0 {
        return (0, 0);
    }
    if src_w <= max_w && src_h <= max_h {
        return (src_w, src_h);
    }

    let ratio = src_w as f64 / src_h as f64;
    if ratio > max_w as f64 / max_h as f64 {
        let h = (max_w as f64 / ratio).round() as u32;
        (max_w, h.clamp(1, max_h))
    } else {
        let w = (max_h as f64 * ratio).round() as u32;
        (w.clamp(1, max_w), max_h)
    }
}

pub fn resize_rgba(source: &RgbaImage, target_w: u32, target_h: u32) -> anyhow::Result<RgbaImage> {
    if target_w == 0 || target_h == 0 {
        bail!("resize dimensions must be positive");
    }
    if source.dimensions() == (target_w, target_h) {
        return Ok(source.clone());
    }

    let src_view = fir::images::ImageRef::new(
        source.width(),
        source.height(),
        source.as_raw(),
        fir::PixelType::U8x4,
    )
    .context("failed to create source view for resize")?;
    let mut dst_image = fir::images::Image::new(target_w, target_h, fir::PixelType::U8x4);
    let options = fir::ResizeOptions::new()
        .resize_alg(fir::ResizeAlg::Convolution(fir::FilterType::Lanczos3));
    let mut resizer = fir::Resizer::new();
    resizer
        .resize(&src_view, &mut dst_image, Some(&options))
        .context("resize failed")?;
    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| anyhow!("failed to construct resized RGBA image"))
}

/// Same as [`resize_rgba`] but never fails; falls back to the slower
/// resampler in `image` if fast_image_resize refuses the buffer.
pub fn resize_or_fallback(source: &RgbaImage, target_w: u32, target_h: u32) -> RgbaImage {
    match resize_rgba(source, target_w, target_h) {
        Ok(resized) => resized,
        Err(err) => {
            tracing::warn!("fast resize failed, using fallback: {err:#}");
            image::imageops::resize(source, target_w, target_h, FilterType::Lanczos3)
        }
    }
}

pub fn to_color_image(img: &RgbaImage) -> egui::ColorImage {
    let size = [img.width() as usize, img.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw())
}
