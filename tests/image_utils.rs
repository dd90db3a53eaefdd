use imageviewer::image_utils::*;
use imageviewer::ViewerError;
use tempfile::tempdir;

mod common;
use common::{solid_image, write_garbage, write_solid};

#[test]
fn fit_dimensions_limits_wide_images_by_width() {
    assert_eq!(fit_dimensions(400, 200, 100, 100), (100, 50));
}

#[test]
fn fit_dimensions_limits_tall_images_by_height() {
    assert_eq!(fit_dimensions(3024, 4032, 1080, 1080), (810, 1080));
}

#[test]
fn fit_dimensions_never_upscales() {
    assert_eq!(fit_dimensions(50, 40, 200, 200), (50, 40));
}

#[test]
fn fit_dimensions_handles_degenerate_viewport() {
    assert_eq!(fit_dimensions(50, 40, 0, 200), (0, 0));
    assert_eq!(fit_dimensions(5000, 1, 100, 100), (100, 1));
}

#[test]
fn resize_rgba_produces_requested_size() {
    let source = solid_image(64, 32, [10, 200, 30, 255]).to_rgba8();
    let resized = resize_rgba(&source, 16, 8).unwrap();
    assert_eq!(resized.dimensions(), (16, 8));
    let pixel = resized.get_pixel(8, 4);
    assert!((pixel[1] as i32 - 200).abs() <= 2);
}

#[test]
fn resize_rgba_rejects_zero_size() {
    let source = solid_image(4, 4, [0, 0, 0, 255]).to_rgba8();
    assert!(resize_rgba(&source, 0, 4).is_err());
}

#[test]
fn to_color_image_matches_input_dimensions() {
    let img = solid_image(3, 5, [10, 20, 30, 255]).to_rgba8();
    let color = to_color_image(&img);
    assert_eq!(color.size, [3, 5]);
    assert_eq!(color.pixels.len(), (img.width() * img.height()) as usize);
    assert_eq!(color.pixels[0].r(), 10);
    assert_eq!(color.pixels[0].g(), 20);
    assert_eq!(color.pixels[0].b(), 30);
}

#[test]
fn decode_file_reads_jpeg_and_png() {
    let tmp = tempdir().unwrap();
    let jpg = write_solid(tmp.path(), "photo.jpg", 33, 21);
    let png = write_solid(tmp.path(), "shot.png", 8, 12);

    let decoded = decode_file(&jpg).unwrap();
    assert_eq!(decoded.dimensions(), (33, 21));
    assert_eq!(decoded.path, jpg);

    let decoded = decode_file(&png).unwrap();
    assert_eq!(decoded.dimensions(), (8, 12));
}

#[test]
fn decode_file_reports_corrupt_content() {
    let tmp = tempdir().unwrap();
    let bad = write_garbage(tmp.path(), "broken.jpg");
    let err = decode_file(&bad).err().unwrap();
    assert!(matches!(err, ViewerError::Decode { .. }));
}

#[test]
fn decode_file_reports_missing_file_as_invalid_path() {
    let tmp = tempdir().unwrap();
    let err = decode_file(&tmp.path().join("gone.png")).err().unwrap();
    assert!(matches!(err, ViewerError::InvalidPath { .. }));
}
