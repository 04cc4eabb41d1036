//! Canvas allocation, border drawing, and PNG output.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::error::LogoError;

/// Allocate a `width` x `height` canvas filled with `fill`.
#[must_use]
pub fn blank(width: u32, height: u32, fill: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, fill)
}

/// Draw an unfilled rectangle outline over the whole canvas.
///
/// The outer edge runs along (0,0)-(w-1,h-1) and the stroke grows inward by
/// `stroke` pixels, so nothing is clipped.
pub fn draw_border(canvas: &mut RgbImage, stroke: u32, color: Rgb<u8>) {
    let (width, height) = canvas.dimensions();
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let on_edge = x < stroke
            || y < stroke
            || x >= width.saturating_sub(stroke)
            || y >= height.saturating_sub(stroke);
        if on_edge {
            *pixel = color;
        }
    }
}

/// Blend `color` over the pixel at (`x`, `y`) with the given coverage.
///
/// Coordinates outside the canvas are ignored.
pub fn blend(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let a = coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let dst = canvas.get_pixel_mut(x, y);
    for (d, s) in dst.0.iter_mut().zip(color.0) {
        *d = (f32::from(s) * a + f32::from(*d) * (1.0 - a)).round() as u8;
    }
}

/// Encode the canvas as PNG and write it to `path`, replacing any existing file.
///
/// Parent directories are not created.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoding fails.
pub fn write_png(canvas: &RgbImage, path: &Path) -> Result<(), LogoError> {
    canvas.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    #[test]
    fn blank_is_uniform() {
        let canvas = blank(200, 200, WHITE);
        assert_eq!(canvas.dimensions(), (200, 200));
        assert!(canvas.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn border_has_exact_stroke() {
        let mut canvas = blank(200, 200, WHITE);
        draw_border(&mut canvas, 5, BLACK);

        for i in 0..5 {
            assert_eq!(*canvas.get_pixel(i, 100), BLACK);
            assert_eq!(*canvas.get_pixel(199 - i, 100), BLACK);
            assert_eq!(*canvas.get_pixel(100, i), BLACK);
            assert_eq!(*canvas.get_pixel(100, 199 - i), BLACK);
        }
        assert_eq!(*canvas.get_pixel(5, 100), WHITE);
        assert_eq!(*canvas.get_pixel(194, 100), WHITE);
        assert_eq!(*canvas.get_pixel(100, 5), WHITE);
        assert_eq!(*canvas.get_pixel(100, 194), WHITE);
        assert_eq!(*canvas.get_pixel(0, 0), BLACK);
        assert_eq!(*canvas.get_pixel(199, 199), BLACK);
    }

    #[test]
    fn border_wider_than_canvas_fills_it() {
        let mut canvas = blank(6, 6, WHITE);
        draw_border(&mut canvas, 5, BLACK);
        assert!(canvas.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn blend_full_and_partial() {
        let mut canvas = blank(2, 1, WHITE);
        blend(&mut canvas, 0, 0, BLACK, 1.0);
        blend(&mut canvas, 1, 0, BLACK, 0.5);
        assert_eq!(*canvas.get_pixel(0, 0), BLACK);
        assert_eq!(*canvas.get_pixel(1, 0), Rgb([128, 128, 128]));
    }

    #[test]
    fn blend_out_of_bounds_is_ignored() {
        let mut canvas = blank(2, 2, WHITE);
        blend(&mut canvas, -1, 0, BLACK, 1.0);
        blend(&mut canvas, 0, 2, BLACK, 1.0);
        assert!(canvas.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn write_png_overwrites() {
        let dir =
            std::env::temp_dir().join(format!("logogen_canvas_write_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("logo.png");
        std::fs::write(&path, b"stale").unwrap();

        let canvas = blank(200, 200, WHITE);
        write_png(&canvas, &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.dimensions(), (200, 200));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_png_missing_dir_fails_without_file() {
        let path = std::env::temp_dir()
            .join(format!("logogen_no_such_dir_{}", std::process::id()))
            .join("logo.png");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());

        let canvas = blank(4, 4, WHITE);
        assert!(write_png(&canvas, &path).is_err());
        assert!(!path.exists());
    }
}
