//! The logo pipeline: canvas, font, centered text, border, PNG.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use log::debug;

use crate::canvas;
use crate::error::LogoError;
use crate::font::{self, FontSource};
use crate::layout;

/// Fixed parameters of the logo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoSpec {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Background fill.
    pub background: Rgb<u8>,
    /// Text and border color.
    pub ink: Rgb<u8>,
    /// The rendered word.
    pub text: &'static str,
    /// Preferred font file name.
    pub font_name: &'static str,
    /// Preferred font size, in pixels per em.
    pub font_size: f32,
    /// Border stroke width in pixels.
    pub border: u32,
    /// Where the PNG is written.
    pub output: &'static str,
}

/// The store placeholder logo.
pub const STORE_LOGO: LogoSpec = LogoSpec {
    width: 200,
    height: 200,
    background: Rgb([255, 255, 255]),
    ink: Rgb([0, 0, 0]),
    text: "store",
    font_name: "arial.ttf",
    font_size: 80.0,
    border: 5,
    output: "K:/big-ecommerce-admin-main/public/logo.png",
};

impl LogoSpec {
    /// The output location as a path.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(self.output)
    }

    /// Render the logo into a fresh canvas.
    #[must_use]
    pub fn render(&self, fonts: &FontSource) -> RgbImage {
        let mut canvas = canvas::blank(self.width, self.height, self.background);

        let face = font::acquire(self.font_name, self.font_size, fonts);
        let text_box = face.text_box(self.text);
        let (x, y) = layout::center(self.width, self.height, text_box);
        debug!("Text box {text_box:?}, origin ({x:.2}, {y:.2})");

        face.draw_text(&mut canvas, (x, y), self.text, self.ink);
        canvas::draw_border(&mut canvas, self.border, self.ink);
        canvas
    }
}

/// Render `spec` and write it to `output`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the PNG cannot be written.
pub fn generate(spec: &LogoSpec, fonts: &FontSource, output: &Path) -> Result<(), LogoError> {
    let canvas = spec.render(fonts);
    debug!("Writing {}", output.display());
    canvas::write_png(&canvas, output)
}
