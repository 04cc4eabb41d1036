//! Font discovery, TrueType rendering, and fallback acquisition.

use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, Point, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use log::debug;

use crate::builtin::BuiltinFace;
use crate::canvas;
use crate::config::FontsConfig;
use crate::error::LogoError;
use crate::layout::TextBox;

/// Directory nesting followed when searching a font directory.
const MAX_SEARCH_DEPTH: usize = 8;

/// Something that can measure and draw a single line of text.
pub trait Typeface {
    /// Human-readable description for diagnostics.
    fn describe(&self) -> String;

    /// Inked box of `text` laid out with its top-left corner at (0, 0).
    fn text_box(&self, text: &str) -> TextBox;

    /// Draw `text` with its layout origin at `origin`.
    fn draw_text(&self, canvas: &mut RgbImage, origin: (f32, f32), text: &str, color: Rgb<u8>);
}

/// Ordered list of places a font file name is resolved against.
#[derive(Debug, Clone, Default)]
pub struct FontSource {
    dirs: Vec<PathBuf>,
}

impl FontSource {
    /// Search `extra` first, then the platform font directories if `system` is set.
    #[must_use]
    pub fn new(extra: Vec<PathBuf>, system: bool) -> Self {
        let mut dirs = extra;
        if system {
            dirs.extend(system_font_dirs());
        }
        Self { dirs }
    }

    /// Build a source from the `[fonts]` config table.
    #[must_use]
    pub fn from_config(config: &FontsConfig) -> Self {
        Self::new(config.dirs.clone(), config.system)
    }

    /// Directories searched after the working directory, in order.
    #[must_use]
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Resolve `name` to an existing font file.
    ///
    /// The name is tried as given (relative to the working directory) and
    /// then looked up by file name under each directory, recursively.
    #[must_use]
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        self.dirs.iter().find_map(|dir| find_file(dir, name, MAX_SEARCH_DEPTH))
    }
}

/// Platform font directories, in lookup order.
#[must_use]
pub fn system_font_dirs() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);

    if cfg!(windows) {
        return std::env::var_os("WINDIR")
            .map(|w| vec![PathBuf::from(w).join("Fonts")])
            .unwrap_or_default();
    }

    if cfg!(target_os = "macos") {
        let mut dirs = vec![PathBuf::from("/Library/Fonts"), PathBuf::from("/System/Library/Fonts")];
        if let Some(home) = home {
            dirs.push(home.join("Library/Fonts"));
        }
        return dirs;
    }

    let mut dirs = Vec::new();
    match std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        Some(data_home) => dirs.push(PathBuf::from(data_home).join("fonts")),
        None => {
            if let Some(home) = home {
                dirs.push(home.join(".local/share/fonts"));
            }
        }
    }
    let data_dirs = std::env::var("XDG_DATA_DIRS")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "/usr/local/share:/usr/share".to_string());
    dirs.extend(
        data_dirs.split(':').filter(|d| !d.is_empty()).map(|d| PathBuf::from(d).join("fonts")),
    );
    dirs
}

/// Depth-limited search for a file called `name` below `dir`.
///
/// Symlinked directories are not descended into, so link cycles cannot loop.
fn find_file(dir: &Path, name: &str, depth: usize) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(kind) = entry.file_type() else { continue };
        if kind.is_dir() {
            subdirs.push(path);
        } else if entry.file_name() == name {
            return Some(path);
        }
    }

    if depth == 0 {
        return None;
    }
    subdirs.sort();
    subdirs.into_iter().find_map(|sub| find_file(&sub, name, depth - 1))
}

/// A parsed TrueType/OpenType font at a fixed pixel size.
pub struct TrueTypeFace {
    font: FontVec,
    scale: PxScale,
    path: PathBuf,
}

impl TrueTypeFace {
    /// Parse font data so that one em spans `px_per_em` pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not a usable font.
    pub fn from_bytes(data: Vec<u8>, px_per_em: f32, path: PathBuf) -> Result<Self, String> {
        let font = FontVec::try_from_vec(data).map_err(|e| format!("invalid font data: {e}"))?;
        let units_per_em =
            font.units_per_em().ok_or_else(|| "font has no units-per-em".to_string())?;
        let scale = PxScale::from(px_per_em * font.height_unscaled() / units_per_em);
        Ok(Self { font, scale, path })
    }

    /// Position glyphs for `text` with the line's top-left corner at `origin`.
    fn layout(&self, text: &str, origin: Point) -> Vec<Glyph> {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = point(origin.x, origin.y + scaled.ascent());
        let mut previous: Option<GlyphId> = None;
        let mut glyphs = Vec::with_capacity(text.len());

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, caret));
            caret.x += scaled.h_advance(id);
            previous = Some(id);
        }
        glyphs
    }
}

impl Typeface for TrueTypeFace {
    fn describe(&self) -> String {
        format!("{} at {:.1}px line height", self.path.display(), self.scale.y)
    }

    fn text_box(&self, text: &str) -> TextBox {
        self.layout(text, point(0.0, 0.0))
            .into_iter()
            .filter_map(|g| self.font.outline_glyph(g))
            .map(|outlined| {
                let b = outlined.px_bounds();
                TextBox { left: b.min.x, top: b.min.y, right: b.max.x, bottom: b.max.y }
            })
            .reduce(TextBox::union)
            .unwrap_or_default()
    }

    fn draw_text(&self, canvas: &mut RgbImage, origin: (f32, f32), text: &str, color: Rgb<u8>) {
        for glyph in self.layout(text, point(origin.0, origin.1)) {
            let Some(outlined) = self.font.outline_glyph(glyph) else { continue };
            let bounds = outlined.px_bounds();
            let (bx, by) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|gx, gy, coverage| {
                canvas::blend(canvas, bx + gx as i32, by + gy as i32, color, coverage);
            });
        }
    }
}

/// Locate, read, and parse the font called `name`.
///
/// # Errors
///
/// Returns [`LogoError::FontUnavailable`] if the file cannot be found, read,
/// or parsed.
pub fn load_truetype(
    name: &str,
    px_per_em: f32,
    source: &FontSource,
) -> Result<TrueTypeFace, LogoError> {
    let unavailable = |reason: String| LogoError::FontUnavailable { name: name.to_string(), reason };

    let path = source
        .locate(name)
        .ok_or_else(|| unavailable("not found in any font directory".to_string()))?;
    let data =
        std::fs::read(&path).map_err(|e| unavailable(format!("{}: {e}", path.display())))?;
    TrueTypeFace::from_bytes(data, px_per_em, path.clone())
        .map_err(|e| unavailable(format!("{}: {e}", path.display())))
}

/// Load the preferred font, substituting the built-in face on any failure.
#[must_use]
pub fn acquire(name: &str, px_per_em: f32, source: &FontSource) -> Box<dyn Typeface> {
    match load_truetype(name, px_per_em, source) {
        Ok(face) => {
            debug!("Font: {}", face.describe());
            Box::new(face)
        }
        Err(e) => {
            debug!("{e}; using built-in font");
            Box::new(BuiltinFace::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("{name}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn locate_finds_nested_file() {
        let dir = scratch("logogen_font_nested_test");
        let nested = dir.join("truetype").join("msttcorefonts");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("arial.ttf"), b"not a font").unwrap();

        let source = FontSource::new(vec![dir.clone()], false);
        assert_eq!(source.locate("arial.ttf"), Some(nested.join("arial.ttf")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn locate_respects_directory_order() {
        let first = scratch("logogen_font_order_a");
        let second = scratch("logogen_font_order_b");
        std::fs::write(first.join("arial.ttf"), b"a").unwrap();
        std::fs::write(second.join("arial.ttf"), b"b").unwrap();

        let source = FontSource::new(vec![second.clone(), first.clone()], false);
        assert_eq!(source.locate("arial.ttf"), Some(second.join("arial.ttf")));

        let _ = std::fs::remove_dir_all(&first);
        let _ = std::fs::remove_dir_all(&second);
    }

    #[test]
    fn locate_missing_returns_none() {
        let dir = scratch("logogen_font_missing_test");
        let source = FontSource::new(vec![dir.clone(), dir.join("does-not-exist")], false);
        assert!(source.locate("logogen-no-such-font.ttf").is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[test]
    fn locate_skips_symlinked_dirs() {
        let dir = scratch("logogen_font_symlink_test");
        let real = scratch("logogen_font_symlink_target");
        std::fs::write(real.join("logogen-linked.ttf"), b"x").unwrap();
        std::os::unix::fs::symlink(&real, dir.join("linked")).unwrap();
        std::os::unix::fs::symlink(&dir, dir.join("cycle")).unwrap();

        let source = FontSource::new(vec![dir.clone()], false);
        assert!(source.locate("logogen-linked.ttf").is_none());

        let _ = std::fs::remove_dir_all(&dir);
        let _ = std::fs::remove_dir_all(&real);
    }

    #[test]
    fn system_flag_controls_platform_dirs() {
        let extra = PathBuf::from("/opt/fonts");
        let only_extra = FontSource::new(vec![extra.clone()], false);
        assert_eq!(only_extra.dirs(), &[extra.clone()]);

        let with_system = FontSource::new(vec![extra.clone()], true);
        assert_eq!(with_system.dirs().first(), Some(&extra));
        assert_eq!(with_system.dirs().len(), 1 + system_font_dirs().len());
    }

    #[test]
    fn from_config_uses_table() {
        let config = FontsConfig { dirs: vec![PathBuf::from("fonts")], system: false };
        assert_eq!(FontSource::from_config(&config).dirs(), &[PathBuf::from("fonts")]);
    }

    #[test]
    fn corrupt_font_is_unavailable() {
        let dir = scratch("logogen_font_corrupt_test");
        std::fs::write(dir.join("logogen-corrupt.ttf"), b"definitely not a font").unwrap();
        let source = FontSource::new(vec![dir.clone()], false);

        let err = load_truetype("logogen-corrupt.ttf", 80.0, &source).err().unwrap();
        assert!(matches!(err, LogoError::FontUnavailable { ref name, .. } if name == "logogen-corrupt.ttf"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_font_is_unavailable() {
        let source = FontSource::new(Vec::new(), false);
        let err = load_truetype("logogen-no-such-font.ttf", 80.0, &source).err().unwrap();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn acquire_falls_back_to_builtin() {
        let dir = scratch("logogen_font_fallback_test");
        std::fs::write(dir.join("logogen-broken.ttf"), b"garbage").unwrap();
        let source = FontSource::new(vec![dir.clone()], false);

        let face = acquire("logogen-broken.ttf", 80.0, &source);
        assert!(face.describe().starts_with("built-in"));
        assert_eq!(face.text_box("store"), BuiltinFace::default().text_box("store"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    /// A common sans font installed on the host, if there is one.
    fn host_font() -> Option<PathBuf> {
        let source = FontSource::new(Vec::new(), true);
        let found = ["arial.ttf", "DejaVuSans.ttf", "LiberationSans-Regular.ttf"]
            .iter()
            .find_map(|name| source.locate(name));
        if found.is_none() {
            eprintln!("skipping: no TrueType font found in {:?}", source.dirs());
        }
        found
    }

    #[test]
    fn acquire_uses_truetype_when_font_resolves() {
        let Some(host) = host_font() else { return };
        let dir = scratch("logogen_font_resolves_test");
        std::fs::copy(&host, dir.join("logogen-preferred.ttf")).unwrap();
        let source = FontSource::new(vec![dir.clone()], false);

        let face = acquire("logogen-preferred.ttf", 80.0, &source);
        assert!(!face.describe().starts_with("built-in"), "got {}", face.describe());
        assert!(face.describe().contains("logogen-preferred.ttf"));

        let direct = load_truetype("logogen-preferred.ttf", 80.0, &source).ok().unwrap();
        assert_eq!(face.text_box("store"), direct.text_box("store"));
        assert_ne!(face.text_box("store"), BuiltinFace::default().text_box("store"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn truetype_ink_stays_near_measured_box() {
        let Some(host) = host_font() else { return };
        let face = TrueTypeFace::from_bytes(std::fs::read(&host).unwrap(), 80.0, host).unwrap();

        let b = face.text_box("store");
        assert!(b.width() > 0.0 && b.height() > 0.0);
        assert!(b.top > 0.0, "ink should start below the ascender line");

        let (x, y) = crate::layout::center(200, 200, b);
        let mut canvas = RgbImage::from_pixel(200, 200, Rgb([255, 255, 255]));
        face.draw_text(&mut canvas, (x, y), "store", Rgb([0, 0, 0]));

        let mut inked = 0;
        for (px, py, p) in canvas.enumerate_pixels() {
            if p.0[0] < 255 {
                inked += 1;
                let (fx, fy) = (px as f32, py as f32);
                assert!(fx >= x + b.left - 1.0 && fx <= x + b.right + 1.0);
                assert!(fy >= y + b.top - 1.0 && fy <= y + b.bottom + 1.0);
            }
        }
        assert!(inked > 0);
    }
}
