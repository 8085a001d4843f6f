//! Font discovery for chart text.
//!
//! The bitmap backend draws text through `ab_glyph`, which knows no fonts
//! until one is registered. We look for a TrueType font once per process and
//! register it as the `sans-serif` family.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::FontStyle;

/// Environment variable naming a font file for chart text.
pub const FONT_ENV: &str = "OSSFUZZ_CHART_FONT";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<PathBuf> = OnceLock::new();

/// Make sure a font is registered, returning the file it came from.
///
/// `explicit` is tried first, then [`FONT_ENV`], then well-known system
/// locations. Returns `None` if no usable font was found.
pub fn ensure_font(explicit: Option<&Path>) -> Option<&'static Path> {
    if let Some(path) = REGISTERED.get() {
        return Some(path.as_path());
    }

    let from_env = std::env::var_os(FONT_ENV).map(PathBuf::from);
    let candidates = explicit
        .map(Path::to_path_buf)
        .into_iter()
        .chain(from_env)
        .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }
        if register(&candidate) {
            let _ = REGISTERED.set(candidate);
            return REGISTERED.get().map(PathBuf::as_path);
        }
    }

    None
}

fn register(path: &Path) -> bool {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::debug!("Cannot read font {}: {}", path.display(), err);
            return false;
        }
    };

    // ab_glyph keeps a reference to the font data for the rest of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match plotters::style::register_font("sans-serif", FontStyle::Normal, bytes) {
        Ok(()) => {
            log::debug!("Using chart font {}", path.display());
            true
        }
        Err(_) => {
            log::warn!("Ignoring unusable font file {}", path.display());
            false
        }
    }
}
