//! Display-name sanitization for uploaded files.

use sanitize_filename::{sanitize_with_options, Options};

/// Used in place of a name that sanitizes to nothing.
const FALLBACK_NAME: &str = "unnamed";

fn options(windows: bool) -> Options<'static> {
    Options {
        windows,
        truncate: true,
        replacement: "_",
    }
}

/// Turn a client-submitted filename into a safe single path component.
///
/// Leading dots and surrounding whitespace are stripped first. A stem that
/// names a Windows device (`CON`, `lpt1`, `CON ` ...) gets a `_` prefix so the
/// extension survives. The rest is `sanitize_filename` with Windows rules and
/// truncation to 255 bytes. The result is never empty.
pub fn sanitize_filename(name: &str) -> String {
    let trimmed = name.trim().trim_start_matches('.').trim_start();

    let mut candidate = trimmed.to_string();
    if has_reserved_stem(trimmed) {
        candidate.insert(0, '_');
    }

    let sanitized = sanitize_with_options(&candidate, options(true));
    if sanitized.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        sanitized
    }
}

/// Whether the part before the first `.` is a Windows device name.
///
/// The stem has no dots and no trailing spaces, so the only thing the
/// Windows rules can still change is a reserved name.
fn has_reserved_stem(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or_default().trim_end();
    if stem.is_empty() {
        return false;
    }

    let portable = sanitize_with_options(stem, options(false));
    sanitize_with_options(&portable, options(true)) != portable
}
