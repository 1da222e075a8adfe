//! Display titles from audio filenames.
//!
//! A title is the filename stem with underscores and dashes turned into
//! spaces and surrounding whitespace trimmed. Nothing else is normalized:
//! case is preserved and leading track numbers stay part of the title.
//!
//! - `My_Song-01.mp3` → "My Song 01"
//! - `track.mp3` → "track"
//! - `01-intro.mp3` → "01 intro"

/// Strip the extension from a filename.
///
/// The extension is everything after the last `.`. A leading dot does not
/// start an extension, so `.hidden` is returned unchanged.
pub fn file_stem(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(pos) if pos > 0 => &filename[..pos],
        _ => filename,
    }
}

/// Derive the feed title for an audio file.
pub fn derive_title(filename: &str) -> String {
    file_stem(filename)
        .replace(['_', '-'], " ")
        .trim()
        .to_string()
}
