// src/utils/html.rs

/// Escapes user-supplied text for interpolation into an HTML document.
///
/// Unlike `ammonia::clean`, nothing is kept as markup, so a name like
/// `<b>Ann</b>` renders literally.
pub fn escape_text(input: &str) -> String {
    ammonia::clean_text(input)
}
