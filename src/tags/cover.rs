//! Cover-art normalization: extension allow-list and MIME mapping.

use super::model::CoverArt;

/// ID3 picture type for the front cover.
pub const FRONT_COVER_ID: u8 = 3;

/// Map an image file name to its MIME type.
///
/// Only the text after the last `.` is looked at, case-insensitively, so a
/// bare `".png"` is accepted. Anything outside `png`/`jpg`/`jpeg` is `None`.
pub fn image_mime(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

/// Store `data` as the image in `slot`, starting from a placeholder when the
/// slot is empty. `description` and `kind` of an existing image are kept.
///
/// Returns `None` and leaves `slot` untouched when `filename` is not an
/// accepted image type.
pub fn apply_image<'a>(
    slot: &'a mut Option<CoverArt>,
    filename: &str,
    data: Vec<u8>,
) -> Option<&'a CoverArt> {
    let mime = image_mime(filename)?;
    let art = slot.get_or_insert_with(CoverArt::placeholder);
    art.mime = mime.to_string();
    art.data = Some(data);
    Some(art)
}
