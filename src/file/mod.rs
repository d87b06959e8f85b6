//! Uploaded image handling.

mod storage;

pub use storage::ImageStorage;

use infer::MatcherType;

/// An image format recognised from file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageKind {
    /// MIME type, always `image/*`.
    pub mime: &'static str,
    /// Canonical file extension for the format.
    pub extension: &'static str,
}

/// Identify an image by its magic bytes.
///
/// Returns `None` for anything that isn't a recognised image format,
/// whatever the browser claimed the file was.
pub fn detect_image(content: &[u8]) -> Option<ImageKind> {
    let kind = infer::get(content)?;
    if kind.matcher_type() != MatcherType::Image || !kind.mime_type().starts_with("image/") {
        return None;
    }
    Some(ImageKind {
        mime: kind.mime_type(),
        extension: kind.extension(),
    })
}
