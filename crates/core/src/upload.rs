//! Photo upload checks and content-addressed naming.
//!
//! The file type is decided by sniffing the leading bytes, never by the
//! client-supplied filename or content type.

use image::ImageFormat;

use crate::hashing::sha256_hex;

/// Upper bound on an uploaded photo, in kilobytes.
pub const MAX_IMAGE_KILOBYTES: usize = 2000;

/// Upper bound on an uploaded photo, in bytes.
pub const MAX_IMAGE_BYTES: usize = MAX_IMAGE_KILOBYTES * 1024;

/// Accepted photo formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Detect the format from file content. `None` for anything that is not
    /// a JPEG or PNG.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match image::guess_format(data) {
            Ok(ImageFormat::Jpeg) => Some(ImageKind::Jpeg),
            Ok(ImageFormat::Png) => Some(ImageKind::Png),
            _ => None,
        }
    }

    /// Extension used for stored files.
    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
        }
    }
}

/// Reasons an uploaded photo is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadProblem {
    UnsupportedType,
    TooLarge,
}

/// Check an uploaded photo. All problems are reported, not just the first.
pub fn check_image(data: &[u8]) -> Result<ImageKind, Vec<UploadProblem>> {
    let kind = ImageKind::sniff(data);
    let mut problems = Vec::new();
    if kind.is_none() {
        problems.push(UploadProblem::UnsupportedType);
    }
    if data.len() > MAX_IMAGE_BYTES {
        problems.push(UploadProblem::TooLarge);
    }
    match kind {
        Some(kind) if problems.is_empty() => Ok(kind),
        _ => Err(problems),
    }
}

/// A photo that passed [`check_image`], ready to be written to storage.
#[derive(Debug, Clone)]
pub struct AcceptedImage {
    pub kind: ImageKind,
    pub bytes: Vec<u8>,
}

impl AcceptedImage {
    /// Content-addressed filename: `<sha256-hex>.<ext>`.
    pub fn stored_name(&self) -> String {
        format!("{}.{}", sha256_hex(&self.bytes), self.kind.extension())
    }
}
