//! Input images and encoded output blobs

use bytes::Bytes;
use std::path::Path;

use super::format::OutputFormat;

/// A raw image as supplied by the caller
///
/// The declared MIME type is taken at face value for validation; the bytes
/// are only inspected when decoding. Cloning is cheap (the bytes are shared).
#[derive(Debug, Clone, PartialEq)]
pub struct InputImage {
    name: String,
    mime_type: String,
    data: Bytes,
}

impl InputImage {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, declaring its MIME type from the extension
    ///
    /// Files with an unknown extension are declared `application/octet-stream`
    /// so validation reports them instead of this call failing.
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mime_type = mime_type_for_path(path).unwrap_or("application/octet-stream");
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, mime_type, data))
    }

    /// Identifier used when reporting batch failures
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Map a file extension to the MIME type the upload forms would declare
pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" | "jfif" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// An encoded image produced by the optimizer
///
/// The blob owns its bytes; `release` (or dropping it) reclaims them once
/// they have been uploaded or written out.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlob {
    data: Bytes,
    format: OutputFormat,
}

impl ImageBlob {
    pub fn new(data: impl Into<Bytes>, format: OutputFormat) -> Self {
        Self {
            data: data.into(),
            format,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Hand the bytes to an uploader without copying
    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    /// Explicitly give the buffer back
    pub fn release(self) {
        drop(self);
    }
}
