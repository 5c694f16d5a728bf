// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::fs;

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A local file that has not been read yet.
    File(PathBuf),

    /// An image that is already available, either a data URI or an asset reference.
    Inline(String),
}

impl ImageSource {
    /// The inline value, if the image has been resolved.
    pub fn as_inline(&self) -> Option<&str> {
        match self {
            ImageSource::Inline(a) => Some(a),
            ImageSource::File(_) => None,
        }
    }

    /// A short human readable label.
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            ImageSource::File(path) => path.to_string_lossy(),
            ImageSource::Inline(a) if a.starts_with("data:") => {
                let mime = a
                    .strip_prefix("data:")
                    .and_then(|a| a.split(';').next())
                    .unwrap_or("image");
                format!("<{mime}, {} bytes>", a.len()).into()
            }
            ImageSource::Inline(a) => a.as_str().into(),
        }
    }

    /// Resolves the image into its inline form, reading the file if needed.
    pub async fn resolve(self) -> Result<String, ImageError> {
        match self {
            ImageSource::File(path) => read_data_uri(&path).await,
            ImageSource::Inline(a) => Ok(a),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("failed to read image {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported image type: {0}")]
    UnsupportedType(PathBuf),
}

/// Reads an image file and encodes it as a `data:` URI.
pub async fn read_data_uri(path: &Path) -> Result<String, ImageError> {
    let mime = mime_of(path).ok_or_else(|| ImageError::UnsupportedType(path.to_owned()))?;
    let bytes = fs::read(path).await.map_err(|source| ImageError::Read {
        path: path.to_owned(),
        source,
    })?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "image loaded");
    Ok(encode_data_uri(mime, &bytes))
}

pub(crate) fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

fn mime_of(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_data_uri() {
        assert_eq!(encode_data_uri("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn detects_mime_from_extension() {
        assert_eq!(mime_of(Path::new("a/b.JPG")), Some("image/jpeg"));
        assert_eq!(mime_of(Path::new("a/b.webp")), Some("image/webp"));
        assert_eq!(mime_of(Path::new("a/b.txt")), None);
        assert_eq!(mime_of(Path::new("a/b")), None);
    }

    #[test]
    fn labels_inline_data_uri() {
        let image = ImageSource::Inline("data:image/png;base64,YWJj".to_string());
        assert_eq!(image.label(), "<image/png, 26 bytes>");
    }

    #[tokio::test]
    async fn reads_file_into_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        std::fs::write(&path, b"abc").unwrap();

        let uri = ImageSource::File(path).resolve().await.unwrap();
        assert_eq!(uri, "data:image/png;base64,YWJj");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_data_uri(&dir.path().join("missing.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImageError::Read { .. }));
    }
}
