use std::fmt;
use std::path::Path;

use anyhow::Context as _;

use crate::encode::png::PNG_SIGNATURE;
use crate::foundation::error::OtfbmResult;

const JPEG_PREFIX: [u8; 3] = [0xFF, 0xD8, 0xFF];
const BMP_PREFIX: [u8; 2] = [0x42, 0x4D];

/// Container format inferred from leading magic bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Png,
    Jpeg,
    Bmp,
    Unknown,
}

impl FormatTag {
    /// Decoder format for this tag, `None` for [`FormatTag::Unknown`].
    pub fn image_format(self) -> Option<image::ImageFormat> {
        match self {
            Self::Png => Some(image::ImageFormat::Png),
            Self::Jpeg => Some(image::ImageFormat::Jpeg),
            Self::Bmp => Some(image::ImageFormat::Bmp),
            Self::Unknown => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Bmp => "BMP",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify `bytes` by prefix: PNG, then JPEG, then BMP, else `Unknown`.
///
/// Only the header is inspected. A corrupt body behind a valid prefix still gets that prefix's tag.
pub fn sniff(bytes: &[u8]) -> FormatTag {
    if bytes.starts_with(&PNG_SIGNATURE) {
        FormatTag::Png
    } else if bytes.starts_with(&JPEG_PREFIX) {
        FormatTag::Jpeg
    } else if bytes.starts_with(&BMP_PREFIX) {
        FormatTag::Bmp
    } else {
        FormatTag::Unknown
    }
}

/// Source bytes paired with the format sniffed from them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceBlob {
    bytes: Vec<u8>,
    format: FormatTag,
}

impl SourceBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        let format = sniff(&bytes);
        Self { bytes, format }
    }

    /// Read a file and sniff its contents. IO failures surface as [`crate::OtfbmError::Other`].
    pub fn read(path: impl AsRef<Path>) -> OtfbmResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read input '{}'", path.display()))?;
        Ok(Self::new(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> FormatTag {
        self.format
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/sniff.rs"]
mod tests;
