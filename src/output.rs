//! Inputs and outputs of one conversion.

use crate::error::ConvertError;
use crate::pipeline::select::OutputFormat;

/// Media type of a native passthrough response.
pub const PASSTHROUGH_MEDIA_TYPE: &str = "text/plain; charset=utf-8";
/// Media type of a packaged archive response.
pub const ARCHIVE_MEDIA_TYPE: &str = "application/octet-stream";

/// One conversion request: the raw body plus the format chosen for it.
///
/// Immutable once built. Building from headers fails when the
/// `content-type` header was absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    body: Vec<u8>,
    format: OutputFormat,
}

impl ConversionRequest {
    /// Build a request from the `content-type` header value and the body.
    pub fn new(content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Result<Self, ConvertError> {
        let format = OutputFormat::from_content_type(content_type)?;
        Ok(Self::with_format(format, body))
    }

    /// Build a request for an already chosen format.
    pub fn with_format(format: OutputFormat, body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            format,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// What a successful conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    /// Native mode: the normalized JSON text.
    Passthrough(String),
    /// ISO / ADM mode: zip archive bytes.
    Archive(Vec<u8>),
}

impl ConversionResult {
    pub fn media_type(&self) -> &'static str {
        match self {
            ConversionResult::Passthrough(_) => PASSTHROUGH_MEDIA_TYPE,
            ConversionResult::Archive(_) => ARCHIVE_MEDIA_TYPE,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ConversionResult::Passthrough(text) => text.len(),
            ConversionResult::Archive(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            ConversionResult::Passthrough(text) => text.into_bytes(),
            ConversionResult::Archive(bytes) => bytes,
        }
    }
}
