//! Format selection: map the `content-type` header to an [`OutputFormat`].
//!
//! The header doubles as an output selector. Only two media types mean
//! anything; every other value (including `application/json`) falls through
//! to native passthrough rather than being rejected. Only a missing header
//! is an error.

use crate::error::ConvertError;
use std::fmt;

/// Media type requesting an ISO-XML package.
pub const ISO_MEDIA_TYPE: &str = "application/vnd.aggateway.adapt.iso+zip";
/// Media type requesting an ADAPT ADM package.
pub const ADM_MEDIA_TYPE: &str = "application/vnd.aggateway.adapt.adm+zip";

/// What the conversion produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Normalized JSON, returned as text. (default)
    #[default]
    Native,
    /// ISO 11783-10 task data, zipped.
    Iso,
    /// ADAPT ADM, zipped.
    Adm,
}

impl OutputFormat {
    /// Select the format from a `content-type` header value.
    ///
    /// `None` means the header was absent and yields
    /// [`ConvertError::MissingContentType`].
    pub fn from_content_type(value: Option<&str>) -> Result<Self, ConvertError> {
        value
            .map(Self::select)
            .ok_or(ConvertError::MissingContentType)
    }

    /// Select the format from a present header value. Never fails.
    ///
    /// The value may list several media types separated by commas;
    /// parameters after `;` are ignored and matching is case-insensitive.
    /// ISO wins when both package types are listed.
    pub fn select(value: &str) -> Self {
        let mut adm = false;
        for media_type in value.split(',').map(essence) {
            if media_type.eq_ignore_ascii_case(ISO_MEDIA_TYPE) {
                return OutputFormat::Iso;
            }
            adm |= media_type.eq_ignore_ascii_case(ADM_MEDIA_TYPE);
        }
        if adm {
            OutputFormat::Adm
        } else {
            OutputFormat::Native
        }
    }

    /// `true` for the formats delivered as a zip archive.
    pub fn is_archive(self) -> bool {
        !matches!(self, OutputFormat::Native)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Native => "native",
            OutputFormat::Iso => "iso",
            OutputFormat::Adm => "adm",
        })
    }
}

/// Strip parameters and surrounding whitespace from one media type.
fn essence(media_type: &str) -> &str {
    media_type.split(';').next().unwrap_or_default().trim()
}
