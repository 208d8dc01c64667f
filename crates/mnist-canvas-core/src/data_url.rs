//! `data:` URI encoding for image payloads handed to the host.

use base64::{Engine, engine::general_purpose::STANDARD};
use thiserror::Error;

/// MIME type of submitted drawings.
pub const PNG_MIME: &str = "image/png";

/// Data URI errors.
#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("Not a data URI")]
    MissingScheme,
    #[error("Data URI is not base64 encoded")]
    NotBase64,
    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// A decoded data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Wrap raw bytes as `data:<mime>;base64,<payload>`.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Split a base64 data URI into its MIME type and decoded bytes.
pub fn decode_data_url(url: &str) -> Result<DataUrl, DataUrlError> {
    let rest = url.strip_prefix("data:").ok_or(DataUrlError::MissingScheme)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingScheme)?;
    let mime = header.strip_suffix(";base64").ok_or(DataUrlError::NotBase64)?;

    Ok(DataUrl {
        mime: mime.to_string(),
        bytes: STANDARD.decode(payload)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_shape() {
        assert_eq!(encode_data_url(PNG_MIME, b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_decode() {
        let decoded = decode_data_url("data:image/png;base64,aGk=").unwrap();
        assert_eq!(decoded.mime, PNG_MIME);
        assert_eq!(decoded.bytes, b"hi");
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode_data_url("image/png;base64,aGk="),
            Err(DataUrlError::MissingScheme)
        ));
        assert!(matches!(
            decode_data_url("data:text/plain,hello"),
            Err(DataUrlError::NotBase64)
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,!!!"),
            Err(DataUrlError::Decode(_))
        ));
    }
}
