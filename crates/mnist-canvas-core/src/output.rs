//! Values handed back to the host.

use crate::data_url::{DataUrlError, decode_data_url};
use serde::{Deserialize, Serialize};

/// The component value reported on submit or clear.
///
/// Serializes as `{"is_submitted": bool, "image_data": string | null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputValue {
    pub is_submitted: bool,
    pub image_data: Option<String>,
}

impl OutputValue {
    /// A submitted drawing encoded as a data URI.
    pub fn submitted(image_data: Option<String>) -> Self {
        Self {
            is_submitted: true,
            image_data,
        }
    }

    /// The value sent after the canvas is cleared.
    pub fn cleared() -> Self {
        Self {
            is_submitted: false,
            image_data: None,
        }
    }
}

/// Host-side view of a component value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawingResults {
    pub is_submitted: bool,
    /// Decoded image file bytes (PNG).
    pub raw_image_bytes: Option<Vec<u8>>,
    /// The data URI as received.
    pub raw_image_base64: Option<String>,
}

impl DrawingResults {
    /// Interpret a component value. `None` (nothing reported yet) is "not submitted".
    pub fn from_value(value: Option<&OutputValue>) -> Result<Self, DataUrlError> {
        let Some(value) = value else {
            return Ok(Self::default());
        };

        let raw_image_bytes = match value.image_data.as_deref() {
            Some(url) if !url.is_empty() => Some(decode_data_url(url)?.bytes),
            _ => None,
        };

        Ok(Self {
            is_submitted: value.is_submitted,
            raw_image_bytes,
            raw_image_base64: value.image_data.clone().filter(|s| !s.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_url::{PNG_MIME, encode_data_url};
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        assert_eq!(
            serde_json::to_value(OutputValue::cleared()).unwrap(),
            json!({"is_submitted": false, "image_data": null})
        );
        assert_eq!(
            serde_json::to_value(OutputValue::submitted(Some("data:x".into()))).unwrap(),
            json!({"is_submitted": true, "image_data": "data:x"})
        );
    }

    #[test]
    fn test_results_from_nothing() {
        let results = DrawingResults::from_value(None).unwrap();
        assert!(!results.is_submitted);
        assert!(results.raw_image_bytes.is_none());
    }

    #[test]
    fn test_results_decode_image() {
        let url = encode_data_url(PNG_MIME, &[1, 2, 3]);
        let value = OutputValue::submitted(Some(url.clone()));
        let results = DrawingResults::from_value(Some(&value)).unwrap();

        assert!(results.is_submitted);
        assert_eq!(results.raw_image_bytes, Some(vec![1, 2, 3]));
        assert_eq!(results.raw_image_base64, Some(url));
    }

    #[test]
    fn test_results_reject_bad_uri() {
        let value = OutputValue::submitted(Some("garbage".into()));
        assert!(DrawingResults::from_value(Some(&value)).is_err());
    }
}
