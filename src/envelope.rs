//! Response envelope
//!
//! The single JSON result shape returned for every request that reaches the
//! core. Immutable once constructed; optional fields are omitted from the
//! body rather than serialized as `null`.

use serde::Serialize;
use serde_json::Value;

use crate::projector::PageProjection;

/// Description label attached to successful parse results.
const FORM_IMAGE_JSON: &str = "FormImage JSON";

/// Normalized API result.
#[derive(Debug, Clone, Serialize)]
pub struct SvcResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    /// Free-form tag: the staged source path on success, the service name on
    /// status probes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Projected page sequence, success case only.
    #[serde(rename = "Pages", skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<PageProjection>>,
    /// Engine metadata, passed through opaque and unmodified.
    #[serde(rename = "Meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl SvcResponse {
    pub fn new(
        status_code: u16,
        message: impl Into<String>,
        data: Option<Value>,
        description: Option<String>,
    ) -> Self {
        Self {
            status_code,
            message: message.into(),
            data,
            description,
            pages: None,
            meta: None,
        }
    }

    /// Successful parse result: the staged source path as `data`, the
    /// projected pages, and the engine's metadata.
    pub fn parsed(source: impl Into<String>, pages: Vec<PageProjection>, meta: Value) -> Self {
        Self {
            pages: Some(pages),
            meta: Some(meta),
            ..Self::new(
                200,
                "OK",
                Some(Value::String(source.into())),
                Some(FORM_IMAGE_JSON.to_string()),
            )
        }
    }

    /// Engine failure: statusCode 500 with the stringified error payload as
    /// the message. Serializes to exactly `{"statusCode":500,"message":…}`.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(500, message, None, None)
    }

    /// Service identity probe result.
    pub fn status(name: &str, version: &str) -> Self {
        Self::new(
            200,
            "OK",
            Some(Value::String(name.to_string())),
            Some(version.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_envelope_has_only_status_and_message() {
        let envelope = SvcResponse::error(r#"{"parserError":"bad xref"}"#);
        let body = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            body,
            json!({"statusCode": 500, "message": r#"{"parserError":"bad xref"}"#})
        );
    }

    #[test]
    fn parsed_envelope_carries_pages_and_meta() {
        let envelope = SvcResponse::parsed(
            "/tmp/upload-1.pdf",
            vec![],
            json!({"Producer": "test"}),
        );
        let body = serde_json::to_value(&envelope).unwrap();

        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["message"], "OK");
        assert_eq!(body["data"], "/tmp/upload-1.pdf");
        assert_eq!(body["description"], "FormImage JSON");
        assert_eq!(body["Pages"], json!([]));
        assert_eq!(body["Meta"], json!({"Producer": "test"}));
    }

    #[test]
    fn status_envelope_reports_name_and_version() {
        let envelope = SvcResponse::status("pdfform-server", "0.1.0");
        let body = serde_json::to_value(&envelope).unwrap();

        assert_eq!(body["data"], "pdfform-server");
        assert_eq!(body["description"], "0.1.0");
        assert!(body.get("Pages").is_none());
    }
}
