//! Error payloads handed back to JavaScript

use serde::{Deserialize, Serialize};
use tsify::Tsify;

/// Failure reported to the dashboard UI
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct ErrorInfo {
    pub code: ErrorCode,
    pub message: String,
    /// Table name or URL the failure relates to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Failure category, stable across releases
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum ErrorCode {
    /// Canvas element or 2D context unavailable
    SurfaceUnavailable,
    /// Renderer options rejected
    InvalidOptions,
    /// Backend rows did not match the expected shape
    ParseError,
    /// Fetch rejected or non-2xx response
    NetworkError,
    /// Data source not configured
    NotConfigured,
}

impl ErrorInfo {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_are_omitted_when_absent() {
        let info = ErrorInfo::new(ErrorCode::NetworkError, "HTTP 503");
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"code":"NetworkError","message":"HTTP 503"}"#);

        let info = info.with_details("traffic_sources");
        assert_eq!(info.details.as_deref(), Some("traffic_sources"));
    }
}
