//! Error types for everything around the renderers
//!
//! The renderers themselves never fail; these cover acquiring surfaces,
//! fetching rows and reading configuration.

use dashboard_types::{ErrorCode, ErrorInfo, OptionsError};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to decode rows of {table}: {source}")]
    Decode {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("data source is not configured")]
    NotConfigured,

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;

impl ChartError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ChartError::SurfaceUnavailable(_) => ErrorCode::SurfaceUnavailable,
            ChartError::InvalidColor(_) | ChartError::Options(_) | ChartError::Config(_) => {
                ErrorCode::InvalidOptions
            }
            ChartError::Http { .. } | ChartError::Network(_) => ErrorCode::NetworkError,
            ChartError::Decode { .. } => ErrorCode::ParseError,
            ChartError::NotConfigured => ErrorCode::NotConfigured,
        }
    }
}

impl From<&ChartError> for ErrorInfo {
    fn from(err: &ChartError) -> Self {
        let info = ErrorInfo::new(err.code(), err.to_string());
        match err {
            ChartError::Decode { table, .. } => info.with_details(*table),
            ChartError::Http { url, .. } => info.with_details(url.clone()),
            _ => info,
        }
    }
}

/// Describe a thrown JS value
pub(crate) fn describe_js(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
