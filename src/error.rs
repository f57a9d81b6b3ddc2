use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("DOM error: {0}")]
    Dom(String),
    #[error("unusable markup: {0}")]
    Markup(String),
    #[error("invalid {field}: {value}")]
    InvalidSetting { field: &'static str, value: String },
    #[error("invalid viewport config: {0}")]
    InvalidConfig(String),
    #[error("server responded {status}: {message}")]
    Http { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("Please sign in to process files")]
    SignedOut,
}

impl From<JsValue> for AppError {
    fn from(value: JsValue) -> Self {
        AppError::Dom(crate::util::js_error_message(&value))
    }
}

impl From<gloo_net::Error> for AppError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => AppError::Decode(e.to_string()),
            other => AppError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}
