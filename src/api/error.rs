use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure of a request against the Dream Journal backend.
///
/// Cloneable so it can sit inside reactive resources.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
	#[error("no browser window available")]
	NoWindow,
	#[error("javascript error: {0}")]
	Js(String),
	#[error("session expired, please log in again")]
	Unauthorized,
	#[error("request failed with status {status}: {body}")]
	Status { status: u16, body: String },
	#[error("could not decode response: {0}")]
	Decode(String),
}

impl From<serde_json::Error> for ApiError {
	fn from(err: serde_json::Error) -> Self {
		ApiError::Decode(err.to_string())
	}
}

impl From<JsValue> for ApiError {
	fn from(value: JsValue) -> Self {
		ApiError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
