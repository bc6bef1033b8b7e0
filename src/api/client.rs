use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, Storage};

use super::error::ApiError;
use super::types::{GraphExport, GraphStatus, IndexResponse};
use crate::config::AppConfig;

/// Thin `fetch` wrapper for the graph endpoints.
#[derive(Clone, Debug)]
pub struct ApiClient {
	config: AppConfig,
}

impl ApiClient {
	pub fn new(config: AppConfig) -> Self {
		Self { config }
	}

	pub async fn graph_status(&self) -> Result<GraphStatus, ApiError> {
		self.send("GET", "/graph/status").await
	}

	pub async fn graph_export(&self) -> Result<GraphExport, ApiError> {
		self.send("GET", "/graph/export").await
	}

	/// Indexes only dreams that are not yet part of the graph.
	pub async fn index_graph(&self) -> Result<IndexResponse, ApiError> {
		self.send("POST", "/graph/index").await
	}

	/// Rebuilds the whole graph from every dream.
	pub async fn reindex_graph(&self) -> Result<IndexResponse, ApiError> {
		self.send("POST", "/graph/reindex").await
	}

	async fn send<T: DeserializeOwned>(&self, method: &str, path: &str) -> Result<T, ApiError> {
		let result = self.send_inner(method, path).await;
		if let Err(e) = &result {
			error!("{method} {path} failed: {e}");
		}
		result
	}

	async fn send_inner<T: DeserializeOwned>(
		&self,
		method: &str,
		path: &str,
	) -> Result<T, ApiError> {
		let window = web_sys::window().ok_or(ApiError::NoWindow)?;
		let url = self.config.endpoint(path);

		let opts = RequestInit::new();
		opts.set_method(method);
		opts.set_mode(RequestMode::Cors);
		let request = Request::new_with_str_and_init(&url, &opts)?;
		let headers = request.headers();
		headers.set("Content-Type", "application/json")?;
		if let Some(token) = self.token() {
			headers.set("Authorization", &format!("Bearer {token}"))?;
		}

		debug!("{method} {url}");
		let response: Response = JsFuture::from(window.fetch_with_request(&request))
			.await?
			.dyn_into()?;
		let body = JsFuture::from(response.text()?)
			.await?
			.as_string()
			.unwrap_or_default();

		match response.status() {
			401 => {
				self.clear_token();
				Err(ApiError::Unauthorized)
			}
			_ if !response.ok() => Err(ApiError::Status {
				status: response.status(),
				body,
			}),
			_ => Ok(serde_json::from_str(&body)?),
		}
	}

	fn storage(&self) -> Option<Storage> {
		web_sys::window()?.local_storage().ok().flatten()
	}

	fn token(&self) -> Option<String> {
		self.storage()?
			.get_item(&self.config.token_storage_key)
			.ok()
			.flatten()
			.filter(|t| !t.is_empty())
	}

	fn clear_token(&self) {
		warn!("backend rejected the session token, clearing it");
		if let Some(storage) = self.storage() {
			let _ = storage.remove_item(&self.config.token_storage_key);
		}
	}
}
