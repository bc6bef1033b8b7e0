//! Build-time application configuration.

use std::time::Duration;

use leptos::prelude::*;

pub const DEFAULT_API_URL: &str = "/api";
pub const TOKEN_STORAGE_KEY: &str = "token";
pub const THEME_STORAGE_KEY: &str = "dream-journal-theme";
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// Backend base URL without a trailing slash.
	pub api_base_url: String,
	pub token_storage_key: String,
	pub theme_storage_key: String,
	/// Status refetch period while an index job is running.
	pub status_poll_interval: Duration,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self::with_api_url(DEFAULT_API_URL)
	}
}

impl AppConfig {
	/// Reads `DREAM_JOURNAL_API_URL` at compile time, falling back to `/api`.
	pub fn from_env() -> Self {
		Self::with_api_url(option_env!("DREAM_JOURNAL_API_URL").unwrap_or(DEFAULT_API_URL))
	}

	pub fn with_api_url(url: &str) -> Self {
		let trimmed = url.trim().trim_end_matches('/');
		Self {
			api_base_url: if trimmed.is_empty() {
				DEFAULT_API_URL.into()
			} else {
				trimmed.into()
			},
			token_storage_key: TOKEN_STORAGE_KEY.into(),
			theme_storage_key: THEME_STORAGE_KEY.into(),
			status_poll_interval: STATUS_POLL_INTERVAL,
		}
	}

	/// Joins an endpoint path such as `/graph/status` onto the base URL.
	pub fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
	}
}

pub fn provide_config(config: AppConfig) {
	provide_context(config);
}

/// Config from context, or the build-time default when none was provided.
pub fn use_config() -> AppConfig {
	use_context::<AppConfig>().unwrap_or_else(AppConfig::from_env)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoint_joins_without_double_slash() {
		let cfg = AppConfig::with_api_url("https://dreams.example.com/api/");
		assert_eq!(
			cfg.endpoint("/graph/status"),
			"https://dreams.example.com/api/graph/status"
		);
		assert_eq!(
			cfg.endpoint("graph/export"),
			"https://dreams.example.com/api/graph/export"
		);
	}

	#[test]
	fn blank_url_falls_back_to_default() {
		let cfg = AppConfig::with_api_url("   ");
		assert_eq!(cfg.api_base_url, "/api");
		assert_eq!(cfg.status_poll_interval, Duration::from_secs(5));
	}
}
