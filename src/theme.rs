//! Light/dark theme shared through Leptos context.

use leptos::prelude::*;
use log::debug;

use crate::config::use_config;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	Light,
	#[default]
	Dark,
}

impl Theme {
	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"light" => Some(Theme::Light),
			"dark" => Some(Theme::Dark),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Theme::Light => "light",
			Theme::Dark => "dark",
		}
	}

	pub fn toggled(self) -> Self {
		match self {
			Theme::Light => Theme::Dark,
			Theme::Dark => Theme::Light,
		}
	}

	/// Canvas clear color.
	pub fn background(self) -> &'static str {
		match self {
			Theme::Light => "#fafafa",
			Theme::Dark => "#0f0f0f",
		}
	}

	pub fn label_box(self) -> &'static str {
		match self {
			Theme::Light => "rgba(255, 255, 255, 0.95)",
			Theme::Dark => "rgba(15, 23, 42, 0.95)",
		}
	}

	pub fn label_text(self) -> &'static str {
		match self {
			Theme::Light => "#18181b",
			Theme::Dark => "#f8fafc",
		}
	}

	pub fn vignette(self) -> &'static str {
		match self {
			Theme::Light => {
				"radial-gradient(ellipse at center, transparent 30%, rgba(0,0,0,0.08) 100%)"
			}
			Theme::Dark => {
				"radial-gradient(ellipse at center, transparent 30%, rgba(0,0,0,0.5) 100%)"
			}
		}
	}
}

#[derive(Clone, Copy)]
pub struct ThemeState {
	pub theme: RwSignal<Theme>,
}

impl ThemeState {
	pub fn toggle(&self) {
		self.theme.update(|t| *t = t.toggled());
	}
}

/// Restores the stored theme and saves every change back to storage.
///
/// `<html data-theme>` follows the signal through the `Html` tag in `App`.
pub fn provide_theme() -> ThemeState {
	let key = use_config().theme_storage_key;
	let stored = web_sys::window()
		.and_then(|w| w.local_storage().ok().flatten())
		.and_then(|s| s.get_item(&key).ok().flatten())
		.and_then(|v| Theme::parse(&v))
		.unwrap_or_default();
	let state = ThemeState {
		theme: RwSignal::new(stored),
	};

	Effect::new(move |_| {
		let theme = state.theme.get();
		debug!("theme set to {}", theme.as_str());
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Ok(Some(storage)) = window.local_storage() {
			let _ = storage.set_item(&key, theme.as_str());
		}
	});

	provide_context(state);
	state
}

pub fn use_theme() -> ThemeState {
	use_context::<ThemeState>().unwrap_or_else(|| ThemeState {
		theme: RwSignal::new(Theme::default()),
	})
}
