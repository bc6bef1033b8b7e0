//! Leptos client-side app for the Dream Journal knowledge graph.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod theme;

// Top-Level pages
use crate::config::{AppConfig, provide_config};
use crate::pages::graph::GraphPage;
use crate::pages::not_found::NotFound;
use crate::theme::provide_theme;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the graph page and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	let config = AppConfig::from_env();
	info!("using api at {}", config.api_base_url);
	provide_config(config);
	let theme = provide_theme();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=move || theme.theme.get().as_str() />

		// sets the document title
		<Title text="Knowledge Graph · Dream Journal" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=GraphPage />
				<Route path=path!("/graph") view=GraphPage />
			</Routes>
		</Router>
	}
}
