use leptos::prelude::*;
use leptos_router::components::A;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="graph-empty">
			<h2>"Page not found"</h2>
			<A href="/graph">"Back to the knowledge graph"</A>
		</div>
	}
}
