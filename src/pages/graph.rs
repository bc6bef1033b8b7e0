//! Knowledge Graph page: status, stats, legend, canvas and details panel.

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use log::{error, info};

use crate::api::{ApiClient, ApiError, GraphStatus, IndexResponse};
use crate::components::force_graph::adapter::{adapt, type_counts};
use crate::components::force_graph::connections::{ConnectionSummary, summarize};
use crate::components::force_graph::entity::with_alpha;
use crate::components::force_graph::interaction::{FIT_PADDING, ZOOM_STEP};
use crate::components::force_graph::{
	CameraCommand, EntityType, ForceGraphCanvas, GraphData, GraphNode, Interaction,
};
use crate::config::use_config;
use crate::theme::{Theme, use_theme};

const REBUILD_CONFIRM: &str = "This will rebuild the entire graph. Continue?";

/// What the graph area shows once the status is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphViewState {
	Loading,
	/// Nothing to draw; `pending_dreams` can be indexed to build a graph.
	Empty { pending_dreams: u32 },
	/// The active type filter hides every node.
	FilteredOut,
	Ready,
}

pub fn view_state(
	status: Option<&GraphStatus>,
	export_loading: bool,
	raw_node_count: usize,
	visible_count: usize,
	filter: Option<EntityType>,
) -> GraphViewState {
	if export_loading {
		return GraphViewState::Loading;
	}
	if visible_count > 0 {
		return GraphViewState::Ready;
	}
	if filter.is_some() && raw_node_count > 0 {
		return GraphViewState::FilteredOut;
	}
	GraphViewState::Empty {
		pending_dreams: status.map_or(0, |s| s.pending_dreams),
	}
}

/// True while a graph exists but its export has not arrived yet.
///
/// `export` is the resource value: `Some(None)` is the placeholder resolved
/// before the graph existed, which stays readable during the refetch.
fn export_loading<T>(graph_exists: bool, export: Option<&Option<T>>) -> bool {
	graph_exists && !matches!(export, Some(Some(_)))
}

/// The indexing job the user started last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IndexJob {
	Index,
	Reindex,
}

fn empty_description(pending_dreams: u32) -> String {
	if pending_dreams > 0 {
		format!("Index your {pending_dreams} pending dreams to build the knowledge graph")
	} else {
		"Start recording dreams to build your knowledge graph".into()
	}
}

fn confirm_rebuild() -> bool {
	web_sys::window()
		.and_then(|w| w.confirm_with_message(REBUILD_CONFIRM).ok())
		.unwrap_or(false)
}

fn index_error_text(result: Option<Result<IndexResponse, ApiError>>) -> Option<String> {
	match result? {
		Ok(resp) if !resp.success => Some("Indexing did not complete".into()),
		Ok(_) => None,
		Err(e) => Some(e.to_string()),
	}
}

/// Error of the most recently started job only.
fn latest_index_error(
	last: Option<IndexJob>,
	index: Option<Result<IndexResponse, ApiError>>,
	reindex: Option<Result<IndexResponse, ApiError>>,
) -> Option<String> {
	match last? {
		IndexJob::Index => index_error_text(index),
		IndexJob::Reindex => index_error_text(reindex),
	}
}

#[component]
pub fn GraphPage() -> impl IntoView {
	let client = ApiClient::new(use_config());
	let poll_interval = use_config().status_poll_interval;
	let theme = use_theme();

	let status_client = client.clone();
	let status = LocalResource::new(move || {
		let client = status_client.clone();
		async move { client.graph_status().await }
	});

	let graph_exists = Memo::new(move |_| {
		status
			.get()
			.and_then(Result::ok)
			.is_some_and(|s| s.graph_exists)
	});

	let export_client = client.clone();
	let export = LocalResource::new(move || {
		let client = export_client.clone();
		let exists = graph_exists.get();
		async move {
			if exists {
				Some(client.graph_export().await)
			} else {
				None
			}
		}
	});

	let index_client = client.clone();
	let index_action = Action::new_local(move |_: &()| {
		let client = index_client.clone();
		async move { client.index_graph().await }
	});
	let reindex_client = client;
	let reindex_action = Action::new_local(move |_: &()| {
		let client = reindex_client.clone();
		async move { client.reindex_graph().await }
	});

	// refetch once either job finishes
	Effect::new(move |prev: Option<(usize, usize)>| {
		let versions = (index_action.version().get(), reindex_action.version().get());
		if prev.is_some_and(|p| p != versions) {
			info!("index job finished, refreshing graph");
			status.refetch();
			export.refetch();
		}
		versions
	});

	let indexing =
		Memo::new(move |_| index_action.pending().get() || reindex_action.pending().get());
	Effect::new(move |_| {
		if !indexing.get() {
			return;
		}
		match set_interval_with_handle(move || status.refetch(), poll_interval) {
			Ok(handle) => on_cleanup(move || handle.clear()),
			Err(e) => error!("could not start status polling: {e:?}"),
		}
	});

	let raw = Memo::new(move |_| {
		export
			.get()
			.flatten()
			.and_then(Result::ok)
			.unwrap_or_default()
	});
	let export_error = move || match export.get().flatten() {
		Some(Err(e)) => Some(e.to_string()),
		_ => None,
	};
	let status_error = move || match status.get() {
		Some(Err(e)) => Some(e.to_string()),
		_ => None,
	};

	let interaction = RwSignal::new(Interaction::default());
	let camera = RwSignal::new(None::<CameraCommand>);
	let filter = Memo::new(move |_| interaction.with(|ui| ui.filter));
	let visible: Memo<GraphData> = Memo::new(move |_| raw.with(|r| adapt(r, filter.get())));
	let legend = Memo::new(move |_| raw.with(type_counts));

	Effect::new(move |_| {
		visible.with(|data| {
			let stale = interaction.with_untracked(|ui| {
				let mut pruned = ui.clone();
				pruned.retain_visible(data);
				pruned != *ui
			});
			if stale {
				interaction.update(|ui| ui.retain_visible(data));
			}
		});
	});

	let status_loaded = Memo::new(move |_| status.get().is_some());
	let state = Memo::new(move |_| {
		let status = status.get().and_then(Result::ok);
		let loading = export.with(|e| export_loading(graph_exists.get(), e.as_ref()));
		view_state(
			status.as_ref(),
			loading,
			raw.with(|r| r.nodes.len()),
			visible.with(|d| d.nodes.len()),
			filter.get(),
		)
	});

	let details = Memo::new(move |_| {
		let selected = interaction.with(|ui| ui.selected.clone())?;
		visible.with(|d| Some((d.node(&selected)?.clone(), summarize(d, &selected))))
	});

	let last_job = RwSignal::new(None::<IndexJob>);
	let index_error = move || {
		latest_index_error(
			last_job.get(),
			index_action.value().get(),
			reindex_action.value().get(),
		)
	};

	let start_index = move |_: MouseEvent| {
		last_job.set(Some(IndexJob::Index));
		index_action.dispatch(());
	};
	let start_reindex = move |_: MouseEvent| {
		if confirm_rebuild() {
			last_job.set(Some(IndexJob::Reindex));
			reindex_action.dispatch(());
		}
	};

	let header = move || {
		status.get().map(|res| {
			let s = res.ok().unwrap_or_default();
			let pending = s.pending_dreams;
			view! {
				<header class="graph-header">
					<div class="graph-title">
						<h1>"Knowledge Graph"</h1>
						{if s.graph_exists {
							view! { <span class="badge active">"Active"</span> }.into_any()
						} else {
							view! { <span class="badge">"Not Built"</span> }.into_any()
						}}
						<p class="graph-subtitle">
							{move || {
								visible
									.with(|d| {
										format!("{} entities • {} connections", d.nodes.len(), d.links.len())
									})
							}}
						</p>
					</div>
					<div class="graph-actions">
						<button class="ghost" on:click=move |_| theme.toggle()>
							{move || if theme.theme.get() == Theme::Dark { "Light" } else { "Dark" }}
						</button>
						<Show when=move || { pending > 0 }>
							<button
								class="primary"
								disabled=move || indexing.get()
								on:click=start_index
							>
								{move || {
									if index_action.pending().get() {
										"Indexing…".to_string()
									} else {
										format!("Index {pending} Pending")
									}
								}}
							</button>
						</Show>
						<button class="ghost" disabled=move || indexing.get() on:click=start_reindex>
							{move || if reindex_action.pending().get() { "Rebuilding…" } else { "Rebuild" }}
						</button>
					</div>
				</header>
				<section class="stat-cards">
					<StatCard title="Total Dreams" value=s.total_dreams />
					<StatCard title="Indexed" value=s.indexed_dreams />
					<StatCard title="Pending" value=s.pending_dreams />
					<StatCard title="Graph Entities" value=s.entity_count.unwrap_or(0) />
				</section>
			}
		})
	};

	let graph_area = move || match state.get() {
		GraphViewState::Loading => view! { <div class="graph-loading">"Loading graph…"</div> }
		.into_any(),
		GraphViewState::Empty { pending_dreams } => view! {
			<div class="graph-empty">
				<h2>"No graph data"</h2>
				<p>{empty_description(pending_dreams)}</p>
				<Show when=move || { pending_dreams > 0 }>
					<button class="primary" disabled=move || indexing.get() on:click=start_index>
						"Index Dreams"
					</button>
				</Show>
			</div>
		}
		.into_any(),
		GraphViewState::FilteredOut => view! {
			<div class="graph-empty">
				<h2>"No matching entities"</h2>
				<button class="ghost" on:click=move |_| interaction.update(|ui| ui.clear_filter())>
					"Clear filter"
				</button>
			</div>
		}
		.into_any(),
		GraphViewState::Ready => view! {
			<div class="graph-canvas-wrap">
				<ForceGraphCanvas
					data=visible
					interaction=interaction
					camera=camera
					theme=theme.theme
				/>
				<div class="graph-vignette" style=move || format!("background: {};", theme.theme.get().vignette()) />
				<GraphControls interaction=interaction camera=camera />
				<p class="graph-help">
					"Hover to see labels • Click for details • Scroll to zoom • Drag to explore"
				</p>
				{move || {
					details
						.get()
						.map(|(node, summary)| {
							view! { <DetailsPanel node=node summary=summary interaction=interaction /> }
						})
				}}
			</div>
		}
		.into_any(),
	};

	view! {
		<div class="graph-page">
			{move || match status_loaded.get() {
				false => view! { <div class="graph-loading">"Loading…"</div> }.into_any(),
				true => view! {
					{header}
					{move || status_error().or_else(export_error).map(|e| view! {
						<p class="inline-error">{format!("Could not load graph: {e}")}</p>
					})}
					{move || index_error().map(|e| view! { <p class="inline-error">{e}</p> })}
					<Legend legend=legend interaction=interaction />
					<section class="graph-area">{graph_area}</section>
					<p class="graph-info">
						"Entities are extracted from your dreams. Lines show how they connect; "
						"select an entity to see its strongest connections."
					</p>
				}
				.into_any(),
			}}
		</div>
	}
}

#[component]
fn StatCard(title: &'static str, value: u32) -> impl IntoView {
	view! {
		<div class="stat-card">
			<span class="stat-title">{title}</span>
			<span class="stat-value">{value}</span>
		</div>
	}
}

#[component]
fn Legend(legend: Memo<Vec<(EntityType, usize)>>, interaction: RwSignal<Interaction>) -> impl IntoView {
	let active = move || interaction.with(|ui| ui.filter);
	view! {
		<Show when=move || legend.with(|l| !l.is_empty())>
			<div class="legend">
				{move || {
					legend
						.get()
						.into_iter()
						.map(|(ty, count)| {
							let style = ty.style();
							let chip_style = move || {
								if active() == Some(ty) {
									format!("background: {}; color: #fff;", style.bg)
								} else {
									format!("background: {}; color: {};", with_alpha(style.bg, "20"), style.bg)
								}
							};
							view! {
								<button
									class="legend-chip"
									data-type=ty.key()
									title=format!("{}: {count} entities", style.text)
									style=chip_style
									on:click=move |_| interaction.update(|ui| ui.toggle_filter(ty))
								>
									<span class="legend-dot" style=format!("background: {};", style.bg) />
									{style.text}
									<span class="legend-count">{count}</span>
								</button>
							}
						})
						.collect_view()
				}}
				<Show when=move || active().is_some()>
					<button class="legend-clear" on:click=move |_| interaction.update(|ui| ui.clear_filter())>
						"Clear filter"
					</button>
				</Show>
			</div>
		</Show>
	}
}

#[component]
fn GraphControls(
	interaction: RwSignal<Interaction>,
	camera: RwSignal<Option<CameraCommand>>,
) -> impl IntoView {
	view! {
		<div class="graph-controls">
			<button title="Zoom in" on:click=move |_| camera.set(Some(CameraCommand::ZoomBy(ZOOM_STEP)))>
				"+"
			</button>
			<button
				title="Zoom out"
				on:click=move |_| camera.set(Some(CameraCommand::ZoomBy(1.0 / ZOOM_STEP)))
			>
				"−"
			</button>
			<button
				title="Fit to view"
				on:click=move |_| camera.set(Some(CameraCommand::Fit { padding: FIT_PADDING }))
			>
				"Fit"
			</button>
			<button
				title="Toggle labels"
				class=move || if interaction.with(|ui| ui.show_labels) { "active" } else { "" }
				on:click=move |_| interaction.update(|ui| ui.toggle_labels())
			>
				"Labels"
			</button>
		</div>
	}
}

#[component]
fn DetailsPanel(
	node: GraphNode,
	summary: ConnectionSummary,
	interaction: RwSignal<Interaction>,
) -> impl IntoView {
	let style = node.entity.style();
	let total = summary.total;
	view! {
		<aside class="details-panel">
			<button class="details-close" title="Close" on:click=move |_| interaction.update(|ui| ui.click_background())>
				"×"
			</button>
			<h3>{node.display_label().to_owned()}</h3>
			<span
				class="type-chip"
				data-type=node.entity.key()
				style=format!("background: {}; color: {};", with_alpha(style.bg, "20"), style.border)
			>
				{style.text}
			</span>
			{node.description.map(|d| view! { <p class="details-description">{d}</p> })}
			<h4>{format!("Connections ({total})")}</h4>
			<ul class="details-connections">
				{summary
					.listed
					.into_iter()
					.map(|c| {
						view! {
							<li>
								<span class="legend-dot" style=format!("background: {};", c.node.color) />
								<span class="connection-label">{c.node.display_label().to_owned()}</span>
								<span class="connection-relationship">{c.relationship}</span>
							</li>
						}
					})
					.collect_view()}
			</ul>
		</aside>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn status(total: u32, pending: u32, exists: bool) -> GraphStatus {
		GraphStatus {
			total_dreams: total,
			indexed_dreams: total - pending,
			pending_dreams: pending,
			graph_exists: exists,
			..Default::default()
		}
	}

	#[test]
	fn unbuilt_graph_offers_indexing_pending_dreams() {
		let s = status(5, 5, false);
		assert_eq!(
			view_state(Some(&s), false, 0, 0, None),
			GraphViewState::Empty { pending_dreams: 5 }
		);
		assert_eq!(
			empty_description(5),
			"Index your 5 pending dreams to build the knowledge graph"
		);
	}

	#[test]
	fn no_dreams_asks_to_start_recording() {
		let s = status(0, 0, false);
		assert_eq!(
			view_state(Some(&s), false, 0, 0, None),
			GraphViewState::Empty { pending_dreams: 0 }
		);
		assert_eq!(
			empty_description(0),
			"Start recording dreams to build your knowledge graph"
		);
	}

	#[test]
	fn export_in_flight_is_loading() {
		let s = status(5, 0, true);
		assert_eq!(
			view_state(Some(&s), true, 0, 0, None),
			GraphViewState::Loading
		);
	}

	#[test]
	fn existing_graph_waits_for_its_export() {
		// placeholder from before the status said the graph exists
		let placeholder: Option<Option<u8>> = Some(None);
		assert!(export_loading(true, placeholder.as_ref()));
		assert!(export_loading(true, None::<&Option<u8>>));
		assert!(!export_loading(true, Some(&Some(1u8))));
		assert!(!export_loading(false, placeholder.as_ref()));

		let s = status(5, 0, true);
		assert_eq!(
			view_state(Some(&s), export_loading(true, placeholder.as_ref()), 0, 0, None),
			GraphViewState::Loading
		);
	}

	#[test]
	fn visible_nodes_are_ready() {
		let s = status(5, 0, true);
		assert_eq!(
			view_state(Some(&s), false, 4, 4, None),
			GraphViewState::Ready
		);
		assert_eq!(
			view_state(Some(&s), false, 4, 2, Some(EntityType::Symbol)),
			GraphViewState::Ready
		);
	}

	#[test]
	fn filter_hiding_everything_is_filtered_out() {
		let s = status(5, 0, true);
		assert_eq!(
			view_state(Some(&s), false, 4, 0, Some(EntityType::Emotion)),
			GraphViewState::FilteredOut
		);
	}

	#[test]
	fn failed_status_falls_back_to_empty() {
		assert_eq!(
			view_state(None, false, 0, 0, None),
			GraphViewState::Empty { pending_dreams: 0 }
		);
	}

	#[test]
	fn index_errors_are_reported() {
		assert_eq!(index_error_text(None), None);
		assert_eq!(
			index_error_text(Some(Ok(IndexResponse {
				success: true,
				dreams_indexed: 3
			}))),
			None
		);
		assert!(index_error_text(Some(Ok(IndexResponse::default()))).is_some());
		assert_eq!(
			index_error_text(Some(Err(ApiError::Unauthorized))).as_deref(),
			Some("session expired, please log in again")
		);
	}

	#[test]
	fn only_the_latest_job_reports_its_error() {
		let failed = || Some(Err(ApiError::Unauthorized));
		let done = || {
			Some(Ok(IndexResponse {
				success: true,
				dreams_indexed: 5,
			}))
		};
		assert_eq!(
			latest_index_error(Some(IndexJob::Reindex), failed(), done()),
			None
		);
		assert!(latest_index_error(Some(IndexJob::Index), failed(), done()).is_some());
		assert_eq!(latest_index_error(None, failed(), failed()), None);
	}
}
