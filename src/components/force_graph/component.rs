use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::interaction::{CameraCommand, Interaction};
use super::layout::ForceLayout;
use super::render;
use super::scene::{GraphScene, PointerRelease};
use super::types::GraphData;
use crate::theme::Theme;

const FRAME_DT: f32 = 0.016;

type SharedScene = Rc<RefCell<Option<GraphScene<ForceLayout>>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn now_ms() -> f64 {
	js_sys::Date::now()
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|(w, h)| *w > 0.0 && *h > 0.0)
		.unwrap_or((800.0, 600.0))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Canvas that simulates and paints the visible graph.
///
/// Selection and hover are written to `interaction`; camera moves requested
/// from outside arrive through `camera` and are consumed on arrival.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	interaction: RwSignal<Interaction>,
	camera: RwSignal<Option<CameraCommand>>,
	#[prop(into)] theme: Signal<Theme>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let scene: SharedScene = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));

	let alive_cleanup = alive.clone();
	on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));

	let (scene_init, animate_init, resize_init, alive_init) =
		(scene.clone(), animate.clone(), resize_cb.clone(), alive.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window, graph canvas stays blank");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			error!("canvas 2d context unavailable");
			return;
		};

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let mut s = GraphScene::new(ForceLayout::default(), w, h);
		s.load(data.get_untracked(), now_ms());
		*scene_init.borrow_mut() = Some(s);
		debug!("graph canvas mounted at {w}x{h}");

		let (scene_resize, canvas_resize) = (scene_init.clone(), canvas.clone());
		*resize_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *scene_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (scene_anim, animate_inner, resize_inner, alive_anim) = (
			scene_init.clone(),
			animate_init.clone(),
			resize_init.clone(),
			alive_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			if !alive_anim.load(Ordering::Relaxed) {
				// unmounted: detach listeners and break the closure cycle
				if let Some(cb) = resize_inner.borrow_mut().take() {
					let _ = window
						.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				let _ = animate_inner.borrow_mut().take();
				return;
			}
			if let Some(ref mut s) = *scene_anim.borrow_mut() {
				s.tick(FRAME_DT, now_ms());
				interaction.with_untracked(|ui| render::render(s, &ctx, ui, theme.get_untracked()));
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let scene_data = scene.clone();
	Effect::new(move |prev: Option<()>| {
		let d = data.get();
		// the first value is loaded when the canvas mounts
		if prev.is_none() {
			return;
		}
		if let Some(ref mut s) = *scene_data.borrow_mut() {
			s.load(d, now_ms());
		}
	});

	let scene_cam = scene.clone();
	Effect::new(move |_| {
		let Some(cmd) = camera.get() else {
			return;
		};
		camera.set(None);
		if let Some(ref mut s) = *scene_cam.borrow_mut() {
			s.apply(&cmd, now_ms());
		}
	});

	let scene_md = scene.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *scene_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let scene_mm = scene.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let hovered = {
			let mut guard = scene_mm.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			s.pointer_move(x, y);
			if s.is_pressing() {
				return;
			}
			s.node_at_position(x, y).map(|i| s.data.nodes[i].id.clone())
		};
		let changed = interaction.with_untracked(|ui| ui.hovered != hovered);
		if changed {
			interaction.update(|ui| {
				ui.hover(hovered.as_deref());
			});
		}
	};

	let scene_mu = scene.clone();
	let on_mouseup = move |_: MouseEvent| {
		let (release, clicked_id) = {
			let mut guard = scene_mu.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			let release = s.pointer_up();
			let id = match release {
				Some(PointerRelease::NodeClick(i)) => s.data.nodes.get(i).map(|n| n.id.clone()),
				_ => None,
			};
			(release, id)
		};
		match (release, clicked_id) {
			(Some(PointerRelease::NodeClick(_)), Some(id)) => {
				let cmd = interaction.try_update(|ui| ui.click_node(&id)).flatten();
				if let (Some(cmd), Some(s)) = (cmd, scene_mu.borrow_mut().as_mut()) {
					s.apply(&cmd, now_ms());
				}
			}
			(Some(PointerRelease::BackgroundClick), _) => {
				interaction.update(|ui| ui.click_background());
			}
			_ => {}
		}
	};

	let scene_ml = scene.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *scene_ml.borrow_mut() {
			s.pointer_leave();
		}
		if interaction.with_untracked(|ui| ui.hovered.is_some()) {
			interaction.update(|ui| {
				ui.hover(None);
			});
		}
	};

	let scene_wh = scene.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *scene_wh.borrow_mut() {
			s.wheel(x, y, ev.delta_y());
		}
	};

	let cursor = move || {
		if interaction.with(|ui| ui.hovered.is_some()) {
			"cursor: pointer;"
		} else {
			"cursor: grab;"
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style=move || format!("display: block; {}", cursor())
		/>
	}
}
