use log::debug;

use super::camera::{Bounds, Camera, ViewTransform};
use super::interaction::{
	CameraCommand, FIT_DURATION_MS, FOCUS_DURATION_MS, FOCUS_ZOOM, ZOOM_DURATION_MS,
};
use super::layout::{ForceLayout, Layout, Point};
use super::painter::{base_radius, hit_radius};
use super::types::GraphData;

/// Pointer travel in pixels beyond which a press is a drag, not a click.
pub const CLICK_SLOP: f64 = 4.0;
/// Delay between a data load and the automatic fit.
pub const AUTO_FIT_DELAY_MS: f64 = 500.0;
pub const AUTO_FIT_PADDING: f64 = 80.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Point,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start: ViewTransform,
	pub moved: bool,
}

/// What a released press turned out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerRelease {
	NodeClick(usize),
	BackgroundClick,
	DragEnd,
}

/// Everything the canvas needs between frames: visible graph, layout and camera.
pub struct GraphScene<L: Layout = ForceLayout> {
	pub data: GraphData,
	pub layout: L,
	pub camera: Camera,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	/// Seconds of animation, drives link particles.
	pub flow_time: f64,
	fit_at_ms: Option<f64>,
}

impl<L: Layout> GraphScene<L> {
	pub fn new(layout: L, width: f64, height: f64) -> Self {
		Self {
			data: GraphData::default(),
			layout,
			camera: Camera::new(ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			}),
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			flow_time: 0.0,
			fit_at_ms: None,
		}
	}

	/// Swaps in a new visible graph and schedules a fit.
	pub fn load(&mut self, data: GraphData, now_ms: f64) {
		self.layout.load(&data);
		self.data = data;
		self.drag = DragState::default();
		self.fit_at_ms = Some(now_ms + AUTO_FIT_DELAY_MS);
	}

	pub fn position(&self, idx: usize) -> Option<Point> {
		self.layout.positions().get(idx).copied()
	}

	pub fn transform(&self) -> ViewTransform {
		self.camera.transform
	}

	/// Topmost node whose hit area contains the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.camera.transform.screen_to_graph(sx, sy);
		let positions = self.layout.positions();
		self.data
			.nodes
			.iter()
			.enumerate()
			.rev()
			.find(|(i, node)| {
				positions.get(*i).is_some_and(|p| {
					let (dx, dy) = (p.x - gx, p.y - gy);
					(dx * dx + dy * dy).sqrt() < hit_radius(node.size)
				})
			})
			.map(|(i, _)| i)
	}

	pub fn apply(&mut self, cmd: &CameraCommand, now_ms: f64) {
		match cmd {
			CameraCommand::Focus { node_id } => {
				let Some(p) = self.data.index_of(node_id).and_then(|i| self.position(i)) else {
					return;
				};
				let to = ViewTransform::centered_on(p.x, p.y, FOCUS_ZOOM, self.width, self.height);
				self.camera.animate_to(to, now_ms, FOCUS_DURATION_MS);
			}
			CameraCommand::ZoomBy(factor) => {
				let target = self.camera.target();
				let to = target.zoomed_about(self.width / 2.0, self.height / 2.0, target.k * factor);
				self.camera.animate_to(to, now_ms, ZOOM_DURATION_MS);
			}
			CameraCommand::Fit { padding } => {
				let positions = self.layout.positions();
				let circles = self
					.data
					.nodes
					.iter()
					.zip(positions)
					.map(|(n, p)| (p.x, p.y, base_radius(n.size)));
				let Some(bounds) = Bounds::around(circles) else {
					return;
				};
				let to = ViewTransform::fit(bounds, self.width, self.height, *padding);
				debug!("fit {} nodes at zoom {:.2}", self.data.nodes.len(), to.k);
				self.camera.animate_to(to, now_ms, FIT_DURATION_MS);
			}
		}
	}

	pub fn tick(&mut self, dt: f32, now_ms: f64) {
		if !self.layout.is_settled() {
			self.layout.step(dt);
		}
		self.flow_time += dt as f64;
		if self.camera.is_animating() {
			self.camera.update(now_ms);
		}
		if self.fit_at_ms.is_some_and(|at| now_ms >= at) {
			self.fit_at_ms = None;
			self.apply(
				&CameraCommand::Fit {
					padding: AUTO_FIT_PADDING,
				},
				now_ms,
			);
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Wheel zoom about the cursor; cancels any camera transition.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let t = self.camera.transform;
		self.camera.set(t.zoomed_about(sx, sy, t.k * factor));
	}

	pub fn is_pressing(&self) -> bool {
		self.drag.active || self.pan.active
	}

	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.node_at_position(sx, sy) {
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: sx,
				start_y: sy,
				node_start: self.position(idx).unwrap_or_default(),
				moved: false,
			};
		} else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start: self.camera.transform,
				moved: false,
			};
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.drag.active {
			let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
			self.drag.moved |= dx.hypot(dy) > CLICK_SLOP;
			if !self.drag.moved {
				return;
			}
			if let Some(idx) = self.drag.node_idx {
				let k = self.camera.transform.k;
				let at = Point {
					x: self.drag.node_start.x + dx / k,
					y: self.drag.node_start.y + dy / k,
				};
				self.layout.pin(idx, at);
				self.layout.reheat();
			}
		} else if self.pan.active {
			let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
			self.pan.moved |= dx.hypot(dy) > CLICK_SLOP;
			if !self.pan.moved {
				return;
			}
			let start = self.pan.transform_start;
			self.camera.set(ViewTransform {
				x: start.x + dx,
				y: start.y + dy,
				k: start.k,
			});
		}
	}

	pub fn pointer_up(&mut self) -> Option<PointerRelease> {
		let release = if self.drag.active {
			match (self.drag.moved, self.drag.node_idx) {
				(false, Some(idx)) => Some(PointerRelease::NodeClick(idx)),
				_ => Some(PointerRelease::DragEnd),
			}
		} else if self.pan.active {
			Some(if self.pan.moved {
				PointerRelease::DragEnd
			} else {
				PointerRelease::BackgroundClick
			})
		} else {
			None
		};
		self.pointer_leave();
		release
	}

	pub fn pointer_leave(&mut self) {
		self.drag = DragState::default();
		self.pan = PanState::default();
	}
}
