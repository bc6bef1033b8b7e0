//! Pan/zoom transform and its eased transitions.

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
/// Fitting never zooms in further than this, so a lone node is not blown up.
pub const FIT_MAX_ZOOM: f64 = 4.0;

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Maps graph space to screen space: `screen = graph * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	#[cfg(test)]
	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Transform that puts `(gx, gy)` at the viewport center at zoom `k`.
	pub fn centered_on(gx: f64, gy: f64, k: f64, width: f64, height: f64) -> Self {
		let k = k.clamp(MIN_ZOOM, MAX_ZOOM);
		Self {
			x: width / 2.0 - gx * k,
			y: height / 2.0 - gy * k,
			k,
		}
	}

	/// Zooms to `k` keeping the graph point under `(sx, sy)` fixed.
	pub fn zoomed_about(&self, sx: f64, sy: f64, k: f64) -> Self {
		let k = k.clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.k;
		Self {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			k,
		}
	}

	/// Transform showing all of `bounds` inside the viewport minus `padding`.
	pub fn fit(bounds: Bounds, width: f64, height: f64, padding: f64) -> Self {
		let (bw, bh) = (bounds.width().max(1.0), bounds.height().max(1.0));
		let (aw, ah) = (
			(width - 2.0 * padding).max(1.0),
			(height - 2.0 * padding).max(1.0),
		);
		let k = (aw / bw).min(ah / bh).clamp(MIN_ZOOM, FIT_MAX_ZOOM);
		let (cx, cy) = bounds.center();
		Self::centered_on(cx, cy, k, width, height)
	}

	fn lerp(&self, to: &Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

/// Axis-aligned box in graph space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	/// Smallest box holding every circle `(x, y, r)`, `None` when empty.
	pub fn around(circles: impl IntoIterator<Item = (f64, f64, f64)>) -> Option<Self> {
		let mut bounds: Option<Self> = None;
		for (x, y, r) in circles {
			let b = bounds.get_or_insert(Self {
				min_x: x - r,
				min_y: y - r,
				max_x: x + r,
				max_y: y + r,
			});
			b.min_x = b.min_x.min(x - r);
			b.min_y = b.min_y.min(y - r);
			b.max_x = b.max_x.max(x + r);
			b.max_y = b.max_y.max(y + r);
		}
		bounds
	}

	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	pub fn center(&self) -> (f64, f64) {
		(
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
		)
	}
}

#[derive(Clone, Debug)]
struct Transition {
	from: ViewTransform,
	to: ViewTransform,
	start_ms: f64,
	duration_ms: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Camera {
	pub transform: ViewTransform,
	transition: Option<Transition>,
}

impl Camera {
	pub fn new(transform: ViewTransform) -> Self {
		Self {
			transform,
			transition: None,
		}
	}

	/// Jumps immediately, cancelling any running transition.
	pub fn set(&mut self, transform: ViewTransform) {
		self.transition = None;
		self.transform = transform;
	}

	pub fn animate_to(&mut self, to: ViewTransform, now_ms: f64, duration_ms: f64) {
		if duration_ms <= 0.0 {
			self.set(to);
			return;
		}
		self.transition = Some(Transition {
			from: self.transform,
			to,
			start_ms: now_ms,
			duration_ms,
		});
	}

	/// Where the camera ends up once the current transition finishes.
	pub fn target(&self) -> ViewTransform {
		self.transition
			.as_ref()
			.map(|t| t.to)
			.unwrap_or(self.transform)
	}

	pub fn is_animating(&self) -> bool {
		self.transition.is_some()
	}

	/// Advances the running transition to `now_ms`.
	pub fn update(&mut self, now_ms: f64) {
		let Some(tr) = &self.transition else {
			return;
		};
		let t = ((now_ms - tr.start_ms) / tr.duration_ms).clamp(0.0, 1.0);
		if t >= 1.0 {
			self.transform = tr.to;
			self.transition = None;
		} else {
			self.transform = tr.from.lerp(&tr.to, ease_out_cubic(t));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn screen_graph_round_trip() {
		let t = ViewTransform {
			x: 40.0,
			y: -10.0,
			k: 2.0,
		};
		let (gx, gy) = t.screen_to_graph(100.0, 50.0);
		assert_eq!((gx, gy), (30.0, 30.0));
		assert_eq!(t.graph_to_screen(gx, gy), (100.0, 50.0));
	}

	#[test]
	fn centering_places_point_mid_viewport() {
		let t = ViewTransform::centered_on(10.0, 20.0, 2.5, 800.0, 600.0);
		assert_eq!(t.graph_to_screen(10.0, 20.0), (400.0, 300.0));
		assert_eq!(t.k, 2.5);
	}

	#[test]
	fn zoom_about_keeps_anchor_fixed() {
		let t = ViewTransform::default();
		let z = t.zoomed_about(200.0, 100.0, 1.5);
		let (ax, ay) = t.screen_to_graph(200.0, 100.0);
		let (sx, sy) = z.graph_to_screen(ax, ay);
		assert!(close(sx, 200.0) && close(sy, 100.0));
		assert_eq!(t.zoomed_about(0.0, 0.0, 50.0).k, MAX_ZOOM);
	}

	#[test]
	fn fit_contains_all_points_with_padding() {
		let bounds = Bounds::around([(-100.0, -50.0, 0.0), (300.0, 150.0, 0.0)]).unwrap();
		let t = ViewTransform::fit(bounds, 800.0, 600.0, 60.0);
		let (x0, y0) = t.graph_to_screen(-100.0, -50.0);
		let (x1, y1) = t.graph_to_screen(300.0, 150.0);
		assert!(x0 >= 60.0 - 1e-9 && x1 <= 740.0 + 1e-9);
		assert!(y0 >= 60.0 - 1e-9 && y1 <= 540.0 + 1e-9);
		// width is the limiting axis: 680 / 400
		assert!(close(t.k, 1.7));
	}

	#[test]
	fn fit_of_single_point_is_capped() {
		let bounds = Bounds::around([(5.0, 5.0, 0.0)]).unwrap();
		let t = ViewTransform::fit(bounds, 800.0, 600.0, 60.0);
		assert_eq!(t.k, FIT_MAX_ZOOM);
		assert_eq!(t.graph_to_screen(5.0, 5.0), (400.0, 300.0));
		assert!(Bounds::around(std::iter::empty::<(f64, f64, f64)>()).is_none());
	}

	#[test]
	fn transition_eases_to_target() {
		let mut cam = Camera::default();
		let to = ViewTransform {
			x: 100.0,
			y: 100.0,
			k: 2.0,
		};
		cam.animate_to(to, 1000.0, 500.0);
		assert_eq!(cam.target(), to);
		cam.update(1250.0);
		let mid = cam.transform;
		// ease-out is past halfway at half time
		assert!(mid.k > 1.5 && mid.k < 2.0);
		cam.update(1500.0);
		assert_eq!(cam.transform, to);
		assert!(!cam.is_animating());
	}

	#[test]
	fn set_cancels_transition() {
		let mut cam = Camera::default();
		cam.animate_to(
			ViewTransform {
				x: 1.0,
				y: 1.0,
				k: 3.0,
			},
			0.0,
			300.0,
		);
		cam.set(ViewTransform::default());
		cam.update(400.0);
		assert_eq!(cam.transform, ViewTransform::default());
	}
}
