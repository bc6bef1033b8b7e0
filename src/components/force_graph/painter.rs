//! Paint geometry for one frame, independent of the canvas API.
//!
//! Everything here is a pure function of node state, theme and zoom, so a
//! frame only changes when the layout moves a node or the user interacts.

use super::entity::with_alpha;
use super::layout::Point;
use super::types::{GraphLink, GraphNode};
use crate::theme::Theme;

pub const MIN_RADIUS: f64 = 5.0;
pub const MAX_RADIUS: f64 = 14.0;
pub const SELECTED_SCALE: f64 = 1.3;
pub const HOVERED_SCALE: f64 = 1.15;
/// Base radius from which the ambient ring is drawn.
pub const AMBIENT_RING_MIN_RADIUS: f64 = 4.0;
/// Extra pointer slack around the drawn circle, graph units.
pub const HIT_PADDING: f64 = 8.0;
pub const LABEL_PADDING: f64 = 5.0;
pub const LABEL_GAP: f64 = 5.0;
pub const LABEL_CORNER: f64 = 3.0;
pub const HIGHLIGHT_FILL: &str = "rgba(255, 255, 255, 0.2)";
pub const LABEL_SHADOW: &str = "rgba(0, 0, 0, 0.3)";
pub const LABEL_SHADOW_BLUR: f64 = 8.0;
pub const LABEL_SHADOW_OFFSET_Y: f64 = 2.0;

pub const LINK_IDLE: &str = "rgba(139,92,246,0.25)";
pub const LINK_ACTIVE: &str = "rgba(139,92,246,0.7)";
pub const LINK_DIMMED: &str = "rgba(139,92,246,0.08)";
pub const PARTICLES_PER_LINK: usize = 2;
pub const PARTICLE_WIDTH: f64 = 3.0;
/// Fraction of the link travelled per frame at 60 fps.
pub const PARTICLE_SPEED: f64 = 0.003;

/// Radius before the selection/hover boost.
pub fn base_radius(size: usize) -> f64 {
	(size as f64 * 1.5 + 4.0).clamp(MIN_RADIUS, MAX_RADIUS)
}

pub fn hit_radius(size: usize) -> f64 {
	base_radius(size) + HIT_PADDING
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintOptions {
	pub show_labels: bool,
	pub theme: Theme,
	pub zoom: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
	pub radius: f64,
	pub color: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
	pub text: String,
	pub font: String,
	pub font_size: f64,
	pub x: f64,
	/// Top of the text; the baseline is `top`.
	pub y: f64,
	pub background: &'static str,
	pub color: &'static str,
}

/// Rounded background box behind a label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelBox {
	pub x: f64,
	pub y: f64,
	pub w: f64,
	pub h: f64,
	pub corner: f64,
}

impl LabelStyle {
	/// Box sized around text measured as `text_width` in the label font.
	pub fn boxed(&self, text_width: f64) -> LabelBox {
		LabelBox {
			x: self.x - text_width / 2.0 - LABEL_PADDING,
			y: self.y - 2.0,
			w: text_width + LABEL_PADDING * 2.0,
			h: self.font_size + 4.0,
			corner: LABEL_CORNER,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeGlyph {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	/// Outermost first.
	pub rings: Vec<Ring>,
	pub fill: &'static str,
	pub border: &'static str,
	pub border_width: f64,
	pub highlight: (f64, f64, f64),
	pub label: Option<LabelStyle>,
}

pub fn label_font_size(zoom: f64) -> f64 {
	(9.0 / zoom).max(7.0)
}

pub fn node_glyph(
	node: &GraphNode,
	at: Point,
	selected: bool,
	hovered: bool,
	opts: &PaintOptions,
) -> NodeGlyph {
	let style = node.entity.style();
	let base = base_radius(node.size);
	let radius = if selected {
		base * SELECTED_SCALE
	} else if hovered {
		base * HOVERED_SCALE
	} else {
		base
	};

	let rings = if selected || hovered {
		vec![
			Ring {
				radius: radius + 12.0,
				color: with_alpha(style.bg, "20"),
			},
			Ring {
				radius: radius + 6.0,
				color: with_alpha(style.bg, "40"),
			},
		]
	} else if base >= AMBIENT_RING_MIN_RADIUS {
		vec![Ring {
			radius: radius + 10.0,
			color: with_alpha(style.bg, "15"),
		}]
	} else {
		Vec::new()
	};

	let label = (opts.show_labels || selected || hovered).then(|| {
		let font_size = label_font_size(opts.zoom);
		LabelStyle {
			text: node.display_label().to_owned(),
			font: format!(
				"{} {}px Inter, system-ui, sans-serif",
				if selected { "600" } else { "500" },
				font_size
			),
			font_size,
			x: at.x,
			y: at.y + radius + LABEL_GAP,
			background: opts.theme.label_box(),
			color: opts.theme.label_text(),
		}
	});

	NodeGlyph {
		x: at.x,
		y: at.y,
		radius,
		rings,
		fill: style.bg,
		border: style.border,
		border_width: if selected { 3.0 } else { 1.5 },
		highlight: (at.x - radius * 0.25, at.y - radius * 0.25, radius * 0.25),
		label,
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkStyle {
	pub color: &'static str,
	pub width: f64,
}

pub fn link_style(link: &GraphLink, selected: Option<usize>) -> LinkStyle {
	match selected {
		None => LinkStyle {
			color: LINK_IDLE,
			width: 1.5,
		},
		Some(idx) if link.touches(idx) => LinkStyle {
			color: LINK_ACTIVE,
			width: 3.0,
		},
		Some(_) => LinkStyle {
			color: LINK_DIMMED,
			width: 1.5,
		},
	}
}

/// Positions of the particles travelling source → target after `elapsed_s`.
pub fn particle_positions(from: Point, to: Point, elapsed_s: f64) -> [Point; PARTICLES_PER_LINK] {
	let travelled = elapsed_s * 60.0 * PARTICLE_SPEED;
	std::array::from_fn(|i| {
		let t = (travelled + i as f64 / PARTICLES_PER_LINK as f64).fract();
		Point {
			x: from.x + (to.x - from.x) * t,
			y: from.y + (to.y - from.y) * t,
		}
	})
}
