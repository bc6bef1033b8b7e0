use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::interaction::Interaction;
use super::layout::Layout;
use super::painter::{
	self, LABEL_SHADOW, LABEL_SHADOW_BLUR, LABEL_SHADOW_OFFSET_Y, LabelBox, NodeGlyph,
	PaintOptions,
};
use super::scene::GraphScene;
use crate::theme::Theme;

pub fn render<L: Layout>(
	scene: &GraphScene<L>,
	ctx: &CanvasRenderingContext2d,
	ui: &Interaction,
	theme: Theme,
) {
	let t = scene.transform();
	ctx.set_fill_style_str(theme.background());
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
	ctx.save();
	let _ = ctx.translate(t.x, t.y);
	let _ = ctx.scale(t.k, t.k);
	draw_links(scene, ctx, ui);
	draw_nodes(
		scene,
		ctx,
		ui,
		&PaintOptions {
			show_labels: ui.show_labels,
			theme,
			zoom: t.k,
		},
	);
	ctx.restore();
}

fn draw_links<L: Layout>(scene: &GraphScene<L>, ctx: &CanvasRenderingContext2d, ui: &Interaction) {
	let k = scene.transform().k;
	let selected = ui.selected.as_deref().and_then(|id| scene.data.index_of(id));

	for link in &scene.data.links {
		let (Some(from), Some(to)) = (scene.position(link.source), scene.position(link.target))
		else {
			continue;
		};
		let style = painter::link_style(link, selected);
		ctx.set_stroke_style_str(style.color);
		ctx.set_line_width(style.width / k);
		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();

		if link.source == link.target {
			continue;
		}
		ctx.set_fill_style_str(scene.data.nodes[link.source].color);
		for p in painter::particle_positions(from, to, scene.flow_time) {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, painter::PARTICLE_WIDTH / 2.0 / k, 0.0, 2.0 * PI);
			ctx.fill();
		}
	}
}

fn draw_nodes<L: Layout>(
	scene: &GraphScene<L>,
	ctx: &CanvasRenderingContext2d,
	ui: &Interaction,
	opts: &PaintOptions,
) {
	for (idx, node) in scene.data.nodes.iter().enumerate() {
		let Some(at) = scene.position(idx) else {
			continue;
		};
		let glyph = painter::node_glyph(
			node,
			at,
			ui.is_selected(&node.id),
			ui.is_hovered(&node.id),
			opts,
		);
		draw_glyph(ctx, &glyph);
	}
}

fn circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
}

fn draw_glyph(ctx: &CanvasRenderingContext2d, g: &NodeGlyph) {
	for ring in &g.rings {
		circle(ctx, g.x, g.y, ring.radius);
		ctx.set_fill_style_str(&ring.color);
		ctx.fill();
	}

	circle(ctx, g.x, g.y, g.radius);
	ctx.set_fill_style_str(g.fill);
	ctx.fill();
	ctx.set_stroke_style_str(g.border);
	ctx.set_line_width(g.border_width);
	ctx.stroke();

	let (hx, hy, hr) = g.highlight;
	circle(ctx, hx, hy, hr);
	ctx.set_fill_style_str(painter::HIGHLIGHT_FILL);
	ctx.fill();

	let Some(label) = &g.label else {
		return;
	};
	ctx.set_font(&label.font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("top");
	let width = ctx
		.measure_text(&label.text)
		.map(|m| m.width())
		.unwrap_or(label.text.chars().count() as f64 * label.font_size * 0.6);
	let b = label.boxed(width);

	ctx.set_fill_style_str(label.background);
	ctx.set_shadow_color(LABEL_SHADOW);
	ctx.set_shadow_blur(LABEL_SHADOW_BLUR);
	ctx.set_shadow_offset_y(LABEL_SHADOW_OFFSET_Y);
	rounded_rect(ctx, &b);
	ctx.fill();
	ctx.set_shadow_color("transparent");

	ctx.set_fill_style_str(label.color);
	let _ = ctx.fill_text(&label.text, label.x, label.y);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, b: &LabelBox) {
	let (x, y, w, h, r) = (b.x, b.y, b.w, b.h, b.corner);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	ctx.line_to(x + w - r, y);
	ctx.quadratic_curve_to(x + w, y, x + w, y + r);
	ctx.line_to(x + w, y + h - r);
	ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
	ctx.line_to(x + r, y + h);
	ctx.quadratic_curve_to(x, y + h, x, y + h - r);
	ctx.line_to(x, y + r);
	ctx.quadratic_curve_to(x, y, x + r, y);
	ctx.close_path();
}
