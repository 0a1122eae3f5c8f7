use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::GraphViewState;
use crate::graph::{EdgeKind, GraphNode, NodeData, STRUCTURAL_COLOR, classify};

const BACKGROUND: &str = "#0f172a";
const PAGE_FILL: &str = "#1e293b";
const STORY_FILL: &str = "#111827";
const CORNER_RADIUS: f64 = 10.0;
const MAX_LABEL_CHARS: usize = 26;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	let (dash, gap) = (8.0, 4.0);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);
	let has_highlight = state.has_active_highlight();

	for (edge, &(src, tgt)) in state.graph.edges.iter().zip(state.edge_indices()) {
		let (from, to) = (&state.graph.nodes[src], &state.graph.nodes[tgt]);
		// Bottom center of the parent to top center of the child.
		let (x1, y1) = (from.center().x, from.position.y + from.size.height);
		let (x2, y2) = (to.center().x, to.position.y);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let style = edge.style;
		let is_highlighted = state.is_highlighted(src) && state.is_highlighted(tgt);
		let alpha = match (has_highlight, is_highlighted) {
			(false, _) => 0.85,
			(true, true) => 0.85 + 0.15 * t,
			(true, false) => 0.85 - 0.6 * t,
		};
		let arrow_size = style.marker_size * 0.6;

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(style.color);
		ctx.set_line_width(style.stroke_width);
		if style.animated {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2 - ux * arrow_size, y2 - uy * arrow_size);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(style.color);
		let (back_x, back_y) = (x2 - ux * arrow_size, y2 - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(x2, y2);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
	);

	for (idx, node) in state.graph.nodes.iter().enumerate() {
		let alpha = if has_highlight && !state.is_highlighted(idx) {
			1.0 - 0.7 * t
		} else {
			1.0
		};
		ctx.set_global_alpha(alpha);

		let (fill, accent) = node_colors(node);
		if state.is_hovered(idx) && t > 0.01 {
			ctx.set_shadow_color(accent);
			ctx.set_shadow_blur(24.0 * t);
		}
		rounded_rect(ctx, node);
		ctx.set_fill_style_str(fill);
		ctx.fill();
		ctx.set_shadow_blur(0.0);
		ctx.set_stroke_style_str(accent);
		ctx.set_line_width(if state.is_hovered(idx) { 3.0 } else { 2.0 });
		ctx.stroke();

		draw_labels(ctx, node);
	}
	ctx.set_global_alpha(1.0);
}

fn node_colors(node: &GraphNode) -> (&str, &str) {
	match &node.data {
		NodeData::Project(project) if !project.color.is_empty() => {
			(project.color.as_str(), "#f8fafc")
		}
		NodeData::Project(_) => (STRUCTURAL_COLOR, "#f8fafc"),
		NodeData::Page { .. } => (PAGE_FILL, STRUCTURAL_COLOR),
		NodeData::Story { story, .. } => (
			STORY_FILL,
			classify(&EdgeKind::Status(story.status.clone())).color,
		),
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, node: &GraphNode) {
	let (x, y) = (node.position.x, node.position.y);
	let (w, h) = (node.size.width, node.size.height);
	let r = CORNER_RADIUS.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_labels(ctx: &CanvasRenderingContext2d, node: &GraphNode) {
	let center = node.center();
	let (title_size, detail) = match &node.data {
		NodeData::Project(project) => (
			18.0,
			format!(
				"{} pages · {}/{} done",
				project.page_count, project.done_count, project.story_count
			),
		),
		NodeData::Page { page, .. } => (
			15.0,
			format!("{}/{} stories done", page.done_count, page.story_count),
		),
		NodeData::Story { story, .. } => (
			13.0,
			format!("{} · {}", story.status, story.priority.as_str()),
		),
	};

	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str("#f8fafc");
	ctx.set_font(&format!("600 {title_size}px sans-serif"));
	let _ = ctx.fill_text(&truncate(node.data.label()), center.x, center.y - 10.0);

	ctx.set_fill_style_str("rgba(226, 232, 240, 0.75)");
	ctx.set_font(&format!("{}px sans-serif", title_size - 3.0));
	let _ = ctx.fill_text(&detail, center.x, center.y + 14.0);

	match &node.data {
		NodeData::Project(project) if !project.tech_stack.is_empty() => {
			ctx.set_font("11px monospace");
			let stack = truncate(&project.tech_stack.join(", "));
			let _ = ctx.fill_text(&stack, center.x, center.y + 36.0);
		}
		_ => {}
	}
}

fn truncate(text: &str) -> String {
	if text.chars().count() <= MAX_LABEL_CHARS {
		return text.to_string();
	}
	let mut short: String = text.chars().take(MAX_LABEL_CHARS - 1).collect();
	short.push('…');
	short
}
