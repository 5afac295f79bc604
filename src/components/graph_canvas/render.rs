use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::config::ConnectMode;
use crate::graph::{Edge, GraphState, Position};

use super::geometry::{HANDLE_RADIUS, NodeRect, edge_endpoints};
use super::state::{CanvasState, EdgeEnd, Interaction};

const BACKGROUND: &str = "#f7f7f8";
const GRID_DOT: &str = "#d0d0d6";
const GRID_SPACING: f64 = 20.0;
const NODE_FILL: &str = "#333";
const NODE_BORDER: &str = "#555";
const NODE_RADIUS: f64 = 6.0;
const SELECTION_GLOW: &str = "rgba(26, 115, 232, 0.35)";
const ACCENT: &str = "#1a73e8";

pub fn render(state: &CanvasState, graph: &GraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, graph, ctx);
	draw_nodes(state, graph, ctx);
	draw_gesture(state, graph, ctx);
	ctx.restore();
}

fn draw_grid(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let step = GRID_SPACING * state.transform.k;
	if step < 6.0 {
		return;
	}
	let (ox, oy) = (
		state.transform.x.rem_euclid(step),
		state.transform.y.rem_euclid(step),
	);
	ctx.set_fill_style_str(GRID_DOT);
	let mut x = ox;
	while x < state.width {
		let mut y = oy;
		while y < state.height {
			ctx.fill_rect(x - 0.5, y - 0.5, 1.0, 1.0);
			y += step;
		}
		x += step;
	}
}

fn draw_edges(state: &CanvasState, graph: &GraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	for edge in graph.edges() {
		let Some((from, to)) = reconnect_preview(state, graph, edge).or_else(|| edge_endpoints(graph, edge))
		else {
			continue;
		};
		let selected = graph.selected_edges().contains(&edge.id);

		ctx.set_global_alpha(edge.style.opacity);
		if selected {
			ctx.set_stroke_style_str(SELECTION_GLOW);
			ctx.set_line_width(edge.style.width + 6.0 / k);
			stroke_line(ctx, from, to);
		}
		ctx.set_stroke_style_str(&edge.style.stroke);
		ctx.set_line_width(edge.style.width);
		stroke_line(ctx, from, to);
		draw_arrow(ctx, from, to, &edge.style.stroke, 6.0 + edge.style.width * 2.0);
		draw_edge_label(ctx, edge, from, to, k);
		ctx.set_global_alpha(1.0);

		if selected {
			for grip in [from, to] {
				ctx.begin_path();
				let _ = ctx.arc(grip.x, grip.y, 4.0 / k, 0.0, 2.0 * PI);
				ctx.set_fill_style_str("white");
				ctx.fill();
				ctx.set_stroke_style_str(ACCENT);
				ctx.set_line_width(1.5 / k);
				ctx.stroke();
			}
		}
	}
}

/// While an edge end is being dragged, that end follows the pointer.
fn reconnect_preview(state: &CanvasState, graph: &GraphState, edge: &Edge) -> Option<(Position, Position)> {
	let Interaction::Reconnecting {
		edge: moving,
		end,
		cursor,
	} = &state.interaction
	else {
		return None;
	};
	if moving != &edge.id {
		return None;
	}
	let (from, to) = edge_endpoints(graph, edge)?;
	Some(match end {
		EdgeEnd::Source => (*cursor, to),
		EdgeEnd::Target => (from, *cursor),
	})
}

fn stroke_line(ctx: &CanvasRenderingContext2d, from: Position, to: Position) {
	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.line_to(to.x, to.y);
	ctx.stroke();
}

fn draw_arrow(ctx: &CanvasRenderingContext2d, from: Position, to: Position, color: &str, size: f64) {
	let (dx, dy) = (to.x - from.x, to.y - from.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let (back_x, back_y) = (to.x - ux * size, to.y - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);
	ctx.set_fill_style_str(color);
	ctx.begin_path();
	ctx.move_to(to.x, to.y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_edge_label(ctx: &CanvasRenderingContext2d, edge: &Edge, from: Position, to: Position, k: f64) {
	let (mx, my) = ((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
	ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
	let width = ctx
		.measure_text(&edge.label)
		.map(|m| m.width())
		.unwrap_or(0.0);
	let pad = 3.0;
	ctx.set_fill_style_str("white");
	ctx.fill_rect(mx - width / 2.0 - pad, my - 8.0, width + 2.0 * pad, 14.0);
	ctx.set_fill_style_str("#222");
	ctx.set_text_align("center");
	let _ = ctx.fill_text(&edge.label, mx, my + 3.0);
	ctx.set_text_align("start");
}

fn draw_nodes(state: &CanvasState, graph: &GraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let show_handles = state.connect_mode == ConnectMode::DragHandle;

	for node in graph.nodes() {
		let rect = NodeRect::of(node);
		let pressed = matches!(
			state.interaction,
			Interaction::PressedNode { node: id, .. } if id == node.id
		);
		let pending = state.pending_source == Some(node.id);

		ctx.save();
		ctx.set_shadow_color("rgba(0, 0, 0, 0.2)");
		ctx.set_shadow_blur(4.0);
		ctx.set_shadow_offset_x(2.0);
		ctx.set_shadow_offset_y(2.0);
		rounded_rect(ctx, &rect, NODE_RADIUS);
		ctx.set_fill_style_str(if pressed || pending { "#444" } else { NODE_FILL });
		ctx.fill();
		ctx.restore();

		rounded_rect(ctx, &rect, NODE_RADIUS);
		ctx.set_stroke_style_str(if pending { ACCENT } else { NODE_BORDER });
		ctx.set_line_width(if pending { 2.5 / k } else { 1.0 / k });
		ctx.stroke();

		if !graph.is_editing(node.id) {
			let c = rect.center();
			ctx.set_fill_style_str("white");
			ctx.set_font("14px sans-serif");
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			let _ = ctx.fill_text(&node.label, c.x, c.y);
			ctx.set_text_align("start");
			ctx.set_text_baseline("alphabetic");
		}

		if show_handles {
			for h in rect.handles() {
				ctx.begin_path();
				let _ = ctx.arc(h.x, h.y, HANDLE_RADIUS, 0.0, 2.0 * PI);
				ctx.set_fill_style_str("#999");
				ctx.fill();
			}
		}
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, rect: &NodeRect, r: f64) {
	let (x, y, w, h) = (rect.x, rect.y, rect.w, rect.h);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

/// Rubber-band connection line and selection rectangle.
fn draw_gesture(state: &CanvasState, graph: &GraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	match &state.interaction {
		Interaction::Connecting { source, cursor } => {
			let Some(node) = graph.node(*source) else {
				return;
			};
			let from = NodeRect::of(node).exit_point(*cursor);
			let color = graph.registry().color_or_fallback(graph.active_type());
			ctx.set_stroke_style_str(color);
			ctx.set_line_width(2.0 / k);
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(6.0 / k),
				&JsValue::from_f64(4.0 / k),
			));
			stroke_line(ctx, from, *cursor);
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}
		Interaction::Selecting { anchor, cursor } => {
			let (x, y) = (anchor.x.min(cursor.x), anchor.y.min(cursor.y));
			let (w, h) = ((anchor.x - cursor.x).abs(), (anchor.y - cursor.y).abs());
			ctx.set_fill_style_str("rgba(26, 115, 232, 0.08)");
			ctx.fill_rect(x, y, w, h);
			ctx.set_stroke_style_str(ACCENT);
			ctx.set_line_width(1.0 / k);
			ctx.stroke_rect(x, y, w, h);
		}
		_ => {}
	}
}
