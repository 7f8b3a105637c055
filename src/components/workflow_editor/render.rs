use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::{self, ANCHOR_RADIUS, NODE_HEIGHT, Segment};
use super::state::WorkflowEditorState;
use super::types::Node;

const BACKGROUND: &str = "#1f2937";
const NODE_FILL: &str = "#374151";
const NODE_BORDER: &str = "#4b5563";
const NODE_TEXT: &str = "#f3f4f6";
const EDGE: &str = "#0891b2";
const PREVIEW: &str = "#67e8f9";
const INPUT_ANCHOR: &str = "#6b7280";
const OUTPUT_ANCHOR: &str = "#06b6d4";
const ANCHOR_RING: &str = "#22d3ee";

const EDGE_WIDTH: f64 = 2.0;
const ARROW_SIZE: f64 = 8.0;

pub fn render(state: &WorkflowEditorState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_edges(state: &WorkflowEditorState, ctx: &CanvasRenderingContext2d) {
	ctx.set_line_width(EDGE_WIDTH);
	ctx.set_stroke_style_str(EDGE);
	ctx.set_fill_style_str(EDGE);
	for (_, segment) in geometry::edge_segments(&state.graph) {
		draw_arrow(ctx, segment);
	}

	if let Some(segment) = state.preview() {
		ctx.set_stroke_style_str(PREVIEW);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(5.0),
			&JsValue::from_f64(5.0),
		));
		ctx.begin_path();
		ctx.move_to(segment.from.x, segment.from.y);
		ctx.line_to(segment.to.x, segment.to.y);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}
}

fn draw_arrow(ctx: &CanvasRenderingContext2d, Segment { from, to }: Segment) {
	let (dx, dy) = (to.x - from.x, to.y - from.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let (back_x, back_y) = (to.x - ux * ARROW_SIZE, to.y - uy * ARROW_SIZE);

	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.line_to(back_x, back_y);
	ctx.stroke();

	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	ctx.begin_path();
	ctx.move_to(to.x, to.y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(state: &WorkflowEditorState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font("600 14px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for node in state.graph.nodes() {
		let (x, y, w) = (node.position.x, node.position.y, geometry::node_width(node));

		ctx.set_fill_style_str(NODE_FILL);
		ctx.fill_rect(x, y, w, NODE_HEIGHT);
		ctx.set_stroke_style_str(NODE_BORDER);
		ctx.set_line_width(1.0);
		ctx.stroke_rect(x, y, w, NODE_HEIGHT);

		ctx.set_fill_style_str(NODE_TEXT);
		let _ = ctx.fill_text_with_max_width(
			&node.label,
			x + w / 2.0,
			y + NODE_HEIGHT / 2.0,
			w - 16.0,
		);

		draw_anchors(state, node, ctx);
	}
}

fn draw_anchors(state: &WorkflowEditorState, node: &Node, ctx: &CanvasRenderingContext2d) {
	if let Some(p) = geometry::input_anchor(node) {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, ANCHOR_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(INPUT_ANCHOR);
		ctx.fill();

		if state.hover_target.as_ref() == Some(&node.id) {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, ANCHOR_RADIUS + 2.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(ANCHOR_RING);
			ctx.set_line_width(2.0);
			ctx.stroke();
		}
	}

	if let Some(p) = geometry::output_anchor(node) {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, ANCHOR_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(OUTPUT_ANCHOR);
		ctx.fill();
	}
}
