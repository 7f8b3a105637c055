//! Node boxes, anchor points and edge segments, all derived from the current
//! node table on demand.

use super::graph::WorkflowGraph;
use super::types::{Edge, Node, NodeId, NodeKind, Point};

pub const NODE_HEIGHT: f64 = 64.0;
pub const SKILL_NODE_WIDTH: f64 = 160.0;
pub const ENDPOINT_NODE_WIDTH: f64 = 96.0;
pub const ANCHOR_RADIUS: f64 = 8.0;
pub const ANCHOR_HIT_RADIUS: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
	pub from: Point,
	pub to: Point,
}

pub fn node_width(node: &Node) -> f64 {
	match node.kind {
		NodeKind::Skill(_) => SKILL_NODE_WIDTH,
		NodeKind::Start | NodeKind::End => ENDPOINT_NODE_WIDTH,
	}
}

/// Right edge, vertical center. End nodes have none.
pub fn output_anchor(node: &Node) -> Option<Point> {
	node.emits_output().then(|| {
		Point::new(
			node.position.x + node_width(node),
			node.position.y + NODE_HEIGHT / 2.0,
		)
	})
}

/// Left edge, vertical center. Start nodes have none.
pub fn input_anchor(node: &Node) -> Option<Point> {
	node.accepts_input()
		.then(|| Point::new(node.position.x, node.position.y + NODE_HEIGHT / 2.0))
}

pub fn contains(node: &Node, p: Point) -> bool {
	let Point { x, y } = node.position;
	p.x >= x && p.x <= x + node_width(node) && p.y >= y && p.y <= y + NODE_HEIGHT
}

/// Part of a node under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
	Body,
	Input,
	Output,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit<'a> {
	pub node: &'a NodeId,
	pub part: Part,
}

fn near(anchor: Option<Point>, p: Point) -> bool {
	anchor.is_some_and(|a| a.distance(p) <= ANCHOR_HIT_RADIUS)
}

fn part_at(node: &Node, p: Point) -> Option<Part> {
	if near(output_anchor(node), p) {
		Some(Part::Output)
	} else if near(input_anchor(node), p) {
		Some(Part::Input)
	} else if contains(node, p) {
		Some(Part::Body)
	} else {
		None
	}
}

/// The topmost node whose box or anchor discs cover `p`. Later nodes are
/// drawn on top, so the table is walked backwards and an anchor hidden
/// under another node is never reported.
pub fn hit(graph: &WorkflowGraph, p: Point) -> Option<Hit<'_>> {
	graph.nodes().iter().rev().find_map(|node| {
		part_at(node, p).map(|part| Hit {
			node: &node.id,
			part,
		})
	})
}

/// Straight segment from the source's output anchor to the target's input
/// anchor. `None` if either end is missing.
pub fn edge_segment(graph: &WorkflowGraph, edge: &Edge) -> Option<Segment> {
	let from = graph.node(&edge.source).and_then(output_anchor)?;
	let to = graph.node(&edge.target).and_then(input_anchor)?;
	Some(Segment { from, to })
}

pub fn edge_segments(graph: &WorkflowGraph) -> impl Iterator<Item = (&Edge, Segment)> {
	graph
		.edges()
		.iter()
		.filter_map(move |edge| edge_segment(graph, edge).map(|segment| (edge, segment)))
}

/// Rubber band from `source`'s output anchor to the live cursor.
pub fn preview_segment(graph: &WorkflowGraph, source: &NodeId, cursor: Point) -> Option<Segment> {
	let from = graph.node(source).and_then(output_anchor)?;
	Some(Segment { from, to: cursor })
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use super::*;
	use crate::catalog::SkillCatalog;
	use crate::components::workflow_editor::graph::{END_ID, START_ID};
	use crate::components::workflow_editor::types::EndpointLabels;

	fn graph() -> WorkflowGraph {
		WorkflowGraph::new(&EndpointLabels {
			start: "Start".into(),
			end: "End".into(),
		})
	}

	#[test]
	fn anchors_sit_on_box_edges() {
		let catalog = SkillCatalog::builtin();
		let mut g = graph();
		let id = g.add_skill_node(
			&Rc::clone(catalog.find("send-email").unwrap()),
			Some(Point::new(100.0, 40.0)),
		);
		let node = g.node(&id).unwrap();
		assert_eq!(output_anchor(node), Some(Point::new(260.0, 72.0)));
		assert_eq!(input_anchor(node), Some(Point::new(100.0, 72.0)));

		let start = g.node(&START_ID.into()).unwrap();
		assert_eq!(output_anchor(start), Some(Point::new(146.0, 232.0)));
		assert_eq!(input_anchor(start), None);

		let end = g.node(&END_ID.into()).unwrap();
		assert_eq!(input_anchor(end), Some(Point::new(750.0, 232.0)));
		assert_eq!(output_anchor(end), None);
	}

	fn hit_at(g: &WorkflowGraph, x: f64, y: f64) -> Option<(&str, Part)> {
		hit(g, Point::new(x, y)).map(|h| (h.node.as_str(), h.part))
	}

	#[test]
	fn hit_tests() {
		let g = graph();
		assert_eq!(hit_at(&g, 60.0, 210.0), Some(("start", Part::Body)));
		assert_eq!(hit_at(&g, 400.0, 400.0), None);
		assert_eq!(hit_at(&g, 150.0, 230.0), Some(("start", Part::Output)));
		// End has no output anchor; its right edge is plain body.
		assert_eq!(hit_at(&g, 846.0, 232.0), Some(("end", Part::Body)));
		assert_eq!(hit_at(&g, 745.0, 235.0), Some(("end", Part::Input)));
		// Start has no input anchor.
		assert_eq!(hit_at(&g, 50.0, 232.0), Some(("start", Part::Body)));
	}

	#[test]
	fn input_disc_outside_the_box_belongs_to_the_node() {
		let g = graph();
		assert_eq!(hit_at(&g, 742.0, 232.0), Some(("end", Part::Input)));
		assert_eq!(hit_at(&g, 741.0, 200.0), None);
	}

	#[test]
	fn topmost_node_wins() {
		let catalog = SkillCatalog::builtin();
		let mut g = graph();
		let entry = Rc::clone(catalog.find("summarize-text").unwrap());
		g.add_skill_node(&entry, Some(Point::new(50.0, 200.0)));
		let top = g.add_skill_node(&entry, Some(Point::new(60.0, 200.0)));
		assert_eq!(
			hit(&g, Point::new(70.0, 220.0)),
			Some(Hit {
				node: &top,
				part: Part::Body,
			})
		);
	}

	#[test]
	fn covered_anchors_are_not_hit() {
		let catalog = SkillCatalog::builtin();
		let mut g = graph();
		let entry = Rc::clone(catalog.find("summarize-text").unwrap());
		// Covers Start's output anchor (146, 232) and End's input anchor (750, 232).
		let over_start = g.add_skill_node(&entry, Some(Point::new(100.0, 200.0)));
		let over_end = g.add_skill_node(&entry, Some(Point::new(700.0, 200.0)));

		let on_start_anchor = hit(&g, Point::new(146.0, 232.0)).unwrap();
		assert_eq!((on_start_anchor.node, on_start_anchor.part), (&over_start, Part::Body));
		let on_end_anchor = hit(&g, Point::new(750.0, 232.0)).unwrap();
		assert_eq!((on_end_anchor.node, on_end_anchor.part), (&over_end, Part::Body));
	}

	#[test]
	fn segments_follow_node_positions() {
		let mut g = graph();
		g.add_edge(&START_ID.into(), &END_ID.into()).unwrap();
		let (_, before) = edge_segments(&g).next().unwrap();
		assert_eq!(before.from, Point::new(146.0, 232.0));
		assert_eq!(before.to, Point::new(750.0, 232.0));

		g.move_node(&END_ID.into(), Point::new(600.0, 0.0));
		let (_, after) = edge_segments(&g).next().unwrap();
		assert_eq!(after.to, Point::new(600.0, 32.0));
	}

	#[test]
	fn preview_starts_at_output_anchor() {
		let g = graph();
		let cursor = Point::new(300.0, 300.0);
		assert_eq!(
			preview_segment(&g, &START_ID.into(), cursor),
			Some(Segment {
				from: Point::new(146.0, 232.0),
				to: cursor,
			})
		);
		assert_eq!(preview_segment(&g, &END_ID.into(), cursor), None);
	}
}
