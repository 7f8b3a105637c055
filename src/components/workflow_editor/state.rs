use std::rc::Rc;

use log::{debug, info, warn};

use super::geometry::{self, Hit, Part, Segment};
use super::gesture::Gesture;
use super::graph::WorkflowGraph;
use super::types::{EndpointLabels, NodeId, Point};
use crate::catalog::{SkillCatalog, SkillManifest};

/// Everything the editor canvas needs between events: the graph, the
/// gesture in flight, and the canvas size. Pointer coordinates are canvas
/// local.
pub struct WorkflowEditorState {
	pub graph: WorkflowGraph,
	pub gesture: Gesture,
	/// Input anchor under the cursor that would accept the pending connection.
	pub hover_target: Option<NodeId>,
	pub width: f64,
	pub height: f64,
	catalog: SkillCatalog,
	labels: EndpointLabels,
}

impl WorkflowEditorState {
	pub fn new(catalog: SkillCatalog, labels: EndpointLabels, width: f64, height: f64) -> Self {
		Self {
			graph: WorkflowGraph::new(&labels),
			gesture: Gesture::Idle,
			hover_target: None,
			width,
			height,
			catalog,
			labels,
		}
	}

	/// Press on the canvas. Only the topmost node under the pointer reacts;
	/// its output anchor takes precedence over its body. Returns whether a gesture started, in which
	/// case the caller should capture move and release globally.
	pub fn pointer_down(&mut self, p: Point) -> bool {
		if self.gesture.is_active() {
			// The previous release never arrived, e.g. it happened outside the window.
			let stale = self.gesture.end();
			debug!("Discarding unfinished gesture {stale:?}");
			self.hover_target = None;
		}

		let Some(Hit { node, part }) = geometry::hit(&self.graph, p) else {
			return false;
		};
		let Some(node) = self.graph.node(node) else {
			return false;
		};
		if part == Part::Output {
			let anchor = geometry::output_anchor(node).unwrap_or(p);
			debug!("Connecting from {}", node.id);
			self.gesture = Gesture::begin_connect(node.id.clone(), anchor);
		} else {
			debug!("Dragging {}", node.id);
			self.gesture = Gesture::begin_drag(node.id.clone(), p, node.position);
		}
		true
	}

	pub fn pointer_move(&mut self, p: Point) {
		if let Some((id, position)) = self.gesture.update(p) {
			self.graph.move_node(id, position);
		}
		self.hover_target = match &self.gesture {
			Gesture::Connecting { source, .. } => self
				.input_anchor_at(p)
				.filter(|target| self.graph.check_edge(source, target).is_ok())
				.cloned(),
			_ => None,
		};
	}

	/// Release. A pending connection becomes an edge only when released on an
	/// input anchor; rejected edges are logged and dropped.
	pub fn pointer_up(&mut self, p: Point) {
		self.hover_target = None;
		match self.gesture.end() {
			Gesture::Connecting { source, .. } => {
				let Some(target) = self.input_anchor_at(p).cloned() else {
					debug!("Connection from {source} released on empty canvas");
					return;
				};
				match self.graph.add_edge(&source, &target) {
					Ok(id) => debug!("Added edge {id}: {source} -> {target}"),
					Err(err) => debug!("Edge not added: {err}"),
				}
			}
			Gesture::Dragging { node, .. } => debug!("Released {node}"),
			Gesture::Idle => {}
		}
	}

	/// Abandon the gesture without touching the graph.
	pub fn cancel_gesture(&mut self) {
		if self.gesture.end().is_active() {
			debug!("Gesture cancelled");
		}
		self.hover_target = None;
	}

	/// Input anchor of the topmost node under `p`, if that is what `p` hits.
	fn input_anchor_at(&self, p: Point) -> Option<&NodeId> {
		geometry::hit(&self.graph, p)
			.filter(|hit| hit.part == Part::Input)
			.map(|hit| hit.node)
	}

	pub fn add_skill_node(&mut self, skill: &Rc<SkillManifest>) -> NodeId {
		let id = self.graph.add_skill_node(skill, None);
		debug!("Added {} as {id}", skill.name);
		id
	}

	pub fn load_template(&mut self) {
		self.cancel_gesture();
		match self.graph.load_template(&self.catalog, &self.labels) {
			Ok(()) => info!("Loaded workflow template"),
			Err(err) => warn!("Template not loaded: {err}"),
		}
	}

	pub fn reset(&mut self) {
		self.cancel_gesture();
		self.graph.reset(&self.labels);
		info!("Workflow reset");
	}

	pub fn set_labels(&mut self, labels: EndpointLabels) {
		self.graph.relabel_endpoints(&labels);
		self.labels = labels;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Rubber band for the connection in progress.
	pub fn preview(&self) -> Option<Segment> {
		match &self.gesture {
			Gesture::Connecting { source, cursor } => {
				geometry::preview_segment(&self.graph, source, *cursor)
			}
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::workflow_editor::graph::{END_ID, START_ID};
	use crate::components::workflow_editor::types::NodeKind;

	// Start sits at (50, 200) and End at (750, 200); both are 96 x 64.
	const START_BODY: Point = Point::new(70.0, 220.0);
	const START_OUT: Point = Point::new(146.0, 232.0);
	const END_IN: Point = Point::new(750.0, 232.0);
	const EMPTY: Point = Point::new(400.0, 500.0);

	fn state() -> WorkflowEditorState {
		WorkflowEditorState::new(
			SkillCatalog::builtin(),
			EndpointLabels {
				start: "Start".into(),
				end: "End".into(),
			},
			800.0,
			600.0,
		)
	}

	fn add(state: &mut WorkflowEditorState, name: &str, at: Point) -> NodeId {
		let skill = Rc::clone(state.catalog.find(name).unwrap());
		state.graph.add_skill_node(&skill, Some(at))
	}

	fn position(state: &WorkflowEditorState, id: &NodeId) -> Point {
		state.graph.node(id).unwrap().position
	}

	#[test]
	fn full_drag_moves_only_the_pressed_node() {
		let mut s = state();
		let a = add(&mut s, "summarize-text", Point::new(300.0, 100.0));
		let end_before = position(&s, &END_ID.into());

		assert!(s.pointer_down(Point::new(310.0, 110.0)));
		s.pointer_move(Point::new(320.0, 130.0));
		s.pointer_move(Point::new(335.0, 150.0));
		s.pointer_up(Point::new(335.0, 150.0));

		assert_eq!(position(&s, &a), Point::new(325.0, 140.0));
		assert_eq!(position(&s, &END_ID.into()), end_before);
		assert_eq!(position(&s, &START_ID.into()), Point::new(50.0, 200.0));
		assert_eq!(s.gesture, Gesture::Idle);
	}

	#[test]
	fn drag_is_not_clamped_to_canvas() {
		let mut s = state();
		s.pointer_down(START_BODY);
		s.pointer_move(START_BODY + Point::new(-500.0, 2000.0));
		s.pointer_up(Point::new(0.0, 0.0));
		assert_eq!(position(&s, &START_ID.into()), Point::new(-450.0, 2200.0));
	}

	#[test]
	fn press_on_empty_canvas_starts_nothing() {
		let mut s = state();
		assert!(!s.pointer_down(EMPTY));
		assert!(!s.gesture.is_active());
		s.pointer_move(Point::new(0.0, 0.0));
		assert_eq!(position(&s, &START_ID.into()), Point::new(50.0, 200.0));
	}

	#[test]
	fn output_anchor_wins_over_node_body() {
		let mut s = state();
		// Inside Start's box and within reach of its output anchor.
		assert!(s.pointer_down(Point::new(140.0, 232.0)));
		assert!(matches!(s.gesture, Gesture::Connecting { .. }));
		s.pointer_move(Point::new(300.0, 300.0));
		assert_eq!(position(&s, &START_ID.into()), Point::new(50.0, 200.0));
	}

	#[test]
	fn connect_release_on_input_anchor_adds_edge() {
		let mut s = state();
		s.pointer_down(START_OUT);
		s.pointer_move(Point::new(400.0, 240.0));
		assert_eq!(
			s.preview().map(|seg| (seg.from, seg.to)),
			Some((START_OUT, Point::new(400.0, 240.0)))
		);
		s.pointer_move(END_IN);
		assert_eq!(s.hover_target, Some(END_ID.into()));
		s.pointer_up(END_IN);

		assert_eq!(s.graph.edges().len(), 1);
		assert_eq!(s.graph.edges()[0].source, NodeId::new(START_ID));
		assert_eq!(s.graph.edges()[0].target, NodeId::new(END_ID));
		assert_eq!(s.hover_target, None);
		assert_eq!(s.preview(), None);
	}

	#[test]
	fn connect_release_on_empty_canvas_is_discarded() {
		let mut s = state();
		s.pointer_down(START_OUT);
		s.pointer_move(EMPTY);
		s.pointer_up(EMPTY);
		assert!(s.graph.edges().is_empty());
		assert!(!s.gesture.is_active());
	}

	#[test]
	fn repeated_connection_is_a_no_op() {
		let mut s = state();
		for _ in 0..2 {
			s.pointer_down(START_OUT);
			s.pointer_up(END_IN);
		}
		assert_eq!(s.graph.edges().len(), 1);
	}

	#[test]
	fn hover_ignores_targets_that_would_be_rejected() {
		let mut s = state();
		s.graph
			.add_edge(&START_ID.into(), &END_ID.into())
			.unwrap();
		s.pointer_down(START_OUT);
		s.pointer_move(END_IN);
		assert_eq!(s.hover_target, None);
	}

	#[test]
	fn end_has_no_output_anchor_to_press() {
		let mut s = state();
		// Where End's output anchor would be: still inside its box, so a drag.
		assert!(s.pointer_down(Point::new(842.0, 232.0)));
		assert!(matches!(s.gesture, Gesture::Dragging { .. }));
	}

	#[test]
	fn start_has_no_input_anchor_to_release_on() {
		let mut s = state();
		let a = add(&mut s, "intent-detection", Point::new(300.0, 100.0));
		s.pointer_down(Point::new(460.0, 132.0));
		assert!(matches!(s.gesture, Gesture::Connecting { ref source, .. } if *source == a));
		s.pointer_up(Point::new(50.0, 232.0));
		assert!(s.graph.edges().is_empty());
	}

	#[test]
	fn new_press_discards_unfinished_gesture() {
		let mut s = state();
		s.pointer_down(START_OUT);
		s.pointer_move(END_IN);
		// Release lost; next press lands on End's body.
		assert!(s.pointer_down(Point::new(800.0, 220.0)));
		assert!(matches!(s.gesture, Gesture::Dragging { ref node, .. } if node.as_str() == END_ID));
		assert_eq!(s.hover_target, None);
		assert!(s.graph.edges().is_empty());
	}

	#[test]
	fn template_and_reset_drop_gesture() {
		let mut s = state();
		s.pointer_down(START_OUT);
		s.load_template();
		assert!(!s.gesture.is_active());
		assert_eq!((s.graph.nodes().len(), s.graph.edges().len()), (4, 3));

		s.pointer_down(START_BODY);
		s.reset();
		assert!(!s.gesture.is_active());
		assert_eq!((s.graph.nodes().len(), s.graph.edges().len()), (2, 0));
	}

	#[test]
	fn template_missing_from_catalog_leaves_graph() {
		let mut s = WorkflowEditorState::new(
			SkillCatalog::default(),
			EndpointLabels {
				start: "Start".into(),
				end: "End".into(),
			},
			800.0,
			600.0,
		);
		s.graph.add_edge(&START_ID.into(), &END_ID.into()).unwrap();
		s.load_template();
		assert_eq!((s.graph.nodes().len(), s.graph.edges().len()), (2, 1));
	}

	#[test]
	fn covered_output_anchor_does_not_start_a_connection() {
		let mut s = state();
		let top = add(&mut s, "summarize-text", Point::new(100.0, 200.0));
		assert!(s.pointer_down(START_OUT));
		assert!(matches!(s.gesture, Gesture::Dragging { ref node, .. } if *node == top));
	}

	#[test]
	fn covered_input_anchor_does_not_accept_a_release() {
		let mut s = state();
		let source = add(&mut s, "intent-detection", Point::new(300.0, 400.0));
		add(&mut s, "summarize-text", Point::new(700.0, 200.0));
		s.pointer_down(Point::new(460.0, 432.0));
		assert!(matches!(s.gesture, Gesture::Connecting { source: ref from, .. } if *from == source));
		s.pointer_move(END_IN);
		assert_eq!(s.hover_target, None);
		s.pointer_up(END_IN);
		assert!(s.graph.edges().is_empty());
	}

	#[test]
	fn press_on_input_disc_outside_box_drags_the_node() {
		let mut s = state();
		assert!(s.pointer_down(Point::new(743.0, 232.0)));
		assert!(matches!(s.gesture, Gesture::Dragging { ref node, .. } if *node == NodeId::new(END_ID)));
	}

	#[test]
	fn labels_apply_to_later_resets() {
		let mut s = state();
		s.set_labels(EndpointLabels {
			start: "Başlangıç".into(),
			end: "Bitiş".into(),
		});
		assert_eq!(s.graph.node(&START_ID.into()).unwrap().label, "Başlangıç");
		s.reset();
		assert_eq!(s.graph.node(&END_ID.into()).unwrap().label, "Bitiş");
	}

	#[test]
	fn palette_add_uses_shared_entry() {
		let mut s = state();
		let skill = Rc::clone(s.catalog.find("send-email").unwrap());
		let id = s.add_skill_node(&skill);
		assert_eq!(s.graph.nodes().len(), 3);
		match &s.graph.node(&id).unwrap().kind {
			NodeKind::Skill(shared) => assert!(Rc::ptr_eq(shared, &skill)),
			other => panic!("expected a skill node, got {other:?}"),
		}
	}
}
