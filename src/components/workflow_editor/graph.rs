use std::rc::Rc;

use thiserror::Error;

use super::types::{Edge, EdgeId, EndpointLabels, Node, NodeId, NodeKind, Point};
use crate::catalog::{SkillCatalog, SkillManifest};

pub const START_ID: &str = "start";
pub const END_ID: &str = "end";

const START_POSITION: Point = Point::new(50.0, 200.0);
const END_POSITION: Point = Point::new(750.0, 200.0);

/// Skills wired between Start and End by [`WorkflowGraph::load_template`].
pub const TEMPLATE_SKILLS: [&str; 2] = ["intent-detection", "product-lookup"];
const TEMPLATE_NODE_IDS: [&str; 2] = ["template-node-1", "template-node-2"];
const TEMPLATE_POSITIONS: [Point; 2] = [Point::new(250.0, 100.0), Point::new(500.0, 300.0)];

// New skill nodes land in a vertical band at this x.
const SCATTER_X: f64 = 200.0;
const SCATTER_TOP: f64 = 50.0;
const SCATTER_SPAN: f64 = 400.0;

/// Why an edge was not created.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConnectError {
	#[error("cannot connect node `{0}` to itself")]
	SelfLoop(NodeId),
	#[error("node `{0}` does not exist")]
	UnknownNode(NodeId),
	#[error("edge `{from}` -> `{to}` already exists")]
	Duplicate { from: NodeId, to: NodeId },
	#[error("end node `{0}` cannot be an edge source")]
	SourceIsEnd(NodeId),
	#[error("start node `{0}` cannot be an edge target")]
	TargetIsStart(NodeId),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
	#[error("template skill `{0}` is not in the catalog")]
	MissingSkill(String),
}

/// Deterministic value in `[0, 1)` for `seed`.
fn rand_simple(seed: u64) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// The workflow being edited: nodes, edges, and the id counter.
///
/// Always holds exactly one Start and one End node. Every rejected mutation
/// leaves the graph untouched.
#[derive(Clone, Debug)]
pub struct WorkflowGraph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	next_id: u64,
}

impl WorkflowGraph {
	pub fn new(labels: &EndpointLabels) -> Self {
		Self {
			nodes: initial_nodes(labels),
			edges: Vec::new(),
			next_id: 0,
		}
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, id: &NodeId) -> Option<&Node> {
		self.nodes.iter().find(|node| &node.id == id)
	}

	fn fresh_id(&mut self, prefix: &str) -> String {
		self.next_id += 1;
		format!("{prefix}-{}", self.next_id)
	}

	/// Add a node for `skill`. Without a position it is scattered down the
	/// left side of the canvas so repeated adds don't stack exactly.
	pub fn add_skill_node(&mut self, skill: &Rc<SkillManifest>, position: Option<Point>) -> NodeId {
		let id = NodeId::new(self.fresh_id("node"));
		let position = position.unwrap_or_else(|| {
			Point::new(
				SCATTER_X,
				SCATTER_TOP + rand_simple(self.next_id) * SCATTER_SPAN,
			)
		});
		self.nodes.push(Node {
			id: id.clone(),
			kind: NodeKind::Skill(Rc::clone(skill)),
			label: skill.name.clone(),
			position,
		});
		id
	}

	/// Returns `false` if no node has this id.
	pub fn move_node(&mut self, id: &NodeId, position: Point) -> bool {
		match self.nodes.iter_mut().find(|node| &node.id == id) {
			Some(node) => {
				node.position = position;
				true
			}
			None => false,
		}
	}

	/// Check whether `source -> target` would be accepted by [`Self::add_edge`].
	pub fn check_edge(&self, source: &NodeId, target: &NodeId) -> Result<(), ConnectError> {
		if source == target {
			return Err(ConnectError::SelfLoop(source.clone()));
		}
		let from = self
			.node(source)
			.ok_or_else(|| ConnectError::UnknownNode(source.clone()))?;
		let to = self
			.node(target)
			.ok_or_else(|| ConnectError::UnknownNode(target.clone()))?;
		if !from.emits_output() {
			return Err(ConnectError::SourceIsEnd(source.clone()));
		}
		if !to.accepts_input() {
			return Err(ConnectError::TargetIsStart(target.clone()));
		}
		if self
			.edges
			.iter()
			.any(|edge| &edge.source == source && &edge.target == target)
		{
			return Err(ConnectError::Duplicate {
				from: source.clone(),
				to: target.clone(),
			});
		}
		Ok(())
	}

	pub fn add_edge(&mut self, source: &NodeId, target: &NodeId) -> Result<EdgeId, ConnectError> {
		self.check_edge(source, target)?;
		let id = EdgeId::new(self.fresh_id("edge"));
		self.edges.push(Edge {
			id: id.clone(),
			source: source.clone(),
			target: target.clone(),
		});
		Ok(id)
	}

	/// Replace the whole graph with `Start -> intent-detection ->
	/// product-lookup -> End`. Nothing changes if either skill is missing.
	pub fn load_template(
		&mut self,
		catalog: &SkillCatalog,
		labels: &EndpointLabels,
	) -> Result<(), TemplateError> {
		let [first, second] = TEMPLATE_SKILLS.map(|name| {
			catalog
				.find(name)
				.ok_or_else(|| TemplateError::MissingSkill(name.to_string()))
		});
		let skills = [first?, second?];

		let mut nodes = initial_nodes(labels);
		for ((skill, id), position) in skills
			.into_iter()
			.zip(TEMPLATE_NODE_IDS)
			.zip(TEMPLATE_POSITIONS)
		{
			nodes.push(Node {
				id: NodeId::new(id),
				kind: NodeKind::Skill(Rc::clone(skill)),
				label: skill.name.clone(),
				position,
			});
		}

		let chain = [START_ID, TEMPLATE_NODE_IDS[0], TEMPLATE_NODE_IDS[1], END_ID];
		let edges = chain
			.windows(2)
			.enumerate()
			.map(|(i, pair)| Edge {
				id: EdgeId::new(format!("template-edge-{}", i + 1)),
				source: NodeId::new(pair[0]),
				target: NodeId::new(pair[1]),
			})
			.collect();

		self.nodes = nodes;
		self.edges = edges;
		Ok(())
	}

	/// Back to a lone Start and End. The id counter keeps running so ids are
	/// never handed out twice.
	pub fn reset(&mut self, labels: &EndpointLabels) {
		self.nodes = initial_nodes(labels);
		self.edges.clear();
	}

	/// Retitle Start and End in place, e.g. after a language switch.
	pub fn relabel_endpoints(&mut self, labels: &EndpointLabels) {
		for node in &mut self.nodes {
			match node.kind {
				NodeKind::Start => node.label.clone_from(&labels.start),
				NodeKind::End => node.label.clone_from(&labels.end),
				NodeKind::Skill(_) => {}
			}
		}
	}
}

fn initial_nodes(labels: &EndpointLabels) -> Vec<Node> {
	vec![
		Node {
			id: NodeId::new(START_ID),
			kind: NodeKind::Start,
			label: labels.start.clone(),
			position: START_POSITION,
		},
		Node {
			id: NodeId::new(END_ID),
			kind: NodeKind::End,
			label: labels.end.clone(),
			position: END_POSITION,
		},
	]
}
