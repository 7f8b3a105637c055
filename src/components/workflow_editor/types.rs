use std::fmt;
use std::ops::{Add, Sub};
use std::rc::Rc;

use crate::catalog::SkillManifest;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(String);

impl NodeId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(String);

impl EdgeId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}
}

impl fmt::Display for EdgeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A point in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
	Start,
	End,
	/// Shares the catalog's entry; the node never owns a manifest.
	Skill(Rc<SkillManifest>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: NodeId,
	pub kind: NodeKind,
	pub label: String,
	pub position: Point,
}

impl Node {
	pub fn is_start(&self) -> bool {
		matches!(self.kind, NodeKind::Start)
	}

	pub fn is_end(&self) -> bool {
		matches!(self.kind, NodeKind::End)
	}

	/// Start nodes take no inbound edges.
	pub fn accepts_input(&self) -> bool {
		!self.is_start()
	}

	/// End nodes emit no outbound edges.
	pub fn emits_output(&self) -> bool {
		!self.is_end()
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	pub id: EdgeId,
	pub source: NodeId,
	pub target: NodeId,
}

/// Display labels for the two fixed nodes, resolved by the caller in the
/// active language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointLabels {
	pub start: String,
	pub end: String,
}
