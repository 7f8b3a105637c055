use super::types::{NodeId, Point};

/// The pointer gesture in progress, if any. At most one is active.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
	#[default]
	Idle,
	Dragging {
		node: NodeId,
		pointer_origin: Point,
		node_origin: Point,
	},
	Connecting {
		source: NodeId,
		cursor: Point,
	},
}

impl Gesture {
	pub fn begin_drag(node: NodeId, pointer: Point, node_origin: Point) -> Self {
		Gesture::Dragging {
			node,
			pointer_origin: pointer,
			node_origin,
		}
	}

	pub fn begin_connect(source: NodeId, cursor: Point) -> Self {
		Gesture::Connecting { source, cursor }
	}

	pub fn is_active(&self) -> bool {
		!matches!(self, Gesture::Idle)
	}

	/// Track the pointer. While dragging, returns the node and where it
	/// should now be: its origin plus the pointer's total travel, unclamped.
	pub fn update(&mut self, pointer: Point) -> Option<(&NodeId, Point)> {
		match self {
			Gesture::Idle => None,
			Gesture::Dragging {
				node,
				pointer_origin,
				node_origin,
			} => Some((&*node, *node_origin + (pointer - *pointer_origin))),
			Gesture::Connecting { cursor, .. } => {
				*cursor = pointer;
				None
			}
		}
	}

	/// Finish the gesture, leaving `Idle` behind and handing back what was
	/// in progress.
	pub fn end(&mut self) -> Gesture {
		std::mem::take(self)
	}
}
