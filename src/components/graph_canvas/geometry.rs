use crate::graph::{Edge, GraphState, Node, Position};

pub const NODE_MIN_WIDTH: f64 = 80.0;
pub const NODE_HEIGHT: f64 = 32.0;
pub const NODE_PADDING_X: f64 = 10.0;
/// Approximate advance of one 14px sans-serif glyph.
pub const GLYPH_WIDTH: f64 = 7.5;
pub const HANDLE_RADIUS: f64 = 4.0;
pub const HANDLE_HIT_RADIUS: f64 = 8.0;
pub const ENDPOINT_HIT_RADIUS: f64 = 10.0;
pub const EDGE_HIT_DISTANCE: f64 = 6.0;

/// Node box, in graph space unless noted. `Node::position` is the top-left
/// corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeRect {
	pub x: f64,
	pub y: f64,
	pub w: f64,
	pub h: f64,
}

impl NodeRect {
	pub fn of(node: &Node) -> Self {
		let text = node.label.chars().count() as f64 * GLYPH_WIDTH;
		Self {
			x: node.position.x,
			y: node.position.y,
			w: (text + 2.0 * NODE_PADDING_X).max(NODE_MIN_WIDTH),
			h: NODE_HEIGHT,
		}
	}

	pub fn center(&self) -> Position {
		Position::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
	}

	pub fn contains(&self, p: Position) -> bool {
		p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
	}

	/// Handle dots at the middle of the top, right, bottom and left sides.
	pub fn handles(&self) -> [Position; 4] {
		let c = self.center();
		[
			Position::new(c.x, self.y),
			Position::new(self.x + self.w, c.y),
			Position::new(c.x, self.y + self.h),
			Position::new(self.x, c.y),
		]
	}

	/// Point where the ray from the center toward `toward` leaves the rectangle.
	pub fn exit_point(&self, toward: Position) -> Position {
		let c = self.center();
		let (dx, dy) = (toward.x - c.x, toward.y - c.y);
		if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
			return c;
		}
		let tx = if dx.abs() > f64::EPSILON { (self.w / 2.0) / dx.abs() } else { f64::INFINITY };
		let ty = if dy.abs() > f64::EPSILON { (self.h / 2.0) / dy.abs() } else { f64::INFINITY };
		let t = tx.min(ty).min(1.0);
		Position::new(c.x + dx * t, c.y + dy * t)
	}
}

/// Drawn endpoints of an edge, clipped to the node borders. `None` when
/// either node is missing.
pub fn edge_endpoints(graph: &GraphState, edge: &Edge) -> Option<(Position, Position)> {
	let source = NodeRect::of(graph.node(edge.source)?);
	let target = NodeRect::of(graph.node(edge.target)?);
	if edge.source == edge.target {
		// Self loops run from the top handle to the right handle.
		let [top, right, ..] = source.handles();
		return Some((top, right));
	}
	Some((
		source.exit_point(target.center()),
		target.exit_point(source.center()),
	))
}

pub fn distance(a: Position, b: Position) -> f64 {
	((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

pub fn distance_to_segment(p: Position, a: Position, b: Position) -> f64 {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let len_sq = dx * dx + dy * dy;
	if len_sq < f64::EPSILON {
		return distance(p, a);
	}
	let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
	distance(p, Position::new(a.x + t * dx, a.y + t * dy))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::NodeId;

	fn node(label: &str, x: f64, y: f64) -> Node {
		Node {
			id: NodeId(1),
			label: label.into(),
			position: Position::new(x, y),
		}
	}

	#[test]
	fn short_labels_use_min_width() {
		let rect = NodeRect::of(&node("Bob", 0.0, 0.0));
		assert_eq!(rect.w, NODE_MIN_WIDTH);
		assert_eq!(rect.center(), Position::new(40.0, 16.0));
	}

	#[test]
	fn long_labels_widen_the_node() {
		let rect = NodeRect::of(&node("Bartholomew the Magnificent", 0.0, 0.0));
		assert!(rect.w > NODE_MIN_WIDTH);
	}

	#[test]
	fn exit_point_lies_on_border() {
		let rect = NodeRect::of(&node("Alice", 0.0, 0.0));
		let right = rect.exit_point(Position::new(500.0, 16.0));
		assert!(distance(right, Position::new(80.0, 16.0)) < 1e-9);
		let below = rect.exit_point(Position::new(40.0, 300.0));
		assert!(distance(below, Position::new(40.0, 32.0)) < 1e-9);
	}

	#[test]
	fn segment_distance() {
		let (a, b) = (Position::new(0.0, 0.0), Position::new(10.0, 0.0));
		assert_eq!(distance_to_segment(Position::new(5.0, 3.0), a, b), 3.0);
		assert_eq!(distance_to_segment(Position::new(13.0, 4.0), a, b), 5.0);
	}
}
