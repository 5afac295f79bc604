use std::fmt;

/// Sequential node identifier. Rendered as a plain decimal string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Edge identifier, `e{source}-{target}` for seeded edges and
/// `e{source}-{target}-{stamp}` for edges created at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub String);

impl EdgeId {
	pub fn new(source: NodeId, target: NodeId, stamp: u64) -> Self {
		Self(format!("e{source}-{target}-{stamp}"))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for EdgeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for EdgeId {
	fn from(s: &str) -> Self {
		Self(s.to_string())
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A character on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: NodeId,
	pub label: String,
	pub position: Position,
}

pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
pub const HIGHLIGHT_STROKE_WIDTH: f64 = 4.0;
pub const DIMMED_OPACITY: f64 = 0.3;
/// Stroke used when an edge's relationship type is not in the registry.
pub const FALLBACK_COLOR: &str = "gray";

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
	pub stroke: String,
	pub width: f64,
	pub opacity: f64,
}

impl EdgeStyle {
	pub fn with_stroke(stroke: impl Into<String>) -> Self {
		Self {
			stroke: stroke.into(),
			width: DEFAULT_STROKE_WIDTH,
			opacity: 1.0,
		}
	}
}

/// A directed relationship between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub id: EdgeId,
	pub source: NodeId,
	pub target: NodeId,
	/// Relationship type name.
	pub label: String,
	pub style: EdgeStyle,
}

impl Edge {
	pub fn touches(&self, node: NodeId) -> bool {
		self.source == node || self.target == node
	}
}

/// Initial contents of the editor.
#[derive(Clone, Debug, Default)]
pub struct GraphData {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

impl GraphData {
	/// Alice and Bob, dating.
	pub fn seed() -> Self {
		let (alice, bob) = (NodeId(1), NodeId(2));
		Self {
			nodes: vec![
				Node {
					id: alice,
					label: "Alice".into(),
					position: Position::new(100.0, 100.0),
				},
				Node {
					id: bob,
					label: "Bob".into(),
					position: Position::new(400.0, 100.0),
				},
			],
			edges: vec![Edge {
				id: EdgeId::from("e1-2"),
				source: alice,
				target: bob,
				label: "dating".into(),
				style: EdgeStyle::with_stroke("pink"),
			}],
		}
	}
}
