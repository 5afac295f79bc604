use std::collections::HashSet;
use std::ops::Range;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::registry::{RelationshipRegistry, random_color};
use super::types::{
	DEFAULT_STROKE_WIDTH, DIMMED_OPACITY, Edge, EdgeId, EdgeStyle, GraphData, HIGHLIGHT_STROKE_WIDTH,
	Node, NodeId, Position,
};
use crate::clock;
use crate::config::EditorConfig;

/// Everything the editor knows about the graph for one session.
///
/// All operations are infallible: unknown ids, empty or duplicate type names
/// leave the state untouched. Return values only report whether anything
/// changed.
pub struct GraphState {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	registry: RelationshipRegistry,
	active_type: String,
	selected_edges: HashSet<EdgeId>,
	editing: Option<NodeId>,
	next_id: u32,
	last_stamp: u64,
	rng: SmallRng,
	spawn_x: Range<f64>,
	spawn_y: Range<f64>,
}

impl GraphState {
	pub fn new(data: GraphData, config: &EditorConfig) -> Self {
		let next_id = data.nodes.iter().map(|n| n.id.0).max().unwrap_or(0) + 1;
		let registry = RelationshipRegistry::default();
		let active_type = registry.names().next().unwrap_or_default().to_string();
		Self {
			nodes: data.nodes,
			edges: data.edges,
			registry,
			active_type,
			selected_edges: HashSet::new(),
			editing: None,
			next_id,
			last_stamp: 0,
			rng: SmallRng::seed_from_u64(config.seed.unwrap_or_else(clock::now_ms)),
			spawn_x: config.spawn_x.clone(),
			spawn_y: config.spawn_y.clone(),
		}
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
		self.edges.iter().find(|e| &e.id == id)
	}

	pub fn registry(&self) -> &RelationshipRegistry {
		&self.registry
	}

	pub fn active_type(&self) -> &str {
		&self.active_type
	}

	/// Makes `name` the type applied to new edges. Unknown names are ignored.
	pub fn set_active_type(&mut self, name: &str) -> bool {
		if !self.registry.contains(name) {
			debug!("Ignoring unknown relationship type {name:?}");
			return false;
		}
		self.active_type = name.to_string();
		true
	}

	pub fn add_node(&mut self) -> NodeId {
		let id = NodeId(self.next_id);
		self.next_id += 1;
		let position = Position::new(
			self.rng.random_range(self.spawn_x.clone()),
			self.rng.random_range(self.spawn_y.clone()),
		);
		self.nodes.push(Node {
			id,
			label: format!("Person {id}"),
			position,
		});
		info!("Added node {id} at ({:.0}, {:.0})", position.x, position.y);
		id
	}

	pub fn move_node(&mut self, id: NodeId, position: Position) -> bool {
		match self.nodes.iter_mut().find(|n| n.id == id) {
			Some(node) => {
				node.position = position;
				true
			}
			None => false,
		}
	}

	pub fn update_node_label(&mut self, id: NodeId, text: &str) -> bool {
		match self.nodes.iter_mut().find(|n| n.id == id) {
			Some(node) => {
				node.label = text.to_string();
				debug!("Node {id} relabeled to {text:?}");
				true
			}
			None => false,
		}
	}

	/// Node currently showing the inline editor, if any.
	pub fn editing(&self) -> Option<NodeId> {
		self.editing
	}

	pub fn is_editing(&self, id: NodeId) -> bool {
		self.editing == Some(id)
	}

	/// Opens or closes the inline editor for `id`. Only one node edits at a
	/// time: opening a second editor replaces the first.
	pub fn set_node_editing(&mut self, id: NodeId, editing: bool) -> bool {
		if editing {
			if self.node(id).is_none() {
				return false;
			}
			self.editing = Some(id);
			true
		} else if self.editing == Some(id) {
			self.editing = None;
			true
		} else {
			false
		}
	}

	/// Leaves edit mode for `id`, storing `text` as its label whether or not it
	/// changed. Does nothing unless `id` is the node being edited.
	pub fn commit_edit(&mut self, id: NodeId, text: &str) -> bool {
		if !self.set_node_editing(id, false) {
			return false;
		}
		self.update_node_label(id, text)
	}

	/// Adds an edge labeled `relationship` between two known nodes. Duplicate
	/// edges between the same pair are allowed.
	pub fn connect(&mut self, source: NodeId, target: NodeId, relationship: &str) -> Option<EdgeId> {
		if self.node(source).is_none() || self.node(target).is_none() {
			debug!("Ignoring connection {source} -> {target}: unknown node");
			return None;
		}
		let stamp = self.next_stamp();
		let edge = Edge {
			id: EdgeId::new(source, target, stamp),
			source,
			target,
			label: relationship.to_string(),
			style: EdgeStyle::with_stroke(self.registry.color_or_fallback(relationship)),
		};
		let id = edge.id.clone();
		info!("Connected {source} -> {target} as {relationship:?}");
		self.edges.push(edge);
		Some(id)
	}

	pub fn connect_active(&mut self, source: NodeId, target: NodeId) -> Option<EdgeId> {
		let relationship = self.active_type.clone();
		self.connect(source, target, &relationship)
	}

	/// Swaps `old` for a fresh edge between new endpoints, keeping its label,
	/// style and position in the edge list.
	pub fn reconnect(&mut self, old: &EdgeId, source: NodeId, target: NodeId) -> Option<EdgeId> {
		if self.node(source).is_none() || self.node(target).is_none() {
			return None;
		}
		let idx = self.edges.iter().position(|e| &e.id == old)?;
		let stamp = self.next_stamp();
		let previous = &self.edges[idx];
		let edge = Edge {
			id: EdgeId::new(source, target, stamp),
			source,
			target,
			label: previous.label.clone(),
			style: previous.style.clone(),
		};
		let id = edge.id.clone();
		debug!("Reconnected {old} as {id}");
		self.edges[idx] = edge;
		if self.selected_edges.remove(old) {
			self.selected_edges.insert(id.clone());
		}
		Some(id)
	}

	/// Removes every edge whose id is in `ids`. Returns how many went.
	pub fn delete_edges(&mut self, ids: &HashSet<EdgeId>) -> usize {
		let before = self.edges.len();
		self.edges.retain(|e| !ids.contains(&e.id));
		self.selected_edges.retain(|id| !ids.contains(id));
		let removed = before - self.edges.len();
		if removed > 0 {
			info!("Deleted {removed} edge(s)");
		}
		removed
	}

	pub fn selected_edges(&self) -> &HashSet<EdgeId> {
		&self.selected_edges
	}

	pub fn set_selected_edges(&mut self, ids: HashSet<EdgeId>) {
		self.selected_edges = ids;
	}

	pub fn delete_selected_edges(&mut self) -> usize {
		let selected = std::mem::take(&mut self.selected_edges);
		self.delete_edges(&selected)
	}

	/// Adds a relationship type unless the name is empty or taken. Without a
	/// color a random one is picked.
	pub fn register_relationship_type(&mut self, name: &str, color: Option<String>) -> bool {
		let color = color.unwrap_or_else(|| random_color(&mut self.rng));
		let added = self.registry.register(name, color);
		if added {
			info!("Registered relationship type {name:?}");
		} else {
			debug!("Relationship type {name:?} rejected");
		}
		added
	}

	/// Toolbar flow: trims `raw`, registers it with a random color and makes
	/// it the active type.
	pub fn add_relationship_type(&mut self, raw: &str) -> bool {
		let name = raw.trim();
		if !self.register_relationship_type(name, None) {
			return false;
		}
		self.active_type = name.to_string();
		true
	}

	pub fn update_edge_style(&mut self, id: &EdgeId, style: EdgeStyle) -> bool {
		match self.edges.iter_mut().find(|e| &e.id == id) {
			Some(edge) => {
				edge.style = style;
				true
			}
			None => false,
		}
	}

	/// Thickens the edges touching `node` and dims every other edge. Strokes
	/// are refreshed from the registry.
	pub fn highlight_edges_for_node(&mut self, node: NodeId) {
		for edge in &mut self.edges {
			let connected = edge.touches(node);
			edge.style = EdgeStyle {
				stroke: self.registry.color_or_fallback(&edge.label).to_string(),
				width: if connected {
					HIGHLIGHT_STROKE_WIDTH
				} else {
					DEFAULT_STROKE_WIDTH
				},
				opacity: if connected { 1.0 } else { DIMMED_OPACITY },
			};
		}
	}

	fn next_stamp(&mut self) -> u64 {
		self.last_stamp = clock::now_ms().max(self.last_stamp + 1);
		self.last_stamp
	}
}
