use std::collections::HashSet;

use crate::config::ConnectMode;
use crate::graph::{EdgeId, GraphState, NodeId, Position};

use super::geometry::{
	EDGE_HIT_DISTANCE, ENDPOINT_HIT_RADIUS, HANDLE_HIT_RADIUS, NodeRect, distance,
	distance_to_segment, edge_endpoints,
};

/// Screen pixels the pointer may travel before a press stops being a click.
pub const CLICK_SLOP: f64 = 3.0;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
const FIT_PADDING: f64 = 40.0;
const FIT_MAX_ZOOM: f64 = 1.5;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Which end of an edge a reconnect gesture is moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeEnd {
	Source,
	Target,
}

/// Pointer gesture in progress. Positions are in screen space unless noted.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
	#[default]
	Idle,
	/// Button down on a node body; becomes a drag once it moves, if allowed.
	PressedNode {
		node: NodeId,
		start: Position,
		node_start: Position,
		dragging: bool,
	},
	Panning {
		start: Position,
		transform_start: ViewTransform,
		moved: bool,
	},
	/// Rubber-band line from a handle; `cursor` is in graph space.
	Connecting { source: NodeId, cursor: Position },
	/// One end of a selected edge follows the pointer; `cursor` is in graph
	/// space.
	Reconnecting {
		edge: EdgeId,
		end: EdgeEnd,
		cursor: Position,
	},
	/// Rectangle selection between two graph-space corners.
	Selecting { anchor: Position, cursor: Position },
}

/// What the pointer is over, for cursor feedback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Hover {
	#[default]
	None,
	Node,
	Handle,
	Edge,
}

/// Changes the canvas asks the editor to apply to the graph.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent {
	NodeMoved { node: NodeId, position: Position },
	NodeClicked(NodeId),
	Connect { source: NodeId, target: NodeId },
	Reconnect {
		edge: EdgeId,
		source: NodeId,
		target: NodeId,
	},
	SelectionChanged(HashSet<EdgeId>),
	EditRequested(NodeId),
}

/// Viewport, gesture state machine and hit-testing for the graph canvas.
pub struct CanvasState {
	pub transform: ViewTransform,
	pub interaction: Interaction,
	pub hover: Hover,
	/// First node picked in click-to-connect mode.
	pub pending_source: Option<NodeId>,
	pub connect_mode: ConnectMode,
	pub nodes_draggable: bool,
	pub width: f64,
	pub height: f64,
}

impl CanvasState {
	pub fn new(width: f64, height: f64, connect_mode: ConnectMode, nodes_draggable: bool) -> Self {
		Self {
			transform: ViewTransform::default(),
			interaction: Interaction::Idle,
			hover: Hover::None,
			pending_source: None,
			connect_mode,
			nodes_draggable,
			width,
			height,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Position {
		Position::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn graph_to_screen(&self, p: Position) -> Position {
		Position::new(
			p.x * self.transform.k + self.transform.x,
			p.y * self.transform.k + self.transform.y,
		)
	}

	/// Box of `node` in screen space under the current view.
	pub fn screen_rect(&self, graph: &GraphState, node: NodeId) -> Option<NodeRect> {
		let rect = NodeRect::of(graph.node(node)?);
		let top_left = self.graph_to_screen(Position::new(rect.x, rect.y));
		Some(NodeRect {
			x: top_left.x,
			y: top_left.y,
			w: rect.w * self.transform.k,
			h: rect.h * self.transform.k,
		})
	}

	/// Topmost node under the point. Later nodes are drawn on top.
	pub fn node_at(&self, graph: &GraphState, p: Position) -> Option<NodeId> {
		graph
			.nodes()
			.iter()
			.rev()
			.find(|n| NodeRect::of(n).contains(p))
			.map(|n| n.id)
	}

	pub fn handle_at(&self, graph: &GraphState, p: Position) -> Option<NodeId> {
		if self.connect_mode != ConnectMode::DragHandle {
			return None;
		}
		let radius = HANDLE_HIT_RADIUS / self.transform.k.max(1.0);
		graph.nodes().iter().rev().find_map(|n| {
			NodeRect::of(n)
				.handles()
				.iter()
				.any(|&h| distance(h, p) <= radius)
				.then_some(n.id)
		})
	}

	pub fn edge_at(&self, graph: &GraphState, p: Position) -> Option<EdgeId> {
		let tolerance = EDGE_HIT_DISTANCE / self.transform.k;
		graph
			.edges()
			.iter()
			.rev()
			.find(|e| {
				edge_endpoints(graph, e)
					.is_some_and(|(a, b)| distance_to_segment(p, a, b) <= tolerance)
			})
			.map(|e| e.id.clone())
	}

	/// Grip at either end of a selected edge.
	fn edge_end_at(&self, graph: &GraphState, p: Position) -> Option<(EdgeId, EdgeEnd)> {
		let radius = ENDPOINT_HIT_RADIUS / self.transform.k;
		graph
			.edges()
			.iter()
			.filter(|e| graph.selected_edges().contains(&e.id))
			.find_map(|e| {
				let (a, b) = edge_endpoints(graph, e)?;
				if distance(p, b) <= radius {
					Some((e.id.clone(), EdgeEnd::Target))
				} else if distance(p, a) <= radius {
					Some((e.id.clone(), EdgeEnd::Source))
				} else {
					None
				}
			})
	}

	pub fn pointer_down(
		&mut self,
		graph: &GraphState,
		sx: f64,
		sy: f64,
		shift: bool,
	) -> Vec<CanvasEvent> {
		let p = self.screen_to_graph(sx, sy);
		let start = Position::new(sx, sy);

		if let Some((edge, end)) = self.edge_end_at(graph, p) {
			self.interaction = Interaction::Reconnecting {
				edge,
				end,
				cursor: p,
			};
			return Vec::new();
		}
		if let Some(source) = self.handle_at(graph, p) {
			self.interaction = Interaction::Connecting { source, cursor: p };
			return Vec::new();
		}
		if let Some(node) = self.node_at(graph, p) {
			let node_start = graph.node(node).map(|n| n.position).unwrap_or_default();
			self.interaction = Interaction::PressedNode {
				node,
				start,
				node_start,
				dragging: false,
			};
			return Vec::new();
		}
		if let Some(edge) = self.edge_at(graph, p) {
			let mut selection = if shift {
				graph.selected_edges().clone()
			} else {
				HashSet::new()
			};
			if !selection.remove(&edge) {
				selection.insert(edge);
			}
			return vec![CanvasEvent::SelectionChanged(selection)];
		}
		self.interaction = if shift {
			Interaction::Selecting {
				anchor: p,
				cursor: p,
			}
		} else {
			Interaction::Panning {
				start,
				transform_start: self.transform.clone(),
				moved: false,
			}
		};
		Vec::new()
	}

	pub fn pointer_move(&mut self, graph: &GraphState, sx: f64, sy: f64) -> Vec<CanvasEvent> {
		let p = self.screen_to_graph(sx, sy);
		let k = self.transform.k;
		let mut events = Vec::new();

		if self.interaction == Interaction::Idle {
			self.hover = if self.handle_at(graph, p).is_some() {
				Hover::Handle
			} else if self.node_at(graph, p).is_some() {
				Hover::Node
			} else if self.edge_at(graph, p).is_some() {
				Hover::Edge
			} else {
				Hover::None
			};
			return events;
		}

		match &mut self.interaction {
			Interaction::Idle => {}
			Interaction::PressedNode {
				node,
				start,
				node_start,
				dragging,
			} => {
				if !*dragging && self.nodes_draggable && distance(*start, Position::new(sx, sy)) > CLICK_SLOP {
					*dragging = true;
				}
				if *dragging {
					let position = Position::new(
						node_start.x + (sx - start.x) / k,
						node_start.y + (sy - start.y) / k,
					);
					events.push(CanvasEvent::NodeMoved {
						node: *node,
						position,
					});
				}
			}
			Interaction::Panning {
				start,
				transform_start,
				moved,
			} => {
				if distance(*start, Position::new(sx, sy)) > CLICK_SLOP {
					*moved = true;
				}
				self.transform.x = transform_start.x + (sx - start.x);
				self.transform.y = transform_start.y + (sy - start.y);
			}
			Interaction::Connecting { cursor, .. }
			| Interaction::Reconnecting { cursor, .. }
			| Interaction::Selecting { cursor, .. } => *cursor = p,
		}
		events
	}

	pub fn pointer_up(&mut self, graph: &GraphState, sx: f64, sy: f64) -> Vec<CanvasEvent> {
		let p = self.screen_to_graph(sx, sy);
		match std::mem::take(&mut self.interaction) {
			Interaction::Idle => Vec::new(),
			Interaction::PressedNode { node, dragging, .. } => {
				if dragging {
					Vec::new()
				} else {
					self.click_node(node)
				}
			}
			Interaction::Panning { moved, .. } => {
				if moved {
					return Vec::new();
				}
				self.pending_source = None;
				if graph.selected_edges().is_empty() {
					Vec::new()
				} else {
					vec![CanvasEvent::SelectionChanged(HashSet::new())]
				}
			}
			Interaction::Connecting { source, .. } => match self.node_at(graph, p) {
				Some(target) if target != source => vec![CanvasEvent::Connect { source, target }],
				_ => Vec::new(),
			},
			Interaction::Reconnecting { edge, end, .. } => {
				let (Some(target_node), Some(current)) = (self.node_at(graph, p), graph.edge(&edge))
				else {
					return Vec::new();
				};
				let (source, target) = match end {
					EdgeEnd::Source => (target_node, current.target),
					EdgeEnd::Target => (current.source, target_node),
				};
				// Same endpoints is a no-op; self-loops are refused as in connect.
				if source == target || (source, target) == (current.source, current.target) {
					return Vec::new();
				}
				vec![CanvasEvent::Reconnect {
					edge,
					source,
					target,
				}]
			}
			Interaction::Selecting { anchor, cursor } => {
				let (min, max) = (
					Position::new(anchor.x.min(cursor.x), anchor.y.min(cursor.y)),
					Position::new(anchor.x.max(cursor.x), anchor.y.max(cursor.y)),
				);
				let inside = |q: Position| q.x >= min.x && q.x <= max.x && q.y >= min.y && q.y <= max.y;
				let selection = graph
					.edges()
					.iter()
					.filter(|e| {
						edge_endpoints(graph, e).is_some_and(|(a, b)| inside(a) && inside(b))
					})
					.map(|e| e.id.clone())
					.collect();
				vec![CanvasEvent::SelectionChanged(selection)]
			}
		}
	}

	fn click_node(&mut self, node: NodeId) -> Vec<CanvasEvent> {
		let mut events = vec![CanvasEvent::NodeClicked(node)];
		if self.connect_mode == ConnectMode::ClickPair {
			match self.pending_source.take() {
				None => self.pending_source = Some(node),
				Some(source) if source != node => {
					events.push(CanvasEvent::Connect {
						source,
						target: node,
					});
				}
				Some(_) => {}
			}
		}
		events
	}

	/// Abandons whatever gesture was in progress.
	pub fn pointer_leave(&mut self) {
		self.interaction = Interaction::Idle;
		self.hover = Hover::None;
	}

	/// Double-click or context-menu on a node.
	pub fn edit_gesture(&self, graph: &GraphState, sx: f64, sy: f64) -> Option<CanvasEvent> {
		self.node_at(graph, self.screen_to_graph(sx, sy))
			.map(CanvasEvent::EditRequested)
	}

	/// Zooms by one wheel notch around the screen point.
	pub fn zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		// Horizontal-only scrolls carry no vertical delta.
		if delta_y == 0.0 {
			return;
		}
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Centers the graph in the viewport, zooming out if it does not fit.
	pub fn fit_view(&mut self, graph: &GraphState) {
		let mut rects = graph.nodes().iter().map(NodeRect::of);
		let Some(first) = rects.next() else {
			self.transform = ViewTransform::default();
			return;
		};
		let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x + first.w, first.y + first.h);
		for r in rects {
			x0 = x0.min(r.x);
			y0 = y0.min(r.y);
			x1 = x1.max(r.x + r.w);
			y1 = y1.max(r.y + r.h);
		}
		let (bw, bh) = (x1 - x0 + 2.0 * FIT_PADDING, y1 - y0 + 2.0 * FIT_PADDING);
		let k = (self.width / bw).min(self.height / bh).clamp(MIN_ZOOM, FIT_MAX_ZOOM);
		let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn cursor(&self) -> &'static str {
		match (&self.interaction, self.hover) {
			(Interaction::Panning { .. }, _) => "grabbing",
			(Interaction::PressedNode { dragging: true, .. }, _) => "grabbing",
			(Interaction::Connecting { .. } | Interaction::Reconnecting { .. }, _) => "crosshair",
			(Interaction::Selecting { .. }, _) => "crosshair",
			(_, Hover::Handle) => "crosshair",
			(_, Hover::Node | Hover::Edge) => "pointer",
			_ => "grab",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::EditorConfig;
	use crate::graph::GraphData;

	// Seed layout at zoom 1: Alice spans (100..180, 100..132), Bob spans
	// (400..480, 100..132), e1-2 runs along y = 116 from x = 180 to 400.

	fn graph() -> GraphState {
		let config = EditorConfig {
			seed: Some(3),
			..EditorConfig::default()
		};
		GraphState::new(GraphData::seed(), &config)
	}

	fn canvas(mode: ConnectMode) -> CanvasState {
		CanvasState::new(800.0, 600.0, mode, true)
	}

	fn apply(graph: &mut GraphState, events: Vec<CanvasEvent>) {
		for event in events {
			match event {
				CanvasEvent::NodeMoved { node, position } => {
					graph.move_node(node, position);
				}
				CanvasEvent::Connect { source, target } => {
					graph.connect_active(source, target);
				}
				CanvasEvent::Reconnect {
					edge,
					source,
					target,
				} => {
					graph.reconnect(&edge, source, target);
				}
				CanvasEvent::SelectionChanged(ids) => graph.set_selected_edges(ids),
				CanvasEvent::NodeClicked(_) | CanvasEvent::EditRequested(_) => {}
			}
		}
	}

	#[test]
	fn dragging_a_node_moves_it() {
		let mut g = graph();
		let mut c = canvas(ConnectMode::DragHandle);
		c.pointer_down(&g, 140.0, 116.0, false);
		let events = c.pointer_move(&g, 160.0, 146.0);
		assert_eq!(
			events,
			[CanvasEvent::NodeMoved {
				node: NodeId(1),
				position: Position::new(120.0, 130.0),
			}]
		);
		apply(&mut g, events);
		assert!(c.pointer_up(&g, 160.0, 146.0).is_empty());
		assert_eq!(c.interaction, Interaction::Idle);
		assert_eq!(g.node(NodeId(1)).unwrap().position, Position::new(120.0, 130.0));
	}

	#[test]
	fn fixed_nodes_do_not_drag() {
		let g = graph();
		let mut c = CanvasState::new(800.0, 600.0, ConnectMode::DragHandle, false);
		c.pointer_down(&g, 140.0, 116.0, false);
		assert!(c.pointer_move(&g, 200.0, 200.0).is_empty());
		assert_eq!(c.pointer_up(&g, 200.0, 200.0), [CanvasEvent::NodeClicked(NodeId(1))]);
	}

	#[test]
	fn click_on_node_reports_click() {
		let g = graph();
		let mut c = canvas(ConnectMode::DragHandle);
		c.pointer_down(&g, 420.0, 110.0, false);
		assert_eq!(c.pointer_up(&g, 421.0, 110.0), [CanvasEvent::NodeClicked(NodeId(2))]);
	}

	#[test]
	fn drag_from_handle_connects() {
		let mut g = graph();
		g.set_active_type("hate");
		let mut c = canvas(ConnectMode::DragHandle);
		// Bottom handle of Alice.
		c.pointer_down(&g, 140.0, 132.0, false);
		assert!(matches!(c.interaction, Interaction::Connecting { source: NodeId(1), .. }));
		c.pointer_move(&g, 430.0, 120.0);
		let events = c.pointer_up(&g, 430.0, 120.0);
		assert_eq!(
			events,
			[CanvasEvent::Connect {
				source: NodeId(1),
				target: NodeId(2),
			}]
		);
		apply(&mut g, events);
		let edge = g.edges().last().unwrap();
		assert_eq!(edge.label, "hate");
		assert_eq!(edge.style.stroke, "red");
	}

	#[test]
	fn releasing_a_connection_on_empty_space_cancels() {
		let g = graph();
		let mut c = canvas(ConnectMode::DragHandle);
		c.pointer_down(&g, 140.0, 132.0, false);
		assert!(c.pointer_up(&g, 700.0, 500.0).is_empty());
		c.pointer_down(&g, 140.0, 132.0, false);
		assert!(c.pointer_up(&g, 150.0, 116.0).is_empty());
	}

	#[test]
	fn click_pair_mode_connects_second_click() {
		let mut g = graph();
		let mut c = canvas(ConnectMode::ClickPair);
		c.pointer_down(&g, 140.0, 116.0, false);
		c.pointer_up(&g, 140.0, 116.0);
		assert_eq!(c.pending_source, Some(NodeId(1)));

		c.pointer_down(&g, 440.0, 116.0, false);
		let events = c.pointer_up(&g, 440.0, 116.0);
		assert!(events.contains(&CanvasEvent::Connect {
			source: NodeId(1),
			target: NodeId(2),
		}));
		assert_eq!(c.pending_source, None);
		apply(&mut g, events);
		assert_eq!(g.edges().len(), 2);
	}

	#[test]
	fn click_pair_same_node_twice_cancels() {
		let g = graph();
		let mut c = canvas(ConnectMode::ClickPair);
		for _ in 0..2 {
			c.pointer_down(&g, 140.0, 116.0, false);
			c.pointer_up(&g, 140.0, 116.0);
		}
		assert_eq!(c.pending_source, None);
		// Handles are inert in click mode, so the bottom edge is node body.
		c.pointer_down(&g, 140.0, 131.0, false);
		assert!(matches!(c.interaction, Interaction::PressedNode { .. }));
	}

	#[test]
	fn clicking_an_edge_selects_it() {
		let mut g = graph();
		let mut c = canvas(ConnectMode::DragHandle);
		let events = c.pointer_down(&g, 300.0, 118.0, false);
		let expected: HashSet<_> = [EdgeId::from("e1-2")].into();
		assert_eq!(events, [CanvasEvent::SelectionChanged(expected)]);
		apply(&mut g, events);

		// Shift-click toggles it back off.
		let events = c.pointer_down(&g, 300.0, 118.0, true);
		assert_eq!(events, [CanvasEvent::SelectionChanged(HashSet::new())]);
	}

	#[test]
	fn clicking_background_clears_selection() {
		let mut g = graph();
		g.set_selected_edges([EdgeId::from("e1-2")].into());
		let mut c = canvas(ConnectMode::DragHandle);
		c.pointer_down(&g, 600.0, 400.0, false);
		assert_eq!(c.pointer_up(&g, 600.0, 400.0), [CanvasEvent::SelectionChanged(HashSet::new())]);
	}

	#[test]
	fn background_drag_pans() {
		let g = graph();
		let mut c = canvas(ConnectMode::DragHandle);
		c.pointer_down(&g, 600.0, 400.0, false);
		c.pointer_move(&g, 650.0, 380.0);
		assert!(c.pointer_up(&g, 650.0, 380.0).is_empty());
		assert_eq!(c.transform, ViewTransform { x: 50.0, y: -20.0, k: 1.0 });
	}

	#[test]
	fn rectangle_selects_enclosed_edges() {
		let mut g = graph();
		let c3 = g.add_node();
		g.move_node(c3, Position::new(100.0, 400.0));
		g.connect(NodeId(1), c3, "friends");
		let mut c = canvas(ConnectMode::DragHandle);
		c.pointer_down(&g, 50.0, 50.0, true);
		c.pointer_move(&g, 550.0, 200.0);
		let expected: HashSet<_> = [EdgeId::from("e1-2")].into();
		assert_eq!(c.pointer_up(&g, 550.0, 200.0), [CanvasEvent::SelectionChanged(expected)]);
	}

	#[test]
	fn dragging_selected_edge_end_reconnects() {
		let mut g = graph();
		let carol = g.add_node();
		g.move_node(carol, Position::new(400.0, 300.0));
		g.set_selected_edges([EdgeId::from("e1-2")].into());
		let mut c = canvas(ConnectMode::DragHandle);

		// Target end of e1-2 sits on Bob's left border.
		c.pointer_down(&g, 401.0, 116.0, false);
		assert!(matches!(c.interaction, Interaction::Reconnecting { end: EdgeEnd::Target, .. }));
		c.pointer_move(&g, 440.0, 316.0);
		let events = c.pointer_up(&g, 440.0, 316.0);
		assert_eq!(
			events,
			[CanvasEvent::Reconnect {
				edge: EdgeId::from("e1-2"),
				source: NodeId(1),
				target: carol,
			}]
		);
		apply(&mut g, events);
		assert_eq!(g.edges().len(), 1);
		assert_eq!(g.edges()[0].target, carol);
		assert_eq!(g.edges()[0].label, "dating");
	}

	#[test]
	fn dropping_edge_end_back_on_its_node_cancels() {
		let mut g = graph();
		g.set_selected_edges([EdgeId::from("e1-2")].into());
		let mut c = canvas(ConnectMode::DragHandle);
		c.pointer_down(&g, 401.0, 116.0, false);
		c.pointer_move(&g, 450.0, 120.0);
		assert!(c.pointer_up(&g, 450.0, 120.0).is_empty());
		assert_eq!(g.edges()[0].id, EdgeId::from("e1-2"));
	}

	#[test]
	fn reconnecting_onto_the_other_end_is_refused() {
		let mut g = graph();
		g.set_selected_edges([EdgeId::from("e1-2")].into());
		let mut c = canvas(ConnectMode::DragHandle);
		// Source end of e1-2 sits on Alice's right border; drop it on Bob.
		c.pointer_down(&g, 179.0, 116.0, false);
		assert!(matches!(c.interaction, Interaction::Reconnecting { end: EdgeEnd::Source, .. }));
		c.pointer_move(&g, 450.0, 120.0);
		assert!(c.pointer_up(&g, 450.0, 120.0).is_empty());
		assert_eq!(g.edges()[0].source, NodeId(1));
	}

	#[test]
	fn edit_gesture_targets_node_under_pointer() {
		let g = graph();
		let c = canvas(ConnectMode::DragHandle);
		assert_eq!(c.edit_gesture(&g, 450.0, 120.0), Some(CanvasEvent::EditRequested(NodeId(2))));
		assert_eq!(c.edit_gesture(&g, 10.0, 10.0), None);
	}

	#[test]
	fn zoom_keeps_point_under_cursor() {
		let mut c = canvas(ConnectMode::DragHandle);
		let before = c.screen_to_graph(200.0, 150.0);
		c.zoom(200.0, 150.0, -1.0);
		let after = c.screen_to_graph(200.0, 150.0);
		assert!(distance(before, after) < 1e-9);
		assert!((c.transform.k - 1.1).abs() < 1e-12);
	}

	#[test]
	fn horizontal_scroll_leaves_zoom_alone() {
		let mut c = canvas(ConnectMode::DragHandle);
		c.zoom(100.0, 100.0, 0.0);
		assert_eq!(c.transform, ViewTransform::default());
	}

	#[test]
	fn screen_rect_follows_zoom() {
		let g = graph();
		let mut c = canvas(ConnectMode::DragHandle);
		let before = c.screen_rect(&g, NodeId(2)).unwrap();
		assert_eq!((before.x, before.y, before.w), (400.0, 100.0, 80.0));

		c.zoom(0.0, 0.0, -1.0);
		let after = c.screen_rect(&g, NodeId(2)).unwrap();
		assert!((after.x - 440.0).abs() < 1e-9);
		assert!((after.y - 110.0).abs() < 1e-9);
		assert!((after.w - 88.0).abs() < 1e-9);
		assert!(c.screen_rect(&g, NodeId(9)).is_none());
	}

	#[test]
	fn fit_view_centers_graph() {
		let g = graph();
		let mut c = canvas(ConnectMode::DragHandle);
		c.fit_view(&g);
		// Bounds 100..480 x 100..132 center on (290, 116).
		let center = c.graph_to_screen(Position::new(290.0, 116.0));
		assert!(distance(center, Position::new(400.0, 300.0)) < 1e-9);
	}

	#[test]
	fn leaving_cancels_gesture() {
		let g = graph();
		let mut c = canvas(ConnectMode::DragHandle);
		c.pointer_down(&g, 140.0, 132.0, false);
		c.pointer_leave();
		assert_eq!(c.interaction, Interaction::Idle);
		assert!(c.pointer_up(&g, 430.0, 120.0).is_empty());
	}
}
