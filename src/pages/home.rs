use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::info;

use crate::components::editable_node::{EditableNodeView, EditorAnchor};
use crate::components::graph_canvas::GraphCanvas;
use crate::components::keyboard::use_delete_key;
use crate::components::toolbar::Toolbar;
use crate::config::{ConnectMode, EditorConfig};
use crate::graph::{GraphData, GraphState, NodeId};

/// The drama graph editor. Variants are picked from the query string, e.g.
/// `/?connect=click&drag=false&edit=dblclick`.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let config = query.with_untracked(|q| EditorConfig::from_params(|key| q.get(key)));
	info!("Starting editor with {config:?}");

	let hint = match config.connect_mode {
		ConnectMode::DragHandle => "Drag from a handle to connect.",
		ConnectMode::ClickPair => "Click two nodes to connect.",
	};
	let graph = RwSignal::new(GraphState::new(GraphData::seed(), &config));
	let pending = RwSignal::new(None::<NodeId>);
	let editor_anchor = RwSignal::new(None::<EditorAnchor>);

	use_delete_key(graph);

	view! {
		<div class="app">
			<Toolbar graph=graph pending=pending />
			<div class="flow-wrapper">
				<GraphCanvas
					graph=graph
					config=config
					pending=pending
					editor_anchor=editor_anchor
				/>
				<EditableNodeView graph=graph anchor=editor_anchor />
				<p class="hint">
					{hint}
					" Click an edge to select it, Delete to remove. Scroll to zoom."
				</p>
			</div>
		</div>
	}
}
