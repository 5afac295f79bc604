use leptos::ev;
use leptos::prelude::*;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, KeyboardEvent};

use crate::graph::GraphState;

/// Keys that delete the current edge selection.
pub fn is_delete_key(key: &str) -> bool {
	matches!(key, "Delete" | "Backspace")
}

/// Whether a keypress should delete edges. Presses typed into a text field
/// belong to that field.
pub fn should_delete(key: &str, from_text_input: bool) -> bool {
	is_delete_key(key) && !from_text_input
}

fn from_text_input(ev: &KeyboardEvent) -> bool {
	ev.target()
		.is_some_and(|t| t.dyn_into::<HtmlInputElement>().is_ok())
}

/// Deletes the selected edges if `key` asks for it. Returns how many went.
pub fn delete_selection_on_key(graph: &mut GraphState, key: &str, from_text_input: bool) -> usize {
	if should_delete(key, from_text_input) {
		graph.delete_selected_edges()
	} else {
		0
	}
}

/// Deletes the editor's selected edges on window-level Delete/Backspace
/// presses, for the lifetime of the calling component (the editor page).
pub fn use_delete_key(graph: RwSignal<GraphState>) {
	let handle = window_event_listener(ev::keydown, move |ev: KeyboardEvent| {
		let (key, in_field) = (ev.key(), from_text_input(&ev));
		if should_delete(&key, in_field) {
			graph.update(|g| {
				delete_selection_on_key(g, &key, in_field);
			});
		}
	});
	debug!("Delete key listener installed");
	on_cleanup(move || {
		handle.remove();
		debug!("Delete key listener removed");
	});
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::EditorConfig;
	use crate::graph::{EdgeId, GraphData};

	fn graph_with_selection() -> GraphState {
		let config = EditorConfig {
			seed: Some(5),
			..EditorConfig::default()
		};
		let mut g = GraphState::new(GraphData::seed(), &config);
		g.set_selected_edges([EdgeId::from("e1-2")].into());
		g
	}

	#[test]
	fn delete_and_backspace_delete() {
		assert!(should_delete("Delete", false));
		assert!(should_delete("Backspace", false));
	}

	#[test]
	fn other_keys_do_nothing() {
		for key in ["Enter", "Escape", "d", "Del", ""] {
			assert!(!should_delete(key, false), "{key}");
		}
	}

	#[test]
	fn typing_in_a_field_never_deletes_edges() {
		assert!(!should_delete("Backspace", true));
		assert!(!should_delete("Delete", true));
	}

	#[test]
	fn delete_key_removes_selected_edges() {
		let mut g = graph_with_selection();
		assert_eq!(delete_selection_on_key(&mut g, "Delete", false), 1);
		assert!(g.edges().is_empty());
		assert!(g.selected_edges().is_empty());
	}

	#[test]
	fn backspace_in_a_field_keeps_edges() {
		let mut g = graph_with_selection();
		assert_eq!(delete_selection_on_key(&mut g, "Backspace", true), 0);
		assert_eq!(delete_selection_on_key(&mut g, "Enter", false), 0);
		assert_eq!(g.edges().len(), 1);
		assert_eq!(g.selected_edges().len(), 1);
	}
}
