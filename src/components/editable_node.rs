use leptos::html;
use leptos::prelude::*;
use web_sys::{FocusEvent, HtmlInputElement, KeyboardEvent};

use crate::graph::{GraphState, NodeId};

/// Screen-space box of the node being edited, relative to the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorAnchor {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl EditorAnchor {
	fn style(&self) -> String {
		format!(
			"left: {}px; top: {}px; width: {}px; height: {}px;",
			self.left, self.top, self.width, self.height
		)
	}
}

/// Inline label editor shown over whichever node is in edit mode.
#[component]
pub fn EditableNodeView(
	graph: RwSignal<GraphState>,
	anchor: RwSignal<Option<EditorAnchor>>,
) -> impl IntoView {
	// Dragging or relabeling other nodes must not rebuild the open input.
	let editing = Memo::new(move |_| graph.with(|g| g.editing()));

	move || {
		let node = editing.get()?;
		let rect = anchor.get()?;
		let label = graph.with_untracked(|g| g.node(node).map(|n| n.label.clone()))?;
		Some(view! { <NodeLabelInput graph=graph node=node label=label rect=rect /> })
	}
}

#[component]
fn NodeLabelInput(
	graph: RwSignal<GraphState>,
	node: NodeId,
	label: String,
	rect: EditorAnchor,
) -> impl IntoView {
	let input_ref = NodeRef::<html::Input>::new();

	Effect::new(move |_| {
		if let Some(input) = input_ref.get() {
			let _ = input.focus();
			input.select();
		}
	});

	// Blur is the single commit point; Enter just blurs.
	let on_blur = move |ev: FocusEvent| {
		let text = event_target_value(&ev);
		graph.update(|g| {
			g.commit_edit(node, &text);
		});
	};

	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" {
			let _ = event_target::<HtmlInputElement>(&ev).blur();
		}
	};

	view! {
		<div class="node-editor" style=rect.style()>
			<input
				node_ref=input_ref
				type="text"
				prop:value=label
				on:blur=on_blur
				on:keydown=on_keydown
			/>
		</div>
	}
}
