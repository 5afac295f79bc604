use leptos::ev;
use leptos::prelude::*;
use web_sys::KeyboardEvent;

use crate::graph::{GraphState, NodeId};

/// Add-node button, relationship selector and new-type form.
#[component]
pub fn Toolbar(
	graph: RwSignal<GraphState>,
	/// Source node picked in click-to-connect mode.
	#[prop(into)]
	pending: Signal<Option<NodeId>>,
) -> impl IntoView {
	let new_type = RwSignal::new(String::new());

	let add_node = move |_: ev::MouseEvent| {
		graph.update(|g| {
			g.add_node();
		});
	};

	let add_type = move || {
		let mut added = false;
		let name = new_type.get_untracked();
		graph.update(|g| added = g.add_relationship_type(&name));
		if added {
			new_type.set(String::new());
		}
	};

	let types = Memo::new(move |_| {
		graph.with(|g| g.registry().names().map(str::to_string).collect::<Vec<_>>())
	});
	let active = Memo::new(move |_| graph.with(|g| g.active_type().to_string()));
	let pending_label = move || {
		let node = pending.get()?;
		graph.with(|g| g.node(node).map(|n| n.label.clone()))
	};

	view! {
		<div class="toolbar">
			<button on:click=add_node>"➕ Add Node"</button>
			<label>
				"Relationship:"
				<select
					prop:value=move || active.get()
					on:change=move |ev| {
						let name = event_target_value(&ev);
						graph.update(|g| {
							g.set_active_type(&name);
						});
					}
				>
					{move || {
						types
							.get()
							.into_iter()
							.map(|name| {
								let selected = name == active.get_untracked();
								let value = name.clone();
								view! {
									<option value=value selected=selected>
										{name}
									</option>
								}
							})
							.collect_view()
					}}
				</select>
			</label>
			<input
				type="text"
				placeholder="New type"
				prop:value=move || new_type.get()
				on:input=move |ev| new_type.set(event_target_value(&ev))
				on:keydown=move |ev: KeyboardEvent| {
					if ev.key() == "Enter" {
						add_type();
					}
				}
			/>
			<button on:click=move |_| add_type()>"Add Type"</button>
			{move || {
				pending_label().map(|label| view! { <span class="pending">"Selected: " {label}</span> })
			}}
		</div>
	}
}
