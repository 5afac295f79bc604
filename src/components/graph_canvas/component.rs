use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::ev;
use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent, Window,
};

use super::error::CanvasError;
use super::render;
use super::state::{CanvasEvent, CanvasState};
use crate::components::editable_node::EditorAnchor;
use crate::config::{EditTrigger, EditorConfig};
use crate::graph::{GraphState, NodeId};

fn window_size(window: &Window) -> Result<(f64, f64), CanvasError> {
	let w = window.inner_width().ok().and_then(|v| v.as_f64());
	let h = window.inner_height().ok().and_then(|v| v.as_f64());
	w.zip(h).ok_or(CanvasError::WindowSize)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, CanvasError> {
	canvas
		.get_context("2d")
		.map_err(CanvasError::context_request)?
		.ok_or(CanvasError::NoContext)?
		.dyn_into()
		.map_err(|_| CanvasError::NoContext)
}

/// Canvas size: the window for fullscreen canvases, otherwise the explicit
/// size or the parent element's.
fn measure(
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> Result<(f64, f64), CanvasError> {
	if fullscreen {
		let window = web_sys::window().ok_or(CanvasError::NoWindow)?;
		return window_size(&window);
	}
	let parent = canvas.parent_element();
	Ok((
		width.unwrap_or_else(|| parent.as_ref().map_or(800.0, |p| p.client_width() as f64)),
		height.unwrap_or_else(|| parent.as_ref().map_or(600.0, |p| p.client_height() as f64)),
	))
}

/// Pointer position relative to the canvas' top-left corner.
fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Applies canvas events to the graph. Returns the node that asked to be
/// edited, if any.
fn apply_events(graph: RwSignal<GraphState>, config: &EditorConfig, events: Vec<CanvasEvent>) -> Option<NodeId> {
	let mut edit = None;
	for event in events {
		match event {
			CanvasEvent::NodeMoved { node, position } => graph.update(|g| {
				g.move_node(node, position);
			}),
			CanvasEvent::NodeClicked(node) => {
				if config.highlight_on_click {
					graph.update(|g| g.highlight_edges_for_node(node));
				}
			}
			CanvasEvent::Connect { source, target } => graph.update(|g| {
				g.connect_active(source, target);
			}),
			CanvasEvent::Reconnect {
				edge,
				source,
				target,
			} => graph.update(|g| {
				g.reconnect(&edge, source, target);
			}),
			CanvasEvent::SelectionChanged(ids) => {
				debug!("Edge selection: {} edge(s)", ids.len());
				graph.update(|g| g.set_selected_edges(ids));
			}
			CanvasEvent::EditRequested(node) => {
				if graph.try_update(|g| g.set_node_editing(node, true)) == Some(true) {
					edit = Some(node);
				}
			}
		}
	}
	edit
}

/// Interactive relationship-graph canvas: draws the graph every animation
/// frame and turns pointer gestures into graph mutations.
#[component]
pub fn GraphCanvas(
	graph: RwSignal<GraphState>,
	config: EditorConfig,
	/// Mirrors the click-to-connect source so the toolbar can show it.
	pending: RwSignal<Option<NodeId>>,
	/// Where the inline label editor should appear.
	editor_anchor: RwSignal<Option<EditorAnchor>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let running = Arc::new(AtomicBool::new(true));
	let config = Rc::new(config);

	let running_cleanup = running.clone();
	on_cleanup(move || running_cleanup.store(false, Ordering::Relaxed));

	let (state_init, animate_init, config_init) = (state.clone(), animate.clone(), config.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let window = match web_sys::window().ok_or(CanvasError::NoWindow) {
			Ok(window) => window,
			Err(err) => {
				error!("Graph canvas disabled: {err}");
				return;
			}
		};

		let ((w, h), ctx) = match measure(&canvas, fullscreen, width, height)
			.and_then(|size| Ok((size, context_2d(&canvas)?)))
		{
			Ok(v) => v,
			Err(err) => {
				error!("Graph canvas disabled: {err}");
				return;
			}
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let mut canvas_state = CanvasState::new(w, h, config_init.connect_mode, config_init.nodes_draggable);
		graph.with_untracked(|g| canvas_state.fit_view(g));
		*state_init.borrow_mut() = Some(canvas_state);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		let resize = window_event_listener(ev::resize, move |_| {
			let Ok((nw, nh)) = measure(&canvas_resize, fullscreen, width, height) else {
				return;
			};
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		});
		on_cleanup(move || resize.remove());

		let (state_anim, animate_inner, running_anim) =
			(state_init.clone(), animate_init.clone(), running.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !running_anim.load(Ordering::Relaxed) {
				return;
			}
			if let Some(ref s) = *state_anim.borrow() {
				let _ = graph.try_with_untracked(|g| render::render(s, g, &ctx));
				let _ = HtmlElement::style(&canvas).set_property("cursor", s.cursor());
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let handles = CanvasHandles {
		state: state.clone(),
		config: config.clone(),
		graph,
		pending,
		editor_anchor,
	};

	let on_mousedown = {
		let handles = handles.clone();
		move |ev: MouseEvent| {
			if ev.button() != 0 {
				return;
			}
			let Some(canvas) = canvas_ref.get() else {
				return;
			};
			let (x, y) = local_point(&canvas, &ev);
			handles.dispatch(|s, g| s.pointer_down(g, x, y, ev.shift_key()));
		}
	};

	let on_mousemove = {
		let handles = handles.clone();
		move |ev: MouseEvent| {
			let Some(canvas) = canvas_ref.get() else {
				return;
			};
			let (x, y) = local_point(&canvas, &ev);
			handles.dispatch(|s, g| s.pointer_move(g, x, y));
		}
	};

	let on_mouseup = {
		let handles = handles.clone();
		move |ev: MouseEvent| {
			let Some(canvas) = canvas_ref.get() else {
				return;
			};
			let (x, y) = local_point(&canvas, &ev);
			handles.dispatch(|s, g| s.pointer_up(g, x, y));
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let handles_wheel = handles.clone();
	let edit_trigger = config.edit_trigger;
	let edit_gesture = move |ev: &MouseEvent, trigger: EditTrigger| {
		if trigger != edit_trigger {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_point(&canvas, ev);
		handles.dispatch(|s, g| s.edit_gesture(g, x, y).into_iter().collect());
	};
	let on_dblclick = {
		let edit_gesture = edit_gesture.clone();
		move |ev: MouseEvent| edit_gesture(&ev, EditTrigger::DoubleClick)
	};
	let on_contextmenu = move |ev: MouseEvent| {
		if edit_trigger == EditTrigger::ContextMenu {
			ev.prevent_default();
		}
		edit_gesture(&ev, EditTrigger::ContextMenu);
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_point(&canvas, &ev);
		if let Some(ref mut s) = *handles_wheel.state.borrow_mut() {
			s.zoom(x, y, ev.delta_y());
		}
		handles_wheel.follow_editor();
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:contextmenu=on_contextmenu
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

/// Shared pieces every pointer handler needs.
#[derive(Clone)]
struct CanvasHandles {
	state: Rc<RefCell<Option<CanvasState>>>,
	config: Rc<EditorConfig>,
	graph: RwSignal<GraphState>,
	pending: RwSignal<Option<NodeId>>,
	editor_anchor: RwSignal<Option<EditorAnchor>>,
}

impl CanvasHandles {
	/// Runs a gesture against the canvas state, then applies what it produced.
	/// The canvas borrow is released before the graph signal is written.
	fn dispatch(&self, gesture: impl FnOnce(&mut CanvasState, &GraphState) -> Vec<CanvasEvent>) {
		let events = {
			let mut guard = self.state.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			let events = self.graph.with_untracked(|g| gesture(s, g));
			if self.pending.get_untracked() != s.pending_source {
				self.pending.set(s.pending_source);
			}
			events
		};
		if let Some(node) = apply_events(self.graph, &self.config, events) {
			self.open_editor(node);
		}
	}

	/// Keeps an open inline editor over its node after the view moved.
	fn follow_editor(&self) {
		if let Some(node) = self.graph.with_untracked(|g| g.editing()) {
			self.open_editor(node);
		}
	}

	/// Positions the inline editor over `node` in canvas coordinates.
	fn open_editor(&self, node: NodeId) {
		let guard = self.state.borrow();
		let Some(s) = guard.as_ref() else {
			return;
		};
		let Some(rect) = self.graph.with_untracked(|g| s.screen_rect(g, node)) else {
			return;
		};
		self.editor_anchor.set(Some(EditorAnchor {
			left: rect.x,
			top: rect.y,
			width: rect.w,
			height: rect.h,
		}));
	}
}
