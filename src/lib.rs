//! Drama graph: a client-side editor for who-relates-to-whom graphs.
//!
//! Characters are boxes on a canvas; relationships are typed, colored,
//! directed edges between them. Everything lives in the browser session.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod clock;
mod components;
mod config;
mod graph;
mod pages;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Routes `log` to the browser console and installs the panic hook.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("drama-graph {} starting", env!("CARGO_PKG_VERSION"));
}

/// Page shell: document metadata plus the editor route. Editor variants are
/// chosen through the query string of `/`.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Drama Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta name="description" content="Map characters and their relationships" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
