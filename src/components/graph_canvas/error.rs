use wasm_bindgen::JsValue;

/// Failures while wiring the canvas to the browser.
#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
	#[error("no global `window` object")]
	NoWindow,

	#[error("window reported an unusable inner size")]
	WindowSize,

	#[error("failed to request a 2d context: {0}")]
	ContextRequest(String),

	#[error("canvas has no 2d context")]
	NoContext,
}

impl CanvasError {
	pub(super) fn context_request(err: JsValue) -> Self {
		Self::ContextRequest(format!("{err:?}"))
	}
}
