//! Editor variants and tunables, overridable from the URL query string.

use std::ops::Range;
use std::str::FromStr;

use log::warn;

/// Gesture that opens the inline label editor on a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditTrigger {
	#[default]
	DoubleClick,
	ContextMenu,
}

impl FromStr for EditTrigger {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"dblclick" | "doubleclick" => Ok(Self::DoubleClick),
			"contextmenu" | "rightclick" => Ok(Self::ContextMenu),
			_ => Err(()),
		}
	}
}

/// How the user draws a new relationship.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectMode {
	/// Drag from a node handle and release over the target node.
	#[default]
	DragHandle,
	/// Click the source node, then click the target node.
	ClickPair,
}

impl FromStr for ConnectMode {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"drag" => Ok(Self::DragHandle),
			"click" => Ok(Self::ClickPair),
			_ => Err(()),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
	/// New nodes appear uniformly inside this region, in graph coordinates.
	pub spawn_x: Range<f64>,
	pub spawn_y: Range<f64>,
	pub edit_trigger: EditTrigger,
	pub connect_mode: ConnectMode,
	pub nodes_draggable: bool,
	/// Emphasize a clicked node's edges and dim the rest.
	pub highlight_on_click: bool,
	/// Fixed RNG seed; the clock is used when unset.
	pub seed: Option<u64>,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			spawn_x: 100.0..500.0,
			spawn_y: 100.0..300.0,
			edit_trigger: EditTrigger::default(),
			connect_mode: ConnectMode::default(),
			nodes_draggable: true,
			highlight_on_click: true,
			seed: None,
		}
	}
}

impl EditorConfig {
	/// Applies `edit`, `connect`, `drag`, `highlight` and `seed` overrides
	/// looked up through `param`. Unparseable values keep the default.
	pub fn from_params(param: impl Fn(&str) -> Option<String>) -> Self {
		let mut config = Self::default();
		if let Some(v) = parse(&param, "edit") {
			config.edit_trigger = v;
		}
		if let Some(v) = parse(&param, "connect") {
			config.connect_mode = v;
		}
		if let Some(v) = parse(&param, "drag") {
			config.nodes_draggable = v;
		}
		if let Some(v) = parse(&param, "highlight") {
			config.highlight_on_click = v;
		}
		config.seed = parse(&param, "seed");
		config
	}
}

fn parse<T: FromStr>(param: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
	let raw = param(key)?;
	let parsed = raw.parse().ok();
	if parsed.is_none() {
		warn!("Ignoring invalid value {raw:?} for `{key}`");
	}
	parsed
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn config_from(pairs: &[(&str, &str)]) -> EditorConfig {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|&(k, v)| (k.to_string(), v.to_string()))
			.collect();
		EditorConfig::from_params(|k| map.get(k).cloned())
	}

	#[test]
	fn no_params_is_default() {
		assert_eq!(config_from(&[]), EditorConfig::default());
	}

	#[test]
	fn click_to_connect_variant() {
		let config = config_from(&[("connect", "click"), ("drag", "false"), ("edit", "dblclick")]);
		assert_eq!(config.connect_mode, ConnectMode::ClickPair);
		assert!(!config.nodes_draggable);
		assert_eq!(config.edit_trigger, EditTrigger::DoubleClick);
	}

	#[test]
	fn right_click_variant_with_seed() {
		let config = config_from(&[("edit", "contextmenu"), ("seed", "42")]);
		assert_eq!(config.edit_trigger, EditTrigger::ContextMenu);
		assert_eq!(config.seed, Some(42));
	}

	#[test]
	fn invalid_values_fall_back() {
		let config = config_from(&[("connect", "telepathy"), ("highlight", "maybe"), ("seed", "x")]);
		assert_eq!(config.connect_mode, ConnectMode::DragHandle);
		assert!(config.highlight_on_click);
		assert_eq!(config.seed, None);
	}
}
