use indexmap::IndexMap;
use rand::Rng;

use super::types::FALLBACK_COLOR;

/// Relationship types shipped with every new editor, in selector order.
pub const DEFAULT_RELATIONSHIPS: &[(&str, &str)] =
	&[("dating", "pink"), ("hate", "red"), ("friends", "lightblue")];

/// Relationship type name to display color. Grows, never shrinks.
#[derive(Clone, Debug)]
pub struct RelationshipRegistry {
	types: IndexMap<String, String>,
}

impl Default for RelationshipRegistry {
	fn default() -> Self {
		Self {
			types: DEFAULT_RELATIONSHIPS
				.iter()
				.map(|&(name, color)| (name.to_string(), color.to_string()))
				.collect(),
		}
	}
}

impl RelationshipRegistry {
	/// Registers `name` unless it is empty or already known. The first
	/// registration of a name wins; its color is never overwritten.
	///
	/// Returns `true` when the registry grew.
	pub fn register(&mut self, name: &str, color: String) -> bool {
		if name.is_empty() || self.types.contains_key(name) {
			return false;
		}
		self.types.insert(name.to_string(), color);
		true
	}

	pub fn contains(&self, name: &str) -> bool {
		self.types.contains_key(name)
	}

	pub fn color(&self, name: &str) -> Option<&str> {
		self.types.get(name).map(String::as_str)
	}

	/// Registry color of `name`, or gray for unknown types.
	pub fn color_or_fallback(&self, name: &str) -> &str {
		self.color(name).unwrap_or(FALLBACK_COLOR)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.types.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}
}

/// A random `#rrggbb` color.
pub fn random_color(rng: &mut impl Rng) -> String {
	format!("#{:06x}", rng.random_range(0..=0xff_ffff_u32))
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	#[test]
	fn seeded_with_default_types_in_order() {
		let reg = RelationshipRegistry::default();
		let names: Vec<_> = reg.names().collect();
		assert_eq!(names, ["dating", "hate", "friends"]);
		assert_eq!(reg.color("hate"), Some("red"));
	}

	#[test]
	fn first_registration_wins() {
		let mut reg = RelationshipRegistry::default();
		assert!(!reg.register("dating", "#000000".into()));
		assert_eq!(reg.color("dating"), Some("pink"));
		assert_eq!(reg.len(), 3);
	}

	#[test]
	fn empty_name_is_ignored() {
		let mut reg = RelationshipRegistry::default();
		assert!(!reg.register("", "#123456".into()));
		assert_eq!(reg.len(), 3);
	}

	#[test]
	fn new_types_append() {
		let mut reg = RelationshipRegistry::default();
		assert!(reg.register("rivals", "#abcdef".into()));
		assert_eq!(reg.names().last(), Some("rivals"));
		assert_eq!(reg.color_or_fallback("rivals"), "#abcdef");
		assert_eq!(reg.color_or_fallback("unknown"), "gray");
	}

	#[test]
	fn random_colors_are_six_hex_digits() {
		let mut rng = SmallRng::seed_from_u64(7);
		for _ in 0..64 {
			let c = random_color(&mut rng);
			assert_eq!(c.len(), 7);
			assert!(c.starts_with('#'));
			assert!(c[1..].chars().all(|ch| ch.is_ascii_hexdigit()));
		}
	}
}
