//! Wall-clock milliseconds for edge id stamps and RNG seeding.

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> u64 {
	js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> u64 {
	std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.map(|d| d.as_millis() as u64)
		.unwrap_or_default()
}
