// Console logging shared by the game modules.

#[cfg(target_arch = "wasm32")]
pub fn clog(msg: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clog(msg: &str) {
    eprintln!("{msg}");
}

/// Seed for the game RNG, taken from the browser's Math.random.
pub fn browser_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}
