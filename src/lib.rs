#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;
pub mod background;
pub mod profile;
pub mod view_mode;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"console logger already initialized".into());
    }
    leptos::mount::hydrate_body(App);
}
