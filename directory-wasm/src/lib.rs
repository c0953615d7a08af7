//! Браузерный интерфейс администратора Directory Service (Leptos, CSR).
//!
//! Состояния страниц, debounce поиска и формы не зависят от Leptos и
//! собираются под любой target; компоненты и HTTP-слой только под `wasm32`.

pub mod debounce;
pub mod error;
pub mod forms;
pub mod models;
pub mod overlay;
pub mod state;

#[cfg(target_arch = "wasm32")]
mod api;
#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod logging;

#[cfg(target_arch = "wasm32")]
const LOG_LEVEL: &str = match option_env!("DIRECTORY_LOG_LEVEL") {
    Some(value) => value,
    None => "info",
};

#[cfg(target_arch = "wasm32")]
pub fn mount() {
    console_error_panic_hook::set_once();
    logging::init_logging(LOG_LEVEL);
    leptos::mount::mount_to_body(app::App);
}
