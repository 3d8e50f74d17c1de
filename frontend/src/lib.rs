pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

use state::session::Session;

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        log::warn!("Logger already initialised");
    }
    console_error_panic_hook::set_once();
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    init_logging();
    log::info!("Starting HRDesk frontend");

    leptos::spawn_local(async move {
        config::init().await;
        log::debug!("Runtime config initialised");
    });

    let session = Session::from_window();
    if session.user_id.is_none() {
        log::warn!("No signed-in user in the host session");
    }
    router::mount_app(session);
}
