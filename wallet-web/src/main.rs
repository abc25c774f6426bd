//! Browser front end for the agent engine
//!
//! Connects to the injected LUKSO wallet and renders the connected agent's on-chain state.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

mod app;
mod components;
mod pages;
mod services;
mod state;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Agent Social wallet starting");

    hide_loading_screen();
    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Hide the static loading element from index.html once the app is up.
pub(crate) fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        log::warn!("No document available");
        return;
    };

    let Some(loading) = document.get_element_by_id("leptos-loading") else {
        return;
    };

    if let Some(element) = loading.dyn_ref::<HtmlElement>() {
        if let Err(e) = element.class_list().add_1("hidden") {
            log::warn!("Failed to hide loading screen: {:?}", e);
        }
    }
    loading.set_attribute("style", "display: none !important;").ok();
}
