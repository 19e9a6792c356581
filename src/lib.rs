/// Tab Organizer - Chrome Extension for grouping, sorting and pruning tabs
/// Built with Rust + WASM + Yew

pub mod actions;
mod browser;
pub mod hostname;
pub mod organize;
mod organizer;
pub mod tab_data;
pub mod ui;

use wasm_bindgen::prelude::*;

use actions::Action;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Run one organizer action by its identifier. The background script's
/// context-menu click handler passes the clicked menu item id through here.
#[wasm_bindgen]
pub async fn run_action(action_id: String) -> Result<(), JsValue> {
    match Action::from_id(&action_id) {
        Some(action) => action.run().await.map_err(|e| JsValue::from_str(&e)),
        None => Err(JsValue::from_str(&format!(
            "No action for id '{}'",
            action_id
        ))),
    }
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
