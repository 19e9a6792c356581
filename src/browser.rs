/// Browser bridge: typed access to chrome.windows / chrome.tabs through the
/// extension's JS glue, plus the executor that turns a plan into host calls.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::organize::Command;
use crate::tab_data::{NEW_TAB_URL, TabInfo, WindowSnapshot};

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryWindows(populate: bool, include_popups: bool) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryTabs(query: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createWindow() -> Result<JsValue, JsValue>;

    // windowId -1 keeps each tab in its current window
    #[wasm_bindgen(catch)]
    async fn moveTabs(tab_ids: JsValue, window_id: i32, index: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeTabs(tab_ids: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn pinTab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn focusWindow(window_id: i32, left: i32, top: i32) -> Result<(), JsValue>;
}

/// Filters for a chrome.tabs.query call. Unset fields are omitted from the
/// query object so the host applies no filter for them.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_window: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Query all open windows, without tabs populated. Popup windows are only
/// included when asked for (the focus-all action wants them).
pub async fn query_windows(include_popups: bool) -> Result<Vec<WindowSnapshot>, String> {
    let windows_js = queryWindows(false, include_popups)
        .await
        .map_err(|e| format!("Failed to query windows: {:?}", e))?;
    serde_wasm_bindgen::from_value(windows_js)
        .map_err(|e| format!("Failed to parse windows: {:?}", e))
}

pub async fn query_tabs(query: &TabQuery) -> Result<Vec<TabInfo>, String> {
    let query_js = serde_wasm_bindgen::to_value(query)
        .map_err(|e| format!("Failed to serialize query: {:?}", e))?;
    let tabs_js = queryTabs(query_js)
        .await
        .map_err(|e| format!("Failed to query tabs: {:?}", e))?;
    serde_wasm_bindgen::from_value(tabs_js)
        .map_err(|e| format!("Failed to parse tabs: {:?}", e))
}

/// Every tab in every window.
pub async fn all_tabs() -> Result<Vec<TabInfo>, String> {
    query_tabs(&TabQuery::default()).await
}

/// Tabs of the window the popup was opened from.
pub async fn current_window_tabs() -> Result<Vec<TabInfo>, String> {
    query_tabs(&TabQuery {
        current_window: Some(true),
        ..Default::default()
    })
    .await
}

/// The active tab of the current window, if any.
pub async fn active_tab() -> Result<Option<TabInfo>, String> {
    let tabs = query_tabs(&TabQuery {
        active: Some(true),
        current_window: Some(true),
        ..Default::default()
    })
    .await?;
    Ok(tabs.into_iter().next())
}

/// Run a plan command by command, in order. A failed command is logged and
/// skipped; the rest of the plan still runs, so the cleanup steps at the
/// tail execute even after a partial move failure.
pub async fn execute_plan(plan: Vec<Command>) -> Result<(), String> {
    for command in plan {
        if let Err(e) = execute_command(&command).await {
            log::warn!("Command failed, continuing: {}", e);
        }
    }
    Ok(())
}

async fn execute_command(command: &Command) -> Result<(), String> {
    match command {
        Command::OpenWindowWith { tab_ids } => move_to_new_window(tab_ids).await,
        Command::MoveToEnd { tab_ids } => {
            let ids_js = serialize_ids(tab_ids)?;
            moveTabs(ids_js, -1, -1)
                .await
                .map_err(|e| format!("Failed to move tabs: {:?}", e))
        }
        Command::CloseTabs { tab_ids } => {
            log::info!("Closing {} tabs", tab_ids.len());
            remove_tabs(tab_ids).await
        }
        Command::CloseBlankTabs => close_blank_leftovers().await,
        Command::Repin { tab_ids } => repin_tabs(tab_ids).await,
        Command::FocusWindow {
            window_id,
            left,
            top,
        } => focusWindow(*window_id, *left, *top)
            .await
            .map_err(|e| format!("Failed to focus window {}: {:?}", window_id, e)),
    }
}

/// Create a fresh window and move the given tabs into it, anchored at the
/// end of the strip. Moving across windows drops the pinned flag; callers
/// that care follow up with a repin command.
async fn move_to_new_window(tab_ids: &[i32]) -> Result<(), String> {
    let window_js = createWindow()
        .await
        .map_err(|e| format!("Failed to create window: {:?}", e))?;
    let window: WindowSnapshot = serde_wasm_bindgen::from_value(window_js)
        .map_err(|e| format!("Failed to parse created window: {:?}", e))?;

    log::info!("Moving {} tabs into new window {}", tab_ids.len(), window.id);

    let ids_js = serialize_ids(tab_ids)?;
    moveTabs(ids_js, window.id, -1)
        .await
        .map_err(|e| format!("Failed to move tabs: {:?}", e))
}

/// The moves above leave blank new-tab pages behind in the old windows, so
/// this queries live state rather than trusting the snapshot.
async fn close_blank_leftovers() -> Result<(), String> {
    let tabs = query_tabs(&TabQuery {
        url: Some(NEW_TAB_URL.to_string()),
        ..Default::default()
    })
    .await?;

    if tabs.is_empty() {
        return Ok(());
    }

    let tab_ids: Vec<i32> = tabs.iter().map(|t| t.id).collect();
    log::info!("Closing {} leftover blank tabs", tab_ids.len());
    remove_tabs(&tab_ids).await
}

async fn remove_tabs(tab_ids: &[i32]) -> Result<(), String> {
    let ids_js = serialize_ids(tab_ids)?;
    removeTabs(ids_js)
        .await
        .map_err(|e| format!("Failed to remove tabs: {:?}", e))
}

async fn repin_tabs(tab_ids: &[i32]) -> Result<(), String> {
    for tab_id in tab_ids {
        if let Err(e) = pinTab(*tab_id).await {
            // the tab may have gone away since the snapshot
            log::warn!("Failed to re-pin tab {}: {:?}", tab_id, e);
        }
    }
    Ok(())
}

fn serialize_ids(tab_ids: &[i32]) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(tab_ids)
        .map_err(|e| format!("Failed to serialize tab ids: {:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_query_omits_unset_filters() {
        let query = TabQuery::default();
        let json = serde_json::to_string(&query).unwrap();

        assert_eq!(json, "{}");
    }

    #[test]
    fn test_tab_query_serializes_camel_case() {
        let query = TabQuery {
            window_id: Some(3),
            current_window: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_string(&query).unwrap();

        assert_eq!(json, r#"{"windowId":3,"currentWindow":true}"#);
    }
}
