/// Data structures for Tab Organizer
use serde::{Deserialize, Serialize};

/// URL shown by a fresh, empty tab. Tabs on this page are "blank".
pub const NEW_TAB_URL: &str = "chrome://newtab/";

/// Snapshot of a browser tab. The browser owns the live tab; we only
/// read these fields and issue move/remove/update commands by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: i32,
    pub url: String,
    pub pinned: bool,
    pub window_id: i32,
}

impl TabInfo {
    pub fn new(id: i32, url: String, pinned: bool, window_id: i32) -> TabInfo {
        TabInfo {
            id,
            url,
            pinned,
            window_id,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.url == NEW_TAB_URL
    }
}

/// Snapshot of a browser window and the tabs it held when queried.
/// Fetched fresh for every operation; may be stale by the time
/// commands are issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    pub id: i32,
    pub incognito: bool,
    #[serde(default)]
    pub tabs: Vec<TabInfo>,
}

impl WindowSnapshot {
    pub fn pinned_tabs(&self) -> impl Iterator<Item = &TabInfo> {
        self.tabs.iter().filter(|tab| tab.pinned)
    }

    pub fn unpinned_tabs(&self) -> impl Iterator<Item = &TabInfo> {
        self.tabs.iter().filter(|tab| !tab.pinned)
    }

    pub fn has_pinned_tabs(&self) -> bool {
        self.tabs.iter().any(|tab| tab.pinned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_info_creation() {
        let tab = TabInfo::new(1, "https://google.com".to_string(), false, 7);

        assert_eq!(tab.id, 1);
        assert_eq!(tab.url, "https://google.com");
        assert_eq!(tab.pinned, false);
        assert_eq!(tab.window_id, 7);
    }

    #[test]
    fn test_blank_tab_detection() {
        let blank = TabInfo::new(1, NEW_TAB_URL.to_string(), false, 1);
        let page = TabInfo::new(2, "https://example.com".to_string(), false, 1);

        assert!(blank.is_blank());
        assert!(!page.is_blank());
    }

    #[test]
    fn test_window_pinned_split() {
        let window = WindowSnapshot {
            id: 1,
            incognito: false,
            tabs: vec![
                TabInfo::new(1, "https://a.com".to_string(), true, 1),
                TabInfo::new(2, "https://b.com".to_string(), false, 1),
                TabInfo::new(3, "https://c.com".to_string(), true, 1),
            ],
        };

        let pinned: Vec<i32> = window.pinned_tabs().map(|t| t.id).collect();
        let unpinned: Vec<i32> = window.unpinned_tabs().map(|t| t.id).collect();

        assert_eq!(pinned, vec![1, 3]);
        assert_eq!(unpinned, vec![2]);
        assert!(window.has_pinned_tabs());
    }

    #[test]
    fn test_deserialization_from_bridge_json() {
        let json = r#"{"id": 4, "incognito": false, "tabs": [
            {"id": 9, "url": "https://a.com/x", "pinned": true, "windowId": 4}
        ]}"#;
        let window: WindowSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(window.id, 4);
        assert_eq!(window.tabs.len(), 1);
        assert_eq!(window.tabs[0].window_id, 4);
        assert!(window.tabs[0].pinned);
    }

    #[test]
    fn test_deserialization_without_tabs() {
        // windows.getAll without populate omits the tabs array
        let json = r#"{"id": 2, "incognito": true}"#;
        let window: WindowSnapshot = serde_json::from_str(json).unwrap();

        assert!(window.incognito);
        assert!(window.tabs.is_empty());
    }
}
