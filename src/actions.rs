/// The user-facing action set. Each variant maps one-to-one to an organizer
/// operation; the context menu and the popup both dispatch through here.

use crate::organize::{ConsolidateMode, OrganizePolicy};
use crate::organizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Collate,
    ConsolidateAll,
    ConsolidateUnpinned,
    Deduplicate,
    SortWindow,
    CloseDomain,
    CloseBlank,
    FocusAllWindows,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Collate,
        Action::ConsolidateAll,
        Action::ConsolidateUnpinned,
        Action::Deduplicate,
        Action::SortWindow,
        Action::CloseDomain,
        Action::CloseBlank,
        Action::FocusAllWindows,
    ];

    /// Stable identifier, used as the context-menu item id.
    pub fn id(self) -> &'static str {
        match self {
            Action::Collate => "collateTabs",
            Action::ConsolidateAll => "consolidateAllTabs",
            Action::ConsolidateUnpinned => "consolidatePinnedTabs",
            Action::Deduplicate => "deduplicateTabs",
            Action::SortWindow => "sortWindowTabs",
            Action::CloseDomain => "closeDomainTabs",
            Action::CloseBlank => "closeBlankTabs",
            Action::FocusAllWindows => "focusAllWindows",
        }
    }

    /// Display name shown in menus and on popup buttons.
    pub fn label(self) -> &'static str {
        match self {
            Action::Collate => "Collate Tabs",
            Action::ConsolidateAll => "Consolidate All Tabs",
            Action::ConsolidateUnpinned => "Consolidate Pinned vs Unpinned Tabs",
            Action::Deduplicate => "Deduplicate Tabs",
            Action::SortWindow => "Sort Tabs in Window",
            Action::CloseDomain => "Close All Tabs from this Domain",
            Action::CloseBlank => "Close Blank Tabs",
            Action::FocusAllWindows => "Bring All Windows To Front",
        }
    }

    pub fn from_id(id: &str) -> Option<Action> {
        Action::ALL.iter().copied().find(|action| action.id() == id)
    }

    pub async fn run(self) -> Result<(), String> {
        let policy = OrganizePolicy::default();
        match self {
            Action::Collate => organizer::collate_tabs(policy).await,
            Action::ConsolidateAll => {
                organizer::consolidate_tabs(ConsolidateMode::AllTabs, policy).await
            }
            Action::ConsolidateUnpinned => {
                organizer::consolidate_tabs(ConsolidateMode::UnpinnedOnly, policy).await
            }
            Action::Deduplicate => organizer::deduplicate_tabs().await,
            Action::SortWindow => organizer::sort_window_tabs().await,
            Action::CloseDomain => organizer::close_domain_tabs().await,
            Action::CloseBlank => organizer::close_blank_tabs().await,
            Action::FocusAllWindows => organizer::focus_all_windows().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_id(action.id()), Some(action));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = Action::ALL.iter().map(|a| a.id()).collect();
        assert_eq!(ids.len(), Action::ALL.len());
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        assert_eq!(Action::from_id("closeOrphans"), None);
        assert_eq!(Action::from_id(""), None);
    }
}
