/// Tab organizing operations: sorting, grouping, deduplication, etc.
///
/// Each operation is a pure function from window/tab snapshots to a plan of
/// host commands, so the whole module runs under plain `cargo test` with no
/// browser in sight. Executing a plan is the `browser` module's job.

use std::collections::{BTreeMap, HashSet};

use crate::hostname::{host_matcher, host_of, without_fragment};
use crate::tab_data::{TabInfo, WindowSnapshot};

/// Horizontal and vertical cascade step for "focus all windows".
pub const CASCADE_OFFSET_PX: i32 = 40;

/// A single command against the browser's tab/window surface.
///
/// Commands are issued best-effort and in order; a failure for one tab or
/// one command does not stop the rest of the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new window and move the given tabs into it, in order.
    OpenWindowWith { tab_ids: Vec<i32> },
    /// Move the given tabs to the end of their current window, in order.
    MoveToEnd { tab_ids: Vec<i32> },
    /// Close the given tabs in one batch.
    CloseTabs { tab_ids: Vec<i32> },
    /// Re-query blank tabs and close whatever turns up. Runs against live
    /// state because the moves before it leave fresh blanks behind.
    CloseBlankTabs,
    /// Restore the pinned flag on tabs that moving across windows unpinned.
    Repin { tab_ids: Vec<i32> },
    /// Bring a window to the front at the given position.
    FocusWindow { window_id: i32, left: i32, top: i32 },
}

/// Request-scoped policy for collate/consolidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizePolicy {
    /// Skip any window that contains a pinned tab. Off by default.
    pub skip_pinned_windows: bool,
}

/// Which tabs consolidate gathers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsolidateMode {
    /// Pinned tabs come along (in window order, unsorted) ahead of the
    /// URL-sorted unpinned tabs, and get re-pinned after the move.
    AllTabs,
    /// Pinned tabs stay where they are.
    UnpinnedOnly,
}

fn compare_tab_urls(a: &&TabInfo, b: &&TabInfo) -> std::cmp::Ordering {
    a.url.cmp(&b.url)
}

/// Group tabs into new windows by URL host.
///
/// Unpinned tabs of every non-incognito window are bucketed by host; URLs
/// that fail the host rule (e.g. `chrome://newtab/`) are left out. Every
/// bucket with two or more tabs becomes its own new window, sorted by URL.
/// Hosts with a single tab are pooled into one extra window. Blank leftovers
/// are closed once all moves are planned.
pub fn collate(windows: &[WindowSnapshot], policy: OrganizePolicy) -> Vec<Command> {
    let mut buckets: BTreeMap<String, Vec<&TabInfo>> = BTreeMap::new();

    for window in windows.iter().filter(|w| !w.incognito) {
        if policy.skip_pinned_windows && window.has_pinned_tabs() {
            log::debug!("collate: skipping window {} (has pinned tabs)", window.id);
            continue;
        }
        for tab in window.unpinned_tabs() {
            match host_of(&tab.url) {
                Some(host) => buckets.entry(host).or_default().push(tab),
                // skip non-matching URLs, e.g. chrome://newtab/
                None => {}
            }
        }
    }

    let mut plan = Vec::new();
    let mut singles: Vec<i32> = Vec::new();

    for (_, mut tabs) in buckets {
        if tabs.len() == 1 {
            singles.push(tabs[0].id);
        } else {
            tabs.sort_by(compare_tab_urls);
            plan.push(Command::OpenWindowWith {
                tab_ids: tabs.iter().map(|t| t.id).collect(),
            });
        }
    }

    // Singleton hosts share one window rather than getting one each.
    if !singles.is_empty() {
        plan.push(Command::OpenWindowWith { tab_ids: singles });
    }

    if !plan.is_empty() {
        plan.push(Command::CloseBlankTabs);
    }

    plan
}

/// Merge tabs from every non-incognito window into one new window.
///
/// Windows are processed in ascending id order so reruns gather tabs the
/// same way. Unpinned tabs that pass the host rule are sorted by URL; in
/// [`ConsolidateMode::AllTabs`] the pinned tabs are prepended unsorted and
/// re-pinned afterwards, since a cross-window move drops the pinned flag.
pub fn consolidate(
    windows: &[WindowSnapshot],
    mode: ConsolidateMode,
    policy: OrganizePolicy,
) -> Vec<Command> {
    let mut ordered: Vec<&WindowSnapshot> =
        windows.iter().filter(|w| !w.incognito).collect();
    ordered.sort_by_key(|w| w.id);

    let mut pinned: Vec<&TabInfo> = Vec::new();
    let mut unpinned: Vec<&TabInfo> = Vec::new();

    for window in ordered {
        if policy.skip_pinned_windows && window.has_pinned_tabs() {
            log::debug!("consolidate: skipping window {} (has pinned tabs)", window.id);
            continue;
        }
        if mode == ConsolidateMode::AllTabs {
            pinned.extend(window.pinned_tabs());
        }
        for tab in window.unpinned_tabs() {
            if host_of(&tab.url).is_some() {
                unpinned.push(tab);
            }
            // skip non-matching URLs, e.g. chrome://newtab/
        }
    }

    unpinned.sort_by(compare_tab_urls);

    let pinned_ids: Vec<i32> = pinned.iter().map(|t| t.id).collect();
    let tab_ids: Vec<i32> = pinned_ids
        .iter()
        .copied()
        .chain(unpinned.iter().map(|t| t.id))
        .collect();

    if tab_ids.is_empty() {
        return Vec::new();
    }

    let mut plan = vec![
        Command::OpenWindowWith { tab_ids },
        Command::CloseBlankTabs,
    ];
    if !pinned_ids.is_empty() {
        plan.push(Command::Repin { tab_ids: pinned_ids });
    }

    plan
}

/// Close every tab whose URL (fragment stripped) was already seen.
/// First-seen wins; iteration order of the input decides the survivor.
pub fn deduplicate(tabs: &[TabInfo]) -> Vec<Command> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut duplicates: Vec<i32> = Vec::new();

    for tab in tabs {
        if !seen.insert(without_fragment(&tab.url)) {
            duplicates.push(tab.id);
        }
    }

    if duplicates.is_empty() {
        Vec::new()
    } else {
        vec![Command::CloseTabs { tab_ids: duplicates }]
    }
}

/// Reorder the current window's tabs by URL, anchored at the end of the
/// tab strip.
pub fn sort_window(tabs: &[TabInfo]) -> Vec<Command> {
    if tabs.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<&TabInfo> = tabs.iter().collect();
    ordered.sort_by(compare_tab_urls);

    vec![Command::MoveToEnd {
        tab_ids: ordered.iter().map(|t| t.id).collect(),
    }]
}

/// Close every tab on the active tab's host, any scheme, any path.
/// An active tab with no extractable host plans nothing.
pub fn close_domain(active: &TabInfo, all_tabs: &[TabInfo]) -> Vec<Command> {
    let Some(host) = host_of(&active.url) else {
        return Vec::new();
    };

    let matcher = host_matcher(&host);
    let tab_ids: Vec<i32> = all_tabs
        .iter()
        .filter(|t| matcher.is_match(&t.url))
        .map(|t| t.id)
        .collect();

    if tab_ids.is_empty() {
        Vec::new()
    } else {
        vec![Command::CloseTabs { tab_ids }]
    }
}

/// Close every blank (new-tab page) tab in one batch.
pub fn close_blank(all_tabs: &[TabInfo]) -> Vec<Command> {
    let tab_ids: Vec<i32> = all_tabs
        .iter()
        .filter(|t| t.is_blank())
        .map(|t| t.id)
        .collect();

    if tab_ids.is_empty() {
        Vec::new()
    } else {
        vec![Command::CloseTabs { tab_ids }]
    }
}

/// Bring every window to the front in turn, cascading each 40px further
/// down and to the right.
pub fn focus_all(windows: &[WindowSnapshot]) -> Vec<Command> {
    windows
        .iter()
        .enumerate()
        .map(|(i, window)| {
            let offset = CASCADE_OFFSET_PX * (i as i32 + 1);
            Command::FocusWindow {
                window_id: window.id,
                left: offset,
                top: offset,
            }
        })
        .collect()
}
