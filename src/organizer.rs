/// Per-invocation orchestration: take a fresh snapshot, build a plan,
/// execute it. All state lives in the invocation; nothing carries over
/// between runs.

use futures_util::future::join_all;
use std::cell::Cell;

use crate::browser::{self, TabQuery};
use crate::organize::{self, ConsolidateMode, OrganizePolicy};
use crate::tab_data::WindowSnapshot;

thread_local! {
    static IN_FLIGHT: Cell<bool> = const { Cell::new(false) };
}

/// Rejects a second operation while one is still running. Interleaving two
/// batches of moves against the same live tab set is never what the user
/// wants, so the later click gets an error instead.
struct FlightGuard;

impl FlightGuard {
    fn acquire() -> Result<FlightGuard, String> {
        if IN_FLIGHT.with(|flag| flag.replace(true)) {
            return Err("Another organize operation is still running".to_string());
        }
        Ok(FlightGuard)
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        IN_FLIGHT.with(|flag| flag.set(false));
    }
}

/// Fetch every non-incognito normal window with its tabs.
///
/// One tab query per window, all in flight at once and joined as a set:
/// completion order does not matter and zero windows resolves immediately.
async fn fetch_snapshot() -> Result<Vec<WindowSnapshot>, String> {
    let windows = browser::query_windows(false).await?;
    let regular: Vec<WindowSnapshot> =
        windows.into_iter().filter(|w| !w.incognito).collect();

    let queries = regular.iter().map(|window| {
        let query = TabQuery {
            window_id: Some(window.id),
            ..Default::default()
        };
        async move { browser::query_tabs(&query).await }
    });
    let results = join_all(queries).await;

    let mut populated = Vec::with_capacity(regular.len());
    for (mut window, tabs) in regular.into_iter().zip(results) {
        window.tabs = tabs?;
        populated.push(window);
    }
    Ok(populated)
}

/// Group all tabs into new windows by hostname.
pub async fn collate_tabs(policy: OrganizePolicy) -> Result<(), String> {
    let _guard = FlightGuard::acquire()?;

    let windows = fetch_snapshot().await?;
    let plan = organize::collate(&windows, policy);
    log::info!(
        "collate: {} windows snapshotted, {} commands planned",
        windows.len(),
        plan.len()
    );
    browser::execute_plan(plan).await
}

/// Merge all tabs into one new window, sorted by URL.
pub async fn consolidate_tabs(
    mode: ConsolidateMode,
    policy: OrganizePolicy,
) -> Result<(), String> {
    let _guard = FlightGuard::acquire()?;

    let windows = fetch_snapshot().await?;
    let plan = organize::consolidate(&windows, mode, policy);
    log::info!(
        "consolidate ({:?}): {} windows snapshotted, {} commands planned",
        mode,
        windows.len(),
        plan.len()
    );
    browser::execute_plan(plan).await
}

/// Close every tab whose URL (fragment stripped) repeats an earlier one.
pub async fn deduplicate_tabs() -> Result<(), String> {
    let _guard = FlightGuard::acquire()?;

    let tabs = browser::all_tabs().await?;
    let plan = organize::deduplicate(&tabs);
    browser::execute_plan(plan).await
}

/// Sort the current window's tabs by URL, in place.
pub async fn sort_window_tabs() -> Result<(), String> {
    let _guard = FlightGuard::acquire()?;

    let tabs = browser::current_window_tabs().await?;
    let plan = organize::sort_window(&tabs);
    browser::execute_plan(plan).await
}

/// Close every tab on the active tab's host, across all windows.
pub async fn close_domain_tabs() -> Result<(), String> {
    let _guard = FlightGuard::acquire()?;

    let Some(active) = browser::active_tab().await? else {
        log::info!("close domain: no active tab");
        return Ok(());
    };
    let tabs = browser::all_tabs().await?;
    let plan = organize::close_domain(&active, &tabs);
    browser::execute_plan(plan).await
}

/// Close every blank (new-tab page) tab, across all windows.
pub async fn close_blank_tabs() -> Result<(), String> {
    let _guard = FlightGuard::acquire()?;

    let tabs = browser::all_tabs().await?;
    let plan = organize::close_blank(&tabs);
    browser::execute_plan(plan).await
}

/// Bring every normal and popup window to the front, cascading positions.
pub async fn focus_all_windows() -> Result<(), String> {
    let _guard = FlightGuard::acquire()?;

    let windows = browser::query_windows(true).await?;
    let plan = organize::focus_all(&windows);
    browser::execute_plan(plan).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_guard_rejects_reentry() {
        let first = FlightGuard::acquire();
        assert!(first.is_ok());

        let second = FlightGuard::acquire();
        assert!(second.is_err());

        drop(first);
        assert!(FlightGuard::acquire().is_ok());
    }
}
