use autoroutes::RouteWatcher;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

mod common;
use common::page_tree;
use common::recording::RecordingReloader;

fn wait_until(timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    done()
}

#[test]
fn test_initial_pass_generates_routes() {
    let tmp = TempDir::new().unwrap();
    let mut config = page_tree::config_in(tmp.path());
    config.auto_scaffold = false;
    page_tree::add_page(&config, &config.roots[0].dir, "Dashboard");

    let reloader = Arc::new(RecordingReloader::default());
    let mut watcher = RouteWatcher::spawn(config.clone(), reloader.clone()).unwrap();
    assert!(config.routes_file.exists());
    assert_eq!(watcher.stats().cycles.load(Ordering::SeqCst), 1);
    // The initial pass wrote a fresh table and notified once
    assert_eq!(reloader.count(), 1);
    watcher.shutdown();
}

#[test]
fn test_burst_of_events_coalesces_into_one_cycle() {
    let tmp = TempDir::new().unwrap();
    let mut config = page_tree::config_in(tmp.path());
    config.auto_scaffold = false;
    config.debounce_ms = 300;
    // Polling disabled-ish for this test so only native events drive cycles
    config.poll_interval_ms = 60_000;
    page_tree::add_page(&config, &config.roots[0].dir, "Dashboard");

    let reloader = Arc::new(RecordingReloader::default());
    let watcher = RouteWatcher::spawn(config.clone(), reloader.clone()).unwrap();
    let stats = watcher.stats();
    assert_eq!(stats.cycles.load(Ordering::SeqCst), 1);

    // Rapid-fire burst: three new pages well inside one debounce window
    page_tree::add_page(&config, &config.roots[0].dir, "Reports");
    page_tree::add_page(&config, &config.roots[1].dir, "Profile");
    page_tree::add_page(&config, &config.roots[1].dir, "SettingsPage");

    assert!(
        wait_until(Duration::from_secs(5), || stats
            .cycles
            .load(Ordering::SeqCst)
            >= 2),
        "watcher never regenerated after the burst"
    );
    // Allow any straggler events to flush, then confirm the burst produced
    // exactly one additional generation cycle with all three pages.
    std::thread::sleep(Duration::from_millis(800));
    assert_eq!(stats.cycles.load(Ordering::SeqCst), 2);
    assert_eq!(reloader.count(), 2);

    let content = page_tree::routes_content(&config);
    assert!(content.contains("<Reports />"));
    assert!(content.contains("<Profile />"));
    assert!(content.contains("{ path: \"/settings\", element: <Settings"));
    drop(watcher);
}

#[test]
fn test_removed_page_disappears_from_table() {
    let tmp = TempDir::new().unwrap();
    let mut config = page_tree::config_in(tmp.path());
    config.auto_scaffold = false;
    config.debounce_ms = 100;
    page_tree::add_page(&config, &config.roots[0].dir, "Dashboard");
    page_tree::add_page(&config, &config.roots[0].dir, "Reports");

    let reloader = Arc::new(RecordingReloader::default());
    let watcher = RouteWatcher::spawn(config.clone(), reloader.clone()).unwrap();

    std::fs::remove_dir_all(config.roots[0].dir.join("Reports")).unwrap();

    assert!(
        wait_until(Duration::from_secs(5), || {
            !page_tree::routes_content(&config).contains("Reports")
        }),
        "removed page still present in generated table"
    );
    drop(watcher);
}

#[test]
fn test_new_folder_gets_scaffolded_template() {
    let tmp = TempDir::new().unwrap();
    let mut config = page_tree::config_in(tmp.path());
    config.debounce_ms = 100;
    config.scaffold_grace_ms = 50;
    page_tree::add_page(&config, &config.roots[0].dir, "Dashboard");

    let reloader = Arc::new(RecordingReloader::default());
    let watcher = RouteWatcher::spawn(config.clone(), reloader.clone()).unwrap();

    // Creating a bare folder under a root should scaffold its entry file
    // and pick it up as a page in the same cycle.
    std::fs::create_dir(config.roots[0].dir.join("Billing")).unwrap();

    let entry = config.roots[0].dir.join("Billing").join(&config.entry_file);
    assert!(
        wait_until(Duration::from_secs(5), || entry.exists()),
        "scaffolded entry file never appeared"
    );
    assert!(
        wait_until(Duration::from_secs(5), || {
            page_tree::routes_content(&config).contains("<Billing />")
        }),
        "scaffolded page never reached the route table"
    );
    drop(watcher);
}

#[test]
fn test_polling_fallback_detects_changes() {
    let tmp = TempDir::new().unwrap();
    let mut config = page_tree::config_in(tmp.path());
    config.auto_scaffold = false;
    config.debounce_ms = 100;
    config.poll_interval_ms = 200;
    // Point the native watcher at roots that do not exist yet so only the
    // polling fallback can observe this change.
    let reloader = Arc::new(RecordingReloader::default());
    let late_root = tmp.path().join("pages/admin");
    std::fs::remove_dir_all(&late_root).ok();

    let watcher = RouteWatcher::spawn(config.clone(), reloader.clone()).unwrap();

    std::fs::create_dir_all(&late_root).unwrap();
    page_tree::add_page(&config, &config.roots[0].dir, "Dashboard");

    assert!(
        wait_until(Duration::from_secs(5), || {
            config.routes_file.exists()
                && page_tree::routes_content(&config).contains("<Dashboard />")
        }),
        "polling fallback never picked up the change"
    );
    drop(watcher);
}

#[test]
fn test_shutdown_stops_regeneration() {
    let tmp = TempDir::new().unwrap();
    let mut config = page_tree::config_in(tmp.path());
    config.auto_scaffold = false;
    config.debounce_ms = 50;
    page_tree::add_page(&config, &config.roots[0].dir, "Dashboard");

    let reloader = Arc::new(RecordingReloader::default());
    let mut watcher = RouteWatcher::spawn(config.clone(), reloader.clone()).unwrap();
    let stats = watcher.stats();
    watcher.shutdown();

    let cycles_at_shutdown = stats.cycles.load(Ordering::SeqCst);
    page_tree::add_page(&config, &config.roots[0].dir, "Reports");
    std::thread::sleep(Duration::from_millis(500));
    assert_eq!(stats.cycles.load(Ordering::SeqCst), cycles_at_shutdown);
    assert!(!page_tree::routes_content(&config).contains("Reports"));
}
