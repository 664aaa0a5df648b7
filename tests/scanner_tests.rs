use autoroutes::{scan_all, scan_root, snapshot};
use tempfile::TempDir;

mod common;
use common::page_tree;

#[test]
fn test_scan_skips_folders_without_entry_file() {
    let tmp = TempDir::new().unwrap();
    let config = page_tree::config_in(tmp.path());
    page_tree::add_page(&config, &config.roots[0].dir, "Dashboard");
    page_tree::add_empty_folder(&config.roots[0].dir, "Empty");
    // Loose files directly in the root never qualify either
    std::fs::write(config.roots[0].dir.join("notes.txt"), "x").unwrap();

    let pages = scan_root(&config, &config.roots[0]);
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].folder_name, "Dashboard");
    assert_eq!(pages[0].kind, "admin");
    assert_eq!(pages[0].route_path, "dashboard");
    assert_eq!(pages[0].import_path, "@/pages/admin/Dashboard");
}

#[test]
fn test_scan_missing_root_is_empty_not_error() {
    let tmp = TempDir::new().unwrap();
    let mut config = page_tree::config_in(tmp.path());
    config.roots[0].dir = tmp.path().join("does/not/exist");

    assert!(scan_root(&config, &config.roots[0]).is_empty());
    let groups = scan_all(&config);
    assert_eq!(groups.len(), 2);
    assert!(groups[0].pages.is_empty());
}

#[test]
fn test_scan_preserves_configured_root_order() {
    let tmp = TempDir::new().unwrap();
    let config = page_tree::config_in(tmp.path());
    page_tree::add_page(&config, &config.roots[1].dir, "Profile");

    let groups = scan_all(&config);
    assert_eq!(groups[0].kind, "admin");
    assert_eq!(groups[1].kind, "user");
    assert_eq!(groups[1].pages[0].folder_name, "Profile");
}

#[test]
fn test_snapshot_is_stable_and_detects_changes() {
    let tmp = TempDir::new().unwrap();
    let config = page_tree::config_in(tmp.path());
    page_tree::add_page(&config, &config.roots[0].dir, "Beta");
    page_tree::add_page(&config, &config.roots[0].dir, "Alpha");

    let first = snapshot(&config).unwrap();
    let second = snapshot(&config).unwrap();
    assert_eq!(first, second, "snapshot of an unchanged tree must be stable");
    // Sorted, so listing order cannot leak into the comparison
    assert!(first.find("Alpha").unwrap() < first.find("Beta").unwrap());

    page_tree::add_page(&config, &config.roots[1].dir, "Profile");
    let third = snapshot(&config).unwrap();
    assert_ne!(second, third);

    // An empty folder does not qualify, so the snapshot is unchanged
    page_tree::add_empty_folder(&config.roots[0].dir, "Draft");
    assert_eq!(snapshot(&config).unwrap(), third);
}
