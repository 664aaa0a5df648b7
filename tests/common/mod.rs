#![allow(dead_code)]

pub mod page_tree {
    use autoroutes::{Config, PageRoot};
    use std::path::{Path, PathBuf};

    /// Build a config rooted inside `base` with the conventional admin/user
    /// pair of page roots and a generated-routes output path.
    pub fn config_in(base: &Path) -> Config {
        let mut config = Config::default();
        config.roots = vec![
            PageRoot {
                kind: "admin".to_string(),
                dir: base.join("pages/admin"),
                route_prefix: Some("/admin".to_string()),
            },
            PageRoot {
                kind: "user".to_string(),
                dir: base.join("pages/user"),
                route_prefix: None,
            },
        ];
        config.routes_file = base.join("routes/generated-routes.tsx");
        for root in &config.roots {
            std::fs::create_dir_all(&root.dir).unwrap();
        }
        config
    }

    /// Create a page folder with an entry file under `root`.
    pub fn add_page(config: &Config, root_dir: &Path, folder: &str) -> PathBuf {
        let dir = root_dir.join(folder);
        std::fs::create_dir_all(&dir).unwrap();
        let entry = dir.join(&config.entry_file);
        std::fs::write(&entry, format!("export default function {folder}() {{}}\n")).unwrap();
        entry
    }

    /// Create an empty page folder (no entry file) under `root`.
    pub fn add_empty_folder(root_dir: &Path, folder: &str) -> PathBuf {
        let dir = root_dir.join(folder);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Read the generated route table, if present.
    pub fn routes_content(config: &Config) -> String {
        std::fs::read_to_string(&config.routes_file).expect("routes file should exist")
    }
}

pub mod recording {
    use autoroutes::Reloader;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// Reloader implementation that records every notification for
    /// assertions.
    #[derive(Debug, Default)]
    pub struct RecordingReloader {
        notifications: Mutex<Vec<PathBuf>>,
    }

    impl RecordingReloader {
        pub fn count(&self) -> usize {
            self.notifications.lock().unwrap().len()
        }

        pub fn paths(&self) -> Vec<PathBuf> {
            self.notifications.lock().unwrap().clone()
        }
    }

    impl Reloader for RecordingReloader {
        fn notify_reload(&self, changed: &Path) {
            self.notifications.lock().unwrap().push(changed.to_path_buf());
        }
    }
}
