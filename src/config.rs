//! # Configuration Module
//!
//! Loads generator configuration from a YAML file or builds it
//! programmatically. The defaults mirror a conventional single-page-app
//! layout: an `admin` root nested under `/admin` and a top-level `user` root,
//! both scanned for `index.tsx` entry files.
//!
//! ## Example `autoroutes.yaml`
//!
//! ```yaml
//! roots:
//!   - kind: admin
//!     dir: src/pages/admin
//!     route_prefix: /admin
//!   - kind: user
//!     dir: src/pages/user
//! routes_file: src/routes/generated-routes.tsx
//! entry_file: index.tsx
//! overrides:
//!   Login: login
//! debounce_ms: 150
//! poll_interval_ms: 2000
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One scanned page root: a directory whose immediate subdirectories are
/// candidate pages, grouped under a `kind` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRoot {
    /// Group tag, e.g. `admin` or `user`. Also names the generated
    /// `{kind}Routes` export.
    pub kind: String,
    /// Directory containing the page folders.
    pub dir: PathBuf,
    /// URL prefix applied to generated path constants, e.g. `/admin`.
    /// Groups without a prefix are mounted at the top level.
    #[serde(default)]
    pub route_prefix: Option<String>,
}

impl PageRoot {
    /// Fully-qualified URL path for a derived route segment.
    pub fn full_path(&self, route_path: &str) -> String {
        match &self.route_prefix {
            Some(prefix) => format!("{}/{}", prefix.trim_end_matches('/'), route_path),
            None => format!("/{route_path}"),
        }
    }
}

/// Generator and watcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Page roots in output order.
    pub roots: Vec<PageRoot>,
    /// Entry file that marks a folder as a page.
    pub entry_file: String,
    /// Barrel file written into each page root.
    pub barrel_file: String,
    /// Module alias prefix used in generated import statements.
    pub import_alias: String,
    /// Output path of the generated route table.
    pub routes_file: PathBuf,
    /// Explicit folder-name → route-path overrides, consulted before the
    /// generic derivation.
    pub overrides: BTreeMap<String, String>,
    /// Debounce window for bursts of file-system events.
    pub debounce_ms: u64,
    /// Polling fallback interval.
    pub poll_interval_ms: u64,
    /// Settle delay before scaffolding into a freshly created folder.
    pub scaffold_grace_ms: u64,
    /// Scaffold entry files for empty page folders on the initial watch pass
    /// and on new-folder events.
    pub auto_scaffold: bool,
}

impl Default for Config {
    fn default() -> Self {
        let mut overrides = BTreeMap::new();
        overrides.insert("Login".to_string(), "login".to_string());
        Self {
            roots: vec![
                PageRoot {
                    kind: "admin".to_string(),
                    dir: PathBuf::from("src/pages/admin"),
                    route_prefix: Some("/admin".to_string()),
                },
                PageRoot {
                    kind: "user".to_string(),
                    dir: PathBuf::from("src/pages/user"),
                    route_prefix: None,
                },
            ],
            entry_file: "index.tsx".to_string(),
            barrel_file: "index.ts".to_string(),
            import_alias: "@/pages".to_string(),
            routes_file: PathBuf::from("src/routes/generated-routes.tsx"),
            overrides,
            debounce_ms: 150,
            poll_interval_ms: 2000,
            scaffold_grace_ms: 300,
            auto_scaffold: true,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// [`Config::validate`].
    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path:?}"))?;
        let config: Config = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {path:?}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Check structural invariants: at least one root, unique kinds, and
    /// non-empty file names.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.roots.is_empty(), "config must declare at least one page root");
        anyhow::ensure!(!self.entry_file.is_empty(), "entry_file must not be empty");
        anyhow::ensure!(!self.barrel_file.is_empty(), "barrel_file must not be empty");
        let mut kinds = std::collections::HashSet::new();
        for root in &self.roots {
            anyhow::ensure!(!root.kind.is_empty(), "page root kind must not be empty");
            anyhow::ensure!(
                kinds.insert(root.kind.as_str()),
                "duplicate page root kind `{}`",
                root.kind
            );
        }
        Ok(())
    }

    /// Import path for a page component, e.g. `@/pages/admin/Dashboard`.
    pub fn import_path(&self, kind: &str, folder_name: &str) -> String {
        format!("{}/{}/{}", self.import_alias.trim_end_matches('/'), kind, folder_name)
    }
}
