//! Pure name transforms shared by the scanner, generator and scaffolder.
//!
//! All functions here are total and idempotent where it matters: deriving a
//! route path from an already-derived path yields the same path, which keeps
//! regeneration stable no matter how a folder was named.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid camel-boundary pattern"));

static TRAILING_PAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?page$").expect("valid trailing-page pattern"));

static UPPER_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z])").expect("valid upper-case pattern"));

/// Derive the URL path segment for a page folder.
///
/// `FooBar` → `foo-bar`, a trailing `Page` suffix is dropped
/// (`SettingsPage` → `settings`), and trailing hyphens left by the suffix
/// removal are trimmed. An empty result falls back to the lowercased folder
/// name. Explicit overrides win over the generic transform.
pub fn route_path(folder_name: &str, overrides: &BTreeMap<String, String>) -> String {
    if let Some(explicit) = overrides.get(folder_name) {
        return explicit.clone();
    }
    let kebab = CAMEL_BOUNDARY
        .replace_all(folder_name, "$1-$2")
        .to_lowercase();
    let stripped = TRAILING_PAGE.replace(&kebab, "");
    let trimmed = stripped.trim_end_matches('-');
    if trimmed.is_empty() {
        folder_name.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

/// Upper-snake-case transform used for generated path constants.
///
/// `OrdersPage` → `ORDERS_PAGE`.
pub fn const_name(folder_name: &str) -> String {
    CAMEL_BOUNDARY
        .replace_all(folder_name, "${1}_${2}")
        .to_uppercase()
}

/// Component identifier for a page folder: a trailing `Page` suffix is
/// dropped, original casing is kept. A folder literally named `Page` keeps
/// its name rather than collapsing to an empty identifier.
pub fn component_name(folder_name: &str) -> String {
    match folder_name.strip_suffix("Page") {
        Some(base) if !base.is_empty() => base.to_string(),
        _ => folder_name.to_string(),
    }
}

/// Human-readable display name: camel-case boundaries become spaces.
///
/// `UserManagement` → `User Management`.
pub fn display_name(folder_name: &str) -> String {
    let spaced = UPPER_RUN.replace_all(folder_name, " ${1}");
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
