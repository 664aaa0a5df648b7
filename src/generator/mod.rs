//! # Generator Module
//!
//! Turns a scanned page set into source artifacts:
//!
//! - a route-table file with one import per page, a `RouteConfig[]` export
//!   per group, and a `GENERATED_PATHS` constants object;
//! - one barrel file per group re-exporting each page's default export;
//! - optionally, a boilerplate entry file scaffolded into page folders that
//!   lack one.
//!
//! ```text
//! page roots → Scanner → template data → Askama rendering → atomic writes
//! ```
//!
//! Output is a pure function of the page set: regenerating over an unchanged
//! tree produces byte-identical files, and unchanged files are never
//! rewritten, so downstream watchers see no spurious changes. Writes go to a
//! temporary sibling and are renamed into place, so a crash mid-write leaves
//! the previous artifact intact.

mod generate;
mod scaffold;
mod templates;

pub use generate::{generate, Summary};
pub use scaffold::{scaffold_missing_entries, scaffold_page};
pub use templates::{
    write_barrel, write_routes_file, PathConstant, RouteEntry, RouteGroup, RoutesTemplateData,
    WriteOutcome,
};
