use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::Config;
use crate::generator::scaffold::scaffold_missing_entries;
use crate::generator::templates::{
    write_barrel, write_routes_file, PathConstant, RouteEntry, RouteGroup, RoutesTemplateData,
    WriteOutcome,
};
use crate::naming;
use crate::scanner::{scan_all, PageGroup};

/// Outcome of one generation cycle.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Path of the generated route table.
    pub routes_file: PathBuf,
    /// Whether the route table actually changed on disk.
    pub outcome: WriteOutcome,
    /// Total route count across groups.
    pub route_count: usize,
    /// Per-kind route counts in configured order.
    pub group_counts: Vec<(String, usize)>,
    /// Folder names that received a scaffolded entry file this cycle.
    pub scaffolded: Vec<String>,
    /// Barrel files whose content changed.
    pub barrels_written: usize,
}

/// Run one full generation cycle: optional scaffolding, scan, collision
/// check, barrel writes, route-table write.
///
/// # Errors
///
/// Fails on duplicate page folder names across groups (colliding component
/// imports and path constants) and on render or write failures. Scan and
/// scaffold problems are degraded per entry, never fatal.
pub fn generate(config: &Config, scaffold: bool) -> anyhow::Result<Summary> {
    config.validate()?;

    let mut scaffolded = Vec::new();
    if scaffold {
        for root in &config.roots {
            scaffolded.extend(scaffold_missing_entries(config, root));
        }
    }

    let groups = scan_all(config);
    check_collisions(&groups)?;

    let mut barrels_written = 0;
    for (root, group) in config.roots.iter().zip(groups.iter()) {
        if group.pages.is_empty() {
            continue;
        }
        let folders: Vec<String> = group.pages.iter().map(|p| p.folder_name.clone()).collect();
        let barrel_path = root.dir.join(&config.barrel_file);
        if write_barrel(&barrel_path, &capitalize(&root.kind), &folders)? == WriteOutcome::Written {
            barrels_written += 1;
        }
    }

    let data = build_template_data(config, &groups);
    let outcome = write_routes_file(&config.routes_file, &data)?;

    Ok(Summary {
        routes_file: config.routes_file.clone(),
        outcome,
        route_count: groups.iter().map(|g| g.pages.len()).sum(),
        group_counts: groups
            .iter()
            .map(|g| (g.kind.clone(), g.pages.len()))
            .collect(),
        scaffolded,
        barrels_written,
    })
}

/// Duplicate folder names across groups would emit colliding component
/// imports and `GENERATED_PATHS` keys; fail loudly instead of letting the
/// later group silently shadow the earlier one.
fn check_collisions(groups: &[PageGroup]) -> anyhow::Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for group in groups {
        for page in &group.pages {
            if let Some(prev_kind) = seen.insert(&page.folder_name, &group.kind) {
                anyhow::bail!(
                    "page folder `{}` exists under both `{}` and `{}`; \
                     component imports and path constants would collide; rename one of them",
                    page.folder_name,
                    prev_kind,
                    group.kind
                );
            }
        }
    }
    Ok(())
}

fn build_template_data(config: &Config, groups: &[PageGroup]) -> RoutesTemplateData {
    let mut imports = Vec::new();
    let mut route_groups = Vec::new();
    let mut constants = Vec::new();

    for (root, group) in config.roots.iter().zip(groups.iter()) {
        let mut routes = Vec::new();
        for page in &group.pages {
            imports.push(format!(
                "import {} from \"{}\";",
                page.folder_name, page.import_path
            ));
            // Prefixed groups are nested by the host router, so their entries
            // stay relative; top-level groups carry the leading slash.
            let path = if root.route_prefix.is_some() {
                page.route_path.clone()
            } else {
                format!("/{}", page.route_path)
            };
            routes.push(RouteEntry {
                path,
                component: page.folder_name.clone(),
            });
            constants.push(PathConstant {
                name: naming::const_name(&page.folder_name),
                value: root.full_path(&page.route_path),
            });
        }
        let comment = match &root.route_prefix {
            Some(prefix) => format!(
                "{} routes (nested under {})",
                capitalize(&root.kind),
                prefix
            ),
            None => format!("{} routes (top-level)", capitalize(&root.kind)),
        };
        route_groups.push(RouteGroup {
            kind: root.kind.clone(),
            comment,
            routes,
        });
    }

    RoutesTemplateData {
        imports,
        groups: route_groups,
        constants,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
