use crate::config::{Config, PageRoot};
use crate::generator::templates::{render_page_template, PageTemplateData};
use crate::naming;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::warn;

/// Scaffold the entry file for one page folder.
///
/// Returns `Ok(true)` when a file was created, `Ok(false)` when the entry
/// file already exists. The file is created with `create_new`, so an existing
/// entry file is never touched even under a race with another writer.
pub fn scaffold_page(config: &Config, root: &PageRoot, folder_name: &str) -> anyhow::Result<bool> {
    let entry_path = root.dir.join(folder_name).join(&config.entry_file);
    if entry_path.exists() {
        return Ok(false);
    }
    let component = naming::component_name(folder_name);
    let display = naming::display_name(&component);
    let route = root.full_path(&naming::route_path(folder_name, &config.overrides));
    let rendered = render_page_template(&PageTemplateData {
        component_name: component,
        display_lower: display.to_lowercase(),
        display_name: display,
        route,
    })?;
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&entry_path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(err).map_err(anyhow::Error::from),
    };
    file.write_all(rendered.as_bytes())?;
    println!("   ✨ Created template for: {folder_name}");
    Ok(true)
}

/// Scaffold entry files for every empty page folder under a root.
///
/// Best-effort: a folder whose scaffold write fails is logged and skipped, so
/// it simply is not picked up as a page this cycle. Returns the folder names
/// that were scaffolded.
pub fn scaffold_missing_entries(config: &Config, root: &PageRoot) -> Vec<String> {
    let mut created = Vec::new();
    let reader = match std::fs::read_dir(&root.dir) {
        Ok(reader) => reader,
        Err(_) => return created,
    };
    for entry in reader.flatten() {
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }
        let folder_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };
        match scaffold_page(config, root, &folder_name) {
            Ok(true) => created.push(folder_name),
            Ok(false) => {}
            Err(err) => {
                warn!(folder = %folder_name, %err, "failed to scaffold page template, skipping");
            }
        }
    }
    created
}
