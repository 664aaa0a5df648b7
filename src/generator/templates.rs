use askama::Template;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// One route entry in the generated table. `path` is the final string as it
/// appears in the output: relative for prefixed groups (the host router nests
/// them), absolute for top-level groups.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Route path string as emitted.
    pub path: String,
    /// Component identifier referenced by the route element.
    pub component: String,
}

/// One per-kind block in the route table.
#[derive(Debug, Clone)]
pub struct RouteGroup {
    /// Group tag; names the `{kind}Routes` export.
    pub kind: String,
    /// Comment line describing where the group is mounted.
    pub comment: String,
    pub routes: Vec<RouteEntry>,
}

/// One entry of the `GENERATED_PATHS` constants object.
#[derive(Debug, Clone)]
pub struct PathConstant {
    /// Upper-snake-case constant key.
    pub name: String,
    /// Fully-qualified URL path.
    pub value: String,
}

/// Template data for the generated route-table file.
#[derive(Template)]
#[template(path = "routes.tsx.txt", escape = "none")]
pub struct RoutesTemplateData {
    /// Import statements, one per page.
    pub imports: Vec<String>,
    /// Per-kind route blocks in configured root order.
    pub groups: Vec<RouteGroup>,
    /// Path constants for all pages across groups.
    pub constants: Vec<PathConstant>,
}

/// Template data for a per-kind barrel file.
#[derive(Template)]
#[template(path = "barrel.ts.txt", escape = "none")]
pub struct BarrelTemplateData {
    /// Section label, e.g. `Admin`.
    pub label: String,
    /// Page folder names to re-export.
    pub folders: Vec<String>,
}

/// Template data for a scaffolded page entry file.
#[derive(Template)]
#[template(path = "page.tsx.txt", escape = "none")]
pub struct PageTemplateData {
    /// Component identifier.
    pub component_name: String,
    /// Display name, folder name split into words.
    pub display_name: String,
    /// Lowercased display name for body copy.
    pub display_lower: String,
    /// Fully-qualified route the page will be mounted at.
    pub route: String,
}

/// Result of writing a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File content changed and was replaced atomically.
    Written,
    /// On-disk content already matched; nothing was touched.
    Unchanged,
}

/// Write `content` to `path` atomically, skipping the write entirely when the
/// on-disk content already matches. The temporary file lives in the
/// destination directory so the rename cannot cross filesystems; a crash
/// mid-write leaves the previous artifact valid.
fn write_atomic(path: &Path, content: &str) -> anyhow::Result<WriteOutcome> {
    if let Ok(existing) = fs::read_to_string(path) {
        if existing == content {
            return Ok(WriteOutcome::Unchanged);
        }
    }
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    fs::create_dir_all(&parent)
        .with_context(|| format!("failed to create output directory {parent:?}"))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    let tmp = parent.join(format!(".{file_name}.tmp"));
    fs::write(&tmp, content).with_context(|| format!("failed to write {tmp:?}"))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to move {tmp:?} into place at {path:?}"))?;
    Ok(WriteOutcome::Written)
}

/// Render and write the route-table file.
///
/// # Errors
///
/// Returns an error if template rendering or the atomic write fails; the
/// previous route table stays on disk in either case.
pub fn write_routes_file(path: &Path, data: &RoutesTemplateData) -> anyhow::Result<WriteOutcome> {
    let rendered = data.render().context("failed to render route table")?;
    write_atomic(path, &rendered)
}

/// Render and write one group's barrel file into its page root.
pub fn write_barrel(path: &Path, label: &str, folders: &[String]) -> anyhow::Result<WriteOutcome> {
    let rendered = BarrelTemplateData {
        label: label.to_string(),
        folders: folders.to_vec(),
    }
    .render()
    .context("failed to render barrel file")?;
    write_atomic(path, &rendered)
}

/// Render the scaffold page template (the scaffolder owns the write so it can
/// enforce the never-overwrite guarantee).
pub(crate) fn render_page_template(data: &PageTemplateData) -> anyhow::Result<String> {
    data.render().context("failed to render page template")
}
