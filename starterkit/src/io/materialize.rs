//! Executes the rule table against a template tree and a destination root.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::{debug, info, instrument};

use super::render::Renderer;
use super::templates::TemplateTree;
use crate::core::rules::{
    Action, FileOperation, MATERIALIZE_RULES, OpKind, PlannedOperation, Source, plan,
};
use crate::core::types::Context;

/// What a materialization pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Files written, relative to the destination root, in write order.
    pub created: Vec<PathBuf>,
    /// Rules whose guard rejected the context.
    pub skipped: Vec<PlannedOperation>,
}

/// Side effect of a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Created(Vec<PathBuf>),
    Removed(PathBuf),
    /// A delete rule found nothing at its destination.
    Absent,
}

/// Applies planned rules from a template tree into `dest_root`.
pub struct Materializer<'a> {
    templates: TemplateTree<'a>,
    dest_root: &'a Path,
    renderer: Renderer,
}

impl<'a> Materializer<'a> {
    pub fn new(templates: TemplateTree<'a>, dest_root: &'a Path) -> Self {
        Self {
            templates,
            dest_root,
            renderer: Renderer::new(),
        }
    }

    /// Run every materialization rule whose guard passes.
    ///
    /// Rules commit independently: a failure leaves whatever earlier rules wrote.
    #[instrument(skip_all, fields(templates = ?self.templates, dest_root = %self.dest_root.display()))]
    pub fn materialize(&self, context: &Context) -> Result<MaterializeReport> {
        create_dir(self.dest_root)?;

        let mut report = MaterializeReport::default();
        for planned in plan(MATERIALIZE_RULES, context) {
            if planned.action == Action::Skip {
                debug!(dest = planned.op.dest, guard = ?planned.op.guard, "rule skipped");
                report.skipped.push(planned);
                continue;
            }
            if let Applied::Created(paths) = self.apply(&planned.op, context)? {
                report.created.extend(paths);
            }
        }

        info!(
            created = report.created.len(),
            skipped = report.skipped.len(),
            "materialized project"
        );
        Ok(report)
    }

    /// Apply one rule unconditionally; guards are the caller's concern.
    pub fn apply(&self, op: &FileOperation, context: &Context) -> Result<Applied> {
        let source = resolve_source(self.templates, op.source);
        let dest = self.dest_root.join(op.dest);
        debug!(
            source = %self.templates.describe(&source),
            dest = %dest.display(),
            kind = ?op.kind,
            "applying rule"
        );

        match op.kind {
            OpKind::Verbatim => {
                let bytes = self.templates.read(&source)?;
                write_file(&dest, &bytes)?;
                Ok(Applied::Created(vec![PathBuf::from(op.dest)]))
            }
            OpKind::Render => {
                let raw = self.read_text(&source)?;
                let rendered = self.renderer.render(&source_name(op.source), &raw, context)?;
                write_file(&dest, rendered.as_bytes())?;
                Ok(Applied::Created(vec![PathBuf::from(op.dest)]))
            }
            OpKind::Transformed(transform) => {
                let raw = self.read_text(&source)?;
                let rewritten = transform
                    .apply(&raw, context)
                    .with_context(|| format!("transform {}", self.templates.describe(&source)))?;
                write_file(&dest, rewritten.as_bytes())?;
                Ok(Applied::Created(vec![PathBuf::from(op.dest)]))
            }
            OpKind::CopyDir => {
                let copied = self.copy_dir(&source, &dest)?;
                Ok(Applied::Created(
                    copied
                        .into_iter()
                        .map(|rel| Path::new(op.dest).join(rel))
                        .collect(),
                ))
            }
            OpKind::Delete => {
                if remove_file_if_exists(&dest)? {
                    Ok(Applied::Removed(PathBuf::from(op.dest)))
                } else {
                    Ok(Applied::Absent)
                }
            }
        }
    }

    fn read_text(&self, source: &Path) -> Result<String> {
        let bytes = self.templates.read(source)?;
        String::from_utf8(bytes.into_owned())
            .with_context(|| format!("decode template {}", self.templates.describe(source)))
    }

    /// Copy a template directory byte-for-byte, returning copied paths relative to `dest`.
    fn copy_dir(&self, source: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
        create_dir(dest)?;
        let files = self.templates.files_under(source)?;
        for rel in &files {
            let bytes = self.templates.read(&source.join(rel))?;
            write_file(&dest.join(rel), &bytes)?;
        }
        Ok(files)
    }
}

/// Pick the concrete source path for a rule, relative to the template tree.
///
/// For [`Source::FirstExisting`] the tree is probed now, at materialization time;
/// the last candidate is used when none exists.
pub fn resolve_source(templates: TemplateTree<'_>, source: Source) -> PathBuf {
    match source {
        Source::Path(path) => PathBuf::from(path),
        Source::FirstExisting(candidates) => candidates
            .iter()
            .map(|name| PathBuf::from(*name))
            .find(|path| templates.is_file(path))
            .unwrap_or_else(|| PathBuf::from(candidates.last().copied().unwrap_or_default())),
    }
}

fn source_name(source: Source) -> String {
    match source {
        Source::Path(path) => path.to_string(),
        Source::FirstExisting(candidates) => candidates.join("|"),
    }
}

/// Remove a file; a missing file is not an error. Returns whether something was removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).with_context(|| format!("remove {}", path.display())),
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("write file {}", path.display()))
}
