//! Orchestration for generating a project.
//!
//! Stages run strictly in order: collect answers → resolve context → materialize
//! the rule table → best-effort cleanup → dependency installer. Installation is a
//! separate call so callers can tell a generation failure from an installer
//! failure.

use std::io::Write;
use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::{debug, info};

use crate::core::resolver::resolve;
use crate::core::types::Context;
use crate::io::answers::AnswerSource;
use crate::io::finalize::{Cleanup, finalize};
use crate::io::installer::{InstallOptions, InstallOutcome, InstallRequest, Installer};
use crate::io::materialize::{MaterializeReport, Materializer};
use crate::io::templates::TemplateTree;

/// Outcome of [`scaffold`].
#[derive(Debug)]
pub struct Scaffolded {
    pub context: Context,
    pub report: MaterializeReport,
    pub cleanup: Vec<Cleanup>,
}

/// Collect answers, then write the project into `dest_root`.
///
/// Progress lines (`create <path>`, `remove <path>`) are written to `out`.
pub fn scaffold(
    source: &mut dyn AnswerSource,
    templates: TemplateTree<'_>,
    dest_root: &Path,
    out: &mut dyn Write,
) -> Result<Scaffolded> {
    let answers = source.collect().context("collect answers")?;
    debug!(?answers, "answers collected");

    let context = resolve(&answers);
    info!(app_name = %context.app_name, dest = %dest_root.display(), "generating project");

    let materializer = Materializer::new(templates, dest_root);
    let report = materializer
        .materialize(&context)
        .context("materialize project")?;
    for path in &report.created {
        writeln!(out, "   create {}", path.display())?;
    }

    let cleanup = finalize(&materializer, &context);
    for result in &cleanup {
        match result {
            Cleanup::Removed(path) => writeln!(out, "   remove {}", path.display())?,
            Cleanup::Failed { path, error } => {
                writeln!(out, "   could not remove {}: {error:#}", path.display())?;
            }
            Cleanup::Absent(_) => {}
        }
    }

    Ok(Scaffolded {
        context,
        report,
        cleanup,
    })
}

/// Run the dependency installer inside the generated project.
pub fn install(
    installer: &dyn Installer,
    dest_root: &Path,
    options: InstallOptions,
    out: &mut dyn Write,
) -> Result<InstallOutcome> {
    let request = InstallRequest {
        workdir: dest_root.to_path_buf(),
        options,
    };
    let outcome = installer
        .install(&request, out)
        .context("install dependencies")?;
    info!(?outcome, "installer finished");
    Ok(outcome)
}
