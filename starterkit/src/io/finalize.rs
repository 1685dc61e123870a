//! Post-materialization cleanup.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

use super::materialize::{Applied, Materializer};
use crate::core::rules::{Action, FINALIZE_RULES, plan};
use crate::core::types::Context;

/// Outcome of one cleanup rule.
#[derive(Debug)]
pub enum Cleanup {
    Removed(PathBuf),
    Absent(PathBuf),
    /// The rule failed; the error is reported, not propagated.
    Failed { path: PathBuf, error: anyhow::Error },
}

/// Run the cleanup rules (drop the Firebase deploy task when Firebase is off).
///
/// Every rule is best-effort: failures are logged and collected so generation can
/// carry on to the installer.
pub fn finalize(materializer: &Materializer<'_>, context: &Context) -> Vec<Cleanup> {
    let mut results = Vec::new();
    for planned in plan(FINALIZE_RULES, context) {
        if planned.action == Action::Skip {
            continue;
        }
        let path = PathBuf::from(planned.op.dest);
        let result: Result<Applied> = materializer.apply(&planned.op, context);
        let cleanup = match result {
            Ok(Applied::Removed(path)) => {
                info!(path = %path.display(), "removed");
                Cleanup::Removed(path)
            }
            Ok(_) => Cleanup::Absent(path),
            Err(error) => {
                warn!(path = %path.display(), error = %format!("{error:#}"), "cleanup failed, continuing");
                Cleanup::Failed { path, error }
            }
        };
        results.push(cleanup);
    }
    results
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::core::rules::FIREBASE_DEPLOY_TASK;
    use crate::test_support::{TemplateFixture, context};

    fn seed_task(dest: &std::path::Path) -> PathBuf {
        let task = dest.join(FIREBASE_DEPLOY_TASK);
        fs::create_dir_all(task.parent().expect("parent")).expect("mkdir");
        fs::write(&task, "module.exports = {};\n").expect("write task");
        task
    }

    #[test]
    fn removes_firebase_task_without_firebase() {
        let fixture = TemplateFixture::new().expect("fixture");
        let dest = tempfile::tempdir().expect("tempdir");
        let task = seed_task(dest.path());

        let results = finalize(&Materializer::new(fixture.tree(), dest.path()), &context("app"));

        assert!(matches!(results.as_slice(), [Cleanup::Removed(_)]));
        assert!(!task.exists());
    }

    #[test]
    fn keeps_firebase_task_with_firebase() {
        let fixture = TemplateFixture::new().expect("fixture");
        let dest = tempfile::tempdir().expect("tempdir");
        let task = seed_task(dest.path());
        let mut ctx = context("app");
        ctx.use_firebase = true;

        let results = finalize(&Materializer::new(fixture.tree(), dest.path()), &ctx);

        assert!(results.is_empty());
        assert!(task.is_file());
    }

    #[test]
    fn removal_failure_is_reported_not_raised() {
        let fixture = TemplateFixture::new().expect("fixture");
        let dest = tempfile::tempdir().expect("tempdir");
        // A directory where the task file should be cannot be removed as a file.
        fs::create_dir_all(dest.path().join(FIREBASE_DEPLOY_TASK)).expect("mkdir");

        let results = finalize(&Materializer::new(fixture.tree(), dest.path()), &context("app"));

        assert!(matches!(results.as_slice(), [Cleanup::Failed { .. }]));
    }
}
