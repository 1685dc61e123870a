//! The materialization rule table.
//!
//! Rules are plain data: where to read, where to write, how, and under which
//! guard. The executor in [`crate::io::materialize`] walks the planned list top to
//! bottom; no rule reads another rule's output, so order only affects logging.

use serde::Serialize;

use super::transform::Transform;
use super::types::Context;

/// Dev dependencies that only make sense with web-component-tester.
pub const WCT_DEV_DEPENDENCIES: &[&str] = &["web-component-tester", "test-fixture"];

/// Module whose `require` lines are commented out of the gulpfile without WCT.
pub const WCT_MODULE: &str = "web-component-tester";

/// Generated deploy task that only applies to Firebase projects.
pub const FIREBASE_DEPLOY_TASK: &str = "tasks/deploy-firebase.js";

/// Where a rule reads its content from, relative to the template root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Path(&'static str),
    /// First candidate that exists as a file wins; the last one is the fallback.
    ///
    /// npm renames `.gitignore` to `.npmignore` when publishing packages, so a
    /// template tree shipped that way has to be probed.
    FirstExisting(&'static [&'static str]),
}

/// How a rule produces its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OpKind {
    /// Byte-identical file copy.
    Verbatim,
    /// Render the file as a template against the full context.
    Render,
    Transformed(Transform),
    /// Recursive byte-identical copy of a directory.
    CopyDir,
    /// Remove the destination path if present.
    Delete,
}

/// Predicate deciding whether a rule runs for a given context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    Always,
    UseFirebase,
    WithoutFirebase,
    IncludeWct,
    IncludeRecipes,
}

impl Guard {
    pub fn allows(self, context: &Context) -> bool {
        match self {
            Guard::Always => true,
            Guard::UseFirebase => context.use_firebase,
            Guard::WithoutFirebase => !context.use_firebase,
            Guard::IncludeWct => context.include_wct,
            Guard::IncludeRecipes => context.include_recipes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileOperation {
    pub source: Source,
    pub dest: &'static str,
    pub kind: OpKind,
    pub guard: Guard,
}

impl FileOperation {
    const fn new(source: &'static str, dest: &'static str, kind: OpKind) -> Self {
        Self {
            source: Source::Path(source),
            dest,
            kind,
            guard: Guard::Always,
        }
    }

    const fn verbatim(path: &'static str) -> Self {
        Self::new(path, path, OpKind::Verbatim)
    }

    const fn dir(path: &'static str) -> Self {
        Self::new(path, path, OpKind::CopyDir)
    }

    const fn render(source: &'static str, dest: &'static str) -> Self {
        Self::new(source, dest, OpKind::Render)
    }

    const fn when(self, guard: Guard) -> Self {
        Self { guard, ..self }
    }
}

/// Rules executed while materializing the project tree.
pub const MATERIALIZE_RULES: &[FileOperation] = &[
    FileOperation::verbatim(".editorconfig"),
    FileOperation::verbatim(".gitattributes"),
    FileOperation {
        source: Source::FirstExisting(&[".npmignore", ".gitignore"]),
        dest: ".gitignore",
        kind: OpKind::Verbatim,
        guard: Guard::Always,
    },
    FileOperation::dir("config"),
    FileOperation::verbatim("app.yaml"),
    FileOperation::verbatim(".jscsrc"),
    FileOperation::verbatim(".jshintrc"),
    FileOperation::verbatim(".stylelintrc.json"),
    FileOperation::new(
        "_bower.json",
        "bower.json",
        OpKind::Transformed(Transform::Manifest {
            drop_without_wct: WCT_DEV_DEPENDENCIES,
        }),
    ),
    FileOperation::new(
        "gulpfile.js",
        "gulpfile.js",
        OpKind::Transformed(Transform::CommentOutRequires { module: WCT_MODULE }),
    ),
    FileOperation::verbatim("LICENSE.md"),
    FileOperation::render("_package.json", "package.json"),
    FileOperation::render("_README.md", "README.md"),
    FileOperation::dir("tasks"),
    FileOperation::verbatim("firebase.json").when(Guard::UseFirebase),
    FileOperation::verbatim("wct.conf.json").when(Guard::IncludeWct),
    FileOperation::dir("test").when(Guard::IncludeWct),
    FileOperation::dir("app"),
    FileOperation::render("app-xtra/_index.html", "app/index.html"),
    FileOperation::render("app-xtra/_manifest.json", "app/manifest.json"),
    FileOperation::dir("docs").when(Guard::IncludeRecipes),
];

/// Rules executed after materialization, before the installer runs.
pub const FINALIZE_RULES: &[FileOperation] = &[FileOperation {
    source: Source::Path(FIREBASE_DEPLOY_TASK),
    dest: FIREBASE_DEPLOY_TASK,
    kind: OpKind::Delete,
    guard: Guard::WithoutFirebase,
}];

/// Whether a planned rule runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Run,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlannedOperation {
    pub action: Action,
    #[serde(flatten)]
    pub op: FileOperation,
}

/// Evaluate every guard in `rules` against `context`, keeping table order.
pub fn plan(rules: &[FileOperation], context: &Context) -> Vec<PlannedOperation> {
    rules
        .iter()
        .map(|op| PlannedOperation {
            action: if op.guard.allows(context) {
                Action::Run
            } else {
                Action::Skip
            },
            op: *op,
        })
        .collect()
}
