//! Test-only helpers: answer/context builders, a minimal template tree and a
//! scripted installer.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Result, anyhow};
use tempfile::TempDir;

use crate::core::resolver::resolve;
use crate::core::types::{AnswersRecord, Context};
use crate::io::answers::AnswerSource;
use crate::io::installer::{InstallOutcome, InstallRequest, Installer};
use crate::io::templates::TemplateTree;

/// Answers with every flag off and no frameworks.
pub fn answers(app_name: &str) -> AnswersRecord {
    AnswersRecord {
        app_name: app_name.to_string(),
        use_firebase: false,
        frameworks: BTreeSet::new(),
        use_gwc: false,
        use_analytics: false,
        include_wct: false,
        include_recipes: false,
    }
}

/// Context resolved from [`answers`].
pub fn context(app_name: &str) -> Context {
    resolve(&answers(app_name))
}

/// Answer source returning a fixed record.
pub struct FixedAnswers(pub AnswersRecord);

impl AnswerSource for FixedAnswers {
    fn collect(&mut self) -> Result<AnswersRecord> {
        Ok(self.0.clone())
    }
}

const FIXTURE_FILES: &[(&str, &str)] = &[
    (".editorconfig", "root = true\n"),
    (".gitattributes", "* text=auto\n"),
    (".gitignore", "node_modules\n"),
    ("config/dev.json", "{}\n"),
    ("app.yaml", "runtime: python27\n"),
    (".jscsrc", "{}\n"),
    (".jshintrc", "{}\n"),
    (".stylelintrc.json", "{}\n"),
    (
        "_bower.json",
        "{\n  \"name\": \"fixture\",\n  \"devDependencies\": {\n    \"web-component-tester\": \"^4.0.0\",\n    \"test-fixture\": \"^1.0.0\"\n  }\n}\n",
    ),
    (
        "gulpfile.js",
        "var gulp = require('gulp');\nrequire('web-component-tester').gulp.init(gulp);\n",
    ),
    ("LICENSE.md", "license\n"),
    ("_package.json", "{\"name\": \"{{ appName }}\"}\n"),
    ("_README.md", "# {{ humanAppName }}\n"),
    ("tasks/deploy-firebase.js", "module.exports = {};\n"),
    ("tasks/build.js", "module.exports = {};\n"),
    ("firebase.json", "{}\n"),
    ("wct.conf.json", "{}\n"),
    ("test/index.html", "<html></html>\n"),
    ("app/elements/elements.html", "<link rel=\"import\">\n"),
    ("app/images/.keep", ""),
    ("app-xtra/_index.html", "<title>{{ humanAppName }}</title>\n"),
    ("app-xtra/_manifest.json", "{\"name\": \"{{ humanAppName }}\"}\n"),
    ("docs/recipe.md", "# Recipe\n"),
];

/// A minimal template tree covering every source the rule table reads.
pub struct TemplateFixture {
    dir: TempDir,
}

impl TemplateFixture {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        for (path, contents) in FIXTURE_FILES {
            let full = dir.path().join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(full, contents)?;
        }
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn tree(&self) -> TemplateTree<'_> {
        TemplateTree::Dir(self.dir.path())
    }
}

/// Installer that records requests and replays a fixed result.
pub struct ScriptedInstaller {
    fail: bool,
    requests: RefCell<Vec<InstallRequest>>,
}

impl ScriptedInstaller {
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<InstallRequest> {
        self.requests.borrow().clone()
    }
}

impl Installer for ScriptedInstaller {
    fn install(&self, request: &InstallRequest, _out: &mut dyn Write) -> Result<InstallOutcome> {
        self.requests.borrow_mut().push(request.clone());
        if request.options.skip_install {
            return Ok(InstallOutcome::Skipped);
        }
        if self.fail {
            return Err(anyhow!("scripted installer failure"));
        }
        Ok(InstallOutcome::Installed)
    }
}
