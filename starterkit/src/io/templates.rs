//! Template tree access: the tree compiled into the binary, or a directory on disk.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, anyhow};
use walkdir::WalkDir;

macro_rules! bundled {
    ($path:literal) => {
        (
            $path,
            include_bytes!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/templates/polymer-starter-kit-plus/",
                $path
            )) as &[u8],
        )
    };
}

/// Every file of the bundled Polymer Starter Kit Plus tree, keyed by relative path.
const BUNDLED: &[(&str, &[u8])] = &[
    bundled!(".editorconfig"),
    bundled!(".gitattributes"),
    bundled!(".gitignore"),
    bundled!(".jscsrc"),
    bundled!(".jshintrc"),
    bundled!(".stylelintrc.json"),
    bundled!("LICENSE.md"),
    bundled!("_README.md"),
    bundled!("_bower.json"),
    bundled!("_package.json"),
    bundled!("app-xtra/_index.html"),
    bundled!("app-xtra/_manifest.json"),
    bundled!("app.yaml"),
    bundled!("app/elements/elements.html"),
    bundled!("app/elements/my-greeting/my-greeting.html"),
    bundled!("app/elements/my-list/my-list.html"),
    bundled!("app/elements/routing.html"),
    bundled!("app/images/.gitkeep"),
    bundled!("app/robots.txt"),
    bundled!("app/scripts/app.js"),
    bundled!("app/styles/app-theme.html"),
    bundled!("app/styles/main.css"),
    bundled!("app/sw-import.js"),
    bundled!("config/default.json"),
    bundled!("config/production.json"),
    bundled!("docs/README.md"),
    bundled!("docs/chrome-dev-editor.md"),
    bundled!("docs/deploy-to-firebase.md"),
    bundled!("docs/deploy-to-github-pages.md"),
    bundled!("firebase.json"),
    bundled!("gulpfile.js"),
    bundled!("tasks/cache-config.js"),
    bundled!("tasks/deploy-firebase.js"),
    bundled!("tasks/deploy-gh-pages.js"),
    bundled!("test/index.html"),
    bundled!("test/my-greeting-basic.html"),
    bundled!("test/my-list-basic.html"),
    bundled!("wct.conf.json"),
];

/// Where rule sources are read from. Paths passed in are relative to the tree root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateTree<'a> {
    /// The tree compiled into the binary.
    Bundled,
    /// A template tree on disk (`--template-root`).
    Dir(&'a Path),
}

impl TemplateTree<'_> {
    /// Human-readable location of `rel`, for logs and error messages.
    pub fn describe(&self, rel: &Path) -> String {
        match self {
            TemplateTree::Bundled => format!("<bundled>/{}", rel.display()),
            TemplateTree::Dir(root) => root.join(rel).display().to_string(),
        }
    }

    pub fn is_file(&self, rel: &Path) -> bool {
        match self {
            TemplateTree::Bundled => bundled_entry(rel).is_some(),
            TemplateTree::Dir(root) => root.join(rel).is_file(),
        }
    }

    pub fn read(&self, rel: &Path) -> Result<Cow<'static, [u8]>> {
        match self {
            TemplateTree::Bundled => bundled_entry(rel)
                .map(Cow::Borrowed)
                .ok_or_else(|| anyhow!("no bundled template {}", rel.display())),
            TemplateTree::Dir(root) => {
                let path = root.join(rel);
                let bytes =
                    fs::read(&path).with_context(|| format!("read template {}", path.display()))?;
                Ok(Cow::Owned(bytes))
            }
        }
    }

    /// Files below the directory `rel`, relative to it, sorted by path.
    pub fn files_under(&self, rel: &Path) -> Result<Vec<PathBuf>> {
        let mut files = match self {
            TemplateTree::Bundled => BUNDLED
                .iter()
                .filter_map(|(path, _)| Path::new(path).strip_prefix(rel).ok())
                .map(Path::to_path_buf)
                .collect::<Vec<_>>(),
            TemplateTree::Dir(root) => walk_files(&root.join(rel))?,
        };
        if files.is_empty() {
            return Err(anyhow!("template directory {} is empty or missing", self.describe(rel)));
        }
        files.sort();
        Ok(files)
    }
}

fn bundled_entry(rel: &Path) -> Option<&'static [u8]> {
    BUNDLED
        .iter()
        .find(|(path, _)| Path::new(path) == rel)
        .map(|(_, bytes)| *bytes)
}

fn walk_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry.with_context(|| format!("walk {}", dir.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(dir)
            .with_context(|| format!("relativize {}", entry.path().display()))?;
        files.push(rel.to_path_buf());
    }
    Ok(files)
}
