//! CLI tests for `starterkit plan` and `starterkit new`.
//!
//! Spawns the binary and checks exit codes and output for non-interactive runs.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use starterkit::exit_codes;
use starterkit::test_support::TemplateFixture;

fn starterkit(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_starterkit"))
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("run starterkit")
}

fn write_answers(dir: &Path, body: &str) -> String {
    let path = dir.join("answers.toml");
    fs::write(&path, body).expect("write answers");
    path.display().to_string()
}

#[test]
fn plan_prints_context_and_decisions() {
    let temp = tempfile::tempdir().expect("tempdir");
    let answers = write_answers(
        temp.path(),
        "appName = \"My Cool App!\"\nuseFirebase = true\nincludeWCT = false\n",
    );

    let output = starterkit(temp.path(), &["plan", "--answers", &answers]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let plan: Value = serde_json::from_slice(&output.stdout).expect("plan json");
    assert_eq!(plan["context"]["appName"], "my-cool-app");
    assert_eq!(plan["context"]["humanAppName"], "My Cool App");
    assert_eq!(plan["context"]["useGWC"], true);

    let action = |dest: &str| {
        plan["operations"]
            .as_array()
            .expect("operations")
            .iter()
            .find(|op| op["dest"] == dest)
            .map(|op| op["action"].clone())
            .expect("rule present")
    };
    assert_eq!(action("firebase.json"), "run");
    assert_eq!(action("wct.conf.json"), "skip");
    assert_eq!(action("test"), "skip");
    assert_eq!(action("docs"), "skip");
    assert_eq!(plan["cleanup"][0]["action"], "skip");
}

#[test]
fn plan_rejects_invalid_answers() {
    let temp = tempfile::tempdir().expect("tempdir");
    let answers = write_answers(temp.path(), "useFirebase = true\n");

    let output = starterkit(temp.path(), &["plan", "--answers", &answers]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("appName"));
}

#[test]
fn new_generates_project_without_installing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let answers = write_answers(temp.path(), "appName = \"Demo App\"\nincludeRecipes = true\n");

    let output = starterkit(
        temp.path(),
        &[
            "new",
            "--dest",
            "demo",
            "--answers",
            &answers,
            "--skip-install",
        ],
    );
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let dest = temp.path().join("demo");
    assert!(dest.join("bower.json").is_file());
    assert!(dest.join("docs/README.md").is_file());
    assert!(dest.join("test/index.html").is_file());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("create package.json"));
    assert!(stdout.contains("npm install && bower install"));
}

#[test]
fn skip_install_message_silences_installer_hint() {
    let temp = tempfile::tempdir().expect("tempdir");
    let answers = write_answers(temp.path(), "appName = \"quiet\"\n");

    let output = starterkit(
        temp.path(),
        &[
            "new",
            "--dest",
            "quiet",
            "--answers",
            &answers,
            "--skip-install",
            "--skip-install-message",
        ],
    );
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("npm install"));
}

#[test]
fn template_root_overrides_bundled_tree() {
    let temp = tempfile::tempdir().expect("tempdir");
    let answers = write_answers(temp.path(), "appName = \"custom\"\n");
    let fixture = TemplateFixture::new().expect("fixture");
    fs::write(fixture.root().join(".editorconfig"), "custom = true\n").expect("write");
    let root = fixture.root().display().to_string();

    let output = starterkit(
        temp.path(),
        &[
            "new",
            "--dest",
            "custom",
            "--answers",
            &answers,
            "--skip-install",
            "--template-root",
            &root,
        ],
    );
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let editorconfig = fs::read_to_string(temp.path().join("custom/.editorconfig")).expect("read");
    assert_eq!(editorconfig, "custom = true\n");
    assert!(temp.path().join("custom/tasks/build.js").is_file());
}

#[cfg(unix)]
#[test]
fn installer_failure_exits_with_install_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let answers = write_answers(temp.path(), "appName = \"broken\"\n");
    fs::write(
        temp.path().join("starterkit.toml"),
        "[installer]\ncommands = [[\"sh\", \"-c\", \"echo no registry >&2; exit 1\"]]\n",
    )
    .expect("write config");

    let output = starterkit(
        temp.path(),
        &["new", "--dest", "broken", "--answers", &answers],
    );

    assert_eq!(output.status.code(), Some(exit_codes::INSTALL_FAILED));
    assert!(temp.path().join("broken/package.json").is_file());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no registry"));
}
