//! Content transforms for files that are rewritten rather than rendered.

use anyhow::{Context as _, Result, anyhow};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::types::Context;

/// A programmatic rewrite applied to a source file before it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "transform", rename_all = "snake_case")]
pub enum Transform {
    /// Parse a JSON package manifest, set `name` to the app slug and, when
    /// web-component-tester is excluded, drop the listed `devDependencies`.
    Manifest {
        drop_without_wct: &'static [&'static str],
    },
    /// When web-component-tester is excluded, comment out every line that
    /// `require`s `module`.
    CommentOutRequires { module: &'static str },
}

impl Transform {
    pub fn apply(&self, raw: &str, context: &Context) -> Result<String> {
        match *self {
            Transform::Manifest { drop_without_wct } => {
                let dropped: &[&str] = if context.include_wct {
                    &[]
                } else {
                    drop_without_wct
                };
                rewrite_manifest(raw, &context.app_name, dropped)
            }
            Transform::CommentOutRequires { module } => {
                if context.include_wct {
                    Ok(raw.to_string())
                } else {
                    comment_out_requires(raw, module)
                }
            }
        }
    }
}

/// Set `name` and remove `drop` keys from `devDependencies`.
///
/// Key order of the source manifest is kept. A manifest without a
/// `devDependencies` object has nothing to drop.
pub fn rewrite_manifest(raw: &str, name: &str, drop: &[&str]) -> Result<String> {
    let mut manifest: Value = serde_json::from_str(raw).context("parse manifest json")?;
    let fields = manifest
        .as_object_mut()
        .ok_or_else(|| anyhow!("manifest must be a JSON object"))?;

    fields.insert("name".to_string(), Value::String(name.to_string()));

    if let Some(Value::Object(dev)) = fields.get_mut("devDependencies") {
        for key in drop {
            dev.shift_remove(*key);
        }
    }

    let mut out = serde_json::to_string_pretty(&manifest).context("serialize manifest")?;
    out.push('\n');
    Ok(out)
}

/// Prefix `// ` to every line calling `require('<module>')`, keeping indentation.
pub fn comment_out_requires(raw: &str, module: &str) -> Result<String> {
    let pattern = format!(
        r#"(?m)^([ \t]*)(.*require\(\s*['"]{}['"]\s*\).*)$"#,
        regex::escape(module)
    );
    let re = Regex::new(&pattern).context("compile require pattern")?;
    Ok(re.replace_all(raw, "$1// $2").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WCT_DEPS: &[&str] = &["web-component-tester", "test-fixture"];

    fn context(include_wct: bool) -> Context {
        Context {
            app_name: "my-cool-app".to_string(),
            human_app_name: "My Cool App".to_string(),
            use_react: false,
            use_angular: false,
            use_backbone: false,
            use_gwc: false,
            use_analytics: false,
            use_firebase: false,
            include_wct,
            include_recipes: false,
        }
    }

    const MANIFEST: &str = r#"{
  "name": "polymer-starter-kit",
  "private": true,
  "dependencies": {
    "polymer": "Polymer/polymer#^1.2.0"
  },
  "devDependencies": {
    "web-component-tester": "^4.0.0",
    "test-fixture": "PolymerElements/test-fixture#^1.0.0",
    "iron-test-helpers": "^1.0.0"
  }
}"#;

    #[test]
    fn manifest_without_wct_drops_test_dependencies() {
        let transform = Transform::Manifest {
            drop_without_wct: WCT_DEPS,
        };
        let out = transform.apply(MANIFEST, &context(false)).expect("apply");
        let value: Value = serde_json::from_str(&out).expect("parse output");

        assert_eq!(value["name"], "my-cool-app");
        let dev = value["devDependencies"].as_object().expect("dev deps");
        assert!(!dev.contains_key("web-component-tester"));
        assert!(!dev.contains_key("test-fixture"));
        assert_eq!(dev["iron-test-helpers"], "^1.0.0");
    }

    #[test]
    fn manifest_with_wct_keeps_test_dependencies() {
        let transform = Transform::Manifest {
            drop_without_wct: WCT_DEPS,
        };
        let out = transform.apply(MANIFEST, &context(true)).expect("apply");
        let value: Value = serde_json::from_str(&out).expect("parse output");

        assert_eq!(value["name"], "my-cool-app");
        assert_eq!(value["devDependencies"]["web-component-tester"], "^4.0.0");
        assert_eq!(
            value["devDependencies"]["test-fixture"],
            "PolymerElements/test-fixture#^1.0.0"
        );
    }

    #[test]
    fn manifest_keeps_key_order() {
        let out = rewrite_manifest(MANIFEST, "x", &[]).expect("rewrite");
        let name_pos = out.find("\"name\"").expect("name");
        let private_pos = out.find("\"private\"").expect("private");
        let deps_pos = out.find("\"dependencies\"").expect("dependencies");
        assert!(name_pos < private_pos && private_pos < deps_pos);
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn manifest_without_dev_dependencies_is_accepted() {
        let out = rewrite_manifest(r#"{"name":"a"}"#, "b", WCT_DEPS).expect("rewrite");
        assert_eq!(out, "{\n  \"name\": \"b\"\n}\n");
    }

    #[test]
    fn manifest_parse_failure_is_an_error() {
        let err = rewrite_manifest("{ not json", "x", WCT_DEPS).unwrap_err();
        assert!(format!("{err:#}").contains("parse manifest json"));

        let err = rewrite_manifest("[1, 2]", "x", WCT_DEPS).unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn comments_out_require_lines_only() {
        let source = "var gulp = require('gulp');\n\
                      require('web-component-tester').gulp.init(gulp);\n\
                      \x20\x20var wct = require(\"web-component-tester\");\n\
                      gulp.task('default');\n";
        let out = comment_out_requires(source, "web-component-tester").expect("transform");
        assert_eq!(
            out,
            "var gulp = require('gulp');\n\
             // require('web-component-tester').gulp.init(gulp);\n\
             \x20\x20// var wct = require(\"web-component-tester\");\n\
             gulp.task('default');\n"
        );
    }

    #[test]
    fn require_transform_is_identity_with_wct() {
        let transform = Transform::CommentOutRequires {
            module: "web-component-tester",
        };
        let source = "require('web-component-tester').gulp.init(gulp);\n";
        assert_eq!(transform.apply(source, &context(true)).expect("apply"), source);
    }
}
