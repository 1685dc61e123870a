//! Shared deterministic types for scaffolding core logic.
//!
//! These types define stable contracts between the answer collector, the context
//! resolver and the materialization rules. They carry no I/O.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Framework integrations offered by the interview.
///
/// Deserializes through [`Framework::from_name`], so names are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Framework {
    React,
    Angular,
    Backbone,
}

impl Framework {
    /// Every choice, in the order the interview lists them.
    pub const ALL: [Framework; 3] = [Framework::React, Framework::Angular, Framework::Backbone];

    pub fn as_str(self) -> &'static str {
        match self {
            Framework::React => "React",
            Framework::Angular => "Angular",
            Framework::Backbone => "Backbone",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|framework| framework.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl TryFrom<String> for Framework {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name).ok_or_else(|| format!("unknown framework `{name}`"))
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw interview answers, exactly as collected.
///
/// Created once by a collector and consumed once by [`crate::core::resolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswersRecord {
    pub app_name: String,
    pub use_firebase: bool,
    pub frameworks: BTreeSet<Framework>,
    #[serde(rename = "useGWC")]
    pub use_gwc: bool,
    pub use_analytics: bool,
    #[serde(rename = "includeWCT")]
    pub include_wct: bool,
    pub include_recipes: bool,
}

/// Derived, immutable configuration consumed by every materialization rule and by
/// template rendering.
///
/// Field names serialize in camelCase because templates reference them that way
/// (`{{ appName }}`, `{% if useFirebase %}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub app_name: String,
    pub human_app_name: String,
    pub use_react: bool,
    pub use_angular: bool,
    pub use_backbone: bool,
    #[serde(rename = "useGWC")]
    pub use_gwc: bool,
    pub use_analytics: bool,
    pub use_firebase: bool,
    #[serde(rename = "includeWCT")]
    pub include_wct: bool,
    pub include_recipes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_lookup_ignores_case_and_whitespace() {
        assert_eq!(Framework::from_name(" react "), Some(Framework::React));
        assert_eq!(Framework::from_name("ANGULAR"), Some(Framework::Angular));
        assert_eq!(Framework::from_name("Ember"), None);
    }

    #[test]
    fn framework_deserializes_case_insensitively() {
        let parsed: Vec<Framework> =
            serde_json::from_str(r#"["react", "BACKBONE", "Angular"]"#).expect("parse");
        assert_eq!(
            parsed,
            vec![Framework::React, Framework::Backbone, Framework::Angular]
        );

        let err = serde_json::from_str::<Framework>(r#""ember""#).unwrap_err();
        assert!(err.to_string().contains("unknown framework `ember`"));
        assert_eq!(
            serde_json::to_string(&Framework::React).expect("serialize"),
            r#""React""#
        );
    }

    #[test]
    fn context_serializes_with_template_keys() {
        let context = Context {
            app_name: "demo".to_string(),
            human_app_name: "Demo".to_string(),
            use_react: true,
            use_angular: false,
            use_backbone: false,
            use_gwc: true,
            use_analytics: false,
            use_firebase: false,
            include_wct: true,
            include_recipes: false,
        };

        let value = serde_json::to_value(&context).expect("serialize context");
        let keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            vec![
                "appName",
                "humanAppName",
                "useReact",
                "useAngular",
                "useBackbone",
                "useGWC",
                "useAnalytics",
                "useFirebase",
                "includeWCT",
                "includeRecipes",
            ]
        );
    }
}
