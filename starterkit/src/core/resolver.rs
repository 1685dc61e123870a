//! Answers → context resolution.

use super::slug::{humanize, slugify};
use super::types::{AnswersRecord, Context, Framework};

/// Derive the template context from interview answers.
///
/// This is the only place the raw framework selection is interpreted; later stages
/// read the `use_*` booleans. Resolution is total and cannot fail.
pub fn resolve(answers: &AnswersRecord) -> Context {
    let app_name = slugify(&answers.app_name);
    let human_app_name = humanize(&app_name);

    Context {
        app_name,
        human_app_name,
        use_react: answers.frameworks.contains(&Framework::React),
        use_angular: answers.frameworks.contains(&Framework::Angular),
        use_backbone: answers.frameworks.contains(&Framework::Backbone),
        use_gwc: answers.use_gwc,
        use_analytics: answers.use_analytics,
        use_firebase: answers.use_firebase,
        include_wct: answers.include_wct,
        include_recipes: answers.include_recipes,
    }
}
