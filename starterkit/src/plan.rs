//! Dry-run view of what generation would do for a set of answers.

use serde::Serialize;

use crate::core::resolver::resolve;
use crate::core::rules::{FINALIZE_RULES, MATERIALIZE_RULES, PlannedOperation, plan};
use crate::core::types::{AnswersRecord, Context};

#[derive(Debug, Clone, Serialize)]
pub struct ProjectPlan {
    pub context: Context,
    pub operations: Vec<PlannedOperation>,
    pub cleanup: Vec<PlannedOperation>,
}

pub fn plan_project(answers: &AnswersRecord) -> ProjectPlan {
    let context = resolve(answers);
    let operations = plan(MATERIALIZE_RULES, &context);
    let cleanup = plan(FINALIZE_RULES, &context);
    ProjectPlan {
        context,
        operations,
        cleanup,
    }
}
