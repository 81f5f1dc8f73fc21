//! Legal-warranty eligibility: answer model, questionnaire steps, timing assessment,
//! the disqualifying rule table and the aggregated outcome.
//!
//! Every operation here is a pure function of an answer snapshot (and, for timing, the
//! evaluation date). Callers may re-evaluate on every answer change.

pub mod answers;
pub mod evaluation;
pub mod import;
pub mod outcome;
pub mod router;
pub mod steps;
pub mod timing;

#[cfg(test)]
mod tests;

pub use answers::{
    AnswerField, AnswerSnapshot, ItemCategory, ItemDetail, SellerType, Territory, TimingAnswer,
    Usage,
};
pub use evaluation::{
    rule_table, DisqualifyingRule, EligibilityEngine, EvaluationConfig, EvaluationPolicy,
    ReasonCode, Verdict,
};
pub use import::{AnswerImporter, ImportError, ImportedAnswers};
pub use outcome::EligibilityOutcome;
pub use router::eligibility_router;
pub use steps::{
    is_required, missing_fields, LegalReference, QuestionnaireBlueprint, StepDefinition, StepId,
};
pub use timing::{months_between, TimingInfo, TimingWindows};
