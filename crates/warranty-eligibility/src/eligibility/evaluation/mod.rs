mod config;
mod policy;
mod rules;

pub use config::EvaluationConfig;
pub use policy::{EvaluationPolicy, ReasonCode, Verdict};
pub use rules::{rule_table, DisqualifyingRule};

pub(crate) use policy::Decision;

use chrono::{Local, NaiveDate};
use policy::{decide, first_disqualifier};
use rules::RuleInput;
use tracing::debug;

use super::answers::{AnswerField, AnswerSnapshot};
use super::outcome::EligibilityOutcome;
use super::steps::QuestionnaireBlueprint;
use super::timing::{self, TimingInfo};

/// Stateless evaluator: every call is a pure function of the snapshot and the date.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    config: EvaluationConfig,
    blueprint: QuestionnaireBlueprint,
}

impl EligibilityEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self::with_blueprint(config, QuestionnaireBlueprint::standard())
    }

    pub fn with_blueprint(config: EvaluationConfig, blueprint: QuestionnaireBlueprint) -> Self {
        Self { config, blueprint }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn blueprint(&self) -> &QuestionnaireBlueprint {
        &self.blueprint
    }

    /// Evaluate against the local calendar date with the configured policy.
    pub fn evaluate(&self, answers: &AnswerSnapshot) -> EligibilityOutcome {
        self.evaluate_on(answers, Local::now().date_naive())
    }

    pub fn evaluate_on(&self, answers: &AnswerSnapshot, today: NaiveDate) -> EligibilityOutcome {
        self.evaluate_with(answers, self.config.policy, today)
    }

    pub fn evaluate_with(
        &self,
        answers: &AnswerSnapshot,
        policy: EvaluationPolicy,
        today: NaiveDate,
    ) -> EligibilityOutcome {
        let missing_fields = self.missing_fields(answers);
        let timing = self.timing(answers, today);
        let input = RuleInput {
            answers,
            timing: &timing,
        };
        let decision = decide(policy, &input, &missing_fields);
        let outcome = EligibilityOutcome::assemble(decision, timing, missing_fields);

        debug!(
            ?policy,
            verdict = outcome.verdict().label(),
            reasons = outcome.reasons().len(),
            missing = outcome.missing_fields().len(),
            "eligibility evaluated"
        );
        outcome
    }

    /// Evaluate a snapshot that may be absent. An absent snapshot is a caller bug and
    /// yields a conservative non-eligible outcome instead of a panic.
    pub fn evaluate_optional(
        &self,
        answers: Option<&AnswerSnapshot>,
        policy: EvaluationPolicy,
        today: NaiveDate,
    ) -> EligibilityOutcome {
        match answers {
            Some(answers) => self.evaluate_with(answers, policy, today),
            None => {
                debug!("eligibility requested without an answer snapshot");
                EligibilityOutcome::assemble(
                    Decision::NonEligible {
                        reasons: ReasonCode::NOTHING_KNOWN.to_vec(),
                        hard_stop: false,
                    },
                    TimingInfo::default(),
                    Vec::new(),
                )
            }
        }
    }

    pub fn missing_fields(&self, answers: &AnswerSnapshot) -> Vec<AnswerField> {
        self.blueprint.missing_fields(answers)
    }

    pub fn timing(&self, answers: &AnswerSnapshot, today: NaiveDate) -> TimingInfo {
        timing::calculate(answers, &self.config.windows, today)
    }

    /// First disqualifier already answered, so the questionnaire can stop early.
    /// Unlike [`Self::evaluate_with`], this ignores completeness.
    pub fn early_exit(&self, answers: &AnswerSnapshot, today: NaiveDate) -> Option<ReasonCode> {
        let timing = self.timing(answers, today);
        first_disqualifier(&RuleInput {
            answers,
            timing: &timing,
        })
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new(EvaluationConfig::default())
    }
}
