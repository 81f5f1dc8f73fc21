use serde::Serialize;

use super::answers::AnswerField;
use super::evaluation::{Decision, ReasonCode, Verdict};
use super::timing::TimingInfo;

/// Result handed to the presentation layer. Only built through [`EligibilityOutcome::assemble`],
/// which keeps `reasons` empty exactly when the verdict is eligible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityOutcome {
    verdict: Verdict,
    reasons: Vec<ReasonCode>,
    timing: TimingInfo,
    missing_fields: Vec<AnswerField>,
    hard_stop: bool,
}

impl EligibilityOutcome {
    pub(crate) fn assemble(
        decision: Decision,
        timing: TimingInfo,
        missing_fields: Vec<AnswerField>,
    ) -> Self {
        let (verdict, reasons, hard_stop) = match decision {
            Decision::Eligible => (Verdict::Eligible, Vec::new(), false),
            Decision::NonEligible { reasons, hard_stop } if !reasons.is_empty() => {
                (Verdict::NonEligible, reasons, hard_stop)
            }
            Decision::NonEligible { .. } | Decision::Indeterminate => (
                Verdict::Indeterminate,
                vec![ReasonCode::InsufficientAnswers],
                false,
            ),
        };

        Self {
            verdict,
            reasons,
            timing,
            missing_fields,
            hard_stop,
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn reasons(&self) -> &[ReasonCode] {
        &self.reasons
    }

    pub fn timing(&self) -> &TimingInfo {
        &self.timing
    }

    pub fn missing_fields(&self) -> &[AnswerField] {
        &self.missing_fields
    }

    /// True when a short-circuit evaluation stopped on an irrecoverable disqualifier.
    pub fn hard_stop(&self) -> bool {
        self.hard_stop
    }

    pub fn is_eligible(&self) -> bool {
        self.verdict == Verdict::Eligible
    }

    pub fn summary(&self) -> String {
        match self.verdict {
            Verdict::Eligible => {
                if self.timing.presumption_seller_burden == Some(true) {
                    "eligible: the seller bears the burden of proof".to_string()
                } else {
                    "eligible".to_string()
                }
            }
            Verdict::NonEligible => {
                let details: Vec<&str> = self.reasons.iter().map(|reason| reason.summary()).collect();
                format!("not eligible: {}", details.join("; "))
            }
            Verdict::Indeterminate => {
                if self.missing_fields.is_empty() {
                    "indeterminate: more answers are needed".to_string()
                } else {
                    let fields: Vec<&str> =
                        self.missing_fields.iter().map(|field| field.name()).collect();
                    format!("indeterminate: answer {}", fields.join(", "))
                }
            }
        }
    }
}
