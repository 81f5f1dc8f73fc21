use serde::{Deserialize, Serialize};

use super::rules::{self, RuleInput};
use crate::eligibility::answers::AnswerField;

/// Top-level classification of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Eligible,
    NonEligible,
    Indeterminate,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Eligible => "eligible",
            Verdict::NonEligible => "non_eligible",
            Verdict::Indeterminate => "indeterminate",
        }
    }
}

/// Stable identifiers for the conditions that keep a case from being eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    SellerNotProfessional,
    NotConsumerUse,
    TerritoryOutOfScope,
    NoDefect,
    TimeBarred,
    SubscriptionEnded,
    /// Carried alone by an indeterminate verdict.
    InsufficientAnswers,
}

impl ReasonCode {
    /// Reasons reported when no snapshot was supplied at all.
    pub const NOTHING_KNOWN: [ReasonCode; 4] = [
        ReasonCode::SellerNotProfessional,
        ReasonCode::NotConsumerUse,
        ReasonCode::TerritoryOutOfScope,
        ReasonCode::NoDefect,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ReasonCode::SellerNotProfessional => "seller_not_professional",
            ReasonCode::NotConsumerUse => "not_consumer_use",
            ReasonCode::TerritoryOutOfScope => "territory_out_of_scope",
            ReasonCode::NoDefect => "no_defect",
            ReasonCode::TimeBarred => "time_barred",
            ReasonCode::SubscriptionEnded => "subscription_ended",
            ReasonCode::InsufficientAnswers => "insufficient_answers",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            ReasonCode::SellerNotProfessional => "the seller is not a professional",
            ReasonCode::NotConsumerUse => "the purchase was not for personal use",
            ReasonCode::TerritoryOutOfScope => "the seller is outside the territorial scope",
            ReasonCode::NoDefect => "no lack of conformity was reported",
            ReasonCode::TimeBarred => "the two-year window has expired",
            ReasonCode::SubscriptionEnded => "the subscription contract has ended",
            ReasonCode::InsufficientAnswers => "more answers are needed",
        }
    }
}

/// How the disqualifying predicates are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationPolicy {
    /// Report every triggered reason so the user sees all blocking issues at once.
    #[default]
    AccumulateAll,
    /// Stop at the first triggered reason and flag it as a hard stop.
    ShortCircuit,
}

impl EvaluationPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "accumulate_all" | "accumulate" | "all" => Some(Self::AccumulateAll),
            "short_circuit" | "first" => Some(Self::ShortCircuit),
            _ => None,
        }
    }
}

/// Rule evaluator output before aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Decision {
    Eligible,
    NonEligible {
        reasons: Vec<ReasonCode>,
        hard_stop: bool,
    },
    Indeterminate,
}

pub(crate) fn decide(
    policy: EvaluationPolicy,
    input: &RuleInput<'_>,
    missing_fields: &[AnswerField],
) -> Decision {
    // Complete answers can still leave the window undeterminable, e.g. a subscription
    // described only by its purchase date.
    if !missing_fields.is_empty() || input.timing.within_window.is_none() {
        return Decision::Indeterminate;
    }

    match policy {
        EvaluationPolicy::AccumulateAll => {
            let reasons: Vec<ReasonCode> = rules::triggered(input).map(|rule| rule.reason).collect();
            if reasons.is_empty() {
                Decision::Eligible
            } else {
                Decision::NonEligible {
                    reasons,
                    hard_stop: false,
                }
            }
        }
        EvaluationPolicy::ShortCircuit => match rules::triggered(input).next() {
            Some(rule) => Decision::NonEligible {
                reasons: vec![rule.reason],
                hard_stop: true,
            },
            None => Decision::Eligible,
        },
    }
}

/// First hard disqualifier already visible in a possibly partial snapshot.
pub(crate) fn first_disqualifier(input: &RuleInput<'_>) -> Option<ReasonCode> {
    rules::triggered(input).next().map(|rule| rule.reason)
}
