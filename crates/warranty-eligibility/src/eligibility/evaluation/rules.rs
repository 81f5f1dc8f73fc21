use super::policy::ReasonCode;
use crate::eligibility::answers::{AnswerSnapshot, SellerType, Territory, TimingAnswer, Usage};
use crate::eligibility::timing::TimingInfo;

/// Facts a disqualifying predicate can look at.
pub(crate) struct RuleInput<'a> {
    pub answers: &'a AnswerSnapshot,
    pub timing: &'a TimingInfo,
}

/// One row of the precedence table. Predicates only fire on answered facts.
#[derive(Clone, Copy)]
pub struct DisqualifyingRule {
    pub order: u8,
    pub reason: ReasonCode,
    pub description: &'static str,
    predicate: fn(&RuleInput<'_>) -> bool,
}

impl DisqualifyingRule {
    pub(crate) fn matches(&self, input: &RuleInput<'_>) -> bool {
        (self.predicate)(input)
    }
}

impl std::fmt::Debug for DisqualifyingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisqualifyingRule")
            .field("order", &self.order)
            .field("reason", &self.reason)
            .field("description", &self.description)
            .finish()
    }
}

static RULES: [DisqualifyingRule; 6] = [
    DisqualifyingRule {
        order: 1,
        reason: ReasonCode::SellerNotProfessional,
        description: "seller is not professional",
        predicate: seller_not_professional,
    },
    DisqualifyingRule {
        order: 2,
        reason: ReasonCode::NotConsumerUse,
        description: "usage is not personal",
        predicate: not_consumer_use,
    },
    DisqualifyingRule {
        order: 3,
        reason: ReasonCode::TerritoryOutOfScope,
        description: "seller outside the territorial scope",
        predicate: territory_out_of_scope,
    },
    DisqualifyingRule {
        order: 4,
        reason: ReasonCode::NoDefect,
        description: "no lack of conformity reported",
        predicate: no_defect,
    },
    DisqualifyingRule {
        order: 5,
        reason: ReasonCode::TimeBarred,
        description: "outer eligibility window has expired",
        predicate: time_barred,
    },
    DisqualifyingRule {
        order: 5,
        reason: ReasonCode::SubscriptionEnded,
        description: "digital subscription contract has ended",
        predicate: subscription_ended,
    },
];

/// The fixed precedence table, in evaluation order.
pub fn rule_table() -> &'static [DisqualifyingRule] {
    &RULES
}

pub(crate) fn triggered<'r>(
    input: &'r RuleInput<'r>,
) -> impl Iterator<Item = &'static DisqualifyingRule> + 'r {
    RULES.iter().filter(move |rule| rule.matches(input))
}

fn seller_not_professional(input: &RuleInput<'_>) -> bool {
    matches!(input.answers.seller_type, Some(seller) if seller != SellerType::Professional)
}

fn not_consumer_use(input: &RuleInput<'_>) -> bool {
    matches!(input.answers.usage, Some(usage) if usage != Usage::Personal)
}

fn territory_out_of_scope(input: &RuleInput<'_>) -> bool {
    input.answers.territory == Some(Territory::Outside)
}

fn no_defect(input: &RuleInput<'_>) -> bool {
    input.answers.has_defect == Some(false)
}

fn time_barred(input: &RuleInput<'_>) -> bool {
    input.timing.within_window == Some(false) && !judged_by_contract(input.answers)
}

fn subscription_ended(input: &RuleInput<'_>) -> bool {
    input.timing.within_window == Some(false) && judged_by_contract(input.answers)
}

/// Subscriptions, and any snapshot whose timing answer speaks about a contract.
fn judged_by_contract(answers: &AnswerSnapshot) -> bool {
    answers.is_subscription()
        || answers
            .effective_timing_answer()
            .is_some_and(TimingAnswer::is_contract_answer)
}
