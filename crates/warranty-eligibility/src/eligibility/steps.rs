use serde::Serialize;

use super::answers::{AnswerField, AnswerSnapshot};

/// Predicate deciding whether a step's field must be answered for a given snapshot.
pub type RequirementPredicate = fn(&AnswerSnapshot) -> bool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StepId {
    Seller,
    Usage,
    ItemCategory,
    ItemDetail,
    Territory,
    Timing,
    Defect,
}

/// Citation shown next to a question. Display only, never consulted by the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalReference {
    pub article: &'static str,
    pub explanation: &'static str,
    pub examples: Vec<&'static str>,
}

/// One questionnaire step and the field it fills.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    pub id: StepId,
    pub field: AnswerField,
    /// Alternate field that satisfies the step when the primary one is unanswered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitute: Option<AnswerField>,
    #[serde(skip)]
    pub required_when: Option<RequirementPredicate>,
    pub title: &'static str,
    pub question: &'static str,
    pub legal: LegalReference,
}

impl StepDefinition {
    pub fn is_conditional(&self) -> bool {
        self.required_when.is_some()
    }

    pub fn is_satisfied(&self, snapshot: &AnswerSnapshot) -> bool {
        snapshot.is_answered(self.field)
            || self
                .substitute
                .map(|field| snapshot.is_answered(field))
                .unwrap_or(false)
    }
}

pub fn is_required(step: &StepDefinition, snapshot: &AnswerSnapshot) -> bool {
    step.required_when
        .map(|predicate| predicate(snapshot))
        .unwrap_or(true)
}

/// Required fields still unanswered, in step order.
pub fn missing_fields(steps: &[StepDefinition], snapshot: &AnswerSnapshot) -> Vec<AnswerField> {
    steps
        .iter()
        .filter(|step| is_required(step, snapshot) && !step.is_satisfied(snapshot))
        .map(|step| step.field)
        .collect()
}

/// Ordered step table backing the questionnaire.
#[derive(Debug, Clone)]
pub struct QuestionnaireBlueprint {
    steps: Vec<StepDefinition>,
}

impl QuestionnaireBlueprint {
    pub fn standard() -> Self {
        Self {
            steps: standard_steps(),
        }
    }

    pub fn from_steps(steps: Vec<StepDefinition>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn step(&self, id: StepId) -> Option<&StepDefinition> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn missing_fields(&self, snapshot: &AnswerSnapshot) -> Vec<AnswerField> {
        missing_fields(&self.steps, snapshot)
    }
}

impl Default for QuestionnaireBlueprint {
    fn default() -> Self {
        Self::standard()
    }
}

fn category_answered(snapshot: &AnswerSnapshot) -> bool {
    snapshot.item_category.is_some()
}

fn standard_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition {
            id: StepId::Seller,
            field: AnswerField::SellerType,
            substitute: None,
            required_when: None,
            title: "Seller type",
            question: "Did you buy from a professional seller?",
            legal: LegalReference {
                article: "L.217-3",
                explanation: "The legal conformity warranty covers sales from a professional to a consumer.",
                examples: vec![
                    "Covered: high-street retailer, brand store",
                    "Covered: professional seller on a marketplace",
                    "Not covered: sale between private individuals",
                ],
            },
        },
        StepDefinition {
            id: StepId::Usage,
            field: AnswerField::Usage,
            substitute: None,
            required_when: None,
            title: "Product usage",
            question: "Was the purchase made for personal (consumer) use?",
            legal: LegalReference {
                article: "Liminary article (Consumer Code)",
                explanation: "A consumer is a natural person acting outside any trade, business, craft or profession.",
                examples: vec![
                    "Covered: household use",
                    "Covered: gift to a relative",
                    "Not covered: purchase for business resale",
                ],
            },
        },
        StepDefinition {
            id: StepId::ItemCategory,
            field: AnswerField::ItemCategory,
            substitute: None,
            required_when: None,
            title: "Purchase category",
            question: "Is the purchase a physical good or digital content/service?",
            legal: LegalReference {
                article: "L.217-3 ; L.224-25-12",
                explanation: "Physical goods and digital content or services follow distinct time limits.",
                examples: vec![
                    "Good: smartphone, appliance, car",
                    "Digital: application, SaaS, streaming",
                ],
            },
        },
        StepDefinition {
            id: StepId::ItemDetail,
            field: AnswerField::ItemDetail,
            substitute: None,
            required_when: Some(category_answered),
            title: "Precision",
            question: "New or used good; one-time supply or subscription?",
            legal: LegalReference {
                article: "L.217-3 ; L.217-7 ; L.224-25-12",
                explanation: "Goods: new versus used changes the presumption period. Digital: one-time versus continuous supply.",
                examples: vec!["New / Used", "One-time / Subscription"],
            },
        },
        StepDefinition {
            id: StepId::Territory,
            field: AnswerField::Territory,
            substitute: None,
            required_when: None,
            title: "Territory",
            question: "Is the seller in the EU/EEA or directing its activity to France?",
            legal: LegalReference {
                article: "Territorial scope (assessed from indications)",
                explanation: "Consumer law applies when the professional's activity targets consumers in France.",
                examples: vec![
                    "Website in French with prices in euros",
                    "Delivery to France",
                    "French-speaking after-sales service",
                ],
            },
        },
        StepDefinition {
            id: StepId::Timing,
            field: AnswerField::TimingAnswer,
            substitute: Some(AnswerField::PurchaseDate),
            required_when: None,
            title: "Age / performance period",
            question: "Is the purchase less than two years old, or is the subscription still running?",
            legal: LegalReference {
                article: "L.217-3 ; L.217-7 ; L.224-25-13",
                explanation: "Goods: two-year action window with a presumption period. Subscriptions: conformity is owed for the whole contract.",
                examples: vec![
                    "New good: two-year window",
                    "Used good: no presumption in favour of the buyer",
                    "One-time digital supply: two years",
                    "Subscription: while the contract runs",
                ],
            },
        },
        StepDefinition {
            id: StepId::Defect,
            field: AnswerField::HasDefect,
            substitute: None,
            required_when: None,
            title: "Nature of the problem",
            question: "Does the product or service show a lack of conformity?",
            legal: LegalReference {
                article: "L.217-5",
                explanation: "Conformity covers contractual criteria and the qualities a consumer can legitimately expect.",
                examples: vec![
                    "Covered: premature breakdown",
                    "Covered: missing feature",
                    "Not covered: misuse or deliberate damage",
                ],
            },
        },
    ]
}
