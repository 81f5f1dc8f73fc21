//! End-to-end scenarios driven through the public engine facade, mirroring how a
//! questionnaire re-evaluates its snapshot after every answer.

use chrono::NaiveDate;
use serde_json::json;

use warranty_eligibility::eligibility::{
    AnswerSnapshot, EligibilityEngine, EvaluationConfig, EvaluationPolicy, ItemCategory,
    ItemDetail, ReasonCode, SellerType, Territory, TimingAnswer, Usage, Verdict,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
}

fn answers_in_questionnaire_order() -> Vec<AnswerSnapshot> {
    let mut snapshot = AnswerSnapshot::default();
    let mut history = vec![snapshot.clone()];

    snapshot.seller_type = Some(SellerType::Professional);
    history.push(snapshot.clone());
    snapshot.usage = Some(Usage::Personal);
    history.push(snapshot.clone());
    snapshot.item_category = Some(ItemCategory::Good);
    history.push(snapshot.clone());
    snapshot.item_detail = Some(ItemDetail::New);
    history.push(snapshot.clone());
    snapshot.territory = Some(Territory::EuOrFrDirected);
    history.push(snapshot.clone());
    snapshot.purchase_date = NaiveDate::from_ymd_opt(2025, 12, 10);
    history.push(snapshot.clone());
    snapshot.has_defect = Some(true);
    history.push(snapshot);

    history
}

#[test]
fn verdict_stays_indeterminate_until_the_last_answer() {
    let engine = EligibilityEngine::default();
    let history = answers_in_questionnaire_order();
    let (last, partial) = history.split_last().expect("non-empty history");

    for snapshot in partial {
        let outcome = engine.evaluate_on(snapshot, today());
        assert_eq!(outcome.verdict(), Verdict::Indeterminate);
        assert_eq!(outcome.reasons(), &[ReasonCode::InsufficientAnswers]);
        assert!(!outcome.missing_fields().is_empty());
    }

    let outcome = engine.evaluate_on(last, today());
    assert_eq!(outcome.verdict(), Verdict::Eligible);
    assert_eq!(outcome.timing().months_since_purchase, Some(10));
    assert_eq!(outcome.timing().presumption_seller_burden, Some(true));
}

#[test]
fn the_two_policies_differ_only_in_how_many_reasons_they_show() {
    let snapshot: AnswerSnapshot = serde_json::from_value(json!({
        "sellerType": "individual",
        "usage": "professional",
        "itemCategory": "digital_service",
        "itemDetail": "subscription",
        "territory": "outside",
        "timingAnswer": "after_contract",
        "hasDefect": true
    }))
    .expect("snapshot parses");

    let engine = EligibilityEngine::default();
    let all = engine.evaluate_with(&snapshot, EvaluationPolicy::AccumulateAll, today());
    let first = engine.evaluate_with(&snapshot, EvaluationPolicy::ShortCircuit, today());

    assert_eq!(
        all.reasons(),
        &[
            ReasonCode::SellerNotProfessional,
            ReasonCode::NotConsumerUse,
            ReasonCode::TerritoryOutOfScope,
            ReasonCode::SubscriptionEnded,
        ]
    );
    assert_eq!(first.reasons(), &[ReasonCode::SellerNotProfessional]);
    assert!(first.hard_stop());
    assert!(!all.hard_stop());
}

#[test]
fn configured_policy_is_the_default_for_evaluate_on() {
    let engine = EligibilityEngine::new(EvaluationConfig {
        policy: EvaluationPolicy::ShortCircuit,
        ..EvaluationConfig::default()
    });

    let snapshot = AnswerSnapshot {
        seller_type: Some(SellerType::Professional),
        usage: Some(Usage::Personal),
        item_category: Some(ItemCategory::Good),
        item_detail: Some(ItemDetail::Used),
        territory: Some(Territory::Outside),
        timing_answer: Some(TimingAnswer::Expired),
        has_defect: Some(false),
        purchase_date: None,
    };

    let outcome = engine.evaluate_on(&snapshot, today());
    assert_eq!(outcome.reasons(), &[ReasonCode::TerritoryOutOfScope]);
    assert_eq!(
        outcome.summary(),
        "not eligible: the seller is outside the territorial scope"
    );
}

#[test]
fn outcome_json_matches_the_presentation_contract() {
    let engine = EligibilityEngine::default();
    let snapshot: AnswerSnapshot = serde_json::from_value(json!({
        "sellerType": "professional",
        "usage": "personal",
        "itemCategory": "good",
        "itemDetail": "new",
        "territory": "eu_or_fr_directed",
        "purchaseDate": "2024-04-10",
        "hasDefect": true
    }))
    .expect("snapshot parses");

    let value = serde_json::to_value(engine.evaluate_on(&snapshot, today())).expect("serializes");
    assert_eq!(
        value,
        json!({
            "verdict": "non_eligible",
            "reasons": ["time_barred"],
            "timing": {
                "monthsSincePurchase": 30,
                "withinWindow": false,
                "presumptionSellerBurden": false
            },
            "missingFields": [],
            "hardStop": false
        })
    );
}
