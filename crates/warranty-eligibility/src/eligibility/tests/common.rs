use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::eligibility::answers::{
    AnswerSnapshot, ItemCategory, ItemDetail, SellerType, Territory, TimingAnswer, Usage,
};
use crate::eligibility::evaluation::{EligibilityEngine, EvaluationConfig, EvaluationPolicy};
use crate::eligibility::router::eligibility_router;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Purchase dates whose age relative to [`today`] is the given whole number of months.
pub(super) fn purchased_months_ago(months: u32) -> NaiveDate {
    match months {
        10 => date(2025, 12, 10),
        11 => date(2025, 10, 20),
        12 => date(2025, 10, 10),
        20 => date(2025, 2, 10),
        24 => date(2024, 10, 10),
        25 => date(2024, 9, 1),
        30 => date(2024, 4, 10),
        other => panic!("no fixture for {other} months"),
    }
}

pub(super) fn eligible_good() -> AnswerSnapshot {
    AnswerSnapshot {
        seller_type: Some(SellerType::Professional),
        usage: Some(Usage::Personal),
        item_category: Some(ItemCategory::Good),
        item_detail: Some(ItemDetail::New),
        territory: Some(Territory::EuOrFrDirected),
        timing_answer: Some(TimingAnswer::WithinWindow),
        has_defect: Some(true),
        purchase_date: None,
    }
}

pub(super) fn dated_good(detail: ItemDetail, months: u32) -> AnswerSnapshot {
    AnswerSnapshot {
        item_detail: Some(detail),
        timing_answer: None,
        purchase_date: Some(purchased_months_ago(months)),
        ..eligible_good()
    }
}

pub(super) fn subscription(timing_answer: TimingAnswer) -> AnswerSnapshot {
    AnswerSnapshot {
        item_category: Some(ItemCategory::DigitalService),
        item_detail: Some(ItemDetail::Subscription),
        timing_answer: Some(timing_answer),
        ..eligible_good()
    }
}

/// Every disqualifying predicate triggers on this snapshot.
pub(super) fn hopeless_good() -> AnswerSnapshot {
    AnswerSnapshot {
        seller_type: Some(SellerType::Individual),
        usage: Some(Usage::Professional),
        territory: Some(Territory::Outside),
        timing_answer: Some(TimingAnswer::Expired),
        has_defect: Some(false),
        ..eligible_good()
    }
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::default()
}

pub(super) fn short_circuit_engine() -> EligibilityEngine {
    EligibilityEngine::new(EvaluationConfig {
        policy: EvaluationPolicy::ShortCircuit,
        ..EvaluationConfig::default()
    })
}

pub(super) fn router() -> axum::Router {
    eligibility_router(Arc::new(engine()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
