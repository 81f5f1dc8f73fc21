use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::answers::{AnswerSnapshot, ItemCategory, ItemDetail};

pub const DEFAULT_OUTER_WINDOW_MONTHS: u32 = 24;
pub const DEFAULT_PRESUMPTION_MONTHS: u32 = 12;
pub const AVERAGE_MONTH_DAYS: f64 = 30.4375;

/// Statutory limits used to bucket an exact purchase date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingWindows {
    pub outer_window_months: u32,
    pub presumption_months: u32,
    pub average_month_days: f64,
}

impl Default for TimingWindows {
    fn default() -> Self {
        Self {
            outer_window_months: DEFAULT_OUTER_WINDOW_MONTHS,
            presumption_months: DEFAULT_PRESUMPTION_MONTHS,
            average_month_days: AVERAGE_MONTH_DAYS,
        }
    }
}

/// Derived timing assessment. `None` means unknown, which is distinct from `Some(false)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_since_purchase: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_window: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presumption_seller_burden: Option<bool>,
}

impl TimingInfo {
    pub fn is_unknown(&self) -> bool {
        *self == Self::default()
    }
}

/// Whole months between purchase and evaluation, using an average month length.
/// Purchases dated after `today` count as zero months.
pub fn months_between(purchase: NaiveDate, today: NaiveDate, average_month_days: f64) -> u32 {
    let days = today.signed_duration_since(purchase).num_days();
    if days <= 0 || average_month_days <= 0.0 {
        return 0;
    }
    (days as f64 / average_month_days).floor() as u32
}

pub fn calculate(snapshot: &AnswerSnapshot, windows: &TimingWindows, today: NaiveDate) -> TimingInfo {
    let category = snapshot.item_category;
    let detail = snapshot.effective_item_detail();
    let months_since_purchase = snapshot
        .purchase_date
        .map(|purchase| months_between(purchase, today, windows.average_month_days));

    // A bucketed answer mirrors the questionnaire's own wording and wins over the date.
    // The date can still place a new good on either side of the presumption period.
    if let Some(answer) = snapshot.effective_timing_answer() {
        let within = answer.is_within();
        let presumption_seller_burden = match (category, detail) {
            (Some(ItemCategory::Good), Some(ItemDetail::Used)) => Some(false),
            (Some(ItemCategory::Good), Some(ItemDetail::New)) if !within => Some(false),
            (Some(ItemCategory::Good), Some(ItemDetail::New)) => months_since_purchase
                .map(|months| months <= windows.presumption_months),
            _ => None,
        };
        return TimingInfo {
            months_since_purchase,
            within_window: Some(within),
            presumption_seller_burden,
        };
    }

    let Some(months) = months_since_purchase else {
        return TimingInfo::default();
    };

    let within_window = match (category, detail) {
        (Some(ItemCategory::Good), _)
        | (Some(ItemCategory::DigitalService), Some(ItemDetail::OneTime)) => {
            Some(months <= windows.outer_window_months)
        }
        _ => None,
    };

    let presumption_seller_burden = match (category, detail) {
        (Some(ItemCategory::Good), Some(ItemDetail::New)) => {
            Some(months <= windows.presumption_months)
        }
        (Some(ItemCategory::Good), Some(ItemDetail::Used)) => Some(false),
        _ => None,
    };

    TimingInfo {
        months_since_purchase: Some(months),
        within_window,
        presumption_seller_burden,
    }
}
