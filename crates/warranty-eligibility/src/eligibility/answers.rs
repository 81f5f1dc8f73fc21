use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Who sold the item. Only professional sellers owe the legal warranty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellerType {
    Professional,
    Individual,
}

/// Whether the buyer acted as a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Usage {
    Personal,
    Professional,
}

/// Physical good versus digital content or service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Good,
    DigitalService,
}

/// Second-level precision whose valid values depend on the [`ItemCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemDetail {
    New,
    Used,
    Subscription,
    #[serde(alias = "one_off")]
    OneTime,
}

impl ItemDetail {
    pub fn belongs_to(self, category: ItemCategory) -> bool {
        match category {
            ItemCategory::Good => matches!(self, ItemDetail::New | ItemDetail::Used),
            ItemCategory::DigitalService => {
                matches!(self, ItemDetail::Subscription | ItemDetail::OneTime)
            }
        }
    }
}

/// Seller located in the EU/EEA, or demonstrably targeting the consumer's country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Territory {
    #[serde(alias = "eu")]
    EuOrFrDirected,
    #[serde(alias = "non_eu")]
    Outside,
}

/// Pre-bucketed timing answer. Window answers apply to goods and one-time digital
/// supply, contract answers to ongoing subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingAnswer {
    #[serde(alias = "ok")]
    WithinWindow,
    #[serde(alias = "ko")]
    Expired,
    DuringContract,
    AfterContract,
}

impl TimingAnswer {
    pub fn is_within(self) -> bool {
        matches!(self, TimingAnswer::WithinWindow | TimingAnswer::DuringContract)
    }

    /// Contract-status answers, only asked for ongoing subscriptions.
    pub fn is_contract_answer(self) -> bool {
        matches!(
            self,
            TimingAnswer::DuringContract | TimingAnswer::AfterContract
        )
    }

    /// Whether this answer is one the questionnaire could have asked for the given
    /// category and detail. Unknown parts do not rule an answer out.
    pub fn fits(self, category: Option<ItemCategory>, detail: Option<ItemDetail>) -> bool {
        if self.is_contract_answer() {
            category != Some(ItemCategory::Good)
                && matches!(detail, None | Some(ItemDetail::Subscription))
        } else {
            detail != Some(ItemDetail::Subscription)
        }
    }
}

/// Fields the questionnaire can capture, named as they travel on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerField {
    SellerType,
    Usage,
    ItemCategory,
    ItemDetail,
    Territory,
    TimingAnswer,
    HasDefect,
    PurchaseDate,
}

impl AnswerField {
    pub const fn name(self) -> &'static str {
        match self {
            AnswerField::SellerType => "sellerType",
            AnswerField::Usage => "usage",
            AnswerField::ItemCategory => "itemCategory",
            AnswerField::ItemDetail => "itemDetail",
            AnswerField::Territory => "territory",
            AnswerField::TimingAnswer => "timingAnswer",
            AnswerField::HasDefect => "hasDefect",
            AnswerField::PurchaseDate => "purchaseDate",
        }
    }
}

/// Answers collected so far. Every field stays `None` until its step is completed,
/// and values the questionnaire could not have produced deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireSnapshot")]
pub struct AnswerSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_type: Option<SellerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_category: Option<ItemCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_detail: Option<ItemDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub territory: Option<Territory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing_answer: Option<TimingAnswer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_defect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
}

/// Product type written by the older single-page form.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ProductType {
    Physical,
    Digital,
}

impl From<ProductType> for ItemCategory {
    fn from(value: ProductType) -> Self {
        match value {
            ProductType::Physical => ItemCategory::Good,
            ProductType::Digital => ItemCategory::DigitalService,
        }
    }
}

/// Inbound shape of a snapshot. Older forms write short field names next to the
/// current ones (`seller`, `timing`, `defect`) or in their place (`withinTwoYears`,
/// `productType`); the short names win when both are usable.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSnapshot {
    #[serde(default, deserialize_with = "lenient_choice")]
    seller: Option<SellerType>,
    #[serde(default, deserialize_with = "lenient_choice")]
    seller_type: Option<SellerType>,
    #[serde(default, deserialize_with = "lenient_choice")]
    usage: Option<Usage>,
    #[serde(default, deserialize_with = "lenient_choice")]
    item_category: Option<ItemCategory>,
    #[serde(default, deserialize_with = "lenient_choice")]
    product_type: Option<ProductType>,
    #[serde(default, deserialize_with = "lenient_choice")]
    item_detail: Option<ItemDetail>,
    #[serde(default, deserialize_with = "lenient_choice")]
    territory: Option<Territory>,
    #[serde(default, deserialize_with = "lenient_choice")]
    timing: Option<TimingAnswer>,
    #[serde(default, deserialize_with = "lenient_choice")]
    timing_answer: Option<TimingAnswer>,
    #[serde(default, deserialize_with = "lenient_flag")]
    within_two_years: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    defect: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    has_defect: Option<bool>,
    #[serde(default, deserialize_with = "lenient_date")]
    purchase_date: Option<NaiveDate>,
}

impl From<WireSnapshot> for AnswerSnapshot {
    fn from(wire: WireSnapshot) -> Self {
        let within_two_years = wire.within_two_years.map(|within| {
            if within {
                TimingAnswer::WithinWindow
            } else {
                TimingAnswer::Expired
            }
        });

        Self {
            seller_type: wire.seller.or(wire.seller_type),
            usage: wire.usage,
            item_category: wire
                .item_category
                .or_else(|| wire.product_type.map(ItemCategory::from)),
            item_detail: wire.item_detail,
            territory: wire.territory,
            timing_answer: wire.timing.or(wire.timing_answer).or(within_two_years),
            has_defect: wire.defect.or(wire.has_defect),
            purchase_date: wire.purchase_date,
        }
    }
}

impl AnswerSnapshot {
    /// Item detail, or `None` when it contradicts the answered category.
    pub fn effective_item_detail(&self) -> Option<ItemDetail> {
        let detail = self.item_detail?;
        match self.item_category {
            Some(category) if !detail.belongs_to(category) => None,
            _ => Some(detail),
        }
    }

    /// Timing answer, or `None` when it does not match the category and detail.
    pub fn effective_timing_answer(&self) -> Option<TimingAnswer> {
        let detail = self.effective_item_detail();
        self.timing_answer
            .filter(|answer| answer.fits(self.item_category, detail))
    }

    pub fn is_subscription(&self) -> bool {
        self.item_category == Some(ItemCategory::DigitalService)
            && self.effective_item_detail() == Some(ItemDetail::Subscription)
    }

    pub fn is_answered(&self, field: AnswerField) -> bool {
        match field {
            AnswerField::SellerType => self.seller_type.is_some(),
            AnswerField::Usage => self.usage.is_some(),
            AnswerField::ItemCategory => self.item_category.is_some(),
            AnswerField::ItemDetail => self.effective_item_detail().is_some(),
            AnswerField::Territory => self.territory.is_some(),
            AnswerField::TimingAnswer => self.effective_timing_answer().is_some(),
            AnswerField::HasDefect => self.has_defect.is_some(),
            AnswerField::PurchaseDate => self.purchase_date.is_some(),
        }
    }
}

/// Parse a single questionnaire choice from its wire spelling (aliases included).
pub fn parse_choice<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_value(Value::String(raw.trim().to_string())).ok()
}

pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "oui" => Some(true),
        "false" | "no" | "non" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_purchase_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn lenient_choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let parsed = serde_json::from_value::<T>(value.clone()).ok();
        if parsed.is_none() {
            debug!(%value, "discarding unrecognised answer value");
        }
        parsed
    }))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let parsed = match &value {
            Value::Bool(flag) => Some(*flag),
            Value::String(text) => parse_flag(text),
            _ => None,
        };
        if parsed.is_none() {
            debug!(%value, "discarding unrecognised defect answer");
        }
        parsed
    }))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let parsed = value.as_str().and_then(parse_purchase_date);
        if parsed.is_none() {
            debug!(%value, "discarding unparseable purchase date");
        }
        parsed
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_values_deserialize_as_unanswered() {
        let snapshot: AnswerSnapshot = serde_json::from_value(json!({
            "sellerType": "robot",
            "usage": 42,
            "hasDefect": "maybe",
            "purchaseDate": "last spring",
            "territory": "eu_or_fr_directed",
        }))
        .expect("lenient snapshot");

        assert_eq!(snapshot.seller_type, None);
        assert_eq!(snapshot.usage, None);
        assert_eq!(snapshot.has_defect, None);
        assert_eq!(snapshot.purchase_date, None);
        assert_eq!(snapshot.territory, Some(Territory::EuOrFrDirected));
    }

    #[test]
    fn legacy_spellings_are_accepted() {
        let snapshot: AnswerSnapshot = serde_json::from_value(json!({
            "seller": "professional",
            "territory": "eu",
            "itemCategory": "digital_service",
            "itemDetail": "one_off",
            "timing": "ok",
            "hasDefect": "yes",
        }))
        .expect("legacy snapshot");

        assert_eq!(snapshot.seller_type, Some(SellerType::Professional));
        assert_eq!(snapshot.territory, Some(Territory::EuOrFrDirected));
        assert_eq!(snapshot.item_detail, Some(ItemDetail::OneTime));
        assert_eq!(snapshot.timing_answer, Some(TimingAnswer::WithinWindow));
        assert_eq!(snapshot.has_defect, Some(true));
    }

    #[test]
    fn older_form_fields_fill_in_for_current_ones() {
        let snapshot: AnswerSnapshot = serde_json::from_value(json!({
            "sellerType": "professional",
            "usage": "personal",
            "productType": "physical",
            "itemDetail": "new",
            "territory": "eu",
            "defect": "yes",
            "withinTwoYears": true,
        }))
        .expect("older form snapshot");

        assert_eq!(snapshot.item_category, Some(ItemCategory::Good));
        assert_eq!(snapshot.timing_answer, Some(TimingAnswer::WithinWindow));
        assert_eq!(snapshot.has_defect, Some(true));

        let expired: AnswerSnapshot = serde_json::from_value(json!({
            "productType": "digital",
            "withinTwoYears": false,
            "defect": "no",
        }))
        .expect("older form snapshot");
        assert_eq!(expired.item_category, Some(ItemCategory::DigitalService));
        assert_eq!(expired.timing_answer, Some(TimingAnswer::Expired));
        assert_eq!(expired.has_defect, Some(false));
    }

    #[test]
    fn short_and_current_names_may_appear_together() {
        let snapshot: AnswerSnapshot = serde_json::from_value(json!({
            "seller": "individual",
            "sellerType": "individual",
            "itemCategory": "good",
            "productType": "digital",
            "timing": "ko",
            "timingAnswer": "expired",
            "withinTwoYears": true,
            "defect": "no",
            "hasDefect": true,
        }))
        .expect("form writes both spellings");

        assert_eq!(snapshot.seller_type, Some(SellerType::Individual));
        assert_eq!(snapshot.item_category, Some(ItemCategory::Good));
        assert_eq!(snapshot.timing_answer, Some(TimingAnswer::Expired));
        assert_eq!(snapshot.has_defect, Some(false));

        let fallback: AnswerSnapshot = serde_json::from_value(json!({
            "seller": "robot",
            "sellerType": "professional",
        }))
        .expect("unusable short name falls back");
        assert_eq!(fallback.seller_type, Some(SellerType::Professional));
    }

    #[test]
    fn detail_from_the_other_category_is_ignored() {
        let snapshot = AnswerSnapshot {
            item_category: Some(ItemCategory::Good),
            item_detail: Some(ItemDetail::Subscription),
            timing_answer: Some(TimingAnswer::DuringContract),
            ..AnswerSnapshot::default()
        };

        assert_eq!(snapshot.effective_item_detail(), None);
        assert_eq!(snapshot.effective_timing_answer(), None);
        assert!(!snapshot.is_answered(AnswerField::ItemDetail));
        assert!(!snapshot.is_answered(AnswerField::TimingAnswer));
    }

    #[test]
    fn contract_answers_only_fit_subscriptions() {
        assert!(TimingAnswer::DuringContract.fits(
            Some(ItemCategory::DigitalService),
            Some(ItemDetail::Subscription)
        ));
        assert!(!TimingAnswer::AfterContract.fits(
            Some(ItemCategory::DigitalService),
            Some(ItemDetail::OneTime)
        ));
        assert!(!TimingAnswer::WithinWindow.fits(
            Some(ItemCategory::DigitalService),
            Some(ItemDetail::Subscription)
        ));
        assert!(TimingAnswer::Expired.fits(Some(ItemCategory::Good), None));
    }

    #[test]
    fn serializes_only_answered_fields() {
        let snapshot = AnswerSnapshot {
            seller_type: Some(SellerType::Individual),
            purchase_date: NaiveDate::from_ymd_opt(2026, 1, 15),
            ..AnswerSnapshot::default()
        };

        let value = serde_json::to_value(&snapshot).expect("serializes");
        assert_eq!(
            value,
            json!({ "sellerType": "individual", "purchaseDate": "2026-01-15" })
        );
    }
}
