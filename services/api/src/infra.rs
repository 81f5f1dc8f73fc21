use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use warranty_eligibility::eligibility::answers::parse_choice;
use warranty_eligibility::eligibility::EvaluationPolicy;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_policy(raw: &str) -> Result<EvaluationPolicy, String> {
    EvaluationPolicy::parse(raw)
        .ok_or_else(|| format!("unknown policy '{raw}' (expected accumulate_all or short_circuit)"))
}

/// Clap value parser for any questionnaire choice, using its wire spelling.
pub(crate) fn parse_answer<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, String> {
    parse_choice(raw).ok_or_else(|| format!("'{raw}' is not a valid answer for this question"))
}

pub(crate) fn parse_defect(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => Ok(true),
        "false" | "no" => Ok(false),
        _ => Err(format!("'{raw}' is not yes/no")),
    }
}
