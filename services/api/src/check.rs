use crate::infra::{parse_answer, parse_date, parse_defect, parse_policy};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use warranty_eligibility::config::AppConfig;
use warranty_eligibility::eligibility::{
    AnswerImporter, AnswerSnapshot, EligibilityEngine, EligibilityOutcome, EvaluationPolicy,
    ItemCategory, ItemDetail, QuestionnaireBlueprint, SellerType, Territory, TimingAnswer, Usage,
    Verdict,
};
use warranty_eligibility::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct CheckArgs {
    /// Seller type: professional | individual
    #[arg(long, value_parser = parse_answer::<SellerType>)]
    pub(crate) seller: Option<SellerType>,
    /// Purchase usage: personal | professional
    #[arg(long, value_parser = parse_answer::<Usage>)]
    pub(crate) usage: Option<Usage>,
    /// Item category: good | digital_service
    #[arg(long, value_parser = parse_answer::<ItemCategory>)]
    pub(crate) category: Option<ItemCategory>,
    /// Item detail: new | used | subscription | one_time
    #[arg(long, value_parser = parse_answer::<ItemDetail>)]
    pub(crate) detail: Option<ItemDetail>,
    /// Territory: eu_or_fr_directed | outside
    #[arg(long, value_parser = parse_answer::<Territory>)]
    pub(crate) territory: Option<Territory>,
    /// Bucketed timing answer, within_window | expired | during_contract | after_contract
    #[arg(long, value_parser = parse_answer::<TimingAnswer>)]
    pub(crate) timing: Option<TimingAnswer>,
    /// Whether a defect was observed: yes | no
    #[arg(long, value_parser = parse_defect)]
    pub(crate) defect: Option<bool>,
    /// Exact purchase date (YYYY-MM-DD), used when no timing bucket is given
    #[arg(long, value_parser = parse_date)]
    pub(crate) purchase_date: Option<NaiveDate>,
    /// Override the configured evaluation policy
    #[arg(long, value_parser = parse_policy)]
    pub(crate) policy: Option<EvaluationPolicy>,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the outcome as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

impl CheckArgs {
    fn snapshot(&self) -> AnswerSnapshot {
        AnswerSnapshot {
            seller_type: self.seller,
            usage: self.usage,
            item_category: self.category,
            item_detail: self.detail,
            territory: self.territory,
            timing_answer: self.timing,
            has_defect: self.defect,
            purchase_date: self.purchase_date,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Saved-answers CSV export (one session per row)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Override the configured evaluation policy
    #[arg(long, value_parser = parse_policy)]
    pub(crate) policy: Option<EvaluationPolicy>,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let engine = configured_engine()?;
    let policy = args.policy.unwrap_or(engine.config().policy);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let outcome = engine.evaluate_with(&args.snapshot(), policy, today);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    render_outcome(&outcome, policy, today);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs { csv, policy, today } = args;

    let engine = configured_engine()?;
    let policy = policy.unwrap_or(engine.config().policy);
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let sessions = AnswerImporter::from_path(&csv)?;

    println!(
        "Re-evaluating {} saved session(s) from {} on {}",
        sessions.len(),
        csv.display(),
        today
    );

    let mut tally = VerdictTally::default();
    for (index, imported) in sessions.iter().enumerate() {
        let outcome = engine.evaluate_with(&imported.answers, policy, today);
        tally.record(outcome.verdict());
        let label = imported
            .session
            .clone()
            .unwrap_or_else(|| format!("row {}", index + 1));
        println!("- {label}: {}", outcome.summary());
    }

    println!(
        "Totals: {} eligible | {} not eligible | {} indeterminate",
        tally.eligible, tally.non_eligible, tally.indeterminate
    );
    Ok(())
}

pub(crate) fn run_steps() -> Result<(), AppError> {
    let blueprint = QuestionnaireBlueprint::standard();
    println!("Legal warranty questionnaire");
    for (index, step) in blueprint.steps().iter().enumerate() {
        let marker = if step.is_conditional() {
            " (conditional)"
        } else {
            ""
        };
        println!("{}. {}{}", index + 1, step.title, marker);
        println!("   {}", step.question);
        println!("   {}: {}", step.legal.article, step.legal.explanation);
    }
    Ok(())
}

fn configured_engine() -> Result<EligibilityEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(EligibilityEngine::new(config.eligibility))
}

fn render_outcome(outcome: &EligibilityOutcome, policy: EvaluationPolicy, today: NaiveDate) {
    println!("Legal warranty eligibility ({today}, {policy:?})");
    println!("- Verdict: {}", outcome.verdict().label());
    println!("- {}", outcome.summary());

    let timing = outcome.timing();
    if let Some(months) = timing.months_since_purchase {
        println!("- Months since purchase: {months}");
    }
    if let Some(within) = timing.within_window {
        println!(
            "- Within warranty window: {}",
            if within { "yes" } else { "no" }
        );
    }
    if let Some(presumption) = timing.presumption_seller_burden {
        println!(
            "- Burden of proof: {}",
            if presumption { "seller" } else { "buyer" }
        );
    }
    if outcome.hard_stop() {
        println!("- Questionnaire stopped on the first disqualifier");
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct VerdictTally {
    eligible: usize,
    non_eligible: usize,
    indeterminate: usize,
}

impl VerdictTally {
    fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Eligible => self.eligible += 1,
            Verdict::NonEligible => self.non_eligible += 1,
            Verdict::Indeterminate => self.indeterminate += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_flags_become_a_snapshot() {
        let args = CheckArgs {
            seller: Some(SellerType::Professional),
            usage: Some(Usage::Personal),
            category: Some(ItemCategory::Good),
            detail: Some(ItemDetail::New),
            territory: Some(Territory::EuOrFrDirected),
            timing: Some(TimingAnswer::WithinWindow),
            defect: Some(true),
            ..CheckArgs::default()
        };

        let engine = EligibilityEngine::default();
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date");
        let outcome = engine.evaluate_on(&args.snapshot(), today);
        assert_eq!(outcome.verdict(), Verdict::Eligible);
    }

    #[test]
    fn tally_counts_each_verdict() {
        let mut tally = VerdictTally::default();
        tally.record(Verdict::Eligible);
        tally.record(Verdict::Indeterminate);
        tally.record(Verdict::Indeterminate);
        assert_eq!(
            tally,
            VerdictTally {
                eligible: 1,
                non_eligible: 0,
                indeterminate: 2,
            }
        );
    }
}
