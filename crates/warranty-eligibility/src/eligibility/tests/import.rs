use super::common::*;
use crate::eligibility::answers::{ItemDetail, SellerType, TimingAnswer};
use crate::eligibility::evaluation::{ReasonCode, Verdict};
use crate::eligibility::import::AnswerImporter;

const EXPORT: &str = "\
session,sellerType,usage,itemCategory,itemDetail,territory,timingAnswer,hasDefect,purchaseDate
s-1,professional,personal,good,new,eu_or_fr_directed,within_window,true,
s-2,individual,personal,good,used,eu,,yes,2024-04-10
s-3,professional,,digital_service,subscription,eu_or_fr_directed,after_contract,no,
";

#[test]
fn importer_reads_sessions_and_blank_cells() {
    let sessions = AnswerImporter::from_reader(EXPORT.as_bytes()).expect("csv parses");

    assert_eq!(sessions.len(), 3);
    assert_eq!(sessions[0].session.as_deref(), Some("s-1"));
    assert_eq!(sessions[0].answers, eligible_good());

    let second = &sessions[1].answers;
    assert_eq!(second.seller_type, Some(SellerType::Individual));
    assert_eq!(second.item_detail, Some(ItemDetail::Used));
    assert_eq!(second.timing_answer, None);
    assert_eq!(second.has_defect, Some(true));
    assert_eq!(second.purchase_date, Some(date(2024, 4, 10)));

    let third = &sessions[2].answers;
    assert_eq!(third.usage, None);
    assert_eq!(third.timing_answer, Some(TimingAnswer::AfterContract));
    assert_eq!(third.has_defect, Some(false));
}

#[test]
fn imported_sessions_evaluate_like_live_answers() {
    let sessions = AnswerImporter::from_reader(EXPORT.as_bytes()).expect("csv parses");
    let engine = engine();
    let verdicts: Vec<Verdict> = sessions
        .iter()
        .map(|session| engine.evaluate_on(&session.answers, today()).verdict())
        .collect();

    assert_eq!(
        verdicts,
        vec![Verdict::Eligible, Verdict::NonEligible, Verdict::Indeterminate]
    );

    let second = engine.evaluate_on(&sessions[1].answers, today());
    assert_eq!(
        second.reasons(),
        &[ReasonCode::SellerNotProfessional, ReasonCode::TimeBarred]
    );
}

#[test]
fn importer_reports_malformed_rows() {
    let malformed = "session,sellerType\ns-1,professional,unexpected\n";
    assert!(AnswerImporter::from_reader(malformed.as_bytes()).is_err());
}
