use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::answers::{parse_choice, parse_flag, parse_purchase_date, AnswerSnapshot};

/// Failure while reading a saved-answers CSV export.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read answer export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid answer CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// One saved questionnaire session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedAnswers {
    pub session: Option<String>,
    pub answers: AnswerSnapshot,
}

/// Reads CSV exports whose headers match the snapshot's wire field names.
pub struct AnswerImporter;

impl AnswerImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ImportedAnswers>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ImportedAnswers>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut sessions = Vec::new();

        for record in csv_reader.deserialize::<AnswerRow>() {
            let row = record?;
            sessions.push(row.into_imported());
        }

        Ok(sessions)
    }
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    session: Option<String>,
    #[serde(rename = "sellerType", default, deserialize_with = "empty_string_as_none")]
    seller_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    usage: Option<String>,
    #[serde(rename = "itemCategory", default, deserialize_with = "empty_string_as_none")]
    item_category: Option<String>,
    #[serde(rename = "itemDetail", default, deserialize_with = "empty_string_as_none")]
    item_detail: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    territory: Option<String>,
    #[serde(rename = "timingAnswer", default, deserialize_with = "empty_string_as_none")]
    timing_answer: Option<String>,
    #[serde(rename = "hasDefect", default, deserialize_with = "empty_string_as_none")]
    has_defect: Option<String>,
    #[serde(rename = "purchaseDate", default, deserialize_with = "empty_string_as_none")]
    purchase_date: Option<String>,
}

impl AnswerRow {
    fn into_imported(self) -> ImportedAnswers {
        let answers = AnswerSnapshot {
            seller_type: self.seller_type.as_deref().and_then(parse_choice),
            usage: self.usage.as_deref().and_then(parse_choice),
            item_category: self.item_category.as_deref().and_then(parse_choice),
            item_detail: self.item_detail.as_deref().and_then(parse_choice),
            territory: self.territory.as_deref().and_then(parse_choice),
            timing_answer: self.timing_answer.as_deref().and_then(parse_choice),
            has_defect: self.has_defect.as_deref().and_then(parse_flag),
            purchase_date: self.purchase_date.as_deref().and_then(parse_purchase_date),
        };

        ImportedAnswers {
            session: self.session,
            answers,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
