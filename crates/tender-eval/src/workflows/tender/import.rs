use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use super::criteria::{CriterionId, CriterionKind, Tender};
use super::proposal::{parse_flag, Proposal, ProposalId, ResponseValue};

/// Failure while reading a supplier response sheet.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read response sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid response sheet CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: invalid submitted_at '{value}'")]
    InvalidTimestamp { row: usize, value: String },
}

/// Reads long-format response sheets (one row per proposal and criterion).
///
/// Expected header: `proposal_id,criterion_id,response` with optional `supplier` and
/// `submitted_at` columns. Cells are interpreted by the referenced criterion's kind.
pub struct ResponseSheetImporter<'a> {
    tender: &'a Tender,
}

impl<'a> ResponseSheetImporter<'a> {
    pub fn new(tender: &'a Tender) -> Self {
        Self { tender }
    }

    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Proposal>, ImportError> {
        let file = std::fs::File::open(path)?;
        self.read_from(file)
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<Proposal>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut proposals: Vec<Proposal> = Vec::new();

        for (index, record) in csv_reader.deserialize::<ResponseRow>().enumerate() {
            let row = record?;
            let row_number = index + 2;

            let position = match proposals
                .iter()
                .position(|proposal| proposal.id.0 == row.proposal_id)
            {
                Some(position) => position,
                None => {
                    proposals.push(Proposal {
                        id: ProposalId::new(row.proposal_id.clone()),
                        supplier: None,
                        submitted_at: None,
                        responses: Default::default(),
                    });
                    proposals.len() - 1
                }
            };
            let proposal = &mut proposals[position];

            if proposal.supplier.is_none() {
                proposal.supplier = row.supplier.clone();
            }

            if let Some(raw) = row.submitted_at.as_deref() {
                let parsed = parse_timestamp(raw).ok_or_else(|| ImportError::InvalidTimestamp {
                    row: row_number,
                    value: raw.to_string(),
                })?;
                proposal.submitted_at = Some(match proposal.submitted_at {
                    Some(existing) => existing.min(parsed),
                    None => parsed,
                });
            }

            let criterion_id = CriterionId::new(row.criterion_id);
            let Some(raw) = row.response else {
                continue;
            };
            let value = self.interpret(&criterion_id, raw);
            proposal.responses.insert(criterion_id, value);
        }

        debug!(
            tender = %self.tender.id.0,
            proposals = proposals.len(),
            "response sheet imported"
        );

        Ok(proposals)
    }

    fn interpret(&self, criterion_id: &CriterionId, raw: String) -> ResponseValue {
        let Some(criterion) = self.tender.criterion(criterion_id) else {
            debug!(criterion = %criterion_id.as_str(), "response sheet references unknown criterion");
            return ResponseValue::Text(raw);
        };

        match &criterion.kind {
            CriterionKind::Numeric(_) => ResponseValue::Text(raw.clone())
                .as_number()
                .map_or(ResponseValue::Text(raw), ResponseValue::Number),
            CriterionKind::Boolean { .. } => {
                parse_flag(&raw).map_or(ResponseValue::Text(raw), ResponseValue::Flag)
            }
            CriterionKind::Scale { .. } | CriterionKind::Descriptive => ResponseValue::Text(raw),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    proposal_id: String,
    criterion_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    response: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    supplier: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    submitted_at: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_timestamp_accepts_rfc3339_and_plain_dates() {
        let rfc = parse_timestamp("2025-03-04T10:30:00+01:00").expect("rfc3339 parses");
        assert_eq!(rfc.to_rfc3339(), "2025-03-04T09:30:00+00:00");

        let date = parse_timestamp("2025-03-04").expect("date parses");
        assert_eq!(date.to_rfc3339(), "2025-03-04T00:00:00+00:00");

        assert!(parse_timestamp("04/03/2025").is_none());
    }
}
