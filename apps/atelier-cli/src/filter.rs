//! # Record Selection
//!
//! Narrows a work-status record file the way the admin work-status screen
//! does before exporting.
//!
//! ## Rules
//! ```text
//! partner   exact match on partner_name      (any of the given names)
//! status    exact match after label parsing  (대기중 / waiting / 출고완료 ...)
//! from, to  inclusive range on receive_date
//! month     YYYY-MM prefix of receive_date   ("전체" disables it)
//! ids       exact match on id                (the checkbox selection)
//! ```
//! A record whose receive date cannot be parsed never matches a date rule.

use chrono::{Datelike, NaiveDate};
use std::path::Path;
use tracing::debug;

use atelier_core::format::{filter_label, parse_iso_date};
use atelier_core::{StatusLabels, WorkStatus, WorkStatusRecord, ALL_FILTER_LABEL};
use atelier_export::FilterSummary;

use crate::error::{CliError, CliResult};

/// Reads a JSON array of work-status records. Stored status labels are
/// resolved against the configured label set.
pub async fn load_records(path: &Path, labels: &StatusLabels) -> CliResult<Vec<WorkStatusRecord>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CliError::io(path, e))?;
    let mut records: Vec<WorkStatusRecord> =
        serde_json::from_str(&text).map_err(|e| CliError::parse(path, e))?;
    for record in &mut records {
        record.status = labels.resolve(std::mem::take(&mut record.status));
    }

    debug!(path = %path.display(), records = records.len(), "Loaded work-status records");
    Ok(records)
}

/// Active selection criteria. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub partners: Vec<String>,
    pub status: Option<WorkStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub month: Option<(i32, u32)>,
    pub ids: Vec<String>,
}

impl RecordFilter {
    /// Builds a filter from raw flag values.
    ///
    /// `전체` (or an empty string) for partner, status or month means "no
    /// filter", matching the admin screen's select boxes.
    pub fn from_flags(
        partners: &[String],
        status: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
        month: Option<&str>,
        labels: &StatusLabels,
    ) -> CliResult<Self> {
        let partners = partners
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty() && *p != ALL_FILTER_LABEL)
            .map(str::to_string)
            .collect();

        let status = selected(status).map(|s| labels.parse(s));
        let from = selected(from).map(parse_iso_date).transpose()?;
        let to = selected(to).map(parse_iso_date).transpose()?;
        let month = selected(month).map(parse_month).transpose()?;

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(CliError::invalid_input(format!(
                    "--from {from} is after --to {to}"
                )));
            }
        }

        Ok(RecordFilter {
            partners,
            status,
            from,
            to,
            month,
            ids: Vec::new(),
        })
    }

    pub fn with_ids(mut self, ids: Vec<String>) -> Self {
        self.ids = ids;
        self
    }

    pub fn matches(&self, record: &WorkStatusRecord) -> bool {
        if !self.partners.is_empty() && !self.partners.iter().any(|p| *p == record.partner_name) {
            return false;
        }

        if let Some(status) = &self.status {
            if *status != record.status {
                return false;
            }
        }

        if !self.ids.is_empty() && !self.ids.iter().any(|id| *id == record.id) {
            return false;
        }

        if self.from.is_none() && self.to.is_none() && self.month.is_none() {
            return true;
        }

        let Some(received) = record.receive_date() else {
            return false;
        };

        if self.from.is_some_and(|from| received < from) {
            return false;
        }
        if self.to.is_some_and(|to| received > to) {
            return false;
        }
        if let Some((year, month)) = self.month {
            if received.year() != year || received.month() != month {
                return false;
            }
        }

        true
    }

    /// Matching records, in input order.
    pub fn apply(&self, records: &[WorkStatusRecord]) -> Vec<WorkStatusRecord> {
        let selected: Vec<WorkStatusRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();

        debug!(input = records.len(), selected = selected.len(), "Applied record filter");
        selected
    }
}

/// Summary line block for a capture of this selection.
pub fn capture_summary(
    partner: Option<&str>,
    status: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    month: Option<&str>,
) -> FilterSummary {
    FilterSummary::new(
        selected(partner),
        selected(status),
        FilterSummary::period_label(from, to, month),
    )
}

fn selected(value: Option<&str>) -> Option<&str> {
    match value {
        Some(v) if filter_label(Some(v)) != ALL_FILTER_LABEL => Some(v.trim()),
        _ => None,
    }
}

fn parse_month(value: &str) -> CliResult<(i32, u32)> {
    let invalid = || CliError::invalid_input(format!("Invalid month '{value}': expected YYYY-MM"));

    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}
