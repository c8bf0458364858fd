//! # Formatting Helpers
//!
//! Shared string formatting for documents and exports: ko-KR thousands
//! grouping, date strings, and the export file-name conventions.
//!
//! ## File Names
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Artifact           Pattern                                             │
//! │  ─────────────────  ──────────────────────────────────────────────────  │
//! │  single PDF         {label}_{partner}_{YYYY-MM-DD}.pdf                  │
//! │  batch archive      {label}_{YYYY-MM-DD}.zip                            │
//! │  spreadsheet        작업현황_{YYYY-MM-DD}.xlsx                           │
//! │  snapshot image     작업현황_{partner}_{status}_{YYYY-MM-DD}.png          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, NaiveDate};

use crate::error::{CoreError, CoreResult};
use crate::ALL_FILTER_LABEL;

/// Base name shared by the spreadsheet and snapshot exports.
pub const WORK_STATUS_BASENAME: &str = "작업현황";

// =============================================================================
// Numbers
// =============================================================================

/// Formats an integer with `,` every three digits (ko-KR grouping).
///
/// ## Example
/// ```rust
/// use atelier_core::format::group_thousands;
///
/// assert_eq!(group_thousands(0), "0");
/// assert_eq!(group_thousands(1234567), "1,234,567");
/// assert_eq!(group_thousands(-1000), "-1,000");
/// ```
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }

    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Dates
// =============================================================================

/// `YYYY-MM-DD`, used in every export file name.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// ko-KR short date as printed on documents, e.g. `2025. 9. 16.`
pub fn korean_date(date: NaiveDate) -> String {
    format!("{}. {}. {}.", date.year(), date.month(), date.day())
}

/// Parses a `YYYY-MM-DD` string.
pub fn parse_iso_date(value: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| CoreError::InvalidDate {
        value: value.to_string(),
    })
}

// =============================================================================
// File Names
// =============================================================================

/// Makes a string safe to use as one component of a file name.
///
/// Path separators, reserved characters and control characters become `_`;
/// Hangul and other letters are kept. An empty result becomes `_`.
pub fn sanitize_file_component(input: &str) -> String {
    let cleaned: String = input
        .trim()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "_".to_string()
    } else {
        cleaned
    }
}

/// `{label}_{partner}_{YYYY-MM-DD}.pdf`
pub fn document_file_name(label: &str, partner_name: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}.pdf",
        sanitize_file_component(label),
        sanitize_file_component(partner_name),
        iso_date(date)
    )
}

/// `{label}_{YYYY-MM-DD}.zip`
pub fn batch_archive_name(label: &str, date: NaiveDate) -> String {
    format!("{}_{}.zip", sanitize_file_component(label), iso_date(date))
}

/// `작업현황_{YYYY-MM-DD}.xlsx`
pub fn spreadsheet_file_name(date: NaiveDate) -> String {
    format!("{}_{}.xlsx", WORK_STATUS_BASENAME, iso_date(date))
}

/// `작업현황_{partner}_{status}_{YYYY-MM-DD}.png`
///
/// A missing filter (or one already set to "all") prints as `전체`.
pub fn capture_file_name(
    partner_filter: Option<&str>,
    status_filter: Option<&str>,
    date: NaiveDate,
) -> String {
    format!(
        "{}_{}_{}_{}.png",
        WORK_STATUS_BASENAME,
        sanitize_file_component(filter_label(partner_filter)),
        sanitize_file_component(filter_label(status_filter)),
        iso_date(date)
    )
}

/// Resolves a filter selection to its display label.
pub fn filter_label(filter: Option<&str>) -> &str {
    match filter.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => ALL_FILTER_LABEL,
    }
}
