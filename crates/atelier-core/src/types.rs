//! # Domain Types
//!
//! Core record types used throughout the back-office.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐  ┌─────────────────┐  ┌──────────────────┐   │
//! │  │  WorkStatusRecord    │  │  PartnerRecord  │  │   CompanyInfo    │   │
//! │  │  ──────────────────  │  │  ─────────────  │  │  ──────────────  │   │
//! │  │  id                  │  │  id             │  │  company_name    │   │
//! │  │  partner_name ───────┼─►│  name (join!)   │  │  registration_no │   │
//! │  │  style_no            │  │  unique_id slug │  │  account_number  │   │
//! │  │  unit_price (won)    │  │  registration_no│  │  seal_image      │   │
//! │  │  work_quantity       │  │  business_addr  │  │  (the supplier)  │   │
//! │  │  status              │  └─────────────────┘  └──────────────────┘   │
//! │  └──────────────────────┘                                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────────────────────────┐    │
//! │  │    TaxRate      │   │  WorkStatus                               │    │
//! │  │  bps (u32)      │   │  Waiting │ InProgress │ PostProcessing │  │    │
//! │  │  1000 = 10% VAT │   │  Shipped │ Other(label)                   │    │
//! │  └─────────────────┘   └──────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Join Key
//! Work-status records reference partners by **display name**, not by id.
//! Renaming a partner orphans older records from their buyer details.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so the Korean VAT of 10% is 1000 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Korean value-added tax (부가세), 10%.
    pub const VAT: TaxRate = TaxRate(1000);

    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a whole percentage label, e.g. `10%`.
    pub fn percent_label(&self) -> String {
        if self.0 % 100 == 0 {
            format!("{}%", self.0 / 100)
        } else {
            format!("{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::VAT
    }
}

// =============================================================================
// Work Status
// =============================================================================

/// Production status of a work-status record.
///
/// Serialized as its display label (`"대기중"`, ...). Labels outside the
/// known set are preserved verbatim in [`WorkStatus::Other`] because the
/// document builder never validates status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkStatus {
    /// 대기중
    Waiting,
    /// 작업중
    InProgress,
    /// 후가공중
    PostProcessing,
    /// 배송완료
    Shipped,
    /// Any other label (e.g. the legacy `작업완료`).
    Other(String),
}

impl WorkStatus {
    /// The four known statuses in workflow order.
    pub const KNOWN: [WorkStatus; 4] = [
        WorkStatus::Waiting,
        WorkStatus::InProgress,
        WorkStatus::PostProcessing,
        WorkStatus::Shipped,
    ];

    /// Default Korean label.
    pub fn label(&self) -> &str {
        match self {
            WorkStatus::Waiting => "대기중",
            WorkStatus::InProgress => "작업중",
            WorkStatus::PostProcessing => "후가공중",
            WorkStatus::Shipped => "배송완료",
            WorkStatus::Other(label) => label.as_str(),
        }
    }

    /// Stable English key used in config files and CLI flags.
    pub fn key(&self) -> &str {
        match self {
            WorkStatus::Waiting => "waiting",
            WorkStatus::InProgress => "in_progress",
            WorkStatus::PostProcessing => "post_processing",
            WorkStatus::Shipped => "shipped",
            WorkStatus::Other(label) => label.as_str(),
        }
    }

    /// Parses a Korean label or an English key. Never fails.
    pub fn parse(value: &str) -> WorkStatus {
        let trimmed = value.trim();
        match trimmed {
            "대기중" | "waiting" => WorkStatus::Waiting,
            "작업중" | "in_progress" | "in-progress" => WorkStatus::InProgress,
            "후가공중" | "post_processing" | "post-processing" => WorkStatus::PostProcessing,
            "배송완료" | "shipped" => WorkStatus::Shipped,
            other => WorkStatus::Other(other.to_string()),
        }
    }

    /// Returns true for one of the four known statuses.
    pub fn is_known(&self) -> bool {
        !matches!(self, WorkStatus::Other(_))
    }
}

impl Default for WorkStatus {
    fn default() -> Self {
        WorkStatus::Waiting
    }
}

impl From<String> for WorkStatus {
    fn from(value: String) -> Self {
        WorkStatus::parse(&value)
    }
}

impl From<WorkStatus> for String {
    fn from(status: WorkStatus) -> Self {
        status.label().to_string()
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Status Labels (configurable display set)
// =============================================================================

/// Display labels for the known statuses.
///
/// The exact label set is a deployment choice; spreadsheets and captures
/// print whatever is configured here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLabels {
    #[serde(default = "default_waiting")]
    pub waiting: String,
    #[serde(default = "default_in_progress")]
    pub in_progress: String,
    #[serde(default = "default_post_processing")]
    pub post_processing: String,
    #[serde(default = "default_shipped")]
    pub shipped: String,
}

fn default_waiting() -> String {
    WorkStatus::Waiting.label().to_string()
}

fn default_in_progress() -> String {
    WorkStatus::InProgress.label().to_string()
}

fn default_post_processing() -> String {
    WorkStatus::PostProcessing.label().to_string()
}

fn default_shipped() -> String {
    WorkStatus::Shipped.label().to_string()
}

impl Default for StatusLabels {
    fn default() -> Self {
        StatusLabels {
            waiting: default_waiting(),
            in_progress: default_in_progress(),
            post_processing: default_post_processing(),
            shipped: default_shipped(),
        }
    }
}

impl StatusLabels {
    /// Returns the configured label for a status.
    pub fn label_for<'a>(&'a self, status: &'a WorkStatus) -> &'a str {
        match status {
            WorkStatus::Waiting => &self.waiting,
            WorkStatus::InProgress => &self.in_progress,
            WorkStatus::PostProcessing => &self.post_processing,
            WorkStatus::Shipped => &self.shipped,
            WorkStatus::Other(label) => label,
        }
    }

    /// Parses a configured label first, then the built-in labels and keys.
    pub fn parse(&self, value: &str) -> WorkStatus {
        let trimmed = value.trim();
        if trimmed == self.waiting {
            WorkStatus::Waiting
        } else if trimmed == self.in_progress {
            WorkStatus::InProgress
        } else if trimmed == self.post_processing {
            WorkStatus::PostProcessing
        } else if trimmed == self.shipped {
            WorkStatus::Shipped
        } else {
            WorkStatus::parse(trimmed)
        }
    }

    /// Maps a status read with the built-in labels onto this label set, so
    /// a record stored as `준비` is `Waiting` when `waiting = "준비"`.
    pub fn resolve(&self, status: WorkStatus) -> WorkStatus {
        match status {
            WorkStatus::Other(label) => self.parse(&label),
            known => known,
        }
    }
}

// =============================================================================
// Work-Status Record
// =============================================================================

/// One production job line tracked by the admin system.
///
/// Field names serialize in camelCase so JSON exported by the admin UI
/// (`partnerName`, `styleNo`, ...) loads unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct WorkStatusRecord {
    /// Unique identifier.
    pub id: String,

    /// Partner display name; the join key to [`PartnerRecord::name`].
    pub partner_name: String,

    /// Style number; printed as the product label on documents.
    pub style_no: String,

    /// Reference to the product image.
    pub image_url: String,

    /// Ordered quantity.
    pub order_quantity: i64,

    /// Receive date, `YYYY-MM-DD`.
    pub receive_date: String,

    /// Work-order file reference.
    pub work_order_file: String,

    /// Unit price in whole won.
    pub unit_price: i64,

    /// Expected ship date, `YYYY-MM-DD`.
    pub expected_ship_date: String,

    /// Actual ship date, may be empty.
    pub ship_date: String,

    /// Quantity actually worked (billed).
    pub work_quantity: i64,

    /// Data-file reference.
    pub data_file: String,

    /// Production status.
    #[ts(type = "string")]
    pub status: WorkStatus,

    /// Design-team memo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_memo: Option<String>,

    /// Sales memo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_memo: Option<String>,
}

impl WorkStatusRecord {
    /// Creates an otherwise empty record for a partner.
    pub fn new(id: impl Into<String>, partner_name: impl Into<String>) -> Self {
        WorkStatusRecord {
            id: id.into(),
            partner_name: partner_name.into(),
            ..Default::default()
        }
    }

    /// Unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_won(self.unit_price)
    }

    /// Billed amount, always re-derived as `unit_price × work_quantity`.
    #[inline]
    pub fn amount(&self) -> Money {
        self.unit_price().multiply_quantity(self.work_quantity)
    }

    /// Parsed receive date, if the stored string is a valid `YYYY-MM-DD`.
    pub fn receive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.receive_date.trim(), "%Y-%m-%d").ok()
    }
}

// =============================================================================
// Partner Record
// =============================================================================

/// Client company profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PartnerRecord {
    pub id: String,
    /// Display name; unique among partners and used as the join key.
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    /// URL-safe slug for the partner-facing submission page.
    pub unique_id: String,
    pub created_at: String,
    pub registration_number: String,
    pub business_address: String,
    pub representative_name: String,
    pub email: String,
}

impl PartnerRecord {
    /// Path of the partner-facing request submission page.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::PartnerRecord;
    ///
    /// let partner = PartnerRecord { unique_id: "apartner-002".into(), ..Default::default() };
    /// assert_eq!(partner.request_path(), "/request/apartner-002");
    /// ```
    pub fn request_path(&self) -> String {
        format!("/request/{}", self.unique_id)
    }
}

// =============================================================================
// Company Info (Supplier)
// =============================================================================

/// The operator's own company, the supplier on every generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompanyInfo {
    pub company_name: String,
    pub registration_number: String,
    pub business_address: String,
    pub phone: String,
    /// Bank account printed in the statement footer.
    pub account_number: String,
    /// Seal/stamp image: a file path or a `data:image/...;base64,` URL.
    #[serde(rename = "sealImageDataUrl", default, skip_serializing_if = "Option::is_none")]
    pub seal_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representative_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Default for CompanyInfo {
    /// The seeded operator profile used until settings are saved.
    fn default() -> Self {
        CompanyInfo {
            company_name: "우리회사".to_string(),
            registration_number: "123-45-67890".to_string(),
            business_address: "서울시 강남구 테헤란로 123".to_string(),
            phone: "02-1234-5678".to_string(),
            account_number: "국민은행 123456-01-123456".to_string(),
            seal_image: Some("/stamp.png".to_string()),
            representative_name: Some("홍길동".to_string()),
            manager: Some("김담당".to_string()),
            email: Some("contact@ourcompany.com".to_string()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_vat() {
        assert_eq!(TaxRate::VAT.bps(), 1000);
        assert_eq!(TaxRate::VAT.percent_label(), "10%");
        assert_eq!(TaxRate::from_bps(825).percent_label(), "8.25%");
    }

    #[test]
    fn test_status_parse_labels_and_keys() {
        assert_eq!(WorkStatus::parse("대기중"), WorkStatus::Waiting);
        assert_eq!(WorkStatus::parse("in_progress"), WorkStatus::InProgress);
        assert_eq!(WorkStatus::parse(" 후가공중 "), WorkStatus::PostProcessing);
        assert_eq!(WorkStatus::parse("shipped"), WorkStatus::Shipped);
        assert_eq!(
            WorkStatus::parse("작업완료"),
            WorkStatus::Other("작업완료".to_string())
        );
    }

    #[test]
    fn test_status_serde_uses_label() {
        let json = serde_json::to_string(&WorkStatus::Shipped).unwrap();
        assert_eq!(json, "\"배송완료\"");
        let parsed: WorkStatus = serde_json::from_str("\"작업완료\"").unwrap();
        assert!(!parsed.is_known());
    }

    #[test]
    fn test_status_labels_configurable() {
        let labels = StatusLabels {
            waiting: "Queued".to_string(),
            ..StatusLabels::default()
        };
        assert_eq!(labels.label_for(&WorkStatus::Waiting), "Queued");
        assert_eq!(labels.parse("Queued"), WorkStatus::Waiting);
        assert_eq!(labels.parse("배송완료"), WorkStatus::Shipped);
    }

    #[test]
    fn test_status_labels_resolve_stored_label() {
        let labels = StatusLabels {
            waiting: "준비".to_string(),
            ..StatusLabels::default()
        };
        let stored: WorkStatus = serde_json::from_str("\"준비\"").unwrap();
        assert_eq!(stored, WorkStatus::Other("준비".to_string()));
        assert_eq!(labels.resolve(stored), WorkStatus::Waiting);
        assert_eq!(labels.resolve(WorkStatus::Shipped), WorkStatus::Shipped);
        assert_eq!(
            labels.resolve(WorkStatus::Other("검수중".to_string())),
            WorkStatus::Other("검수중".to_string())
        );
    }

    #[test]
    fn test_record_amount_is_derived() {
        let mut record = WorkStatusRecord::new("1", "A");
        record.unit_price = 1000;
        record.work_quantity = 3;
        assert_eq!(record.amount().won(), 3000);

        record.work_quantity = 5;
        assert_eq!(record.amount().won(), 5000);
    }

    #[test]
    fn test_record_deserializes_camel_case_with_missing_fields() {
        let json = r#"{
            "id": "7",
            "partnerName": "A파트너",
            "styleNo": "ST-1",
            "unitPrice": 1000,
            "workQuantity": 3,
            "status": "작업중",
            "salesMemo": "긴급"
        }"#;
        let record: WorkStatusRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.partner_name, "A파트너");
        assert_eq!(record.status, WorkStatus::InProgress);
        assert_eq!(record.ship_date, "");
        assert_eq!(record.design_memo, None);
        assert_eq!(record.sales_memo.as_deref(), Some("긴급"));
    }

    #[test]
    fn test_record_receive_date() {
        let mut record = WorkStatusRecord::new("1", "A");
        record.receive_date = "2025-09-10".to_string();
        assert_eq!(record.receive_date(), NaiveDate::from_ymd_opt(2025, 9, 10));

        record.receive_date = "".to_string();
        assert_eq!(record.receive_date(), None);
    }

    #[test]
    fn test_company_info_legacy_seal_key() {
        let json = r#"{
            "companyName": "우리회사",
            "registrationNumber": "1",
            "businessAddress": "서울",
            "phone": "02",
            "accountNumber": "국민",
            "sealImageDataUrl": "/stamp.png"
        }"#;
        let info: CompanyInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.seal_image.as_deref(), Some("/stamp.png"));
        assert_eq!(info.manager, None);
    }
}
