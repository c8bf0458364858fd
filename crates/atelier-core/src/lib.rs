//! # atelier-core: Pure Business Logic for the Atelier Back-Office
//!
//! This crate is the **heart** of the back-office. It turns the work-status
//! records selected in the admin UI into financial documents (transaction
//! statements and quotes) as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Atelier Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Admin UI / atelier-cli (record selection)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Vec<WorkStatusRecord>                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ atelier-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │  money   │ │ document │ │ format/sanitize  │  │   │
//! │  │   │ Records  │ │  Money   │ │ builder  │ │ filenames, dates │  │   │
//! │  │   │ Partner  │ │ TaxRate  │ │ Statement│ │ defaults         │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO RENDERING • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Vec<TransactionStatement>              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          atelier-export (PDF / ZIP / XLSX / PNG)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Work-status, partner and company records
//! - [`money`] - Money type with integer arithmetic (whole won, no floats)
//! - [`document`] - Statement/quote model and the per-partner builder
//! - [`format`] - Thousands grouping, date strings, export file names
//! - [`clock`] - Injectable "now" for issue dates and file names
//! - [`sanitize`] - Defaulting of stored partner/company records
//! - [`validation`] - Partner record rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use atelier_core::{build_statements_by_partner, CompanyInfo, FixedClock, PartnerLookup};
//! use atelier_core::types::WorkStatusRecord;
//!
//! let mut first = WorkStatusRecord::new("1", "A");
//! first.style_no = "ST-1".into();
//! first.unit_price = 1000;
//! first.work_quantity = 3;
//!
//! let clock = FixedClock::ymd(2025, 9, 16);
//! let statements = build_statements_by_partner(
//!     &[first],
//!     &CompanyInfo::default(),
//!     &PartnerLookup::new(),
//!     &clock,
//! );
//!
//! assert_eq!(statements[0].total_amount.won(), 3000);
//! assert_eq!(statements[0].tax.won(), 300);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod document;
pub mod error;
pub mod format;
pub mod money;
pub mod sanitize;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{Clock, FixedClock, SystemClock};
pub use document::{
    build_documents_by_partner, build_quotes_by_partner, build_statements_by_partner,
    partners_to_lookup, BuyerInfo, DocumentItem, DocumentKind, FinancialDocument,
    PartnerLookup, Party, Quote, QuoteRecipient, TransactionStatement,
};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Label used by every filter when nothing is selected ("all").
pub const ALL_FILTER_LABEL: &str = "전체";

/// Currency suffix printed after every amount.
pub const CURRENCY_SUFFIX: &str = "원";

/// Maximum length of a partner slug used in submission URLs.
pub const MAX_UNIQUE_ID_LEN: usize = 64;
