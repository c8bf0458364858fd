//! # Financial Documents
//!
//! The statement/quote model and the per-partner builder.
//!
//! ## Build Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  selected records (input order)                                         │
//! │    #1 A  ST-1  1000 × 3                                                 │
//! │    #2 B  ST-9   999 × 1                                                 │
//! │    #3 A  ST-2   500 × 2                                                 │
//! │          │                                                              │
//! │          ▼  partition by partner_name (first-seen order)                │
//! │    A: [#1, #3]          B: [#2]                                         │
//! │          │                                                              │
//! │          ▼  resolve_buyer(name) + number items 1..N                     │
//! │    ┌──────────────────────────┐  ┌──────────────────────────┐          │
//! │    │ A  1. ST-1  3  1000 3000 │  │ B  1. ST-9  1  999  999  │          │
//! │    │    2. ST-2  2   500 1000 │  │                          │          │
//! │    │    total 4000 tax 400    │  │    total 999  tax 99     │          │
//! │    │    final 4400            │  │    final 1098            │          │
//! │    └──────────────────────────┘  └──────────────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Statements and quotes share one routine, [`build_documents_by_partner`],
//! parameterized over how the buyer side is resolved.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::clock::Clock;
use crate::format::korean_date;
use crate::money::Money;
use crate::types::{CompanyInfo, PartnerRecord, TaxRate, WorkStatusRecord};

/// Partner display name → partner profile.
pub type PartnerLookup = HashMap<String, PartnerRecord>;

/// Product label used when a record has neither a style number nor an id.
const MISSING_PRODUCT_NAME: &str = "-";

// =============================================================================
// Document Kind
// =============================================================================

/// Which financial document is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// 거래명세서 (transaction statement / itemized invoice)
    Statement,
    /// 견적서 (quotation)
    Quote,
}

impl DocumentKind {
    /// Title printed at the top of the page.
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Statement => "거래명세서",
            DocumentKind::Quote => "견적서",
        }
    }

    /// Default file-name label for a single document.
    pub fn default_label(&self) -> &'static str {
        self.title()
    }

    /// Default file-name label for a batch archive.
    pub fn default_batch_label(&self) -> &'static str {
        match self {
            DocumentKind::Statement => "거래명세서_일괄",
            DocumentKind::Quote => "견적서_일괄",
        }
    }

    /// Statements right-align the issue date; quotes center it.
    pub fn centers_issue_date(&self) -> bool {
        matches!(self, DocumentKind::Quote)
    }

    /// Only statements carry payment instructions.
    pub fn shows_account_footer(&self) -> bool {
        matches!(self, DocumentKind::Statement)
    }
}

// =============================================================================
// Buyer Side
// =============================================================================

/// The buyer/recipient side of a document, as printed in its info box.
pub trait Party {
    /// Display name of the party.
    fn name(&self) -> &str;

    /// Heading of the info box.
    fn box_title(&self) -> &'static str;

    /// Labelled rows of the info box, in print order.
    fn info_rows(&self) -> Vec<(&'static str, String)>;
}

/// Buyer snapshot on a transaction statement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerInfo {
    pub name: String,
    pub registration_number: String,
    pub business_address: String,
    pub contact_person: String,
    pub phone: String,
}

impl BuyerInfo {
    /// Buyer for a partner name with no registered profile.
    ///
    /// Every field other than `name` is empty.
    pub fn unregistered(name: &str) -> Self {
        BuyerInfo {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Resolves a buyer from the lookup, falling back to [`BuyerInfo::unregistered`].
    pub fn resolve(name: &str, lookup: &PartnerLookup) -> Self {
        match lookup.get(name) {
            Some(partner) => BuyerInfo::from(partner),
            None => BuyerInfo::unregistered(name),
        }
    }
}

impl From<&PartnerRecord> for BuyerInfo {
    fn from(partner: &PartnerRecord) -> Self {
        BuyerInfo {
            name: partner.name.clone(),
            registration_number: partner.registration_number.clone(),
            business_address: partner.business_address.clone(),
            contact_person: partner.contact_person.clone(),
            phone: partner.phone.clone(),
        }
    }
}

impl Party for BuyerInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn box_title(&self) -> &'static str {
        "공급받는자"
    }

    fn info_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("상호", self.name.clone()),
            ("등록번호", self.registration_number.clone()),
            ("사업장", self.business_address.clone()),
            ("담당자", self.contact_person.clone()),
            ("연락처", self.phone.clone()),
        ]
    }
}

/// Recipient of a quote: the partner display name, nothing looked up.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecipient {
    pub name: String,
}

impl Party for QuoteRecipient {
    fn name(&self) -> &str {
        &self.name
    }

    fn box_title(&self) -> &'static str {
        "수신"
    }

    fn info_rows(&self) -> Vec<(&'static str, String)> {
        vec![("상호", self.name.clone())]
    }
}

// =============================================================================
// Document Model
// =============================================================================

/// One line on a generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentItem {
    /// 1-based sequence number, reset per document.
    pub no: u32,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// `quantity × unit_price`
    pub amount: Money,
    pub note: String,
}

/// A generated statement or quote for one partner.
///
/// Buyer and supplier are owned snapshots taken at build time. Editing a
/// partner or the company profile afterwards never changes a built document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDocument<B> {
    pub kind: DocumentKind,
    pub buyer: B,
    pub supplier: CompanyInfo,
    pub items: Vec<DocumentItem>,
    /// Σ item amounts (공급가액).
    pub total_amount: Money,
    /// `floor(total_amount × 10%)` (부가세).
    pub tax: Money,
    /// `total_amount + tax` (합계금액).
    pub final_amount: Money,
    /// Issue date, ko-KR formatted (`2025. 9. 16.`).
    pub date: String,
}

/// 거래명세서
pub type TransactionStatement = FinancialDocument<BuyerInfo>;

/// 견적서
pub type Quote = FinancialDocument<QuoteRecipient>;

impl<B: Party> FinancialDocument<B> {
    /// Buyer display name, used in file names.
    pub fn buyer_name(&self) -> &str {
        self.buyer.name()
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Groups records by partner and builds one document per partner.
///
/// ## Contract
/// - documents come back in the order each partner name is first seen
/// - items keep input order and are numbered `1..=N` per document
/// - `product_name` is the style number, else the record id, never empty
/// - no validation: negative quantities and unknown statuses pass through
/// - empty input returns an empty `Vec`
///
/// `resolve_buyer` is called once per distinct partner name.
pub fn build_documents_by_partner<B, F, C>(
    kind: DocumentKind,
    records: &[WorkStatusRecord],
    supplier: &CompanyInfo,
    mut resolve_buyer: F,
    clock: &C,
) -> Vec<FinancialDocument<B>>
where
    F: FnMut(&str) -> B,
    C: Clock + ?Sized,
{
    if records.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&WorkStatusRecord>> = HashMap::new();
    for record in records {
        let key = record.partner_name.as_str();
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(record);
    }

    let date = korean_date(clock.today());

    let documents: Vec<FinancialDocument<B>> = order
        .into_iter()
        .map(|partner_name| {
            let group = groups.remove(partner_name).unwrap_or_default();
            let items: Vec<DocumentItem> = group
                .iter()
                .enumerate()
                .map(|(index, record)| to_item(index, record))
                .collect();

            let total_amount: Money = items.iter().map(|item| item.amount).sum();
            let tax = total_amount.tax_floor(TaxRate::VAT);

            FinancialDocument {
                kind,
                buyer: resolve_buyer(partner_name),
                supplier: supplier.clone(),
                items,
                total_amount,
                tax,
                final_amount: total_amount + tax,
                date: date.clone(),
            }
        })
        .collect();

    debug!(
        kind = ?kind,
        records = records.len(),
        documents = documents.len(),
        "Built documents by partner"
    );

    documents
}

/// Builds one transaction statement per partner, joining buyer details
/// from `partner_lookup` by display name.
pub fn build_statements_by_partner<C: Clock + ?Sized>(
    records: &[WorkStatusRecord],
    supplier: &CompanyInfo,
    partner_lookup: &PartnerLookup,
    clock: &C,
) -> Vec<TransactionStatement> {
    build_documents_by_partner(
        DocumentKind::Statement,
        records,
        supplier,
        |name| BuyerInfo::resolve(name, partner_lookup),
        clock,
    )
}

/// Builds one quote per partner. The recipient is the partner display name.
pub fn build_quotes_by_partner<C: Clock + ?Sized>(
    records: &[WorkStatusRecord],
    supplier: &CompanyInfo,
    clock: &C,
) -> Vec<Quote> {
    build_documents_by_partner(
        DocumentKind::Quote,
        records,
        supplier,
        |name| QuoteRecipient {
            name: name.to_string(),
        },
        clock,
    )
}

/// Indexes partners by name. A later duplicate replaces an earlier one.
pub fn partners_to_lookup(partners: &[PartnerRecord]) -> PartnerLookup {
    partners
        .iter()
        .map(|partner| (partner.name.clone(), partner.clone()))
        .collect()
}

fn to_item(index: usize, record: &WorkStatusRecord) -> DocumentItem {
    let unit_price = record.unit_price();
    DocumentItem {
        no: (index + 1) as u32,
        product_name: product_name(record),
        quantity: record.work_quantity,
        unit_price,
        amount: unit_price.multiply_quantity(record.work_quantity),
        note: String::new(),
    }
}

fn product_name(record: &WorkStatusRecord) -> String {
    [record.style_no.trim(), record.id.trim()]
        .into_iter()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(MISSING_PRODUCT_NAME)
        .to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::types::WorkStatus;

    fn record(id: &str, partner: &str, style: &str, price: i64, qty: i64) -> WorkStatusRecord {
        let mut r = WorkStatusRecord::new(id, partner);
        r.style_no = style.to_string();
        r.unit_price = price;
        r.work_quantity = qty;
        r
    }

    fn clock() -> FixedClock {
        FixedClock::ymd(2025, 9, 16)
    }

    fn partner(name: &str) -> PartnerRecord {
        PartnerRecord {
            id: format!("{name}-id"),
            name: name.to_string(),
            contact_person: "김파트".to_string(),
            phone: "010-0000-0000".to_string(),
            registration_number: "111-22-33333".to_string(),
            business_address: "서울".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_two_records_one_partner() {
        let records = vec![
            record("1", "A", "ST-1", 1000, 3),
            record("2", "A", "ST-2", 500, 2),
        ];
        let docs = build_statements_by_partner(
            &records,
            &CompanyInfo::default(),
            &PartnerLookup::new(),
            &clock(),
        );

        assert_eq!(docs.len(), 1);
        let doc = &docs[0];
        assert_eq!(doc.items[0].amount.won(), 3000);
        assert_eq!(doc.items[1].amount.won(), 1000);
        assert_eq!(doc.total_amount.won(), 4000);
        assert_eq!(doc.tax.won(), 400);
        assert_eq!(doc.final_amount.won(), 4400);
        assert_eq!(doc.date, "2025. 9. 16.");
    }

    #[test]
    fn test_tax_truncates() {
        let records = vec![record("1", "B", "ST-9", 999, 1)];
        let docs = build_statements_by_partner(
            &records,
            &CompanyInfo::default(),
            &PartnerLookup::new(),
            &clock(),
        );
        assert_eq!(docs[0].total_amount.won(), 999);
        assert_eq!(docs[0].tax.won(), 99);
        assert_eq!(docs[0].final_amount.won(), 1098);
    }

    #[test]
    fn test_empty_input() {
        let docs = build_statements_by_partner(
            &[],
            &CompanyInfo::default(),
            &PartnerLookup::new(),
            &clock(),
        );
        assert!(docs.is_empty());
    }

    #[test]
    fn test_first_seen_order_and_numbering() {
        let records = vec![
            record("1", "C", "a", 1, 1),
            record("2", "A", "b", 1, 1),
            record("3", "C", "c", 1, 1),
            record("4", "B", "d", 1, 1),
            record("5", "C", "e", 1, 1),
        ];
        let docs = build_quotes_by_partner(&records, &CompanyInfo::default(), &clock());

        let names: Vec<&str> = docs.iter().map(|d| d.buyer_name()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);

        let c = &docs[0];
        let numbers: Vec<u32> = c.items.iter().map(|i| i.no).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        let products: Vec<&str> = c.items.iter().map(|i| i.product_name.as_str()).collect();
        assert_eq!(products, vec!["a", "c", "e"]);
        assert_eq!(docs[1].items[0].no, 1);
    }

    #[test]
    fn test_totals_invariant_holds_for_every_document() {
        let records: Vec<WorkStatusRecord> = (0..40)
            .map(|i| {
                let partner = ["A", "B", "C", "D"][i % 4];
                record(&i.to_string(), partner, "", 137 * i as i64 + 9, (i % 7) as i64)
            })
            .collect();
        let docs = build_statements_by_partner(
            &records,
            &CompanyInfo::default(),
            &PartnerLookup::new(),
            &clock(),
        );

        assert_eq!(docs.len(), 4);
        for doc in &docs {
            let sum: Money = doc.items.iter().map(|i| i.amount).sum();
            assert_eq!(sum, doc.total_amount);
            assert_eq!(doc.tax.won(), doc.total_amount.won() * 10 / 100);
            assert_eq!(doc.final_amount, doc.total_amount + doc.tax);
            for item in &doc.items {
                assert_eq!(item.amount, item.unit_price * item.quantity);
            }
        }
    }

    #[test]
    fn test_product_name_falls_back_to_id() {
        let records = vec![
            record("rec-7", "A", "", 100, 1),
            record("rec-8", "A", "   ", 100, 1),
            record("", "A", "", 100, 1),
        ];
        let docs = build_quotes_by_partner(&records, &CompanyInfo::default(), &clock());
        assert_eq!(docs[0].items[0].product_name, "rec-7");
        assert_eq!(docs[0].items[1].product_name, "rec-8");
        assert_eq!(docs[0].items[2].product_name, "-");
    }

    #[test]
    fn test_unknown_partner_has_empty_buyer_fields() {
        let records = vec![record("1", "Legacy Co", "ST", 10, 1)];
        let docs = build_statements_by_partner(
            &records,
            &CompanyInfo::default(),
            &PartnerLookup::new(),
            &clock(),
        );
        assert_eq!(
            docs[0].buyer,
            BuyerInfo {
                name: "Legacy Co".to_string(),
                registration_number: String::new(),
                business_address: String::new(),
                contact_person: String::new(),
                phone: String::new(),
            }
        );
    }

    #[test]
    fn test_known_partner_is_snapshotted() {
        let mut partners = vec![partner("A")];
        let lookup = partners_to_lookup(&partners);
        let records = vec![record("1", "A", "ST", 10, 1)];
        let docs = build_statements_by_partner(&records, &CompanyInfo::default(), &lookup, &clock());

        partners[0].phone = "changed".to_string();
        assert_eq!(docs[0].buyer.phone, "010-0000-0000");
        assert_eq!(docs[0].buyer.registration_number, "111-22-33333");
    }

    #[test]
    fn test_negative_and_unknown_inputs_are_not_rejected() {
        let mut r = record("1", "A", "ST", 1000, -2);
        r.status = WorkStatus::Other("작업완료".to_string());
        let docs = build_statements_by_partner(
            &[r],
            &CompanyInfo::default(),
            &PartnerLookup::new(),
            &clock(),
        );
        assert_eq!(docs[0].total_amount.won(), -2000);
        assert_eq!(docs[0].tax.won(), -200);
        assert_eq!(docs[0].final_amount.won(), -2200);
    }

    #[test]
    fn test_rebuild_is_deterministic_with_fixed_clock() {
        let records = vec![
            record("1", "A", "ST-1", 1000, 3),
            record("2", "B", "ST-2", 500, 2),
        ];
        let supplier = CompanyInfo::default();
        let lookup = partners_to_lookup(&[partner("A")]);
        let first = build_statements_by_partner(&records, &supplier, &lookup, &clock());
        let second = build_statements_by_partner(&records, &supplier, &lookup, &clock());
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolver_called_once_per_partner() {
        let records = vec![
            record("1", "A", "x", 1, 1),
            record("2", "A", "y", 1, 1),
            record("3", "B", "z", 1, 1),
        ];
        let mut calls = Vec::new();
        let docs = build_documents_by_partner(
            DocumentKind::Quote,
            &records,
            &CompanyInfo::default(),
            |name| {
                calls.push(name.to_string());
                QuoteRecipient {
                    name: name.to_string(),
                }
            },
            &clock(),
        );
        assert_eq!(docs.len(), 2);
        assert_eq!(calls, vec!["A", "B"]);
    }

    #[test]
    fn test_partners_to_lookup_last_wins() {
        let mut second = partner("A");
        second.phone = "second".to_string();
        let lookup = partners_to_lookup(&[partner("A"), second]);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup["A"].phone, "second");
    }

    #[test]
    fn test_huge_amounts_do_not_panic() {
        let records = vec![
            record("1", "A", "ST-1", 4_000_000_000_000_000_000, 3),
            record("2", "A", "ST-2", 1000, 1),
        ];
        let docs = build_statements_by_partner(
            &records,
            &CompanyInfo::default(),
            &PartnerLookup::new(),
            &clock(),
        );

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].items[0].amount.won(), i64::MAX);
        assert_eq!(docs[0].total_amount.won(), i64::MAX);
        assert_eq!(docs[0].final_amount.won(), i64::MAX);
    }

    #[test]
    fn test_kind_presentation() {
        assert_eq!(DocumentKind::Statement.title(), "거래명세서");
        assert_eq!(DocumentKind::Quote.title(), "견적서");
        assert!(DocumentKind::Quote.centers_issue_date());
        assert!(!DocumentKind::Statement.centers_issue_date());
        assert!(DocumentKind::Statement.shows_account_footer());
        assert!(!DocumentKind::Quote.shows_account_footer());
    }
}
