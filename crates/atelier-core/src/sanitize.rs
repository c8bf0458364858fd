//! # Stored Record Sanitization
//!
//! Partner and company profiles are stored as loosely-typed JSON written by
//! several generations of the admin UI. Reads go through this module so the
//! rest of the system only ever sees fully populated records.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Partner field       Source order (first non-blank string wins)         │
//! │  ──────────────────  ─────────────────────────────────────────────────  │
//! │  id                  id → new uuid                                      │
//! │  name                name → seeded[index % 3].name                       │
//! │  uniqueId            uniqueId → "{name lowercased, no spaces}-{index}"  │
//! │  registrationNumber  registrationNumber → businessNumber → seeded        │
//! │  businessAddress     businessAddress → address → seeded                 │
//! │  other fields        field → seeded[index % 3].field                     │
//! │                                                                         │
//! │  Company field       `a ?? b` picks the first key that is present,      │
//! │                      then a blank value falls back to the default       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;
use uuid::Uuid;

use crate::types::{CompanyInfo, PartnerRecord};

/// Store key holding the partner list.
pub const PARTNERS_KEY: &str = "partners";

/// Store key holding the company profile.
pub const COMPANY_INFO_KEY: &str = "companyInfo";

// =============================================================================
// Defaults
// =============================================================================

/// The seeded partner list returned before anything is saved.
pub fn default_partners() -> Vec<PartnerRecord> {
    vec![
        seeded_partner(
            "1",
            "B파트너",
            "이파트",
            "010-7777-7777",
            "bpartner-001",
            "2025-09-13",
            "123-45-67890",
            "서울특별시 강남구 테헤란로 123",
            "홍길동",
            "contact@bpartner.co.kr",
        ),
        seeded_partner(
            "2",
            "A파트너",
            "김파트",
            "010-7172-9698",
            "apartner-002",
            "2025-09-12",
            "234-56-78901",
            "서울특별시 서초구 서초대로 456",
            "김대표",
            "info@apartner.co.kr",
        ),
        seeded_partner(
            "3",
            "C파트너",
            "박파트",
            "010-8888-9999",
            "cpartner-003",
            "2025-09-11",
            "345-67-89012",
            "경기도 성남시 분당구 판교로 789",
            "이대표",
            "sales@cpartner.co.kr",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seeded_partner(
    id: &str,
    name: &str,
    contact_person: &str,
    phone: &str,
    unique_id: &str,
    created_at: &str,
    registration_number: &str,
    business_address: &str,
    representative_name: &str,
    email: &str,
) -> PartnerRecord {
    PartnerRecord {
        id: id.to_string(),
        name: name.to_string(),
        contact_person: contact_person.to_string(),
        phone: phone.to_string(),
        unique_id: unique_id.to_string(),
        created_at: created_at.to_string(),
        registration_number: registration_number.to_string(),
        business_address: business_address.to_string(),
        representative_name: representative_name.to_string(),
        email: email.to_string(),
    }
}

// =============================================================================
// Field Helpers
// =============================================================================

/// Trimmed string value of `key`, if it is a non-blank string.
fn text(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// First non-blank string among `keys`, else the fallback.
fn text_or(raw: &Value, keys: &[&str], fallback: &str) -> String {
    keys.iter()
        .find_map(|key| text(raw, key))
        .unwrap_or_else(|| fallback.to_string())
}

/// Value of the first key that is present and not null (`a ?? b`), then a
/// blank value falls back.
fn coalesce_or(raw: &Value, keys: &[&str], fallback: &str) -> String {
    let present = keys
        .iter()
        .find_map(|key| raw.get(key).filter(|v| !v.is_null()));
    match present.and_then(Value::as_str).map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => fallback.to_string(),
    }
}

// =============================================================================
// Partners
// =============================================================================

/// Fills one stored partner entry, using the seeded partner at
/// `index % 3` for blank fields.
pub fn sanitize_partner(raw: &Value, index: usize) -> PartnerRecord {
    let seeded = default_partners();
    let fallback = &seeded[index % seeded.len()];

    let name = text_or(raw, &["name"], &fallback.name);
    let unique_base: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let unique_base = if unique_base.is_empty() {
        "partner".to_string()
    } else {
        unique_base
    };

    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    PartnerRecord {
        id,
        contact_person: text_or(raw, &["contactPerson"], &fallback.contact_person),
        phone: text_or(raw, &["phone"], &fallback.phone),
        unique_id: text(raw, "uniqueId").unwrap_or_else(|| format!("{unique_base}-{index}")),
        created_at: text_or(raw, &["createdAt"], &fallback.created_at),
        registration_number: text_or(
            raw,
            &["registrationNumber", "businessNumber"],
            &fallback.registration_number,
        ),
        business_address: text_or(
            raw,
            &["businessAddress", "address"],
            &fallback.business_address,
        ),
        representative_name: text_or(
            raw,
            &["representativeName"],
            &fallback.representative_name,
        ),
        email: text_or(raw, &["email"], &fallback.email),
        name,
    }
}

/// Sanitizes a stored partner list.
///
/// Returns `None` when the stored value is not an array, in which case the
/// caller falls back to [`default_partners`].
pub fn sanitize_partners(raw: &Value) -> Option<Vec<PartnerRecord>> {
    raw.as_array().map(|items| {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| sanitize_partner(item, index))
            .collect()
    })
}

// =============================================================================
// Company Info
// =============================================================================

/// Fills a stored company profile from [`CompanyInfo::default`].
pub fn sanitize_company_info(raw: &Value) -> CompanyInfo {
    let defaults = CompanyInfo::default();
    if !raw.is_object() {
        return defaults;
    }

    let optional = |keys: &[&str], fallback: &Option<String>| {
        Some(coalesce_or(raw, keys, fallback.as_deref().unwrap_or_default()))
            .filter(|s| !s.is_empty())
    };

    CompanyInfo {
        company_name: coalesce_or(raw, &["companyName"], &defaults.company_name),
        registration_number: coalesce_or(
            raw,
            &["registrationNumber", "businessNumber"],
            &defaults.registration_number,
        ),
        business_address: coalesce_or(
            raw,
            &["businessAddress", "address"],
            &defaults.business_address,
        ),
        phone: coalesce_or(raw, &["phone", "companyPhone"], &defaults.phone),
        account_number: coalesce_or(raw, &["accountNumber"], &defaults.account_number),
        seal_image: text(raw, "sealImageDataUrl").or_else(|| defaults.seal_image.clone()),
        representative_name: optional(&["representativeName"], &defaults.representative_name),
        manager: optional(&["manager"], &defaults.manager),
        email: optional(&["email"], &defaults.email),
    }
}
