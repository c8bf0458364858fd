//! # Validation Module
//!
//! Partner record rules, checked before a partner list is saved.
//!
//! The document builder never validates: by the time records reach it,
//! anything odd is resolved with fallbacks. These checks guard the partner
//! registry instead, because a partner name is the join key for every
//! work-status record and a unique id is a public URL segment.
//!
//! ```rust
//! use atelier_core::validation::validate_unique_id;
//!
//! assert!(validate_unique_id("apartner-002").is_ok());
//! assert!(validate_unique_id("a partner").is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::PartnerRecord;
use crate::MAX_UNIQUE_ID_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a partner display name.
const MAX_PARTNER_NAME_LEN: usize = 100;

/// Validates a partner's URL slug.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Only ASCII letters, digits, `-` and `_`
pub fn validate_unique_id(unique_id: &str) -> ValidationResult<()> {
    let unique_id = unique_id.trim();

    if unique_id.is_empty() {
        return Err(ValidationError::Required {
            field: "uniqueId".to_string(),
        });
    }

    if unique_id.len() > MAX_UNIQUE_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "uniqueId".to_string(),
            max: MAX_UNIQUE_ID_LEN,
        });
    }

    if !unique_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "uniqueId".to_string(),
            reason: "must contain only ASCII letters, numbers, hyphens, and underscores"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a partner display name.
pub fn validate_partner_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PARTNER_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PARTNER_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates one partner and the whole list together.
///
/// Names and unique ids must each be unique across the list.
pub fn validate_partner_set(partners: &[PartnerRecord]) -> ValidationResult<()> {
    let mut names = HashSet::new();
    let mut unique_ids = HashSet::new();

    for partner in partners {
        validate_partner_name(&partner.name)?;
        validate_unique_id(&partner.unique_id)?;

        if !names.insert(partner.name.trim()) {
            return Err(ValidationError::Duplicate {
                field: "name".to_string(),
                value: partner.name.trim().to_string(),
            });
        }

        if !unique_ids.insert(partner.unique_id.trim()) {
            return Err(ValidationError::Duplicate {
                field: "uniqueId".to_string(),
                value: partner.unique_id.trim().to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::default_partners;

    #[test]
    fn test_validate_unique_id() {
        assert!(validate_unique_id("bpartner-001").is_ok());
        assert!(validate_unique_id("A_1").is_ok());
        assert!(matches!(
            validate_unique_id("  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_unique_id(&"a".repeat(65)),
            Err(ValidationError::TooLong { max: 64, .. })
        ));
        assert!(matches!(
            validate_unique_id("a/b"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        // Hangul is not URL-safe
        assert!(validate_unique_id("파트너-1").is_err());
    }

    #[test]
    fn test_validate_partner_name() {
        assert!(validate_partner_name("A파트너").is_ok());
        assert!(validate_partner_name("").is_err());
        // character count, not bytes
        assert!(validate_partner_name(&"가".repeat(100)).is_ok());
        assert!(validate_partner_name(&"가".repeat(101)).is_err());
    }

    #[test]
    fn test_seeded_partners_are_valid() {
        assert!(validate_partner_set(&default_partners()).is_ok());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut partners = default_partners();
        partners[1].name = partners[0].name.clone();
        let err = validate_partner_set(&partners).unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_duplicate_unique_id_rejected() {
        let mut partners = default_partners();
        partners[2].unique_id = partners[0].unique_id.clone();
        let err = validate_partner_set(&partners).unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { ref field, .. } if field == "uniqueId"));
    }
}
