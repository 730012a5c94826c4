//! Evidence type constants and attached-evidence references.
//!
//! Evidence is an uploaded artifact (document, screenshot, etc.) proving
//! a checklist item's completion. File storage itself is external; the
//! domain only tracks typed references.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Evidence types
// ---------------------------------------------------------------------------

pub const EVIDENCE_DOCUMENT: &str = "document";
pub const EVIDENCE_SCREENSHOT: &str = "screenshot";
pub const EVIDENCE_LINK: &str = "link";
pub const EVIDENCE_API_RESPONSE: &str = "api_response";
pub const EVIDENCE_PHOTO: &str = "photo";
pub const EVIDENCE_VIDEO: &str = "video";

/// All valid evidence types.
pub const VALID_EVIDENCE_TYPES: &[&str] = &[
    EVIDENCE_DOCUMENT,
    EVIDENCE_SCREENSHOT,
    EVIDENCE_LINK,
    EVIDENCE_API_RESPONSE,
    EVIDENCE_PHOTO,
    EVIDENCE_VIDEO,
];

// ---------------------------------------------------------------------------
// Evidence references
// ---------------------------------------------------------------------------

/// A reference to an uploaded evidence artifact, stored inline on the
/// gate run (JSONB array).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRef {
    pub id: String,
    pub evidence_type: String,
    pub filename: String,
    pub url: String,
    pub uploaded_at: Timestamp,
}

/// Validate that an evidence type string is one of the known types.
pub fn validate_evidence_type(evidence_type: &str) -> Result<(), CoreError> {
    if VALID_EVIDENCE_TYPES.contains(&evidence_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid evidence type '{evidence_type}'. Must be one of: {}",
            VALID_EVIDENCE_TYPES.join(", ")
        )))
    }
}

/// Validate that every accepted-evidence-type entry on a gate definition
/// is a known type.
pub fn validate_evidence_types(types: &[String]) -> Result<(), CoreError> {
    for t in types {
        validate_evidence_type(t)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_accepted() {
        for t in VALID_EVIDENCE_TYPES {
            assert!(validate_evidence_type(t).is_ok());
        }
    }

    #[test]
    fn unknown_type_rejected() {
        let result = validate_evidence_type("audio");
        assert!(result.is_err());
    }

    #[test]
    fn empty_type_rejected() {
        assert!(validate_evidence_type("").is_err());
    }

    #[test]
    fn list_validation_rejects_on_first_bad_entry() {
        let types = vec!["document".to_string(), "hologram".to_string()];
        assert!(validate_evidence_types(&types).is_err());
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(validate_evidence_types(&[]).is_ok());
    }

    #[test]
    fn evidence_types_complete() {
        assert_eq!(VALID_EVIDENCE_TYPES.len(), 6);
    }
}
