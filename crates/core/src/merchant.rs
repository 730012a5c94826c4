//! Merchant feed row validation and AI-content disclosure.
//!
//! Feed rows are validated client-side before export; errors make a row
//! invalid, warnings only flag it. The disclosure block marks
//! AI-generated title/description content per Merchant Center structured
//! data conventions.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field value constants
// ---------------------------------------------------------------------------

pub const AVAILABILITY_IN_STOCK: &str = "in_stock";
pub const AVAILABILITY_OUT_OF_STOCK: &str = "out_of_stock";
pub const AVAILABILITY_PREORDER: &str = "preorder";

/// All valid availability values.
pub const VALID_AVAILABILITY: &[&str] = &[
    AVAILABILITY_IN_STOCK,
    AVAILABILITY_OUT_OF_STOCK,
    AVAILABILITY_PREORDER,
];

pub const CONDITION_NEW: &str = "new";
pub const CONDITION_REFURBISHED: &str = "refurbished";
pub const CONDITION_USED: &str = "used";

/// All valid condition values.
pub const VALID_CONDITIONS: &[&str] = &[CONDITION_NEW, CONDITION_REFURBISHED, CONDITION_USED];

/// Digital source type marking AI-generated content.
pub const SOURCE_TRAINED_ALGORITHMIC_MEDIA: &str = "trained_algorithmic_media";

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// The exported fields of one merchant feed row (JSONB document).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantFeedFields {
    pub id: String,
    pub link: String,
    pub image_link: String,
    pub availability: String,
    pub price: String,
    pub brand: String,
    pub gtin: Option<String>,
    pub mpn: Option<String>,
    pub condition: String,
    pub google_product_category: String,
    pub shipping_weight: String,
}

/// A structured AI-generated content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredContent {
    #[serde(rename = "digitalSourceType")]
    pub digital_source_type: String,
    pub content: String,
}

/// AI-content disclosure attached to a feed row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiDisclosure {
    pub use_structured: bool,
    pub structured_title: Option<StructuredContent>,
    pub structured_description: Option<StructuredContent>,
}

/// Result of validating a feed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a merchant feed row's exported fields.
///
/// Missing required fields and invalid enum values are errors; a row
/// without gtin and mpn gets a warning (at least one identifier is
/// recommended).
pub fn validate_feed_row(fields: &MerchantFeedFields) -> MerchantValidation {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let required = [
        ("id", &fields.id),
        ("link", &fields.link),
        ("image_link", &fields.image_link),
        ("price", &fields.price),
        ("brand", &fields.brand),
        ("google_product_category", &fields.google_product_category),
        ("shipping_weight", &fields.shipping_weight),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            errors.push(format!("missing required field '{name}'"));
        }
    }

    if !VALID_AVAILABILITY.contains(&fields.availability.as_str()) {
        errors.push(format!(
            "invalid availability '{}'. Must be one of: {}",
            fields.availability,
            VALID_AVAILABILITY.join(", ")
        ));
    }

    if !VALID_CONDITIONS.contains(&fields.condition.as_str()) {
        errors.push(format!(
            "invalid condition '{}'. Must be one of: {}",
            fields.condition,
            VALID_CONDITIONS.join(", ")
        ));
    }

    if fields.gtin.as_deref().is_none_or(|s| s.trim().is_empty())
        && fields.mpn.as_deref().is_none_or(|s| s.trim().is_empty())
    {
        warnings.push("neither gtin nor mpn provided".to_string());
    }

    MerchantValidation {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_fields() -> MerchantFeedFields {
        MerchantFeedFields {
            id: "SKU-001".to_string(),
            link: "https://loja.example/p/1".to_string(),
            image_link: "https://loja.example/img/1.jpg".to_string(),
            availability: AVAILABILITY_IN_STOCK.to_string(),
            price: "79.90 BRL".to_string(),
            brand: "Aurora".to_string(),
            gtin: Some("7891234567890".to_string()),
            mpn: None,
            condition: CONDITION_NEW.to_string(),
            google_product_category: "Apparel & Accessories > Clothing".to_string(),
            shipping_weight: "0.3 kg".to_string(),
        }
    }

    #[test]
    fn complete_row_is_valid() {
        let v = validate_feed_row(&complete_fields());
        assert!(v.valid);
        assert!(v.errors.is_empty());
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn missing_price_is_error() {
        let mut fields = complete_fields();
        fields.price = String::new();
        let v = validate_feed_row(&fields);
        assert!(!v.valid);
        assert!(v.errors.iter().any(|e| e.contains("'price'")));
    }

    #[test]
    fn invalid_availability_is_error() {
        let mut fields = complete_fields();
        fields.availability = "sold_out".to_string();
        let v = validate_feed_row(&fields);
        assert!(!v.valid);
        assert!(v.errors.iter().any(|e| e.contains("availability")));
    }

    #[test]
    fn invalid_condition_is_error() {
        let mut fields = complete_fields();
        fields.condition = "mint".to_string();
        assert!(!validate_feed_row(&fields).valid);
    }

    #[test]
    fn missing_identifiers_only_warns() {
        let mut fields = complete_fields();
        fields.gtin = None;
        fields.mpn = None;
        let v = validate_feed_row(&fields);
        assert!(v.valid);
        assert_eq!(v.warnings.len(), 1);
    }

    #[test]
    fn mpn_alone_satisfies_identifier_recommendation() {
        let mut fields = complete_fields();
        fields.gtin = None;
        fields.mpn = Some("AUR-TS-001".to_string());
        assert!(validate_feed_row(&fields).warnings.is_empty());
    }

    #[test]
    fn blank_gtin_counts_as_missing() {
        let mut fields = complete_fields();
        fields.gtin = Some("  ".to_string());
        fields.mpn = None;
        assert_eq!(validate_feed_row(&fields).warnings.len(), 1);
    }

    #[test]
    fn errors_accumulate() {
        let v = validate_feed_row(&MerchantFeedFields::default());
        // 7 missing required fields + 2 invalid enums.
        assert_eq!(v.errors.len(), 9);
        assert!(!v.valid);
    }
}
