//! Catalog entities and the variant/inventory pairing invariant.
//!
//! A product owns zero or more variants; every variant SKU has exactly
//! one correlated inventory item. Create and delete keep the two lists
//! paired, validated here before any write.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

pub const RECIPE_APPAREL: &str = "apparel";
pub const RECIPE_KIT: &str = "kit";
pub const RECIPE_CUSTOM: &str = "custom";

/// All valid product recipes.
pub const VALID_RECIPES: &[&str] = &[RECIPE_APPAREL, RECIPE_KIT, RECIPE_CUSTOM];

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// A sellable variation of a product (JSONB array element).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub size: String,
    pub color: String,
    pub sku_variant: String,
}

/// Stock level for one variant SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub sku_variant: String,
    pub qty: i32,
}

/// Physical dimensions used for shipping attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub weight_g: f64,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a product recipe is one of the known recipes.
pub fn validate_recipe(recipe: &str) -> Result<(), CoreError> {
    if VALID_RECIPES.contains(&recipe) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid recipe '{recipe}'. Must be one of: {}",
            VALID_RECIPES.join(", ")
        )))
    }
}

/// Validate the variant/inventory pairing invariant.
///
/// Every `sku_variant` in `variants` must appear exactly once in
/// `inventory`, and vice versa. Duplicate variant SKUs are rejected.
pub fn validate_variant_inventory_pairing(
    variants: &[ProductVariant],
    inventory: &[InventoryItem],
) -> Result<(), CoreError> {
    let mut errors: Vec<String> = Vec::new();

    for (i, v) in variants.iter().enumerate() {
        if variants[..i].iter().any(|p| p.sku_variant == v.sku_variant) {
            errors.push(format!("duplicate variant SKU '{}'", v.sku_variant));
        }
    }

    for v in variants {
        let count = inventory
            .iter()
            .filter(|item| item.sku_variant == v.sku_variant)
            .count();
        match count {
            1 => {}
            0 => errors.push(format!("variant '{}' has no inventory item", v.sku_variant)),
            _ => errors.push(format!(
                "variant '{}' has {count} inventory items",
                v.sku_variant
            )),
        }
    }

    for item in inventory {
        if !variants.iter().any(|v| v.sku_variant == item.sku_variant) {
            errors.push(format!(
                "inventory item '{}' has no matching variant",
                item.sku_variant
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Variant/inventory mismatch: {}",
            errors.join("; ")
        )))
    }
}

/// Validate that a master SKU is a non-empty trimmed string.
pub fn validate_sku(sku: &str) -> Result<(), CoreError> {
    if sku.trim().is_empty() {
        Err(CoreError::Validation(
            "SKU must be a non-empty string".to_string(),
        ))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(sku: &str) -> ProductVariant {
        ProductVariant {
            size: "M".to_string(),
            color: "black".to_string(),
            sku_variant: sku.to_string(),
        }
    }

    fn inv(sku: &str, qty: i32) -> InventoryItem {
        InventoryItem {
            sku_variant: sku.to_string(),
            qty,
        }
    }

    #[test]
    fn known_recipes_accepted() {
        for r in VALID_RECIPES {
            assert!(validate_recipe(r).is_ok());
        }
    }

    #[test]
    fn unknown_recipe_rejected() {
        assert!(validate_recipe("bundle").is_err());
    }

    #[test]
    fn paired_lists_pass() {
        let variants = vec![variant("TS-001-M"), variant("TS-001-G")];
        let inventory = vec![inv("TS-001-M", 10), inv("TS-001-G", 4)];
        assert!(validate_variant_inventory_pairing(&variants, &inventory).is_ok());
    }

    #[test]
    fn empty_product_passes() {
        assert!(validate_variant_inventory_pairing(&[], &[]).is_ok());
    }

    #[test]
    fn missing_inventory_rejected() {
        let variants = vec![variant("TS-001-M")];
        let err = validate_variant_inventory_pairing(&variants, &[]).unwrap_err();
        assert!(err.to_string().contains("no inventory item"));
    }

    #[test]
    fn orphan_inventory_rejected() {
        let inventory = vec![inv("TS-999", 1)];
        let err = validate_variant_inventory_pairing(&[], &inventory).unwrap_err();
        assert!(err.to_string().contains("no matching variant"));
    }

    #[test]
    fn duplicate_inventory_rejected() {
        let variants = vec![variant("TS-001-M")];
        let inventory = vec![inv("TS-001-M", 1), inv("TS-001-M", 2)];
        let err = validate_variant_inventory_pairing(&variants, &inventory).unwrap_err();
        assert!(err.to_string().contains("2 inventory items"));
    }

    #[test]
    fn duplicate_variant_sku_rejected() {
        let variants = vec![variant("TS-001-M"), variant("TS-001-M")];
        let inventory = vec![inv("TS-001-M", 1)];
        let err = validate_variant_inventory_pairing(&variants, &inventory).unwrap_err();
        assert!(err.to_string().contains("duplicate variant SKU"));
    }

    #[test]
    fn sku_must_be_non_empty() {
        assert!(validate_sku("").is_err());
        assert!(validate_sku("  ").is_err());
        assert!(validate_sku("TS-001").is_ok());
    }
}
