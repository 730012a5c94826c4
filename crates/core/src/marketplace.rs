//! Marketplace key constants and launch-wave metadata.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Marketplace keys
// ---------------------------------------------------------------------------

pub const MARKETPLACE_MERCADOLIVRE: &str = "mercadolivre";
pub const MARKETPLACE_SHOPEE: &str = "shopee";
pub const MARKETPLACE_SHEIN: &str = "shein";
pub const MARKETPLACE_TIKTOK: &str = "tiktok";
pub const MARKETPLACE_KWAI: &str = "kwai";
pub const MARKETPLACE_AMAZON: &str = "amazon";

/// All valid marketplace keys.
pub const VALID_MARKETPLACES: &[&str] = &[
    MARKETPLACE_MERCADOLIVRE,
    MARKETPLACE_SHOPEE,
    MARKETPLACE_SHEIN,
    MARKETPLACE_TIKTOK,
    MARKETPLACE_KWAI,
    MARKETPLACE_AMAZON,
];

// ---------------------------------------------------------------------------
// Launch waves
// ---------------------------------------------------------------------------

pub const WAVE_1: &str = "wave1";
pub const WAVE_2: &str = "wave2";

/// Static per-marketplace metadata.
pub struct MarketplaceInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub short_name: &'static str,
    pub wave: &'static str,
}

/// Display names and launch waves per marketplace.
pub const MARKETPLACE_INFO: &[MarketplaceInfo] = &[
    MarketplaceInfo {
        key: MARKETPLACE_MERCADOLIVRE,
        name: "Mercado Livre",
        short_name: "ML",
        wave: WAVE_1,
    },
    MarketplaceInfo {
        key: MARKETPLACE_SHOPEE,
        name: "Shopee",
        short_name: "Shopee",
        wave: WAVE_1,
    },
    MarketplaceInfo {
        key: MARKETPLACE_SHEIN,
        name: "Shein",
        short_name: "Shein",
        wave: WAVE_2,
    },
    MarketplaceInfo {
        key: MARKETPLACE_TIKTOK,
        name: "TikTok Shop",
        short_name: "TikTok",
        wave: WAVE_2,
    },
    MarketplaceInfo {
        key: MARKETPLACE_KWAI,
        name: "Kwai",
        short_name: "Kwai",
        wave: WAVE_2,
    },
    MarketplaceInfo {
        key: MARKETPLACE_AMAZON,
        name: "Amazon",
        short_name: "Amazon",
        wave: WAVE_2,
    },
];

/// Look up static metadata for a marketplace key.
pub fn marketplace_info(key: &str) -> Option<&'static MarketplaceInfo> {
    MARKETPLACE_INFO.iter().find(|m| m.key == key)
}

/// Validate that a marketplace key is one of the known marketplaces.
pub fn validate_marketplace(key: &str) -> Result<(), CoreError> {
    if VALID_MARKETPLACES.contains(&key) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown marketplace '{key}'. Valid marketplaces: {}",
            VALID_MARKETPLACES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_marketplaces_accepted() {
        for key in VALID_MARKETPLACES {
            assert!(validate_marketplace(key).is_ok());
        }
    }

    #[test]
    fn unknown_marketplace_rejected() {
        assert!(validate_marketplace("aliexpress").is_err());
    }

    #[test]
    fn case_sensitive_keys() {
        assert!(validate_marketplace("Shopee").is_err());
    }

    #[test]
    fn info_covers_every_key() {
        for key in VALID_MARKETPLACES {
            assert!(marketplace_info(key).is_some(), "missing info for {key}");
        }
    }

    #[test]
    fn wave1_is_ml_and_shopee() {
        let wave1: Vec<_> = MARKETPLACE_INFO
            .iter()
            .filter(|m| m.wave == WAVE_1)
            .map(|m| m.key)
            .collect();
        assert_eq!(wave1, vec![MARKETPLACE_MERCADOLIVRE, MARKETPLACE_SHOPEE]);
    }

    #[test]
    fn unknown_key_has_no_info() {
        assert!(marketplace_info("ebay").is_none());
    }
}
