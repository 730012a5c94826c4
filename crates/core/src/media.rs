//! Media asset roles, usage-rights tracks, and selection validation.
//!
//! Assets carry a usage-rights track: `listing_safe` assets may appear
//! in marketplace listings, `creative_only` assets are permanently
//! excluded from listing photo selections.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Roles and tracks
// ---------------------------------------------------------------------------

pub const ROLE_HERO: &str = "hero";
pub const ROLE_DETAIL: &str = "detail";
pub const ROLE_VARIANT: &str = "variant";
pub const ROLE_LIFESTYLE: &str = "lifestyle";

/// All valid media roles.
pub const VALID_MEDIA_ROLES: &[&str] = &[ROLE_HERO, ROLE_DETAIL, ROLE_VARIANT, ROLE_LIFESTYLE];

pub const TRACK_LISTING_SAFE: &str = "listing_safe";
pub const TRACK_CREATIVE_ONLY: &str = "creative_only";

/// All valid usage-rights tracks.
pub const VALID_MEDIA_TRACKS: &[&str] = &[TRACK_LISTING_SAFE, TRACK_CREATIVE_ONLY];

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// A photo asset in a product's media set (JSONB array element).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: String,
    pub role: String,
    pub track: String,
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub enhanced: bool,
}

/// A video asset in a product's media set. Videos are always
/// `creative_only`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAsset {
    pub id: String,
    pub format: String,
    pub track: String,
    pub url: String,
    pub filename: String,
    pub duration_secs: Option<u32>,
}

/// Quality report for a media set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaReport {
    pub score: i32,
    pub issues: Vec<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a media role string is one of the known roles.
pub fn validate_media_role(role: &str) -> Result<(), CoreError> {
    if VALID_MEDIA_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid media role '{role}'. Must be one of: {}",
            VALID_MEDIA_ROLES.join(", ")
        )))
    }
}

/// Validate that a media track string is one of the known tracks.
pub fn validate_media_track(track: &str) -> Result<(), CoreError> {
    if VALID_MEDIA_TRACKS.contains(&track) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid media track '{track}'. Must be one of: {}",
            VALID_MEDIA_TRACKS.join(", ")
        )))
    }
}

/// Validate a listing draft's selected-photo set against the product's
/// media set.
///
/// Every selected id must exist in `photos` and be on the
/// `listing_safe` track; `creative_only` assets can never be selected.
pub fn validate_photo_selection(
    selected_ids: &[String],
    photos: &[MediaAsset],
) -> Result<(), CoreError> {
    for id in selected_ids {
        let asset = photos.iter().find(|p| &p.id == id).ok_or_else(|| {
            CoreError::Validation(format!("Selected photo '{id}' is not in the media set"))
        })?;
        if asset.track != TRACK_LISTING_SAFE {
            return Err(CoreError::Validation(format!(
                "Photo '{id}' is {TRACK_CREATIVE_ONLY} and cannot appear in a listing"
            )));
        }
    }
    Ok(())
}

/// The ids of all listing-safe photos in a media set, in order.
pub fn listing_safe_ids(photos: &[MediaAsset]) -> Vec<String> {
    photos
        .iter()
        .filter(|p| p.track == TRACK_LISTING_SAFE)
        .map(|p| p.id.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: &str, track: &str) -> MediaAsset {
        MediaAsset {
            id: id.to_string(),
            role: ROLE_HERO.to_string(),
            track: track.to_string(),
            url: format!("/mock/{id}.jpg"),
            filename: format!("{id}.jpg"),
            enhanced: false,
        }
    }

    #[test]
    fn known_roles_and_tracks_accepted() {
        for r in VALID_MEDIA_ROLES {
            assert!(validate_media_role(r).is_ok());
        }
        for t in VALID_MEDIA_TRACKS {
            assert!(validate_media_track(t).is_ok());
        }
    }

    #[test]
    fn unknown_role_rejected() {
        assert!(validate_media_role("banner").is_err());
    }

    #[test]
    fn unknown_track_rejected() {
        assert!(validate_media_track("social").is_err());
    }

    #[test]
    fn listing_safe_selection_passes() {
        let photos = vec![asset("a", TRACK_LISTING_SAFE), asset("b", TRACK_LISTING_SAFE)];
        let selected = vec!["a".to_string(), "b".to_string()];
        assert!(validate_photo_selection(&selected, &photos).is_ok());
    }

    #[test]
    fn creative_only_selection_rejected() {
        let photos = vec![asset("a", TRACK_LISTING_SAFE), asset("b", TRACK_CREATIVE_ONLY)];
        let selected = vec!["b".to_string()];
        let err = validate_photo_selection(&selected, &photos).unwrap_err();
        assert!(err.to_string().contains("creative_only"));
    }

    #[test]
    fn unknown_id_rejected() {
        let photos = vec![asset("a", TRACK_LISTING_SAFE)];
        let selected = vec!["ghost".to_string()];
        assert!(validate_photo_selection(&selected, &photos).is_err());
    }

    #[test]
    fn empty_selection_is_valid() {
        assert!(validate_photo_selection(&[], &[]).is_ok());
    }

    #[test]
    fn listing_safe_ids_filters_tracks() {
        let photos = vec![
            asset("a", TRACK_LISTING_SAFE),
            asset("b", TRACK_CREATIVE_ONLY),
            asset("c", TRACK_LISTING_SAFE),
        ];
        assert_eq!(listing_safe_ids(&photos), vec!["a", "c"]);
    }
}
