//! Listing draft readiness scoring and publication gating.
//!
//! Readiness is always a pure function of the draft's current editable
//! fields and the publish gate's approval state. It is recomputed on
//! every save and never stored independently of its inputs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::gate::GateStatus;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const LISTING_DRAFT: &str = "draft";
pub const LISTING_READY: &str = "ready";
pub const LISTING_PUBLISHED: &str = "published";

/// All valid listing status strings.
pub const VALID_LISTING_STATUSES: &[&str] = &[LISTING_DRAFT, LISTING_READY, LISTING_PUBLISHED];

// ---------------------------------------------------------------------------
// Scoring constants
// ---------------------------------------------------------------------------

/// Minimum `title_short` length before the short-title deduction applies.
pub const MIN_TITLE_SHORT_LEN: usize = 10;
/// Minimum bullet point count.
pub const MIN_BULLETS: usize = 3;
/// Minimum keyword count.
pub const MIN_KEYWORDS: usize = 5;
/// Score threshold below which a draft is never ready.
pub const READY_SCORE_THRESHOLD: i32 = 80;

pub const DEDUCTION_TITLE: i32 = 20;
pub const DEDUCTION_BULLETS: i32 = 15;
pub const DEDUCTION_KEYWORDS: i32 = 10;
pub const DEDUCTION_PHOTOS: i32 = 25;
pub const DEDUCTION_GATE: i32 = 30;

pub const BLOCKER_TITLE: &str = "short title too small";
pub const BLOCKER_BULLETS: &str = "fewer than 3 bullet points";
pub const BLOCKER_KEYWORDS: &str = "fewer than 5 keywords";
pub const BLOCKER_PHOTOS: &str = "no photo selected";
pub const BLOCKER_GATE: &str = "publish gate not approved";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle status of a listing draft. `published` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Draft,
    Ready,
    Published,
}

impl ListingStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            LISTING_DRAFT => Ok(Self::Draft),
            LISTING_READY => Ok(Self::Ready),
            LISTING_PUBLISHED => Ok(Self::Published),
            _ => Err(CoreError::Validation(format!(
                "Invalid listing status '{s}'. Must be one of: {}",
                VALID_LISTING_STATUSES.join(", ")
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => LISTING_DRAFT,
            Self::Ready => LISTING_READY,
            Self::Published => LISTING_PUBLISHED,
        }
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// AIDA copy framework sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aida {
    #[serde(rename = "A")]
    pub attention: String,
    #[serde(rename = "I")]
    pub interest: String,
    #[serde(rename = "D")]
    pub desire: String,
    #[serde(rename = "Act")]
    pub action: String,
}

/// Generated or hand-edited listing copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPayload {
    pub title_short: String,
    pub title_long_tail: String,
    pub bullets: Vec<String>,
    pub aida: Aida,
    pub keywords: Vec<String>,
}

/// Computed readiness of a listing draft.
///
/// `ready` requires both an empty blocker list and a score at or above
/// [`READY_SCORE_THRESHOLD`]; the two conditions are evaluated
/// independently, never derived from each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingReadiness {
    pub ready: bool,
    pub score: i32,
    pub blockers: Vec<String>,
}

// ---------------------------------------------------------------------------
// Readiness computation
// ---------------------------------------------------------------------------

/// Compute the readiness score and blocker list for a listing draft.
///
/// Score starts at 100 with additive deductions, floored at 0:
///
/// | condition                          | deduction |
/// |------------------------------------|-----------|
/// | `title_short` absent or < 10 chars | -20       |
/// | fewer than 3 bullets               | -15       |
/// | fewer than 5 keywords              | -10       |
/// | no photo selected                  | -25       |
/// | publish gate not approved          | -30       |
pub fn compute_readiness(
    copy: &CopyPayload,
    selected_photo_count: usize,
    publish_gate_status: Option<GateStatus>,
) -> ListingReadiness {
    let mut score = 100;
    let mut blockers: Vec<String> = Vec::new();

    if copy.title_short.chars().count() < MIN_TITLE_SHORT_LEN {
        blockers.push(BLOCKER_TITLE.to_string());
        score -= DEDUCTION_TITLE;
    }

    if copy.bullets.len() < MIN_BULLETS {
        blockers.push(BLOCKER_BULLETS.to_string());
        score -= DEDUCTION_BULLETS;
    }

    if copy.keywords.len() < MIN_KEYWORDS {
        blockers.push(BLOCKER_KEYWORDS.to_string());
        score -= DEDUCTION_KEYWORDS;
    }

    if selected_photo_count == 0 {
        blockers.push(BLOCKER_PHOTOS.to_string());
        score -= DEDUCTION_PHOTOS;
    }

    if publish_gate_status != Some(GateStatus::Approved) {
        blockers.push(BLOCKER_GATE.to_string());
        score -= DEDUCTION_GATE;
    }

    let score = score.max(0);

    ListingReadiness {
        ready: blockers.is_empty() && score >= READY_SCORE_THRESHOLD,
        score,
        blockers,
    }
}

/// Status derived on save: `ready` when readiness clears, else `draft`.
///
/// A published draft stays published; save never reverts the terminal
/// state.
pub fn status_after_save(current: ListingStatus, readiness: &ListingReadiness) -> ListingStatus {
    if current == ListingStatus::Published {
        ListingStatus::Published
    } else if readiness.ready {
        ListingStatus::Ready
    } else {
        ListingStatus::Draft
    }
}

/// Validate the preconditions for marking a draft published.
///
/// Requires both `readiness.ready` and the linked publish gate being
/// `approved`. Publication is terminal.
pub fn validate_publish(
    current: ListingStatus,
    readiness: &ListingReadiness,
    publish_gate_status: Option<GateStatus>,
) -> Result<(), CoreError> {
    if current == ListingStatus::Published {
        return Err(CoreError::Conflict(
            "Listing is already published".to_string(),
        ));
    }
    if publish_gate_status != Some(GateStatus::Approved) {
        return Err(CoreError::Validation(
            "Publish gate is not approved".to_string(),
        ));
    }
    if !readiness.ready {
        return Err(CoreError::Validation(format!(
            "Listing is not ready for publication: {}",
            readiness.blockers.join(", ")
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn copy(title: &str, bullets: usize, keywords: usize) -> CopyPayload {
        CopyPayload {
            title_short: title.to_string(),
            title_long_tail: String::new(),
            bullets: (0..bullets).map(|i| format!("bullet {i}")).collect(),
            aida: Aida::default(),
            keywords: (0..keywords).map(|i| format!("kw{i}")).collect(),
        }
    }

    // -- ListingStatus --------------------------------------------------------

    #[test]
    fn status_round_trip() {
        for s in &[
            ListingStatus::Draft,
            ListingStatus::Ready,
            ListingStatus::Published,
        ] {
            assert_eq!(ListingStatus::from_str_value(s.as_str()).unwrap(), *s);
        }
    }

    #[test]
    fn invalid_status_rejected() {
        assert!(ListingStatus::from_str_value("live").is_err());
    }

    // -- compute_readiness ----------------------------------------------------

    #[test]
    fn complete_draft_scores_100() {
        // 12-char title, 3 bullets, 5 keywords, 1 photo, gate approved.
        let r = compute_readiness(
            &copy("Camiseta Pro", 3, 5),
            1,
            Some(GateStatus::Approved),
        );
        assert_eq!(r.score, 100);
        assert!(r.blockers.is_empty());
        assert!(r.ready);
    }

    #[test]
    fn short_title_few_bullets_few_keywords() {
        // "Camiseta" is 9 chars: -20 -15 -10 = 55, three blockers.
        let r = compute_readiness(&copy("Camiseta", 2, 4), 1, Some(GateStatus::Approved));
        assert_eq!(r.score, 55);
        assert_eq!(
            r.blockers,
            vec![BLOCKER_TITLE, BLOCKER_BULLETS, BLOCKER_KEYWORDS]
        );
        assert!(!r.ready);
    }

    #[test]
    fn empty_draft_floors_at_zero() {
        let r = compute_readiness(&CopyPayload::default(), 0, None);
        assert_eq!(r.score, 0);
        assert_eq!(r.blockers.len(), 5);
        assert!(!r.ready);
    }

    #[test]
    fn unapproved_gate_blocks() {
        for status in &[
            GateStatus::Locked,
            GateStatus::InProgress,
            GateStatus::Submitted,
            GateStatus::Rejected,
        ] {
            let r = compute_readiness(&copy("Camiseta Pro", 3, 5), 1, Some(*status));
            assert_eq!(r.score, 70);
            assert_eq!(r.blockers, vec![BLOCKER_GATE]);
            assert!(!r.ready);
        }
    }

    #[test]
    fn missing_gate_counts_as_unapproved() {
        let r = compute_readiness(&copy("Camiseta Pro", 3, 5), 1, None);
        assert_eq!(r.blockers, vec![BLOCKER_GATE]);
    }

    #[test]
    fn no_photos_deducts_25() {
        let r = compute_readiness(&copy("Camiseta Pro", 3, 5), 0, Some(GateStatus::Approved));
        assert_eq!(r.score, 75);
        assert_eq!(r.blockers, vec![BLOCKER_PHOTOS]);
    }

    #[test]
    fn title_boundary_at_10_chars() {
        let nine = compute_readiness(&copy("123456789", 3, 5), 1, Some(GateStatus::Approved));
        assert_eq!(nine.score, 80);
        let ten = compute_readiness(&copy("1234567890", 3, 5), 1, Some(GateStatus::Approved));
        assert_eq!(ten.score, 100);
    }

    #[test]
    fn ready_requires_empty_blockers_even_at_threshold() {
        // 9-char title: score is exactly 80 but one blocker remains, so
        // both conditions must be evaluated independently.
        let r = compute_readiness(&copy("123456789", 3, 5), 1, Some(GateStatus::Approved));
        assert_eq!(r.score, READY_SCORE_THRESHOLD);
        assert!(!r.blockers.is_empty());
        assert!(!r.ready);
    }

    #[test]
    fn adding_bullets_is_monotonic() {
        let before = compute_readiness(&copy("Camiseta Pro", 2, 5), 1, Some(GateStatus::Approved));
        let after = compute_readiness(&copy("Camiseta Pro", 3, 5), 1, Some(GateStatus::Approved));
        assert!(after.score >= before.score + DEDUCTION_BULLETS);
    }

    #[test]
    fn multibyte_title_measured_in_chars() {
        // 10 accented characters, more than 10 bytes.
        let r = compute_readiness(&copy("ãããããããããã", 3, 5), 1, Some(GateStatus::Approved));
        assert_eq!(r.score, 100);
    }

    // -- status_after_save ----------------------------------------------------

    #[test]
    fn save_promotes_to_ready() {
        let r = compute_readiness(&copy("Camiseta Pro", 3, 5), 1, Some(GateStatus::Approved));
        assert_eq!(status_after_save(ListingStatus::Draft, &r), ListingStatus::Ready);
    }

    #[test]
    fn save_demotes_to_draft() {
        let r = compute_readiness(&copy("Camiseta", 2, 4), 1, Some(GateStatus::Approved));
        assert_eq!(status_after_save(ListingStatus::Ready, &r), ListingStatus::Draft);
    }

    #[test]
    fn save_never_reverts_published() {
        let r = compute_readiness(&CopyPayload::default(), 0, None);
        assert_eq!(
            status_after_save(ListingStatus::Published, &r),
            ListingStatus::Published
        );
    }

    // -- validate_publish -----------------------------------------------------

    fn ready() -> ListingReadiness {
        ListingReadiness {
            ready: true,
            score: 100,
            blockers: vec![],
        }
    }

    fn not_ready() -> ListingReadiness {
        ListingReadiness {
            ready: false,
            score: 55,
            blockers: vec![BLOCKER_TITLE.to_string()],
        }
    }

    #[test]
    fn publish_allowed_when_ready_and_gate_approved() {
        assert!(
            validate_publish(ListingStatus::Ready, &ready(), Some(GateStatus::Approved)).is_ok()
        );
    }

    #[test]
    fn publish_rejected_without_gate_approval() {
        for status in &[
            GateStatus::Locked,
            GateStatus::InProgress,
            GateStatus::Submitted,
            GateStatus::Rejected,
        ] {
            assert_matches!(
                validate_publish(ListingStatus::Ready, &ready(), Some(*status)),
                Err(CoreError::Validation(_))
            );
        }
    }

    #[test]
    fn publish_rejected_when_not_ready() {
        assert_matches!(
            validate_publish(ListingStatus::Draft, &not_ready(), Some(GateStatus::Approved)),
            Err(CoreError::Validation(msg)) if msg.contains(BLOCKER_TITLE)
        );
    }

    #[test]
    fn publish_rejected_when_both_conditions_fail() {
        assert!(validate_publish(ListingStatus::Draft, &not_ready(), None).is_err());
    }

    #[test]
    fn double_publish_conflicts() {
        assert_matches!(
            validate_publish(ListingStatus::Published, &ready(), Some(GateStatus::Approved)),
            Err(CoreError::Conflict(_))
        );
    }
}
