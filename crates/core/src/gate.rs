//! Onboarding gate status transitions and submission validation.
//!
//! Gates are sequential onboarding steps per marketplace. Each gate run
//! carries a checklist completion map and attached evidence; gates
//! unlock in `order` as their predecessors are approved. All functions
//! here are pure and evaluated against data pre-loaded by the caller.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_LOCKED: &str = "locked";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_SUBMITTED: &str = "submitted";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// All valid gate status strings.
pub const VALID_GATE_STATUSES: &[&str] = &[
    STATUS_LOCKED,
    STATUS_IN_PROGRESS,
    STATUS_SUBMITTED,
    STATUS_APPROVED,
    STATUS_REJECTED,
];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle status of a gate run.
///
/// `locked` and `approved` are stable; `submitted` is the only state
/// that requires an external actor (auditor) to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateStatus {
    Locked,
    InProgress,
    Submitted,
    Approved,
    Rejected,
}

impl GateStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_LOCKED => Ok(Self::Locked),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_SUBMITTED => Ok(Self::Submitted),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_REJECTED => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid gate status '{s}'. Must be one of: {}",
                VALID_GATE_STATUSES.join(", ")
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => STATUS_LOCKED,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Submitted => STATUS_SUBMITTED,
            Self::Approved => STATUS_APPROVED,
            Self::Rejected => STATUS_REJECTED,
        }
    }
}

/// A blocker preventing a gate submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocker {
    /// A required checklist item is unchecked.
    MissingRequiredItem { key: String },
    /// The gate definition accepts evidence but none is attached.
    MissingEvidence,
}

impl SubmitBlocker {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingRequiredItem { .. } => "missing required item",
            Self::MissingEvidence => "missing evidence",
        }
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// A checklist item template on a gate definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateCheckItem {
    pub key: String,
    pub label: String,
    pub required: bool,
}

// ---------------------------------------------------------------------------
// Initial status and edit windows
// ---------------------------------------------------------------------------

/// Status assigned to a freshly created gate run.
///
/// Exactly gate #1 of each marketplace starts `in_progress`; all others
/// start `locked` until their predecessor is approved.
pub fn initial_status(order: i32) -> GateStatus {
    if order == 1 {
        GateStatus::InProgress
    } else {
        GateStatus::Locked
    }
}

/// Returns `true` when the checklist of a gate in `status` may be edited.
pub fn is_checklist_editable(status: GateStatus) -> bool {
    status == GateStatus::InProgress
}

/// Returns `true` when evidence may be attached to a gate in `status`.
///
/// Evidence attach is allowed any time pre-approval on an unlocked gate.
pub fn can_attach_evidence(status: GateStatus) -> bool {
    matches!(
        status,
        GateStatus::InProgress | GateStatus::Submitted | GateStatus::Rejected
    )
}

// ---------------------------------------------------------------------------
// Shared submission predicates
// ---------------------------------------------------------------------------

/// Returns `true` when every `required` checklist item is checked.
pub fn all_required_checked(checklist: &[GateCheckItem], checks: &HashMap<String, bool>) -> bool {
    checklist
        .iter()
        .filter(|item| item.required)
        .all(|item| checks.get(&item.key).copied().unwrap_or(false))
}

/// Returns `true` when the evidence requirement is satisfied: either the
/// definition accepts no evidence types, or at least one artifact is
/// attached.
pub fn has_evidence_if_required(evidence_types: &[String], evidence_count: usize) -> bool {
    evidence_types.is_empty() || evidence_count > 0
}

/// Enumerate every blocker preventing submission of a gate run.
///
/// Returns one `MissingRequiredItem` per unchecked required item, plus
/// `MissingEvidence` when the definition accepts evidence types but none
/// is attached. An empty result means the gate may be submitted.
pub fn submit_blockers(
    checklist: &[GateCheckItem],
    checks: &HashMap<String, bool>,
    evidence_types: &[String],
    evidence_count: usize,
) -> Vec<SubmitBlocker> {
    let mut blockers = Vec::new();

    for item in checklist.iter().filter(|i| i.required) {
        if !checks.get(&item.key).copied().unwrap_or(false) {
            blockers.push(SubmitBlocker::MissingRequiredItem {
                key: item.key.clone(),
            });
        }
    }

    if !has_evidence_if_required(evidence_types, evidence_count) {
        blockers.push(SubmitBlocker::MissingEvidence);
    }

    blockers
}

/// Validate the submission preconditions, surfacing blockers as a single
/// enumerable validation error.
pub fn validate_submit(
    checklist: &[GateCheckItem],
    checks: &HashMap<String, bool>,
    evidence_types: &[String],
    evidence_count: usize,
) -> Result<(), CoreError> {
    let blockers = submit_blockers(checklist, checks, evidence_types, evidence_count);
    if blockers.is_empty() {
        Ok(())
    } else {
        let labels: Vec<&str> = blockers.iter().map(|b| b.label()).collect();
        Err(CoreError::Validation(format!(
            "Gate cannot be submitted: {}",
            labels.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Validate a status transition against the gate lifecycle.
///
/// Allowed edges:
///
/// ```text
/// locked      -> in_progress   (unlock, on predecessor approval)
/// in_progress -> submitted     (submit)
/// submitted   -> approved      (auditor approve)
/// submitted   -> rejected      (auditor reject)
/// rejected    -> in_progress   (reopen for resubmission)
/// ```
pub fn validate_transition(from: GateStatus, to: GateStatus) -> Result<(), CoreError> {
    let allowed = matches!(
        (from, to),
        (GateStatus::Locked, GateStatus::InProgress)
            | (GateStatus::InProgress, GateStatus::Submitted)
            | (GateStatus::Submitted, GateStatus::Approved)
            | (GateStatus::Submitted, GateStatus::Rejected)
            | (GateStatus::Rejected, GateStatus::InProgress)
    );
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid gate transition: {} -> {}",
            from.as_str(),
            to.as_str()
        )))
    }
}

/// Validate that a gate may be reopened for resubmission.
///
/// Only `rejected` gates reopen. Locked gates also sit one transition
/// away from `in_progress`, but that edge belongs to the successor
/// unlock on predecessor approval, never to a reopen request.
pub fn validate_reopen(from: GateStatus) -> Result<(), CoreError> {
    if from == GateStatus::Rejected {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Only rejected gates can be reopened, gate is {}",
            from.as_str()
        )))
    }
}

/// Validate that a rejection carries a non-empty reason.
pub fn validate_rejection_reason(reason: &str) -> Result<(), CoreError> {
    if reason.trim().is_empty() {
        Err(CoreError::Validation(
            "Rejection requires a non-empty reason".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Returns `true` when approving a gate should unlock its successor.
///
/// The unlock fires only when the successor is currently `locked`, so a
/// repeated approval can never re-trigger the advance.
pub fn should_unlock(successor_status: GateStatus) -> bool {
    successor_status == GateStatus::Locked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn item(key: &str, required: bool) -> GateCheckItem {
        GateCheckItem {
            key: key.to_string(),
            label: key.to_string(),
            required,
        }
    }

    fn checks(pairs: &[(&str, bool)]) -> HashMap<String, bool> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    // -- GateStatus -----------------------------------------------------------

    #[test]
    fn status_round_trip() {
        for s in &[
            GateStatus::Locked,
            GateStatus::InProgress,
            GateStatus::Submitted,
            GateStatus::Approved,
            GateStatus::Rejected,
        ] {
            assert_eq!(GateStatus::from_str_value(s.as_str()).unwrap(), *s);
        }
    }

    #[test]
    fn invalid_status_rejected() {
        assert!(GateStatus::from_str_value("open").is_err());
        assert!(GateStatus::from_str_value("").is_err());
    }

    // -- initial_status -------------------------------------------------------

    #[test]
    fn first_gate_starts_in_progress() {
        assert_eq!(initial_status(1), GateStatus::InProgress);
    }

    #[test]
    fn later_gates_start_locked() {
        for order in 2..=8 {
            assert_eq!(initial_status(order), GateStatus::Locked);
        }
    }

    #[test]
    fn sequence_has_exactly_one_in_progress() {
        let statuses: Vec<GateStatus> = (1..=5).map(initial_status).collect();
        let in_progress = statuses
            .iter()
            .filter(|s| **s == GateStatus::InProgress)
            .count();
        let locked = statuses.iter().filter(|s| **s == GateStatus::Locked).count();
        assert_eq!(in_progress, 1);
        assert_eq!(locked, 4);
    }

    // -- edit windows ---------------------------------------------------------

    #[test]
    fn checklist_editable_only_in_progress() {
        assert!(is_checklist_editable(GateStatus::InProgress));
        assert!(!is_checklist_editable(GateStatus::Locked));
        assert!(!is_checklist_editable(GateStatus::Submitted));
        assert!(!is_checklist_editable(GateStatus::Approved));
        assert!(!is_checklist_editable(GateStatus::Rejected));
    }

    #[test]
    fn evidence_attach_blocked_when_locked_or_approved() {
        assert!(can_attach_evidence(GateStatus::InProgress));
        assert!(can_attach_evidence(GateStatus::Submitted));
        assert!(can_attach_evidence(GateStatus::Rejected));
        assert!(!can_attach_evidence(GateStatus::Locked));
        assert!(!can_attach_evidence(GateStatus::Approved));
    }

    // -- all_required_checked -------------------------------------------------

    #[test]
    fn all_required_checked_passes_when_complete() {
        let checklist = vec![item("a", true), item("b", true), item("c", false)];
        let checks = checks(&[("a", true), ("b", true)]);
        assert!(all_required_checked(&checklist, &checks));
    }

    #[test]
    fn all_required_checked_ignores_optional_items() {
        let checklist = vec![item("a", true), item("opt", false)];
        let checks = checks(&[("a", true), ("opt", false)]);
        assert!(all_required_checked(&checklist, &checks));
    }

    #[test]
    fn missing_key_counts_as_unchecked() {
        let checklist = vec![item("a", true)];
        assert!(!all_required_checked(&checklist, &HashMap::new()));
    }

    #[test]
    fn explicit_false_counts_as_unchecked() {
        let checklist = vec![item("a", true)];
        let checks = checks(&[("a", false)]);
        assert!(!all_required_checked(&checklist, &checks));
    }

    #[test]
    fn empty_checklist_is_complete() {
        assert!(all_required_checked(&[], &HashMap::new()));
    }

    // -- has_evidence_if_required ---------------------------------------------

    #[test]
    fn no_evidence_types_means_no_requirement() {
        assert!(has_evidence_if_required(&[], 0));
    }

    #[test]
    fn evidence_required_and_missing() {
        assert!(!has_evidence_if_required(&["document".to_string()], 0));
    }

    #[test]
    fn evidence_required_and_present() {
        assert!(has_evidence_if_required(&["document".to_string()], 1));
    }

    // -- submit_blockers ------------------------------------------------------

    #[test]
    fn complete_gate_has_no_blockers() {
        let checklist = vec![item("a", true)];
        let checks = checks(&[("a", true)]);
        let blockers = submit_blockers(&checklist, &checks, &["document".to_string()], 2);
        assert!(blockers.is_empty());
    }

    #[test]
    fn unchecked_required_item_and_missing_evidence() {
        // Checklist [{required: true, done: false}], evidenceTypes
        // ["document"], no evidence attached.
        let checklist = vec![item("a", true)];
        let blockers = submit_blockers(
            &checklist,
            &HashMap::new(),
            &["document".to_string()],
            0,
        );
        let labels: Vec<&str> = blockers.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["missing required item", "missing evidence"]);
    }

    #[test]
    fn blocker_carries_item_key() {
        let checklist = vec![item("bank_data", true)];
        let blockers = submit_blockers(&checklist, &HashMap::new(), &[], 0);
        assert_matches!(
            &blockers[..],
            [SubmitBlocker::MissingRequiredItem { key }] if key == "bank_data"
        );
    }

    #[test]
    fn one_blocker_per_unchecked_required_item() {
        let checklist = vec![item("a", true), item("b", true), item("c", false)];
        let blockers = submit_blockers(&checklist, &HashMap::new(), &[], 0);
        assert_eq!(blockers.len(), 2);
    }

    // -- validate_submit ------------------------------------------------------

    #[test]
    fn validate_submit_enumerates_unmet_conditions() {
        let checklist = vec![item("a", true)];
        let result = validate_submit(&checklist, &HashMap::new(), &["photo".to_string()], 0);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("missing required item"));
        assert!(err.contains("missing evidence"));
    }

    #[test]
    fn validate_submit_passes_complete_gate() {
        let checklist = vec![item("a", true)];
        let checks = checks(&[("a", true)]);
        assert!(validate_submit(&checklist, &checks, &[], 0).is_ok());
    }

    // -- validate_transition --------------------------------------------------

    #[test]
    fn lifecycle_edges_allowed() {
        assert!(validate_transition(GateStatus::Locked, GateStatus::InProgress).is_ok());
        assert!(validate_transition(GateStatus::InProgress, GateStatus::Submitted).is_ok());
        assert!(validate_transition(GateStatus::Submitted, GateStatus::Approved).is_ok());
        assert!(validate_transition(GateStatus::Submitted, GateStatus::Rejected).is_ok());
        assert!(validate_transition(GateStatus::Rejected, GateStatus::InProgress).is_ok());
    }

    #[test]
    fn approved_is_terminal() {
        for to in &[
            GateStatus::Locked,
            GateStatus::InProgress,
            GateStatus::Submitted,
            GateStatus::Rejected,
        ] {
            assert!(validate_transition(GateStatus::Approved, *to).is_err());
        }
    }

    #[test]
    fn locked_gate_cannot_be_submitted() {
        assert!(validate_transition(GateStatus::Locked, GateStatus::Submitted).is_err());
    }

    #[test]
    fn no_self_transitions() {
        for s in &[
            GateStatus::Locked,
            GateStatus::InProgress,
            GateStatus::Submitted,
            GateStatus::Approved,
            GateStatus::Rejected,
        ] {
            assert!(validate_transition(*s, *s).is_err());
        }
    }

    #[test]
    fn re_approval_rejected() {
        // Approving an already-approved gate is not a valid edge, so the
        // successor can never be advanced twice.
        assert!(validate_transition(GateStatus::Approved, GateStatus::Approved).is_err());
    }

    // -- validate_reopen ------------------------------------------------------

    #[test]
    fn only_rejected_gates_reopen() {
        assert!(validate_reopen(GateStatus::Rejected).is_ok());
        for s in &[
            GateStatus::Locked,
            GateStatus::InProgress,
            GateStatus::Submitted,
            GateStatus::Approved,
        ] {
            assert!(validate_reopen(*s).is_err());
        }
    }

    #[test]
    fn locked_gate_never_reopens() {
        // A locked gate must wait for its predecessor's approval; the
        // locked -> in_progress edge is reserved for that unlock.
        assert!(validate_transition(GateStatus::Locked, GateStatus::InProgress).is_ok());
        assert!(validate_reopen(GateStatus::Locked).is_err());
    }

    // -- validate_rejection_reason --------------------------------------------

    #[test]
    fn rejection_requires_reason() {
        assert!(validate_rejection_reason("").is_err());
        assert!(validate_rejection_reason("   ").is_err());
        assert!(validate_rejection_reason("missing bank statement").is_ok());
    }

    // -- should_unlock --------------------------------------------------------

    #[test]
    fn unlock_only_fires_on_locked_successor() {
        assert!(should_unlock(GateStatus::Locked));
        assert!(!should_unlock(GateStatus::InProgress));
        assert!(!should_unlock(GateStatus::Submitted));
        assert!(!should_unlock(GateStatus::Approved));
        assert!(!should_unlock(GateStatus::Rejected));
    }
}
