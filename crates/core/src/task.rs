//! War-room task board rules.
//!
//! Daily sales tasks per marketplace, worked kanban-style: `todo ->
//! doing -> done`. Each task carries a 1-5 priority (1 is most urgent),
//! a 1-100 impact estimate, and an owning role; only that role (or an
//! admin) may move the task.

use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const TASK_TYPE_SETUP: &str = "setup";
pub const TASK_TYPE_LISTING: &str = "listing";
pub const TASK_TYPE_MERCHANT: &str = "merchant";
pub const TASK_TYPE_OPTIMIZATION: &str = "optimization";

/// All valid task type strings.
pub const VALID_TASK_TYPES: &[&str] = &[
    TASK_TYPE_SETUP,
    TASK_TYPE_LISTING,
    TASK_TYPE_MERCHANT,
    TASK_TYPE_OPTIMIZATION,
];

pub const TASK_STATUS_TODO: &str = "todo";
pub const TASK_STATUS_DOING: &str = "doing";
pub const TASK_STATUS_DONE: &str = "done";

/// All valid task status strings.
pub const VALID_TASK_STATUSES: &[&str] = &[TASK_STATUS_TODO, TASK_STATUS_DOING, TASK_STATUS_DONE];

/// Inclusive priority range. 1 is the most urgent.
pub const PRIORITY_RANGE: std::ops::RangeInclusive<i32> = 1..=5;
/// Inclusive impact score range.
pub const IMPACT_RANGE: std::ops::RangeInclusive<i32> = 1..=100;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a task type string.
pub fn validate_task_type(task_type: &str) -> Result<(), CoreError> {
    if VALID_TASK_TYPES.contains(&task_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid task type '{task_type}'. Must be one of: {}",
            VALID_TASK_TYPES.join(", ")
        )))
    }
}

/// Validate a task status string.
pub fn validate_task_status(status: &str) -> Result<(), CoreError> {
    if VALID_TASK_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid task status '{status}'. Must be one of: {}",
            VALID_TASK_STATUSES.join(", ")
        )))
    }
}

/// Validate the 1-5 priority.
pub fn validate_priority(priority: i32) -> Result<(), CoreError> {
    if PRIORITY_RANGE.contains(&priority) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Priority must be between 1 and 5, got {priority}"
        )))
    }
}

/// Validate the 1-100 impact estimate.
pub fn validate_impact(impact: i32) -> Result<(), CoreError> {
    if IMPACT_RANGE.contains(&impact) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Impact must be between 1 and 100, got {impact}"
        )))
    }
}

/// Returns `true` when `role` may edit a task owned by `owner_role`.
///
/// Admins edit everything; otherwise the roles must match.
pub fn can_edit_task(role: &str, owner_role: &str) -> bool {
    role == ROLE_ADMIN || role == owner_role
}

/// Sum of impact over tasks that are not yet done, the board's
/// "pending impact" headline figure.
pub fn pending_impact<'a, I>(tasks: I) -> i32
where
    I: IntoIterator<Item = (&'a str, i32)>,
{
    tasks
        .into_iter()
        .filter(|(status, _)| *status != TASK_STATUS_DONE)
        .map(|(_, impact)| impact)
        .sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{ROLE_CADASTRO, ROLE_CATALOGO};

    #[test]
    fn known_types_and_statuses_accepted() {
        for t in VALID_TASK_TYPES {
            assert!(validate_task_type(t).is_ok());
        }
        for s in VALID_TASK_STATUSES {
            assert!(validate_task_status(s).is_ok());
        }
    }

    #[test]
    fn unknown_type_rejected() {
        assert!(validate_task_type("marketing").is_err());
        assert!(validate_task_type("").is_err());
    }

    #[test]
    fn unknown_status_rejected() {
        assert!(validate_task_status("blocked").is_err());
    }

    #[test]
    fn priority_bounds() {
        assert!(validate_priority(1).is_ok());
        assert!(validate_priority(5).is_ok());
        assert!(validate_priority(0).is_err());
        assert!(validate_priority(6).is_err());
    }

    #[test]
    fn impact_bounds() {
        assert!(validate_impact(1).is_ok());
        assert!(validate_impact(100).is_ok());
        assert!(validate_impact(0).is_err());
        assert!(validate_impact(101).is_err());
    }

    #[test]
    fn admin_edits_any_task() {
        assert!(can_edit_task(ROLE_ADMIN, ROLE_CADASTRO));
        assert!(can_edit_task(ROLE_ADMIN, ROLE_CATALOGO));
    }

    #[test]
    fn owner_role_edits_own_task() {
        assert!(can_edit_task(ROLE_CADASTRO, ROLE_CADASTRO));
        assert!(!can_edit_task(ROLE_CADASTRO, ROLE_CATALOGO));
    }

    #[test]
    fn pending_impact_excludes_done() {
        let tasks = [
            (TASK_STATUS_TODO, 40),
            (TASK_STATUS_DOING, 25),
            (TASK_STATUS_DONE, 90),
        ];
        assert_eq!(pending_impact(tasks), 65);
    }

    #[test]
    fn pending_impact_empty_board() {
        let tasks: [(&str, i32); 0] = [];
        assert_eq!(pending_impact(tasks), 0);
    }
}
