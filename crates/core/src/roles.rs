//! Well-known role name constants and access helpers.
//!
//! Roles are carried in JWT claims; the api layer enforces them at the
//! call site. Domain transition functions never inspect roles.

/// Full access to every operation.
pub const ROLE_ADMIN: &str = "admin";
/// Onboarding operator: edits gate checklists and evidence.
pub const ROLE_CADASTRO: &str = "cadastro";
/// Catalog operator: edits products, media, and listing drafts.
pub const ROLE_CATALOGO: &str = "catalogo";
/// Auditor: resolves submitted gates (approve/reject).
pub const ROLE_AUDITOR: &str = "auditor";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_CADASTRO, ROLE_CATALOGO, ROLE_AUDITOR];

/// Returns `true` when `role` is one of `required` or is `admin`.
///
/// Admins pass every access check.
pub fn can_access(role: &str, required: &[&str]) -> bool {
    role == ROLE_ADMIN || required.contains(&role)
}

/// Validate that a role string is one of the known roles.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_passes_any_check() {
        assert!(can_access(ROLE_ADMIN, &[ROLE_AUDITOR]));
        assert!(can_access(ROLE_ADMIN, &[]));
    }

    #[test]
    fn matching_role_passes() {
        assert!(can_access(ROLE_AUDITOR, &[ROLE_AUDITOR, ROLE_ADMIN]));
        assert!(can_access(ROLE_CADASTRO, &[ROLE_CADASTRO]));
    }

    #[test]
    fn non_matching_role_rejected() {
        assert!(!can_access(ROLE_CATALOGO, &[ROLE_AUDITOR]));
        assert!(!can_access(ROLE_CADASTRO, &[ROLE_CATALOGO, ROLE_AUDITOR]));
    }

    #[test]
    fn valid_roles_accepted() {
        for role in VALID_ROLES {
            assert!(validate_role(role).is_ok());
        }
    }

    #[test]
    fn unknown_role_rejected() {
        let result = validate_role("viewer");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid role"));
    }

    #[test]
    fn roles_complete() {
        assert_eq!(VALID_ROLES.len(), 4);
    }
}
