//! 角色检查
//!
//! Pure role gate shared by the middleware and the handlers.

use crate::AppError;
use shared::models::Role;

/// Require the caller's role to be one of `allowed`.
pub fn authorize(role: Role, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "Role '{}' is not permitted for this operation",
            role
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_listed_roles() {
        assert!(authorize(Role::Manager, &[Role::Manager, Role::Receptionist]).is_ok());
        assert!(authorize(Role::Owner, &[Role::Owner]).is_ok());
    }

    #[test]
    fn rejects_unlisted_roles() {
        let err = authorize(Role::Cleaner, &[Role::Manager, Role::Receptionist]).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn owner_is_not_implicitly_allowed() {
        // The owner gets wide access through explicit role lists, not
        // through a bypass here.
        assert!(authorize(Role::Owner, &[Role::Cleaner]).is_err());
    }
}
