//! Role Model (角色)
//!
//! A single tagged role covers both principal kinds: customers carry
//! [`Role::Customer`], hotel staff carry one of the four staff roles.

use serde::{Deserialize, Serialize};

/// Principal role, stored as its display string in JWT claims and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Role {
    Owner,
    Manager,
    Receptionist,
    Cleaner,
    Customer,
}

impl Role {
    /// Staff roles are everything except the customer role.
    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Customer)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Manager => "Manager",
            Role::Receptionist => "Receptionist",
            Role::Cleaner => "Cleaner",
            Role::Customer => "Customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl std::str::FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Owner" => Ok(Role::Owner),
            "Manager" => Ok(Role::Manager),
            "Receptionist" => Ok(Role::Receptionist),
            "Cleaner" => Ok(Role::Cleaner),
            "Customer" => Ok(Role::Customer),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_display() {
        for role in [
            Role::Owner,
            Role::Manager,
            Role::Receptionist,
            Role::Cleaner,
            Role::Customer,
        ] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn customer_is_not_staff() {
        assert!(!Role::Customer.is_staff());
        assert!(Role::Cleaner.is_staff());
    }
}
