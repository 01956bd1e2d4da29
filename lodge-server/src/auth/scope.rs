//! 酒店范围解析 (Staff scope)
//!
//! Staff requests are confined to one hotel. The resolution rule
//! depends on the role:
//!
//! | 角色 | 解析方式 |
//! |------|---------|
//! | Owner | 全局 (无酒店限制) |
//! | Manager | `hotel.manager_id` 指向本人 |
//! | Receptionist / Cleaner | 花名册 (`hotel_staff`) |
//! | Customer | 无范围 (拒绝) |

use crate::AppError;
use crate::auth::CurrentUser;
use crate::db::repository::hotel;
use crate::utils::AppResult;
use shared::models::{Hotel, Role};
use sqlx::SqlitePool;

/// Resolved access scope of a staff request.
#[derive(Debug, Clone)]
pub struct StaffScope {
    /// None for the owner (global scope)
    pub hotel: Option<Hotel>,
}

impl StaffScope {
    /// The hotel id, or an error for global scope where a concrete
    /// hotel is required.
    pub fn hotel_id(&self) -> AppResult<i64> {
        self.hotel
            .as_ref()
            .map(|h| h.id)
            .ok_or_else(|| AppError::validation("This operation requires a hotel-scoped account"))
    }
}

/// Resolve the hotel scope of a staff member.
///
/// A staff member with no hotel resolves to NotFound, which is also the
/// answer they get for any record they try to reach.
pub async fn resolve_scope(pool: &SqlitePool, user: &CurrentUser) -> AppResult<StaffScope> {
    match user.role {
        Role::Owner => Ok(StaffScope { hotel: None }),
        Role::Manager => {
            let hotel = hotel::find_by_manager(pool, user.id)
                .await?
                .ok_or_else(|| AppError::not_found("Hotel not found for staff"))?;
            Ok(StaffScope { hotel: Some(hotel) })
        }
        Role::Receptionist | Role::Cleaner => {
            let hotel = hotel::find_by_roster(pool, user.id)
                .await?
                .ok_or_else(|| AppError::not_found("Hotel not found for staff"))?;
            Ok(StaffScope { hotel: Some(hotel) })
        }
        Role::Customer => Err(AppError::forbidden(
            "Customer accounts have no staff scope",
        )),
    }
}

/// Record-level booking access.
///
/// The owner sees everything; a manager or receptionist sees a booking
/// only when the booking's hotel lists them as manager. Everyone else
/// gets NotFound, never a 403, so record existence is not revealed.
pub fn can_view_booking(role: Role, staff_id: i64, hotel_manager_id: Option<i64>) -> bool {
    match role {
        Role::Owner => true,
        Role::Manager | Role::Receptionist => hotel_manager_id == Some(staff_id),
        Role::Cleaner | Role::Customer => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_sees_any_booking() {
        assert!(can_view_booking(Role::Owner, 1, None));
        assert!(can_view_booking(Role::Owner, 1, Some(99)));
    }

    #[test]
    fn manager_needs_matching_manager_id() {
        assert!(can_view_booking(Role::Manager, 7, Some(7)));
        assert!(!can_view_booking(Role::Manager, 7, Some(8)));
        assert!(!can_view_booking(Role::Manager, 7, None));
    }

    #[test]
    fn receptionist_is_checked_against_manager_id_too() {
        // Receptionists pass only when they happen to be recorded as
        // the hotel's manager; the roster is not consulted here.
        assert!(!can_view_booking(Role::Receptionist, 3, Some(4)));
        assert!(can_view_booking(Role::Receptionist, 3, Some(3)));
    }

    #[test]
    fn cleaner_and_customer_never_pass() {
        assert!(!can_view_booking(Role::Cleaner, 5, Some(5)));
        assert!(!can_view_booking(Role::Customer, 5, Some(5)));
    }
}
