//! Server-side account records
//!
//! Domain models visible to clients live in the `shared` crate; the
//! account tables (credential-bearing) stay server-local.

pub mod credential;
pub mod guest;
pub mod staff;
pub mod token;

pub use guest::{Guest, GuestRegister};
pub use staff::{Staff, StaffCreate};
pub use token::{PrincipalKind, token_digest};
