//! Domain Models
//!
//! Hotel booking domain types shared between server and clients.
//! Rows map 1:1 to SQLite tables via `sqlx::FromRow`; JSON-ish list
//! columns (images, amenities) use `sqlx::types::Json`.

pub mod booking;
pub mod hotel;
pub mod image_ref;
pub mod payment;
pub mod role;
pub mod room;

pub use booking::{Booking, BookingCreate, BookingStatus, BookingView, Guests, PaymentStatus};
pub use hotel::{Hotel, HotelCreate, HotelUpdate, StaffAssign};
pub use image_ref::ImageRef;
pub use payment::{Payment, PaymentMethod, PaymentState};
pub use role::Role;
pub use room::{ReservationStatus, Room, RoomCreate, RoomToClean, RoomTools, RoomUpdate};
