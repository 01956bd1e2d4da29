//! Lodge Shared - 酒店预订系统共享类型
//!
//! Domain models, request/response DTOs and small utilities shared
//! between the lodge server and its clients.

pub mod models;
pub mod util;

pub use models::{
    Booking, BookingStatus, Guests, Hotel, ImageRef, Payment, PaymentMethod, PaymentState,
    PaymentStatus, ReservationStatus, Role, Room,
};
