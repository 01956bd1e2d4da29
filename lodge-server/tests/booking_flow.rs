//! Booking lifecycle: pricing, guest checkout and cancellation.

mod common;

use http::StatusCode;
use serde_json::json;
use shared::models::Role;

#[tokio::test]
async fn three_nights_at_one_hundred_costs_three_hundred() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&owner, "Seaside").await;
    let room_id = env.create_room(&owner, hotel_id, "201", 100).await;

    let (_, customer) = env.customer_token("Ada", "ada@example.com").await;
    let (status, body) = env
        .post(
            &format!("/api/booking/create/{room_id}"),
            Some(&customer),
            json!({
                "check_in_date": "2024-01-01T00:00:00Z",
                "check_out_date": "2024-01-04T00:00:00Z",
                "guests": {"adults": 2, "children": 1}
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "booking failed: {body}");
    let booking = &body["data"]["booking"];
    assert_eq!(booking["number_of_days"].as_i64(), Some(3));
    assert_eq!(booking["total_price"].as_i64(), Some(300));
    assert_eq!(booking["status"], "Pending");
    assert_eq!(booking["payment_status"], "Pending");
    assert_eq!(booking["guests"]["adults"].as_i64(), Some(2));
    assert!(body["data"]["email_status"].as_str().is_some());
}

#[tokio::test]
async fn caller_supplied_nights_override_the_window() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&owner, "Seaside").await;
    let room_id = env.create_room(&owner, hotel_id, "201", 100).await;

    let (_, customer) = env.customer_token("Ada", "ada@example.com").await;
    let (status, body) = env
        .post(
            &format!("/api/booking/create/{room_id}"),
            Some(&customer),
            json!({
                "check_in_date": "2024-01-01T00:00:00Z",
                "check_out_date": "2024-01-04T00:00:00Z",
                "number_of_days": 5,
                "guests": {"adults": 1}
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["booking"]["number_of_days"].as_i64(), Some(5));
    assert_eq!(body["data"]["booking"]["total_price"].as_i64(), Some(500));
}

#[tokio::test]
async fn booking_leaves_the_room_untouched() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&owner, "Seaside").await;
    let room_id = env.create_room(&owner, hotel_id, "201", 100).await;

    let (_, ada) = env.customer_token("Ada", "ada@example.com").await;
    env.create_booking(&ada, room_id).await;

    // A booking is a reservation record only; the room itself stays
    // on the market until the guest checks out of it.
    let (status, body) = env.get("/api/room?limit=50", None).await;
    assert_eq!(status, StatusCode::OK);
    let room = body["data"]["rooms"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"].as_i64() == Some(room_id))
        .expect("room listed");
    assert_eq!(room["availability"], true);
    assert_eq!(room["reservation_status"], "Pending");

    // Which also means a second guest can book the same room
    let (_, bob) = env.customer_token("Bob", "bob@example.com").await;
    let (status, _) = env
        .post(
            &format!("/api/booking/create/{room_id}"),
            Some(&bob),
            json!({
                "check_in_date": "2024-02-01T00:00:00Z",
                "check_out_date": "2024-02-02T00:00:00Z",
                "guests": {"adults": 1}
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn zero_priced_rooms_cannot_be_booked() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&owner, "Seaside").await;
    let room_id = env.create_room(&owner, hotel_id, "201", 0).await;

    let (_, ada) = env.customer_token("Ada", "ada@example.com").await;
    let (status, body) = env
        .post(
            &format!("/api/booking/create/{room_id}"),
            Some(&ada),
            json!({
                "check_in_date": "2024-01-01T00:00:00Z",
                "check_out_date": "2024-01-04T00:00:00Z",
                "guests": {"adults": 1}
            }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Room price is not available");
}

#[tokio::test]
async fn guest_checkout_takes_the_room_off_the_market() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&owner, "Seaside").await;
    let room_id = env.create_room(&owner, hotel_id, "201", 100).await;

    let (_, ada) = env.customer_token("Ada", "ada@example.com").await;
    env.create_booking(&ada, room_id).await;

    let (status, body) = env
        .post(
            &format!("/api/room/checkout/{room_id}"),
            Some(&ada),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "checkout failed: {body}");
    assert_eq!(body["data"]["availability"], false);
    assert!(body["data"]["check_out_date"].as_i64().is_some());

    // A room already off the market cannot be checked out again
    let (status, body) = env
        .post(
            &format!("/api/room/checkout/{room_id}"),
            Some(&ada),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Room is not available");
}

#[tokio::test]
async fn cancel_keeps_the_room_as_is_and_double_cancel_fails() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&owner, "Seaside").await;
    let room_id = env.create_room(&owner, hotel_id, "201", 100).await;

    let (_, ada) = env.customer_token("Ada", "ada@example.com").await;
    let booking_id = env.create_booking(&ada, room_id).await;

    let (status, body) = env
        .patch(
            &format!("/api/booking/cancel/{booking_id}"),
            Some(&ada),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Cancelled");

    // Cancelling twice is an invalid transition, not a no-op
    let (status, _) = env
        .patch(
            &format!("/api/booking/cancel/{booking_id}"),
            Some(&ada),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn customers_cannot_cancel_someone_elses_booking() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&owner, "Seaside").await;
    let room_id = env.create_room(&owner, hotel_id, "201", 100).await;

    let (_, ada) = env.customer_token("Ada", "ada@example.com").await;
    let booking_id = env.create_booking(&ada, room_id).await;

    let (_, bob) = env.customer_token("Bob", "bob@example.com").await;
    let (status, _) = env
        .patch(
            &format!("/api/booking/cancel/{booking_id}"),
            Some(&bob),
            json!({}),
        )
        .await;
    // Foreign bookings are invisible, not forbidden
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn booking_on_a_missing_room_is_not_found() {
    let env = common::setup().await;
    let (_, ada) = env.customer_token("Ada", "ada@example.com").await;

    let (status, _) = env
        .post(
            "/api/booking/create/999999",
            Some(&ada),
            json!({
                "check_in_date": "2024-01-01T00:00:00Z",
                "check_out_date": "2024-01-02T00:00:00Z",
                "guests": {"adults": 1}
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
