//! Payment flows: minor-unit amounts, failed charges on the ledger,
//! the paid-booking cancellation guard and revenue reporting.

mod common;

use http::StatusCode;
use serde_json::json;
use shared::models::Role;

use lodge_server::db::repository::guest;

#[tokio::test]
async fn successful_checkout_charges_minor_units_and_confirms() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&owner, "Seaside").await;
    let room_id = env.create_room(&owner, hotel_id, "201", 100).await;

    let (ada_id, ada) = env.customer_token("Ada", "ada@example.com").await;
    let booking_id = env.create_booking(&ada, room_id).await;

    let (status, body) = env
        .post(
            &format!("/api/payment/checkout/online/{booking_id}"),
            Some(&ada),
            json!({"source": "tok_visa"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "checkout failed: {body}");

    let payment = &body["data"]["payment"];
    // 300 major units become 30000 minor units
    assert_eq!(payment["amount"].as_i64(), Some(30000));
    // The gateway's "succeeded" is stored as Completed
    assert_eq!(payment["status"], "Completed");
    assert_eq!(payment["payment_method"], "Online");
    assert_eq!(body["data"]["email_status"], "sent");

    // Booking flipped to Paid / Confirmed
    let (status, body) = env
        .get(&format!("/api/booking/{booking_id}"), Some(&owner))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_price"].as_i64(), Some(300));

    // The guest's payment history grew by one
    let history = guest::payment_ids(&env.state.pool, ada_id)
        .await
        .expect("history");
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn declined_card_is_rejected_but_recorded() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&owner, "Seaside").await;
    let room_id = env.create_room(&owner, hotel_id, "201", 100).await;

    let (ada_id, ada) = env.customer_token("Ada", "ada@example.com").await;
    let booking_id = env.create_booking(&ada, room_id).await;

    let (status, _) = env
        .post(
            &format!("/api/payment/checkout/online/{booking_id}"),
            Some(&ada),
            json!({"source": "declined_visa"}),
        )
        .await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);

    // The decline still left an audit row
    let (status, body) = env
        .get("/api/payment/owner/payments", Some(&owner))
        .await;
    assert_eq!(status, StatusCode::OK);
    let payments = body["data"]["payments"].as_array().unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0]["status"], "Failed");

    // But only successful charges enter the guest's payment history
    let history = guest::payment_ids(&env.state.pool, ada_id)
        .await
        .expect("history");
    assert!(history.is_empty());
}

#[tokio::test]
async fn cash_checkout_needs_no_source() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&owner, "Seaside").await;
    let room_id = env.create_room(&owner, hotel_id, "201", 100).await;

    let (_, ada) = env.customer_token("Ada", "ada@example.com").await;
    let booking_id = env.create_booking(&ada, room_id).await;

    let (status, body) = env
        .post(
            &format!("/api/payment/checkout/cash/{booking_id}"),
            Some(&ada),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["payment"]["payment_method"], "Cash");
    assert_eq!(body["data"]["payment"]["status"], "Completed");
}

#[tokio::test]
async fn paying_twice_is_an_invalid_transition() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&owner, "Seaside").await;
    let room_id = env.create_room(&owner, hotel_id, "201", 100).await;

    let (_, ada) = env.customer_token("Ada", "ada@example.com").await;
    let booking_id = env.create_booking(&ada, room_id).await;

    let (status, _) = env
        .post(
            &format!("/api/payment/checkout/online/{booking_id}"),
            Some(&ada),
            json!({"source": "tok_visa"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = env
        .post(
            &format!("/api/payment/checkout/online/{booking_id}"),
            Some(&ada),
            json!({"source": "tok_visa"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn paid_bookings_cannot_be_cancelled_by_request() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&owner, "Seaside").await;
    let room_id = env.create_room(&owner, hotel_id, "201", 100).await;

    let (_, ada) = env.customer_token("Ada", "ada@example.com").await;
    let booking_id = env.create_booking(&ada, room_id).await;

    env.post(
        &format!("/api/payment/checkout/online/{booking_id}"),
        Some(&ada),
        json!({"source": "tok_visa"}),
    )
    .await;

    let (status, body) = env
        .post(
            &format!("/api/payment/request-cancellation/{booking_id}"),
            Some(&ada),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"].as_str().unwrap().contains("paid"));
}

#[tokio::test]
async fn unpaid_cancellation_request_goes_through() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&owner, "Seaside").await;
    let room_id = env.create_room(&owner, hotel_id, "201", 100).await;

    let (_, ada) = env.customer_token("Ada", "ada@example.com").await;
    let booking_id = env.create_booking(&ada, room_id).await;

    let (status, _) = env
        .post(
            &format!("/api/payment/request-cancellation/{booking_id}"),
            Some(&ada),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // The booking is cancelled for good; paying it is now rejected
    let (status, _) = env
        .post(
            &format!("/api/payment/checkout/cash/{booking_id}"),
            Some(&ada),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn empty_ledger_lists_are_not_found_but_revenue_is_zero() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;

    let (status, _) = env
        .get("/api/payment/owner/payments", Some(&owner))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = env.get("/api/payment/totalAmount", Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_amount"].as_i64(), Some(0));
}

#[tokio::test]
async fn revenue_accumulates_across_hotels() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_a = env.create_hotel(&owner, "Seaside").await;
    let hotel_b = env.create_hotel(&owner, "Mountain").await;
    let room_a = env.create_room(&owner, hotel_a, "101", 100).await;
    let room_b = env.create_room(&owner, hotel_b, "102", 50).await;

    let (_, ada) = env.customer_token("Ada", "ada@example.com").await;
    let booking_a = env.create_booking(&ada, room_a).await;
    let booking_b = env.create_booking(&ada, room_b).await;

    for id in [booking_a, booking_b] {
        let (status, _) = env
            .post(
                &format!("/api/payment/checkout/online/{id}"),
                Some(&ada),
                json!({"source": "tok_visa"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    // (300 + 150) major units in minor units
    let (status, body) = env.get("/api/payment/totalAmount", Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_amount"].as_i64(), Some(45000));
}
