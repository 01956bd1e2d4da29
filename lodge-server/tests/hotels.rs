//! Hotel management: only the recorded creator can touch a hotel.

mod common;

use http::StatusCode;
use serde_json::json;
use shared::models::Role;

#[tokio::test]
async fn only_the_creator_can_update_a_hotel() {
    let env = common::setup().await;
    let (_, boss) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&boss, "Seaside").await;

    // The creator updates freely
    let (status, body) = env
        .patch(
            &format!("/api/hotel/{hotel_id}"),
            Some(&boss),
            json!({"rating": 4.5}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "update failed: {body}");
    assert_eq!(body["data"]["rating"].as_f64(), Some(4.5));

    // A second owner account is refused
    let (_, rival) = env
        .staff_token("Rival", "rival@example.com", Role::Owner)
        .await;
    let (status, body) = env
        .patch(
            &format!("/api/hotel/{hotel_id}"),
            Some(&rival),
            json!({"rating": 1.0}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"].as_str().unwrap().contains("permission"));

    // And the rating stayed put
    let (_, body) = env.get(&format!("/api/hotel/{hotel_id}"), None).await;
    assert_eq!(body["data"]["rating"].as_f64(), Some(4.5));
}

#[tokio::test]
async fn hotels_without_a_creator_refuse_deletion() {
    let env = common::setup().await;
    let (_, boss) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&boss, "Seaside").await;

    // Legacy row with no recorded creator
    sqlx::query("UPDATE hotel SET created_by = NULL WHERE id = ?")
        .bind(hotel_id)
        .execute(&env.state.pool)
        .await
        .expect("clear creator");

    let (status, body) = env
        .request(
            http::Method::DELETE,
            &format!("/api/hotel/{hotel_id}"),
            Some(&boss),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"].as_str().unwrap().contains("creator"));

    // The hotel is still listed
    let (status, _) = env.get(&format!("/api/hotel/{hotel_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn the_creator_can_delete_their_hotel() {
    let env = common::setup().await;
    let (_, boss) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;
    let hotel_id = env.create_hotel(&boss, "Seaside").await;

    let (status, _) = env
        .request(
            http::Method::DELETE,
            &format!("/api/hotel/{hotel_id}"),
            Some(&boss),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = env.get(&format!("/api/hotel/{hotel_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
