//! Account lifecycle over the HTTP surface: registration, login,
//! logout revocation, password change and role gates.

mod common;

use http::{Method, StatusCode};
use serde_json::json;
use shared::models::Role;

#[tokio::test]
async fn register_login_me_roundtrip() {
    let env = common::setup().await;

    let (id, token) = env.customer_token("Ada", "ada@example.com").await;

    let (status, body) = env.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"].as_i64(), Some(id));
    assert_eq!(body["data"]["email"], "ada@example.com");
    // The credential hash never leaves the server
    assert!(body["data"].get("hash_pass").is_none());

    // Fresh login works too
    let (status, body) = env
        .post(
            "/api/auth/login",
            None,
            json!({"email": "ada@example.com", "password": "hunter2hunter2"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].as_str().is_some());
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let env = common::setup().await;
    env.customer_token("Ada", "ada@example.com").await;

    let (status, _) = env
        .post(
            "/api/auth/register",
            None,
            json!({"name": "Imposter", "email": "ada@example.com", "password": "hunter2hunter2"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn wrong_password_gets_a_uniform_message() {
    let env = common::setup().await;
    env.customer_token("Ada", "ada@example.com").await;

    let (status, body) = env
        .post(
            "/api/auth/login",
            None,
            json!({"email": "ada@example.com", "password": "wrong-password"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");

    // Unknown email answers identically, no enumeration
    let (status, body) = env
        .post(
            "/api/auth/login",
            None,
            json!({"email": "nobody@example.com", "password": "wrong-password"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let env = common::setup().await;
    let (_, token) = env.customer_token("Ada", "ada@example.com").await;

    let (status, _) = env
        .request(Method::POST, "/api/auth/logout", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // The signature still verifies, the registry says no
    let (status, _) = env.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn password_change_revokes_all_sessions() {
    let env = common::setup().await;
    let (_, token) = env.customer_token("Ada", "ada@example.com").await;

    let (status, _) = env
        .post(
            "/api/auth/change-password",
            Some(&token),
            json!({"current_password": "hunter2hunter2", "new_password": "correct-horse-battery"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = env.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Old password is gone, new one works
    let (status, _) = env
        .post(
            "/api/auth/login",
            None,
            json!({"email": "ada@example.com", "password": "hunter2hunter2"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = env
        .post(
            "/api/auth/login",
            None,
            json!({"email": "ada@example.com", "password": "correct-horse-battery"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_reject_anonymous_and_wrong_roles() {
    let env = common::setup().await;

    // Anonymous
    let (status, _) = env.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Public catalogue needs no token
    let (status, _) = env.get("/api/hotel", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = env.get("/api/room", None).await;
    assert_eq!(status, StatusCode::OK);

    // A customer cannot create hotels
    let (_, customer) = env.customer_token("Ada", "ada@example.com").await;
    let (status, _) = env
        .post(
            "/api/hotel",
            Some(&customer),
            json!({"name": "Nope", "location": "x", "price_per_night": 1}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A cleaner cannot create staff accounts
    let (_, cleaner) = env
        .staff_token("Mop", "mop@example.com", Role::Cleaner)
        .await;
    let (status, _) = env
        .post(
            "/api/auth/staff",
            Some(&cleaner),
            json!({"name": "X", "email": "x@example.com", "password": "hunter2hunter2", "role": "Manager"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn owner_creates_staff_but_not_customers() {
    let env = common::setup().await;
    let (_, owner) = env
        .staff_token("Boss", "boss@example.com", Role::Owner)
        .await;

    let (status, body) = env
        .post(
            "/api/auth/staff",
            Some(&owner),
            json!({"name": "Mia", "email": "mia@example.com", "password": "hunter2hunter2", "role": "Manager"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "Manager");

    let (status, _) = env
        .post(
            "/api/auth/staff",
            Some(&owner),
            json!({"name": "Cus", "email": "cus@example.com", "password": "hunter2hunter2", "role": "Customer"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
