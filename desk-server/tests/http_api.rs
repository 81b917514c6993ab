use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use desk_server::api::build_router;
use desk_server::db::{DbService, seed};
use desk_server::{Config, ServerState};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::path::Path;
use tower::ServiceExt;

const USERNAME: &str = "frontdesk";
const PASSWORD: &str = "river-sunrise-2024";

async fn app() -> Router {
    let db = DbService::in_memory().await.unwrap();
    let rooms_file = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/rooms.json");
    seed::seed_rooms_from_file(&db.pool, &rooms_file).await.unwrap();
    seed::ensure_admin(&db.pool, USERNAME, PASSWORD).await.unwrap();
    build_router(ServerState::new(Config::for_tests(), db))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": USERNAME, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

fn booking_body(check_in: &str, check_out: &str, rooms: &[&str]) -> Value {
    json!({
        "customerName": "Somchai",
        "phone": "0812345678",
        "checkIn": check_in,
        "checkOut": check_out,
        "roomIds": rooms,
        "paymentStatus": "DEPOSIT",
        "depositAmount": 500.0,
        "pricePerNight": 1200.0
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_api_requires_token() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/bookings", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, _) = send(&app, Method::GET, "/api/rooms", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_bad_password() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": USERNAME, "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    let (unknown_status, unknown_body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "nobody", "password": "wrong" })),
    )
    .await;
    assert_eq!(unknown_status, status);
    assert_eq!(unknown_body["message"], body["message"]);
}

#[tokio::test]
async fn test_me_returns_signed_in_user() {
    let app = app().await;
    let token = login(&app).await;
    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], USERNAME);
    assert_eq!(body["displayName"], "Administrator");
}

#[tokio::test]
async fn test_rooms_sorted_numerically() {
    let app = app().await;
    let token = login(&app).await;
    let (status, body) = send(&app, Method::GET, "/api/rooms", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 11);
    assert_eq!(ids.first(), Some(&"101"));
    assert_eq!(ids.last(), Some(&"302"));
}

#[tokio::test]
async fn test_booking_create_get_update_flow() {
    let app = app().await;
    let token = login(&app).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/bookings",
        Some(&token),
        Some(booking_body("10/07/2024", "12/07/2024", &["102", "101"])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["roomIds"], json!(["101", "102"]));
    assert_eq!(created["checkIn"], "10/07/2024");
    assert_eq!(created["paymentStatus"], "DEPOSIT");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) =
        send(&app, Method::GET, &format!("/api/bookings/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/bookings/{id}"),
        Some(&token),
        Some(booking_body("10/07/2024", "12/07/2024", &["102", "105"])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["roomIds"], json!(["102", "105"]));

    let (status, free) = send(
        &app,
        Method::GET,
        "/api/availability?checkIn=10/07/2024&checkOut=12/07/2024",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let free_ids: Vec<&str> = free
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert!(free_ids.contains(&"101"));
    assert!(!free_ids.contains(&"105"));

    let (status, list) = send(&app, Method::GET, "/api/bookings", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, found) =
        send(&app, Method::GET, "/api/bookings?q=somchai", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
}

fn room_ids(rooms: &Value) -> Vec<&str> {
    rooms
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_availability_excludes_booking_named_by_member_record() {
    let app = app().await;
    let token = login(&app).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/bookings",
        Some(&token),
        Some(booking_body("10/07/2024", "12/07/2024", &["101", "102"])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "BK000001");

    // second record of the same booking
    let (status, member) =
        send(&app, Method::GET, "/api/bookings/BK000002", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(member["id"], "BK000001");

    for exclude in ["BK000001", "BK000002"] {
        let (status, free) = send(
            &app,
            Method::GET,
            &format!("/api/availability?checkIn=10/07/2024&checkOut=12/07/2024&excludeBookingId={exclude}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ids = room_ids(&free);
        assert!(ids.contains(&"101"), "{exclude}: {ids:?}");
        assert!(ids.contains(&"102"), "{exclude}: {ids:?}");
    }

    let (status, free) = send(
        &app,
        Method::GET,
        "/api/availability?checkIn=10/07/2024&checkOut=12/07/2024&excludeBookingId=BK999999",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids = room_ids(&free);
    assert!(!ids.contains(&"101"));
    assert!(!ids.contains(&"102"));
    assert!(ids.contains(&"103"));
}

#[tokio::test]
async fn test_booking_errors_map_to_status_codes() {
    let app = app().await;
    let token = login(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/bookings",
        Some(&token),
        Some(booking_body("01/06/2024", "03/06/2024", &["201"])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/bookings",
        Some(&token),
        Some(booking_body("02/06/2024", "04/06/2024", &["201"])),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 2002);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/bookings",
        Some(&token),
        Some(booking_body("04/06/2024", "02/06/2024", &["202"])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2004);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/bookings",
        Some(&token),
        Some(booking_body("01/06/2024", "02/06/2024", &[])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2003);

    let (status, body) =
        send(&app, Method::GET, "/api/bookings/BK999999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 2001);
}

#[tokio::test]
async fn test_cleaning_status_roundtrip() {
    let app = app().await;
    let token = login(&app).await;

    let (status, map) =
        send(&app, Method::GET, "/api/cleaning-status", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(map["101"], "CLEAN");

    let (status, map) = send(
        &app,
        Method::PUT,
        "/api/cleaning-status/101",
        Some(&token),
        Some(json!({ "status": "DIRTY" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(map["101"], "DIRTY");
    assert_eq!(map["102"], "CLEAN");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/cleaning-status/999",
        Some(&token),
        Some(json!({ "status": "DIRTY" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/cleaning-status/101",
        Some(&token),
        Some(json!({ "status": "MOPPING" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_receipt_and_bootstrap() {
    let app = app().await;
    let token = login(&app).await;

    let (_, a) = send(
        &app,
        Method::POST,
        "/api/bookings",
        Some(&token),
        Some(booking_body("10/07/2024", "13/07/2024", &["103"])),
    )
    .await;
    let (_, b) = send(
        &app,
        Method::POST,
        "/api/bookings",
        Some(&token),
        Some(booking_body("10/07/2024", "13/07/2024", &["105"])),
    )
    .await;

    let (status, receipt) = send(
        &app,
        Method::POST,
        "/api/receipts",
        Some(&token),
        Some(json!({ "bookingIds": [a["id"], b["id"]] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["receiptNo"], a["id"]);
    assert_eq!(receipt["lines"].as_array().unwrap().len(), 1);
    assert_eq!(receipt["lines"][0]["roomCount"], 2);
    assert_eq!(receipt["totalAmount"], 7200.0);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/receipts",
        Some(&token),
        Some(json!({ "bookingIds": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, snapshot) = send(&app, Method::GET, "/api/bootstrap", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["rooms"].as_array().unwrap().len(), 11);
    assert_eq!(snapshot["bookings"].as_array().unwrap().len(), 2);
    assert_eq!(snapshot["cleaningStatus"]["301"], "CLEAN");
}

#[tokio::test]
async fn test_overview_and_dashboard() {
    let app = app().await;
    let token = login(&app).await;
    send(
        &app,
        Method::POST,
        "/api/bookings",
        Some(&token),
        Some(booking_body("10/07/2024", "12/07/2024", &["101", "102"])),
    )
    .await;

    let (status, board) = send(
        &app,
        Method::GET,
        "/api/room-status?date=11/07/2024",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board.as_array().unwrap().len(), 11);

    let (status, calendar) = send(
        &app,
        Method::GET,
        "/api/availability/calendar?year=2024&month=7",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(calendar.as_array().unwrap().len(), 31);

    let (status, series) = send(
        &app,
        Method::GET,
        "/api/dashboard/occupancy?view=monthly",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(series.as_array().unwrap().len(), 12);

    let (status, popular) = send(
        &app,
        Method::GET,
        "/api/dashboard/popular-rooms?type=River%20view",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let first = &popular.as_array().unwrap()[0];
    assert_eq!(first["roomId"], "101");
}
