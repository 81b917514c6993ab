use chrono::NaiveDate;
use desk_server::bookings::availability::{available_rooms, is_fully_booked};
use desk_server::bookings::receipt::build_receipt;
use desk_server::db::DbService;
use desk_server::db::repository::room;
use desk_server::{BookingError, BookingManager};
use shared::models::{BedType, BookingInput, Room, RoomType};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rooms() -> Vec<Room> {
    [
        ("101", RoomType::RiverView, BedType::Double),
        ("102", RoomType::RiverView, BedType::Twin),
        ("103", RoomType::StandardView, BedType::Double),
        ("105", RoomType::StandardView, BedType::Double),
    ]
    .into_iter()
    .map(|(id, room_type, bed_type)| Room {
        id: id.into(),
        room_type,
        bed_type,
        floor: 1,
    })
    .collect()
}

async fn setup() -> (DbService, BookingManager) {
    let db = DbService::in_memory().await.unwrap();
    for r in rooms() {
        room::insert(&db.pool, &r).await.unwrap();
    }
    let manager = BookingManager::new(db.pool.clone(), 800.0);
    (db, manager)
}

fn input(name: &str, check_in: &str, check_out: &str, room_ids: &[&str]) -> BookingInput {
    BookingInput {
        customer_name: name.into(),
        phone: "0812345678".into(),
        check_in: check_in.into(),
        check_out: check_out.into(),
        room_ids: room_ids.iter().map(|r| r.to_string()).collect(),
        price_per_night: Some(1000.0),
        ..Default::default()
    }
}

async fn record_count(db: &DbService) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM booking")
        .fetch_one(&db.pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_then_list_surfaces_booking_once() {
    let (_db, manager) = setup().await;

    let created = manager
        .create(input("Somchai", "10/07/2024", "12/07/2024", &["105", "101", "102"]))
        .await
        .unwrap();

    let all = manager.list_all().await.unwrap();
    let matching: Vec<_> = all.iter().filter(|b| b.id == created.id).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].room_ids, vec!["101", "102", "105"]);
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_list_all_is_idempotent() {
    let (_db, manager) = setup().await;
    manager
        .create(input("A", "01/06/2024", "03/06/2024", &["101"]))
        .await
        .unwrap();
    manager
        .create(input("B", "03/06/2024", "05/06/2024", &["101", "103"]))
        .await
        .unwrap();

    let first = manager.list_all().await.unwrap();
    let second = manager.list_all().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    // newest first
    assert_eq!(first[0].customer_name, "B");
}

#[tokio::test]
async fn test_update_swaps_rooms_and_frees_removed_room() {
    let (db, manager) = setup().await;
    let created = manager
        .create(input("Somchai", "10/07/2024", "12/07/2024", &["101", "102"]))
        .await
        .unwrap();

    let updated = manager
        .update(
            &created.id,
            input("Somchai", "10/07/2024", "12/07/2024", &["102", "105"]),
        )
        .await
        .unwrap();
    assert_eq!(updated.room_ids, vec!["102", "105"]);
    assert_eq!(updated.check_in, ymd(2024, 7, 10));
    assert_eq!(updated.check_out, ymd(2024, 7, 12));
    assert_eq!(record_count(&db).await, 2);

    let bookings = manager.list_all().await.unwrap();
    assert_eq!(bookings.len(), 1);
    let free = available_rooms(ymd(2024, 7, 10), ymd(2024, 7, 12), &rooms(), &bookings, None);
    let free_ids: Vec<_> = free.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(free_ids, vec!["101", "103"]);
}

#[tokio::test]
async fn test_fully_booked_day_has_no_availability() {
    let (_db, manager) = setup().await;
    manager
        .create(input("Group", "01/08/2024", "04/08/2024", &["101", "102", "103", "105"]))
        .await
        .unwrap();

    let bookings = manager.list_all().await.unwrap();
    assert!(is_fully_booked(ymd(2024, 8, 2), rooms().len(), &bookings));
    assert!(available_rooms(ymd(2024, 8, 2), ymd(2024, 8, 3), &rooms(), &bookings, None).is_empty());

    // the check-out day is free again
    assert!(!is_fully_booked(ymd(2024, 8, 4), rooms().len(), &bookings));
}

#[tokio::test]
async fn test_conflicting_create_is_rejected_without_writes() {
    let (db, manager) = setup().await;
    manager
        .create(input("First", "01/06/2024", "03/06/2024", &["101"]))
        .await
        .unwrap();

    let err = manager
        .create(input("Second", "02/06/2024", "04/06/2024", &["103", "101"]))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Conflict(ref rooms) if rooms == &["101".to_string()]));
    assert_eq!(record_count(&db).await, 1);

    // back-to-back is fine
    manager
        .create(input("Second", "03/06/2024", "05/06/2024", &["101"]))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_receipt_combines_matching_bookings() {
    let (_db, manager) = setup().await;
    let a = manager
        .create(input("Somchai", "10/07/2024", "13/07/2024", &["103"]))
        .await
        .unwrap();
    let b = manager
        .create(input("Somchai", "10/07/2024", "13/07/2024", &["105"]))
        .await
        .unwrap();

    let receipt = build_receipt(&[a.clone(), b], &rooms(), ymd(2024, 7, 13)).unwrap();
    assert_eq!(receipt.receipt_no, a.id);
    assert_eq!(receipt.lines.len(), 1);
    let line = &receipt.lines[0];
    assert_eq!(line.description, "Standard Double Room");
    assert_eq!(line.room_count, 2);
    assert_eq!(line.nights, 3);
    assert_eq!(line.total, 2.0 * 3.0 * 1000.0);
    assert_eq!(receipt.total_amount, 6000.0);
}

#[tokio::test]
async fn test_failed_insert_mid_create_leaves_no_records() {
    let (db, manager) = setup().await;
    sqlx::query(
        "CREATE TRIGGER fail_on_102 BEFORE INSERT ON booking \
         WHEN NEW.room_id = '102' BEGIN SELECT RAISE(ABORT, 'disk full'); END",
    )
    .execute(&db.pool)
    .await
    .unwrap();

    let err = manager
        .create(input("Somchai", "10/07/2024", "12/07/2024", &["101", "102", "103"]))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Storage(_)));

    assert_eq!(record_count(&db).await, 0);
    assert!(manager.list_all().await.unwrap().is_empty());
    let customers = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customer")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(customers, 0);
}

#[tokio::test]
async fn test_failed_update_keeps_previous_state() {
    let (db, manager) = setup().await;
    let created = manager
        .create(input("Somchai", "10/07/2024", "12/07/2024", &["101", "103"]))
        .await
        .unwrap();
    sqlx::query(
        "CREATE TRIGGER fail_on_105 BEFORE INSERT ON booking \
         WHEN NEW.room_id = '105' BEGIN SELECT RAISE(ABORT, 'disk full'); END",
    )
    .execute(&db.pool)
    .await
    .unwrap();

    let err = manager
        .update(
            &created.id,
            input("Renamed", "11/07/2024", "14/07/2024", &["103", "105"]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Storage(_)));

    let after = manager.get(&created.id).await.unwrap();
    assert_eq!(after, created);
}

#[tokio::test]
async fn test_unknown_booking_is_not_found() {
    let (_db, manager) = setup().await;
    let err = manager
        .update("BK999999", input("X", "01/06/2024", "02/06/2024", &["101"]))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));
    assert!(matches!(
        manager.get("BK999999").await.unwrap_err(),
        BookingError::NotFound(_)
    ));
}
