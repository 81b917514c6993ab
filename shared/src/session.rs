//! Front desk session state
//!
//! Holds what a signed-in desk works from: the current user, the room
//! directory, all bookings and the cleaning map. Loaded in one go on login,
//! cleared on logout.

use crate::client::{DeskSnapshot, UserInfo};
use crate::models::{
    CleaningStatus, CleaningStatusMap, LogicalBooking, Room, cmp_room_ids,
};

#[derive(Debug, Clone, Default)]
pub struct DeskSession {
    user: Option<UserInfo>,
    rooms: Vec<Room>,
    bookings: Vec<LogicalBooking>,
    cleaning: CleaningStatusMap,
}

impl DeskSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load user and data together
    pub fn sign_in(&mut self, user: UserInfo, snapshot: DeskSnapshot) {
        self.user = Some(user);
        self.load(snapshot);
    }

    /// Drop the user and every cached list
    pub fn sign_out(&mut self) {
        *self = Self::default();
    }

    /// Replace cached data with a fresh snapshot.
    ///
    /// A failed fetch leaves the cache untouched and hands the error back.
    pub fn refresh<E>(&mut self, fetched: Result<DeskSnapshot, E>) -> Result<(), E> {
        let snapshot = fetched?;
        if self.user.is_some() {
            self.load(snapshot);
        }
        Ok(())
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn total_rooms(&self) -> usize {
        self.rooms.len()
    }

    /// Bookings, newest first
    pub fn bookings(&self) -> &[LogicalBooking] {
        &self.bookings
    }

    pub fn cleaning_status(&self) -> &CleaningStatusMap {
        &self.cleaning
    }

    /// Insert a newly created booking
    pub fn add_booking(&mut self, booking: LogicalBooking) {
        self.bookings.push(booking);
        self.sort_bookings();
    }

    /// Replace the booking with the same id, or insert it when new
    pub fn apply_booking(&mut self, booking: LogicalBooking) {
        self.bookings.retain(|b| b.id != booking.id);
        self.add_booking(booking);
    }

    /// Swap in an updated booking.
    ///
    /// `previous_id` is the id the booking had before the edit; it changes
    /// when the room holding the smallest record id is removed.
    pub fn replace_booking(&mut self, previous_id: &str, booking: LogicalBooking) {
        self.bookings
            .retain(|b| b.id != previous_id && b.id != booking.id);
        self.add_booking(booking);
    }

    pub fn set_cleaning(&mut self, room_id: impl Into<String>, status: CleaningStatus) {
        self.cleaning.insert(room_id.into(), status);
    }

    fn load(&mut self, snapshot: DeskSnapshot) {
        self.rooms = snapshot.rooms;
        self.rooms.sort_by(|a, b| cmp_room_ids(&a.id, &b.id));
        self.bookings = snapshot.bookings;
        self.sort_bookings();
        self.cleaning = snapshot.cleaning_status;
    }

    fn sort_bookings(&mut self) {
        self.bookings
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BedType, PaymentStatus, RoomType};
    use chrono::{DateTime, NaiveDate};

    fn room(id: &str) -> Room {
        Room {
            id: id.into(),
            room_type: RoomType::StandardView,
            bed_type: BedType::Double,
            floor: 1,
        }
    }

    fn booking(id: &str, millis: i64, rooms: &[&str]) -> LogicalBooking {
        LogicalBooking {
            id: id.into(),
            timestamp: DateTime::from_timestamp_millis(millis).unwrap(),
            customer_name: "Guest".into(),
            phone: "000".into(),
            check_in: NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 7, 12).unwrap(),
            room_ids: rooms.iter().map(|r| r.to_string()).collect(),
            payment_status: PaymentStatus::Unpaid,
            deposit_amount: 0.0,
            price_per_night: 800.0,
            email: None,
            address: None,
            tax_id: None,
        }
    }

    fn user() -> UserInfo {
        UserInfo {
            id: 1,
            username: "frontdesk".into(),
            display_name: "Front Desk".into(),
        }
    }

    fn snapshot() -> DeskSnapshot {
        let mut cleaning = CleaningStatusMap::new();
        cleaning.insert("10".into(), CleaningStatus::Dirty);
        DeskSnapshot {
            rooms: vec![room("101"), room("10"), room("9")],
            bookings: vec![booking("BK000001", 1_000, &["101"]), booking("BK000002", 2_000, &["9"])],
            cleaning_status: cleaning,
        }
    }

    #[test]
    fn test_sign_in_loads_everything_sorted() {
        let mut session = DeskSession::new();
        assert!(!session.is_signed_in());

        session.sign_in(user(), snapshot());

        assert!(session.is_signed_in());
        assert_eq!(session.total_rooms(), 3);
        let ids: Vec<_> = session.rooms().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["9", "10", "101"]);
        assert_eq!(session.bookings()[0].id, "BK000002");
        assert_eq!(session.cleaning_status()["10"], CleaningStatus::Dirty);
    }

    #[test]
    fn test_sign_out_clears_everything() {
        let mut session = DeskSession::new();
        session.sign_in(user(), snapshot());
        session.sign_out();

        assert!(session.user().is_none());
        assert!(session.rooms().is_empty());
        assert!(session.bookings().is_empty());
        assert!(session.cleaning_status().is_empty());
    }

    #[test]
    fn test_failed_refresh_keeps_cache() {
        let mut session = DeskSession::new();
        session.sign_in(user(), snapshot());

        let result = session.refresh(Err::<DeskSnapshot, _>("connection refused"));

        assert_eq!(result, Err("connection refused"));
        assert_eq!(session.bookings().len(), 2);
        assert_eq!(session.total_rooms(), 3);
    }

    #[test]
    fn test_refresh_while_signed_out_is_ignored() {
        let mut session = DeskSession::new();
        session.refresh(Ok::<_, ()>(snapshot())).unwrap();
        assert!(session.rooms().is_empty());
    }

    #[test]
    fn test_replace_booking_with_new_representative_id() {
        let mut session = DeskSession::new();
        session.sign_in(user(), snapshot());
        session.add_booking(booking("BK000003", 3_000, &["10"]));
        assert_eq!(session.bookings()[0].id, "BK000003");

        session.replace_booking("BK000001", booking("BK000004", 1_500, &["10", "101"]));

        let ids: Vec<_> = session.bookings().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["BK000003", "BK000002", "BK000004"]);
    }

    #[test]
    fn test_apply_booking_replaces_in_place() {
        let mut session = DeskSession::new();
        session.sign_in(user(), snapshot());

        let mut edited = booking("BK000001", 1_000, &["101", "10"]);
        edited.customer_name = "Renamed".into();
        session.apply_booking(edited);
        session.apply_booking(booking("BK000005", 5_000, &["9"]));

        let ids: Vec<_> = session.bookings().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["BK000005", "BK000002", "BK000001"]);
        assert_eq!(session.bookings()[2].customer_name, "Renamed");
    }

    #[test]
    fn test_set_cleaning() {
        let mut session = DeskSession::new();
        session.sign_in(user(), snapshot());
        session.set_cleaning("10", CleaningStatus::Clean);
        assert_eq!(session.cleaning_status()["10"], CleaningStatus::Clean);
    }
}
