//! Record -> LogicalBooking folding

use shared::codec::from_storage_payment_status;
use shared::models::{LogicalBooking, sort_room_ids};
use shared::util::millis_to_datetime;
use std::collections::BTreeMap;

use crate::db::repository::booking::BookingRow;

/// Fold joined booking rows into logical bookings, newest first.
///
/// Rows are grouped by `group_id`. The member with the smallest sequence
/// supplies the id and the stay fields; the timestamp is the earliest
/// `created_at` in the group.
pub fn group_rows(rows: Vec<BookingRow>) -> Vec<LogicalBooking> {
    let mut groups: BTreeMap<i64, Vec<BookingRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.group_id).or_default().push(row);
    }

    let mut bookings: Vec<LogicalBooking> = groups.into_values().filter_map(fold_group).collect();
    sort_newest_first(&mut bookings);
    bookings
}

/// Timestamp descending, ties by id descending
pub fn sort_newest_first(bookings: &mut [LogicalBooking]) {
    bookings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
}

fn fold_group(members: Vec<BookingRow>) -> Option<LogicalBooking> {
    let created_at = members.iter().map(|m| m.created_at).min()?;
    let mut room_ids: Vec<String> = members.iter().map(|m| m.room_id.clone()).collect();
    sort_room_ids(&mut room_ids);
    let head = members.into_iter().min_by_key(|m| m.seq)?;

    Some(LogicalBooking {
        id: head.id,
        timestamp: millis_to_datetime(created_at),
        customer_name: head.customer_name,
        phone: head.phone,
        check_in: head.check_in,
        check_out: head.check_out,
        room_ids,
        payment_status: from_storage_payment_status(&head.status),
        deposit_amount: head.deposit,
        price_per_night: head.price_per_night,
        email: head.email,
        address: head.address,
        tax_id: head.tax_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::PaymentStatus;

    fn row(seq: i64, group_id: i64, room_id: &str, created_at: i64) -> BookingRow {
        BookingRow {
            id: format!("BK{seq:06}"),
            seq,
            group_id,
            customer_id: 1,
            room_id: room_id.into(),
            check_in: NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 7, 12).unwrap(),
            status: "Deposit".into(),
            price_per_night: 800.0,
            deposit: 300.0,
            created_at,
            customer_name: "Pim".into(),
            phone: "02".into(),
            email: None,
            address: None,
            tax_id: None,
        }
    }

    #[test]
    fn test_group_rows() {
        let rows = vec![
            row(4, 1, "105", 5_000),
            row(1, 1, "101", 1_000),
            row(2, 1, "9", 1_000),
            row(3, 2, "201", 2_000),
        ];
        let bookings = group_rows(rows);

        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].id, "BK000003");
        let first = &bookings[1];
        assert_eq!(first.id, "BK000001");
        assert_eq!(first.timestamp.timestamp_millis(), 1_000);
        assert_eq!(first.room_ids, vec!["9", "101", "105"]);
        assert_eq!(first.payment_status, PaymentStatus::Deposit);
        assert_eq!(first.deposit_amount, 300.0);
    }

    #[test]
    fn test_timestamp_ties_break_on_id() {
        let bookings = group_rows(vec![row(1, 1, "101", 1_000), row(2, 2, "102", 1_000)]);
        let ids: Vec<_> = bookings.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["BK000002", "BK000001"]);
    }

    #[test]
    fn test_grouping_is_deterministic() {
        let rows = || vec![row(1, 1, "101", 1_000), row(2, 2, "102", 2_000), row(3, 1, "103", 1_000)];
        assert_eq!(group_rows(rows()), group_rows(rows()));
    }
}
