//! Receipt Aggregator
//!
//! Folds selected bookings into billable lines. Pure and deterministic:
//! no storage access, no side effects.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{
    BedType, LogicalBooking, Receipt, ReceiptCustomer, ReceiptLine, Room, RoomType,
};

use super::{BookingError, BookingResult};
use crate::utils::money::{line_total, to_decimal, to_f64};

/// Description printed on the receipt for a room
pub fn describe_room(room: &Room) -> &'static str {
    match (room.room_type, room.bed_type) {
        (RoomType::RiverView, _) => "River Sunrise Room",
        (RoomType::StandardView, BedType::Twin) => "Standard Twin Room",
        (RoomType::StandardView, BedType::Double) => "Standard Double Room",
        (RoomType::Cottage, _) => "Cottage Room",
    }
}

struct LineAcc {
    description: &'static str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    price: Decimal,
    unit_price: f64,
    room_count: u32,
    nights: i64,
}

/// Group `selected` into receipt lines.
///
/// Lines keep the order in which their first room appears; rooms missing
/// from `rooms` are skipped. The first booking supplies the receipt number
/// and the bill-to block.
pub fn build_receipt(
    selected: &[LogicalBooking],
    rooms: &[Room],
    issued_on: NaiveDate,
) -> BookingResult<Receipt> {
    let first = selected
        .first()
        .ok_or_else(|| BookingError::Validation("Select at least one booking".to_string()))?;

    let mut acc: Vec<LineAcc> = Vec::new();
    for booking in selected {
        let nights = booking.nights();
        let price = to_decimal(booking.price_per_night);

        for room_id in &booking.room_ids {
            let Some(room) = rooms.iter().find(|r| &r.id == room_id) else {
                tracing::warn!(room_id = %room_id, booking_id = %booking.id, "Room missing from directory, left off receipt");
                continue;
            };
            let description = describe_room(room);

            match acc.iter_mut().find(|l| {
                l.description == description
                    && l.check_in == booking.check_in
                    && l.check_out == booking.check_out
                    && l.price == price
            }) {
                Some(line) => line.room_count += 1,
                None => acc.push(LineAcc {
                    description,
                    check_in: booking.check_in,
                    check_out: booking.check_out,
                    price,
                    unit_price: booking.price_per_night,
                    room_count: 1,
                    nights,
                }),
            }
        }
    }

    let mut total_amount = Decimal::ZERO;
    let lines = acc
        .into_iter()
        .map(|l| {
            let total = line_total(l.room_count, l.nights, l.unit_price);
            total_amount += total;
            ReceiptLine {
                description: l.description.to_string(),
                check_in: l.check_in,
                check_out: l.check_out,
                room_count: l.room_count,
                nights: l.nights,
                unit_price: to_f64(l.price),
                total: to_f64(total),
            }
        })
        .collect();

    Ok(Receipt {
        receipt_no: first.id.clone(),
        issued_on,
        customer: ReceiptCustomer {
            name: first.customer_name.clone(),
            phone: first.phone.clone(),
            email: first.email.clone(),
            address: first.address.clone(),
            tax_id: first.tax_id.clone(),
        },
        lines,
        total_amount: to_f64(total_amount),
    })
}
