//! Occupancy views: day overview, room status board and dashboard figures

use chrono::{Datelike, Duration, NaiveDate};
use shared::codec::format_display_date;
use shared::models::{
    DayOverview, LogicalBooking, OccupancyPoint, OccupancyView, PopularRoom, Room, RoomSort,
    RoomStatusEntry, RoomStatusFlag, RoomType, cmp_room_ids,
};
use std::cmp::Ordering;
use std::collections::HashMap;

use super::availability::booked_room_count;
use crate::utils::time::{days_in_month, days_in_year, first_of_month_back};

const DAILY_POINTS: i64 = 30;
const MONTHLY_POINTS: u32 = 12;
const YEARLY_POINTS: i32 = 5;
const POPULAR_ROOMS_LIMIT: usize = 10;

/// Arrivals, departures and in-house guests on `date`
pub fn day_overview(date: NaiveDate, bookings: &[LogicalBooking]) -> DayOverview {
    DayOverview {
        date,
        check_ins: select(bookings, |b| b.check_in == date),
        check_outs: select(bookings, |b| b.check_out == date),
        in_house: select(bookings, |b| b.is_staying_on(date)),
    }
}

fn select(
    bookings: &[LogicalBooking],
    keep: impl Fn(&LogicalBooking) -> bool,
) -> Vec<LogicalBooking> {
    bookings.iter().filter(|b| keep(b)).cloned().collect()
}

/// Status of every room on `date`
pub fn room_status_board(
    date: NaiveDate,
    rooms: &[Room],
    bookings: &[LogicalBooking],
    sort: RoomSort,
) -> Vec<RoomStatusEntry> {
    let mut board: Vec<RoomStatusEntry> = rooms
        .iter()
        .map(|room| {
            let mut relevant: Vec<LogicalBooking> = Vec::new();
            for b in bookings {
                let counts = b.is_staying_on(date) || b.check_out == date;
                if counts && b.has_room(&room.id) && !relevant.iter().any(|r| r.id == b.id) {
                    relevant.push(b.clone());
                }
            }
            RoomStatusEntry {
                room: room.clone(),
                flags: status_flags(date, &relevant),
                bookings: relevant,
            }
        })
        .collect();

    board.sort_by(|a, b| compare_rooms(&a.room, &b.room, sort));
    board
}

fn status_flags(date: NaiveDate, relevant: &[LogicalBooking]) -> Vec<RoomStatusFlag> {
    if relevant.is_empty() {
        return vec![RoomStatusFlag::Vacant];
    }

    let mut flags = Vec::new();
    if relevant.iter().any(|b| b.check_in == date) {
        flags.push(RoomStatusFlag::CheckIn);
    }
    if relevant.iter().any(|b| b.check_out == date) {
        flags.push(RoomStatusFlag::CheckOut);
    }
    if relevant
        .iter()
        .any(|b| b.check_in < date && date < b.check_out)
    {
        flags.push(RoomStatusFlag::Occupied);
    }
    flags
}

fn compare_rooms(a: &Room, b: &Room, sort: RoomSort) -> Ordering {
    let primary = match sort {
        RoomSort::Id => Ordering::Equal,
        RoomSort::Type => a.room_type.label().cmp(b.room_type.label()),
        RoomSort::Bed => a.bed_type.label().cmp(b.bed_type.label()),
    };
    primary.then_with(|| cmp_room_ids(&a.id, &b.id))
}

/// Occupancy chart points ending at `today`, oldest first
pub fn occupancy_series(
    view: OccupancyView,
    today: NaiveDate,
    bookings: &[LogicalBooking],
) -> Vec<OccupancyPoint> {
    match view {
        OccupancyView::Daily => (0..DAILY_POINTS)
            .rev()
            .map(|back| today - Duration::days(back))
            .map(|day| OccupancyPoint {
                label: format_display_date(day),
                occupancy: booked_room_count(day, bookings) as f64,
            })
            .collect(),
        OccupancyView::Monthly => (0..MONTHLY_POINTS)
            .rev()
            .filter_map(|back| first_of_month_back(today, back))
            .map(|first| monthly_point(first, bookings))
            .collect(),
        OccupancyView::Yearly => (0..YEARLY_POINTS)
            .rev()
            .map(|back| yearly_point(today.year() - back, bookings))
            .collect(),
    }
}

/// Average occupied rooms per day across the month
fn monthly_point(first: NaiveDate, bookings: &[LogicalBooking]) -> OccupancyPoint {
    let days = days_in_month(first.year(), first.month());
    let room_days: u64 = first
        .iter_days()
        .take(days as usize)
        .map(|day| u64::from(booked_room_count(day, bookings)))
        .sum();

    OccupancyPoint {
        label: first.format("%m/%Y").to_string(),
        occupancy: if days == 0 {
            0.0
        } else {
            room_days as f64 / f64::from(days)
        },
    }
}

/// Room-nights inside the year divided by the days of the year
fn yearly_point(year: i32, bookings: &[LogicalBooking]) -> OccupancyPoint {
    let bounds = NaiveDate::from_ymd_opt(year, 1, 1).zip(NaiveDate::from_ymd_opt(year + 1, 1, 1));
    let room_nights: i64 = match bounds {
        Some((start, end)) => bookings
            .iter()
            .map(|b| {
                let from = b.check_in.max(start);
                let to = b.check_out.min(end);
                if from < to {
                    (to - from).num_days() * b.room_ids.len() as i64
                } else {
                    0
                }
            })
            .sum(),
        None => 0,
    };

    OccupancyPoint {
        label: year.to_string(),
        occupancy: room_nights as f64 / f64::from(days_in_year(year)),
    }
}

/// Most booked rooms, optionally limited to one room type
pub fn popular_rooms(
    rooms: &[Room],
    bookings: &[LogicalBooking],
    room_type: Option<RoomType>,
) -> Vec<PopularRoom> {
    let eligible: HashMap<&str, &Room> = rooms
        .iter()
        .filter(|r| room_type.is_none_or(|t| r.room_type == t))
        .map(|r| (r.id.as_str(), r))
        .collect();

    let mut counts: HashMap<&str, u32> = HashMap::new();
    for b in bookings {
        for room_id in &b.room_ids {
            if eligible.contains_key(room_id.as_str()) {
                *counts.entry(room_id.as_str()).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<PopularRoom> = counts
        .into_iter()
        .map(|(room_id, bookings)| PopularRoom {
            room_id: room_id.to_string(),
            bookings,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.bookings
            .cmp(&a.bookings)
            .then_with(|| cmp_room_ids(&a.room_id, &b.room_id))
    });
    ranked.truncate(POPULAR_ROOMS_LIMIT);
    ranked
}
