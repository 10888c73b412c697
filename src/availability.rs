// Availability index: a derived, read-only view mapping each room to the
// set of calendar dates already committed by existing reservations.
// Rebuilt from scratch whenever the reservation list changes; expected
// volumes are tens to low hundreds of records, so no incremental update
// is needed.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::dates::{days_inclusive, to_iso};
use crate::reservation::Reservation;

/// Per-room blocked-date sets, used purely for membership tests.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AvailabilityIndex {
    blocked: HashMap<String, HashSet<NaiveDate>>,
}

impl AvailabilityIndex {
    /// Index every reservation, keyed by room slug. Each reservation
    /// contributes its inclusive day span, endpoints included.
    pub fn build(reservations: &[Reservation]) -> Self {
        let mut blocked: HashMap<String, HashSet<NaiveDate>> = HashMap::new();
        for reservation in reservations {
            let days = days_inclusive(reservation.start_date, reservation.end_date);
            blocked
                .entry(reservation.room_slug.clone())
                .or_default()
                .extend(days);
        }
        debug!(rooms = blocked.len(), "rebuilt availability index");
        Self { blocked }
    }

    /// Index only the reservations of one room.
    pub fn build_for_room(reservations: &[Reservation], room_slug: &str) -> Self {
        let filtered: Vec<Reservation> = reservations
            .iter()
            .filter(|reservation| reservation.room_slug == room_slug)
            .cloned()
            .collect();
        Self::build(&filtered)
    }

    pub fn is_blocked(&self, room_slug: &str, date: NaiveDate) -> bool {
        self.blocked
            .get(room_slug)
            .is_some_and(|days| days.contains(&date))
    }

    pub fn blocked_for(&self, room_slug: &str) -> Option<&HashSet<NaiveDate>> {
        self.blocked.get(room_slug)
    }

    /// Blocked dates of a room as sorted ISO strings (`YYYY-MM-DD`), the
    /// form calendar-feed consumers parse.
    pub fn iso_dates(&self, room_slug: &str) -> BTreeSet<String> {
        self.blocked
            .get(room_slug)
            .map(|days| days.iter().copied().map(to_iso).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::tests::sample_reservation;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn stay_blocks_every_day_including_both_endpoints() {
        let reservations = vec![sample_reservation("eva", "2024-07-15", "2024-07-18")];
        let index = AvailabilityIndex::build(&reservations);

        for day in ["2024-07-15", "2024-07-16", "2024-07-17", "2024-07-18"] {
            assert!(index.is_blocked("eva", d(day)), "{day} should be blocked");
        }
        assert!(!index.is_blocked("eva", d("2024-07-14")));
        assert!(!index.is_blocked("eva", d("2024-07-19")));
    }

    #[test]
    fn rooms_are_indexed_independently() {
        let reservations = vec![
            sample_reservation("eva", "2024-07-15", "2024-07-18"),
            sample_reservation("sohan", "2024-07-16", "2024-07-17"),
        ];
        let index = AvailabilityIndex::build(&reservations);
        assert!(index.is_blocked("eva", d("2024-07-15")));
        assert!(!index.is_blocked("sohan", d("2024-07-15")));
        assert!(index.is_blocked("sohan", d("2024-07-16")));
        assert!(!index.is_blocked("eden", d("2024-07-16")));
    }

    #[test]
    fn room_filter_drops_other_rooms() {
        let reservations = vec![
            sample_reservation("eva", "2024-07-15", "2024-07-18"),
            sample_reservation("sohan", "2024-07-16", "2024-07-17"),
        ];
        let index = AvailabilityIndex::build_for_room(&reservations, "eva");
        assert!(index.is_blocked("eva", d("2024-07-16")));
        assert!(!index.is_blocked("sohan", d("2024-07-16")));
    }

    #[test]
    fn rebuild_is_idempotent_and_order_independent() {
        let mut reservations = vec![
            sample_reservation("eva", "2024-07-15", "2024-07-18"),
            sample_reservation("eva", "2024-08-01", "2024-08-03"),
        ];
        let first = AvailabilityIndex::build(&reservations);
        let second = AvailabilityIndex::build(&reservations);
        assert_eq!(first, second);

        reservations.reverse();
        let reversed = AvailabilityIndex::build(&reservations);
        assert_eq!(first, reversed);
    }

    #[test]
    fn every_generated_day_round_trips_through_membership() {
        let reservations = vec![sample_reservation("eva", "2024-02-27", "2024-03-02")];
        let index = AvailabilityIndex::build(&reservations);
        for day in crate::dates::days_inclusive(d("2024-02-27"), d("2024-03-02")) {
            assert!(index.is_blocked("eva", day));
        }
    }

    #[test]
    fn iso_export_is_sorted_and_parseable() {
        let reservations = vec![sample_reservation("eva", "2024-07-15", "2024-07-18")];
        let index = AvailabilityIndex::build(&reservations);
        let dates: Vec<String> = index.iso_dates("eva").into_iter().collect();
        assert_eq!(
            dates,
            vec!["2024-07-15", "2024-07-16", "2024-07-17", "2024-07-18"]
        );
        assert!(index.iso_dates("ghost").is_empty());
    }

    #[test]
    fn overlapping_reservations_merge_into_one_set() {
        let reservations = vec![
            sample_reservation("eva", "2024-07-15", "2024-07-17"),
            sample_reservation("eva", "2024-07-17", "2024-07-19"),
        ];
        let index = AvailabilityIndex::build(&reservations);
        assert_eq!(index.iso_dates("eva").len(), 5);
    }
}
