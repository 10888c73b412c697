// Reservation lifecycle: request validation and normalization, the
// pending → paid state machine, and the write path against the injected
// reservation store.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::info;

use crate::availability::AvailabilityIndex;
use crate::catalog::RoomCatalog;
use crate::dates::days_inclusive;
use crate::pricing::TAX_RATE;
use crate::store::{ReservationFilter, ReservationStore, StoreError};

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("invalid booking request: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("room {room} is already booked on {date}")]
    Unavailable { room: String, date: NaiveDate },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// pending → paid. Paid is terminal; there is no cancel or refund state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Persisted record of a confirmed booking. Immutable once written except
/// for the status transition; never physically deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub room_slug: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guests: u32,
    /// Extra labels snapshotted at booking time, not live references:
    /// later catalog edits never rewrite a historical reservation.
    pub extras: Vec<String>,
    pub contact: Contact,
    pub status: ReservationStatus,
    pub reservation_number: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

/// Incoming booking submission, as posted by the form. Required fields
/// are options so a missing value fails validation instead of
/// deserialization; `extras` accepts either a single value or a list
/// (the source sent both shapes) and is normalized to an ordered list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room_slug: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[serde(default, deserialize_with = "one_or_many")]
    pub extras: Vec<String>,
    #[serde(default)]
    pub contact: Contact,
}

fn default_guests() -> u32 {
    1
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub tax_rate: f64,
    /// Prefix of human-readable reservation numbers, `AN-YYMMDD-NN`.
    pub reservation_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tax_rate: TAX_RATE,
            reservation_prefix: "AN".to_string(),
        }
    }
}

/// Creates reservations from confirmed quotes and advances them through
/// the status lifecycle. Holds the store and room catalog by handle;
/// every operation either fully succeeds or leaves the store untouched.
pub struct ReservationManager<S: ReservationStore> {
    store: S,
    rooms: Arc<RoomCatalog>,
    config: EngineConfig,
}

impl<S: ReservationStore> ReservationManager<S> {
    pub fn new(store: S, rooms: Arc<RoomCatalog>) -> Self {
        Self::with_config(store, rooms, EngineConfig::default())
    }

    pub fn with_config(store: S, rooms: Arc<RoomCatalog>, config: EngineConfig) -> Self {
        Self {
            store,
            rooms,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate and persist a booking. Fails before any write on missing
    /// input, an unknown room, or a stay overlapping an existing
    /// reservation for the same room.
    pub async fn create_reservation(
        &self,
        request: BookingRequest,
    ) -> Result<Reservation, BookingError> {
        let room_slug = request
            .room_slug
            .filter(|slug| !slug.is_empty())
            .ok_or_else(|| BookingError::Validation("a room must be selected".into()))?;
        let start_date = request
            .start_date
            .ok_or_else(|| BookingError::Validation("an arrival date must be selected".into()))?;
        let end_date = request
            .end_date
            .ok_or_else(|| BookingError::Validation("a departure date must be selected".into()))?;
        if end_date < start_date {
            return Err(BookingError::Validation(
                "the departure date must not precede the arrival date".into(),
            ));
        }
        if request.guests < 1 {
            return Err(BookingError::Validation(
                "at least one guest is required".into(),
            ));
        }

        let room = self
            .rooms
            .get(&room_slug)
            .ok_or_else(|| BookingError::NotFound(format!("room {room_slug}")))?;

        let existing = self.store.list(&ReservationFilter::all()).await?;
        let index = AvailabilityIndex::build_for_room(&existing, &room_slug);
        for day in days_inclusive(start_date, end_date) {
            if index.is_blocked(&room_slug, day) {
                return Err(BookingError::Unavailable {
                    room: room_slug,
                    date: day,
                });
            }
        }

        let reservation = Reservation {
            id: format!("booking_{}", rand::random::<u32>()),
            room_slug: room.slug.clone(),
            start_date,
            end_date,
            guests: request.guests,
            extras: request.extras,
            contact: request.contact,
            status: ReservationStatus::Pending,
            reservation_number: self.next_reservation_number(start_date, &existing),
            created_at: Utc::now(),
            paid_at: None,
        };
        self.store.append(reservation.clone()).await?;
        info!(
            reservation = %reservation.reservation_number,
            room = %reservation.room_slug,
            nights_from = %reservation.start_date,
            nights_to = %reservation.end_date,
            "reservation created"
        );
        Ok(reservation)
    }

    /// Flip a reservation to paid. Idempotent: re-marking a paid
    /// reservation refreshes `paid_at` without error.
    pub async fn mark_paid(&self, id: &str) -> Result<Reservation, BookingError> {
        let updated = self
            .store
            .update_status(id, ReservationStatus::Paid, Utc::now())
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("reservation {id}")))?;
        info!(reservation = %updated.reservation_number, "reservation paid");
        Ok(updated)
    }

    /// Reservations matching the filter, earliest stay first.
    pub async fn list_reservations(
        &self,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>, BookingError> {
        let mut reservations = self.store.list(filter).await?;
        reservations.sort_by_key(|reservation| (reservation.start_date, reservation.created_at));
        Ok(reservations)
    }

    /// Price a prospective stay with this engine's configured tax rate.
    pub fn quote(
        &self,
        room: Option<&crate::catalog::Room>,
        selection: &crate::selector::Selection,
        guests: u32,
        extras: &[crate::catalog::Extra],
    ) -> Option<crate::pricing::Quote> {
        crate::pricing::quote_with_rate(room, selection, guests, extras, self.config.tax_rate)
    }

    /// Current blocked-date view, rebuilt from the store.
    pub async fn availability(&self) -> Result<AvailabilityIndex, BookingError> {
        let reservations = self.store.list(&ReservationFilter::all()).await?;
        Ok(AvailabilityIndex::build(&reservations))
    }

    /// `AN-YYMMDD-NN`: start date plus a two-digit suffix, retried until
    /// unique among stored reservations. If every two-digit suffix for
    /// that date is taken the suffix widens past 99.
    fn next_reservation_number(&self, start_date: NaiveDate, existing: &[Reservation]) -> String {
        let date_part = start_date.format("%y%m%d").to_string();
        let taken: HashSet<&str> = existing
            .iter()
            .map(|reservation| reservation.reservation_number.as_str())
            .collect();

        for _ in 0..100 {
            let candidate = format!(
                "{}-{}-{:02}",
                self.config.reservation_prefix,
                date_part,
                rand::random::<u32>() % 100
            );
            if !taken.contains(candidate.as_str()) {
                return candidate;
            }
        }
        let mut suffix = 100u32;
        loop {
            let candidate = format!("{}-{}-{}", self.config.reservation_prefix, date_part, suffix);
            if !taken.contains(candidate.as_str()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}
