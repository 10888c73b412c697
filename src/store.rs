// Reservation store contract. The engine never touches persistence
// directly: it is handed a store implementing this narrow trait at
// construction time (no ambient globals). Any backend works — SQLite
// behind an HTTP API, a browser key-value store, or the in-memory log
// below — as long as the three operations keep their semantics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use thiserror::Error;

use crate::reservation::{Reservation, ReservationStatus};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store backend failed: {0}")]
    Backend(String),
}

/// Read-path filter: admins list everything, guests only the
/// reservations matching their contact email, room pages one room.
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub room_slug: Option<String>,
    pub contact_email: Option<String>,
}

impl ReservationFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_room(room_slug: &str) -> Self {
        Self {
            room_slug: Some(room_slug.to_string()),
            ..Self::default()
        }
    }

    pub fn for_email(email: &str) -> Self {
        Self {
            contact_email: Some(email.to_string()),
            ..Self::default()
        }
    }

    fn matches(&self, reservation: &Reservation) -> bool {
        if let Some(slug) = &self.room_slug {
            if reservation.room_slug != *slug {
                return false;
            }
        }
        if let Some(email) = &self.contact_email {
            if !reservation.contact.email.eq_ignore_ascii_case(email) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
pub trait ReservationStore: Send + Sync + 'static {
    /// All reservations matching the filter, in append order.
    async fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>, StoreError>;

    /// Append a new reservation record.
    async fn append(&self, reservation: Reservation) -> Result<(), StoreError>;

    /// Update one reservation's status in place. Returns the updated
    /// record, or `None` when the id is unknown. Marking `paid` stamps
    /// `paid_at` with the supplied timestamp.
    async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<Reservation>, StoreError>;
}

/// Append-ordered in-memory log behind a single lock. Matches the
/// engine's single-writer discipline: one narrow in-place status update,
/// everything else append or read.
#[derive(Default)]
pub struct InMemoryReservationStore {
    reservations: RwLock<Vec<Reservation>>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reservations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.read().is_empty()
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>, StoreError> {
        Ok(self
            .reservations
            .read()
            .iter()
            .filter(|reservation| filter.matches(reservation))
            .cloned()
            .collect())
    }

    async fn append(&self, reservation: Reservation) -> Result<(), StoreError> {
        self.reservations.write().push(reservation);
        Ok(())
    }

    async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<Reservation>, StoreError> {
        let mut reservations = self.reservations.write();
        let Some(reservation) = reservations.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        reservation.status = status;
        if status == ReservationStatus::Paid {
            reservation.paid_at = Some(timestamp);
        }
        Ok(Some(reservation.clone()))
    }
}
