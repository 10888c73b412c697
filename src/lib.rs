// Booking engine for the Chambre à Anesle bed-and-breakfast: room and
// extras catalogs, the per-room blocked-date index, the two-click range
// selector, the quote calculator and the reservation lifecycle, all
// wired against an injected reservation store.

pub mod availability;
pub mod catalog;
pub mod dates;
pub mod pricing;
pub mod reservation;
pub mod selector;
pub mod store;

// Re-export key types for convenience
pub use availability::AvailabilityIndex;
pub use catalog::{CatalogError, Extra, ExtrasCatalog, Room, RoomCatalog, RoomUpdate};
pub use pricing::{format_eur, quote, quote_with_rate, Quote, TAX_RATE};
pub use reservation::{
    BookingError, BookingRequest, Contact, EngineConfig, Reservation, ReservationManager,
    ReservationStatus,
};
pub use selector::{DayStatus, RangeSelector, Selection};
pub use store::{InMemoryReservationStore, ReservationFilter, ReservationStore, StoreError};
