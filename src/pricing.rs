// Pricing engine: a pure function from (room, date range, guest count,
// selected extras) to an itemized quote. Recomputed on every input
// change, never stored.

use serde::Serialize;

use crate::catalog::{Extra, Room};
use crate::dates::nights_between;
use crate::selector::Selection;

/// Flat tax applied to room charges only; extras are untaxed.
pub const TAX_RATE: f64 = 0.05;

/// Transient price breakdown. Amounts keep full `f64` precision;
/// rounding to cents happens only at display time so the three summands
/// never accumulate rounding error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub nights: i64,
    pub base_amount: f64,
    pub extras_amount: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
}

/// Price a stay, or `None` while the inputs are incomplete (no room yet,
/// or the range still missing an endpoint) — an expected UI state, not an
/// error.
pub fn quote(
    room: Option<&Room>,
    selection: &Selection,
    guests: u32,
    extras: &[Extra],
) -> Option<Quote> {
    quote_with_rate(room, selection, guests, extras, TAX_RATE)
}

pub fn quote_with_rate(
    room: Option<&Room>,
    selection: &Selection,
    guests: u32,
    extras: &[Extra],
    tax_rate: f64,
) -> Option<Quote> {
    let room = room?;
    let (start, end) = match selection {
        Selection::Complete(start, end) => (*start, *end),
        _ => return None,
    };

    let nights = nights_between(start, end);
    let base_amount = nights as f64 * room.nightly_rate;
    // extras are charged per guest, not per stay
    let extras_amount = guests as f64 * extras.iter().map(|extra| extra.price).sum::<f64>();
    let tax_amount = base_amount * tax_rate;

    Some(Quote {
        nights,
        base_amount,
        extras_amount,
        tax_amount,
        total_amount: base_amount + extras_amount + tax_amount,
    })
}

/// Currency rendering used by the site: two decimals, euro sign suffix.
pub fn format_eur(amount: f64) -> String {
    format!("{amount:.2}€")
}
