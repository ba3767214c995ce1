//! Solar Control domain core.
//!
//! Pure domain types and derivations with no I/O: the quote and plant
//! records, milestone status vocabulary, progress derivation, accent
//! insensitive search, date-range filtering, aggregate statistics and the
//! three dashboard views built from them.

pub mod error;
pub mod plant;
pub mod progress;
pub mod quote;
pub mod search;
pub mod stats;
pub mod status;
pub mod types;
pub mod views;
