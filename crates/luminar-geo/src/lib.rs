//! Pure coordinate math for the street-light inventory.
//!
//! Two pieces live here: the bidirectional transform between WGS84
//! geographic coordinates and the fixed national transverse-Mercator grid,
//! and the degrees/decimal-minutes parser for human-entered coordinate
//! strings. Everything is stateless and reentrant.

mod dms;
mod transform;

pub use dms::{find_dms_pair, parse_dms};
pub use transform::{to_geographic, to_projected, GeoError};
