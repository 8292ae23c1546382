//! Order placement core

pub mod placement;

pub use placement::{place_order, PlacedOrder, PlacementError};
