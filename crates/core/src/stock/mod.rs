//! Stock movements as seen by consignment reporting.
//!
//! Movements are owned by the stock module. Reports only hold immutable
//! snapshots of them, since report totals depend on their prices.

mod movement;

pub use movement::StockMovement;
