//! Battlefield: fixed slot arrays, one per side.
//!
//! ## Key Types
//!
//! - `Battlefield`: slot occupancy, placement, removal, and attack-target
//!   queries (including the taunt restriction)

pub mod manager;

pub use manager::Battlefield;
