//! Card instance identification.
//!
//! Every physical card in a game gets a `CardInstanceId` when its deck is
//! built. Two copies of the same catalog card share a `CardId` but never an
//! instance id, so zone bookkeeping (hand, deck, slot, graveyard) can track
//! each copy on its own.
//!
//! ## Usage
//!
//! ```
//! use arcana_ccg::core::{CardInstanceId, InstanceAllocator};
//!
//! let mut alloc = InstanceAllocator::default();
//! let a = alloc.next_id();
//! let b = alloc.next_id();
//!
//! assert_ne!(a, b);
//! assert_eq!(b.raw(), a.raw() + 1);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardInstanceId(pub u32);

impl CardInstanceId {
    /// Create an instance ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardInstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// Monotonic allocator for instance IDs.
///
/// Lives inside `GameState` so ids stay unique across every snapshot of the
/// same game. IDs start at 1; 0 is never handed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceAllocator {
    next: u32,
}

impl Default for InstanceAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl InstanceAllocator {
    /// Hand out the next unused id.
    pub fn next_id(&mut self) -> CardInstanceId {
        let id = CardInstanceId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids allocated so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_starts_at_one() {
        let mut alloc = InstanceAllocator::default();
        assert_eq!(alloc.next_id(), CardInstanceId(1));
        assert_eq!(alloc.next_id(), CardInstanceId(2));
        assert_eq!(alloc.allocated(), 2);
    }

    #[test]
    fn test_copied_allocator_diverges_independently() {
        let mut alloc = InstanceAllocator::default();
        alloc.next_id();

        let mut snapshot = alloc;
        assert_eq!(snapshot.next_id(), alloc.next_id());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardInstanceId(42)), "Instance(42)");
    }

    #[test]
    fn test_serialization() {
        let id = CardInstanceId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: CardInstanceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
