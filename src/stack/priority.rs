//! Priority-ordered effect stack.
//!
//! Items resolve highest `(depth, priority, seq)` first:
//!
//! - `depth`: items pushed while another item resolves sit one level deeper,
//!   so nested pushes drain before anything queued earlier
//! - `priority`: counters (2000) beat spells (1000)
//! - `seq`: ties go to the most recent push (LIFO)
//!
//! While a response window is open the stack also tracks who holds priority
//! and how many players have passed in a row.

use serde::{Deserialize, Serialize};

use crate::core::entity::CardInstanceId;
use crate::core::player::{PlayerId, PLAYER_COUNT};
use crate::effects::{EffectKind, EffectTarget};

/// Unique identifier for a stack item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StackItemId(pub u32);

impl StackItemId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StackItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StackItem({})", self.0)
    }
}

/// Caller-supplied properties of a pushed effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackMetadata {
    pub priority: i32,
    pub source_player: PlayerId,
    pub source_card: Option<CardInstanceId>,
    pub can_be_countered: bool,
}

/// A pending effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackItem {
    pub id: StackItemId,
    pub effect: EffectKind,
    pub target: EffectTarget,
    pub priority: i32,
    pub source_player: PlayerId,
    pub source_card: Option<CardInstanceId>,
    pub can_be_countered: bool,
    pub depth: u32,
    pub seq: u64,
}

impl StackItem {
    fn resolution_key(&self) -> (u32, i32, u64) {
        (self.depth, self.priority, self.seq)
    }
}

/// Result of a priority pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// The other player now holds priority.
    Waiting(PlayerId),
    /// Every player passed in a row; the stack should resolve.
    AllPassed,
}

/// The effect stack stored in each game snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectStack {
    items: Vec<StackItem>,
    next_id: u32,
    next_seq: u64,
    /// Depth given to new pushes; raised while an item resolves.
    push_depth: u32,
    /// Set while a response window is open.
    priority: Option<PlayerId>,
    consecutive_passes: usize,
}

impl EffectStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in push order (bottom to top).
    #[must_use]
    pub fn items(&self) -> &[StackItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: StackItemId) -> Option<&StackItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The item that would resolve next.
    #[must_use]
    pub fn peek_next(&self) -> Option<&StackItem> {
        self.items.iter().max_by_key(|item| item.resolution_key())
    }

    /// Items in the order they would resolve if nothing else were pushed.
    #[must_use]
    pub fn resolution_order(&self) -> Vec<&StackItem> {
        let mut ordered: Vec<&StackItem> = self.items.iter().collect();
        ordered.sort_by(|a, b| b.resolution_key().cmp(&a.resolution_key()));
        ordered
    }

    /// Push an effect. Returns the new item's id.
    pub fn add_to_stack(&mut self, effect: EffectKind, target: EffectTarget, meta: StackMetadata) -> StackItemId {
        let id = StackItemId::new(self.next_id);
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;

        tracing::debug!(
            item = %id,
            effect = effect.name(),
            priority = meta.priority,
            player = %meta.source_player,
            depth = self.push_depth,
            "effect pushed"
        );

        self.items.push(StackItem {
            id,
            effect,
            target,
            priority: meta.priority,
            source_player: meta.source_player,
            source_card: meta.source_card,
            can_be_countered: meta.can_be_countered,
            depth: self.push_depth,
            seq,
        });
        id
    }

    /// Remove the next item to resolve.
    pub fn pop_next(&mut self) -> Option<StackItem> {
        let (index, _) = self
            .items
            .iter()
            .enumerate()
            .max_by_key(|(_, item)| item.resolution_key())?;
        Some(self.items.remove(index))
    }

    /// Remove `id` without resolving it.
    ///
    /// Fails silently (returns `false`) when the item is gone or cannot be
    /// countered.
    pub fn counter_effect(&mut self, id: StackItemId, by: PlayerId) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) if self.items[index].can_be_countered => {
                let item = self.items.remove(index);
                tracing::debug!(item = %id, effect = item.effect.name(), by = %by, "effect countered");
                true
            }
            _ => false,
        }
    }

    /// The player who may respond, while a response window is open.
    #[must_use]
    pub fn priority_holder(&self) -> Option<PlayerId> {
        self.priority
    }

    #[must_use]
    pub fn is_window_open(&self) -> bool {
        self.priority.is_some()
    }

    /// Open (or reopen) the window after `actor` pushed something; the other
    /// player gets priority and the pass count restarts.
    pub fn open_window(&mut self, actor: PlayerId) {
        self.priority = Some(actor.opponent());
        self.consecutive_passes = 0;
    }

    /// Record a pass by the priority holder.
    pub fn pass_priority(&mut self, player: PlayerId) -> PassOutcome {
        self.consecutive_passes += 1;
        if self.consecutive_passes >= PLAYER_COUNT {
            PassOutcome::AllPassed
        } else {
            let next = player.opponent();
            self.priority = Some(next);
            PassOutcome::Waiting(next)
        }
    }

    pub fn close_window(&mut self) {
        self.priority = None;
        self.consecutive_passes = 0;
    }

    pub(crate) fn set_push_depth(&mut self, depth: u32) {
        self.push_depth = depth;
    }

    /// Drop every pending item and close the window.
    pub fn clear(&mut self) {
        self.items.clear();
        self.push_depth = 0;
        self.close_window();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{COUNTER_PRIORITY, SPELL_PRIORITY};

    fn meta(priority: i32, countered: bool) -> StackMetadata {
        StackMetadata {
            priority,
            source_player: PlayerId::ONE,
            source_card: None,
            can_be_countered: countered,
        }
    }

    fn damage(n: i32) -> EffectKind {
        EffectKind::Damage { amount: n }
    }

    #[test]
    fn test_stack_item_id() {
        let id = StackItemId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(format!("{}", id), "StackItem(5)");
    }

    #[test]
    fn test_new_stack_is_empty() {
        let stack = EffectStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.priority_holder(), None);
        assert!(stack.peek_next().is_none());
    }

    #[test]
    fn test_higher_priority_first() {
        let mut stack = EffectStack::new();
        stack.add_to_stack(damage(1), EffectTarget::None, meta(SPELL_PRIORITY, true));
        let counter = stack.add_to_stack(EffectKind::Counter, EffectTarget::None, meta(COUNTER_PRIORITY, false));
        stack.add_to_stack(damage(2), EffectTarget::None, meta(SPELL_PRIORITY, true));

        assert_eq!(stack.pop_next().unwrap().id, counter);
    }

    #[test]
    fn test_ties_resolve_lifo() {
        let mut stack = EffectStack::new();
        let first = stack.add_to_stack(damage(1), EffectTarget::None, meta(SPELL_PRIORITY, true));
        let second = stack.add_to_stack(damage(2), EffectTarget::None, meta(SPELL_PRIORITY, true));

        let order: Vec<_> = stack.resolution_order().iter().map(|i| i.id).collect();
        assert_eq!(order, vec![second, first]);
        assert_eq!(stack.pop_next().unwrap().id, second);
        assert_eq!(stack.pop_next().unwrap().id, first);
        assert!(stack.pop_next().is_none());
    }

    #[test]
    fn test_nested_pushes_drain_first() {
        let mut stack = EffectStack::new();
        stack.add_to_stack(EffectKind::Counter, EffectTarget::None, meta(COUNTER_PRIORITY, false));

        stack.set_push_depth(1);
        let nested = stack.add_to_stack(damage(1), EffectTarget::None, meta(SPELL_PRIORITY, true));
        stack.set_push_depth(0);

        assert_eq!(stack.peek_next().unwrap().id, nested);
    }

    #[test]
    fn test_counter_effect() {
        let mut stack = EffectStack::new();
        let spell = stack.add_to_stack(damage(3), EffectTarget::None, meta(SPELL_PRIORITY, true));
        let locked = stack.add_to_stack(damage(3), EffectTarget::None, meta(SPELL_PRIORITY, false));

        assert!(stack.counter_effect(spell, PlayerId::TWO));
        assert!(!stack.counter_effect(spell, PlayerId::TWO));
        assert!(!stack.counter_effect(locked, PlayerId::TWO));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_pass_priority_two_player() {
        let mut stack = EffectStack::new();
        stack.add_to_stack(damage(3), EffectTarget::None, meta(SPELL_PRIORITY, true));
        stack.open_window(PlayerId::ONE);

        assert_eq!(stack.priority_holder(), Some(PlayerId::TWO));
        assert_eq!(stack.pass_priority(PlayerId::TWO), PassOutcome::Waiting(PlayerId::ONE));
        assert_eq!(stack.pass_priority(PlayerId::ONE), PassOutcome::AllPassed);
    }

    #[test]
    fn test_response_resets_passes() {
        let mut stack = EffectStack::new();
        stack.add_to_stack(damage(3), EffectTarget::None, meta(SPELL_PRIORITY, true));
        stack.open_window(PlayerId::ONE);
        stack.pass_priority(PlayerId::TWO);

        stack.add_to_stack(damage(1), EffectTarget::None, meta(SPELL_PRIORITY, true));
        stack.open_window(PlayerId::ONE);

        assert_eq!(stack.pass_priority(PlayerId::TWO), PassOutcome::Waiting(PlayerId::ONE));
        assert_eq!(stack.pass_priority(PlayerId::ONE), PassOutcome::AllPassed);
    }

    #[test]
    fn test_clear() {
        let mut stack = EffectStack::new();
        stack.add_to_stack(damage(3), EffectTarget::None, meta(SPELL_PRIORITY, true));
        stack.open_window(PlayerId::ONE);

        stack.clear();

        assert!(stack.is_empty());
        assert!(!stack.is_window_open());
    }
}
