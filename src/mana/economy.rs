//! Mana payment, rollover and refill.
//!
//! Regular mana pays first; banked spell mana covers only the remainder.
//! A payment is all or nothing: `quote` decides the split against an
//! immutable player, and `pay_cost` applies exactly that split.

use serde::{Deserialize, Serialize};

use crate::core::config::{MAX_MANA, SPELL_MANA_CAP};
use crate::core::error::GameError;
use crate::core::player::Player;

/// How a cost was split between the two pools.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPayment {
    pub mana_used: u32,
    pub spell_mana_used: u32,
}

impl ManaPayment {
    #[must_use]
    pub fn total(self) -> u32 {
        self.mana_used.saturating_add(self.spell_mana_used)
    }
}

/// Work out the split for `cost` without touching the player.
///
/// ```
/// use arcana_ccg::core::{Player, PlayerId};
/// use arcana_ccg::mana::quote;
///
/// let mut player = Player::new(PlayerId::ONE, 20);
/// player.mana = 5;
/// player.spell_mana = 3;
///
/// let payment = quote(&player, 7).unwrap();
/// assert_eq!((payment.mana_used, payment.spell_mana_used), (5, 2));
/// ```
pub fn quote(player: &Player, cost: u32) -> Result<ManaPayment, GameError> {
    let available = player.total_mana();
    if cost > available {
        return Err(GameError::InsufficientMana {
            required: cost,
            available,
        });
    }
    let mana_used = cost.min(player.mana);
    Ok(ManaPayment {
        mana_used,
        spell_mana_used: cost - mana_used,
    })
}

/// Pay `cost`, regular mana first. Nothing changes on failure.
pub fn pay_cost(player: &mut Player, cost: u32) -> Result<ManaPayment, GameError> {
    let payment = quote(player, cost)?;
    apply_payment(player, payment)?;
    Ok(payment)
}

/// Take a split decided earlier by `quote`. Nothing changes when the pools
/// no longer cover it.
pub fn apply_payment(player: &mut Player, payment: ManaPayment) -> Result<(), GameError> {
    match (
        player.mana.checked_sub(payment.mana_used),
        player.spell_mana.checked_sub(payment.spell_mana_used),
    ) {
        (Some(mana), Some(spell_mana)) => {
            player.mana = mana;
            player.spell_mana = spell_mana;
            Ok(())
        }
        _ => Err(GameError::InsufficientMana {
            required: payment.total(),
            available: player.total_mana(),
        }),
    }
}

/// Bank unspent regular mana as spell mana, up to the cap. The rest is lost.
///
/// Returns how much was banked.
pub fn end_of_turn_rollover(player: &mut Player) -> u32 {
    let before = player.spell_mana;
    player.spell_mana = (player.spell_mana + player.mana).min(SPELL_MANA_CAP);
    player.mana = 0;
    player.spell_mana.saturating_sub(before)
}

/// Start-of-turn refill: `max_mana = min(round, MAX_MANA)` and a full pool.
pub fn refill(player: &mut Player, round: u32) {
    player.max_mana = round.min(MAX_MANA);
    player.mana = player.max_mana;
}
