//! Direct-attack resolution.
//!
//! An attack resolves at once against a unit or the defending player. Unit
//! combat is simultaneous: both units read each other's attack before either
//! takes damage, and both may die in the same step.

use serde::{Deserialize, Serialize};

use crate::core::action::AttackTarget;
use crate::core::entity::CardInstanceId;
use crate::core::error::GameError;
use crate::core::state::GameState;
use crate::stack::settle_deaths;

/// What an attack did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    pub attacker: CardInstanceId,
    pub target: AttackTarget,
    /// Damage the attacker dealt.
    pub damage_dealt: i32,
    /// Damage the attacker took back (zero against the nexus).
    pub damage_taken: i32,
    /// Units removed at zero health, in removal order.
    pub destroyed: Vec<CardInstanceId>,
}

/// Resolve one attack on `state`.
///
/// Expects a validated attack; a missing attacker or defender is reported
/// as an error rather than ignored. Death triggers are queued on the stack
/// but not resolved.
pub fn resolve_direct_attack(
    state: &mut GameState,
    attacker: CardInstanceId,
    target: AttackTarget,
) -> Result<CombatReport, GameError> {
    let (side, _) = state
        .battlefield
        .position_of(attacker)
        .ok_or(GameError::AttackerNotFound { attacker })?;
    let defender = side.opponent();

    let attack = {
        let unit = state
            .battlefield
            .unit_mut(attacker)
            .ok_or(GameError::AttackerNotFound { attacker })?;
        unit.has_attacked_this_turn = true;
        unit.attack()
    };

    let damage_taken = match target {
        AttackTarget::Nexus => {
            state.player_mut(defender).health -= attack;
            tracing::debug!(%attacker, %defender, damage = attack, "nexus hit");
            0
        }
        AttackTarget::Unit(blocker) => {
            let retaliation = state
                .battlefield
                .unit(blocker)
                .filter(|c| c.owner == defender)
                .map(|c| c.attack())
                .ok_or_else(|| GameError::invalid_target(format!("{blocker} is not an enemy unit")))?;

            if let Some(unit) = state.battlefield.unit_mut(blocker) {
                unit.take_damage(attack);
            }
            if let Some(unit) = state.battlefield.unit_mut(attacker) {
                unit.take_damage(retaliation);
            }
            tracing::debug!(%attacker, %blocker, dealt = attack, taken = retaliation, "units clashed");
            retaliation
        }
    };

    let destroyed = settle_deaths(state);

    Ok(CombatReport {
        attacker,
        target,
        damage_dealt: attack,
        damage_taken,
        destroyed,
    })
}
