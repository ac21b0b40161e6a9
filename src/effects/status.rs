use super::mechanics::*;
use crate::data::card::Card;
use crate::game::state::{PlayerState, Side};

/// Outcome of one draw-step status tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Log lines in the order they happened (oldest first).
    pub messages: Vec<String>,
    /// Whether any damage-over-time effect dealt damage.
    pub damage_applied: bool,
}

/// Run the draw-step tick for one player.
///
/// Poison and burn deal their value (floored at 0 health), then every
/// effect loses one turn of duration and expired ones are removed with a
/// "worn off" line each. Health is capped at `max_health` afterwards.
pub fn tick_status_effects(player: &mut PlayerState, side: Side, max_health: u32) -> TickReport {
    let mut report = TickReport::default();

    for effect in player.status_effects.iter_mut() {
        if let Some(damage) = effect.kind.tick_damage(effect.value) {
            player.health = player.health.saturating_sub(damage);
            report.messages.push(format!(
                "{} {} damage from {}.",
                side.take_phrase(),
                damage,
                effect.kind.label()
            ));
            report.damage_applied = true;
            tracing::trace!(?side, damage, kind = effect.kind.label(), "status damage");
        }
        effect.duration = effect.duration.saturating_sub(1);
    }

    let (kept, expired): (Vec<StatusEffect>, Vec<StatusEffect>) = player
        .status_effects
        .drain(..)
        .partition(|e| e.duration > 0);
    player.status_effects = kept;
    for effect in expired {
        report.messages.push(format!(
            "{} {} effect has worn off.",
            side.possessive(),
            effect.kind.label()
        ));
    }

    player.health = player.health.min(max_health);
    report
}

/// Caps applied when specials restore resources.
#[derive(Debug, Clone, Copy)]
pub struct Caps {
    pub max_health: u32,
    pub max_energy: u32,
    pub max_power: u32,
}

/// Apply one played card's special after battle.
///
/// `own` is the card owner's state, `opponent` the other side. Returns the
/// log line, or `None` when the card has no post-battle effect.
pub fn apply_special_effect(
    card: &Card,
    owner: Side,
    own: &mut PlayerState,
    opponent: &mut PlayerState,
    caps: Caps,
) -> Option<String> {
    let special = card.special.as_ref()?;
    let value = special.magnitude();
    let who = owner.possessive();
    let target = owner.opponent().object();

    let message = match special.effect {
        SpecialEffect::Stun => {
            opponent.status_effects.push(StatusEffect::stun(value));
            format!("{} {} stunned {} for {} turn!", who, card.name, target, value)
        }
        SpecialEffect::Poison => {
            opponent.status_effects.push(StatusEffect::poison(3, value));
            format!(
                "{} {} poisoned {} for 3 turns! ({} damage per turn)",
                who, card.name, target, value
            )
        }
        SpecialEffect::Burn => {
            opponent.status_effects.push(StatusEffect::burn(2, value));
            format!(
                "{} {} burned {} for 2 turns! ({} damage per turn)",
                who, card.name, target, value
            )
        }
        SpecialEffect::Heal => {
            own.health = own.health.saturating_add(value).min(caps.max_health);
            format!("{} {} healed {} for {} health!", who, card.name, owner.self_object(), value)
        }
        SpecialEffect::EnergyBoost => {
            own.energy = own.energy.saturating_add(value).min(caps.max_energy);
            format!(
                "{} {} gave {} {} additional energy!",
                who,
                card.name,
                owner.self_object(),
                value
            )
        }
        SpecialEffect::Shield => {
            own.status_effects.push(StatusEffect::shield(1, value));
            format!(
                "{} {} shielded {} from {} damage for 1 turn!",
                who,
                card.name,
                owner.self_object(),
                value
            )
        }
        SpecialEffect::EnergyDrain => {
            opponent.energy = opponent.energy.saturating_sub(value);
            format!("{} {} drained {} energy from {}!", who, card.name, value, target)
        }
        SpecialEffect::PowerBoost => {
            own.power = own.power.saturating_add(value).min(caps.max_power);
            format!(
                "{} {} boosted {} power meter by {}%!",
                who,
                card.name,
                owner.object_possessive(),
                value
            )
        }
        SpecialEffect::DoubleAttack => return None,
    };
    Some(message)
}
