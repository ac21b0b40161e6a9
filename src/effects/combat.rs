//! Combat resolution: type advantage, critical hits, damage, counters and
//! synergies. Everything here is a pure function of its inputs (plus the
//! RNG for critical rolls).

use crate::data::card::{Card, ElementType, SynergyBonus};
use crate::effects::mechanics::{PassiveEffect, SpecialEffect};
use crate::game::rng::GameRng;

pub const SUPER_EFFECTIVE: f64 = 1.5;
pub const NEUTRAL: f64 = 1.0;
pub const NOT_VERY_EFFECTIVE: f64 = 0.75;

const BASE_CRITICAL_CHANCE: f64 = 10.0;
const CRITICAL_MULTIPLIER: f64 = 1.5;

/// Types `attacker` deals super-effective damage to.
fn strong_against(attacker: ElementType) -> &'static [ElementType] {
    match attacker {
        ElementType::Fire => &[ElementType::Ice],
        ElementType::Ice => &[ElementType::Electric, ElementType::Wind],
        ElementType::Electric => &[ElementType::Water],
        ElementType::Water => &[ElementType::Fire, ElementType::Earth],
        ElementType::Earth => &[ElementType::Electric],
        ElementType::Wind => &[ElementType::Earth],
    }
}

/// Types `attacker` deals reduced damage to.
fn weak_against(attacker: ElementType) -> &'static [ElementType] {
    match attacker {
        ElementType::Fire => &[ElementType::Water],
        ElementType::Ice => &[ElementType::Fire],
        ElementType::Electric => &[ElementType::Earth],
        ElementType::Water => &[ElementType::Electric],
        ElementType::Earth => &[ElementType::Wind, ElementType::Water],
        ElementType::Wind => &[ElementType::Ice],
    }
}

/// Damage multiplier for `attacker` hitting `defender`: 1.5, 1 or 0.75.
pub fn calculate_type_advantage(attacker: ElementType, defender: ElementType) -> f64 {
    if strong_against(attacker).contains(&defender) {
        SUPER_EFFECTIVE
    } else if weak_against(attacker).contains(&defender) {
        NOT_VERY_EFFECTIVE
    } else {
        NEUTRAL
    }
}

/// Total critical chance in percent for `card`.
pub fn critical_chance(card: &Card) -> f64 {
    let bonus = card
        .passive_value(PassiveEffect::CriticalChance)
        .unwrap_or(0);
    BASE_CRITICAL_CHANCE + f64::from(bonus)
}

/// One uniform roll against the card's critical chance.
pub fn check_critical_hit(card: &Card, rng: &mut GameRng) -> bool {
    rng.percent() < critical_chance(card)
}

/// Damage `attacker` deals to `defender`.
///
/// Rounding happens after the type multiplier and after the critical
/// multiplier only. Double attack doubles the already-integral value;
/// defense and damage reduction are subtracted last. Never negative.
pub fn calculate_damage(
    attacker: &Card,
    defender: &Card,
    type_multiplier: f64,
    is_critical: bool,
) -> u32 {
    let mut damage = (f64::from(attacker.attack) * type_multiplier).round() as i64;

    if is_critical {
        damage = (damage as f64 * CRITICAL_MULTIPLIER).round() as i64;
    }

    if attacker.has_special(SpecialEffect::DoubleAttack) {
        damage *= 2;
    }

    damage = (damage - i64::from(defender.defense)).max(0);

    if let Some(reduction) = defender.passive_value(PassiveEffect::DamageReduction) {
        damage = (damage - i64::from(reduction)).max(0);
    }

    damage as u32
}

/// Counter damage this card returns to its opponent each exchange.
pub fn process_counter_attack(card: &Card) -> u32 {
    card.passive_value(PassiveEffect::CounterAttack).unwrap_or(0)
}

/// Apply `card`'s synergy if any of `cards_to_check` matches its trigger type.
///
/// Returns an enhanced copy, or an unchanged clone when no synergy fires.
/// A `Special` bonus raises the magnitude of a special that carries a value;
/// a special without one, or a card without a special, is left as it was.
pub fn apply_synergies(card: &Card, cards_to_check: &[&Card]) -> Card {
    let Some(synergy) = card.synergy else {
        return card.clone();
    };
    if !cards_to_check.iter().any(|c| c.element == synergy.trigger) {
        return card.clone();
    }

    let mut enhanced = card.clone();
    match synergy.bonus {
        SynergyBonus::Attack => enhanced.attack += synergy.value,
        SynergyBonus::Defense => enhanced.defense += synergy.value,
        SynergyBonus::Special => {
            if let Some(special) = enhanced.special.as_mut() {
                if let Some(value) = special.value.as_mut() {
                    *value += synergy.value;
                }
            }
        }
    }
    enhanced
}

/// Whether `card`'s synergy would fire against `cards_to_check`.
pub fn synergy_triggers(card: &Card, cards_to_check: &[&Card]) -> bool {
    card.synergy
        .map_or(false, |s| cards_to_check.iter().any(|c| c.element == s.trigger))
}

/// Outcome of one exchange between two field cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exchange {
    pub player_multiplier: f64,
    pub computer_multiplier: f64,
    pub player_critical: bool,
    pub computer_critical: bool,
    /// Damage the player's card deals, before counters.
    pub player_damage: u32,
    /// Damage the computer's card deals, before counters.
    pub computer_damage: u32,
    pub player_counter: u32,
    pub computer_counter: u32,
}

impl Exchange {
    /// Total damage the player takes.
    ///
    /// A card's counter value is added to the opposing card's outgoing
    /// damage, so the player's counter is part of what the player takes.
    pub fn damage_to_player(&self) -> u32 {
        self.computer_damage + self.player_counter
    }

    /// Total damage the computer takes; mirrors `damage_to_player`.
    pub fn damage_to_computer(&self) -> u32 {
        self.player_damage + self.computer_counter
    }
}

/// Resolve one battle between the player's and the computer's field cards.
pub fn resolve_exchange(player: &Card, computer: &Card, rng: &mut GameRng) -> Exchange {
    let player_multiplier = calculate_type_advantage(player.element, computer.element);
    let computer_multiplier = calculate_type_advantage(computer.element, player.element);

    let player_critical = check_critical_hit(player, rng);
    let computer_critical = check_critical_hit(computer, rng);

    Exchange {
        player_multiplier,
        computer_multiplier,
        player_critical,
        computer_critical,
        player_damage: calculate_damage(player, computer, player_multiplier, player_critical),
        computer_damage: calculate_damage(computer, player, computer_multiplier, computer_critical),
        player_counter: process_counter_attack(player),
        computer_counter: process_counter_attack(computer),
    }
}
