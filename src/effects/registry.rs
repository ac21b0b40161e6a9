use super::mechanics::*;
use crate::data::card::{Passive, Rarity, Special};

/// Catalog entry for a special: display name, effect, optional magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialTemplate {
    pub name: &'static str,
    pub effect: SpecialEffect,
    pub value: Option<u32>,
}

impl SpecialTemplate {
    pub fn instantiate(&self) -> Special {
        Special {
            name: self.name.to_string(),
            effect: self.effect,
            value: self.value,
        }
    }
}

pub const STUN: SpecialTemplate = SpecialTemplate {
    name: "Stun",
    effect: SpecialEffect::Stun,
    value: Some(1),
};
pub const POISON: SpecialTemplate = SpecialTemplate {
    name: "Poison",
    effect: SpecialEffect::Poison,
    value: Some(4),
};
pub const BURN: SpecialTemplate = SpecialTemplate {
    name: "Burn",
    effect: SpecialEffect::Burn,
    value: Some(3),
};
pub const HEAL: SpecialTemplate = SpecialTemplate {
    name: "Heal",
    effect: SpecialEffect::Heal,
    value: Some(12),
};
pub const ENERGY_BOOST: SpecialTemplate = SpecialTemplate {
    name: "Energy Boost",
    effect: SpecialEffect::EnergyBoost,
    value: Some(2),
};
pub const SHIELD: SpecialTemplate = SpecialTemplate {
    name: "Shield",
    effect: SpecialEffect::Shield,
    value: Some(5),
};
pub const ENERGY_DRAIN: SpecialTemplate = SpecialTemplate {
    name: "Energy Drain",
    effect: SpecialEffect::EnergyDrain,
    value: Some(1),
};
pub const POWER_SURGE: SpecialTemplate = SpecialTemplate {
    name: "Power Surge",
    effect: SpecialEffect::PowerBoost,
    value: Some(20),
};
pub const DOUBLE_STRIKE: SpecialTemplate = SpecialTemplate {
    name: "Double Strike",
    effect: SpecialEffect::DoubleAttack,
    value: None,
};

/// Pool for uncommon cards.
pub const UNCOMMON_SPECIALS: &[SpecialTemplate] = &[STUN, POISON, BURN, HEAL, ENERGY_BOOST];

/// Pool for rare cards: the uncommon pool plus shield and drain.
pub const RARE_SPECIALS: &[SpecialTemplate] = &[
    STUN,
    POISON,
    BURN,
    HEAL,
    ENERGY_BOOST,
    SHIELD,
    ENERGY_DRAIN,
];

/// Pool for epic cards: everything except the two most basic effects.
pub const EPIC_SPECIALS: &[SpecialTemplate] = &[
    BURN,
    HEAL,
    ENERGY_BOOST,
    SHIELD,
    ENERGY_DRAIN,
    POWER_SURGE,
    DOUBLE_STRIKE,
];

/// Pool for legendary cards: only the four strongest effects.
pub const LEGENDARY_SPECIALS: &[SpecialTemplate] =
    &[SHIELD, ENERGY_DRAIN, POWER_SURGE, DOUBLE_STRIKE];

/// The special pool a card of `rarity` draws from. Commons have none.
pub fn special_pool(rarity: Rarity) -> &'static [SpecialTemplate] {
    match rarity {
        Rarity::Common => &[],
        Rarity::Uncommon => UNCOMMON_SPECIALS,
        Rarity::Rare => RARE_SPECIALS,
        Rarity::Epic => EPIC_SPECIALS,
        Rarity::Legendary => LEGENDARY_SPECIALS,
    }
}

/// Passive candidates for `rarity`, magnitudes scaled by tier.
/// Empty below rare.
pub fn passive_pool(rarity: Rarity) -> Vec<Passive> {
    let (crit, counter, reduction) = match rarity {
        Rarity::Common | Rarity::Uncommon => return Vec::new(),
        Rarity::Rare => (15, 1, 1),
        Rarity::Epic => (20, 2, 2),
        Rarity::Legendary => (30, 3, 3),
    };
    vec![
        Passive {
            effect: PassiveEffect::CriticalChance,
            value: crit,
        },
        Passive {
            effect: PassiveEffect::CounterAttack,
            value: counter,
        },
        Passive {
            effect: PassiveEffect::EnergyRegen,
            value: 1,
        },
        Passive {
            effect: PassiveEffect::DamageReduction,
            value: reduction,
        },
    ]
}
