use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effects::mechanics::{PassiveEffect, SpecialEffect};

/// The six elemental types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Fire,
    Ice,
    Electric,
    Water,
    Earth,
    Wind,
}

impl ElementType {
    pub fn all() -> &'static [ElementType] {
        &[
            ElementType::Fire,
            ElementType::Ice,
            ElementType::Electric,
            ElementType::Water,
            ElementType::Earth,
            ElementType::Wind,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            ElementType::Fire => "fire",
            ElementType::Ice => "ice",
            ElementType::Electric => "electric",
            ElementType::Water => "water",
            ElementType::Earth => "earth",
            ElementType::Wind => "wind",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ElementType::Fire => "Burns with intense heat, strong against ice but weak to water.",
            ElementType::Ice => "Freezes opponents solid, strong against electric but weak to fire.",
            ElementType::Electric => "Shocks with lightning, strong against water but weak to earth.",
            ElementType::Water => "Flows with adaptability, strong against fire but weak to electric.",
            ElementType::Earth => "Stands firm and unyielding, strong against electric but weak to wind.",
            ElementType::Wind => "Moves with swift precision, strong against earth but weak to ice.",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Card rarity, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Stat multiplier in tenths (1.2 => 12), so scaling stays in integers.
    pub fn multiplier_tenths(self) -> u32 {
        match self {
            Rarity::Common => 10,
            Rarity::Uncommon => 12,
            Rarity::Rare => 15,
            Rarity::Epic => 18,
            Rarity::Legendary => 22,
        }
    }

    pub fn energy_bonus(self) -> u32 {
        match self {
            Rarity::Common | Rarity::Uncommon => 1,
            Rarity::Rare | Rarity::Epic => 2,
            Rarity::Legendary => 3,
        }
    }

    /// Probability that a card of this rarity rolls a special.
    pub fn special_chance(self) -> f64 {
        match self {
            Rarity::Common => 0.0,
            Rarity::Uncommon => 0.4,
            Rarity::Rare => 0.7,
            Rarity::Epic => 0.9,
            Rarity::Legendary => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

/// A card's one-shot post-battle effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Special {
    pub name: String,
    pub effect: SpecialEffect,
    pub value: Option<u32>,
}

impl Special {
    /// The explicit value, or the effect's default magnitude.
    pub fn magnitude(&self) -> u32 {
        self.value.unwrap_or_else(|| self.effect.default_value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passive {
    pub effect: PassiveEffect,
    pub value: u32,
}

/// Which stat a synergy boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynergyBonus {
    Attack,
    Defense,
    Special,
}

/// Conditional boost unlocked by a card of `trigger` type in discard or field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synergy {
    pub trigger: ElementType,
    pub bonus: SynergyBonus,
    pub value: u32,
}

/// A generated card. Cards are values: effects that change stats produce copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub name: String,
    pub element: ElementType,
    pub rarity: Rarity,
    pub attack: u32,
    pub defense: u32,
    /// Always within 2..=8 for generated cards.
    pub energy_cost: u32,
    pub description: Option<String>,
    pub special: Option<Special>,
    pub passive: Option<Passive>,
    pub synergy: Option<Synergy>,
}

impl Card {
    pub fn has_special(&self, effect: SpecialEffect) -> bool {
        self.special.as_ref().map_or(false, |s| s.effect == effect)
    }

    /// Passive value if the card's passive is `effect`.
    pub fn passive_value(&self, effect: PassiveEffect) -> Option<u32> {
        self.passive
            .filter(|p| p.effect == effect)
            .map(|p| p.value)
    }

    pub fn is_affordable(&self, energy: u32) -> bool {
        self.energy_cost <= energy
    }

    /// (attack + defense) / energy cost, used for "best value" picks.
    pub fn value_ratio(&self) -> f64 {
        if self.energy_cost == 0 {
            return f64::from(self.attack + self.defense);
        }
        f64::from(self.attack + self.defense) / f64::from(self.energy_cost)
    }
}
