use serde::{Deserialize, Serialize};

/// One-shot effect a card applies right after its battle resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialEffect {
    Stun,
    Poison,
    Burn,
    Heal,
    EnergyBoost,
    Shield,
    EnergyDrain,
    PowerBoost,
    /// Folded into damage calculation; nothing happens after battle.
    DoubleAttack,
}

impl SpecialEffect {
    /// Magnitude used when a special carries no explicit value.
    pub fn default_value(self) -> u32 {
        match self {
            SpecialEffect::Stun => 1,
            SpecialEffect::Poison => 4,
            SpecialEffect::Burn => 3,
            SpecialEffect::Heal => 12,
            SpecialEffect::EnergyBoost => 2,
            SpecialEffect::Shield => 5,
            SpecialEffect::EnergyDrain => 1,
            SpecialEffect::PowerBoost => 20,
            SpecialEffect::DoubleAttack => 0,
        }
    }
}

/// Always-on modifier that applies while the card sits on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassiveEffect {
    /// Added to the base 10% critical chance.
    CriticalChance,
    /// Flat damage returned to the opponent every exchange.
    CounterAttack,
    /// Extra energy gained on each draw step.
    EnergyRegen,
    /// Subtracted from incoming damage after defense.
    DamageReduction,
}

/// Kinds of timed status effects a player can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusKind {
    Stun,
    Poison,
    Burn,
    Shield,
    EnergyDrain,
    PowerBoost,
}

impl StatusKind {
    pub fn label(self) -> &'static str {
        match self {
            StatusKind::Stun => "stun",
            StatusKind::Poison => "poison",
            StatusKind::Burn => "burn",
            StatusKind::Shield => "shield",
            StatusKind::EnergyDrain => "energyDrain",
            StatusKind::PowerBoost => "powerBoost",
        }
    }

    /// Damage per draw step for damage-over-time kinds.
    pub fn tick_damage(self, value: Option<u32>) -> Option<u32> {
        match self {
            StatusKind::Poison => Some(value.unwrap_or(4)),
            StatusKind::Burn => Some(value.unwrap_or(3)),
            _ => None,
        }
    }
}

/// A timed effect on a player. Same-kind effects stack as separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Remaining owner draw steps.
    pub duration: u32,
    pub value: Option<u32>,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, duration: u32, value: Option<u32>) -> Self {
        StatusEffect {
            kind,
            duration,
            value,
        }
    }

    pub fn stun(duration: u32) -> Self {
        StatusEffect::new(StatusKind::Stun, duration, None)
    }

    pub fn poison(duration: u32, value: u32) -> Self {
        StatusEffect::new(StatusKind::Poison, duration, Some(value))
    }

    pub fn burn(duration: u32, value: u32) -> Self {
        StatusEffect::new(StatusKind::Burn, duration, Some(value))
    }

    pub fn shield(duration: u32, value: u32) -> Self {
        StatusEffect::new(StatusKind::Shield, duration, Some(value))
    }
}
