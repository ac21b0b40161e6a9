use super::card::{Card, ElementType, Rarity, Synergy, SynergyBonus};
use crate::effects::registry::{passive_pool, special_pool};
use crate::game::rng::GameRng;
use crate::game::state::Side;

/// 12-slot weighted rarity pool: 5 common, 3 uncommon, 2 rare, 1 epic, 1 legendary.
const RARITY_POOL: [Rarity; 12] = [
    Rarity::Common,
    Rarity::Common,
    Rarity::Common,
    Rarity::Common,
    Rarity::Common,
    Rarity::Uncommon,
    Rarity::Uncommon,
    Rarity::Uncommon,
    Rarity::Rare,
    Rarity::Rare,
    Rarity::Epic,
    Rarity::Legendary,
];

const PASSIVE_CHANCE: f64 = 0.6;
const SYNERGY_CHANCE: f64 = 0.4;

pub const MIN_ENERGY_COST: u32 = 2;
pub const MAX_ENERGY_COST: u32 = 8;

const SYNERGY_BONUSES: [(SynergyBonus, u32); 3] = [
    (SynergyBonus::Attack, 2),
    (SynergyBonus::Defense, 2),
    (SynergyBonus::Special, 1),
];

fn name_ladder(element: ElementType) -> [&'static str; 9] {
    match element {
        ElementType::Fire => [
            "Flame Sprite",
            "Ember Wisp",
            "Blaze Elemental",
            "Inferno Drake",
            "Phoenix Guardian",
            "Volcanic Titan",
            "Magma Lord",
            "Hellfire Dragon",
            "Solar Flare",
        ],
        ElementType::Ice => [
            "Frost Sprite",
            "Snow Wisp",
            "Glacier Elemental",
            "Blizzard Drake",
            "Frozen Guardian",
            "Arctic Titan",
            "Permafrost Lord",
            "Avalanche Dragon",
            "Winter's Wrath",
        ],
        ElementType::Electric => [
            "Spark Sprite",
            "Lightning Wisp",
            "Thunder Elemental",
            "Storm Drake",
            "Voltage Guardian",
            "Tempest Titan",
            "Thunderbolt Lord",
            "Lightning Dragon",
            "Static Surge",
        ],
        ElementType::Water => [
            "Droplet Sprite",
            "Mist Wisp",
            "Wave Elemental",
            "Tidal Drake",
            "Ocean Guardian",
            "Tsunami Titan",
            "Abyssal Lord",
            "Kraken",
            "Maelstrom",
        ],
        ElementType::Earth => [
            "Pebble Sprite",
            "Dust Wisp",
            "Boulder Elemental",
            "Terra Drake",
            "Mountain Guardian",
            "Tectonic Titan",
            "Quake Lord",
            "Stone Dragon",
            "Ancient Treant",
        ],
        ElementType::Wind => [
            "Breeze Sprite",
            "Gust Wisp",
            "Cyclone Elemental",
            "Zephyr Drake",
            "Sky Guardian",
            "Tornado Titan",
            "Tempest Lord",
            "Cloud Dragon",
            "Hurricane Force",
        ],
    }
}

/// First index of the three-name band a rarity draws its name from.
fn name_band_start(rarity: Rarity) -> usize {
    match rarity {
        Rarity::Legendary => 6,
        Rarity::Epic => 3,
        _ => 0,
    }
}

/// Energy cost from final stats, clamped to 2..=8.
pub fn energy_cost_for(attack: u32, defense: u32, rarity: Rarity) -> u32 {
    ((attack + defense) / 3 + rarity.energy_bonus()).clamp(MIN_ENERGY_COST, MAX_ENERGY_COST)
}

/// Generate one card with rarity-weighted attributes.
pub fn generate_card(owner: Side, preferred: Option<ElementType>, rng: &mut GameRng) -> Card {
    let element = match preferred {
        Some(element) => element,
        None => random_element(rng),
    };
    let rarity = RARITY_POOL[rng.gen_range(0, RARITY_POOL.len())];
    build_card(owner, element, rarity, rng)
}

/// Generate a card of a fixed rarity (used by the deck builder's guarantees).
pub fn generate_card_with_rarity(
    owner: Side,
    element: ElementType,
    rarity: Rarity,
    rng: &mut GameRng,
) -> Card {
    build_card(owner, element, rarity, rng)
}

pub fn random_element(rng: &mut GameRng) -> ElementType {
    let all = ElementType::all();
    all[rng.gen_range(0, all.len())]
}

fn build_card(owner: Side, element: ElementType, rarity: Rarity, rng: &mut GameRng) -> Card {
    // Base attack is 1 or 2; base defense is always 1.
    let base_attack = rng.gen_range(1, 3) as u32;
    let base_defense = 1u32;

    let attack = base_attack * rarity.multiplier_tenths() / 10;
    let defense = base_defense * rarity.multiplier_tenths() / 10;
    let energy_cost = energy_cost_for(attack, defense, rarity);

    let special = if rarity != Rarity::Common && rng.chance(rarity.special_chance()) {
        rng.pick(special_pool(rarity)).map(|t| t.instantiate())
    } else {
        None
    };

    let passive = if rarity >= Rarity::Rare && rng.chance(PASSIVE_CHANCE) {
        let pool = passive_pool(rarity);
        rng.pick(&pool).copied()
    } else {
        None
    };

    let synergy = if rarity != Rarity::Common && rng.chance(SYNERGY_CHANCE) {
        let others: Vec<ElementType> = ElementType::all()
            .iter()
            .copied()
            .filter(|&t| t != element)
            .collect();
        let trigger = others[rng.gen_range(0, others.len())];
        let (bonus, value) = SYNERGY_BONUSES[rng.gen_range(0, SYNERGY_BONUSES.len())];
        Some(Synergy {
            trigger,
            bonus,
            value,
        })
    } else {
        None
    };

    let name_idx = name_band_start(rarity) + rng.gen_range(0, 3);
    let name = name_ladder(element)[name_idx].to_string();

    tracing::trace!(?owner, card = %name, ?rarity, ?element, "card generated");

    Card {
        id: rng.next_uuid(),
        name,
        element,
        rarity,
        attack,
        defense,
        energy_cost,
        description: Some(element.description().to_string()),
        special,
        passive,
        synergy,
    }
}
