#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};

use duelforge_engine::data::card::*;
use duelforge_engine::data::loader::GameConfig;
use duelforge_engine::effects::mechanics::{PassiveEffect, SpecialEffect};
use duelforge_engine::game::state::*;
use uuid::Uuid;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub fn make_card(name: &str, element: ElementType, attack: u32, defense: u32, cost: u32) -> Card {
    Card {
        id: Uuid::from_u128(u128::from(NEXT_ID.fetch_add(1, Ordering::Relaxed))),
        name: name.to_string(),
        element,
        rarity: Rarity::Common,
        attack,
        defense,
        energy_cost: cost,
        description: None,
        special: None,
        passive: None,
        synergy: None,
    }
}

pub fn with_special(mut card: Card, effect: SpecialEffect, value: Option<u32>) -> Card {
    card.special = Some(Special {
        name: format!("{:?}", effect),
        effect,
        value,
    });
    card
}

pub fn with_passive(mut card: Card, effect: PassiveEffect, value: u32) -> Card {
    card.passive = Some(Passive { effect, value });
    card
}

/// A dealt-out state with empty decks and hands, player to play.
pub fn blank_state() -> GameState {
    let mut state = GameState::empty(GameConfig::default(), Settings::default());
    state.phase = Phase::Play;
    state.turn = Side::Player;
    state
}

/// Fill a deck with plain filler cards so draws never regenerate.
pub fn filler_deck(count: usize) -> Vec<Card> {
    (0..count)
        .map(|i| make_card(&format!("Filler {}", i), ElementType::Earth, 1, 1, 2))
        .collect()
}
