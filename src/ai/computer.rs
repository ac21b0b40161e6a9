use std::cmp::Ordering;

use crate::data::card::Card;
use crate::effects::combat::{calculate_damage, calculate_type_advantage};
use crate::game::rng::GameRng;
use crate::game::state::{AiDifficulty, PlayerState};

/// Below this much energy the hard AI sometimes holds its cards.
const HARD_CONSERVE_ENERGY: u32 = 5;
const HARD_PASS_CHANCE: f64 = 0.3;

/// Choose the computer's play, or `None` to pass.
///
/// Only affordable cards are considered. Ties keep hand order.
pub fn get_computer_move<'a>(
    computer: &'a PlayerState,
    player_field: Option<&Card>,
    difficulty: AiDifficulty,
    rng: &mut GameRng,
) -> Option<&'a Card> {
    let mut playable: Vec<&Card> = computer
        .hand
        .iter()
        .filter(|c| c.is_affordable(computer.energy))
        .collect();

    if playable.is_empty() {
        return None;
    }

    if difficulty == AiDifficulty::Easy {
        let idx = rng.gen_range(0, playable.len());
        return Some(playable[idx]);
    }

    if let Some(target) = player_field {
        let mut advantaged: Vec<&Card> = playable
            .iter()
            .copied()
            .filter(|c| calculate_type_advantage(c.element, target.element) > 1.0)
            .collect();
        if !advantaged.is_empty() {
            advantaged.sort_by(|a, b| b.attack.cmp(&a.attack));
            return advantaged.first().copied();
        }

        playable.sort_by_key(|c| std::cmp::Reverse(expected_damage(c, target)));
        return playable.first().copied();
    }

    playable.sort_by(|a, b| {
        b.value_ratio()
            .partial_cmp(&a.value_ratio())
            .unwrap_or(Ordering::Equal)
    });

    if difficulty == AiDifficulty::Hard
        && computer.energy < HARD_CONSERVE_ENERGY
        && rng.chance(HARD_PASS_CHANCE)
    {
        tracing::debug!(energy = computer.energy, "hard AI conserving energy");
        return None;
    }

    playable.first().copied()
}

/// Non-critical damage `card` would deal to `target`.
fn expected_damage(card: &Card, target: &Card) -> u32 {
    calculate_damage(
        card,
        target,
        calculate_type_advantage(card.element, target.element),
        false,
    )
}
