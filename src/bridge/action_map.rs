use serde_json::json;

use crate::game::actions::{legal_actions, Action};
use crate::game::engine::{Notice, StepResult};
use crate::game::state::{GameState, Side};

/// Largest hand the discrete action space addresses.
pub const MAX_HAND_SLOTS: usize = 16;

/// Total number of discrete action indices for the human side.
pub const ACTION_SPACE_SIZE: usize = 3 + MAX_HAND_SLOTS;

// Action space layout:
// [0]      DrawCard
// [1]      PassTurn
// [2]      UseSpecialPower
// [3-18]   PlayCard(hand slot 0..15)

/// Convert a human gameplay intent to its discrete index.
///
/// Cards are addressed by their current hand slot, so the index depends on
/// the state. Intents outside the human action space map to `None`.
pub fn action_to_index(state: &GameState, action: &Action) -> Option<usize> {
    match action {
        Action::DrawCard { side: Side::Player } => Some(0),
        Action::PassTurn => Some(1),
        Action::UseSpecialPower { side: Side::Player } => Some(2),
        Action::PlayCard {
            side: Side::Player,
            card_id,
        } => state
            .player
            .hand
            .iter()
            .position(|c| c.id == *card_id)
            .filter(|slot| *slot < MAX_HAND_SLOTS)
            .map(|slot| 3 + slot),
        _ => None,
    }
}

/// Convert a discrete index back to an intent against `state`.
pub fn index_to_action(state: &GameState, idx: usize) -> Option<Action> {
    match idx {
        0 => Some(Action::DrawCard { side: Side::Player }),
        1 => Some(Action::PassTurn),
        2 => Some(Action::UseSpecialPower { side: Side::Player }),
        _ if idx < ACTION_SPACE_SIZE => state.player.hand.get(idx - 3).map(|card| Action::PlayCard {
            side: Side::Player,
            card_id: card.id,
        }),
        _ => None,
    }
}

/// Legal-action mask over the discrete action space.
pub fn action_mask(state: &GameState) -> Vec<bool> {
    let mut mask = vec![false; ACTION_SPACE_SIZE];
    for action in legal_actions(state) {
        if let Some(idx) = action_to_index(state, &action) {
            mask[idx] = true;
        }
    }
    mask
}

/// Decode an intent from its JSON form, e.g.
/// `{"type": "play_card", "side": "player", "card_id": "…"}`.
pub fn action_from_json(data: &str) -> Result<Action, serde_json::Error> {
    serde_json::from_str(data)
}

pub fn action_to_json(action: &Action) -> Result<String, serde_json::Error> {
    serde_json::to_string(action)
}

/// Encode a step result for the presentation layer.
pub fn step_result_to_json(result: &StepResult) -> serde_json::Value {
    match result {
        StepResult::Continue => json!({ "status": "continue" }),
        StepResult::Advisory(notice) => json!({
            "status": "advisory",
            "notice": notice_to_json(notice),
        }),
        StepResult::Rejected(notice) => json!({
            "status": "rejected",
            "notice": notice_to_json(notice),
        }),
        StepResult::GameOver { winner } => json!({
            "status": "game_over",
            "winner": winner.label(),
        }),
    }
}

pub fn notice_to_json(notice: &Notice) -> serde_json::Value {
    let kind = match notice {
        Notice::NotEnoughEnergy { .. } => "not_enough_energy",
        Notice::PowerNotFull { .. } => "power_not_full",
        Notice::Stunned => "stunned",
        Notice::TimeUp => "time_up",
        Notice::DeckRegenerated => "deck_regenerated",
        Notice::OutOfTurn => "out_of_turn",
        Notice::CardNotInHand => "card_not_in_hand",
        Notice::GameAlreadyOver => "game_already_over",
        Notice::TutorialActive => "tutorial_active",
        Notice::Stale => "stale",
    };
    json!({ "kind": kind, "message": notice.to_string() })
}
