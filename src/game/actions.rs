use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::state::*;

/// Every intent the reducer understands.
///
/// The first group comes from the presentation layer. The second group is
/// issued by the scheduler as delayed continuations and is rejected as stale
/// when the state no longer calls for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    // === Gameplay ===
    /// Draw the top card of `side`'s deck.
    DrawCard { side: Side },
    /// Play a card from `side`'s hand to its field.
    PlayCard { side: Side, card_id: Uuid },
    /// The human yields the rest of the turn.
    PassTurn,
    /// Spend a full power meter on the side's unique attack.
    UseSpecialPower { side: Side },
    /// Throw away the current game and deal a new one, keeping settings.
    ResetGame,

    // === Settings ===
    SetAiDifficulty { difficulty: AiDifficulty },
    ToggleAnimations,
    ToggleSound,

    // === Tutorial ===
    StartTutorial,
    SetTutorialStep { step: TutorialStep },
    CompleteTutorial,

    // === Scheduled continuations ===
    /// One second of the player's turn timer.
    Tick,
    /// The computer's play decision.
    ComputerTurn,
    /// Compute the exchange between the two field cards.
    ResolveBattle,
    /// Apply a resolved exchange and clear the fields.
    ApplyBattleResult,
    /// Drop the transient animation marker.
    ClearAnimation,
}

impl Action {
    /// Whether only the scheduler issues this intent.
    pub fn is_continuation(&self) -> bool {
        matches!(
            self,
            Action::Tick
                | Action::ComputerTurn
                | Action::ResolveBattle
                | Action::ApplyBattleResult
                | Action::ClearAnimation
        )
    }
}

/// Generate the gameplay intents currently open to the human side.
///
/// Settings, tutorial and reset intents are always available and are not
/// listed. Nothing is legal once the game is over or while the tutorial runs.
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    if state.is_terminal() || state.tutorial.active {
        return vec![];
    }

    let player = &state.player;
    let mut actions = Vec::new();

    if state.turn == Side::Player {
        match state.phase {
            Phase::Draw => actions.push(Action::DrawCard { side: Side::Player }),
            Phase::Play => {
                for card in player.affordable_cards() {
                    actions.push(Action::PlayCard {
                        side: Side::Player,
                        card_id: card.id,
                    });
                }
                actions.push(Action::PassTurn);
            }
            _ => {}
        }
    }

    if state.turn == Side::Player && player.power >= state.config.max_power {
        actions.push(Action::UseSpecialPower { side: Side::Player });
    }

    actions
}
