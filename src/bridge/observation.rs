use std::fmt::Write as _;

use crate::data::card::Card;
use crate::game::state::*;

/// Serialize the full game state for the presentation layer.
pub fn snapshot_json(state: &GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

pub fn snapshot_value(state: &GameState) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(state)
}

/// Render a game state as readable text.
pub fn render_state(state: &GameState) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "Turn: {} | Phase: {:?} | Time left: {}s",
        state.turn.label(),
        state.phase,
        state.time_left
    );

    for side in [Side::Computer, Side::Player] {
        let p = state.side(side);
        let _ = writeln!(s, "=== {} ===", side.label());
        let _ = writeln!(
            s,
            "Health: {}/{} | Energy: {}/{} | Power: {}% | Combo: {}",
            p.health,
            state.config.max_health,
            p.energy,
            state.config.max_energy,
            p.power,
            p.combo
        );
        let _ = writeln!(
            s,
            "Hand: {} | Deck: {} | Discard: {}",
            p.hand.len(),
            p.deck.len(),
            p.discard_pile.len()
        );
        match &p.field {
            Some(card) => {
                let _ = writeln!(s, "Field: {}", describe_card(card));
            }
            None => s.push_str("Field: (empty)\n"),
        }
        if !p.status_effects.is_empty() {
            let effects: Vec<String> = p
                .status_effects
                .iter()
                .map(|e| format!("{}({})", e.kind.label(), e.duration))
                .collect();
            let _ = writeln!(s, "Status: {}", effects.join(", "));
        }
        if side == Side::Player {
            for (i, card) in p.hand.iter().enumerate() {
                let _ = writeln!(s, "  [{}] {}", i, describe_card(card));
            }
        }
    }

    s.push_str("--- Battle log ---\n");
    for line in state.battle_log.entries() {
        let _ = writeln!(s, "{}", line);
    }

    if let Some(winner) = state.winner {
        let _ = writeln!(s, "GAME OVER: {} wins!", winner.label());
    }

    s
}

fn describe_card(card: &Card) -> String {
    let mut text = format!(
        "{} [{} {}] ATK {} DEF {} cost {}",
        card.name,
        card.rarity.label(),
        card.element.label(),
        card.attack,
        card.defense,
        card.energy_cost
    );
    if let Some(special) = &card.special {
        let _ = write!(text, " | {}", special.name);
    }
    text
}
