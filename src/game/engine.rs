use std::fmt;

use tracing::{debug, info, trace};
use uuid::Uuid;

use crate::ai::get_computer_move;
use crate::data::deck::generate_deck;
use crate::data::loader::GameConfig;
use crate::effects::combat::{apply_synergies, resolve_exchange, synergy_triggers};
use crate::effects::mechanics::{PassiveEffect, StatusEffect};
use crate::effects::status::{apply_special_effect, tick_status_effects};
use crate::game::actions::Action;
use crate::game::rng::GameRng;
use crate::game::state::*;

/// Feedback for the presentation layer attached to a rejected or
/// auto-resolved intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NotEnoughEnergy { required: u32, available: u32 },
    PowerNotFull { power: u32, required: u32 },
    Stunned,
    TimeUp,
    DeckRegenerated,
    OutOfTurn,
    CardNotInHand,
    GameAlreadyOver,
    TutorialActive,
    /// A scheduled continuation whose precondition no longer holds.
    Stale,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NotEnoughEnergy {
                required,
                available,
            } => write!(
                f,
                "Not enough energy! This card requires {} energy. You have {}.",
                required, available
            ),
            Notice::PowerNotFull { power, required } => write!(
                f,
                "Power meter not full! You need {}% power to use your special ability ({}%).",
                required, power
            ),
            Notice::Stunned => write!(f, "Stunned! You cannot play a card this turn."),
            Notice::TimeUp => write!(f, "Time's up! A card has been automatically played for you."),
            Notice::DeckRegenerated => write!(f, "Deck empty! A fresh deck has been generated."),
            Notice::OutOfTurn => write!(f, "You cannot do that right now."),
            Notice::CardNotInHand => write!(f, "That card is not in hand."),
            Notice::GameAlreadyOver => write!(f, "The game is over. Start a new game to play again."),
            Notice::TutorialActive => write!(f, "Finish or close the tutorial first."),
            Notice::Stale => write!(f, "Nothing to do."),
        }
    }
}

/// Result of applying an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// Action applied, game continues.
    Continue,
    /// Action applied with feedback worth showing.
    Advisory(Notice),
    /// Action refused; the state is untouched.
    Rejected(Notice),
    /// Action applied and the game just ended.
    GameOver { winner: Side },
}

impl StepResult {
    pub fn is_applied(&self) -> bool {
        !matches!(self, StepResult::Rejected(_))
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            StepResult::Advisory(n) | StepResult::Rejected(n) => Some(n),
            _ => None,
        }
    }
}

/// Initialize a new game with default rules and settings.
pub fn new_game(seed: u64) -> (GameState, GameRng) {
    new_game_with(GameConfig::default(), Settings::default(), seed)
}

/// Initialize a new game: build both decks and deal opening hands.
pub fn new_game_with(config: GameConfig, settings: Settings, seed: u64) -> (GameState, GameRng) {
    let mut rng = GameRng::new(seed);
    let mut state = GameState::empty(config, settings);
    setup(&mut state, &mut rng);
    (state, rng)
}

/// Build both decks, deal the opening hands and hand the first draw to the player.
fn setup(state: &mut GameState, rng: &mut GameRng) {
    let difficulty = state.settings.ai_difficulty;
    let hand_size = state.config.hand_size;

    for side in [Side::Player, Side::Computer] {
        let mut cards = generate_deck(side, difficulty, rng).into_cards();
        let hand: Vec<_> = cards.drain(..hand_size.min(cards.len())).collect();
        let player = state.side_mut(side);
        player.hand = hand;
        player.deck = cards;
    }

    state.turn = Side::Player;
    enter_phase(state, Phase::Draw);
    state.battle_log.push("Game started! Draw your first card to begin.");
    info!(?difficulty, "game started");
}

/// Pure form of [`apply_action`]: returns the next state, leaving `state` untouched.
pub fn transition(state: &GameState, action: &Action, rng: &mut GameRng) -> (GameState, StepResult) {
    let mut next = state.clone();
    let result = apply_action(&mut next, action, rng);
    (next, result)
}

/// Apply an action to the game state.
///
/// Rejected actions leave the state exactly as it was. Every applied action
/// is followed by the game-over check.
pub fn apply_action(state: &mut GameState, action: &Action, rng: &mut GameRng) -> StepResult {
    let result = dispatch(state, action, rng);

    if let StepResult::Rejected(notice) = &result {
        debug!(?action, %notice, phase = ?state.phase, "action rejected");
        return result;
    }

    match check_game_over(state) {
        Some(winner) => StepResult::GameOver { winner },
        None => result,
    }
}

fn dispatch(state: &mut GameState, action: &Action, rng: &mut GameRng) -> StepResult {
    // Always available, even after the game ends.
    match action {
        Action::ResetGame => return reset_game(state, rng),
        Action::SetAiDifficulty { difficulty } => {
            state.settings.ai_difficulty = *difficulty;
            debug!(?difficulty, "ai difficulty changed");
            return StepResult::Continue;
        }
        Action::ToggleAnimations => {
            state.settings.animations_enabled = !state.settings.animations_enabled;
            if !state.settings.animations_enabled && state.battle_result.is_none() {
                state.animation = None;
            }
            return StepResult::Continue;
        }
        Action::ToggleSound => {
            state.settings.sound_enabled = !state.settings.sound_enabled;
            return StepResult::Continue;
        }
        Action::StartTutorial => {
            state.tutorial.active = true;
            state.tutorial.step = TutorialStep::Welcome;
            return StepResult::Continue;
        }
        Action::SetTutorialStep { step } => {
            if !state.tutorial.active {
                return StepResult::Rejected(Notice::Stale);
            }
            state.tutorial.step = *step;
            return StepResult::Continue;
        }
        Action::CompleteTutorial => {
            state.tutorial.active = false;
            state.settings.tutorial_completed = true;
            return StepResult::Continue;
        }
        Action::ClearAnimation => {
            if state.animation.is_none() {
                return StepResult::Rejected(Notice::Stale);
            }
            state.animation = None;
            return StepResult::Continue;
        }
        _ => {}
    }

    if state.is_terminal() {
        return StepResult::Rejected(Notice::GameAlreadyOver);
    }
    if state.tutorial.active {
        return StepResult::Rejected(Notice::TutorialActive);
    }

    match action {
        Action::DrawCard { side } => draw_card(state, *side, rng),
        Action::PlayCard { side, card_id } => play_card(state, *side, *card_id),
        Action::PassTurn => pass_turn(state),
        Action::UseSpecialPower { side } => use_special_power(state, *side),
        Action::Tick => tick(state),
        Action::ComputerTurn => computer_turn(state, rng),
        Action::ResolveBattle => resolve_battle(state, rng),
        Action::ApplyBattleResult => apply_battle_result(state),
        // Handled above.
        _ => StepResult::Rejected(Notice::Stale),
    }
}

/// Set the phase and restart the turn timer.
fn enter_phase(state: &mut GameState, phase: Phase) {
    state.phase = phase;
    state.reset_timer();
}

/// Hand the turn to `side`, starting at its draw.
fn yield_turn(state: &mut GameState, side: Side) {
    state.turn = side;
    enter_phase(state, Phase::Draw);
}

fn set_animation(state: &mut GameState, animation: Animation) {
    if state.settings.animations_enabled {
        state.animation = Some(animation);
    }
}

fn reset_game(state: &mut GameState, rng: &mut GameRng) -> StepResult {
    let config = state.config.clone();
    let settings = state.settings.clone();
    *state = GameState::empty(config, settings);
    info!("game reset");
    setup(state, rng);
    StepResult::Continue
}

// ---------------------------------------------------------------------------
// Draw
// ---------------------------------------------------------------------------

fn draw_card(state: &mut GameState, side: Side, rng: &mut GameRng) -> StepResult {
    if state.turn != side || state.phase != Phase::Draw {
        return StepResult::Rejected(Notice::OutOfTurn);
    }

    let mut result = StepResult::Continue;

    if state.side(side).deck.is_empty() {
        let deck = generate_deck(side, state.settings.ai_difficulty, rng);
        state.side_mut(side).deck = deck.into_cards();
        state.battle_log.push(format!(
            "{} deck is empty! Reshuffling discarded cards...",
            side.possessive()
        ));
        debug!(?side, "deck regenerated");
        result = StepResult::Advisory(Notice::DeckRegenerated);
    }

    let caps = state.caps();
    let per_draw_energy = state.config.energy_per_draw;
    let per_draw_power = state.config.power_per_draw;
    let player = state.side_mut(side);

    if !player.deck.is_empty() {
        let card = player.deck.remove(0);
        player.hand.push(card);
    }

    player.energy = player.energy.saturating_add(per_draw_energy).min(caps.max_energy);
    let regen = player
        .field
        .as_ref()
        .and_then(|c| c.passive_value(PassiveEffect::EnergyRegen))
        .unwrap_or(0);
    player.energy = player.energy.saturating_add(regen).min(caps.max_energy);
    player.power = player.power.saturating_add(per_draw_power).min(caps.max_power);

    let report = tick_status_effects(player, side, caps.max_health);
    let (energy, power, health) = (player.energy, player.power, player.health);

    for message in report.messages {
        state.battle_log.push(message);
    }
    state.battle_log.push(match side {
        Side::Player => "You drew a card. Play a card or pass your turn.",
        Side::Computer => "Computer drew a card.",
    });
    if report.damage_applied {
        set_animation(state, Animation::StatusEffect);
    }

    enter_phase(state, Phase::Play);
    debug!(?side, energy, power, health, "card drawn");
    result
}

// ---------------------------------------------------------------------------
// Play / pass
// ---------------------------------------------------------------------------

fn play_card(state: &mut GameState, side: Side, card_id: Uuid) -> StepResult {
    place_card(state, side, card_id, None)
}

/// Shared play path. `headline` replaces the usual "played" log line.
fn place_card(
    state: &mut GameState,
    side: Side,
    card_id: Uuid,
    headline: Option<String>,
) -> StepResult {
    if state.turn != side || state.phase != Phase::Play {
        return StepResult::Rejected(Notice::OutOfTurn);
    }

    let player = state.side(side);
    let Some(card) = player.hand_card(card_id) else {
        return StepResult::Rejected(Notice::CardNotInHand);
    };

    if !card.is_affordable(player.energy) {
        return StepResult::Rejected(Notice::NotEnoughEnergy {
            required: card.energy_cost,
            available: player.energy,
        });
    }

    // Stun does not wear off here; it only decays on the draw tick.
    if player.is_stunned() {
        state.battle_log.push(format!(
            "{} stunned and cannot play a card this turn.",
            side.be_phrase()
        ));
        yield_turn(state, side.opponent());
        debug!(?side, "stunned, turn forfeited");
        return StepResult::Advisory(Notice::Stunned);
    }

    let (own, opponent) = state.sides_mut(side);
    let Some(card) = own.take_from_hand(card_id) else {
        return StepResult::Rejected(Notice::CardNotInHand);
    };

    let played = {
        let mut cards_to_check: Vec<_> = own.discard_pile.iter().collect();
        cards_to_check.extend(own.field.as_ref());
        if synergy_triggers(&card, &cards_to_check) {
            debug!(?side, card = %card.name, "synergy triggered");
        }
        apply_synergies(&card, &cards_to_check)
    };

    // The displaced card stays available to later synergy checks.
    if let Some(displaced) = own.field.take() {
        own.discard_pile.push(displaced);
    }
    own.field = Some(played);
    own.energy -= card.energy_cost;
    own.combo += 1;
    let go_to_battle = opponent.field.is_some();

    let mut messages = vec![headline.unwrap_or_else(|| {
        format!(
            "{} played {} ({} type).",
            side.subject(),
            card.name,
            card.element.label()
        )
    })];

    if go_to_battle {
        messages.push("Both players have played a card. Battle phase begins!".to_string());
        enter_phase(state, Phase::Battle);
    } else {
        state.turn = side.opponent();
        enter_phase(state, Phase::Play);
    }
    state.battle_log.push_batch(messages);

    debug!(?side, card = %card.name, cost = card.energy_cost, battle = go_to_battle, "card played");
    StepResult::Continue
}

fn pass_turn(state: &mut GameState) -> StepResult {
    if state.turn != Side::Player || state.phase != Phase::Play {
        return StepResult::Rejected(Notice::OutOfTurn);
    }
    state.battle_log.push("You passed your turn.");
    yield_turn(state, Side::Computer);
    debug!("player passed");
    StepResult::Continue
}

// ---------------------------------------------------------------------------
// Special power
// ---------------------------------------------------------------------------

fn use_special_power(state: &mut GameState, side: Side) -> StepResult {
    if state.turn != side {
        return StepResult::Rejected(Notice::OutOfTurn);
    }
    let max_power = state.config.max_power;
    let power = state.side(side).power;
    if power < max_power {
        return StepResult::Rejected(Notice::PowerNotFull {
            power,
            required: max_power,
        });
    }

    let damage = state.config.special_power_damage;
    let (own, opponent) = state.sides_mut(side);
    own.power = 0;
    opponent.health = opponent.health.saturating_sub(damage);

    // The player's power stuns, the computer's poisons.
    let message = match side {
        Side::Player => {
            opponent.status_effects.push(StatusEffect::stun(1));
            format!(
                "You used your SPECIAL POWER! Dealt {} damage and stunned the computer!",
                damage
            )
        }
        Side::Computer => {
            opponent.status_effects.push(StatusEffect::poison(2, 2));
            format!(
                "Computer used its SPECIAL POWER! Dealt {} damage and poisoned you!",
                damage
            )
        }
    };

    state.battle_log.push(message);
    set_animation(state, Animation::Special);
    info!(?side, damage, "special power used");
    StepResult::Continue
}

// ---------------------------------------------------------------------------
// Scheduled continuations
// ---------------------------------------------------------------------------

/// One second off the player's timer; at zero the turn resolves itself.
fn tick(state: &mut GameState) -> StepResult {
    if state.turn != Side::Player || state.phase != Phase::Play {
        return StepResult::Rejected(Notice::Stale);
    }

    state.time_left = state.time_left.saturating_sub(1);
    trace!(time_left = state.time_left, "timer tick");
    if state.time_left > 0 {
        return StepResult::Continue;
    }

    match state.player.best_value_card().map(|c| (c.id, c.name.clone())) {
        Some((card_id, name)) => {
            let headline = format!("Time's up! {} was automatically played for you.", name);
            place_card(state, Side::Player, card_id, Some(headline));
        }
        None => {
            state
                .battle_log
                .push("Time's up! You had no playable cards and passed your turn.");
            yield_turn(state, Side::Computer);
        }
    }
    debug!("turn timer expired");
    StepResult::Advisory(Notice::TimeUp)
}

/// The computer's decision once it reaches its play phase.
fn computer_turn(state: &mut GameState, rng: &mut GameRng) -> StepResult {
    if state.turn != Side::Computer || state.phase != Phase::Play {
        return StepResult::Rejected(Notice::Stale);
    }

    if state.computer.is_stunned() {
        state
            .battle_log
            .push("Computer is stunned and skips their turn!");
        yield_turn(state, Side::Player);
        debug!("computer stunned, turn skipped");
        return StepResult::Continue;
    }

    if state.computer.power >= state.config.max_power {
        use_special_power(state, Side::Computer);
        yield_turn(state, Side::Player);
        return StepResult::Continue;
    }

    let difficulty = state.settings.ai_difficulty;
    let choice = get_computer_move(&state.computer, state.player.field.as_ref(), difficulty, rng)
        .map(|c| c.id);

    match choice {
        Some(card_id) => {
            debug!(?difficulty, %card_id, "computer chose a card");
            play_card(state, Side::Computer, card_id)
        }
        None => {
            state.battle_log.push("Computer passes their turn.");
            yield_turn(state, Side::Player);
            debug!(?difficulty, "computer passed");
            StepResult::Continue
        }
    }
}

fn resolve_battle(state: &mut GameState, rng: &mut GameRng) -> StepResult {
    if state.phase != Phase::Battle || state.battle_result.is_some() {
        return StepResult::Rejected(Notice::Stale);
    }
    let (Some(player_card), Some(computer_card)) = (&state.player.field, &state.computer.field)
    else {
        return StepResult::Rejected(Notice::Stale);
    };

    let exchange = resolve_exchange(player_card, computer_card, rng);
    let mut messages = Vec::new();

    for (side, multiplier, own, other) in [
        (Side::Player, exchange.player_multiplier, player_card, computer_card),
        (Side::Computer, exchange.computer_multiplier, computer_card, player_card),
    ] {
        if multiplier > 1.0 {
            messages.push(format!(
                "{} {} card is super effective against {}! ({}x damage)",
                side.possessive(),
                own.element.label(),
                other.element.label(),
                multiplier
            ));
        } else if multiplier < 1.0 {
            messages.push(format!(
                "{} {} card is not very effective against {}. ({}x damage)",
                side.possessive(),
                own.element.label(),
                other.element.label(),
                multiplier
            ));
        }
    }

    if exchange.player_critical {
        messages.push("CRITICAL HIT! Your attack deals 1.5x damage!".to_string());
    }
    if exchange.computer_critical {
        messages.push("CRITICAL HIT! Computer's attack deals 1.5x damage!".to_string());
    }
    if exchange.player_counter > 0 {
        messages.push(format!(
            "Your card counters with {} damage!",
            exchange.player_counter
        ));
    }
    if exchange.computer_counter > 0 {
        messages.push(format!(
            "Computer's card counters with {} damage!",
            exchange.computer_counter
        ));
    }

    let result = BattleResult {
        player_damage: exchange.damage_to_player(),
        computer_damage: exchange.damage_to_computer(),
        player_advantage: exchange.player_multiplier > 1.0,
        computer_advantage: exchange.computer_multiplier > 1.0,
        critical_hit: if exchange.player_critical {
            Some(Side::Player)
        } else if exchange.computer_critical {
            Some(Side::Computer)
        } else {
            None
        },
    };

    messages.push(format!(
        "You dealt {} damage to the computer.",
        result.computer_damage
    ));
    messages.push(format!(
        "Computer dealt {} damage to you.",
        result.player_damage
    ));

    state.battle_log.push_batch(messages);
    state.battle_result = Some(result);
    set_animation(state, Animation::Attack);
    debug!(
        player_damage = result.player_damage,
        computer_damage = result.computer_damage,
        critical = ?result.critical_hit,
        "battle resolved"
    );
    StepResult::Continue
}

/// Apply a resolved battle. Runs at most once per battle: the stored result
/// is consumed here.
fn apply_battle_result(state: &mut GameState) -> StepResult {
    if !state.fields_engaged() {
        return StepResult::Rejected(Notice::Stale);
    }
    let Some(result) = state.battle_result.take() else {
        return StepResult::Rejected(Notice::Stale);
    };

    let caps = state.caps();
    let (player, computer) = state.sides_mut(Side::Player);

    player.health = player.health.saturating_sub(result.player_damage);
    computer.health = computer.health.saturating_sub(result.computer_damage);

    let (Some(player_card), Some(computer_card)) = (player.field.take(), computer.field.take())
    else {
        return StepResult::Rejected(Notice::Stale);
    };

    let mut messages = Vec::new();
    messages.extend(apply_special_effect(&player_card, Side::Player, player, computer, caps));
    messages.extend(apply_special_effect(&computer_card, Side::Computer, computer, player, caps));

    player.discard_pile.push(player_card);
    computer.discard_pile.push(computer_card);

    for side in [&mut *player, &mut *computer] {
        side.health = side.health.min(caps.max_health);
        side.combo = 0;
    }
    let (player_health, computer_health) = (player.health, computer.health);

    state.battle_log.push_batch(messages);
    state.animation = None;
    yield_turn(state, Side::Player);
    debug!(player_health, computer_health, "battle applied");
    StepResult::Continue
}

// ---------------------------------------------------------------------------
// Game over
// ---------------------------------------------------------------------------

/// Detect a knockout. The player is checked first, so a double knockout is
/// a computer win.
fn check_game_over(state: &mut GameState) -> Option<Side> {
    if state.is_terminal() {
        return None;
    }

    let winner = if state.player.health == 0 {
        Side::Computer
    } else if state.computer.health == 0 {
        Side::Player
    } else {
        return None;
    };

    state.game_over = true;
    state.winner = Some(winner);
    state.phase = Phase::End;
    info!(?winner, "game over");
    Some(winner)
}
