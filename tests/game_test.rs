mod common;

use common::*;
use duelforge_engine::data::card::*;
use duelforge_engine::data::loader::GameConfig;
use duelforge_engine::effects::mechanics::{StatusEffect, StatusKind};
use duelforge_engine::game::actions::{legal_actions, Action};
use duelforge_engine::game::engine::{apply_action, new_game, new_game_with, transition, Notice, StepResult};
use duelforge_engine::game::rng::GameRng;
use duelforge_engine::game::state::*;

fn play(side: Side, card: &Card) -> Action {
    Action::PlayCard {
        side,
        card_id: card.id,
    }
}

#[test]
fn test_setup_deals_hands() {
    let (state, _rng) = new_game(42);
    assert_eq!(state.phase, Phase::Draw);
    assert_eq!(state.turn, Side::Player);
    for side in [Side::Player, Side::Computer] {
        assert_eq!(state.side(side).hand.len(), 5);
        assert_eq!(state.side(side).deck.len(), 15);
        assert_eq!(state.side(side).health, 50);
        assert_eq!(state.side(side).energy, 3);
    }
    assert_eq!(
        state.battle_log.latest(),
        Some("Game started! Draw your first card to begin.")
    );
}

#[test]
fn test_full_round_scenario() {
    let settings = Settings {
        ai_difficulty: AiDifficulty::Easy,
        ..Settings::default()
    };
    let (mut state, mut rng) = new_game_with(GameConfig::default(), settings, 7);

    let result = apply_action(&mut state, &Action::DrawCard { side: Side::Player }, &mut rng);
    assert_eq!(result, StepResult::Continue);
    assert_eq!(state.player.energy, 4);
    assert_eq!(state.player.power, 10);
    assert_eq!(state.player.hand.len(), 6);
    assert_eq!(state.phase, Phase::Play);

    let three_cost = make_card("Blaze", ElementType::Fire, 10, 3, 3);
    state.player.hand.push(three_cost.clone());
    let result = apply_action(&mut state, &play(Side::Player, &three_cost), &mut rng);
    assert_eq!(result, StepResult::Continue);
    assert_eq!(state.phase, Phase::Play);
    assert_eq!(state.turn, Side::Computer);
    assert_eq!(state.player.energy, 1);
    assert_eq!(state.player.combo, 1);
    assert_eq!(state.player.field.as_ref().map(|c| c.id), Some(three_cost.id));

    state.computer.hand = vec![make_card("Frost", ElementType::Ice, 3, 1, 2)];
    apply_action(&mut state, &Action::ComputerTurn, &mut rng);
    assert_eq!(state.phase, Phase::Battle);
    assert!(state.fields_engaged());
    assert_eq!(
        state.battle_log.entries()[..2],
        [
            "Computer played Frost (ice type).".to_string(),
            "Both players have played a card. Battle phase begins!".to_string(),
        ]
    );

    apply_action(&mut state, &Action::ResolveBattle, &mut rng);
    let result = state.battle_result.expect("battle resolved");
    assert!(result.player_advantage);
    assert!(!result.computer_advantage);
    assert_eq!(state.animation, Some(Animation::Attack));
    assert!(state
        .battle_log
        .contains("Your fire card is super effective against ice! (1.5x damage)"));

    apply_action(&mut state, &Action::ApplyBattleResult, &mut rng);
    assert_eq!(state.player.health, 50 - result.player_damage);
    assert_eq!(state.computer.health, 50 - result.computer_damage);
    assert!(state.player.field.is_none());
    assert!(state.computer.field.is_none());
    assert_eq!(state.player.discard_pile.len(), 1);
    assert_eq!(state.computer.discard_pile.len(), 1);
    assert_eq!(state.player.combo, 0);
    assert_eq!(state.computer.combo, 0);
    assert!(state.battle_result.is_none());
    assert!(state.animation.is_none());
    assert_eq!(state.turn, Side::Player);
    assert_eq!(state.phase, Phase::Draw);
    assert_eq!(state.time_left, 30);
}

#[test]
fn test_battle_applies_only_once() {
    let mut state = blank_state();
    state.phase = Phase::Battle;
    state.player.field = Some(make_card("P", ElementType::Earth, 4, 1, 2));
    state.computer.field = Some(make_card("C", ElementType::Earth, 4, 1, 2));
    let mut rng = GameRng::new(3);

    apply_action(&mut state, &Action::ResolveBattle, &mut rng);
    assert_eq!(
        apply_action(&mut state, &Action::ResolveBattle, &mut rng),
        StepResult::Rejected(Notice::Stale)
    );
    apply_action(&mut state, &Action::ApplyBattleResult, &mut rng);
    let health = state.player.health;
    assert_eq!(
        apply_action(&mut state, &Action::ApplyBattleResult, &mut rng),
        StepResult::Rejected(Notice::Stale)
    );
    assert_eq!(state.player.health, health);
}

#[test]
fn test_not_enough_energy_leaves_state_untouched() {
    let mut state = blank_state();
    let pricey = make_card("Pricey", ElementType::Fire, 8, 8, 8);
    state.player.hand.push(pricey.clone());
    let before = state.clone();
    let mut rng = GameRng::new(1);

    let result = apply_action(&mut state, &play(Side::Player, &pricey), &mut rng);
    assert_eq!(
        result,
        StepResult::Rejected(Notice::NotEnoughEnergy {
            required: 8,
            available: 3
        })
    );
    assert!(!result.is_applied());
    assert_eq!(state, before);
    assert_eq!(
        result.notice().map(|n| n.to_string()).as_deref(),
        Some("Not enough energy! This card requires 8 energy. You have 3.")
    );
}

#[test]
fn test_stunned_play_forces_pass() {
    let mut state = blank_state();
    let card = make_card("Spark", ElementType::Electric, 2, 1, 2);
    state.player.hand.push(card.clone());
    state.player.status_effects.push(StatusEffect::stun(1));
    let mut rng = GameRng::new(1);

    let result = apply_action(&mut state, &play(Side::Player, &card), &mut rng);
    assert_eq!(result, StepResult::Advisory(Notice::Stunned));
    assert_eq!(state.turn, Side::Computer);
    assert_eq!(state.phase, Phase::Draw);
    assert_eq!(state.player.hand.len(), 1);
    assert!(state.player.is_stunned());
    assert_eq!(
        state.battle_log.latest(),
        Some("You are stunned and cannot play a card this turn.")
    );
}

#[test]
fn test_stun_wears_off_on_owners_draw() {
    let mut state = blank_state();
    state.phase = Phase::Draw;
    state.player.deck = filler_deck(3);
    state.player.status_effects.push(StatusEffect::stun(1));
    let mut rng = GameRng::new(1);

    apply_action(&mut state, &Action::DrawCard { side: Side::Player }, &mut rng);
    assert!(!state.player.is_stunned());
    assert!(state.battle_log.contains("Your stun effect has worn off."));
}

#[test]
fn test_play_out_of_turn_rejected() {
    let mut state = blank_state();
    state.turn = Side::Computer;
    let card = make_card("X", ElementType::Fire, 1, 1, 2);
    state.player.hand.push(card.clone());
    let mut rng = GameRng::new(1);

    assert_eq!(
        apply_action(&mut state, &play(Side::Player, &card), &mut rng),
        StepResult::Rejected(Notice::OutOfTurn)
    );
    state.turn = Side::Player;
    let missing = make_card("Missing", ElementType::Fire, 1, 1, 2);
    assert_eq!(
        apply_action(&mut state, &play(Side::Player, &missing), &mut rng),
        StepResult::Rejected(Notice::CardNotInHand)
    );
}

#[test]
fn test_synergy_from_discard_pile() {
    let mut state = blank_state();
    state.player.discard_pile.push(make_card("Old Ice", ElementType::Ice, 1, 1, 2));
    let mut card = make_card("Synergist", ElementType::Fire, 3, 1, 2);
    card.synergy = Some(Synergy {
        trigger: ElementType::Ice,
        bonus: SynergyBonus::Defense,
        value: 2,
    });
    state.player.hand.push(card.clone());
    let mut rng = GameRng::new(1);

    apply_action(&mut state, &play(Side::Player, &card), &mut rng);
    assert_eq!(state.player.field.as_ref().map(|c| c.defense), Some(3));
}

#[test]
fn test_replaying_moves_old_field_to_discard() {
    let mut state = blank_state();
    let first = make_card("First", ElementType::Fire, 1, 1, 2);
    state.player.field = Some(first.clone());
    let second = make_card("Second", ElementType::Water, 1, 1, 2);
    state.player.hand.push(second.clone());
    let mut rng = GameRng::new(1);

    apply_action(&mut state, &play(Side::Player, &second), &mut rng);
    assert_eq!(state.player.discard_pile, vec![first]);
    assert_eq!(state.player.field.as_ref().map(|c| c.id), Some(second.id));
}

#[test]
fn test_displaced_field_card_feeds_later_synergy() {
    let mut state = blank_state();
    state.player.energy = 6;
    state.player.field = Some(make_card("Ember", ElementType::Fire, 1, 1, 2));
    let second = make_card("Ripple", ElementType::Water, 1, 1, 2);
    let mut third = make_card("Kindled", ElementType::Wind, 2, 1, 2);
    third.synergy = Some(Synergy {
        trigger: ElementType::Fire,
        bonus: SynergyBonus::Attack,
        value: 3,
    });
    state.player.hand = vec![second.clone(), third.clone()];
    let mut rng = GameRng::new(1);

    apply_action(&mut state, &play(Side::Player, &second), &mut rng);
    state.turn = Side::Player;
    state.phase = Phase::Play;
    apply_action(&mut state, &play(Side::Player, &third), &mut rng);

    assert_eq!(state.player.field.as_ref().map(|c| c.attack), Some(5));
    assert_eq!(state.player.discard_pile.len(), 2);
}

#[test]
fn test_draw_adds_regen_and_caps() {
    let mut state = blank_state();
    state.phase = Phase::Draw;
    state.player.deck = filler_deck(2);
    state.player.energy = 9;
    state.player.power = 95;
    state.player.field = Some(with_passive(
        make_card("Battery", ElementType::Electric, 1, 1, 2),
        duelforge_engine::effects::mechanics::PassiveEffect::EnergyRegen,
        1,
    ));
    let mut rng = GameRng::new(1);

    apply_action(&mut state, &Action::DrawCard { side: Side::Player }, &mut rng);
    assert_eq!(state.player.energy, 10);
    assert_eq!(state.player.power, 100);
    assert_eq!(state.player.deck.len(), 1);
}

#[test]
fn test_empty_deck_regenerates_and_draws() {
    let mut state = blank_state();
    state.phase = Phase::Draw;
    let mut rng = GameRng::new(5);

    let result = apply_action(&mut state, &Action::DrawCard { side: Side::Player }, &mut rng);
    assert_eq!(result, StepResult::Advisory(Notice::DeckRegenerated));
    assert_eq!(state.player.deck.len(), 19);
    assert_eq!(state.player.hand.len(), 1);
    assert!(state
        .battle_log
        .contains("Your deck is empty! Reshuffling discarded cards..."));
    assert_eq!(state.phase, Phase::Play);
}

#[test]
fn test_poison_tick_sets_status_animation() {
    let mut state = blank_state();
    state.phase = Phase::Draw;
    state.player.deck = filler_deck(1);
    state.player.status_effects.push(StatusEffect::poison(2, 2));
    let mut rng = GameRng::new(1);

    apply_action(&mut state, &Action::DrawCard { side: Side::Player }, &mut rng);
    assert_eq!(state.player.health, 48);
    assert_eq!(state.animation, Some(Animation::StatusEffect));
    assert_eq!(
        state.battle_log.entries()[..2],
        [
            "You drew a card. Play a card or pass your turn.".to_string(),
            "You take 2 damage from poison.".to_string(),
        ]
    );
}

#[test]
fn test_player_special_power() {
    let mut state = blank_state();
    state.player.power = 90;
    let mut rng = GameRng::new(1);

    assert_eq!(
        apply_action(&mut state, &Action::UseSpecialPower { side: Side::Player }, &mut rng),
        StepResult::Rejected(Notice::PowerNotFull {
            power: 90,
            required: 100
        })
    );

    state.player.power = 100;
    let result = apply_action(&mut state, &Action::UseSpecialPower { side: Side::Player }, &mut rng);
    assert_eq!(result, StepResult::Continue);
    assert_eq!(state.computer.health, 40);
    assert!(state.computer.is_stunned());
    assert_eq!(state.player.power, 0);
    assert_eq!(state.animation, Some(Animation::Special));
    assert_eq!(state.turn, Side::Player);
    assert_eq!(state.phase, Phase::Play);
}

#[test]
fn test_computer_turn_uses_full_power_meter() {
    let mut state = blank_state();
    state.turn = Side::Computer;
    state.computer.power = 100;
    let mut rng = GameRng::new(1);

    apply_action(&mut state, &Action::ComputerTurn, &mut rng);
    assert_eq!(state.player.health, 40);
    assert!(state.player.has_status(StatusKind::Poison));
    assert_eq!(state.computer.power, 0);
    assert_eq!(state.turn, Side::Player);
    assert_eq!(state.phase, Phase::Draw);
    assert_eq!(
        state.battle_log.latest(),
        Some("Computer used its SPECIAL POWER! Dealt 10 damage and poisoned you!")
    );
}

#[test]
fn test_stunned_computer_skips_turn() {
    let mut state = blank_state();
    state.turn = Side::Computer;
    state.computer.hand.push(make_card("C", ElementType::Fire, 1, 1, 2));
    state.computer.status_effects.push(StatusEffect::stun(1));
    let mut rng = GameRng::new(1);

    apply_action(&mut state, &Action::ComputerTurn, &mut rng);
    assert_eq!(state.computer.hand.len(), 1);
    assert_eq!(state.turn, Side::Player);
    assert_eq!(state.phase, Phase::Draw);
    assert_eq!(state.battle_log.latest(), Some("Computer is stunned and skips their turn!"));
}

#[test]
fn test_computer_passes_without_playable_cards() {
    let mut state = blank_state();
    state.turn = Side::Computer;
    state.computer.hand.push(make_card("Heavy", ElementType::Fire, 9, 9, 8));
    let mut rng = GameRng::new(1);

    apply_action(&mut state, &Action::ComputerTurn, &mut rng);
    assert_eq!(state.battle_log.latest(), Some("Computer passes their turn."));
    assert_eq!(state.turn, Side::Player);
}

#[test]
fn test_timer_auto_plays_best_card() {
    let mut state = blank_state();
    state.time_left = 2;
    let low = make_card("Low", ElementType::Fire, 1, 1, 3);
    let best = make_card("Best", ElementType::Water, 4, 2, 2);
    state.player.hand = vec![low, best.clone()];
    let mut rng = GameRng::new(1);

    assert_eq!(apply_action(&mut state, &Action::Tick, &mut rng), StepResult::Continue);
    assert_eq!(state.time_left, 1);

    let result = apply_action(&mut state, &Action::Tick, &mut rng);
    assert_eq!(result, StepResult::Advisory(Notice::TimeUp));
    assert_eq!(state.player.field.as_ref().map(|c| c.id), Some(best.id));
    assert_eq!(
        state.battle_log.latest(),
        Some("Time's up! Best was automatically played for you.")
    );
    assert!(!state.battle_log.contains("You played Best"));
    assert_eq!(state.turn, Side::Computer);
    assert_eq!(state.time_left, 30);
}

#[test]
fn test_timer_passes_without_playable_cards() {
    let mut state = blank_state();
    state.time_left = 1;
    state.player.hand = vec![make_card("Heavy", ElementType::Fire, 9, 9, 8)];
    let mut rng = GameRng::new(1);

    apply_action(&mut state, &Action::Tick, &mut rng);
    assert_eq!(state.turn, Side::Computer);
    assert_eq!(state.phase, Phase::Draw);
    assert_eq!(
        state.battle_log.latest(),
        Some("Time's up! You had no playable cards and passed your turn.")
    );
}

#[test]
fn test_game_over_clamps_and_blocks() {
    let mut state = blank_state();
    state.phase = Phase::Battle;
    state.player.health = 5;
    state.player.field = Some(make_card("P", ElementType::Earth, 1, 1, 2));
    state.computer.field = Some(make_card("C", ElementType::Earth, 1, 1, 2));
    state.battle_result = Some(BattleResult {
        player_damage: 12,
        computer_damage: 1,
        player_advantage: false,
        computer_advantage: false,
        critical_hit: None,
    });
    let mut rng = GameRng::new(1);

    let result = apply_action(&mut state, &Action::ApplyBattleResult, &mut rng);
    assert_eq!(result, StepResult::GameOver { winner: Side::Computer });
    assert!(state.game_over);
    assert_eq!(state.winner, Some(Side::Computer));
    assert_eq!(state.player.health, 0);
    assert_eq!(state.phase, Phase::End);
    assert!(legal_actions(&state).is_empty());

    assert_eq!(
        apply_action(&mut state, &Action::DrawCard { side: Side::Player }, &mut rng),
        StepResult::Rejected(Notice::GameAlreadyOver)
    );
    assert_eq!(
        apply_action(&mut state, &Action::ComputerTurn, &mut rng),
        StepResult::Rejected(Notice::GameAlreadyOver)
    );

    assert_eq!(apply_action(&mut state, &Action::ResetGame, &mut rng), StepResult::Continue);
    assert!(!state.game_over);
    assert_eq!(state.player.health, 50);
    assert_eq!(state.phase, Phase::Draw);
}

#[test]
fn test_double_knockout_is_a_player_loss() {
    let mut state = blank_state();
    state.phase = Phase::Draw;
    state.player.health = 10;
    state.player.status_effects.push(StatusEffect::poison(1, 10));
    state.computer.health = 0;
    state.player.deck = filler_deck(1);
    let mut rng = GameRng::new(1);

    let result = apply_action(&mut state, &Action::DrawCard { side: Side::Player }, &mut rng);
    assert_eq!(result, StepResult::GameOver { winner: Side::Computer });
    assert_eq!(state.winner, Some(Side::Computer));
}

#[test]
fn test_tutorial_suspends_gameplay() {
    let (mut state, mut rng) = new_game(3);
    apply_action(&mut state, &Action::StartTutorial, &mut rng);
    assert!(state.tutorial.active);
    assert_eq!(state.tutorial.step, TutorialStep::Welcome);
    assert_eq!(
        apply_action(&mut state, &Action::DrawCard { side: Side::Player }, &mut rng),
        StepResult::Rejected(Notice::TutorialActive)
    );
    assert!(legal_actions(&state).is_empty());

    let next = state.tutorial.step.next();
    apply_action(&mut state, &Action::SetTutorialStep { step: next }, &mut rng);
    assert_eq!(state.tutorial.step, TutorialStep::Cards);

    apply_action(&mut state, &Action::CompleteTutorial, &mut rng);
    assert!(!state.tutorial.active);
    assert!(state.settings.tutorial_completed);
    assert_eq!(
        apply_action(&mut state, &Action::DrawCard { side: Side::Player }, &mut rng),
        StepResult::Continue
    );
}

#[test]
fn test_tutorial_step_navigation() {
    assert_eq!(TutorialStep::Welcome.previous(), TutorialStep::Welcome);
    assert_eq!(TutorialStep::Status.next(), TutorialStep::Complete);
    assert_eq!(TutorialStep::Complete.next(), TutorialStep::Complete);
    assert_eq!(TutorialStep::Types.previous(), TutorialStep::Cards);
}

#[test]
fn test_reset_keeps_settings() {
    let (mut state, mut rng) = new_game(4);
    apply_action(&mut state, &Action::SetAiDifficulty { difficulty: AiDifficulty::Hard }, &mut rng);
    apply_action(&mut state, &Action::ToggleSound, &mut rng);
    apply_action(&mut state, &Action::ToggleAnimations, &mut rng);
    apply_action(&mut state, &Action::DrawCard { side: Side::Player }, &mut rng);

    apply_action(&mut state, &Action::ResetGame, &mut rng);
    assert_eq!(state.settings.ai_difficulty, AiDifficulty::Hard);
    assert!(state.settings.sound_enabled);
    assert!(!state.settings.animations_enabled);
    assert_eq!(state.player.hand.len(), 5);
    assert_eq!(state.player.energy, 3);
    assert_eq!(state.battle_log.len(), 1);
}

#[test]
fn test_legal_actions_follow_phase() {
    let mut state = blank_state();
    state.phase = Phase::Draw;
    assert_eq!(legal_actions(&state), vec![Action::DrawCard { side: Side::Player }]);

    state.phase = Phase::Play;
    let cheap = make_card("Cheap", ElementType::Fire, 1, 1, 2);
    let pricey = make_card("Pricey", ElementType::Fire, 8, 8, 8);
    state.player.hand = vec![cheap.clone(), pricey];
    state.player.power = 100;
    assert_eq!(
        legal_actions(&state),
        vec![
            play(Side::Player, &cheap),
            Action::PassTurn,
            Action::UseSpecialPower { side: Side::Player },
        ]
    );

    state.turn = Side::Computer;
    assert!(legal_actions(&state).is_empty());
}

#[test]
fn test_transition_is_pure() {
    let (state, mut rng) = new_game(9);
    let (next, result) = transition(&state, &Action::DrawCard { side: Side::Player }, &mut rng);
    assert_eq!(result, StepResult::Continue);
    assert_eq!(state.phase, Phase::Draw);
    assert_eq!(next.phase, Phase::Play);
}

#[test]
fn test_battle_log_keeps_newest_eight() {
    let mut log = BattleLog::new(8);
    for i in 0..10 {
        log.push(format!("line {}", i));
    }
    assert_eq!(log.len(), 8);
    assert_eq!(log.latest(), Some("line 9"));
    assert_eq!(log.entries().last().map(String::as_str), Some("line 2"));

    log.push_batch(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(log.entries()[..3], ["a".to_string(), "b".to_string(), "line 9".to_string()]);
    assert_eq!(log.len(), 8);
}

#[test]
fn test_same_seed_same_game() {
    let run = |seed| {
        let (mut state, mut rng) = new_game(seed);
        apply_action(&mut state, &Action::DrawCard { side: Side::Player }, &mut rng);
        state
    };
    assert_eq!(run(21), run(21));
}
