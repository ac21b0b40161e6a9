use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::data::card::Card;
use crate::data::loader::GameConfig;
use crate::effects::mechanics::{StatusEffect, StatusKind};
use crate::effects::status::Caps;

/// One of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Computer => "computer",
        }
    }

    // Battle log phrasing. The human is addressed in the second person.

    pub fn subject(self) -> &'static str {
        match self {
            Side::Player => "You",
            Side::Computer => "Computer",
        }
    }

    pub fn possessive(self) -> &'static str {
        match self {
            Side::Player => "Your",
            Side::Computer => "Computer's",
        }
    }

    pub fn object(self) -> &'static str {
        match self {
            Side::Player => "you",
            Side::Computer => "the computer",
        }
    }

    pub fn self_object(self) -> &'static str {
        match self {
            Side::Player => "you",
            Side::Computer => "it",
        }
    }

    pub fn object_possessive(self) -> &'static str {
        match self {
            Side::Player => "your",
            Side::Computer => "its",
        }
    }

    pub fn take_phrase(self) -> &'static str {
        match self {
            Side::Player => "You take",
            Side::Computer => "Computer takes",
        }
    }

    pub fn be_phrase(self) -> &'static str {
        match self {
            Side::Player => "You are",
            Side::Computer => "Computer is",
        }
    }
}

/// Current phase of the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Decks are being built and hands dealt.
    Setup,
    /// The turn owner draws, gains energy and power, and ticks statuses.
    Draw,
    /// The turn owner plays a card or passes.
    Play,
    /// Both fields are occupied; the exchange is being resolved.
    Battle,
    /// Game over.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub ai_difficulty: AiDifficulty,
    pub tutorial_completed: bool,
    pub sound_enabled: bool,
    pub animations_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ai_difficulty: AiDifficulty::Medium,
            tutorial_completed: false,
            sound_enabled: false,
            animations_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TutorialStep {
    #[default]
    Welcome,
    Cards,
    Types,
    Energy,
    Battle,
    Special,
    Status,
    Complete,
}

impl TutorialStep {
    const ORDER: [TutorialStep; 8] = [
        TutorialStep::Welcome,
        TutorialStep::Cards,
        TutorialStep::Types,
        TutorialStep::Energy,
        TutorialStep::Battle,
        TutorialStep::Special,
        TutorialStep::Status,
        TutorialStep::Complete,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// The following step; `Complete` is terminal.
    pub fn next(self) -> TutorialStep {
        Self::ORDER
            .get(self.position() + 1)
            .copied()
            .unwrap_or(TutorialStep::Complete)
    }

    /// The preceding step; `Welcome` is the first.
    pub fn previous(self) -> TutorialStep {
        match self.position() {
            0 => TutorialStep::Welcome,
            n => Self::ORDER[n - 1],
        }
    }
}

/// Tutorial overlay. While active, the turn cycle is suspended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialState {
    pub active: bool,
    pub step: TutorialStep,
}

/// Transient presentation marker; the rules never read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Animation {
    Attack,
    Special,
    StatusEffect,
}

/// Resolved but not yet applied battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    /// Damage the player will take.
    pub player_damage: u32,
    /// Damage the computer will take.
    pub computer_damage: u32,
    pub player_advantage: bool,
    pub computer_advantage: bool,
    /// The player wins ties when both sides crit.
    pub critical_hit: Option<Side>,
}

/// Bounded battle log, newest entry first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    entries: Vec<String>,
    capacity: usize,
}

impl BattleLog {
    pub fn new(capacity: usize) -> Self {
        BattleLog {
            entries: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Prepend one line.
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.insert(0, message.into());
        self.entries.truncate(self.capacity);
    }

    /// Prepend a batch, keeping the batch's own order at the front.
    pub fn push_batch<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut merged: Vec<String> = messages.into_iter().collect();
        merged.append(&mut self.entries);
        merged.truncate(self.capacity);
        self.entries = merged;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.first().map(|s| s.as_str())
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// State for one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub health: u32,
    pub energy: u32,
    pub power: u32,
    /// Remaining deck; cards are drawn from the front.
    pub deck: Vec<Card>,
    pub hand: Vec<Card>,
    /// The card in play awaiting or undergoing battle.
    pub field: Option<Card>,
    pub status_effects: Vec<StatusEffect>,
    pub discard_pile: Vec<Card>,
    /// Plays since the last battle resolution.
    pub combo: u32,
}

impl PlayerState {
    pub fn new(config: &GameConfig) -> Self {
        PlayerState {
            health: config.starting_health,
            energy: config.starting_energy,
            power: 0,
            deck: Vec::new(),
            hand: Vec::new(),
            field: None,
            status_effects: Vec::new(),
            discard_pile: Vec::new(),
            combo: 0,
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.has_status(StatusKind::Stun)
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.status_effects.iter().any(|e| e.kind == kind)
    }

    pub fn hand_card(&self, id: Uuid) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == id)
    }

    /// Remove a card from hand by id, keeping the order of the rest.
    pub fn take_from_hand(&mut self, id: Uuid) -> Option<Card> {
        let idx = self.hand.iter().position(|c| c.id == id)?;
        Some(self.hand.remove(idx))
    }

    pub fn affordable_cards(&self) -> impl Iterator<Item = &Card> {
        self.hand.iter().filter(move |c| c.is_affordable(self.energy))
    }

    /// Best (attack + defense) / cost among affordable cards; first wins ties.
    pub fn best_value_card(&self) -> Option<&Card> {
        let mut best: Option<&Card> = None;
        for card in self.affordable_cards() {
            match best {
                Some(current) if card.value_ratio() <= current.value_ratio() => {}
                _ => best = Some(card),
            }
        }
        best
    }
}

/// Complete game state. The single source of truth for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: PlayerState,
    pub computer: PlayerState,
    pub turn: Side,
    pub phase: Phase,
    /// Seconds left on the player's turn timer.
    pub time_left: u32,
    pub game_over: bool,
    pub winner: Option<Side>,
    pub battle_log: BattleLog,
    pub animation: Option<Animation>,
    pub battle_result: Option<BattleResult>,
    pub settings: Settings,
    pub tutorial: TutorialState,
    pub config: GameConfig,
}

impl GameState {
    /// A fresh state in `Setup`, before decks are built.
    pub fn empty(config: GameConfig, settings: Settings) -> Self {
        GameState {
            player: PlayerState::new(&config),
            computer: PlayerState::new(&config),
            turn: Side::Player,
            phase: Phase::Setup,
            time_left: config.turn_seconds,
            game_over: false,
            winner: None,
            battle_log: BattleLog::new(config.battle_log_capacity),
            animation: None,
            battle_result: None,
            settings,
            tutorial: TutorialState::default(),
            config,
        }
    }

    pub fn side(&self, side: Side) -> &PlayerState {
        match side {
            Side::Player => &self.player,
            Side::Computer => &self.computer,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut PlayerState {
        match side {
            Side::Player => &mut self.player,
            Side::Computer => &mut self.computer,
        }
    }

    /// Mutable access to `side` and its opponent at once.
    pub fn sides_mut(&mut self, side: Side) -> (&mut PlayerState, &mut PlayerState) {
        match side {
            Side::Player => (&mut self.player, &mut self.computer),
            Side::Computer => (&mut self.computer, &mut self.player),
        }
    }

    /// Game over: only reset, settings and tutorial intents still apply.
    pub fn is_terminal(&self) -> bool {
        self.game_over
    }

    /// Both fields occupied: the only condition under which battle may start.
    pub fn fields_engaged(&self) -> bool {
        self.player.field.is_some() && self.computer.field.is_some()
    }

    pub fn caps(&self) -> Caps {
        Caps {
            max_health: self.config.max_health,
            max_energy: self.config.max_energy,
            max_power: self.config.max_power,
        }
    }

    pub(crate) fn reset_timer(&mut self) {
        self.time_left = self.config.turn_seconds;
    }
}
