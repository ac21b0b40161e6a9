//! Virtual-time pacing for the turn cycle.
//!
//! The reducer never waits. Instead, after every applied action the
//! scheduler looks at the state and decides which delayed continuations it
//! calls for (the computer's draw, the battle resolution, the timer tick,
//! ...). Time only moves when the owner calls [`Scheduler::pop_due`] with a
//! target instant, so tests can step through a whole game without sleeping.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::actions::Action;
use crate::game::state::{Animation, GameState, Phase, Side};

/// A delayed follow-up the state machine schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Continuation {
    ComputerDraw,
    ComputerTurn,
    ResolveBattle,
    ApplyBattleResult,
    ClearAnimation,
    Tick,
}

impl Continuation {
    /// The intent issued when this continuation comes due.
    pub fn action(self) -> Action {
        match self {
            Continuation::ComputerDraw => Action::DrawCard {
                side: Side::Computer,
            },
            Continuation::ComputerTurn => Action::ComputerTurn,
            Continuation::ResolveBattle => Action::ResolveBattle,
            Continuation::ApplyBattleResult => Action::ApplyBattleResult,
            Continuation::ClearAnimation => Action::ClearAnimation,
            Continuation::Tick => Action::Tick,
        }
    }
}

/// A continuation waiting for its due time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub continuation: Continuation,
    pub due: Duration,
    seq: u64,
}

/// Continuations the state currently calls for, with their delays.
pub fn desired_continuations(state: &GameState) -> Vec<(Continuation, Duration)> {
    let delays = &state.config.delays;
    let ms = Duration::from_millis;
    let mut wanted = Vec::new();

    match state.animation {
        Some(Animation::Special) => {
            wanted.push((Continuation::ClearAnimation, ms(delays.special_animation_ms)))
        }
        Some(Animation::StatusEffect) => {
            wanted.push((Continuation::ClearAnimation, ms(delays.status_animation_ms)))
        }
        // The attack marker is cleared when the battle is applied.
        Some(Animation::Attack) | None => {}
    }

    if state.is_terminal() || state.tutorial.active {
        return wanted;
    }

    match (state.turn, state.phase) {
        (Side::Computer, Phase::Draw) => {
            wanted.push((Continuation::ComputerDraw, ms(delays.computer_draw_ms)))
        }
        (Side::Computer, Phase::Play) => {
            wanted.push((Continuation::ComputerTurn, ms(delays.computer_play_ms)))
        }
        (Side::Player, Phase::Play) => wanted.push((Continuation::Tick, ms(delays.tick_ms))),
        _ => {}
    }

    if state.phase == Phase::Battle {
        if state.battle_result.is_some() {
            wanted.push((Continuation::ApplyBattleResult, ms(delays.battle_apply_ms)));
        } else if state.fields_engaged() {
            wanted.push((Continuation::ResolveBattle, ms(delays.battle_start_ms)));
        }
    }

    wanted
}

/// Pending continuation queue on a virtual clock.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> impl Iterator<Item = &Scheduled> {
        self.pending.iter()
    }

    pub fn is_pending(&self, continuation: Continuation) -> bool {
        self.pending.iter().any(|s| s.continuation == continuation)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Bring the queue in line with `state`.
    ///
    /// Continuations the state no longer calls for are dropped, missing ones
    /// are scheduled from now, and ones already pending keep their due time.
    pub fn reconcile(&mut self, state: &GameState) {
        let wanted = desired_continuations(state);

        self.pending
            .retain(|s| wanted.iter().any(|(c, _)| *c == s.continuation));

        for (continuation, delay) in wanted {
            if !self.is_pending(continuation) {
                let due = self.now + delay;
                self.pending.push(Scheduled {
                    continuation,
                    due,
                    seq: self.next_seq,
                });
                self.next_seq += 1;
            }
        }
    }

    /// Due time of the earliest pending continuation.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|s| s.due).min()
    }

    /// Remove and return the earliest continuation due at or before `until`,
    /// moving the clock to its due time. Ties go to the one scheduled first.
    pub fn pop_due(&mut self, until: Duration) -> Option<Continuation> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= until)
            .min_by_key(|(_, s)| (s.due, s.seq))
            .map(|(i, _)| i)?;

        let fired = self.pending.remove(idx);
        self.now = self.now.max(fired.due);
        debug!(continuation = ?fired.continuation, at_ms = self.now.as_millis() as u64, "continuation due");
        Some(fired.continuation)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}
