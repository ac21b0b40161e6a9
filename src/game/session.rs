use std::time::Duration;

use tracing::debug;

use crate::data::loader::GameConfig;
use crate::game::actions::{legal_actions, Action};
use crate::game::engine::{apply_action, new_game_with, Notice, StepResult};
use crate::game::rng::GameRng;
use crate::game::scheduler::{Continuation, Scheduler};
use crate::game::state::{GameState, Settings};

/// A running game: the state, its RNG and the continuation scheduler.
///
/// This is the presentation layer's entry point. Intents go through
/// [`GameSession::dispatch`]; time goes through [`GameSession::advance`].
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    rng: GameRng,
    scheduler: Scheduler,
    notices: Vec<Notice>,
}

impl GameSession {
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::default(), Settings::default(), seed)
    }

    pub fn with_config(config: GameConfig, settings: Settings, seed: u64) -> Self {
        let (state, rng) = new_game_with(config, settings, seed);
        Self::from_state(state, rng)
    }

    /// Resume from an existing state, scheduling whatever it calls for.
    pub fn from_state(state: GameState, rng: GameRng) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.reconcile(&state);
        GameSession {
            state,
            rng,
            scheduler,
            notices: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn legal_actions(&self) -> Vec<Action> {
        legal_actions(&self.state)
    }

    /// Continuations waiting on the clock, earliest first.
    pub fn pending(&self) -> Vec<(Continuation, Duration)> {
        let mut pending: Vec<_> = self
            .scheduler
            .pending()
            .map(|s| (s.continuation, s.due))
            .collect();
        pending.sort_by_key(|(_, due)| *due);
        pending
    }

    /// Apply an intent from the presentation layer.
    ///
    /// Scheduler-only intents are refused here; they arrive through
    /// [`GameSession::advance`].
    pub fn dispatch(&mut self, action: &Action) -> StepResult {
        if action.is_continuation() {
            return StepResult::Rejected(Notice::OutOfTurn);
        }
        self.apply(action)
    }

    /// Let `elapsed` of virtual time pass, firing every continuation that
    /// comes due in order. Returns the result of each one fired.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<StepResult> {
        let target = self.scheduler.now() + elapsed;
        let mut results = Vec::new();

        while let Some(continuation) = self.scheduler.pop_due(target) {
            let result = self.apply(&continuation.action());
            debug!(?continuation, ?result, "continuation fired");
            results.push(result);
        }

        self.scheduler.set_now(target);
        results
    }

    /// Advance straight to the next pending continuation and fire it.
    pub fn step_next(&mut self) -> Option<StepResult> {
        let due = self.scheduler.next_due()?;
        let elapsed = due.saturating_sub(self.scheduler.now());
        self.advance(elapsed).into_iter().last()
    }

    /// Fire continuations until the human has to act (or the game ends),
    /// ignoring the turn timer. Gives up after `max_steps` firings.
    pub fn settle(&mut self, max_steps: usize) -> Vec<StepResult> {
        let mut results = Vec::new();
        for _ in 0..max_steps {
            let waiting_on_timer_only = self
                .scheduler
                .pending()
                .all(|s| s.continuation == Continuation::Tick);
            if waiting_on_timer_only {
                break;
            }
            match self.step_next() {
                Some(result) => results.push(result),
                None => break,
            }
        }
        results
    }

    /// Advisory and rejection notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn is_done(&self) -> bool {
        self.state.is_terminal()
    }

    fn apply(&mut self, action: &Action) -> StepResult {
        let result = apply_action(&mut self.state, action, &mut self.rng);
        if let Some(notice) = result.notice() {
            if !matches!(notice, Notice::Stale) {
                self.notices.push(notice.clone());
            }
        }
        self.scheduler.reconcile(&self.state);
        result
    }
}
