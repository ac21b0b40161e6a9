use std::path::Path;
use std::time::Duration;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::bridge::action_map::{
    action_from_json, action_mask, action_to_index, index_to_action, step_result_to_json,
    ACTION_SPACE_SIZE,
};
use crate::bridge::observation::{render_state, snapshot_json};
use crate::data::loader::{load_config, GameConfig};
use crate::game::engine::StepResult;
use crate::game::session::GameSession;
use crate::game::state::{AiDifficulty, Settings};

/// Python-facing game session: intents in, virtual time forward, snapshots out.
#[pyclass]
pub struct PyDuelEngine {
    config: GameConfig,
    session: Option<GameSession>,
}

#[pymethods]
impl PyDuelEngine {
    /// Create an engine, optionally loading rules from a JSON config file.
    #[new]
    #[pyo3(signature = (config_path=None))]
    fn new(config_path: Option<&str>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => load_config(Path::new(path)).map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => GameConfig::default(),
        };
        Ok(PyDuelEngine {
            config,
            session: None,
        })
    }

    /// Start a new game. Returns the initial JSON snapshot.
    #[pyo3(signature = (seed=42, difficulty="medium"))]
    fn reset(&mut self, seed: u64, difficulty: &str) -> PyResult<String> {
        let ai_difficulty = parse_difficulty(difficulty)?;
        let settings = Settings {
            ai_difficulty,
            ..Settings::default()
        };
        self.session = Some(GameSession::with_config(self.config.clone(), settings, seed));
        self.snapshot()
    }

    /// Apply a JSON intent. Returns the step result as JSON.
    fn dispatch(&mut self, action_json: &str) -> PyResult<String> {
        let action = action_from_json(action_json)
            .map_err(|e| PyValueError::new_err(format!("Invalid action: {}", e)))?;
        let result = self.session_mut()?.dispatch(&action);
        Ok(step_result_to_json(&result).to_string())
    }

    /// Apply a human intent by discrete index and return (result_json, done).
    fn step(&mut self, action_idx: usize) -> PyResult<(String, bool)> {
        let session = self.session_mut()?;
        let action = index_to_action(session.state(), action_idx)
            .ok_or_else(|| PyValueError::new_err(format!("Invalid action index: {}", action_idx)))?;
        let result = session.dispatch(&action);
        let done = matches!(result, StepResult::GameOver { .. }) || session.is_done();
        Ok((step_result_to_json(&result).to_string(), done))
    }

    /// Let `millis` of virtual time pass. Returns the fired results as JSON.
    fn advance(&mut self, millis: u64) -> PyResult<Vec<String>> {
        let results = self.session_mut()?.advance(Duration::from_millis(millis));
        Ok(results
            .iter()
            .map(|r| step_result_to_json(r).to_string())
            .collect())
    }

    /// Fire pending continuations until the human has to act.
    #[pyo3(signature = (max_steps=64))]
    fn settle(&mut self, max_steps: usize) -> PyResult<usize> {
        Ok(self.session_mut()?.settle(max_steps).len())
    }

    /// Get the legal action mask (bool vector of size ACTION_SPACE_SIZE).
    fn action_masks(&self) -> PyResult<Vec<bool>> {
        Ok(action_mask(self.session()?.state()))
    }

    /// Get legal action indices.
    fn legal_action_indices(&self) -> PyResult<Vec<usize>> {
        let session = self.session()?;
        Ok(session
            .legal_actions()
            .iter()
            .filter_map(|a| action_to_index(session.state(), a))
            .collect())
    }

    #[staticmethod]
    fn action_space_size() -> usize {
        ACTION_SPACE_SIZE
    }

    /// Full JSON snapshot of the game state.
    fn snapshot(&self) -> PyResult<String> {
        snapshot_json(self.session()?.state()).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Advisory notices raised since the last call, as display text.
    fn take_notices(&mut self) -> PyResult<Vec<String>> {
        Ok(self
            .session_mut()?
            .take_notices()
            .iter()
            .map(|n| n.to_string())
            .collect())
    }

    fn is_done(&self) -> PyResult<bool> {
        Ok(self.session()?.is_done())
    }

    /// "player", "computer" or None.
    fn winner(&self) -> PyResult<Option<&'static str>> {
        Ok(self.session()?.state().winner.map(|w| w.label()))
    }

    /// Virtual milliseconds elapsed in this game.
    fn now_ms(&self) -> PyResult<u64> {
        Ok(self.session()?.now().as_millis() as u64)
    }

    /// Get a text rendering of the board state.
    fn render(&self) -> PyResult<String> {
        Ok(render_state(self.session()?.state()))
    }
}

impl PyDuelEngine {
    fn session(&self) -> PyResult<&GameSession> {
        self.session
            .as_ref()
            .ok_or_else(|| PyValueError::new_err("Game not initialized. Call reset() first."))
    }

    fn session_mut(&mut self) -> PyResult<&mut GameSession> {
        self.session
            .as_mut()
            .ok_or_else(|| PyValueError::new_err("Game not initialized. Call reset() first."))
    }
}

fn parse_difficulty(name: &str) -> PyResult<AiDifficulty> {
    match name.to_ascii_lowercase().as_str() {
        "easy" => Ok(AiDifficulty::Easy),
        "medium" => Ok(AiDifficulty::Medium),
        "hard" => Ok(AiDifficulty::Hard),
        other => Err(PyValueError::new_err(format!("Unknown difficulty: {}", other))),
    }
}

/// Register the PyO3 module.
#[pymodule]
pub fn duelforge_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDuelEngine>()?;
    m.add("ACTION_SPACE_SIZE", ACTION_SPACE_SIZE)?;
    Ok(())
}
