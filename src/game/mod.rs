pub mod actions;
pub mod engine;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod state;
