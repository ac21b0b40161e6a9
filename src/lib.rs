pub mod ai;
pub mod bridge;
pub mod data;
pub mod effects;
pub mod game;

#[cfg(feature = "python")]
pub use bridge::pymodule::duelforge_engine;
