pub mod card;
pub mod deck;
pub mod factory;
pub mod loader;
