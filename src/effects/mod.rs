pub mod combat;
pub mod mechanics;
pub mod registry;
pub mod status;
