pub mod action_map;
pub mod observation;

#[cfg(feature = "python")]
pub mod pymodule;
