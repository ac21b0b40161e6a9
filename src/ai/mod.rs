pub mod computer;

pub use computer::get_computer_move;
