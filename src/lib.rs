pub mod config;
pub mod engine;
pub mod export;
pub mod keypad;

pub use engine::Engine;
pub use engine::program::{Program, ProgramEntry};
pub use keypad::{Keypad, KeypadError};
