pub mod history;
pub mod outcome;
pub mod round;
pub mod serialization;
pub mod state;
