pub mod controller;
pub mod difficulty;
pub mod params;
pub mod policy;
pub mod selfplay;

pub use controller::DuelController;
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use params::PolicyParams;
pub use policy::{
    EasyPolicy, LaneEval, Policy, PolicyContext, RandomPolicy, StrategicPolicy, decide,
    enforce_capacity,
};
pub use selfplay::{Seat, play_out, play_seats};
