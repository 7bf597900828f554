use crate::policy::{EasyPolicy, Policy, RandomPolicy, StrategicPolicy};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Random,
    Easy,
    #[default]
    Pro,
    HardPlus,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected random, easy, pro, hard+ or 0-3)")]
pub struct ParseDifficultyError(pub String);

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Random,
        Difficulty::Easy,
        Difficulty::Pro,
        Difficulty::HardPlus,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Random => "RANDOM",
            Difficulty::Easy => "EASY",
            Difficulty::Pro => "PRO",
            Difficulty::HardPlus => "HARD+",
        }
    }

    /// Reads `LANEWAR_DIFFICULTY` once per process; unset or unparsable
    /// values fall back to Pro.
    pub fn from_env() -> Self {
        static CACHED: OnceLock<Difficulty> = OnceLock::new();
        *CACHED.get_or_init(|| Self::from_reader(|key| std::env::var(key).ok()))
    }

    pub(crate) fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        read("LANEWAR_DIFFICULTY")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub const fn can_peek(self) -> bool {
        matches!(self, Difficulty::HardPlus)
    }

    pub fn policy(self) -> Box<dyn Policy> {
        match self {
            Difficulty::Random => Box::new(RandomPolicy::new()),
            Difficulty::Easy => Box::new(EasyPolicy::new()),
            Difficulty::Pro => Box::new(StrategicPolicy::pro()),
            Difficulty::HardPlus => Box::new(StrategicPolicy::hard_plus()),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "0" => Ok(Difficulty::Random),
            "easy" | "1" => Ok(Difficulty::Easy),
            // "smart" is the middle tier of the three-level menu.
            "pro" | "smart" | "2" => Ok(Difficulty::Pro),
            "hard+" | "hard_plus" | "hardplus" | "hard" | "3" => Ok(Difficulty::HardPlus),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
