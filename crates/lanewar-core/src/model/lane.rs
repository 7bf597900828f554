use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LANE_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Lane {
    Left = 0,
    Center = 1,
    Right = 2,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid lane '{0}' (expected left, center or right)")]
pub struct ParseLaneError(pub String);

impl Lane {
    pub const ALL: [Lane; LANE_COUNT] = [Lane::Left, Lane::Center, Lane::Right];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Lane::Left),
            1 => Some(Lane::Center),
            2 => Some(Lane::Right),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Lane::Left => "left",
            Lane::Center => "center",
            Lane::Right => "right",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lane {
    type Err = ParseLaneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Lane::Left),
            "center" => Ok(Lane::Center),
            "right" => Ok(Lane::Right),
            other => Err(ParseLaneError(other.to_string())),
        }
    }
}
