use core::fmt;
use serde::{Deserialize, Serialize};

/// One of the two combatants. `One` is the side the caller controls; `Two` is
/// the built-in opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    One = 0,
    Two = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Side::One),
            1 => Some(Side::Two),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Side::One => "p1",
            Side::Two => "p2",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
