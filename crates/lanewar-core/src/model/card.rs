use crate::model::rank::Rank;
use crate::model::suit::{Color, Suit};
use core::fmt;
use serde::{Deserialize, Serialize};

/// A dealt card. The score contribution is fixed by the ruleset's value table
/// when the deck is built and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub value: i32,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit, value: i32) -> Self {
        Self { rank, suit, value }
    }

    pub const fn color(self) -> Color {
        self.suit.color()
    }

    pub const fn is_red(self) -> bool {
        matches!(self.color(), Color::Red)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit};
    use crate::model::suit::Color;

    #[test]
    fn color_follows_suit() {
        let card = Card::new(Rank::Five, Suit::Diamonds, 5);
        assert_eq!(card.color(), Color::Red);
        assert!(card.is_red());
        assert!(!Card::new(Rank::Five, Suit::Clubs, 5).is_red());
    }

    #[test]
    fn display_is_rank_then_suit() {
        let card = Card::new(Rank::Jack, Suit::Spades, -10);
        assert_eq!(card.to_string(), "JS");
    }
}
