use crate::model::card::Card;
use crate::model::lane::LANE_COUNT;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rank to score mapping for a ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueTable {
    /// 2..=10 score their printed number; J, Q, K and A score 0.
    Face,
    /// A=25, K=20, Q=10, J=-10 (traitor), 10=0 (dud); 2..=9 score their
    /// printed number.
    Court,
}

impl ValueTable {
    pub const fn value(self, rank: Rank) -> i32 {
        match self {
            ValueTable::Face => match rank.face_value() {
                Some(value) => value,
                None => 0,
            },
            ValueTable::Court => match rank {
                Rank::Ace => 25,
                Rank::King => 20,
                Rank::Queen => 10,
                Rank::Jack => -10,
                Rank::Ten => 0,
                other => match other.face_value() {
                    Some(value) => value,
                    None => 0,
                },
            },
        }
    }
}

/// How a built deck reaches the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealMode {
    /// Each side gets its own full deck.
    PerSide,
    /// One deck is shuffled and cut in half.
    Split,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesetError {
    #[error("ruleset '{0}' has no ranks")]
    NoRanks(String),
    #[error("ruleset '{0}' must use at least one copy of each card")]
    NoCopies(String),
    #[error("unknown ruleset '{0}' (expected 'standard' or 'court')")]
    Unknown(String),
}

/// Suit set, rank set and value table for one playable variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    name: String,
    ranks: Vec<Rank>,
    copies: usize,
    deal: DealMode,
    values: ValueTable,
}

impl Ruleset {
    pub fn new(
        name: impl Into<String>,
        ranks: Vec<Rank>,
        copies: usize,
        deal: DealMode,
        values: ValueTable,
    ) -> Result<Self, RulesetError> {
        let name = name.into();
        if ranks.is_empty() {
            return Err(RulesetError::NoRanks(name));
        }
        if copies == 0 {
            return Err(RulesetError::NoCopies(name));
        }
        Ok(Self {
            name,
            ranks,
            copies,
            deal,
            values,
        })
    }

    /// Ranks 2 through 10 at face value, a 36-card deck for each side.
    pub fn standard() -> Self {
        Self {
            name: "standard".to_string(),
            ranks: Rank::NUMERIC.to_vec(),
            copies: 1,
            deal: DealMode::PerSide,
            values: ValueTable::Face,
        }
    }

    /// Ten through ace on the court table, doubled to 40 cards and split 20/20.
    pub fn court() -> Self {
        Self {
            name: "court".to_string(),
            ranks: Rank::COURT.to_vec(),
            copies: 2,
            deal: DealMode::Split,
            values: ValueTable::Court,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suits(&self) -> &'static [Suit] {
        &Suit::ALL
    }

    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    pub fn copies(&self) -> usize {
        self.copies
    }

    pub fn deal_mode(&self) -> DealMode {
        self.deal
    }

    pub fn value_table(&self) -> ValueTable {
        self.values
    }

    pub fn card(&self, rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit, self.values.value(rank))
    }

    /// Cards in one built deck.
    pub fn deck_size(&self) -> usize {
        self.suits().len() * self.ranks.len() * self.copies
    }

    /// Cards each side starts with.
    pub fn side_deck_size(&self) -> usize {
        match self.deal {
            DealMode::PerSide => self.deck_size(),
            DealMode::Split => self.deck_size() / 2,
        }
    }

    /// Plays allowed per side in a single lane. Three lanes at this cap always
    /// hold a full side deck, so some lane stays open until the deck runs out.
    pub fn lane_cap(&self) -> usize {
        self.side_deck_size().div_ceil(LANE_COUNT)
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for Ruleset {
    type Err = RulesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "classic" | "war0" => Ok(Ruleset::standard()),
            "court" | "war1" => Ok(Ruleset::court()),
            _ => Err(RulesetError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_ruleset_sizes() {
        let rules = Ruleset::standard();
        assert_eq!(rules.deck_size(), 36);
        assert_eq!(rules.side_deck_size(), 36);
        assert_eq!(rules.lane_cap(), 12);
    }

    #[test]
    fn court_ruleset_splits_double_deck() {
        let rules = Ruleset::court();
        assert_eq!(rules.deck_size(), 40);
        assert_eq!(rules.side_deck_size(), 20);
        assert_eq!(rules.lane_cap(), 7);
        assert!(rules.lane_cap() * LANE_COUNT >= rules.side_deck_size());
    }

    #[test]
    fn court_values_match_table() {
        let table = ValueTable::Court;
        assert_eq!(table.value(Rank::Ace), 25);
        assert_eq!(table.value(Rank::King), 20);
        assert_eq!(table.value(Rank::Queen), 10);
        assert_eq!(table.value(Rank::Jack), -10);
        assert_eq!(table.value(Rank::Ten), 0);
        assert_eq!(table.value(Rank::Four), 4);
    }

    #[test]
    fn face_values_default_to_zero_for_court_cards() {
        let table = ValueTable::Face;
        assert_eq!(table.value(Rank::Two), 2);
        assert_eq!(table.value(Rank::Ten), 10);
        assert_eq!(table.value(Rank::King), 0);
    }

    #[test]
    fn rejects_empty_ranks_and_copies() {
        let err = Ruleset::new("empty", Vec::new(), 1, DealMode::PerSide, ValueTable::Face)
            .expect_err("no ranks");
        assert_eq!(err, RulesetError::NoRanks("empty".to_string()));

        let err = Ruleset::new("none", vec![Rank::Two], 0, DealMode::Split, ValueTable::Face)
            .expect_err("no copies");
        assert_eq!(err, RulesetError::NoCopies("none".to_string()));
    }

    #[test]
    fn full_deck_custom_ruleset() {
        let rules = Ruleset::new(
            "full",
            Rank::ORDERED.to_vec(),
            1,
            DealMode::PerSide,
            ValueTable::Court,
        )
        .expect("valid ruleset");
        assert_eq!(rules.deck_size(), 52);
        assert_eq!(rules.lane_cap(), 18);
    }

    #[test]
    fn parses_ruleset_names() {
        assert_eq!("Standard".parse::<Ruleset>(), Ok(Ruleset::standard()));
        assert_eq!("court".parse::<Ruleset>(), Ok(Ruleset::court()));
        assert!("poker".parse::<Ruleset>().is_err());
    }
}
