use crate::model::card::Card;
use crate::model::ruleset::Ruleset;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Unshuffled deck: every copy, suit by suit, ranks in ruleset order.
    pub fn build(ruleset: &Ruleset) -> Self {
        let mut cards = Vec::with_capacity(ruleset.deck_size());
        for _ in 0..ruleset.copies() {
            for suit in ruleset.suits().iter().copied() {
                for rank in ruleset.ranks().iter().copied() {
                    cards.push(ruleset.card(rank, suit));
                }
            }
        }
        Self { cards }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffled<R: Rng + ?Sized>(ruleset: &Ruleset, rng: &mut R) -> Self {
        let mut deck = Self::build(ruleset);
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(ruleset: &Ruleset, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(ruleset, &mut rng)
    }

    /// Fisher-Yates, walking from the last slot down and swapping each slot
    /// with a uniformly drawn index in `0..=i`.
    pub fn shuffle_in_place<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.gen_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    /// Cuts the deck in two equal halves; the top half goes first.
    pub fn split(self) -> (Deck, Deck) {
        let mut first = self.cards;
        let second = first.split_off(first.len() / 2);
        (Deck { cards: first }, Deck { cards: second })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Deck;
    use crate::model::rank::Rank;
    use crate::model::ruleset::Ruleset;
    use crate::model::suit::Suit;
    use std::collections::HashMap;

    fn sorted_keys(deck: &Deck) -> Vec<(Suit, Rank, i32)> {
        let mut keys: Vec<_> = deck
            .cards()
            .iter()
            .map(|card| (card.suit, card.rank, card.value))
            .collect();
        keys.sort();
        keys
    }

    #[test]
    fn standard_deck_has_36_unique_cards() {
        let deck = Deck::build(&Ruleset::standard());
        assert_eq!(deck.len(), 36);

        let mut seen = HashMap::new();
        for card in deck.cards() {
            *seen.entry((card.suit, card.rank)).or_insert(0) += 1;
        }
        assert_eq!(seen.len(), 36);
        assert!(seen.values().all(|&count| count == 1));
    }

    #[test]
    fn court_deck_holds_two_copies_of_each_pair() {
        let deck = Deck::build(&Ruleset::court());
        assert_eq!(deck.len(), 40);
        let aces = deck
            .cards()
            .iter()
            .filter(|card| card.rank == Rank::Ace && card.suit == Suit::Spades)
            .count();
        assert_eq!(aces, 2);
    }

    #[test]
    fn build_assigns_values_from_table() {
        let deck = Deck::build(&Ruleset::standard());
        assert!(deck.cards().iter().all(|card| card.value == card.rank.value() as i32));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let rules = Ruleset::standard();
        for seed in 0..16 {
            let fresh = Deck::build(&rules);
            let shuffled = Deck::shuffled_with_seed(&rules, seed);
            assert_eq!(sorted_keys(&fresh), sorted_keys(&shuffled));
        }
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let rules = Ruleset::standard();
        let deck_a = Deck::shuffled_with_seed(&rules, 42);
        let deck_b = Deck::shuffled_with_seed(&rules, 42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let rules = Ruleset::standard();
        let deck_a = Deck::shuffled_with_seed(&rules, 1);
        let deck_b = Deck::shuffled_with_seed(&rules, 2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn split_halves_preserve_order() {
        let deck = Deck::build(&Ruleset::court());
        let expected = deck.cards().to_vec();
        let (top, bottom) = deck.split();
        assert_eq!(top.len(), 20);
        assert_eq!(bottom.len(), 20);
        assert_eq!(top.cards(), &expected[..20]);
        assert_eq!(bottom.cards(), &expected[20..]);
    }
}
