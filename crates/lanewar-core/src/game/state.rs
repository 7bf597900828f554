use crate::game::outcome::Outcome;
use crate::game::round::{GamePhase, Move, RoundError, RoundResult};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::lane::Lane;
use crate::model::ledger::Ledger;
use crate::model::ruleset::{DealMode, Ruleset};
use crate::model::side::Side;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// Decks, lanes and phase of one game. Decks are FIFO queues: the front card
/// is the next one drawn.
#[derive(Debug, Clone)]
pub struct GameState {
    ruleset: Ruleset,
    decks: [VecDeque<Card>; 2],
    initial_deck_size: usize,
    ledger: Ledger,
    phase: GamePhase,
    rounds_played: usize,
}

impl GameState {
    pub fn deal<R: Rng + ?Sized>(ruleset: Ruleset, rng: &mut R) -> Self {
        let (one, two) = match ruleset.deal_mode() {
            DealMode::PerSide => {
                let one = Deck::shuffled(&ruleset, rng);
                let two = Deck::shuffled(&ruleset, rng);
                (one, two)
            }
            DealMode::Split => Deck::shuffled(&ruleset, rng).split(),
        };
        let initial_deck_size = one.len();
        Self {
            ruleset,
            decks: [one.into_cards().into(), two.into_cards().into()],
            initial_deck_size,
            ledger: Ledger::new(),
            phase: GamePhase::InProgress,
            rounds_played: 0,
        }
    }

    pub fn with_seed(ruleset: Ruleset, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::deal(ruleset, &mut rng)
    }

    /// Builds a state from explicit deck orders; the first card of each vector
    /// is drawn first.
    pub fn from_decks(ruleset: Ruleset, one: Vec<Card>, two: Vec<Card>) -> Result<Self, RoundError> {
        if one.len() != two.len() {
            return Err(RoundError::UnevenDecks {
                one: one.len(),
                two: two.len(),
            });
        }
        let phase = if one.is_empty() {
            GamePhase::GameOver
        } else {
            GamePhase::InProgress
        };
        Ok(Self {
            ruleset,
            initial_deck_size: one.len(),
            decks: [one.into(), two.into()],
            ledger: Ledger::new(),
            phase,
            rounds_played: 0,
        })
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver)
    }

    pub fn deck(&self, side: Side) -> &VecDeque<Card> {
        &self.decks[side.index()]
    }

    pub fn deck_len(&self, side: Side) -> usize {
        self.decks[side.index()].len()
    }

    /// Cards left in side one's deck; both decks shrink in lockstep.
    pub fn cards_remaining(&self) -> usize {
        self.deck_len(Side::One)
    }

    pub fn initial_deck_size(&self) -> usize {
        self.initial_deck_size
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    /// Next card `side` would draw. Only the owning side's policy may look.
    pub fn peek(&self, side: Side) -> Option<Card> {
        self.decks[side.index()].front().copied()
    }

    pub fn lane_cap(&self) -> usize {
        self.ruleset.lane_cap()
    }

    pub fn has_capacity(&self, lane: Lane, side: Side) -> bool {
        self.ledger.cards_played(lane, side) < self.lane_cap()
    }

    /// Lanes where `side` is still under the per-lane cap, in lane order.
    pub fn open_lanes(&self, side: Side) -> Vec<Lane> {
        Lane::ALL
            .into_iter()
            .filter(|lane| self.has_capacity(*lane, side))
            .collect()
    }

    /// `None` until the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_game_over()
            .then(|| Outcome::from_ledger(&self.ledger))
    }

    /// Moves to `GameOver` when either deck is empty and reports whether the
    /// game has ended.
    pub fn check_game_over(&mut self) -> bool {
        if self.decks.iter().any(VecDeque::is_empty) {
            self.phase = GamePhase::GameOver;
        }
        self.is_game_over()
    }

    /// Draws one card per side and commits each to its lane. Returns `None`
    /// without touching anything once the game is over.
    pub fn resolve_round(&mut self, one_lane: Lane, two_lane: Lane) -> Option<RoundResult> {
        if self.check_game_over() {
            return None;
        }

        let (card_one, card_two) = match (
            self.decks[Side::One.index()].pop_front(),
            self.decks[Side::Two.index()].pop_front(),
        ) {
            (Some(one), Some(two)) => (one, two),
            _ => {
                self.phase = GamePhase::GameOver;
                return None;
            }
        };

        self.ledger.record_play(one_lane, Side::One, card_one);
        self.ledger.record_play(two_lane, Side::Two, card_two);
        self.rounds_played += 1;

        let result = RoundResult {
            round: self.rounds_played,
            side_one: Move {
                lane: one_lane,
                card: card_one,
                score: self.ledger.score(one_lane, Side::One),
            },
            side_two: Move {
                lane: two_lane,
                card: card_two,
                score: self.ledger.score(two_lane, Side::Two),
            },
            cards_remaining: self.cards_remaining(),
        };

        self.check_game_over();
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game::round::{GamePhase, RoundError};
    use crate::model::card::Card;
    use crate::model::lane::Lane;
    use crate::model::rank::Rank;
    use crate::model::ruleset::Ruleset;
    use crate::model::side::Side;
    use crate::model::suit::Suit;

    fn cards(values: &[u8]) -> Vec<Card> {
        let rules = Ruleset::standard();
        values
            .iter()
            .map(|v| rules.card(Rank::from_value(*v).expect("rank"), Suit::Clubs))
            .collect()
    }

    #[test]
    fn standard_deal_gives_each_side_36_cards() {
        let state = GameState::with_seed(Ruleset::standard(), 7);
        assert_eq!(state.deck_len(Side::One), 36);
        assert_eq!(state.deck_len(Side::Two), 36);
        assert_eq!(state.initial_deck_size(), 36);
        assert!(!state.is_game_over());
    }

    #[test]
    fn court_deal_splits_one_deck() {
        let state = GameState::with_seed(Ruleset::court(), 7);
        assert_eq!(state.deck_len(Side::One), 20);
        assert_eq!(state.deck_len(Side::Two), 20);
        let aces = state
            .deck(Side::One)
            .iter()
            .chain(state.deck(Side::Two).iter())
            .filter(|card| card.rank == Rank::Ace)
            .count();
        assert_eq!(aces, 8);
    }

    #[test]
    fn resolve_round_draws_front_cards() {
        let mut state =
            GameState::from_decks(Ruleset::standard(), cards(&[9, 2]), cards(&[4, 3])).unwrap();
        let result = state.resolve_round(Lane::Left, Lane::Right).expect("round resolves");

        assert_eq!(result.round, 1);
        assert_eq!(result.side_one.card.value, 9);
        assert_eq!(result.side_one.score, 9);
        assert_eq!(result.side_two.lane, Lane::Right);
        assert_eq!(result.side_two.score, 4);
        assert_eq!(result.cards_remaining, 1);
        assert!(!state.is_game_over());

        let result = state.resolve_round(Lane::Left, Lane::Left).expect("second round");
        assert_eq!(result.side_one.score, 11);
        assert_eq!(result.side_two.score, 3);
        assert_eq!(result.cards_remaining, 0);
        assert!(state.is_game_over());
    }

    #[test]
    fn no_round_after_game_over() {
        let mut state =
            GameState::from_decks(Ruleset::standard(), cards(&[5]), cards(&[6])).unwrap();
        assert!(state.resolve_round(Lane::Center, Lane::Center).is_some());
        let before = state.ledger().clone();
        assert!(state.resolve_round(Lane::Center, Lane::Center).is_none());
        assert_eq!(state.ledger(), &before);
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn uneven_decks_are_rejected() {
        let err = GameState::from_decks(Ruleset::standard(), cards(&[5, 6]), cards(&[6]))
            .expect_err("uneven");
        assert_eq!(err, RoundError::UnevenDecks { one: 2, two: 1 });
    }

    #[test]
    fn empty_decks_start_over() {
        let state = GameState::from_decks(Ruleset::standard(), Vec::new(), Vec::new()).unwrap();
        assert!(state.is_game_over());
        assert!(state.outcome().is_some());
    }

    #[test]
    fn open_lanes_respect_cap() {
        let mut state = GameState::with_seed(Ruleset::standard(), 3);
        let cap = state.lane_cap();
        let filler = Card::new(Rank::Two, Suit::Hearts, 2);
        for _ in 0..cap {
            state.ledger_mut().record_play(Lane::Left, Side::Two, filler);
        }
        assert!(!state.has_capacity(Lane::Left, Side::Two));
        assert!(state.has_capacity(Lane::Left, Side::One));
        assert_eq!(state.open_lanes(Side::Two), vec![Lane::Center, Lane::Right]);
    }

    #[test]
    fn peek_shows_front_without_drawing() {
        let state =
            GameState::from_decks(Ruleset::standard(), cards(&[8, 2]), cards(&[3, 4])).unwrap();
        assert_eq!(state.peek(Side::One).map(|c| c.value), Some(8));
        assert_eq!(state.peek(Side::Two).map(|c| c.value), Some(3));
        assert_eq!(state.deck_len(Side::One), 2);
    }
}
