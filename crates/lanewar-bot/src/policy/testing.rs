use lanewar_core::game::state::GameState;
use lanewar_core::model::card::Card;
use lanewar_core::model::deck::Deck;
use lanewar_core::model::lane::Lane;
use lanewar_core::model::rank::Rank;
use lanewar_core::model::ruleset::Ruleset;
use lanewar_core::model::side::Side;
use lanewar_core::model::suit::Suit;

fn record(state: &mut GameState, plays: &[(Lane, Side, i32)]) {
    for (lane, side, value) in plays.iter().copied() {
        state
            .ledger_mut()
            .record_play(lane, side, Card::new(Rank::Five, Suit::Clubs, value));
    }
}

fn diff_plays(diffs: [i32; 3]) -> Vec<(Lane, Side, i32)> {
    Lane::ALL
        .into_iter()
        .zip(diffs)
        .flat_map(|(lane, diff)| [(lane, Side::One, 5), (lane, Side::Two, 5 + diff)])
        .collect()
}

/// Fresh standard game with the given plays already on the board. Both decks
/// are unshuffled, so each side draws the two of spades first.
pub(crate) fn state_with_plays(plays: &[(Lane, Side, i32)]) -> GameState {
    let rules = Ruleset::standard();
    let deck = Deck::build(&rules).into_cards();
    let mut state =
        GameState::from_decks(rules, deck.clone(), deck).expect("equal decks");
    record(&mut state, plays);
    state
}

/// One card per side in every lane, arranged so side two sees `diffs`.
pub(crate) fn state_with_diffs(diffs: [i32; 3]) -> GameState {
    state_with_plays(&diff_plays(diffs))
}

/// Like [`state_with_diffs`], with side two's next card worth `next`.
pub(crate) fn state_with_next_card(next: i32, diffs: [i32; 3]) -> GameState {
    let rules = Ruleset::standard();
    let one = Deck::build(&rules).into_cards();
    let mut two = one.clone();
    two[0] = Card::new(Rank::Nine, Suit::Hearts, next);
    let mut state = GameState::from_decks(rules, one, two).expect("equal decks");
    record(&mut state, &diff_plays(diffs));
    state
}

/// Fills `lane` for `side` up to the cap.
pub(crate) fn fill_lane(state: &mut GameState, lane: Lane, side: Side) {
    while state.has_capacity(lane, side) {
        state
            .ledger_mut()
            .record_play(lane, side, Card::new(Rank::Two, Suit::Spades, 0));
    }
}
