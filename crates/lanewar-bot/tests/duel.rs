use lanewar_bot::{Difficulty, DuelController};
use lanewar_core::game::history::{DEFAULT_HISTORY_LIMIT, HistoryStore, MemoryHistory};
use lanewar_core::game::serialization::StateSnapshot;
use lanewar_core::model::lane::Lane;
use lanewar_core::model::ruleset::Ruleset;
use lanewar_core::model::side::Side;

const LANE_NAMES: [&str; 3] = ["left", "center", "right"];

/// Plays side one by cycling through the lane names, skipping full lanes.
fn play_cycling(controller: &mut DuelController) -> usize {
    let mut rounds = 0;
    let mut next = 0;
    while !controller.is_game_over() {
        let name = (0..LANE_NAMES.len())
            .map(|offset| LANE_NAMES[(next + offset) % LANE_NAMES.len()])
            .find(|name| {
                let lane: Lane = name.parse().expect("canonical name");
                controller.state().has_capacity(lane, Side::One)
            })
            .expect("an open lane while cards remain");
        next += 1;
        if controller
            .play_named_round(name)
            .expect("valid lane")
            .is_some()
        {
            rounds += 1;
        }
    }
    rounds
}

#[test]
fn recent_results_keep_the_last_ten_games() {
    let mut controller = DuelController::with_seed(Ruleset::court(), Difficulty::Pro, 2024);
    let mut history = MemoryHistory::new();

    for game in 0..15 {
        if game > 0 {
            controller.initialize_game();
        }
        let rounds = play_cycling(&mut controller);
        assert_eq!(rounds, controller.state().initial_deck_size());
        controller.record_outcome(&mut history).expect("game finished");
    }

    assert_eq!(history.len(), DEFAULT_HISTORY_LIMIT);
    assert_eq!(history.tally().games(), DEFAULT_HISTORY_LIMIT);
    assert_eq!(history.strip().chars().count(), DEFAULT_HISTORY_LIMIT);

    history.clear();
    assert!(history.load().is_empty());
}

#[test]
fn every_difficulty_finishes_a_standard_game() {
    for difficulty in Difficulty::ALL {
        let mut controller = DuelController::with_seed(Ruleset::standard(), difficulty, 8);
        let rounds = controller.simulate_rest_of_game();
        assert_eq!(rounds.len(), 36, "{difficulty}");

        let cap = controller.state().lane_cap();
        for lane in Lane::ALL {
            assert!(controller.state().ledger().cards_played(lane, Side::Two) <= cap);
        }
    }
}

#[test]
fn snapshot_reflects_the_board() {
    let mut controller = DuelController::with_seed(Ruleset::standard(), Difficulty::HardPlus, 40);
    for lane in [Lane::Left, Lane::Right, Lane::Right] {
        controller.play_round(lane).expect("round resolves");
    }

    let json = StateSnapshot::to_json(controller.state()).expect("serializes");
    let snapshot = StateSnapshot::from_json(&json).expect("parses");
    assert_eq!(snapshot, controller.snapshot());
    assert_eq!(snapshot.rounds_played, 3);
    assert_eq!(snapshot.deck1, 33);
    assert_eq!(snapshot.deck2, 33);
    assert!(!snapshot.is_game_over);
    assert_eq!(snapshot.outcome, None);

    let left = &snapshot.lanes[Lane::Left.index()];
    assert_eq!(left.score1, controller.state().ledger().score(Lane::Left, Side::One));
}
