use super::outcome::Outcome;
use super::state::GameState;
use crate::model::lane::Lane;
use crate::model::ledger::Play;
use crate::model::side::Side;
use serde::{Deserialize, Serialize};

/// Read-only view of one lane for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaneSnapshot {
    pub lane: Lane,
    pub score1: i32,
    pub score2: i32,
    pub history: Vec<Play>,
}

/// What a renderer may observe between rounds. Capture only; games in
/// progress are never restored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateSnapshot {
    pub ruleset: String,
    pub rounds_played: usize,
    pub deck1: usize,
    pub deck2: usize,
    pub lanes: Vec<LaneSnapshot>,
    pub is_game_over: bool,
    pub outcome: Option<Outcome>,
}

impl StateSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let lanes = state
            .ledger()
            .lanes()
            .map(|(lane, record)| LaneSnapshot {
                lane,
                score1: record.score(Side::One),
                score2: record.score(Side::Two),
                history: record.history().to_vec(),
            })
            .collect();

        StateSnapshot {
            ruleset: state.ruleset().name().to_string(),
            rounds_played: state.rounds_played(),
            deck1: state.deck_len(Side::One),
            deck2: state.deck_len(Side::Two),
            lanes,
            is_game_over: state.is_game_over(),
            outcome: state.outcome(),
        }
    }

    pub fn to_json(state: &GameState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::StateSnapshot;
    use crate::game::state::GameState;
    use crate::model::lane::Lane;
    use crate::model::ruleset::Ruleset;

    #[test]
    fn snapshot_serializes_to_json() {
        let mut state = GameState::with_seed(Ruleset::standard(), 99);
        state.resolve_round(Lane::Left, Lane::Right);
        let json = StateSnapshot::to_json(&state).unwrap();
        assert!(json.contains("\"rounds_played\": 1"));
        assert!(json.contains("\"deck1\": 35"));
        assert!(json.contains("\"lane\": \"left\""));
        assert!(json.contains("\"outcome\": null"));
    }

    #[test]
    fn snapshot_reflects_ledger() {
        let mut state = GameState::with_seed(Ruleset::court(), 5);
        let result = state.resolve_round(Lane::Center, Lane::Center).unwrap();
        let snapshot = StateSnapshot::capture(&state);
        let center = &snapshot.lanes[Lane::Center.index()];
        assert_eq!(center.score1, result.side_one.card.value);
        assert_eq!(center.score2, result.side_two.card.value);
        assert_eq!(center.history.len(), 2);
        assert!(snapshot.lanes[Lane::Left.index()].history.is_empty());
    }

    #[test]
    fn snapshot_json_roundtrips() {
        let mut state = GameState::with_seed(Ruleset::standard(), 1);
        while state.resolve_round(Lane::Right, Lane::Left).is_some() {}
        let json = StateSnapshot::to_json(&state).unwrap();
        let decoded = StateSnapshot::from_json(&json).unwrap();
        assert_eq!(decoded, StateSnapshot::capture(&state));
        assert!(decoded.is_game_over);
        assert!(decoded.outcome.is_some());
    }
}
