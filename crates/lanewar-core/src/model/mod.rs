pub mod card;
pub mod deck;
pub mod lane;
pub mod ledger;
pub mod rank;
pub mod ruleset;
pub mod side;
pub mod suit;
